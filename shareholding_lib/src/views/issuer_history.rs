use shareholding_api::types::IssuerHistoryResponse;
use shareholding_api::Client;
use tokio::sync::watch;

use crate::async_data::{AsyncData, AsyncOptions, AsyncState};
use crate::error::ShareholdingError;
use crate::id::ResourceId;

type HistoryKey = (ResourceId, ResourceId);

/// Filing history of one issuer as reported by one filer.
///
/// Both ids must be valid for anything to be fetched.
pub struct IssuerHistoryView {
    data: AsyncData<HistoryKey, IssuerHistoryResponse>,
}

impl IssuerHistoryView {
    pub fn new(
        client: Client,
        filer_id: impl Into<ResourceId>,
        issuer_id: impl Into<ResourceId>,
    ) -> Self {
        let key = (filer_id.into(), issuer_id.into());
        let data = AsyncData::new(
            key,
            AsyncOptions::enabled(both_valid(key)),
            move |key: HistoryKey| {
                let client = client.clone();
                async move {
                    let (ResourceId::Valid(filer_id), ResourceId::Valid(issuer_id)) = key else {
                        return Err(ShareholdingError::InvalidId);
                    };
                    client
                        .get_issuer_history(filer_id, issuer_id)
                        .await
                        .map_err(ShareholdingError::from)
                }
            },
        );
        Self { data }
    }

    pub fn set_ids(&self, filer_id: impl Into<ResourceId>, issuer_id: impl Into<ResourceId>) {
        let key = (filer_id.into(), issuer_id.into());
        self.data.configure(key, both_valid(key));
    }

    pub fn data(&self) -> Option<IssuerHistoryResponse> {
        self.data.state().data.map(|d| (*d).clone())
    }

    pub fn loading(&self) -> bool {
        self.data.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.data.state().error
    }

    pub fn refetch(&self) {
        self.data.refetch();
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<IssuerHistoryResponse>> {
        self.data.subscribe()
    }

    pub fn state(&self) -> AsyncState<IssuerHistoryResponse> {
        self.data.state()
    }

    pub async fn settled(&self) -> AsyncState<IssuerHistoryResponse> {
        self.data.settled().await
    }
}

fn both_valid((filer_id, issuer_id): HistoryKey) -> bool {
    filer_id.is_valid() && issuer_id.is_valid()
}
