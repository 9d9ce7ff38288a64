use shareholding_api::types::IssuerOwnershipResponse;
use shareholding_api::Client;
use tokio::sync::watch;

use crate::async_data::{AsyncData, AsyncOptions, AsyncState};
use crate::error::ShareholdingError;
use crate::id::ResourceId;

/// Shown instead of the raw error when the issuer does not exist.
pub const ISSUER_NOT_FOUND_MESSAGE: &str = "銘柄が見つかりませんでした";

/// Filers currently holding one issuer.
pub struct IssuerOwnershipsView {
    data: AsyncData<ResourceId, IssuerOwnershipResponse>,
}

impl IssuerOwnershipsView {
    pub fn new(client: Client, issuer_id: impl Into<ResourceId>) -> Self {
        let issuer_id = issuer_id.into();
        let data = AsyncData::new(
            issuer_id,
            AsyncOptions::enabled(issuer_id.is_valid()),
            move |id: ResourceId| {
                let client = client.clone();
                async move {
                    let ResourceId::Valid(id) = id else {
                        return Err(ShareholdingError::InvalidId);
                    };
                    client
                        .get_issuer_ownerships(id)
                        .await
                        .map_err(ShareholdingError::from)
                }
            },
        );
        Self { data }
    }

    pub fn set_issuer_id(&self, issuer_id: impl Into<ResourceId>) {
        let issuer_id = issuer_id.into();
        self.data.configure(issuer_id, issuer_id.is_valid());
    }

    pub fn data(&self) -> Option<IssuerOwnershipResponse> {
        self.data.state().data.map(|d| (*d).clone())
    }

    pub fn loading(&self) -> bool {
        self.data.state().loading
    }

    /// The fetch error, with any "404" failure replaced by [`ISSUER_NOT_FOUND_MESSAGE`].
    pub fn error(&self) -> Option<String> {
        self.data.state().error.map(localize_error)
    }

    pub fn refetch(&self) {
        self.data.refetch();
    }

    /// Receiver of raw states; errors are not localized.
    pub fn subscribe(&self) -> watch::Receiver<AsyncState<IssuerOwnershipResponse>> {
        self.data.subscribe()
    }

    /// Raw state; `error` here is not localized.
    pub fn state(&self) -> AsyncState<IssuerOwnershipResponse> {
        self.data.state()
    }

    /// Waits for the fetch to settle; the returned error is localized.
    pub async fn settled(&self) -> AsyncState<IssuerOwnershipResponse> {
        let mut state = self.data.settled().await;
        state.error = state.error.map(localize_error);
        state
    }
}

fn localize_error(message: String) -> String {
    if message.contains("404") {
        ISSUER_NOT_FOUND_MESSAGE.to_string()
    } else {
        message
    }
}
