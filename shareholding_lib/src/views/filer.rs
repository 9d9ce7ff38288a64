use shareholding_api::types::Filer;
use shareholding_api::Client;
use tokio::sync::watch;

use crate::async_data::{AsyncData, AsyncOptions, AsyncState};
use crate::error::ShareholdingError;
use crate::id::ResourceId;

/// A single filer. An invalid id leaves the view idle.
pub struct FilerView {
    data: AsyncData<ResourceId, Filer>,
}

impl FilerView {
    pub fn new(client: Client, filer_id: impl Into<ResourceId>) -> Self {
        let filer_id = filer_id.into();
        let data = AsyncData::new(
            filer_id,
            AsyncOptions::enabled(filer_id.is_valid()),
            move |id: ResourceId| {
                let client = client.clone();
                async move {
                    let ResourceId::Valid(id) = id else {
                        return Err(ShareholdingError::InvalidId);
                    };
                    client.get_filer(id).await.map_err(ShareholdingError::from)
                }
            },
        );
        Self { data }
    }

    pub fn filer_id(&self) -> ResourceId {
        self.data.deps()
    }

    pub fn set_filer_id(&self, filer_id: impl Into<ResourceId>) {
        let filer_id = filer_id.into();
        self.data.configure(filer_id, filer_id.is_valid());
    }

    pub fn filer(&self) -> Option<Filer> {
        self.data.state().data.map(|f| (*f).clone())
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

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<Filer>> {
        self.data.subscribe()
    }

    pub fn state(&self) -> AsyncState<Filer> {
        self.data.state()
    }

    pub async fn settled(&self) -> AsyncState<Filer> {
        self.data.settled().await
    }
}
