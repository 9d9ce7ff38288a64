//! Library layer for the shareholding viewer: reactive view models over the
//! disclosure API client.
//!
//! Every view is built from two primitives: [`debounce::Debounced`] for search
//! input and [`async_data::AsyncData`] for loading/error/data state with
//! stale-response suppression.

pub mod async_data;
pub mod config;
pub mod debounce;
pub mod error;
pub mod id;
pub mod preferences;
pub mod sort;
pub mod views;

pub use shareholding_api;
pub use shareholding_api::types;
pub use shareholding_api::{Client, IssuerSearchQuery, PageQuery};

pub use async_data::{AsyncData, AsyncOptions, AsyncState, FetchStatus};
pub use config::ApiConfig;
pub use debounce::Debounced;
pub use error::ShareholdingError;
pub use id::ResourceId;
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, UiPreferences};
pub use sort::{IssuerSort, SortKey, SortOrder};
pub use views::{
    FilerIssuersView, FilerView, FilersView, IssuerHistoryView, IssuerOwnershipsView,
    IssuerSearchView,
};
