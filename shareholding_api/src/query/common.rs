//! Shared query infrastructure: the [`Query`] trait and parameter helpers.

use url::Url;

/// Trait implemented by all query builders.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    ///
    /// Parameters without a value (absent or empty string) are omitted entirely,
    /// and a URL with no parameters carries no `?`.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Appends `key=value` unless the value is absent or empty.
pub(crate) fn append_param(url: &mut Url, key: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        url.query_pairs_mut().append_pair(key, value);
    }
}
