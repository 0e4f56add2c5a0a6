//! Utility functions and helpers.

pub mod http;
pub mod markdown;

use url::Url;

/// Append query parameters to a base URL.
pub fn with_query(base_url: &str, params: &[(&str, String)]) -> crate::error::Result<String> {
    let mut url = Url::parse(base_url)?;
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, value);
        }
    }
    Ok(url.to_string())
}
