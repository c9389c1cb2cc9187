//! URL construction helpers for the tracker API.
//!
//! Pure functions, so that both call families build endpoints the same way.

use url::Url;

use crate::error::TrackerResult;
use crate::models::TrackerConfig;

/// Path of the completion endpoint.
pub const DONE_PATH: &str = "done";

/// Path of the work acquisition endpoint for a batch of `limit` items.
///
/// A single item uses `request`; larger batches use `multi=<limit>/request`.
/// The tracker distinguishes the two, so a batch of one must not be sent
/// as `multi=1`.
pub fn acquire_path(limit: u64) -> String {
    if limit > 1 {
        format!("multi={limit}/request")
    } else {
        "request".to_string()
    }
}

/// Build `<tracker_url>/<project>/<path>`.
pub fn build_endpoint_url(config: &TrackerConfig, path: &str) -> TrackerResult<Url> {
    let url = Url::parse(&format!("{}/{}/{path}", config.tracker_url, config.project))?;
    Ok(url)
}
