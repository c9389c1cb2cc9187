//! Completion reporting.

use std::collections::HashMap;

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::error::{TrackerError, TrackerResult};
use crate::http::HttpBackend;
use crate::models::CompletionRequest;
use crate::url::DONE_PATH;

use super::TrackerClient;

impl<B: HttpBackend> TrackerClient<B> {
    /// Report `items` as done, optionally with bytes transferred per item.
    ///
    /// An empty `items` slice is a no-op and sends nothing. If the call is
    /// cancelled or fails in transit the tracker may or may not have
    /// recorded the completion; reporting the same items again is safe.
    pub async fn items_done(
        &self,
        items: &[String],
        bytes: Option<&HashMap<String, u64>>,
        cancel: Option<&CancellationToken>,
    ) -> TrackerResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let body = CompletionRequest {
            downloader: &self.config.username,
            version: &self.config.project_version,
            items,
            bytes,
        };
        let request = self.new_request(Method::POST, DONE_PATH, &body)?;

        let response = self.backend.send(request, cancel.cloned()).await?;
        match response.status {
            404 => Err(TrackerError::NoSuchProject),
            status if status >= 300 => Err(TrackerError::InvalidTrackerResponse { status }),
            _ => {
                self.logger.debug(
                    "reported items done",
                    &[
                        ("project", &self.config.project),
                        ("count", &items.len()),
                    ],
                );
                Ok(())
            }
        }
    }

    /// Report a single item as done, without byte counts.
    pub async fn item_done(
        &self,
        item: impl Into<String> + Send,
        cancel: Option<&CancellationToken>,
    ) -> TrackerResult<()> {
        self.items_done(&[item.into()], None, cancel).await
    }
}
