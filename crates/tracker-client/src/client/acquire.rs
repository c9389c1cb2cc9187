//! Work acquisition.

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::error::{TrackerError, TrackerResult};
use crate::http::HttpBackend;
use crate::models::{WorkRequest, WorkResponse, API_VERSION};
use crate::url::acquire_path;

use super::TrackerClient;

impl<B: HttpBackend> TrackerClient<B> {
    /// Ask the tracker for up to `limit` items.
    ///
    /// Returns [`TrackerError::NoTasksAvailable`] when the tracker answers
    /// 204 or 404; an unknown project is indistinguishable from an empty
    /// queue on this endpoint. A successful response may still carry an
    /// empty list.
    pub async fn request_items(
        &self,
        limit: u64,
        cancel: Option<&CancellationToken>,
    ) -> TrackerResult<Vec<String>> {
        if limit < 1 {
            return Err(TrackerError::InvalidArgument {
                message: "limit must be greater than 0".to_string(),
            });
        }

        let body = WorkRequest {
            downloader: &self.config.username,
            api_version: API_VERSION,
            version: &self.config.project_version,
        };
        let request = self.new_request(Method::POST, &acquire_path(limit), &body)?;

        let response = self.backend.send(request, cancel.cloned()).await?;
        match response.status {
            204 | 404 => {
                self.logger.debug(
                    "tracker has no work available",
                    &[
                        ("project", &self.config.project),
                        ("status", &response.status),
                    ],
                );
                Err(TrackerError::NoTasksAvailable)
            }
            status if status >= 300 => Err(TrackerError::InvalidTrackerResponse { status }),
            _ => {
                let work: WorkResponse = serde_json::from_slice(&response.body)?;
                self.logger.debug(
                    "acquired work items",
                    &[
                        ("project", &self.config.project),
                        ("requested", &limit),
                        ("received", &work.items.len()),
                    ],
                );
                Ok(work.items)
            }
        }
    }

    /// Ask the tracker for a single item.
    ///
    /// Errors from [`Self::request_items`], including
    /// [`TrackerError::NoTasksAvailable`], are returned unchanged. `Ok(None)`
    /// means the tracker answered successfully but handed out nothing.
    pub async fn request_item(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> TrackerResult<Option<String>> {
        let items = self.request_items(1, cancel).await?;
        Ok(items.into_iter().next())
    }
}
