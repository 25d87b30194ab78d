//! Commit-activity feed client.

use ut_core::activity::DeveloperActivity;

use crate::error::ClientError;
use crate::http::{build_client, check_response};

/// Fetch and parse the activity feed at `url`.
///
/// # Errors
///
/// Returns [`ClientError`] if the request fails, the server answers with a
/// non-success status, or the body is not a valid feed.
pub async fn fetch_activity(url: &str) -> Result<Vec<DeveloperActivity>, ClientError> {
    tracing::debug!(url, "fetching activity feed");
    let resp = check_response(build_client()?.get(url).send().await?).await?;
    Ok(resp.json().await?)
}
