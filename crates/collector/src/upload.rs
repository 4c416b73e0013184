//! Best-effort upload of a written snapshot to a remote collector.

use enveye_common::{Error, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{debug, info};

/// Multipart field carrying the snapshot file.
pub const SNAPSHOT_FIELD: &str = "snapshot";

/// POST the snapshot file with the host name and application path.
///
/// Any 2xx response is success. Other statuses surface as
/// [`Error::UploadStatus`] with the response body; connection problems as
/// [`Error::UploadTransport`]. Nothing is retried.
pub async fn upload_snapshot(url: &str, file_path: &Path, hostname: &str, app_path: &str) -> Result<()> {
    let content = tokio::fs::read(file_path).await?;
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot.json".to_string());
    debug!("Uploading {} ({} bytes) to {}", file_name, content.len(), url);

    let part = Part::bytes(content)
        .file_name(file_name)
        .mime_str("application/json")
        .map_err(|e| Error::UploadTransport(e.to_string()))?;
    let form = Form::new()
        .part(SNAPSHOT_FIELD, part)
        .text("hostname", hostname.to_string())
        .text("app_path", app_path.to_string());

    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| Error::UploadTransport(e.to_string()))?;
    let response = client
        .post(url)
        .multipart(form)
        .send()
        .await
        .map_err(|e| Error::UploadTransport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::UploadStatus {
            status: status.to_string(),
            body,
        });
    }

    info!("Snapshot uploaded to {} ({})", url, status);
    Ok(())
}
