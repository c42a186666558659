use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::{DownloadTask, LocalFile};

/// Upper bound of a single write to the destination file.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Stream a remote file to disk chunk by chunk.
///
/// The destination is only created once the remote side answered with a
/// success status, so an unreachable asset leaves nothing behind.
pub async fn download_file(client: &reqwest::Client, task: &DownloadTask) -> Result<LocalFile> {
    // 1. Send request to the URL
    let mut response = client.get(&task.url).send().await?.error_for_status()?;
    let content_length = response.content_length();

    // 2. Open the destination
    let dest_path = task.dest_path();
    let mut file = File::create(&dest_path).await?;

    // 3. Copy the body over in bounded pieces
    let mut size = 0u64;
    while let Some(chunk) = response.chunk().await? {
        for piece in chunk.chunks(CHUNK_SIZE) {
            file.write_all(piece).await?;
        }
        size += chunk.len() as u64;
    }
    file.flush().await?;

    // 4. Check if the file is complete
    if let Some(content_length) = content_length {
        if size != content_length {
            return Err(Error::IncompleteDownload(task.url.clone()));
        }
    }

    tracing::debug!("Downloaded {} ({} bytes) to {}", task.url, size, dest_path.display());
    Ok(LocalFile { path: dest_path, size })
}

/// Write an already fetched body to the task's destination in one go.
pub async fn save_bytes(task: &DownloadTask, bytes: &[u8]) -> Result<LocalFile> {
    let dest_path = task.dest_path();
    tokio::fs::write(&dest_path, bytes).await?;
    Ok(LocalFile {
        path: dest_path,
        size: bytes.len() as u64,
    })
}
