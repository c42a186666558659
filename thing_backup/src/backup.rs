use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thingiverse_client::Fetcher;

use crate::crawler::crawl_listing;
use crate::error::{Error, Result};
use crate::extractor::extract_thing;
use crate::materializer::{materialize, thing_folder, MaterializeOutcome};
use crate::report::{BackupReport, FolderCollision, ThingFailure};

#[derive(Debug, Clone)]
pub struct BackupOptions {
    pub username: String,
    pub destination: PathBuf,
    /// Replace folders left by an earlier run instead of skipping them.
    pub allow_override: bool,
}

/// The destination must be an existing, writable directory.
pub fn validate_destination(destination: &Path) -> Result<()> {
    let invalid = || Error::InvalidDestination(destination.to_path_buf());
    if destination.as_os_str().is_empty() {
        return Err(invalid());
    }
    let metadata = std::fs::metadata(destination).map_err(|_| invalid())?;
    if !metadata.is_dir() || !is_writable(destination, &metadata) {
        return Err(invalid());
    }
    Ok(())
}

/// Ask the OS whether this process may create entries in `path`. Mode bits
/// alone miss ownership, ACLs and read-only mounts.
#[cfg(unix)]
fn is_writable(path: &Path, _metadata: &std::fs::Metadata) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid, null-terminated C string that outlives the
    // call, and access only reads it.
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(_path: &Path, metadata: &std::fs::Metadata) -> bool {
    !metadata.permissions().readonly()
}

/// Back up every thing of a user into `options.destination`.
///
/// Only an unusable destination or a failed discovery abort the run. Things
/// and assets that cannot be fetched are skipped and listed in the report.
pub async fn backup(fetcher: &dyn Fetcher, options: &BackupOptions) -> Result<BackupReport> {
    // 1. Check the destination before touching the network
    validate_destination(&options.destination)?;

    // 2. Discover things
    let listing = crawl_listing(fetcher, &options.username).await?;
    let mut report = BackupReport::new(listing.len());

    // 3. Back up things one by one, in listing order
    let mut folders = HashMap::new();
    for thing in listing.iter() {
        let detail = match extract_thing(fetcher, &thing.id).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!("Skipping thing {} \"{}\": {}", thing.id, thing.name, e);
                report.failures.push(ThingFailure::new(&thing.id, &e));
                continue;
            }
        };

        if let Ok(folder) = thing_folder(&options.destination, &detail) {
            if let Some(first_id) = folders.insert(folder.clone(), thing.id.clone()) {
                tracing::warn!(
                    "Things {} and {} share the folder {}",
                    first_id,
                    thing.id,
                    folder.display()
                );
                report.collisions.push(FolderCollision {
                    folder,
                    first_id,
                    second_id: thing.id.clone(),
                });
            }
        }

        match materialize(fetcher, &detail, &options.destination, options.allow_override).await {
            Ok(MaterializeOutcome::Written { asset_failures, .. }) => {
                report.backed_up += 1;
                report.asset_failures.extend(asset_failures);
            }
            Ok(MaterializeOutcome::Skipped { .. }) => report.skipped += 1,
            Err(e) => {
                tracing::warn!("Cannot back up thing {}: {}", thing.id, e);
                report.failures.push(ThingFailure::new(&thing.id, &e));
            }
        }
    }

    tracing::info!("Backup of {} finished: {}", options.username, report);
    Ok(report)
}
