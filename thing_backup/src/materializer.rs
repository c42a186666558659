use std::path::{Path, PathBuf};

use thing_download::DownloadTask;
use thing_util::parsing::parse_filename;
use thing_util::{normalize_folder_name, sanitize_filename};
use thingiverse_client::{Fetcher, ThingDetail};

use crate::error::{Error, Result};
use crate::report::AssetFailure;

pub const IMAGES_DIR: &str = "images";
pub const FILES_DIR: &str = "files";
pub const METADATA_FILE: &str = "data.txt";
const CATEGORY_PREFIX: &str = "/categories/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeOutcome {
    /// The folder was (re)created and populated; some assets may be missing.
    Written {
        folder: PathBuf,
        asset_failures: Vec<AssetFailure>,
    },
    /// The folder already existed and overwriting was not allowed.
    Skipped { folder: PathBuf },
}

/// Folder of a thing under the destination root.
pub fn thing_folder(root: &Path, detail: &ThingDetail) -> Result<PathBuf> {
    let name = normalize_folder_name(&detail.title);
    if name.is_empty() {
        return Err(Error::Untitled(detail.id.clone()));
    }
    Ok(root.join(name))
}

/// Write one thing to `<root>/<folder>/{images/, files/, data.txt}`.
///
/// An existing folder is left alone unless `allow_override` is set, in which
/// case it is wiped first. Once the folder exists every step is best effort:
/// failed assets are reported in the outcome and never abort the thing.
pub async fn materialize(
    fetcher: &dyn Fetcher,
    detail: &ThingDetail,
    root: &Path,
    allow_override: bool,
) -> Result<MaterializeOutcome> {
    // 1. Resolve the folder
    let folder = thing_folder(root, detail)?;

    // 2. If not overwrite, and the folder exists, leave it untouched.
    // A link counts as existing even when it dangles.
    let exists = tokio::fs::symlink_metadata(&folder).await.is_ok();
    if exists && !allow_override {
        tracing::info!("Thing {} already backed up at {}, skipping", detail.id, folder.display());
        return Ok(MaterializeOutcome::Skipped { folder });
    }

    // 3. Wipe the previous backup
    if exists {
        tracing::debug!("Removing previous backup at {}", folder.display());
        remove_tree(&folder).await;
    }

    // 4. Recreate the folder
    let images_dir = folder.join(IMAGES_DIR);
    tokio::fs::create_dir_all(&images_dir).await?;
    remove_stale_zip(&folder).await;

    let mut asset_failures = Vec::new();

    // 5. Download files
    let files_dir = folder.join(FILES_DIR);
    tokio::fs::create_dir_all(&files_dir).await?;
    for (href, display_name) in &detail.files {
        let url = resolve_asset_url(fetcher, href);
        if let Err(e) = download_thing_file(fetcher, &url, display_name, &files_dir).await {
            tracing::warn!("Cannot download file {} of thing {}: {}", url, detail.id, e);
            asset_failures.push(AssetFailure::new(&detail.id, &url, &e));
        }
    }

    // 6. Download images
    for image in &detail.images {
        let url = resolve_asset_url(fetcher, image);
        if let Err(e) = download_thing_image(fetcher, &url, &images_dir).await {
            tracing::warn!("Cannot download image {} of thing {}: {}", url, detail.id, e);
            asset_failures.push(AssetFailure::new(&detail.id, &url, &e));
        }
    }

    // 7. Write metadata
    let metadata = render_metadata(detail, fetcher.base_url());
    tokio::fs::write(folder.join(METADATA_FILE), metadata).await?;

    tracing::info!("Backed up thing {} to {}", detail.id, folder.display());
    Ok(MaterializeOutcome::Written { folder, asset_failures })
}

fn resolve_asset_url(fetcher: &dyn Fetcher, href: &str) -> String {
    fetcher.asset_url(href).unwrap_or_else(|_| href.to_string())
}

async fn download_thing_file(fetcher: &dyn Fetcher, url: &str, display_name: &str, dir: &Path) -> Result<()> {
    let filename =
        sanitize_filename(display_name).ok_or_else(|| Error::InvalidFilename(display_name.to_string()))?;
    fetcher.download_file(&DownloadTask::new(url, dir, filename)).await?;
    Ok(())
}

async fn download_thing_image(fetcher: &dyn Fetcher, url: &str, dir: &Path) -> Result<()> {
    let filename = parse_filename(url)?;
    let bytes = fetcher.fetch_bytes(url).await?;
    thing_download::save_bytes(&DownloadTask::new(url, dir, filename), &bytes).await?;
    Ok(())
}

/// The flat `key: value` dump written to `data.txt`, one line per field in a
/// fixed order. Values are not escaped.
pub fn render_metadata(detail: &ThingDetail, base_url: &str) -> String {
    let fields = [
        ("id", detail.id.clone()),
        ("url", detail.url.clone()),
        ("title", detail.title.clone()),
        ("username", detail.username.clone()),
        ("userLink", format!("{}{}", base_url, detail.user_link)),
        ("license", detail.license.clone()),
        ("category", detail.category.replace(CATEGORY_PREFIX, "")),
        ("description", detail.description.trim().to_string()),
        ("instructions", detail.instructions.trim().to_string()),
        ("tags", detail.tags.join(",")),
        ("publishDate", detail.publish_date.clone()),
    ];
    fields
        .iter()
        .map(|(key, value)| format!("{}: {}\n", key, value))
        .collect()
}

/// Older versions left an archive of the whole thing next to its folders.
async fn remove_stale_zip(folder: &Path) {
    let Some(name) = folder.file_name() else {
        return;
    };
    let mut zip_name = name.to_os_string();
    zip_name.push(".zip");
    let zip_path = folder.join(zip_name);
    if let Ok(true) = tokio::fs::try_exists(&zip_path).await {
        if let Err(e) = tokio::fs::remove_file(&zip_path).await {
            tracing::debug!("Cannot remove {}: {}", zip_path.display(), e);
        }
    }
}

/// Delete a directory tree children first. Entries are made writable before
/// removal and individual failures are ignored. A link is removed itself,
/// never followed.
async fn remove_tree(path: &Path) {
    let Ok(metadata) = tokio::fs::symlink_metadata(path).await else {
        return;
    };
    if !metadata.is_dir() {
        remove_entry(path).await;
        return;
    }

    // Breadth first, so every directory is listed before its children
    let mut dirs = vec![path.to_path_buf()];
    let mut next = 0;
    while next < dirs.len() {
        let dir = dirs[next].clone();
        next += 1;
        make_writable(&dir).await;
        let Ok(mut entries) = tokio::fs::read_dir(&dir).await else {
            continue;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                dirs.push(entry.path());
            } else {
                remove_entry(&entry.path()).await;
            }
        }
    }

    for dir in dirs.iter().rev() {
        if let Err(e) = tokio::fs::remove_dir(dir).await {
            tracing::debug!("Cannot remove {}: {}", dir.display(), e);
        }
    }
}

async fn remove_entry(path: &Path) {
    make_writable(path).await;
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::debug!("Cannot remove {}: {}", path.display(), e);
    }
}

async fn make_writable(path: &Path) {
    // Never follow links out of the tree
    let Ok(metadata) = tokio::fs::symlink_metadata(path).await else {
        return;
    };
    if metadata.file_type().is_symlink() {
        return;
    }

    #[cfg(unix)]
    let permissions = {
        use std::os::unix::fs::PermissionsExt;
        std::fs::Permissions::from_mode(0o755)
    };
    #[cfg(not(unix))]
    let permissions = {
        let mut permissions = metadata.permissions();
        permissions.set_readonly(false);
        permissions
    };
    let _ = tokio::fs::set_permissions(path, permissions).await;
}
