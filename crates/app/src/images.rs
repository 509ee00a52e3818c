//! Image lookup
//!
//! Images are stored outside the database as `{root}/{folder}/{id}.{extension}`. Only their
//! existence matters here.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

/// Folder holding offer images.
pub const OFFERS_FOLDER: &str = "Offers";

/// Image key for an offer, e.g. `Offers/7`.
#[must_use]
pub fn offer_image_key(offer: impl fmt::Display) -> String {
    format!("{OFFERS_FOLDER}/{offer}")
}

#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Whether any file named `key` exists, whatever its extension.
    async fn exists(&self, key: &str) -> bool;

    /// The subset of `keys` that have an image. Each folder is read at most once.
    async fn existing(&self, keys: Vec<String>) -> HashSet<String>;
}

/// Looks images up on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Names of the files in `folder` that carry an extension, with the extension cut off.
    async fn stems(&self, folder: &Path) -> HashSet<String> {
        let folder = self.root.join(folder);
        let mut stems = HashSet::new();

        let mut entries = match tokio::fs::read_dir(&folder).await {
            Ok(entries) => entries,
            Err(error) => {
                debug!(folder = %folder.display(), %error, "image folder unreadable");
                return stems;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();

            if let Some((stem, _extension)) = name.to_str().and_then(|name| name.split_once('.')) {
                stems.insert(stem.to_string());
            }
        }

        stems
    }
}

/// Splits `Offers/7` into `("Offers", "7")`.
fn split_key(key: &str) -> Option<(&Path, &str)> {
    let path = Path::new(key);

    Some((path.parent()?, path.file_name()?.to_str()?))
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn exists(&self, key: &str) -> bool {
        !self.existing(vec![key.to_string()]).await.is_empty()
    }

    async fn existing(&self, keys: Vec<String>) -> HashSet<String> {
        let mut folders: HashMap<PathBuf, HashSet<String>> = HashMap::new();

        for key in &keys {
            let Some((folder, _)) = split_key(key) else {
                continue;
            };

            if !folders.contains_key(folder) {
                let stems = self.stems(folder).await;

                folders.insert(folder.to_path_buf(), stems);
            }
        }

        keys.into_iter()
            .filter(|key| {
                split_key(key).is_some_and(|(folder, name)| {
                    folders.get(folder).is_some_and(|stems| stems.contains(name))
                })
            })
            .collect()
    }
}
