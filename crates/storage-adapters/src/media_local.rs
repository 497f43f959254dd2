//! Local filesystem implementation of `MediaStore`.
//!
//! Content-addressable: the SHA-256 of the bytes is the media id, stored
//! under a sharded path so one directory never collects every upload.
//! Each image also gets a 300×300 variant rendered next to the original.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;

use domains::{AppError, MediaStore, Result};

pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g., "./data/uploads")
    root_path: PathBuf,
    /// Public URL prefix (e.g., "/static/uploads")
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, url_prefix: String) -> Self {
        Self {
            root_path: root,
            url_prefix,
        }
    }

    /// Sharded path: "ab/cd/abcdef...hash"
    fn sharded_path(&self, hash: &str) -> PathBuf {
        let mut path = self.root_path.clone();
        path.push(&hash[0..2]);
        path.push(&hash[2..4]);
        path.push(hash);
        path
    }

    /// Renders the 300×300 variant. Bytes that do not decode as an image
    /// are kept as-is with no variant — the original stays servable.
    async fn write_variant(&self, original: &Path, data: &[u8], hash: &str) -> Result<()> {
        let img = match image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(AppError::internal)?
            .decode()
        {
            Ok(img) => img,
            Err(err) => {
                tracing::warn!(media_id = %hash, %err, "upload is not a decodable image; skipping variant");
                return Ok(());
            }
        };
        let variant = img.thumbnail(300, 300);
        let mut variant_path = original
            .parent()
            .expect("sharded path always has a parent")
            .to_path_buf();
        variant_path.push(format!("variant_{hash}.png"));
        variant
            .save_with_format(variant_path, image::ImageFormat::Png)
            .map_err(AppError::internal)
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    /// Saves an upload under its SHA-256 hash. Identical bytes are
    /// deduplicated for free.
    async fn save(&self, data: Vec<u8>, _content_type: &str) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(&data);
        let hash = hex::encode(hasher.finalize());

        let target = self.sharded_path(&hash);
        let parent = target.parent().expect("sharded path always has a parent");
        fs::create_dir_all(parent).await.map_err(AppError::internal)?;

        if !target.exists() {
            fs::write(&target, &data).await.map_err(AppError::internal)?;
            self.write_variant(&target, &data, &hash).await?;
        }

        Ok(hash)
    }

    fn url(&self, media_id: &str) -> String {
        let (a, b) = (&media_id[0..2], &media_id[2..4]);
        format!("{}/{}/{}/{}", self.url_prefix, a, b, media_id)
    }
}
