use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::Context as _;
use chrono::Utc;
use image::RgbaImage;

use crate::{
    foundation::error::AdforgeResult,
    output::writer::save_image,
    storage::mirror::RemoteMirror,
};

/// Sortable image identifier: UTC second timestamp plus a random suffix, so
/// identifiers are chronologically orderable by lexical sort.
fn new_image_id() -> String {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{stamp}_{}", &suffix[..8])
}

/// Append-only local store of generated hero images, with an optional
/// best-effort remote mirror.
///
/// Writes land under `{storage_root}/generated/{product_id}/{image_id}.png`;
/// a configured mirror sees every save, and local misses fall back to a
/// mirror lookup before declaring absence. Mirror failures never propagate.
pub struct GeneratedImageStore {
    generated_root: PathBuf,
    mirror: Option<Arc<dyn RemoteMirror>>,
}

impl GeneratedImageStore {
    /// Open (creating if needed) the store under `storage_root`.
    pub fn new(
        storage_root: impl Into<PathBuf>,
        mirror: Option<Arc<dyn RemoteMirror>>,
    ) -> AdforgeResult<Self> {
        let generated_root = storage_root.into().join("generated");
        std::fs::create_dir_all(&generated_root)
            .with_context(|| format!("create store dir '{}'", generated_root.display()))?;
        Ok(Self {
            generated_root,
            mirror,
        })
    }

    /// Root directory generated images are stored under.
    pub fn generated_root(&self) -> &Path {
        &self.generated_root
    }

    /// Persist a freshly generated image under a new sortable identifier.
    pub fn save_new(&self, product_id: &str, image: &RgbaImage) -> AdforgeResult<(String, PathBuf)> {
        let image_id = new_image_id();
        let product_dir = self.generated_root.join(product_id);
        let image_path = product_dir.join(format!("{image_id}.png"));
        save_image(image, &image_path)?;

        if let Some(mirror) = &self.mirror {
            mirror.upload_generated_image(&image_path, product_id, &image_id);
        }
        Ok((image_id, image_path))
    }

    /// Persist a deterministic flat asset directly under `generated/`.
    ///
    /// Used by asset pre-provisioning, where filenames follow the
    /// `{type}_{product_id}.png` pattern and replace earlier versions.
    pub fn save_asset(&self, filename: &str, image: &RgbaImage) -> AdforgeResult<PathBuf> {
        let dest = self.generated_root.join(filename);
        save_image(image, &dest)?;
        if let Some(mirror) = &self.mirror {
            mirror.upload_asset(&dest, filename);
        }
        Ok(dest)
    }

    /// Load the most recently modified stored image for a product.
    ///
    /// On a local miss the mirror (when configured) is consulted and a hit is
    /// cached back into the local store.
    pub fn load_last_for_product(
        &self,
        product_id: &str,
    ) -> AdforgeResult<Option<(String, RgbaImage)>> {
        let product_dir = self.generated_root.join(product_id);
        let mut candidates: Vec<(SystemTime, PathBuf)> = Vec::new();
        if let Ok(entries) = std::fs::read_dir(&product_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("png") {
                    continue;
                }
                let modified = entry
                    .metadata()
                    .and_then(|meta| meta.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                candidates.push((modified, path));
            }
        }

        if let Some((_, latest)) = candidates.into_iter().max_by_key(|(modified, _)| *modified) {
            let image_id = latest
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let image = open_rgba(&latest)?;
            return Ok(Some((image_id, image)));
        }

        if let Some(mirror) = &self.mirror {
            let image_ids = mirror.list_generated_for_product(product_id);
            // Timestamp-prefixed ids: last = most recent.
            if let Some(latest_id) = image_ids.last() {
                let dest_path = product_dir.join(format!("{latest_id}.png"));
                if mirror.download_generated_image(product_id, latest_id, &dest_path) {
                    let image = open_rgba(&dest_path)?;
                    return Ok(Some((latest_id.clone(), image)));
                }
            }
        }
        Ok(None)
    }

    /// Exact lookup by identifier across all products.
    pub fn load_by_id(&self, image_id: &str) -> AdforgeResult<Option<(String, RgbaImage)>> {
        let target_name = format!("{image_id}.png");
        if let Ok(entries) = std::fs::read_dir(&self.generated_root) {
            for entry in entries.flatten() {
                let candidate = entry.path().join(&target_name);
                if candidate.is_file() {
                    let image = open_rgba(&candidate)?;
                    return Ok(Some((image_id.to_string(), image)));
                }
            }
        }

        if let Some(mirror) = &self.mirror
            && let Some(key) = mirror.find_generated_image_key(image_id)
        {
            // Key shape: generated/{product_id}/{image_id}.png
            let parts: Vec<&str> = key.split('/').collect();
            if parts.len() == 3 {
                let product_id = parts[1];
                let dest_path = self.generated_root.join(product_id).join(&target_name);
                if mirror.download_generated_image(product_id, image_id, &dest_path) {
                    let image = open_rgba(&dest_path)?;
                    return Ok(Some((image_id.to_string(), image)));
                }
            }
        }
        Ok(None)
    }
}

fn open_rgba(path: &Path) -> AdforgeResult<RgbaImage> {
    Ok(image::open(path)
        .with_context(|| format!("open stored image '{}'", path.display()))?
        .to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/storage/generated_store.rs"]
mod tests;
