use std::path::Path;

/// Key for a generated hero image: `generated/{product_id}/{image_id}.png`.
pub fn generated_key(product_id: &str, image_id: &str) -> String {
    format!("generated/{product_id}/{image_id}.png")
}

/// Best-effort remote mirror for generated images and campaign outputs.
///
/// Implementations must never propagate transport failures: the primitives
/// report success as booleans or empty listings, and callers treat failure as
/// "not found". The store stays fully functional with no mirror configured;
/// activation (e.g. by credential presence) is the integrating caller's
/// concern.
pub trait RemoteMirror: Send + Sync {
    /// Upload `local_path` under `key`. Returns false on failure.
    fn upload_file(&self, local_path: &Path, key: &str) -> bool;

    /// Download `key` to `local_path`, creating parents. False when absent.
    fn download_file(&self, key: &str, local_path: &Path) -> bool;

    /// All keys under `prefix`, sorted ascending. Empty on failure.
    fn list_keys(&self, prefix: &str) -> Vec<String>;

    /// Mirror a generated hero image under the generated key scheme.
    fn upload_generated_image(&self, local_path: &Path, product_id: &str, image_id: &str) {
        if !self.upload_file(local_path, &generated_key(product_id, image_id)) {
            tracing::warn!(product_id, image_id, "mirror upload failed");
        }
    }

    /// Mirror a flat named asset under `generated/{asset_filename}`.
    fn upload_asset(&self, local_path: &Path, asset_filename: &str) {
        if !self.upload_file(local_path, &format!("generated/{asset_filename}")) {
            tracing::warn!(asset_filename, "mirror asset upload failed");
        }
    }

    /// Fetch a generated hero image to `dest_path`. False when absent.
    fn download_generated_image(&self, product_id: &str, image_id: &str, dest_path: &Path) -> bool {
        self.download_file(&generated_key(product_id, image_id), dest_path)
    }

    /// Image ids mirrored for a product, oldest to newest.
    ///
    /// Ids carry a timestamp prefix, so the lexical key order is
    /// chronological.
    fn list_generated_for_product(&self, product_id: &str) -> Vec<String> {
        self.list_keys(&format!("generated/{product_id}/"))
            .into_iter()
            .filter(|key| key.ends_with(".png"))
            .filter_map(|key| {
                key.rsplit('/')
                    .next()
                    .map(|name| name.trim_end_matches(".png").to_string())
            })
            .collect()
    }

    /// Search all products for `image_id` and return its key, if mirrored.
    fn find_generated_image_key(&self, image_id: &str) -> Option<String> {
        let target_suffix = format!("/{image_id}.png");
        self.list_keys("generated/")
            .into_iter()
            .find(|key| key.ends_with(&target_suffix))
    }

    /// Mirror an output file under `output/{path relative to output_root}`.
    fn upload_output_file(&self, local_path: &Path, output_root: &Path) {
        let Ok(rel) = local_path.strip_prefix(output_root) else {
            tracing::warn!(
                path = %local_path.display(),
                root = %output_root.display(),
                "mirror upload skipped: file is not under the output root"
            );
            return;
        };
        let rel = rel
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if !self.upload_file(local_path, &format!("output/{rel}")) {
            tracing::warn!(%rel, "mirror output upload failed");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storage/mirror.rs"]
mod tests;
