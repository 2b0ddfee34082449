use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

use image::{Rgba, RgbaImage};

use super::*;

#[derive(Default)]
struct MemoryMirror {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    fail_uploads: bool,
}

impl RemoteMirror for MemoryMirror {
    fn upload_file(&self, local_path: &Path, key: &str) -> bool {
        if self.fail_uploads {
            return false;
        }
        match std::fs::read(local_path) {
            Ok(bytes) => {
                self.objects.lock().unwrap().insert(key.to_string(), bytes);
                true
            }
            Err(_) => false,
        }
    }

    fn download_file(&self, key: &str, local_path: &Path) -> bool {
        let objects = self.objects.lock().unwrap();
        let Some(bytes) = objects.get(key) else {
            return false;
        };
        if let Some(parent) = local_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        std::fs::write(local_path, bytes).is_ok()
    }

    fn list_keys(&self, prefix: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect()
    }
}

fn sample_image(color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(4, 4, Rgba(color))
}

fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn backdate(path: &Path, seconds: u64) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(seconds))
        .unwrap();
}

#[test]
fn save_new_writes_under_a_product_scoped_sortable_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = GeneratedImageStore::new(dir.path(), None).unwrap();

    let (image_id, path) = store.save_new("p1", &sample_image([1, 2, 3, 255])).unwrap();
    assert!(path.starts_with(dir.path().join("generated").join("p1")));
    assert!(path.exists());
    // {%Y%m%dT%H%M%S}_{8 hex chars}
    let (stamp, suffix) = image_id.split_once('_').unwrap();
    assert_eq!(stamp.len(), 15);
    assert_eq!(suffix.len(), 8);
}

#[test]
fn load_last_prefers_the_most_recently_modified_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = GeneratedImageStore::new(dir.path(), None).unwrap();

    let (_, older_path) = store.save_new("p1", &sample_image([1, 0, 0, 255])).unwrap();
    let (newer_id, _) = store.save_new("p1", &sample_image([0, 1, 0, 255])).unwrap();
    backdate(&older_path, 120);

    let (loaded_id, image) = store.load_last_for_product("p1").unwrap().unwrap();
    assert_eq!(loaded_id, newer_id);
    assert_eq!(image.get_pixel(0, 0), &Rgba([0, 1, 0, 255]));
}

#[test]
fn load_last_is_none_for_an_unknown_product() {
    let dir = tempfile::tempdir().unwrap();
    let store = GeneratedImageStore::new(dir.path(), None).unwrap();
    assert!(store.load_last_for_product("ghost").unwrap().is_none());
}

#[test]
fn load_by_id_searches_across_products() {
    let dir = tempfile::tempdir().unwrap();
    let store = GeneratedImageStore::new(dir.path(), None).unwrap();

    store.save_new("p1", &sample_image([1, 0, 0, 255])).unwrap();
    let (wanted_id, _) = store.save_new("p2", &sample_image([0, 0, 9, 255])).unwrap();

    let (found_id, image) = store.load_by_id(&wanted_id).unwrap().unwrap();
    assert_eq!(found_id, wanted_id);
    assert_eq!(image.get_pixel(0, 0), &Rgba([0, 0, 9, 255]));
    assert!(store.load_by_id("missing").unwrap().is_none());
}

#[test]
fn save_asset_writes_flat_under_generated() {
    let dir = tempfile::tempdir().unwrap();
    let store = GeneratedImageStore::new(dir.path(), None).unwrap();

    let dest = store
        .save_asset("product_p1.png", &sample_image([5, 5, 5, 255]))
        .unwrap();
    assert_eq!(dest, dir.path().join("generated").join("product_p1.png"));
    assert!(dest.exists());
}

#[test]
fn saves_are_mirrored_and_mirror_failures_are_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = std::sync::Arc::new(MemoryMirror::default());
    let store = GeneratedImageStore::new(dir.path(), Some(mirror.clone())).unwrap();

    let (image_id, _) = store.save_new("p1", &sample_image([7, 7, 7, 255])).unwrap();
    assert!(mirror
        .objects
        .lock()
        .unwrap()
        .contains_key(&format!("generated/p1/{image_id}.png")));

    let failing = std::sync::Arc::new(MemoryMirror {
        fail_uploads: true,
        ..MemoryMirror::default()
    });
    let store = GeneratedImageStore::new(dir.path(), Some(failing)).unwrap();
    store.save_new("p1", &sample_image([8, 8, 8, 255])).unwrap();
}

#[test]
fn local_miss_falls_back_to_the_mirror_and_caches_the_download() {
    let dir = tempfile::tempdir().unwrap();
    let mirror = std::sync::Arc::new(MemoryMirror::default());
    mirror.objects.lock().unwrap().insert(
        "generated/p9/20260101T000000_abcd1234.png".to_string(),
        png_bytes(&sample_image([9, 0, 9, 255])),
    );

    let store = GeneratedImageStore::new(dir.path(), Some(mirror.clone())).unwrap();

    let (image_id, image) = store.load_last_for_product("p9").unwrap().unwrap();
    assert_eq!(image_id, "20260101T000000_abcd1234");
    assert_eq!(image.get_pixel(0, 0), &Rgba([9, 0, 9, 255]));
    assert!(dir
        .path()
        .join("generated")
        .join("p9")
        .join("20260101T000000_abcd1234.png")
        .exists());

    // By-id lookup also reaches through the mirror on a fresh store root.
    let fresh_dir = tempfile::tempdir().unwrap();
    let fresh_store = GeneratedImageStore::new(fresh_dir.path(), Some(mirror)).unwrap();
    let (found_id, _) = fresh_store
        .load_by_id("20260101T000000_abcd1234")
        .unwrap()
        .unwrap();
    assert_eq!(found_id, "20260101T000000_abcd1234");
}
