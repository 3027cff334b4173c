use std::path::Path;

use image::{ImageBuffer, Rgb};
use tempfile::TempDir;
use wishtree::wish::tree_image::{FALLBACK_TREE_IMAGE, PRIMARY_TREE_IMAGE};

/// Writes a `width`x`height` solid red PNG to `path`.
pub fn write_test_image(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_fn(width, height, |_, _| Rgb([214u8, 40u8, 40u8]));
    img.save_with_format(path, image::ImageFormat::Png)
        .expect("Failed to save test image");
}

/// PNG bytes as they would come back from the file picker.
pub fn test_image_bytes(width: u32, height: u32) -> Vec<u8> {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("picked.png");
    write_test_image(&path, width, height);
    std::fs::read(&path).expect("Failed to read test image")
}

/// An assets directory with the requested artwork present.
/// The directory is removed when the returned handle is dropped.
pub fn create_assets_dir(with_primary: bool, with_fallback: bool) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp directory");
    if with_primary {
        write_test_image(&dir.path().join(PRIMARY_TREE_IMAGE), 4, 6);
    }
    if with_fallback {
        write_test_image(&dir.path().join(FALLBACK_TREE_IMAGE), 3, 2);
    }
    dir
}
