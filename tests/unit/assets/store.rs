use std::io::Cursor;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "devframe_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &std::path::Path, img: image::RgbaImage) {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn get_loads_once_and_reuses() {
    let tmp = temp_dir("store_load_once");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp.join("android-frame.png"), image::RgbaImage::new(6, 9));

    let cfg = Arc::new(EngineConfig::default().with_assets_root(&tmp));
    let cache = FrameAssetCache::new(cfg);
    let a = cache.get(DeviceVariant::Android).unwrap();
    let b = cache.get(DeviceVariant::Android).unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.size, Canvas::new(6, 9).unwrap());
    assert_eq!(a.image.canvas(), a.size);
    assert_eq!(cache.decode_count(DeviceVariant::Android), 1);
    assert_eq!(cache.decode_count(DeviceVariant::Phone), 0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_file_is_asset_missing() {
    let cfg = Arc::new(EngineConfig::default().with_assets_root("/nonexistent/devframe"));
    let cache = FrameAssetCache::new(cfg);
    let err = cache.get(DeviceVariant::Phone).unwrap_err();
    assert!(matches!(err, DevframeError::AssetMissing { .. }), "{err}");
    assert_eq!(cache.decode_count(DeviceVariant::Phone), 0);
}

#[test]
fn non_image_file_is_asset_missing() {
    let tmp = temp_dir("store_garbage");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("iphone-frame.png"), b"garbage").unwrap();

    let cache = FrameAssetCache::new(Arc::new(EngineConfig::default().with_assets_root(&tmp)));
    let err = cache.get(DeviceVariant::PhoneOverlay).unwrap_err();
    assert!(matches!(err, DevframeError::AssetMissing { .. }), "{err}");
    assert!(err.to_string().contains("not a readable image"), "{err}");
    assert_eq!(cache.decode_count(DeviceVariant::PhoneOverlay), 0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn preload_all_loads_every_configured_variant() {
    let tmp = temp_dir("store_preload");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp.join("iphone-frame.png"), image::RgbaImage::new(4, 8));
    write_png(&tmp.join("android-frame.png"), image::RgbaImage::new(5, 8));

    let cache = FrameAssetCache::new(Arc::new(EngineConfig::default().with_assets_root(&tmp)));
    let all = cache.preload_all().unwrap();
    assert_eq!(all.len(), 3);
    for v in DeviceVariant::ALL {
        assert_eq!(cache.decode_count(v), 1);
    }

    std::fs::remove_dir_all(&tmp).ok();
}
