use super::*;

#[test]
fn default_config_is_valid_and_covers_every_variant() {
    let cfg = EngineConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.target().unwrap(), Canvas::new(1080, 2400).unwrap());
    for v in DeviceVariant::ALL {
        assert!(cfg.profile(v).is_ok(), "missing profile for {v}");
    }
}

#[test]
fn device_variant_parses_aliases_case_insensitively() {
    assert_eq!("phone".parse::<DeviceVariant>().unwrap(), DeviceVariant::Phone);
    assert_eq!("iPhone".parse::<DeviceVariant>().unwrap(), DeviceVariant::Phone);
    assert_eq!(
        "ANDROID".parse::<DeviceVariant>().unwrap(),
        DeviceVariant::Android
    );
    assert_eq!(
        "phoneOverlay".parse::<DeviceVariant>().unwrap(),
        DeviceVariant::PhoneOverlay
    );
    assert_eq!(
        "phone-overlay".parse::<DeviceVariant>().unwrap(),
        DeviceVariant::PhoneOverlay
    );
    assert!("tablet".parse::<DeviceVariant>().is_err());
}

#[test]
fn corner_radius_scales_with_target_width() {
    let r = CornerRadius::default();
    assert_eq!(r.resolve(Canvas::new(1080, 2400).unwrap()), 60.0);
    assert_eq!(r.resolve(Canvas::new(2160, 4800).unwrap()), 120.0);

    let fixed = CornerRadius {
        px: 24.0,
        reference_width: None,
    };
    assert_eq!(fixed.resolve(Canvas::new(2160, 4800).unwrap()), 24.0);
}

#[test]
fn json_overrides_merge_with_defaults() {
    let json = r#"
{
  "targetWidth": 1320,
  "targetHeight": 2868,
  "defaultDevice": "android",
  "devices": {
    "android": {
      "framePath": "frames/android.png",
      "strategy": { "fill": { "scale": 0.85, "frameFit": "contain" } }
    },
    "phoneOverlay": {
      "framePath": "frames/iphone.png",
      "strategy": { "overlay": { "screenCutout": { "x": 50, "y": 120, "width": 980, "height": 2160 } } }
    }
  }
}
"#;
    let cfg = EngineConfig::from_reader(json.as_bytes()).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.target().unwrap(), Canvas::new(1320, 2868).unwrap());
    assert_eq!(cfg.default_device, DeviceVariant::Android);
    assert!(cfg.profile(DeviceVariant::Phone).is_err());

    let Strategy::Fill(fill) = cfg.profile(DeviceVariant::Android).unwrap().strategy else {
        panic!("expected fill strategy");
    };
    assert_eq!(fill.scale, 0.85);
    assert_eq!(fill.height_inset, 0);
    assert_eq!(fill.corner_radius, CornerRadius::default());

    let Strategy::Overlay(overlay) = cfg.profile(DeviceVariant::PhoneOverlay).unwrap().strategy
    else {
        panic!("expected overlay strategy");
    };
    assert_eq!(overlay.background_rgba, [255, 255, 255, 255]);
    assert_eq!(overlay.screen_cutout.width, 980);
}

#[test]
fn empty_json_yields_defaults() {
    let cfg = EngineConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn frame_paths_resolve_against_assets_root() {
    let cfg = EngineConfig::default().with_assets_root("/srv/frames");
    assert_eq!(
        cfg.frame_path(DeviceVariant::Android).unwrap(),
        PathBuf::from("/srv/frames/android-frame.png")
    );
}

#[test]
fn validate_rejects_bad_constants() {
    let mut cfg = EngineConfig::default();
    cfg.target_width = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    if let Some(DeviceProfile {
        strategy: Strategy::Fill(fill),
        ..
    }) = cfg.devices.get_mut(&DeviceVariant::Phone)
    {
        fill.scale = 1.5;
    }
    let err = cfg.validate().unwrap_err().to_string();
    assert!(err.contains("device 'phone'"), "{err}");

    let mut cfg = EngineConfig::default();
    cfg.devices.remove(&DeviceVariant::Phone);
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    if let Some(DeviceProfile {
        strategy: Strategy::Overlay(overlay),
        ..
    }) = cfg.devices.get_mut(&DeviceVariant::PhoneOverlay)
    {
        overlay.screen_cutout.height = 0;
    }
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reports_missing_file() {
    let err = EngineConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("open config JSON"));
}
