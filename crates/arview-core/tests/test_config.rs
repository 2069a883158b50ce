use std::time::Duration;

use arview_core::config::{ArConfig, OverlaySizing};
use arview_core::error::ArError;
use arview_core::geometry::Viewport;

#[test]
fn test_default_values() {
    let config = ArConfig::default();
    assert_eq!(config.transform.min_scale, 0.5);
    assert_eq!(config.transform.max_scale, 3.0);
    assert!(config.shadow.enabled);
    assert_eq!(config.shadow.offset_y, 20);
    assert_eq!((config.card.width, config.card.height), (550, 350));
    assert_eq!(config.export.share_filename, "sushi-vision-ar.png");
    assert_eq!(config.compositor.rasterize_timeout(), Duration::from_secs(3));
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_round_trip() {
    let config = ArConfig::default();
    let text = config.to_toml_string().unwrap();
    assert!(text.contains("[transform]"));
    assert!(text.contains("mode = \"breakpoint\""));
    let parsed = ArConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_json_round_trip() {
    let mut config = ArConfig::default();
    config.overlay = OverlaySizing::Fixed { size: 320.0 };
    let json = serde_json::to_string(&config).unwrap();
    let parsed: ArConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = ArConfig::from_toml_str(
        r#"
        [transform]
        max_scale = 2.0

        [overlay]
        mode = "fixed"
        size = 200.0

        [shadow]
        enabled = false
        "#,
    )
    .unwrap();

    assert_eq!(config.transform.min_scale, 0.5);
    assert_eq!(config.transform.max_scale, 2.0);
    assert_eq!(config.overlay.base_size(Viewport::new(1920.0, 1080.0).unwrap()), 200.0);
    assert!(!config.shadow.enabled);
    assert_eq!(config.shadow.blur, 30.0);
    assert_eq!(config.card, ArConfig::default().card);
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(ArConfig::from_toml_str("").unwrap(), ArConfig::default());
}

#[test]
fn test_validation_errors() {
    let mut config = ArConfig::default();
    config.transform.min_scale = 0.0;
    assert!(matches!(config.validate(), Err(ArError::InvalidConfig(_))));

    let mut config = ArConfig::default();
    config.transform.min_scale = 3.5;
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.overlay = OverlaySizing::Fixed { size: -1.0 };
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.shadow.blur = -2.0;
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.card.description_keep = 50;
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.export.share_filename = "  ".into();
    assert!(config.validate().is_err());
}

#[test]
fn test_validation_rejects_unbounded_sizes() {
    let mut config = ArConfig::default();
    config.overlay = OverlaySizing::Fixed { size: f64::NAN };
    assert!(matches!(config.validate(), Err(ArError::InvalidConfig(_))));

    let mut config = ArConfig::default();
    config.overlay = OverlaySizing::Fixed { size: 1e9 };
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.overlay = OverlaySizing::Breakpoint {
        compact: 288.0,
        wide: f64::INFINITY,
        breakpoint: 640.0,
    };
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.overlay = OverlaySizing::Breakpoint {
        compact: 288.0,
        wide: 384.0,
        breakpoint: f64::NAN,
    };
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.shadow.blur = f32::NAN;
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.shadow.blur = 1e6;
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.card.title.size_px = 1e7;
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.card.description.size_px = f32::NAN;
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.card.price.size_px = 0.0;
    assert!(config.validate().is_err());

    let mut config = ArConfig::default();
    config.card.title.size_px = 200.0;
    config.shadow.blur = 200.0;
    config.overlay = OverlaySizing::Fixed { size: 4096.0 };
    assert!(config.validate().is_ok());
}

#[test]
fn test_oversized_font_in_toml_is_invalid() {
    let err = ArConfig::from_toml_str(
        r#"
        [card.title]
        size_px = 1e7
        bold = true
        color = [255, 255, 255, 255]
        baseline = 80
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ArError::InvalidConfig(_)));

    let err = ArConfig::from_toml_str("[shadow]\nblur = nan\n").unwrap_err();
    assert!(matches!(err, ArError::InvalidConfig(_)));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = ArConfig::from_toml_str("[transform]\nmin_scale = \"big\"").unwrap_err();
    assert!(matches!(err, ArError::ConfigParse(_)));

    let err = ArConfig::from_toml_str("[transform]\nmin_scale = 5.0").unwrap_err();
    assert!(matches!(err, ArError::InvalidConfig(_)));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ar.toml");
    std::fs::write(&path, "[compositor]\nmirror_user_facing = false\n").unwrap();

    let config = ArConfig::load(&path).unwrap();
    assert!(!config.compositor.mirror_user_facing);
    assert_eq!(config.compositor.rasterize_timeout_ms, 3_000);

    assert!(matches!(
        ArConfig::load(&dir.path().join("missing.toml")),
        Err(ArError::Io(_))
    ));
}

#[test]
fn test_overlay_sizing_display() {
    assert_eq!(
        OverlaySizing::default().to_string(),
        "288px / 384px (breakpoint 640px)"
    );
    assert_eq!(OverlaySizing::Fixed { size: 200.0 }.to_string(), "200px");
}
