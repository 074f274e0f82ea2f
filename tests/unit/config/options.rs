use super::*;

#[test]
fn presets_pick_palette_and_tuning() {
    let light = DotFieldOptions::preset(Theme::Light, Variant::Classic);
    assert_eq!(light.color, Rgba8::rgb(0x9C, 0xDC, 0xFC));
    assert_eq!(light.spacing, 10.0);
    assert_eq!(light.tick_count, 200);
    assert_eq!(light.max_magnitude, 8.0);
    assert_eq!(light.radius, 1000.0);
    assert_eq!((light.min_alpha, light.max_alpha), (0.0, 1.0));
    assert_eq!(light.fade_in_frames, None);

    let dark = DotFieldOptions::preset(Theme::Dark, Variant::FadeIn);
    assert_eq!(dark.color, Rgba8::rgb(0x09, 0x4E, 0x71));
    assert_eq!((dark.min_alpha, dark.max_alpha), (0.2, 1.0));
    assert_eq!(dark.fade_in_frames, Some(100));

    for theme in [Theme::Light, Theme::Dark] {
        for variant in [Variant::Classic, Variant::FadeIn] {
            DotFieldOptions::preset(theme, variant).validate().unwrap();
        }
    }
}

#[test]
fn json_overlay_keeps_unspecified_fields() {
    let base = DotFieldOptions::preset(Theme::Light, Variant::FadeIn);
    let opts =
        DotFieldOptions::from_json_over(r##"{"spacing": 24, "color": "#FF0000"}"##, &base).unwrap();
    assert_eq!(opts.spacing, 24.0);
    assert_eq!(opts.color, Rgba8::rgb(255, 0, 0));
    assert_eq!(opts.tick_count, base.tick_count);
    assert_eq!(opts.fade_in_frames, Some(100));

    let opts = DotFieldOptions::from_json_over(r#"{"fade_in_frames": null}"#, &base).unwrap();
    assert_eq!(opts.fade_in_frames, None);
}

#[test]
fn json_overlay_rejects_unknown_and_invalid_fields() {
    let base = DotFieldOptions::default();
    assert!(DotFieldOptions::from_json_over(r#"{"spacingg": 1}"#, &base).is_err());
    assert!(DotFieldOptions::from_json_over(r#"[1, 2]"#, &base).is_err());
    let err = DotFieldOptions::from_json_over(r#"{"tick_count": 0}"#, &base).unwrap_err();
    assert!(err.to_string().contains("tick_count"));
}

#[test]
fn validation_rejects_degenerate_values() {
    let ok = DotFieldOptions::default();

    let cases = [
        DotFieldOptions {
            spacing: 0.0,
            ..ok.clone()
        },
        DotFieldOptions {
            spacing: f64::NAN,
            ..ok.clone()
        },
        DotFieldOptions {
            alpha_step: 0,
            ..ok.clone()
        },
        DotFieldOptions {
            min_alpha: 0.9,
            max_alpha: 0.1,
            ..ok.clone()
        },
        DotFieldOptions {
            max_magnitude: 0.0001,
            ..ok.clone()
        },
        DotFieldOptions {
            fade_in_frames: Some(0),
            ..ok.clone()
        },
    ];
    for opts in cases {
        assert!(opts.validate().is_err(), "{opts:?} should be rejected");
    }
}

#[test]
fn theme_attribute_mapping() {
    assert_eq!(Theme::from_attribute("light"), Theme::Light);
    assert_eq!(Theme::from_attribute("dark"), Theme::Dark);
    assert_eq!(Theme::from_attribute("LIGHT"), Theme::Dark);
    assert_eq!(Theme::from_optional_attribute(None), None);
    assert_eq!(Theme::from_optional_attribute(Some("")), Some(Theme::Dark));
}

#[test]
fn variant_attribute_falls_back_to_fade_in() {
    assert_eq!(Variant::from_attribute(Some("classic")), Variant::Classic);
    assert_eq!(Variant::from_attribute(Some("fade-in")), Variant::FadeIn);
    assert_eq!(Variant::from_attribute(Some("Classic")), Variant::FadeIn);
    assert_eq!(Variant::from_attribute(None), Variant::FadeIn);
}
