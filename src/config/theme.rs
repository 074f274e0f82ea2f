use crate::foundation::core::Rgba8;

/// Name of the marker attribute that opts a canvas into the effect.
pub const THEME_ATTRIBUTE: &str = "data-dots-bg";

/// Palette selected by the page background behind the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light page background: pale blue strokes.
    Light,
    /// Dark page background: deep blue strokes.
    #[default]
    Dark,
}

impl Theme {
    /// Map a trigger attribute value to a theme.
    ///
    /// Only the exact value `light` selects [`Theme::Light`]; anything else is dark.
    pub fn from_attribute(value: &str) -> Self {
        if value == "light" {
            Self::Light
        } else {
            Self::Dark
        }
    }

    /// Like [`Theme::from_attribute`], but `None` when the attribute is absent
    /// (the element is not managed).
    pub fn from_optional_attribute(value: Option<&str>) -> Option<Self> {
        value.map(Self::from_attribute)
    }

    /// Stroke colour for this palette.
    pub fn stroke_color(self) -> Rgba8 {
        match self {
            Self::Light => Rgba8::rgb(0x9C, 0xDC, 0xFC),
            Self::Dark => Rgba8::rgb(0x09, 0x4E, 0x71),
        }
    }
}

/// Which of the two shipped tunings to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Full-range twinkle, no fade-in.
    Classic,
    /// Twinkle floor of 0.2 plus a global fade-in after construction.
    #[default]
    FadeIn,
}

/// Optional attribute choosing the tuning; absent or unknown means the default.
pub const VARIANT_ATTRIBUTE: &str = "data-dots-variant";

impl Variant {
    /// Map a variant attribute value; only `classic` and `fade-in` are known.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("classic") => Self::Classic,
            Some("fade-in") => Self::FadeIn,
            _ => Self::default(),
        }
    }
}
