//! Colour swatches and the light/dark palette they resolve through.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Palette key stored on each element.
///
/// Persisted as the dark-theme Tailwind class the editor shows, which is how
/// saved layouts have always spelled it; bare names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Swatch {
    /// Slate (default).
    #[default]
    #[serde(rename = "bg-slate-700", alias = "slate")]
    Slate,
    /// Gray.
    #[serde(rename = "bg-gray-700", alias = "gray")]
    Gray,
    /// Zinc.
    #[serde(rename = "bg-zinc-700", alias = "zinc")]
    Zinc,
    /// Neutral.
    #[serde(rename = "bg-neutral-700", alias = "neutral")]
    Neutral,
    /// Stone.
    #[serde(rename = "bg-stone-700", alias = "stone")]
    Stone,
}

impl Swatch {
    /// Every swatch, in palette order.
    pub const ALL: [Self; 5] = [
        Self::Slate,
        Self::Gray,
        Self::Zinc,
        Self::Neutral,
        Self::Stone,
    ];

    /// Short name of the swatch.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slate => "slate",
            Self::Gray => "gray",
            Self::Zinc => "zinc",
            Self::Neutral => "neutral",
            Self::Stone => "stone",
        }
    }

    /// Position of the swatch in [`Swatch::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Slate => 0,
            Self::Gray => 1,
            Self::Zinc => 2,
            Self::Neutral => 3,
            Self::Stone => 4,
        }
    }
}

impl FromStr for Swatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let name = lower
            .strip_prefix("bg-")
            .map_or(lower.as_str(), |rest| rest.trim_end_matches("-700"));
        match name {
            "slate" => Ok(Self::Slate),
            "gray" => Ok(Self::Gray),
            "zinc" => Ok(Self::Zinc),
            "neutral" => Ok(Self::Neutral),
            "stone" => Ok(Self::Stone),
            _ => Err(format!("Unknown swatch: {s}")),
        }
    }
}

/// Colour theme a value is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

/// Concrete colours for one swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchColors {
    /// Hex colour in the light theme.
    pub light_hex: String,
    /// Hex colour in the dark theme.
    pub dark_hex: String,
    /// Utility class in the light theme.
    pub light_class: String,
    /// Utility class in the dark theme.
    pub dark_class: String,
}

impl SwatchColors {
    fn tailwind(name: &str, light_hex: &str, dark_hex: &str) -> Self {
        Self {
            light_hex: light_hex.to_string(),
            dark_hex: dark_hex.to_string(),
            light_class: format!("bg-{name}-200"),
            dark_class: format!("bg-{name}-700"),
        }
    }
}

/// Light/dark colour table for every swatch plus the canvas background.
///
/// Deserializable so generators can be configured from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    swatches: [SwatchColors; 5],
    /// Canvas background in the light theme.
    pub light_background: String,
    /// Canvas background in the dark theme.
    pub dark_background: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            swatches: [
                SwatchColors::tailwind("slate", "#e2e8f0", "#334155"),
                SwatchColors::tailwind("gray", "#e5e7eb", "#374151"),
                SwatchColors::tailwind("zinc", "#e4e4e7", "#3f3f46"),
                SwatchColors::tailwind("neutral", "#e5e5e5", "#404040"),
                SwatchColors::tailwind("stone", "#e7e5e4", "#44403c"),
            ],
            light_background: "#ffffff".to_string(),
            dark_background: "#1e293b".to_string(),
        }
    }
}

impl Palette {
    /// Colours for a swatch.
    #[must_use]
    pub fn colors(&self, swatch: Swatch) -> &SwatchColors {
        &self.swatches[swatch.index()]
    }

    /// Hex colour for a swatch in a theme.
    #[must_use]
    pub fn hex(&self, swatch: Swatch, theme: Theme) -> &str {
        let colors = self.colors(swatch);
        match theme {
            Theme::Light => &colors.light_hex,
            Theme::Dark => &colors.dark_hex,
        }
    }

    /// Utility class for a swatch in a theme.
    #[must_use]
    pub fn class(&self, swatch: Swatch, theme: Theme) -> &str {
        let colors = self.colors(swatch);
        match theme {
            Theme::Light => &colors.light_class,
            Theme::Dark => &colors.dark_class,
        }
    }

    /// Replace the colours of one swatch.
    #[must_use]
    pub fn with_swatch(mut self, swatch: Swatch, colors: SwatchColors) -> Self {
        self.swatches[swatch.index()] = colors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swatch_parses_names_and_classes() {
        assert_eq!("slate".parse::<Swatch>(), Ok(Swatch::Slate));
        assert_eq!("bg-stone-700".parse::<Swatch>(), Ok(Swatch::Stone));
        assert_eq!("ZINC".parse::<Swatch>(), Ok(Swatch::Zinc));
        assert!("purple".parse::<Swatch>().is_err());
    }

    #[test]
    fn swatch_serializes_as_dark_class() {
        let json = serde_json::to_string(&Swatch::Gray).unwrap();
        assert_eq!(json, "\"bg-gray-700\"");
        let back: Swatch = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(back, Swatch::Neutral);
    }

    #[test]
    fn default_palette_resolves_both_themes() {
        let palette = Palette::default();
        assert_eq!(palette.hex(Swatch::Slate, Theme::Dark), "#334155");
        assert_eq!(palette.hex(Swatch::Slate, Theme::Light), "#e2e8f0");
        assert_eq!(palette.class(Swatch::Stone, Theme::Light), "bg-stone-200");
        assert_eq!(palette.class(Swatch::Stone, Theme::Dark), "bg-stone-700");
    }

    #[test]
    fn swatch_override() {
        let custom = SwatchColors {
            light_hex: "#ffffff".into(),
            dark_hex: "#000000".into(),
            light_class: "bg-white".into(),
            dark_class: "bg-black".into(),
        };
        let palette = Palette::default().with_swatch(Swatch::Gray, custom.clone());
        assert_eq!(palette.colors(Swatch::Gray), &custom);
        assert_eq!(palette.hex(Swatch::Slate, Theme::Dark), "#334155");
    }
}
