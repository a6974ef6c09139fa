use serde::{Deserialize, Serialize};

/// Animated backdrop behind every screen. The renderer owns the animation;
/// this only names the variant and its colour stops.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    Clouds,
    Sunny,
    #[default]
    Moon,
    Nature,
    Snow,
}

impl Backdrop {
    /// Picker order.
    pub const ALL: [Backdrop; 5] = [
        Backdrop::Clouds,
        Backdrop::Sunny,
        Backdrop::Moon,
        Backdrop::Nature,
        Backdrop::Snow,
    ];

    pub fn from_icon(icon: &str) -> Self {
        match icon {
            "sun.max" => Self::Sunny,
            "moon" => Self::Moon,
            "leaf" => Self::Nature,
            "snowflake" => Self::Snow,
            _ => Self::Clouds,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Clouds => "cloud",
            Self::Sunny => "sun.max",
            Self::Moon => "moon",
            Self::Nature => "leaf",
            Self::Snow => "snowflake",
        }
    }

    /// Angular gradient stops as `#RRGGBBAA`. First and last stop match so the
    /// gradient wraps seamlessly.
    pub fn palette(self) -> &'static [&'static str] {
        match self {
            Self::Clouds => &["#007AFF99", "#AF52DE80", "#30B0C766", "#007AFF99"],
            Self::Sunny => &["#FFCC0099", "#FF950080", "#FF2D5566", "#FFCC0099"],
            Self::Moon => &["#0A0F28FF", "#1E1E3CCC", "#FAEBAA1A", "#0A0F28FF"],
            Self::Nature => &["#1F661999", "#3B591D80", "#3D4D2E66", "#1F661999"],
            Self::Snow => &["#C8DCFFFF", "#B4C8F0FF", "#FFFFFF0D", "#DCE6FFFF"],
        }
    }
}
