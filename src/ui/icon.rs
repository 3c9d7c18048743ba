//! Condition category to icon mapping

use ratatui::style::Color;

/// Icon drawn next to the current conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Sun,
    Cloud,
    CloudRain,
    CloudSnow,
    CloudDrizzle,
}

impl Icon {
    /// Terminal glyph for this icon
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Sun => "\u{2600}",           // ☀
            Icon::Cloud => "\u{2601}",         // ☁
            Icon::CloudRain => "\u{1F327}",    // 🌧
            Icon::CloudSnow => "\u{1F328}",    // 🌨
            Icon::CloudDrizzle => "\u{1F326}", // 🌦
        }
    }

    /// Color the glyph is drawn in
    pub fn color(self) -> Color {
        match self {
            Icon::Sun => Color::Yellow,
            Icon::Cloud => Color::Gray,
            Icon::CloudRain | Icon::CloudDrizzle => Color::Blue,
            Icon::CloudSnow => Color::White,
        }
    }
}

/// Picks the icon for a provider condition category.
///
/// Matching is case-insensitive; anything unrecognized gets a plain cloud.
pub fn icon_for(condition: &str) -> Icon {
    match condition.to_lowercase().as_str() {
        "clear" => Icon::Sun,
        "clouds" => Icon::Cloud,
        "rain" => Icon::CloudRain,
        "snow" => Icon::CloudSnow,
        "drizzle" => Icon::CloudDrizzle,
        _ => Icon::Cloud,
    }
}
