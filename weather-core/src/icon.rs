//! Condition description to display glyph.

/// Keyword/glyph pairs, checked top to bottom. The first keyword found as a
/// substring of the lower-cased description wins.
pub const ICON_TABLE: &[(&str, &str)] = &[
    ("clear", "☀️"),
    ("clouds", "☁️"),
    ("rain", "🌧️"),
    ("drizzle", "🌦️"),
    ("thunderstorm", "⛈️"),
    ("snow", "❄️"),
    ("mist", "🌫️"),
    ("fog", "🌁"),
    ("haze", "🌤️"),
    ("smoke", "💨"),
];

pub const FALLBACK_ICON: &str = "🌈";

pub fn resolve_icon(condition: &str) -> &'static str {
    let condition = condition.to_lowercase();

    ICON_TABLE
        .iter()
        .find(|(keyword, _)| condition.contains(keyword))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(FALLBACK_ICON)
}
