//! Human-friendly output formatting.

use chrono::{DateTime, Duration, Utc};
use weather_lookup_core::{WeatherReport, resolve_icon};

pub const SUMMARY_WIDTH: usize = 52;
const BANNER_WIDTH: usize = 60;

pub const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const EXIT_FAREWELL: &str = "🔶 Thank you for using the Weather App. Stay safe! 🌦️";
pub const INTERRUPT_FAREWELL: &str = "🔶 Weather App closed. Stay prepared! 🌦️";

/// Header shown before every prompt.
pub fn banner() -> String {
    let inner = BANNER_WIDTH - 6;
    [
        String::new(),
        "#".repeat(BANNER_WIDTH),
        format!("## {:^inner$} ##", "WEATHER APP"),
        format!("## {:^inner$} ##", "Fast • Clean • Real-Time Forecasts"),
        "#".repeat(BANNER_WIDTH),
    ]
    .join("\n")
}

/// Bordered summary block. Temperature is always shown with one decimal.
pub fn render_report(report: &WeatherReport, now: DateTime<Utc>) -> String {
    let icon = resolve_icon(&report.condition);
    let local = local_time(now, report.utc_offset_secs);

    [
        String::new(),
        "=".repeat(SUMMARY_WIDTH),
        format!("{:^SUMMARY_WIDTH$}", "🌦️  WEATHER SUMMARY  🌦️"),
        "=".repeat(SUMMARY_WIDTH),
        format!("📍 City          : {}", report.location_name),
        format!("{icon}  Condition     : {}", capitalize_first(&report.condition)),
        format!("🌡️  Temperature   : {:.1}°C", report.temperature_c),
        format!("💧 Humidity      : {}%", report.humidity_pct),
        format!("🕒 Local Time    : {local}"),
        "-".repeat(SUMMARY_WIDTH),
        "Thank you for checking the weather 🌦️".to_string(),
        "=".repeat(SUMMARY_WIDTH),
    ]
    .join("\n")
}

/// One-line failure message.
pub fn render_failure(message: &str) -> String {
    format!("\n❌ {message}\n")
}

/// Wall-clock time at a location `offset_secs` east of UTC.
pub fn local_time(now: DateTime<Utc>, offset_secs: i32) -> String {
    let local = now.naive_utc() + Duration::seconds(i64::from(offset_secs));
    local.format(LOCAL_TIME_FORMAT).to_string()
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
