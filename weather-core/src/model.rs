use thiserror::Error;

/// A single validated lookup, built from one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

/// Current conditions for a location, as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location_name: String,
    pub condition: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    /// Seconds east of UTC.
    pub utc_offset_secs: i32,
}

/// Outcome of one provider call.
pub type WeatherResult = Result<WeatherReport, FetchError>;

/// Plain tag for a [`FetchError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NotFound,
    Unauthorized,
    RateLimited,
    BadRequest,
    Network,
    Timeout,
    ServerError,
    Unknown,
}

/// Why a lookup failed. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{}", sentence(.0))]
    NotFound(String),

    #[error("Invalid API credential, check OPENWEATHER_API_KEY or your .env file.")]
    Unauthorized,

    #[error("Too many requests, wait a moment and retry.")]
    RateLimited,

    #[error("Invalid request.")]
    BadRequest,

    #[error("Network issue, check your connection.")]
    Network(String),

    #[error("The request took too long.")]
    Timeout,

    #[error("Unexpected server error, try again later.")]
    ServerError(u16),

    #[error("Something went wrong while fetching the weather.")]
    Unknown(String),
}

impl FetchError {
    pub const DEFAULT_NOT_FOUND: &'static str = "city not found";

    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::NotFound(_) => FailureKind::NotFound,
            FetchError::Unauthorized => FailureKind::Unauthorized,
            FetchError::RateLimited => FailureKind::RateLimited,
            FetchError::BadRequest => FailureKind::BadRequest,
            FetchError::Network(_) => FailureKind::Network,
            FetchError::Timeout => FailureKind::Timeout,
            FetchError::ServerError(_) => FailureKind::ServerError,
            FetchError::Unknown(_) => FailureKind::Unknown,
        }
    }
}

/// "city not found" -> "City not found."
fn sentence(message: &str) -> String {
    let trimmed = message.trim().trim_end_matches('.');
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => "City not found.".to_string(),
    }
}
