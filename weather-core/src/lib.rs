//! Core library for the `weather` lookup tool.
//!
//! This crate defines:
//! - Credential loading (environment, optional config file)
//! - Input validation and the condition icon table
//! - The provider abstraction and the OpenWeather client
//! - Shared domain models (queries, reports, failures)
//!
//! It is used by `weather-lookup`, but carries no terminal code of its own.

pub mod config;
pub mod icon;
pub mod model;
pub mod provider;
pub mod validate;

pub use config::{API_KEY_ENV, Config, Credential};
pub use icon::{FALLBACK_ICON, resolve_icon};
pub use model::{FailureKind, FetchError, WeatherQuery, WeatherReport, WeatherResult};
pub use provider::{OpenWeatherClient, WeatherProvider};
pub use validate::{EXIT_KEYWORD, ValidationError, ValidationOutcome, validate};
