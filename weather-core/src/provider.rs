use crate::model::{WeatherQuery, WeatherResult};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Something that can answer a single current-weather lookup.
///
/// Implementations make exactly one attempt per call and keep no state
/// between calls.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> WeatherResult;
}
