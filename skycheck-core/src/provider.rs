use async_trait::async_trait;
use std::fmt::Debug;

use crate::{CurrentWeather, WeatherError, WeatherRequest};

pub mod openweather;

/// A source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, request: &WeatherRequest) -> Result<CurrentWeather, WeatherError>;
}
