//! Core library for the `skycheck` CLI.
//!
//! This crate defines:
//! - Credentials handling (the `[openweather]` secrets file)
//! - The OpenWeather current-weather client: query building, fetching, response validation
//! - Shared domain models and the error type
//!
//! It is used by `skycheck-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use model::{CurrentWeather, Units, WeatherRequest};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
