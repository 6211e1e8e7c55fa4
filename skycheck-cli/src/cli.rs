use clap::Parser;
use skycheck_core::{
    Config, OpenWeatherProvider, Units, WeatherError, WeatherProvider, WeatherRequest,
};
use std::path::PathBuf;
use tracing::debug;

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycheck", version, about = "Get weather and temperature info for a city")]
pub struct Cli {
    /// City name; several words are joined with spaces, e.g. `New York`.
    #[arg(required = true, num_args = 1..)]
    pub city: Vec<String>,

    /// Display the temperature in imperial units.
    #[arg(short, long)]
    pub imperial: bool,

    /// Secrets file holding `[openweather] api_key`.
    #[arg(short, long, value_name = "PATH", env = "SKYCHECK_SECRETS")]
    pub config: Option<PathBuf>,

    /// Print debug logs to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn units(&self) -> Units {
        Units::from_imperial_flag(self.imperial)
    }

    pub fn request(&self) -> WeatherRequest {
        WeatherRequest::from_words(&self.city, self.units())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let provider = OpenWeatherProvider::new(config.api_key)?;

        let line = lookup(&provider, &self.request()).await?;
        println!("{line}");

        Ok(())
    }
}

/// Fetch current weather and render the summary line.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    request: &WeatherRequest,
) -> Result<String, WeatherError> {
    let weather = provider.current_weather(request).await?;
    debug!(?weather, "lookup succeeded");
    Ok(display::summary_line(&weather))
}
