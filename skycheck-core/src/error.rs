use std::path::PathBuf;

use thiserror::Error;

/// Every way a lookup can fail.
///
/// The `Display` text of each variant is what the user sees on stderr, so it
/// stays a single line.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Couldn't find a secrets file. Looked in: {}", join_paths(.searched))]
    ConfigNotFound { searched: Vec<PathBuf> },

    #[error("Failed to read secrets file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse secrets file {}: {}", .path.display(), .source.message())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse secrets file {}: {source}", .path.display())]
    IniParse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    #[error("Secrets file {} has no [openweather] section.", .path.display())]
    MissingSection { path: PathBuf },

    #[error("Secrets file {} has no api_key in its [openweather] section.", .path.display())]
    MissingApiKey { path: PathBuf },

    #[error("Invalid endpoint URL '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Access denied. Check your API key.")]
    AccessDenied,

    #[error("Can't find weather data for this city.")]
    CityNotFound,

    #[error("Something went wrong.. ({0})")]
    HttpStatus(u16),

    #[error("Something went wrong.. ({0})")]
    Transport(#[source] reqwest::Error),

    #[error("Couldn't read the server response.")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("Unexpected server response: {0}")]
    UnexpectedResponse(String),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
