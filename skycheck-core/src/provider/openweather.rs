use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Number;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{CurrentWeather, Units, WeatherRequest},
};

use super::WeatherProvider;

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: Url,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    /// Point the provider at a different current-weather endpoint.
    pub fn with_endpoint(api_key: String, endpoint: &str) -> Result<Self, WeatherError> {
        let endpoint = Url::parse(endpoint).map_err(|e| WeatherError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_key,
            endpoint,
            http: Client::new(),
        })
    }

    /// Full request URL: `?q=<city>&units=<units>&appid=<key>`, form-urlencoded
    /// so spaces become `+`.
    pub fn query_url(&self, request: &WeatherRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &request.city)
            .append_pair("units", request.units.as_str())
            .append_pair("appid", &self.api_key);
        url
    }

    /// Single GET; returns the raw body of a 2xx response.
    pub async fn fetch(&self, url: Url) -> Result<Vec<u8>, WeatherError> {
        // The URL carries the API key, so strip it from transport errors.
        let res = self.http.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            debug!(error = %e, "request to OpenWeather failed");
            WeatherError::Transport(e)
        })?;

        let status = res.status();
        debug!(status = status.as_u16(), "OpenWeather responded");

        if let Some(err) = status_error(status) {
            debug!(status = status.as_u16(), "OpenWeather returned an error status");
            return Err(err);
        }

        let body = res
            .bytes()
            .await
            .map_err(|e| WeatherError::Transport(e.without_url()))?;

        Ok(body.to_vec())
    }
}

/// Map a non-success status to the matching error; `None` for 2xx.
pub fn status_error(status: StatusCode) -> Option<WeatherError> {
    if status.is_success() {
        return None;
    }

    Some(match status {
        StatusCode::UNAUTHORIZED => WeatherError::AccessDenied,
        StatusCode::NOT_FOUND => WeatherError::CityNotFound,
        other => WeatherError::HttpStatus(other.as_u16()),
    })
}

/// Decode a current-weather body and check it has everything we display.
pub fn parse_current(body: &[u8], units: Units) -> Result<CurrentWeather, WeatherError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(WeatherError::MalformedResponse)?;

    let parsed: OwCurrentResponse = serde_json::from_value(value)
        .map_err(|e| WeatherError::UnexpectedResponse(e.to_string()))?;

    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| WeatherError::UnexpectedResponse("empty `weather` list".to_string()))?;

    Ok(CurrentWeather {
        city: parsed.name,
        description,
        temperature: parsed.main.temp,
        units,
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, request: &WeatherRequest) -> Result<CurrentWeather, WeatherError> {
        let url = self.query_url(request);
        debug!(
            city = %request.city,
            units = %request.units,
            host = url.host_str().unwrap_or_default(),
            "requesting current weather"
        );

        let body = self.fetch(url).await?;
        parse_current(&body, request.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenWeatherProvider {
        OpenWeatherProvider::new("KEY".to_string()).expect("default endpoint is valid")
    }

    #[test]
    fn multi_word_city_is_plus_encoded() {
        let req = WeatherRequest::from_words(&["New", "York"], Units::Metric);
        let url = provider().query_url(&req);

        assert_eq!(
            url.as_str(),
            "https://api.openweathermap.org/data/2.5/weather?q=New+York&units=metric&appid=KEY"
        );
    }

    #[test]
    fn units_token_follows_flag() {
        let p = provider();
        let metric = p.query_url(&WeatherRequest::from_words(&["Oslo"], Units::Metric));
        let imperial = p.query_url(&WeatherRequest::from_words(&["Oslo"], Units::Imperial));

        let units = |u: &Url| {
            u.query_pairs().find(|(k, _)| k == "units").map(|(_, v)| v.into_owned())
        };
        assert_eq!(units(&metric).as_deref(), Some("metric"));
        assert_eq!(units(&imperial).as_deref(), Some("imperial"));
    }

    #[test]
    fn reserved_and_non_ascii_city_decodes_back() {
        let req = WeatherRequest::from_words(&["São", "Paulo", "&", "Zürich?"], Units::Metric);
        let url = provider().query_url(&req);

        assert!(!url.as_str().contains(' '));
        assert!(url.as_str().contains("q=S%C3%A3o+Paulo+%26+Z%C3%BCrich%3F&"));

        let q = url.query_pairs().find(|(k, _)| k == "q").map(|(_, v)| v.into_owned());
        assert_eq!(q.as_deref(), Some("São Paulo & Zürich?"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = OpenWeatherProvider::with_endpoint("KEY".into(), "not a url").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidEndpoint { .. }));
    }

    #[test]
    fn status_mapping() {
        assert!(status_error(StatusCode::OK).is_none());
        assert!(matches!(status_error(StatusCode::UNAUTHORIZED), Some(WeatherError::AccessDenied)));
        assert!(matches!(status_error(StatusCode::NOT_FOUND), Some(WeatherError::CityNotFound)));
        assert!(matches!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR),
            Some(WeatherError::HttpStatus(500))
        ));
        assert!(matches!(status_error(StatusCode::TOO_MANY_REQUESTS), Some(WeatherError::HttpStatus(429))));
    }

    #[test]
    fn parses_minimal_current_response() {
        let body = br#"{"name":"Paris","weather":[{"description":"clear sky"}],"main":{"temp":18.5}}"#;
        let weather = parse_current(body, Units::Metric).expect("valid body");

        assert_eq!(
            weather,
            CurrentWeather {
                city: "Paris".into(),
                description: "clear sky".into(),
                temperature: Number::from_f64(18.5).unwrap(),
                units: Units::Metric,
            }
        );
    }

    #[test]
    fn temperature_keeps_its_json_form() {
        let body = br#"{"name":"Oslo","weather":[{"description":"snow"}],"main":{"temp":-3}}"#;
        let weather = parse_current(body, Units::Metric).unwrap();
        assert_eq!(weather.temperature.to_string(), "-3");

        let body = br#"{"name":"Oslo","weather":[{"description":"snow"}],"main":{"temp":20.0}}"#;
        let weather = parse_current(body, Units::Metric).unwrap();
        assert_eq!(weather.temperature.to_string(), "20.0");
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_current(b"<html>oops</html>", Units::Metric).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));

        let err = parse_current(&[0xff, 0xfe, 0x00], Units::Metric).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn missing_fields_are_a_schema_error() {
        let err = parse_current(br#"{"name":"Paris","weather":[]}"#, Units::Metric).unwrap_err();
        match err {
            WeatherError::UnexpectedResponse(detail) => assert!(detail.contains("main")),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = parse_current(
            br#"{"name":"Paris","weather":[],"main":{"temp":1.0}}"#,
            Units::Metric,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty `weather` list"));

        let err = parse_current(
            br#"{"name":"Paris","weather":[{"description":"fog"}],"main":{"temp":"warm"}}"#,
            Units::Metric,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherError::UnexpectedResponse(_)));

        let err = parse_current(br#"[1, 2, 3]"#, Units::Metric).unwrap_err();
        assert!(matches!(err, WeatherError::UnexpectedResponse(_)));
    }
}
