use serde_json::Number;
use std::fmt;

/// Unit system requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn from_imperial_flag(imperial: bool) -> Self {
        if imperial { Units::Imperial } else { Units::Metric }
    }

    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature unit letter shown after the degree sign.
    pub fn symbol(&self) -> char {
        match self {
            Units::Metric => 'C',
            Units::Imperial => 'F',
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub city: String,
    pub units: Units,
}

impl WeatherRequest {
    /// Build a request from the city as typed on the command line, one word per item.
    pub fn from_words<S: AsRef<str>>(words: &[S], units: Units) -> Self {
        let city = words.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
        Self { city, units }
    }
}

/// Current conditions for a city, validated from the provider's response.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub city: String,
    pub description: String,
    /// Kept as the JSON number so it prints exactly as the API sent it.
    pub temperature: Number,
    pub units: Units,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_words_are_joined_with_single_spaces() {
        let req = WeatherRequest::from_words(&["New", "York"], Units::Metric);
        assert_eq!(req.city, "New York");

        let req = WeatherRequest::from_words(&["Rio".to_string(), "de".into(), "Janeiro".into()], Units::Imperial);
        assert_eq!(req.city, "Rio de Janeiro");
        assert_eq!(req.units, Units::Imperial);
    }

    #[test]
    fn unit_tokens_and_symbols() {
        assert_eq!(Units::from_imperial_flag(false).as_str(), "metric");
        assert_eq!(Units::from_imperial_flag(true).as_str(), "imperial");
        assert_eq!(Units::Metric.symbol(), 'C');
        assert_eq!(Units::Imperial.symbol(), 'F');
        assert_eq!(Units::default(), Units::Metric);
    }
}
