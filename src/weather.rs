use crate::config::Config;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

// Everything that can end a lookup. Display text is what the panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Enter a city name!")]
    EmptyInput,
    #[error("City not found!")]
    NotFound,
    #[error("API error: {0}")]
    ApiError(u16),
    #[error("No internet connection")]
    NoConnection,
    #[error("Server request error")]
    RequestFailed,
}

/// A validated city lookup. The only way to build one is [`WeatherQuery::parse`],
/// so a query is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    city: String,
}

impl WeatherQuery {
    pub fn parse(input: &str) -> Result<Self, WeatherError> {
        let city = input.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyInput);
        }
        Ok(Self {
            city: city.to_string(),
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

// Timeline API response, only the fields the panel uses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherResponse {
    #[serde(rename = "resolvedAddress")]
    pub resolved_address: String,
    #[serde(rename = "currentConditions")]
    pub current_conditions: CurrentConditions,
    #[serde(default)]
    pub days: Vec<DailyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    #[serde(rename = "feelslike")]
    pub feels_like: Option<f64>,
    pub humidity: f64,
    pub pressure: f64,
    #[serde(rename = "windspeed")]
    pub wind_speed: f64,
    pub conditions: String,
    pub icon: String,
}

impl CurrentConditions {
    /// Apparent temperature, or the air temperature when the provider omits it.
    pub fn feels_like(&self) -> f64 {
        self.feels_like.unwrap_or(self.temp)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
    #[serde(rename = "datetime")]
    pub date: NaiveDate,
    #[serde(rename = "tempmax")]
    pub temp_max: f64,
    #[serde(rename = "tempmin")]
    pub temp_min: f64,
    pub icon: String,
}

pub const DEFAULT_ICON: &str = "🌤️";

pub fn weather_icon(code: &str) -> &'static str {
    match code {
        "clear-day" => "☀️",
        "clear-night" => "🌙",
        "partly-cloudy-day" => "⛅",
        "partly-cloudy-night" | "cloudy" => "☁️",
        "rain" => "🌧️",
        "snow" => "❄️",
        "sleet" => "🌨️",
        "wind" => "💨",
        "fog" => "🌫️",
        "thunder-rain" | "thunder-showers-day" | "thunder-showers-night" => "⛈️",
        _ => DEFAULT_ICON,
    }
}

fn classify_transport_error(err: reqwest::Error) -> WeatherError {
    if err.is_connect() {
        warn!(error = %err, "Weather provider unreachable");
        WeatherError::NoConnection
    } else {
        warn!(error = %err, "Weather request failed");
        WeatherError::RequestFailed
    }
}

// The async function to fetch weather data
pub async fn fetch_weather(
    http: Client,
    config: Config,
    query: WeatherQuery,
) -> Result<WeatherResponse, WeatherError> {
    let url = format!(
        "{}/{}",
        config.base_url.trim_end_matches('/'),
        query.city()
    );
    debug!(%url, "Fetching weather");

    let response = http
        .get(&url)
        .query(&[
            ("key", config.api_key.as_str()),
            ("unitGroup", "metric"),
            ("lang", config.language.as_str()),
            ("include", "current,days"),
        ])
        .send()
        .await
        .map_err(classify_transport_error)?;

    let status = response.status();
    debug!(%status, "Got weather response");

    match status {
        StatusCode::OK => {
            let body = response.text().await.map_err(classify_transport_error)?;
            serde_json::from_str::<WeatherResponse>(&body).map_err(|e| {
                warn!(error = %e, "Failed to decode weather response");
                WeatherError::RequestFailed
            })
        }
        StatusCode::BAD_REQUEST => {
            debug!(city = query.city(), "Provider did not recognize city");
            Err(WeatherError::NotFound)
        }
        other => {
            warn!(status = %other, "Weather provider returned an error");
            Err(WeatherError::ApiError(other.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn sample_body() -> serde_json::Value {
        serde_json::json!({
            "queryCost": 1,
            "resolvedAddress": "London, England, United Kingdom",
            "timezone": "Europe/London",
            "currentConditions": {
                "datetime": "12:00:00",
                "temp": 12.5,
                "feelslike": 10.0,
                "humidity": 81.2,
                "pressure": 1012.0,
                "windspeed": 18.4,
                "conditions": "Partially cloudy",
                "icon": "partly-cloudy-day"
            },
            "days": [
                { "datetime": "2024-01-15", "tempmax": 13.0, "tempmin": 7.1, "icon": "rain" },
                { "datetime": "2024-01-16", "tempmax": 11.0, "tempmin": 5.0, "icon": "cloudy" }
            ]
        })
    }

    fn test_config(server: &MockServer) -> Config {
        Config {
            api_key: "TEST_KEY".into(),
            base_url: format!("{}/timeline", server.uri()),
            language: "en".into(),
        }
    }

    fn query(city: &str) -> WeatherQuery {
        WeatherQuery::parse(city).unwrap()
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(query("  Paris \n").city(), "Paris");
    }

    #[test]
    fn empty_or_blank_query_is_rejected() {
        assert_eq!(WeatherQuery::parse(""), Err(WeatherError::EmptyInput));
        assert_eq!(WeatherQuery::parse(" \t "), Err(WeatherError::EmptyInput));
    }

    #[test]
    fn error_messages() {
        assert_eq!(WeatherError::EmptyInput.to_string(), "Enter a city name!");
        assert_eq!(WeatherError::NotFound.to_string(), "City not found!");
        assert_eq!(WeatherError::ApiError(503).to_string(), "API error: 503");
        assert_eq!(WeatherError::NoConnection.to_string(), "No internet connection");
        assert_eq!(WeatherError::RequestFailed.to_string(), "Server request error");
    }

    #[test]
    fn known_icon_codes_map_to_glyphs() {
        let table = [
            ("clear-day", "☀️"),
            ("clear-night", "🌙"),
            ("partly-cloudy-day", "⛅"),
            ("partly-cloudy-night", "☁️"),
            ("cloudy", "☁️"),
            ("rain", "🌧️"),
            ("snow", "❄️"),
            ("sleet", "🌨️"),
            ("wind", "💨"),
            ("fog", "🌫️"),
            ("thunder-rain", "⛈️"),
            ("thunder-showers-day", "⛈️"),
            ("thunder-showers-night", "⛈️"),
        ];
        for (code, glyph) in table {
            assert_eq!(weather_icon(code), glyph, "icon code {code}");
        }
    }

    #[test]
    fn unknown_icon_code_uses_default_glyph() {
        assert_eq!(weather_icon("hail"), DEFAULT_ICON);
        assert_eq!(weather_icon(""), DEFAULT_ICON);
    }

    #[test]
    fn missing_feelslike_falls_back_to_temp() {
        let mut body = sample_body();
        body["currentConditions"]
            .as_object_mut()
            .unwrap()
            .remove("feelslike");

        let parsed: WeatherResponse = serde_json::from_value(body).unwrap();

        assert_eq!(parsed.current_conditions.feels_like, None);
        assert_eq!(parsed.current_conditions.feels_like(), 12.5);
    }

    #[test]
    fn missing_days_defaults_to_empty() {
        let mut body = sample_body();
        body.as_object_mut().unwrap().remove("days");

        let parsed: WeatherResponse = serde_json::from_value(body).unwrap();

        assert!(parsed.days.is_empty());
    }

    #[tokio::test]
    async fn success_sends_one_request_with_fixed_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/timeline/London"))
            .and(query_param("key", "TEST_KEY"))
            .and(query_param("unitGroup", "metric"))
            .and(query_param("lang", "en"))
            .and(query_param("include", "current,days"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_body()))
            .expect(1)
            .mount(&server)
            .await;

        let result = fetch_weather(Client::new(), test_config(&server), query("London"))
            .await
            .unwrap();

        assert_eq!(result.resolved_address, "London, England, United Kingdom");
        assert_eq!(result.current_conditions.temp, 12.5);
        assert_eq!(result.current_conditions.feels_like(), 10.0);
        assert_eq!(result.days.len(), 2);
        assert_eq!(
            result.days[1].date,
            NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
        );
    }

    #[tokio::test]
    async fn bad_request_means_city_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Bad API Request"))
            .expect(1)
            .mount(&server)
            .await;

        let err = fetch_weather(Client::new(), test_config(&server), query("Nowhereville"))
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::NotFound);
        assert_eq!(err.to_string(), "City not found!");
    }

    #[tokio::test]
    async fn other_status_reports_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = fetch_weather(Client::new(), test_config(&server), query("London"))
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::ApiError(500));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn unauthorized_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = fetch_weather(Client::new(), test_config(&server), query("London"))
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::ApiError(401));
    }

    #[tokio::test]
    async fn malformed_body_is_a_request_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
            .mount(&server)
            .await;

        let err = fetch_weather(Client::new(), test_config(&server), query("London"))
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::RequestFailed);
    }

    #[tokio::test]
    async fn bad_forecast_date_is_a_request_failure() {
        let server = MockServer::start().await;
        let mut body = sample_body();
        body["days"][0]["datetime"] = serde_json::json!("15/01/2024");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = fetch_weather(Client::new(), test_config(&server), query("London"))
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::RequestFailed);
    }

    #[tokio::test]
    async fn refused_connection_means_no_connection() {
        // Grab a free port, then close it so nothing is listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let config = Config {
            api_key: "TEST_KEY".into(),
            base_url: format!("http://127.0.0.1:{port}/timeline"),
            language: "en".into(),
        };

        let err = fetch_weather(Client::new(), config, query("London"))
            .await
            .unwrap_err();

        assert_eq!(err, WeatherError::NoConnection);
    }
}
