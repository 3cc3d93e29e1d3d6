//! Results panel contents.
//!
//! A [`Panel`] is plain data: the ordered lines shown under the search box.
//! Every lookup builds a fresh one, so nothing from a previous result can
//! linger. Turning it into widgets is the job of `components`.

use crate::weather::{weather_icon, WeatherResponse};
use chrono::{DateTime, Local};

const FORECAST_DAYS: usize = 5;

pub const PROMPT: &str = "Enter a city name to see the weather forecast!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Prompt,
    Error,
    Header,
    Temperature,
    Condition,
    FeelsLike,
    Detail,
    ForecastHeader,
    ForecastDay,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub role: LineRole,
}

impl Line {
    fn new(role: LineRole, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    lines: Vec<Line>,
}

impl Panel {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn with_role(&self, role: LineRole) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |line| line.role == role)
    }

    /// True for a rendered response, false for the prompt or an error.
    pub fn shows_weather(&self) -> bool {
        !self
            .lines
            .iter()
            .any(|line| matches!(line.role, LineRole::Prompt | LineRole::Error))
    }
}

pub fn prompt() -> Panel {
    Panel {
        lines: vec![Line::new(LineRole::Prompt, PROMPT)],
    }
}

pub fn show_error(message: impl Into<String>) -> Panel {
    Panel {
        lines: vec![Line::new(LineRole::Error, message)],
    }
}

pub fn render(response: &WeatherResponse, updated_at: DateTime<Local>) -> Panel {
    let current = &response.current_conditions;
    let mut lines = vec![
        Line::new(
            LineRole::Header,
            format!(
                "{} {}",
                weather_icon(&current.icon),
                response.resolved_address
            ),
        ),
        Line::new(LineRole::Temperature, format!("{}°C", current.temp)),
        Line::new(LineRole::Condition, current.conditions.clone()),
        Line::new(
            LineRole::FeelsLike,
            format!("Feels like: {}°C", current.feels_like()),
        ),
        Line::new(LineRole::Detail, format!("💧 Humidity: {}%", current.humidity)),
        Line::new(
            LineRole::Detail,
            format!("📊 Pressure: {} hPa", current.pressure),
        ),
        Line::new(
            LineRole::Detail,
            format!("💨 Wind: {} km/h", current.wind_speed),
        ),
    ];

    // Day 0 is today, already covered by the current conditions
    if response.days.len() > 1 {
        lines.push(Line::new(LineRole::ForecastHeader, "📅 5-day forecast"));
        lines.extend(response.days.iter().skip(1).take(FORECAST_DAYS).map(|day| {
            Line::new(
                LineRole::ForecastDay,
                format!(
                    "{} {} {}°/{}°",
                    day.date.format("%a"),
                    weather_icon(&day.icon),
                    day.temp_max,
                    day.temp_min
                ),
            )
        }));
    }

    lines.push(Line::new(
        LineRole::Updated,
        format!("Updated: {}", updated_at.format("%d.%m.%Y %H:%M")),
    ));

    Panel { lines }
}
