use crate::config::Config;
use crate::panel::{self, Panel};
use crate::view;
use crate::weather::{self, WeatherError, WeatherQuery, WeatherResponse};
use chrono::Local;
use iced::{Application, Command, Element, Theme};
use std::future::Future;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum Message {
    CityInputChanged(String),
    Submit,
    WeatherFetched(Result<WeatherResponse, WeatherError>),
}

pub struct WeatherApp {
    pub city_input: String,
    pub panel: Panel,
    pub loading: bool,
    config: Config,
    http: reqwest::Client,
}

impl WeatherApp {
    pub fn with_config(config: Config) -> Self {
        Self {
            city_input: String::new(),
            panel: panel::prompt(),
            loading: false,
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Validate the input and mark a lookup as in flight.
    ///
    /// Returns the query to send, or `None` when no request should go out:
    /// either the input was blank (the panel now shows the error) or a lookup
    /// is already running.
    pub fn begin_lookup(&mut self) -> Option<WeatherQuery> {
        if self.loading {
            debug!("Lookup already in flight, ignoring submit");
            return None;
        }

        match WeatherQuery::parse(&self.city_input) {
            Ok(query) => {
                self.loading = true;
                Some(query)
            }
            Err(err) => {
                self.panel = panel::show_error(err.to_string());
                None
            }
        }
    }

    pub fn request(
        &self,
        query: WeatherQuery,
    ) -> impl Future<Output = Result<WeatherResponse, WeatherError>> {
        weather::fetch_weather(self.http.clone(), self.config.clone(), query)
    }

    pub fn finish_lookup(&mut self, result: Result<WeatherResponse, WeatherError>) {
        self.loading = false;
        self.panel = match result {
            Ok(data) => {
                info!(address = %data.resolved_address, "Weather updated");
                panel::render(&data, Local::now())
            }
            Err(err) => panel::show_error(err.to_string()),
        };
    }
}

impl Application for WeatherApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = Config;

    fn new(config: Config) -> (WeatherApp, Command<Message>) {
        (WeatherApp::with_config(config), Command::none())
    }

    fn title(&self) -> String {
        String::from("Weather Forecast")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::CityInputChanged(value) => {
                self.city_input = value;
                Command::none()
            }
            Message::Submit => match self.begin_lookup() {
                Some(query) => Command::perform(self.request(query), Message::WeatherFetched),
                None => Command::none(),
            },
            Message::WeatherFetched(result) => {
                self.finish_lookup(result);
                Command::none()
            }
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn view(&self) -> Element<Message> {
        view::view(self)
    }
}
