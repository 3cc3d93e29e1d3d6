use crate::app::{Message, WeatherApp};
use crate::components;
use iced::{
    theme,
    widget::{button, column, container, row, text, text_input},
    Alignment, Element, Font, Length,
};

pub fn view(app: &WeatherApp) -> Element<Message> {
    let title = text("Weather Forecast").size(24).font(Font {
        weight: iced::font::Weight::Bold,
        ..Font::DEFAULT
    });

    let search_card = create_search_card(app);

    let results = container(components::create_results_panel(&app.panel))
        .padding(16)
        .style(theme::Container::Box)
        .width(Length::Fill)
        .height(Length::Fill);

    let content = column![title, search_card, results]
        .spacing(16)
        .padding(20)
        .align_items(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn create_search_card(app: &WeatherApp) -> Element<Message> {
    let mut city_input = text_input("Enter a city name, e.g. London", &app.city_input)
        .on_input(Message::CityInputChanged)
        .padding(10)
        .size(16)
        .width(Length::Fill);

    // Enter and the button are the same action; both go quiet while loading
    if !app.loading {
        city_input = city_input.on_submit(Message::Submit);
    }

    let label = if app.loading { "Searching..." } else { "Search" };
    let search_button = button(
        text(label)
            .size(16)
            .horizontal_alignment(iced::alignment::Horizontal::Center),
    )
    .on_press_maybe((!app.loading).then_some(Message::Submit))
    .padding([10, 16])
    .width(Length::Fixed(120.0))
    .style(theme::Button::Positive);

    container(
        row![city_input, search_button]
            .spacing(10)
            .align_items(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .into()
}
