use crate::app::Message;
use crate::panel::{Line, LineRole, Panel};
use iced::{
    font, theme,
    widget::{container, scrollable, text, Column},
    Alignment, Color, Element, Font, Length,
};

const BOLD: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

const GRAY: Color = Color::from_rgb(0.5, 0.5, 0.5);
const RED: Color = Color::from_rgb(0.8, 0.2, 0.2);

fn create_line(line: &Line) -> Element<Message> {
    let (size, bold, color): (u16, bool, Option<Color>) = match line.role {
        LineRole::Prompt => (14, false, Some(GRAY)),
        LineRole::Error => (16, false, Some(RED)),
        LineRole::Header => (18, true, None),
        LineRole::Temperature => (36, true, None),
        LineRole::Condition => (16, false, None),
        LineRole::FeelsLike | LineRole::Detail => (14, false, None),
        LineRole::ForecastHeader => (16, true, None),
        LineRole::ForecastDay => (12, false, None),
        LineRole::Updated => (10, false, Some(GRAY)),
    };

    let mut label = text(&line.text).size(size);
    if bold {
        label = label.font(BOLD);
    }
    if let Some(color) = color {
        label = label.style(color);
    }
    label.into()
}

// Details and forecast rows sit together in a boxed frame
fn create_group(rows: Vec<Element<Message>>) -> Element<Message> {
    container(
        Column::with_children(rows)
            .spacing(4)
            .align_items(Alignment::Center),
    )
    .padding(8)
    .style(theme::Container::Box)
    .width(Length::Fill)
    .center_x()
    .into()
}

fn create_notice(panel: &Panel) -> Element<Message> {
    let rows: Vec<Element<Message>> = panel.lines().iter().map(create_line).collect();
    let lines = Column::with_children(rows).align_items(Alignment::Center);

    container(lines)
        .padding(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
}

pub fn create_results_panel(panel: &Panel) -> Element<Message> {
    if !panel.shows_weather() {
        return create_notice(panel);
    }

    let mut content = Column::new().spacing(6).align_items(Alignment::Center);
    let mut group: Vec<Element<Message>> = Vec::new();
    let mut group_role: Option<LineRole> = None;

    for line in panel.lines() {
        if group_role.is_some() && group_role != Some(line.role) {
            content = content.push(create_group(std::mem::take(&mut group)));
            group_role = None;
        }

        match line.role {
            LineRole::Detail | LineRole::ForecastDay => {
                group.push(create_line(line));
                group_role = Some(line.role);
            }
            _ => content = content.push(create_line(line)),
        }
    }
    if !group.is_empty() {
        content = content.push(create_group(group));
    }

    scrollable(container(content).padding(10).width(Length::Fill))
        .height(Length::Fill)
        .into()
}
