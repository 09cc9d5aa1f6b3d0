use daypick::{DayModifiers, Modifier};
use ratatui::style::{Color, Modifier as TextModifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(TextModifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(TextModifier::BOLD);

pub(crate) const WEEK_NUMBER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const OUTSIDE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const DISABLED_STYLE: Style = BASE_STYLE
    .fg(Color::DarkGray)
    .add_modifier(TextModifier::CROSSED_OUT);

pub(crate) const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightBlue)
    .add_modifier(TextModifier::BOLD);

pub(crate) const RANGE_MIDDLE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE
    .fg(Color::LightYellow)
    .add_modifier(TextModifier::BOLD);

pub(crate) const CUSTOM_STYLE: Style = BASE_STYLE.add_modifier(TextModifier::UNDERLINED);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(TextModifier::REVERSED);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

/// Project a day's resolved modifiers onto a terminal style.  Later rules
/// win: selection beats "today", which beats dimming of outside and disabled
/// days.
pub(crate) fn day_style(modifiers: &DayModifiers) -> Style {
    let mut style = BASE_STYLE;
    if modifiers.iter().any(|m| !m.is_builtin()) {
        style = CUSTOM_STYLE;
    }
    if modifiers.contains(&Modifier::Outside) {
        style = style.patch(OUTSIDE_STYLE);
    }
    if modifiers.contains(&Modifier::Disabled) {
        style = style.patch(DISABLED_STYLE);
    }
    if modifiers.contains(&Modifier::Today) {
        style = style.patch(TODAY_STYLE);
    }
    if modifiers.contains(&Modifier::RangeMiddle) {
        style = style.patch(RANGE_MIDDLE_STYLE);
    } else if modifiers.contains(&Modifier::Selected) {
        style = style.patch(SELECTED_STYLE);
    }
    style
}
