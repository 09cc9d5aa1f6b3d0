use crate::theme::{
    day_style, BASE_STYLE, CURSOR_STYLE, TITLE_STYLE, WEEKDAY_STYLE, WEEK_NUMBER_STYLE,
};
use daypick::{Day, Modifier, MonthMatrix};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Span, Text},
    widgets::{Block, Paragraph, Widget},
};
use time::{Date, Weekday};

static WEEKDAY_ABBRS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Number of columns to the left of the days, used for week numbers
const GUTTER_WIDTH: u16 = 3;

/// Width of a month's days, not counting the gutter or border
const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

/// Width of a month including its border
const MONTH_WIDTH: u16 = GUTTER_WIDTH + MAIN_WIDTH + 2;

/// Number of lines taken up by the weekday header
const HEADER_LINES: u16 = 1;

/// The most weeks any month can need
const MAX_WEEKS: u16 = 6;

/// Height of a month including its border
pub(crate) const MONTH_HEIGHT: u16 = HEADER_LINES + MAX_WEEKS + 2;

/// Columns between adjacent months
const MONTH_SPACING: u16 = 1;

/// The months of a display window, drawn side by side
#[derive(Clone, Copy, Debug)]
pub(crate) struct Calendar<'a> {
    months: &'a [MonthMatrix],
    first_day_of_week: Weekday,
    cursor: Option<Date>,
}

impl<'a> Calendar<'a> {
    pub(crate) fn new(months: &'a [MonthMatrix], first_day_of_week: Weekday) -> Self {
        Calendar {
            months,
            first_day_of_week,
            cursor: None,
        }
    }

    pub(crate) fn cursor(mut self, date: Date) -> Self {
        self.cursor = Some(date);
        self
    }
}

impl Widget for Calendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let constraints = self.months.iter().map(|_| Constraint::Length(MONTH_WIDTH));
        let areas = Layout::horizontal(constraints)
            .flex(Flex::Center)
            .spacing(MONTH_SPACING)
            .split(area);
        for (matrix, month_area) in std::iter::zip(self.months, areas.iter()) {
            let month_area = Rect {
                height: month_area.height.min(MONTH_HEIGHT),
                ..*month_area
            };
            let title = format!(" {} {} ", matrix.month().month(), matrix.month().year());
            let block = Block::bordered()
                .title(Span::styled(title, TITLE_STYLE))
                .style(BASE_STYLE);
            let inner = block.inner(month_area);
            block.render(month_area, buf);
            let mut canvas = BufferCanvas::new(inner, buf);
            canvas.draw_header(self.first_day_of_week);
            for (i, week) in std::iter::zip(0u16.., matrix.weeks()) {
                canvas.draw_week_number(i, week.number());
                for day in week.days() {
                    let cursor = self.cursor == Some(day.date()) && !day.day.is_outside();
                    canvas.draw_day(i, day, cursor);
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_header(&mut self, first_day_of_week: Weekday) {
        let mut wd = first_day_of_week;
        for i in 0..7 {
            let abbr = WEEKDAY_ABBRS[usize::from(wd.number_days_from_sunday())];
            self.mvprint(0, GUTTER_WIDTH + DAY_WIDTH * i, format!(" {abbr} "), WEEKDAY_STYLE);
            wd = wd.next();
        }
    }

    fn draw_week_number(&mut self, week_no: u16, number: u8) {
        self.mvprint(
            week_no + HEADER_LINES,
            0,
            format!("{number:>2} "),
            WEEK_NUMBER_STYLE,
        );
    }

    fn draw_day(&mut self, week_no: u16, day: &Day, cursor: bool) {
        let s = if day.has(&Modifier::Hidden) {
            String::from("    ")
        } else if day.has(&Modifier::Today) {
            format!("[{:2}]", day.date().day())
        } else {
            format!(" {:2} ", day.date().day())
        };
        let mut style = day_style(&day.modifiers);
        if cursor {
            style = style.patch(CURSOR_STYLE);
        }
        let x = GUTTER_WIDTH + DAY_WIDTH * u16::from(day.day.index());
        self.mvprint(week_no + HEADER_LINES, x, s, style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // month's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
