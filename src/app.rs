use crate::calendar::{Calendar, MONTH_HEIGHT};
use crate::help::Help;
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use daypick::{calmath::add_days, DayPicker, DisplayWindow, PageDirection, Selection, YearMonth};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Widget,
    DefaultTerminal,
};
use std::io::{self, Write};
use time::Date;

const DAYS_IN_WEEK: i64 = 7;

#[derive(Clone, Debug)]
pub(crate) struct App {
    picker: DayPicker,
    window: DisplayWindow,
    selection: Selection,
    cursor: Date,
    state: AppState,
}

impl App {
    pub(crate) fn new(picker: DayPicker) -> App {
        let window = picker.initial_window();
        let selection = picker.initial_selection();
        let today = picker.today();
        let cursor = if window.contains_date(today) {
            today
        } else {
            window.pivot().first_day()
        };
        App {
            picker,
            window,
            selection,
            cursor,
            state: AppState::Picking,
        }
    }

    /// Open the picker on the month of `date`, with the cursor on `date` if
    /// it can be navigated to
    pub(crate) fn start_date(mut self, date: Date) -> App {
        if let Ok(month) = YearMonth::of(date) {
            self.window = self.picker.window_at(month);
            self.cursor = if self.window.contains_date(date) {
                date
            } else {
                self.window.pivot().first_day()
            };
        }
        self
    }

    /// Run the picker until the user quits, returning the final selection
    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<Selection> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.selection)
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code, modifiers) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the key had no
    // effect
    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-DAYS_IN_WEEK),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(DAYS_IN_WEEK),
                KeyCode::Char('w') | KeyCode::PageUp => self.page(PageDirection::Previous),
                KeyCode::Char('z') | KeyCode::PageDown => self.page(PageDirection::Next),
                KeyCode::Enter => self.select(modifiers.contains(KeyModifiers::SHIFT)),
                KeyCode::Char(' ') => self.select(false),
                KeyCode::Char('s') => self.select(true),
                KeyCode::Char('c') => self.set_selection(self.selection.cleared()),
                KeyCode::Char('0') | KeyCode::Home => self.jump_to(self.picker.today()),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn move_cursor(&mut self, days: i64) -> bool {
        add_days(self.cursor, days).is_some_and(|date| self.jump_to(date))
    }

    fn jump_to(&mut self, date: Date) -> bool {
        if self.picker.day(date, &self.selection).is_none() {
            return false;
        }
        let Ok(month) = YearMonth::of(date) else {
            return false;
        };
        self.window = self.window.go_to(month);
        self.cursor = date;
        true
    }

    fn page(&mut self, direction: PageDirection) -> bool {
        let window = self.picker.page(&self.window, direction);
        if window == self.window {
            return false;
        }
        self.window = window;
        if !self.window.contains_date(self.cursor) {
            self.cursor = self.window.pivot().first_day();
        }
        true
    }

    fn select(&mut self, extend: bool) -> bool {
        self.set_selection(self.picker.click_date(&self.selection, self.cursor, extend))
    }

    // Returns `false` if the selection did not change
    fn set_selection(&mut self, selection: Selection) -> bool {
        let previous = std::mem::replace(&mut self.selection, selection);
        previous != self.selection
    }

    fn status(&self) -> String {
        let modifiers = self
            .picker
            .day(self.cursor, &self.selection)
            .map_or_else(String::new, |day| {
                day.modifiers.names().collect::<Vec<_>>().join(", ")
            });
        format!(" {} | {}: {}", self.selection, self.cursor, modifiers)
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, status_area] =
            Layout::vertical([Constraint::Min(MONTH_HEIGHT), Constraint::Length(1)]).areas(area);
        let months = self.picker.render(&self.window, &self.selection);
        Calendar::new(&months, self.picker.options().first_day_of_week)
            .cursor(self.cursor)
            .render(cal_area, buf);
        Line::styled(self.status(), STATUS_STYLE).render(status_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}
