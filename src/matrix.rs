//! Construction of the grid of weeks displayed for a month
use crate::calmath::{iter_days, WeekdayExt, YearMonth, DAYS_IN_WEEK};
use crate::matcher::Matcher;
use crate::modifiers::{resolve, DayModifiers, Modifier, ModifierMap};
use std::hash::{Hash, Hasher};
use time::{Date, Duration, Weekday};

/// Number of weeks shown when `fixed_weeks` is set
const FIXED_WEEK_QTY: usize = 6;

/// One date as it appears in the grid of a displayed month
#[derive(Clone, Copy, Debug, Eq)]
pub struct CalendarDay {
    date: Date,
    displayed_month: YearMonth,
    index: u8,
}

impl CalendarDay {
    pub fn new(date: Date, displayed_month: YearMonth, index: u8) -> CalendarDay {
        CalendarDay {
            date,
            displayed_month,
            index,
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn displayed_month(&self) -> YearMonth {
        self.displayed_month
    }

    /// Position of the day within its week row, starting from 0
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn belongs_to_displayed_month(&self) -> bool {
        self.displayed_month.contains(self.date)
    }

    pub fn is_outside(&self) -> bool {
        !self.belongs_to_displayed_month()
    }
}

// Days are identified by their date alone.
impl PartialEq for CalendarDay {
    fn eq(&self, other: &CalendarDay) -> bool {
        self.date == other.date
    }
}

impl Hash for CalendarDay {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
    }
}

/// A [`CalendarDay`] together with the modifiers resolved for it
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Day {
    pub day: CalendarDay,
    pub modifiers: DayModifiers,
}

impl Day {
    pub fn date(&self) -> Date {
        self.day.date()
    }

    pub fn has(&self, modifier: &Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    pub fn is_selectable(&self) -> bool {
        self.modifiers.is_selectable()
    }
}

/// Seven consecutive days, starting on the configured first day of the week
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeekRow {
    number: u8,
    // Invariant: always DAYS_IN_WEEK long
    days: Vec<Day>,
}

impl WeekRow {
    /// Week-of-year number: ISO 8601 weeks when weeks start on Monday,
    /// otherwise weeks counted so that week 1 contains January 1st
    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn first(&self) -> &Day {
        &self.days[0]
    }

    pub fn last(&self) -> &Day {
        &self.days[DAYS_IN_WEEK - 1]
    }
}

/// The weeks covering one calendar month, padded with days of the
/// neighboring months so that every row is complete
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthMatrix {
    month: YearMonth,
    weeks: Vec<WeekRow>,
}

impl MonthMatrix {
    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flat_map(WeekRow::days)
    }

    /// Look up a displayed date
    pub fn find(&self, date: Date) -> Option<&Day> {
        self.days().find(|d| d.date() == date)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MatrixOptions {
    pub first_day_of_week: Weekday,
    /// Always show six weeks, adding whole weeks after the month if needed
    pub fixed_weeks: bool,
    /// When false, days of neighboring months are marked `hidden`
    pub show_outside_days: bool,
}

impl Default for MatrixOptions {
    fn default() -> MatrixOptions {
        MatrixOptions {
            first_day_of_week: Weekday::Sunday,
            fixed_weeks: false,
            show_outside_days: true,
        }
    }
}

/// Builds [`MonthMatrix`] values, resolving every day against a fixed set of
/// modifiers and a fixed "today"
#[derive(Clone, Copy, Debug)]
pub struct MatrixBuilder<'a> {
    options: MatrixOptions,
    modifiers: &'a ModifierMap,
    today: Date,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(options: MatrixOptions, modifiers: &'a ModifierMap, today: Date) -> Self {
        MatrixBuilder {
            options,
            modifiers,
            today,
        }
    }

    pub fn build(&self, month: YearMonth) -> MonthMatrix {
        let first_day_of_week = self.options.first_day_of_week;
        let lead = month.first_day().weekday().index_from(first_day_of_week);
        let trail = 6 - month.last_day().weekday().index_from(first_day_of_week);
        let mut day_qty = usize::from(lead) + usize::from(month.day_count()) + usize::from(trail);
        if self.options.fixed_weeks {
            day_qty = day_qty.max(FIXED_WEEK_QTY * DAYS_IN_WEEK);
        }
        // `YearMonth` keeps a margin from the ends of `Date`'s range, so the
        // grid never runs off the end of time.
        let first = month.first_day() - Duration::days(lead.into());
        let hidden_outside;
        let modifiers = if self.options.show_outside_days {
            self.modifiers
        } else {
            hidden_outside = self.modifiers.with_builtins([(
                Modifier::Hidden,
                Matcher::Any(vec![
                    Matcher::Before(month.first_day()),
                    Matcher::After(month.last_day()),
                ]),
            )]);
            &hidden_outside
        };
        let mut dates = iter_days(first).take(day_qty);
        let mut weeks = Vec::with_capacity(day_qty / DAYS_IN_WEEK);
        loop {
            let days = std::iter::zip(0u8.., dates.by_ref().take(DAYS_IN_WEEK))
                .map(|(index, date)| {
                    let day = CalendarDay::new(date, month, index);
                    Day {
                        day,
                        modifiers: resolve(&day, modifiers, self.today),
                    }
                })
                .collect::<Vec<_>>();
            if days.len() < DAYS_IN_WEEK {
                break;
            }
            let number = week_number(days[DAYS_IN_WEEK - 1].date(), first_day_of_week);
            weeks.push(WeekRow { number, days });
        }
        log::trace!("Built {} week(s) for {month}", weeks.len());
        MonthMatrix { month, weeks }
    }
}

/// Number of the week ending on `last` (the last day of a row)
fn week_number(last: Date, first_day_of_week: Weekday) -> u8 {
    if first_day_of_week == Weekday::Monday {
        return last.iso_week();
    }
    let ordinal0 = last.ordinal() - 1;
    let jan1 = last - Duration::days(ordinal0.into());
    let lead = u16::from(jan1.weekday().index_from(first_day_of_week));
    u8::try_from((ordinal0 + lead) / 7 + 1).unwrap_or(u8::MAX)
}
