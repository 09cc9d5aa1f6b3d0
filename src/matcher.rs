//! Specifications of which dates belong to a modifier
use crate::error::ConfigError;
use std::fmt;
use std::sync::Arc;
use time::{Date, Weekday};

/// A set of calendar dates, used both for custom modifiers and for the
/// built-in `disabled` and `hidden` sets
#[derive(Clone, Debug)]
pub enum Matcher {
    /// Exactly one date
    Date(Date),
    /// Any of the given dates
    Dates(Vec<Date>),
    /// Dates within an inclusive range, either end of which may be open
    Range(DateRange),
    /// Dates strictly before the given date
    Before(Date),
    /// Dates strictly after the given date
    After(Date),
    /// Dates strictly between two dates
    Interval { after: Date, before: Date },
    /// Dates falling on any of the given days of the week
    DaysOfWeek(Vec<Weekday>),
    /// Dates for which a function returns `true`
    Predicate(Predicate),
    /// Every date (`true`) or none (`false`)
    Always(bool),
    /// Dates matched by at least one of the inner matchers
    Any(Vec<Matcher>),
}

impl Matcher {
    pub fn range(from: Option<Date>, to: Option<Date>) -> Matcher {
        Matcher::Range(DateRange { from, to })
    }

    pub fn predicate<F>(func: F) -> Matcher
    where
        F: Fn(Date) -> bool + Send + Sync + 'static,
    {
        Matcher::Predicate(Predicate(Arc::new(func)))
    }

    pub fn weekends() -> Matcher {
        Matcher::DaysOfWeek(vec![Weekday::Saturday, Weekday::Sunday])
    }

    /// Check that the matcher (and every matcher nested in it) is
    /// well-formed.  Inverted ranges are rejected rather than swapped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Matcher::Range(DateRange {
                from: Some(from),
                to: Some(to),
            }) if from > to => Err(ConfigError::InvertedMatcher {
                from: *from,
                to: *to,
            }),
            Matcher::Interval { after, before } if after > before => {
                Err(ConfigError::InvertedMatcher {
                    from: *after,
                    to: *before,
                })
            }
            Matcher::Any(inner) => inner.iter().try_for_each(Matcher::validate),
            _ => Ok(()),
        }
    }

    pub fn matches(&self, date: Date) -> bool {
        match self {
            Matcher::Date(d) => *d == date,
            Matcher::Dates(ds) => ds.contains(&date),
            Matcher::Range(range) => range.contains(date),
            Matcher::Before(d) => date < *d,
            Matcher::After(d) => date > *d,
            Matcher::Interval { after, before } => *after < date && date < *before,
            Matcher::DaysOfWeek(wds) => wds.contains(&date.weekday()),
            Matcher::Predicate(p) => p.call(date),
            Matcher::Always(b) => *b,
            Matcher::Any(inner) => inner.iter().any(|m| m.matches(date)),
        }
    }
}

impl From<Date> for Matcher {
    fn from(date: Date) -> Matcher {
        Matcher::Date(date)
    }
}

impl From<Vec<Date>> for Matcher {
    fn from(dates: Vec<Date>) -> Matcher {
        Matcher::Dates(dates)
    }
}

impl From<DateRange> for Matcher {
    fn from(range: DateRange) -> Matcher {
        Matcher::Range(range)
    }
}

impl From<bool> for Matcher {
    fn from(b: bool) -> Matcher {
        Matcher::Always(b)
    }
}

/// An inclusive range of dates.  A missing `from` is unbounded below; a
/// missing `to` is unbounded above.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    pub fn contains(&self, date: Date) -> bool {
        self.from.map_or(true, |from| from <= date) && self.to.map_or(true, |to| date <= to)
    }
}

/// A boxed `Date -> bool` function usable as a [`Matcher`]
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(Date) -> bool + Send + Sync>);

impl Predicate {
    pub fn call(&self, date: Date) -> bool {
        (self.0)(date)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}
