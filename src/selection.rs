//! Selection state machines for the single, multiple, and range modes
//!
//! Every transition takes the current state by reference and returns the
//! next state as a new value.  Clicks that cannot change the selection
//! (unselectable days, a full multiple selection, a deselect below the
//! minimum) return a copy of the input unchanged.
use crate::error::ConfigError;
use crate::matcher::{DateRange, Matcher};
use crate::matrix::{CalendarDay, Day};
use crate::modifiers::Modifier;
use std::collections::BTreeSet;
use std::fmt;
use time::Date;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SelectionMode {
    /// At most one date.  When `required`, clicking the selected date does
    /// not deselect it.
    Single { required: bool },
    /// Any number of dates between `min` and `max`
    Multiple { min: usize, max: Option<usize> },
    /// A contiguous range of dates.  When `required`, a one-day range cannot
    /// be formed by clicking the start date twice.
    Range { required: bool },
}

impl Default for SelectionMode {
    fn default() -> SelectionMode {
        SelectionMode::Single { required: false }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Selection {
    Single(SingleSelection),
    Multiple(MultipleSelection),
    Range(RangeSelection),
}

impl Selection {
    /// An empty selection for the given mode
    pub fn new(mode: SelectionMode) -> Selection {
        match mode {
            SelectionMode::Single { required } => Selection::Single(SingleSelection {
                required,
                date: None,
            }),
            SelectionMode::Multiple { min, max } => Selection::Multiple(MultipleSelection {
                min,
                max,
                dates: BTreeSet::new(),
            }),
            SelectionMode::Range { required } => Selection::Range(RangeSelection {
                required,
                from: None,
                to: None,
            }),
        }
    }

    /// A single selection starting out with `date` chosen
    pub fn single(required: bool, date: Option<Date>) -> Selection {
        Selection::Single(SingleSelection { required, date })
    }

    /// A multiple selection starting out with `dates` chosen.  Holding fewer
    /// than `min` dates is allowed; it only prevents deselecting.
    pub fn multiple<I>(min: usize, max: Option<usize>, dates: I) -> Result<Selection, ConfigError>
    where
        I: IntoIterator<Item = Date>,
    {
        let dates = dates.into_iter().collect::<BTreeSet<_>>();
        if let Some(max) = max.filter(|&max| dates.len() > max) {
            return Err(ConfigError::TooManyDates {
                count: dates.len(),
                max,
            });
        }
        Ok(Selection::Multiple(MultipleSelection { min, max, dates }))
    }

    /// A range selection starting out as `from` through `to`
    pub fn range(
        required: bool,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Selection, ConfigError> {
        match (from, to) {
            (None, Some(to)) => Err(ConfigError::RangeEndWithoutStart(to)),
            (Some(from), Some(to)) if from > to => Err(ConfigError::InvertedMatcher { from, to }),
            _ => Ok(Selection::Range(RangeSelection { required, from, to })),
        }
    }

    /// A selection of the given mode starting out with `dates` chosen.  A
    /// single selection takes at most one date; a range takes its start and
    /// then its end.
    pub fn with_dates(mode: SelectionMode, dates: &[Date]) -> Result<Selection, ConfigError> {
        match (mode, dates) {
            (SelectionMode::Single { required }, []) => Ok(Selection::single(required, None)),
            (SelectionMode::Single { required }, &[date]) => {
                Ok(Selection::single(required, Some(date)))
            }
            (SelectionMode::Single { .. }, _) => Err(ConfigError::TooManyDates {
                count: dates.len(),
                max: 1,
            }),
            (SelectionMode::Multiple { min, max }, _) => {
                Selection::multiple(min, max, dates.iter().copied())
            }
            (SelectionMode::Range { required }, []) => Selection::range(required, None, None),
            (SelectionMode::Range { required }, &[from]) => {
                Selection::range(required, Some(from), None)
            }
            (SelectionMode::Range { required }, &[from, to]) => {
                Selection::range(required, Some(from), Some(to))
            }
            (SelectionMode::Range { .. }, _) => Err(ConfigError::TooManyDates {
                count: dates.len(),
                max: 2,
            }),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Single(s) => SelectionMode::Single {
                required: s.required,
            },
            Selection::Multiple(s) => SelectionMode::Multiple {
                min: s.min,
                max: s.max,
            },
            Selection::Range(s) => SelectionMode::Range {
                required: s.required,
            },
        }
    }

    /// Compute the selection that results from clicking `day`.
    ///
    /// `selectable` is the only admission check: if it is false, the state
    /// is returned unchanged.  `extend` only affects range selections.
    pub fn select(&self, day: &CalendarDay, selectable: bool, extend: bool) -> Selection {
        if !selectable {
            log::trace!("Ignoring click on unselectable day {}", day.date());
            return self.clone();
        }
        let date = day.date();
        let next = match self {
            Selection::Single(s) => Selection::Single(s.select(date)),
            Selection::Multiple(s) => Selection::Multiple(s.select(date)),
            Selection::Range(s) => Selection::Range(s.select(date, extend)),
        };
        if next == *self {
            log::trace!("Click on {date} left the selection unchanged");
        } else {
            log::trace!("Click on {date} changed selection to {next}");
        }
        next
    }

    /// Like [`Selection::select()`], taking selectability from the day's
    /// resolved modifiers
    pub fn select_day(&self, day: &Day, extend: bool) -> Selection {
        self.select(&day.day, day.is_selectable(), extend)
    }

    pub fn is_selected(&self, date: Date) -> bool {
        match self {
            Selection::Single(s) => s.date == Some(date),
            Selection::Multiple(s) => s.dates.contains(&date),
            Selection::Range(s) => s.as_range().is_some_and(|r| r.contains(date)),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Selection::Single(s) => s.date.is_none(),
            Selection::Multiple(s) => s.dates.is_empty(),
            Selection::Range(s) => s.from.is_none(),
        }
    }

    /// An empty selection of the same mode
    pub fn cleared(&self) -> Selection {
        Selection::new(self.mode())
    }

    /// The matchers for the built-in `selected` and `range-*` modifiers that
    /// reflect this selection on the next resolution pass
    pub fn modifier_matchers(&self) -> Vec<(Modifier, Matcher)> {
        match self {
            Selection::Single(SingleSelection { date: Some(d), .. }) => {
                vec![(Modifier::Selected, Matcher::Date(*d))]
            }
            Selection::Multiple(s) if !s.dates.is_empty() => vec![(
                Modifier::Selected,
                Matcher::Dates(s.dates.iter().copied().collect()),
            )],
            Selection::Range(RangeSelection {
                from: Some(from),
                to,
                ..
            }) => {
                let end = to.unwrap_or(*from);
                let mut matchers = vec![
                    (Modifier::Selected, Matcher::range(Some(*from), Some(end))),
                    (Modifier::RangeStart, Matcher::Date(*from)),
                    (Modifier::RangeEnd, Matcher::Date(end)),
                ];
                if to.is_some() {
                    matchers.push((
                        Modifier::RangeMiddle,
                        Matcher::Interval {
                            after: *from,
                            before: end,
                        },
                    ));
                }
                matchers
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Single(SingleSelection { date: Some(d), .. }) => write!(f, "{d}"),
            Selection::Multiple(s) if !s.dates.is_empty() => {
                let mut first = true;
                for d in &s.dates {
                    if !std::mem::replace(&mut first, false) {
                        f.write_str(", ")?;
                    }
                    write!(f, "{d}")?;
                }
                Ok(())
            }
            Selection::Range(RangeSelection {
                from: Some(from),
                to,
                ..
            }) => match to {
                Some(to) => write!(f, "{from} to {to}"),
                None => write!(f, "{from} to ?"),
            },
            _ => f.write_str("nothing selected"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SingleSelection {
    required: bool,
    date: Option<Date>,
}

impl SingleSelection {
    pub fn date(&self) -> Option<Date> {
        self.date
    }

    fn select(self, date: Date) -> SingleSelection {
        let date = if self.date == Some(date) && !self.required {
            None
        } else {
            Some(date)
        };
        SingleSelection { date, ..self }
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct MultipleSelection {
    min: usize,
    max: Option<usize>,
    // Invariant: never holds more than `max` dates
    dates: BTreeSet<Date>,
}

impl MultipleSelection {
    pub fn dates(&self) -> &BTreeSet<Date> {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.max.is_some_and(|max| self.dates.len() >= max)
    }

    fn select(&self, date: Date) -> MultipleSelection {
        let mut next = self.clone();
        if self.dates.contains(&date) {
            if self.dates.len() > self.min {
                next.dates.remove(&date);
            }
        } else if !self.is_full() {
            next.dates.insert(date);
        }
        next
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RangeSelection {
    required: bool,
    // Invariant: `to` is only set if `from` is, and then `from <= to`
    from: Option<Date>,
    to: Option<Date>,
}

impl RangeSelection {
    pub fn start(&self) -> Option<Date> {
        self.from
    }

    pub fn end(&self) -> Option<Date> {
        self.to
    }

    /// The selected dates as an inclusive range; a range with only its start
    /// chosen covers that single day
    pub fn as_range(&self) -> Option<DateRange> {
        self.from.map(|from| DateRange {
            from: Some(from),
            to: Some(self.to.unwrap_or(from)),
        })
    }

    fn select(self, date: Date, extend: bool) -> RangeSelection {
        let (from, to) = match (self.from, self.to) {
            (Some(from), None) if date < from => (Some(date), Some(from)),
            (Some(from), None) if date == from && self.required => (Some(date), None),
            (Some(from), None) => (Some(from), Some(date)),
            (Some(from), Some(_)) if extend && date < from => (Some(date), self.to),
            (Some(from), Some(_)) if extend => (Some(from), Some(date)),
            _ => (Some(date), None),
        };
        RangeSelection { from, to, ..self }
    }
}
