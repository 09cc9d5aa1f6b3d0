use crate::calmath::YearMonth;
use thiserror::Error;
use time::Date;

/// Error raised while validating a day picker's configuration.
///
/// Every variant is detected before any month matrix is built; once a
/// [`DayPicker`](crate::DayPicker) has been obtained, none of its operations
/// can fail.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("modifier name {0:?} is reserved for built-in modifiers")]
    ReservedModifier(String),
    #[error("modifier {0:?} is defined more than once")]
    DuplicateModifier(String),
    #[error("modifier names must not be empty")]
    EmptyModifierName,
    #[error("matcher range is inverted: {from} comes after {to}")]
    InvertedMatcher { from: Date, to: Date },
    #[error("month bounds are inverted: {from} comes after {to}")]
    InvertedBounds { from: YearMonth, to: YearMonth },
    #[error("invalid day of week {0}; expected 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekday(u8),
    #[error("year {0} is outside the supported range")]
    YearOutOfRange(i32),
    #[error("number of months must be at least one")]
    ZeroMonths,
    #[error("{count} dates selected, but at most {max} are allowed")]
    TooManyDates { count: usize, max: usize },
    #[error("range end {0} given without a start")]
    RangeEndWithoutStart(Date),
}
