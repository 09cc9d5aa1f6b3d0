//! Date-matrix, modifier-resolution, and selection engine for day pickers.
//!
//! Given a month, a set of named [`Matcher`]s, and a selection mode, this
//! crate computes the grid of days to display, tags each day with the
//! modifiers that apply to it, and computes how a click changes the
//! selection.  Rendering is left to the caller: a [`DayModifiers`] is meant
//! to be projected onto whatever styling the front end uses.
//!
//! ```
//! use daypick::{DayPickerConfig, Modifier, SelectionMode};
//! use time::macros::date;
//!
//! let picker = DayPickerConfig::new(date!(2022 - 06 - 13))
//!     .mode(SelectionMode::Range { required: false })
//!     .validate()
//!     .unwrap();
//! let window = picker.initial_window();
//! let mut selection = picker.initial_selection();
//! selection = picker.click_date(&selection, date!(2022 - 06 - 20), false);
//! selection = picker.click_date(&selection, date!(2022 - 06 - 10), false);
//! assert_eq!(selection.to_string(), "2022-06-10 to 2022-06-20");
//!
//! let months = picker.render(&window, &selection);
//! let day = months[0].find(date!(2022 - 06 - 15)).unwrap();
//! assert!(day.has(&Modifier::RangeMiddle));
//! ```
pub mod calmath;
pub mod config;
pub mod error;
pub mod matcher;
pub mod matrix;
pub mod modifiers;
pub mod selection;
pub mod window;
pub use crate::calmath::YearMonth;
pub use crate::config::{CaptionLayout, DayPicker, DayPickerConfig};
pub use crate::error::ConfigError;
pub use crate::matcher::{DateRange, Matcher, Predicate};
pub use crate::matrix::{CalendarDay, Day, MatrixBuilder, MatrixOptions, MonthMatrix, WeekRow};
pub use crate::modifiers::{resolve, DayModifiers, Modifier, ModifierMap};
pub use crate::selection::{
    MultipleSelection, RangeSelection, Selection, SelectionMode, SingleSelection,
};
pub use crate::window::{DisplayWindow, MonthBounds, PageDirection};
