//! The window of consecutive months on display, and paging through it
use crate::calmath::{YearMonth, MAX_YEAR, MIN_YEAR};
use crate::error::ConfigError;
use crate::matrix::{MatrixBuilder, MonthMatrix};
use std::num::NonZeroUsize;
use time::{Date, Month};

/// Inclusive limits on the months that may be displayed.  A missing limit
/// defaults to the corresponding end of the supported years.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct MonthBounds {
    pub from: Option<YearMonth>,
    pub to: Option<YearMonth>,
}

impl MonthBounds {
    pub fn new(from: Option<YearMonth>, to: Option<YearMonth>) -> Result<MonthBounds, ConfigError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ConfigError::InvertedBounds { from, to });
            }
        }
        Ok(MonthBounds { from, to })
    }

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    pub fn contains(&self, month: YearMonth) -> bool {
        self.lower() <= month && month <= self.upper()
    }

    fn lower(&self) -> YearMonth {
        self.from.unwrap_or(EARLIEST)
    }

    fn upper(&self) -> YearMonth {
        self.to.unwrap_or(LATEST)
    }

    /// Number of months from the lower to the upper limit, inclusive
    fn span(&self) -> i32 {
        self.lower().months_until(self.upper()) + 1
    }
}

const EARLIEST: YearMonth = YearMonth::new_unchecked(MIN_YEAR, Month::January);
const LATEST: YearMonth = YearMonth::new_unchecked(MAX_YEAR, Month::December);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PageDirection {
    Previous,
    Next,
}

impl PageDirection {
    fn sign(self) -> i32 {
        match self {
            PageDirection::Previous => -1,
            PageDirection::Next => 1,
        }
    }
}

/// A run of consecutive months starting at a pivot month.
///
/// The window never extends past its bounds: when the bounds span fewer
/// months than requested, the window shrinks to exactly that span.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DisplayWindow {
    pivot: YearMonth,
    count: NonZeroUsize,
    bounds: MonthBounds,
}

impl DisplayWindow {
    /// Create a window of `count` months starting at `pivot`, moved as
    /// little as needed to fit within `bounds`
    pub fn new(pivot: YearMonth, count: NonZeroUsize, bounds: MonthBounds) -> DisplayWindow {
        let mut window = DisplayWindow {
            pivot,
            count,
            bounds,
        };
        window.pivot = window.clamp(pivot);
        window
    }

    /// The first month of the window
    pub fn pivot(&self) -> YearMonth {
        self.pivot
    }

    pub fn bounds(&self) -> MonthBounds {
        self.bounds
    }

    /// The configured number of months
    pub fn requested_len(&self) -> NonZeroUsize {
        self.count
    }

    /// Number of months actually shown
    pub fn month_count(&self) -> usize {
        usize::try_from(self.effective_len()).unwrap_or(1)
    }

    pub fn months(&self) -> impl Iterator<Item = YearMonth> + '_ {
        (0..self.effective_len()).filter_map(|i| self.pivot.offset(i))
    }

    pub fn last(&self) -> YearMonth {
        self.pivot
            .offset(self.effective_len() - 1)
            .unwrap_or(self.pivot)
    }

    pub fn contains(&self, month: YearMonth) -> bool {
        self.pivot <= month && month <= self.last()
    }

    pub fn contains_date(&self, date: Date) -> bool {
        YearMonth::of(date).is_ok_and(|m| self.contains(m))
    }

    /// Move the window by its own length
    pub fn page(&self, direction: PageDirection) -> DisplayWindow {
        self.page_by(direction, self.month_count())
    }

    /// Move the pivot `step` months in `direction`, then clamp to the bounds
    pub fn page_by(&self, direction: PageDirection, step: usize) -> DisplayWindow {
        let step = i32::try_from(step).unwrap_or(i32::MAX);
        let target = step
            .checked_mul(direction.sign())
            .and_then(|n| self.pivot.offset(n))
            .unwrap_or_else(|| match direction {
                PageDirection::Previous => self.bounds.lower(),
                PageDirection::Next => self.bounds.upper(),
            });
        let pivot = self.clamp(target);
        if pivot != target {
            log::debug!("Paging {direction:?} to {target} clamped to {pivot}");
        }
        DisplayWindow { pivot, ..*self }
    }

    /// Whether paging in `direction` would move the window
    pub fn can_page(&self, direction: PageDirection) -> bool {
        self.page_by(direction, 1) != *self
    }

    /// Re-pivot so that `month` is displayed, moving as little as needed.
    /// A month outside the bounds moves the window to the nearest bound.
    pub fn go_to(&self, month: YearMonth) -> DisplayWindow {
        if self.contains(month) {
            return *self;
        }
        let target = if month < self.pivot {
            month
        } else {
            month
                .offset(1 - self.effective_len())
                .unwrap_or_else(|| self.bounds.lower())
        };
        DisplayWindow {
            pivot: self.clamp(target),
            ..*self
        }
    }

    /// Build the matrix of every month in the window, in order
    pub fn matrices(&self, builder: &MatrixBuilder<'_>) -> Vec<MonthMatrix> {
        self.months().map(|m| builder.build(m)).collect()
    }

    fn effective_len(&self) -> i32 {
        i32::try_from(self.count.get())
            .unwrap_or(i32::MAX)
            .min(self.bounds.span())
    }

    fn clamp(&self, pivot: YearMonth) -> YearMonth {
        let lower = self.bounds.lower();
        let upper = self.bounds.upper();
        let mut pivot = pivot;
        if pivot.months_until(upper) < self.effective_len() - 1 {
            pivot = upper.offset(1 - self.effective_len()).unwrap_or(lower);
        }
        pivot.max(lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month::*;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn months(w: &DisplayWindow) -> Vec<YearMonth> {
        w.months().collect()
    }

    #[test]
    fn test_inverted_bounds() {
        assert_eq!(
            MonthBounds::new(Some(ym(2023, January)), Some(ym(2022, December))),
            Err(ConfigError::InvertedBounds {
                from: ym(2023, January),
                to: ym(2022, December),
            })
        );
        assert!(MonthBounds::new(Some(ym(2022, December)), Some(ym(2022, December))).is_ok());
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = MonthBounds::new(Some(ym(2022, March)), None).unwrap();
        assert!(!bounds.contains(ym(2022, February)));
        assert!(bounds.contains(ym(2022, March)));
        assert!(bounds.contains(ym(MAX_YEAR, December)));
    }

    #[test]
    fn test_unbounded_window() {
        let w = DisplayWindow::new(ym(2022, November), nz(3), MonthBounds::default());
        assert_eq!(
            months(&w),
            [ym(2022, November), ym(2022, December), ym(2023, January)]
        );
        let w = w.page(PageDirection::Next);
        assert_eq!(w.pivot(), ym(2023, February));
        let w = w.page(PageDirection::Previous).page(PageDirection::Previous);
        assert_eq!(w.pivot(), ym(2022, August));
        assert_eq!(w.page_by(PageDirection::Next, 1).pivot(), ym(2022, September));
    }

    #[test]
    fn test_page_clamps_at_upper_bound() {
        let bounds = MonthBounds::new(None, Some(ym(2022, December))).unwrap();
        let w = DisplayWindow::new(ym(2022, November), nz(2), bounds);
        let paged = w.page(PageDirection::Next);
        assert_eq!(paged, w);
        assert_eq!(months(&paged), [ym(2022, November), ym(2022, December)]);
        assert!(!w.can_page(PageDirection::Next));
        assert!(w.can_page(PageDirection::Previous));
    }

    #[test]
    fn test_page_partial_clamp() {
        let bounds = MonthBounds::new(Some(ym(2022, January)), Some(ym(2022, December))).unwrap();
        let w = DisplayWindow::new(ym(2022, August), nz(3), bounds);
        assert_eq!(w.page(PageDirection::Next).pivot(), ym(2022, October));
        let w = DisplayWindow::new(ym(2022, March), nz(3), bounds);
        assert_eq!(w.page(PageDirection::Previous).pivot(), ym(2022, January));
    }

    #[test]
    fn test_initial_pivot_clamped() {
        let bounds = MonthBounds::new(Some(ym(2022, January)), Some(ym(2022, June))).unwrap();
        let w = DisplayWindow::new(ym(2021, May), nz(2), bounds);
        assert_eq!(w.pivot(), ym(2022, January));
        let w = DisplayWindow::new(ym(2022, June), nz(2), bounds);
        assert_eq!(months(&w), [ym(2022, May), ym(2022, June)]);
    }

    #[test]
    fn test_window_larger_than_span() {
        let bounds = MonthBounds::new(Some(ym(2022, February)), Some(ym(2022, April))).unwrap();
        let w = DisplayWindow::new(ym(2022, March), nz(6), bounds);
        assert_eq!(w.month_count(), 3);
        assert_eq!(w.requested_len(), nz(6));
        assert_eq!(
            months(&w),
            [ym(2022, February), ym(2022, March), ym(2022, April)]
        );
        assert_eq!(w.page(PageDirection::Next), w);
        assert_eq!(w.page(PageDirection::Previous), w);
    }

    #[test]
    fn test_end_of_time() {
        let w = DisplayWindow::new(ym(MAX_YEAR, November), nz(2), MonthBounds::default());
        assert_eq!(w.page(PageDirection::Next), w);
        let w = DisplayWindow::new(ym(MAX_YEAR, December), nz(2), MonthBounds::default());
        assert_eq!(w.pivot(), ym(MAX_YEAR, November));
        let w = DisplayWindow::new(ym(MIN_YEAR, January), nz(1), MonthBounds::default());
        assert!(!w.can_page(PageDirection::Previous));
        assert_eq!(
            w.page_by(PageDirection::Previous, usize::MAX).pivot(),
            ym(MIN_YEAR, January)
        );
    }

    #[test]
    fn test_contains_date() {
        let w = DisplayWindow::new(ym(2022, June), nz(2), MonthBounds::default());
        assert!(w.contains_date(time::macros::date!(2022 - 07 - 31)));
        assert!(!w.contains_date(time::macros::date!(2022 - 08 - 01)));
        assert!(!w.contains_date(time::macros::date!(2022 - 05 - 31)));
    }

    #[test]
    fn test_go_to() {
        let bounds = MonthBounds::new(None, Some(ym(2023, March))).unwrap();
        let w = DisplayWindow::new(ym(2022, June), nz(2), bounds);
        assert_eq!(w.go_to(ym(2022, July)), w);
        assert_eq!(w.go_to(ym(2022, August)).pivot(), ym(2022, July));
        assert_eq!(w.go_to(ym(2022, January)).pivot(), ym(2022, January));
        assert_eq!(w.go_to(ym(2024, January)).pivot(), ym(2023, February));
    }

    #[test]
    fn test_matrices_one_per_month() {
        let modifiers = crate::modifiers::ModifierMap::new();
        let builder = MatrixBuilder::new(
            crate::matrix::MatrixOptions::default(),
            &modifiers,
            time::macros::date!(2022 - 06 - 13),
        );
        let w = DisplayWindow::new(ym(2022, June), nz(3), MonthBounds::default());
        let ms = w.matrices(&builder);
        assert_eq!(
            ms.iter().map(MonthMatrix::month).collect::<Vec<_>>(),
            [ym(2022, June), ym(2022, July), ym(2022, August)]
        );
    }
}
