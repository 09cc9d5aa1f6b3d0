//! Validation of a day picker's configuration, and the validated picker
use crate::calmath::{weekday_from_index, WeekdayExt, YearMonth};
use crate::error::ConfigError;
use crate::matcher::Matcher;
use crate::matrix::{CalendarDay, Day, MatrixBuilder, MatrixOptions, MonthMatrix};
use crate::modifiers::{resolve, ModifierMap};
use crate::selection::{Selection, SelectionMode};
use crate::window::{DisplayWindow, MonthBounds, PageDirection};
use std::num::NonZeroUsize;
use time::{Date, Month};

/// How the caption of each month lets the user navigate
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CaptionLayout {
    #[default]
    Buttons,
    /// Month and year dropdowns; only available when both a lower and an
    /// upper bound are configured
    Dropdown,
}

/// Unvalidated settings for a [`DayPicker`]
#[derive(Clone, Debug)]
pub struct DayPickerConfig {
    pub mode: SelectionMode,
    /// Dates chosen when the picker opens, as taken by
    /// [`Selection::with_dates()`]
    pub selected: Vec<Date>,
    /// 0 = Sunday through 6 = Saturday
    pub first_day_of_week: u8,
    pub number_of_months: usize,
    /// Month shown first when the picker opens; defaults to the month of
    /// `today`
    pub default_month: Option<YearMonth>,
    pub from_month: Option<YearMonth>,
    pub to_month: Option<YearMonth>,
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
    /// Earliest selectable date; also bounds navigation if `from_month` is
    /// unset
    pub from_date: Option<Date>,
    /// Latest selectable date; also bounds navigation if `to_month` is unset
    pub to_date: Option<Date>,
    pub modifiers: ModifierMap,
    pub disabled: Vec<Matcher>,
    pub hidden: Vec<Matcher>,
    pub today: Date,
    pub fixed_weeks: bool,
    pub show_outside_days: bool,
    /// Page by the number of months shown rather than by one month
    pub paged_navigation: bool,
    pub reverse_months: bool,
    pub caption_layout: CaptionLayout,
}

impl DayPickerConfig {
    pub fn new(today: Date) -> DayPickerConfig {
        DayPickerConfig {
            mode: SelectionMode::default(),
            selected: Vec::new(),
            first_day_of_week: 0,
            number_of_months: 1,
            default_month: None,
            from_month: None,
            to_month: None,
            from_year: None,
            to_year: None,
            from_date: None,
            to_date: None,
            modifiers: ModifierMap::new(),
            disabled: Vec::new(),
            hidden: Vec::new(),
            today,
            fixed_weeks: false,
            show_outside_days: true,
            paged_navigation: true,
            reverse_months: false,
            caption_layout: CaptionLayout::default(),
        }
    }

    pub fn mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn selected(mut self, dates: Vec<Date>) -> Self {
        self.selected = dates;
        self
    }

    pub fn number_of_months(mut self, n: usize) -> Self {
        self.number_of_months = n;
        self
    }

    pub fn first_day_of_week(mut self, index: u8) -> Self {
        self.first_day_of_week = index;
        self
    }

    pub fn month_bounds(mut self, from: Option<YearMonth>, to: Option<YearMonth>) -> Self {
        self.from_month = from;
        self.to_month = to;
        self
    }

    pub fn disable(mut self, matcher: Matcher) -> Self {
        self.disabled.push(matcher);
        self
    }

    pub fn hide(mut self, matcher: Matcher) -> Self {
        self.hidden.push(matcher);
        self
    }

    /// Check the configuration and produce a [`DayPicker`].  This is the only
    /// place a [`ConfigError`] can arise.
    pub fn validate(self) -> Result<DayPicker, ConfigError> {
        let first_day_of_week = weekday_from_index(self.first_day_of_week)?;
        let count = NonZeroUsize::new(self.number_of_months).ok_or(ConfigError::ZeroMonths)?;
        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            if from > to {
                return Err(ConfigError::InvertedMatcher { from, to });
            }
        }
        let from = match (self.from_month, self.from_date, self.from_year) {
            (Some(m), _, _) => Some(m),
            (None, Some(d), _) => Some(YearMonth::of(d)?),
            (None, None, Some(y)) => Some(YearMonth::new(y, Month::January)?),
            (None, None, None) => None,
        };
        let to = match (self.to_month, self.to_date, self.to_year) {
            (Some(m), _, _) => Some(m),
            (None, Some(d), _) => Some(YearMonth::of(d)?),
            (None, None, Some(y)) => Some(YearMonth::new(y, Month::December)?),
            (None, None, None) => None,
        };
        let bounds = MonthBounds::new(from, to)?;
        let selection = Selection::with_dates(self.mode, &self.selected)?;
        let mut modifiers = self.modifiers;
        for m in self.disabled {
            modifiers.disable(m)?;
        }
        for m in self.hidden {
            modifiers.hide(m)?;
        }
        if let Some(d) = self.from_date {
            modifiers.disable(Matcher::Before(d))?;
        }
        if let Some(d) = self.to_date {
            modifiers.disable(Matcher::After(d))?;
        }
        let default_month = match self.default_month {
            Some(m) => m,
            None => YearMonth::of(self.today)?,
        };
        let caption_layout = if bounds.is_bounded() {
            self.caption_layout
        } else {
            CaptionLayout::Buttons
        };
        log::debug!(
            "Validated day picker configuration: mode={:?}, months={count}, bounds={bounds:?}",
            self.mode
        );
        Ok(DayPicker {
            mode: self.mode,
            selection,
            options: MatrixOptions {
                first_day_of_week,
                fixed_weeks: self.fixed_weeks,
                show_outside_days: self.show_outside_days,
            },
            count,
            bounds,
            modifiers,
            today: self.today,
            default_month,
            paged_navigation: self.paged_navigation,
            reverse_months: self.reverse_months,
            caption_layout,
        })
    }
}

/// A validated day picker configuration.
///
/// `DayPicker` owns no interactive state: the [`Selection`] and
/// [`DisplayWindow`] belong to the caller and are passed in and returned by
/// value.
#[derive(Clone, Debug)]
pub struct DayPicker {
    mode: SelectionMode,
    selection: Selection,
    options: MatrixOptions,
    count: NonZeroUsize,
    bounds: MonthBounds,
    modifiers: ModifierMap,
    today: Date,
    default_month: YearMonth,
    paged_navigation: bool,
    reverse_months: bool,
    caption_layout: CaptionLayout,
}

impl DayPicker {
    pub fn today(&self) -> Date {
        self.today
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn options(&self) -> MatrixOptions {
        self.options
    }

    pub fn bounds(&self) -> MonthBounds {
        self.bounds
    }

    pub fn caption_layout(&self) -> CaptionLayout {
        self.caption_layout
    }

    /// The selection the picker opens with
    pub fn initial_selection(&self) -> Selection {
        self.selection.clone()
    }

    pub fn initial_window(&self) -> DisplayWindow {
        self.window_at(self.default_month)
    }

    pub fn window_at(&self, month: YearMonth) -> DisplayWindow {
        DisplayWindow::new(month, self.count, self.bounds)
    }

    pub fn page(&self, window: &DisplayWindow, direction: PageDirection) -> DisplayWindow {
        if self.paged_navigation {
            window.page(direction)
        } else {
            window.page_by(direction, 1)
        }
    }

    /// The modifiers to resolve against on the next render, including those
    /// derived from `selection`
    pub fn modifiers_for(&self, selection: &Selection) -> ModifierMap {
        self.modifiers.with_builtins(selection.modifier_matchers())
    }

    /// Build the month matrices for `window`, reflecting `selection`
    pub fn render(&self, window: &DisplayWindow, selection: &Selection) -> Vec<MonthMatrix> {
        let modifiers = self.modifiers_for(selection);
        let builder = MatrixBuilder::new(self.options, &modifiers, self.today);
        let mut months = window.matrices(&builder);
        if self.reverse_months {
            months.reverse();
        }
        months
    }

    /// Resolve `date` as a day of its own month
    pub fn day(&self, date: Date, selection: &Selection) -> Option<Day> {
        let month = YearMonth::of(date).ok()?;
        if !self.bounds.contains(month) {
            return None;
        }
        let index = date.weekday().index_from(self.options.first_day_of_week);
        let day = CalendarDay::new(date, month, index);
        let modifiers = resolve(&day, &self.modifiers_for(selection), self.today);
        Some(Day { day, modifiers })
    }

    /// Click a displayed day
    pub fn click(&self, selection: &Selection, day: &Day, extend: bool) -> Selection {
        selection.select_day(day, extend)
    }

    /// Click `date` as a day of its own month; dates outside the navigable
    /// months are not selectable
    pub fn click_date(&self, selection: &Selection, date: Date, extend: bool) -> Selection {
        match self.day(date, selection) {
            Some(day) => self.click(selection, &day, extend),
            None => selection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::Modifier;
    use time::macros::date;

    fn today() -> Date {
        date!(2022 - 06 - 13)
    }

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_defaults() {
        let picker = DayPickerConfig::new(today()).validate().unwrap();
        assert_eq!(picker.mode(), SelectionMode::Single { required: false });
        assert_eq!(picker.caption_layout(), CaptionLayout::Buttons);
        let window = picker.initial_window();
        assert_eq!(window.months().collect::<Vec<_>>(), [ym(2022, Month::June)]);
        let months = picker.render(&window, &picker.initial_selection());
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].weeks().len(), 5);
    }

    #[test]
    fn test_invalid_first_day() {
        let r = DayPickerConfig::new(today()).first_day_of_week(7).validate();
        assert_eq!(r.unwrap_err(), ConfigError::InvalidWeekday(7));
    }

    #[test]
    fn test_zero_months() {
        let r = DayPickerConfig::new(today()).number_of_months(0).validate();
        assert_eq!(r.unwrap_err(), ConfigError::ZeroMonths);
    }

    #[test]
    fn test_inverted_month_bounds() {
        let r = DayPickerConfig::new(today())
            .month_bounds(Some(ym(2023, Month::January)), Some(ym(2022, Month::January)))
            .validate();
        assert!(matches!(r, Err(ConfigError::InvertedBounds { .. })));
    }

    #[test]
    fn test_inverted_disabled_matcher() {
        let r = DayPickerConfig::new(today())
            .disable(Matcher::range(
                Some(date!(2022 - 06 - 20)),
                Some(date!(2022 - 06 - 10)),
            ))
            .validate();
        assert!(matches!(r, Err(ConfigError::InvertedMatcher { .. })));
    }

    #[test]
    fn test_year_bounds() {
        let mut config = DayPickerConfig::new(today());
        config.from_year = Some(2020);
        config.to_year = Some(2022);
        config.caption_layout = CaptionLayout::Dropdown;
        let picker = config.validate().unwrap();
        assert_eq!(
            picker.bounds(),
            MonthBounds {
                from: Some(ym(2020, Month::January)),
                to: Some(ym(2022, Month::December)),
            }
        );
        assert_eq!(picker.caption_layout(), CaptionLayout::Dropdown);
    }

    #[test]
    fn test_dropdown_needs_both_bounds() {
        let mut config = DayPickerConfig::new(today());
        config.from_year = Some(2020);
        config.caption_layout = CaptionLayout::Dropdown;
        let picker = config.validate().unwrap();
        assert_eq!(picker.caption_layout(), CaptionLayout::Buttons);
    }

    #[test]
    fn test_date_bounds_disable_days() {
        let mut config = DayPickerConfig::new(today());
        config.from_date = Some(date!(2022 - 06 - 10));
        config.to_date = Some(date!(2022 - 07 - 05));
        let picker = config.validate().unwrap();
        assert_eq!(
            picker.bounds(),
            MonthBounds {
                from: Some(ym(2022, Month::June)),
                to: Some(ym(2022, Month::July)),
            }
        );
        let sel = picker.initial_selection();
        let months = picker.render(&picker.initial_window(), &sel);
        let june = &months[0];
        assert!(june.find(date!(2022 - 06 - 09)).unwrap().has(&Modifier::Disabled));
        assert!(!june.find(date!(2022 - 06 - 10)).unwrap().has(&Modifier::Disabled));
        assert_eq!(picker.click_date(&sel, date!(2022 - 06 - 09), false), sel);
        assert_eq!(picker.click_date(&sel, date!(2022 - 07 - 06), false), sel);
        assert_eq!(picker.click_date(&sel, date!(2022 - 08 - 01), false), sel);
        assert!(picker
            .click_date(&sel, date!(2022 - 07 - 05), false)
            .is_selected(date!(2022 - 07 - 05)));
    }

    #[test]
    fn test_inverted_date_bounds() {
        let mut config = DayPickerConfig::new(today());
        config.from_date = Some(date!(2022 - 06 - 20));
        config.to_date = Some(date!(2022 - 06 - 10));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::InvertedMatcher {
                from: date!(2022 - 06 - 20),
                to: date!(2022 - 06 - 10),
            }
        );
    }

    #[test]
    fn test_selection_feeds_back_into_render() {
        let picker = DayPickerConfig::new(today())
            .mode(SelectionMode::Range { required: false })
            .number_of_months(2)
            .validate()
            .unwrap();
        let window = picker.initial_window();
        let mut sel = picker.initial_selection();
        let months = picker.render(&window, &sel);
        let day = months[0].find(date!(2022 - 06 - 28)).unwrap();
        sel = picker.click(&sel, day, false);
        let months = picker.render(&window, &sel);
        let day = months[1].find(date!(2022 - 07 - 02)).unwrap();
        sel = picker.click(&sel, day, false);
        let months = picker.render(&window, &sel);
        let june = &months[0];
        assert!(june.find(date!(2022 - 06 - 28)).unwrap().has(&Modifier::RangeStart));
        assert!(june.find(date!(2022 - 06 - 29)).unwrap().has(&Modifier::RangeMiddle));
        assert!(june.find(date!(2022 - 06 - 27)).unwrap().modifiers.is_empty());
        let july = &months[1];
        assert!(july.find(date!(2022 - 07 - 02)).unwrap().has(&Modifier::RangeEnd));
        assert!(july.find(date!(2022 - 07 - 01)).unwrap().has(&Modifier::Selected));
    }

    #[test]
    fn test_initial_selection_restored() {
        let picker = DayPickerConfig::new(today())
            .mode(SelectionMode::Range { required: false })
            .selected(vec![date!(2022 - 06 - 10), date!(2022 - 06 - 20)])
            .disable(Matcher::from(date!(2022 - 06 - 20)))
            .validate()
            .unwrap();
        let sel = picker.initial_selection();
        assert_eq!(sel.to_string(), "2022-06-10 to 2022-06-20");
        let months = picker.render(&picker.initial_window(), &sel);
        let end = months[0].find(date!(2022 - 06 - 20)).unwrap();
        assert!(end.has(&Modifier::RangeEnd));
        assert!(end.has(&Modifier::Disabled));
        let sel = picker.click_date(&sel, date!(2022 - 06 - 24), true);
        assert_eq!(sel.to_string(), "2022-06-10 to 2022-06-24");
    }

    #[test]
    fn test_invalid_initial_selection() {
        let r = DayPickerConfig::new(today())
            .mode(SelectionMode::Range { required: false })
            .selected(vec![date!(2022 - 06 - 20), date!(2022 - 06 - 10)])
            .validate();
        assert!(matches!(r, Err(ConfigError::InvertedMatcher { .. })));
        let r = DayPickerConfig::new(today())
            .mode(SelectionMode::Multiple {
                min: 0,
                max: Some(1),
            })
            .selected(vec![date!(2022 - 06 - 10), date!(2022 - 06 - 20)])
            .validate();
        assert_eq!(
            r.unwrap_err(),
            ConfigError::TooManyDates { count: 2, max: 1 }
        );
    }

    #[test]
    fn test_disabled_click_is_noop() {
        let picker = DayPickerConfig::new(today())
            .mode(SelectionMode::Multiple { min: 0, max: None })
            .disable(Matcher::weekends())
            .validate()
            .unwrap();
        let sel = picker.initial_selection();
        let months = picker.render(&picker.initial_window(), &sel);
        let saturday = months[0].find(date!(2022 - 06 - 11)).unwrap();
        assert!(!saturday.is_selectable());
        assert_eq!(picker.click(&sel, saturday, false), sel);
    }

    #[test]
    fn test_paging_modes() {
        let mut config = DayPickerConfig::new(today()).number_of_months(3);
        let paged = config.clone().validate().unwrap();
        let w = paged.initial_window();
        assert_eq!(paged.page(&w, PageDirection::Next).pivot(), ym(2022, Month::September));
        config.paged_navigation = false;
        let single = config.validate().unwrap();
        assert_eq!(single.page(&w, PageDirection::Next).pivot(), ym(2022, Month::July));
    }

    #[test]
    fn test_reverse_months() {
        let mut config = DayPickerConfig::new(today()).number_of_months(2);
        config.reverse_months = true;
        let picker = config.validate().unwrap();
        let months = picker.render(&picker.initial_window(), &picker.initial_selection());
        assert_eq!(months[0].month(), ym(2022, Month::July));
        assert_eq!(months[1].month(), ym(2022, Month::June));
    }
}
