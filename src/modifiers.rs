//! Resolution of the named modifiers that apply to each displayed day
use crate::error::ConfigError;
use crate::matcher::Matcher;
use crate::matrix::CalendarDay;
use std::fmt;
use std::str::FromStr;
use time::Date;

/// A named boolean tag attached to a day once its matchers are resolved
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Modifier {
    Disabled,
    Hidden,
    Selected,
    Today,
    Outside,
    RangeStart,
    RangeMiddle,
    RangeEnd,
    Custom(String),
}

impl Modifier {
    /// The built-in modifiers, in the order in which they are resolved
    pub const BUILTIN: [Modifier; 8] = [
        Modifier::Disabled,
        Modifier::Hidden,
        Modifier::Selected,
        Modifier::RangeStart,
        Modifier::RangeMiddle,
        Modifier::RangeEnd,
        Modifier::Today,
        Modifier::Outside,
    ];

    pub fn name(&self) -> &str {
        match self {
            Modifier::Disabled => "disabled",
            Modifier::Hidden => "hidden",
            Modifier::Selected => "selected",
            Modifier::Today => "today",
            Modifier::Outside => "outside",
            Modifier::RangeStart => "range-start",
            Modifier::RangeMiddle => "range-middle",
            Modifier::RangeEnd => "range-end",
            Modifier::Custom(name) => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Modifier::Custom(_))
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Modifier {
    type Err = ConfigError;

    /// Parses built-in names to their variants and anything else to
    /// `Custom`
    fn from_str(s: &str) -> Result<Modifier, ConfigError> {
        if s.is_empty() {
            return Err(ConfigError::EmptyModifierName);
        }
        Ok(Modifier::BUILTIN
            .into_iter()
            .find(|m| m.name() == s)
            .unwrap_or_else(|| Modifier::Custom(s.to_owned())))
    }
}

/// Mapping from modifier names to the matchers that select their days.
///
/// Custom modifiers keep their insertion order.  Built-in modifiers can only
/// be attached through [`ModifierMap::disable()`] and [`ModifierMap::hide()`],
/// or derived from a [`Selection`](crate::Selection); inserting a custom
/// modifier under a reserved name is an error.
#[derive(Clone, Debug, Default)]
pub struct ModifierMap {
    custom: Vec<(String, Matcher)>,
    builtin: Vec<(Modifier, Matcher)>,
}

impl ModifierMap {
    pub fn new() -> ModifierMap {
        ModifierMap::default()
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, matcher: Matcher) -> Result<(), ConfigError> {
        let name = name.into();
        if name.parse::<Modifier>()?.is_builtin() {
            return Err(ConfigError::ReservedModifier(name));
        }
        if self.custom.iter().any(|(n, _)| *n == name) {
            return Err(ConfigError::DuplicateModifier(name));
        }
        matcher.validate()?;
        self.custom.push((name, matcher));
        Ok(())
    }

    /// Builder-style variant of [`ModifierMap::insert()`]
    pub fn with<S: Into<String>>(mut self, name: S, matcher: Matcher) -> Result<Self, ConfigError> {
        self.insert(name, matcher)?;
        Ok(self)
    }

    /// Add dates to the built-in `disabled` set
    pub fn disable(&mut self, matcher: Matcher) -> Result<(), ConfigError> {
        matcher.validate()?;
        self.builtin.push((Modifier::Disabled, matcher));
        Ok(())
    }

    /// Add dates to the built-in `hidden` set
    pub fn hide(&mut self, matcher: Matcher) -> Result<(), ConfigError> {
        matcher.validate()?;
        self.builtin.push((Modifier::Hidden, matcher));
        Ok(())
    }

    /// Returns a copy of the map with additional built-in matchers attached,
    /// such as those derived from the current selection.
    ///
    /// Matchers for `today` and `outside` are ignored, as those modifiers are
    /// always computed by the resolver itself.
    pub(crate) fn with_builtins<I>(&self, extra: I) -> ModifierMap
    where
        I: IntoIterator<Item = (Modifier, Matcher)>,
    {
        let mut map = self.clone();
        map.builtin.extend(extra.into_iter().filter(|(m, _)| {
            m.is_builtin() && !matches!(m, Modifier::Today | Modifier::Outside)
        }));
        map
    }

    pub fn is_empty(&self) -> bool {
        self.custom.is_empty() && self.builtin.is_empty()
    }

    fn builtin_matches(&self, modifier: &Modifier, date: Date) -> bool {
        self.builtin
            .iter()
            .any(|(m, matcher)| m == modifier && matcher.matches(date))
    }
}

/// The modifiers that apply to a single day on one render pass, in
/// resolution order
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DayModifiers(Vec<Modifier>);

impl DayModifiers {
    pub fn contains(&self, modifier: &Modifier) -> bool {
        self.0.contains(modifier)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.0.iter().any(|m| m.name() == name)
    }

    /// A day can be clicked unless it is disabled or hidden
    pub fn is_selectable(&self) -> bool {
        !(self.contains(&Modifier::Disabled) || self.contains(&Modifier::Hidden))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Modifier> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Modifier::name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a DayModifiers {
    type Item = &'a Modifier;
    type IntoIter = std::slice::Iter<'a, Modifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Compute the set of modifiers active for `day`.
///
/// Custom modifiers are evaluated first, in insertion order; the built-ins
/// follow in the order of [`Modifier::BUILTIN`], so a custom modifier can
/// never shadow one of them.  `today` and `outside` are always derived from
/// `today` and the day's membership in its displayed month.
pub fn resolve(day: &CalendarDay, modifiers: &ModifierMap, today: Date) -> DayModifiers {
    let date = day.date();
    let mut active = modifiers
        .custom
        .iter()
        .filter(|(_, matcher)| matcher.matches(date))
        .map(|(name, _)| Modifier::Custom(name.clone()))
        .collect::<Vec<_>>();
    for m in Modifier::BUILTIN {
        let on = match m {
            Modifier::Today => date == today,
            Modifier::Outside => day.is_outside(),
            ref builtin => modifiers.builtin_matches(builtin, date),
        };
        if on {
            active.push(m);
        }
    }
    DayModifiers(active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calmath::YearMonth;
    use time::macros::date;
    use time::Month;

    fn june_day(date: Date) -> CalendarDay {
        CalendarDay::new(date, YearMonth::new(2022, Month::June).unwrap(), 0)
    }

    #[test]
    fn test_modifier_from_str() {
        assert_eq!("range-middle".parse::<Modifier>(), Ok(Modifier::RangeMiddle));
        assert_eq!(
            "booked".parse::<Modifier>(),
            Ok(Modifier::Custom(String::from("booked")))
        );
        assert_eq!("".parse::<Modifier>(), Err(ConfigError::EmptyModifierName));
    }

    #[test]
    fn test_reserved_name_collision() {
        let mut map = ModifierMap::new();
        for name in ["disabled", "hidden", "selected", "today", "outside", "range-end"] {
            assert_eq!(
                map.insert(name, Matcher::Always(true)),
                Err(ConfigError::ReservedModifier(name.to_owned()))
            );
        }
        assert!(map.is_empty());
    }

    #[test]
    fn test_duplicate_name() {
        let mut map = ModifierMap::new();
        map.insert("booked", Matcher::Always(true)).unwrap();
        assert_eq!(
            map.insert("booked", Matcher::Always(false)),
            Err(ConfigError::DuplicateModifier(String::from("booked")))
        );
    }

    #[test]
    fn test_inverted_matcher_rejected() {
        let mut map = ModifierMap::new();
        let r = map.insert(
            "trip",
            Matcher::range(Some(date!(2022 - 06 - 20)), Some(date!(2022 - 06 - 10))),
        );
        assert!(matches!(r, Err(ConfigError::InvertedMatcher { .. })));
        let r = map.disable(Matcher::range(
            Some(date!(2022 - 06 - 20)),
            Some(date!(2022 - 06 - 10)),
        ));
        assert!(matches!(r, Err(ConfigError::InvertedMatcher { .. })));
    }

    #[test]
    fn test_resolve_custom_in_insertion_order() {
        let map = ModifierMap::new()
            .with("weekend", Matcher::weekends())
            .unwrap()
            .with("booked", Matcher::from(date!(2022 - 06 - 11)))
            .unwrap()
            .with("never", Matcher::Always(false))
            .unwrap();
        let mods = resolve(&june_day(date!(2022 - 06 - 11)), &map, date!(2022 - 06 - 13));
        assert_eq!(mods.names().collect::<Vec<_>>(), ["weekend", "booked"]);
    }

    #[test]
    fn test_resolve_builtins_last() {
        let mut map = ModifierMap::new()
            .with("booked", Matcher::from(date!(2022 - 06 - 13)))
            .unwrap();
        map.disable(Matcher::Always(true)).unwrap();
        let mods = resolve(&june_day(date!(2022 - 06 - 13)), &map, date!(2022 - 06 - 13));
        assert_eq!(
            mods.names().collect::<Vec<_>>(),
            ["booked", "disabled", "today"]
        );
        assert!(mods.contains_name("booked"));
        assert!(mods.contains_name("disabled"));
        assert!(!mods.contains_name("selected"));
        assert!(!mods.is_selectable());
    }

    #[test]
    fn test_resolve_outside() {
        let map = ModifierMap::new();
        let mods = resolve(&june_day(date!(2022 - 05 - 31)), &map, date!(2022 - 06 - 13));
        assert!(mods.contains(&Modifier::Outside));
        assert!(mods.is_selectable());
        let mods = resolve(&june_day(date!(2022 - 06 - 01)), &map, date!(2022 - 06 - 13));
        assert!(mods.is_empty());
    }

    #[test]
    fn test_resolve_hidden_not_selectable() {
        let mut map = ModifierMap::new();
        map.hide(Matcher::Before(date!(2022 - 06 - 05))).unwrap();
        let mods = resolve(&june_day(date!(2022 - 06 - 04)), &map, date!(2022 - 06 - 13));
        assert!(mods.contains(&Modifier::Hidden));
        assert!(!mods.is_selectable());
    }

    #[test]
    fn test_with_builtins_ignores_derived() {
        let map = ModifierMap::new().with_builtins([
            (Modifier::Selected, Matcher::from(date!(2022 - 06 - 02))),
            (Modifier::Today, Matcher::Always(true)),
            (Modifier::Outside, Matcher::Always(true)),
            (Modifier::Custom(String::from("sneaky")), Matcher::Always(true)),
        ]);
        let mods = resolve(&june_day(date!(2022 - 06 - 02)), &map, date!(2022 - 06 - 13));
        assert_eq!(mods.names().collect::<Vec<_>>(), ["selected"]);
    }

    #[test]
    fn test_resolve_idempotent() {
        let mut map = ModifierMap::new()
            .with("even", Matcher::predicate(|d| d.day() % 2 == 0))
            .unwrap();
        map.disable(Matcher::weekends()).unwrap();
        let today = date!(2022 - 06 - 13);
        for date in crate::calmath::iter_days(date!(2022 - 05 - 29)).take(42) {
            let day = june_day(date);
            assert_eq!(resolve(&day, &map, today), resolve(&day, &map, today));
        }
    }
}
