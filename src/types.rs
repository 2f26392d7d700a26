use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_COMMON, GREGORIAN_CYCLE,
    HOURS_PER_MERIDIEM, LEAP_YEAR_CYCLE, MAX_DAY, MAX_HOUR, MAX_MINUTE, MAX_MONTH, MIN_DAY,
    MIN_HOUR, MIN_MONTH, TWO_DIGIT_YEAR_LIMIT,
};
use crate::{DateRules, FebruaryRule, Step, ValidationError, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= MAX_MONTH => Ok(Self(non_zero)),
            _ => Err(ValidationError::InvalidMonth(value.to_string())),
        }
    }

    /// Parses raw field text: ASCII digits only, 1-12.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidMonth` carrying the raw text.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        parse_digits(raw)
            .and_then(|v| u8::try_from(v).ok())
            .and_then(|v| Self::new(v).ok())
            .ok_or_else(|| ValidationError::InvalidMonth(raw.to_owned()))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Spins the month, wrapping 12 -> 1 and 1 -> 12.
    #[must_use]
    pub fn step(self, step: Step) -> Self {
        let next = wrap(self.get(), step, MIN_MONTH, MAX_MONTH);
        Self::new(next).unwrap_or(self)
    }

    /// Month a blank field takes when spun.
    pub(crate) const fn seed(step: Step) -> u8 {
        match step {
            Step::Up => MIN_MONTH,
            Step::Down => MAX_MONTH,
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A day value in `1..=MAX_DAY`. Whether it fits a particular month is
/// checked separately by [`Day::within`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day without month context (first-pass 1-31 check)
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDay` if the value is 0 or > `MAX_DAY`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= MAX_DAY => Ok(Self(non_zero)),
            _ => Err(ValidationError::InvalidDay(value.to_string())),
        }
    }

    /// Parses raw field text: ASCII digits only, 1-31.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDay` carrying the raw text.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        parse_digits(raw)
            .and_then(|v| u8::try_from(v).ok())
            .and_then(|v| Self::new(v).ok())
            .ok_or_else(|| ValidationError::InvalidDay(raw.to_owned()))
    }

    /// Checks this day against the length of `month` in `year`.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDay` if the month is shorter.
    pub fn within(
        self,
        month: Month,
        year: Year,
        rule: FebruaryRule,
    ) -> Result<Self, ValidationError> {
        let max_day = days_in_month(month.get(), year.get(), rule);
        if self.get() > max_day {
            return Err(ValidationError::InvalidDay(format!(
                "{} (month {month} has {max_day} days)",
                self.get()
            )));
        }
        Ok(self)
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Spins the day within a month of `max_day` days.
    ///
    /// A day already past `max_day` (left over from a longer month) steps
    /// down to `max_day` and up to the first.
    #[must_use]
    pub fn step_within(self, step: Step, max_day: u8) -> Self {
        let day = self.get();
        let next = if day > max_day {
            match step {
                Step::Up => MIN_DAY,
                Step::Down => max_day,
            }
        } else {
            wrap(day, step, MIN_DAY, max_day)
        };
        Self::new(next).unwrap_or(self)
    }

    pub(crate) const fn seed(step: Step, max_day: u8) -> u8 {
        match step {
            Step::Up => MIN_DAY,
            Step::Down => max_day,
        }
    }
}

impl TryFrom<u8> for Day {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A non-negative year. Values below 100 are two-digit input until
/// [`Year::normalized`] moves them into a century.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Year(u32);

impl Year {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Parses raw field text: any run of ASCII digits up to `u32::MAX`.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidYear` carrying the raw text if it is
    /// not all digits or exceeds `u32::MAX` (4294967295).
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        parse_digits(raw)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidYear(raw.to_owned()))
    }

    /// Returns the year value as u32
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_two_digit(self) -> bool {
        self.0 < TWO_DIGIT_YEAR_LIMIT
    }

    /// Moves a two-digit year into `rules.century_base`; other years are unchanged.
    #[must_use]
    pub const fn normalized(self, rules: &DateRules) -> Self {
        if self.is_two_digit() {
            Self(rules.century_base.saturating_add(self.0))
        } else {
            self
        }
    }

    /// Spins the year: up without bound, down no lower than `floor`.
    #[must_use]
    pub const fn step(self, step: Step, floor: u32) -> Self {
        match step {
            Step::Up => Self(self.0.saturating_add(1)),
            Step::Down if self.0 > floor => Self(self.0 - 1),
            Step::Down => self,
        }
    }
}

impl From<u32> for Year {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Year> for u32 {
    fn from(year: Year) -> Self {
        year.0
    }
}

/// Unpadded, so a typed two-digit year reads back as typed. Composite
/// dates pad the year to four digits.
impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An hour on a 12-hour clock, `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Hour(NonZeroU8);

impl Hour {
    /// # Errors
    /// Returns `ValidationError::InvalidHour` if the value is 0 or > `MAX_HOUR`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        match NonZeroU8::new(value) {
            Some(non_zero) if value <= MAX_HOUR => Ok(Self(non_zero)),
            _ => Err(ValidationError::InvalidHour(value.to_string())),
        }
    }

    /// Parses raw field text: ASCII digits only, 1-12.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidHour` carrying the raw text.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        parse_digits(raw)
            .and_then(|v| u8::try_from(v).ok())
            .and_then(|v| Self::new(v).ok())
            .ok_or_else(|| ValidationError::InvalidHour(raw.to_owned()))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Hour on a 24-hour clock: 12 AM is 0, 12 PM is 12.
    pub const fn to_24(self, meridiem: Meridiem) -> u8 {
        let hour = self.get() % HOURS_PER_MERIDIEM;
        match meridiem {
            Meridiem::Am => hour,
            Meridiem::Pm => hour + HOURS_PER_MERIDIEM,
        }
    }

    /// Spins the hour, wrapping 12 -> 1 and 1 -> 12.
    #[must_use]
    pub fn step(self, step: Step) -> Self {
        Self::new(wrap(self.get(), step, MIN_HOUR, MAX_HOUR)).unwrap_or(self)
    }

    pub(crate) const fn seed(step: Step) -> u8 {
        match step {
            Step::Up => MIN_HOUR,
            Step::Down => MAX_HOUR,
        }
    }
}

impl TryFrom<u8> for Hour {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hour> for u8 {
    fn from(hour: Hour) -> Self {
        hour.0.get()
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// A minute, `0..=59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Minute(u8);

impl Minute {
    /// # Errors
    /// Returns `ValidationError::InvalidMinute` if the value is > `MAX_MINUTE`.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > MAX_MINUTE {
            return Err(ValidationError::InvalidMinute(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Parses raw field text: ASCII digits only, 0-59.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidMinute` carrying the raw text.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        parse_digits(raw)
            .and_then(|v| u8::try_from(v).ok())
            .and_then(|v| Self::new(v).ok())
            .ok_or_else(|| ValidationError::InvalidMinute(raw.to_owned()))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Spins the minute, wrapping 59 -> 0 and 0 -> 59.
    #[must_use]
    pub const fn step(self, step: Step) -> Self {
        Self(wrap(self.0, step, 0, MAX_MINUTE))
    }

    pub(crate) const fn seed(step: Step) -> u8 {
        match step {
            Step::Up => 0,
            Step::Down => MAX_MINUTE,
        }
    }
}

impl TryFrom<u8> for Minute {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Minute> for u8 {
    fn from(minute: Minute) -> Self {
        minute.0
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// AM/PM designator. A time field that was never set reads AM.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Serialize, Deserialize,
)]
pub enum Meridiem {
    #[default]
    #[display(fmt = "AM")]
    #[serde(rename = "AM")]
    Am,
    #[display(fmt = "PM")]
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Am => Self::Pm,
            Self::Pm => Self::Am,
        }
    }
}

// Helper functions

/// Accepts a non-empty run of ASCII digits. Signs, whitespace and values
/// that overflow `u32` are rejected.
pub(crate) fn parse_digits(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Steps `value` within `low..=high`, wrapping at both ends.
const fn wrap(value: u8, step: Step, low: u8, high: u8) -> u8 {
    match step {
        Step::Up if value < high => value + 1,
        Step::Up => low,
        Step::Down if value > low => value - 1,
        Step::Down => high,
    }
}

pub const fn is_leap_year(year: u32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(month: u8, year: u32, rule: FebruaryRule) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    match rule {
        FebruaryRule::Gregorian if month == FEBRUARY && !is_leap_year(year) => {
            FEBRUARY_DAYS_COMMON
        }
        _ => DAYS_IN_MONTH[month as usize],
    }
}
