use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    Assembler, AssemblyState, DATE_SEPARATOR, DateRules, Field, MAX_DAY, Phase, Step,
    ValidationError, assign,
    types::{Day, Month, Year, days_in_month},
};

/// A fully assembled date: month, day and year that validated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateParts")]
pub struct DateValue {
    month: Month,
    day: Day,
    year: Year,
}

/// Unchecked wire form of a [`DateValue`].
#[derive(Deserialize)]
struct DateParts {
    month: Month,
    day: Day,
    year: Year,
}

impl TryFrom<DateParts> for DateValue {
    type Error = ValidationError;

    fn try_from(parts: DateParts) -> Result<Self, Self::Error> {
        Self::new(parts.month, parts.day, parts.year, &DateRules::default())
    }
}

impl DateValue {
    /// Creates a date, checking the day against the month length.
    ///
    /// The year is taken as given; two-digit normalization belongs to the
    /// assembler.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDay` if `day` does not fit `month`.
    pub fn new(
        month: Month,
        day: Day,
        year: Year,
        rules: &DateRules,
    ) -> Result<Self, ValidationError> {
        let day = day.within(month, year, rules.february)?;
        Ok(Self { month, day, year })
    }

    /// Returns the month component (as u8 for convenience)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day component (as u8 for convenience)
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the year component
    pub const fn year(&self) -> u32 {
        self.year.get()
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DATE_SEPARATOR}{}{DATE_SEPARATOR}{:04}",
            self.month,
            self.day,
            self.year.get()
        )
    }
}

#[cfg(feature = "chrono")]
impl DateValue {
    /// Converts to a calendar date.
    ///
    /// Returns `None` for dates the Gregorian calendar does not have, which
    /// the fixed February table lets through (Feb 29 of a common year).
    pub fn to_naive_date(self) -> Option<chrono::NaiveDate> {
        let year = i32::try_from(self.year.get()).ok()?;
        chrono::NaiveDate::from_ymd_opt(year, u32::from(self.month()), u32::from(self.day()))
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveDate> for DateValue {
    type Error = ValidationError;

    fn try_from(date: chrono::NaiveDate) -> Result<Self, Self::Error> {
        use chrono::Datelike;

        let year = u32::try_from(date.year())
            .map_err(|_| ValidationError::InvalidYear(date.year().to_string()))?;
        let month = u8::try_from(date.month())
            .map_err(|_| ValidationError::InvalidMonth(date.month().to_string()))
            .and_then(Month::new)?;
        let day = u8::try_from(date.day())
            .map_err(|_| ValidationError::InvalidDay(date.day().to_string()))
            .and_then(Day::new)?;
        Ok(Self {
            month,
            day,
            year: Year::new(year),
        })
    }
}

/// Holds the month, day and year sub-fields of a date entry.
///
/// Sub-fields are set one at a time from raw field text and checked on
/// their own; [`validate_composite`](Self::validate_composite) then checks
/// them together and assembles a [`DateValue`].
#[derive(Debug, Clone, Default)]
pub struct DateAssembler {
    month: Option<Month>,
    day: Option<Day>,
    year: Option<Year>,
    rules: DateRules,
    phase: Phase,
}

impl DateAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: DateRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub const fn rules(&self) -> &DateRules {
        &self.rules
    }

    /// # Errors
    /// Returns `ValidationError::InvalidMonth` unless `raw` is 1-12 in
    /// ASCII digits. The month is left blank.
    pub fn set_month(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.phase = Phase::Editing;
        assign(&mut self.month, Month::parse(raw))
    }

    /// Sets the day after a month-independent 1-31 check.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDay` for anything else. The day is
    /// left blank.
    pub fn set_day(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.phase = Phase::Editing;
        assign(&mut self.day, Day::parse(raw))
    }

    /// # Errors
    /// Returns `ValidationError::InvalidYear` unless `raw` is all ASCII
    /// digits. The year is left blank.
    pub fn set_year(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.phase = Phase::Editing;
        assign(&mut self.year, Year::parse(raw))
    }

    /// Fills every sub-field from an assembled date, rechecked against this
    /// assembler's rules with a two-digit year normalized. The sub-fields are
    /// left untouched when the date does not fit the rules.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidDay` if the day does not fit the
    /// month under `rules.february`.
    pub fn set_date(&mut self, value: DateValue) -> Result<(), ValidationError> {
        let year = value.year.normalized(&self.rules);
        let value = DateValue::new(value.month, value.day, year, &self.rules)?;
        self.month = Some(value.month);
        self.day = Some(value.day);
        self.year = Some(value.year);
        self.phase = Phase::Valid;
        Ok(())
    }

    /// Blanks one sub-field.
    pub fn clear_field(&mut self, field: Field) {
        match field {
            Field::Month => self.month = None,
            Field::Day => self.day = None,
            Field::Year => self.year = None,
            Field::Hour | Field::Minute | Field::Meridiem => return,
        }
        self.phase = Phase::Editing;
    }

    pub const fn month(&self) -> Option<Month> {
        self.month
    }

    pub const fn day(&self) -> Option<Day> {
        self.day
    }

    pub const fn year(&self) -> Option<Year> {
        self.year
    }

    /// Display text for the month field, empty when blank
    pub fn month_text(&self) -> String {
        self.month.map(|m| m.to_string()).unwrap_or_default()
    }

    /// Display text for the day field, empty when blank
    pub fn day_text(&self) -> String {
        self.day.map(|d| d.to_string()).unwrap_or_default()
    }

    /// Display text for the year field, empty when blank. Reads four
    /// digits once a composite has normalized a two-digit year.
    pub fn year_text(&self) -> String {
        self.year.map(|y| y.to_string()).unwrap_or_default()
    }

    /// Length of the current month, or `MAX_DAY` while the month is blank.
    fn max_day(&self) -> u8 {
        self.month.map_or(MAX_DAY, |month| {
            let year = self.year.map_or(0, |y| y.normalized(&self.rules).get());
            days_in_month(month.get(), year, self.rules.february)
        })
    }

    fn fail(&mut self, err: ValidationError) -> ValidationError {
        if let Some(field) = err.field() {
            self.clear_field(field);
            self.phase = Phase::Invalid(field);
        }
        tracing::debug!(error = %err, "date failed validation");
        err
    }
}

impl Assembler for DateAssembler {
    type Value = DateValue;

    const FIELDS: &'static [Field] = &[Field::Month, Field::Day, Field::Year];

    fn step(&mut self, field: Field, step: Step) {
        match field {
            Field::Month => {
                self.month = match self.month {
                    Some(month) => Some(month.step(step)),
                    None => Month::new(Month::seed(step)).ok(),
                };
            }
            Field::Day => {
                let max_day = self.max_day();
                self.day = match self.day {
                    Some(day) => Some(day.step_within(step, max_day)),
                    None => Day::new(Day::seed(step, max_day)).ok(),
                };
            }
            Field::Year => match self.year {
                Some(year) => self.year = Some(year.step(step, self.rules.year_floor)),
                None => return,
            },
            Field::Hour | Field::Minute | Field::Meridiem => {
                tracing::trace!(%field, "ignoring step outside the date");
                return;
            }
        }
        self.phase = Phase::Editing;
    }

    /// Checks blanks first (month, day, year order), then the day against
    /// the month length in the normalized year. Month and year ranges are
    /// guaranteed by their types.
    fn validate_composite(&mut self) -> Result<DateValue, ValidationError> {
        let (Some(month), Some(day), Some(year)) = (self.month, self.day, self.year) else {
            let field = if self.month.is_none() {
                Field::Month
            } else if self.day.is_none() {
                Field::Day
            } else {
                Field::Year
            };
            tracing::debug!(%field, "date requested while incomplete");
            return Err(ValidationError::IncompleteValue { field });
        };

        let year = year.normalized(&self.rules);
        let value = DateValue::new(month, day, year, &self.rules).map_err(|err| self.fail(err))?;

        if self.year != Some(year) {
            tracing::debug!(year = year.get(), "normalized two-digit year");
        }
        self.year = Some(year);
        self.phase = Phase::Valid;
        Ok(value)
    }

    fn value(&self) -> Option<DateValue> {
        match (self.phase, self.month, self.day, self.year) {
            (Phase::Valid, Some(month), Some(day), Some(year)) => {
                Some(DateValue { month, day, year })
            }
            _ => None,
        }
    }

    fn state(&self) -> AssemblyState {
        let any_filled = self.month.is_some() || self.day.is_some() || self.year.is_some();
        self.phase.state(any_filled)
    }

    fn clear(&mut self) {
        self.month = None;
        self.day = None;
        self.year = None;
        self.phase = Phase::Editing;
    }
}
