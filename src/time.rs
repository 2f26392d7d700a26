use serde::{Deserialize, Serialize};

use std::fmt;

use crate::{
    Assembler, AssemblyState, Field, HOURS_PER_MERIDIEM, Phase, Step, TIME_SEPARATOR,
    ValidationError, assign,
    types::{Hour, Meridiem, Minute},
};

/// A fully assembled 12-hour clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeValue {
    hour: Hour,
    minute: Minute,
    meridiem: Meridiem,
}

impl TimeValue {
    pub const fn new(hour: Hour, minute: Minute, meridiem: Meridiem) -> Self {
        Self {
            hour,
            minute,
            meridiem,
        }
    }

    /// Builds a 12-hour time from a 24-hour clock reading.
    ///
    /// # Errors
    /// Returns `InvalidHour` for hours past 23 and `InvalidMinute` for
    /// minutes past 59.
    pub fn from_hour24(hour24: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour24 >= 2 * HOURS_PER_MERIDIEM {
            return Err(ValidationError::InvalidHour(hour24.to_string()));
        }
        let meridiem = if hour24 < HOURS_PER_MERIDIEM {
            Meridiem::Am
        } else {
            Meridiem::Pm
        };
        let hour = match hour24 % HOURS_PER_MERIDIEM {
            0 => HOURS_PER_MERIDIEM,
            h => h,
        };
        Ok(Self {
            hour: Hour::new(hour)?,
            minute: Minute::new(minute)?,
            meridiem,
        })
    }

    /// Returns the hour as entered, 1-12
    pub const fn hour(&self) -> u8 {
        self.hour.get()
    }

    pub const fn minute(&self) -> u8 {
        self.minute.get()
    }

    pub const fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Hour on a 24-hour clock: noon is 12, midnight is 0.
    pub const fn hour24(&self) -> u8 {
        self.hour.to_24(self.meridiem)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{TIME_SEPARATOR}{} {}",
            self.hour, self.minute, self.meridiem
        )
    }
}

#[cfg(feature = "chrono")]
impl TimeValue {
    pub fn to_naive_time(self) -> Option<chrono::NaiveTime> {
        chrono::NaiveTime::from_hms_opt(u32::from(self.hour24()), u32::from(self.minute()), 0)
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<chrono::NaiveTime> for TimeValue {
    type Error = ValidationError;

    /// Seconds and below are dropped.
    fn try_from(time: chrono::NaiveTime) -> Result<Self, Self::Error> {
        use chrono::Timelike;

        let hour = u8::try_from(time.hour())
            .map_err(|_| ValidationError::InvalidHour(time.hour().to_string()))?;
        let minute = u8::try_from(time.minute())
            .map_err(|_| ValidationError::InvalidMinute(time.minute().to_string()))?;
        Self::from_hour24(hour, minute)
    }
}

/// Holds the hour, minute and meridiem sub-fields of a time entry.
#[derive(Debug, Clone, Default)]
pub struct TimeAssembler {
    hour: Option<Hour>,
    minute: Option<Minute>,
    meridiem: Meridiem,
    phase: Phase,
}

impl TimeAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns `ValidationError::InvalidHour` unless `raw` is 1-12 in ASCII
    /// digits. The hour is left blank.
    pub fn set_hour(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.phase = Phase::Editing;
        assign(&mut self.hour, Hour::parse(raw))
    }

    /// # Errors
    /// Returns `ValidationError::InvalidMinute` unless `raw` is 0-59 in
    /// ASCII digits. The minute is left blank.
    pub fn set_minute(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.phase = Phase::Editing;
        assign(&mut self.minute, Minute::parse(raw))
    }

    pub const fn set_meridiem(&mut self, meridiem: Meridiem) {
        self.meridiem = meridiem;
        self.phase = Phase::Editing;
    }

    pub const fn set_time(&mut self, value: TimeValue) {
        self.hour = Some(value.hour);
        self.minute = Some(value.minute);
        self.meridiem = value.meridiem;
        self.phase = Phase::Valid;
    }

    /// Blanks one sub-field. The meridiem goes back to AM.
    pub fn clear_field(&mut self, field: Field) {
        match field {
            Field::Hour => self.hour = None,
            Field::Minute => self.minute = None,
            Field::Meridiem => self.meridiem = Meridiem::default(),
            Field::Month | Field::Day | Field::Year => return,
        }
        self.phase = Phase::Editing;
    }

    pub const fn hour(&self) -> Option<Hour> {
        self.hour
    }

    pub const fn minute(&self) -> Option<Minute> {
        self.minute
    }

    pub const fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    pub fn hour_text(&self) -> String {
        self.hour.map(|h| h.to_string()).unwrap_or_default()
    }

    pub fn minute_text(&self) -> String {
        self.minute.map(|m| m.to_string()).unwrap_or_default()
    }
}

impl Assembler for TimeAssembler {
    type Value = TimeValue;

    const FIELDS: &'static [Field] = &[Field::Hour, Field::Minute, Field::Meridiem];

    fn step(&mut self, field: Field, step: Step) {
        match field {
            Field::Hour => {
                self.hour = match self.hour {
                    Some(hour) => Some(hour.step(step)),
                    None => Hour::new(Hour::seed(step)).ok(),
                };
            }
            Field::Minute => {
                self.minute = match self.minute {
                    Some(minute) => Some(minute.step(step)),
                    None => Minute::new(Minute::seed(step)).ok(),
                };
            }
            Field::Meridiem => self.meridiem = self.meridiem.toggled(),
            Field::Month | Field::Day | Field::Year => {
                tracing::trace!(%field, "ignoring step outside the time");
                return;
            }
        }
        self.phase = Phase::Editing;
    }

    /// Hour and minute must both be present; their ranges are guaranteed by
    /// their types. Meridiem is always present.
    fn validate_composite(&mut self) -> Result<TimeValue, ValidationError> {
        match (self.hour, self.minute) {
            (Some(hour), Some(minute)) => {
                self.phase = Phase::Valid;
                Ok(TimeValue::new(hour, minute, self.meridiem))
            }
            (None, _) => Err(incomplete(Field::Hour)),
            (Some(_), None) => Err(incomplete(Field::Minute)),
        }
    }

    fn value(&self) -> Option<TimeValue> {
        match (self.phase, self.hour, self.minute) {
            (Phase::Valid, Some(hour), Some(minute)) => {
                Some(TimeValue::new(hour, minute, self.meridiem))
            }
            _ => None,
        }
    }

    fn state(&self) -> AssemblyState {
        self.phase
            .state(self.hour.is_some() || self.minute.is_some())
    }

    fn clear(&mut self) {
        self.hour = None;
        self.minute = None;
        self.meridiem = Meridiem::default();
        self.phase = Phase::Editing;
    }
}

fn incomplete(field: Field) -> ValidationError {
    tracing::debug!(%field, "time requested while incomplete");
    ValidationError::IncompleteValue { field }
}
