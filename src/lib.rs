//! Value holders for segmented date and time entry fields.
//!
//! A presentation layer feeds raw sub-field text (month, day, year, hour,
//! minute) and abstract navigation commands into the types here, and gets
//! back either a structured [`ValidationError`] or an assembled composite
//! value. The value holders never perform I/O or draw anything; only
//! [`EntryConfig::load_from_file`] touches the filesystem.

mod config;
mod consts;
mod date;
mod entry;
mod navigation;
mod prelude;
mod time;
mod types;

pub use config::{ConfigError, DateRules, EntryConfig, FebruaryRule, KeystrokeLimits};
pub use consts::*;
pub use date::{DateAssembler, DateValue};
pub use entry::{
    DEFAULT_DECIMAL_PATTERN, DEFAULT_INTEGER_PATTERN, DecimalEntry, IntegerEntry, TextEntry,
    is_not_blank, is_numeric,
};
pub use navigation::{Command, Direction, EntryGroup, Focus, Response};
pub use time::{TimeAssembler, TimeValue};
pub use types::{Day, Hour, Meridiem, Minute, Month, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// One atomic input unit of a composite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "meridiem")]
    Meridiem,
}

/// Direction of a spin on a single sub-field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Up,
    Down,
}

/// Observable lifecycle of an assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AssemblyState {
    /// No sub-field holds a value
    #[display(fmt = "empty")]
    Empty,
    /// At least one sub-field is set and no composite has been validated since
    #[display(fmt = "partially filled")]
    PartiallyFilled,
    /// The last composite validation succeeded and nothing changed since
    #[display(fmt = "valid")]
    Valid,
    /// The last composite validation failed; `field` was cleared
    #[display(fmt = "invalid {field}")]
    Invalid { field: Field },
}

/// Error returned for rejected sub-field input or a failed composite.
///
/// Every variant is recoverable: it describes expected user input, and the
/// caller decides how (or whether) to tell the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid month: {0:?} (must be {min}-{max})", min = MIN_MONTH, max = MAX_MONTH)]
    InvalidMonth(String),
    #[error("Invalid day: {0:?}")]
    InvalidDay(String),
    #[error("Invalid year: {0:?} (must be a non-negative number)")]
    InvalidYear(String),
    #[error("Invalid hour: {0:?} (must be {min}-{max})", min = MIN_HOUR, max = MAX_HOUR)]
    InvalidHour(String),
    #[error("Invalid minute: {0:?} (must be 0-{max})", max = MAX_MINUTE)]
    InvalidMinute(String),
    /// A composite was requested while `field` is still blank.
    #[error("Incomplete value: {field} is blank")]
    IncompleteValue { field: Field },
    /// Single-value entry text rejected by its pattern.
    #[error("{value:?} is not a valid {label}")]
    InvalidEntry { label: String, value: String },
}

impl ValidationError {
    /// The sub-field this error is about, if it concerns one.
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::InvalidMonth(_) => Some(Field::Month),
            Self::InvalidDay(_) => Some(Field::Day),
            Self::InvalidYear(_) => Some(Field::Year),
            Self::InvalidHour(_) => Some(Field::Hour),
            Self::InvalidMinute(_) => Some(Field::Minute),
            Self::IncompleteValue { field } => Some(*field),
            Self::InvalidEntry { .. } => None,
        }
    }
}

/// Shared surface of the date and time assemblers.
///
/// [`EntryGroup`] drives any assembler through this trait, so focus and
/// keystroke handling is written once for both.
pub trait Assembler {
    /// Composite produced once every sub-field validates together.
    type Value;

    /// Sub-fields in focus order.
    const FIELDS: &'static [Field];

    /// Spins one sub-field. Fields outside [`Self::FIELDS`] are ignored.
    fn step(&mut self, field: Field, step: Step);

    /// Checks all sub-fields together and assembles the composite.
    ///
    /// # Errors
    /// Returns `IncompleteValue` for the first blank field, otherwise the
    /// error kind of the first field that fails. That field is cleared.
    fn validate_composite(&mut self) -> Result<Self::Value, ValidationError>;

    /// The composite, only while the state is [`AssemblyState::Valid`].
    fn value(&self) -> Option<Self::Value>;

    fn state(&self) -> AssemblyState;

    /// Blanks every sub-field.
    fn clear(&mut self);
}

/// Where an assembler sits between edits and validations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Phase {
    #[default]
    Editing,
    Valid,
    Invalid(Field),
}

impl Phase {
    pub(crate) const fn state(self, any_filled: bool) -> AssemblyState {
        match self {
            Self::Valid => AssemblyState::Valid,
            Self::Invalid(field) => AssemblyState::Invalid { field },
            Self::Editing if any_filled => AssemblyState::PartiallyFilled,
            Self::Editing => AssemblyState::Empty,
        }
    }
}

/// Stores a parsed sub-value, or blanks the slot when parsing failed.
pub(crate) fn assign<T>(
    slot: &mut Option<T>,
    parsed: Result<T, ValidationError>,
) -> Result<(), ValidationError> {
    match parsed {
        Ok(value) => {
            *slot = Some(value);
            Ok(())
        }
        Err(err) => {
            *slot = None;
            tracing::debug!(error = %err, "rejected sub-field input");
            Err(err)
        }
    }
}
