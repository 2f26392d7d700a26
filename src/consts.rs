/// Lowest valid month (January)
pub const MIN_MONTH: u8 = 1;
/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;
/// Largest day any month can hold, used before the month is known
pub const MAX_DAY: u8 = 31;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;
/// Days in February for common years
pub const FEBRUARY_DAYS_COMMON: u8 = 28;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February is fixed at 29 days; `FebruaryRule::Gregorian` narrows it per year.
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    FEBRUARY_DAYS_LEAP, // February
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u32 = 400;

/// Years below this value are treated as two-digit years
pub const TWO_DIGIT_YEAR_LIMIT: u32 = 100;
/// Century added to two-digit years
pub const DEFAULT_CENTURY_BASE: u32 = 2000;
/// Lowest year reachable by stepping down
pub const DEFAULT_YEAR_FLOOR: u32 = 0;

/// Lowest hour on a 12-hour clock
pub const MIN_HOUR: u8 = 1;
/// Highest hour on a 12-hour clock
pub const MAX_HOUR: u8 = 12;
/// Hours per meridiem, also the noon/midnight hour on a 12-hour clock
pub const HOURS_PER_MERIDIEM: u8 = 12;
/// Highest valid minute
pub const MAX_MINUTE: u8 = 59;

/// Digits typed into the month field before focus moves on
pub const MONTH_KEYSTROKES: u8 = 2;
/// Digits typed into the day field before focus moves on
pub const DAY_KEYSTROKES: u8 = 2;
/// Digits typed into the year field before focus leaves the date
pub const YEAR_KEYSTROKES: u8 = 4;
/// Digits typed into the hour field before focus moves on
pub const HOUR_KEYSTROKES: u8 = 2;
/// Digits typed into the minute field before focus moves on
pub const MINUTE_KEYSTROKES: u8 = 2;

/// Date component separator for display
pub const DATE_SEPARATOR: char = '/';
/// Time component separator for display
pub const TIME_SEPARATOR: char = ':';
