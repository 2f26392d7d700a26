//! Single-value entries validated by a regular expression.
//!
//! Each entry holds the text as typed. [`validate`](TextEntry::validate)
//! is the focus-out check; the `set_*` methods filter a value through the
//! pattern and store its captured group.

use std::sync::LazyLock;

use regex::Regex;

use crate::ValidationError;

/// Default pattern for integer entries.
pub const DEFAULT_INTEGER_PATTERN: &str = r"\s*(\d*)\s*";
/// Default pattern for decimal entries.
pub const DEFAULT_DECIMAL_PATTERN: &str = r"\s*(\d+[.]*\d*)\s*";

#[allow(clippy::expect_used)]
static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9.]+\s*$").expect("numeric pattern is valid"));

#[allow(clippy::expect_used)]
static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| compile(DEFAULT_INTEGER_PATTERN).expect("integer pattern is valid"));

#[allow(clippy::expect_used)]
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| compile(DEFAULT_DECIMAL_PATTERN).expect("decimal pattern is valid"));

/// True for non-empty text made of digits and dots, optionally padded
/// with whitespace.
pub fn is_numeric(text: &str) -> bool {
    NUMERIC.is_match(text)
}

pub fn is_not_blank(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Anchors `pattern` so it must match the whole text.
fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{pattern})$"))
}

/// Free text, optionally constrained by a pattern with one capture group.
#[derive(Debug, Clone)]
pub struct TextEntry {
    label: String,
    pattern: Option<Regex>,
    text: String,
}

impl TextEntry {
    /// An entry that accepts anything.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: None,
            text: String::new(),
        }
    }

    /// # Errors
    /// Returns the regex error if `pattern` does not compile.
    pub fn with_pattern(label: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::with_regex(label, compile(pattern)?))
    }

    fn with_regex(label: impl Into<String>, pattern: Regex) -> Self {
        Self {
            label: label.into(),
            pattern: Some(pattern),
            text: String::new(),
        }
    }

    /// # Errors
    /// Returns the regex error if `pattern` does not compile; the old
    /// pattern is kept.
    pub fn set_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.pattern = Some(compile(pattern)?);
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text as typed, without checking it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Captured group of `value`, when the pattern has exactly one group
    /// and matches. `None` without a pattern.
    pub fn apply(&self, value: &str) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        if pattern.captures_len() != 2 {
            return None;
        }
        let captures = pattern.captures(value)?;
        Some(captures.get(1).map_or("", |m| m.as_str()).to_owned())
    }

    /// Blank text is always valid, as is any text without a pattern.
    pub fn validate(&self) -> bool {
        if self.pattern.is_none() || !is_not_blank(&self.text) {
            return true;
        }
        self.apply(&self.text).is_some()
    }

    /// Stores the pattern's captured group from `value`, or `value` itself
    /// without a pattern.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidEntry` if the pattern rejects it.
    pub fn set_value(&mut self, value: &str) -> Result<(), ValidationError> {
        if self.pattern.is_none() {
            value.clone_into(&mut self.text);
            return Ok(());
        }
        self.text = self.apply(value).ok_or_else(|| self.invalid(value))?;
        Ok(())
    }

    fn invalid(&self, value: &str) -> ValidationError {
        tracing::debug!(label = %self.label, value, "entry rejected value");
        ValidationError::InvalidEntry {
            label: self.label.clone(),
            value: value.to_owned(),
        }
    }
}

/// Whole-number entry. Blank text reads as zero.
#[derive(Debug, Clone)]
pub struct IntegerEntry {
    inner: TextEntry,
}

impl IntegerEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: TextEntry::with_regex(label, INTEGER.clone()),
        }
    }

    /// # Errors
    /// Returns the regex error if `pattern` does not compile.
    pub fn with_pattern(label: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            inner: TextEntry::with_pattern(label, pattern)?,
        })
    }

    pub fn text(&self) -> &str {
        self.inner.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.inner.set_text(text);
    }

    /// Valid when blank, or when the captured group is all digits.
    pub fn validate(&self) -> bool {
        let text = self.inner.text();
        !is_not_blank(text) || self.holds_digits(text)
    }

    /// # Errors
    /// Returns `ValidationError::InvalidEntry` if the text does not hold
    /// an integer.
    pub fn value(&self) -> Result<i64, ValidationError> {
        let text = self.inner.text();
        if !is_not_blank(text) {
            return Ok(0);
        }
        self.inner
            .apply(text)
            .and_then(|group| group.parse().ok())
            .ok_or_else(|| self.inner.invalid(text))
    }

    /// Stores `value` as text.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidEntry` if the text would not
    /// validate, which is the case for every negative value.
    pub fn set_value(&mut self, value: i64) -> Result<(), ValidationError> {
        let text = value.to_string();
        if !self.holds_digits(&text) {
            return Err(self.inner.invalid(&text));
        }
        self.inner.text = text;
        Ok(())
    }

    /// Parses `raw` through the pattern and stores it in canonical form
    /// (`" 007 "` becomes `"7"`). Blank input stores `"0"`.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidEntry` if `raw` is not an integer.
    pub fn set_text_value(&mut self, raw: &str) -> Result<(), ValidationError> {
        if !is_not_blank(raw) {
            return self.set_value(0);
        }
        let value: i64 = self
            .inner
            .apply(raw)
            .and_then(|group| group.parse().ok())
            .ok_or_else(|| self.inner.invalid(raw))?;
        self.set_value(value)
    }

    fn holds_digits(&self, text: &str) -> bool {
        self.inner
            .apply(text)
            .is_some_and(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
    }
}

/// Decimal entry, shown with one fractional digit. Blank text reads as zero.
#[derive(Debug, Clone)]
pub struct DecimalEntry {
    inner: TextEntry,
}

impl DecimalEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: TextEntry::with_regex(label, DECIMAL.clone()),
        }
    }

    /// # Errors
    /// Returns the regex error if `pattern` does not compile.
    pub fn with_pattern(label: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            inner: TextEntry::with_pattern(label, pattern)?,
        })
    }

    pub fn text(&self) -> &str {
        self.inner.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.inner.set_text(text);
    }

    /// Valid when blank, or when the captured group reads as a number.
    pub fn validate(&self) -> bool {
        let text = self.inner.text();
        !is_not_blank(text) || self.number(text).is_some()
    }

    /// # Errors
    /// Returns `ValidationError::InvalidEntry` if the text does not hold a
    /// decimal number.
    pub fn value(&self) -> Result<f64, ValidationError> {
        let text = self.inner.text();
        if !is_not_blank(text) {
            return Ok(0.0);
        }
        self.parse(text)
    }

    /// Stores `value` rounded to one fractional digit.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidEntry` if the text would not
    /// validate: negative values, NaN and infinities under the default
    /// pattern.
    pub fn set_value(&mut self, value: f64) -> Result<(), ValidationError> {
        let text = format!("{value:.1}");
        if self.number(&text).is_none() {
            return Err(self.inner.invalid(&text));
        }
        self.inner.text = text;
        Ok(())
    }

    /// Parses `raw` through the pattern and stores it with one fractional
    /// digit. Blank input stores `"0.0"`.
    ///
    /// # Errors
    /// Returns `ValidationError::InvalidEntry` if `raw` is not a decimal.
    pub fn set_text_value(&mut self, raw: &str) -> Result<(), ValidationError> {
        let value = if is_not_blank(raw) { self.parse(raw)? } else { 0.0 };
        self.set_value(value)
    }

    fn parse(&self, text: &str) -> Result<f64, ValidationError> {
        self.number(text).ok_or_else(|| self.inner.invalid(text))
    }

    fn number(&self, text: &str) -> Option<f64> {
        self.inner.apply(text).and_then(|group| group.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("12"));
        assert!(is_numeric(" 12.5 "));
        assert!(!is_numeric(""));
        assert!(!is_numeric("   "));
        assert!(!is_numeric("12a"));
        assert!(!is_numeric("1 2"));
        assert!(!is_numeric("-3"));
    }

    #[test]
    fn test_is_not_blank() {
        assert!(is_not_blank("x"));
        assert!(!is_not_blank(""));
        assert!(!is_not_blank(" \t"));
    }

    #[test]
    fn test_text_without_pattern() {
        let mut entry = TextEntry::new("Name");
        entry.set_text("anything at all");
        assert!(entry.validate());
        entry.set_value("Ada").unwrap();
        assert_eq!(entry.text(), "Ada");
        assert_eq!(entry.apply("Ada"), None);
    }

    #[test]
    fn test_text_with_pattern() {
        let mut entry = TextEntry::with_pattern("Code", r"\s*([A-Z]{3})\s*").unwrap();
        assert_eq!(entry.label(), "Code");
        entry.set_text(" ABC ");
        assert!(entry.validate());
        entry.set_text("AB");
        assert!(!entry.validate());
        entry.set_text("  ");
        assert!(entry.validate());

        entry.set_value("  XYZ").unwrap();
        assert_eq!(entry.text(), "XYZ");

        let err = entry.set_value("xyz").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidEntry {
                label: "Code".into(),
                value: "xyz".into()
            }
        );
        assert_eq!(entry.text(), "XYZ");
    }

    #[test]
    fn test_pattern_must_match_whole_text() {
        let entry = TextEntry::with_pattern("Code", r"([A-Z]{3})").unwrap();
        assert_eq!(entry.apply("ABCD"), None);
        assert_eq!(entry.apply("ABC"), Some("ABC".into()));
    }

    #[test]
    fn test_pattern_needs_one_group() {
        let entry = TextEntry::with_pattern("Pair", r"(\d)-(\d)").unwrap();
        assert_eq!(entry.apply("1-2"), None);
        let entry = TextEntry::with_pattern("None", r"\d+").unwrap();
        assert_eq!(entry.apply("12"), None);
    }

    #[test]
    fn test_bad_pattern() {
        assert!(TextEntry::with_pattern("Bad", "(").is_err());
        let mut entry = TextEntry::with_pattern("Ok", r"(\d+)").unwrap();
        assert!(entry.set_pattern("[").is_err());
        assert_eq!(entry.apply("42"), Some("42".into()));
    }

    #[test]
    fn test_integer_entry() {
        let mut entry = IntegerEntry::new("Count");
        assert!(entry.validate());
        assert_eq!(entry.value().unwrap(), 0);

        entry.set_text(" 42 ");
        assert!(entry.validate());
        assert_eq!(entry.value().unwrap(), 42);

        entry.set_text("12abc");
        assert!(!entry.validate());
        assert!(matches!(
            entry.value(),
            Err(ValidationError::InvalidEntry { .. })
        ));

        entry.set_value(315).unwrap();
        assert_eq!(entry.text(), "315");
        assert!(entry.validate());
        assert_eq!(entry.value().unwrap(), 315);
    }

    #[test]
    fn test_integer_set_value_rejects_negative() {
        let mut entry = IntegerEntry::new("Count");
        entry.set_value(9).unwrap();
        assert!(matches!(
            entry.set_value(-5),
            Err(ValidationError::InvalidEntry { ref value, .. }) if value == "-5"
        ));
        assert_eq!(entry.text(), "9");
        assert_eq!(entry.value().unwrap(), 9);
    }

    #[test]
    fn test_integer_set_text_value() {
        let mut entry = IntegerEntry::new("Count");
        entry.set_text_value(" 007 ").unwrap();
        assert_eq!(entry.text(), "7");
        entry.set_text_value("").unwrap();
        assert_eq!(entry.text(), "0");
        assert!(entry.set_text_value("seven").is_err());
    }

    #[test]
    fn test_decimal_entry() {
        let mut entry = DecimalEntry::new("Weight");
        assert_eq!(entry.value().unwrap(), 0.0);

        entry.set_text("12.75");
        assert!(entry.validate());
        assert!((entry.value().unwrap() - 12.75).abs() < f64::EPSILON);

        entry.set_text(".5");
        assert!(!entry.validate());

        entry.set_text("1..2");
        assert!(!entry.validate());
        assert!(entry.value().is_err());

        entry.set_text("3.");
        assert!(entry.validate());
        assert!((entry.value().unwrap() - 3.0).abs() < f64::EPSILON);

        entry.set_value(7.26).unwrap();
        assert_eq!(entry.text(), "7.3");
        assert!(entry.validate());
        assert!((entry.value().unwrap() - 7.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decimal_set_value_rejects_unrepresentable() {
        let mut entry = DecimalEntry::new("Weight");
        entry.set_value(2.5).unwrap();
        assert!(entry.set_value(-1.5).is_err());
        assert!(entry.set_value(f64::NAN).is_err());
        assert!(entry.set_value(f64::INFINITY).is_err());
        assert_eq!(entry.text(), "2.5");
        assert!((entry.value().unwrap() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decimal_set_text_value() {
        let mut entry = DecimalEntry::new("Weight");
        entry.set_text_value(" 8 ").unwrap();
        assert_eq!(entry.text(), "8.0");
        entry.set_text_value("").unwrap();
        assert_eq!(entry.text(), "0.0");
        let err = entry.set_text_value("heavy").unwrap_err();
        assert_eq!(err.to_string(), "\"heavy\" is not a valid Weight");
    }
}
