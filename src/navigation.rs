//! Keystroke-driven focus movement across the sub-fields of one entry.
//!
//! A presentation layer translates its own key events into [`Command`]s and
//! applies the returned [`Focus`]. Each command maps to one transition
//! function in [`transition`]; toolkit key names never reach this module.

use crate::{
    Assembler, DateAssembler, EntryConfig, Field, KeystrokeLimits, Meridiem, Step, TimeAssembler,
    TimeValue, ValidationError, prelude::*,
};

/// Abstract navigation/adjustment command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Command {
    /// A digit was typed into the focused field
    #[display(fmt = "digit")]
    Digit,
    #[display(fmt = "next")]
    Next,
    #[display(fmt = "previous")]
    Previous,
    #[display(fmt = "increment")]
    Increment,
    #[display(fmt = "decrement")]
    Decrement,
    #[display(fmt = "backspace")]
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

/// Where focus should go after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// Focus stays on the current field
    Stay,
    /// Focus moves to another field of the same group
    Field(Field),
    /// Focus leaves the group
    Leave(Direction),
}

/// Tracks the focused sub-field of a group and the digits typed into it
/// since it gained focus.
#[derive(Debug, Clone)]
struct FocusTracker {
    fields: &'static [Field],
    index: usize,
    keystrokes_since_focus: u8,
    limits: KeystrokeLimits,
}

impl FocusTracker {
    /// `fields` must not be empty.
    const fn new(fields: &'static [Field], limits: KeystrokeLimits) -> Self {
        debug_assert!(!fields.is_empty());
        Self {
            fields,
            index: 0,
            keystrokes_since_focus: 0,
            limits,
        }
    }

    fn focused(&self) -> Field {
        self.fields[self.index]
    }

    const fn keystrokes_since_focus(&self) -> u8 {
        self.keystrokes_since_focus
    }

    /// Moves focus to `field` and resets the keystroke count. Returns
    /// `false` if the field is not part of this group.
    fn focus(&mut self, field: Field) -> bool {
        match self.fields.iter().position(|f| *f == field) {
            Some(index) => {
                self.enter(index);
                true
            }
            None => false,
        }
    }

    const fn enter(&mut self, index: usize) {
        self.index = index;
        self.keystrokes_since_focus = 0;
    }

    fn advance(&mut self) -> Focus {
        if self.index + 1 < self.fields.len() {
            self.enter(self.index + 1);
            Focus::Field(self.focused())
        } else {
            self.keystrokes_since_focus = 0;
            Focus::Leave(Direction::Forward)
        }
    }

    fn retreat(&mut self) -> Focus {
        if self.index > 0 {
            self.enter(self.index - 1);
            Focus::Field(self.focused())
        } else {
            self.keystrokes_since_focus = 0;
            Focus::Leave(Direction::Backward)
        }
    }

    /// Counts a digit; reaching the field's limit acts as `Next`.
    fn digit(&mut self) -> Focus {
        let Some(limit) = self.limits.for_field(self.focused()) else {
            return Focus::Stay;
        };
        self.keystrokes_since_focus = self.keystrokes_since_focus.saturating_add(1);
        if self.keystrokes_since_focus >= limit {
            self.advance()
        } else {
            Focus::Stay
        }
    }

    const fn backspace(&mut self) -> Focus {
        self.keystrokes_since_focus = self.keystrokes_since_focus.saturating_sub(1);
        Focus::Stay
    }
}

/// Result of handling one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<V> {
    pub focus: Focus,
    /// Set when the command ran a composite validation
    pub outcome: Option<Result<V, ValidationError>>,
    /// True only for the first failure after a success (or since the group
    /// was created), so a caller can report an error once per run
    pub first_failure: bool,
}

impl<V> Response<V> {
    const fn moved(focus: Focus) -> Self {
        Self {
            focus,
            outcome: None,
            first_failure: false,
        }
    }
}

type Transition<A> = fn(&mut EntryGroup<A>) -> Focus;

/// Dispatch table: one pure transition per command.
fn transition<A: Assembler>(command: Command) -> Transition<A> {
    match command {
        Command::Digit => |group| group.tracker.digit(),
        Command::Next => |group| group.tracker.advance(),
        Command::Previous => |group| group.tracker.retreat(),
        Command::Increment => |group| group.spin(Step::Up),
        Command::Decrement => |group| group.spin(Step::Down),
        Command::Backspace => |group| group.tracker.backspace(),
    }
}

/// An assembler together with the focus state of its fields.
///
/// Leaving the group forward validates the composite; on failure focus is
/// sent back to the offending field. Leaving backward never validates.
#[derive(Debug, Clone)]
pub struct EntryGroup<A> {
    assembler: A,
    tracker: FocusTracker,
    failing: bool,
}

impl<A: Assembler> EntryGroup<A> {
    pub const fn new(assembler: A, limits: KeystrokeLimits) -> Self {
        Self {
            assembler,
            tracker: FocusTracker::new(A::FIELDS, limits),
            failing: false,
        }
    }

    pub const fn assembler(&self) -> &A {
        &self.assembler
    }

    /// Mutable access for setting sub-field text.
    pub const fn assembler_mut(&mut self) -> &mut A {
        &mut self.assembler
    }

    pub fn focused(&self) -> Field {
        self.tracker.focused()
    }

    pub const fn keystrokes_since_focus(&self) -> u8 {
        self.tracker.keystrokes_since_focus()
    }

    /// Reports that focus moved to `field` by other means (mouse, host
    /// toolkit). Returns `false` if the field is not part of this group.
    pub fn focus(&mut self, field: Field) -> bool {
        self.tracker.focus(field)
    }

    pub fn handle(&mut self, command: Command) -> Response<A::Value> {
        let focus = transition::<A>(command)(self);
        tracing::trace!(%command, ?focus, "entry command");
        match focus {
            Focus::Leave(Direction::Forward) => self.validate(),
            other => Response::moved(other),
        }
    }

    /// Validates the composite as focus leaves the group.
    pub fn validate(&mut self) -> Response<A::Value> {
        match self.assembler.validate_composite() {
            Ok(value) => {
                self.failing = false;
                Response {
                    focus: Focus::Leave(Direction::Forward),
                    outcome: Some(Ok(value)),
                    first_failure: false,
                }
            }
            Err(err) => {
                let first_failure = !self.failing;
                self.failing = true;
                let focus = match err.field() {
                    Some(field) if self.tracker.focus(field) => Focus::Field(field),
                    _ => Focus::Stay,
                };
                tracing::debug!(error = %err, first_failure, "entry group failed validation");
                Response {
                    focus,
                    outcome: Some(Err(err)),
                    first_failure,
                }
            }
        }
    }

    fn spin(&mut self, step: Step) -> Focus {
        self.assembler.step(self.tracker.focused(), step);
        Focus::Stay
    }
}

impl EntryGroup<DateAssembler> {
    pub fn date(config: &EntryConfig) -> Self {
        Self::new(DateAssembler::with_rules(config.date), config.keystrokes)
    }
}

impl EntryGroup<TimeAssembler> {
    pub fn time(config: &EntryConfig) -> Self {
        Self::new(TimeAssembler::new(), config.keystrokes)
    }

    /// Picks AM or PM and validates the time, as a meridiem choice ends
    /// time entry.
    pub fn select_meridiem(&mut self, meridiem: Meridiem) -> Response<TimeValue> {
        self.assembler.set_meridiem(meridiem);
        self.tracker.focus(Field::Meridiem);
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AssemblyState;

    fn date_group() -> EntryGroup<DateAssembler> {
        EntryGroup::date(&EntryConfig::default())
    }

    fn time_group() -> EntryGroup<TimeAssembler> {
        EntryGroup::time(&EntryConfig::default())
    }

    #[test]
    fn test_two_digits_advance_month_to_day() {
        let mut group = date_group();
        assert_eq!(group.focused(), Field::Month);

        group.assembler_mut().set_month("1").unwrap();
        assert_eq!(group.handle(Command::Digit).focus, Focus::Stay);
        assert_eq!(group.keystrokes_since_focus(), 1);

        group.assembler_mut().set_month("12").unwrap();
        assert_eq!(group.handle(Command::Digit).focus, Focus::Field(Field::Day));
        assert_eq!(group.focused(), Field::Day);
        assert_eq!(group.keystrokes_since_focus(), 0);
    }

    #[test]
    fn test_four_year_digits_leave_and_validate() {
        let mut group = date_group();
        group.assembler_mut().set_month("7").unwrap();
        group.assembler_mut().set_day("4").unwrap();
        group.focus(Field::Year);
        group.assembler_mut().set_year("1776").unwrap();

        for _ in 0..3 {
            assert_eq!(group.handle(Command::Digit).focus, Focus::Stay);
        }
        let response = group.handle(Command::Digit);
        assert_eq!(response.focus, Focus::Leave(Direction::Forward));
        let value = response.outcome.unwrap().unwrap();
        assert_eq!(value.to_string(), "07/04/1776");
        assert!(!response.first_failure);
    }

    #[test]
    fn test_backspace_undoes_keystroke() {
        let mut group = date_group();
        group.handle(Command::Digit);
        group.handle(Command::Backspace);
        assert_eq!(group.keystrokes_since_focus(), 0);
        group.handle(Command::Backspace);
        assert_eq!(group.keystrokes_since_focus(), 0);
        assert_eq!(group.handle(Command::Digit).focus, Focus::Stay);
        assert_eq!(group.focused(), Field::Month);
    }

    #[test]
    fn test_previous_from_first_field_skips_validation() {
        let mut group = date_group();
        let response = group.handle(Command::Previous);
        assert_eq!(response.focus, Focus::Leave(Direction::Backward));
        assert_eq!(response.outcome, None);
        assert_eq!(group.assembler().state(), AssemblyState::Empty);
    }

    #[test]
    fn test_next_and_previous_walk_fields() {
        let mut group = date_group();
        assert_eq!(group.handle(Command::Next).focus, Focus::Field(Field::Day));
        assert_eq!(group.handle(Command::Next).focus, Focus::Field(Field::Year));
        assert_eq!(
            group.handle(Command::Previous).focus,
            Focus::Field(Field::Day)
        );
    }

    #[test]
    fn test_failure_refocuses_offending_field() {
        let mut group = date_group();
        group.assembler_mut().set_month("4").unwrap();
        group.assembler_mut().set_day("31").unwrap();
        group.assembler_mut().set_year("2024").unwrap();
        group.focus(Field::Year);

        let response = group.handle(Command::Next);
        assert_eq!(response.focus, Focus::Field(Field::Day));
        assert!(matches!(
            response.outcome,
            Some(Err(ValidationError::InvalidDay(_)))
        ));
        assert!(response.first_failure);
        assert_eq!(group.focused(), Field::Day);
        assert_eq!(group.assembler().day(), None);

        // Repeated failure is not flagged again
        group.focus(Field::Year);
        let response = group.handle(Command::Next);
        assert_eq!(
            response.outcome,
            Some(Err(ValidationError::IncompleteValue { field: Field::Day }))
        );
        assert!(!response.first_failure);

        // Success resets the run
        group.assembler_mut().set_day("30").unwrap();
        assert!(matches!(group.validate().outcome, Some(Ok(_))));
        group.assembler_mut().set_day("31").unwrap();
        assert!(group.validate().first_failure);
    }

    #[test]
    fn test_increment_decrement_focused_field() {
        let mut group = date_group();
        group.assembler_mut().set_month("12").unwrap();
        group.handle(Command::Increment);
        assert_eq!(group.assembler().month_text(), "01");
        group.handle(Command::Decrement);
        assert_eq!(group.assembler().month_text(), "12");
    }

    #[test]
    fn test_time_group_flow() {
        let mut group = time_group();
        group.assembler_mut().set_hour("09").unwrap();
        group.handle(Command::Digit);
        assert_eq!(group.handle(Command::Digit).focus, Focus::Field(Field::Minute));

        group.assembler_mut().set_minute("59").unwrap();
        group.handle(Command::Increment);
        assert_eq!(group.assembler().minute_text(), "00");
        group.handle(Command::Digit);
        assert_eq!(
            group.handle(Command::Digit).focus,
            Focus::Field(Field::Meridiem)
        );

        // Digits do nothing on the meridiem
        assert_eq!(group.handle(Command::Digit).focus, Focus::Stay);
        assert_eq!(group.keystrokes_since_focus(), 0);

        let response = group.select_meridiem(Meridiem::Pm);
        assert_eq!(response.focus, Focus::Leave(Direction::Forward));
        let value = response.outcome.unwrap().unwrap();
        assert_eq!(value.hour24(), 21);
        assert_eq!(value.minute(), 0);
    }

    #[test]
    fn test_time_group_incomplete_refocuses_hour() {
        let mut group = time_group();
        group.focus(Field::Meridiem);
        let response = group.handle(Command::Next);
        assert_eq!(response.focus, Focus::Field(Field::Hour));
        assert_eq!(
            response.outcome,
            Some(Err(ValidationError::IncompleteValue { field: Field::Hour }))
        );
        assert!(response.first_failure);
    }

    #[test]
    fn test_focus_outside_group() {
        let mut group = time_group();
        assert!(!group.focus(Field::Month));
        assert_eq!(group.focused(), Field::Hour);
    }

    #[test]
    fn test_group_focus_follows_assembler_fields() {
        let mut group = date_group();
        for field in DateAssembler::FIELDS {
            assert!(group.focus(*field));
            assert_eq!(group.focused(), *field);
            assert_eq!(group.keystrokes_since_focus(), 0);
        }
        assert_eq!(group.handle(Command::Previous).focus, Focus::Field(Field::Day));
    }

    #[test]
    fn test_custom_keystroke_limits() {
        let config = EntryConfig {
            keystrokes: KeystrokeLimits {
                year: 2,
                month: 0,
                ..KeystrokeLimits::default()
            },
            ..EntryConfig::default()
        };
        let mut group = EntryGroup::date(&config);
        // Month auto-advance disabled
        for _ in 0..5 {
            assert_eq!(group.handle(Command::Digit).focus, Focus::Stay);
        }
        assert_eq!(group.keystrokes_since_focus(), 0);

        group.focus(Field::Year);
        group.handle(Command::Digit);
        let response = group.handle(Command::Digit);
        assert_eq!(
            response.outcome,
            Some(Err(ValidationError::IncompleteValue { field: Field::Month }))
        );
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::Increment.to_string(), "increment");
    }
}
