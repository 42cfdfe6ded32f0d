use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use gradegrip_core::app::Command;
use gradegrip_core::UnitAdjust;
use tracing::info;

use super::model::{InputMode, TuiModel};

/// Upper bound the entry form accepts for the course count. The sheet
/// itself takes any non-negative count; this only bounds what can be typed.
pub const MAX_COURSE_ENTRY: i64 = 20;

/// Messages that can be sent from the TUI to the main loop
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// Apply a command to the sheet
    Command(Command),

    /// No action needed
    None,
}

/// The Update function - handles user input and updates the model.
/// This is the Update component of the MVU pattern.
pub struct TuiUpdate;

impl TuiUpdate {
    /// Handle a key press and update the model accordingly.
    /// Returns a TuiMessage for the main loop to act on.
    pub fn handle_key(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<TuiMessage> {
        // Help overlay swallows everything until dismissed
        if model.ui_state.show_help {
            model.ui_state.show_help = false;
            return Ok(TuiMessage::None);
        }

        // Text entry gets the keys first
        if model.input.mode != InputMode::None {
            return Self::handle_input_keys(model, key);
        }

        // Outside text entry, any key press dismisses a displayed error
        if !model.errors.is_empty() {
            model.clear_errors();
        }

        if let Some(msg) = Self::handle_global_keys(model, key, modifiers)? {
            return Ok(msg);
        }

        Self::handle_sheet_keys(model, key)
    }

    /// Handle global keys that work in any mode
    fn handle_global_keys(
        model: &mut TuiModel,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<Option<TuiMessage>> {
        match key {
            KeyCode::Char('q') if modifiers.is_empty() => {
                Ok(Some(TuiMessage::Command(Command::Quit)))
            }

            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Ok(Some(TuiMessage::Command(Command::Quit)))
            }

            KeyCode::Esc => Ok(Some(TuiMessage::Command(Command::Quit))),

            KeyCode::Char('?') if modifiers.is_empty() => {
                model.ui_state.show_help = true;
                Ok(Some(TuiMessage::None))
            }

            _ => Ok(None),
        }
    }

    /// Handle keys when in text input mode
    fn handle_input_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        match key {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                model.input.text.push(c);
                Ok(TuiMessage::None)
            }

            KeyCode::Backspace => {
                model.input.text.pop();
                Ok(TuiMessage::None)
            }

            KeyCode::Enter => {
                let text = model.input.text.clone();
                let input_mode = model.input.mode.clone();

                // Clear input state before processing
                model.input.mode = InputMode::None;
                model.input.text.clear();

                Self::process_input_submission(model, input_mode, text)
            }

            KeyCode::Esc => {
                // Cancel input
                model.input.mode = InputMode::None;
                model.input.text.clear();
                Ok(TuiMessage::None)
            }

            _ => Ok(TuiMessage::None),
        }
    }

    /// Process submitted input text
    fn process_input_submission(
        model: &mut TuiModel,
        input_mode: InputMode,
        text: String,
    ) -> Result<TuiMessage> {
        match input_mode {
            InputMode::None => Ok(TuiMessage::None),

            InputMode::CourseCount => {
                let count = match text.trim().parse::<i64>() {
                    Ok(n) => n,
                    Err(_) => {
                        model.add_error(format!("Not a number: {text}"));
                        return Ok(TuiMessage::None);
                    }
                };

                if count > MAX_COURSE_ENTRY {
                    model.add_error(format!(
                        "Course count must be between 0 and {MAX_COURSE_ENTRY}"
                    ));
                    return Ok(TuiMessage::None);
                }

                info!("Course count entered: {count}");
                Ok(TuiMessage::Command(Command::SetCourseCount { count }))
            }

            InputMode::Units => {
                let units = match text.trim().parse::<i64>() {
                    Ok(n) => n,
                    Err(_) => {
                        model.add_error(format!("Not a number: {text}"));
                        return Ok(TuiMessage::None);
                    }
                };

                match model.selected_index() {
                    Some(index) => Ok(TuiMessage::Command(Command::SetUnits { index, units })),
                    None => Ok(TuiMessage::None),
                }
            }
        }
    }

    /// Handle keys on the course sheet
    fn handle_sheet_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        match key {
            // Navigation
            KeyCode::Up | KeyCode::Char('k') => {
                model.move_cursor_up();
                Ok(TuiMessage::None)
            }

            KeyCode::Down | KeyCode::Char('j') => {
                model.move_cursor_down();
                Ok(TuiMessage::None)
            }

            // Grade entry: a single letter grades the selected course.
            // Both cases are accepted; the scale normalizes on lookup.
            KeyCode::Char(c @ ('a'..='f' | 'A'..='F')) => match model.selected_index() {
                Some(index) => Ok(TuiMessage::Command(Command::SetGrade {
                    index,
                    grade: c.to_string(),
                })),
                None => Ok(TuiMessage::None),
            },

            // Unit stepping
            KeyCode::Char('+') | KeyCode::Right | KeyCode::Char('l') => {
                match model.selected_index() {
                    Some(index) => Ok(TuiMessage::Command(Command::AdjustUnits {
                        index,
                        direction: UnitAdjust::Increment,
                    })),
                    None => Ok(TuiMessage::None),
                }
            }

            KeyCode::Char('-') | KeyCode::Left | KeyCode::Char('h') => {
                match model.selected_index() {
                    Some(index) => Ok(TuiMessage::Command(Command::AdjustUnits {
                        index,
                        direction: UnitAdjust::Decrement,
                    })),
                    None => Ok(TuiMessage::None),
                }
            }

            // Direct unit entry for the selected course
            KeyCode::Char('u') => {
                if model.selected_index().is_some() {
                    model.input.mode = InputMode::Units;
                    model.input.prompt = "Enter units:".to_string();
                }
                Ok(TuiMessage::None)
            }

            // Course count entry
            KeyCode::Char('n') => {
                model.input.mode = InputMode::CourseCount;
                model.input.prompt = "No of courses:".to_string();
                Ok(TuiMessage::None)
            }

            // Compute the average
            KeyCode::Char('g') | KeyCode::Enter => {
                Ok(TuiMessage::Command(Command::ComputeAverage))
            }

            _ => Ok(TuiMessage::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradegrip_core::{CourseSheet, GradeScale};

    fn model_with(count: u32) -> TuiModel {
        TuiModel::new(
            CourseSheet::with_course_count(count),
            GradeScale::default(),
            2,
        )
    }

    fn press(model: &mut TuiModel, key: KeyCode) -> TuiMessage {
        TuiUpdate::handle_key(model, key, KeyModifiers::empty()).unwrap()
    }

    #[test]
    fn test_grade_key_targets_selected_course() {
        let mut model = model_with(3);
        model.ui_state.cursor_position = 1;

        let msg = press(&mut model, KeyCode::Char('a'));
        match msg {
            TuiMessage::Command(Command::SetGrade { index, grade }) => {
                assert_eq!(index, 2);
                assert_eq!(grade, "a");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_grade_key_on_empty_sheet_is_inert() {
        let mut model = model_with(0);
        assert_eq!(press(&mut model, KeyCode::Char('a')), TuiMessage::None);
    }

    #[test]
    fn test_plus_and_minus_step_units() {
        let mut model = model_with(1);

        match press(&mut model, KeyCode::Char('+')) {
            TuiMessage::Command(Command::AdjustUnits { index, direction }) => {
                assert_eq!(index, 1);
                assert_eq!(direction, UnitAdjust::Increment);
            }
            other => panic!("unexpected message: {other:?}"),
        }

        match press(&mut model, KeyCode::Char('-')) {
            TuiMessage::Command(Command::AdjustUnits { direction, .. }) => {
                assert_eq!(direction, UnitAdjust::Decrement);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_count_entry_flow() {
        let mut model = model_with(0);

        press(&mut model, KeyCode::Char('n'));
        assert_eq!(model.input.mode, InputMode::CourseCount);

        for c in "12".chars() {
            press(&mut model, KeyCode::Char(c));
        }
        let msg = press(&mut model, KeyCode::Enter);

        assert_eq!(model.input.mode, InputMode::None);
        assert_eq!(
            msg,
            TuiMessage::Command(Command::SetCourseCount { count: 12 })
        );
    }

    #[test]
    fn test_count_entry_rejects_out_of_range() {
        let mut model = model_with(0);

        press(&mut model, KeyCode::Char('n'));
        for c in "25".chars() {
            press(&mut model, KeyCode::Char(c));
        }
        let msg = press(&mut model, KeyCode::Enter);

        assert_eq!(msg, TuiMessage::None);
        assert_eq!(model.errors.len(), 1);
    }

    #[test]
    fn test_count_entry_rejects_garbage() {
        let mut model = model_with(0);

        press(&mut model, KeyCode::Char('n'));
        // Non-digits are filtered at entry, so submit the empty buffer
        press(&mut model, KeyCode::Char('x'));
        let msg = press(&mut model, KeyCode::Enter);

        assert_eq!(msg, TuiMessage::None);
        assert!(!model.errors.is_empty());
    }

    #[test]
    fn test_negative_count_reaches_core_validation() {
        let mut model = model_with(0);

        press(&mut model, KeyCode::Char('n'));
        for c in "-2".chars() {
            press(&mut model, KeyCode::Char(c));
        }
        let msg = press(&mut model, KeyCode::Enter);

        // The UI forwards it; the core rejects it with InvalidCount
        assert_eq!(
            msg,
            TuiMessage::Command(Command::SetCourseCount { count: -2 })
        );
    }

    #[test]
    fn test_escape_cancels_input() {
        let mut model = model_with(1);

        press(&mut model, KeyCode::Char('u'));
        assert_eq!(model.input.mode, InputMode::Units);
        press(&mut model, KeyCode::Char('4'));

        press(&mut model, KeyCode::Esc);
        assert_eq!(model.input.mode, InputMode::None);
        assert!(model.input.text.is_empty());
    }

    #[test]
    fn test_unit_entry_submits_set_units() {
        let mut model = model_with(2);
        model.ui_state.cursor_position = 1;

        press(&mut model, KeyCode::Char('u'));
        press(&mut model, KeyCode::Char('4'));
        let msg = press(&mut model, KeyCode::Enter);

        assert_eq!(
            msg,
            TuiMessage::Command(Command::SetUnits { index: 2, units: 4 })
        );
    }

    #[test]
    fn test_compute_and_quit_keys() {
        let mut model = model_with(1);
        assert_eq!(
            press(&mut model, KeyCode::Char('g')),
            TuiMessage::Command(Command::ComputeAverage)
        );
        assert_eq!(
            press(&mut model, KeyCode::Char('q')),
            TuiMessage::Command(Command::Quit)
        );
    }

    #[test]
    fn test_key_press_dismisses_displayed_error() {
        let mut model = model_with(2);
        model.add_error("Invalid units: 0 (units must be at least 1)".to_string());

        press(&mut model, KeyCode::Down);
        assert!(model.errors.is_empty());
    }

    #[test]
    fn test_error_kept_while_typing_input() {
        let mut model = model_with(1);

        press(&mut model, KeyCode::Char('u'));
        model.add_error("Not a number: x".to_string());

        // Keys inside text entry leave the error alone
        press(&mut model, KeyCode::Char('4'));
        assert_eq!(model.errors.len(), 1);

        // Leaving input mode and pressing again dismisses it
        press(&mut model, KeyCode::Esc);
        press(&mut model, KeyCode::Char('k'));
        assert!(model.errors.is_empty());
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut model = model_with(1);

        press(&mut model, KeyCode::Char('?'));
        assert!(model.ui_state.show_help);

        // Next key only dismisses help
        assert_eq!(press(&mut model, KeyCode::Char('a')), TuiMessage::None);
        assert!(!model.ui_state.show_help);
    }
}
