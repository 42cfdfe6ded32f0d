use gradegrip_core::{Course, CourseSheet, Event, GradeScale};

/// The TUI Model - the complete UI state. The core's sheet snapshot lives
/// here next to UI-only state (cursor, input buffer, messages); commands
/// produce the next snapshot and the resulting event is applied back.
#[derive(Debug)]
pub struct TuiModel {
    /// Current course sheet snapshot
    pub sheet: CourseSheet,

    /// Grade scale in effect (from config)
    pub scale: GradeScale,

    /// Decimal places used when displaying the average
    pub decimal_places: usize,

    /// UI-specific state
    pub ui_state: UiState,

    /// Current text input state
    pub input: InputState,

    /// Last computed average, cleared when the sheet changes
    pub last_average: Option<f64>,

    /// Status messages to display
    pub messages: Vec<String>,

    /// Error messages to display
    pub errors: Vec<String>,

    /// Whether the application should quit
    pub should_quit: bool,
}

/// UI-specific state (cursor position, help overlay)
#[derive(Debug, Default)]
pub struct UiState {
    /// Cursor position in the course list (0-based row)
    pub cursor_position: usize,

    /// Whether help is shown
    pub show_help: bool,
}

/// Input state for text entry
#[derive(Debug, Default)]
pub struct InputState {
    /// Current input mode
    pub mode: InputMode,

    /// Current input text
    pub text: String,

    /// Input prompt text
    pub prompt: String,
}

/// Input modes for the different text entry scenarios
#[derive(Debug, Default, Clone, PartialEq)]
pub enum InputMode {
    #[default]
    None,

    /// Entering the number of courses offered
    CourseCount,

    /// Entering a direct unit value for the selected course
    Units,
}

impl TuiModel {
    pub fn new(sheet: CourseSheet, scale: GradeScale, decimal_places: usize) -> Self {
        Self {
            sheet,
            scale,
            decimal_places,
            ui_state: UiState::default(),
            input: InputState::default(),
            last_average: None,
            messages: Vec::new(),
            errors: Vec::new(),
            should_quit: false,
        }
    }

    /// The course under the cursor, if any.
    pub fn selected_course(&self) -> Option<&Course> {
        self.sheet.courses.get(self.ui_state.cursor_position)
    }

    /// The 1-based index of the course under the cursor.
    pub fn selected_index(&self) -> Option<u32> {
        self.selected_course().map(|c| c.index)
    }

    /// Replace the sheet snapshot and apply the event that produced it.
    pub fn apply(&mut self, sheet: CourseSheet, event: &Event) {
        self.sheet = sheet;
        self.apply_event(event);
        self.clamp_cursor();
    }

    /// Apply a domain event to the UI state.
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::SheetRebuilt { count } => {
                self.last_average = None;
                self.ui_state.cursor_position = 0;
                self.add_message(format!("You're offering {count} course(s)"));
            }

            Event::GradeSet { .. } | Event::UnitsSet { .. } => {
                // Any edit makes a previously shown average stale
                self.last_average = None;
            }

            Event::AverageComputed { value } => {
                self.last_average = Some(*value);
                let places = self.decimal_places;
                self.add_message(format!("Your CGPA is {value:.places$}"));
            }

            Event::InputRejected { msg } => {
                self.add_error(msg.clone());
            }

            Event::QuitRequested => {
                self.should_quit = true;
            }
        }
    }

    /// The average formatted for display; "0.00" (at the configured
    /// precision) when nothing has been computed yet.
    pub fn formatted_average(&self) -> String {
        let places = self.decimal_places;
        let value = self.last_average.unwrap_or(0.0);
        format!("{value:.places$}")
    }

    /// Whether the selected course's grade is outside the scale.
    pub fn selected_grade_unknown(&self) -> bool {
        self.selected_course()
            .map(|c| !self.scale.recognizes(&c.grade))
            .unwrap_or(false)
    }

    pub fn move_cursor_up(&mut self) {
        if self.ui_state.cursor_position > 0 {
            self.ui_state.cursor_position -= 1;
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.ui_state.cursor_position + 1 < self.sheet.len() {
            self.ui_state.cursor_position += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        if self.sheet.is_empty() {
            self.ui_state.cursor_position = 0;
        } else if self.ui_state.cursor_position >= self.sheet.len() {
            self.ui_state.cursor_position = self.sheet.len() - 1;
        }
    }

    /// Clear all error messages
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Add a status message
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
    }

    /// Add an error message
    pub fn add_error(&mut self, error: String) {
        self.errors.push(error);
    }
}
