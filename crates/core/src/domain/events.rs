/// Domain events emitted when commands are applied
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The sheet was rebuilt with a new course count
    SheetRebuilt { count: usize },

    /// A course's grade was replaced
    GradeSet { index: u32, grade: String },

    /// A course's units changed (stepped or set directly)
    UnitsSet { index: u32, units: u32 },

    /// The weighted average was computed over the current sheet
    AverageComputed { value: f64 },

    /// An input was rejected; the previous sheet snapshot is retained
    InputRejected { msg: String },

    /// User requested to quit the application
    QuitRequested,
}
