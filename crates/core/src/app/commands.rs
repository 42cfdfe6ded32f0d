use crate::app::aggregate::grade_point_average;
use crate::domain::course::{CourseSheet, UnitAdjust};
use crate::domain::events::Event;
use crate::domain::scale::GradeScale;
use crate::error::{CoreError, Result};

/// Commands that can be applied to a course sheet
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Rebuild the sheet with `count` default courses, discarding edits
    SetCourseCount { count: i64 },

    /// Replace the grade of one course
    SetGrade { index: u32, grade: String },

    /// Step one course's units up or down
    AdjustUnits { index: u32, direction: UnitAdjust },

    /// Set one course's units directly
    SetUnits { index: u32, units: i64 },

    /// Compute the weighted average over the current sheet
    ComputeAverage,

    /// Quit the application
    Quit,
}

/// Result of applying a command: the next sheet snapshot plus the domain
/// event describing what happened.
#[derive(Debug, Clone)]
pub struct Applied {
    pub sheet: CourseSheet,
    pub event: Event,
}

/// Apply one command to a sheet snapshot.
///
/// Pure: the input sheet is never mutated. On error the caller keeps its
/// previous snapshot untouched, so a rejected input can never leave the
/// sheet partially updated.
pub fn apply(sheet: &CourseSheet, scale: &GradeScale, command: &Command) -> Result<Applied> {
    match command {
        Command::SetCourseCount { count } => {
            // Counts that don't fit the index type are rejected outright,
            // never truncated into a sheet of the wrong length
            let count = u32::try_from(*count)
                .map_err(|_| CoreError::InvalidCount { given: *count })?;
            let next = CourseSheet::with_course_count(count);
            Ok(Applied {
                event: Event::SheetRebuilt { count: next.len() },
                sheet: next,
            })
        }

        Command::SetGrade { index, grade } => {
            let next = sheet.with_grade(*index, grade)?;
            Ok(Applied {
                sheet: next,
                event: Event::GradeSet {
                    index: *index,
                    grade: grade.clone(),
                },
            })
        }

        Command::AdjustUnits { index, direction } => {
            let next = sheet.with_units_adjusted(*index, *direction)?;
            let units = next.course(*index).map(|c| c.units).unwrap_or(0);
            Ok(Applied {
                sheet: next,
                event: Event::UnitsSet {
                    index: *index,
                    units,
                },
            })
        }

        Command::SetUnits { index, units } => {
            let value =
                u32::try_from(*units).map_err(|_| CoreError::InvalidUnits { given: *units })?;
            let next = sheet.with_units(*index, value)?;
            Ok(Applied {
                sheet: next,
                event: Event::UnitsSet {
                    index: *index,
                    units: value,
                },
            })
        }

        Command::ComputeAverage => Ok(Applied {
            sheet: sheet.clone(),
            event: Event::AverageComputed {
                value: grade_point_average(sheet, scale),
            },
        }),

        Command::Quit => Ok(Applied {
            sheet: sheet.clone(),
            event: Event::QuitRequested,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CourseSheet, GradeScale) {
        (CourseSheet::with_course_count(3), GradeScale::default())
    }

    #[test]
    fn test_set_course_count_rebuilds() {
        let (sheet, scale) = setup();
        let applied = apply(&sheet, &scale, &Command::SetCourseCount { count: 5 }).unwrap();
        assert_eq!(applied.sheet.len(), 5);
        assert_eq!(applied.event, Event::SheetRebuilt { count: 5 });
    }

    #[test]
    fn test_oversized_count_rejected_not_truncated() {
        let (sheet, scale) = setup();
        // 2^32 would wrap to 0 courses if cast instead of validated
        let too_big = 1i64 << 32;
        let err = apply(
            &sheet,
            &scale,
            &Command::SetCourseCount { count: too_big },
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidCount { given } if given == too_big));
        assert_eq!(sheet.len(), 3, "caller's snapshot untouched");
    }

    #[test]
    fn test_negative_count_rejected_sheet_retained() {
        let (sheet, scale) = setup();
        let err = apply(&sheet, &scale, &Command::SetCourseCount { count: -1 }).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCount { given: -1 }));
        // Caller's snapshot is untouched
        assert_eq!(sheet.len(), 3);
    }

    #[test]
    fn test_set_grade_emits_event() {
        let (sheet, scale) = setup();
        let applied = apply(
            &sheet,
            &scale,
            &Command::SetGrade {
                index: 2,
                grade: "a".to_string(),
            },
        )
        .unwrap();
        assert_eq!(applied.sheet.course(2).unwrap().grade, "a");
        assert_eq!(
            applied.event,
            Event::GradeSet {
                index: 2,
                grade: "a".to_string()
            }
        );
    }

    #[test]
    fn test_set_grade_unknown_index_surfaces() {
        let (sheet, scale) = setup();
        let err = apply(
            &sheet,
            &scale,
            &Command::SetGrade {
                index: 7,
                grade: "A".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::CourseNotFound { index: 7 }));
    }

    #[test]
    fn test_adjust_units_reports_new_value() {
        let (sheet, scale) = setup();
        let applied = apply(
            &sheet,
            &scale,
            &Command::AdjustUnits {
                index: 1,
                direction: UnitAdjust::Increment,
            },
        )
        .unwrap();
        assert_eq!(applied.event, Event::UnitsSet { index: 1, units: 3 });
    }

    #[test]
    fn test_decrement_at_floor_reports_floor() {
        let (sheet, scale) = setup();
        let floored = sheet.with_units(1, 1).unwrap();
        let applied = apply(
            &floored,
            &scale,
            &Command::AdjustUnits {
                index: 1,
                direction: UnitAdjust::Decrement,
            },
        )
        .unwrap();
        assert_eq!(applied.sheet.course(1).unwrap().units, 1);
        assert_eq!(applied.event, Event::UnitsSet { index: 1, units: 1 });
    }

    #[test]
    fn test_set_units_rejects_non_positive() {
        let (sheet, scale) = setup();
        for bad in [0i64, -3] {
            let err = apply(
                &sheet,
                &scale,
                &Command::SetUnits {
                    index: 1,
                    units: bad,
                },
            )
            .unwrap_err();
            assert!(matches!(err, CoreError::InvalidUnits { .. }), "{bad}");
        }
    }

    #[test]
    fn test_compute_average_leaves_sheet_unchanged() {
        let (sheet, scale) = setup();
        let graded = sheet.with_grade(1, "A").unwrap();
        let applied = apply(&graded, &scale, &Command::ComputeAverage).unwrap();
        assert_eq!(applied.sheet, graded);
        match applied.event {
            Event::AverageComputed { value } => {
                // earned = 5*2 = 10, possible = 5*6 = 30
                assert!((value - 10.0 / 30.0 * 5.0).abs() < 1e-12);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_quit_emits_quit_requested() {
        let (sheet, scale) = setup();
        let applied = apply(&sheet, &scale, &Command::Quit).unwrap();
        assert_eq!(applied.event, Event::QuitRequested);
    }
}
