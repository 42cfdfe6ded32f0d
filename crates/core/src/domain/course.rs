use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Grade assigned to a course until a result is entered. Unscored courses
/// contribute zero points so they never inflate the average.
pub const DEFAULT_GRADE: &str = "F";

/// Credit units assigned to a freshly created course.
pub const DEFAULT_UNITS: u32 = 2;

/// Lower bound for course units. Decrementing at the floor is a no-op.
pub const MIN_UNITS: u32 = 1;

/// A single course entry: stable 1-based index, letter grade as entered,
/// and its credit-unit weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub index: u32,
    pub grade: String,
    pub units: u32,
}

impl Course {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            grade: DEFAULT_GRADE.to_string(),
            units: DEFAULT_UNITS,
        }
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {} ({} units)", self.index, self.grade, self.units)
    }
}

/// Direction for a single-step unit adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitAdjust {
    Increment,
    Decrement,
}

/// The ordered collection of courses. Indices are exactly 1..=len with no
/// gaps; the sheet is rebuilt wholesale whenever the course count changes.
///
/// Every mutator is a pure transformation: it borrows the current sheet and
/// returns a new snapshot. The caller owns the "current" sheet and threads it
/// through each command, which keeps this type testable as plain functions
/// over (sheet, command) pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSheet {
    pub courses: Vec<Course>,
}

impl CourseSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet of `count` default courses indexed 1..=count. The
    /// count shares the index type, so no length can ever wrap.
    pub fn with_course_count(count: u32) -> Self {
        let courses = (1..=count).map(Course::new).collect();
        Self { courses }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn course(&self, index: u32) -> Option<&Course> {
        self.courses.iter().find(|c| c.index == index)
    }

    pub fn total_units(&self) -> u64 {
        self.courses.iter().map(|c| c.units as u64).sum()
    }

    /// New sheet with course `index`'s grade replaced; everything else is
    /// untouched. The raw symbol is stored as entered - the scale decides
    /// what it is worth at evaluation time.
    pub fn with_grade(&self, index: u32, grade: &str) -> Result<Self> {
        self.with_course(index, |c| c.grade = grade.to_string())
    }

    /// New sheet with course `index`'s units set directly. Values below the
    /// floor are rejected and the record keeps its previous units.
    pub fn with_units(&self, index: u32, units: u32) -> Result<Self> {
        if units < MIN_UNITS {
            return Err(CoreError::InvalidUnits {
                given: units as i64,
            });
        }
        self.with_course(index, |c| c.units = units)
    }

    /// New sheet with course `index`'s units stepped up or down. Increment
    /// is unbounded; decrement at the floor leaves the record unchanged.
    pub fn with_units_adjusted(&self, index: u32, direction: UnitAdjust) -> Result<Self> {
        self.with_course(index, |c| match direction {
            UnitAdjust::Increment => c.units += 1,
            UnitAdjust::Decrement => {
                if c.units > MIN_UNITS {
                    c.units -= 1;
                }
            }
        })
    }

    fn with_course<F>(&self, index: u32, mutate: F) -> Result<Self>
    where
        F: FnOnce(&mut Course),
    {
        let mut next = self.clone();
        match next.courses.iter_mut().find(|c| c.index == index) {
            Some(course) => {
                mutate(course);
                Ok(next)
            }
            None => Err(CoreError::CourseNotFound { index }),
        }
    }
}
