use crate::domain::course::CourseSheet;
use crate::domain::scale::GradeScale;

/// Weighted grade-point average over a sheet snapshot, full precision.
///
/// Each course contributes `points(grade) * units`; the denominator is the
/// obtainable ceiling `max_point * total_units`, and the ratio is projected
/// back onto the scale's 0..=max_point range. So an all-A sheet scores
/// exactly `max_point` whatever the unit spread, and [{A,3},{B,2},{F,1}]
/// scores 23/30 * 5 ≈ 3.83 on the default scale. The per-unit denominator
/// some calculators use is deliberately not supported.
///
/// Never fails: unrecognized grades score 0, and a sheet with zero total
/// weight (empty, in practice) averages exactly 0.0 rather than NaN.
/// Rounding for display is the caller's concern.
pub fn grade_point_average(sheet: &CourseSheet, scale: &GradeScale) -> f64 {
    let max_point = scale.max_point() as u64;
    let earned: u64 = sheet
        .courses
        .iter()
        .map(|c| scale.points(&c.grade) as u64 * c.units as u64)
        .sum();
    let possible = max_point * sheet.total_units();

    if possible == 0 {
        return 0.0;
    }

    earned as f64 / possible as f64 * max_point as f64
}
