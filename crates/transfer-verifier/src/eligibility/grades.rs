use super::domain::{CompletedCourse, EligibilityError, LetterGrade};

/// Round half away from zero to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit-weighted GPA over courses with a recognised letter grade.
///
/// Ungraded rows are excluded from both sides of the ratio; with no graded
/// units the GPA is `0.0`.
pub fn calculate_gpa(courses: &[CompletedCourse]) -> f64 {
    let (points, graded_units) = courses
        .iter()
        .filter_map(|course| {
            LetterGrade::parse(&course.grade)
                .map(|grade| (grade.points() * course.units, course.units))
        })
        .fold((0.0, 0.0), |(points, units), (p, u)| (points + p, units + u));

    if graded_units > 0.0 {
        round2(points / graded_units)
    } else {
        0.0
    }
}

/// Units across every row, graded or not.
///
/// The sum is not rounded: thresholds compare against the exact total and
/// only reported figures go through [`round2`].
pub fn calculate_total_units(courses: &[CompletedCourse]) -> f64 {
    courses.iter().map(|course| course.units).sum()
}

/// Reject unit values that would silently corrupt GPA and unit math.
pub fn validate_courses(courses: &[CompletedCourse]) -> Result<(), EligibilityError> {
    for course in courses {
        if !course.units.is_finite() {
            return Err(EligibilityError::NonNumericUnits {
                course_code: course.course_code.clone(),
            });
        }
        if course.units < 0.0 {
            return Err(EligibilityError::NegativeUnits {
                course_code: course.course_code.clone(),
                units: course.units,
            });
        }
    }
    Ok(())
}
