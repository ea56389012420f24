use std::collections::{BTreeSet, HashSet};

use crate::reference::{normalize_code, CollegeEquivalencies, MajorRequirementSet};

use super::domain::{CompletedCourse, CourseMatch, IgetcAreaStatus, IgetcStatus};

fn completed_codes(courses: &[CompletedCourse]) -> HashSet<String> {
    courses
        .iter()
        .map(|course| normalize_code(&course.course_code))
        .collect()
}

/// Match every required course in declared order.
///
/// The first acceptable code found on the transcript wins; later codes are
/// not consulted even if they are also present.
pub fn match_required_courses(
    courses: &[CompletedCourse],
    requirements: &MajorRequirementSet,
) -> Vec<CourseMatch> {
    let completed = completed_codes(courses);

    requirements
        .required_courses
        .iter()
        .map(|required| {
            let matched_course = required
                .equivalent_codes
                .iter()
                .find(|code| completed.contains(&normalize_code(code)))
                .cloned();

            CourseMatch {
                requirement: required.name.clone(),
                satisfied: matched_course.is_some(),
                matched_course,
                acceptable_courses: required.equivalent_codes.clone(),
            }
        })
        .collect()
}

/// GE areas satisfied by the transcript at `college`.
///
/// A missing equivalency table means nothing is satisfied, not an error.
pub fn satisfied_areas(
    courses: &[CompletedCourse],
    equivalencies: Option<&CollegeEquivalencies>,
) -> BTreeSet<String> {
    let Some(table) = equivalencies else {
        return BTreeSet::new();
    };

    completed_codes(courses)
        .iter()
        .filter_map(|code| table.lookup(code))
        .flat_map(|entry| entry.igetc_areas.iter().cloned())
        .collect()
}

/// Status for every GE area the major lists. Completion is plain membership
/// in the satisfied set; there is no per-area course count.
pub fn igetc_status(
    requirements: &MajorRequirementSet,
    satisfied: &BTreeSet<String>,
) -> IgetcStatus {
    requirements
        .igetc_areas
        .iter()
        .map(|(code, area)| {
            (
                code.clone(),
                IgetcAreaStatus {
                    name: area.name.clone(),
                    required: area.required,
                    completed: satisfied.contains(code),
                },
            )
        })
        .collect()
}
