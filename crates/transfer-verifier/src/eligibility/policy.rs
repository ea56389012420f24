use crate::reference::MajorRequirementSet;

use super::domain::EligibilityStatus;

/// First matching row wins:
///
/// | major known | gpa ok | units ok | no missing prep | status            |
/// |-------------|--------|----------|-----------------|-------------------|
/// | no          | -      | -        | -               | `Unknown`         |
/// | yes         | yes    | yes      | yes             | `LikelyEligible`  |
/// | yes         | yes    | yes      | no              | `Conditional`     |
/// | yes         | otherwise                           | `NotYetEligible`  |
pub fn determine_eligibility(
    requirements: Option<&MajorRequirementSet>,
    gpa: f64,
    total_units: f64,
    missing_count: usize,
) -> EligibilityStatus {
    let Some(requirements) = requirements else {
        return EligibilityStatus::Unknown;
    };

    let gpa_ok = requirements.gpa_ok(gpa);
    let units_ok = requirements.units_ok(total_units);
    let major_prep_ok = missing_count == 0;

    match (gpa_ok, units_ok, major_prep_ok) {
        (true, true, true) => EligibilityStatus::LikelyEligible,
        (true, true, false) => EligibilityStatus::Conditional,
        _ => EligibilityStatus::NotYetEligible,
    }
}
