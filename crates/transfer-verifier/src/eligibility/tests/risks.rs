use std::collections::BTreeSet;

use super::common::*;
use crate::eligibility::matching::{igetc_status, match_required_courses};
use crate::eligibility::risks::identify_risks;
use crate::eligibility::{
    IgetcStatus, MajorRequirementStatus, RiskKind, Severity, ASSIST_IGETC_URL, ASSIST_URL,
};

fn no_missing() -> MajorRequirementStatus {
    MajorRequirementStatus::default()
}

#[test]
fn gpa_below_minimum_is_high_severity() {
    let requirements = cs_requirements();
    let risks = identify_risks(&requirements, 2.5, 70.0, &no_missing(), &IgetcStatus::new());

    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0].kind, RiskKind::Gpa);
    assert_eq!(risks[0].severity, Severity::High);
    assert_eq!(
        risks[0].message,
        "GPA (2.5) is below minimum requirement (3.0)"
    );
    assert_eq!(risks[0].source, requirements.source_url);
}

#[test]
fn gpa_just_above_minimum_is_medium_severity() {
    let requirements = cs_requirements();
    let risks = identify_risks(&requirements, 3.1, 70.0, &no_missing(), &IgetcStatus::new());

    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0].severity, Severity::Medium);
    assert_eq!(
        risks[0].message,
        "GPA (3.1) meets minimum but may not be competitive"
    );
}

#[test]
fn gpa_at_competitive_margin_is_not_a_risk() {
    let requirements = cs_requirements();
    let risks = identify_risks(&requirements, 3.3, 70.0, &no_missing(), &IgetcStatus::new());
    assert!(risks.is_empty());
}

#[test]
fn at_most_one_gpa_risk_is_reported() {
    let requirements = cs_requirements();
    for gpa in [0.0, 1.5, 2.99, 3.0, 3.2, 3.3, 4.0] {
        let risks = identify_risks(&requirements, gpa, 70.0, &no_missing(), &IgetcStatus::new());
        let gpa_risks = risks.iter().filter(|r| r.kind == RiskKind::Gpa).count();
        assert!(gpa_risks <= 1, "gpa {gpa} produced {gpa_risks} GPA risks");
    }
}

#[test]
fn unit_shortfall_and_cap_messages() {
    let requirements = cs_requirements();

    let short = identify_risks(&requirements, 3.5, 8.0, &no_missing(), &IgetcStatus::new());
    assert_eq!(short[0].kind, RiskKind::Units);
    assert_eq!(short[0].severity, Severity::High);
    assert_eq!(short[0].message, "Need 60 units minimum, have 8");

    let over = identify_risks(&requirements, 3.5, 95.5, &no_missing(), &IgetcStatus::new());
    assert_eq!(over[0].severity, Severity::Medium);
    assert_eq!(over[0].message, "Unit count (95.5) exceeds 90 cap");
}

#[test]
fn unit_window_bounds_are_inclusive() {
    let requirements = cs_requirements();
    for units in [60.0, 90.0] {
        let risks = identify_risks(&requirements, 3.5, units, &no_missing(), &IgetcStatus::new());
        assert!(risks.is_empty(), "{units} units should not be a risk");
    }
}

#[test]
fn risks_follow_fixed_category_order() {
    let requirements = math_requirements();
    let major_status = MajorRequirementStatus::from_matches(match_required_courses(
        &[course("MATH1A", 4.0, "C")],
        &requirements,
    ));
    let satisfied: BTreeSet<String> = ["2".to_string()].into_iter().collect();
    let areas = igetc_status(&requirements, &satisfied);

    let risks = identify_risks(&requirements, 2.0, 4.0, &major_status, &areas);
    let kinds: Vec<RiskKind> = risks.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            RiskKind::Gpa,
            RiskKind::Units,
            RiskKind::MajorPrep,
            RiskKind::Igetc
        ]
    );

    assert_eq!(risks[2].message, "Missing 2 required major prep course(s)");
    assert_eq!(risks[2].source, ASSIST_URL);
    assert_eq!(risks[3].message, "IGETC areas incomplete: 1A, 5A");
    assert_eq!(risks[3].severity, Severity::Medium);
    assert_eq!(risks[3].source, ASSIST_IGETC_URL);
}

#[test]
fn optional_areas_never_raise_a_risk() {
    let requirements = math_requirements();
    let satisfied: BTreeSet<String> = ["1A", "2", "5A"].iter().map(|a| a.to_string()).collect();
    let areas = igetc_status(&requirements, &satisfied);
    assert!(!areas["6"].completed);

    let risks = identify_risks(&requirements, 3.5, 70.0, &no_missing(), &areas);
    assert!(risks.is_empty());
}
