use std::collections::BTreeMap;
use std::sync::Arc;

use crate::eligibility::{CompletedCourse, EligibilityEngine};
use crate::reference::{
    EquivalencyEntry, IgetcArea, MajorRequirementSet, ReferenceCatalog, ReferenceDocument,
    RequiredCourse,
};

pub(super) const COLLEGE: &str = "De Anza College";
pub(super) const TARGET: &str = "UCSC";

pub(super) fn course(code: &str, units: f64, grade: &str) -> CompletedCourse {
    CompletedCourse::new(code, units, grade, "Fall 2024")
}

pub(super) fn required(name: &str, codes: &[&str]) -> RequiredCourse {
    RequiredCourse {
        name: name.to_string(),
        equivalent_codes: codes.iter().map(|code| code.to_string()).collect(),
    }
}

fn area(name: &str, required: bool) -> IgetcArea {
    IgetcArea {
        name: name.to_string(),
        required,
    }
}

fn equivalency(areas: &[&str]) -> EquivalencyEntry {
    EquivalencyEntry {
        uc_course: None,
        igetc_areas: areas.iter().map(|area| area.to_string()).collect(),
        source_url: None,
    }
}

/// Single-requirement major used by the walkthrough scenario.
pub(super) fn cs_requirements() -> MajorRequirementSet {
    MajorRequirementSet {
        required_courses: vec![required("CS101", &["CS101", "COMPSCI101"])],
        min_gpa: 3.0,
        min_units: 60.0,
        max_units: 90.0,
        source_url: "https://admissions.example.edu/cs".to_string(),
        ..MajorRequirementSet::default()
    }
}

pub(super) fn math_requirements() -> MajorRequirementSet {
    let mut igetc_areas = BTreeMap::new();
    igetc_areas.insert("1A".to_string(), area("English Composition", true));
    igetc_areas.insert("2".to_string(), area("Mathematical Concepts", true));
    igetc_areas.insert("5A".to_string(), area("Physical Science", true));
    igetc_areas.insert("6".to_string(), area("Language Other Than English", false));

    MajorRequirementSet {
        required_courses: vec![
            required("Calculus I", &["MATH1A", "MATH1AH"]),
            required("Calculus II", &["MATH1B"]),
            required("Physics", &["PHYS4A", "PHYS2A"]),
        ],
        igetc_areas,
        min_gpa: 2.5,
        min_units: 60.0,
        max_units: 90.0,
        notes: vec!["Complete calculus before transfer.".to_string()],
        source_url: "https://admissions.example.edu/math".to_string(),
    }
}

pub(super) fn catalog() -> ReferenceCatalog {
    let mut document = ReferenceDocument::default();
    document.majors.insert("CS".to_string(), cs_requirements());
    document
        .majors
        .insert("Mathematics".to_string(), math_requirements());

    let mut de_anza = BTreeMap::new();
    de_anza.insert("EWRT1A".to_string(), equivalency(&["1A"]));
    de_anza.insert("math1a".to_string(), equivalency(&["2"]));
    de_anza.insert("PHYS4A".to_string(), equivalency(&["5A", "5C"]));
    de_anza.insert("SPAN1".to_string(), equivalency(&["6"]));
    document
        .equivalencies
        .insert(COLLEGE.to_string(), de_anza);

    let mut foothill = BTreeMap::new();
    foothill.insert("ENGL1A".to_string(), equivalency(&["1A"]));
    document
        .equivalencies
        .insert("Foothill College".to_string(), foothill);

    ReferenceCatalog::from_document(document).expect("fixture catalog is valid")
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(Arc::new(catalog()))
}

/// Sixty graded units at a B average that complete every math requirement.
pub(super) fn complete_math_transcript() -> Vec<CompletedCourse> {
    let mut courses = vec![
        course("MATH1A", 5.0, "B"),
        course("MATH1B", 5.0, "B"),
        course("PHYS4A", 5.0, "B"),
        course("EWRT1A", 5.0, "B"),
    ];
    for index in 0..8 {
        courses.push(course(&format!("ELEC{index}"), 5.0, "B"));
    }
    courses
}
