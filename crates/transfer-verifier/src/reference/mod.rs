//! Major requirements and course-equivalency tables consumed by the engine.
//!
//! A [`ReferenceCatalog`] is validated once when it is built and is read-only
//! afterwards. Lookups return `None` for unknown majors and colleges so the
//! engine can treat those as distinct outcomes rather than silently defaulting.

pub mod domain;
mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use domain::{
    normalize_code, CollegeEquivalencies, EquivalencyEntry, IgetcArea, MajorRequirementSet,
    RequiredCourse,
};
pub use loader::ReferenceLoader;

/// Read side of the reference data, as seen by the eligibility engine.
pub trait ReferenceDataProvider: Send + Sync {
    fn major_requirements(&self, major: &str) -> Option<&MajorRequirementSet>;
    fn equivalencies(&self, college: &str) -> Option<&CollegeEquivalencies>;
    fn majors(&self) -> Vec<String>;
    fn colleges(&self) -> Vec<String>;
}

/// Serialized shape of a reference-data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceDocument {
    #[serde(default)]
    pub majors: BTreeMap<String, MajorRequirementSet>,
    #[serde(default)]
    pub equivalencies: BTreeMap<String, BTreeMap<String, EquivalencyEntry>>,
}

/// Data-quality failures found while loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid reference JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid equivalency CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("major '{major}' requirement '{requirement}' lists no acceptable courses")]
    EmptyAcceptableCodes { major: String, requirement: String },
    #[error("major '{major}' has min_units {min} above max_units {max}")]
    InvalidUnitRange { major: String, min: f64, max: f64 },
    #[error("major '{major}' has an invalid {field} threshold ({value})")]
    InvalidThreshold {
        major: String,
        field: &'static str,
        value: f64,
    },
    #[error("equivalency row {line} has an empty {field}")]
    IncompleteEquivalencyRow { line: u64, field: &'static str },
}

/// Validated, immutable reference data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCatalog {
    majors: BTreeMap<String, MajorRequirementSet>,
    colleges: BTreeMap<String, CollegeEquivalencies>,
}

impl ReferenceCatalog {
    pub fn from_document(document: ReferenceDocument) -> Result<Self, ReferenceDataError> {
        for (major, requirements) in &document.majors {
            validate_major(major, requirements)?;
        }

        let colleges = document
            .equivalencies
            .into_iter()
            .map(|(college, courses)| {
                let mut table = CollegeEquivalencies::new();
                for (code, entry) in courses {
                    table.insert(&code, entry);
                }
                (college, table)
            })
            .collect();

        Ok(Self {
            majors: document.majors,
            colleges,
        })
    }

    /// Demo dataset compiled into the crate.
    pub fn bundled() -> Result<Self, ReferenceDataError> {
        ReferenceLoader::bundled()?.build()
    }
}

impl ReferenceDataProvider for ReferenceCatalog {
    fn major_requirements(&self, major: &str) -> Option<&MajorRequirementSet> {
        self.majors.get(major)
    }

    fn equivalencies(&self, college: &str) -> Option<&CollegeEquivalencies> {
        self.colleges.get(college)
    }

    fn majors(&self) -> Vec<String> {
        self.majors.keys().cloned().collect()
    }

    fn colleges(&self) -> Vec<String> {
        self.colleges.keys().cloned().collect()
    }
}

fn validate_major(
    major: &str,
    requirements: &MajorRequirementSet,
) -> Result<(), ReferenceDataError> {
    for (field, value) in [
        ("min_gpa", requirements.min_gpa),
        ("min_units", requirements.min_units),
        ("max_units", requirements.max_units),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ReferenceDataError::InvalidThreshold {
                major: major.to_string(),
                field,
                value,
            });
        }
    }

    if requirements.min_units > requirements.max_units {
        return Err(ReferenceDataError::InvalidUnitRange {
            major: major.to_string(),
            min: requirements.min_units,
            max: requirements.max_units,
        });
    }

    if let Some(course) = requirements.required_courses.iter().find(|course| {
        course
            .equivalent_codes
            .iter()
            .all(|code| code.trim().is_empty())
    }) {
        return Err(ReferenceDataError::EmptyAcceptableCodes {
            major: major.to_string(),
            requirement: course.name.clone(),
        });
    }

    Ok(())
}
