use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_GPA: f64 = 2.5;
pub const DEFAULT_MIN_UNITS: f64 = 60.0;
pub const DEFAULT_MAX_UNITS: f64 = 90.0;

/// Upper-cased, trimmed form used for every course-code comparison.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// One major-prep requirement and the community-college codes that satisfy it.
///
/// Codes are kept in declared order; the first one present on a transcript is
/// reported as the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredCourse {
    pub name: String,
    #[serde(alias = "acceptable_courses")]
    pub equivalent_codes: Vec<String>,
}

/// A general-education area a major asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgetcArea {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// Transfer requirements for a single major at the target campus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MajorRequirementSet {
    #[serde(default)]
    pub required_courses: Vec<RequiredCourse>,
    #[serde(default)]
    pub igetc_areas: BTreeMap<String, IgetcArea>,
    #[serde(default = "default_min_gpa")]
    pub min_gpa: f64,
    #[serde(default = "default_min_units")]
    pub min_units: f64,
    #[serde(default = "default_max_units")]
    pub max_units: f64,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub source_url: String,
}

fn default_min_gpa() -> f64 {
    DEFAULT_MIN_GPA
}

fn default_min_units() -> f64 {
    DEFAULT_MIN_UNITS
}

fn default_max_units() -> f64 {
    DEFAULT_MAX_UNITS
}

impl Default for MajorRequirementSet {
    fn default() -> Self {
        Self {
            required_courses: Vec::new(),
            igetc_areas: BTreeMap::new(),
            min_gpa: DEFAULT_MIN_GPA,
            min_units: DEFAULT_MIN_UNITS,
            max_units: DEFAULT_MAX_UNITS,
            notes: Vec::new(),
            source_url: String::new(),
        }
    }
}

impl MajorRequirementSet {
    pub fn gpa_ok(&self, gpa: f64) -> bool {
        gpa >= self.min_gpa
    }

    pub fn units_ok(&self, total_units: f64) -> bool {
        self.min_units <= total_units && total_units <= self.max_units
    }

    /// `"min-max"` as shown in result summaries.
    pub fn units_range(&self) -> String {
        format!("{}-{}", self.min_units, self.max_units)
    }
}

/// How one community-college course articulates at the target campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalencyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uc_course: Option<String>,
    #[serde(default, alias = "igetc")]
    pub igetc_areas: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl EquivalencyEntry {
    /// Fold a repeated row into this one: areas are unioned, scalar fields
    /// take the newer value when it is present.
    pub fn merge(&mut self, other: EquivalencyEntry) {
        self.igetc_areas.extend(other.igetc_areas);
        if other.uc_course.is_some() {
            self.uc_course = other.uc_course;
        }
        if other.source_url.is_some() {
            self.source_url = other.source_url;
        }
    }
}

/// Equivalency table for one college, keyed by normalized course code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeEquivalencies {
    entries: BTreeMap<String, EquivalencyEntry>,
}

impl CollegeEquivalencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or merge an entry. Areas from repeated codes are unioned.
    pub fn insert(&mut self, course_code: &str, entry: EquivalencyEntry) {
        let key = normalize_code(course_code);
        match self.entries.get_mut(&key) {
            Some(existing) => existing.merge(entry),
            None => {
                self.entries.insert(key, entry);
            }
        }
    }

    pub fn lookup(&self, course_code: &str) -> Option<&EquivalencyEntry> {
        self.entries.get(&normalize_code(course_code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
