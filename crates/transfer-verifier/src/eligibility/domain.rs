use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Campus assumed when a request does not name one.
pub const DEFAULT_TARGET_INSTITUTION: &str = "UCSC";

pub const ASSIST_URL: &str = "https://assist.org";
pub const ASSIST_IGETC_URL: &str = "https://assist.org/transfer/igetc";

pub const DISCLAIMER: &str = "This is a verification tool using official sources. \
It is NOT official advice. Always confirm with an academic counselor.";

/// One transcript row as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedCourse {
    pub course_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    pub units: f64,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub semester: String,
}

impl CompletedCourse {
    pub fn new(
        course_code: impl Into<String>,
        units: f64,
        grade: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            course_code: course_code.into(),
            course_name: None,
            units,
            grade: grade.into(),
            semester: semester.into(),
        }
    }
}

/// Letter grades that carry grade points. Anything else (`W`, `P`, `IP`, …)
/// is ungraded for GPA purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterGrade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
}

impl LetterGrade {
    pub fn parse(raw: &str) -> Option<Self> {
        let grade = match raw.trim().to_ascii_uppercase().as_str() {
            "A+" => Self::APlus,
            "A" => Self::A,
            "A-" => Self::AMinus,
            "B+" => Self::BPlus,
            "B" => Self::B,
            "B-" => Self::BMinus,
            "C+" => Self::CPlus,
            "C" => Self::C,
            "C-" => Self::CMinus,
            "D+" => Self::DPlus,
            "D" => Self::D,
            "D-" => Self::DMinus,
            "F" => Self::F,
            _ => return None,
        };
        Some(grade)
    }

    pub const fn points(self) -> f64 {
        match self {
            Self::APlus | Self::A => 4.0,
            Self::AMinus => 3.7,
            Self::BPlus => 3.3,
            Self::B => 3.0,
            Self::BMinus => 2.7,
            Self::CPlus => 2.3,
            Self::C => 2.0,
            Self::CMinus => 1.7,
            Self::DPlus => 1.3,
            Self::D => 1.0,
            Self::DMinus => 0.7,
            Self::F => 0.0,
        }
    }
}

/// Outcome of matching one required course against a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseMatch {
    pub requirement: String,
    pub satisfied: bool,
    pub matched_course: Option<String>,
    pub acceptable_courses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedRequirement {
    pub requirement: String,
    pub matched_course: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRequirement {
    pub requirement: String,
    pub acceptable_courses: Vec<String>,
}

/// Major-prep requirements split by completion, in reference order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorRequirementStatus {
    pub completed: Vec<CompletedRequirement>,
    pub missing: Vec<MissingRequirement>,
}

impl MajorRequirementStatus {
    pub fn from_matches(matches: Vec<CourseMatch>) -> Self {
        let mut status = Self::default();
        for course_match in matches {
            match course_match.matched_course {
                Some(matched_course) if course_match.satisfied => {
                    status.completed.push(CompletedRequirement {
                        requirement: course_match.requirement,
                        matched_course,
                    })
                }
                _ => status.missing.push(MissingRequirement {
                    requirement: course_match.requirement,
                    acceptable_courses: course_match.acceptable_courses,
                }),
            }
        }
        status
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgetcAreaStatus {
    pub name: String,
    pub required: bool,
    pub completed: bool,
}

pub type IgetcStatus = BTreeMap<String, IgetcAreaStatus>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskKind {
    #[serde(rename = "GPA")]
    Gpa,
    #[serde(rename = "Units")]
    Units,
    #[serde(rename = "Major Prep")]
    MajorPrep,
    #[serde(rename = "IGETC")]
    Igetc,
}

impl RiskKind {
    pub const fn label(self) -> &'static str {
        match self {
            RiskKind::Gpa => "GPA",
            RiskKind::Units => "Units",
            RiskKind::MajorPrep => "Major Prep",
            RiskKind::Igetc => "IGETC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub severity: Severity,
    pub message: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    LikelyEligible,
    Conditional,
    NotYetEligible,
    Unknown,
}

impl EligibilityStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EligibilityStatus::LikelyEligible => "likely_eligible",
            EligibilityStatus::Conditional => "conditional",
            EligibilityStatus::NotYetEligible => "not_yet_eligible",
            EligibilityStatus::Unknown => "unknown",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            EligibilityStatus::LikelyEligible => {
                "You appear to meet the basic transfer requirements. \
                 Verify with an advisor before applying."
            }
            EligibilityStatus::Conditional => {
                "You meet GPA and unit requirements but are missing coursework. \
                 Complete missing courses before applying."
            }
            EligibilityStatus::NotYetEligible => {
                "You do not yet meet transfer requirements. \
                 Review the issues below and work with an advisor."
            }
            EligibilityStatus::Unknown => "Major requirements not found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total_units: f64,
    pub gpa: f64,
    pub min_gpa_required: f64,
    pub units_range: String,
    pub major: String,
    pub target_uc: String,
}

/// Everything the engine concludes about one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub eligibility_status: EligibilityStatus,
    pub eligibility_message: String,
    pub summary: VerificationSummary,
    pub major_requirements: MajorRequirementStatus,
    pub igetc_status: IgetcStatus,
    pub risks: Vec<RiskItem>,
    pub notes: Vec<String>,
    pub sources: BTreeMap<String, String>,
    pub disclaimer: String,
}

/// Input rejected before any computation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EligibilityError {
    #[error("course '{course_code}' has negative units ({units})")]
    NegativeUnits { course_code: String, units: f64 },
    #[error("course '{course_code}' has non-numeric units")]
    NonNumericUnits { course_code: String },
}
