use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::eligibility::{calculate_total_units, round2, CompletedCourse, VerificationResult};
use crate::explainer::{Explanation, ResultExplainer};

/// Identifier wrapper for stored verification runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationId(pub String);

/// Emails are stored and compared trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Student registration details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub email: String,
    pub name: String,
    pub major: String,
    pub community_college: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_uc: Option<String>,
}

impl StudentProfile {
    /// Campus to evaluate against, falling back to `default` when the student
    /// did not choose one.
    pub fn target_institution<'a>(&'a self, default: &'a str) -> &'a str {
        self.target_uc
            .as_deref()
            .map(str::trim)
            .filter(|target| !target.is_empty())
            .unwrap_or(default)
    }
}

/// Body of a transcript upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptUpload {
    pub email: String,
    pub courses: Vec<CompletedCourse>,
}

/// The transcript currently on file for a student. Uploads replace it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub email: String,
    pub courses: Vec<CompletedCourse>,
    pub uploaded_at: DateTime<Utc>,
}

/// One persisted engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub id: VerificationId,
    pub email: String,
    pub result: VerificationResult,
    pub created_at: DateTime<Utc>,
}

impl VerificationRecord {
    pub fn view(&self) -> VerificationView {
        VerificationView {
            id: self.id.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            eligibility_status: self.result.eligibility_status.label(),
            result: self.result.clone(),
            explanation: ResultExplainer::explain(&self.result),
        }
    }
}

/// API representation of a stored verification with its explanation.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationView {
    pub id: VerificationId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub eligibility_status: &'static str,
    pub result: VerificationResult,
    pub explanation: Explanation,
}

/// Transcript summary returned after an upload or lookup.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptView {
    pub email: String,
    pub course_count: usize,
    pub total_units: f64,
    pub uploaded_at: DateTime<Utc>,
    pub courses: Vec<CompletedCourse>,
}

impl TranscriptRecord {
    pub fn view(&self) -> TranscriptView {
        TranscriptView {
            email: self.email.clone(),
            course_count: self.courses.len(),
            total_units: round2(calculate_total_units(&self.courses)),
            uploaded_at: self.uploaded_at,
            courses: self.courses.clone(),
        }
    }
}
