//! Transfer eligibility engine.
//!
//! [`EligibilityEngine::evaluate`] is the single entry point: it validates the
//! transcript, computes GPA and units, matches major preparation and GE areas,
//! synthesizes risks and classifies the outcome. It performs no I/O and holds
//! no mutable state, so one engine can be shared across threads behind an
//! `Arc`.

pub mod domain;
mod grades;
mod matching;
mod policy;
mod risks;

#[cfg(test)]
mod tests;

pub use domain::{
    CompletedCourse, CompletedRequirement, CourseMatch, EligibilityError, EligibilityStatus,
    IgetcAreaStatus, IgetcStatus, LetterGrade, MajorRequirementStatus, MissingRequirement,
    RiskItem, RiskKind, Severity, VerificationResult, VerificationSummary, ASSIST_IGETC_URL,
    ASSIST_URL, DEFAULT_TARGET_INSTITUTION, DISCLAIMER,
};
pub use grades::{calculate_gpa, calculate_total_units, validate_courses};
pub use risks::COMPETITIVE_GPA_MARGIN;
pub(crate) use grades::round2;
pub(crate) use risks::format_gpa;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reference::{MajorRequirementSet, ReferenceCatalog, ReferenceDataProvider};

/// Request body accepted by the stateless evaluation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub courses: Vec<CompletedCourse>,
    pub college: String,
    pub major: String,
    #[serde(default, alias = "target_institution")]
    pub target_uc: Option<String>,
}

impl EvaluationRequest {
    /// The requested campus, or `fallback` when the field is absent or blank.
    pub fn target_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.target_uc.as_deref().map(str::trim) {
            Some(target) if !target.is_empty() => target,
            _ => fallback,
        }
    }
}

/// Stateless evaluator bound to one snapshot of reference data.
#[derive(Debug)]
pub struct EligibilityEngine<P = ReferenceCatalog> {
    reference: Arc<P>,
}

impl<P> Clone for EligibilityEngine<P> {
    fn clone(&self) -> Self {
        Self {
            reference: Arc::clone(&self.reference),
        }
    }
}

impl<P> EligibilityEngine<P>
where
    P: ReferenceDataProvider,
{
    pub fn new(reference: Arc<P>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &P {
        &self.reference
    }

    /// Completed and missing major-prep requirements. Unknown majors yield
    /// two empty lists.
    pub fn check_major_requirements(
        &self,
        courses: &[CompletedCourse],
        major: &str,
    ) -> MajorRequirementStatus {
        match self.reference.major_requirements(major) {
            Some(requirements) => MajorRequirementStatus::from_matches(
                matching::match_required_courses(courses, requirements),
            ),
            None => MajorRequirementStatus::default(),
        }
    }

    /// GE-area status for the major's areas at `college`. Unknown majors yield
    /// an empty map; unknown colleges satisfy no areas.
    pub fn check_igetc_areas(
        &self,
        courses: &[CompletedCourse],
        college: &str,
        major: &str,
    ) -> IgetcStatus {
        let Some(requirements) = self.reference.major_requirements(major) else {
            return IgetcStatus::new();
        };

        let satisfied = matching::satisfied_areas(courses, self.reference.equivalencies(college));
        matching::igetc_status(requirements, &satisfied)
    }

    pub fn evaluate_request(
        &self,
        request: &EvaluationRequest,
    ) -> Result<VerificationResult, EligibilityError> {
        self.evaluate(
            &request.courses,
            &request.college,
            &request.major,
            request.target_or(DEFAULT_TARGET_INSTITUTION),
        )
    }

    /// Run the full verification for one transcript.
    pub fn evaluate(
        &self,
        courses: &[CompletedCourse],
        college: &str,
        major: &str,
        target_institution: &str,
    ) -> Result<VerificationResult, EligibilityError> {
        validate_courses(courses)?;

        let requirements = self.reference.major_requirements(major);

        let gpa = calculate_gpa(courses);
        let total_units = calculate_total_units(courses);
        let major_status = self.check_major_requirements(courses, major);
        let igetc_status = self.check_igetc_areas(courses, college, major);
        let risks = match requirements {
            Some(requirements) => risks::identify_risks(
                requirements,
                gpa,
                total_units,
                &major_status,
                &igetc_status,
            ),
            None => Vec::new(),
        };
        let status = policy::determine_eligibility(
            requirements,
            gpa,
            total_units,
            major_status.missing.len(),
        );

        debug!(
            major,
            college,
            gpa,
            total_units,
            status = status.label(),
            risks = risks.len(),
            "evaluated transcript"
        );

        let fallback = MajorRequirementSet::default();
        let thresholds = requirements.unwrap_or(&fallback);

        let mut sources = BTreeMap::new();
        sources.insert(
            source_key(target_institution),
            thresholds.source_url.clone(),
        );
        sources.insert("assist_org".to_string(), ASSIST_URL.to_string());

        Ok(VerificationResult {
            eligibility_status: status,
            eligibility_message: status.message().to_string(),
            summary: VerificationSummary {
                total_units: round2(total_units),
                gpa,
                min_gpa_required: thresholds.min_gpa,
                units_range: thresholds.units_range(),
                major: major.to_string(),
                target_uc: target_institution.to_string(),
            },
            major_requirements: major_status,
            igetc_status,
            risks,
            notes: thresholds.notes.clone(),
            sources,
            disclaimer: DISCLAIMER.to_string(),
        })
    }
}

/// `"UCSC"` becomes `"ucsc_transfer"`.
fn source_key(target_institution: &str) -> String {
    let slug: String = target_institution
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if slug.is_empty() {
        "campus_transfer".to_string()
    } else {
        format!("{slug}_transfer")
    }
}
