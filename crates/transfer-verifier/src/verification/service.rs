use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::eligibility::{
    validate_courses, EligibilityEngine, EligibilityError, EligibilityStatus, EvaluationRequest,
    VerificationResult, DEFAULT_TARGET_INSTITUTION,
};
use crate::reference::{ReferenceCatalog, ReferenceDataProvider};

use super::domain::{
    normalize_email, StudentProfile, TranscriptRecord, TranscriptUpload, VerificationId,
    VerificationRecord,
};
use super::repository::{RepositoryError, VerificationRepository};

/// Service composing the record store and the eligibility engine.
pub struct TransferVerificationService<R, P = ReferenceCatalog> {
    repository: Arc<R>,
    engine: EligibilityEngine<P>,
    default_target: String,
}

static VERIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_verification_id() -> VerificationId {
    let id = VERIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    VerificationId(format!("ver-{id:06}"))
}

impl<R, P> TransferVerificationService<R, P>
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    pub fn new(repository: Arc<R>, reference: Arc<P>) -> Self {
        Self {
            repository,
            engine: EligibilityEngine::new(reference),
            default_target: DEFAULT_TARGET_INSTITUTION.to_string(),
        }
    }

    /// Campus used when neither the request nor the student names one.
    pub fn with_default_target(mut self, target: impl Into<String>) -> Self {
        self.default_target = target.into();
        self
    }

    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    /// Register or update a student. The email is the key.
    pub fn register_student(
        &self,
        mut profile: StudentProfile,
    ) -> Result<StudentProfile, VerificationServiceError> {
        profile.email = normalize_email(&profile.email);
        validate_profile(&profile)?;

        let stored = self.repository.upsert_student(profile)?;
        info!(email = %stored.email, major = %stored.major, "registered student");
        Ok(stored)
    }

    pub fn student(&self, email: &str) -> Result<StudentProfile, VerificationServiceError> {
        let email = normalize_email(email);
        self.repository
            .fetch_student(&email)?
            .ok_or(VerificationServiceError::UnknownStudent(email))
    }

    /// Replace the student's transcript after validating every row.
    pub fn upload_transcript(
        &self,
        upload: TranscriptUpload,
    ) -> Result<TranscriptRecord, VerificationServiceError> {
        let student = self.student(&upload.email)?;
        validate_courses(&upload.courses)?;

        let record = TranscriptRecord {
            email: student.email,
            courses: upload.courses,
            uploaded_at: Utc::now(),
        };
        self.repository.save_transcript(record.clone())?;
        info!(
            email = %record.email,
            courses = record.courses.len(),
            "stored transcript"
        );
        Ok(record)
    }

    pub fn transcript(&self, email: &str) -> Result<TranscriptRecord, VerificationServiceError> {
        let email = normalize_email(email);
        self.repository
            .fetch_transcript(&email)?
            .ok_or(VerificationServiceError::MissingTranscript(email))
    }

    /// Evaluate the stored transcript against the student's major and
    /// college, then persist the result.
    pub fn verify(&self, email: &str) -> Result<VerificationRecord, VerificationServiceError> {
        let student = self.student(email)?;
        let transcript = self.transcript(&student.email)?;
        let target = student.target_institution(&self.default_target);

        let result = self.engine.evaluate(
            &transcript.courses,
            &student.community_college,
            &student.major,
            target,
        )?;

        if result.eligibility_status == EligibilityStatus::Unknown {
            warn!(
                email = %student.email,
                major = %student.major,
                "no reference requirements for major"
            );
        }

        let record = VerificationRecord {
            id: next_verification_id(),
            email: student.email,
            result,
            created_at: Utc::now(),
        };
        let stored = self.repository.insert_result(record)?;
        info!(
            id = %stored.id.0,
            email = %stored.email,
            status = stored.result.eligibility_status.label(),
            "stored verification"
        );
        Ok(stored)
    }

    pub fn latest_result(
        &self,
        email: &str,
    ) -> Result<VerificationRecord, VerificationServiceError> {
        let email = normalize_email(email);
        self.repository
            .latest_result(&email)?
            .ok_or(VerificationServiceError::NoResults(email))
    }

    pub fn history(
        &self,
        email: &str,
    ) -> Result<Vec<VerificationRecord>, VerificationServiceError> {
        let email = normalize_email(email);
        Ok(self.repository.history(&email)?)
    }

    /// Stateless evaluation; nothing is stored.
    pub fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<VerificationResult, VerificationServiceError> {
        let target = request.target_or(&self.default_target);
        let result = self
            .engine
            .evaluate(&request.courses, &request.college, &request.major, target)?;
        Ok(result)
    }

    pub fn majors(&self) -> Vec<String> {
        self.engine.reference().majors()
    }

    pub fn colleges(&self) -> Vec<String> {
        self.engine.reference().colleges()
    }
}

fn validate_profile(profile: &StudentProfile) -> Result<(), VerificationServiceError> {
    let invalid = |reason: &str| Err(VerificationServiceError::InvalidProfile(reason.to_string()));

    let Some((local, domain)) = profile.email.split_once('@') else {
        return invalid("email must contain '@'");
    };
    if local.is_empty() || domain.is_empty() {
        return invalid("email is malformed");
    }
    if profile.name.trim().is_empty() {
        return invalid("name is required");
    }
    if profile.major.trim().is_empty() {
        return invalid("major is required");
    }
    if profile.community_college.trim().is_empty() {
        return invalid("community college is required");
    }
    Ok(())
}

/// Error raised by the verification service.
#[derive(Debug, thiserror::Error)]
pub enum VerificationServiceError {
    #[error("invalid student profile: {0}")]
    InvalidProfile(String),
    #[error("no student registered for '{0}'")]
    UnknownStudent(String),
    #[error("no transcript on file for '{0}'")]
    MissingTranscript(String),
    #[error("no verification results for '{0}'")]
    NoResults(String),
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
