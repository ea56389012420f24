use super::domain::{StudentProfile, TranscriptRecord, VerificationRecord};

/// Storage abstraction so the service can be exercised in isolation.
///
/// Emails passed to lookups are already normalized.
pub trait VerificationRepository: Send + Sync {
    /// Insert or replace the profile keyed by its email.
    fn upsert_student(&self, profile: StudentProfile) -> Result<StudentProfile, RepositoryError>;
    fn fetch_student(&self, email: &str) -> Result<Option<StudentProfile>, RepositoryError>;
    /// Replace whatever transcript is on file for the record's email.
    fn save_transcript(&self, record: TranscriptRecord) -> Result<(), RepositoryError>;
    fn fetch_transcript(&self, email: &str) -> Result<Option<TranscriptRecord>, RepositoryError>;
    fn insert_result(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, RepositoryError>;
    fn latest_result(&self, email: &str) -> Result<Option<VerificationRecord>, RepositoryError>;
    /// Every stored result for the student, oldest first.
    fn history(&self, email: &str) -> Result<Vec<VerificationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
