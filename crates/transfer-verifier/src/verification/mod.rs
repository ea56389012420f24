//! Student records, stored transcripts and persisted verification runs.
//!
//! [`TransferVerificationService`] is generic over the record store so the
//! HTTP layer and tests can swap in their own [`VerificationRepository`].

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    normalize_email, StudentProfile, TranscriptRecord, TranscriptUpload, TranscriptView,
    VerificationId, VerificationRecord, VerificationView,
};
pub use repository::{RepositoryError, VerificationRepository};
pub use router::verification_router;
pub use service::{TransferVerificationService, VerificationServiceError};
