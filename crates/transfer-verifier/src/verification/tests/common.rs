use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::eligibility::CompletedCourse;
use crate::reference::ReferenceCatalog;
use crate::verification::{
    RepositoryError, StudentProfile, TranscriptRecord, TranscriptUpload,
    TransferVerificationService, VerificationRecord, VerificationRepository,
};

pub(super) const EMAIL: &str = "sam@student.example.edu";

pub(super) fn profile() -> StudentProfile {
    StudentProfile {
        email: EMAIL.to_string(),
        name: "Sam Rivera".to_string(),
        major: "Psychology".to_string(),
        community_college: "De Anza College".to_string(),
        target_uc: None,
    }
}

fn course(code: &str, units: f64, grade: &str) -> CompletedCourse {
    CompletedCourse::new(code, units, grade, "Fall 2024")
}

/// Sixty units at De Anza covering both Psychology prep courses.
pub(super) fn psychology_courses() -> Vec<CompletedCourse> {
    let mut courses = vec![
        course("PSYC 1", 4.0, "A"),
        course("MATH 10", 4.0, "B+"),
        course("EWRT 1A", 5.0, "A-"),
        course("EWRT 2", 5.0, "B"),
        course("ARTS 2A", 4.0, "A"),
        course("PHIL 1", 4.0, "B"),
        course("BIOL 6A", 6.0, "B+"),
    ];
    for index in 0..7 {
        courses.push(course(&format!("ELEC {index}"), 4.0, "B"));
    }
    courses
}

pub(super) fn upload(courses: Vec<CompletedCourse>) -> TranscriptUpload {
    TranscriptUpload {
        email: EMAIL.to_string(),
        courses,
    }
}

pub(super) type MemoryService = TransferVerificationService<MemoryRepository>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let catalog = Arc::new(ReferenceCatalog::bundled().expect("bundled reference data"));
    let service = TransferVerificationService::new(repository.clone(), catalog);
    (service, repository)
}

#[derive(Default)]
struct Records {
    students: HashMap<String, StudentProfile>,
    transcripts: HashMap<String, TranscriptRecord>,
    results: Vec<VerificationRecord>,
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Records>>,
}

impl MemoryRepository {
    pub(super) fn result_count(&self) -> usize {
        self.records.lock().expect("repository mutex").results.len()
    }
}

impl VerificationRepository for MemoryRepository {
    fn upsert_student(&self, profile: StudentProfile) -> Result<StudentProfile, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex");
        guard.students.insert(profile.email.clone(), profile.clone());
        Ok(profile)
    }

    fn fetch_student(&self, email: &str) -> Result<Option<StudentProfile>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex");
        Ok(guard.students.get(email).cloned())
    }

    fn save_transcript(&self, record: TranscriptRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex");
        guard.transcripts.insert(record.email.clone(), record);
        Ok(())
    }

    fn fetch_transcript(&self, email: &str) -> Result<Option<TranscriptRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex");
        Ok(guard.transcripts.get(email).cloned())
    }

    fn insert_result(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex");
        if guard.results.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.results.push(record.clone());
        Ok(record)
    }

    fn latest_result(&self, email: &str) -> Result<Option<VerificationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex");
        Ok(guard
            .results
            .iter()
            .rev()
            .find(|record| record.email == email)
            .cloned())
    }

    fn history(&self, email: &str) -> Result<Vec<VerificationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex");
        Ok(guard
            .results
            .iter()
            .filter(|record| record.email == email)
            .cloned()
            .collect())
    }
}

/// Every call fails as if the backing store were down.
pub(super) struct UnavailableRepository;

impl VerificationRepository for UnavailableRepository {
    fn upsert_student(&self, _profile: StudentProfile) -> Result<StudentProfile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_student(&self, _email: &str) -> Result<Option<StudentProfile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_transcript(&self, _record: TranscriptRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_transcript(&self, _email: &str) -> Result<Option<TranscriptRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_result(
        &self,
        _record: VerificationRecord,
    ) -> Result<VerificationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_result(&self, _email: &str) -> Result<Option<VerificationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _email: &str) -> Result<Vec<VerificationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
