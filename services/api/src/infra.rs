use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;
use transfer_verifier::config::ReferenceConfig;
use transfer_verifier::reference::{
    ReferenceCatalog, ReferenceDataError, ReferenceDataProvider, ReferenceLoader,
};
use transfer_verifier::verification::{
    RepositoryError, StudentProfile, TranscriptRecord, VerificationRecord, VerificationRepository,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reference data from `APP_REFERENCE_DATA` (or the bundled demo set) plus
/// any rows from `APP_EQUIVALENCY_CSV`.
pub(crate) fn load_reference_catalog(
    config: &ReferenceConfig,
) -> Result<ReferenceCatalog, ReferenceDataError> {
    let loader = match &config.data_path {
        Some(path) => ReferenceLoader::from_json_path(path)?,
        None => ReferenceLoader::bundled()?,
    };
    let loader = match &config.equivalency_csv {
        Some(path) => loader.with_equivalency_csv_path(path)?,
        None => loader,
    };

    let catalog = loader.build()?;
    info!(
        source = %config
            .data_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "bundled".to_string()),
        majors = catalog.majors().len(),
        colleges = catalog.colleges().len(),
        "reference data ready"
    );
    Ok(catalog)
}

#[derive(Default)]
struct Records {
    students: HashMap<String, StudentProfile>,
    transcripts: HashMap<String, TranscriptRecord>,
    results: HashMap<String, Vec<VerificationRecord>>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryVerificationRepository {
    records: Arc<Mutex<Records>>,
}

impl InMemoryVerificationRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Records>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl VerificationRepository for InMemoryVerificationRepository {
    fn upsert_student(&self, profile: StudentProfile) -> Result<StudentProfile, RepositoryError> {
        let mut guard = self.lock()?;
        guard.students.insert(profile.email.clone(), profile.clone());
        Ok(profile)
    }

    fn fetch_student(&self, email: &str) -> Result<Option<StudentProfile>, RepositoryError> {
        Ok(self.lock()?.students.get(email).cloned())
    }

    fn save_transcript(&self, record: TranscriptRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if !guard.students.contains_key(&record.email) {
            return Err(RepositoryError::NotFound);
        }
        guard.transcripts.insert(record.email.clone(), record);
        Ok(())
    }

    fn fetch_transcript(&self, email: &str) -> Result<Option<TranscriptRecord>, RepositoryError> {
        Ok(self.lock()?.transcripts.get(email).cloned())
    }

    fn insert_result(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let history = guard.results.entry(record.email.clone()).or_default();
        if history.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        history.push(record.clone());
        Ok(record)
    }

    fn latest_result(&self, email: &str) -> Result<Option<VerificationRecord>, RepositoryError> {
        Ok(self
            .lock()?
            .results
            .get(email)
            .and_then(|history| history.last())
            .cloned())
    }

    fn history(&self, email: &str) -> Result<Vec<VerificationRecord>, RepositoryError> {
        Ok(self.lock()?.results.get(email).cloned().unwrap_or_default())
    }
}
