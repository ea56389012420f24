use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::eligibility::EvaluationRequest;
use crate::reference::ReferenceDataProvider;

use super::domain::{StudentProfile, TranscriptUpload};
use super::repository::{RepositoryError, VerificationRepository};
use super::service::{TransferVerificationService, VerificationServiceError};

/// Router builder exposing evaluation, student records and reference listings.
pub fn verification_router<R, P>(service: Arc<TransferVerificationService<R, P>>) -> Router
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    Router::new()
        .route("/api/v1/evaluate", post(evaluate_handler::<R, P>))
        .route("/api/v1/students", post(register_handler::<R, P>))
        .route("/api/v1/students/:email", get(student_handler::<R, P>))
        .route("/api/v1/transcripts", post(upload_transcript_handler::<R, P>))
        .route("/api/v1/transcripts/:email", get(transcript_handler::<R, P>))
        .route("/api/v1/verify/:email", post(verify_handler::<R, P>))
        .route("/api/v1/results/:email", get(latest_result_handler::<R, P>))
        .route(
            "/api/v1/results/:email/history",
            get(history_handler::<R, P>),
        )
        .route("/api/v1/majors", get(majors_handler::<R, P>))
        .route("/api/v1/colleges", get(colleges_handler::<R, P>))
        .with_state(service)
}

type SharedService<R, P> = State<Arc<TransferVerificationService<R, P>>>;

pub(crate) async fn evaluate_handler<R, P>(
    State(service): SharedService<R, P>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    match service.evaluate(&request) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_handler<R, P>(
    State(service): SharedService<R, P>,
    axum::Json(profile): axum::Json<StudentProfile>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    match service.register_student(profile) {
        Ok(profile) => (StatusCode::CREATED, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn student_handler<R, P>(
    State(service): SharedService<R, P>,
    Path(email): Path<String>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    match service.student(&email) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn upload_transcript_handler<R, P>(
    State(service): SharedService<R, P>,
    axum::Json(upload): axum::Json<TranscriptUpload>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    match service.upload_transcript(upload) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn transcript_handler<R, P>(
    State(service): SharedService<R, P>,
    Path(email): Path<String>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    match service.transcript(&email) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn verify_handler<R, P>(
    State(service): SharedService<R, P>,
    Path(email): Path<String>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    match service.verify(&email) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn latest_result_handler<R, P>(
    State(service): SharedService<R, P>,
    Path(email): Path<String>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    match service.latest_result(&email) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<R, P>(
    State(service): SharedService<R, P>,
    Path(email): Path<String>,
) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    match service.history(&email) {
        Ok(records) => {
            let payload = json!({
                "email": email.trim().to_ascii_lowercase(),
                "results": records
                    .iter()
                    .map(|record| json!({
                        "id": record.id.0,
                        "created_at": record.created_at,
                        "eligibility_status": record.result.eligibility_status.label(),
                    }))
                    .collect::<Vec<_>>(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn majors_handler<R, P>(State(service): SharedService<R, P>) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    let payload = json!({ "majors": service.majors() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn colleges_handler<R, P>(State(service): SharedService<R, P>) -> Response
where
    R: VerificationRepository + 'static,
    P: ReferenceDataProvider + 'static,
{
    let payload = json!({ "colleges": service.colleges() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(error: VerificationServiceError) -> Response {
    let status = match &error {
        VerificationServiceError::InvalidProfile(_) | VerificationServiceError::Eligibility(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        VerificationServiceError::UnknownStudent(_)
        | VerificationServiceError::MissingTranscript(_)
        | VerificationServiceError::NoResults(_)
        | VerificationServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        VerificationServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        VerificationServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
