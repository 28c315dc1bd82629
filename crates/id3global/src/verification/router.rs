use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use super::fields::Overrides;
use super::gateway::Profile;
use super::identity::Identity;
use super::service::{Verifiable, VerificationService};
use super::subject::SubjectRecord;
use crate::error::AppError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IdentityPreviewRequest {
    pub subject: SubjectRecord,
    #[serde(default)]
    pub overrides: Overrides,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationRequest {
    pub subject: SubjectRecord,
    pub profile_id: String,
    #[serde(default)]
    pub profile_version: u32,
    #[serde(default)]
    pub customer_reference: Option<String>,
    #[serde(default)]
    pub overrides: Overrides,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationView {
    pub band_text: String,
}

/// Router builder exposing payload preview and verification endpoints.
pub fn verification_router(service: Arc<VerificationService>) -> Router {
    Router::new()
        .route("/api/v1/identity", post(identity_handler))
        .route("/api/v1/verifications", post(verify_handler))
        .with_state(service)
}

pub(crate) async fn identity_handler(
    Json(request): Json<IdentityPreviewRequest>,
) -> Result<Json<Identity>, AppError> {
    let identity = request.subject.make_identity(&request.overrides)?;
    Ok(Json(identity))
}

pub(crate) async fn verify_handler(
    State(service): State<Arc<VerificationService>>,
    Json(request): Json<VerificationRequest>,
) -> Result<Json<VerificationView>, AppError> {
    let VerificationRequest {
        subject,
        profile_id,
        profile_version,
        customer_reference,
        overrides,
    } = request;
    let profile = Profile::new(profile_id).with_version(profile_version);

    let identity = subject.make_identity(&overrides)?;
    let band_text =
        service.verify_identity(&identity, &profile, customer_reference.as_deref())?;
    Ok(Json(VerificationView { band_text }))
}
