use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::verification::gateway::{
    AuthenticateSpRequest, AuthenticateSpResponse, GatewayError, VerificationGateway,
};
use crate::verification::subject::SubjectRecord;

pub(super) fn birthday() -> NaiveDate {
    NaiveDate::from_ymd_opt(1815, 12, 10).expect("valid date")
}

pub(super) fn user() -> SubjectRecord {
    SubjectRecord::new()
        .with_attribute("email", "ada@example.com")
        .with_attribute("first_name", "Ada")
        .with_attribute("last_name", "Lovelace")
        .with_attribute("birthday", birthday())
        .with_attribute("sex", "female")
        .with_attribute("street", "12 St James's Square")
        .with_attribute("post_code", "SW1Y 4JH")
        .with_attribute("city", "London")
        .with_attribute("country", "United Kingdom")
        .with_attribute("mobile", "07700900001")
}

pub(super) fn contact() -> SubjectRecord {
    SubjectRecord::new()
        .with_attribute("email", "countess@example.com")
        .with_attribute("mobile", "07700900123")
}

#[derive(Debug)]
pub(super) struct UnreachableGateway;

impl VerificationGateway for UnreachableGateway {
    fn authenticate_sp(
        &self,
        _request: &AuthenticateSpRequest,
    ) -> Result<AuthenticateSpResponse, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
