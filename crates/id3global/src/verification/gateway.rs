use super::identity::Identity;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub const BAND_PASS: &str = "PASS";

/// Profile selection for an `AuthenticateSP` call. Version `0` asks the
/// service for the latest version of the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Profile {
    #[serde(rename = "ID")]
    pub id: String,
    pub version: u32,
}

impl Profile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: 0,
        }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticateSpRequest {
    #[serde(rename = "ProfileIDVersion")]
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
    pub input_data: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticateSpResponse {
    #[serde(rename = "AuthenticationID")]
    pub authentication_id: String,
    pub band_text: String,
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_reference: Option<String>,
}

impl AuthenticateSpResponse {
    pub fn passed(&self) -> bool {
        self.band_text == BAND_PASS
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("verification transport failed: {0}")]
    Transport(String),
    #[error("verification service unavailable: {0}")]
    Unavailable(String),
}

/// Boundary to the ID3global SOAP client. Implementations own the transport.
pub trait VerificationGateway: Debug + Send + Sync {
    fn authenticate_sp(
        &self,
        request: &AuthenticateSpRequest,
    ) -> Result<AuthenticateSpResponse, GatewayError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Pilot,
    Production,
}

impl Endpoint {
    pub const fn url(self) -> &'static str {
        match self {
            Self::Pilot => "https://pilot.id3global.com/ID3gWS/ID3global.svc/Soap11_Auth",
            Self::Production => "https://id3global.com/ID3gWS/ID3global.svc/Soap11_Auth",
        }
    }
}

/// What a live transport needs to be constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct LiveGatewaySettings {
    pub username: String,
    pub password: String,
    pub endpoint: Endpoint,
}

impl Debug for LiveGatewaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveGatewaySettings")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayBinding {
    Fake,
    Live(LiveGatewaySettings),
}

/// In-process gateway answering every request with a fixed band and score.
///
/// Requests are only kept when built with [`FakeGateway::recording`].
#[derive(Debug)]
pub struct FakeGateway {
    band_text: String,
    score: i32,
    issued: AtomicU64,
    history: Option<Mutex<Vec<AuthenticateSpRequest>>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new(BAND_PASS, 3000)
    }
}

impl FakeGateway {
    pub fn new(band_text: impl Into<String>, score: i32) -> Self {
        Self {
            band_text: band_text.into(),
            score,
            issued: AtomicU64::new(0),
            history: None,
        }
    }

    /// Keeps every request it answers, for inspection through [`FakeGateway::requests`].
    pub fn recording(mut self) -> Self {
        self.history = Some(Mutex::new(Vec::new()));
        self
    }

    /// Requests received so far, oldest first. Empty unless recording.
    pub fn requests(&self) -> Vec<AuthenticateSpRequest> {
        self.history
            .as_ref()
            .and_then(|history| history.lock().ok().map(|guard| guard.clone()))
            .unwrap_or_default()
    }
}

impl VerificationGateway for FakeGateway {
    fn authenticate_sp(
        &self,
        request: &AuthenticateSpRequest,
    ) -> Result<AuthenticateSpResponse, GatewayError> {
        if let Some(history) = &self.history {
            history
                .lock()
                .map_err(|_| GatewayError::Unavailable("fake gateway lock poisoned".to_string()))?
                .push(request.clone());
        }
        let sequence = self.issued.fetch_add(1, Ordering::Relaxed) + 1;

        Ok(AuthenticateSpResponse {
            authentication_id: format!("fake-{sequence:06}"),
            band_text: self.band_text.clone(),
            score: self.score,
            customer_reference: request.customer_reference.clone(),
        })
    }
}
