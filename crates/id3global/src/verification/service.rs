use std::sync::Arc;

use tracing::{info, warn};

use super::assembly::IdentityBuilder;
use super::fields::Overrides;
use super::gateway::{
    AuthenticateSpRequest, AuthenticateSpResponse, FakeGateway, GatewayBinding, GatewayError,
    LiveGatewaySettings, Profile, VerificationGateway,
};
use super::identity::Identity;
use super::resolver::ResolveError;
use super::subject::{FieldMappable, Subject};

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("identity verification failed with band {band_text} (score {score})")]
    Rejected { band_text: String, score: i32 },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Submits `AuthenticateSP` requests through an injected gateway.
#[derive(Debug, Clone)]
pub struct VerificationService {
    gateway: Arc<dyn VerificationGateway>,
}

impl VerificationService {
    pub fn new(gateway: Arc<dyn VerificationGateway>) -> Self {
        Self { gateway }
    }

    /// Binds to the fake gateway or asks `connect` for a live transport.
    pub fn from_binding<F>(binding: GatewayBinding, connect: F) -> Result<Self, GatewayError>
    where
        F: FnOnce(&LiveGatewaySettings) -> Result<Arc<dyn VerificationGateway>, GatewayError>,
    {
        let gateway = match binding {
            GatewayBinding::Fake => {
                Arc::new(FakeGateway::default()) as Arc<dyn VerificationGateway>
            }
            GatewayBinding::Live(settings) => {
                info!(endpoint = settings.endpoint.url(), "binding live verification gateway");
                connect(&settings)?
            }
        };
        Ok(Self::new(gateway))
    }

    /// Sends the request and returns the raw response, whatever its band.
    pub fn authenticate(
        &self,
        identity: &Identity,
        profile: &Profile,
        customer_reference: Option<&str>,
    ) -> Result<AuthenticateSpResponse, GatewayError> {
        let request = AuthenticateSpRequest {
            profile: profile.clone(),
            customer_reference: customer_reference.map(str::to_string),
            input_data: identity.clone(),
        };

        info!(
            profile_id = %profile.id,
            profile_version = profile.version,
            "submitting AuthenticateSP request"
        );
        self.gateway.authenticate_sp(&request)
    }

    /// Returns the band text on `PASS`; any other band is a rejection.
    pub fn verify_identity(
        &self,
        identity: &Identity,
        profile: &Profile,
        customer_reference: Option<&str>,
    ) -> Result<String, VerificationError> {
        let response = self.authenticate(identity, profile, customer_reference)?;

        if response.passed() {
            info!(
                authentication_id = %response.authentication_id,
                score = response.score,
                "identity verified"
            );
            return Ok(response.band_text);
        }

        warn!(
            authentication_id = %response.authentication_id,
            band = %response.band_text,
            score = response.score,
            "identity verification rejected"
        );
        Err(VerificationError::Rejected {
            band_text: response.band_text,
            score: response.score,
        })
    }
}

/// Verification entry points for any record that declares its field mapping.
pub trait Verifiable: Subject + FieldMappable {
    fn make_identity(&self, overrides: &Overrides) -> Result<Identity, ResolveError> {
        IdentityBuilder::new(self, overrides).build()
    }

    fn authenticate_sp(
        &self,
        service: &VerificationService,
        profile: &Profile,
        overrides: &Overrides,
    ) -> Result<String, VerificationError> {
        let identity = self.make_identity(overrides)?;
        service.verify_identity(&identity, profile, None)
    }
}

impl<T: Subject + FieldMappable + ?Sized> Verifiable for T {}
