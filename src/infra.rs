use id3global::error::AppError;
use id3global::verification::{
    AuthenticateSpRequest, AuthenticateSpResponse, FieldValue, GatewayError,
    LiveGatewaySettings, Overrides, SubjectRecord, VerificationGateway,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Stands in for the SOAP transport, which this binary does not link.
#[derive(Debug)]
pub(crate) struct UnlinkedGateway {
    endpoint: &'static str,
}

impl UnlinkedGateway {
    pub(crate) fn connect(
        settings: &LiveGatewaySettings,
    ) -> Result<Arc<dyn VerificationGateway>, GatewayError> {
        Ok(Arc::new(Self {
            endpoint: settings.endpoint.url(),
        }))
    }
}

impl VerificationGateway for UnlinkedGateway {
    fn authenticate_sp(
        &self,
        _request: &AuthenticateSpRequest,
    ) -> Result<AuthenticateSpResponse, GatewayError> {
        Err(GatewayError::Unavailable(format!(
            "no SOAP transport is linked for {}; set ID3GLOBAL_FAKE=true to use the fake gateway",
            self.endpoint
        )))
    }
}

pub(crate) fn load_subject(path: &Path) -> Result<SubjectRecord, AppError> {
    let raw = std::fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

/// Parses `Field.Path=value` pairs, keeping each value as the exact text
/// typed. Fields named in `cleared` are overridden to absent.
pub(crate) fn parse_overrides(
    pairs: &[String],
    cleared: &[String],
) -> Result<Overrides, AppError> {
    let mut overrides = Overrides::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| AppError::InvalidOverride(pair.clone()))?;
        overrides.insert(key.trim(), Some(FieldValue::from(raw)));
    }
    for key in cleared {
        if key.trim().is_empty() {
            return Err(AppError::InvalidOverride(key.clone()));
        }
        overrides.insert(key.trim(), None);
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use id3global::verification::{Endpoint, Field};

    #[test]
    fn parse_overrides_keeps_values_as_typed() {
        let overrides = parse_overrides(
            &[
                "ContactDetails.Email=a@b.com".to_string(),
                "Addresses.CurrentAddress.ZipPostcode=10001".to_string(),
                "Personal.PersonalDetails.Forename=null".to_string(),
                "Addresses.CurrentAddress.Street=1 High St=North".to_string(),
            ],
            &[],
        )
        .expect("overrides parse");

        assert_eq!(
            overrides.get(Field::Email.key()),
            Some(Some(&FieldValue::from("a@b.com")))
        );
        assert_eq!(
            overrides.get(Field::ZipPostcode.key()),
            Some(Some(&FieldValue::from("10001")))
        );
        assert_eq!(
            overrides.get(Field::Forename.key()),
            Some(Some(&FieldValue::from("null")))
        );
        assert_eq!(
            overrides.get(Field::Street.key()),
            Some(Some(&FieldValue::from("1 High St=North")))
        );
    }

    #[test]
    fn cleared_fields_override_to_absent() {
        let overrides = parse_overrides(
            &["Personal.PersonalDetails.MiddleName=Augusta".to_string()],
            &["Personal.PersonalDetails.MiddleName".to_string()],
        )
        .expect("overrides parse");

        assert_eq!(overrides.get(Field::MiddleName.key()), Some(None));
    }

    #[test]
    fn parse_overrides_rejects_pairs_without_key() {
        let error = parse_overrides(&["=value".to_string()], &[]).expect_err("key missing");
        assert!(matches!(error, AppError::InvalidOverride(_)));

        let error =
            parse_overrides(&["ContactDetails.Email".to_string()], &[]).expect_err("no value");
        assert!(matches!(error, AppError::InvalidOverride(_)));

        let error = parse_overrides(&[], &[" ".to_string()]).expect_err("blank clear");
        assert!(matches!(error, AppError::InvalidOverride(_)));
    }

    #[test]
    fn unlinked_gateway_reports_unavailable() {
        let gateway = UnlinkedGateway::connect(&LiveGatewaySettings {
            username: "account".to_string(),
            password: "secret".to_string(),
            endpoint: Endpoint::Pilot,
        })
        .expect("connects");
        let request = AuthenticateSpRequest {
            profile: id3global::verification::Profile::new("profile-id"),
            customer_reference: None,
            input_data: Default::default(),
        };

        let error = gateway.authenticate_sp(&request).expect_err("no transport");
        assert!(matches!(error, GatewayError::Unavailable(message) if message.contains("pilot")));
    }
}
