use super::common::*;
use std::sync::Arc;

use crate::verification::fields::{Field, Overrides};
use crate::verification::gateway::{
    Endpoint, FakeGateway, GatewayBinding, GatewayError, LiveGatewaySettings, Profile,
    VerificationGateway, BAND_PASS,
};
use crate::verification::service::{Verifiable, VerificationError, VerificationService};
use crate::verification::value::FieldValue;

#[test]
fn passing_band_is_returned() {
    let gateway = Arc::new(FakeGateway::default().recording());
    let service = VerificationService::new(gateway.clone());

    let band = user()
        .authenticate_sp(&service, &Profile::new("profile-id"), &Overrides::new())
        .expect("verification passes");

    assert_eq!(band, BAND_PASS);
    assert_eq!(gateway.requests().len(), 1);
}

#[test]
fn other_bands_surface_as_rejections_with_score() {
    for (band, score) in [("REFER", 1500), ("FAIL", 0)] {
        let service = VerificationService::new(Arc::new(FakeGateway::new(band, score)));

        let error = user()
            .authenticate_sp(&service, &Profile::new("profile-id"), &Overrides::new())
            .expect_err("band is not a pass");

        match error {
            VerificationError::Rejected { band_text, score: reported } => {
                assert_eq!(band_text, band);
                assert_eq!(reported, score);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}

#[test]
fn gateway_failures_propagate_unchanged() {
    let service = VerificationService::new(Arc::new(UnreachableGateway));

    let error = user()
        .authenticate_sp(&service, &Profile::new("profile-id"), &Overrides::new())
        .expect_err("transport fails");

    match error {
        VerificationError::Gateway(inner) => assert_eq!(
            inner,
            GatewayError::Transport("connection refused".to_string())
        ),
        other => panic!("expected gateway error, got {other:?}"),
    }
}

#[test]
fn resolution_failures_stop_before_the_gateway() {
    let gateway = Arc::new(FakeGateway::default().recording());
    let service = VerificationService::new(gateway.clone());
    let subject = user().with_mapping(Field::MobileTelephone.key(), "contact.mobile");

    let error = subject
        .authenticate_sp(&service, &Profile::new("profile-id"), &Overrides::new())
        .expect_err("contact is unset");

    assert!(matches!(error, VerificationError::Resolve(_)));
    assert!(gateway.requests().is_empty());
}

#[test]
fn request_carries_profile_reference_and_payload() {
    let gateway = Arc::new(FakeGateway::default().recording());
    let service = VerificationService::new(gateway.clone());
    let overrides = Overrides::new().with(Field::Email.key(), "a@b.com");
    let identity = user().make_identity(&overrides).expect("identity builds");
    let profile = Profile::new("profile-id").with_version(3);

    let response = service
        .authenticate(&identity, &profile, Some("customer-42"))
        .expect("fake answers");

    assert!(response.passed());
    assert_eq!(response.score, 3000);
    assert_eq!(response.customer_reference.as_deref(), Some("customer-42"));

    let requests = gateway.requests();
    let request = requests.first().expect("request recorded");
    assert_eq!(request.profile, profile);
    assert_eq!(request.customer_reference.as_deref(), Some("customer-42"));
    assert_eq!(
        request.input_data.contact_details.email,
        Some(FieldValue::from("a@b.com"))
    );
}

#[test]
fn authenticate_returns_raw_response_for_any_band() {
    let service = VerificationService::new(Arc::new(FakeGateway::new("ALERT", 800)));
    let identity = user()
        .make_identity(&Overrides::new())
        .expect("identity builds");

    let response = service
        .authenticate(&identity, &Profile::new("profile-id"), None)
        .expect("raw response is not an error");

    assert!(!response.passed());
    assert_eq!(response.band_text, "ALERT");
}

#[test]
fn fake_binding_does_not_call_the_connector() {
    let service = VerificationService::from_binding(GatewayBinding::Fake, |_| {
        panic!("connector must not be called for the fake binding")
    })
    .expect("fake binds");

    let band = user()
        .authenticate_sp(&service, &Profile::new("profile-id"), &Overrides::new())
        .expect("fake passes");
    assert_eq!(band, BAND_PASS);
}

#[test]
fn fake_binding_keeps_no_request_history() {
    let service = VerificationService::from_binding(GatewayBinding::Fake, |_| {
        panic!("connector must not be called for the fake binding")
    })
    .expect("fake binds");

    for _ in 0..3 {
        user()
            .authenticate_sp(&service, &Profile::new("profile-id"), &Overrides::new())
            .expect("fake passes");
    }

    let rendered = format!("{service:?}");
    assert!(rendered.contains("issued: 3"), "{rendered}");
    assert!(rendered.contains("history: None"), "{rendered}");
}

#[test]
fn live_binding_hands_settings_to_the_connector() {
    let binding = GatewayBinding::Live(LiveGatewaySettings {
        username: "account".to_string(),
        password: "secret".to_string(),
        endpoint: Endpoint::Pilot,
    });

    let service = VerificationService::from_binding(binding, |settings| {
        assert_eq!(settings.endpoint, Endpoint::Pilot);
        assert_eq!(settings.username, "account");
        Ok(Arc::new(FakeGateway::new("REFER", 100)) as Arc<dyn VerificationGateway>)
    })
    .expect("live binds");

    let error = user()
        .authenticate_sp(&service, &Profile::new("profile-id"), &Overrides::new())
        .expect_err("connector gateway refers");
    assert!(matches!(error, VerificationError::Rejected { .. }));
}

#[test]
fn connector_failures_are_returned() {
    let binding = GatewayBinding::Live(LiveGatewaySettings {
        username: String::new(),
        password: String::new(),
        endpoint: Endpoint::Production,
    });

    let error = VerificationService::from_binding(binding, |_| {
        Err(GatewayError::Unavailable("no transport".to_string()))
    })
    .expect_err("connector fails");

    assert_eq!(error, GatewayError::Unavailable("no transport".to_string()));
}
