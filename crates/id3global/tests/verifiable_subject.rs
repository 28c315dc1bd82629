use std::sync::{Arc, OnceLock};

use chrono::NaiveDate;
use id3global::verification::{
    FakeGateway, Field, FieldMap, FieldMappable, FieldValue, Overrides, Profile, Subject,
    TraversalPolicy, Verifiable, VerificationError, VerificationService,
};

struct Contact {
    email: String,
    mobile: String,
}

impl Subject for Contact {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        match name {
            "email" => Some(FieldValue::from(self.email.as_str())),
            "mobile" => Some(FieldValue::from(self.mobile.as_str())),
            _ => None,
        }
    }

    fn related(&self, _name: &str) -> Option<&dyn Subject> {
        None
    }
}

struct User {
    first_name: String,
    last_name: String,
    birthday: NaiveDate,
    sex: String,
    city: String,
    contact: Option<Contact>,
}

impl User {
    fn sample() -> Self {
        Self {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            birthday: NaiveDate::from_ymd_opt(1906, 12, 9).expect("valid date"),
            sex: "female".to_string(),
            city: "New York".to_string(),
            contact: None,
        }
    }
}

impl Subject for User {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        match name {
            "first_name" => Some(FieldValue::from(self.first_name.as_str())),
            "last_name" => Some(FieldValue::from(self.last_name.as_str())),
            "birthday" => Some(FieldValue::from(self.birthday)),
            "sex" => Some(FieldValue::from(self.sex.as_str())),
            "city" => Some(FieldValue::from(self.city.as_str())),
            _ => None,
        }
    }

    fn related(&self, name: &str) -> Option<&dyn Subject> {
        match name {
            "contact" => self.contact.as_ref().map(|contact| contact as &dyn Subject),
            _ => None,
        }
    }
}

impl FieldMappable for User {
    fn mapping_table(&self) -> &FieldMap {
        static MAPPING: OnceLock<FieldMap> = OnceLock::new();
        MAPPING.get_or_init(|| {
            FieldMap::new()
                .with(Field::Gender.key(), "sex")
                .with(Field::Email.key(), "contact.email")
                .with(Field::MobileTelephone.key(), "contact.mobile")
        })
    }
}

/// Same record shape, but unset relations resolve to absent values.
struct LenientUser(User);

impl Subject for LenientUser {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        self.0.attribute(name)
    }

    fn related(&self, name: &str) -> Option<&dyn Subject> {
        self.0.related(name)
    }
}

impl FieldMappable for LenientUser {
    fn mapping_table(&self) -> &FieldMap {
        self.0.mapping_table()
    }

    fn traversal_policy(&self) -> TraversalPolicy {
        TraversalPolicy::Lenient
    }
}

#[test]
fn typed_subject_builds_identity_through_relations() {
    let mut user = User::sample();
    user.contact = Some(Contact {
        email: "grace@example.com".to_string(),
        mobile: "07700900456".to_string(),
    });

    let identity = user
        .make_identity(&Overrides::new())
        .expect("identity builds");

    assert_eq!(
        identity.personal_details().forename,
        Some(FieldValue::from("Grace"))
    );
    assert_eq!(
        identity.personal_details().gender,
        Some(FieldValue::from("female"))
    );
    assert_eq!(
        identity.personal_details().date_of_birth,
        Some(FieldValue::Date(
            NaiveDate::from_ymd_opt(1906, 12, 9).expect("valid date")
        ))
    );
    assert_eq!(
        identity.contact_details.email,
        Some(FieldValue::from("grace@example.com"))
    );
    assert_eq!(
        identity
            .contact_details
            .mobile_telephone
            .as_ref()
            .map(|phone| phone.number.clone()),
        Some(FieldValue::from("07700900456"))
    );
    assert_eq!(identity.current_address().street, None);
}

#[test]
fn typed_subject_without_contact_fails_strictly() {
    let user = User::sample();

    let error = user
        .make_identity(&Overrides::new())
        .expect_err("contact is unset");

    assert_eq!(error.to_string(), "Could not access email on contact");
}

#[test]
fn overrides_cover_fields_whose_relation_is_unset() {
    let user = User::sample();
    let overrides = Overrides::new()
        .with(Field::Email.key(), "a@b.com")
        .cleared(Field::MobileTelephone.key());

    let identity = user.make_identity(&overrides).expect("identity builds");

    assert_eq!(
        identity.contact_details.email,
        Some(FieldValue::from("a@b.com"))
    );
    assert!(identity.contact_details.mobile_telephone.is_none());
}

#[test]
fn lenient_subject_resolves_unset_relations_to_absent() {
    let user = LenientUser(User::sample());

    let identity = user
        .make_identity(&Overrides::new())
        .expect("lenient build succeeds");

    assert_eq!(identity.contact_details.email, None);
    assert!(identity.contact_details.mobile_telephone.is_none());
}

#[test]
fn typed_subject_verifies_against_fake_gateway() {
    let gateway = Arc::new(FakeGateway::default().recording());
    let service = VerificationService::new(gateway.clone());
    let user = LenientUser(User::sample());

    let band = user
        .authenticate_sp(
            &service,
            &Profile::new("profile-id").with_version(2),
            &Overrides::new(),
        )
        .expect("fake passes");

    assert_eq!(band, "PASS");
    let requests = gateway.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].profile.version, 2);
    assert_eq!(
        requests[0].input_data.current_address().city,
        Some(FieldValue::from("New York"))
    );
}

#[test]
fn refer_band_is_distinguishable_from_failure() {
    let service = VerificationService::new(Arc::new(FakeGateway::new("REFER", 1000)));
    let user = LenientUser(User::sample());

    let error = user
        .authenticate_sp(&service, &Profile::new("profile-id"), &Overrides::new())
        .expect_err("refer is not a pass");

    assert!(matches!(
        error,
        VerificationError::Rejected { ref band_text, score: 1000 } if band_text == "REFER"
    ));
}
