use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Leaf of the `GlobalInputData` request that this crate knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Forename,
    MiddleName,
    Surname,
    Gender,
    DateOfBirth,
    CountryOfBirth,
    Street,
    ZipPostcode,
    City,
    Country,
    Email,
    LandTelephone,
    MobileTelephone,
    WorkTelephone,
}

impl Field {
    pub const PERSONAL: [Self; 7] = [
        Self::Title,
        Self::Forename,
        Self::MiddleName,
        Self::Surname,
        Self::Gender,
        Self::DateOfBirth,
        Self::CountryOfBirth,
    ];

    pub const ADDRESS: [Self; 4] = [Self::Street, Self::ZipPostcode, Self::City, Self::Country];

    pub const CONTACT: [Self; 4] = [
        Self::Email,
        Self::LandTelephone,
        Self::MobileTelephone,
        Self::WorkTelephone,
    ];

    /// Every field in assembly order: personal, address, contact.
    pub fn ordered() -> impl Iterator<Item = Self> {
        Self::PERSONAL
            .into_iter()
            .chain(Self::ADDRESS)
            .chain(Self::CONTACT)
    }

    /// Dot-qualified path of the field inside `GlobalInputData`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "Personal.PersonalDetails.Title",
            Self::Forename => "Personal.PersonalDetails.Forename",
            Self::MiddleName => "Personal.PersonalDetails.MiddleName",
            Self::Surname => "Personal.PersonalDetails.Surname",
            Self::Gender => "Personal.PersonalDetails.Gender",
            Self::DateOfBirth => "Personal.PersonalDetails.DateOfBirth",
            Self::CountryOfBirth => "Personal.PersonalDetails.CountryOfBirth",
            Self::Street => "Addresses.CurrentAddress.Street",
            Self::ZipPostcode => "Addresses.CurrentAddress.ZipPostcode",
            Self::City => "Addresses.CurrentAddress.City",
            Self::Country => "Addresses.CurrentAddress.Country",
            Self::Email => "ContactDetails.Email",
            Self::LandTelephone => "ContactDetails.LandTelephone.Number",
            Self::MobileTelephone => "ContactDetails.MobileTelephone.Number",
            Self::WorkTelephone => "ContactDetails.WorkTelephone.Number",
        }
    }

    /// Subject attribute read when neither an override nor a mapping applies.
    pub const fn default_attribute(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Forename => "first_name",
            Self::MiddleName => "middle_name",
            Self::Surname => "last_name",
            Self::Gender => "gender",
            Self::DateOfBirth => "birthday",
            Self::CountryOfBirth => "birth_country",
            Self::Street => "street",
            Self::ZipPostcode => "post_code",
            Self::City => "city",
            Self::Country => "country",
            Self::Email => "email",
            Self::LandTelephone => "landline",
            Self::MobileTelephone => "mobile",
            Self::WorkTelephone => "work_phone",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        field_key_map().get(key).copied()
    }
}

static FIELD_KEY_MAP: OnceLock<HashMap<&'static str, Field>> = OnceLock::new();

fn field_key_map() -> &'static HashMap<&'static str, Field> {
    FIELD_KEY_MAP.get_or_init(|| Field::ordered().map(|field| (field.key(), field)).collect())
}

/// Canonical field name to dot-separated attribute path on the subject,
/// e.g. `ContactDetails.MobileTelephone.Number` -> `contact.mobile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, String>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(field, path);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, path: impl Into<String>) {
        self.0.insert(field.into(), path.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, path)| (field.into(), path.into()))
                .collect(),
        )
    }
}

/// Literal per-call values keyed by canonical field name.
///
/// A key mapped to `None` still wins: it overrides the field to absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides(BTreeMap<String, Option<FieldValue>>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(field.into(), Some(value.into()));
        self
    }

    pub fn cleared(mut self, field: impl Into<String>) -> Self {
        self.0.insert(field.into(), None);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Option<FieldValue>) {
        self.0.insert(field.into(), value);
    }

    /// Outer `None` means "no override"; `Some(None)` means "override to absent".
    pub fn get(&self, field: &str) -> Option<Option<&FieldValue>> {
        self.0.get(field).map(Option::as_ref)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), Some(value)))
                .collect(),
        )
    }
}
