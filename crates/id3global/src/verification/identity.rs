//! `GlobalInputData` request shapes.
//!
//! Serialized with the service's PascalCase property names, so a canonical
//! field key such as `Addresses.CurrentAddress.City` is also the JSON path of
//! that leaf.

use super::value::FieldValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Identity {
    pub personal: Personal,
    pub addresses: AddressContainer,
    pub contact_details: ContactDetails,
}

impl Identity {
    pub fn personal_details(&self) -> &PersonalDetails {
        &self.personal.personal_details
    }

    pub fn current_address(&self) -> &FixedFormatAddress {
        &self.addresses.current_address
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Personal {
    pub personal_details: PersonalDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PersonalDetails {
    pub title: Option<FieldValue>,
    pub forename: Option<FieldValue>,
    pub middle_name: Option<FieldValue>,
    pub surname: Option<FieldValue>,
    pub gender: Option<FieldValue>,
    pub date_of_birth: Option<FieldValue>,
    pub country_of_birth: Option<FieldValue>,
}

/// Only the current address is sent; address history is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressContainer {
    pub current_address: FixedFormatAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FixedFormatAddress {
    pub street: Option<FieldValue>,
    pub zip_postcode: Option<FieldValue>,
    pub city: Option<FieldValue>,
    pub country: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactDetails {
    pub email: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_telephone: Option<PhoneNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_telephone: Option<PhoneNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_telephone: Option<PhoneNumber>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhoneNumber {
    pub number: FieldValue,
}

impl PhoneNumber {
    /// Wraps a resolved number; an absent number yields no phone entry.
    pub fn wrap(number: Option<FieldValue>) -> Option<Self> {
        number.map(|number| Self { number })
    }
}
