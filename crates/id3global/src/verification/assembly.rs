use super::fields::{Field, Overrides};
use super::identity::{
    AddressContainer, ContactDetails, FixedFormatAddress, Identity, Personal, PersonalDetails,
    PhoneNumber,
};
use super::resolver::{FieldResolver, ResolveError};
use super::subject::{FieldMappable, Subject};
use super::value::FieldValue;
use tracing::warn;

/// Builds the request payload for one subject and one set of overrides.
pub struct IdentityBuilder<'a, S: ?Sized> {
    subject: &'a S,
    overrides: &'a Overrides,
    resolver: FieldResolver,
}

impl<'a, S> IdentityBuilder<'a, S>
where
    S: Subject + FieldMappable + ?Sized,
{
    pub fn new(subject: &'a S, overrides: &'a Overrides) -> Self {
        Self {
            subject,
            overrides,
            resolver: FieldResolver::new(subject.traversal_policy()),
        }
    }

    pub fn build(self) -> Result<Identity, ResolveError> {
        self.warn_unknown_keys();

        let personal_details = PersonalDetails {
            title: self.resolve(Field::Title)?,
            forename: self.resolve(Field::Forename)?,
            middle_name: self.resolve(Field::MiddleName)?,
            surname: self.resolve(Field::Surname)?,
            gender: self.resolve(Field::Gender)?,
            date_of_birth: self.resolve(Field::DateOfBirth)?,
            country_of_birth: self.resolve(Field::CountryOfBirth)?,
        };

        let current_address = FixedFormatAddress {
            street: self.resolve(Field::Street)?,
            zip_postcode: self.resolve(Field::ZipPostcode)?,
            city: self.resolve(Field::City)?,
            country: self.resolve(Field::Country)?,
        };

        let contact_details = ContactDetails {
            email: self.resolve(Field::Email)?,
            land_telephone: PhoneNumber::wrap(self.resolve(Field::LandTelephone)?),
            mobile_telephone: PhoneNumber::wrap(self.resolve(Field::MobileTelephone)?),
            work_telephone: PhoneNumber::wrap(self.resolve(Field::WorkTelephone)?),
        };

        Ok(Identity {
            personal: Personal { personal_details },
            addresses: AddressContainer { current_address },
            contact_details,
        })
    }

    fn resolve(&self, field: Field) -> Result<Option<FieldValue>, ResolveError> {
        self.resolver.resolve(
            field.key(),
            self.subject.default_attribute(field),
            self.overrides,
            self.subject.mapping_table(),
            &SubjectRef(self.subject),
        )
    }

    fn warn_unknown_keys(&self) {
        for key in self.overrides.keys() {
            if Field::from_key(key).is_none() {
                warn!(key, "override does not match a known field; ignoring");
            }
        }
        for key in self.subject.mapping_table().keys() {
            if Field::from_key(key).is_none() {
                warn!(key, "mapping does not match a known field; ignoring");
            }
        }
    }
}

/// Lets an unsized subject be passed where `&dyn Subject` is expected.
struct SubjectRef<'a, S: ?Sized>(&'a S);

impl<S: Subject + ?Sized> Subject for SubjectRef<'_, S> {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        self.0.attribute(name)
    }

    fn related(&self, name: &str) -> Option<&dyn Subject> {
        self.0.related(name)
    }
}
