//! Flattening of application subjects into ID3global `GlobalInputData`
//! requests, and submission of those requests through a gateway.
//!
//! Each field resolves from, in order: the per-call override, the subject
//! type's declared mapping path, then the subject's default attribute.

pub mod assembly;
pub mod fields;
pub mod gateway;
pub mod identity;
pub mod resolver;
pub mod router;
pub mod service;
pub mod subject;
pub mod value;

#[cfg(test)]
mod tests;

pub use assembly::IdentityBuilder;
pub use fields::{Field, FieldMap, Overrides};
pub use gateway::{
    AuthenticateSpRequest, AuthenticateSpResponse, Endpoint, FakeGateway, GatewayBinding,
    GatewayError, LiveGatewaySettings, Profile, VerificationGateway, BAND_PASS,
};
pub use identity::{
    AddressContainer, ContactDetails, FixedFormatAddress, Identity, Personal, PersonalDetails,
    PhoneNumber,
};
pub use resolver::{FieldResolver, ResolveError};
pub use router::{verification_router, IdentityPreviewRequest, VerificationRequest};
pub use service::{Verifiable, VerificationError, VerificationService};
pub use subject::{FieldMappable, Subject, SubjectRecord, TraversalPolicy};
pub use value::FieldValue;
