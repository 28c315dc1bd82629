use super::fields::{Field, FieldMap};
use super::value::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read access to an application record that can be verified.
///
/// `attribute` returns a leaf value, `related` returns a nested record such as
/// a `contact` relation. Both return `None` when the value is unset.
pub trait Subject {
    fn attribute(&self, name: &str) -> Option<FieldValue>;

    fn related(&self, name: &str) -> Option<&dyn Subject>;
}

/// How a mapped path reacts when a relation along it is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalPolicy {
    /// Fail the call, naming the attribute that could not be reached.
    #[default]
    Strict,
    /// Resolve the field to absent.
    Lenient,
}

/// Per-type declaration of where verification fields come from.
pub trait FieldMappable {
    /// Canonical field name to attribute path overrides for this type.
    fn mapping_table(&self) -> &FieldMap;

    fn default_attribute(&self, field: Field) -> &str {
        field.default_attribute()
    }

    fn traversal_policy(&self) -> TraversalPolicy {
        TraversalPolicy::Strict
    }
}

/// Self-describing subject, used for JSON input on the CLI and HTTP surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRecord {
    #[serde(default)]
    pub attributes: BTreeMap<String, Option<FieldValue>>,
    #[serde(default)]
    pub relations: BTreeMap<String, Option<SubjectRecord>>,
    #[serde(default)]
    pub mapping: FieldMap,
    #[serde(default)]
    pub policy: TraversalPolicy,
}

impl SubjectRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.attributes.insert(name.into(), Some(value.into()));
        self
    }

    pub fn with_relation(mut self, name: impl Into<String>, record: SubjectRecord) -> Self {
        self.relations.insert(name.into(), Some(record));
        self
    }

    pub fn with_mapping(mut self, field: impl Into<String>, path: impl Into<String>) -> Self {
        self.mapping.insert(field, path);
        self
    }

    pub fn with_policy(mut self, policy: TraversalPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Subject for SubjectRecord {
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        self.attributes.get(name).cloned().flatten()
    }

    fn related(&self, name: &str) -> Option<&dyn Subject> {
        self.relations
            .get(name)
            .and_then(Option::as_ref)
            .map(|record| record as &dyn Subject)
    }
}

impl FieldMappable for SubjectRecord {
    fn mapping_table(&self) -> &FieldMap {
        &self.mapping
    }

    fn traversal_policy(&self) -> TraversalPolicy {
        self.policy
    }
}
