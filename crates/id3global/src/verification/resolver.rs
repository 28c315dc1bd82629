use super::fields::{FieldMap, Overrides};
use super::subject::{Subject, TraversalPolicy};
use super::value::FieldValue;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("field name must not be empty")]
    EmptyFieldName,
    #[error("mapping for {field} has an empty segment in '{path}'")]
    MalformedPath { field: String, path: String },
    #[error("Could not access {attribute} on {on}")]
    UnreachableAttribute {
        field: String,
        attribute: String,
        on: String,
    },
}

/// Resolves one field with the precedence override > mapped path > default attribute.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldResolver {
    policy: TraversalPolicy,
}

impl FieldResolver {
    pub fn new(policy: TraversalPolicy) -> Self {
        Self { policy }
    }

    pub fn resolve(
        &self,
        field_name: &str,
        default_attribute: &str,
        overrides: &Overrides,
        mapping: &FieldMap,
        subject: &dyn Subject,
    ) -> Result<Option<FieldValue>, ResolveError> {
        if field_name.is_empty() {
            return Err(ResolveError::EmptyFieldName);
        }

        if let Some(value) = overrides.get(field_name) {
            debug!(field = field_name, "resolved from override");
            return Ok(value.cloned());
        }

        if let Some(path) = mapping.get(field_name) {
            debug!(field = field_name, path, "resolving mapped path");
            return self.traverse(field_name, path, subject);
        }

        debug!(
            field = field_name,
            attribute = default_attribute,
            "resolved from default attribute"
        );
        Ok(subject.attribute(default_attribute))
    }

    fn traverse(
        &self,
        field_name: &str,
        path: &str,
        subject: &dyn Subject,
    ) -> Result<Option<FieldValue>, ResolveError> {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(ResolveError::MalformedPath {
                field: field_name.to_string(),
                path: path.to_string(),
            });
        }

        // Every segment but the last names a relation; the last is the attribute.
        let Some((attribute, relations)) = segments.split_last() else {
            return Ok(None);
        };
        let mut current = subject;

        for (index, relation) in relations.iter().enumerate() {
            match current.related(relation) {
                Some(next) => current = next,
                None => return self.unreachable(field_name, relation, segments[index + 1]),
            }
        }

        Ok(current.attribute(attribute))
    }

    fn unreachable(
        &self,
        field_name: &str,
        relation: &str,
        next: &str,
    ) -> Result<Option<FieldValue>, ResolveError> {
        match self.policy {
            TraversalPolicy::Lenient => {
                debug!(
                    field = field_name,
                    relation,
                    "mapped path interrupted, resolving to absent"
                );
                Ok(None)
            }
            TraversalPolicy::Strict => Err(ResolveError::UnreachableAttribute {
                field: field_name.to_string(),
                attribute: next.to_string(),
                on: relation.to_string(),
            }),
        }
    }
}
