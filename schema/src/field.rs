//! Field descriptors.

use crate::rule::Rule;

/// Immutable description of one schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    rule: Rule,
    read_only: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, rule: Rule) -> Self {
        Self {
            name: name.into(),
            rule,
            read_only: false,
        }
    }

    /// Mark the field as read-only: validated, but never written back and
    /// not writable from the outside once populated.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }
}
