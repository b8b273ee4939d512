//! Delegation chains.
//!
//! The chain of a value is the value's own owner followed by the ancestors
//! of its type marker:
//!
//! ```text
//! "foo"  ->  String  ->  Object  ->  Any
//! ```
//!
//! A type marker passed as a value starts at the marker itself. The
//! position of an owner in the chain is its distance from the argument,
//! which is the rank a role match at that owner receives.

use crate::hierarchy::TypeRegistry;
use crate::specializer::RoleOwner;
use crate::value::Value;

/// Ordered owners from an argument up to the universal root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelegationChain {
    owners: Vec<RoleOwner>,
}

impl DelegationChain {
    /// Walk the chain of `value` through `types`.
    ///
    /// The chain always ends at the root, even when the value's marker is
    /// not registered in `types`.
    pub fn of(types: &TypeRegistry, value: &Value) -> Self {
        let ancestors = types.ancestors(value.type_of()).into_iter().map(RoleOwner::Type);
        let mut owners: Vec<RoleOwner> = match value {
            Value::Type(_) => ancestors.collect(),
            _ => std::iter::once(RoleOwner::of_value(value)).chain(ancestors).collect(),
        };
        if owners.last() != Some(&RoleOwner::ROOT) {
            owners.push(RoleOwner::ROOT);
        }
        Self { owners }
    }

    /// Owners paired with their distance from the argument.
    pub fn ranked(&self) -> impl Iterator<Item = (u32, &RoleOwner)> {
        (0u32..).zip(self.owners.iter())
    }

    pub fn owners(&self) -> &[RoleOwner] {
        &self.owners
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Whether the chain ends at the root. Holds for every chain built by
    /// [`DelegationChain::of`].
    pub fn is_rooted(&self) -> bool {
        self.owners.last() == Some(&RoleOwner::ROOT)
    }
}
