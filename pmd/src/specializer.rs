//! Registration-time specializers and the role owners they resolve to.

use std::fmt;

use crate::hierarchy::TypeId;
use crate::value::{Value, ValueKey};

/// Restricts one argument position of a method.
#[derive(Debug, Clone)]
pub enum Specializer {
    /// Matches anything; resolves to the `Any` root.
    Any,
    /// Matches values whose delegation chain passes through the marker.
    Type(TypeId),
    /// Matches only this value: equal content for primitives, the same
    /// identity for objects and functions.
    Value(Value),
}

/// The entity whose role table records a method at one position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoleOwner {
    Type(TypeId),
    Value(ValueKey),
}

impl RoleOwner {
    /// The universal root owner.
    pub const ROOT: RoleOwner = RoleOwner::Type(TypeId::ANY);

    /// The owner a value records its own roles under.
    pub fn of_value(value: &Value) -> RoleOwner {
        match value.key() {
            Some(key) => RoleOwner::Value(key),
            None => RoleOwner::Type(value.type_of()),
        }
    }
}

impl fmt::Display for RoleOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleOwner::Type(ty) => write!(f, "{}", ty),
            RoleOwner::Value(key) => write!(f, "{:?}", key),
        }
    }
}

impl Specializer {
    /// Canonical role owner for this specializer.
    ///
    /// A `Value` specializer holding a type marker resolves to the marker
    /// itself, same as `Specializer::Type`.
    pub fn resolve(&self) -> RoleOwner {
        match self {
            Specializer::Any => RoleOwner::ROOT,
            Specializer::Type(ty) => RoleOwner::Type(*ty),
            Specializer::Value(value) => RoleOwner::of_value(value),
        }
    }

    /// The marker this specializer must find in the registry, if any.
    pub(crate) fn type_marker(&self) -> Option<TypeId> {
        match self {
            Specializer::Any => None,
            Specializer::Type(ty) => Some(*ty),
            Specializer::Value(value) => Some(value.type_of()),
        }
    }
}

impl From<TypeId> for Specializer {
    fn from(ty: TypeId) -> Self {
        Specializer::Type(ty)
    }
}

impl From<Value> for Specializer {
    fn from(value: Value) -> Self {
        Specializer::Value(value)
    }
}

impl From<&Value> for Specializer {
    fn from(value: &Value) -> Self {
        Specializer::Value(value.clone())
    }
}
