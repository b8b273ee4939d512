//! Type markers and their delegation hierarchy.
//!
//! Every marker except [`TypeId::ANY`] has exactly one parent, so the
//! ancestors of a marker form a linear chain that ends at `Any`. The only way
//! to change a parent after definition is [`TypeRegistry::set_parent`], which
//! refuses any link that would close a cycle. The walk in
//! [`TypeRegistry::ancestors`] relies on that invariant to terminate.

use std::fmt;

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{DispatchError, Result};

/// A registered type marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// The universal root. Every delegation chain ends here.
    pub const ANY: TypeId = TypeId(0);
    pub const OBJECT: TypeId = TypeId(1);
    pub const BOOLEAN: TypeId = TypeId(2);
    pub const NUMBER: TypeId = TypeId(3);
    pub const STRING: TypeId = TypeId(4);
    pub const FUNCTION: TypeId = TypeId(5);

    const BUILTIN_COUNT: u32 = 6;

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct TypeInfo {
    name: String,
    parent: Option<TypeId>,
}

/// Registry of type markers for one context.
#[derive(Debug)]
pub struct TypeRegistry {
    types: RwLock<Vec<TypeInfo>>,
}

impl TypeRegistry {
    /// Create a registry holding the builtin markers:
    /// `Any` <- `Object` <- {`Boolean`, `Number`, `String`, `Function`}.
    pub fn new() -> Self {
        let builtin = |name: &str, parent: Option<TypeId>| TypeInfo {
            name: name.to_string(),
            parent,
        };
        let types = vec![
            builtin("Any", None),
            builtin("Object", Some(TypeId::ANY)),
            builtin("Boolean", Some(TypeId::OBJECT)),
            builtin("Number", Some(TypeId::OBJECT)),
            builtin("String", Some(TypeId::OBJECT)),
            builtin("Function", Some(TypeId::OBJECT)),
        ];
        debug_assert_eq!(types.len(), TypeId::BUILTIN_COUNT as usize);
        Self {
            types: RwLock::new(types),
        }
    }

    /// Define a new marker delegating to `parent`.
    ///
    /// Names are labels only; defining two markers with the same name yields
    /// two unrelated markers.
    pub fn define(&self, name: impl Into<String>, parent: TypeId) -> Result<TypeId> {
        let name = name.into();
        let mut types = self.types.write();
        if parent.index() >= types.len() {
            return Err(DispatchError::UnknownType(parent));
        }

        let id = TypeId(types.len() as u32);
        debug!(ty = %id, name = %name, parent = %parent, "defined type marker");
        types.push(TypeInfo {
            name,
            parent: Some(parent),
        });
        Ok(id)
    }

    /// Re-link `ty` so that it delegates to `parent`.
    ///
    /// Fails with [`DispatchError::CyclicHierarchy`] if `ty` is `parent` or
    /// one of its ancestors. Giving `Any` a parent is always cyclic.
    pub fn set_parent(&self, ty: TypeId, parent: TypeId) -> Result<()> {
        let mut types = self.types.write();
        for id in [ty, parent] {
            if id.index() >= types.len() {
                return Err(DispatchError::UnknownType(id));
            }
        }

        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == ty {
                return Err(DispatchError::CyclicHierarchy {
                    child: types[ty.index()].name.clone(),
                    parent: types[parent.index()].name.clone(),
                });
            }
            cursor = types[current.index()].parent;
        }

        debug!(ty = %ty, parent = %parent, "re-linked type marker");
        types[ty.index()].parent = Some(parent);
        Ok(())
    }

    /// The marker itself followed by each ancestor, ending at `Any`.
    ///
    /// Returns an empty list for a marker that is not registered here.
    pub fn ancestors(&self, ty: TypeId) -> Vec<TypeId> {
        let types = self.types.read();
        let mut chain = Vec::new();
        let mut cursor = (ty.index() < types.len()).then_some(ty);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = types[current.index()].parent;
        }
        chain
    }

    /// Whether `sub` delegates to `sup`, directly or transitively.
    /// Every marker is a subtype of itself.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        self.ancestors(sub).contains(&sup)
    }

    pub fn parent(&self, ty: TypeId) -> Option<TypeId> {
        self.types.read().get(ty.index()).and_then(|info| info.parent)
    }

    pub fn name(&self, ty: TypeId) -> Option<String> {
        self.types.read().get(ty.index()).map(|info| info.name.clone())
    }

    pub fn contains(&self, ty: TypeId) -> bool {
        ty.index() < self.types.read().len()
    }

    /// Number of registered markers, builtins included.
    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
