//! The dispatch context.
//!
//! A context owns everything procedures share: the id counter, the type
//! hierarchy and the role tables. Values, markers and procedures from
//! different contexts must not be mixed.

use std::sync::Arc;

use crate::chain::DelegationChain;
use crate::config::DispatchConfig;
use crate::dispatch::DispatchResolver;
use crate::error::{DispatchError, Result};
use crate::hierarchy::{TypeId, TypeRegistry};
use crate::ids::IdGenerator;
use crate::procedure::Procedure;
use crate::role::RoleStore;
use crate::value::{Function, ObjectBuilder, Value};

#[derive(Debug)]
struct Shared {
    ids: IdGenerator,
    types: TypeRegistry,
    roles: RoleStore,
    config: DispatchConfig,
}

/// Cheap, clonable handle to one dispatch universe.
#[derive(Debug, Clone)]
pub struct Context {
    shared: Arc<Shared>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                ids: IdGenerator::new(),
                types: TypeRegistry::new(),
                roles: RoleStore::new(),
                config,
            }),
        }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.shared.config
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.shared.types
    }

    pub(crate) fn ids(&self) -> &IdGenerator {
        &self.shared.ids
    }

    pub(crate) fn roles(&self) -> &RoleStore {
        &self.shared.roles
    }

    pub(crate) fn resolver(&self) -> DispatchResolver<'_> {
        DispatchResolver::new(&self.shared.types, &self.shared.roles, self.shared.config.tie_break)
    }

    /// Define a type marker delegating to `parent`.
    pub fn define_type(&self, name: impl Into<String>, parent: TypeId) -> Result<TypeId> {
        self.shared.types.define(name, parent)
    }

    /// Re-link `ty` under `parent`; see [`TypeRegistry::set_parent`].
    pub fn set_parent(&self, ty: TypeId, parent: TypeId) -> Result<()> {
        self.shared.types.set_parent(ty, parent)
    }

    /// Create an empty generic function. `name` is only used in diagnostics.
    pub fn procedure<R>(&self, name: impl Into<String>) -> Procedure<R> {
        Procedure::new(self.clone(), name.into())
    }

    /// Start building an instance of `ty`.
    pub fn object(&self, ty: TypeId) -> Result<ObjectBuilder> {
        if !self.shared.types.contains(ty) {
            return Err(DispatchError::UnknownType(ty));
        }
        Ok(ObjectBuilder::new(self.shared.ids.object(), ty))
    }

    /// Wrap a native callable as a function value.
    pub fn function<F>(&self, name: impl Into<String>, body: F) -> Value
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let id = self.shared.ids.object();
        Value::Function(Arc::new(Function::new(id, name.into(), Arc::new(body))))
    }

    /// The delegation chain `value` is ranked along.
    pub fn chain_of(&self, value: &Value) -> DelegationChain {
        DelegationChain::of(&self.shared.types, value)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specializer::RoleOwner;

    #[test]
    fn context_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Context>();
        assert_send_sync::<Procedure<Value>>();
        assert_send_sync::<Value>();
    }

    #[test]
    fn object_requires_known_type() {
        let ctx = Context::new();
        let other = Context::new();
        let foreign = other.define_type("Foreign", TypeId::OBJECT).unwrap();

        assert!(matches!(ctx.object(foreign), Err(DispatchError::UnknownType(_))));
        assert!(other.object(foreign).is_ok());
    }

    #[test]
    fn objects_get_distinct_identities() {
        let ctx = Context::new();
        let a = ctx.object(TypeId::OBJECT).unwrap().build();
        let b = ctx.object(TypeId::OBJECT).unwrap().build();
        assert_ne!(a, b);
        assert_ne!(RoleOwner::of_value(&a), RoleOwner::of_value(&b));
    }

    #[test]
    fn function_values_are_callable() {
        let ctx = Context::new();
        let double = ctx.function("double", |args| {
            Ok(Value::Int(args[0].as_int().unwrap_or_default() * 2))
        });

        let func = double.as_function().unwrap();
        assert_eq!(func.name(), "double");
        assert_eq!(func.call(&[Value::Int(21)]).unwrap(), Value::Int(42));
        assert_eq!(double.type_of(), TypeId::FUNCTION);
    }

    #[test]
    fn clones_share_state() {
        let ctx = Context::new();
        let clone = ctx.clone();
        let shape = clone.define_type("Shape", TypeId::OBJECT).unwrap();
        assert!(ctx.types().contains(shape));
        assert_eq!(ctx.chain_of(&Value::Type(shape)).len(), 3);
    }
}
