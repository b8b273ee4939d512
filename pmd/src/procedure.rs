//! Generic functions.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::context::Context;
use crate::dispatch::{LookupResult, MethodTable};
use crate::error::{DispatchError, Result};
use crate::ids::{MethodId, SelectorId};
use crate::specializer::Specializer;
use crate::value::{Function, Value};

/// A method body. It receives the full argument list.
pub type Body<R> = Arc<dyn Fn(&[Value]) -> R + Send + Sync>;

struct Method<R> {
    arity: usize,
    body: Body<R>,
}

struct Methods<R> {
    entries: IndexMap<MethodId, Method<R>>,
}

impl<R> MethodTable for Methods<R> {
    fn arity(&self, method: MethodId) -> Option<usize> {
        self.entries.get(&method).map(|m| m.arity)
    }

    fn nullary(&self) -> Vec<MethodId> {
        self.entries
            .iter()
            .filter(|(_, m)| m.arity == 0)
            .map(|(id, _)| *id)
            .collect()
    }
}

/// A generic function: a family of methods selected by the runtime values
/// of all arguments.
///
/// Methods are never removed. A procedure can be shared between threads;
/// registration takes a write lock on the method map only while the body is
/// inserted.
pub struct Procedure<R = Value> {
    name: String,
    selector: SelectorId,
    context: Context,
    methods: RwLock<Methods<R>>,
}

impl<R> Procedure<R> {
    pub(crate) fn new(context: Context, name: String) -> Self {
        let selector = context.ids().selector();
        debug!(procedure = %name, %selector, "created procedure");
        Self {
            name,
            selector,
            context,
            methods: RwLock::new(Methods {
                entries: IndexMap::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> SelectorId {
        self.selector
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn method_count(&self) -> usize {
        self.methods.read().entries.len()
    }

    /// Register `body` for arguments matching `specializers`, one per
    /// position.
    ///
    /// Every type marker is checked against the context before anything is
    /// recorded, so a failed registration leaves no trace. Registering the
    /// same specializers twice keeps both methods.
    pub fn method<I, F>(&self, specializers: I, body: F) -> Result<MethodId>
    where
        I: IntoIterator,
        I::Item: Into<Specializer>,
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
    {
        let specializers: Vec<Specializer> = specializers.into_iter().map(Into::into).collect();
        let types = self.context.types();
        for marker in specializers.iter().filter_map(Specializer::type_marker) {
            if !types.contains(marker) {
                return Err(DispatchError::UnknownType(marker));
            }
        }

        let id = self.context.ids().method();
        let arity = specializers.len();
        // The body goes in before any role entry can lead a lookup to it.
        self.methods.write().entries.insert(
            id,
            Method {
                arity,
                body: Arc::new(body),
            },
        );

        let roles = self.context.roles();
        for (position, specializer) in specializers.iter().enumerate() {
            roles.record(&specializer.resolve(), self.selector, position, id);
        }

        debug!(procedure = %self.name, method = %id, arity, "registered method");
        Ok(id)
    }

    /// Select the method `args` would dispatch to, without running it.
    ///
    /// Fails with [`DispatchError::UnknownType`] if an argument's marker is
    /// not registered in this procedure's context.
    pub fn lookup(&self, args: &[Value]) -> Result<LookupResult> {
        self.check_markers(args)?;
        let methods = self.methods.read();
        Ok(self.context.resolver().resolve(self.selector, args, &*methods))
    }

    /// Dispatch on `args` and run the selected body.
    pub fn invoke(&self, args: &[Value]) -> Result<R> {
        self.check_markers(args)?;
        let body = {
            let methods = self.methods.read();
            let method = match self.context.resolver().resolve(self.selector, args, &*methods) {
                LookupResult::Resolved(candidate) => candidate.method,
                LookupResult::NoMatch => return Err(self.no_applicable_method(args)),
                LookupResult::Ambiguous(candidates) => {
                    return Err(DispatchError::AmbiguousMethod {
                        procedure: self.name.clone(),
                        candidates: candidates.into_iter().map(|c| c.method).collect(),
                    });
                }
            };
            match methods.entries.get(&method) {
                Some(m) => Arc::clone(&m.body),
                None => return Err(self.no_applicable_method(args)),
            }
        };
        // The lock is released here so bodies may dispatch recursively.
        Ok(body(args))
    }

    fn check_markers(&self, args: &[Value]) -> Result<()> {
        let types = self.context.types();
        match args.iter().map(Value::type_of).find(|ty| !types.contains(*ty)) {
            Some(ty) => Err(DispatchError::UnknownType(ty)),
            None => Ok(()),
        }
    }

    fn no_applicable_method(&self, args: &[Value]) -> DispatchError {
        DispatchError::NoApplicableMethod {
            procedure: self.name.clone(),
            arguments: args.iter().map(|arg| self.describe(arg)).collect(),
        }
    }

    fn describe(&self, value: &Value) -> String {
        let types = self.context.types();
        match value {
            Value::Object(obj) => {
                let ty = types.name(obj.ty()).unwrap_or_else(|| obj.ty().to_string());
                format!("<{} {}>", ty, obj.id())
            }
            Value::Type(ty) => types.name(*ty).unwrap_or_else(|| ty.to_string()),
            other => other.to_string(),
        }
    }
}

impl Procedure<Value> {
    /// Wrap this procedure as a function value, so it can be called through
    /// [`Function::call`] or passed as an argument like any other function.
    pub fn into_function(self: Arc<Self>) -> Value {
        let id = self.context.ids().object();
        let name = self.name.clone();
        let body = move |args: &[Value]| self.invoke(args);
        Value::Function(Arc::new(Function::new(id, name, Arc::new(body))))
    }
}

impl<R> fmt::Debug for Procedure<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("name", &self.name)
            .field("selector", &self.selector)
            .field("methods", &self.method_count())
            .finish()
    }
}
