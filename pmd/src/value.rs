//! Runtime values that flow through dispatch.
//!
//! Primitive values (`Bool`, `Int`, `Float`, `Str`) cannot carry state of
//! their own, so they are identified by a [`ValueKey`] normalized from their
//! content. Objects and functions are reference values identified by their
//! [`ObjectId`]. A `Type` value is a type marker passed as an argument.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::Result;
use crate::hierarchy::TypeId;
use crate::ids::ObjectId;

/// Signature of a native function value.
pub type NativeFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A dynamically typed argument or result.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Object(Arc<Object>),
    Function(Arc<Function>),
    Type(TypeId),
}

/// Normalized identity of a value, used to key its role table.
///
/// Integral floats key as integers (`1.0` and `1` share a key, as do `0.0`
/// and `-0.0`), and every NaN shares one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(Arc<str>),
    Ref(ObjectId),
}

// 2^63 as f64; every integral float in [-2^63, 2^63) fits an i64 exactly.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn float_key(f: f64) -> ValueKey {
    if f.is_nan() {
        return ValueKey::Float(f64::NAN.to_bits());
    }
    if f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f) {
        ValueKey::Int(f as i64)
    } else {
        ValueKey::Float(f.to_bits())
    }
}

impl Value {
    /// Content key for primitives, identity key for reference values.
    /// `None` for type markers, which own their role tables directly.
    pub fn key(&self) -> Option<ValueKey> {
        let key = match self {
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(i) => ValueKey::Int(*i),
            Value::Float(f) => float_key(*f),
            Value::Str(s) => ValueKey::Str(Arc::clone(s)),
            Value::Object(obj) => ValueKey::Ref(obj.id),
            Value::Function(func) => ValueKey::Ref(func.id),
            Value::Type(_) => return None,
        };
        Some(key)
    }

    /// The marker this value delegates to first.
    ///
    /// For a `Type` value this is the marker itself.
    pub fn type_of(&self) -> TypeId {
        match self {
            Value::Bool(_) => TypeId::BOOLEAN,
            Value::Int(_) | Value::Float(_) => TypeId::NUMBER,
            Value::Str(_) => TypeId::STRING,
            Value::Object(obj) => obj.ty,
            Value::Function(_) => TypeId::FUNCTION,
            Value::Type(ty) => *ty,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value of an `Int` or `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(&**obj),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(func) => Some(&**func),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Type(a), Value::Type(b)) => a == b,
            _ => match (self.key(), other.key()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Object(obj) => write!(f, "<object {}>", obj.id),
            Value::Function(func) => write!(f, "<fn {}>", func.name),
            Value::Type(ty) => write!(f, "<{}>", ty),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<TypeId> for Value {
    fn from(ty: TypeId) -> Self {
        Value::Type(ty)
    }
}

/// An instance of a type marker. Fields are plain data and immutable once
/// the object is built.
#[derive(Debug)]
pub struct Object {
    id: ObjectId,
    ty: TypeId,
    fields: IndexMap<String, Value>,
}

impl Object {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn ty(&self) -> TypeId {
        self.ty
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Builder returned by [`Context::object`](crate::Context::object).
#[derive(Debug)]
pub struct ObjectBuilder {
    id: ObjectId,
    ty: TypeId,
    fields: IndexMap<String, Value>,
}

impl ObjectBuilder {
    pub(crate) fn new(id: ObjectId, ty: TypeId) -> Self {
        Self {
            id,
            ty,
            fields: IndexMap::new(),
        }
    }

    /// Set a field, replacing any earlier value under the same name.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Value {
        Value::Object(Arc::new(Object {
            id: self.id,
            ty: self.ty,
            fields: self.fields,
        }))
    }
}

/// A callable reference value.
pub struct Function {
    id: ObjectId,
    name: String,
    body: Arc<NativeFn>,
}

impl Function {
    pub(crate) fn new(id: ObjectId, name: String, body: Arc<NativeFn>) -> Self {
        Self { id, name, body }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.body)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
