//! Context-unique identifiers for procedures, methods and reference values.
//!
//! All three kinds are drawn from one counter owned by the
//! [`Context`](crate::Context), so an id is never reused within a context,
//! not even across kinds.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a procedure's role-table namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SelectorId(u64);

/// Identifies one registered method body.
///
/// Ids increase monotonically, so comparing two method ids of the same
/// context compares their registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(u64);

/// Identity token of a reference value (object or function).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

macro_rules! raw_id {
    ($($ty:ident => $prefix:literal),* $(,)?) => {
        $(
            impl $ty {
                #[cfg(test)]
                pub(crate) const fn from_raw(raw: u64) -> Self {
                    Self(raw)
                }

                /// The raw counter value.
                pub const fn raw(self) -> u64 {
                    self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "#{}"), self.0)
                }
            }
        )*
    };
}

raw_id! {
    SelectorId => "sel",
    MethodId => "method",
    ObjectId => "obj",
}

/// Monotonic id source shared by everything in one context.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    pub fn selector(&self) -> SelectorId {
        SelectorId(self.bump())
    }

    pub fn method(&self) -> MethodId {
        MethodId(self.bump())
    }

    pub fn object(&self) -> ObjectId {
        ObjectId(self.bump())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
