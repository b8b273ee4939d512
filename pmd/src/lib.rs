//! Generic functions with prototype multiple dispatch.
//!
//! A [`Procedure`] holds a family of method bodies, each registered against
//! one [`Specializer`] per argument position. A call selects the single most
//! specific method for the runtime values of *all* arguments.
//!
//! Applicability and specificity both come from delegation chains. The chain
//! of an argument starts at the argument's own identity and climbs through
//! its type marker's ancestors to the universal root `Any`:
//!
//! ```text
//! 56  ->  Number  ->  Object  ->  Any
//! ```
//!
//! A method matches a position when the role table of some owner on that
//! chain lists it; the owner's distance from the argument is the method's
//! rank at that position. The winner is the method ranked at every position
//! with the lexicographically smallest rank vector, so the leftmost
//! argument's specificity dominates.
//!
//! # Example
//!
//! ```
//! use pmd::{Context, Specializer, TypeId, Value};
//!
//! let ctx = Context::new();
//! let shape = ctx.define_type("Shape", TypeId::OBJECT).unwrap();
//! let square = ctx.define_type("Square", shape).unwrap();
//!
//! let describe = ctx.procedure::<&'static str>("describe");
//! describe.method([shape], |_| "a shape").unwrap();
//! describe.method([square], |_| "a square").unwrap();
//! describe.method([Specializer::Any], |_| "something").unwrap();
//!
//! let sq = ctx.object(square).unwrap().field("side", 2).build();
//! assert_eq!(describe.invoke(&[sq]).unwrap(), "a square");
//! assert_eq!(describe.invoke(&[Value::from(56)]).unwrap(), "something");
//! ```

pub mod chain;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod hierarchy;
pub mod ids;
pub mod procedure;
pub mod role;
pub mod specializer;
pub mod value;

pub use chain::DelegationChain;
pub use config::{DispatchConfig, TieBreak};
pub use context::Context;
pub use dispatch::{Candidate, LookupResult};
pub use error::{ConfigError, DispatchError, Result};
pub use hierarchy::{TypeId, TypeRegistry};
pub use ids::{MethodId, ObjectId, SelectorId};
pub use procedure::{Body, Procedure};
pub use specializer::{RoleOwner, Specializer};
pub use value::{Function, Object, ObjectBuilder, Value, ValueKey};
