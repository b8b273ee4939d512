//! Multiple dispatch over delegation chains.
//!
//! Every argument position is ranked independently: a method registered at
//! an owner `d` steps up an argument's delegation chain scores `d` at that
//! position. A method is a candidate once it is ranked at every position,
//! and candidates are ordered by their rank vectors, left to right.
//!
//! # Module Structure
//!
//! - [`rank`] - Per-call rank records
//! - [`resolver`] - The lookup algorithm and its result types

mod rank;
mod resolver;


pub use rank::RankRecord;

pub use resolver::{
    Candidate,
    DispatchResolver,
    LookupResult,
    MethodTable,
};
