//! The ranked lookup.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::chain::DelegationChain;
use crate::config::TieBreak;
use crate::hierarchy::TypeRegistry;
use crate::ids::{MethodId, SelectorId};
use crate::role::RoleStore;
use crate::value::Value;

use super::rank::RankRecord;

/// What the resolver needs to know about a procedure's methods.
pub trait MethodTable {
    /// Number of specializers `method` was registered with.
    fn arity(&self, method: MethodId) -> Option<usize>;

    /// Methods registered without specializers. They own no role entry, so
    /// a nullary call can only find them through this list.
    fn nullary(&self) -> Vec<MethodId>;
}

/// A fully applicable method and its rank vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The applicable method.
    pub method: MethodId,
    /// Chain distance of the match at each argument position.
    pub ranks: Vec<u32>,
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// The most specific candidate.
    Resolved(Candidate),
    /// No method is applicable at every position.
    NoMatch,
    /// Candidates sharing the best rank vector, in registration order.
    /// Only produced under [`TieBreak::Reject`].
    Ambiguous(Vec<Candidate>),
}

impl LookupResult {
    pub fn method(&self) -> Option<MethodId> {
        match self {
            LookupResult::Resolved(candidate) => Some(candidate.method),
            _ => None,
        }
    }
}

/// Dispatch resolution over one context's hierarchy and role tables.
///
/// # Algorithm
///
/// 1. **Walk**: for each position, walk the argument's delegation chain
/// 2. **Rank**: every method found in a role entry at distance `d` gets
///    `d` recorded for that position, once
/// 3. **Filter**: keep methods ranked at every position whose registered
///    arity equals the call arity
/// 4. **Select**: the lexicographically smallest rank vector wins, so the
///    leftmost position dominates
pub struct DispatchResolver<'a> {
    types: &'a TypeRegistry,
    roles: &'a RoleStore,
    tie_break: TieBreak,
}

impl<'a> DispatchResolver<'a> {
    pub fn new(types: &'a TypeRegistry, roles: &'a RoleStore, tie_break: TieBreak) -> Self {
        Self {
            types,
            roles,
            tie_break,
        }
    }

    /// Rank every method that plays a role for at least one argument.
    ///
    /// Records come back in discovery order.
    pub fn rank(&self, selector: SelectorId, args: &[Value]) -> IndexMap<MethodId, RankRecord> {
        let arity = args.len();
        let mut records: IndexMap<MethodId, RankRecord> = IndexMap::new();

        for (position, arg) in args.iter().enumerate() {
            let chain = DelegationChain::of(self.types, arg);
            for (distance, owner) in chain.ranked() {
                let Some(methods) = self.roles.lookup(owner, selector, position) else {
                    continue;
                };
                for method in methods {
                    trace!(%selector, position, distance, %owner, %method, "role hit");
                    records
                        .entry(method)
                        .or_insert_with(|| RankRecord::new(arity))
                        .fill(position, distance);
                }
            }
        }

        records
    }

    /// Find the most specific method applicable to `args`.
    pub fn resolve(
        &self,
        selector: SelectorId,
        args: &[Value],
        methods: &impl MethodTable,
    ) -> LookupResult {
        let arity = args.len();
        let mut records = self.rank(selector, args);
        if arity == 0 {
            for method in methods.nullary() {
                records.entry(method).or_insert_with(|| RankRecord::new(0));
            }
        }

        let mut candidates: Vec<Candidate> = records
            .into_iter()
            .filter(|(method, _)| methods.arity(*method) == Some(arity))
            .filter_map(|(method, record)| {
                record.into_vector().map(|ranks| Candidate { method, ranks })
            })
            .collect();

        if candidates.is_empty() {
            return LookupResult::NoMatch;
        }

        // Most specific first; equal vectors fall back to registration order.
        candidates.sort_by(|a, b| a.ranks.cmp(&b.ranks).then(a.method.cmp(&b.method)));
        let tied = candidates
            .iter()
            .take_while(|c| c.ranks == candidates[0].ranks)
            .count();

        if tied > 1 {
            match self.tie_break {
                TieBreak::FirstRegistered => {
                    debug!(
                        %selector,
                        tied,
                        winner = %candidates[0].method,
                        "equally specific methods, earliest registration wins"
                    );
                }
                TieBreak::Reject => {
                    candidates.truncate(tied);
                    return LookupResult::Ambiguous(candidates);
                }
            }
        }

        LookupResult::Resolved(candidates.swap_remove(0))
    }
}
