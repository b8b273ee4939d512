//! Role tables: which methods each owner plays a role in.
//!
//! Owners never carry their tables themselves. The store maps each owner to
//! a slot in an arena of tables; a slot is allocated on the first write for
//! that owner and lives as long as the store. Each table has its own lock,
//! so registering against one owner does not stall lookups on the others.
//!
//! ```text
//! owners: RoleOwner ──► slot
//! tables: [slot] ──► RwLock<RoleTable>
//!                      (selector, position) ──► [MethodId, ...]
//! ```

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ids::{MethodId, SelectorId};
use crate::specializer::RoleOwner;

/// One argument slot of one procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Role {
    /// The procedure this role belongs to.
    pub selector: SelectorId,
    /// Zero-based argument position.
    pub position: usize,
}

impl Role {
    pub fn new(selector: SelectorId, position: usize) -> Self {
        Self { selector, position }
    }
}

/// The side table of a single owner.
#[derive(Debug, Default)]
pub struct RoleTable {
    entries: FxHashMap<Role, Vec<MethodId>>,
}

impl RoleTable {
    /// Append `method` to the entry for `role`, keeping insertion order.
    pub fn record(&mut self, role: Role, method: MethodId) {
        self.entries.entry(role).or_default().push(method);
    }

    pub fn get(&self, role: Role) -> Option<&[MethodId]> {
        self.entries.get(&role).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Arena of role tables shared by every procedure of a context.
#[derive(Debug, Default)]
pub struct RoleStore {
    owners: RwLock<FxHashMap<RoleOwner, usize>>,
    tables: RwLock<Vec<RwLock<RoleTable>>>,
}

impl RoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `method` under `(selector, position)` at `owner`.
    pub fn record(&self, owner: &RoleOwner, selector: SelectorId, position: usize, method: MethodId) {
        let slot = self.slot_for(owner);
        let tables = self.tables.read();
        tables[slot].write().record(Role::new(selector, position), method);
    }

    /// Methods recorded under `(selector, position)` at `owner`, in
    /// registration order. `None` if nothing was ever recorded there.
    pub fn lookup(&self, owner: &RoleOwner, selector: SelectorId, position: usize) -> Option<Vec<MethodId>> {
        let slot = *self.owners.read().get(owner)?;
        let tables = self.tables.read();
        let table = tables[slot].read();
        table.get(Role::new(selector, position)).map(<[MethodId]>::to_vec)
    }

    /// Number of owners that have a table.
    pub fn owner_count(&self) -> usize {
        self.owners.read().len()
    }

    fn slot_for(&self, owner: &RoleOwner) -> usize {
        if let Some(&slot) = self.owners.read().get(owner) {
            return slot;
        }

        let mut owners = self.owners.write();
        // Another writer may have allocated the slot between the two locks.
        if let Some(&slot) = owners.get(owner) {
            return slot;
        }
        let mut tables = self.tables.write();
        let slot = tables.len();
        tables.push(RwLock::new(RoleTable::default()));
        owners.insert(owner.clone(), slot);
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::TypeId;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn sel(raw: u64) -> SelectorId {
        SelectorId::from_raw(raw)
    }

    fn method(raw: u64) -> MethodId {
        MethodId::from_raw(raw)
    }

    #[test]
    fn record_appends_in_order() {
        let store = RoleStore::new();
        let owner = RoleOwner::Type(TypeId::STRING);

        store.record(&owner, sel(1), 0, method(10));
        store.record(&owner, sel(1), 0, method(11));

        assert_eq!(store.lookup(&owner, sel(1), 0), Some(vec![method(10), method(11)]));
        assert_eq!(store.owner_count(), 1);
    }

    #[test]
    fn roles_are_keyed_by_selector_and_position() {
        let store = RoleStore::new();
        let owner = RoleOwner::ROOT;

        store.record(&owner, sel(1), 0, method(10));
        store.record(&owner, sel(2), 0, method(20));
        store.record(&owner, sel(1), 1, method(11));

        assert_eq!(store.lookup(&owner, sel(1), 0), Some(vec![method(10)]));
        assert_eq!(store.lookup(&owner, sel(2), 0), Some(vec![method(20)]));
        assert_eq!(store.lookup(&owner, sel(1), 1), Some(vec![method(11)]));
        assert_eq!(store.lookup(&owner, sel(2), 1), None);
    }

    #[test]
    fn lookup_on_fresh_owner_allocates_nothing() {
        let store = RoleStore::new();
        let owner = RoleOwner::of_value(&Value::from("foo"));
        assert_eq!(store.lookup(&owner, sel(1), 0), None);
        assert_eq!(store.owner_count(), 0);
    }

    #[test]
    fn equal_primitives_share_a_table() {
        let store = RoleStore::new();
        store.record(&RoleOwner::of_value(&Value::from("foo")), sel(1), 0, method(10));
        store.record(&RoleOwner::of_value(&Value::from(String::from("foo"))), sel(1), 0, method(11));

        assert_eq!(store.owner_count(), 1);
        assert_eq!(
            store.lookup(&RoleOwner::of_value(&Value::from("foo")), sel(1), 0),
            Some(vec![method(10), method(11)])
        );
    }

    #[test]
    fn table_counts_roles() {
        let mut table = RoleTable::default();
        assert!(table.is_empty());
        table.record(Role::new(sel(1), 0), method(1));
        table.record(Role::new(sel(1), 0), method(2));
        table.record(Role::new(sel(1), 1), method(3));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(Role::new(sel(1), 0)), Some(&[method(1), method(2)][..]));
    }
}
