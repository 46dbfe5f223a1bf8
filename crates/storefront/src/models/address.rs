//! Address book with a single default and a self-healing selection.
//!
//! ## Invariants
//!
//! - A non-empty book has exactly one default address; an empty book has none.
//! - The selection pointer, when set, names an address in the book.
//! - The pointer is unset only when the book is empty.
//!
//! Every mutation restores these before returning. [`AddressBook::from_parts`]
//! restores them for data read back from storage.

use serde::{Deserialize, Serialize};

use tanish_arts_core::{AddressId, PostalAddress};

/// A saved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    #[serde(flatten)]
    pub fields: PostalAddress,
    pub is_default: bool,
}

/// Ordered collection of saved addresses plus the selected-address pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    addresses: Vec<Address>,
    selected: Option<AddressId>,
}

impl AddressBook {
    /// Create an empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            addresses: Vec::new(),
            selected: None,
        }
    }

    /// Rebuild a book from stored records, repairing any broken invariant.
    ///
    /// When several records claim to be the default only the first keeps the
    /// flag; when none does the first record is promoted. The pointer is then
    /// repaired as after any mutation.
    #[must_use]
    pub fn from_parts(addresses: Vec<Address>, selected: Option<AddressId>) -> Self {
        let mut book = Self {
            addresses,
            selected,
        };
        let mut seen_default = false;
        for address in &mut book.addresses {
            if address.is_default && seen_default {
                address.is_default = false;
            }
            seen_default |= address.is_default;
        }
        book.ensure_default();
        book.repair_selection();
        book
    }

    /// Add an address and return the stored record.
    ///
    /// The new address becomes the default (and the selection) when
    /// `make_default` is set or the book was empty. Otherwise it joins as a
    /// non-default entry and the existing default is untouched.
    pub fn add(&mut self, fields: PostalAddress, make_default: bool) -> Address {
        let id = AddressId::generate();
        let becomes_default = make_default || self.addresses.is_empty();

        if becomes_default {
            for address in &mut self.addresses {
                address.is_default = false;
            }
        }

        let address = Address {
            id: id.clone(),
            fields,
            is_default: becomes_default,
        };
        self.addresses.push(address.clone());

        if becomes_default {
            self.selected = Some(id);
        } else if self.ensure_default() {
            // Only reachable if the book was already missing its default.
            self.selected = self.addresses.first().map(|a| a.id.clone());
        }

        self.repair_selection();
        address
    }

    /// Remove the address with `id` and return it, or `None` if absent.
    ///
    /// Removing the default promotes the first remaining address to default
    /// and selects it. Removing the selected (non-default) address moves the
    /// selection to the default.
    pub fn delete(&mut self, id: &AddressId) -> Option<Address> {
        let position = self.addresses.iter().position(|a| &a.id == id)?;
        let removed = self.addresses.remove(position);

        if self.addresses.is_empty() {
            self.selected = None;
        } else if removed.is_default {
            if let Some(first) = self.addresses.first_mut() {
                first.is_default = true;
                self.selected = Some(first.id.clone());
            }
        } else if self.selected.as_ref() == Some(&removed.id) {
            self.selected = self.fallback_id();
        }

        self.repair_selection();
        Some(removed)
    }

    /// Make `id` the only default address and select it.
    ///
    /// Returns `false`, leaving the book untouched, if `id` is not in the book.
    pub fn set_default(&mut self, id: &AddressId) -> bool {
        if !self.contains(id) {
            return false;
        }
        for address in &mut self.addresses {
            address.is_default = &address.id == id;
        }
        self.selected = Some(id.clone());
        true
    }

    /// Select `id` without changing the default.
    ///
    /// Returns `false`, leaving the book untouched, if `id` is not in the book.
    pub fn select(&mut self, id: &AddressId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    /// The address currently in effect.
    ///
    /// Resolved on every call: the selected address if it exists, else the
    /// default, else the first address. `None` only for an empty book.
    #[must_use]
    pub fn current_selection(&self) -> Option<&Address> {
        self.selected
            .as_ref()
            .and_then(|id| self.get(id))
            .or_else(|| self.default_address())
            .or_else(|| self.addresses.first())
    }

    /// Re-point a dangling or missing selection at the default (or first)
    /// address. Returns `true` if the pointer changed.
    ///
    /// Idempotent: a second call right after the first never changes anything.
    pub fn repair_selection(&mut self) -> bool {
        let dangling = self.selected.as_ref().is_some_and(|id| !self.contains(id));
        let missing = self.selected.is_none() && !self.addresses.is_empty();
        if !(dangling || missing) {
            return false;
        }
        let repaired = self.fallback_id();
        let changed = repaired != self.selected;
        self.selected = repaired;
        changed
    }

    #[must_use]
    pub fn get(&self, id: &AddressId) -> Option<&Address> {
        self.addresses.iter().find(|a| &a.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &AddressId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }

    /// The raw selection pointer.
    #[must_use]
    pub const fn selected_id(&self) -> Option<&AddressId> {
        self.selected.as_ref()
    }

    /// Addresses in insertion order.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Default id, falling back to the first address.
    fn fallback_id(&self) -> Option<AddressId> {
        self.default_address()
            .or_else(|| self.addresses.first())
            .map(|a| a.id.clone())
    }

    /// Promote the first address if nothing is default. Returns `true` if it
    /// had to.
    fn ensure_default(&mut self) -> bool {
        if self.addresses.iter().any(|a| a.is_default) {
            return false;
        }
        match self.addresses.first_mut() {
            Some(first) => {
                first.is_default = true;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn fields(name: &str) -> PostalAddress {
        PostalAddress {
            full_name: name.to_string(),
            street: "1 Hawa Mahal Rd".to_string(),
            city: "Jaipur".to_string(),
            state: "Rajasthan".to_string(),
            postal_code: "302002".to_string(),
            country: "India".to_string(),
            ..PostalAddress::default()
        }
    }

    fn default_count(book: &AddressBook) -> usize {
        book.addresses().iter().filter(|a| a.is_default).count()
    }

    fn assert_invariants(book: &AddressBook) {
        if book.is_empty() {
            assert_eq!(default_count(book), 0);
            assert!(book.selected_id().is_none());
            assert!(book.current_selection().is_none());
        } else {
            assert_eq!(default_count(book), 1);
            let selected = book.selected_id().unwrap();
            assert!(book.contains(selected));
            assert!(book.contains(&book.current_selection().unwrap().id));
        }
    }

    #[test]
    fn test_first_address_becomes_default() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), false);
        assert!(a.is_default);
        assert_eq!(book.selected_id(), Some(&a.id));
        assert_invariants(&book);
    }

    #[test]
    fn test_add_non_default_keeps_existing_default() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), true);
        let b = book.add(fields("B"), false);

        assert!(!b.is_default);
        assert_eq!(book.default_address().unwrap().id, a.id);
        assert_eq!(book.current_selection().unwrap().id, a.id);
        assert_invariants(&book);
    }

    #[test]
    fn test_add_default_moves_default_and_selection() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), true);
        let b = book.add(fields("B"), true);

        assert!(!book.get(&a.id).unwrap().is_default);
        assert_eq!(book.default_address().unwrap().id, b.id);
        assert_eq!(book.selected_id(), Some(&b.id));
        assert_invariants(&book);
    }

    #[test]
    fn test_delete_default_promotes_first_remaining() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), true);
        let b = book.add(fields("B"), false);

        let removed = book.delete(&a.id).unwrap();
        assert_eq!(removed.id, a.id);
        assert_eq!(book.default_address().unwrap().id, b.id);
        assert_eq!(book.selected_id(), Some(&b.id));
        assert_invariants(&book);
    }

    #[test]
    fn test_delete_selected_non_default_reselects_default() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), true);
        let b = book.add(fields("B"), false);
        assert!(book.select(&b.id));

        book.delete(&b.id);
        assert_eq!(book.selected_id(), Some(&a.id));
        assert_invariants(&book);
    }

    #[test]
    fn test_delete_unselected_non_default_keeps_selection() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), true);
        let b = book.add(fields("B"), false);
        let c = book.add(fields("C"), false);
        assert!(book.select(&c.id));

        book.delete(&b.id);
        assert_eq!(book.selected_id(), Some(&c.id));
        assert_eq!(book.default_address().unwrap().id, a.id);
        assert_invariants(&book);
    }

    #[test]
    fn test_delete_last_address_clears_selection() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), false);
        book.delete(&a.id);
        assert!(book.is_empty());
        assert_invariants(&book);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut book = AddressBook::new();
        book.add(fields("A"), true);
        let before = book.clone();
        assert!(book.delete(&AddressId::new("addr-missing")).is_none());
        assert_eq!(book, before);
    }

    #[test]
    fn test_set_default() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), true);
        let b = book.add(fields("B"), false);

        assert!(book.set_default(&b.id));
        assert!(!book.get(&a.id).unwrap().is_default);
        assert!(book.get(&b.id).unwrap().is_default);
        assert_eq!(book.selected_id(), Some(&b.id));
        assert_invariants(&book);
    }

    #[test]
    fn test_set_default_unknown_is_noop() {
        let mut book = AddressBook::new();
        book.add(fields("A"), true);
        let before = book.clone();
        assert!(!book.set_default(&AddressId::new("addr-missing")));
        assert_eq!(book, before);
    }

    #[test]
    fn test_select_does_not_move_default() {
        let mut book = AddressBook::new();
        let a = book.add(fields("A"), true);
        let b = book.add(fields("B"), false);
        assert!(book.select(&b.id));
        assert_eq!(book.current_selection().unwrap().id, b.id);
        assert_eq!(book.default_address().unwrap().id, a.id);
    }

    #[test]
    fn test_from_parts_repairs_dangling_pointer() {
        let mut source = AddressBook::new();
        let a = source.add(fields("A"), false);
        let b = source.add(fields("B"), false);

        let book = AddressBook::from_parts(
            source.addresses().to_vec(),
            Some(AddressId::new("addr-gone")),
        );
        assert_eq!(book.selected_id(), Some(&a.id));
        assert_ne!(book.selected_id(), Some(&b.id));
        assert_invariants(&book);
    }

    #[test]
    fn test_from_parts_repairs_defaults() {
        let mut records = Vec::new();
        for (name, is_default) in [("A", false), ("B", true), ("C", true)] {
            records.push(Address {
                id: AddressId::generate(),
                fields: fields(name),
                is_default,
            });
        }
        let b_id = records.get(1).unwrap().id.clone();

        let book = AddressBook::from_parts(records.clone(), None);
        assert_eq!(book.default_address().unwrap().id, b_id);
        assert_eq!(book.selected_id(), Some(&b_id));
        assert_invariants(&book);

        for record in &mut records {
            record.is_default = false;
        }
        let book = AddressBook::from_parts(records, None);
        assert_eq!(book.default_address().unwrap().fields.full_name, "A");
        assert_invariants(&book);
    }

    #[test]
    fn test_repair_selection_is_idempotent() {
        let mut book = AddressBook::from_parts(
            vec![Address {
                id: AddressId::new("addr-1"),
                fields: fields("A"),
                is_default: true,
            }],
            None,
        );
        assert!(!book.repair_selection());
        assert_eq!(book.selected_id(), Some(&AddressId::new("addr-1")));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(bool),
        Delete(usize),
        SetDefault(usize),
        Select(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Add),
            (0_usize..8).prop_map(Op::Delete),
            (0_usize..8).prop_map(Op::SetDefault),
            (0_usize..8).prop_map(Op::Select),
        ]
    }

    /// Resolve an index against the current records; out of range names a missing id.
    fn target(book: &AddressBook, index: usize) -> AddressId {
        book.addresses()
            .get(index)
            .map_or_else(|| AddressId::new("addr-missing"), |a| a.id.clone())
    }

    fn default_id(book: &AddressBook) -> Option<AddressId> {
        book.default_address().map(|a| a.id.clone())
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

        #[test]
        fn invariants_hold_over_operation_sequences(
            ops in proptest::collection::vec(op_strategy(), 0..40)
        ) {
            let mut book = AddressBook::new();
            for (step, op) in ops.into_iter().enumerate() {
                match op {
                    Op::Add(make_default) => {
                        let before = default_id(&book);
                        let added = book.add(fields(&format!("N{step}")), make_default);
                        if make_default || before.is_none() {
                            prop_assert!(added.is_default);
                        } else {
                            prop_assert_eq!(default_id(&book), before);
                        }
                    }
                    Op::Delete(index) => {
                        let id = target(&book, index);
                        let existed = book.contains(&id);
                        prop_assert_eq!(book.delete(&id).is_some(), existed);
                    }
                    Op::SetDefault(index) => {
                        let id = target(&book, index);
                        if book.set_default(&id) {
                            prop_assert_eq!(&book.default_address().unwrap().id, &id);
                            prop_assert_eq!(book.selected_id(), Some(&id));
                        }
                    }
                    Op::Select(index) => {
                        let id = target(&book, index);
                        let before = default_id(&book);
                        if book.select(&id) {
                            prop_assert_eq!(&book.current_selection().unwrap().id, &id);
                        }
                        prop_assert_eq!(default_id(&book), before);
                    }
                }
                assert_invariants(&book);
            }

            let addresses = book.addresses().to_vec();
            let reloaded = AddressBook::from_parts(addresses, book.selected_id().cloned());
            prop_assert_eq!(&reloaded, &book);
        }
    }

    #[test]
    fn test_record_format() {
        let mut book = AddressBook::new();
        book.add(fields("A"), true);
        let json = serde_json::to_value(book.addresses()).unwrap();
        let record = json.get(0).unwrap();
        assert!(record.get("id").is_some());
        assert_eq!(record.get("isDefault"), Some(&serde_json::Value::Bool(true)));
        assert_eq!(
            record.get("fullName"),
            Some(&serde_json::Value::String("A".to_string()))
        );
    }
}
