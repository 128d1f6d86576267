//! Held-item store with fingerprint-consistent mutators

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::fingerprint::Fingerprint;

/// Multiset of collected and crafted items.
///
/// Counts are always positive: an entry whose count reaches zero is
/// removed. Mutation goes through [`add`](Inventory::add) and
/// [`remove`](Inventory::remove) so every unit's fingerprint contribution
/// stays in sync with the held counts. Iteration order is element-code
/// order, which keeps renderings and serialized forms deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<Element, u32>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Count held for `element` (zero if absent)
    pub fn count(&self, element: Element) -> u32 {
        self.items.get(&element).copied().unwrap_or(0)
    }

    /// Whether at least `min_count` units of `element` are held
    pub fn has_at_least(&self, element: Element, min_count: u32) -> bool {
        self.count(element) >= min_count
    }

    /// Number of distinct elements held
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units held across all elements
    pub fn total_units(&self) -> u32 {
        self.items.values().sum()
    }

    /// (element, count) pairs in element-code order
    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        self.items.iter().map(|(&element, &count)| (element, count))
    }

    /// Add `count` units of `element`, folding one fingerprint
    /// contribution per unit keyed by the new running count.
    pub(crate) fn add(
        &mut self,
        element: Element,
        count: u32,
        flat_size: usize,
        fingerprint: &mut Fingerprint,
    ) {
        if count == 0 {
            return;
        }
        let entry = self.items.entry(element).or_insert(0);
        for _ in 0..count {
            *entry += 1;
            fingerprint.fold_slot(flat_size, element, *entry);
        }
    }

    /// Remove `count` units of `element`, folding out one contribution per
    /// unit keyed by the running count before each decrement.
    ///
    /// Returns `false` and leaves the inventory and fingerprint untouched
    /// when fewer than `count` units are held.
    pub(crate) fn remove(
        &mut self,
        element: Element,
        count: u32,
        flat_size: usize,
        fingerprint: &mut Fingerprint,
    ) -> bool {
        match self.items.get_mut(&element) {
            Some(held) if *held >= count => {
                for _ in 0..count {
                    fingerprint.fold_slot(flat_size, element, *held);
                    *held -= 1;
                }
                if *held == 0 {
                    self.items.remove(&element);
                }
                true
            }
            _ => false,
        }
    }
}
