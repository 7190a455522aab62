//! Property values and the ordered property map.
//!
//! Header-block properties hold either a single text value, an ordered list
//! of text values, or nothing at all (key present, no value). The merge and
//! removal semantics around that duality live here; `Document` delegates to
//! this module for all metadata mutation.

/// Value of a single property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Key present, no value.
    Empty,
    /// Single text value.
    Scalar(String),
    /// Ordered list of text values.
    List(Vec<String>),
}

impl PropertyValue {
    /// Check whether the value matches or contains `value`.
    ///
    /// Lists match on membership, scalars on equality. `Empty` matches
    /// nothing.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            PropertyValue::Empty => false,
            PropertyValue::Scalar(s) => s == value,
            PropertyValue::List(items) => items.iter().any(|v| v == value),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PropertyValue::Empty)
    }
}

/// An ordered mapping from property key to [`PropertyValue`].
///
/// Insertion order is significant and survives every mutation; it reflects
/// the display order a user expects in the header block. Lookup is linear,
/// which is fine at header-block sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut PropertyValue> {
        self.position(key).map(|i| &mut self.entries[i].1)
    }

    /// Insert `value` under `key`, replacing any existing value in place
    /// (the key keeps its position) or appending a new entry.
    pub fn insert(&mut self, key: impl Into<String>, value: PropertyValue) {
        let key = key.into();
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove the entry for `key` entirely, returning its value.
    pub fn remove_entry(&mut self, key: &str) -> Option<PropertyValue> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Add a value under `key` with merge semantics.
    ///
    /// - Absent key: inserts `Scalar(value)`, or `Empty` when `value` is
    ///   `None`. (An empty list is seeded via [`PropertyMap::insert`].)
    /// - Existing list: a value already in the list is left alone; otherwise
    ///   `overwrite` replaces the whole list with `[value]`, and the default
    ///   appends in order. Lists accumulate like tags.
    /// - Existing scalar: an equal value is left alone; `overwrite` replaces
    ///   it; otherwise the property is promoted to the two-element list
    ///   `[old, value]`.
    /// - Existing `Empty`: the value is set directly, no promotion. An empty
    ///   slot holds nothing worth preserving.
    pub fn add(&mut self, key: &str, value: Option<&str>, overwrite: bool) {
        let Some(idx) = self.position(key) else {
            let seeded = match value {
                Some(v) => PropertyValue::Scalar(v.to_string()),
                None => PropertyValue::Empty,
            };
            self.entries.push((key.to_string(), seeded));
            return;
        };

        let current = &mut self.entries[idx].1;
        match current {
            PropertyValue::List(items) => {
                let Some(v) = value else { return };
                if items.iter().any(|i| i == v) {
                    return;
                }
                if overwrite {
                    *current = PropertyValue::List(vec![v.to_string()]);
                } else {
                    items.push(v.to_string());
                }
            }
            PropertyValue::Scalar(old) => match value {
                Some(v) if *old == v => {}
                Some(v) => {
                    if overwrite {
                        *current = PropertyValue::Scalar(v.to_string());
                    } else {
                        let old = std::mem::take(old);
                        *current = PropertyValue::List(vec![old, v.to_string()]);
                    }
                }
                None => {
                    if overwrite {
                        *current = PropertyValue::Empty;
                    }
                }
            },
            PropertyValue::Empty => {
                if let Some(v) = value {
                    *current = PropertyValue::Scalar(v.to_string());
                }
            }
        }
    }

    /// Remove a value (or the whole key, with `remove_key`).
    ///
    /// - Existing list: removes the single matching occurrence of `value`;
    ///   a list emptied this way collapses to `Empty` so the key stays
    ///   present but valueless.
    /// - Existing scalar: cleared to `Empty` regardless of `value`.
    /// - Absent key: no-op.
    pub fn remove(&mut self, key: &str, value: Option<&str>, remove_key: bool) {
        let Some(idx) = self.position(key) else { return };

        if remove_key {
            self.entries.remove(idx);
            return;
        }

        let current = &mut self.entries[idx].1;
        match current {
            PropertyValue::List(items) => {
                let Some(v) = value else { return };
                if let Some(pos) = items.iter().position(|i| i == v) {
                    items.remove(pos);
                    if items.is_empty() {
                        *current = PropertyValue::Empty;
                    }
                }
            }
            PropertyValue::Scalar(_) => *current = PropertyValue::Empty,
            PropertyValue::Empty => {}
        }
    }

    /// Re-sort the key order.
    ///
    /// Keys appearing in `order` are arranged among themselves by their index
    /// in `order`; all other keys keep their pre-existing relative order. The
    /// listed group goes first when `listed_first`, last otherwise. Both
    /// groups are stable.
    pub fn reorder(&mut self, order: &[String], listed_first: bool) {
        let entries = std::mem::take(&mut self.entries);
        let mut listed = Vec::new();
        let mut rest = Vec::new();

        for entry in entries {
            if order.iter().any(|k| k == &entry.0) {
                listed.push(entry);
            } else {
                rest.push(entry);
            }
        }

        listed.sort_by_key(|(k, _)| order.iter().position(|o| o == k).unwrap_or(usize::MAX));

        self.entries = if listed_first {
            listed.into_iter().chain(rest).collect()
        } else {
            rest.into_iter().chain(listed).collect()
        };
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}
