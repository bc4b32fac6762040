//! Exact-match and prefix indexes over definition names.
//!
//! Both indexes key every definition under the case-folded form of each
//! of its two language names. They hold shared handles into the catalog
//! and own no entities.

use crate::core::types::Definition;
use std::collections::HashMap;

/// Shortest prefix the prefix index answers
pub const MIN_PREFIX_LEN: usize = 2;

/// Case-folded whole-name lookup
#[derive(Debug, Default)]
pub struct HashIndex {
    map: HashMap<String, Vec<Definition>>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, definition: Definition) {
        self.map.entry(key).or_default().push(definition);
    }

    /// Exact lookup; the key is case-folded before the probe.
    pub fn get(&self, key: &str) -> &[Definition] {
        self.map
            .get(&key.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Prefix lookup over a sorted key list.
///
/// Keys are stored once and scanned by range instead of materializing
/// every prefix, bounding memory to one entry per (name, definition).
#[derive(Debug, Default)]
pub struct StartWithIndex {
    entries: Vec<(String, Definition)>,
}

impl StartWithIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, definition: Definition) {
        self.entries.push((key, definition));
    }

    /// Sort entries; must run once after the last insert.
    pub fn seal(&mut self) {
        self.entries
            .sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name_ru().cmp(b.1.name_ru())));
    }

    /// All definitions whose key starts with `prefix` (case-folded),
    /// shorter keys first, ties broken lexicographically.
    ///
    /// Prefixes below [`MIN_PREFIX_LEN`] characters match nothing.
    pub fn get(&self, prefix: &str) -> Vec<Definition> {
        let prefix = prefix.to_lowercase();
        if prefix.chars().count() < MIN_PREFIX_LEN {
            return Vec::new();
        }

        let start = self.entries.partition_point(|(k, _)| k.as_str() < prefix.as_str());
        let mut hits: Vec<&(String, Definition)> = self.entries[start..]
            .iter()
            .take_while(|(k, _)| k.starts_with(&prefix))
            .collect();

        hits.sort_by(|a, b| {
            let len_a = a.0.chars().count();
            let len_b = b.0.chars().count();
            len_a.cmp(&len_b).then_with(|| a.0.cmp(&b.0))
        });

        hits.into_iter().map(|(_, d)| d.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The two complementary indexes the strategies run against
#[derive(Debug, Default)]
pub struct SearchIndexes {
    pub hash: HashIndex,
    pub prefix: StartWithIndex,
}

impl SearchIndexes {
    /// Index every definition under each of its language names.
    pub fn build(definitions: impl Iterator<Item = Definition>) -> Self {
        let mut indexes = SearchIndexes::default();

        for def in definitions {
            let ru = def.name_ru().to_lowercase();
            let en = def.name_en().to_lowercase();

            indexes.hash.insert(ru.clone(), def.clone());
            indexes.prefix.insert(ru.clone(), def.clone());

            if en != ru {
                indexes.hash.insert(en.clone(), def.clone());
                indexes.prefix.insert(en, def);
            }
        }

        indexes.prefix.seal();
        indexes
    }
}
