//! Search strategies, tried in fixed priority order.
//!
//! Each strategy is a pure function of the query and the shared
//! read-only context; the engine concatenates their outputs. No state
//! is shared between strategies.

use crate::catalog::Catalog;
use crate::core::types::{ApiType, Definition};
use crate::search::indexes::SearchIndexes;
use crate::search::tokenizer::tokenize;

/// Read-only view the strategies run against
pub struct SearchContext<'a> {
    pub catalog: &'a Catalog,
    pub indexes: &'a SearchIndexes,
}

pub trait SearchStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn search(&self, query: &str, ctx: &SearchContext<'_>) -> Vec<Definition>;
}

/// Priority 1: two-word Russian compound type names.
///
/// `"Справочник Объект"` becomes the candidate `СправочникОбъект`,
/// looked up exactly. Pure case-folded concatenation, no morphology.
pub struct CompoundTypeSearch;

impl SearchStrategy for CompoundTypeSearch {
    fn name(&self) -> &'static str {
        "compound_type"
    }

    fn search(&self, query: &str, ctx: &SearchContext<'_>) -> Vec<Definition> {
        let words: Vec<&str> = query.split_whitespace().collect();
        if words.len() != 2 {
            return Vec::new();
        }
        if !words
            .iter()
            .all(|w| w.chars().all(char::is_alphabetic))
        {
            return Vec::new();
        }

        let joined = format!("{}{}", words[0], words[1]);
        ctx.indexes
            .hash
            .get(&joined)
            .iter()
            .filter(|d| d.kind() == ApiType::Type)
            .cloned()
            .collect()
    }
}

/// Priority 2: `"<Type> <Member>"` / `"<Type>.<Member>"` patterns.
pub struct TypeMemberSearch;

impl SearchStrategy for TypeMemberSearch {
    fn name(&self) -> &'static str {
        "type_member"
    }

    fn search(&self, query: &str, ctx: &SearchContext<'_>) -> Vec<Definition> {
        let query = query.trim();
        let (type_part, member_part) = match split_type_member(query) {
            Some(parts) => parts,
            None => return Vec::new(),
        };

        let member_folded = member_part.to_lowercase();
        let mut exact: Vec<Definition> = Vec::new();
        let mut prefix: Vec<Definition> = Vec::new();

        for hit in ctx.indexes.hash.get(type_part) {
            let type_def = match hit {
                Definition::Type(t) => t,
                _ => continue,
            };

            let members = ctx
                .catalog
                .members_of(&type_def.header.name_ru)
                .unwrap_or_default();

            for member in members {
                if member.header().matches_name(&member_folded) {
                    exact.push(member);
                } else if member.header().name_starts_with(&member_folded) {
                    prefix.push(member);
                }
            }
        }

        prefix.sort_by(|a, b| {
            let len_a = a.name_ru().chars().count();
            let len_b = b.name_ru().chars().count();
            len_a
                .cmp(&len_b)
                .then_with(|| a.name_ru().to_lowercase().cmp(&b.name_ru().to_lowercase()))
        });

        exact.extend(prefix);
        exact
    }
}

fn split_type_member(query: &str) -> Option<(&str, &str)> {
    let (type_part, member_part) = match query.split_once('.') {
        Some(parts) => parts,
        None => query.split_once(char::is_whitespace)?,
    };

    let type_part = type_part.trim();
    let member_part = member_part.trim();
    if type_part.is_empty() || member_part.is_empty() {
        return None;
    }
    Some((type_part, member_part))
}

/// Priority 3: direct index lookup. Exact hash first, prefix when
/// the exact probe comes back empty.
pub struct RegularSearch;

impl SearchStrategy for RegularSearch {
    fn name(&self) -> &'static str {
        "regular"
    }

    fn search(&self, query: &str, ctx: &SearchContext<'_>) -> Vec<Definition> {
        let query = query.trim();
        let exact = ctx.indexes.hash.get(query);
        if !exact.is_empty() {
            return exact.to_vec();
        }
        ctx.indexes.prefix.get(query)
    }
}

/// Priority 4: token subsequence matching over every definition.
///
/// A definition matches when all query tokens appear, in relative
/// order, inside its tokenized name (containment per token, so a query
/// word can sit inside a fused Cyrillic name). Ordered by name token
/// count, then lexicographically.
pub struct WordOrderSearch;

impl SearchStrategy for WordOrderSearch {
    fn name(&self) -> &'static str {
        "word_order"
    }

    fn search(&self, query: &str, ctx: &SearchContext<'_>) -> Vec<Definition> {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return Vec::new();
        }

        let mut matched: Vec<(usize, String, Definition)> = Vec::new();

        for def in ctx.catalog.all_definitions() {
            let mut hit: Option<(usize, String)> = None;
            for name in [def.name_ru(), def.name_en()] {
                let name_tokens = tokenize(name);
                if tokens_match_in_order(&query_tokens, &name_tokens) {
                    hit = Some((name_tokens.len(), name.to_lowercase()));
                    break;
                }
            }
            if let Some((token_count, sort_key)) = hit {
                matched.push((token_count, sort_key, def));
            }
        }

        matched.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        matched.into_iter().map(|(_, _, d)| d).collect()
    }
}

/// Greedy in-order containment of query tokens in name tokens.
fn tokens_match_in_order(query_tokens: &[String], name_tokens: &[String]) -> bool {
    let mut pos = 0;
    for query_token in query_tokens {
        let found = name_tokens[pos..]
            .iter()
            .position(|t| t.contains(query_token.as_str()));
        match found {
            Some(offset) => pos += offset + 1,
            None => return false,
        }
    }
    true
}

/// The four strategies in priority order
pub fn default_strategies() -> Vec<Box<dyn SearchStrategy>> {
    vec![
        Box::new(CompoundTypeSearch),
        Box::new(TypeMemberSearch),
        Box::new(RegularSearch),
        Box::new(WordOrderSearch),
    ]
}
