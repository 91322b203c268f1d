//! Pure view derivation: `sort(filter(collection))`.

use std::cmp::Ordering;

use crate::domain::{FilterCriteria, PokemonSummary, SortOrder, TypeMatch};

/// Keep items matching every criterion, preserving input order.
///
/// `is_favorite` on the items must already carry the favorite overlay.
pub fn filter(
    items: &[PokemonSummary],
    criteria: &FilterCriteria,
    type_match: TypeMatch,
) -> Vec<PokemonSummary> {
    let query = criteria.query().to_lowercase();
    let selected: Vec<String> = criteria
        .selected_types
        .iter()
        .map(|t| t.to_lowercase())
        .collect();

    items
        .iter()
        .filter(|item| matches_search(item, &query))
        .filter(|item| matches_types(item, &selected, type_match))
        .filter(|item| !criteria.favorites_only || item.is_favorite)
        .cloned()
        .collect()
}

fn matches_search(item: &PokemonSummary, query: &str) -> bool {
    query.is_empty()
        || item.name.to_lowercase().contains(query)
        || item.id.to_string().contains(query)
        || item.types.iter().any(|t| t.to_lowercase().contains(query))
}

fn matches_types(item: &PokemonSummary, selected: &[String], mode: TypeMatch) -> bool {
    if selected.is_empty() {
        return true;
    }
    let has = |wanted: &String| item.types.iter().any(|t| t.eq_ignore_ascii_case(wanted));
    match mode {
        TypeMatch::Any => selected.iter().any(has),
        TypeMatch::All => selected.iter().all(has),
    }
}

pub fn sort(mut items: Vec<PokemonSummary>, order: SortOrder) -> Vec<PokemonSummary> {
    match order {
        SortOrder::ById => items.sort_by_key(|item| item.id),
        SortOrder::ByNameAscending => items.sort_by(|a, b| by_name(a, b).then(a.id.cmp(&b.id))),
        SortOrder::ByNameDescending => {
            items.sort_by(|a, b| by_name(b, a).then(a.id.cmp(&b.id)))
        }
    }
    items
}

/// Case-sensitive byte order, so `"Zubat"` sorts before `"abra"`.
fn by_name(a: &PokemonSummary, b: &PokemonSummary) -> Ordering {
    a.name.cmp(&b.name)
}
