//! Pure derivation of the visible template set from the loaded collection
//! and the query text.

use crate::types::TemplateRecord;

/// Return the indices of the templates whose name matches `query`.
///
/// The query is trimmed and lowercased; an empty query selects the whole
/// collection. Matching is a plain case-insensitive substring test, and the
/// output preserves the collection order. No scoring, no deduplication.
#[must_use]
pub fn filter_templates(templates: &[TemplateRecord], query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..templates.len()).collect();
    }

    templates
        .iter()
        .enumerate()
        .filter(|(_, template)| template.name.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}
