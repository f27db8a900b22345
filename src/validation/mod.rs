use crate::types::{Market, Rejection};
use regex::Regex;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

/// A text field is usable when it is not blank and carries no markup.
pub fn is_valid(text: &str) -> bool {
    !text.trim().is_empty() && !TAG_PATTERN.is_match(text)
}

/// Check `name` and `symbol` of every token of the market.
/// Returns one rejection per failing field; an empty list means the market is usable.
pub fn check_market(market: &Market) -> Vec<Rejection> {
    let mut rejections = Vec::new();
    for (label, token) in market.tokens() {
        for (field, value) in [("name", &token.name), ("symbol", &token.symbol)] {
            if !is_valid(value) {
                rejections.push(Rejection {
                    entity_id: market.id.clone(),
                    field: format!("{}.{}", label, field),
                    value: value.clone(),
                });
            }
        }
    }
    rejections
}
