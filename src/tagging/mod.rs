use crate::types::{Market, ProjectInfo, Rejection, TaggingRecord};
use crate::validation::check_market;

/// Longest display string allowed in a public name tag.
pub const MAX_DISPLAY_LEN: usize = 45;
const ELLIPSIS: &str = "...";
const NAME_TAG_SUFFIX: &str = "Market";

/// Cap `text` at [`MAX_DISPLAY_LEN`] characters, ending truncated text with `...`.
pub fn truncate_display(text: &str) -> String {
    if text.chars().count() <= MAX_DISPLAY_LEN {
        return text.to_string();
    }
    let keep = MAX_DISPLAY_LEN - ELLIPSIS.len();
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBatch {
    pub tags: Vec<TaggingRecord>,
    pub rejections: Vec<Rejection>,
}

/// Turns fetched markets into registry rows for one project.
#[derive(Debug, Clone)]
pub struct TagBuilder {
    project: ProjectInfo,
}

impl TagBuilder {
    pub fn new(project: ProjectInfo) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &ProjectInfo {
        &self.project
    }

    /// A market with any unusable token field is left out entirely and reported in `rejections`.
    pub fn to_tags(&self, network_id: &str, markets: &[Market]) -> TagBatch {
        let mut batch = TagBatch::default();
        for market in markets {
            let rejections = check_market(market);
            if rejections.is_empty() {
                batch.tags.push(self.tag_market(network_id, market));
            } else {
                batch.rejections.extend(rejections);
            }
        }
        batch
    }

    fn tag_market(&self, network_id: &str, market: &Market) -> TaggingRecord {
        let symbols = market
            .tokens()
            .into_iter()
            .map(|(_, token)| token.symbol.as_str())
            .collect::<Vec<_>>()
            .join("/");

        TaggingRecord {
            contract_address: format!("eip155:{}:{}", network_id, market.id),
            public_name_tag: format!("{} {}", truncate_display(&symbols), NAME_TAG_SUFFIX),
            project_name: self.project.name.clone(),
            website_link: self.project.website.clone(),
            public_note: format!(
                "The {} lending market for {} ({}), with stable debt token {} ({}) and variable debt token {} ({}).",
                self.project.name,
                market.output_token.name,
                market.output_token.symbol,
                market.s_token.name,
                market.s_token.symbol,
                market.v_token.name,
                market.v_token.symbol,
            ),
        }
    }
}
