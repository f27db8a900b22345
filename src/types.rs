use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    #[serde(deserialize_with = "de_big_int")]
    pub created_timestamp: u64,
    pub output_token: Token,
    #[serde(rename = "sToken")]
    pub s_token: Token,
    #[serde(rename = "vToken")]
    pub v_token: Token,
}

impl Market {
    /// The three tokens of the market with the field name they were fetched under.
    pub fn tokens(&self) -> [(&'static str, &Token); 3] {
        [
            ("outputToken", &self.output_token),
            ("sToken", &self.s_token),
            ("vToken", &self.v_token),
        ]
    }
}

/// Subgraph `BigInt` scalars arrive as JSON strings; plain integers are accepted too.
fn de_big_int<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BigInt {
        Text(String),
        Number(u64),
    }

    match BigInt::deserialize(deserializer)? {
        BigInt::Number(n) => Ok(n),
        BigInt::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// One row for the address-tag registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaggingRecord {
    pub contract_address: String,
    pub public_name_tag: String,
    pub project_name: String,
    pub website_link: String,
    pub public_note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub website: String,
}

/// A market excluded from the output because one of its text fields is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub entity_id: String,
    pub field: String,
    pub value: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rejected market {}: invalid {} {:?}",
            self.entity_id, self.field, self.value
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagReport {
    pub tags: Vec<TaggingRecord>,
    pub rejections: Vec<Rejection>,
}
