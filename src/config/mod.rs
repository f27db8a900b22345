use crate::error::TagError;
use crate::types::ProjectInfo;
use eyre::Result;
use std::collections::BTreeMap;
use std::fs;

/// Placeholder in endpoint templates that is replaced by the API key.
pub const API_KEY_PLACEHOLDER: &str = "[api-key]";

/// Root format of networks.json: { "project": { name, website }, "networks": { "<chainId>": "<url template>" } }
#[derive(serde::Deserialize)]
struct NetworksFile {
    project: ProjectInfo,
    networks: BTreeMap<String, String>,
}

/// Static mapping from chain id to subgraph endpoint template.
#[derive(Debug, Clone)]
pub struct EndpointTable {
    templates: BTreeMap<String, String>,
}

impl EndpointTable {
    /// Every template must contain [`API_KEY_PLACEHOLDER`] and be keyed by an integer chain id.
    pub fn new(templates: BTreeMap<String, String>) -> Result<Self, TagError> {
        for (id, template) in &templates {
            if id.parse::<u64>().is_err() {
                return Err(TagError::Config(format!(
                    "network id {:?} is not an integer chain id",
                    id
                )));
            }
            if !template.contains(API_KEY_PLACEHOLDER) {
                return Err(TagError::Config(format!(
                    "endpoint for network {} has no {} placeholder",
                    id, API_KEY_PLACEHOLDER
                )));
            }
        }
        Ok(Self { templates })
    }

    /// Supported network ids in ascending order.
    pub fn supported(&self) -> Vec<String> {
        let mut ids: Vec<&String> = self.templates.keys().collect();
        ids.sort_by_key(|id| id.parse::<u64>().unwrap_or(u64::MAX));
        ids.into_iter().cloned().collect()
    }

    pub fn resolve(&self, network_id: &str, credential: &str) -> Result<String, TagError> {
        let template = network_id
            .parse::<u64>()
            .ok()
            .and_then(|_| self.templates.get(network_id))
            .ok_or_else(|| TagError::UnsupportedNetwork {
                requested: network_id.to_string(),
                supported: self.supported(),
            })?;

        Ok(template.replace(API_KEY_PLACEHOLDER, &urlencoding::encode(credential)))
    }
}

#[derive(Debug, Clone)]
pub struct NetworksConfig {
    pub project: ProjectInfo,
    pub endpoints: EndpointTable,
}

/// Load networks.json. Expects format: { "project": { name, website }, "networks": { "1": "https://.../[api-key]/..." } }.
pub fn load_networks_file(path: &str) -> Result<NetworksConfig> {
    let content = fs::read_to_string(path)?;
    let file: NetworksFile = serde_json::from_str(&content)?;

    if file.networks.is_empty() {
        tracing::warn!("{} lists no networks", path);
    }

    Ok(NetworksConfig {
        project: file.project,
        endpoints: EndpointTable::new(file.networks)?,
    })
}
