use crate::config::EndpointTable;
use crate::error::{Stage, TagError};
use crate::subgraph::{GraphTransport, PAGE_SIZE, PageResponse, markets_request};
use crate::tagging::TagBuilder;
use crate::types::{Market, TagReport};
use futures::{TryStreamExt, stream};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Fetches every market of a network and turns it into tagging records.
pub struct TagPipeline {
    endpoints: EndpointTable,
    builder: TagBuilder,
    transport: Arc<dyn GraphTransport>,
}

impl TagPipeline {
    pub fn new(endpoints: EndpointTable, builder: TagBuilder, transport: Arc<dyn GraphTransport>) -> Self {
        Self {
            endpoints,
            builder,
            transport,
        }
    }

    pub async fn produce_tags(&self, network_id: &str, credential: &str) -> Result<TagReport, TagError> {
        let endpoint = self.endpoints.resolve(network_id, credential)?;
        self.fetch_all(network_id, &endpoint).await
    }

    /// Walk the result set in ascending `createdTimestamp` order until a short page.
    pub async fn fetch_all(&self, network_id: &str, endpoint: &str) -> Result<TagReport, TagError> {
        let first = Some(Stage { page: 1, cursor: 0 });

        let pages = stream::try_unfold(first, move |next| async move {
            let Some(stage) = next else {
                return Ok::<_, TagError>(None);
            };
            let markets = self.fetch_page(endpoint, stage).await?;
            let next = if markets.len() == PAGE_SIZE {
                let cursor = next_cursor(&markets, stage)?;
                Some(Stage {
                    page: stage.page + 1,
                    cursor,
                })
            } else {
                None
            };
            Ok(Some((markets, next)))
        });

        let report = pages
            .try_fold(TagReport::default(), move |mut report, markets| async move {
                let batch = self.builder.to_tags(network_id, &markets);
                for rejection in &batch.rejections {
                    warn!("{}", rejection);
                }
                report.tags.extend(batch.tags);
                report.rejections.extend(batch.rejections);
                Ok(report)
            })
            .await?;

        info!(
            "Network {}: {} tags, {} rejected fields",
            network_id,
            report.tags.len(),
            report.rejections.len()
        );
        Ok(report)
    }

    async fn fetch_page(&self, endpoint: &str, stage: Stage) -> Result<Vec<Market>, TagError> {
        let response = self
            .transport
            .post(endpoint, &markets_request(stage.cursor))
            .await
            .map_err(|e| TagError::Unknown {
                stage,
                message: format!("request failed: {e}"),
            })?;

        if !response.is_success() {
            return Err(TagError::Transport {
                stage,
                status: response.status,
                body: response.body.chars().take(200).collect(),
            });
        }

        let page = PageResponse::parse(&response.body).map_err(|e| TagError::Unknown {
            stage,
            message: format!("undecodable response: {e}"),
        })?;

        match page {
            PageResponse::Markets(markets) => {
                info!("Fetched page {} with {} markets", stage.page, markets.len());
                Ok(markets)
            }
            PageResponse::Errors(messages) => {
                for message in &messages {
                    error!("GraphQL error on page {}: {}", stage.page, message);
                }
                Err(TagError::Protocol { stage, messages })
            }
            PageResponse::NoData => Err(TagError::EmptyResult { stage }),
        }
    }
}

/// Highest `createdTimestamp` in a full page; it must move past the current cursor.
fn next_cursor(markets: &[Market], stage: Stage) -> Result<u64, TagError> {
    let max = markets
        .iter()
        .map(|m| m.created_timestamp)
        .max()
        .unwrap_or(stage.cursor);
    if max <= stage.cursor {
        return Err(TagError::Unknown {
            stage,
            message: format!("cursor did not advance past {}", stage.cursor),
        });
    }
    Ok(max)
}
