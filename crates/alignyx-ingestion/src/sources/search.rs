//! RCSB Search API client.
//!
//! Endpoint used:
//!   query: https://search.rcsb.org/rcsbsearch/v2/query

use async_trait::async_trait;
use serde::Deserialize;
use alignyx_common::sandbox::SandboxClient as Client;
use tracing::{debug, instrument};

use super::StructureSearchSource;

const SEARCH_URL: &str = "https://search.rcsb.org/rcsbsearch/v2/query";

/// Attribute holding the UniProt accession of a polymer entity.
const ACCESSION_ATTRIBUTE: &str =
    "rcsb_polymer_entity_container_identifiers.reference_sequence_identifiers.database_accession";

pub struct RcsbSearchClient {
    client: Client,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result_set: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    identifier: String,
}

impl RcsbSearchClient {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new()?,
        })
    }

    fn build_query(accession: &str, max_results: usize) -> serde_json::Value {
        serde_json::json!({
            "query": {
                "type": "terminal",
                "service": "text",
                "parameters": {
                    "attribute": ACCESSION_ATTRIBUTE,
                    "operator": "exact_match",
                    "value": accession,
                }
            },
            "return_type": "entry",
            "request_options": {
                "paginate": { "start": 0, "rows": max_results }
            }
        })
    }
}

#[async_trait]
impl StructureSearchSource for RcsbSearchClient {
    #[instrument(skip(self))]
    async fn search(&self, accession: &str, max_results: usize) -> anyhow::Result<Vec<String>> {
        let body = Self::build_query(accession, max_results);
        let resp = self
            .client
            .post(SEARCH_URL)?
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        // The search API answers an empty result set with 204 No Content.
        if resp.status() == reqwest::StatusCode::NO_CONTENT {
            debug!("search returned no hits for {}", accession);
            return Ok(vec![]);
        }

        let parsed: SearchResponse = resp.json().await?;
        let ids: Vec<String> = parsed
            .result_set
            .into_iter()
            .map(|hit| hit.identifier)
            .collect();

        debug!(?ids, "structure search returned entry ids");
        Ok(ids)
    }
}
