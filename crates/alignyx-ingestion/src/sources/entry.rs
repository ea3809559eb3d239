//! RCSB Data API entry client.
//!
//! Endpoint used:
//!   entry: https://data.rcsb.org/rest/v1/core/entry/{id}

use async_trait::async_trait;
use serde::Deserialize;
use alignyx_common::sandbox::SandboxClient as Client;
use alignyx_common::StructureRecord;
use tracing::{debug, instrument};

use super::EntrySource;

const ENTRY_URL: &str = "https://data.rcsb.org/rest/v1/core/entry";

pub struct RcsbEntryClient {
    client: Client,
}

#[derive(Deserialize)]
struct EntryResponse {
    #[serde(rename = "struct")]
    struct_info: Option<EntryStruct>,
    exptl: Option<Vec<EntryExptl>>,
    rcsb_entry_info: Option<EntryInfo>,
    rcsb_accession_info: Option<AccessionInfo>,
}

#[derive(Deserialize)]
struct EntryStruct {
    title: Option<String>,
}

#[derive(Deserialize)]
struct EntryExptl {
    method: Option<String>,
}

#[derive(Deserialize)]
struct EntryInfo {
    // Values arrive as JSON numbers in practice, but nothing downstream
    // trusts that; the raw text is carried and parsed defensively.
    resolution_combined: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize)]
struct AccessionInfo {
    deposit_date: Option<String>,
}

/// Render the reported resolution as text, whatever JSON type it came in as.
fn resolution_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RcsbEntryClient {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new()?,
        })
    }

    fn record_from_response(structure_id: &str, resp: EntryResponse) -> StructureRecord {
        let mut record = StructureRecord::new(structure_id);
        record.experimental_method = resp
            .exptl
            .as_ref()
            .and_then(|methods| methods.first())
            .and_then(|m| m.method.clone());
        record.resolution_angstrom = resp
            .rcsb_entry_info
            .as_ref()
            .and_then(|info| info.resolution_combined.as_ref())
            .and_then(|values| values.first())
            .and_then(resolution_text);
        record.title = resp.struct_info.and_then(|s| s.title);
        record.deposited = resp.rcsb_accession_info.and_then(|a| a.deposit_date);
        record
    }
}

#[async_trait]
impl EntrySource for RcsbEntryClient {
    #[instrument(skip(self))]
    async fn fetch_entry(&self, structure_id: &str) -> anyhow::Result<StructureRecord> {
        let url = format!("{}/{}", ENTRY_URL, structure_id);
        let resp: EntryResponse = self
            .client
            .get(&url)?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let record = Self::record_from_response(structure_id, resp);
        debug!(
            method = ?record.experimental_method,
            resolution = ?record.resolution_angstrom,
            "fetched entry metadata"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_full_response() {
        let body = r#"{
            "struct": {"title": "EGFR kinase domain"},
            "exptl": [{"method": "X-RAY DIFFRACTION"}],
            "rcsb_entry_info": {"resolution_combined": [2.6]},
            "rcsb_accession_info": {"deposit_date": "2002-01-18"}
        }"#;
        let resp: EntryResponse = serde_json::from_str(body).unwrap();
        let record = RcsbEntryClient::record_from_response("1M17", resp);

        assert_eq!(record.structure_id, "1M17");
        assert_eq!(record.experimental_method.as_deref(), Some("X-RAY DIFFRACTION"));
        assert_eq!(record.resolution_angstrom.as_deref(), Some("2.6"));
        assert_eq!(record.title.as_deref(), Some("EGFR kinase domain"));
        assert_eq!(record.deposited.as_deref(), Some("2002-01-18"));
    }

    #[test]
    fn test_record_from_sparse_response() {
        // NMR entries have no resolution; some legacy entries lack exptl.
        let resp: EntryResponse = serde_json::from_str("{}").unwrap();
        let record = RcsbEntryClient::record_from_response("2ABC", resp);

        assert_eq!(record.structure_id, "2ABC");
        assert!(record.experimental_method.is_none());
        assert!(record.resolution_angstrom.is_none());
    }

    #[test]
    fn test_resolution_text_handles_string_payloads() {
        let resp: EntryResponse = serde_json::from_str(
            r#"{"rcsb_entry_info": {"resolution_combined": ["2.80"]}}"#,
        )
        .unwrap();
        let record = RcsbEntryClient::record_from_response("3XYZ", resp);
        assert_eq!(record.resolution_angstrom.as_deref(), Some("2.80"));
    }
}
