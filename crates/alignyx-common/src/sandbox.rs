use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;
use crate::error::AlignyxError;

/// A sandbox-capped HTTP client that only allows requests to approved domains.
/// All outbound traffic from the ingestion clients goes through this wrapper.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a new SandboxClient with the default allowlist of structural
    /// database hosts.
    pub fn new() -> Result<Self, AlignyxError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "search.rcsb.org",        // PDB search API
            "data.rcsb.org",          // PDB data API
            "files.rcsb.org",         // PDB coordinate files
            "models.rcsb.org",        // PDB computed models
            "www.ebi.ac.uk",          // PDBe, ChEMBL
            "alphafold.ebi.ac.uk",    // AlphaFold models
            "localhost",              // Local fixtures
            "127.0.0.1",              // Localhost alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AlignyxError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Check exact match or if it's a subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Exposes the inner `reqwest::Client` builder pattern safely for GET requests.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, AlignyxError> {
        if !self.is_allowed(url) {
            return Err(AlignyxError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }

    /// Exposes the inner `reqwest::Client` builder pattern safely for POST requests.
    pub fn post(&self, url: &str) -> Result<reqwest::RequestBuilder, AlignyxError> {
        if !self.is_allowed(url) {
            return Err(AlignyxError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.post(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allowlist() {
        let client = SandboxClient::new().unwrap();
        assert!(client.is_allowed("https://data.rcsb.org/rest/v1/core/entry/1CRN"));
        assert!(client.is_allowed("https://files.rcsb.org/download/1crn.pdb"));
        assert!(client.is_allowed("https://search.rcsb.org/rcsbsearch/v2/query"));
        assert!(!client.is_allowed("https://example.com/"));
    }

    #[test]
    fn test_subdomain_match() {
        let client = SandboxClient::new().unwrap();
        assert!(!client.is_allowed("https://download.rcsb.org/x"));
        assert!(client.is_allowed("https://api.www.ebi.ac.uk/thing"));
    }

    #[test]
    fn test_get_rejects_unlisted_domain() {
        let client = SandboxClient::new().unwrap();
        let err = client.get("https://example.com/").unwrap_err();
        assert!(matches!(err, AlignyxError::Security(_)));
    }

    #[test]
    fn test_allow_domain_extends_policy() {
        let mut client = SandboxClient::new().unwrap();
        assert!(!client.is_allowed("https://pdbj.org/"));
        client.allow_domain("pdbj.org");
        assert!(client.is_allowed("https://pdbj.org/"));
    }
}
