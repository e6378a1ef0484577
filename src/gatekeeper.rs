//! Hostname allowlist enforcement.
//!
//! Every tool call passes through [`DomainGatekeeper::check`] before any
//! upstream request is made. Matching is exact on the hostname: scheme, port,
//! path and query are ignored, subdomains of an allowed host are not allowed.

use std::collections::BTreeSet;

use url::{Host, Url};

use crate::error::{BloggerError, Result};

#[derive(Debug, Clone)]
pub struct DomainGatekeeper {
    allowed: BTreeSet<String>,
}

impl DomainGatekeeper {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = domains
            .into_iter()
            .filter_map(|d| normalize_domain(d.as_ref()))
            .collect();
        Self { allowed }
    }

    /// Extract the lowercase hostname of `raw`.
    pub fn hostname(raw: &str) -> Result<String> {
        let parsed = Url::parse(raw.trim())
            .map_err(|e| BloggerError::InvalidInput(format!("'{raw}' is not a valid URL: {e}")))?;
        parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
            .ok_or_else(|| BloggerError::InvalidInput(format!("'{raw}' has no hostname")))
    }

    /// Returns the matched hostname, or `DomainNotAllowed`.
    pub fn check(&self, raw: &str) -> Result<String> {
        let host = Self::hostname(raw)?;

        if self.allowed.is_empty() {
            tracing::warn!("allowlist is empty, all domains are denied");
            return Err(BloggerError::DomainNotAllowed { host });
        }

        if self.allowed.contains(&host) {
            Ok(host)
        } else {
            tracing::warn!(%host, "domain is not in the allowlist");
            Err(BloggerError::DomainNotAllowed { host })
        }
    }
}

/// Allowlist entries are compared in the form `Url` reports hosts:
/// lowercase, IDNA-encoded, no trailing dot.
fn normalize_domain(raw: &str) -> Option<String> {
    let domain = raw.trim().trim_end_matches('.');
    if domain.is_empty() {
        return None;
    }
    match Host::parse(domain) {
        Ok(host) => Some(host.to_string()),
        Err(e) => {
            tracing::warn!(domain, error = %e, "ignoring unparseable allowlist entry");
            None
        }
    }
}
