//! Caller identity.
//!
//! The server never authenticates anyone itself. An upstream proxy does, and
//! passes the resulting owner id in a header.

use axum::http::header::{HeaderName, InvalidHeaderName};
use axum::http::HeaderMap;

/// Resolves the owner a request acts on behalf of.
pub trait IdentityProvider: Send + Sync {
    /// `None` when the request carries no usable identity.
    fn owner(&self, headers: &HeaderMap) -> Option<String>;
}

/// Trusts a single header set by an authenticating reverse proxy.
#[derive(Debug, Clone)]
pub struct HeaderIdentity {
    header: HeaderName,
}

impl HeaderIdentity {
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self { header: HeaderName::from_bytes(header.trim().as_bytes())? })
    }
}

impl IdentityProvider for HeaderIdentity {
    fn owner(&self, headers: &HeaderMap) -> Option<String> {
        let value = headers.get(&self.header)?.to_str().ok()?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_owned())
        }
    }
}
