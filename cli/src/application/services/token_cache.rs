//! Per-identity session credential cache for the gateway path.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{
    Clock, IdentityIssuer, SessionTokenEntry, TokenProvider, TokenStore,
};
use crate::domain::error::RouteError;

/// How long an issued credential is reused. The credential itself stays
/// valid for a day; the short cache window bounds exposure of a stale one.
pub const SESSION_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

/// Caches issued session credentials per identity.
///
/// Two callers missing at the same moment may both issue; the later write
/// wins. Issuance is idempotent, so the cost is one extra call.
///
/// Reuse only spans the lifetime of `store`. The `fleetbox` binary builds an
/// in-memory store per invocation, so cross-call reuse needs a long-lived
/// embedding process.
pub struct SessionTokenCache<I, S, C> {
    issuer: I,
    store: S,
    clock: C,
    ttl: Duration,
}

impl<I, S, C> SessionTokenCache<I, S, C>
where
    I: IdentityIssuer,
    S: TokenStore,
    C: Clock,
{
    pub fn new(issuer: I, store: S, clock: C) -> Self {
        Self {
            issuer,
            store,
            clock,
            ttl: SESSION_TOKEN_TTL,
        }
    }

    /// Return a cached credential for `identity`, issuing a new one on a
    /// miss or after the cache entry expired.
    ///
    /// # Errors
    ///
    /// Returns an error if issuance fails or yields an empty credential.
    pub async fn get_token(&self, identity: &str) -> Result<String> {
        let now = self.clock.now();
        if let Some(entry) = self.store.get(identity)
            && entry.cache_expires_at > now
        {
            return Ok(entry.token);
        }

        let token = self
            .issuer
            .issue(identity)
            .await
            .with_context(|| format!("issuing session token for {identity}"))?;
        if token.is_empty() {
            return Err(RouteError::EmptyToken(identity.to_string()).into());
        }

        tracing::debug!(identity, "issued session token");
        self.store.put(SessionTokenEntry {
            identity: identity.to_string(),
            token: token.clone(),
            cache_expires_at: self.clock.now() + self.ttl,
        });
        Ok(token)
    }
}

impl<I, S, C> TokenProvider for SessionTokenCache<I, S, C>
where
    I: IdentityIssuer,
    S: TokenStore,
    C: Clock,
{
    async fn token_for(&self, identity: &str) -> Result<String> {
        self.get_token(identity).await
    }
}
