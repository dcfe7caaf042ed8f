//! Stateful query client for the Product Hunt v1 REST API.
//!
//! # Design
//! `ProductHuntClient` accumulates a `QueryState` through a sequence of
//! setter calls, then resolves that state into exactly one GET request.
//! URL construction (`build_url`) is pure over the current state and is
//! where per-endpoint option filtering happens, so options may be set
//! speculatively before scoping decides the final effective endpoint.
//! `get()` is the single I/O point: it executes the built URL over ureq
//! and interprets the response.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::endpoint::accepts_option;
use crate::error::ApiError;
use crate::query::{Identifier, OptionValue, QueryState, Scoping};

/// API version segment prefixed to every request path.
pub const API_VERSION: &str = "v1";

const DEFAULT_BASE_URL: &str = "https://api.producthunt.com";

/// Encode everything except RFC 3986 unreserved characters.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Query-building client for the Product Hunt API.
///
/// One instance per run: configure it through the setters, then call
/// [`get`](ProductHuntClient::get) to execute the resolved query. There is
/// no rollback — a half-configured client is discarded, not repaired.
#[derive(Debug)]
pub struct ProductHuntClient {
    token: String,
    base_url: String,
    agent: ureq::Agent,
    state: QueryState,
}

impl ProductHuntClient {
    /// Create a client for the production API.
    ///
    /// Fails with [`ApiError::MissingToken`] when `token` is empty; the
    /// token comes from the hosting environment, never read here.
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against an alternate base URL (tests point this at
    /// the mock server).
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, ApiError> {
        if token.is_empty() {
            return Err(ApiError::MissingToken);
        }

        // Non-2xx statuses come back as data; status interpretation is
        // this client's job, not the transport's.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();

        Ok(Self {
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
            state: QueryState::new(),
        })
    }

    /// The current query state. Exposed read-only for the DSL and tests.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Return the query state to its freshly-constructed form. Idempotent;
    /// the only operation that is.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Select the resource type, applying the contextual-scoping rewrite
    /// (see [`QueryState::apply_type`]).
    pub fn set_type(&mut self, ty: &str) -> Scoping {
        self.state.apply_type(ty)
    }

    /// Nest the query under `subtype`. Usually done for the caller by
    /// scoping; exposed for arbitrary nestings.
    pub fn set_subtype(&mut self, subtype: &str) {
        self.state.resource_subtype = Some(subtype.to_string());
    }

    /// Target a specific resource instance.
    pub fn set_identifier(&mut self, id: impl Into<Identifier>) {
        self.state.identifier = Some(id.into());
    }

    /// Target user `id` and make it the contextual user for subsequent
    /// list queries. `users` is not user-scopable, so the inner `set_type`
    /// never scopes a user query under itself.
    pub fn set_user(&mut self, id: u64) {
        self.state.current_user = Some(Identifier::Id(id));
        self.set_type("users");
        self.set_identifier(id);
    }

    /// Target post `id` and make it the contextual post for subsequent
    /// list queries.
    pub fn set_post(&mut self, id: u64) {
        self.state.current_post = Some(Identifier::Id(id));
        self.set_type("posts");
        self.set_identifier(id);
    }

    /// Record a query option. Always succeeds; validity against the final
    /// effective endpoint is decided at URL-construction time.
    pub fn set_option(&mut self, key: &str, value: impl Into<OptionValue>) {
        self.state.options.insert(key.to_string(), value.into());
    }

    /// Serialize the current state into a request path, or `None` when no
    /// resource type has been selected ("no query configured").
    ///
    /// Options that the effective endpoint does not accept are dropped
    /// silently; survivors are percent-encoded and appended in
    /// lexicographic key order.
    pub fn build_url(&self) -> Option<String> {
        let ty = self.state.resource_type.as_deref()?;

        let mut url = format!("{API_VERSION}/{ty}");
        if let Some(id) = &self.state.identifier {
            url.push('/');
            url.push_str(&id.to_string());
            if let Some(subtype) = &self.state.resource_subtype {
                url.push('/');
                url.push_str(subtype);
            }
        }

        // effective_endpoint is Some whenever resource_type is
        let endpoint = self.state.effective_endpoint().unwrap_or(ty);
        let query: Vec<String> = self
            .state
            .options
            .iter()
            .filter(|(key, value)| accepts_option(endpoint, key, value))
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_SET),
                    utf8_percent_encode(&value.to_string(), QUERY_SET)
                )
            })
            .collect();

        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }

        Some(url)
    }

    /// Execute the configured query.
    ///
    /// Returns `Ok(None)` without touching the network when no resource
    /// type was ever selected. Otherwise issues one GET and returns the
    /// parsed JSON body on HTTP 200, or [`ApiError::RequestFailed`] on any
    /// other status. No retries.
    pub fn get(&self) -> Result<Option<serde_json::Value>, ApiError> {
        let Some(path) = self.build_url() else {
            log::debug!("no query configured, skipping request");
            return Ok(None);
        };

        let url = format!("{}/{}", self.base_url, path);
        log::debug!("GET {url}");

        let authorization = format!("Bearer {}", self.token);
        let mut response = self
            .agent
            .get(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Authorization", authorization.as_str())
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        interpret_response(status, &body).map(Some)
    }
}

/// Map a raw status/body pair to the client's outcome: 200 parses as JSON,
/// anything else is a `RequestFailed` carrying the status.
fn interpret_response(status: u16, body: &str) -> Result<serde_json::Value, ApiError> {
    if status != 200 {
        return Err(ApiError::RequestFailed { status });
    }
    serde_json::from_str(body).map_err(|e| ApiError::InvalidJson(e.to_string()))
}
