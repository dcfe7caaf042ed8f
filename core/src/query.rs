//! Query state for the Product Hunt v1 API.
//!
//! # Design
//! `QueryState` is plain data mutated in place by `ProductHuntClient`. The
//! contextual-scoping rewrite lives here as an explicit method
//! (`apply_type`) returning a `Scoping` outcome, so tests can drive the
//! state machine directly and assert on the resulting fields without going
//! through the client or the network.

use std::collections::BTreeMap;
use std::fmt;

use crate::endpoint::{POST_SCOPABLE, USER_SCOPABLE};

/// A resource identifier in a request path: a numeric id or the literal
/// `all` sentinel the posts endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Id(u64),
    All,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(n) => write!(f, "{n}"),
            Identifier::All => write!(f, "all"),
        }
    }
}

impl From<u64> for Identifier {
    fn from(id: u64) -> Self {
        Identifier::Id(id)
    }
}

/// A query-option value. The API mixes strings, numbers, and booleans in its
/// query parameters; each variant has a fixed query-string rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => write!(f, "{s}"),
            OptionValue::Number(n) => write!(f, "{n}"),
            OptionValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Number(n)
    }
}

impl From<u32> for OptionValue {
    fn from(n: u32) -> Self {
        OptionValue::Number(i64::from(n))
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Flag(b)
    }
}

/// Outcome of a `set_type` call: whether the contextual-scoping rewrite
/// fired, and under which context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoping {
    UserScoped,
    PostScoped,
    Unscoped,
}

impl Scoping {
    pub fn is_scoped(self) -> bool {
        !matches!(self, Scoping::Unscoped)
    }
}

/// Accumulated query state for one request.
///
/// `options` is a `BTreeMap` so serialization order is lexicographic by key,
/// keeping built URLs deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub resource_type: Option<String>,
    pub resource_subtype: Option<String>,
    pub identifier: Option<Identifier>,
    pub current_user: Option<Identifier>,
    pub current_post: Option<Identifier>,
    pub options: BTreeMap<String, OptionValue>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a resource type, applying the contextual-scoping rewrite.
    ///
    /// If a current user is set and `ty` is user-scopable, the query is
    /// rewritten to list `ty` under that user (`users/{id}/{ty}`). Failing
    /// that, the same check runs against the current post. The user context
    /// always wins when both are set. Types outside both capability tables
    /// are selected as-is.
    pub fn apply_type(&mut self, ty: &str) -> Scoping {
        if let Some(user) = self.current_user.clone() {
            if USER_SCOPABLE.contains(&ty) {
                self.resource_subtype = Some(ty.to_string());
                self.resource_type = Some("users".to_string());
                self.identifier = Some(user);
                return Scoping::UserScoped;
            }
        }

        if let Some(post) = self.current_post.clone() {
            if POST_SCOPABLE.contains(&ty) {
                self.resource_subtype = Some(ty.to_string());
                self.resource_type = Some("posts".to_string());
                self.identifier = Some(post);
                return Scoping::PostScoped;
            }
        }

        self.resource_type = Some(ty.to_string());
        Scoping::Unscoped
    }

    /// The endpoint that decides option validity: the subtype when the query
    /// is nested, else the top-level type.
    pub fn effective_endpoint(&self) -> Option<&str> {
        self.resource_subtype
            .as_deref()
            .or(self.resource_type.as_deref())
    }

    /// Return to the freshly-constructed state: contextual identifiers and
    /// options are cleared, and so is the type selection, so a `get`
    /// without a subsequent `apply_type` has no query to run.
    pub fn reset(&mut self) {
        *self = QueryState::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_renders_id_and_all() {
        assert_eq!(Identifier::Id(42).to_string(), "42");
        assert_eq!(Identifier::All.to_string(), "all");
    }

    #[test]
    fn option_value_renders_each_variant() {
        assert_eq!(OptionValue::Text("day".into()).to_string(), "day");
        assert_eq!(OptionValue::Number(-3).to_string(), "-3");
        assert_eq!(OptionValue::Flag(true).to_string(), "true");
        assert_eq!(OptionValue::Flag(false).to_string(), "false");
    }

    #[test]
    fn apply_type_scopes_under_current_user() {
        let mut state = QueryState::new();
        state.current_user = Some(Identifier::Id(10));

        let scoping = state.apply_type("posts");

        assert_eq!(scoping, Scoping::UserScoped);
        assert_eq!(state.resource_type.as_deref(), Some("users"));
        assert_eq!(state.identifier, Some(Identifier::Id(10)));
        assert_eq!(state.resource_subtype.as_deref(), Some("posts"));
    }

    #[test]
    fn apply_type_scopes_under_current_post() {
        let mut state = QueryState::new();
        state.current_post = Some(Identifier::Id(10));

        let scoping = state.apply_type("collections");

        assert_eq!(scoping, Scoping::PostScoped);
        assert_eq!(state.resource_type.as_deref(), Some("posts"));
        assert_eq!(state.identifier, Some(Identifier::Id(10)));
        assert_eq!(state.resource_subtype.as_deref(), Some("collections"));
    }

    #[test]
    fn user_context_wins_over_post_context() {
        let mut state = QueryState::new();
        state.current_user = Some(Identifier::Id(1));
        state.current_post = Some(Identifier::Id(2));

        let scoping = state.apply_type("collections");

        assert_eq!(scoping, Scoping::UserScoped);
        assert_eq!(state.resource_type.as_deref(), Some("users"));
        assert_eq!(state.identifier, Some(Identifier::Id(1)));
        assert_eq!(state.resource_subtype.as_deref(), Some("collections"));
    }

    #[test]
    fn apply_type_leaves_unscopable_types_alone() {
        let mut state = QueryState::new();
        state.current_user = Some(Identifier::Id(10));

        let scoping = state.apply_type("comments");

        assert_eq!(scoping, Scoping::Unscoped);
        assert_eq!(state.resource_type.as_deref(), Some("comments"));
        assert!(state.identifier.is_none());
        assert!(state.resource_subtype.is_none());
    }

    #[test]
    fn effective_endpoint_prefers_subtype() {
        let mut state = QueryState::new();
        assert_eq!(state.effective_endpoint(), None);

        state.resource_type = Some("users".into());
        assert_eq!(state.effective_endpoint(), Some("users"));

        state.resource_subtype = Some("posts".into());
        assert_eq!(state.effective_endpoint(), Some("posts"));
    }

    #[test]
    fn reset_clears_contexts_and_options() {
        let mut state = QueryState::new();
        state.current_user = Some(Identifier::Id(1));
        state.current_post = Some(Identifier::Id(2));
        state.options.insert("per_page".into(), 5u32.into());
        state.resource_type = Some("posts".into());

        state.reset();

        assert!(state.current_user.is_none());
        assert!(state.current_post.is_none());
        assert!(state.options.is_empty());
        assert_eq!(state, QueryState::new());
    }
}
