//! Query-building client for the Product Hunt v1 REST API.
//!
//! # Overview
//! A caller declares *which* resource to fetch — posts, a specific post,
//! users, a specific user, collections — plus filtering, sorting, and
//! pagination options, and the client resolves that declaration into the
//! one GET request that satisfies it.
//!
//! # Design
//! - `ProductHuntClient` accumulates `QueryState` through setter calls and
//!   resolves it at `get()` time; one instance per run.
//! - Selecting a list type while a user or post context is active rewrites
//!   the query to nest under that context (`users/{id}/collections`), user
//!   context taking priority. The capability tables in `endpoint` say which
//!   nestings the API supports.
//! - Options are filtered against the final effective endpoint at URL
//!   serialization time, so they can be set before scoping settles where
//!   the query lands.
//! - `Step` layers the pipeline-author vocabulary (`day`, `per_page`,
//!   `sort`, ...) on top; it is sugar only, with no logic of its own beyond
//!   date parsing.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod query;
pub mod step;

pub use client::{ProductHuntClient, API_VERSION};
pub use error::ApiError;
pub use query::{Identifier, OptionValue, QueryState, Scoping};
pub use step::Step;
