//! Per-endpoint capability tables for the Product Hunt v1 API.
//!
//! These tables are fixed for the API version; there is no dynamic
//! extension. Option filtering is keyed on the *effective* endpoint (the
//! subtype of a nested query, else the top-level type) and runs at URL
//! serialization time, never at option-insertion time — scoping can change
//! the effective endpoint after an option was set.
//!
//! The `older`/`newer` option names versus the `older_than`/`newer_than`
//! DSL vocabulary, and the exact table memberships, intentionally match the
//! upstream API as observed rather than a cleaner unified scheme.

use crate::query::OptionValue;

/// Types that may be nested under a specific user (`users/{id}/{type}`).
pub const USER_SCOPABLE: &[&str] = &["posts", "collections"];

/// Types that may be nested under a specific post (`posts/{id}/{type}`).
pub const POST_SCOPABLE: &[&str] = &["users", "collections"];

/// Endpoints accepting the `older` / `newer` / `per_page` pagination options.
const PAGINATING: &[&str] = &["posts", "users", "collections"];

/// Endpoints accepting `sort_by`.
const SORTABLE: &[&str] = &["collections"];

/// Endpoints accepting `order` (with an `asc` / `desc` value).
const ORDERABLE: &[&str] = &["users", "collections"];

/// Whether `endpoint` accepts the option `key=value`. Unknown keys always
/// pass; the known keys are validated against the capability tables and, for
/// `order`, against the legal direction values. Rejected options are dropped
/// silently by the URL builder.
pub fn accepts_option(endpoint: &str, key: &str, value: &OptionValue) -> bool {
    match key {
        "older" | "newer" | "per_page" => PAGINATING.contains(&endpoint),
        "sort_by" => SORTABLE.contains(&endpoint),
        "order" => {
            ORDERABLE.contains(&endpoint)
                && matches!(value, OptionValue::Text(dir) if dir == "asc" || dir == "desc")
        }
        _ => true,
    }
}
