//! Human-vocabulary query DSL over [`ProductHuntClient`].
//!
//! # Design
//! `Step` is pure syntactic sugar: every method translates a pipeline
//! author's vocabulary (`day`, `per_page`, `sort`, ...) into plain client
//! setter calls. The client itself knows nothing about runs; `Step::run`
//! replays the caller's configuration closure against a freshly reset
//! client each invocation and falls back to the prior run's value when the
//! closure configured no query at all.
//!
//! Ruby-style polymorphic arguments become distinct typed methods here:
//! the original's single `day(anything)` splits into `day`, `day_on`,
//! `days_ago`, and the fallible `day_str`.

use chrono::NaiveDate;

use crate::client::ProductHuntClient;
use crate::error::ApiError;
use crate::query::Identifier;

/// Date-string shapes `day_str` understands. Anything else is an
/// `UnrecognizedDateFormat`.
const DAY_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];

/// One pipeline step's view of the client.
pub struct Step<'a> {
    client: &'a mut ProductHuntClient,
}

impl<'a> Step<'a> {
    /// Reset `client`, replay `configure` against it, and execute the
    /// resolved query. When the closure never selected a resource type the
    /// step has nothing to fetch and `prior` — the previous step's value —
    /// is passed through instead.
    pub fn run<F>(
        client: &'a mut ProductHuntClient,
        prior: Option<serde_json::Value>,
        configure: F,
    ) -> Result<Option<serde_json::Value>, ApiError>
    where
        F: FnOnce(&mut Step<'_>) -> Result<(), ApiError>,
    {
        client.reset();

        let mut step = Step { client };
        configure(&mut step)?;

        match client.get()? {
            Some(value) => Ok(Some(value)),
            None => Ok(prior),
        }
    }

    /// List all posts.
    pub fn posts(&mut self) {
        self.client.set_identifier(Identifier::All);
        self.client.set_type("posts");
    }

    /// List posts matching a URL search.
    pub fn posts_matching(&mut self, url: &str) {
        self.posts();
        self.client.set_option("search[url]", url);
    }

    /// Fetch a specific post, making it the contextual post.
    pub fn post(&mut self, id: u64) {
        self.client.set_post(id);
    }

    /// List users.
    pub fn users(&mut self) {
        self.client.set_type("users");
    }

    /// Fetch a specific user, making them the contextual user.
    pub fn user(&mut self, id: u64) {
        self.client.set_user(id);
    }

    /// List collections (scoped under the contextual user or post, if any).
    pub fn collections(&mut self) {
        self.client.set_type("collections");
    }

    /// List featured collections.
    pub fn featured_collections(&mut self) {
        self.collections();
        self.client.set_option("search[featured]", true);
    }

    /// Today's posts.
    pub fn day(&mut self) {
        self.client.set_type("posts");
    }

    /// Posts for a specific calendar day.
    pub fn day_on(&mut self, date: NaiveDate) {
        self.client.set_type("posts");
        self.client.set_option("day", date.to_string());
    }

    /// Posts from `n` days ago.
    pub fn days_ago(&mut self, n: u32) {
        self.client.set_type("posts");
        self.client.set_option("days_ago", n);
    }

    /// Posts for a day given as text. The date is reparsed and re-rendered
    /// so the API always sees `YYYY-MM-DD` regardless of the input shape.
    pub fn day_str(&mut self, text: &str) -> Result<(), ApiError> {
        self.client.set_type("posts");
        let date = parse_day(text)?;
        self.client.set_option("day", date.to_string());
        Ok(())
    }

    /// Cap list responses at `count` items.
    pub fn per_page(&mut self, count: u32) {
        self.client.set_option("per_page", count);
    }

    /// Only items older than the given id.
    pub fn older_than(&mut self, max: u64) {
        self.client.set_option("older", max as i64);
    }

    /// Only items newer than the given id.
    pub fn newer_than(&mut self, min: u64) {
        self.client.set_option("newer", min as i64);
    }

    /// Sort by `field` in `direction` (`asc` or `desc`).
    pub fn sort(&mut self, field: &str, direction: &str) {
        self.client.set_option("sort_by", field);
        self.client.set_option("order", direction);
    }
}

fn parse_day(text: &str) -> Result<NaiveDate, ApiError> {
    DAY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .ok_or_else(|| ApiError::UnrecognizedDateFormat(text.to_string()))
}
