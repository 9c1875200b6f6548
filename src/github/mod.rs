// src/github/mod.rs
// =============================================================================
// Everything that knows about GitHub.
//
// - repo_url: turns user input into an owner/repo pair
// - fetch: asks GitHub about that pair (metadata + .env.example)
// =============================================================================

mod fetch;
mod repo_url;

pub use self::fetch::{
    LookupError, RepositoryRecord, Resolver, ResolverConfig, DEFAULT_API_URL, DEFAULT_BRANCH,
    DEFAULT_RAW_URL,
};
pub use self::repo_url::{parse_repo_url, with_scheme, ParseError};
