// src/github/fetch.rs
// =============================================================================
// This module looks up a repository on GitHub and reduces what it finds to a
// small RepositoryRecord.
//
// Two requests per lookup, issued together:
// 1. GET {api}/repos/{owner}/{repo}
//    - name, full_name, description come from here
//    - any non-2xx status means "Repository not found"
// 2. GET {raw}/{owner}/{repo}/{branch}/.env.example
//    - best effort: a 404 or network error just means "no env vars"
//
// Nothing is cached. Every lookup hits GitHub again.
//
// Rust concepts:
// - async functions and futures::join! to run both requests concurrently
// - thiserror for the lookup error type
// - serde for decoding the API response and encoding the record
// =============================================================================

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_BRANCH: &str = "main";

// Well-known file listing the variables a deployment needs
const ENV_EXAMPLE_FILE: &str = ".env.example";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// Normalized view of a repository, as served by /api/repo-info
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    /// Variable names in file order. Duplicates are kept.
    pub env_vars: Vec<String>,
}

// The subset of GET /repos/{owner}/{repo} we care about
#[derive(Debug, Deserialize)]
struct RepoMetadata {
    name: String,
    full_name: String,
    description: Option<String>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    /// GitHub answered the metadata request with a non-success status.
    #[error("Repository not found")]
    NotFound,

    /// The metadata request never produced a usable answer.
    #[error("Failed to fetch repository data")]
    Transport(#[source] reqwest::Error),
}

// Everything the resolver needs to know about the outside world
//
// The token is passed in here instead of being read from the environment
// inside the resolver, so tests can run with none, a valid or a bogus one.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub token: Option<String>,
    pub api_url: String,
    pub raw_url: String,
    pub branch: String,
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            raw_url: DEFAULT_RAW_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

// Resolves owner/repo pairs into RepositoryRecords
//
// Cheap to share: the inner reqwest::Client pools connections.
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
    token: Option<String>,
    api_url: String,
    raw_url: String,
    branch: String,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            // An empty GITHUB_TOKEN behaves like no token at all
            token: config.token.filter(|t| !t.is_empty()),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            raw_url: config.raw_url.trim_end_matches('/').to_string(),
            branch: config.branch,
        })
    }

    // Looks up one repository
    //
    // owner/repo are used as-is. Callers that take user input should run it
    // through parse_repo_url first, but nothing here depends on that.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, owner: &str, repo: &str) -> Result<RepositoryRecord, LookupError> {
        // The two requests don't depend on each other, so run them together
        let (metadata, env_vars) = futures::join!(
            self.fetch_metadata(owner, repo),
            self.fetch_env_vars(owner, repo),
        );
        let metadata = metadata?;

        tracing::info!(
            full_name = %metadata.full_name,
            env_vars = env_vars.len(),
            "Resolved repository"
        );

        Ok(RepositoryRecord {
            name: metadata.name,
            full_name: metadata.full_name,
            description: metadata.description,
            env_vars,
        })
    }

    async fn fetch_metadata(&self, owner: &str, repo: &str) -> Result<RepoMetadata, LookupError> {
        let url = format!("{}/repos/{}/{}", self.api_url, owner, repo);

        let mut request = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Metadata request failed");
            LookupError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "GitHub rejected metadata request");
            return Err(LookupError::NotFound);
        }

        response.json::<RepoMetadata>().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Could not decode repository metadata");
            LookupError::Transport(e)
        })
    }

    // Fetches .env.example and returns the variable names in it
    //
    // Never fails: any problem is logged and turned into an empty list so it
    // can't leak into the metadata error path.
    async fn fetch_env_vars(&self, owner: &str, repo: &str) -> Vec<String> {
        let url = format!(
            "{}/{}/{}/{}/{}",
            self.raw_url, owner, repo, self.branch, ENV_EXAMPLE_FILE
        );

        match self.fetch_text(&url).await {
            Ok(content) => parse_env_example(&content),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "No usable .env.example");
                Vec::new()
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

// Extracts variable names from the contents of an env example file
//
// Rules:
// - lines are trimmed
// - empty lines and lines starting with '#' are skipped
// - the name is everything before the first '=' (the whole line if there is none)
//
// Order is preserved, duplicates are kept and names are not validated.
//
// Example:
//   "API_KEY=123\n# comment\n\nDB_URL=postgres://x" -> ["API_KEY", "DB_URL"]
pub fn parse_env_example(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once('=') {
            Some((name, _)) => name.to_string(),
            None => line.to_string(),
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does futures::join! do?
//    - Polls several futures at the same time and waits for all of them
//    - Unlike tokio::spawn, nothing is moved to another task, so the futures
//      can keep borrowing `self`, `owner` and `repo`
//
// 2. Why does fetch_env_vars return Vec<String> and not Result?
//    - A missing .env.example is normal, not an error
//    - Handling the failure inside the function means the caller can't
//      accidentally turn it into "Repository not found"
//
// 3. Why two error libraries?
//    - thiserror gives LookupError a fixed set of variants callers can match on
//    - anyhow is fine for fetch_text, whose error is only ever logged
// -----------------------------------------------------------------------------
