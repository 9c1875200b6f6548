// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - serve:    run the HTTP API (/api/repo-info, /api/deploy-button)
// - generate: turn one repository URL into deploy button snippets
//
// Every option can also come from the environment (the `env` attribute),
// which is how GITHUB_TOKEN reaches the resolver.
// =============================================================================

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

use crate::github::{ResolverConfig, DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_RAW_URL};

#[derive(Parser, Debug)]
#[command(
    name = "deploy-button",
    version,
    about = "Generate a Deploy with Vercel button for a GitHub repository",
    long_about = "deploy-button looks up a GitHub repository, reads the variable names from its \
                  .env.example and produces a Deploy with Vercel button as markdown, HTML or a \
                  React component."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    ///
    /// Example: deploy-button serve --addr 0.0.0.0:3000
    Serve {
        /// Address to listen on
        #[arg(long, env = "DEPLOY_BUTTON_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        #[command(flatten)]
        github: GitHubArgs,
    },

    /// Print a deploy button for a repository
    ///
    /// Example: deploy-button generate https://github.com/vercel/next.js
    Generate {
        /// GitHub repository URL (https:// is optional)
        repo_url: String,

        /// Which snippet to print
        #[arg(long, value_enum, default_value_t = OutputFormat::All)]
        format: OutputFormat,

        /// Print the repository and every snippet as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        github: GitHubArgs,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Html,
    Component,
    All,
}

// How to reach GitHub; shared by both subcommands
#[derive(Args, Debug, Clone)]
pub struct GitHubArgs {
    /// Token for the GitHub API (raises the rate limit, allows private repos)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// Base URL for raw file contents
    #[arg(long, env = "GITHUB_RAW_URL", default_value = DEFAULT_RAW_URL)]
    pub github_raw_url: String,

    /// Branch to read .env.example from
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl From<GitHubArgs> for ResolverConfig {
    fn from(args: GitHubArgs) -> Self {
        ResolverConfig {
            token: args.github_token,
            api_url: args.github_api_url,
            raw_url: args.github_raw_url,
            branch: args.branch,
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}
