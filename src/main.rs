// src/main.rs
// =============================================================================
// This is the entry point of deploy-button.
//
// What happens here:
// 1. Set up logging (tracing, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the subcommand handler
// 4. Exit with proper code (0 = success, 1 = bad URL or lookup failed, 2 = error)
//
// Pipeline for `generate`:
//   raw URL -> parse_repo_url -> Resolver::lookup -> DeployArtifact
// The URL is validated before anything touches the network.
// =============================================================================

mod cli;
mod deploy;
mod github;
mod server;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands, GitHubArgs, OutputFormat};
use deploy::DeployArtifact;
use github::{parse_repo_url, RepositoryRecord, Resolver};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `generate` output can be piped
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deploy_button=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { addr, github } => {
            let resolver = Resolver::new(github.into())?;
            server::serve(addr, resolver).await?;
            Ok(0)
        }
        Commands::Generate {
            repo_url,
            format,
            json,
            github,
        } => handle_generate(&repo_url, format, json, github).await,
    }
}

// Handles the 'generate' subcommand
async fn handle_generate(
    repo_url: &str,
    format: OutputFormat,
    json: bool,
    github: GitHubArgs,
) -> Result<i32> {
    let reference = match parse_repo_url(repo_url) {
        Ok(reference) => reference,
        Err(e) => {
            tracing::debug!(error = ?e, "Rejected repository URL");
            eprintln!("❌ {}", e);
            return Ok(1);
        }
    };

    let resolver = Resolver::new(github.into())?;
    let record = match resolver.lookup(&reference.owner, &reference.repo).await {
        Ok(record) => record,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(1);
        }
    };

    let artifact = DeployArtifact::new(repo_url, &record);

    if json {
        let output = serde_json::json!({
            "repository": record,
            "artifact": artifact,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_artifact(&record, &artifact, format);
    }

    Ok(0)
}

fn print_artifact(record: &RepositoryRecord, artifact: &DeployArtifact, format: OutputFormat) {
    match format {
        OutputFormat::Markdown => println!("{}", artifact.markdown),
        OutputFormat::Html => println!("{}", artifact.html),
        OutputFormat::Component => print!("{}", artifact.component),
        OutputFormat::All => {
            println!("📦 {}", record.full_name);
            if let Some(description) = &record.description {
                println!("   {}", description);
            }
            println!();

            println!("🔗 Deploy URL\n{}\n", artifact.deploy_url);
            println!("📝 Markdown\n{}\n", artifact.markdown);
            println!("🌐 HTML\n{}\n", artifact.html);
            println!("⚛️  Component\n{}", artifact.component);

            if !record.env_vars.is_empty() {
                println!("🔑 Environment variables");
                for name in &record.env_vars {
                    println!("   {}", name);
                }
            }
        }
    }
}
