// src/deploy/button.rs
// =============================================================================
// This module builds the "Deploy with Vercel" URL and the three snippets
// people paste into their README or site.
//
// Deploy URL layout (parameters in this order):
//   https://vercel.com/new/clone
//     ?repository-url=<what the user typed, https:// added if missing>
//     &project-name=<repo name>
//     &repository-name=<repo name>
//     &env=<A,B,C>                                   (only if there are env vars)
//     &envDescription=Environment variables required for <repo name>
//
// The query is form-urlencoded exactly like the browser's URLSearchParams
// (spaces become '+', ':' and '/' are percent-encoded).
//
// The snippets are plain string templates. The URL goes in verbatim, with no
// HTML or markdown escaping.
// =============================================================================

use serde::Serialize;
use url::form_urlencoded;

use crate::github::{with_scheme, RepositoryRecord};

pub const CLONE_ENDPOINT: &str = "https://vercel.com/new/clone";
pub const BUTTON_IMAGE_URL: &str = "https://vercel.com/button";
const BUTTON_ALT: &str = "Deploy with Vercel";

// Builds the clone-and-deploy URL for a repository
//
// Parameters:
//   raw_url: the URL exactly as the user entered it
//   record: what the resolver found out about the repository
//
// The repository URL is not rebuilt from owner/repo: whatever the user typed
// is forwarded, only gaining a scheme when it had none.
pub fn deploy_url(raw_url: &str, record: &RepositoryRecord) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("repository-url", &with_scheme(raw_url))
        .append_pair("project-name", &record.name)
        .append_pair("repository-name", &record.name);

    if !record.env_vars.is_empty() {
        query
            .append_pair("env", &record.env_vars.join(","))
            .append_pair(
                "envDescription",
                &format!("Environment variables required for {}", record.name),
            );
    }

    format!("{}?{}", CLONE_ENDPOINT, query.finish())
}

// `[![Deploy with Vercel](button)](url)`
pub fn markdown(deploy_url: &str) -> String {
    format!("[![{}]({})]({})", BUTTON_ALT, BUTTON_IMAGE_URL, deploy_url)
}

// `<a href="url"><img src="button" alt="Deploy with Vercel"/></a>`
pub fn html(deploy_url: &str) -> String {
    format!(
        r#"<a href="{}"><img src="{}" alt="{}"/></a>"#,
        deploy_url, BUTTON_IMAGE_URL, BUTTON_ALT
    )
}

// A drop-in React component wrapping the same anchor in a Button
pub fn component(deploy_url: &str) -> String {
    format!(
        r#"import {{ Button }} from "@/components/ui/button"

export function DeployButton() {{
  return (
    <Button asChild variant="ghost">
      <a href="{url}" target="_blank" rel="noopener noreferrer">
        <img src="{image}" alt="{alt}" />
      </a>
    </Button>
  )
}}
"#,
        url = deploy_url,
        image = BUTTON_IMAGE_URL,
        alt = BUTTON_ALT,
    )
}

// The deploy URL plus every rendering of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployArtifact {
    pub deploy_url: String,
    pub markdown: String,
    pub html: String,
    pub component: String,
}

impl DeployArtifact {
    pub fn new(raw_url: &str, record: &RepositoryRecord) -> Self {
        let deploy_url = deploy_url(raw_url, record);

        Self {
            markdown: markdown(&deploy_url),
            html: html(&deploy_url),
            component: component(&deploy_url),
            deploy_url,
        }
    }
}
