// src/github/repo_url.rs
// =============================================================================
// This module turns whatever the user typed into an owner/repo pair.
//
// Accepted input:
// - https://github.com/owner/repo
// - https://github.com/owner/repo/   (one trailing slash)
// - github.com/owner/repo            (https:// is assumed)
//
// Rejected input:
// - anything that does not parse as a URL
// - hosts that do not contain "github.com"
// - paths with anything other than exactly two segments
//   (so /owner, /owner/repo/tree/main, ... are all invalid)
//
// Nothing is normalized: case is kept and a ".git" suffix stays part of
// the repository name.
//
// Rust concepts:
// - thiserror: derive Display/Error for our own error enum
// - url::Url: a real URL parser instead of string slicing
// =============================================================================

use thiserror::Error;
use url::Url;

// Validated owner/repo pair extracted from a repository URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReference {
    pub owner: String,
    pub repo: String,
}

// Why a URL was rejected
//
// Every variant shows the same message to the user.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid GitHub repository URL")]
    Malformed(#[source] url::ParseError),

    #[error("Invalid GitHub repository URL")]
    NotGitHub,

    #[error("Invalid GitHub repository URL")]
    WrongSegmentCount,
}

// Prepends "https://" unless the input already starts with a scheme
//
// Leading and trailing spaces/control characters are ignored when looking
// for the scheme, the same set the URL parser strips on its own.
//
// Example:
//   "github.com/a/b"          -> "https://github.com/a/b"
//   "http://github.com/a/b"   -> unchanged
//   "  http://github.com/a/b" -> "http://github.com/a/b"
pub fn with_scheme(input: &str) -> String {
    let trimmed = input.trim_matches(is_c0_control_or_space);
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", input)
    }
}

fn is_c0_control_or_space(c: char) -> bool {
    c <= ' '
}

// Checks for a leading `scheme://` where scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

// Parses a user-supplied GitHub repository URL
//
// Returns: RepositoryReference on success, ParseError otherwise.
// No network access happens here.
pub fn parse_repo_url(input: &str) -> Result<RepositoryReference, ParseError> {
    let url = Url::parse(&with_scheme(input)).map_err(ParseError::Malformed)?;

    let host = url.host_str();
    if !host.is_some_and(|h| h.contains("github.com")) {
        tracing::debug!(host = ?host, "Not a GitHub host");
        return Err(ParseError::NotGitHub);
    }

    let path = url.path();
    let path = path.strip_suffix('/').unwrap_or(path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [owner, repo] => Ok(RepositoryReference {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }),
        other => {
            tracing::debug!(segments = other.len(), "Expected exactly owner/repo");
            Err(ParseError::WrongSegmentCount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reference(owner: &str, repo: &str) -> RepositoryReference {
        RepositoryReference {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }

    #[test]
    fn test_parse_full_url() {
        let parsed = parse_repo_url("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(parsed, reference("rust-lang", "rust"));
    }

    #[test]
    fn test_parse_trailing_slash() {
        let parsed = parse_repo_url("https://github.com/rust-lang/rust/").unwrap();
        assert_eq!(parsed, reference("rust-lang", "rust"));
    }

    #[test]
    fn test_parse_without_scheme() {
        let parsed = parse_repo_url("github.com/vercel/next.js").unwrap();
        assert_eq!(parsed, reference("vercel", "next.js"));
    }

    #[test]
    fn test_scheme_less_matches_prefixed() {
        let inputs = [
            "github.com/vercel/next.js",
            "github.com/vercel",
            "gitlab.com/user/repo",
            "www.github.com/a/b/",
            "github.com/a/b/c",
            "not a url",
        ];

        for input in inputs {
            let bare = parse_repo_url(input).ok();
            let prefixed = parse_repo_url(&format!("https://{}", input)).ok();
            assert_eq!(bare, prefixed, "input: {}", input);
        }
    }

    #[test]
    fn test_keeps_case_and_git_suffix() {
        let parsed = parse_repo_url("https://github.com/User/Repo.git").unwrap();
        assert_eq!(parsed, reference("User", "Repo.git"));
    }

    #[test]
    fn test_ignores_query_and_fragment() {
        let parsed = parse_repo_url("https://github.com/a/b?tab=readme#top").unwrap();
        assert_eq!(parsed, reference("a", "b"));
    }

    #[test]
    fn test_host_containing_github_com_is_accepted() {
        let parsed = parse_repo_url("https://www.github.com/a/b").unwrap();
        assert_eq!(parsed, reference("a", "b"));
    }

    #[test]
    fn test_rejects_other_hosts() {
        let result = parse_repo_url("https://gitlab.com/user/repo");
        assert!(matches!(result, Err(ParseError::NotGitHub)));
    }

    #[test]
    fn test_rejects_wrong_segment_counts() {
        for input in [
            "https://github.com",
            "https://github.com/",
            "https://github.com/owner",
            "https://github.com/owner/repo/tree/main",
        ] {
            let result = parse_repo_url(input);
            assert!(
                matches!(result, Err(ParseError::WrongSegmentCount)),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_rejects_garbage() {
        let result = parse_repo_url("not a url");
        assert!(matches!(result, Err(ParseError::Malformed(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid GitHub repository URL"
        );
    }

    #[test]
    fn test_with_scheme() {
        assert_eq!(with_scheme("github.com/a/b"), "https://github.com/a/b");
        assert_eq!(with_scheme("http://github.com/a/b"), "http://github.com/a/b");
        assert_eq!(with_scheme("git+ssh://github.com/a/b"), "git+ssh://github.com/a/b");
        assert_eq!(with_scheme("://github.com"), "https://://github.com");
        assert_eq!(with_scheme("  http://github.com/a/b\n"), "http://github.com/a/b");
    }

    #[test]
    fn test_pasted_url_with_surrounding_whitespace() {
        let parsed = parse_repo_url("  https://github.com/a/b \n").unwrap();
        assert_eq!(parsed, reference("a", "b"));

        let parsed = parse_repo_url("\thttps://github.com/a/b").unwrap();
        assert_eq!(parsed, reference("a", "b"));
    }

    #[test]
    fn test_scheme_less_with_leading_space_stays_invalid() {
        // "https://" lands in front of the space, which then sits in the host
        assert!(matches!(
            parse_repo_url("  github.com/a/b"),
            Err(ParseError::Malformed(_))
        ));
    }

    // Owner/repo segments the URL parser passes through untouched
    // (no '.'/'..' segments, nothing that gets percent-encoded)
    const SEGMENT: &str = "[A-Za-z0-9_-][A-Za-z0-9_.-]{0,19}";

    #[test]
    fn property_scheme_less_matches_prefixed() {
        proptest!(|(
            input in prop_oneof![
                "\\PC{0,40}",
                "[ a-z./:]{0,8}github\\.com[a-zA-Z0-9./?# -]{0,24}",
            ],
        )| {
            prop_assume!(!has_scheme(input.trim_matches(is_c0_control_or_space)));

            let bare = parse_repo_url(&input).ok();
            let prefixed = parse_repo_url(&format!("https://{}", input)).ok();
            prop_assert_eq!(bare, prefixed);
        });
    }

    #[test]
    fn property_owner_repo_round_trip() {
        proptest!(|(
            owner in SEGMENT,
            repo in SEGMENT,
            trailing_slash in any::<bool>(),
            with_https in any::<bool>(),
        )| {
            let input = format!(
                "{}github.com/{}/{}{}",
                if with_https { "https://" } else { "" },
                owner,
                repo,
                if trailing_slash { "/" } else { "" },
            );

            let parsed = parse_repo_url(&input).unwrap();
            prop_assert_eq!(parsed, reference(&owner, &repo));
        });
    }

    #[test]
    fn property_wrong_segment_count_is_rejected() {
        proptest!(|(
            segments in prop::collection::vec(SEGMENT, 0..6),
        )| {
            prop_assume!(segments.len() != 2);

            let input = format!("https://github.com/{}", segments.join("/"));
            let result = parse_repo_url(&input);
            prop_assert!(matches!(result, Err(ParseError::WrongSegmentCount)), "input: {}", input);
        });
    }

    #[test]
    fn property_non_github_hosts_are_rejected() {
        proptest!(|(
            host in "[a-z]{1,12}\\.(com|org|io)",
            owner in SEGMENT,
            repo in SEGMENT,
        )| {
            prop_assume!(!host.contains("github.com"));

            let result = parse_repo_url(&format!("https://{}/{}/{}", host, owner, repo));
            prop_assert!(matches!(result, Err(ParseError::NotGitHub)));
        });
    }
}
