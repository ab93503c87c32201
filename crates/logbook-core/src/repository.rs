//! Repository detection for changelog links.
//!
//! Order: config override → GITHUB_REPOSITORY env → git remote origin.

use std::path::Path;
use std::process::Command;

pub const GITHUB_HOST: &str = "https://github.com";

/// Host, owner and repository name used to expand URL formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub host: String,
    pub owner: String,
    pub repository: String,
}

impl RepoSlug {
    /// Parse an `owner/repo` slug hosted on GitHub.
    pub fn from_slug(slug: &str) -> Option<Self> {
        let (owner, repository) = slug.trim().split_once('/')?;
        if owner.is_empty() || repository.is_empty() {
            return None;
        }
        Some(Self {
            host: GITHUB_HOST.to_string(),
            owner: owner.to_string(),
            repository: repository.to_string(),
        })
    }
}

/// Detect the repository, preferring an explicit configuration value.
pub fn detect_repo_slug(repo_root: &Path, config_repo: Option<&str>) -> Option<RepoSlug> {
    // 1. If explicitly configured, use that
    if let Some(repo) = config_repo {
        return RepoSlug::from_slug(repo);
    }

    // 2. GITHUB_REPOSITORY is set in GitHub Actions
    if let Ok(github_repo) = std::env::var("GITHUB_REPOSITORY")
        && !github_repo.is_empty()
    {
        return RepoSlug::from_slug(&github_repo);
    }

    // 3. Try to extract from git remote
    let output = Command::new("git")
        .current_dir(repo_root)
        .args(["remote", "get-url", "origin"])
        .output()
        .ok()?;

    if !output.status.success() {
        tracing::debug!("no origin remote, changelog links disabled");
        return None;
    }

    let binding = String::from_utf8_lossy(&output.stdout);
    parse_github_url(binding.trim()).and_then(|slug| RepoSlug::from_slug(&slug))
}

/// Parse GitHub repository slug from HTTPS or SSH remote URLs
fn parse_github_url(url: &str) -> Option<String> {
    let rest = url
        .strip_prefix("https://github.com/")
        .or_else(|| url.strip_prefix("git@github.com:"))?;
    let without_git = rest.strip_suffix(".git").unwrap_or(rest);
    if without_git.split('/').filter(|s| !s.is_empty()).count() >= 2 {
        Some(without_git.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn parse_github_url_https() {
        assert_eq!(
            parse_github_url("https://github.com/owner/repo.git"),
            Some("owner/repo".to_string())
        );
        assert_eq!(
            parse_github_url("https://github.com/owner/repo"),
            Some("owner/repo".to_string())
        );
    }

    #[test]
    fn parse_github_url_ssh() {
        assert_eq!(
            parse_github_url("git@github.com:owner/repo.git"),
            Some("owner/repo".to_string())
        );
    }

    #[test]
    fn parse_github_url_invalid() {
        assert_eq!(parse_github_url("https://gitlab.com/owner/repo.git"), None);
        assert_eq!(parse_github_url("not-a-url"), None);
        assert_eq!(parse_github_url("https://github.com/"), None);
        assert_eq!(parse_github_url("https://github.com/user"), None);
    }

    #[test]
    fn slug_splits_owner_and_repository() {
        let slug = RepoSlug::from_slug("acme/rocket").unwrap();
        assert_eq!(slug.host, GITHUB_HOST);
        assert_eq!(slug.owner, "acme");
        assert_eq!(slug.repository, "rocket");

        assert!(RepoSlug::from_slug("acme").is_none());
        assert!(RepoSlug::from_slug("/rocket").is_none());
        assert!(RepoSlug::from_slug("acme/").is_none());
    }

    #[test]
    #[serial]
    fn config_override_wins() {
        let temp = tempfile::tempdir().unwrap();
        let slug = detect_repo_slug(temp.path(), Some("explicit/repo")).unwrap();
        assert_eq!(slug.owner, "explicit");
        assert_eq!(slug.repository, "repo");
    }

    #[test]
    #[serial]
    fn falls_back_to_github_repository_env() {
        let temp = tempfile::tempdir().unwrap();
        let previous = std::env::var("GITHUB_REPOSITORY").ok();
        // SAFETY: serialized with the other env-touching tests
        unsafe { std::env::set_var("GITHUB_REPOSITORY", "env-owner/env-repo") };

        let slug = detect_repo_slug(temp.path(), None);

        match previous {
            Some(value) => unsafe { std::env::set_var("GITHUB_REPOSITORY", value) },
            None => unsafe { std::env::remove_var("GITHUB_REPOSITORY") },
        }

        let slug = slug.unwrap();
        assert_eq!(slug.owner, "env-owner");
        assert_eq!(slug.repository, "env-repo");
    }
}
