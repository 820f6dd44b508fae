//! Git working tree status (branch and HEAD commit)

use super::Probe;
use std::path::Path;
use zwc_common::{CommandRunner, Error};

/// Placeholder for branch or commit that could not be read
pub const UNKNOWN: &str = "???";

/// Software repositories shown on the dashboard, relative to the install dir
pub const ZYNTHIAN_REPOS: [&str; 5] = [
    "zyncoder",
    "zynthian-ui",
    "zynthian-sys",
    "zynthian-data",
    "zynthian-webconf",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitInfo {
    pub branch: String,
    /// Full commit hash
    pub commit: String,
}

impl GitInfo {
    pub fn unknown() -> Self {
        Self {
            branch: UNKNOWN.to_string(),
            commit: UNKNOWN.to_string(),
        }
    }

    /// Abbreviated commit hash (7 characters)
    pub fn short_commit(&self) -> &str {
        match self.commit.char_indices().nth(7) {
            Some((idx, _)) => &self.commit[..idx],
            None => &self.commit,
        }
    }

    /// Upstream commit page for repository `repo`
    pub fn commit_url(&self, repo: &str) -> String {
        format!("https://github.com/zynthian/{}/commit/{}", repo, self.commit)
    }
}

/// Current branch from `git branch` output (the line marked with `*`)
pub fn parse_branch(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| line.strip_prefix('*'))
        .map(|branch| branch.trim().to_string())
}

/// Branch and commit of the working tree at `path`
pub async fn git_info(runner: &CommandRunner, path: &Path) -> Probe<GitInfo> {
    let (branch, commit) = tokio::join!(
        runner.run_in(path, "git", &["branch"]),
        runner.run_in(path, "git", &["rev-parse", "HEAD"]),
    );

    let result = branch
        .and_then(|out| {
            parse_branch(&out).ok_or_else(|| Error::CommandFailed {
                program: "git".to_string(),
                reason: "no current branch".to_string(),
            })
        })
        .and_then(|branch| {
            Ok(GitInfo {
                branch,
                commit: commit?.trim().to_string(),
            })
        });

    Probe::from_result(
        &format!("git info for {}", path.display()),
        result,
        GitInfo::unknown,
    )
}
