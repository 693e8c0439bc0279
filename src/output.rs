//! GitHub Actions step outputs

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Output key holding the posted comment's ID
pub const COMMENT_ID: &str = "commentID";
/// Output key holding whether the PR was merged
pub const MERGED: &str = "merged";

/// Where step outputs go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutput {
    /// Append `key=value` lines to the file Actions passes in `GITHUB_OUTPUT`
    File(PathBuf),
    /// Print `key=value` lines to stdout (local runs)
    Stdout,
}

impl ActionOutput {
    /// Pick the destination from `GITHUB_OUTPUT`
    pub fn from_env() -> Self {
        std::env::var_os("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map_or(Self::Stdout, |path| Self::File(PathBuf::from(path)))
    }

    /// Record the ID of a posted comment
    pub fn write_comment_id(&self, comment_id: u64) -> Result<()> {
        self.append(&format!("{COMMENT_ID}={comment_id}\n"))
    }

    /// Record whether the pull request was merged
    pub fn write_merged(&self, merged: bool) -> Result<()> {
        self.append(&format!("{MERGED}={merged}\n"))
    }

    fn append(&self, lines: &str) -> Result<()> {
        match self {
            Self::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(lines.as_bytes())?;
            }
            Self::Stdout => {
                std::io::stdout().write_all(lines.as_bytes())?;
            }
        }
        Ok(())
    }
}
