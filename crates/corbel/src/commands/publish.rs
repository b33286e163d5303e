//! Publish a built site to the gh-pages branch.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Run the publish command.
///
/// Commits the contents of `folder` to the gh-pages branch of `repository`.
/// A folder without a `.git` is initialized and wired to the remote first.
/// Commands run sequentially; the first non-zero exit aborts.
pub async fn run(folder: &Path, repository: &str) -> Result<()> {
    if !folder.is_dir() {
        bail!("Folder {} does not exist", folder.display());
    }

    let mut script: Vec<Vec<&str>> = Vec::new();

    if !folder.join(".git").exists() {
        script.extend([
            vec!["init"],
            vec!["remote", "add", "origin", repository],
            vec!["pull", "origin", "gh-pages:master"],
            vec!["branch", "-m", "master", "gh-pages"],
            vec!["branch", "-u", "origin/gh-pages"],
        ]);
    }

    script.extend([
        vec!["add", "."],
        vec!["commit", "-m", "Update"],
        vec!["push"],
    ]);

    for args in &script {
        tracing::debug!("git {}", args.join(" "));

        let status = Command::new("git")
            .args(args)
            .current_dir(folder)
            .status()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !status.success() {
            bail!("git {} exited with {}", args.join(" "), status);
        }
    }

    tracing::info!("Published {} to gh-pages", folder.display());

    Ok(())
}
