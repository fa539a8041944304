//! Git reference resolution
//!
//! A component's ref may be a branch, a tag, a full or abbreviated SHA, or
//! `HEAD`. Remote-tracking refs win over stale local branches so that a
//! fetched clone checks out what the remote currently has.

use git2::{Commit, Repository};

fn candidates(refname: &str) -> Vec<String> {
    if refname == "HEAD" {
        return vec!["refs/remotes/origin/HEAD".to_string(), "HEAD".to_string()];
    }

    vec![
        format!("refs/remotes/origin/{refname}"),
        format!("refs/tags/{refname}"),
        format!("refs/heads/{refname}"),
        refname.to_string(),
    ]
}

/// Resolve a ref name to a commit
pub fn resolve<'a>(repo: &'a Repository, refname: &str) -> Result<Commit<'a>, git2::Error> {
    for candidate in candidates(refname) {
        if let Ok(reference) = repo.find_reference(&candidate) {
            if let Ok(commit) = reference.peel_to_commit() {
                return Ok(commit);
            }
        }
    }

    repo.revparse_single(refname)?.peel_to_commit()
}
