//! Git error interpretation
//!
//! libgit2 messages are noisy and sometimes embed the full remote URL
//! (credentials included). Everything that leaves the `git` module goes
//! through [`interpret_git_error`] first.

use git2::{Error, ErrorClass, ErrorCode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Category {
    RepositoryNotFound,
    ReferenceNotFound,
    AuthenticationFailed,
    PermissionDenied,
    NetworkError,
    HttpCertificate,
    HttpSsl,
    Other(ErrorClass),
}

type ErrorCheck = fn(&str, ErrorClass) -> bool;

const CLASSIFICATIONS: &[(ErrorCheck, Category)] = &[
    (
        |msg, class| {
            class == ErrorClass::Reference
                || msg.contains("revspec")
                || msg.contains("reference")
                || msg.contains("unable to resolve")
        },
        Category::ReferenceNotFound,
    ),
    (
        |msg, _| {
            msg.contains("not found")
                || msg.contains("404")
                || msg.contains("too many redirects")
                || msg.contains("authentication replays")
        },
        Category::RepositoryNotFound,
    ),
    (
        |msg, _| msg.contains("authentication") || msg.contains("credentials"),
        Category::AuthenticationFailed,
    ),
    (
        |msg, _| msg.contains("permission denied") || msg.contains("access denied"),
        Category::PermissionDenied,
    ),
    (
        |msg, _| {
            msg.contains("connection")
                || msg.contains("network")
                || msg.contains("timeout")
                || msg.contains("timed out")
        },
        Category::NetworkError,
    ),
    (
        |msg, class| class == ErrorClass::Http && msg.contains("certificate"),
        Category::HttpCertificate,
    ),
    (
        |msg, class| class == ErrorClass::Http && msg.contains("ssl"),
        Category::HttpSsl,
    ),
];

fn categorize(msg: &str, class: ErrorClass) -> Category {
    CLASSIFICATIONS
        .iter()
        .find(|(check, _)| check(msg, class))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Other(class))
}

/// Interpret a git2 error into a short, log-safe reason
pub fn interpret_git_error(err: &Error) -> String {
    let message = err.message().to_lowercase();

    match categorize(&message, err.class()) {
        Category::ReferenceNotFound => "reference not found".to_string(),
        Category::RepositoryNotFound => "repository not found".to_string(),
        Category::AuthenticationFailed => "authentication failed".to_string(),
        Category::PermissionDenied => "permission denied".to_string(),
        Category::NetworkError => "network error".to_string(),
        Category::HttpCertificate => "certificate error".to_string(),
        Category::HttpSsl => "SSL error".to_string(),
        // Other messages may quote the remote; keep only the class
        Category::Other(ErrorClass::Http) => "HTTP error".to_string(),
        Category::Other(ErrorClass::Ssh) => "SSH error".to_string(),
        Category::Other(_) => strip_urls(err.message()),
    }
}

/// Whether the error means "there is no repository here"
pub fn is_missing_repository(err: &Error) -> bool {
    err.code() == ErrorCode::NotFound && err.class() == ErrorClass::Repository
}

/// Drop any token that looks like a URL, since it may carry userinfo
fn strip_urls(message: &str) -> String {
    message
        .split_whitespace()
        .map(|word| {
            let trimmed = word.trim_matches(|c| c == '\'' || c == '"' || c == ';');
            if trimmed.contains("://") {
                "<remote>"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
