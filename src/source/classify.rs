//! Remote URL classification
//!
//! GitHub serves clonable repositories and static archive downloads from
//! URLs that look alike. Rather than asking GitHub (slow, rate limited), the
//! documented archive media paths are recognised by shape:
//!
//! ```text
//! https://github.com/<owner>/<repo>/<media_type>/<ref...>
//! ```

use std::fmt;

/// Prefix of URLs that are classified without touching the network
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

const ARCHIVE_PATH_TYPES: [&str; 4] = ["archive", "releases", "tarball", "zipball"];
const ARCHIVE_SUFFIXES: [&str; 2] = [".tar.gz", ".zip"];

/// What kind of endpoint a URL denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteClassification {
    LiveRepository,
    StaticArchive,
}

impl RemoteClassification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LiveRepository => "live-repository",
            Self::StaticArchive => "static-archive",
        }
    }
}

impl fmt::Display for RemoteClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a URL by its path segments
pub fn classify(url: &str) -> RemoteClassification {
    let directory = url.strip_prefix(GITHUB_URL_PREFIX).unwrap_or(url);
    let segments: Vec<&str> = directory.split('/').collect();

    let media_path = segments
        .get(2)
        .is_some_and(|segment| ARCHIVE_PATH_TYPES.contains(segment));
    let archive_file = segments
        .last()
        .is_some_and(|segment| ARCHIVE_SUFFIXES.iter().any(|s| segment.ends_with(s)));

    if media_path || archive_file {
        RemoteClassification::StaticArchive
    } else {
        RemoteClassification::LiveRepository
    }
}

pub fn is_github_url(url: &str) -> bool {
    url.starts_with(GITHUB_URL_PREFIX)
}

/// A GitHub URL shaped like a clonable repository
pub fn is_live_github_remote(url: &str) -> bool {
    is_github_url(url) && classify(url) == RemoteClassification::LiveRepository
}
