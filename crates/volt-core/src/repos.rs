//! Repository identifiers
//!
//! Every repository is keyed by a canonical `host/owner/name` path. Users may
//! type any of the following forms, which all normalize to
//! `github.com/tyru/caw.vim`:
//!
//! ```text
//! tyru/caw.vim[.git]
//! github.com/tyru/caw.vim[.git]
//! https://github.com/tyru/caw.vim[.git]   (also http:// and git://)
//! ```
//!
//! Plugins that only live on the local disk use the reserved
//! `localhost/local/<name>` namespace.

use std::borrow::Cow;
use std::path::MAIN_SEPARATOR;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoltError};

/// Host prepended to `owner/name` references
pub const DEFAULT_HOST: &str = "github.com";

/// Prefix of repositories that exist only on the local disk
pub const LOCAL_PREFIX: &str = "localhost/local";

/// First segment of a URL reference once split on `/`
const URL_SCHEMES: &[&str] = &["https:", "http:", "git:"];

const GIT_SUFFIX: &str = ".git";

/// Canonical repository identifier (`host/owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReposPath(String);

impl ReposPath {
    /// Wrap a string that is already canonical. Only the codec and the
    /// normalizer produce these.
    pub(crate) fn from_canonical(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Slash-separated components, regardless of the host separator
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Whether this names a local-only repository (`localhost/...`)
    pub fn is_local(&self) -> bool {
        self.segments().next() == Some("localhost")
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ReposPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReposPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ReposPath {
    type Err = VoltError;

    fn from_str(s: &str) -> Result<Self> {
        normalize_repos(s)
    }
}

/// Ordered list of repositories, as given by the user or the lock file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReposPathList(Vec<ReposPath>);

impl ReposPathList {
    /// Plain strings in list order
    pub fn strings(&self) -> Vec<String> {
        self.0.iter().map(|p| p.0.clone()).collect()
    }
}

impl FromIterator<ReposPath> for ReposPathList {
    fn from_iter<I: IntoIterator<Item = ReposPath>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Normalize a user-supplied repository reference into `host/owner/name`.
///
/// Rules are tried in order against the number of `/`-separated segments:
/// exactly three is taken as-is, exactly two gets [`DEFAULT_HOST`], and a
/// URL keeps its last three segments. One trailing `.git` is dropped, so
/// `name.git.git` needs two passes to settle; existing clones are keyed on
/// the single-trim result.
pub fn normalize_repos(raw: &str) -> Result<ReposPath> {
    let raw = to_slash(raw);
    let paths: Vec<&str> = raw.split('/').collect();

    let normalized = match paths.len() {
        3 => trim_git_suffix(&raw).to_string(),
        2 => trim_git_suffix(&format!("{}/{}", DEFAULT_HOST, raw)).to_string(),
        n if n > 3 && URL_SCHEMES.contains(&paths[0]) => {
            trim_git_suffix(&paths[n - 3..].join("/")).to_string()
        }
        _ => {
            return Err(VoltError::InvalidFormat {
                raw: raw.to_string(),
            })
        }
    };

    tracing::debug!(raw = %raw, repos = %normalized, "normalized repository path");
    Ok(ReposPath(normalized))
}

/// Like [`normalize_repos`], but a bare name without any `/` becomes a
/// local-only repository `localhost/local/<name>`.
pub fn normalize_local_repos(name: &str) -> Result<ReposPath> {
    if name.contains('/') {
        normalize_repos(name)
    } else {
        Ok(ReposPath(format!("{}/{}", LOCAL_PREFIX, name)))
    }
}

fn trim_git_suffix(path: &str) -> &str {
    path.strip_suffix(GIT_SUFFIX).unwrap_or(path)
}

/// Replace the host path separator with `/`.
pub(crate) fn to_slash(path: &str) -> Cow<'_, str> {
    if MAIN_SEPARATOR == '/' {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(path.replace(MAIN_SEPARATOR, "/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> String {
        normalize_repos(raw).unwrap().into_string()
    }

    #[test]
    fn owner_name_gets_default_host() {
        assert_eq!(normalize("tyru/caw.vim"), "github.com/tyru/caw.vim");
        assert_eq!(normalize("tyru/caw.vim.git"), "github.com/tyru/caw.vim");
    }

    #[test]
    fn host_owner_name_is_kept() {
        assert_eq!(normalize("github.com/tyru/caw.vim"), "github.com/tyru/caw.vim");
        assert_eq!(
            normalize("gitlab.com/owner/plugin.git"),
            "gitlab.com/owner/plugin"
        );
    }

    #[test]
    fn url_forms_keep_last_three_segments() {
        for scheme in ["http", "https", "git"] {
            assert_eq!(
                normalize(&format!("{}://github.com/tyru/caw.vim.git", scheme)),
                "github.com/tyru/caw.vim"
            );
            assert_eq!(
                normalize(&format!("{}://github.com/tyru/caw.vim", scheme)),
                "github.com/tyru/caw.vim"
            );
        }
    }

    #[test]
    fn url_with_longer_prefix_keeps_tail() {
        assert_eq!(
            normalize("https://git.example.com/mirror/github.com/tyru/caw.vim"),
            "github.com/tyru/caw.vim"
        );
    }

    #[test]
    fn double_git_suffix_is_not_idempotent() {
        // Known limitation: only one `.git` is trimmed per pass, so a second
        // pass changes the result.
        let once = normalize_repos("owner/name.git.git").unwrap();
        assert_eq!(once.as_str(), "github.com/owner/name.git");

        let twice = normalize_repos(once.as_str()).unwrap();
        assert_eq!(twice.as_str(), "github.com/owner/name");
        assert_ne!(once, twice);
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            "tyru/caw.vim",
            "tyru/caw.vim.git",
            "github.com/tyru/caw.vim",
            "https://github.com/tyru/caw.vim.git",
            "git://example.org/a/b",
        ];
        for raw in inputs {
            let once = normalize_repos(raw).unwrap();
            let twice = normalize_repos(once.as_str()).unwrap();
            assert_eq!(once, twice, "not idempotent for {}", raw);
        }
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        for raw in ["caw.vim", "", "a/b/c/d", "ftp://github.com/tyru/caw.vim", "https:"] {
            match normalize_repos(raw) {
                Err(VoltError::InvalidFormat { raw: got }) => assert_eq!(got, raw),
                other => panic!("expected InvalidFormat for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn local_names_use_reserved_prefix() {
        let local = normalize_local_repos("myplugin").unwrap();
        assert_eq!(local.as_str(), "localhost/local/myplugin");
        assert!(local.is_local());

        let remote = normalize_local_repos("a/b").unwrap();
        assert_eq!(remote.as_str(), "github.com/a/b");
        assert!(!remote.is_local());
    }

    #[test]
    fn local_names_are_not_validated() {
        assert_eq!(
            normalize_local_repos("name.git").unwrap().as_str(),
            "localhost/local/name.git"
        );
        assert!(normalize_local_repos("a/b/c/d").is_err());
    }

    #[test]
    fn from_str_normalizes() {
        let path: ReposPath = "tyru/caw.vim".parse().unwrap();
        assert_eq!(path.to_string(), "github.com/tyru/caw.vim");
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["github.com", "tyru", "caw.vim"]
        );
    }

    #[test]
    fn list_keeps_order() {
        let list: ReposPathList = ["b/b", "a/a", "c/c"]
            .iter()
            .map(|raw| normalize_repos(raw).unwrap())
            .collect();
        assert_eq!(
            list.strings(),
            vec!["github.com/b/b", "github.com/a/a", "github.com/c/c"]
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let list: ReposPathList = std::iter::once(normalize_repos("tyru/caw.vim").unwrap())
            .collect();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"["github.com/tyru/caw.vim"]"#);
        let back: ReposPathList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }
}
