//! Filesystem layout
//!
//! Every path volt reads or writes is derived here from two roots: the home
//! directory and the volt root (`$VOLTPATH`, default `~/volt`).
//!
//! ```text
//! ~/volt/                                  volt root
//! ├── lock.json
//! ├── config.toml
//! ├── trx.lock
//! ├── tmp/
//! ├── repos/github.com/tyru/caw.vim/       clone destination
//! ├── plugconf/github.com/tyru/caw.vim.vim per-plugin config
//! └── rc/<profile>/{vimrc.vim,gvimrc.vim}
//!
//! ~/.vim/pack/volt/                        (~/vimfiles on Windows)
//! ├── build-info.json
//! ├── opt/github.com_tyru_caw.vim/         encoded repository directory
//! └── start/system/plugin/bundled_plugconf.vim
//! ```
//!
//! The environment is read once by [`LayoutConfig::from_env`]; every path
//! function after that is a pure computation over the snapshot.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, VoltError};
use crate::platform::HostOs;
use crate::repos::{to_slash, ReposPath};

pub const ENV_HOME: &str = "HOME";
pub const ENV_USERPROFILE: &str = "USERPROFILE";
pub const ENV_VOLTPATH: &str = "VOLTPATH";
pub const ENV_VOLT_VIM: &str = "VOLT_VIM";

/// Name of the volt root under home and of the pack under the editor dir
pub const VOLT_DIR_NAME: &str = "volt";

pub const PROFILE_VIMRC: &str = "vimrc.vim";
pub const PROFILE_GVIMRC: &str = "gvimrc.vim";
pub const VIMRC: &str = "vimrc";
pub const GVIMRC: &str = "gvimrc";

const REPOS_DIR: &str = "repos";
const PLUGCONF_DIR: &str = "plugconf";
const RC_DIR: &str = "rc";
const TMP_DIR: &str = "tmp";
const LOCK_JSON: &str = "lock.json";
const CONFIG_TOML: &str = "config.toml";
const TRX_LOCK: &str = "trx.lock";
const BUILD_INFO_JSON: &str = "build-info.json";

/// Snapshot of the environment roots every path is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    home: PathBuf,
    volt_path: PathBuf,
    vim_override: Option<PathBuf>,
    host_os: HostOs,
}

impl LayoutConfig {
    /// Layout rooted at `home` with the default volt root (`<home>/volt`)
    pub fn new(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            volt_path: home.join(VOLT_DIR_NAME),
            home,
            vim_override: None,
            host_os: HostOs::current(),
        }
    }

    /// Read the process environment once
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var_os(key))
    }

    /// Build the snapshot from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. Fails with
    /// [`VoltError::HomeDirectoryUnresolvable`] when neither `HOME` nor
    /// `USERPROFILE` yields a value.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let home = non_empty(ENV_HOME)
            .or_else(|| non_empty(ENV_USERPROFILE))
            .map(PathBuf::from)
            .ok_or(VoltError::HomeDirectoryUnresolvable)?;

        let mut config = Self::new(home);
        if let Some(volt_path) = non_empty(ENV_VOLTPATH) {
            config.volt_path = PathBuf::from(volt_path);
        }
        config.vim_override = non_empty(ENV_VOLT_VIM).map(PathBuf::from);

        tracing::debug!(
            home = %config.home.display(),
            volt_path = %config.volt_path.display(),
            vim_override = ?config.vim_override,
            "resolved layout roots"
        );
        Ok(config)
    }

    /// Override the volt root
    pub fn with_volt_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.volt_path = path.into();
        self
    }

    /// Use this editor executable instead of searching PATH
    pub fn with_vim_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.vim_override = Some(path.into());
        self
    }

    /// Compute paths for another OS family
    pub fn with_host_os(mut self, host_os: HostOs) -> Self {
        self.host_os = host_os;
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `$VOLTPATH`, or `<home>/volt`
    pub fn volt_path(&self) -> &Path {
        &self.volt_path
    }

    pub fn host_os(&self) -> HostOs {
        self.host_os
    }

    pub fn vim_override(&self) -> Option<&Path> {
        self.vim_override.as_deref()
    }

    // ========== Volt root ==========

    /// `<volt>/repos/{host}/{owner}/{name}`
    pub fn full_repos_path(&self, repos: &ReposPath) -> PathBuf {
        join_segments(self.volt_path.join(REPOS_DIR), repos.as_str())
    }

    /// `https://{repos}`
    pub fn clone_url(&self, repos: &ReposPath) -> String {
        clone_url(repos)
    }

    /// `<volt>/plugconf/{host}/{owner}/{name}.vim`
    pub fn plugconf(&self, repos: &ReposPath) -> PathBuf {
        join_segments(
            self.volt_path.join(PLUGCONF_DIR),
            &format!("{}.vim", repos.as_str()),
        )
    }

    /// `<volt>/rc/{profile}`
    pub fn rc_dir(&self, profile_name: &str) -> PathBuf {
        self.volt_path.join(RC_DIR).join(profile_name)
    }

    /// `<volt>/rc/{profile}/vimrc.vim`
    pub fn profile_vimrc(&self, profile_name: &str) -> PathBuf {
        self.rc_dir(profile_name).join(PROFILE_VIMRC)
    }

    /// `<volt>/rc/{profile}/gvimrc.vim`
    pub fn profile_gvimrc(&self, profile_name: &str) -> PathBuf {
        self.rc_dir(profile_name).join(PROFILE_GVIMRC)
    }

    pub fn lock_json(&self) -> PathBuf {
        self.volt_path.join(LOCK_JSON)
    }

    pub fn config_toml(&self) -> PathBuf {
        self.volt_path.join(CONFIG_TOML)
    }

    pub fn trx_lock(&self) -> PathBuf {
        self.volt_path.join(TRX_LOCK)
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.volt_path.join(TMP_DIR)
    }

    // ========== Editor directories ==========

    /// `~/vimfiles` on Windows, `~/.vim` elsewhere
    pub fn vim_dir(&self) -> PathBuf {
        self.home.join(self.host_os.vim_dir_name())
    }

    /// `<vim dir>/pack/volt`
    pub fn vim_volt_dir(&self) -> PathBuf {
        self.vim_dir().join("pack").join(VOLT_DIR_NAME)
    }

    /// `<vim dir>/pack/volt/opt`
    pub fn vim_volt_opt_dir(&self) -> PathBuf {
        self.vim_volt_dir().join("opt")
    }

    /// `<vim dir>/pack/volt/start`
    pub fn vim_volt_start_dir(&self) -> PathBuf {
        self.vim_volt_dir().join("start")
    }

    /// `<vim dir>/pack/volt/build-info.json`
    pub fn build_info_json(&self) -> PathBuf {
        self.vim_volt_dir().join(BUILD_INFO_JSON)
    }

    /// `<vim dir>/pack/volt/start/system/plugin/bundled_plugconf.vim`
    pub fn bundled_plugconf(&self) -> PathBuf {
        self.vim_volt_start_dir()
            .join("system")
            .join("plugin")
            .join("bundled_plugconf.vim")
    }

    /// `<vim dir>/pack/volt/opt/{encoded repos}`
    pub fn encode_repos_path(&self, repos: &ReposPath) -> PathBuf {
        self.vim_volt_opt_dir().join(encode_dir_name(repos))
    }

    // ========== Editor executable and rc files ==========

    /// `$VOLT_VIM` if set, otherwise `vim` (`vim.exe`) looked up in PATH
    pub fn vim_executable(&self) -> Result<PathBuf> {
        self.resolve_vim(|name| which::which(name))
    }

    /// Same as [`vim_executable`](Self::vim_executable), searching
    /// `search_path` instead of `$PATH`
    pub fn vim_executable_in(&self, search_path: impl AsRef<OsStr>) -> Result<PathBuf> {
        self.resolve_vim(|name| which::which_in(name, Some(search_path), &self.home))
    }

    fn resolve_vim<F>(&self, search: F) -> Result<PathBuf>
    where
        F: FnOnce(&str) -> std::result::Result<PathBuf, which::Error>,
    {
        if let Some(vim) = &self.vim_override {
            return Ok(vim.clone());
        }
        let name = self.host_os.vim_exe_name();
        let found = search(name).map_err(|_| VoltError::ExecutableNotFound {
            name: name.to_string(),
        })?;
        tracing::debug!(vim = %found.display(), "found vim in search path");
        Ok(found)
    }

    /// Existing vimrc files, home dotfile first
    pub fn lookup_vimrc(&self) -> Vec<PathBuf> {
        self.vimrc_candidates().collect()
    }

    /// Existing gvimrc files, home dotfile first
    pub fn lookup_gvimrc(&self) -> Vec<PathBuf> {
        self.gvimrc_candidates().collect()
    }

    /// Lazily yields `~/.vimrc` (`~/_vimrc`) then `<vim dir>/vimrc`, skipping
    /// missing files
    pub fn vimrc_candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.rc_candidates(VIMRC)
    }

    pub fn gvimrc_candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.rc_candidates(GVIMRC)
    }

    fn rc_candidates(&self, name: &'static str) -> impl Iterator<Item = PathBuf> + '_ {
        let home_rc = self
            .home
            .join(format!("{}{}", self.host_os.rc_prefix(), name));
        [home_rc, self.vim_dir().join(name)]
            .into_iter()
            .filter(|path| exists(path))
    }

    /// Every root-level path, for display
    pub fn list(&self) -> Vec<(&'static str, PathBuf)> {
        vec![
            ("home", self.home.clone()),
            ("volt_path", self.volt_path.clone()),
            ("lock_json", self.lock_json()),
            ("config_toml", self.config_toml()),
            ("trx_lock", self.trx_lock()),
            ("temp_dir", self.temp_dir()),
            ("vim_dir", self.vim_dir()),
            ("vim_volt_dir", self.vim_volt_dir()),
            ("vim_volt_opt_dir", self.vim_volt_opt_dir()),
            ("vim_volt_start_dir", self.vim_volt_start_dir()),
            ("build_info_json", self.build_info_json()),
            ("bundled_plugconf", self.bundled_plugconf()),
        ]
    }
}

/// `https://{repos}` with `/` separators
pub fn clone_url(repos: &ReposPath) -> String {
    format!("https://{}", to_slash(repos.as_str()))
}

/// Flatten a repository path into one directory name: `_` becomes `__`,
/// then `/` becomes `_`.
pub fn encode_dir_name(repos: &ReposPath) -> String {
    repos.as_str().replace('_', "__").replace('/', "_")
}

/// Reverse of [`encode_dir_name`] applied to the last component of `name`.
///
/// Replaces every `_` with `/`, then every `//` with `_`. This is not an
/// exact inverse: an underscore next to a slash (`owner/_name`,
/// `owner_/name`) encodes to an odd run of underscores and decodes to
/// `owner_/name`. Installed directories already use this scheme, so it is
/// kept as is.
pub fn decode_repos_path(name: &str) -> ReposPath {
    let base = Path::new(name)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(name);
    ReposPath::from_canonical(base.replace('_', "/").replace("//", "_"))
}

/// Existence as seen by `lstat`: a dangling symlink exists, and any error
/// other than "not found" is treated as existing.
pub fn exists(path: impl AsRef<Path>) -> bool {
    match fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

/// Append `/`-separated segments of `path` to `base` with native separators
fn join_segments(base: PathBuf, path: &str) -> PathBuf {
    to_slash(path)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base, |acc, segment| acc.join(segment))
}
