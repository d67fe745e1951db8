//! Host platform abstraction
//!
//! Editor directories, executable names and rc-file names differ between
//! Windows and everything else:
//! - Windows: `~/vimfiles`, `vim.exe`, `~/_vimrc`
//! - Others:  `~/.vim`, `vim`, `~/.vimrc`

/// Operating system family the layout is computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    /// Every non-Windows target (Linux, macOS, BSDs)
    Unix,
}

impl HostOs {
    /// The family this binary was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Name of the editor config directory under home
    pub fn vim_dir_name(&self) -> &'static str {
        match self {
            Self::Windows => "vimfiles",
            Self::Unix => ".vim",
        }
    }

    /// Editor executable name searched in PATH
    pub fn vim_exe_name(&self) -> &'static str {
        match self {
            Self::Windows => "vim.exe",
            Self::Unix => "vim",
        }
    }

    /// Prefix of rc files placed directly in home (`_vimrc` vs `.vimrc`)
    pub fn rc_prefix(&self) -> &'static str {
        match self {
            Self::Windows => "_",
            Self::Unix => ".",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Unix => "unix",
        }
    }
}

impl std::fmt::Display for HostOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for HostOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win" => Ok(Self::Windows),
            "unix" | "linux" | "macos" | "darwin" => Ok(Self::Unix),
            _ => Err(format!("Unknown host OS: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_os_names() {
        assert_eq!(HostOs::Windows.vim_dir_name(), "vimfiles");
        assert_eq!(HostOs::Unix.vim_dir_name(), ".vim");
        assert_eq!(HostOs::Windows.vim_exe_name(), "vim.exe");
        assert_eq!(HostOs::Unix.vim_exe_name(), "vim");
    }

    #[test]
    fn host_os_from_str() {
        assert_eq!("windows".parse::<HostOs>().unwrap(), HostOs::Windows);
        assert_eq!("Linux".parse::<HostOs>().unwrap(), HostOs::Unix);
        assert!("plan9".parse::<HostOs>().is_err());
    }

    #[test]
    fn current_matches_target() {
        assert_eq!(HostOs::current() == HostOs::Windows, cfg!(windows));
    }
}
