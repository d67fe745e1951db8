use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use volt_core::HostOs;

#[derive(Parser)]
#[command(name = "volt-path")]
#[command(about = "Inspect volt repository identifiers and filesystem layout")]
#[command(version)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Volt root directory (default: $VOLTPATH or ~/volt)
    #[arg(long, global = true)]
    pub volt_path: Option<PathBuf>,

    /// Compute editor paths for another OS (windows, unix)
    #[arg(long, global = true)]
    pub host_os: Option<HostOs>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print canonical repository paths (host/owner/name)
    Normalize {
        /// Repository references (e.g., tyru/caw.vim, https://github.com/tyru/caw.vim.git)
        #[arg(required = true)]
        repos: Vec<String>,

        /// Treat names without '/' as local repositories (localhost/local/<name>)
        #[arg(short, long)]
        local: bool,
    },

    /// Show every path derived from a repository
    Repos {
        /// Repository reference
        repos: String,

        /// Treat a name without '/' as a local repository
        #[arg(short, long)]
        local: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the pack directory a repository is installed to
    Encode {
        /// Repository reference
        repos: String,

        /// Treat a name without '/' as a local repository
        #[arg(short, long)]
        local: bool,
    },

    /// Convert a pack directory name back into a repository path
    Decode {
        /// Directory name or path under pack/volt/opt
        name: String,
    },

    /// Show volt root and editor directories
    Layout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show paths of a profile's rc files
    Profile {
        /// Profile name
        #[arg(default_value = "default")]
        name: String,
    },

    /// List existing vimrc files (gvimrc with --gui)
    Rc {
        /// Look up gvimrc instead of vimrc
        #[arg(short, long)]
        gui: bool,
    },

    /// Print the vim executable ($VOLT_VIM or PATH lookup)
    Vim,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_normalize_many() {
        let cli = Cli::parse_from(["volt-path", "normalize", "-l", "a/b", "mine"]);
        match cli.command {
            Some(Commands::Normalize { repos, local }) => {
                assert_eq!(repos, vec!["a/b", "mine"]);
                assert!(local);
            }
            _ => panic!("expected normalize"),
        }
    }

    #[test]
    fn parse_global_volt_path() {
        let cli = Cli::parse_from(["volt-path", "layout", "--volt-path", "/tmp/volt"]);
        assert_eq!(cli.volt_path, Some(PathBuf::from("/tmp/volt")));
        assert!(matches!(cli.command, Some(Commands::Layout { json: false })));
    }

    #[test]
    fn parse_encode_local() {
        let cli = Cli::parse_from(["volt-path", "encode", "--local", "myplugin"]);
        match cli.command {
            Some(Commands::Encode { repos, local }) => {
                assert_eq!(repos, "myplugin");
                assert!(local);
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn parse_host_os() {
        let cli = Cli::parse_from(["volt-path", "layout", "--host-os", "windows"]);
        assert_eq!(cli.host_os, Some(HostOs::Windows));
        assert!(Cli::try_parse_from(["volt-path", "layout", "--host-os", "plan9"]).is_err());
    }

    #[test]
    fn normalize_requires_input() {
        assert!(Cli::try_parse_from(["volt-path", "normalize"]).is_err());
    }
}
