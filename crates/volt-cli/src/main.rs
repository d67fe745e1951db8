use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use volt_core::{
    decode_repos_path, normalize_local_repos, normalize_repos, HostOs, LayoutConfig, ReposPath,
    ReposPathList, Result,
};

mod args;
use args::{Cli, Commands, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Some(Commands::Normalize { repos, local }) => handle_normalize(&repos, local),
        Some(Commands::Repos { repos, local, json }) => load_layout(cli.volt_path, cli.host_os)
            .and_then(|layout| handle_repos(&layout, &repos, local, json)),
        Some(Commands::Encode { repos, local }) => load_layout(cli.volt_path, cli.host_os)
            .and_then(|layout| handle_encode(&layout, &repos, local)),
        Some(Commands::Decode { name }) => {
            handle_decode(&name);
            Ok(())
        }
        Some(Commands::Layout { json }) => load_layout(cli.volt_path, cli.host_os)
            .and_then(|layout| handle_layout(&layout, json)),
        Some(Commands::Profile { name }) => load_layout(cli.volt_path, cli.host_os).map(|layout| {
            handle_profile(&layout, &name);
        }),
        Some(Commands::Rc { gui }) => load_layout(cli.volt_path, cli.host_os).map(|layout| {
            handle_rc(&layout, gui, cli.quiet);
        }),
        Some(Commands::Vim) => {
            load_layout(cli.volt_path, cli.host_os).and_then(|layout| handle_vim(&layout))
        }
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_fatal() => {
            eprintln!("{} {}", "[FATAL]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the flags
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "volt_core={level},volt_path={level}",
            level = default_level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_layout(volt_path: Option<PathBuf>, host_os: Option<HostOs>) -> Result<LayoutConfig> {
    let mut layout = LayoutConfig::from_env()?;
    if let Some(path) = volt_path {
        layout = layout.with_volt_path(path);
    }
    if let Some(host_os) = host_os {
        layout = layout.with_host_os(host_os);
    }
    Ok(layout)
}

fn parse_repos(raw: &str, local: bool) -> Result<ReposPath> {
    if local {
        normalize_local_repos(raw)
    } else {
        normalize_repos(raw)
    }
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "volt-path", &mut io::stdout());
}

fn handle_normalize(raw: &[String], local: bool) -> Result<()> {
    let list = raw
        .iter()
        .map(|r| parse_repos(r, local))
        .collect::<Result<ReposPathList>>()?;

    for repos in list.strings() {
        println!("{}", repos);
    }
    Ok(())
}

#[derive(Serialize)]
struct ReposReport {
    repos: String,
    clone_url: String,
    full_repos_path: PathBuf,
    plugconf: PathBuf,
    pack_dir: PathBuf,
}

impl ReposReport {
    fn new(layout: &LayoutConfig, repos: &ReposPath) -> Self {
        Self {
            repos: repos.to_string(),
            clone_url: layout.clone_url(repos),
            full_repos_path: layout.full_repos_path(repos),
            plugconf: layout.plugconf(repos),
            pack_dir: layout.encode_repos_path(repos),
        }
    }
}

fn handle_repos(layout: &LayoutConfig, raw: &str, local: bool, json: bool) -> Result<()> {
    let repos = parse_repos(raw, local)?;
    let report = ReposReport::new(layout, &repos);

    if json {
        print_json(&report);
        return Ok(());
    }

    println!();
    println!("{} {}", "Repository:".green(), report.repos);
    println!("  {:<10} {}", "clone".cyan(), report.clone_url);
    println!("  {:<10} {}", "repos".cyan(), report.full_repos_path.display());
    println!("  {:<10} {}", "plugconf".cyan(), report.plugconf.display());
    println!("  {:<10} {}", "pack".cyan(), report.pack_dir.display());
    if repos.is_local() {
        println!();
        println!("{}", "(local repository, not cloned)".dimmed());
    }
    println!();
    Ok(())
}

fn handle_encode(layout: &LayoutConfig, raw: &str, local: bool) -> Result<()> {
    let repos = parse_repos(raw, local)?;
    println!("{}", layout.encode_repos_path(&repos).display());
    Ok(())
}

fn handle_decode(name: &str) {
    println!("{}", decode_repos_path(name));
}

fn handle_layout(layout: &LayoutConfig, json: bool) -> Result<()> {
    if json {
        let map: serde_json::Map<String, serde_json::Value> = layout
            .list()
            .into_iter()
            .map(|(key, path)| (key.to_string(), path.display().to_string().into()))
            .collect();
        print_json(&map);
        return Ok(());
    }

    println!();
    println!("{} {}", "Host OS:".green(), layout.host_os());
    for (key, path) in layout.list() {
        println!("{} = {}", key.cyan(), path.display());
    }
    println!();
    Ok(())
}

fn handle_profile(layout: &LayoutConfig, name: &str) {
    println!("{} {}", "Profile:".green(), layout.rc_dir(name).display());
    println!("  {}", layout.profile_vimrc(name).display());
    println!("  {}", layout.profile_gvimrc(name).display());
}

fn handle_rc(layout: &LayoutConfig, gui: bool, quiet: bool) {
    let (label, found) = if gui {
        ("gvimrc", layout.lookup_gvimrc())
    } else {
        ("vimrc", layout.lookup_vimrc())
    };

    if found.is_empty() {
        if !quiet {
            eprintln!("{} No {} found", "[WARN]".yellow().bold(), label);
        }
        return;
    }
    for path in found {
        println!("{}", path.display());
    }
}

fn handle_vim(layout: &LayoutConfig) -> Result<()> {
    let vim = layout.vim_executable()?;
    println!("{}", vim.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} {}", "[ERROR]".red().bold(), e),
    }
}
