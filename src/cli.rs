// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the viewer starts on the given markdown files (or the
// built-in pages). The config subcommand manages the config file:
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, VERSION};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// docsnip - terminal documentation viewer with copyable snippets
#[derive(Debug, Parser)]
#[command(name = "docsnip")]
#[command(version = VERSION)]
#[command(about = "Terminal documentation viewer with copyable code snippets", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Markdown files to show; the first becomes the start page
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Route to open on start, e.g. "/pricing#limits"
    #[arg(long, short)]
    pub route: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Run a subcommand to completion
pub fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Config { show, reset, path } => {
            if path {
                handle_config_path()
            } else if show {
                handle_config_show()
            } else if reset {
                handle_config_reset()
            } else {
                println!("Usage: docsnip config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
                Ok(())
            }
        }
    }
}

fn config_path() -> Result<PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read answer")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            bail!("Aborted, config left unchanged");
        }
    }

    Config::write_default(&path)?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_and_route() {
        let cli = Cli::try_parse_from(["docsnip", "a.md", "b.md", "--route", "/b#x"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert_eq!(cli.route.as_deref(), Some("/b#x"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn no_arguments_means_demo() {
        let cli = Cli::try_parse_from(["docsnip"]).unwrap();
        assert!(cli.files.is_empty());
        assert!(cli.route.is_none());
    }

    #[test]
    fn config_subcommand_flags() {
        let cli = Cli::try_parse_from(["docsnip", "config", "--path"]).unwrap();
        match cli.command {
            Some(Commands::Config { show, reset, path }) => {
                assert!(path && !show && !reset);
            }
            None => panic!("expected config subcommand"),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
