//! git-konfig
//!
//! Export, import and compare git config entries across the system,
//! global, local and worktree scopes.

use anyhow::{Context, Result};
use git_konfig::cli::export::ExportArgs;
use git_konfig::cli::import::ImportArgs;
use git_konfig::cli::list::ListArgs;
use git_konfig::cli::{Cli, Command, build_version};
use git_konfig::commands::export::{ExportOptions, run_export as export_entries};
use git_konfig::commands::import::{ImportOptions, run_import as import_entries};
use git_konfig::commands::list::{ListOptions, run_list as list_entries};
use git_konfig::config::{Config, ConfigLoader};
use git_konfig::git::GitCli;
use git_konfig::logging::{self, LogTarget};
use std::fs::File;
use std::io::{BufReader, BufWriter, IsTerminal, Write};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse_with_version(build_version());

    // Initialize logging based on --log option
    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let loader = ConfigLoader::load(cli.config.clone())?;
    debug!(
        tiers = ?loader.tiers(),
        path = ?loader.config_path(),
        "configuration loaded"
    );
    let mut config = loader.into_config();

    // Override config from CLI arguments
    if let Some(git) = &cli.git {
        config.git = git.clone();
    }
    if let Some(color) = cli.color {
        config.color = color;
    }
    colored::control::set_override(config.color.enabled(std::io::stdout().is_terminal()));

    let git = GitCli::new(&config.git);

    match cli.command {
        Command::Export(args) => run_export(&git, &config, args)?,
        Command::Import(args) => run_import(&git, args)?,
        Command::List(args) => run_list(&git, args)?,
    }

    Ok(())
}

/// Run the export command
fn run_export(git: &GitCli, config: &Config, args: ExportArgs) -> Result<()> {
    let options = ExportOptions {
        sections: args.sections_or(&config.export.sections),
        all: args.all,
        scopes: args.scopes.scope_set(),
    };

    let mut out: Box<dyn Write> = match args.output {
        Some(ref path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    let count = export_entries(git, &options, &mut out)?;
    if let Some(ref path) = args.output {
        eprintln!("Exported {} entries to {}", count, path.display());
    }
    Ok(())
}

/// Run the import command
fn run_import(git: &GitCli, args: ImportArgs) -> Result<()> {
    let options = ImportOptions {
        alias: args.alias,
        scopes: args.scopes.scope_set(),
        dry_run: args.dry_run,
    };
    debug!(mode = args.import_mode(), "starting import");

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();

    match args.input {
        Some(ref path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            import_entries(git, &options, BufReader::new(file), &mut stdout, &mut stderr)?;
        }
        None => {
            let stdin = std::io::stdin().lock();
            import_entries(git, &options, stdin, &mut stdout, &mut stderr)?;
        }
    }

    Ok(())
}

/// Run the list command
fn run_list(git: &GitCli, args: ListArgs) -> Result<()> {
    let options = ListOptions {
        filter: args.section_filter(),
        diff_only: args.diff,
    };

    let mut stdout = std::io::stdout().lock();
    list_entries(git, &options, args.format, &mut stdout)?;
    Ok(())
}
