// Declare modules
pub mod cli;
pub mod combiner;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod naming;
pub mod scanner;
pub mod vault;

use anyhow::{bail, Context, Result};
use pathdiff::diff_paths;
use std::env;
use std::path::{Component, Path};

use self::cli::{Cli, Command};
use self::combiner::{combine_folder, combine_vault};
use self::config::resolve_settings;
use self::error::CombineError;
use self::models::CombineReport;
use self::vault::{DiskVault, Vault};

/// Initializes components and dispatches the requested command.
pub async fn run(args: Cli) -> Result<()> {
    // 1. Resolve Configuration
    let settings = resolve_settings(args.config.clone(), &args.overrides, args.save)?;
    log::debug!("Effective settings: {:?}", settings);

    // 2. Locate the vault
    let vault_dir = match &args.vault {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let vault_dir = vault_dir
        .canonicalize()
        .with_context(|| format!("Vault directory {} not found", vault_dir.display()))?;
    let vault = DiskVault::new(vault_dir);

    // 3. Combine
    let outcome = match &args.command {
        Command::Settings => {
            print!(
                "{}",
                toml::to_string_pretty(&settings).context("Failed to serialize settings")?
            );
            return Ok(());
        }
        Command::Vault => combine_vault(&vault, &settings).await,
        Command::Folder { path } => {
            let folder_path = vault_relative(vault.root_dir(), path)?;
            let folder = vault
                .folder(&folder_path)
                .await
                .with_context(|| format!("Failed to list folder {}", path.display()))?;
            combine_folder(&vault, &folder, &settings).await
        }
    };

    // 4. Report
    report(outcome)
}

fn report(outcome: Result<CombineReport, CombineError>) -> Result<()> {
    match outcome {
        Ok(report) => {
            println!("{}", report.status_message());
            Ok(())
        }
        Err(err) if !err.is_fatal() => {
            println!("{}", err);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Converts a folder given on the command line into a vault path.
fn vault_relative(vault_root: &Path, folder: &Path) -> Result<String> {
    let absolute = folder
        .canonicalize()
        .with_context(|| format!("Folder {} not found", folder.display()))?;
    if !absolute.is_dir() {
        bail!("{} is not a folder", folder.display());
    }

    let relative = diff_paths(&absolute, vault_root)
        .with_context(|| format!("{} is not inside the vault", folder.display()))?;
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        bail!(
            "{} is not inside the vault {}",
            folder.display(),
            vault_root.display()
        );
    }

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}
