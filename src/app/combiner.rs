//! Combine operations: walk a folder, assemble every document into one
//! string in memory, then create the output with a single write.

use crate::app::config::Settings;
use crate::app::error::CombineError;
use crate::app::formatter::OutputGenerator;
use crate::app::models::{join_path, CombineReport, FileNode, Folder};
use crate::app::naming::{output_name, snake_case};
use crate::app::scanner::collect_documents;
use crate::app::vault::Vault;
use futures::future::try_join_all;

/// Base name of the output when the whole vault is combined.
pub const VAULT_BASE_NAME: &str = "vault_combined";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderStyle {
    /// Path relative to the combined folder.
    Relative,
    /// Full vault path.
    Full,
}

/// Combines every document below `folder` into `<folder>/<name>_<suffix>.md`.
pub async fn combine_folder<V: Vault + ?Sized>(
    vault: &V,
    folder: &Folder,
    settings: &Settings,
) -> Result<CombineReport, CombineError> {
    combine(
        vault,
        folder,
        settings,
        HeaderStyle::Relative,
        &snake_case(&folder.name),
    )
    .await
}

/// Combines every document in the vault into `vault_combined_<suffix>.md`
/// at the vault root.
pub async fn combine_vault<V: Vault + ?Sized>(
    vault: &V,
    settings: &Settings,
) -> Result<CombineReport, CombineError> {
    let root = vault.root().await.map_err(|source| {
        log::error!("Failed to list vault root: {}", source);
        CombineError::Read {
            path: "/".to_string(),
            source,
        }
    })?;
    combine(vault, &root, settings, HeaderStyle::Full, VAULT_BASE_NAME).await
}

async fn combine<V: Vault + ?Sized>(
    vault: &V,
    folder: &Folder,
    settings: &Settings,
    style: HeaderStyle,
    base_name: &str,
) -> Result<CombineReport, CombineError> {
    let mut documents = collect_documents(folder);
    documents.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!(
        "Combining {} documents from '{}'",
        documents.len(),
        folder.path
    );

    if documents.is_empty() && !settings.include_directory_context {
        return Err(CombineError::EmptyInput {
            folder: display_name(folder),
        });
    }

    let contents = read_all(vault, &documents).await?;

    let mut blocks = Vec::with_capacity(documents.len() + 1);
    if settings.include_directory_context {
        blocks.push(OutputGenerator::directory_context_block(folder));
    }
    for (file, content) in documents.iter().zip(&contents) {
        let header = match style {
            HeaderStyle::Relative => folder.relative_path(file),
            HeaderStyle::Full => file.path.as_str(),
        };
        blocks.push(OutputGenerator::document_block(header, content));
    }
    let combined = OutputGenerator::join_blocks(&blocks);

    let name = output_name(base_name, settings);
    let path = join_path(&folder.path, &name);
    log::debug!("Writing {} bytes to '{}'", combined.len(), path);

    vault.create(&path, &combined).await.map_err(|source| {
        log::error!("Failed to write {}: {}", path, source);
        CombineError::Write {
            path: path.clone(),
            source,
        }
    })?;

    let report = CombineReport {
        file_count: documents.len(),
        output_name: name,
        output_path: path,
        directory_only: documents.is_empty(),
    };
    log::info!("{}", report.status_message());
    Ok(report)
}

/// Reads all documents concurrently. Results come back in input order
/// regardless of completion order; the first failure aborts.
async fn read_all<V: Vault + ?Sized>(
    vault: &V,
    documents: &[&FileNode],
) -> Result<Vec<String>, CombineError> {
    try_join_all(documents.iter().map(|file| async move {
        vault.read(file).await.map_err(|source| {
            log::error!("Failed to read {}: {}", file.path, source);
            CombineError::Read {
                path: file.path.clone(),
                source,
            }
        })
    }))
    .await
}

fn display_name(folder: &Folder) -> String {
    if folder.path.is_empty() {
        folder.name.clone()
    } else {
        folder.path.clone()
    }
}
