use crate::app::models::{FileNode, Folder, Node};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::io;
use std::path::Path;

/// Collects every document below `folder`, depth-first.
///
/// Direct matches of a folder come in child order, each subfolder's
/// documents are appended when it is reached. No sorting happens here.
pub fn collect_documents(folder: &Folder) -> Vec<&FileNode> {
    let mut documents = Vec::new();
    collect_into(folder, &mut documents);
    documents
}

fn collect_into<'a>(folder: &'a Folder, documents: &mut Vec<&'a FileNode>) {
    for child in &folder.children {
        match child {
            Node::File(file) if file.is_document() => documents.push(file),
            Node::File(_) => {}
            Node::Folder(sub) => collect_into(sub, documents),
        }
    }
}

/// Builds an in-memory snapshot of `base`, a directory on disk whose
/// vault-relative path is `folder_path`.
///
/// Hidden entries are skipped so tool folders such as `.obsidian` or
/// `.git` never become part of the vault.
pub fn snapshot(base: &Path, name: &str, folder_path: &str) -> io::Result<Folder> {
    if !base.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} is not a folder", base.display()),
        ));
    }

    let mut folder = Folder::new(name, folder_path);

    let walker = WalkBuilder::new(base)
        .hidden(true)
        .parents(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                let Some(relative) = diff_paths(entry.path(), base) else {
                    continue;
                };
                // Skip the root folder itself
                if relative.as_os_str().is_empty() {
                    continue;
                }
                // Vault paths are strings; a name that is not UTF-8 could not be read back
                let Some(components) = relative
                    .components()
                    .map(|c| c.as_os_str().to_str().map(String::from))
                    .collect::<Option<Vec<String>>>()
                else {
                    log::warn!("Skipping non UTF-8 path: {}", entry.path().display());
                    continue;
                };
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                folder.insert(&components, is_dir);
            }
            Err(err) => log::warn!("Error walking entry: {}", err),
        }
    }

    log::debug!(
        "Snapshot of '{}' holds {} top-level entries",
        folder.path,
        folder.children.len()
    );
    Ok(folder)
}
