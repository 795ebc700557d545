use std::path::Path;

/// Extension (without the dot) of the documents that get combined.
pub const DOCUMENT_EXTENSION: &str = "md";

/// A directory in the vault, together with everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    /// Vault-relative path, `/`-separated. The vault root is `""`.
    pub path: String,
    pub children: Vec<Node>,
}

/// A leaf file in the vault. Content is read on demand through the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File name without the extension.
    pub name: String,
    pub path: String,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Folder(Folder),
    File(FileNode),
}

impl Folder {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// Inserts an entry given its components relative to this folder.
    /// Missing intermediate folders are created on the way down.
    pub fn insert(&mut self, components: &[String], is_dir: bool) {
        let Some((first, rest)) = components.split_first() else {
            return;
        };
        let child_path = join_path(&self.path, first);

        if rest.is_empty() && !is_dir {
            self.children.push(Node::File(FileNode::from_file_name(first, child_path)));
            return;
        }

        let index = match self
            .children
            .iter()
            .position(|c| matches!(c, Node::Folder(f) if f.name == *first))
        {
            Some(index) => index,
            None => {
                self.children
                    .push(Node::Folder(Folder::new(first.as_str(), child_path)));
                self.children.len() - 1
            }
        };

        if let Node::Folder(sub) = &mut self.children[index] {
            sub.insert(rest, is_dir);
        }
    }

    /// Path of `file` with this folder's own prefix stripped.
    pub fn relative_path<'a>(&self, file: &'a FileNode) -> &'a str {
        if self.path.is_empty() {
            return &file.path;
        }
        file.path
            .strip_prefix(self.path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(&file.path)
    }
}

impl FileNode {
    pub fn from_file_name(file_name: &str, path: String) -> Self {
        let as_path = Path::new(file_name);
        let extension = as_path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let name = if extension.is_empty() {
            file_name.to_string()
        } else {
            as_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        Self {
            name,
            path,
            extension,
        }
    }

    /// Name including the extension, as it appears on disk.
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }

    pub fn is_document(&self) -> bool {
        self.extension == DOCUMENT_EXTENSION
    }
}

impl Node {
    /// Display name used for ordering and tree drawing.
    pub fn name(&self) -> String {
        match self {
            Node::Folder(folder) => folder.name.clone(),
            Node::File(file) => file.file_name(),
        }
    }
}

/// Joins a vault-relative parent path and a child name.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Outcome of a successful combine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineReport {
    pub file_count: usize,
    pub output_name: String,
    pub output_path: String,
    /// Zero documents were found but the directory context was still written.
    pub directory_only: bool,
}

impl CombineReport {
    pub fn status_message(&self) -> String {
        if self.directory_only {
            format!(
                "No markdown files found; wrote directory context to {}",
                self.output_name
            )
        } else {
            format!(
                "Combined {} files into {}",
                self.file_count, self.output_name
            )
        }
    }
}
