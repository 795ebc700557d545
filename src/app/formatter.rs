use crate::app::models::{Folder, Node};
use std::cmp::Ordering;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";
const SEPARATOR: &str = "---";

pub struct OutputGenerator;

/// Dictionary-style name order: letters compare ignoring case first, and
/// only names differing purely in case fall back to case, lowercase first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

impl OutputGenerator {
    /// ASCII tree of `folder`, one line per entry, siblings sorted by name.
    pub fn render_tree(folder: &Folder) -> String {
        let mut output = format!("{}/\n", folder.name);
        Self::render_children(folder, "", &mut output);
        output.trim_end().to_string()
    }

    fn render_children(folder: &Folder, prefix: &str, output: &mut String) {
        let mut children: Vec<(String, &Node)> =
            folder.children.iter().map(|c| (c.name(), c)).collect();
        children.sort_by(|a, b| compare_names(&a.0, &b.0));

        let count = children.len();
        for (index, (name, child)) in children.into_iter().enumerate() {
            let is_last = index + 1 == count;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };

            match child {
                Node::Folder(sub) => {
                    output.push_str(&format!("{}{}{}/\n", prefix, connector, name));
                    let marker = if is_last { BLANK } else { CONTINUATION };
                    Self::render_children(sub, &format!("{}{}", prefix, marker), output);
                }
                Node::File(_) => {
                    output.push_str(&format!("{}{}{}\n", prefix, connector, name));
                }
            }
        }
    }

    /// The tree wrapped into a self-contained block for the top of the output.
    pub fn directory_context_block(folder: &Folder) -> String {
        format!(
            "## Directory Structure: {}\n\n```\n{}\n```\n\n{}\n",
            folder.name,
            Self::render_tree(folder),
            SEPARATOR
        )
    }

    pub fn document_block(header: &str, content: &str) -> String {
        format!("# {}\n\n{}\n\n{}\n", header, content, SEPARATOR)
    }

    pub fn join_blocks(blocks: &[String]) -> String {
        blocks.join("\n")
    }
}
