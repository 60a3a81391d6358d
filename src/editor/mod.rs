// SPDX-License-Identifier: MIT
//! Editor state store — owns the workspace file tree and the list of open
//! tabs, and keeps the two consistent.
//!
//! A file's open-ness moves `Closed → Open(inactive) → Open(active) → Closed`;
//! at most one handle is active at any time, for any sequence of operations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One node of the workspace tree. Folders own children; files own content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    pub fn file(id: &str, name: &str, language: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: NodeKind::File,
            language: Some(language.to_string()),
            content: Some(content.to_string()),
            children: Vec::new(),
        }
    }

    pub fn folder(id: &str, name: &str, children: Vec<FileNode>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: NodeKind::Folder,
            language: None,
            content: None,
            children,
        }
    }
}

/// A flattened projection of an open file, shown as an editor tab.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenFileHandle {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Default)]
pub struct EditorState {
    tree: Vec<FileNode>,
    open_files: Vec<OpenFileHandle>,
}

impl EditorState {
    pub fn new(tree: Vec<FileNode>) -> Self {
        Self {
            tree,
            open_files: Vec::new(),
        }
    }

    pub fn tree(&self) -> &[FileNode] {
        &self.tree
    }

    pub fn open_files(&self) -> &[OpenFileHandle] {
        &self.open_files
    }

    pub fn active_file(&self) -> Option<&OpenFileHandle> {
        self.open_files.iter().find(|h| h.is_active)
    }

    /// Open a file node as a tab and make it active.
    ///
    /// Idempotent on re-open: an existing handle for the same id is
    /// re-activated instead of duplicated. Folders are ignored.
    pub fn open_file(&mut self, node: &FileNode) {
        if node.kind == NodeKind::Folder {
            return;
        }
        if !self.open_files.iter().any(|h| h.id == node.id) {
            self.open_files.push(OpenFileHandle {
                id: node.id.clone(),
                name: node.name.clone(),
                content: node.content.clone().unwrap_or_default(),
                language: node.language.clone(),
                is_active: false,
            });
        }
        for handle in &mut self.open_files {
            handle.is_active = handle.id == node.id;
        }
    }

    /// Close a tab. If it was the active one, the handle at the same index
    /// (clamped to the last remaining handle) becomes active. Unknown ids
    /// are a no-op.
    pub fn close_file(&mut self, id: &str) {
        let Some(idx) = self.open_files.iter().position(|h| h.id == id) else {
            return;
        };
        let was_active = self.open_files[idx].is_active;
        self.open_files.remove(idx);
        if was_active && !self.open_files.is_empty() {
            let next = idx.min(self.open_files.len() - 1);
            for (i, handle) in self.open_files.iter_mut().enumerate() {
                handle.is_active = i == next;
            }
        }
    }

    /// Activate exactly one tab. An unknown id leaves the state unchanged and
    /// returns `false` — no tab is deactivated. Documented no-op, kept from
    /// the original contract.
    pub fn set_active_file(&mut self, id: &str) -> bool {
        if !self.open_files.iter().any(|h| h.id == id) {
            return false;
        }
        for handle in &mut self.open_files {
            handle.is_active = handle.id == id;
        }
        true
    }

    /// Update an open tab's content and write it through to the backing tree
    /// node, so handle and node converge.
    pub fn update_content(&mut self, id: &str, content: &str) -> bool {
        let Some(handle) = self.open_files.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        handle.content = content.to_string();
        if let Some(node) = find_node_mut(&mut self.tree, id) {
            node.content = Some(content.to_string());
        }
        true
    }

    pub fn find_node(&self, id: &str) -> Option<&FileNode> {
        find_node(&self.tree, id)
    }

    /// The demo project tree the frontend shows on first load.
    pub fn sample_workspace() -> Self {
        Self::new(vec![FileNode::folder(
            "root",
            "my-project",
            vec![
                FileNode::folder(
                    "src",
                    "src",
                    vec![
                        FileNode::file(
                            "src/index.js",
                            "index.js",
                            "javascript",
                            "console.log(\"Hello from Nimbus IDE\");\n",
                        ),
                        FileNode::file(
                            "src/app.js",
                            "app.js",
                            "javascript",
                            "export function app() {\n  return \"app\";\n}\n",
                        ),
                    ],
                ),
                FileNode::file(
                    "README.md",
                    "README.md",
                    "markdown",
                    "# my-project\n\nDemo workspace.\n",
                ),
            ],
        )])
    }
}

fn find_node<'a>(nodes: &'a [FileNode], id: &str) -> Option<&'a FileNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, id) {
            return Some(found);
        }
    }
    None
}

fn find_node_mut<'a>(nodes: &'a mut [FileNode], id: &str) -> Option<&'a mut FileNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.children, id) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str) -> FileNode {
        FileNode::file(id, &format!("{id}.js"), "javascript", "// body")
    }

    fn active_count(state: &EditorState) -> usize {
        state.open_files().iter().filter(|h| h.is_active).count()
    }

    #[test]
    fn open_is_idempotent_and_activates() {
        let mut state = EditorState::new(vec![file("a")]);
        let node = file("a");
        state.open_file(&node);
        state.open_file(&node);
        assert_eq!(state.open_files().len(), 1);
        assert!(state.open_files()[0].is_active);
    }

    #[test]
    fn open_folder_is_ignored() {
        let mut state = EditorState::default();
        state.open_file(&FileNode::folder("d", "dir", vec![]));
        assert!(state.open_files().is_empty());
    }

    #[test]
    fn close_active_activates_same_index() {
        let mut state = EditorState::default();
        for id in ["a", "b", "c"] {
            state.open_file(&file(id));
        }
        state.set_active_file("b");
        state.close_file("b");
        // "c" slid into index 1 and takes over.
        assert_eq!(state.active_file().unwrap().id, "c");
        assert_eq!(active_count(&state), 1);
    }

    #[test]
    fn close_active_last_clamps_to_new_last() {
        let mut state = EditorState::default();
        for id in ["a", "b", "c"] {
            state.open_file(&file(id));
        }
        // "c" is active (last opened).
        state.close_file("c");
        assert_eq!(state.active_file().unwrap().id, "b");
    }

    #[test]
    fn close_inactive_keeps_active_untouched() {
        let mut state = EditorState::default();
        for id in ["a", "b"] {
            state.open_file(&file(id));
        }
        state.close_file("a");
        assert_eq!(state.active_file().unwrap().id, "b");
    }

    #[test]
    fn close_last_handle_leaves_none_active() {
        let mut state = EditorState::default();
        state.open_file(&file("a"));
        state.close_file("a");
        assert!(state.open_files().is_empty());
        assert!(state.active_file().is_none());
    }

    #[test]
    fn set_active_unknown_id_is_a_noop() {
        let mut state = EditorState::default();
        state.open_file(&file("a"));
        assert!(!state.set_active_file("nope"));
        // The previously active handle stays active.
        assert_eq!(state.active_file().unwrap().id, "a");
    }

    #[test]
    fn update_content_writes_through_to_tree() {
        let tree = vec![FileNode::folder("src", "src", vec![file("a")])];
        let mut state = EditorState::new(tree);
        let node = state.find_node("a").cloned().unwrap();
        state.open_file(&node);
        assert!(state.update_content("a", "changed"));
        assert_eq!(state.open_files()[0].content, "changed");
        assert_eq!(
            state.find_node("a").unwrap().content.as_deref(),
            Some("changed")
        );
    }

    #[test]
    fn update_content_unknown_id_returns_false() {
        let mut state = EditorState::default();
        assert!(!state.update_content("ghost", "x"));
    }
}
