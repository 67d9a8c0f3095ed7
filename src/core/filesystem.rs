use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;

use crate::core::error::SnapshotError;
use crate::core::path;
use crate::models::{FileSystemItem, ItemId};

/// Receiver for desktop icon placement signals.
///
/// Icon layout belongs to the desktop layer; the store only reports binary
/// files created directly in the Desktop folder and items removed from it.
pub trait DesktopLayer: Send + Sync {
    fn icon_placed(&self, item: &FileSystemItem);
    fn icon_removed(&self, path: &str);
}

/// In-memory virtual filesystem.
///
/// The tree is persistent: every mutation rebuilds the nodes on the path from
/// the root to the modified node, reuses untouched subtrees by `Arc`, and
/// publishes the new root with a compare-and-swap. A root obtained from
/// [`VfsStore::snapshot`] therefore never changes under its holder.
///
/// # Failure Convention
///
/// Operations report failure as `None`/`false` and never produce messages;
/// command handlers decide what to tell the user.
pub struct VfsStore {
    root: RwLock<Arc<FileSystemItem>>,
    desktop_path: String,
    desktop: Option<Arc<dyn DesktopLayer>>,
}

/// What a mutation does to the parent folder of its target.
enum Edit {
    Insert(FileSystemItem),
    Replace(FileSystemItem),
    Remove(ItemId),
}

impl VfsStore {
    /// Create a store around an existing tree.
    pub fn new(root: FileSystemItem) -> Self {
        Self {
            root: RwLock::new(Arc::new(root)),
            desktop_path: crate::config::DESKTOP_PATH.to_string(),
            desktop: None,
        }
    }

    /// Create a store holding only an empty root folder.
    pub fn empty() -> Self {
        Self::new(FileSystemItem::root())
    }

    /// Create a store with the stock drive layout.
    pub fn with_default_tree() -> Self {
        Self::new(super::seed::default_tree())
    }

    /// Attach the desktop layer notified about Desktop icons.
    pub fn with_desktop(mut self, desktop_path: &str, desktop: Arc<dyn DesktopLayer>) -> Self {
        self.desktop_path = path::normalize(desktop_path);
        self.desktop = Some(desktop);
        self
    }

    /// Current root. The returned tree is an immutable snapshot.
    pub fn snapshot(&self) -> Arc<FileSystemItem> {
        Arc::clone(&self.root.read().unwrap_or_else(PoisonError::into_inner))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Look up an item by path, following shortcuts.
    pub fn get_item_by_path(&self, item_path: &str) -> Option<Arc<FileSystemItem>> {
        Self::find(&self.snapshot(), item_path)
    }

    /// Look up an item in a given snapshot, following shortcuts.
    pub fn find(root: &Arc<FileSystemItem>, item_path: &str) -> Option<Arc<FileSystemItem>> {
        let canonical = path::normalize(&path::resolve_shortcut(&path::normalize(item_path)));
        let mut current = root;
        for part in canonical.split('/').filter(|s| !s.is_empty()) {
            current = current.child(part)?;
        }
        Some(Arc::clone(current))
    }

    /// Check if a path resolves to a folder.
    pub fn is_folder(&self, item_path: &str) -> bool {
        self.get_item_by_path(item_path)
            .is_some_and(|item| item.is_folder())
    }

    /// Depth-first search for the first item satisfying `pred`.
    pub fn find_first(&self, pred: impl Fn(&FileSystemItem) -> bool) -> Option<FileSystemItem> {
        let root = self.snapshot();
        root.walk().into_iter().find(|item| pred(*item)).cloned()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a text file under `parent_path`.
    ///
    /// Returns `None` if the parent is not an existing folder. Duplicate names
    /// are not rejected here; callers check with [`Self::get_item_by_path`].
    pub fn create_file(
        &self,
        parent_path: &str,
        name: &str,
        content: &str,
    ) -> Option<Arc<FileSystemItem>> {
        self.insert(parent_path, |parent| {
            FileSystemItem::file(name, &path::join(parent, name), content)
        })
    }

    /// Create an empty folder under `parent_path`.
    pub fn create_folder(&self, parent_path: &str, name: &str) -> Option<Arc<FileSystemItem>> {
        self.insert(parent_path, |parent| {
            FileSystemItem::folder(name, &path::join(parent, name))
        })
    }

    /// Create a binary file (e.g. image data) under `parent_path`.
    ///
    /// Files created directly in the Desktop folder are reported to the
    /// attached [`DesktopLayer`].
    pub fn create_binary_file(
        &self,
        parent_path: &str,
        name: &str,
        payload: impl Into<Arc<[u8]>>,
    ) -> Option<Arc<FileSystemItem>> {
        let payload = payload.into();
        let item = self.insert(parent_path, |parent| {
            FileSystemItem::binary(name, &path::join(parent, name), Arc::clone(&payload))
        })?;

        if let Some(desktop) = &self.desktop
            && path::parent_path(&item.path) == self.desktop_path
        {
            log::debug!("vfs: desktop icon for {}", item.path);
            desktop.icon_placed(&item);
        }
        Some(item)
    }

    /// Replace the text content of a file.
    ///
    /// Returns `false` if the path is missing or names a folder.
    pub fn update_file_content(&self, item_path: &str, content: &str) -> bool {
        self.mutate(item_path, |target| {
            let target = target?;
            if target.is_folder() {
                return None;
            }
            let mut updated = target.clone();
            updated.content = Some(content.to_string());
            updated.modified_at = Utc::now();
            Some(Edit::Replace(updated))
        })
        .is_some()
    }

    /// Delete an item and its subtree.
    ///
    /// Returns `false` without touching the tree if the item is missing, is
    /// the root, or is (or contains) a protected item.
    pub fn delete_item(&self, item_path: &str) -> bool {
        let removed = self.mutate(item_path, |target| {
            let target = target?;
            if target.contains_protected() {
                log::warn!("vfs: refusing to delete protected {}", target.path);
                return None;
            }
            Some(Edit::Remove(target.id))
        });

        let Some(removed) = removed else {
            return false;
        };
        if let Some(desktop) = &self.desktop
            && path::parent_path(&removed.path) == self.desktop_path
        {
            desktop.icon_removed(&removed.path);
        }
        true
    }

    /// Insert a new child built from the parent's canonical path.
    fn insert(
        &self,
        parent_path: &str,
        build: impl Fn(&str) -> FileSystemItem,
    ) -> Option<Arc<FileSystemItem>> {
        loop {
            let snapshot = self.snapshot();
            let parent = Self::find(&snapshot, parent_path)?;
            if !parent.is_folder() {
                return None;
            }
            let item = build(&parent.path);
            let created = Arc::new(item.clone());
            let new_root = rebuild(&snapshot, &segments_of(&parent.path), Edit::Insert(item))?;
            if self.publish(&snapshot, new_root) {
                log::debug!("vfs: created {}", created.path);
                return Some(created);
            }
        }
    }

    /// Apply an edit to the parent of the item at `item_path`.
    ///
    /// `plan` sees the current target (if any) and returns the edit, or
    /// `None` to abort. Returns the target as it was before the edit.
    fn mutate(
        &self,
        item_path: &str,
        plan: impl Fn(Option<&FileSystemItem>) -> Option<Edit>,
    ) -> Option<Arc<FileSystemItem>> {
        loop {
            let snapshot = self.snapshot();
            let target = Self::find(&snapshot, item_path);
            if target.as_ref().is_some_and(|t| path::is_root(&t.path)) {
                return None;
            }
            let edit = plan(target.as_deref())?;
            let target = target?;
            let parent = path::parent_path(&target.path);
            let new_root = rebuild(&snapshot, &segments_of(&parent), edit)?;
            if self.publish(&snapshot, new_root) {
                log::debug!("vfs: updated {}", target.path);
                return Some(target);
            }
        }
    }

    /// Swap in `new_root` if the root is still `expected`.
    fn publish(&self, expected: &Arc<FileSystemItem>, new_root: FileSystemItem) -> bool {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        if Arc::ptr_eq(&root, expected) {
            *root = Arc::new(new_root);
            true
        } else {
            log::warn!("vfs: concurrent update detected, retrying");
            false
        }
    }

    // =========================================================================
    // Persistence Boundary
    // =========================================================================

    /// Serialize the current tree to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self.snapshot().as_ref())?)
    }

    /// Restore a store from JSON produced by [`Self::to_json`].
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let root: FileSystemItem = serde_json::from_str(json)?;
        validate_tree(&root)?;
        if let Some(max) = root.walk().iter().map(|item| item.id).max() {
            ItemId::reserve_past(max);
        }
        Ok(Self::new(root))
    }
}

impl Default for VfsStore {
    fn default() -> Self {
        Self::with_default_tree()
    }
}

/// Rebuild the chain from `node` down to the folder at `segments`, applying
/// `edit` to that folder. Siblings off the chain are shared, not copied.
fn rebuild(node: &FileSystemItem, segments: &[&str], edit: Edit) -> Option<FileSystemItem> {
    let children = node.children.as_ref()?;
    let mut updated = node.clone();

    match segments.split_first() {
        Some((head, rest)) => {
            let index = children.iter().position(|c| c.name == *head)?;
            let child = rebuild(&children[index], rest, edit)?;
            let mut new_children = children.clone();
            new_children[index] = Arc::new(child);
            updated.children = Some(new_children);
        }
        None => {
            let mut new_children = children.clone();
            match edit {
                Edit::Insert(item) => new_children.push(Arc::new(item)),
                Edit::Replace(item) => {
                    let index = new_children.iter().position(|c| c.id == item.id)?;
                    new_children[index] = Arc::new(item);
                }
                Edit::Remove(id) => new_children.retain(|c| c.id != id),
            }
            updated.children = Some(new_children);
            updated.modified_at = Utc::now();
        }
    }

    Some(updated)
}

fn segments_of(item_path: &str) -> Vec<&str> {
    item_path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Check the structural invariants of a restored tree.
fn validate_tree(root: &FileSystemItem) -> Result<(), SnapshotError> {
    if !root.is_folder() || !path::is_root(&root.path) {
        return Err(SnapshotError::Malformed("root must be a folder at '/'".into()));
    }
    let mut seen = std::collections::HashSet::new();
    let mut stack = vec![root];
    while let Some(item) = stack.pop() {
        if !seen.insert(item.id) {
            return Err(SnapshotError::Malformed(format!("duplicate id {}", item.id)));
        }
        if item.is_folder() != item.children.is_some() {
            return Err(SnapshotError::Malformed(format!(
                "{}: only folders carry children",
                item.path
            )));
        }
        for child in item.children() {
            if child.path != path::join(&item.path, &child.name) {
                return Err(SnapshotError::Malformed(format!(
                    "{}: path does not match position",
                    child.path
                )));
            }
            stack.push(child.as_ref());
        }
    }
    Ok(())
}
