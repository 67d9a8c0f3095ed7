use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{EXECUTABLE_EXTENSIONS, IMAGE_EXTENSIONS, TEXT_EXTENSION};

// =============================================================================
// Item Identity
// =============================================================================

/// Unique identifier of a filesystem item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

// Global counter for generating unique IDs
static ITEM_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

impl ItemId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(ITEM_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Ensure ids allocated from now on are greater than `seen`.
    ///
    /// Called after restoring a snapshot so new items never collide with
    /// restored ones.
    pub(crate) fn reserve_past(seen: ItemId) {
        ITEM_ID_COUNTER.fetch_max(seen.0 + 1, Ordering::Relaxed);
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Item Kind
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Folder,
    File,
}

impl ItemKind {
    pub fn is_folder(self) -> bool {
        matches!(self, Self::Folder)
    }
}

// =============================================================================
// Filesystem Item
// =============================================================================

/// A node of the virtual filesystem.
///
/// Nodes are immutable once published: the store shares them between tree
/// snapshots through `Arc`, and every mutation builds new nodes along the
/// path from the root instead of editing existing ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemItem {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    /// Lower-cased suffix after the last `.` of a file name.
    pub extension: Option<String>,
    /// Canonical path, always `parent.path` joined with `name`.
    pub path: String,
    pub content: Option<String>,
    #[serde(default, with = "payload_base64", skip_serializing_if = "Option::is_none")]
    pub payload: Option<Arc<[u8]>>,
    /// Present only on folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Arc<FileSystemItem>>>,
    pub is_protected: bool,
    pub is_system: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl FileSystemItem {
    /// The root folder (`/`).
    pub fn root() -> Self {
        let mut root = Self::folder("", "/");
        root.is_protected = true;
        root.is_system = true;
        root
    }

    /// New empty folder at `path`.
    pub fn folder(name: &str, path: &str) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::next(),
            name: name.to_string(),
            kind: ItemKind::Folder,
            extension: None,
            path: path.to_string(),
            content: None,
            payload: None,
            children: Some(Vec::new()),
            is_protected: false,
            is_system: false,
            created_at: now,
            modified_at: now,
        }
    }

    /// New text file at `path`.
    pub fn file(name: &str, path: &str, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::next(),
            name: name.to_string(),
            kind: ItemKind::File,
            extension: extension_of(name),
            path: path.to_string(),
            content: Some(content.into()),
            payload: None,
            children: None,
            is_protected: false,
            is_system: false,
            created_at: now,
            modified_at: now,
        }
    }

    /// New binary file at `path`.
    pub fn binary(name: &str, path: &str, payload: impl Into<Arc<[u8]>>) -> Self {
        let mut item = Self::file(name, path, String::new());
        item.content = None;
        item.payload = Some(payload.into());
        item
    }

    /// Mark as protected (and system, when `system` is set).
    pub fn protected(mut self, system: bool) -> Self {
        self.is_protected = true;
        self.is_system = system;
        self
    }

    /// Attach children to a folder.
    pub fn with_children(mut self, children: Vec<FileSystemItem>) -> Self {
        debug_assert!(self.is_folder());
        self.children = Some(children.into_iter().map(Arc::new).collect());
        self
    }

    #[inline]
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    pub fn children(&self) -> &[Arc<FileSystemItem>] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn child(&self, name: &str) -> Option<&Arc<FileSystemItem>> {
        self.children().iter().find(|c| c.name == name)
    }

    /// True when this item or anything beneath it is protected.
    pub fn contains_protected(&self) -> bool {
        self.is_protected || self.children().iter().any(|c| c.contains_protected())
    }

    pub fn is_plain_text(&self) -> bool {
        self.extension.as_deref() == Some(TEXT_EXTENSION)
    }

    pub fn is_image(&self) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext))
    }

    pub fn is_executable(&self) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|ext| EXECUTABLE_EXTENSIONS.contains(&ext))
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        match &self.extension {
            Some(ext) => self
                .name
                .len()
                .checked_sub(ext.len() + 1)
                .map_or(self.name.as_str(), |end| &self.name[..end]),
            None => &self.name,
        }
    }

    /// Size in bytes of the text content or binary payload.
    pub fn size(&self) -> usize {
        match (&self.content, &self.payload) {
            (_, Some(bytes)) => bytes.len(),
            (Some(text), None) => text.len(),
            (None, None) => 0,
        }
    }

    /// Depth-first walk over this item and its descendants.
    pub fn walk(&self) -> Vec<&FileSystemItem> {
        let mut out = vec![self];
        let mut stack: Vec<&FileSystemItem> =
            self.children().iter().rev().map(|c| c.as_ref()).collect();
        while let Some(item) = stack.pop() {
            out.push(item);
            stack.extend(item.children().iter().rev().map(|c| c.as_ref()));
        }
        out
    }
}

/// Lower-cased extension of a file name (`"Notes.TXT"` → `"txt"`).
///
/// Names without a dot, or with a leading dot only, have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext.to_lowercase()),
        _ => None,
    }
}

mod payload_base64 {
    use std::sync::Arc;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Arc<[u8]>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_some(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Arc<[u8]>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(d)?;
        encoded
            .map(|text| {
                STANDARD
                    .decode(text)
                    .map(Arc::<[u8]>::from)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(extension_of("notes.txt"), Some("txt".to_string()));
        assert_eq!(extension_of("Photo.JPG"), Some("jpg".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of(".profile"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_unique_ids() {
        let a = FileSystemItem::folder("a", "/a");
        let b = FileSystemItem::folder("a", "/a");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_only_folders_have_children() {
        let folder = FileSystemItem::folder("docs", "/docs");
        let file = FileSystemItem::file("a.txt", "/docs/a.txt", "hi");
        assert!(folder.children.is_some());
        assert!(file.children.is_none());
        assert!(file.children().is_empty());
    }

    #[test]
    fn test_stem() {
        let file = FileSystemItem::file("notepad.exe", "/notepad.exe", "");
        assert_eq!(file.stem(), "notepad");
        assert!(file.is_executable());
        let plain = FileSystemItem::file("README", "/README", "");
        assert_eq!(plain.stem(), "README");
    }

    #[test]
    fn test_contains_protected() {
        let tree = FileSystemItem::folder("a", "/a").with_children(vec![
            FileSystemItem::folder("b", "/a/b")
                .with_children(vec![FileSystemItem::file("c.txt", "/a/b/c.txt", "").protected(false)]),
        ]);
        assert!(!tree.is_protected);
        assert!(tree.contains_protected());
    }

    #[test]
    fn test_binary_payload_round_trips_through_json() {
        let item = FileSystemItem::binary("logo.bmp", "/logo.bmp", vec![0u8, 1, 2, 255]);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"payload\":\"AAEC/w==\""));
        let back: FileSystemItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
        assert_eq!(back.size(), 4);
    }

    #[test]
    fn test_walk_is_depth_first() {
        let tree = FileSystemItem::folder("r", "/r").with_children(vec![
            FileSystemItem::folder("a", "/r/a")
                .with_children(vec![FileSystemItem::file("x.txt", "/r/a/x.txt", "")]),
            FileSystemItem::file("b.txt", "/r/b.txt", ""),
        ]);
        let paths: Vec<_> = tree.walk().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/r", "/r/a", "/r/a/x.txt", "/r/b.txt"]);
    }
}
