//! # Local Queue
//!
//! The persistent FIFO of product edits made while the server was
//! unreachable. One JSON array file; each element is either a plain product
//! draft (an implicit "create") or an update intent tagged `"_op": "update"`
//! with the target id:
//!
//! ```json
//! [
//!   { "name": "Rug", "price": 1250 },
//!   { "_op": "update", "id": 7, "name": "Big Rug", "price": 1500, "image": "" }
//! ]
//! ```
//!
//! The file format matches what older clients wrote, so an existing queue
//! keeps working across upgrades.
//!
//! ## Failure posture
//! A missing or unparseable queue file loads as an empty queue - a broken
//! queue must never wedge the UI. Saves rewrite the whole file; clearing
//! deletes it.

use std::path::{Path, PathBuf};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use dukaan_core::ProductDraft;

use crate::error::{SyncError, SyncResult};

// =============================================================================
// Queue Entries
// =============================================================================

/// Marker for the `"_op": "update"` tag. Serializes as the literal string
/// `"update"` and refuses anything else on the way in, which is what lets
/// the untagged [`QueueEntry`] tell intents apart from plain drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateTag;

impl Serialize for UpdateTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("update")
    }
}

impl<'de> Deserialize<'de> for UpdateTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag == "update" {
            Ok(UpdateTag)
        } else {
            Err(D::Error::custom("expected \"update\""))
        }
    }
}

/// A queued update against an existing server-side product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateIntent {
    #[serde(rename = "_op")]
    pub op: UpdateTag,
    /// Target product id on the server.
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}

impl UpdateIntent {
    pub fn new(id: u64, draft: ProductDraft) -> Self {
        UpdateIntent {
            op: UpdateTag,
            id,
            name: draft.name,
            price: draft.price,
            image: draft.image,
        }
    }

    /// The writable fields, for replaying as a PUT body.
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }
}

/// One pending edit. Untagged on the wire: an element carrying a valid
/// `"_op": "update"` is an update intent, anything else is a create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueueEntry {
    Update(UpdateIntent),
    Create(ProductDraft),
}

impl QueueEntry {
    /// Short human label for status lines.
    pub fn label(&self) -> String {
        match self {
            QueueEntry::Create(draft) => format!("create \"{}\"", draft.name),
            QueueEntry::Update(intent) => format!("update #{} \"{}\"", intent.id, intent.name),
        }
    }
}

// =============================================================================
// Local Queue
// =============================================================================

/// File-backed FIFO of pending edits.
#[derive(Debug)]
pub struct LocalQueue {
    path: PathBuf,
    entries: Vec<QueueEntry>,
}

impl LocalQueue {
    /// Loads the queue from `path`. A missing file is an empty queue; an
    /// unparseable file is logged and treated as empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(raw) => match serde_json::from_slice(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %path.display(), %err, "unreadable queue file, starting empty");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(path = %path.display(), %err, "cannot read queue file, starting empty");
                Vec::new()
            }
        };

        LocalQueue { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry and persists the queue.
    pub fn push(&mut self, entry: QueueEntry) -> SyncResult<()> {
        debug!(entry = %entry.label(), "queueing locally");
        self.entries.push(entry);
        self.persist()
    }

    /// Removes one entry by position (the admin "delete local item"
    /// operation) and persists. Returns the removed entry, if any.
    pub fn remove(&mut self, index: usize) -> SyncResult<Option<QueueEntry>> {
        if index >= self.entries.len() {
            return Ok(None);
        }
        let entry = self.entries.remove(index);
        self.persist()?;
        Ok(Some(entry))
    }

    /// Empties the queue and deletes the backing file. Called only after a
    /// fully successful sync pass.
    pub fn clear(&mut self) -> SyncResult<()> {
        self.entries.clear();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SyncError::queue(&self.path, err)),
        }
    }

    fn persist(&self) -> SyncResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SyncError::queue(parent, e))?;
            }
        }
        let bytes = serde_json::to_vec_pretty(&self.entries)?;
        std::fs::write(&self.path, bytes).map_err(|e| SyncError::queue(&self.path, e))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            price: 10.0,
            image: None,
        }
    }

    #[test]
    fn test_entry_wire_format() {
        let create = QueueEntry::Create(draft("Rug"));
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({"name": "Rug", "price": 10.0})
        );

        let update = QueueEntry::Update(UpdateIntent::new(7, draft("Big Rug")));
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["_op"], json!("update"));
        assert_eq!(value["id"], json!(7));
    }

    #[test]
    fn test_entry_parsing_distinguishes_op() {
        let update: QueueEntry = serde_json::from_value(
            json!({"_op": "update", "id": 3, "name": "X", "price": 1.0, "image": ""}),
        )
        .unwrap();
        assert!(matches!(update, QueueEntry::Update(_)));

        let create: QueueEntry =
            serde_json::from_value(json!({"name": "X", "price": 1.0})).unwrap();
        assert!(matches!(create, QueueEntry::Create(_)));
    }

    #[test]
    fn test_queue_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");

        let mut queue = LocalQueue::load(&path);
        queue.push(QueueEntry::Create(draft("A"))).unwrap();
        queue
            .push(QueueEntry::Update(UpdateIntent::new(2, draft("B"))))
            .unwrap();

        let reloaded = LocalQueue::load(&path);
        assert_eq!(reloaded.entries(), queue.entries());
    }

    #[test]
    fn test_missing_and_corrupt_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();

        let queue = LocalQueue::load(dir.path().join("nope.json"));
        assert!(queue.is_empty());

        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        let queue = LocalQueue::load(&path);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");

        let mut queue = LocalQueue::load(&path);
        queue.push(QueueEntry::Create(draft("A"))).unwrap();
        assert!(path.exists());

        queue.clear().unwrap();
        assert!(queue.is_empty());
        assert!(!path.exists());
        // clearing an already-cleared queue is fine
        queue.clear().unwrap();
    }

    #[test]
    fn test_remove_by_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut queue = LocalQueue::load(dir.path().join("queue.json"));
        queue.push(QueueEntry::Create(draft("A"))).unwrap();
        queue.push(QueueEntry::Create(draft("B"))).unwrap();

        let removed = queue.remove(0).unwrap().unwrap();
        assert_eq!(removed.label(), "create \"A\"");
        assert_eq!(queue.len(), 1);
        assert!(queue.remove(5).unwrap().is_none());
    }
}
