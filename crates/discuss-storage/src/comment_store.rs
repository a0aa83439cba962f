//! File system storage for comment documents

use discuss_core::comment::{Comment, CommentIndex};
use discuss_core::error::{DiscussError, Result};
use discuss_core::storage::{CommentFile, CommentMigrator, CommentStorage, CURRENT_SCHEMA_VERSION};
use discuss_core::types::{CommentId, NodeId, Target};
use std::collections::HashMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Everything read from `comments/` by one directory scan
#[derive(Default)]
struct Snapshot {
    comments: HashMap<CommentId, Comment>,
    sequences: HashMap<CommentId, u64>,
    index: CommentIndex,
    next_sequence: u64,
}

impl Snapshot {
    fn collect(&self, ids: Vec<CommentId>) -> Vec<Comment> {
        ids.iter()
            .filter_map(|id| self.comments.get(id))
            .cloned()
            .collect()
    }
}

/// File system based comment storage.
///
/// Each comment lives in its own `comments/<id>.json` document, so a save
/// rewrites exactly one file. The directory is scanned once, on the first
/// lookup; later saves through this store keep that snapshot current.
/// Documents written by other processes afterwards are not seen by lookups
/// until a new store is opened.
pub struct FileSystemStorage {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Comments subdirectory
    comments_dir: PathBuf,
    snapshot: RwLock<Option<Snapshot>>,
}

impl FileSystemStorage {
    /// Create a new file system storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let comments_dir = base_dir.join("comments");

        let storage = Self {
            base_dir,
            comments_dir,
            snapshot: RwLock::new(None),
        };

        storage.ensure_dirs()?;
        Ok(storage)
    }

    /// Create storage in the platform data directory (~/.discuss as fallback)
    pub fn default_location() -> Result<Self> {
        let base_dir = directories::ProjectDirs::from("com", "discuss", "discuss")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".discuss")
            });

        Self::new(base_dir)
    }

    /// Ensure required directories exist
    fn ensure_dirs(&self) -> Result<()> {
        if !self.comments_dir.exists() {
            fs::create_dir_all(&self.comments_dir).map_err(|e| {
                DiscussError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create comments directory: {}", e),
                ))
            })?;
            debug!("Created comments directory: {:?}", self.comments_dir);
        }
        Ok(())
    }

    /// Get the path for a comment file
    fn comment_path(&self, id: &CommentId) -> PathBuf {
        self.comments_dir.join(format!("{}.json", id))
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self, id: &CommentId) -> PathBuf {
        self.comments_dir.join(format!(".{}.json.tmp", id))
    }

    /// Write comment atomically (write to temp, then rename)
    fn atomic_write(&self, comment: &Comment, sequence: u64) -> Result<()> {
        let temp_path = self.temp_path(&comment.id);
        let final_path = self.comment_path(&comment.id);

        let file = CommentFile::new(comment.clone()).with_sequence(sequence);

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            DiscussError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            DiscussError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved comment {} to {:?}", comment.id, final_path);
        Ok(())
    }

    /// Read, parse and migrate a comment document
    fn read_file(&self, path: &Path) -> Result<CommentFile> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                let id = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("unknown");
                DiscussError::NotFound(format!("comment {}", id))
            } else {
                DiscussError::Io(e)
            }
        })?;

        let reader = BufReader::new(file);
        let comment_file: CommentFile = serde_json::from_reader(reader)?;

        if CommentMigrator::needs_migration(&comment_file) {
            info!(
                "Migrating comment from version {} to {}",
                comment_file.schema_version, CURRENT_SCHEMA_VERSION
            );
            return CommentMigrator::migrate(comment_file);
        }
        Ok(comment_file)
    }

    /// Scan every readable comment document into a snapshot
    fn scan(&self) -> Result<Snapshot> {
        let mut files = Vec::new();

        let entries = fs::read_dir(&self.comments_dir).map_err(|e| {
            DiscussError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read comments directory: {}", e),
            ))
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // Skip non-json files and temp files
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }

            match self.read_file(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("Failed to read comment file {:?}: {}", path, e);
                }
            }
        }

        files.sort_by(|a, b| {
            a.comment
                .date_created
                .cmp(&b.comment.date_created)
                .then_with(|| a.sequence.cmp(&b.sequence))
                .then_with(|| a.comment.id.0.cmp(&b.comment.id.0))
        });

        let mut snapshot = Snapshot::default();
        snapshot.index.rebuild(files.iter().map(|f| &f.comment));
        for file in files {
            snapshot.next_sequence = snapshot.next_sequence.max(file.sequence + 1);
            snapshot.sequences.insert(file.comment.id.clone(), file.sequence);
            snapshot.comments.insert(file.comment.id.clone(), file.comment);
        }

        debug!(
            "Scanned {} comments from {:?}",
            snapshot.comments.len(),
            self.comments_dir
        );
        Ok(snapshot)
    }

    fn write_snapshot(&self) -> Result<RwLockWriteGuard<'_, Option<Snapshot>>> {
        let mut guard = self
            .snapshot
            .write()
            .map_err(|_| DiscussError::Storage("comment snapshot lock poisoned".to_string()))?;
        if guard.is_none() {
            *guard = Some(self.scan()?);
        }
        Ok(guard)
    }

    fn with_snapshot<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> Result<T> {
        {
            let guard: RwLockReadGuard<'_, Option<Snapshot>> = self
                .snapshot
                .read()
                .map_err(|_| DiscussError::Storage("comment snapshot lock poisoned".to_string()))?;
            if let Some(snapshot) = guard.as_ref() {
                return Ok(f(snapshot));
            }
        }

        let guard = self.write_snapshot()?;
        match guard.as_ref() {
            Some(snapshot) => Ok(f(snapshot)),
            None => Err(DiscussError::Storage("comment snapshot missing".to_string())),
        }
    }

    /// Get base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get comments directory
    pub fn comments_dir(&self) -> &PathBuf {
        &self.comments_dir
    }
}

impl CommentStorage for FileSystemStorage {
    fn save(&self, comment: &Comment) -> Result<()> {
        let mut guard = self.write_snapshot()?;
        let snapshot = guard
            .as_mut()
            .ok_or_else(|| DiscussError::Storage("comment snapshot missing".to_string()))?;

        let sequence = match snapshot.sequences.get(&comment.id) {
            Some(sequence) => *sequence,
            None => snapshot.next_sequence,
        };
        self.atomic_write(comment, sequence)?;

        // Target, root and author are immutable, so only new comments touch the index
        if !snapshot.comments.contains_key(&comment.id) {
            snapshot.index.add(comment);
            snapshot.sequences.insert(comment.id.clone(), sequence);
            snapshot.next_sequence = sequence + 1;
        }
        snapshot.comments.insert(comment.id.clone(), comment.clone());
        Ok(())
    }

    fn load(&self, id: &CommentId) -> Result<Comment> {
        let path = self.comment_path(id);
        Ok(self.read_file(&path)?.into_comment())
    }

    fn exists(&self, id: &CommentId) -> bool {
        self.comment_path(id).exists()
    }

    fn find_by_target(&self, target: &Target) -> Result<Vec<Comment>> {
        self.with_snapshot(|s| s.collect(s.index.get_by_target(target)))
    }

    fn find_by_root(&self, root: &NodeId) -> Result<Vec<Comment>> {
        self.with_snapshot(|s| s.collect(s.index.get_by_root(root)))
    }

    fn has_children(&self, id: &CommentId) -> Result<bool> {
        self.with_snapshot(|s| s.index.has_replies(&Target::Comment(id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use discuss_core::comment::{CommentBuilder, User};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileSystemStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp_dir.path()).unwrap();
        (storage, temp_dir)
    }

    fn create_test_comment(target: Target) -> Comment {
        CommentBuilder::new(NodeId::new("n1"), User::new("alice", "Alice"))
            .target(target)
            .content("Test")
            .build()
            .unwrap()
    }

    fn root_target() -> Target {
        Target::Node(NodeId::new("n1"))
    }

    fn ids(comments: Vec<Comment>) -> Vec<CommentId> {
        comments.into_iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_storage_creation() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.comments_dir().exists());
        assert!(storage.comments_dir().starts_with(storage.base_dir()));
    }

    #[test]
    fn test_save_and_load() {
        let (storage, _temp) = create_test_storage();
        let comment = create_test_comment(root_target());
        let id = comment.id.clone();

        storage.save(&comment).unwrap();
        assert!(storage.exists(&id));

        let loaded = storage.load(&id).unwrap();
        assert_eq!(loaded.id, comment.id);
        assert_eq!(loaded.target, comment.target);
        assert_eq!(loaded.content, comment.content);
    }

    #[test]
    fn test_load_nonexistent() {
        let (storage, _temp) = create_test_storage();
        let err = storage.load(&CommentId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_by_target_in_creation_order() {
        let temp = TempDir::new().unwrap();
        let base = Utc::now();

        let mut later = create_test_comment(root_target());
        later.date_created = base + Duration::seconds(5);
        let mut earlier = create_test_comment(root_target());
        earlier.date_created = base;
        let reply = create_test_comment(Target::Comment(earlier.id.clone()));

        // Saved out of order; a fresh scan lists by creation time
        let writer = FileSystemStorage::new(temp.path()).unwrap();
        writer.save(&later).unwrap();
        writer.save(&earlier).unwrap();
        writer.save(&reply).unwrap();

        let storage = FileSystemStorage::new(temp.path()).unwrap();
        assert_eq!(
            ids(storage.find_by_target(&root_target()).unwrap()),
            vec![earlier.id.clone(), later.id.clone()]
        );
        assert!(storage.has_children(&earlier.id).unwrap());
        assert!(!storage.has_children(&later.id).unwrap());
        assert_eq!(storage.find_by_root(&NodeId::new("n1")).unwrap().len(), 3);
    }

    #[test]
    fn test_same_instant_keeps_save_order() {
        let temp = TempDir::new().unwrap();
        let at = Utc::now();

        let comments: Vec<Comment> = (0..5)
            .map(|_| {
                let mut c = create_test_comment(root_target());
                c.date_created = at;
                c
            })
            .collect();

        let writer = FileSystemStorage::new(temp.path()).unwrap();
        for comment in &comments {
            writer.save(comment).unwrap();
        }
        // Resaving keeps the original sequence
        writer.save(&comments[0]).unwrap();

        let expected: Vec<_> = comments.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids(writer.find_by_target(&root_target()).unwrap()), expected);

        let reopened = FileSystemStorage::new(temp.path()).unwrap();
        assert_eq!(ids(reopened.find_by_target(&root_target()).unwrap()), expected);
    }

    #[test]
    fn test_has_children_matches_replies() {
        let temp = TempDir::new().unwrap();
        let writer = FileSystemStorage::new(temp.path()).unwrap();

        let parent = create_test_comment(root_target());
        let mut reply = create_test_comment(Target::Comment(parent.id.clone()));
        let leaf = create_test_comment(root_target());
        writer.save(&parent).unwrap();
        writer.save(&reply).unwrap();
        writer.save(&leaf).unwrap();
        reply.soft_delete();
        writer.save(&reply).unwrap();

        let storage = FileSystemStorage::new(temp.path()).unwrap();
        for comment in [&parent, &reply, &leaf] {
            let replies = storage
                .find_by_target(&Target::Comment(comment.id.clone()))
                .unwrap();
            assert_eq!(
                storage.has_children(&comment.id).unwrap(),
                !replies.is_empty()
            );
        }
        // Deleted replies still count
        assert!(storage.has_children(&parent.id).unwrap());
        assert!(!storage.has_children(&leaf.id).unwrap());
    }

    #[test]
    fn test_lookups_reuse_one_scan() {
        let (storage, _temp) = create_test_storage();
        let first = create_test_comment(root_target());
        storage.save(&first).unwrap();
        assert_eq!(storage.find_by_target(&root_target()).unwrap().len(), 1);

        // A document dropped in behind the store's back is not rescanned
        let outsider = create_test_comment(root_target());
        let file = CommentFile::new(outsider.clone());
        fs::write(
            storage.comment_path(&outsider.id),
            serde_json::to_string(&file).unwrap(),
        )
        .unwrap();
        assert_eq!(storage.find_by_target(&root_target()).unwrap().len(), 1);

        // Saves through the store are visible immediately
        let second = create_test_comment(root_target());
        storage.save(&second).unwrap();
        assert_eq!(
            ids(storage.find_by_target(&root_target()).unwrap()),
            vec![first.id, second.id]
        );
    }

    #[test]
    fn test_resave_overwrites() {
        let (storage, _temp) = create_test_storage();
        let mut comment = create_test_comment(root_target());
        storage.save(&comment).unwrap();

        comment.soft_delete();
        storage.save(&comment).unwrap();

        assert_eq!(storage.find_by_target(&root_target()).unwrap().len(), 1);
        assert!(storage.find_live_by_target(&root_target()).unwrap().is_empty());
        assert!(storage.load(&comment.id).unwrap().is_deleted);
    }

    #[test]
    fn test_atomic_write() {
        let (storage, _temp) = create_test_storage();
        let comment = create_test_comment(root_target());
        let id = comment.id.clone();

        storage.save(&comment).unwrap();

        assert!(!storage.temp_path(&id).exists());

        let final_path = storage.comment_path(&id);
        let content = fs::read_to_string(&final_path).unwrap();
        assert!(content.contains("schema_version"));
        assert!(content.contains("\"sequence\""));
        assert!(content.contains(&id.to_string()));
    }

    #[test]
    fn test_ignores_temp_and_foreign_files() {
        let (storage, _temp) = create_test_storage();

        fs::write(storage.comments_dir().join(".temp.json.tmp"), "{}").unwrap();
        fs::write(storage.comments_dir().join("readme.txt"), "test").unwrap();
        fs::write(storage.comments_dir().join("broken.json"), "{ nope").unwrap();

        assert!(storage.find_by_target(&root_target()).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_future_major_version() {
        let (storage, _temp) = create_test_storage();
        let comment = create_test_comment(root_target());
        storage.save(&comment).unwrap();

        let path = storage.comment_path(&comment.id);
        let content = fs::read_to_string(&path)
            .unwrap()
            .replace("\"schema_version\": \"1.0\"", "\"schema_version\": \"2.0\"");
        fs::write(&path, content).unwrap();

        assert!(matches!(
            storage.load(&comment.id),
            Err(DiscussError::UnsupportedSchemaVersion(_))
        ));
    }
}
