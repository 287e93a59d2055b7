//! Media library
//!
//! Keeps the generated images and videos as two ordered collections, newest
//! first, each serialized as a JSON array under its own key. Reads never fail:
//! a missing or unreadable collection is treated as empty.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::storage::backend::KeyValueStore;
use crate::storage::StorageError;
use crate::types::{GeneratedImage, GeneratedVideo, MediaKind, MediaRecord};

/// One ordered collection of records of a single kind
pub struct RecordStore<T: MediaRecord> {
    backend: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write cycles on this collection
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: MediaRecord> RecordStore<T> {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    /// Insert `record` at the front of the collection
    pub fn save(&self, record: T) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load();
        records.insert(0, record);
        self.persist(&records);
    }

    /// Every record, most recent first
    pub fn get_all(&self) -> Vec<T> {
        self.load()
    }

    /// Remove the record with `id`; returns whether one was removed
    pub fn delete_by_id(&self, id: &str) -> bool {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load();
        let before = records.len();
        records.retain(|record| record.id() != id);
        if records.len() == before {
            tracing::debug!("No {:?} record with id {} to delete", T::KIND, id);
            return false;
        }
        self.persist(&records);
        true
    }

    /// Drop the whole collection
    pub fn clear(&self) {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = self.backend.remove(T::KIND.collection_key()) {
            tracing::warn!("Failed to clear {:?} collection: {}", T::KIND, e);
        }
    }

    fn load(&self) -> Vec<T> {
        match self.load_internal() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "Failed to read {:?} collection, treating it as empty: {}",
                    T::KIND,
                    e
                );
                Vec::new()
            }
        }
    }

    fn load_internal(&self) -> Result<Vec<T>, StorageError> {
        let Some(json) = self.backend.get(T::KIND.collection_key())? else {
            return Ok(Vec::new());
        };
        if json.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn persist(&self, records: &[T]) {
        let result = serde_json::to_string(records)
            .map_err(StorageError::from)
            .and_then(|json| self.backend.set(T::KIND.collection_key(), &json));
        if let Err(e) = result {
            tracing::error!("Failed to persist {:?} collection: {}", T::KIND, e);
        }
    }
}

/// Access to the right collection for a record type
pub trait LibraryCollection: MediaRecord {
    fn collection(library: &MediaLibrary) -> &RecordStore<Self>;
}

impl LibraryCollection for GeneratedImage {
    fn collection(library: &MediaLibrary) -> &RecordStore<Self> {
        &library.images
    }
}

impl LibraryCollection for GeneratedVideo {
    fn collection(library: &MediaLibrary) -> &RecordStore<Self> {
        &library.videos
    }
}

/// Both collections plus a change signal for listeners such as the gallery
pub struct MediaLibrary {
    images: RecordStore<GeneratedImage>,
    videos: RecordStore<GeneratedVideo>,
    revision: watch::Sender<u64>,
}

impl MediaLibrary {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            images: RecordStore::new(backend.clone()),
            videos: RecordStore::new(backend),
            revision,
        }
    }

    pub fn images(&self) -> &RecordStore<GeneratedImage> {
        &self.images
    }

    pub fn videos(&self) -> &RecordStore<GeneratedVideo> {
        &self.videos
    }

    /// Save a record into its collection and notify listeners
    pub fn save<T: LibraryCollection>(&self, record: T) {
        tracing::debug!("Saving {:?} record {}", T::KIND, record.id());
        T::collection(self).save(record);
        self.notify();
    }

    /// Delete a record by kind and id; no-op when absent
    pub fn delete(&self, kind: MediaKind, id: &str) -> bool {
        let removed = match kind {
            MediaKind::Image => self.images.delete_by_id(id),
            MediaKind::Video => self.videos.delete_by_id(id),
        };
        if removed {
            self.notify();
        }
        removed
    }

    /// Remove both collections
    pub fn clear_all(&self) {
        self.images.clear();
        self.videos.clear();
        self.notify();
    }

    /// Receiver that changes every time the library is mutated
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}
