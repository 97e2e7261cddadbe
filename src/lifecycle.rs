use std::fs;
use std::path::PathBuf;

/// Ambient particles are captured within 5 px of the pointer.
pub const AMBIENT_CAPTURE_RADIUS: f32 = 5.0;
/// The golden particle is larger, so its capture radius is wider.
pub const GOLDEN_CAPTURE_RADIUS: f32 = 10.0;
/// Pointer silence after which the whole ambient field is respawned.
pub const INACTIVITY_TIMEOUT_MS: f64 = 3_000.0;

/// Storage key for the golden capture counter.
pub const STORAGE_KEY: &str = "goldenAbsorptionCount";

/// Durable home for the capture counter. The simulation only sees this
/// interface, so tests can swap in an in-memory store.
pub trait CounterStore {
    fn load(&self) -> u64;
    fn save(&mut self, value: u64);
}

/// File-backed store: one file per key holding a base-10 integer string.
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    /// Keeps the counter under the user's local data directory, falling back
    /// to the working directory when none is available.
    pub fn open_default() -> Self {
        let dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gravity-well");
        Self::at(dir)
    }

    pub fn at(dir: PathBuf) -> Self {
        Self { path: dir.join(STORAGE_KEY) }
    }
}

impl CounterStore for FileCounterStore {
    /// A missing or malformed value reads as 0 rather than failing the core.
    fn load(&self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim().parse().unwrap_or_else(|_| {
                log::warn!("ignoring malformed counter value in {:?}", self.path);
                0
            }),
            Err(_) => 0,
        }
    }

    fn save(&mut self, value: u64) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("could not create counter directory {:?}: {e}", parent);
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, value.to_string()) {
            log::warn!("could not persist capture counter: {e}");
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::CounterStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory stand-in for the file store. The raw slot is shared so tests
    /// can seed malformed values and inspect what was written.
    #[derive(Clone, Default)]
    pub struct MemoryCounterStore {
        pub slot: Rc<RefCell<Option<String>>>,
    }

    impl MemoryCounterStore {
        pub fn seeded(value: &str) -> Self {
            Self { slot: Rc::new(RefCell::new(Some(value.to_string()))) }
        }
    }

    impl CounterStore for MemoryCounterStore {
        fn load(&self) -> u64 {
            self.slot
                .borrow()
                .as_deref()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(0)
        }

        fn save(&mut self, value: u64) {
            *self.slot.borrow_mut() = Some(value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryCounterStore;
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileCounterStore::at(dir.path().to_path_buf());
        assert_eq!(store.load(), 0);

        store.save(42);
        assert_eq!(store.load(), 42);

        // A second reader over the same directory sees the persisted value,
        // like a reload would.
        let reader = FileCounterStore::at(dir.path().to_path_buf());
        assert_eq!(reader.load(), 42);

        let written = std::fs::read_to_string(dir.path().join(STORAGE_KEY)).unwrap();
        assert_eq!(written, "42");
    }

    #[test]
    fn malformed_value_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STORAGE_KEY), "not-a-number").unwrap();
        let store = FileCounterStore::at(dir.path().to_path_buf());
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn memory_store_mirrors_file_semantics() {
        let mut store = MemoryCounterStore::seeded("banana");
        assert_eq!(store.load(), 0);
        store.save(3);
        assert_eq!(store.load(), 3);
        assert_eq!(store.slot.borrow().as_deref(), Some("3"));
    }
}
