use std::{collections::HashSet, io, time::Duration};

use crate::{KeyValueStore, MemoryStore, StoreError, TickDriver, TickHandle};

/// Records started and cancelled tick sources.
#[derive(Debug, Default)]
pub(crate) struct FakeDriver {
    next_id: u64,
    pub(crate) active: HashSet<TickHandle>,
    pub(crate) max_active: usize,
    pub(crate) started: Vec<Duration>,
}

impl TickDriver for FakeDriver {
    fn start_ticks(&mut self, interval: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle::new(self.next_id);
        self.active.insert(handle);
        self.max_active = self.max_active.max(self.active.len());
        self.started.push(interval);
        handle
    }

    fn cancel_ticks(&mut self, handle: TickHandle) {
        assert!(self.active.remove(&handle), "cancelled unknown {handle:?}");
    }
}

/// Store whose writes always fail.
#[derive(Debug, Default)]
pub(crate) struct ReadOnlyStore {
    pub(crate) inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::new(
            key,
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        ))
    }
}
