use std::cell::Cell;

use indexmap::IndexMap;

use crate::error::LoadFailure;
use crate::loader::ResourceLoader;

/// In-memory `path -> bytes` loader that counts fetches.
#[derive(Debug, Default)]
pub struct StaticLoader {
    resources: IndexMap<String, Vec<u8>>,
    fetches: Cell<usize>,
}

impl StaticLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource(mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.resources.insert(path.into(), body.into());
    }

    /// Number of `fetch` calls so far, successful or not.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }
}

impl ResourceLoader for StaticLoader {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadFailure> {
        self.fetches.set(self.fetches.get() + 1);
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| LoadFailure::Fetch {
                path: path.to_owned(),
                reason: "no such resource".to_owned(),
            })
    }
}
