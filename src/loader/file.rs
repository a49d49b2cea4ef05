use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadFailure;
use crate::loader::ResourceLoader;

/// Reads resources relative to a root directory.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl ResourceLoader for FileLoader {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadFailure> {
        fs::read(self.resolve(path)).map_err(|source| LoadFailure::Io {
            path: path.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::FileLoader;
    use crate::error::LoadFailure;
    use crate::loader::ResourceLoader;

    #[test]
    fn resolves_relative_and_rooted_paths_under_root() {
        let loader = FileLoader::new("/srv/page");
        assert_eq!(
            loader.resolve("data/data.json"),
            Path::new("/srv/page/data/data.json")
        );
        assert_eq!(
            loader.resolve("/data/data.json"),
            Path::new("/srv/page/data/data.json")
        );
    }

    #[test]
    fn missing_file_is_an_io_failure() {
        let loader = FileLoader::new(env!("CARGO_MANIFEST_DIR"));
        let err = loader
            .fetch("tests/fixtures/does-not-exist.json")
            .expect_err("missing file");
        assert!(matches!(err, LoadFailure::Io { .. }));
    }
}
