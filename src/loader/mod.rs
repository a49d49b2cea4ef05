//! Resource fetching and dataset decoding.

mod file;
mod memory;
mod payload;

#[cfg(feature = "http-loader")]
mod http;

pub use file::FileLoader;
pub use memory::StaticLoader;
pub use payload::decode_dataset;

#[cfg(feature = "http-loader")]
pub use http::HttpLoader;

use tracing::trace;

use crate::core::{Dataset, DatasetValidation};
use crate::error::LoadFailure;

/// Default resource path the page loads its dataset from.
pub const DEFAULT_RESOURCE_PATH: &str = "data/data.json";

/// Source of raw resource bytes addressed by a relative path.
pub trait ResourceLoader {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadFailure>;
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for &L {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadFailure> {
        (**self).fetch(path)
    }
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for std::rc::Rc<L> {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadFailure> {
        (**self).fetch(path)
    }
}

/// Fetches, decodes and validates one dataset resource.
pub fn load_dataset(
    loader: &dyn ResourceLoader,
    path: &str,
    validation: DatasetValidation,
) -> Result<Dataset, LoadFailure> {
    let bytes = loader.fetch(path)?;
    trace!(path, bytes = bytes.len(), "fetched resource");
    let dataset = decode_dataset(path, &bytes)?;
    validation
        .check(&dataset)
        .map_err(|reason| LoadFailure::Invalid {
            path: path.to_owned(),
            reason,
        })?;
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::{StaticLoader, load_dataset};
    use crate::core::DatasetValidation;
    use crate::error::LoadFailure;

    #[test]
    fn validation_policy_applies_after_decode() {
        let loader = StaticLoader::new().with_resource("empty.json", "[]");

        let passthrough = load_dataset(&loader, "empty.json", DatasetValidation::Passthrough)
            .expect("passthrough accepts empty");
        assert!(passthrough.is_empty());

        let err = load_dataset(&loader, "empty.json", DatasetValidation::RejectEmpty)
            .expect_err("empty rejected");
        assert!(matches!(err, LoadFailure::Invalid { .. }));
    }

    #[test]
    fn strict_validation_rejects_non_numeric_coordinates() {
        let loader = StaticLoader::new().with_resource("loose.json", r#"[{"x":"a","y":1}]"#);
        let err = load_dataset(&loader, "loose.json", DatasetValidation::Strict)
            .expect_err("strict rejects");
        assert_eq!(err.path(), "loose.json");
    }

    #[test]
    fn missing_resource_surfaces_the_loader_failure() {
        let loader = StaticLoader::new();
        let err = load_dataset(&loader, "data/data.json", DatasetValidation::Passthrough)
            .expect_err("missing");
        assert!(matches!(err, LoadFailure::Fetch { .. }));
    }
}
