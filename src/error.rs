use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("no display surface matches selector `{selector}`")]
    SurfaceNotFound { selector: String },

    #[error("render backend failure: {0}")]
    Backend(String),

    #[error(transparent)]
    Load(#[from] LoadFailure),
}

/// Failure to fetch, decode or accept a dataset resource.
///
/// Every variant keeps the resource path so a single diagnostic line is
/// enough to locate the problem.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("resource `{path}` could not be read: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("resource `{path}` could not be fetched: {reason}")]
    Fetch { path: String, reason: String },

    #[error("resource `{path}` is not a valid dataset payload: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("resource `{path}` was rejected by dataset validation: {reason}")]
    Invalid { path: String, reason: String },
}

impl LoadFailure {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Io { path, .. }
            | Self::Fetch { path, .. }
            | Self::Decode { path, .. }
            | Self::Invalid { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartError, LoadFailure};

    #[test]
    fn load_failure_converts_into_chart_error() {
        let failure = LoadFailure::Fetch {
            path: "data/data.json".to_owned(),
            reason: "status 404".to_owned(),
        };
        let err: ChartError = failure.into();
        assert!(matches!(err, ChartError::Load(_)));
        assert_eq!(
            err.to_string(),
            "resource `data/data.json` could not be fetched: status 404"
        );
    }

    #[test]
    fn load_failure_reports_path_for_every_variant() {
        let failure = LoadFailure::Invalid {
            path: "a.json".to_owned(),
            reason: "dataset is empty".to_owned(),
        };
        assert_eq!(failure.path(), "a.json");
    }
}
