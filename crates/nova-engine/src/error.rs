use thiserror::Error;

use crate::assets::loader::ResourceKind;

/// Errors raised while setting up the engine or loading a scene.
///
/// Geometry, registry and scheduling code never produce these; an expected
/// "no result" is always an `Option`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host surface could not hand out a 2D drawing context.
    /// Initialization cannot continue; construct the engine again.
    #[error("canvas 2D context could not be retrieved")]
    MissingDrawingContext,
    #[error("scene `{0}` was never added to the scene manager")]
    SceneNotFound(String),
    #[error("invalid core options: {0}")]
    InvalidOptions(#[source] serde_json::Error),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Errors raised by the resource loader and the services built on it.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("{kind} `{name}` was not found, maybe the scene should load it?")]
    NotFound { kind: ResourceKind, name: String },
    #[error("{kind} `{name}` is queued but not loaded yet")]
    NotLoaded { kind: ResourceKind, name: String },
    #[error("failed to fetch `{url}`: {reason}")]
    Fetch { url: String, reason: String },
    #[error("locale `{name}` is not a valid locale table")]
    InvalidLocale {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_error_converts_into_engine_error() {
        let err: EngineError = ResourceError::NotFound {
            kind: ResourceKind::Image,
            name: "hero".into(),
        }
        .into();
        assert!(matches!(err, EngineError::Resource(ResourceError::NotFound { .. })));
        assert_eq!(
            err.to_string(),
            "image `hero` was not found, maybe the scene should load it?"
        );
    }
}
