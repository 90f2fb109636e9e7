pub mod loader;
pub mod manifest;

pub use loader::{FileFetcher, MemoryFetcher, ResourceFetcher, ResourceKind, ResourceLoader};
pub use manifest::SceneResources;
