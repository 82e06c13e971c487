//! Named collaborators a filtered camera is wired to.

use crate::camera::FrameSource;
use crate::error::{Error, Result};
use crate::inference::InferenceProvider;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Frame sources and inference providers, looked up by configured name.
#[derive(Clone, Default)]
pub struct Dependencies {
    cameras: HashMap<String, Arc<dyn FrameSource>>,
    vision: HashMap<String, Arc<dyn InferenceProvider>>,
}

impl Dependencies {
    /// Create an empty set of dependencies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame source under `name`.
    #[must_use]
    pub fn with_camera(mut self, name: impl Into<String>, source: Arc<dyn FrameSource>) -> Self {
        self.cameras.insert(name.into(), source);
        self
    }

    /// Register an inference provider under `name`.
    #[must_use]
    pub fn with_vision(
        mut self,
        name: impl Into<String>,
        provider: Arc<dyn InferenceProvider>,
    ) -> Self {
        self.vision.insert(name.into(), provider);
        self
    }

    /// Resolve a frame source.
    pub fn camera(&self, name: &str) -> Result<Arc<dyn FrameSource>> {
        self.cameras
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DependencyNotFound {
                kind: "camera",
                name: name.to_string(),
            })
    }

    /// Resolve an inference provider.
    pub fn vision(&self, name: &str) -> Result<Arc<dyn InferenceProvider>> {
        self.vision
            .get(name)
            .cloned()
            .ok_or_else(|| Error::DependencyNotFound {
                kind: "vision service",
                name: name.to_string(),
            })
    }
}

impl fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cameras: Vec<_> = self.cameras.keys().collect();
        let mut vision: Vec<_> = self.vision.keys().collect();
        cameras.sort();
        vision.sort();
        f.debug_struct("Dependencies")
            .field("cameras", &cameras)
            .field("vision", &vision)
            .finish()
    }
}
