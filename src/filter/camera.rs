//! Pull-style facade over a frame source with filtering applied.

use crate::camera::{Frame, FrameSource, FrameStream, ImageBatch, PointCloud, Properties};
use crate::clock::Clock;
use crate::config::{FilterConfig, validate_filter_config};
use crate::error::{Error, Result};
use crate::filter::TriggerController;
use crate::resource::Dependencies;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Who is pulling frames.
///
/// Only data-capture callers get filtered output; everyone else sees the
/// underlying source unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// A consumer that persists frames and wants filtering applied.
    DataCapture,
    /// Any other consumer.
    Other,
}

impl Caller {
    /// Whether filtering applies to this caller.
    pub fn wants_filtering(self) -> bool {
        matches!(self, Self::DataCapture)
    }
}

/// Outcome of a filtered pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pull<T> {
    /// Data to hand to the consumer.
    Forward(T),
    /// Nothing to persist this cycle. Not a failure.
    NothingToForward,
}

impl<T> Pull<T> {
    /// Whether data was forwarded.
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward(_))
    }

    /// The forwarded data, if any.
    pub fn into_forward(self) -> Option<T> {
        match self {
            Self::Forward(data) => Some(data),
            Self::NothingToForward => None,
        }
    }
}

/// A frame source that only forwards frames worth keeping.
pub struct FilteredCamera {
    name: String,
    source: Arc<dyn FrameSource>,
    controller: Arc<TriggerController>,
}

impl FilteredCamera {
    /// Build a filtered camera, resolving its collaborators from `deps`.
    ///
    /// Fails if the configuration is invalid or a referenced collaborator is
    /// missing.
    pub fn new(
        name: impl Into<String>,
        config: &FilterConfig,
        deps: &Dependencies,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let name = name.into();
        validate_filter_config(config)?;

        let source = deps.camera(&config.camera)?;
        let vision = deps.vision(&config.vision)?;

        if config.classifications.is_empty() && config.objects.is_empty() {
            warn!("{name}: no thresholds configured, every frame outside a window will be suppressed");
        }

        info!(
            "{}: filtering camera '{}' with vision '{}' ({} classification, {} object threshold(s), window {}s)",
            name,
            config.camera,
            config.vision,
            config.classifications.len(),
            config.objects.len(),
            config.window_seconds
        );

        Ok(Self {
            name,
            source,
            controller: Arc::new(TriggerController::new(config, vision, clock)),
        })
    }

    /// Resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trigger state, for inspection.
    pub fn controller(&self) -> &TriggerController {
        &self.controller
    }

    /// Pull the current batch of frames.
    ///
    /// If any frame in the batch triggers, the whole batch is forwarded.
    /// Otherwise the batch is buffered and the oldest released batch, if
    /// any, is returned in its place.
    pub async fn images(&self, caller: Caller) -> Result<Pull<ImageBatch>> {
        let batch = self.source.images().await?;

        if !caller.wants_filtering() {
            return Ok(Pull::Forward(batch));
        }

        for frame in &batch.frames {
            if self.controller.evaluate(frame).await? {
                return Ok(Pull::Forward(batch));
            }
        }

        Ok(self
            .controller
            .deposit_and_drain(batch)
            .map_or(Pull::NothingToForward, |entry| {
                debug!(
                    "{}: sending released batch captured at {}",
                    self.name, entry.captured_at
                );
                Pull::Forward(entry.batch)
            }))
    }

    /// Open a filtered stream over the source's stream.
    pub async fn stream(&self) -> Result<FilterStream> {
        let inner = self.source.stream().await?;
        Ok(FilterStream {
            inner,
            controller: Arc::clone(&self.controller),
        })
    }

    /// Source properties, with point-cloud support switched off.
    pub async fn properties(&self) -> Result<Properties> {
        let mut properties = self.source.properties().await?;
        properties.supports_point_cloud = false;
        Ok(properties)
    }

    /// Point clouds are never produced.
    pub async fn next_point_cloud(&self) -> Result<PointCloud> {
        Err(Error::Unsupported {
            capability: "point clouds",
        })
    }

    /// Arbitrary commands are not implemented.
    pub async fn do_command(&self, _command: &Map<String, Value>) -> Result<Map<String, Value>> {
        Err(Error::Unsupported {
            capability: "commands",
        })
    }
}

/// Frame-by-frame view of a filtered camera.
///
/// Unlike [`FilteredCamera::images`], a suppressed frame is only buffered:
/// released batches are never drained through this path.
pub struct FilterStream {
    inner: Box<dyn FrameStream>,
    controller: Arc<TriggerController>,
}

impl FilterStream {
    /// Pull the next frame.
    pub async fn next(&mut self, caller: Caller) -> Result<Pull<Frame>> {
        let frame = self.inner.next().await?;

        if !caller.wants_filtering() {
            return Ok(Pull::Forward(frame));
        }

        if self.controller.evaluate(&frame).await? {
            return Ok(Pull::Forward(frame));
        }

        self.controller.deposit(ImageBatch::single(frame));
        Ok(Pull::NothingToForward)
    }

    /// Close the underlying stream.
    pub async fn close(&mut self) -> Result<()> {
        self.inner.close().await
    }
}
