//! Frame source that replays image files from a directory.

use crate::camera::{Frame, FrameSource, FrameStream, ImageBatch, Properties};
use crate::clock::Clock;
use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

/// Replays the image files of a directory in file-name order.
///
/// Every pull consumes files from one shared cursor, so batch pulls and any
/// open streams never hand out the same file twice. Frames are stamped with
/// the clock's current time when they are read, like a live camera would.
pub struct DirectorySource {
    shared: Arc<Shared>,
    batch_size: usize,
}

struct Shared {
    files: Vec<PathBuf>,
    cursor: AtomicUsize,
    clock: Arc<dyn Clock>,
}

impl DirectorySource {
    /// Open a directory of images.
    ///
    /// `batch_size` is the number of files returned per batch pull; zero is
    /// treated as one.
    pub fn open(dir: &Path, batch_size: usize, clock: Arc<dyn Clock>) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::InputDirNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_image_file(&path) {
                files.push(path);
            }
        }
        files.sort();

        debug!("Found {} image(s) in {}", files.len(), dir.display());

        Ok(Self {
            shared: Arc::new(Shared {
                files,
                cursor: AtomicUsize::new(0),
                clock,
            }),
            batch_size: batch_size.max(1),
        })
    }

    /// Total number of image files in the directory.
    pub fn len(&self) -> usize {
        self.shared.files.len()
    }

    /// Whether the directory held no images.
    pub fn is_empty(&self) -> bool {
        self.shared.files.is_empty()
    }

    /// Number of files not yet handed out.
    pub fn remaining(&self) -> usize {
        self.len()
            .saturating_sub(self.shared.cursor.load(Ordering::SeqCst))
    }
}

impl Shared {
    /// Reserve up to `count` files from the cursor.
    fn claim(&self, count: usize) -> Option<Range<usize>> {
        let total = self.files.len();
        self.cursor
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pos| {
                (pos < total).then(|| (pos + count).min(total))
            })
            .ok()
            .map(|start| start..(start + count).min(total))
    }

    async fn read_frame(&self, path: &Path) -> Result<Frame> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| Error::FrameSource {
                reason: format!("failed to read '{}': {e}", path.display()),
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        trace!("Read frame {} ({} bytes)", name, data.len());
        Ok(Frame::new(name, mime_type_for(path), data, self.clock.now()))
    }
}

#[async_trait]
impl FrameSource for DirectorySource {
    async fn images(&self) -> Result<ImageBatch> {
        let range = self
            .shared
            .claim(self.batch_size)
            .ok_or(Error::SourceExhausted)?;

        let mut frames = Vec::with_capacity(range.len());
        for path in &self.shared.files[range] {
            frames.push(self.shared.read_frame(path).await?);
        }
        Ok(ImageBatch::new(frames, self.shared.clock.now()))
    }

    async fn stream(&self) -> Result<Box<dyn FrameStream>> {
        Ok(Box::new(DirectoryStream {
            shared: Arc::clone(&self.shared),
            closed: false,
        }))
    }

    async fn properties(&self) -> Result<Properties> {
        let mut mime_types: Vec<String> = self
            .shared
            .files
            .iter()
            .map(|p| mime_type_for(p).to_string())
            .collect();
        mime_types.sort();
        mime_types.dedup();

        Ok(Properties {
            supports_point_cloud: false,
            mime_types,
        })
    }
}

struct DirectoryStream {
    shared: Arc<Shared>,
    closed: bool,
}

#[async_trait]
impl FrameStream for DirectoryStream {
    async fn next(&mut self) -> Result<Frame> {
        if self.closed {
            return Err(Error::FrameSource {
                reason: "stream is closed".to_string(),
            });
        }
        let range = self.shared.claim(1).ok_or(Error::SourceExhausted)?;
        let path = &self.shared.files[range.start];
        self.shared.read_frame(path).await
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Check if a file has a supported image extension.
fn is_image_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Guess the MIME type from the file extension.
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}
