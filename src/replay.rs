//! Replay a directory of frames through a filtered camera.

use crate::camera::{DirectorySource, Frame, ImageBatch};
use crate::clock::{Clock, ManualClock, SystemClock};
use crate::config::FilterConfig;
use crate::constants::MANIFEST_FILE_NAME;
use crate::error::{Error, Result};
use crate::filter::{Caller, FilteredCamera, Pull};
use crate::inference::ScoreFileProvider;
use crate::output::{ForwardReason, ManifestRecord, ManifestWriter, progress};
use crate::resource::Dependencies;
use chrono::TimeDelta;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// How frames are pulled from the filtered camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    /// Batch pulls through [`FilteredCamera::images`].
    Batch,
    /// One frame at a time through a [`crate::filter::FilterStream`].
    Stream,
}

/// Everything a replay run needs.
#[derive(Debug, Clone)]
pub struct ReplaySettings {
    /// Directory of frames to replay.
    pub input_dir: PathBuf,
    /// JSON scores file.
    pub scores: PathBuf,
    /// Where forwarded frames and the manifest are written.
    pub output_dir: PathBuf,
    /// Filter settings.
    pub filter: FilterConfig,
    /// Simulated time between pulls.
    pub frame_interval: TimeDelta,
    /// Frames per batch pull.
    pub batch_size: usize,
    /// Batch or stream pulls.
    pub mode: PullMode,
    /// Who the pulls are made as.
    pub caller: Caller,
    /// Show a progress bar.
    pub progress: bool,
}

/// Counters from a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Pulls made against the filtered camera.
    pub pulls: u64,
    /// Frames read from the directory.
    pub frames_read: usize,
    /// Frames forwarded by the pull that read them.
    pub live: usize,
    /// Frames forwarded later out of the trailing window.
    pub released: usize,
    /// Frames forwarded without filtering.
    pub passthrough: usize,
    /// Pulls that had nothing to forward.
    pub suppressed_pulls: u64,
    /// Batches still queued when the run ended.
    pub left_queued: usize,
}

impl ReplaySummary {
    /// Total frames written to the output directory.
    pub fn forwarded(&self) -> usize {
        self.live + self.released + self.passthrough
    }

    fn record(&mut self, reason: ForwardReason, frames: usize) {
        match reason {
            ForwardReason::Live => self.live += frames,
            ForwardReason::Released => self.released += frames,
            ForwardReason::Passthrough => self.passthrough += frames,
        }
    }
}

/// Replay `settings.input_dir` and write forwarded frames.
pub async fn replay(settings: &ReplaySettings) -> Result<ReplaySummary> {
    let started = Instant::now();
    let clock = Arc::new(ManualClock::new(SystemClock.now()));

    let source = Arc::new(DirectorySource::open(
        &settings.input_dir,
        settings.batch_size,
        clock.clone(),
    )?);
    let scores = ScoreFileProvider::load(&settings.scores)?;
    info!(
        "Replaying {} frame(s) from {} with scores for {} frame(s)",
        source.len(),
        settings.input_dir.display(),
        scores.len()
    );

    let deps = Dependencies::new()
        .with_camera(settings.filter.camera.clone(), source.clone())
        .with_vision(settings.filter.vision.clone(), Arc::new(scores));
    let camera = FilteredCamera::new(
        settings.filter.camera.clone(),
        &settings.filter,
        &deps,
        clock.clone(),
    )?;

    std::fs::create_dir_all(&settings.output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: settings.output_dir.clone(),
        source: e,
    })?;
    let mut sink = Sink {
        dir: &settings.output_dir,
        manifest: ManifestWriter::create(&settings.output_dir.join(MANIFEST_FILE_NAME))?,
    };

    let bar = progress::create_frame_progress(source.len(), settings.progress);
    let mut run = Run {
        camera: &camera,
        source: &source,
        clock: &clock,
        settings,
        bar: bar.as_ref(),
        summary: ReplaySummary::default(),
    };

    match settings.mode {
        PullMode::Batch => run.batches(&mut sink).await?,
        PullMode::Stream => run.frames(&mut sink).await?,
    }

    let mut summary = run.summary;
    summary.left_queued = camera.controller().queued_len();
    sink.manifest.finalize()?;
    progress::finish_progress(bar, "Complete");

    info!(
        "Complete: {} pulls, {} frames read, {} forwarded ({} live, {} released, {} passthrough), {} suppressed pulls in {:.2}s",
        summary.pulls,
        summary.frames_read,
        summary.forwarded(),
        summary.live,
        summary.released,
        summary.passthrough,
        summary.suppressed_pulls,
        started.elapsed().as_secs_f64()
    );
    info!(
        "Forwarded frames written to {} ({} manifest row(s))",
        settings.output_dir.display(),
        sink.manifest.rows()
    );

    Ok(summary)
}

struct Sink<'a> {
    dir: &'a Path,
    manifest: ManifestWriter,
}

impl Sink<'_> {
    async fn write(&mut self, pull: u64, frame: &Frame, reason: ForwardReason) -> Result<()> {
        tokio::fs::write(self.dir.join(frame.name()), frame.data()).await?;
        self.manifest.write(&ManifestRecord::new(
            pull,
            frame.name(),
            frame.captured_at(),
            reason,
        ))
    }

    async fn write_batch(
        &mut self,
        pull: u64,
        batch: &ImageBatch,
        reason: ForwardReason,
    ) -> Result<()> {
        for frame in &batch.frames {
            self.write(pull, frame, reason).await?;
        }
        Ok(())
    }
}

struct Run<'a> {
    camera: &'a FilteredCamera,
    source: &'a DirectorySource,
    clock: &'a ManualClock,
    settings: &'a ReplaySettings,
    bar: Option<&'a ProgressBar>,
    summary: ReplaySummary,
}

impl Run<'_> {
    async fn batches(&mut self, sink: &mut Sink<'_>) -> Result<()> {
        loop {
            let before = self.source.remaining();
            let pulled = match self.camera.images(self.settings.caller).await {
                Err(Error::SourceExhausted) => break,
                other => other?,
            };
            let pull = self.begin_pull(before);

            match pulled {
                Pull::Forward(batch) => {
                    let reason = self.reason_for(&batch);
                    sink.write_batch(pull, &batch, reason).await?;
                    self.summary.record(reason, batch.len());
                }
                Pull::NothingToForward => self.summary.suppressed_pulls += 1,
            }
            self.end_pull();
        }

        // Released batches a live camera would hand out on later pulls.
        while let Some(entry) = self.camera.controller().drain_one() {
            debug!(
                "Draining released batch captured at {} after the source ran out",
                entry.captured_at
            );
            sink.write_batch(self.summary.pulls, &entry.batch, ForwardReason::Released)
                .await?;
            self.summary.record(ForwardReason::Released, entry.batch.len());
        }
        Ok(())
    }

    async fn frames(&mut self, sink: &mut Sink<'_>) -> Result<()> {
        let mut stream = self.camera.stream().await?;
        loop {
            let before = self.source.remaining();
            let pulled = match stream.next(self.settings.caller).await {
                Err(Error::SourceExhausted) => break,
                Err(e) => {
                    stream.close().await?;
                    return Err(e);
                }
                Ok(pulled) => pulled,
            };
            let pull = self.begin_pull(before);

            match pulled {
                Pull::Forward(frame) => {
                    let reason = if self.settings.caller.wants_filtering() {
                        ForwardReason::Live
                    } else {
                        ForwardReason::Passthrough
                    };
                    sink.write(pull, &frame, reason).await?;
                    self.summary.record(reason, 1);
                }
                Pull::NothingToForward => self.summary.suppressed_pulls += 1,
            }
            self.end_pull();
        }
        stream.close().await?;

        let queued = self.camera.controller().queued_len();
        if queued > 0 {
            info!("{queued} released batch(es) left queued; stream pulls do not drain them");
        }
        Ok(())
    }

    fn begin_pull(&mut self, remaining_before: usize) -> u64 {
        let read = remaining_before.saturating_sub(self.source.remaining());
        self.summary.pulls += 1;
        self.summary.frames_read += read;
        progress::inc_progress(self.bar, read);
        self.summary.pulls
    }

    fn end_pull(&self) {
        progress::set_message(
            self.bar,
            format!("{} forwarded", self.summary.forwarded()),
        );
        self.clock.advance(self.settings.frame_interval);
    }

    /// A batch read by this pull carries the current time; anything older
    /// came out of the dispatch queue.
    fn reason_for(&self, batch: &ImageBatch) -> ForwardReason {
        if !self.settings.caller.wants_filtering() {
            ForwardReason::Passthrough
        } else if batch.captured_at < self.clock.now() {
            ForwardReason::Released
        } else {
            ForwardReason::Live
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_forwarded_total() {
        let mut summary = ReplaySummary::default();
        summary.record(ForwardReason::Live, 2);
        summary.record(ForwardReason::Released, 3);
        summary.record(ForwardReason::Passthrough, 1);
        assert_eq!(summary.forwarded(), 6);
    }
}
