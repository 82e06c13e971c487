//! Progress bar utilities for replay runs.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar counting frames pulled from the source.
pub fn create_frame_progress(total_frames: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_frames == 0 {
        return None;
    }

    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    Some(pb)
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Advance a progress bar by `n` frames.
pub fn inc_progress(pb: Option<&ProgressBar>, n: usize) {
    if let Some(pb) = pb {
        pb.inc(n as u64);
    }
}

/// Update the trailing status message.
pub fn set_message(pb: Option<&ProgressBar>, message: String) {
    if let Some(pb) = pb {
        pb.set_message(message);
    }
}
