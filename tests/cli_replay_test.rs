//! Integration tests for the replay CLI.

#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SCORES: &str = r#"{
  "0003.jpg": {
    "detections": [{ "label": "person", "score": 0.9, "bbox": [1, 2, 30, 40] }]
  },
  "0004.jpg": {
    "classifications": [{ "label": "cat", "score": 0.2 }]
  }
}"#;

struct Fixture {
    _dir: TempDir,
    frames: PathBuf,
    scores: PathBuf,
    config: PathBuf,
    out: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).unwrap();
    for i in 1..=5 {
        std::fs::write(frames.join(format!("{i:04}.jpg")), [0xff, 0xd8, i]).unwrap();
    }
    std::fs::write(frames.join("notes.txt"), "not a frame").unwrap();

    let scores = dir.path().join("scores.json");
    std::fs::write(&scores, SCORES).unwrap();

    let config = dir.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    let out = dir.path().join("out");
    Fixture {
        frames,
        scores,
        config,
        out,
        _dir: dir,
    }
}

fn replay(fx: &Fixture) -> Command {
    let mut cmd = Command::new(cargo_bin("framegate"));
    cmd.env_remove("RUST_LOG")
        .arg(&fx.frames)
        .arg("--scores")
        .arg(&fx.scores)
        .arg("--config")
        .arg(&fx.config)
        .arg("-o")
        .arg(&fx.out)
        .arg("--no-progress");
    cmd
}

fn manifest(out: &Path) -> Vec<String> {
    std::fs::read_to_string(out.join("forwarded.csv"))
        .unwrap()
        .lines()
        .map(ToString::to_string)
        .collect()
}

fn forwarded_frames(out: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".jpg"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_replay_forwards_trigger_and_trailing_window() {
    let fx = fixture();

    replay(&fx)
        .args(["--object", "person=0.5", "--window-seconds", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Complete:"))
        .stdout(predicate::str::contains("Keeping frame '0003.jpg'"));

    assert_eq!(
        forwarded_frames(&fx.out),
        vec!["0001.jpg", "0002.jpg", "0003.jpg", "0004.jpg", "0005.jpg"]
    );

    let rows = manifest(&fx.out);
    assert_eq!(rows[0], "pull,frame,captured_at,reason");
    assert_eq!(rows.len(), 6);
    assert!(rows[1].starts_with("3,0003.jpg,") && rows[1].ends_with(",live"));
    assert!(rows[2].starts_with("4,0004.jpg,") && rows[2].ends_with(",live"));
    assert!(rows[3].starts_with("5,0005.jpg,") && rows[3].ends_with(",live"));
    assert!(rows[4].contains(",0001.jpg,") && rows[4].ends_with(",released"));
    assert!(rows[5].contains(",0002.jpg,") && rows[5].ends_with(",released"));

    let copied = std::fs::read(fx.out.join("0003.jpg")).unwrap();
    assert_eq!(copied, vec![0xff, 0xd8, 3]);
}

#[test]
fn test_replay_without_window_forwards_only_triggers() {
    let fx = fixture();

    replay(&fx)
        .args(["--object", "person=0.5"])
        .assert()
        .success();

    assert_eq!(forwarded_frames(&fx.out), vec!["0003.jpg"]);
    assert_eq!(manifest(&fx.out).len(), 2);
}

#[test]
fn test_replay_stream_mode_leaves_released_frames_queued() {
    let fx = fixture();

    replay(&fx)
        .args(["--object", "person=0.5", "-w", "10", "--stream"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stream pulls do not drain them"));

    assert_eq!(
        forwarded_frames(&fx.out),
        vec!["0003.jpg", "0004.jpg", "0005.jpg"]
    );
}

#[test]
fn test_replay_passthrough_forwards_everything() {
    let fx = fixture();

    replay(&fx)
        .args(["--object", "person=0.99", "--passthrough", "--batch-size", "2"])
        .assert()
        .success();

    assert_eq!(forwarded_frames(&fx.out).len(), 5);
    let rows = manifest(&fx.out);
    assert!(rows[1..].iter().all(|r| r.ends_with(",passthrough")));
}

#[test]
fn test_wildcard_classification_threshold() {
    let fx = fixture();

    replay(&fx)
        .args(["--classification", "*=0.1"])
        .assert()
        .success();

    assert_eq!(forwarded_frames(&fx.out), vec!["0004.jpg"]);
}

#[test]
fn test_missing_scores_fails() {
    let fx = fixture();
    let mut cmd = Command::new(cargo_bin("framegate"));
    cmd.env_remove("FRAMEGATE_SCORES")
        .arg(&fx.frames)
        .arg("--config")
        .arg(&fx.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scores file specified"));
}

#[test]
fn test_missing_input_dir_fails() {
    let fx = fixture();
    let mut cmd = Command::new(cargo_bin("framegate"));
    cmd.arg(fx.frames.join("nope"))
        .arg("--scores")
        .arg(&fx.scores)
        .arg("--config")
        .arg(&fx.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("input directory does not exist"));
}

#[test]
fn test_invalid_threshold_flag_fails() {
    let fx = fixture();
    replay(&fx)
        .args(["--object", "person=1.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("confidence must be between"));
}

#[test]
fn test_oversized_frame_interval_is_rejected_cleanly() {
    let fx = fixture();
    replay(&fx)
        .args(["--object", "person=0.5", "--frame-interval-ms", "9000000000000000"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("frame-interval-ms"))
        .stderr(predicate::str::contains("panicked").not());

    std::fs::write(&fx.config, "[replay]\nframe_interval_ms = 9000000000000000\n").unwrap();
    replay(&fx)
        .args(["--object", "person=0.5"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("replay.frame_interval_ms must be between"));
}

#[test]
fn test_config_check_rejects_out_of_range_threshold() {
    let fx = fixture();
    std::fs::write(&fx.config, "[filter.objects]\ndog = 2.0\n").unwrap();

    let mut cmd = Command::new(cargo_bin("framegate"));
    cmd.arg("--config")
        .arg(&fx.config)
        .args(["config", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("filter.objects.dog"));
}

#[test]
fn test_config_check_accepts_valid_file() {
    let fx = fixture();
    std::fs::write(
        &fx.config,
        "[filter]\nwindow_seconds = 5\n\n[filter.classifications]\n\"*\" = 0.8\n",
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin("framegate"));
    cmd.arg("--config")
        .arg(&fx.config)
        .args(["config", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"));
}

#[test]
fn test_config_path_prints_explicit_path() {
    let fx = fixture();
    let mut cmd = Command::new(cargo_bin("framegate"));
    cmd.arg("--config")
        .arg(&fx.config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
