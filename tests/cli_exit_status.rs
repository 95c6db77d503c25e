//! Exit status and stdout of the `face-orientation` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::ImageEncoder;

const BIN: &str = env!("CARGO_BIN_EXE_face-orientation");

/// Write `contents` to a per-process temp file and return its path.
fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "face-orientation-{}-{}",
        std::process::id(),
        name
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

fn png_request(width: u32, height: u32) -> String {
    let img = image::GrayImage::from_fn(width, height, |x, y| image::Luma([((x + y) % 256) as u8]));
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::L8)
        .unwrap();
    format!(r#"{{"imageBase64": "{}"}}"#, STANDARD.encode(buffer))
}

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

fn run_with(regions: &Path, request: &Path) -> Output {
    run(&[
        "--regions",
        regions.to_str().unwrap(),
        "--input",
        request.to_str().unwrap(),
    ])
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn classified_face_exits_zero() {
    let regions = temp_file(
        "ok-regions.json",
        r#"{"faces": [{"x": 0, "y": 0, "w": 200, "h": 200}],
            "nose": [{"x": 30, "y": 100, "w": 40, "h": 40}]}"#,
    );
    let request = temp_file("ok-request.json", &png_request(320, 240));
    let output = run_with(&regions, &request);

    assert_eq!(output.status.code(), Some(0));
    let value = stdout_json(&output);
    assert_eq!(value["success"], true);
    assert_eq!(value["orientation"], "left");
}

#[test]
fn no_face_exits_two() {
    let regions = temp_file("empty-regions.json", r#"{"faces": []}"#);
    let request = temp_file("empty-request.json", &png_request(64, 64));
    let output = run_with(&regions, &request);

    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output);
    assert_eq!(value["success"], false);
    assert_eq!(value["message"], "no face detected");
}

#[test]
fn undecodable_image_exits_one() {
    let regions = temp_file("bad-regions.json", r#"{"faces": []}"#);
    let request = temp_file("bad-request.json", r#"{"imageBase64": "@@@"}"#);
    let output = run_with(&regions, &request);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_json(&output)["success"], false);
}

#[test]
fn usage_error_exits_three() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());
    assert!(!output.stderr.is_empty());
}

#[test]
fn missing_regions_file_exits_three() {
    let request = temp_file("missing-request.json", &png_request(64, 64));
    let missing = std::env::temp_dir().join("face-orientation-no-such-regions.json");
    let output = run_with(&missing, &request);

    assert_eq!(output.status.code(), Some(3));
    assert_eq!(stdout_json(&output)["success"], false);
}
