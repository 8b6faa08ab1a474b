use std::path::{Path, PathBuf};
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_etherloop")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "etherloop.exe"
            } else {
                "etherloop"
            });
            p
        })
}

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cli_frame_writes_png() {
    let dir = scratch("frame");
    let out_path = dir.join("out.png");
    let out_arg = out_path.to_string_lossy().to_string();

    let status = Command::new(exe())
        .args(["frame", "--outline"])
        .arg(fixture("blob.svg"))
        .args(["--width", "96", "--height", "64", "--frame", "5"])
        .args(["--pointer", "50,30", "--press", "2..4", "--out"])
        .arg(out_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (96, 64));
}

#[test]
fn cli_frames_writes_a_sequence_with_custom_config() {
    let dir = scratch("frames");
    let cfg_path = dir.join("config.json");
    std::fs::write(&cfg_path, r#"{ "num_bands": 6, "rotation_speed": 0.02 }"#).unwrap();
    let out_dir = dir.join("seq");

    let status = Command::new(exe())
        .args(["frames", "--outline"])
        .arg(fixture("blob.svg"))
        .arg("--config")
        .arg(&cfg_path)
        .args(["--width", "48", "--height", "48", "--count", "3", "--out-dir"])
        .arg(&out_dir)
        .status()
        .unwrap();

    assert!(status.success());
    for n in 0..3 {
        assert!(out_dir.join(format!("frame_{n:05}.png")).is_file());
    }
    assert!(!out_dir.join("frame_00003.png").exists());
}

#[test]
fn cli_missing_outline_still_renders_background() {
    let dir = scratch("missing");
    let out_path = dir.join("bg.png");

    let status = Command::new(exe())
        .args(["frame", "--outline"])
        .arg(dir.join("nope.svg"))
        .args(["--width", "8", "--height", "8", "--frame", "0", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let img = image::open(&out_path).unwrap().to_rgba8();
    assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
}

#[test]
fn cli_rejects_bad_config() {
    let dir = scratch("bad_config");
    let cfg_path = dir.join("config.json");
    std::fs::write(&cfg_path, r#"{ "alpha_min": 0.9, "alpha_max": 0.1 }"#).unwrap();

    let output = Command::new(exe())
        .args(["frame", "--outline"])
        .arg(fixture("blob.svg"))
        .arg("--config")
        .arg(&cfg_path)
        .args(["--frame", "0", "--out"])
        .arg(dir.join("never.png"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation error"), "{stderr}");
}

#[test]
fn cli_config_prints_defaults() {
    let output = Command::new(exe()).arg("config").output().unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["num_bands"], 100);
    assert_eq!(v["color_hue"], 212.0);
}
