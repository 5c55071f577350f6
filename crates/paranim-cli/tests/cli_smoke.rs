use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin() -> String {
    std::env::var("CARGO_BIN_EXE_paranim").unwrap_or_else(|_| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../target/debug/paranim")
            .to_string_lossy()
            .to_string()
    })
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("paranim_cli_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to spawn paranim")
}

#[test]
fn export_writes_gif() {
    let dir = scratch_dir("export");
    let output = run(
        &dir,
        &[
            "export", "--frames", "6", "--fps", "12", "--size", "48", "-o", "anim.gif",
        ],
    );
    assert!(
        output.status.success(),
        "export failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let bytes = std::fs::read(dir.join("anim.gif")).expect("missing export");
    assert!(bytes.starts_with(b"GIF89a"));
    assert_eq!(bytes.last(), Some(&0x3B));
    assert!(!dir.join(".anim.gif.part").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn oversized_export_is_rejected_up_front() {
    let dir = scratch_dir("oversized");
    let output = run(
        &dir,
        &["export", "--frames", "1000", "--size", "2048", "-o", "anim.gif"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("export budget"), "stderr: {stderr}");
    assert!(!dir.join("anim.gif").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn zero_frames_is_rejected_without_output() {
    let dir = scratch_dir("zero_frames");
    let output = run(&dir, &["export", "--frames", "0", "-o", "anim.gif"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("frame_count"), "stderr: {stderr}");
    assert!(!dir.join("anim.gif").exists());
    assert!(!dir.join(".anim.gif.part").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn negative_frequency_fails_preview() {
    let dir = scratch_dir("negative_frequency");
    let output = run(&dir, &["preview", "--frequency", "-1", "-o", "p.png"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frequency"));
    assert!(!dir.join("p.png").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn preview_writes_png() {
    let dir = scratch_dir("preview");
    let output = run(&dir, &["preview", "--t", "1.5", "--size", "64", "-o", "p.png"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Hash:"));

    let bytes = std::fs::read(dir.join("p.png")).expect("missing preview");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn check_uses_config_file() {
    let dir = scratch_dir("check");
    std::fs::write(dir.join("paranim.toml"), "[animation]\nfps = 12\n").unwrap();

    let output = run(&dir, &["check"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Validation OK"));
    assert!(stdout.contains("fps:         12"));

    std::fs::write(dir.join("bad.toml"), "[animation]\nsize = 4\n").unwrap();
    let output = run(&dir, &["check", "--config", "bad.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("size"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = scratch_dir("init");
    assert!(run(&dir, &["init"]).status.success());
    assert!(dir.join("paranim.toml").exists());
    assert!(!run(&dir, &["init"]).status.success());
    assert!(run(&dir, &["init", "--force"]).status.success());
    assert!(run(&dir, &["check"]).status.success());
    let _ = std::fs::remove_dir_all(&dir);
}
