use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;

use paranim_core::{AnimationConfig, ParanimError};
use paranim_encode::{ExportFormat, Exporter, LoopMode};
use paranim_render::FrameGenerator;

fn decode_gif(bytes: &[u8]) -> Vec<image::Frame> {
    GifDecoder::new(Cursor::new(bytes))
        .expect("valid GIF header")
        .into_frames()
        .collect_frames()
        .expect("all frames decode")
}

fn frame_delay_ms(frame: &image::Frame) -> f64 {
    let (num, den) = frame.delay().numer_denom_ms();
    num as f64 / den as f64
}

#[test]
fn exported_gif_has_configured_frames_and_delay() {
    let config = AnimationConfig {
        frequency: 1.0,
        amplitude: 1.0,
        frame_count: 24,
        fps: 12,
        size: 48,
        ..Default::default()
    }
    .validate()
    .unwrap();

    let artifact = Exporter::new(FrameGenerator::new())
        .export(&config, ExportFormat::Gif)
        .unwrap();
    assert_eq!(artifact.frame_count, 24);

    let frames = decode_gif(&artifact.bytes);
    assert_eq!(frames.len(), 24);
    for frame in &frames {
        let ms = frame_delay_ms(frame);
        // 1000/12 = 83.3ms, stored in whole centiseconds.
        assert!((ms - 1000.0 / 12.0).abs() <= 5.0, "delay {}ms", ms);
        assert_eq!(frame.buffer().dimensions(), (48, 48));
    }
}

#[test]
fn frame_count_matches_for_various_configs() {
    let exporter = Exporter::default();
    for (frame_count, fps) in [(1, 1), (2, 30), (7, 25), (10, 60)] {
        let config = AnimationConfig {
            frame_count,
            fps,
            size: 24,
            ..Default::default()
        }
        .validate()
        .unwrap();
        let artifact = exporter.export(&config, ExportFormat::Gif).unwrap();
        assert_eq!(decode_gif(&artifact.bytes).len(), frame_count as usize);
    }
}

#[test]
fn export_is_deterministic() {
    let config = AnimationConfig {
        frame_count: 5,
        size: 40,
        ..Default::default()
    }
    .validate()
    .unwrap();
    let exporter = Exporter::default();
    let a = exporter.export(&config, ExportFormat::Gif).unwrap();
    let b = exporter.export(&config, ExportFormat::Gif).unwrap();
    assert_eq!(a.content_hash, b.content_hash);
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn invalid_config_never_reaches_the_exporter() {
    let err = AnimationConfig {
        frame_count: 0,
        ..Default::default()
    }
    .validate()
    .unwrap_err();
    assert!(matches!(err, ParanimError::ConfigValidation(_)));
}

#[test]
fn export_to_file_writes_complete_gif() {
    let config = AnimationConfig {
        frame_count: 3,
        size: 32,
        ..Default::default()
    }
    .validate()
    .unwrap();
    let dir = std::env::temp_dir().join("paranim_export_to_file_test");
    let path = dir.join("nested").join("anim.gif");

    let artifact = Exporter::default()
        .with_loop_mode(LoopMode::Finite(2))
        .export_to_file(&config, ExportFormat::Gif, &path)
        .unwrap();

    let on_disk = std::fs::read(&path).unwrap();
    assert_eq!(on_disk, artifact.bytes);
    assert_eq!(decode_gif(&on_disk).len(), 3);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn apng_export_decodes() {
    let config = AnimationConfig {
        frame_count: 4,
        fps: 20,
        size: 32,
        ..Default::default()
    }
    .validate()
    .unwrap();
    let artifact = Exporter::default().export(&config, ExportFormat::Apng).unwrap();
    assert_eq!(artifact.frame_count, 4);
    let first = image::load_from_memory(&artifact.bytes).unwrap().to_rgba8();
    assert_eq!(first.dimensions(), (32, 32));
}
