// spoofer-core/tests/export_success_tests.rs

use spoofer_core::config::{ExportOptionsBuilder, QualityMode};
use spoofer_core::external::mocks::MockFfmpegSpawner;
use spoofer_core::processing::Rotation;
use spoofer_core::{ExportArchive, InputFile, RotationMap, export_batch};
use std::io::{Cursor, Read};
use tempfile::tempdir;

fn input(name: &str) -> InputFile {
    InputFile::new(name, b"dummy content".to_vec()).expect("supported extension")
}

fn entry_content(archive: &ExportArchive, path: &str) -> String {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive.bytes.clone())).unwrap();
    let mut entry = zip.by_name(path).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_single_normal_variant_nested_layout() -> Result<(), Box<dyn std::error::Error>> {
    let temp_parent = tempdir()?;
    let spawner = MockFfmpegSpawner::new();
    let files = vec![input("clip.mov")];
    let options = ExportOptionsBuilder::new()
        .temp_dir(temp_parent.path().to_path_buf())
        .build();

    let archive = export_batch(&spawner, &files, &RotationMap::new(), &options, |_| {})?;

    assert_eq!(archive.file_name, "spoofer_video_export_MAX_QUALITY.zip");
    assert_eq!(
        archive.entry_paths().collect::<Vec<_>>(),
        vec!["clip/Normal/clip_normal.mp4"]
    );
    assert_eq!(entry_content(&archive, "clip/Normal/clip_normal.mp4"), "null");

    let calls = spawner.get_received_calls();
    assert_eq!(calls.len(), 1);
    let args = calls[0].join(" ");
    assert!(args.contains("input__clip.mov"));
    assert!(args.contains("-crf 0"));
    assert!(args.contains("-preset slow"));
    assert!(args.contains("-map_metadata -1"));

    // Working directory is gone once the run returns
    assert_eq!(std::fs::read_dir(temp_parent.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_rotated_mirror_both_flat_layout() -> Result<(), Box<dyn std::error::Error>> {
    let spawner = MockFfmpegSpawner::new();
    let files = vec![input("clip.mp4")];
    let mut rotations = RotationMap::new();
    rotations.insert("clip.mp4".to_string(), Rotation::R90);
    let options = ExportOptionsBuilder::new()
        .mirror_both(true)
        .flat_layout(true)
        .effects(["goldenhour", "bw"])
        .build();

    let archive = export_batch(&spawner, &files, &rotations, &options, |_| {})?;

    let paths: Vec<_> = archive.entry_paths().collect();
    assert_eq!(
        paths,
        vec![
            "clip_rot90_bw.mp4",
            "clip_rot90_goldenhour.mp4",
            "clip_rot90_mir_bw.mp4",
            "clip_rot90_mir_goldenhour.mp4",
        ]
    );
    assert!(paths.iter().all(|p| !p.contains('/')));
    assert_eq!(
        entry_content(&archive, "clip_rot90_mir_bw.mp4"),
        "transpose=1,hflip,hue=s=0"
    );
    assert_eq!(spawner.get_received_calls().len(), 4);
    Ok(())
}

#[test]
fn test_nested_layout_splits_mirror_states() -> Result<(), Box<dyn std::error::Error>> {
    let spawner = MockFfmpegSpawner::new();
    let files = vec![input("a.webm"), input("b.mkv")];
    let options = ExportOptionsBuilder::new().mirror_both(true).build();

    let archive = export_batch(&spawner, &files, &RotationMap::new(), &options, |_| {})?;

    assert_eq!(
        archive.entry_paths().collect::<Vec<_>>(),
        vec![
            "a/Normal/a_normal.mp4",
            "a/Mirror/a_mir_normal.mp4",
            "b/Normal/b_normal.mp4",
            "b/Mirror/b_mir_normal.mp4",
        ]
    );
    Ok(())
}

#[test]
fn test_progress_is_monotonic_and_complete() -> Result<(), Box<dyn std::error::Error>> {
    let spawner = MockFfmpegSpawner::new();
    let files = vec![input("a.mp4"), input("b.mp4"), input("c.mp4")];
    let options = ExportOptionsBuilder::new()
        .mirror_both(true)
        .effects(["normal", "bwcontrast"])
        .build();

    let mut seen = Vec::new();
    let archive = export_batch(&spawner, &files, &RotationMap::new(), &options, |p| {
        seen.push((p.current, p.total, p.archive_path.to_string()));
    })?;

    assert_eq!(seen.len(), 12);
    for (i, (current, total, _)) in seen.iter().enumerate() {
        assert_eq!(*current, i + 1);
        assert_eq!(*total, 12);
    }
    let reported: Vec<_> = seen.into_iter().map(|(_, _, path)| path).collect();
    let written: Vec<_> = archive.entry_paths().map(str::to_string).collect();
    assert_eq!(reported, written);
    Ok(())
}

#[test]
fn test_configurable_quality_and_scale() -> Result<(), Box<dyn std::error::Error>> {
    let spawner = MockFfmpegSpawner::new();
    let files = vec![input("clip.mp4")];
    let options = ExportOptionsBuilder::new()
        .scale_percent(50)
        .strip_metadata(false)
        .quality(QualityMode::Configurable {
            preset: "veryfast".to_string(),
            crf: 23,
        })
        .build();

    let archive = export_batch(&spawner, &files, &RotationMap::new(), &options, |_| {})?;

    assert_eq!(archive.file_name, "spoofer_video_export_veryfast_crf23.zip");
    assert_eq!(
        archive.entry_paths().collect::<Vec<_>>(),
        vec!["clip/Normal/clip_normal_scale50.mp4"]
    );
    let args = spawner.get_received_calls()[0].join(" ");
    assert!(args.contains("-preset veryfast"));
    assert!(args.contains("-crf 23"));
    assert!(args.contains("-vf scale=trunc(iw*0.5/2)*2:trunc(ih*0.5/2)*2"));
    assert!(!args.contains("-map_metadata"));
    Ok(())
}

#[test]
fn test_scale_of_one_hundred_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let spawner = MockFfmpegSpawner::new();
    let files = vec![input("clip.mp4")];
    let options = ExportOptionsBuilder::new()
        .scale_percent(100)
        .effects(["bw"])
        .build();

    let archive = export_batch(&spawner, &files, &RotationMap::new(), &options, |_| {})?;

    let paths: Vec<_> = archive.entry_paths().collect();
    assert_eq!(paths, vec!["clip/Normal/clip_bw.mp4"]);
    assert_eq!(entry_content(&archive, paths[0]), "hue=s=0");
    Ok(())
}
