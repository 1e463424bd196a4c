//! End-to-end extraction tests with archives built at test time.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use arcx_core::ContainerKind;
use arcx_core::Credential;
use arcx_core::ExtractConfig;
use arcx_core::ExtractError;
use arcx_core::ExtractionEngine;
use arcx_core::FailureCause;
use arcx_core::extract_archive;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

const FILES: &[(&str, &[u8])] = &[
    ("readme.txt", b"top level"),
    ("src/main.rs", b"fn main() {}\n"),
    ("src/nested/deep/blob.bin", &[0, 255, 1, 254, 2, 253]),
    ("with space/name #1.txt", b"odd names survive"),
    ("empty.txt", b""),
];

/// Relative path -> contents for every regular file under `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(Result::unwrap)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect()
}

fn expected() -> BTreeMap<PathBuf, Vec<u8>> {
    FILES
        .iter()
        .map(|(name, data)| (PathBuf::from(name), data.to_vec()))
        .collect()
}

fn write_tree(root: &Path) {
    for (name, data) in FILES {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, data).unwrap();
    }
}

fn build_zip(dir: &Path, password: Option<&str>) -> PathBuf {
    let path = dir.join("fixture.zip");
    let mut writer = zip::ZipWriter::new(fs::File::create(&path).unwrap());
    writer
        .add_directory("src/", SimpleFileOptions::default())
        .unwrap();
    for (name, data) in FILES {
        let mut options = SimpleFileOptions::default();
        if let Some(password) = password {
            options = options.with_aes_encryption(zip::AesMode::Aes256, password);
        }
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();
    path
}

fn build_7z(dir: &Path, password: Option<&str>) -> PathBuf {
    let content = dir.join("content");
    write_tree(&content);
    let path = dir.join("fixture.7z");
    match password {
        Some(password) => {
            sevenz_rust2::compress_to_path_encrypted(&content, &path, password.into()).unwrap();
        }
        None => sevenz_rust2::compress_to_path(&content, &path).unwrap(),
    }
    path
}

#[test]
fn test_zip_round_trip_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let archive = build_zip(temp.path(), None);
    let out = temp.path().join("out");
    let engine = ExtractionEngine::default();

    assert!(!engine.is_protected(ContainerKind::Zip, &archive).unwrap());
    engine
        .extract(ContainerKind::Zip, &archive, &out, None)
        .unwrap();

    assert_eq!(snapshot(&out), expected());
}

#[test]
fn test_encrypted_zip_credential_matrix() {
    let temp = TempDir::new().unwrap();
    let archive = build_zip(temp.path(), Some("correct horse"));
    let engine = ExtractionEngine::default();

    assert!(engine.is_protected(ContainerKind::Zip, &archive).unwrap());

    let err = engine
        .extract(ContainerKind::Zip, &archive, temp.path().join("none"), None)
        .unwrap_err();
    assert!(matches!(err, ExtractError::ExtractFailed { .. }));

    let wrong = Credential::new("battery staple");
    let err = engine
        .extract(
            ContainerKind::Zip,
            &archive,
            temp.path().join("wrong"),
            Some(&wrong),
        )
        .unwrap_err();
    assert!(matches!(err, ExtractError::ExtractFailed { .. }));

    let right = Credential::new("correct horse");
    let out = temp.path().join("right");
    engine
        .extract(ContainerKind::Zip, &archive, &out, Some(&right))
        .unwrap();
    assert_eq!(snapshot(&out), expected());
}

#[test]
fn test_second_extraction_does_not_overwrite() {
    let temp = TempDir::new().unwrap();
    let archive = build_zip(temp.path(), None);
    let out = temp.path().join("out");
    let engine = ExtractionEngine::default();

    engine
        .extract(ContainerKind::Zip, &archive, &out, None)
        .unwrap();
    fs::write(out.join("readme.txt"), b"locally edited").unwrap();

    let err = engine
        .extract(ContainerKind::Zip, &archive, &out, None)
        .unwrap_err();

    assert!(matches!(err, ExtractError::ExtractFailed { .. }));
    assert_eq!(fs::read(out.join("readme.txt")).unwrap(), b"locally edited");
}

#[test]
fn test_overwrite_under_password_named_destination_is_not_a_credential_error() {
    let temp = TempDir::new().unwrap();
    let archive = build_zip(temp.path(), None);
    let out = temp.path().join("passwords").join("locked");
    let engine = ExtractionEngine::default();

    engine
        .extract(ContainerKind::Zip, &archive, &out, None)
        .unwrap();
    let err = engine
        .extract(ContainerKind::Zip, &archive, &out, None)
        .unwrap_err();

    assert_eq!(err.cause(), Some(FailureCause::Overwrite));
    assert!(!err.is_credential_error());
}

#[test]
fn test_7z_round_trip_without_credential() {
    let temp = TempDir::new().unwrap();
    let archive = build_7z(temp.path(), None);
    let out = temp.path().join("out");

    ExtractionEngine::default()
        .extract(ContainerKind::SevenZip, &archive, &out, None)
        .unwrap();

    assert_eq!(snapshot(&out), expected());
}

#[test]
fn test_7z_ignores_unneeded_credential() {
    let temp = TempDir::new().unwrap();
    let archive = build_7z(temp.path(), None);
    let out = temp.path().join("out");
    let credential = Credential::new("not needed");

    ExtractionEngine::default()
        .extract(ContainerKind::SevenZip, &archive, &out, Some(&credential))
        .unwrap();

    assert_eq!(snapshot(&out), expected());
}

#[test]
fn test_7z_encrypted_round_trip() {
    let temp = TempDir::new().unwrap();
    let archive = build_7z(temp.path(), Some("p4ss"));
    let engine = ExtractionEngine::default();

    let err = engine
        .extract(ContainerKind::SevenZip, &archive, temp.path().join("none"), None)
        .unwrap_err();
    assert!(matches!(err, ExtractError::ExtractFailed { .. }));
    assert!(err.is_credential_error());

    let wrong = Credential::new("n0pe");
    let err = engine
        .extract(
            ContainerKind::SevenZip,
            &archive,
            temp.path().join("wrong"),
            Some(&wrong),
        )
        .unwrap_err();
    assert!(matches!(err, ExtractError::ExtractFailed { .. }));

    let out = temp.path().join("out");
    let credential = Credential::new("p4ss");
    engine
        .extract(ContainerKind::SevenZip, &archive, &out, Some(&credential))
        .unwrap();
    assert_eq!(snapshot(&out), expected());
}

#[test]
fn test_7z_probe_reports_unsupported() {
    let temp = TempDir::new().unwrap();
    let archive = build_7z(temp.path(), None);

    let err = ExtractionEngine::default()
        .is_protected(ContainerKind::SevenZip, &archive)
        .unwrap_err();
    assert_eq!(err.code(), "UNSUPPORTED");
}

#[test]
fn test_extract_archive_detects_format() {
    let temp = TempDir::new().unwrap();
    let zip = build_zip(temp.path(), None);
    let sevenz = build_7z(temp.path(), None);
    let config = ExtractConfig::default();

    let report = extract_archive(&zip, temp.path().join("from-zip"), None, &config).unwrap();
    assert_eq!(report.files_extracted, FILES.len());

    let report = extract_archive(&sevenz, temp.path().join("from-7z"), None, &config).unwrap();
    assert_eq!(report.files_extracted, FILES.len());
}

#[test]
fn test_destination_with_spaces_is_created() {
    let temp = TempDir::new().unwrap();
    let archive = build_zip(temp.path(), None);
    let out = temp.path().join("my output/dir #2");

    ExtractionEngine::default()
        .extract(ContainerKind::Zip, &archive, &out, None)
        .unwrap();

    assert!(out.join("readme.txt").is_file());
}

#[test]
fn test_wrong_driver_for_container_fails() {
    let temp = TempDir::new().unwrap();
    let archive = build_7z(temp.path(), None);

    let err = ExtractionEngine::default()
        .extract(ContainerKind::Zip, &archive, temp.path().join("out"), None)
        .unwrap_err();
    assert!(matches!(err, ExtractError::ExtractFailed { .. }));
}
