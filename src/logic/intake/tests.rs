use super::*;
use crate::logic::sample::hasher::hash_file;
use std::collections::BTreeSet;
use tempfile::{tempdir, TempDir};

fn variants() -> Vec<String> {
    vec!["v1".into(), "v2".into(), "v3".into()]
}

/// Output root with the taxonomy already bootstrapped
fn bootstrapped() -> (TempDir, DestinationLayout) {
    let dir = tempdir().unwrap();
    let layout = DestinationLayout::new(dir.path().join("dataset"), variants());
    layout.bootstrap().unwrap();
    (dir, layout)
}

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn pe(body: &str) -> Vec<u8> {
    let mut bytes = b"MZ".to_vec();
    bytes.extend_from_slice(body.as_bytes());
    bytes
}

fn listing(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_unique_valid_files_are_all_accepted() {
    let (_tmp, layout) = bootstrapped();
    let src = tempdir().unwrap();
    for i in 0..5 {
        write(src.path(), &format!("s{}.exe", i), &pe(&format!("body {}", i)));
    }

    let report = FileIntake::new(&layout, "exe").intake(src.path(), Label::Malicious, RunStatistics::default());

    assert_eq!(report.status, IntakeStatus::Processed { candidates: 5 });
    assert_eq!(report.stats, RunStatistics { malicious: 5, benign: 0, duplicates: 0, errors: 0 });
    assert_eq!(listing(&layout.original_dir(Label::Malicious)).len(), 5);
}

#[test]
fn test_duplicate_and_invalid_scenario() {
    let (_tmp, layout) = bootstrapped();
    let src = tempdir().unwrap();
    write(src.path(), "a.exe", &pe("same"));
    write(src.path(), "b.exe", &pe("same"));
    write(src.path(), "c.exe", b"XXnot a pe");

    let report = FileIntake::new(&layout, "exe").intake(src.path(), Label::Malicious, RunStatistics::default());

    assert_eq!(report.stats.malicious, 1);
    assert_eq!(report.stats.duplicates, 1);
    assert_eq!(report.stats.errors, 1);

    let files = listing(&layout.original_dir(Label::Malicious));
    assert_eq!(files.len(), 1);
    let only = files.iter().next().unwrap();
    assert!(only.ends_with("_a.exe") || only.ends_with("_b.exe"));
    assert!(files.iter().all(|f| !f.ends_with("_c.exe")));
}

#[test]
fn test_identical_content_yields_one_accept_many_duplicates() {
    let (_tmp, layout) = bootstrapped();
    let src = tempdir().unwrap();
    for name in ["z.exe", "m.exe", "a.exe", "q.exe"] {
        write(src.path(), name, &pe("clone"));
    }

    let report = FileIntake::new(&layout, "exe").intake(src.path(), Label::Benign, RunStatistics::default());

    assert_eq!(report.stats.benign, 1);
    assert_eq!(report.stats.duplicates, 3);
    assert_eq!(report.stats.errors, 0);
    // sorted discovery: first name wins
    let accepted: Vec<_> = report.accepted().map(|s| s.file_name.clone()).collect();
    assert_eq!(accepted, vec!["a.exe".to_string()]);
}

#[test]
fn test_invalid_files_are_errors_never_duplicates() {
    let (_tmp, layout) = bootstrapped();
    let src = tempdir().unwrap();
    write(src.path(), "x.exe", b"PK\x03\x04");
    write(src.path(), "y.exe", b"PK\x03\x04");
    write(src.path(), "empty.exe", b"");

    let report = FileIntake::new(&layout, "exe").intake(src.path(), Label::Malicious, RunStatistics::default());

    assert_eq!(report.stats.errors, 3);
    assert_eq!(report.stats.duplicates, 0);
    assert!(report.samples.iter().all(|s| matches!(s.outcome, SampleOutcome::Rejected { .. })));
    assert!(listing(&layout.original_dir(Label::Malicious)).is_empty());
}

#[test]
fn test_digest_prefix_round_trip() {
    let (_tmp, layout) = bootstrapped();
    let src = tempdir().unwrap();
    write(src.path(), "one.exe", &pe("first"));
    write(src.path(), "two.exe", &pe("second"));

    FileIntake::new(&layout, "exe").intake(src.path(), Label::Benign, RunStatistics::default());

    let dest = layout.original_dir(Label::Benign);
    for name in listing(&dest) {
        let mut parts = name.splitn(3, '_');
        assert_eq!(parts.next(), Some("benign"));
        let prefix = parts.next().unwrap();
        assert_eq!(prefix.len(), 16);

        let recomputed = hash_file(&dest.join(&name)).unwrap();
        assert_eq!(prefix, &recomputed[..16]);
    }
}

#[test]
fn test_fresh_rerun_is_identical() {
    let src = tempdir().unwrap();
    write(src.path(), "a.exe", &pe("alpha"));
    write(src.path(), "b.exe", &pe("alpha"));
    write(src.path(), "c.exe", &pe("gamma"));
    write(src.path(), "d.exe", b"nope");

    let run = || {
        let (tmp, layout) = bootstrapped();
        let report = FileIntake::new(&layout, "exe").intake(src.path(), Label::Malicious, RunStatistics::default());
        let files = listing(&layout.original_dir(Label::Malicious));
        drop(tmp);
        (report.stats, files)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_same_content_accepted_under_each_label() {
    let (_tmp, layout) = bootstrapped();
    let mal = tempdir().unwrap();
    let ben = tempdir().unwrap();
    write(mal.path(), "dual.exe", &pe("shared"));
    write(ben.path(), "dual.exe", &pe("shared"));

    let intake = FileIntake::new(&layout, "exe");
    let report = intake.intake(mal.path(), Label::Malicious, RunStatistics::default());
    let report = intake.intake(ben.path(), Label::Benign, report.stats);

    assert_eq!(report.stats, RunStatistics { malicious: 1, benign: 1, duplicates: 0, errors: 0 });
    assert_eq!(listing(&layout.original_dir(Label::Malicious)).len(), 1);
    assert_eq!(listing(&layout.original_dir(Label::Benign)).len(), 1);
}

#[test]
fn test_empty_source_reports_no_candidates() {
    let (_tmp, layout) = bootstrapped();
    let src = tempdir().unwrap();
    write(src.path(), "readme.txt", b"MZ but wrong extension");
    fs::create_dir(src.path().join("nested.exe")).unwrap();

    let before = RunStatistics { malicious: 2, benign: 0, duplicates: 1, errors: 0 };
    let report = FileIntake::new(&layout, "exe").intake(src.path(), Label::Malicious, before);

    assert_eq!(report.status, IntakeStatus::NoCandidates);
    assert_eq!(report.stats, before);
    assert!(listing(&layout.original_dir(Label::Malicious)).is_empty());
}

#[test]
fn test_missing_source_is_reported_not_fatal() {
    let (tmp, layout) = bootstrapped();
    let report = FileIntake::new(&layout, "exe").intake(
        &tmp.path().join("does-not-exist"),
        Label::Benign,
        RunStatistics::default(),
    );

    assert_eq!(report.status, IntakeStatus::SourceMissing);
    assert_eq!(report.stats, RunStatistics::default());
    assert!(report.samples.is_empty());
}

#[test]
fn test_subdirectories_are_not_scanned() {
    let (_tmp, layout) = bootstrapped();
    let src = tempdir().unwrap();
    write(src.path(), "top.exe", &pe("top"));
    let nested = src.path().join("inner");
    fs::create_dir(&nested).unwrap();
    write(&nested, "deep.exe", &pe("deep"));

    let report = FileIntake::new(&layout, "exe").intake(src.path(), Label::Malicious, RunStatistics::default());

    assert_eq!(report.status, IntakeStatus::Processed { candidates: 1 });
    assert_eq!(report.stats.malicious, 1);
}

#[test]
fn test_copy_failure_is_counted_and_run_continues() {
    let tmp = tempdir().unwrap();
    // never bootstrapped: original/<label> does not exist, so every copy fails
    let layout = DestinationLayout::new(tmp.path().join("unbuilt"), variants());
    let src = tempdir().unwrap();
    write(src.path(), "a.exe", &pe("a"));
    write(src.path(), "b.exe", &pe("b"));

    let report = FileIntake::new(&layout, "exe").intake(src.path(), Label::Malicious, RunStatistics::default());

    assert_eq!(report.stats.errors, 2);
    assert_eq!(report.stats.malicious, 0);
    assert_eq!(report.samples.len(), 2);
    assert!(report.samples.iter().all(|s| matches!(s.outcome, SampleOutcome::Failed { .. })));
}

#[test]
fn test_destination_name_format() {
    let digest = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
    let name = destination_name(Label::Malicious, digest, Path::new("/in/Setup.exe"));
    assert_eq!(name, OsString::from("malicious_0123456789abcdef_Setup.exe"));
}

#[test]
fn test_unreadable_listing_entries_are_skipped() {
    let entries = vec![
        Ok(PathBuf::from("in/a.exe")),
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "entry denied")),
        Ok(PathBuf::from("in/b.exe")),
    ];

    let kept = readable_entries(Path::new("in"), entries.into_iter());
    assert_eq!(kept, vec![PathBuf::from("in/a.exe"), PathBuf::from("in/b.exe")]);
}
