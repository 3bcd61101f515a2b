//! Loading real files from disk: fingerprints, formats and failure modes.

use std::fs;

use returnlab_core::data::{load_source, parse_percent, Delimiter, SourceSpec, ValueFormat};
use returnlab_core::domain::YearValue;
use returnlab_core::{ParseError, PipelineError, ValueError};

#[test]
fn percent_examples() {
    assert_eq!(parse_percent("4.20%").unwrap(), 4.20);
    assert_eq!(parse_percent("-1.5%").unwrap(), -1.5);
    assert!(matches!(parse_percent("abc%"), Err(ValueError::NotNumeric(_))));
}

#[test]
fn fingerprint_tracks_bytes_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("nikkei.txt"), "1990\t-38.7%\n1991\t-3.6%\n").unwrap();
    let spec = SourceSpec::new("nikkei.txt")
        .delimiter(Delimiter::Tab)
        .format(ValueFormat::Percent);

    let first = load_source(&spec, dir.path()).unwrap();
    assert_eq!(
        first.rows,
        vec![YearValue::new(1990, -38.7), YearValue::new(1991, -3.6)]
    );
    assert_eq!(first.fingerprint.rows, 2);
    assert_eq!(first.fingerprint.hash.len(), 64);
    assert!(first.fingerprint.path.ends_with("nikkei.txt"));

    let again = load_source(&spec, dir.path()).unwrap();
    assert_eq!(again.fingerprint, first.fingerprint);

    fs::write(dir.path().join("nikkei.txt"), "1990\t-38.7%\n1991\t-3.5%\n").unwrap();
    let changed = load_source(&spec, dir.path()).unwrap();
    assert_ne!(changed.fingerprint.hash, first.fingerprint.hash);
}

#[test]
fn plain_source_rejects_percent_values() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("sp500.txt"), "Year,Return\n2000,-9.1%\n").unwrap();
    let spec = SourceSpec::new("sp500.txt")
        .with_header(true)
        .format(ValueFormat::Plain);

    match load_source(&spec, dir.path()) {
        Err(PipelineError::Parse(ParseError::InvalidValue { line, reason, .. })) => {
            assert_eq!(line, 2);
            assert_eq!(reason, ValueError::UnexpectedPercentSign("-9.1%".into()));
        }
        other => panic!("expected invalid value, got {other:?}"),
    }
}

#[test]
fn detect_accepts_both_forms() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("US_inflation.txt"), "2000\t3.4%\n2001\t2.8\n").unwrap();
    let spec = SourceSpec::new("US_inflation.txt").delimiter(Delimiter::Tab);

    let loaded = load_source(&spec, dir.path()).unwrap();
    assert_eq!(
        loaded.rows,
        vec![YearValue::new(2000, 3.4), YearValue::new(2001, 2.8)]
    );
}

#[test]
fn directory_instead_of_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("ftse.txt")).unwrap();
    let err = load_source(&SourceSpec::new("ftse.txt"), dir.path()).unwrap_err();
    assert!(matches!(err, PipelineError::SourceUnavailable { .. }));
    assert_eq!(err.category(), "SOURCE");
}
