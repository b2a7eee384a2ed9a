//! Local fetchers against zip and directory fixtures.

use std::io::{Cursor, Write};

use fda_fetch::{ArchiveFetcher, FetchError, LocalFetcher, RetryPolicy, extract_archive, fetcher_for};
use zip::write::SimpleFileOptions;

fn archive(members: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in members {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn extracts_txt_members_only() {
    let data = archive(&[
        ("Products.txt", "ApplNo\tProductNo\n1\t1\n"),
        ("ApplicationsDocsType_Lookup.pdf", "ignored"),
        ("TE.txt", "ApplNo\tProductNo\tTECode\n"),
    ]);
    let files = extract_archive(&data).unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(
        files.get("Products.txt"),
        Some("ApplNo\tProductNo\n1\t1\n".as_bytes())
    );
    assert!(files.get("ApplicationsDocsType_Lookup.pdf").is_none());
}

#[test]
fn local_zip_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drugsatfda.zip");
    std::fs::write(&path, archive(&[("Submissions.txt", "ApplNo\n")])).unwrap();

    let fetcher = fetcher_for(path.to_str().unwrap(), RetryPolicy::default()).unwrap();
    let files = fetcher.fetch().unwrap();
    assert!(files.get("submissions.txt").is_some());
}

#[test]
fn local_directory_of_members() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Products.txt"), "ApplNo\n").unwrap();
    std::fs::write(dir.path().join("notes.md"), "skip").unwrap();

    let files = LocalFetcher::new(dir.path()).fetch().unwrap();
    assert_eq!(files.names().collect::<Vec<_>>(), ["Products.txt"]);
}

#[test]
fn missing_local_source_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.zip");
    let err = fetcher_for(missing.to_str().unwrap(), RetryPolicy::default())
        .err()
        .unwrap();
    assert!(matches!(err, FetchError::NotFound(_)));
    assert!(!err.is_retryable());
}

#[test]
fn urls_get_an_http_fetcher() {
    let fetcher = fetcher_for("https://example.invalid/archive.zip", RetryPolicy::default()).unwrap();
    assert_eq!(fetcher.location(), "https://example.invalid/archive.zip");
}
