//! Listing ingestion tests for fstation
//!
//! These tests feed whole autoindex documents through the parser, including documents with
//! junk mixed in, and check what comes out the other end.

use fstation::core::{self, PreviewCategory, UNKNOWN_SIZE, classify_entry};
use rand::seq::SliceRandom;
use rand::{Rng, rng};
use std::fs;
use tempfile::tempdir;

const NGINX_INDEX: &str = r#"<html>
<head><title>Index of /pub/</title></head>
<body>
<h1>Index of /pub/</h1><hr><pre><a href="../">../</a>
<a href="docs/">docs/</a>                                              01-Jan-2024 10:00                   -
<a href="photo.JPG">photo.JPG</a>                                          02-Jan-2024 03:04              1.2K
<a href="movie.webm">movie.webm</a>                                          03-Feb-2024 12:00              3.5M
<a href="Tom%20%26%20Jerry.txt">Tom &amp; Jerry.txt</a>                  04-Mar-2024 08:30               512
<a href="setup.exe">setup.exe</a>                                          05-Apr-2024 09:15                1G
</pre><hr></body>
</html>
"#;

fn row(i: usize) -> String {
    format!("<a href=\"file{i}.txt\">file{i}.txt</a>   0{}-Jan-2024 10:00   {}K", i % 9 + 1, i)
}

#[test]
fn test_nginx_index() -> Result<(), Box<dyn std::error::Error>> {
    let entries = core::parse(NGINX_INDEX);
    let names: Vec<&str> = entries.iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec!["docs", "photo.JPG", "movie.webm", "Tom & Jerry.txt", "setup.exe"]
    );

    let docs = &entries[0];
    assert!(docs.is_dir());
    assert_eq!(docs.size().bytes(), UNKNOWN_SIZE);
    assert_eq!(classify_entry(docs), PreviewCategory::None);

    assert_eq!(entries[1].size().bytes(), 1228);
    assert_eq!(entries[1].date().timestamp(), 1_704_164_640_000);
    assert_eq!(classify_entry(&entries[1]), PreviewCategory::Image);
    assert_eq!(entries[2].size().bytes(), 3_670_016);
    assert_eq!(classify_entry(&entries[2]), PreviewCategory::Video);
    assert_eq!(entries[3].href(), "Tom%20%26%20Jerry.txt");
    assert_eq!(classify_entry(&entries[3]), PreviewCategory::Text);
    assert_eq!(classify_entry(&entries[4]), PreviewCategory::None);
    Ok(())
}

#[test]
fn test_garbage_lines_are_skipped() {
    let mut rng = rng();
    let junk = [
        "",
        "<hr>",
        "<a href=\"x\">no columns</a>",
        "random text with 01-Jan-2024 10:00 5K",
        "<pre>",
        "<a name=\"anchor\">not a link</a>   01-Jan-2024 10:00   1K",
    ];

    for _ in 0..50 {
        let good = rng.random_range(0..20);
        let mut lines: Vec<String> = (0..good).map(row).collect();
        for _ in 0..rng.random_range(0..20) {
            lines.push(junk[rng.random_range(0..junk.len())].to_string());
        }
        lines.shuffle(&mut rng);

        let entries = core::parse(&lines.join("\n"));
        assert_eq!(entries.len(), good, "document:\n{}", lines.join("\n"));
        assert!(entries.iter().all(|e| !e.is_dir() && !e.is_parent()));
    }
}

#[test]
fn test_listing_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("index.html");
    fs::write(&path, NGINX_INDEX)?;

    let markup = fs::read_to_string(&path)?;
    assert_eq!(core::parse(&markup).len(), 5);
    Ok(())
}

#[test]
fn test_parent_row_with_columns_comes_first_once() {
    let markup = [
        "<a href=\"../\">Parent Directory</a>   01-Jan-2024 10:00   -",
        "<a href=\"a.txt\">a.txt</a>   01-Jan-2024 10:00   1K",
        "<a href=\"../\">../</a>   01-Jan-2024 10:00   -",
    ]
    .join("\n");

    let entries = core::parse(&markup);
    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_parent());
    assert_eq!(entries[0].name(), "Parent Directory");
}
