//! Hygiene — enforces coding standards at test time
//!
//! These tests scan the library source tree for antipatterns. Each has a
//! budget (ideally zero). The budget never grows: fix an existing hit before
//! adding a new one.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

// Panics — these crash the process.
const MAX_UNWRAP: usize = 0;
const MAX_EXPECT: usize = 0;
const MAX_PANIC: usize = 0;
const MAX_TODO: usize = 0;

// Silent loss — discards errors without inspecting.
const MAX_SILENT_DISCARD: usize = 0;
const MAX_DOT_OK: usize = 0;

// Secrets — tokens must only leave through the bearer header.
const MAX_TOKEN_IN_LOG: usize = 0;

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding `*_test.rs`.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], matches: impl Fn(&str) -> bool) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| matches(line)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn assert_budget(name: &str, hits: &[(String, usize)], max: usize) {
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(count <= max, "{name} budget exceeded: found {count}, max {max}.\n{listing}");
}

#[test]
fn sources_found() {
    assert!(source_files().len() >= 8, "hygiene scan found too few files; run from the crate root");
}

#[test]
fn unwrap_budget() {
    let hits = count_in_source(&source_files(), |l| l.contains(".unwrap()"));
    assert_budget(".unwrap()", &hits, MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    let hits = count_in_source(&source_files(), |l| l.contains(".expect("));
    assert_budget(".expect()", &hits, MAX_EXPECT);
}

#[test]
fn panic_budget() {
    let hits = count_in_source(&source_files(), |l| l.contains("panic!("));
    assert_budget("panic!()", &hits, MAX_PANIC);
}

#[test]
fn todo_budget() {
    let hits = count_in_source(&source_files(), |l| l.contains("todo!(") || l.contains("unimplemented!("));
    assert_budget("todo!()/unimplemented!()", &hits, MAX_TODO);
}

#[test]
fn silent_discard_budget() {
    let hits = count_in_source(&source_files(), |l| l.contains("let _ ="));
    assert_budget("let _ =", &hits, MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    let hits = count_in_source(&source_files(), |l| l.contains(".ok()"));
    assert_budget(".ok()", &hits, MAX_DOT_OK);
}

#[test]
fn token_never_logged() {
    let hits = count_in_source(&source_files(), |l| {
        l.contains("tracing::") && (l.contains("%token") || l.contains("?token") || l.contains("password"))
    });
    assert_budget("token/password in tracing macro", &hits, MAX_TOKEN_IN_LOG);
}
