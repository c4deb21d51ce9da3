// Tests for batch fixing over a site directory

use sitefix_core::batch::{
    FixOptions, FixOutcome, FixResult, discover_html_files, fix_file, run_batch,
};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const LEGACY_PAGE: &str = r#"<html><head>
<link rel="stylesheet" href="assets/css/bootstrap.min.css">
<script src="assets/js/main.js"></script>
</head><body>
<a href="index.html">Home</a>
<a href="Calendar.html">Calendar</a>
<a href="TECHMUN.html">TECHMUN</a>
</body></html>"#;

fn write_page(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn options_for(root: &Path) -> FixOptions {
    FixOptions {
        root: root.to_path_buf(),
        ..FixOptions::default()
    }
}

fn make_site() -> TempDir {
    let site = TempDir::new().unwrap();
    write_page(site.path(), "pages/about/awards.html", LEGACY_PAGE);
    write_page(site.path(), "pages/events/calendar.html", LEGACY_PAGE);
    write_page(site.path(), "pages/conferences/techmun/schedule.html", LEGACY_PAGE);
    write_page(site.path(), "pages/conferences/archives/2019/index.html", LEGACY_PAGE);
    write_page(site.path(), "pages/about/notes.txt", "not html");
    site
}

// ============================================================================
// Discovery Tests
// ============================================================================

#[test]
fn test_discover_sorted_html_only() {
    let site = make_site();
    let files = discover_html_files(&site.path().join("pages"));

    let relative: Vec<String> = files
        .iter()
        .map(|p| {
            p.strip_prefix(site.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(
        relative,
        vec![
            "pages/about/awards.html",
            "pages/conferences/archives/2019/index.html",
            "pages/conferences/techmun/schedule.html",
            "pages/events/calendar.html",
        ]
    );
}

#[test]
fn test_discover_missing_directory() {
    let site = TempDir::new().unwrap();
    assert!(discover_html_files(&site.path().join("pages")).is_empty());
}

// ============================================================================
// Batch Tests
// ============================================================================

#[test]
fn test_batch_fixes_every_file() {
    let site = make_site();
    let report = run_batch(&options_for(site.path()), None);

    assert_eq!(report.total(), 4);
    assert_eq!(report.fixed_count(), 4);
    assert_eq!(report.failed_count(), 0);
    assert!(
        report
            .results
            .iter()
            .all(|r| matches!(r.outcome, FixOutcome::Rewritten { .. }))
    );
}

#[test]
fn test_batch_writes_depth_correct_paths() {
    let site = make_site();
    run_batch(&options_for(site.path()), None);

    let calendar = fs::read_to_string(site.path().join("pages/events/calendar.html")).unwrap();
    assert!(calendar.contains(r#"href="../assets/css/bootstrap.min.css""#));
    assert!(calendar.contains(r#"src="../assets/js/main.js""#));
    assert!(calendar.contains(r#"href="../index.html""#));
    assert!(calendar.contains(r#"href="../pages/events/calendar.html""#));
    assert!(calendar.contains(r#"href="../pages/conferences/techmun/index.html""#));

    let schedule =
        fs::read_to_string(site.path().join("pages/conferences/techmun/schedule.html")).unwrap();
    assert!(schedule.contains(r#"href="../../assets/css/bootstrap.min.css""#));
    assert!(schedule.contains(r#"href="../../index.html">Home"#));
    assert!(schedule.contains(r#"href="index.html">TECHMUN"#));

    let archive =
        fs::read_to_string(site.path().join("pages/conferences/archives/2019/index.html")).unwrap();
    assert!(archive.contains(r#"href="../../../pages/conferences/techmun/index.html""#));
}

#[test]
fn test_batch_rerun_is_idempotent() {
    let site = make_site();
    let options = options_for(site.path());
    run_batch(&options, None);

    let path = site.path().join("pages/conferences/techmun/schedule.html");
    let after_first = fs::read_to_string(&path).unwrap();

    let report = run_batch(&options, None);
    let after_second = fs::read_to_string(&path).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(report.unchanged_count(), 4);
    assert_eq!(report.fixed_count(), 4);
}

#[test]
fn test_batch_rerun_sibling_only_page() {
    let site = TempDir::new().unwrap();
    write_page(
        site.path(),
        "pages/conferences/techmun/schedule.html",
        r#"<a href="TECHMUN.html">"#,
    );
    let options = options_for(site.path());
    let path = site.path().join("pages/conferences/techmun/schedule.html");

    let first = run_batch(&options, None);
    assert_eq!(
        first.results[0].outcome,
        FixOutcome::Rewritten { replacements: 1 }
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"<a href="index.html">"#);

    let second = run_batch(&options, None);
    assert_eq!(second.results[0].outcome, FixOutcome::Unchanged);
    assert_eq!(fs::read_to_string(&path).unwrap(), r#"<a href="index.html">"#);
}

#[test]
fn test_batch_dry_run_leaves_files() {
    let site = make_site();
    let options = FixOptions {
        dry_run: true,
        ..options_for(site.path())
    };
    let report = run_batch(&options, None);

    assert_eq!(report.fixed_count(), 4);
    let calendar = fs::read_to_string(site.path().join("pages/events/calendar.html")).unwrap();
    assert_eq!(calendar, LEGACY_PAGE);
}

#[test]
fn test_batch_reports_progress_in_order() {
    let site = make_site();
    let seen: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();

    run_batch(
        &options_for(site.path()),
        Some(Arc::new(move |result: &FixResult| {
            seen_clone.lock().unwrap().push(result.depth);
        })),
    );

    assert_eq!(*seen.lock().unwrap(), vec![1, 3, 2, 1]);
}

#[test]
fn test_batch_empty_site() {
    let site = TempDir::new().unwrap();
    let report = run_batch(&options_for(site.path()), None);
    assert_eq!(report.total(), 0);
    assert_eq!(report.fixed_count(), 0);
}

// ============================================================================
// Single File Tests
// ============================================================================

#[test]
fn test_fix_file_unchanged() {
    let site = TempDir::new().unwrap();
    write_page(site.path(), "pages/events/plain.html", "<p>nothing to fix</p>");

    let result = fix_file(
        site.path(),
        &site.path().join("pages/events/plain.html"),
        &options_for(site.path()),
    );

    assert_eq!(result.outcome, FixOutcome::Unchanged);
    assert_eq!(result.depth, 1);
    assert!(result.is_success());
}

#[test]
fn test_fix_file_missing_is_failure() {
    let site = TempDir::new().unwrap();
    let result = fix_file(
        site.path(),
        &site.path().join("pages/events/missing.html"),
        &options_for(site.path()),
    );

    assert!(!result.is_success());
    match result.outcome {
        FixOutcome::Failed { error } => assert!(error.starts_with("Error reading")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_fix_file_completes_partial_migration() {
    let site = TempDir::new().unwrap();
    write_page(
        site.path(),
        "pages/events/x.html",
        r#"<link href="../assets/a.css"><a href="Calendar.html">"#,
    );
    let path = site.path().join("pages/events/x.html");

    let result = fix_file(site.path(), &path, &options_for(site.path()));

    assert_eq!(result.outcome, FixOutcome::Rewritten { replacements: 1 });
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"<link href="../assets/a.css"><a href="../pages/events/calendar.html">"#
    );
}

#[test]
fn test_report_serializes_outcome_status() {
    let site = make_site();
    let report = run_batch(&options_for(site.path()), None);

    let json = serde_json::to_value(&report).unwrap();
    let first = &json["results"][0];
    assert_eq!(first["path"], "pages/about/awards.html");
    assert_eq!(first["outcome"]["status"], "rewritten");
    assert!(first["outcome"]["replacements"].as_u64().unwrap() > 0);
}
