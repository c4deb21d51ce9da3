use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitefix_core::batch::{BatchReport, FixOptions, FixOutcome, FixResult, run_batch};
use sitefix_core::depth::compute_depth;
use sitefix_core::template::{PageConfig, TemplateGenerator};
use sitefix_scanner::result::{LinkOutcome, LinkResult, ValidationReport, Verdict};
use sitefix_scanner::validator::{LinkValidator, ValidateOptions};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

// Helper functions shared by the handlers

/// Expand `~` in a user supplied directory
pub fn expand_dir(dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir).as_ref())
}

pub fn print_banner(title: &str) {
    println!("{}", title.bright_white().bold());
    print_divider();
}

fn print_divider() {
    println!("{}", "=".repeat(50).bright_blue());
}

/// One report line for a processed file
pub fn format_fix_line(result: &FixResult, dry_run: bool) -> String {
    let path = result.path.display();
    match &result.outcome {
        FixOutcome::Rewritten { replacements } if dry_run => format!(
            "~ Would fix: {} (depth: {}, {} replacements)",
            path, result.depth, replacements
        ),
        FixOutcome::Rewritten { .. } => format!("✅ Fixed: {} (depth: {})", path, result.depth),
        FixOutcome::Unchanged => format!("✓ Unchanged: {} (depth: {})", path, result.depth),
        FixOutcome::Failed { error } => format!("❌ {}", error),
    }
}

pub fn generate_fix_summary(report: &BatchReport) -> String {
    let mut summary = String::new();
    summary.push_str(&format!(
        "✅ Successfully fixed {}/{} files\n",
        report.fixed_count(),
        report.total()
    ));

    let unchanged = report.unchanged_count();
    if unchanged > 0 {
        summary.push_str(&format!("✓ {} already up to date\n", unchanged));
    }

    let failed = report.failed_count();
    if failed > 0 {
        summary.push_str(&format!("❌ {} files could not be fixed\n", failed));
    } else if report.dry_run {
        summary.push_str("Dry run: no files were written\n");
    } else {
        summary.push_str("🎉 All migrated pages should now have correct styling!\n");
    }

    summary
}

/// One report line for a checked link, numbered from 1
pub fn format_link_line(index: usize, result: &LinkResult) -> String {
    let name = result.file_name();
    match result.outcome() {
        LinkOutcome::Styled => format!("✅ {:2}. {:<25} [HTTP 200, Styled]", index, name),
        LinkOutcome::Unstyled => format!("⚠️  {:2}. {:<25} [HTTP 200, No Styling]", index, name),
        LinkOutcome::Failed => match (result.short_error(), result.status_code) {
            (Some(error), _) => format!("❌ {:2}. {:<25} [Error: {}]", index, name, error),
            (None, Some(status)) => format!("❌ {:2}. {:<25} [HTTP {}]", index, name, status),
            (None, None) => format!("❌ {:2}. {:<25} [No response]", index, name),
        },
    }
}

pub fn generate_validation_summary(report: &ValidationReport) -> String {
    let summary = &report.summary;
    let mut text = String::new();
    text.push_str("📊 SUMMARY:\n");
    text.push_str(&format!("Total links tested: {}\n", summary.total));
    text.push_str(&format!("Working links (HTTP 200): {}\n", summary.success));
    text.push_str(&format!("Properly styled links: {}\n", summary.styled));

    let icon = match summary.verdict {
        Verdict::AllStyled => "🎉",
        Verdict::SomeUnstyled => "⚠️ ",
        Verdict::SomeBroken => "❌",
    };
    text.push_str(&format!("{} {}\n", icon, summary.verdict.message()));
    text
}

fn colorize_line(line: &str, ok: bool, warn: bool) -> String {
    if ok {
        line.green().to_string()
    } else if warn {
        line.yellow().to_string()
    } else {
        line.red().to_string()
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("✗ Failed to serialize report: {}", e),
    }
}

pub fn fix_options_from_args(args: &ArgMatches) -> FixOptions {
    let root = args
        .get_one::<String>("root")
        .map(|r| expand_dir(r))
        .unwrap_or_else(|| PathBuf::from("."));
    let pages_dir = args
        .get_one::<String>("pages-dir")
        .cloned()
        .unwrap_or_else(|| "pages".to_string());
    let json = args.get_one::<String>("format").is_some_and(|f| f == "json");

    FixOptions {
        root,
        pages_dir,
        dry_run: args.get_flag("dry-run"),
        show_progress_bars: !json,
    }
}

pub fn handle_fix(args: &ArgMatches) {
    let options = fix_options_from_args(args);
    let json = args.get_one::<String>("format").is_some_and(|f| f == "json");

    if json {
        let report = run_batch(&options, None);
        print_json(&report);
        return;
    }

    let pages_root = options.root.join(&options.pages_dir);
    println!("Scanning {}", pages_root.display());

    let dry_run = options.dry_run;
    let callback = Arc::new(move |result: &FixResult| {
        let line = format_fix_line(result, dry_run);
        println!("{}", colorize_line(&line, result.is_success(), false));
    });

    let report = run_batch(&options, Some(callback));

    if report.total() == 0 {
        println!(
            "No HTML files found in {} directory",
            options.pages_dir.bright_white()
        );
        return;
    }

    println!();
    print!("{}", generate_fix_summary(&report));
}

pub fn validate_options_from_args(args: &ArgMatches) -> ValidateOptions {
    let defaults = ValidateOptions::default();
    ValidateOptions {
        base_url: args
            .get_one::<Url>("base-url")
            .map(|u| u.to_string())
            .unwrap_or(defaults.base_url),
        page: args.get_one::<String>("page").cloned().unwrap_or(defaults.page),
        page_timeout: args
            .get_one::<u64>("timeout")
            .map(|s| Duration::from_secs(*s))
            .unwrap_or(defaults.page_timeout),
        link_timeout: args
            .get_one::<u64>("link-timeout")
            .map(|s| Duration::from_secs(*s))
            .unwrap_or(defaults.link_timeout),
        delay: args
            .get_one::<u64>("delay-ms")
            .map(|ms| Duration::from_millis(*ms))
            .unwrap_or(defaults.delay),
    }
}

pub async fn handle_validate(args: &ArgMatches) {
    let options = validate_options_from_args(args);
    let json = args.get_one::<String>("format").is_some_and(|f| f == "json");

    match run_validation(&options, !json).await {
        Ok(Some(report)) => {
            if json {
                print_json(&report);
            } else {
                println!();
                print!("{}", generate_validation_summary(&report));
            }
        }
        Ok(None) => println!("❌ No archive links found in {}", options.page),
        Err(e) => println!("❌ {:#}", e),
    }
}

/// Fetch the page and check its links. `Ok(None)` means the page had no
/// archive links.
pub async fn run_validation(
    options: &ValidateOptions,
    print_progress: bool,
) -> Result<Option<ValidationReport>> {
    let mut validator =
        LinkValidator::from_options(options).context("Failed to create HTTP client")?;

    let spinner = if print_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {}", options.page));

        let fetch_spinner = pb.clone();
        validator = validator
            .with_links_found_callback(Arc::new(move |count: usize| {
                fetch_spinner.finish_and_clear();
                if count > 0 {
                    println!("Found {} conference links to test", count);
                    println!();
                }
            }))
            .with_progress_callback(Arc::new(|index: usize, result: &LinkResult| {
                let line = format_link_line(index, result);
                let outcome = result.outcome();
                println!(
                    "{}",
                    colorize_line(
                        &line,
                        outcome == LinkOutcome::Styled,
                        outcome == LinkOutcome::Unstyled
                    )
                );
            }));
        Some(pb)
    } else {
        None
    };

    let validated = validator.validate(&options.base_url, &options.page).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = validated.with_context(|| format!("Could not access {}", options.page))?;

    if report.links.is_empty() {
        return Ok(None);
    }
    Ok(Some(report))
}

/// Read the page body for `generate`
pub fn load_page_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn page_config_from_args(args: &ArgMatches) -> Result<PageConfig> {
    let content_file = args
        .get_one::<PathBuf>("content-file")
        .context("--content-file is required")?;
    let output_path = args
        .get_one::<PathBuf>("output")
        .context("--output is required")?
        .clone();
    let depth = args
        .get_one::<usize>("depth")
        .copied()
        .unwrap_or_else(|| compute_depth(&output_path));

    Ok(PageConfig {
        page_title: args.get_one::<String>("title").cloned().unwrap_or_default(),
        main_content: load_page_content(content_file)?,
        output_path,
        depth,
        active_page: args.get_one::<String>("active").cloned().unwrap_or_default(),
        ..PageConfig::default()
    })
}

pub fn run_generate(args: &ArgMatches) -> Result<PathBuf> {
    let templates_dir = expand_dir(
        args.get_one::<String>("templates")
            .map(String::as_str)
            .unwrap_or("templates"),
    );
    let root = expand_dir(args.get_one::<String>("root").map(String::as_str).unwrap_or("."));

    let config = page_config_from_args(args)?;
    let generator = TemplateGenerator::from_dir(&templates_dir, &root)?;
    generator.generate_page(&config)?;

    Ok(root.join(&config.output_path))
}

pub fn handle_generate(args: &ArgMatches) {
    match run_generate(args) {
        Ok(path) => println!("{} Generated: {}", "✓".green().bold(), path.display()),
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    }
}
