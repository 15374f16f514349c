//! Human-readable and JSON rendering of command results

use std::fmt::Write;

use colored::Colorize;
use serde::Serialize;

use envsync_core::{DiffResult, RemoteSyncResult, SyncResult, ValidationResult};

use crate::error::Result;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn render_validation(result: &ValidationResult) -> String {
    let mut out = String::new();
    if result.valid {
        let _ = writeln!(out, "{} Validation passed", "OK".green().bold());
        if !result.extra.is_empty() {
            render_key_section(&mut out, "Extra variables (not in schema)", &result.extra, |k| {
                format!("  - {}", k.yellow())
            });
        }
        return out;
    }

    let _ = writeln!(out, "{} Validation failed", "FAILED".red().bold());

    if !result.missing.is_empty() {
        render_key_section(&mut out, "Missing required variables", &result.missing, |k| {
            format!("  - {}", k.red())
        });
    }

    if !result.errors.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", "Validation errors".bold());
        for error in &result.errors {
            let _ = writeln!(out, "  - {}: {}", error.variable.red(), error.message);
        }
    }

    if !result.extra.is_empty() {
        render_key_section(&mut out, "Extra variables (not in schema)", &result.extra, |k| {
            format!("  - {}", k.yellow())
        });
    }

    out
}

pub fn render_diff(diff: &DiffResult, source: &str, target: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} vs {}", source.bold(), target.bold());
    let _ = writeln!(out);

    if diff.is_in_sync() {
        let _ = writeln!(out, "{} Files are in sync", "OK".green().bold());
        return out;
    }

    if !diff.missing.is_empty() {
        let _ = writeln!(out, "{} ({}):", "Missing in target".bold(), diff.missing.len());
        for key in &diff.missing {
            let _ = writeln!(out, "  {} {}", "-".red(), key);
        }
    }

    if !diff.extra.is_empty() {
        let _ = writeln!(out, "{} ({}):", "Extra in target".bold(), diff.extra.len());
        for key in &diff.extra {
            let _ = writeln!(out, "  {} {}", "+".green(), key);
        }
    }

    if !diff.different.is_empty() {
        let _ = writeln!(out, "{} ({}):", "Different values".bold(), diff.different.len());
        for (key, values) in &diff.different {
            let _ = writeln!(out, "  {} {}", "~".yellow(), key);
            let _ = writeln!(out, "    {}: {}", "source".blue(), values.source);
            let _ = writeln!(out, "    {}: {}", "target".blue(), values.target);
        }
    }

    out
}

pub fn render_sync(result: &SyncResult, dry_run: bool) -> String {
    let mut out = String::new();
    if result.added.is_empty() {
        let _ = writeln!(out, "{} No variables need to be synced", "OK".green().bold());
        return out;
    }

    let action = if dry_run { "Would sync" } else { "Synced" };
    let _ = writeln!(
        out,
        "{} {} variables to {}:",
        action,
        result.added.len(),
        result.file_path.bold()
    );
    for key in &result.added {
        let _ = writeln!(out, "  {} {}", "+".green(), key);
    }

    render_footer(&mut out, dry_run);
    out
}

pub fn render_remote_sync(result: &RemoteSyncResult, dry_run: bool) -> String {
    let mut out = String::new();
    if !result.has_changes() {
        let _ = writeln!(out, "{} No variables need to be synced", "OK".green().bold());
        return out;
    }

    let action = if dry_run { "Would sync" } else { "Synced" };
    let _ = writeln!(
        out,
        "{} {} -> {}:",
        action,
        result.source.bold(),
        result.target.bold()
    );

    let sections = [
        ("Added", &result.added, "+".green()),
        ("Updated", &result.updated, "~".yellow()),
        ("Deleted", &result.deleted, "-".red()),
        ("Skipped", &result.skipped, "!".blue()),
    ];
    for (title, keys, marker) in sections {
        if keys.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{} ({}):", title.bold(), keys.len());
        for key in keys {
            let _ = writeln!(out, "  {} {}", marker, key);
        }
    }

    render_footer(&mut out, dry_run);
    out
}

pub fn render_adapters(names: &[&str]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Available adapters:".bold());
    for name in names {
        let _ = writeln!(out, "  {}", name.cyan());
    }
    out
}

fn render_key_section(
    out: &mut String,
    title: &str,
    keys: &[String],
    line: impl Fn(&str) -> String,
) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}:", title.bold());
    for key in keys {
        let _ = writeln!(out, "{}", line(key));
    }
}

fn render_footer(out: &mut String, dry_run: bool) {
    if dry_run {
        let _ = writeln!(
            out,
            "{}",
            "This was a dry run. Run again without --dry-run to apply changes.".yellow()
        );
    } else {
        let _ = writeln!(out, "{} Sync completed", "OK".green().bold());
    }
}
