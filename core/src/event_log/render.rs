//! Text rendering of the event log
//!
//! The output is rebuilt from the full record list every time, so the
//! same log always renders to the same text.

use std::fmt::Write;

use super::{EventKind, EventLog};

pub const HEADER: &str = "=== Randomizer Tracker Log ===";
pub const PROGRESS_HEADER: &str = "--- Progress ---";

/// Totals the progress summary is measured against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTotals {
    pub collectible_label: String,
    pub collectible_total: usize,
    pub boss_label: String,
    pub boss_total: usize,
}

/// Counts recovered from a rendered progress summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub collectibles: usize,
    pub collectible_total: usize,
    pub bosses: usize,
    pub boss_total: usize,
}

/// `HH:MM:SS`, hours not wrapped at 24
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let total_secs = elapsed_ms / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

pub fn render(log: &EventLog, totals: &ProgressTotals) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "{HEADER}");
    if let Some(seed) = log.seed() {
        let _ = writeln!(out, "Seed: {seed}");
    }
    out.push('\n');

    if log.is_empty() {
        out.push_str("No milestones yet.\n\n");
    }
    for record in log.records() {
        let _ = writeln!(
            out,
            "#{} {} {}",
            record.sequence,
            record.kind.verb(),
            record.primary_name
        );
        let _ = writeln!(out, "    {}: {}", record.kind.label_heading(), record.resolved_label);
        let _ = writeln!(out, "    Time: {}", format_elapsed(record.elapsed_ms));
        out.push('\n');
    }

    let _ = writeln!(out, "{PROGRESS_HEADER}");
    let _ = writeln!(
        out,
        "{}: {}/{}",
        totals.collectible_label,
        log.count(EventKind::Collectible),
        totals.collectible_total
    );
    let _ = writeln!(
        out,
        "{}: {}/{}",
        totals.boss_label,
        log.count(EventKind::Boss),
        totals.boss_total
    );
    out
}

fn parse_count_line(line: &str) -> Option<(usize, usize)> {
    let (_, counts) = line.rsplit_once(':')?;
    let (done, total) = counts.trim().split_once('/')?;
    Some((done.trim().parse().ok()?, total.trim().parse().ok()?))
}

/// Read the progress summary back out of rendered text
pub fn parse_progress(text: &str) -> Option<Progress> {
    let mut lines = text
        .lines()
        .skip_while(|line| line.trim() != PROGRESS_HEADER)
        .skip(1);
    let (collectibles, collectible_total) = parse_count_line(lines.next()?)?;
    let (bosses, boss_total) = parse_count_line(lines.next()?)?;
    Some(Progress {
        collectibles,
        collectible_total,
        bosses,
        boss_total,
    })
}
