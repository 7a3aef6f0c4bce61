use erdtrack_core::{EventKind, SourceStatus, SpoilerStatus};

use crate::CliContext;

/// Start a new run: clears progress and the event log, then rewrites the output
pub fn reset(ctx: &mut CliContext) -> Result<(), String> {
    ctx.session.reset()?;
    println!("Tracker reset; log cleared at {}", ctx.session.output_path().display());
    Ok(())
}

pub fn reload(ctx: &mut CliContext) -> Result<(), String> {
    ctx.load_spoiler();
    match ctx.session.spoiler_status() {
        SpoilerStatus::Failed { reason, .. } => Err(format!("Spoiler reload failed: {reason}")),
        status => {
            print_spoiler_status(status);
            Ok(())
        }
    }
}

pub fn status(ctx: &CliContext) -> Result<(), String> {
    let session = &ctx.session;
    let totals = session.progress_totals();
    let log = session.log();

    print_spoiler_status(session.spoiler_status());
    match session.source_status() {
        Some(SourceStatus::Available) => println!("Snapshot: connected ({})", ctx.config.snapshot_path),
        Some(SourceStatus::Unavailable(reason)) => println!("Snapshot: unavailable ({reason})"),
        None => println!("Snapshot: waiting for {}", ctx.config.snapshot_path),
    }
    println!("Output: {}", session.output_path().display());
    println!(
        "{}: {}/{}",
        totals.collectible_label,
        log.count(EventKind::Collectible),
        totals.collectible_total
    );
    println!(
        "{}: {}/{}",
        totals.boss_label,
        log.count(EventKind::Boss),
        totals.boss_total
    );
    if let Some(last) = log.records().last() {
        println!(
            "Last: #{} {} {} ({})",
            last.sequence,
            last.kind.verb(),
            last.primary_name,
            last.resolved_label
        );
    }
    Ok(())
}

pub fn exit() {
    println!("quitting...");
}

fn print_spoiler_status(status: &SpoilerStatus) {
    match status {
        SpoilerStatus::NotLoaded => println!("Spoiler: not loaded"),
        SpoilerStatus::Loaded { path, seed } => println!(
            "Spoiler: {} (seed {})",
            path.display(),
            seed.as_deref().unwrap_or("unknown")
        ),
        SpoilerStatus::Failed { path, reason } => match path {
            Some(path) => println!("Spoiler: {} failed: {reason}", path.display()),
            None => println!("Spoiler: {reason}"),
        },
    }
}
