use clap::{Parser, Subcommand};
use erdtrack_cli::{Args, CliContext, commands, logging};
use erdtrack_core::{SpoilerEvent, SpoilerWatcher};
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = logging::init();

    let mut ctx = match CliContext::new(&args) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load milestone catalog");
            return ExitCode::FAILURE;
        }
    };
    let mut watcher = ctx.spawn_watcher();

    let mut ticker = tokio::time::interval(Duration::from_millis(ctx.config.poll_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!(
        snapshot = %ctx.config.snapshot_path,
        output = %ctx.session.output_path().display(),
        "Tracker running"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                ctx.poll();
            }
            Some(event) = next_spoiler_event(&mut watcher) => {
                ctx.on_spoiler_event(event);
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match respond(line, &mut ctx) {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(err) => println!("{err}"),
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    tracing::warn!(error = %e, "Stopped reading commands");
                    stdin_open = false;
                }
            },
            _ = &mut shutdown => break,
        }
    }

    // Flush whatever the last poll could not write
    if let Err(e) = ctx.session.write() {
        tracing::error!(error = %e, "Final log write failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn next_spoiler_event(watcher: &mut Option<SpoilerWatcher>) -> Option<SpoilerEvent> {
    match watcher {
        Some(watcher) => watcher.next_event().await,
        None => std::future::pending().await,
    }
}

#[derive(Parser)]
#[command(no_binary_name = true, about = "Tracker commands")]
struct Repl {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new run, clearing progress and the log
    Reset,
    /// Reload the spoiler document
    Reload,
    /// Show spoiler, snapshot and progress status
    Status,
    Exit,
}

fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let args = shlex::split(line).ok_or("error: Invalid quoting")?;
    let repl = Repl::try_parse_from(args).map_err(|e| e.to_string())?;

    match repl.command {
        Commands::Reset => commands::reset(ctx)?,
        Commands::Reload => commands::reload(ctx)?,
        Commands::Status => commands::status(ctx)?,
        Commands::Exit => {
            commands::exit();
            return Ok(true);
        }
    }
    Ok(false)
}
