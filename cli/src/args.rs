use clap::Parser;
use erdtrack_core::TrackerConfig;

/// Startup options; anything given here overrides the saved configuration
#[derive(Debug, Parser)]
#[command(version, about = "Randomizer milestone tracker")]
pub struct Args {
    /// Spoiler document to use instead of searching the spoiler directories
    #[arg(short, long)]
    pub spoiler: Option<String>,

    /// Tracker log path; disables naming the output after the seed
    #[arg(short, long)]
    pub output: Option<String>,

    /// Flag snapshot written by the game-side process
    #[arg(long)]
    pub snapshot: Option<String>,

    /// Milestone catalog replacing the bundled one
    #[arg(long)]
    pub catalog: Option<String>,
}

impl Args {
    pub fn apply(&self, config: &mut TrackerConfig) {
        if let Some(output) = &self.output {
            config.output_path = output.clone();
            config.name_output_by_seed = false;
        }
        if let Some(snapshot) = &self.snapshot {
            config.snapshot_path = snapshot.clone();
        }
        if let Some(catalog) = &self.catalog {
            config.catalog_path = Some(catalog.clone());
        }
    }
}
