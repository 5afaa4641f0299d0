// src/cli.rs

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Builds a random, non-overlapping queue of clips from a folder of videos.",
    long_about = None
)]
pub struct Cli {
    #[clap(short, long)]
    pub folder: Option<String>,

    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub non_recursive: bool,

    /// Minimum clip length in seconds (overrides CLIP_MIN_SECONDS).
    #[clap(long)]
    pub min: Option<u64>,

    /// Maximum clip length in seconds, exclusive (overrides CLIP_MAX_SECONDS).
    #[clap(long)]
    pub max: Option<u64>,

    /// Seed for reproducible schedules.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Keep the generated queue in generation order.
    #[clap(long, name = "no-shuffle", action = clap::ArgAction::SetTrue)]
    pub no_shuffle: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "clip_queue", "--folder", "~/Videos", "--min", "3", "--max", "9", "--seed", "7",
            "--no-shuffle",
        ]);
        assert_eq!(cli.folder.as_deref(), Some("~/Videos"));
        assert_eq!((cli.min, cli.max, cli.seed), (Some(3), Some(9), Some(7)));
        assert!(cli.no_shuffle);
        assert!(!cli.non_recursive);
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::parse_from(["clip_queue"]);
        assert!(cli.folder.is_none());
        assert!(cli.min.is_none() && cli.max.is_none() && cli.seed.is_none());
        assert!(!cli.no_shuffle);
    }
}
