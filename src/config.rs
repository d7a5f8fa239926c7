use std::path::PathBuf;

use clap::Parser;

use crate::ingest::MalformedPolicy;

#[derive(Parser, Debug)]
#[command(name = "ubcf", about = "Predict a user's rating for an item from its k most similar users")]
pub struct CliArgs {
    /// Ratings file with one `user,item,rating` record per line
    #[arg(long, default_value = "training_data.csv", env = "UBCF_DATA")]
    pub data: PathBuf,

    /// Target user id (1-based)
    #[arg(long, default_value = "1", env = "UBCF_USER")]
    pub user: i64,

    /// Target item id (1-based)
    #[arg(long, default_value = "2", env = "UBCF_ITEM")]
    pub item: i64,

    /// Number of nearest neighbors to average over
    #[arg(short = 'k', long = "neighbors", default_value = "5", env = "UBCF_K")]
    pub k: usize,

    /// Skip unparsable lines instead of aborting
    #[arg(long)]
    pub skip_malformed: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "UBCF_LOG_LEVEL")]
    pub log_level: String,
}

impl CliArgs {
    pub fn malformed_policy(&self) -> MalformedPolicy {
        if self.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["ubcf"]).unwrap();

        assert_eq!(args.data, PathBuf::from("training_data.csv"));
        assert_eq!(args.user, 1);
        assert_eq!(args.item, 2);
        assert_eq!(args.k, 5);
        assert_eq!(args.malformed_policy(), MalformedPolicy::Fail);
    }

    #[test]
    fn test_flags() {
        let args = CliArgs::try_parse_from([
            "ubcf", "--data", "ratings.csv", "--user", "7", "--item", "3", "-k", "2", "--skip-malformed",
        ]).unwrap();

        assert_eq!(args.data, PathBuf::from("ratings.csv"));
        assert_eq!(args.user, 7);
        assert_eq!(args.item, 3);
        assert_eq!(args.k, 2);
        assert_eq!(args.malformed_policy(), MalformedPolicy::Skip);
    }
}
