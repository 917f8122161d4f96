use std::path::PathBuf;

use anyhow::Context;
use backlog_core::GeneratorConfig;
use backlog_core::app::DedupStrategy;
use clap::{Parser, Subcommand, ValueEnum};

/// Command line for the `backlog` binary.
///
/// Every generator option can also come from the environment (or a `.env`
/// file) and from a JSON config file. Precedence: flag, then environment,
/// then `--config`, then the built-in defaults.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "backlog",
    version,
    about = "Generate story documents and keep the backlog in sync"
)]
pub struct CliArgs {
    /// JSON file with generator settings.
    ///
    /// Environment variable: `BACKLOG_CONFIG`
    #[arg(long, env = "BACKLOG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding one document per story.
    ///
    /// Environment variable: `BACKLOG_STORIES_DIR`
    #[arg(long, env = "BACKLOG_STORIES_DIR", global = true)]
    pub stories_dir: Option<PathBuf>,

    /// The tracking document new rows are appended to.
    ///
    /// Environment variable: `BACKLOG_PATH`
    #[arg(long = "backlog", env = "BACKLOG_PATH", global = true)]
    pub backlog_path: Option<PathBuf>,

    /// Number of digits in a story id.
    ///
    /// Environment variable: `BACKLOG_ID_WIDTH`
    #[arg(long, env = "BACKLOG_ID_WIDTH", global = true)]
    pub id_width: Option<usize>,

    /// Status label for new documents and rows.
    ///
    /// Environment variable: `BACKLOG_STATUS`
    #[arg(long, env = "BACKLOG_STATUS", global = true)]
    pub status: Option<String>,

    /// How existing backlog rows are detected.
    ///
    /// Environment variable: `BACKLOG_DEDUP`
    #[arg(long, env = "BACKLOG_DEDUP", value_enum, global = true)]
    pub dedup: Option<DedupArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write one document per story and append the new backlog rows.
    Generate {
        /// JSON array of story records (`-` reads stdin).
        #[arg(short, long)]
        input: PathBuf,

        /// Print the planned documents without writing anything.
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Print the result as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the id the next story would get.
    NextId,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupArg {
    /// Any occurrence of the key in the backlog counts.
    Substring,
    /// Only the first cell of table rows counts.
    RowKeys,
}

impl From<DedupArg> for DedupStrategy {
    fn from(arg: DedupArg) -> Self {
        match arg {
            DedupArg::Substring => DedupStrategy::Substring,
            DedupArg::RowKeys => DedupStrategy::RowKeys,
        }
    }
}

impl TryFrom<&CliArgs> for GeneratorConfig {
    type Error = anyhow::Error;

    fn try_from(args: &CliArgs) -> Result<Self, Self::Error> {
        let mut config = match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                GeneratorConfig::from_json(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => GeneratorConfig::default(),
        };

        if let Some(dir) = &args.stories_dir {
            config.stories_dir = dir.clone();
        }
        if let Some(path) = &args.backlog_path {
            config.backlog_path = path.clone();
        }
        if let Some(width) = args.id_width {
            config.id_width = width;
        }
        if let Some(status) = &args.status {
            config.status_label = status.clone();
        }
        if let Some(dedup) = args.dedup {
            config.dedup = dedup.into();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).expect("valid command line")
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "backlog",
            "--stories-dir",
            "docs/stories",
            "--backlog",
            "docs/backlog.md",
            "--id-width",
            "4",
            "--dedup",
            "row-keys",
            "next-id",
        ]);
        let config = GeneratorConfig::try_from(&args).unwrap();

        assert_eq!(config.stories_dir, PathBuf::from("docs/stories"));
        assert_eq!(config.backlog_path, PathBuf::from("docs/backlog.md"));
        assert_eq!(config.id_width, 4);
        assert_eq!(config.dedup, DedupStrategy::RowKeys);
        assert_eq!(config.status_label, "READY");
    }

    #[test]
    fn generate_subcommand_arguments() {
        let args = parse(&["backlog", "generate", "--input", "stories.json", "--dry-run"]);
        match args.command {
            Command::Generate {
                input,
                dry_run,
                json,
            } => {
                assert_eq!(input, PathBuf::from("stories.json"));
                assert!(dry_run);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_file_is_overridden_by_flags() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("backlog.json");
        std::fs::write(
            &path,
            r#"{ "stories_dir": "from_file", "status_label": "TODO" }"#,
        )
        .unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let args = parse(&[
            "backlog",
            "--config",
            path_arg.as_str(),
            "--stories-dir",
            "from_flag",
            "next-id",
        ]);
        let config = GeneratorConfig::try_from(&args).unwrap();

        assert_eq!(config.stories_dir, PathBuf::from("from_flag"));
        assert_eq!(config.status_label, "TODO");
    }

    #[test]
    fn invalid_width_is_rejected() {
        let args = parse(&["backlog", "--id-width", "0", "next-id"]);
        assert!(GeneratorConfig::try_from(&args).is_err());
    }
}
