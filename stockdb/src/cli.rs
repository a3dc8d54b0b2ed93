// stockdb/src/cli.rs

/// Structure representing command-line arguments.
#[derive(Debug)]
pub struct Args {
    pub config: Option<std::path::PathBuf>,
    pub data: Option<std::path::PathBuf>,
}

/// Command-line arguments parser using Clap.
///
/// Both arguments are optional: without `--config` the built-in defaults are
/// used, and `--data` overrides the dataset path from the settings file.
impl Args {
    /// Parses command-line arguments using `clap`.
    ///
    /// # Returns
    /// * `Args` - Struct containing parsed arguments.
    pub fn parse() -> Self {
        Self::from_matches(Self::command().get_matches())
    }

    fn command() -> clap::Command {
        clap::Command::new("StockDB")
            .version("0.1.0")
            .about("In-memory daily stock price query tool")
            .arg(
                clap::Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to the settings.json configuration file")
                .num_args(1),
            )
            .arg(
                clap::Arg::new("data")
                .short('d')
                .long("data")
                .help("Path to the CSV dataset, overrides 'data_path' from the settings")
                .num_args(1),
            )
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Args {
            config: matches.get_one::<String>("config").map(std::path::PathBuf::from),
            data: matches.get_one::<String>("data").map(std::path::PathBuf::from),
        }
    }
}
