/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::Parser;

/***************************************/
/*             Public API              */
/***************************************/
/// Single-cabin elevator control core.
#[derive(Parser, Debug)]
#[clap(name = "elevator-control")]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[clap(short, long, default_value = "config.toml")]
    pub config: String,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[clap(short, long, parse(from_occurrences))]
    pub verbose: u8,

    /// Decrease log verbosity to warnings and errors only.
    #[clap(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Resolves the `-v`/`-q` flags to the `log` crate's filter level.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else {
            match self.verbose {
                0 => log::LevelFilter::Info,
                1 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        }
    }
}
