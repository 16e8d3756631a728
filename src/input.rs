//! Provides a means to read, parse and hold configuration options for sweeps.
use clap::Parser;
use serde_derive::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Block list read when no `--ranges` path is given. When this default
/// is absent on disk the binary seeds it with a commented sample.
pub const DEFAULT_RANGES_FILE: &str = "ranges.txt";

const DEFAULT_SAMPLES_PER_BLOCK: usize = 100;
const DEFAULT_TIMEOUT_SECONDS: u64 = 3;
const DEFAULT_BATCH_SIZE: u16 = 10;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pingsweep",
    version = env!("CARGO_PKG_VERSION"),
    max_term_width = 120,
    help_template = "{bin} {version}\n{about}\n\nUSAGE:\n    {usage}\n\nOPTIONS:\n{options}",
)]
/// Random-sample reachability sweeps across declared IPv4 address blocks.
/// Draws a bounded number of random addresses from each block in the
/// input list and pings them concurrently, reporting which answered.
pub struct Opts {
    /// Path to the newline-delimited block list. One `a.b.c.d/prefix`
    /// block per line; blank lines and `#` comments are ignored.
    #[arg(short, long, default_value = DEFAULT_RANGES_FILE)]
    pub ranges: PathBuf,

    /// How many random candidate addresses to draw from each block.
    #[arg(short, long, default_value_t = DEFAULT_SAMPLES_PER_BLOCK)]
    pub samples: usize,

    /// The timeout in seconds before a probed address is assumed to be
    /// unreachable.
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// The batch size for probing, i.e. how many probes may be in
    /// flight at once within a block.
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: u16,

    /// Greppable mode. Only output the reachable addresses, one per
    /// line. Useful for grep or outputting to a file.
    #[arg(short, long)]
    pub greppable: bool,

    /// Accessible mode. Turns off features which negatively affect
    /// screen readers.
    #[arg(long)]
    pub accessible: bool,

    /// Print the final report as JSON instead of the text summary.
    #[arg(long)]
    pub json: bool,

    /// Whether to ignore the configuration file or not.
    #[arg(short, long)]
    pub no_config: bool,

    /// Custom path to config file
    #[arg(short, long, value_parser)]
    pub config_path: Option<PathBuf>,
}

#[cfg(not(tarpaulin_include))]
impl Opts {
    /// Reads the command line arguments into an Opts struct.
    pub fn read() -> Self {
        Opts::parse()
    }

    /// Merges values found within the user configuration file into the
    /// arguments read from the command line.
    pub fn merge(&mut self, config: &Config) {
        if !self.no_config {
            macro_rules! merge_field {
                ($($field: ident),+) => {
                    $(
                        if let Some(e) = &config.$field {
                            self.$field = e.clone();
                        }
                    )+
                }
            }

            merge_field!(
                ranges, samples, timeout, batch_size, greppable, accessible, json
            );
        }
    }
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            ranges: PathBuf::from(DEFAULT_RANGES_FILE),
            samples: DEFAULT_SAMPLES_PER_BLOCK,
            timeout: DEFAULT_TIMEOUT_SECONDS,
            batch_size: DEFAULT_BATCH_SIZE,
            greppable: false,
            accessible: false,
            json: false,
            no_config: true,
            config_path: None,
        }
    }
}

/// Struct used to deserialize the options specified within our config file.
/// These will be further merged with our command line arguments in order to
/// generate the final Opts struct.
#[cfg(not(tarpaulin_include))]
#[derive(Debug, Deserialize)]
pub struct Config {
    ranges: Option<PathBuf>,
    samples: Option<usize>,
    timeout: Option<u64>,
    batch_size: Option<u16>,
    greppable: Option<bool>,
    accessible: Option<bool>,
    json: Option<bool>,
}

#[cfg(not(tarpaulin_include))]
impl Config {
    /// Reads the configuration file with TOML format and parses it into a
    /// Config struct.
    ///
    /// # Format
    ///
    /// ranges = "blocks.txt"
    /// samples = 50
    /// timeout = 5
    /// batch_size = 20
    /// greppable = true
    ///
    pub fn read(custom_config_path: Option<PathBuf>) -> Self {
        let mut content = String::new();
        let config_path = custom_config_path.unwrap_or_else(default_config_path);
        if config_path.exists() {
            content = match fs::read_to_string(config_path) {
                Ok(content) => content,
                Err(_) => String::new(),
            }
        }

        let config: Config = match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                println!("Found {e} in configuration file.\nAborting sweep.\n");
                std::process::exit(1);
            }
        };

        config
    }
}

/// Constructs default path to config toml
pub fn default_config_path() -> PathBuf {
    let Some(mut config_path) = dirs::home_dir() else {
        panic!("Could not infer config file path.");
    };
    config_path.push(".pingsweep.toml");
    config_path
}
