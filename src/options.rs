//! How to handle config files and arguments.
//!
//! Arguments take precedence over the config file, which takes precedence
//! over the defaults.

pub mod args;
pub mod config;
mod error;

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

pub use error::{OptionError, OptionResult};

use self::{
    args::Args,
    config::{Config, StringOrNum},
};
use crate::collection::cpu::{DEFAULT_INTERVAL, DEFAULT_SAMPLE_WINDOW};

/// Where the config file lives, relative to the platform config directory.
pub const DEFAULT_CONFIG_FILE_LOCATION: &str = "qubeley/qubeley.toml";

/// Settings for the CPU collector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CpuOptions {
    pub interval: Duration,
    pub sample_window: Duration,
    pub collect_per_core: bool,
}

/// Settings for the logger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingOptions {
    pub level: log::LevelFilter,
    pub file: Option<PathBuf>,
}

/// Everything the agent needs to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentOptions {
    pub cpu: CpuOptions,
    pub logging: LoggingOptions,
    /// How many records to write before stopping. `None` runs until interrupted.
    pub count: Option<u64>,
}

/// Returns the config path to use. If `override_config_path` is specified,
/// then we will use that. If not, then return the default location, if the
/// platform has one.
pub fn get_config_path(override_config_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(conf_loc) = override_config_path {
        return Some(conf_loc.to_path_buf());
    }

    dirs::config_dir().map(|path| path.join(DEFAULT_CONFIG_FILE_LOCATION))
}

/// Reads the config file at `path`.
///
/// A missing file at the default location just means defaults, but a missing
/// file that was explicitly asked for is an error.
pub fn get_config(path: Option<&Path>, explicit: bool) -> OptionResult<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    match fs::read_to_string(path) {
        Ok(config_string) => Ok(toml_edit::de::from_str(&config_string)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
            Ok(Config::default())
        }
        Err(err) => Err(OptionError::config(format!(
            "unable to read '{}': {err}",
            path.display()
        ))),
    }
}

/// Reads the config file selected by `args`.
pub fn get_config_from_args(args: &Args) -> OptionResult<Config> {
    let override_path = args.general_args.config_location.as_deref().map(Path::new);
    let path = get_config_path(override_path);

    get_config(path.as_deref(), override_path.is_some())
}

/// Merges `args` and `config` into [`AgentOptions`].
pub fn init_agent_options(args: &Args, config: &Config) -> OptionResult<AgentOptions> {
    let cpu = get_cpu_options(args, config)?;
    let logging = get_logging_options(args, config)?;
    let count = get_count(args)?;

    Ok(AgentOptions {
        cpu,
        logging,
        count,
    })
}

/// Where a setting came from, for error reporting.
#[derive(Clone, Copy)]
enum Source<'a> {
    Arg(&'a str),
    Config(&'a str),
}

impl Source<'_> {
    fn invalid_value(self) -> OptionError {
        match self {
            Source::Arg(name) => OptionError::invalid_arg_value(name),
            Source::Config(name) => OptionError::invalid_config_value(name),
        }
    }

    fn error(self, reason: &str) -> OptionError {
        match self {
            Source::Arg(name) => OptionError::arg(format!("'--{name}' {reason}")),
            Source::Config(name) => OptionError::config(format!("'{name}' {reason}")),
        }
    }
}

/// Picks the argument if given, then the config value, along with where it came from.
fn pick<'a>(
    arg: Option<&'a str>, config: Option<&'a StringOrNum>, arg_name: &'a str,
    config_name: &'a str,
) -> Option<(StringOrNum, Source<'a>)> {
    match (arg, config) {
        (Some(value), _) => Some((StringOrNum::String(value.to_string()), Source::Arg(arg_name))),
        (None, Some(value)) => Some((value.clone(), Source::Config(config_name))),
        (None, None) => None,
    }
}

/// Parses a duration given as milliseconds or as a human-readable string.
fn parse_duration(value: &StringOrNum, source: Source<'_>) -> OptionResult<Duration> {
    let duration = match value {
        StringOrNum::Num(ms) => Duration::from_millis(*ms),
        StringOrNum::String(s) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => humantime::parse_duration(s).map_err(|_| source.invalid_value())?,
            }
        }
    };

    if duration.is_zero() {
        return Err(source.error("must be greater than 0."));
    }

    Ok(duration)
}

fn get_cpu_options(args: &Args, config: &Config) -> OptionResult<CpuOptions> {
    let cpu_args = &args.cpu_args;

    let (interval, interval_source) = match pick(
        cpu_args.interval.as_deref(),
        config.cpu.interval.as_ref(),
        "interval",
        "cpu.interval",
    ) {
        Some((value, source)) => (parse_duration(&value, source)?, Some(source)),
        None => (DEFAULT_INTERVAL, None),
    };

    let (sample_window, window_source) = match pick(
        cpu_args.sample_window.as_deref(),
        config.cpu.sample_window.as_ref(),
        "sample-window",
        "cpu.sample_window",
    ) {
        Some((value, source)) => (parse_duration(&value, source)?, Some(source)),
        None => (DEFAULT_SAMPLE_WINDOW, None),
    };

    if sample_window > interval {
        // Blame whichever of the two was actually set.
        return Err(match (window_source, interval_source) {
            (None, Some(source)) => source.error("cannot be shorter than the sample window."),
            (Some(source), _) => source.error("cannot be longer than the collection interval."),
            (None, None) => OptionError::other("the default sample window exceeds the default interval."),
        });
    }

    let collect_per_core = if cpu_args.per_core {
        true
    } else if cpu_args.no_per_core {
        false
    } else {
        config.cpu.per_core.unwrap_or(true)
    };

    Ok(CpuOptions {
        interval,
        sample_window,
        collect_per_core,
    })
}

fn get_logging_options(args: &Args, config: &Config) -> OptionResult<LoggingOptions> {
    let logging_args = &args.logging_args;

    let level = match (&logging_args.log_level, &config.logging.level) {
        (Some(level), _) => log::LevelFilter::from_str(level)
            .map_err(|_| OptionError::invalid_arg_value("log-level"))?,
        (None, Some(level)) => log::LevelFilter::from_str(level)
            .map_err(|_| OptionError::invalid_config_value("logging.level"))?,
        (None, None) => log::LevelFilter::Info,
    };

    let file = logging_args
        .log_file
        .as_ref()
        .or(config.logging.file.as_ref())
        .map(PathBuf::from);

    Ok(LoggingOptions { level, file })
}

fn get_count(args: &Args) -> OptionResult<Option<u64>> {
    let general_args = &args.general_args;

    if general_args.once {
        return Ok(Some(1));
    }

    match general_args.count {
        Some(0) => Err(OptionError::arg("'--count' must be greater than 0.")),
        count => Ok(count),
    }
}
