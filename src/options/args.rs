// Argument parsing via clap.
//
// Note that you probably want to keep this as a single file so the build script doesn't
// trip all over itself.

use clap::*;
use indoc::indoc;

const TEMPLATE: &str = indoc! {
    "{name} {version}

    {about}

    {usage-heading} {usage}

    {all-args}"
};

const USAGE: &str = "qubeley [OPTIONS]";

/// The arguments for qubeley.
#[derive(Parser, Debug)]
#[command(
    name = crate_name!(),
    version = crate_version!(),
    about = crate_description!(),
    disable_help_flag = true,
    disable_version_flag = true,
    color = ColorChoice::Auto,
    help_template = TEMPLATE,
    override_usage = USAGE,
)]
pub struct Args {
    #[command(flatten)]
    pub general_args: GeneralArgs,

    #[command(flatten)]
    pub cpu_args: CpuArgs,

    #[command(flatten)]
    pub logging_args: LoggingArgs,

    #[command(flatten)]
    pub other_args: OtherArgs,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "General Options")]
pub struct GeneralArgs {
    #[arg(
        short = 'C',
        long,
        value_name = "PATH",
        help = "Sets the location of the config file.",
        long_help = "Sets the location of the config file. Expects a config file in the TOML format. \
                    Without this, the default location is read if a file exists there."
    )]
    pub config_location: Option<String>,

    #[arg(
        short = 'n',
        long,
        value_name = "COUNT",
        help = "Stops after this many records.",
        long_help = "Stops after this many records have been written. By default, qubeley runs until interrupted.",
        conflicts_with = "once"
    )]
    pub count: Option<u64>,

    #[arg(
        long,
        help = "Collects a single record and exits.",
        long_help = "Collects a single record, writes it, and exits. A failed collection results in a non-zero exit code."
    )]
    pub once: bool,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "CPU Options")]
pub struct CpuArgs {
    #[arg(
        short = 'i',
        long,
        value_name = "TIME",
        help = "Sets how often CPU metrics are collected.",
        long_help = "Sets how often CPU metrics are collected. Takes a number in milliseconds or a human-readable \
                    duration (e.g. 5s). Defaults to 5s."
    )]
    pub interval: Option<String>,

    #[arg(
        short = 'w',
        long,
        value_name = "TIME",
        help = "Sets how long each CPU usage sample is measured over.",
        long_help = "Sets how long each CPU usage sample is measured over. Takes a number in milliseconds or a \
                    human-readable duration (e.g. 1s). Collection blocks for this long. Defaults to 1s, and \
                    cannot exceed the interval."
    )]
    pub sample_window: Option<String>,

    #[arg(
        long,
        help = "Collects per-core CPU usage.",
        conflicts_with = "no_per_core"
    )]
    pub per_core: bool,

    #[arg(long, help = "Skips collecting per-core CPU usage.")]
    pub no_per_core: bool,
}

#[derive(Args, Clone, Debug, Default)]
#[command(next_help_heading = "Logging Options")]
pub struct LoggingArgs {
    #[arg(
        long,
        value_name = "PATH",
        help = "Writes logs to a file instead of stderr."
    )]
    pub log_file: Option<String>,

    #[arg(
        long,
        value_name = "LEVEL",
        help = "Sets the minimum log level.",
        long_help = "Sets the minimum log level. One of 'off', 'error', 'warn', 'info', 'debug', or 'trace'. \
                    Defaults to 'info'."
    )]
    pub log_level: Option<String>,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Other Options")]
pub struct OtherArgs {
    #[arg(short='h', long, action=ArgAction::Help, help="Prints help info (for more details use `--help`.")]
    help: (),

    #[arg(short='V', long, action=ArgAction::Version, help="Prints version information.")]
    version: (),
}

/// Returns a clap [`Command`].
pub fn build_cmd() -> Command {
    Args::command()
}
