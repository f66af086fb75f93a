use std::{io::stdout, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use qubeley::{
    collection::{CpuCollector, SysinfoCpuSource},
    options::{args::Args, get_config_from_args, init_agent_options},
    runner,
    utils::cancellation_token::CancellationToken,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let config = get_config_from_args(&args).context("Unable to read the config file.")?;
    let options = init_agent_options(&args, &config)?;

    #[cfg(feature = "logging")]
    {
        qubeley::utils::logging::init_logger(options.logging.level, options.logging.file.as_deref())
            .context("Unable to initialize the logger.")?;
    }

    let collector = CpuCollector::builder(SysinfoCpuSource::new())
        .interval(options.cpu.interval)
        .sample_window(options.cpu.sample_window)
        .collect_per_core(options.cpu.collect_per_core)
        .build();

    log::debug!("collector: {collector:?}");

    let cancellation_token = Arc::new(CancellationToken::default());
    {
        let cancellation_token = cancellation_token.clone();
        ctrlc::set_handler(move || {
            cancellation_token.cancel();
        })
        .context("Unable to set the termination handler.")?;
    }

    let mut out = stdout().lock();
    runner::run(&collector, &mut out, options.count, &cancellation_token)?;

    Ok(())
}
