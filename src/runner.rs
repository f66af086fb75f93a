//! The polling loop the agent binary drives collectors with.

use std::{
    io::Write,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};

use crate::{collection::Collector, record::MetricRecord, utils::cancellation_token::CancellationToken};

/// Writes `record` as a single line of JSON.
pub fn write_record<W: Write + ?Sized>(out: &mut W, record: &MetricRecord) -> Result<()> {
    serde_json::to_writer(&mut *out, record).context("unable to serialize the record")?;
    writeln!(out).context("unable to write the record")?;
    out.flush().context("unable to flush the output")?;

    Ok(())
}

/// Polls `collector` once per interval and writes every record to `out`.
///
/// Stops after `count` records, or once `token` is cancelled. Returns the
/// number of records written.
///
/// A failed collection is logged and retried on the next tick, unless this
/// is a single-shot run (`count == Some(1)`), in which case it is returned.
pub fn run<C: Collector + ?Sized, W: Write + ?Sized>(
    collector: &C, out: &mut W, count: Option<u64>, token: &CancellationToken,
) -> Result<u64> {
    let name = collector.name();
    let interval = collector.interval();
    let mut written = 0;

    log::info!("starting the '{name}' collector with an interval of {interval:?}");

    while !token.is_cancelled() {
        let tick = Instant::now();

        match collector.collect() {
            Ok(record) => {
                write_record(out, &record)?;
                written += 1;
                log::debug!("wrote '{name}' record {written}");
            }
            Err(err) if count == Some(1) => {
                return Err(err).with_context(|| format!("unable to collect '{name}' metrics"));
            }
            Err(err) => {
                log::error!("unable to collect '{name}' metrics: {err}");
            }
        }

        if count.is_some_and(|count| written >= count) {
            break;
        }

        let remaining = interval.saturating_sub(tick.elapsed());
        if remaining > Duration::ZERO && token.sleep_with_cancellation(remaining) {
            break;
        }
    }

    log::info!("stopped the '{name}' collector after {written} record(s)");

    Ok(written)
}
