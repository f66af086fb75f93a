//! CPU stats through sysinfo.

use std::{
    sync::{Mutex, MutexGuard},
    thread,
    time::Duration,
};

use sysinfo::System;

use super::{CpuSource, LoadAvgHarvest};
use crate::collection::error::{CollectionError, CollectionResult};

cfg_if::cfg_if! {
    if #[cfg(target_family = "unix")] {
        fn read_load_average() -> CollectionResult<LoadAvgHarvest> {
            // The API for sysinfo apparently wants you to call it like this, rather than
            // using a &System.
            let sysinfo::LoadAvg { one, five, fifteen } = System::load_average();

            Ok([one, five, fifteen])
        }
    } else {
        // sysinfo reports zeros here rather than failing.
        fn read_load_average() -> CollectionResult<LoadAvgHarvest> {
            Err(CollectionError::Unsupported)
        }
    }
}

struct SysinfoState {
    system: System,
    /// Whether `system` holds usage from a completed sampling window.
    sampled: bool,
}

/// A [`CpuSource`] backed by [`sysinfo`].
///
/// sysinfo computes usage as the difference between two refreshes, so the
/// source keeps its [`System`] around. Calls are serialized by a lock that is
/// held for the whole sampling window.
pub struct SysinfoCpuSource {
    state: Mutex<SysinfoState>,
}

impl Default for SysinfoCpuSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoCpuSource {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SysinfoState {
                system: System::new(),
                sampled: false,
            }),
        }
    }

    fn lock(&self) -> CollectionResult<MutexGuard<'_, SysinfoState>> {
        self.state
            .lock()
            .map_err(|_| CollectionError::other("sysinfo", "the CPU state lock was poisoned"))
    }

    /// Refreshes twice, `window` apart. sysinfo won't produce meaningful
    /// numbers for anything shorter than [`sysinfo::MINIMUM_CPU_UPDATE_INTERVAL`].
    fn sample(state: &mut SysinfoState, window: Duration) {
        state.system.refresh_cpu_usage();
        thread::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL));
        state.system.refresh_cpu_usage();
        state.sampled = true;
    }
}

impl CpuSource for SysinfoCpuSource {
    fn total_utilization(&self, window: Duration) -> CollectionResult<Vec<f64>> {
        let mut state = self.lock()?;
        Self::sample(&mut state, window);

        // No CPUs means sysinfo couldn't read anything, so the global number is meaningless.
        if state.system.cpus().is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![state.system.global_cpu_usage() as f64])
    }

    fn per_core_utilization(&self, window: Duration) -> CollectionResult<Vec<f64>> {
        let mut state = self.lock()?;
        if !window.is_zero() || !state.sampled {
            Self::sample(&mut state, window);
        }

        let cpus = state
            .system
            .cpus()
            .iter()
            .map(|cpu| cpu.cpu_usage() as f64)
            .collect::<Vec<_>>();

        if cpus.is_empty() {
            Err(CollectionError::NoData)
        } else {
            Ok(cpus)
        }
    }

    fn load_average(&self) -> CollectionResult<LoadAvgHarvest> {
        read_load_average()
    }

    fn logical_core_count(&self) -> CollectionResult<usize> {
        let mut state = self.lock()?;
        if state.system.cpus().is_empty() {
            state.system.refresh_cpu_usage();
        }

        match state.system.cpus().len() {
            0 => Err(CollectionError::NoData),
            count => Ok(count),
        }
    }

    fn host_name(&self) -> Option<String> {
        System::host_name().filter(|name| !name.is_empty())
    }
}
