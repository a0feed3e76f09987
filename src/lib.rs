#![doc = include_str!("../README.md")]

pub mod config;
pub mod inspector;
pub mod statistics;

use std::{
    fs::File,
    io::{BufReader, stdin},
    path::Path,
};

use anyhow::Result;

use self::{config::Config, inspector::Inspector, statistics::Statistics};

/// In order to let the integration test drive the inspector directly, the
/// whole run is exposed here instead of living in the main function.
pub fn start_inspect(config: &Config) -> Result<Statistics> {
    let mut inspector = Inspector::new(&config.input);

    if config.input.files.is_empty() {
        inspector.read(stdin().lock())?;
    }

    for path in &config.input.files {
        if path == Path::new("-") {
            inspector.read(stdin().lock())?;
        } else {
            log::info!("inspect capture: path={:?}", path);

            inspector.read(BufReader::new(File::open(path)?))?;
        }
    }

    let statistics = inspector.statistics().clone();
    let counts = statistics.counts();
    log::info!(
        "inspect done: packets={}, bytes={}, rtcp={}, rtp={}, unknown={}, errors={}, malformed={}",
        counts.received_pkts,
        counts.received_bytes,
        counts.rtcp_pkts,
        counts.rtp_pkts,
        counts.unknown_pkts,
        counts.error_pkts,
        counts.malformed_lines
    );

    for (kind, count) in statistics.kinds() {
        log::info!("rtcp packet type: kind={:?}, count={}", kind, count);
    }

    Ok(statistics)
}
