use std::io::Write;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use donor_medians::Config;

/// Logs to stderr at `info` unless `RUST_LOG` says otherwise.
fn init_logging() {
    if env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let level_style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                record.level(),
                record.args()
            )
        })
        .try_init()
        .is_err()
    {
        warn!("Unable to initialize logging -- has it already been initialized?")
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = Config::parse();

    info!("Starting find-political-donors...");
    donor_medians::run(&config)
        .with_context(|| format!("processing {}", config.input.display()))?;
    info!("find-political-donors ran successfully");
    Ok(())
}
