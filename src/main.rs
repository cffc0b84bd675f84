//! Demonstration entry point: decodes one or more eSEL files named on the
//! command line and logs their decoded params.
//!
//! This mirrors the non-backend, direct-argument-loop mode this codebase's
//! decoder crates expose alongside their TCP work-loop mode; the work-loop
//! mode itself belongs to the out-of-scope input-acquisition/backend layer
//! and is not carried here.
use esel_rs::{Event, Param};
use std::env;
use std::fs;
use tracing::{error, info, warn};
use tracing_subscriber::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let _config = esel_rs::config::Config::new().unwrap_or_default();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        error!("usage: esel-rs <file.esel> [...]");
        return Err("no input files given".into());
    }

    for path in paths {
        info!(%path, "decoding eSEL");
        let bytes = fs::read(&path)?;
        match Event::parse(&bytes) {
            Ok(event) => {
                if let Some(sel) = event.sel_record() {
                    info!(record_id = sel.record_id, "leading SEL record present");
                }
                for section in event.sections() {
                    info!(section = section.name(), "section");
                    for param in section.params() {
                        log_param(param);
                    }
                }
            }
            Err(err) => warn!(%path, error = %err, "failed to decode eSEL"),
        }
    }
    Ok(())
}

fn log_param(param: &Param) {
    match param {
        Param::Blank => {}
        Param::Heading(title) => info!("-- {title} --"),
        _ => info!(name = param.name(), value = %param.value(), "param"),
    }
}
