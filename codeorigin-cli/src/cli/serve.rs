//! Serve command - run the HTTP detection API

use crate::config::Config;
use crate::detector::Detector;
use crate::server::{self, AppState};
use anyhow::Result;
use console::style;

/// Run the HTTP server until Ctrl-C
pub fn run(config: &Config) -> Result<()> {
    let addr = config.server.bind_addr();
    let state = AppState::new(Detector::from_config(config));

    eprintln!(
        "{} Serving on {} (Ctrl-C to stop)",
        style("▶").green(),
        style(&addr).cyan()
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::start_server(state, &addr))
}
