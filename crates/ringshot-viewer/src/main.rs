mod shaders;
mod viewer;

use anyhow::{Context, Result};

use ringshot_engine::device::GpuInit;
use ringshot_engine::logging::{init_logging, LoggingConfig};
use ringshot_engine::window::Runtime;

use crate::viewer::{Viewer, ViewerConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = ViewerConfig::default();

    // Shader faults abort before any window exists.
    let program = shaders::spoke_program().context("failed to build spoke program")?;
    let runtime = config.runtime();
    let viewer = Viewer::new(config, program)?;

    log::info!("arrow keys move the pattern; Escape or Q quits");

    Runtime::run(runtime, GpuInit::default(), viewer)
}
