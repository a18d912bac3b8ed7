//! Turntable viewer.
//!
//! Loads a geometry file and a pair of WGSL shaders, then spins the mesh in a
//! fixed-size window until it is closed or Escape is pressed.
//!
//! ```bash
//! turntable-viewer
//! turntable-viewer path/to/model.obj --vertex-shader vs.wgsl --fragment-shader fs.wgsl
//! turntable-viewer model.obj --fps 30 --log debug
//! ```

mod cli;

use anyhow::Result;
use clap::Parser;

use turntable_engine::device::GpuInit;
use turntable_engine::logging::{init_logging, LoggingConfig};
use turntable_engine::viewer::{ModelViewer, ViewerOptions};
use turntable_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });

    let options = ViewerOptions {
        width: args.width,
        height: args.height,
        ..ViewerOptions::default()
    };

    // Everything that can fail on bad input fails here, before a window opens.
    let viewer = ModelViewer::load(
        &args.model,
        &args.vertex_shader,
        &args.fragment_shader,
        options,
    )?;

    log::info!(
        "spinning {} vertices in a {}x{} window",
        viewer.renderer().draw_count(),
        args.width,
        args.height
    );

    let config = RuntimeConfig {
        title: args.title.clone(),
        initial_size: LogicalSize::new(f64::from(args.width), f64::from(args.height)),
        frame_interval: args.frame_interval(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, GpuInit::default(), viewer)
}
