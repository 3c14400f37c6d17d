//! # URBinder
//!
//! Turns armature animation and mesh edges into motion programs for
//! six-axis robot arms and sends them to the controller's script port.
//!
//! ## Architecture
//!
//! URBinder is organized as a workspace with multiple crates:
//!
//! 1. **urbinder-core** - Joint and geometry types, errors, export listener
//! 2. **urbinder-script** - Program text generation and number formatting
//! 3. **urbinder-motion** - Joint angle conversion and angle wrap correction
//! 4. **urbinder-camtools** - Segment stitching and lift-clearance toolpaths
//! 5. **urbinder-communication** - Lazily connected TCP delivery
//! 6. **urbinder-settings** - Configuration files and validation
//! 7. **urbinder** - Pipelines, file sources and the command line tool
//!
//! ## Exports
//!
//! - **Animation**: sample every frame, convert to joint angles, undo angle
//!   wraps, then emit one joint move to the first pose followed by a servo
//!   move per frame
//! - **Toolpath**: stitch mesh edges into polylines, add lift moves between
//!   them, then emit linear moves with the tool output switched on while
//!   drawing

pub mod exporter;
pub mod pipeline;
pub mod source;

pub use exporter::Exporter;
pub use pipeline::{AnimationExport, AnimationPipeline, ToolpathExport, ToolpathPipeline};
pub use source::{load_segments, JsonAnimationSource};

pub use urbinder_core::{
    Error, ExportListener, Joint, JointAngles, NoOpListener, Point3, Result, TracingListener,
};
pub use urbinder_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting, on stderr so program text
///   printed to stdout stays clean
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
