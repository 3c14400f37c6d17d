//! URBinder command line tool.
//!
//! - `urbinder animation <dump.json>` - send an armature animation
//! - `urbinder toolpath <segments.json>` - send a drawing
//!
//! Both commands accept `--dry-run` to print the program instead of
//! contacting the robot.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use urbinder::{
    init_logging, load_segments, AnimationPipeline, Config, Exporter, ExportListener,
    JsonAnimationSource, ToolpathPipeline, TracingListener, BUILD_DATE, VERSION,
};
use urbinder_communication::{RobotConnection, TcpConnector};
use urbinder_motion::{AngleTrace, AnimationSource};
use urbinder_script::MotionProgram;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// URBinder
///
/// Send armature animations and drawings to a robot arm.
#[derive(Parser, Debug)]
#[command(name = "urbinder")]
#[command(about = "Send animations and drawings to a robot arm", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Robot host, overrides the configuration
    #[arg(long, global = true)]
    host: Option<String>,

    /// Robot script port, overrides the configuration
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Also write the program text to this file
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Print the program instead of sending it; nothing is written to disk
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an animation dump into a servo program
    Animation {
        /// JSON dump of per-frame bone orientations
        input: PathBuf,

        /// Repeat the animation until the program is stopped
        #[arg(long = "loop")]
        loop_animation: bool,

        /// Also write the corrected joint angles to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Convert mesh edge segments into a drawing program
    Toolpath {
        /// JSON list of `[[x, y, z], [x, y, z]]` segments
        input: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    let mut config = Config::load_or_create(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(host) = &cli.host {
        config.robot.host = Some(host.clone());
    }
    if let Some(port) = cli.port {
        config.robot.script_port = port;
    }
    if let Some(log) = &cli.log {
        config.export.script_log = Some(log.clone());
    }
    if let Commands::Animation {
        loop_animation,
        json,
        ..
    } = &cli.command
    {
        if *loop_animation {
            config.animation.loop_animation = true;
        }
        if let Some(json) = json {
            config.export.trace_json = Some(json.clone());
        }
    }

    Ok(config)
}

/// Run the selected pipeline against its input file
fn build_program(
    command: &Commands,
    config: &mut Config,
    listener: &dyn ExportListener,
) -> Result<(MotionProgram, Option<AngleTrace>)> {
    match command {
        Commands::Animation { input, .. } => {
            let source = JsonAnimationSource::from_file(input)
                .with_context(|| format!("Failed to read animation {}", input.display()))?;

            // The dump is the render range
            let frames = source.frame_range();
            config.animation.frame_start = frames.start;
            config.animation.frame_end = frames.end;
            config.validate()?;

            let export = AnimationPipeline::new(config, listener).run(&source)?;
            Ok((export.program, Some(export.trace)))
        }
        Commands::Toolpath { input } => {
            config.validate()?;
            let segments = load_segments(input)
                .with_context(|| format!("Failed to read segments {}", input.display()))?;

            let export = ToolpathPipeline::new(config, listener).run(&segments)?;
            Ok((export.program, None))
        }
    }
}

/// Print the program on a dry run, otherwise persist and send it
fn deliver(
    dry_run: bool,
    config: &Config,
    program: &MotionProgram,
    trace: Option<&AngleTrace>,
    listener: &dyn ExportListener,
    out: &mut dyn Write,
) -> Result<()> {
    if dry_run {
        write!(out, "{}", program)?;
        return Ok(());
    }

    let exporter = Exporter::new(&config.export, listener);
    exporter.persist(program, trace)?;

    tracing::info!(
        "Setup robot at {}:{}",
        config.robot.host.as_deref().unwrap_or("<unset>"),
        config.robot.script_port
    );

    let mut connection = RobotConnection::new(
        TcpConnector::new().with_connect_timeout(CONNECT_TIMEOUT),
        config.robot.host.clone(),
        config.robot.script_port,
    );
    exporter.send(program, &mut connection)?;
    connection.disconnect();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    tracing::debug!("urbinder {} (built {})", VERSION, BUILD_DATE);

    let mut config = load_config(&cli)?;
    let listener = TracingListener;

    let (program, trace) = build_program(&cli.command, &mut config, &listener)?;
    deliver(
        cli.dry_run,
        &config,
        &program,
        trace.as_ref(),
        &listener,
        &mut std::io::stdout().lock(),
    )
}
