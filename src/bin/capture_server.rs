//! Capture server - stands in for the controller's script port.
//!
//! Accepts connections one at a time and prints every program it receives,
//! so exports can be checked on the bench without a robot.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use urbinder::init_logging;
use urbinder_communication::DEFAULT_SCRIPT_PORT;

/// Capture Server - prints motion programs sent to the script port
#[derive(Parser, Debug)]
#[command(name = "capture-server")]
#[command(about = "Prints motion programs sent to the script port", long_about = None)]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_SCRIPT_PORT)]
    port: u16,

    /// Also save each program as <dir>/capture-<n>.urscript
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Read until the client closes the connection
fn receive(mut client: TcpStream) -> Result<String> {
    let mut buffer = Vec::new();
    client.read_to_end(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    if let Some(dir) = &args.out {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let listener = TcpListener::bind((args.bind.as_str(), args.port))
        .with_context(|| format!("Failed to bind {}:{}", args.bind, args.port))?;
    tracing::info!("Waiting for connections on {}", listener.local_addr()?);

    let mut count = 0usize;
    for stream in listener.incoming() {
        let client = match stream {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Accept failed: {}", e);
                continue;
            }
        };

        let peer = client
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());
        tracing::info!("Client connected: {}", peer);

        let program = match receive(client) {
            Ok(program) => program,
            Err(e) => {
                tracing::warn!("Read from {} failed: {}", peer, e);
                continue;
            }
        };

        count += 1;
        println!("----- program {} from {} ({} bytes) -----", count, peer, program.len());
        print!("{}", program);
        println!("----- end of program {} -----", count);

        if let Some(dir) = &args.out {
            let path = dir.join(format!("capture-{}.urscript", count));
            if let Err(e) = std::fs::write(&path, &program) {
                tracing::warn!("Failed to save {}: {}", path.display(), e);
            }
        }
    }

    Ok(())
}
