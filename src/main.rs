//! # Motion Bridge
//!
//! Present an ESP32 motion controller as a virtual Linux input device.
//!
//! The binary registers a uinput device, binds a UDP socket and then runs a
//! single-task receive loop: each datagram is decoded, mapped through the
//! calibration profile and committed as one atomic input frame. Malformed
//! datagrams are counted and skipped; Ctrl+C shuts the loop down cleanly.

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};
use tracing_subscriber;

mod bridge;
mod config;
mod device;
mod error;
mod mapping;
mod telemetry;

use bridge::Bridge;
use config::Config;
use device::{DeviceLayout, Dispatcher, VirtualPad};
use mapping::{CalibrationProfile, DeviceVariant, FrameBuilder};

/// Default configuration file path.
const CONFIG_PATH: &str = "config/default.toml";

/// Number of committed frames between status log messages.
const LOG_INTERVAL_FRAMES: u64 = 1000;

/// Receive buffer size. Telemetry records are well under 100 bytes.
const RECV_BUFFER_SIZE: usize = 1024;

/// Main entry point for the Motion Bridge application
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration (built-in defaults when no file is present)
///    - Register the virtual input device via uinput (fatal on failure)
///    - Bind the UDP listener (fatal on failure)
///
/// 2. **Main Loop**
///    - Block on the next datagram
///    - Decode, map and commit it as one atomic frame; silently count
///      malformed datagrams
///    - Log status every 1000 committed frames
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Graceful Shutdown**
///    - Log frame and drop totals
///    - Release the device handle and socket (dropped on every exit path)
///
/// # Errors
///
/// Returns error if:
/// - The uinput device cannot be registered (permissions, missing module)
/// - The listening port is already bound
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("Motion Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match Config::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(error::MotionBridgeError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No config file at {}, using built-in defaults", CONFIG_PATH);
            Config::default()
        }
        Err(e) => return Err(e).context("failed to load configuration"),
    };

    let variant = DeviceVariant::from_name(&config.device.variant)
        .ok_or_else(|| anyhow!("unknown device variant '{}'", config.device.variant))?;
    let profile = CalibrationProfile::from_config(&config);
    let layout = DeviceLayout::for_variant(variant, &profile.output);

    let pad = VirtualPad::create(&config.device.name, &layout)
        .context("failed to register virtual input device")?;
    let mut dispatcher = Dispatcher::new(pad);

    let bind_addr = format!("{}:{}", config.network.bind_address, config.network.port);
    let socket = tokio::net::UdpSocket::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind UDP listener on {}", bind_addr))?;
    info!("Listening for telemetry on {}", bind_addr);

    let bridge = Bridge::new(FrameBuilder::new(variant, profile));

    info!("Press Ctrl+C to exit");

    let mut buf = [0u8; RECV_BUFFER_SIZE];
    let mut frames: u64 = 0;
    let mut dropped: u64 = 0;
    let mut last_log_count: u64 = 0;

    // Main receive loop. One datagram is decoded, mapped and committed before
    // the next receive begins; there is no queue and no reordering.
    loop {
        tokio::select! {
            result = socket.recv_from(&mut buf) => {
                let len = match result {
                    Ok((len, _addr)) => len,
                    Err(e) => {
                        debug!("recv error: {}", e);
                        continue;
                    }
                };

                // Malformed datagrams are routine under lossy transport:
                // count them, never log per packet.
                match bridge.frame_for(&buf[..len]) {
                    Some(frame) => {
                        dispatcher
                            .commit(&frame)
                            .context("failed to write frame to virtual device")?;
                        frames += 1;

                        if frames - last_log_count >= LOG_INTERVAL_FRAMES {
                            info!("Committed {} frames ({} malformed datagrams dropped)",
                                frames, dropped);
                            last_log_count = frames;
                        }
                    }
                    None => {
                        dropped += 1;
                    }
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!("Total frames committed: {}, datagrams dropped: {}", frames, dropped);
    // Socket and device handles are released when they drop here.
    Ok(())
}
