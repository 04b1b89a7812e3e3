// rift-bridge/src/bin/rift_probe.rs

use anyhow::{Context, Result};
use rift_bridge::{BridgeConfig, BridgeHandle, NativeBackend, native};
use rift_core::HexMatcher;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    eprintln!("[rift_probe] RIFT {} (Ctrl+C to exit)", native::version());

    let config = BridgeConfig::from_env();
    let mut bridge =
        BridgeHandle::create(NativeBackend, &config).context("BridgeHandle::create failed")?;
    bridge.initialize().context("BridgeHandle::initialize failed")?;

    // Interactive loop: each stdin line is one pipeline run.
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\n[rift_probe] Ctrl+C received, exiting…");
                break;
            }

            line = lines.next_line() => {
                let Some(line) = line.context("stdin read failed")? else {
                    eprintln!("\n[rift_probe] stdin closed, exiting…");
                    break;
                };

                let trimmed = line.trim();
                if trimmed.eq_ignore_ascii_case("exit") {
                    eprintln!("[rift_probe] exit requested, exiting…");
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                match bridge.execute_pipeline(trimmed) {
                    Ok(()) => println!("ok"),
                    Err(e) => println!("error: {}", e),
                }

                if let Some(m) = HexMatcher::matches(trimmed) {
                    println!("hex anchor: args={} vargs={}", m.alpha, m.numeric);
                }
            }
        }
    }

    bridge.release();
    Ok(())
}
