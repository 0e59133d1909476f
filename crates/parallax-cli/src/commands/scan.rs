use std::io::{self, Write};

use anyhow::{anyhow, Result};
use tokio::sync::oneshot;
use tracing::info;

use parallax_core::animation::{drive, FrameControl, LoopController};
use parallax_core::random::SeededRandom;
use parallax_core::scan::{ScanDemo, ScanOutcome};
use parallax_core::AppConfig;

pub async fn run(config: &AppConfig, seed: Option<u64>, instant: bool) -> Result<()> {
    let mut demo = ScanDemo::with_settings(
        SeededRandom::from_option(seed),
        config.demo.scan_tick(),
        config.demo.success_probability,
    );
    demo.start();

    let outcome = if instant {
        demo.run_to_completion()
            .ok_or_else(|| anyhow!("Scan did not start"))?
    } else {
        animate(demo).await?
    };

    match outcome {
        ScanOutcome::Success => println!("\rAccess granted          "),
        ScanOutcome::Error => println!("\rAccess denied           "),
    }
    Ok(())
}

/// Tick the scan on the frame driver, printing progress as it goes
async fn animate(mut demo: ScanDemo<SeededRandom>) -> Result<ScanOutcome> {
    let tick = demo.tick_interval();
    let (controller, state) = LoopController::new();
    let (done_tx, done_rx) = oneshot::channel();
    let mut done_tx = Some(done_tx);

    controller.start();
    let driver = tokio::spawn(drive(state, tick, move |_| {
        if let Some(outcome) = demo.tick() {
            if let Some(tx) = done_tx.take() {
                let _ = tx.send(outcome);
            }
            return FrameControl::Finish;
        }
        print!("\rScanning {:>3}%", demo.progress());
        let _ = io::stdout().flush();
        FrameControl::Continue
    }));

    let outcome = done_rx.await?;
    controller.unmount();
    let frames = driver.await?;
    info!(frames, "Scan animation stopped");
    Ok(outcome)
}
