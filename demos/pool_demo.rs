//! Demo driver: spawn a pool, submit a batch of numbered tasks, wait
//! for them, then tear the pool down.
//!
//! Run with `cargo run --example pool_demo`.

use std::process::exit;
use std::sync::mpsc;

use log::{error, info};
use workpool::{Result, WorkerPool};

const NUM_WORKERS: u32 = 20;
const NUM_TASKS: usize = 1000;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        exit(1);
    }
}

fn run() -> Result<()> {
    let mut pool = WorkerPool::new(NUM_WORKERS)?;
    info!("Pool started with {} workers", pool.worker_count());

    let (tx, rx) = mpsc::channel();
    for i in 0..NUM_TASKS {
        let tx = tx.clone();
        pool.submit(move || {
            info!("Completing task {i}");
            let _ = tx.send(i);
        })?;
    }
    drop(tx);

    // Wait for every task to report in before tearing down.
    let completed = rx.iter().count();
    info!("{completed} tasks completed");

    let abandoned = pool.shutdown()?;
    info!("Pool shut down, {abandoned} tasks abandoned");
    Ok(())
}
