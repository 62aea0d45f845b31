use anyhow::{Context, Result, ensure};
use pathwise_core::{
    JourneyDriver, JourneyEntry, JourneySnapshot, JourneyStore, JourneyTiming, Stage,
};
use std::sync::Arc;

use super::ScenarioCtx;

/// Walk the whole journey through the tokio driver on a private runtime.
pub fn driver_journey(ctx: &ScenarioCtx) -> Result<JourneySnapshot> {
    let timing = if ctx.realtime {
        ctx.timing
    } else {
        JourneyTiming::instant()
    };
    let store = JourneyStore::new(Arc::clone(&ctx.data), timing);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to build tokio runtime")?;
    runtime.block_on(run(store))
}

async fn run(store: JourneyStore) -> Result<JourneySnapshot> {
    let questions: Vec<(u32, String)> = store
        .data()
        .questions
        .iter()
        .filter_map(|q| q.options.last().map(|o| (q.id, o.clone())))
        .collect();

    let mut driver = JourneyDriver::new(store);
    driver.start_journey(JourneyEntry::Questions).await;
    for (id, answer) in questions {
        driver.select_answer(id, answer).await;
        driver.settle().await;
    }
    ensure!(
        driver.stage().await == Stage::Paths,
        "driver should reach paths, got {}",
        driver.stage().await
    );

    let pick = driver
        .snapshot()
        .await
        .state
        .career_paths
        .get(1)
        .cloned()
        .context("driver produced fewer than two career paths")?;
    driver.select_path(pick).await;
    driver.settle().await;

    let snapshot = driver.snapshot().await;
    ensure!(
        snapshot.state.stage == Stage::Roadmap,
        "driver should reach roadmap, got {}",
        snapshot.state.stage
    );
    ensure!(snapshot.pending.is_none(), "timer still pending after settle");

    driver.reset().await;
    ensure!(driver.stage().await == Stage::Hub, "reset should return to hub");
    Ok(snapshot)
}
