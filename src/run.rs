//! Drives a headless canvas through one layout command.

#[cfg(test)]
#[path = "run_test.rs"]
mod run_test;

use std::time::Duration;

use canvas::collection::Collection;
use canvas::config::CanvasConfig;
use canvas::engine::EngineCore;
use canvas::geom::Size;
use canvas::headless::{HeadlessHost, Scene};
use canvas::jitter::Jitter;
use tracing::{debug, info};

use crate::CliError;
use crate::config::RunConfig;

/// A layout command to apply after the opening spread-out settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Leave the opening spread-out as is.
    Settle,
    /// Scatter every card again.
    Spread { stagger_ms: u64 },
    /// Pack cards into a grid.
    Organize,
    /// Select one card.
    Select(String),
}

/// Runs a [`HeadlessHost`], optionally pacing scheduled tasks on the wall clock.
pub struct Runner {
    host: HeadlessHost,
    realtime: bool,
}

impl Runner {
    #[must_use]
    pub fn new(mut config: CanvasConfig, run: &RunConfig, realtime: bool) -> Self {
        if let Some(stagger_ms) = run.stagger_ms {
            config.stagger_ms = stagger_ms;
        }
        let seed = run.seed_or_clock();
        debug!(seed, width = run.width, height = run.height, "starting headless canvas");
        let core = EngineCore::new(config, Jitter::seeded(seed));
        Self { host: HeadlessHost::new(core, Size::new(run.width, run.height)), realtime }
    }

    /// Load `collection`, apply `layout` and return the settled scene.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::UnknownCard`] when selecting a card the collection
    /// does not contain.
    pub async fn execute(mut self, collection: Collection, layout: Layout) -> Result<Scene, CliError> {
        info!(collection = %collection.key, cards = collection.len(), "loading collection");
        self.host.load(collection);
        self.settle().await;

        match layout {
            Layout::Settle => {}
            Layout::Spread { stagger_ms } => self.host.handle(|core, _| core.spread_out(stagger_ms)),
            Layout::Organize => self.host.handle(|core, stage| core.organize(stage)),
            Layout::Select(id) => {
                if self.host.core().card(&id).is_none() {
                    return Err(CliError::UnknownCard(id));
                }
                self.host.handle(|core, stage| core.select(&id, stage));
            }
        }
        self.settle().await;
        Ok(self.host.scene())
    }

    async fn settle(&mut self) {
        while let Some(due_ms) = self.host.next_due_ms() {
            if self.realtime {
                let wait = due_ms.saturating_sub(self.host.now_ms());
                if wait > 0 {
                    tokio::time::sleep(Duration::from_millis(wait)).await;
                }
            }
            self.host.step();
        }
        debug!(now_ms = self.host.now_ms(), actions = self.host.dispatched(), "scene settled");
    }
}
