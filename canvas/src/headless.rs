//! A host that runs the engine without a browser.
//!
//! [`HeadlessHost`] plays the part the page plays in production: it measures a
//! fixed-size stage, applies every [`Action`] the engine returns, completes
//! animations as soon as they are requested, and runs scheduled tasks on the
//! virtual clock of a [`TaskQueue`]. The resulting [`Scene`] is what the cards
//! would look like once every animation has settled.

#[cfg(test)]
#[path = "headless_test.rs"]
mod headless_test;

use std::collections::VecDeque;

use serde::Serialize;
use tracing::{debug, trace};

use crate::card::AnimationTicket;
use crate::collection::{CardId, Collection};
use crate::engine::{Action, EngineCore, Measure, Task};
use crate::geom::{Rect, Size};
use crate::schedule::TaskQueue;

/// The measurable surface of a headless run.
///
/// Cards have no rendered box, so the engine sizes them from their declared
/// dimensions.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    container: Option<Rect>,
}

impl Stage {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self { container: Some(Rect::new(0.0, 0.0, size.width, size.height)) }
    }
}

impl Measure for Stage {
    fn container_box(&self) -> Option<Rect> {
        self.container
    }

    fn card_box(&self, _id: &str) -> Option<Rect> {
        None
    }
}

/// One card as it would appear once settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneCard {
    pub id: CardId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
    pub z: u32,
}

/// Snapshot of every mounted card, in collection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub collection: Option<String>,
    pub selected: Option<CardId>,
    pub now_ms: u64,
    pub cards: Vec<SceneCard>,
}

/// Drives an [`EngineCore`] on a virtual clock.
pub struct HeadlessHost {
    core: EngineCore,
    stage: Stage,
    queue: TaskQueue<Task>,
    dispatched: usize,
}

impl HeadlessHost {
    #[must_use]
    pub fn new(core: EngineCore, size: Size) -> Self {
        Self { core, stage: Stage::new(size), queue: TaskQueue::new(), dispatched: 0 }
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.queue.now_ms()
    }

    /// When the next scheduled task is due, if any.
    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.queue.next_due_ms()
    }

    /// Number of actions applied so far.
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Run an engine handler against this host's stage and apply its actions.
    ///
    /// ```ignore
    /// host.handle(|core, stage| core.organize(stage));
    /// ```
    pub fn handle<F>(&mut self, handler: F)
    where
        F: FnOnce(&mut EngineCore, &Stage) -> Vec<Action>,
    {
        let actions = handler(&mut self.core, &self.stage);
        self.apply(actions);
    }

    /// Load a collection and queue its opening spread-out.
    pub fn load(&mut self, collection: Collection) {
        self.handle(|core, _| core.load_collection(collection));
    }

    /// Run the earliest scheduled task, moving the clock to its due time.
    ///
    /// Returns the time the task ran at, or `None` when nothing is queued.
    pub fn step(&mut self) -> Option<u64> {
        let (now_ms, task) = self.queue.pop_next()?;
        trace!(now_ms, ?task, "running task");
        self.handle(|core, stage| core.run_task(&task, stage));
        Some(now_ms)
    }

    /// Advance the clock by `ms`, running every task that falls due.
    pub fn advance(&mut self, ms: u64) {
        self.queue.advance(ms);
        while let Some(task) = self.queue.pop_due() {
            self.handle(|core, stage| core.run_task(&task, stage));
        }
    }

    /// Run scheduled tasks until the queue is empty.
    pub fn run_until_idle(&mut self) {
        let mut steps = 0usize;
        while self.step().is_some() {
            steps += 1;
        }
        debug!(steps, now_ms = self.now_ms(), "headless host idle");
    }

    /// The settled state of every mounted card.
    #[must_use]
    pub fn scene(&self) -> Scene {
        let cards = self
            .core
            .cards()
            .iter()
            .filter_map(|card| {
                let transform = self.core.transform(&card.id)?;
                let size = self.core.card_size(&card.id)?;
                let z = self.core.zorder().get(&card.id).map_or(1, |entry| entry.z);
                Some(SceneCard {
                    id: card.id.clone(),
                    x: transform.x,
                    y: transform.y,
                    width: size.width,
                    height: size.height,
                    rotation: transform.rotation,
                    scale: transform.scale,
                    opacity: transform.opacity,
                    z,
                })
            })
            .collect();
        Scene {
            collection: self.core.collection_key().map(str::to_owned),
            selected: self.core.selection().map(str::to_owned),
            now_ms: self.now_ms(),
            cards,
        }
    }

    /// Apply actions, completing each animation immediately and applying
    /// whatever the completion produces in turn.
    fn apply(&mut self, actions: Vec<Action>) {
        let mut work: VecDeque<Action> = actions.into();
        let mut completions: VecDeque<(CardId, AnimationTicket)> = VecDeque::new();
        loop {
            while let Some(action) = work.pop_front() {
                self.dispatched += 1;
                match action {
                    Action::Animate { id, ticket, .. } => completions.push_back((id, ticket)),
                    Action::Schedule { delay_ms, task } => self.queue.schedule(delay_ms, task),
                    Action::SetZ { id, z } => trace!(card_id = %id, z, "z applied"),
                    Action::SetSize { id, size } => trace!(card_id = %id, ?size, "size applied"),
                    Action::FocusCard { .. }
                    | Action::SelectionChanged { .. }
                    | Action::ResizeStarted { .. }
                    | Action::ResizeEnded { .. } => {}
                }
            }
            let Some((id, ticket)) = completions.pop_front() else {
                break;
            };
            work.extend(self.core.on_animation_complete(&id, ticket));
        }
    }
}
