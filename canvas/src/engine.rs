//! The card canvas orchestrator.
//!
//! [`EngineCore`] owns the active collection, the z-order registry, one
//! [`CardController`] per mounted card and the selection. Gesture handlers
//! and commands return a list of [`Action`]s for the host to carry out:
//! z-index updates, animation requests, delayed tasks and selection changes.
//! The host reports back through [`EngineCore::run_task`] when a scheduled
//! delay elapses and [`EngineCore::on_animation_complete`] when an animation
//! finishes.
//!
//! Gestures can race against unmounting, so every handler re-checks the card
//! it targets and silently ignores ids it no longer knows.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::card::{Animation, AnimationTicket, CardController, Transform, Transition};
use crate::collection::{Card, CardId, Collection};
use crate::config::CanvasConfig;
use crate::error::CanvasError;
use crate::geom::{GridItem, Point, Rect, Size, arrange_grid, clamp};
use crate::input::{Key, Nav, ResizeState, SizeClass, UiState, wrap_index};
use crate::jitter::Jitter;
use crate::zorder::{ZChange, ZOrder};

/// Bounding-box measurement supplied by the host.
pub trait Measure {
    /// The box cards are laid out in.
    fn container_box(&self) -> Option<Rect>;

    /// The untransformed layout box of a card, or `None` if it has no
    /// element. Centering and organize size cards by this box.
    fn card_box(&self, id: &str) -> Option<Rect>;

    /// The on-screen bounds of a card including its current rotation and
    /// scale. Spread-out keeps these bounds inside the container.
    fn card_bounds(&self, id: &str) -> Option<Rect> {
        self.card_box(id)
    }
}

/// Work the host runs after a delay, then hands back to [`EngineCore::run_task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Task {
    /// Scatter one card as part of a spread-out cascade.
    SpreadOut { id: CardId },
}

impl Task {
    /// Decode a task the host serialized with `serde_json`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidTask`] if `json` is not a task.
    pub fn decode(json: &str) -> Result<Self, CanvasError> {
        serde_json::from_str(json).map_err(|e| CanvasError::InvalidTask(e.to_string()))
    }
}

/// Instructions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Apply a z-index to a card.
    SetZ { id: CardId, z: u32 },
    /// Animate a card to `target`; report completion with `ticket`.
    Animate { id: CardId, ticket: AnimationTicket, target: Transform, transition: Transition },
    /// Run `task` after `delay_ms`.
    Schedule { delay_ms: u64, task: Task },
    /// Move keyboard focus to a card.
    FocusCard { id: CardId },
    /// The selected card changed.
    SelectionChanged { selected: Option<CardId> },
    /// A resize handle was grabbed; capture the pointer.
    ResizeStarted { id: CardId },
    /// Render a card at a new size.
    SetSize { id: CardId, size: Size },
    /// The resize gesture finished; release the pointer.
    ResizeEnded { id: CardId },
}

/// Core engine state. Independent of any browser API so it can be driven by
/// tests, the headless host or the wasm binding alike.
pub struct EngineCore {
    pub config: CanvasConfig,
    pub ui: UiState,
    collection: Option<Collection>,
    zorder: ZOrder,
    controllers: HashMap<CardId, CardController>,
    size_overrides: HashMap<CardId, Size>,
    jitter: Jitter,
    next_ticket: AnimationTicket,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CanvasConfig::default(), Jitter::seeded(0))
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CanvasConfig, jitter: Jitter) -> Self {
        Self {
            config,
            ui: UiState::default(),
            collection: None,
            zorder: ZOrder::new(),
            controllers: HashMap::new(),
            size_overrides: HashMap::new(),
            jitter,
            next_ticket: 1,
        }
    }

    // --- Collection lifecycle ---

    /// Replace the active collection.
    ///
    /// Previous cards are unmounted, the selection and roving focus reset, the
    /// new cards mounted in order, and a spread-out cascade scheduled to reveal
    /// them.
    pub fn load_collection(&mut self, collection: Collection) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged { selected: None });
        }
        self.ui.focus_id = None;
        self.ui.resizing = None;
        self.zorder = ZOrder::new();
        self.controllers.clear();

        debug!(collection = %collection.key, cards = collection.len(), "loading collection");
        let ids: Vec<CardId> = collection.cards.iter().map(|c| c.id.clone()).collect();
        self.collection = Some(collection);
        for id in &ids {
            self.mount(id);
        }
        actions.extend(self.spread_out(self.config.stagger_ms));
        actions
    }

    /// Start tracking a card element. Only cards of the active collection can
    /// be mounted; returns false otherwise or if already mounted.
    pub fn mount(&mut self, id: &str) -> bool {
        if self.card(id).is_none() || self.controllers.contains_key(id) {
            return false;
        }
        self.zorder.register(id);
        self.controllers.insert(id.to_owned(), CardController::new());
        true
    }

    /// Stop tracking a card element, clearing the selection if it was selected.
    pub fn unmount(&mut self, id: &str) -> Vec<Action> {
        self.zorder.unregister(id);
        self.controllers.remove(id);
        if self.ui.focus_id.as_deref() == Some(id) {
            self.ui.focus_id = None;
        }
        if self.ui.resizing.as_ref().is_some_and(|r| r.id == id) {
            self.ui.resizing = None;
        }
        if self.ui.selected_id.as_deref() == Some(id) {
            self.ui.selected_id = None;
            return vec![Action::SelectionChanged { selected: None }];
        }
        Vec::new()
    }

    /// Set the device size class used by resize gestures.
    pub fn set_size_class(&mut self, size_class: SizeClass) {
        self.ui.size_class = size_class;
    }

    // --- Queries ---

    /// The selected card, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.ui.selected_id.as_deref()
    }

    /// Key of the active collection.
    #[must_use]
    pub fn collection_key(&self) -> Option<&str> {
        self.collection.as_ref().map(|c| c.key.as_str())
    }

    /// Cards of the active collection, in collection order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.collection.as_ref().map_or(&[], |c| c.cards.as_slice())
    }

    #[must_use]
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.collection.as_ref()?.get(id)
    }

    #[must_use]
    pub fn is_mounted(&self, id: &str) -> bool {
        self.controllers.contains_key(id)
    }

    /// Last requested transform of a mounted card.
    #[must_use]
    pub fn transform(&self, id: &str) -> Option<Transform> {
        self.controllers.get(id).map(CardController::transform)
    }

    #[must_use]
    pub fn is_focused(&self, id: &str) -> bool {
        self.controllers.get(id).is_some_and(CardController::is_focused)
    }

    #[must_use]
    pub fn zorder(&self) -> &ZOrder {
        &self.zorder
    }

    /// Size a card renders at: its resize override, else its declared size.
    #[must_use]
    pub fn card_size(&self, id: &str) -> Option<Size> {
        if let Some(size) = self.size_overrides.get(id) {
            return Some(*size);
        }
        self.card(id).map(|c| c.size_or(self.config.default_card_size))
    }

    // --- Drag ---

    /// Raise the card and mark it dragging. Drag is disabled while any card
    /// is selected.
    pub fn on_drag_start(&mut self, id: &str) -> Vec<Action> {
        if self.ui.selected_id.is_some() {
            debug!(card_id = %id, "drag ignored while a card is selected");
            return Vec::new();
        }
        if !self.zorder.contains(id) {
            debug!(card_id = %id, "drag on unknown card ignored");
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.raise(id, None, &mut actions);
        self.zorder.set_dragging(id, true);
        actions
    }

    /// Clear the drag flag and record where the card was dropped.
    pub fn on_drag_end(&mut self, id: &str, position: Option<Point>) {
        if !self.zorder.set_dragging(id, false) {
            return;
        }
        if let (Some(position), Some(controller)) = (position, self.controllers.get_mut(id)) {
            controller.drag_to(position);
        }
    }

    /// Drag inertia has settled: no card is dragging any more.
    pub fn on_drag_transition_end(&mut self) {
        self.zorder.clear_dragging();
    }

    // --- Selection ---

    /// A card was clicked.
    pub fn on_click(&mut self, id: &str, measure: &dyn Measure) -> Vec<Action> {
        self.select(id, measure)
    }

    /// The empty canvas area was clicked.
    pub fn on_background_click(&mut self) -> Vec<Action> {
        self.deselect()
    }

    /// Keyboard focus moved to a card.
    pub fn on_focus(&mut self, id: &str) {
        if self.card(id).is_some() {
            self.ui.focus_id = Some(id.to_owned());
        }
    }

    /// Focus, raise and center `id`, unfocusing any previously selected card.
    ///
    /// Rejected while the card is being dragged.
    pub fn select(&mut self, id: &str, measure: &dyn Measure) -> Vec<Action> {
        if !self.controllers.contains_key(id) {
            debug!(card_id = %id, "select on unknown card ignored");
            return Vec::new();
        }
        if self.zorder.is_dragging(id) {
            debug!(card_id = %id, "select rejected: card is dragging");
            return Vec::new();
        }
        if self.ui.selected_id.as_deref() == Some(id) {
            return Vec::new();
        }

        let mut actions = Vec::new();
        if let Some(previous) = self.ui.selected_id.take() {
            self.unfocus_card(&previous, &mut actions);
        }
        self.raise(id, None, &mut actions);

        let container = measure.container_box().map(|r| r.size());
        let element = self.element_size(id, measure);
        let scale = self.config.focus_scale;
        let transition = self.config.transition;
        self.animate(id, &mut actions, |controller, _| controller.center(container, element, scale, transition));

        self.ui.selected_id = Some(id.to_owned());
        self.ui.focus_id = Some(id.to_owned());
        actions.push(Action::SelectionChanged { selected: Some(id.to_owned()) });
        actions
    }

    /// Return the selected card to where it was and clear the selection.
    pub fn deselect(&mut self) -> Vec<Action> {
        let Some(id) = self.ui.selected_id.take() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        self.unfocus_card(&id, &mut actions);
        actions.push(Action::SelectionChanged { selected: None });
        actions
    }

    // --- Keyboard ---

    /// Handle a key press.
    ///
    /// With a card selected, Escape deselects and the arrow keys move the
    /// selection to the neighboring card (wrapping). Otherwise the keys move
    /// keyboard focus between cards and Enter/Space select the focused one.
    pub fn on_key_down(&mut self, key: &Key, measure: &dyn Measure) -> Vec<Action> {
        let Some(nav) = key.nav() else {
            return Vec::new();
        };
        let len = self.cards().len();

        if let Some(selected) = self.ui.selected_id.clone() {
            return match nav {
                Nav::Dismiss => self.deselect(),
                Nav::Previous | Nav::Next => {
                    let target = self
                        .index_of(&selected)
                        .zip(nav.step())
                        .and_then(|(index, step)| wrap_index(index, step, len))
                        .map(|index| self.cards()[index].id.clone());
                    match target {
                        Some(next) => self.select(&next, measure),
                        None => Vec::new(),
                    }
                }
                Nav::First | Nav::Last | Nav::Activate => Vec::new(),
            };
        }

        let current = self.ui.focus_id.as_deref().and_then(|id| self.index_of(id));
        let target = match nav {
            Nav::Dismiss => None,
            Nav::First => (len > 0).then_some(0),
            Nav::Last => len.checked_sub(1),
            Nav::Previous | Nav::Next => match (current, nav.step()) {
                (Some(index), Some(step)) => wrap_index(index, step, len),
                (None, Some(step)) if step > 0 => (len > 0).then_some(0),
                (None, _) => len.checked_sub(1),
                (Some(_), None) => None,
            },
            Nav::Activate => {
                return match self.ui.focus_id.clone() {
                    Some(id) => self.select(&id, measure),
                    None => Vec::new(),
                };
            }
        };

        let Some(index) = target else {
            return Vec::new();
        };
        let id = self.cards()[index].id.clone();
        self.ui.focus_id = Some(id.clone());
        vec![Action::FocusCard { id }]
    }

    // --- Commands ---

    /// Arrange every mounted card into a packed grid.
    ///
    /// Cards are raised in grid order, so the last card placed ends up on top,
    /// and each gets a little rotation jitter: less when its row fit the
    /// container, more when it overflowed.
    ///
    /// The selected card is released first and packed like the others at its
    /// unfocused scale.
    pub fn organize(&mut self, measure: &dyn Measure) -> Vec<Action> {
        let Some(container) = measure.container_box() else {
            debug!("organize skipped: container not measurable");
            return Vec::new();
        };
        let mut actions = Vec::new();
        if let Some(selected) = self.ui.selected_id.take() {
            // The grid move below supersedes the restore animation.
            if let Some(controller) = self.controllers.get_mut(&selected) {
                controller.unfocus(Transition::Instant);
            }
            actions.push(Action::SelectionChanged { selected: None });
        }
        let items: Vec<GridItem> = self
            .cards()
            .iter()
            .filter(|card| self.controllers.contains_key(&card.id))
            .map(|card| GridItem { id: card.id.clone(), size: self.element_size(&card.id, measure) })
            .collect();
        let placements = arrange_grid(container.size(), &items, self.config.grid);

        let base = self.zorder.max_z();
        let transition = self.config.transition;
        for (offset, (placement, item)) in (0u32..).zip(placements.iter().zip(&items)) {
            self.raise(&placement.id, Some(base.saturating_add(offset)), &mut actions);

            let spread = if placement.fit { self.config.organize_jitter_fit } else { self.config.organize_jitter_loose };
            let rotation = self.jitter.symmetric(spread) as f64;
            let position =
                Point::new(placement.center.x - item.size.width / 2.0, placement.center.y - item.size.height / 2.0);
            self.animate(&placement.id, &mut actions, |controller, _| Some(controller.arrange(position, rotation, transition)));
        }
        debug!(cards = items.len(), "organized cards");
        actions
    }

    /// Schedule a cascading spread-out of every card except the selected one.
    ///
    /// Each card waits `k * stagger_ms` after the previous one, so the kth
    /// card (from 0) fires at `stagger_ms * k * (k + 1) / 2`.
    pub fn spread_out(&mut self, stagger_ms: u64) -> Vec<Action> {
        let selected = self.ui.selected_id.as_deref();
        let mut due_ms = 0u64;
        let actions: Vec<Action> = self
            .cards()
            .iter()
            .filter(|card| self.controllers.contains_key(&card.id) && selected != Some(card.id.as_str()))
            .zip(0u64..)
            .map(|(card, k)| {
                due_ms = due_ms.saturating_add(k.saturating_mul(stagger_ms));
                Action::Schedule { delay_ms: due_ms, task: Task::SpreadOut { id: card.id.clone() } }
            })
            .collect();
        debug!(cards = actions.len(), stagger_ms, last_ms = due_ms, "scheduled spread out");
        actions
    }

    /// Run a task whose delay has elapsed.
    pub fn run_task(&mut self, task: &Task, measure: &dyn Measure) -> Vec<Action> {
        match task {
            Task::SpreadOut { id } => self.spread_card(id, measure),
        }
    }

    /// The animator finished the animation identified by `ticket`.
    pub fn on_animation_complete(&mut self, id: &str, ticket: AnimationTicket) -> Vec<Action> {
        let next_ticket = self.allocate_ticket();
        let Some(controller) = self.controllers.get_mut(id) else {
            return Vec::new();
        };
        controller
            .complete(ticket, &mut self.jitter)
            .map(|animation| vec![animate_action(id, next_ticket, animation)])
            .unwrap_or_default()
    }

    // --- Resize ---

    /// A card's resize handle was grabbed at `pointer`.
    pub fn on_resize_start(&mut self, id: &str, pointer: Point) -> Vec<Action> {
        let Some(start_size) = self.card_size(id) else {
            return Vec::new();
        };
        self.ui.resizing =
            Some(ResizeState { id: id.to_owned(), start_pointer: pointer, start_size, factor: self.ui.size_class.factor() });
        vec![Action::ResizeStarted { id: id.to_owned() }]
    }

    /// The pointer moved while a resize handle is held.
    pub fn on_resize_move(&mut self, pointer: Point) -> Vec<Action> {
        let Some(state) = &self.ui.resizing else {
            return Vec::new();
        };
        let raw = state.size_at(pointer);
        let (min, max) = (self.config.min_card_size, self.config.max_card_size);
        let size = Size::new(clamp(min.width, max.width, raw.width), clamp(min.height, max.height, raw.height));
        let id = state.id.clone();
        self.size_overrides.insert(id.clone(), size);
        vec![Action::SetSize { id, size }]
    }

    /// The resize handle was released (or the pointer cancelled).
    pub fn on_resize_end(&mut self) -> Vec<Action> {
        match self.ui.resizing.take() {
            Some(state) => vec![Action::ResizeEnded { id: state.id }],
            None => Vec::new(),
        }
    }

    // --- Internals ---

    fn spread_card(&mut self, id: &str, measure: &dyn Measure) -> Vec<Action> {
        if !self.controllers.contains_key(id) {
            debug!(card_id = %id, "spread skipped: card unmounted");
            return Vec::new();
        }
        let Some(container) = measure.container_box() else {
            debug!(card_id = %id, "spread skipped: container not measurable");
            return Vec::new();
        };
        let element = measure.card_bounds(id).map_or_else(|| self.element_size(id, measure), |r| r.size().non_negative());
        let params = self.config.spread_params();
        let mut actions = Vec::new();
        self.animate(id, &mut actions, |controller, ticket| {
            controller.spread_out(ticket, params, container.size(), element)
        });
        if actions.is_empty() {
            debug!(card_id = %id, "spread skipped: card is focused");
        }
        actions
    }

    fn unfocus_card(&mut self, id: &str, actions: &mut Vec<Action>) {
        let transition = self.config.transition;
        self.animate(id, actions, |controller, _| controller.unfocus(transition));
    }

    fn raise(&mut self, id: &str, forced_z: Option<u32>, actions: &mut Vec<Action>) {
        for ZChange { id, z } in self.zorder.raise_to_top(id, forced_z) {
            trace!(card_id = %id, z, "z change");
            actions.push(Action::SetZ { id, z });
        }
    }

    fn animate<F>(&mut self, id: &str, actions: &mut Vec<Action>, command: F)
    where
        F: FnOnce(&mut CardController, AnimationTicket) -> Option<Animation>,
    {
        let ticket = self.allocate_ticket();
        if let Some(animation) = self.controllers.get_mut(id).and_then(|c| command(c, ticket)) {
            actions.push(animate_action(id, ticket, animation));
        }
    }

    fn allocate_ticket(&mut self) -> AnimationTicket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    fn element_size(&self, id: &str, measure: &dyn Measure) -> Size {
        if let Some(rect) = measure.card_box(id) {
            return rect.size().non_negative();
        }
        let factor = self.ui.size_class.factor();
        self.card_size(id).map_or_else(Size::default, |s| Size::new(s.width * factor, s.height * factor))
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.collection.as_ref()?.index_of(id)
    }
}

fn animate_action(id: &str, ticket: AnimationTicket, animation: Animation) -> Action {
    Action::Animate { id: id.to_owned(), ticket, target: animation.target, transition: animation.transition }
}
