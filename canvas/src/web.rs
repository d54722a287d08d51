//! Browser binding: an [`EngineCore`] bound to the DOM element that holds the
//! cards.
//!
//! Card elements are found by their `data-id` attribute. Layout sizes come
//! from `clientWidth`/`clientHeight`, which ignore the card's own transform;
//! spread-out bounds come from `getBoundingClientRect`, relative to the
//! container. Every action list is handed to the page's dispatch callback as
//! JSON; the page owns the animator and timers and calls back into
//! [`Engine::run_task`] and [`Engine::on_animation_complete`].

use js_sys::Function;
use tracing::debug;
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement};

use crate::card::AnimationTicket;
use crate::collection::Collection;
use crate::config::CanvasConfig;
use crate::engine::{Action, EngineCore, Measure, Task};
use crate::geom::{Point, Rect};
use crate::input::{Key, SizeClass};
use crate::jitter::Jitter;

/// Measures the live DOM under a container element.
pub struct DomMeasure<'a> {
    container: &'a HtmlElement,
}

impl<'a> DomMeasure<'a> {
    #[must_use]
    pub fn new(container: &'a HtmlElement) -> Self {
        Self { container }
    }

    fn card_element(&self, id: &str) -> Option<Element> {
        let selector = format!("[data-id=\"{id}\"]");
        match self.container.query_selector(&selector) {
            Ok(element) => element,
            Err(err) => {
                debug!(card_id = %id, ?err, "card lookup failed");
                None
            }
        }
    }
}

impl Measure for DomMeasure<'_> {
    fn container_box(&self) -> Option<Rect> {
        let rect = self.container.get_bounding_client_rect();
        Some(Rect::new(0.0, 0.0, rect.width(), rect.height()))
    }

    fn card_box(&self, id: &str) -> Option<Rect> {
        let element = self.card_element(id)?;
        Some(Rect::new(0.0, 0.0, f64::from(element.client_width()), f64::from(element.client_height())))
    }

    fn card_bounds(&self, id: &str) -> Option<Rect> {
        let origin = self.container.get_bounding_client_rect();
        let rect = self.card_element(id)?.get_bounding_client_rect();
        Some(Rect::new(rect.left() - origin.left(), rect.top() - origin.top(), rect.width(), rect.height()))
    }
}

/// Serialize actions for the page's dispatcher.
///
/// # Errors
///
/// Returns the `serde_json` error if an action cannot be encoded.
pub fn encode_actions(actions: &[Action]) -> Result<JsValue, serde_json::Error> {
    serde_json::to_string(actions).map(|json| JsValue::from_str(&json))
}

/// The canvas engine bound to a card container element.
///
/// Methods that change the scene pass their actions to `dispatch` and return
/// whatever the callback threw.
pub struct Engine {
    container: HtmlElement,
    dispatch: Function,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine for `container` that reports actions to `dispatch`,
    /// seeding placement jitter from `Math.random`.
    #[must_use]
    pub fn new(container: HtmlElement, config: CanvasConfig, dispatch: Function) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        Self { container, dispatch, core: EngineCore::new(config, Jitter::seeded(seed)) }
    }

    fn emit(&self, actions: &[Action]) -> Result<(), JsValue> {
        if actions.is_empty() {
            return Ok(());
        }
        let payload = encode_actions(actions).map_err(|err| JsValue::from_str(&err.to_string()))?;
        self.dispatch.call1(&JsValue::NULL, &payload)?;
        Ok(())
    }

    // --- Data ---

    pub fn load_collection(&mut self, collection: Collection) -> Result<(), JsValue> {
        let actions = self.core.load_collection(collection);
        self.emit(&actions)
    }

    pub fn mount(&mut self, id: &str) -> bool {
        self.core.mount(id)
    }

    pub fn unmount(&mut self, id: &str) -> Result<(), JsValue> {
        let actions = self.core.unmount(id);
        self.emit(&actions)
    }

    /// Reclassify the device from the window's CSS width.
    pub fn set_viewport_width(&mut self, width_css: f64) {
        self.core.set_size_class(SizeClass::from_viewport_width(width_css));
    }

    // --- Gestures ---

    pub fn on_click(&mut self, id: &str) -> Result<(), JsValue> {
        let actions = self.core.on_click(id, &DomMeasure::new(&self.container));
        self.emit(&actions)
    }

    pub fn on_background_click(&mut self) -> Result<(), JsValue> {
        let actions = self.core.on_background_click();
        self.emit(&actions)
    }

    pub fn on_focus(&mut self, id: &str) {
        self.core.on_focus(id);
    }

    pub fn on_key_down(&mut self, key: &str) -> Result<(), JsValue> {
        let actions = self.core.on_key_down(&Key::new(key), &DomMeasure::new(&self.container));
        self.emit(&actions)
    }

    pub fn on_drag_start(&mut self, id: &str) -> Result<(), JsValue> {
        let actions = self.core.on_drag_start(id);
        self.emit(&actions)
    }

    /// Drag finished at the animator's `x`/`y` offset for the card.
    pub fn on_drag_end(&mut self, id: &str, x: f64, y: f64) {
        self.core.on_drag_end(id, Some(Point::new(x, y)));
    }

    pub fn on_drag_transition_end(&mut self) {
        self.core.on_drag_transition_end();
    }

    pub fn on_resize_start(&mut self, id: &str, x: f64, y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_resize_start(id, Point::new(x, y));
        self.emit(&actions)
    }

    pub fn on_resize_move(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        let actions = self.core.on_resize_move(Point::new(x, y));
        self.emit(&actions)
    }

    pub fn on_resize_end(&mut self) -> Result<(), JsValue> {
        let actions = self.core.on_resize_end();
        self.emit(&actions)
    }

    // --- Commands ---

    pub fn organize(&mut self) -> Result<(), JsValue> {
        let actions = self.core.organize(&DomMeasure::new(&self.container));
        self.emit(&actions)
    }

    pub fn spread_out(&mut self) -> Result<(), JsValue> {
        let actions = self.core.spread_out(self.core.config.stagger_ms);
        self.emit(&actions)
    }

    // --- Host callbacks ---

    /// Run a task the page scheduled from an [`Action::Schedule`], passed back
    /// as the JSON it was handed.
    ///
    /// # Errors
    ///
    /// Returns the decode error if `task_json` is not a task, or whatever the
    /// dispatch callback threw.
    pub fn run_task(&mut self, task_json: &str) -> Result<(), JsValue> {
        let task = Task::decode(task_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
        let actions = self.core.run_task(&task, &DomMeasure::new(&self.container));
        self.emit(&actions)
    }

    pub fn on_animation_complete(&mut self, id: &str, ticket: AnimationTicket) -> Result<(), JsValue> {
        let actions = self.core.on_animation_complete(id, ticket);
        self.emit(&actions)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.core.selection()
    }
}
