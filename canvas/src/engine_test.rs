#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use serde_json::json;

use super::*;
use crate::collection::CardSpec;

// =============================================================
// Helpers
// =============================================================

#[derive(Default)]
struct FakeMeasure {
    container: Option<Rect>,
    cards: HashMap<String, Rect>,
    bounds: HashMap<String, Rect>,
}

impl FakeMeasure {
    fn sized(width: f64, height: f64) -> Self {
        Self { container: Some(Rect::new(0.0, 0.0, width, height)), ..Self::default() }
    }
}

impl Measure for FakeMeasure {
    fn container_box(&self) -> Option<Rect> {
        self.container
    }

    fn card_box(&self, id: &str) -> Option<Rect> {
        self.cards.get(id).copied()
    }

    fn card_bounds(&self, id: &str) -> Option<Rect> {
        self.bounds.get(id).copied().or_else(|| self.card_box(id))
    }
}

fn spec(id: &str) -> CardSpec {
    CardSpec {
        id: Some(id.to_owned()),
        title: Some(id.to_uppercase()),
        width: Some(100.0),
        height: Some(80.0),
        ..CardSpec::default()
    }
}

fn deck(ids: &[&str]) -> Collection {
    Collection::from_specs("deck", ids.iter().map(|id| spec(id)).collect()).unwrap()
}

fn loaded(ids: &[&str]) -> EngineCore {
    let mut core = EngineCore::new(CanvasConfig::default(), Jitter::seeded(7));
    core.load_collection(deck(ids));
    core
}

fn screen() -> FakeMeasure {
    FakeMeasure::sized(1000.0, 600.0)
}

fn animations<'a>(actions: &'a [Action], card: &str) -> Vec<(AnimationTicket, &'a Transform, &'a Transition)> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Animate { id, ticket, target, transition } if id == card => Some((*ticket, target, transition)),
            _ => None,
        })
        .collect()
}

fn z_changes(actions: &[Action]) -> Vec<(&str, u32)> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::SetZ { id, z } => Some((id.as_str(), *z)),
            _ => None,
        })
        .collect()
}

fn scheduled(actions: &[Action]) -> Vec<(u64, &str)> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Schedule { delay_ms, task: Task::SpreadOut { id } } => Some((*delay_ms, id.as_str())),
            _ => None,
        })
        .collect()
}

/// Run a full two-phase spread for one card, returning its final transform.
fn settle_spread(core: &mut EngineCore, id: &str, measure: &FakeMeasure) -> Transform {
    let snap = core.run_task(&Task::SpreadOut { id: id.to_owned() }, measure);
    let (ticket, _, _) = animations(&snap, id)[0];
    let scatter = core.on_animation_complete(id, ticket);
    assert_eq!(animations(&scatter, id).len(), 1);
    core.transform(id).unwrap()
}

fn focused_count(core: &EngineCore) -> usize {
    core.cards().iter().filter(|c| core.is_focused(&c.id)).count()
}

// =============================================================
// Collection lifecycle
// =============================================================

#[test]
fn default_core_is_empty() {
    let core = EngineCore::default();
    assert_eq!(core.selection(), None);
    assert_eq!(core.collection_key(), None);
    assert!(core.cards().is_empty());
}

#[test]
fn load_collection_mounts_every_card() {
    let core = loaded(&["a", "b", "c"]);
    assert_eq!(core.collection_key(), Some("deck"));
    assert!(["a", "b", "c"].iter().all(|id| core.is_mounted(id)));
    assert_eq!(core.zorder().len(), 3);
}

#[test]
fn load_collection_schedules_staggered_spread() {
    let mut core = EngineCore::new(CanvasConfig { stagger_ms: 20, ..CanvasConfig::default() }, Jitter::seeded(1));
    let actions = core.load_collection(deck(&["a", "b", "c", "d"]));
    assert_eq!(scheduled(&actions), vec![(0, "a"), (20, "b"), (60, "c"), (120, "d")]);
}

#[test]
fn default_stagger_waits_accumulate() {
    let mut core = loaded(&["a", "b", "c", "d", "e"]);
    let delays: Vec<u64> = scheduled(&core.spread_out(5)).into_iter().map(|(ms, _)| ms).collect();
    assert_eq!(delays, vec![0, 5, 15, 30, 50]);
}

#[test]
fn load_collection_resets_selection() {
    let mut core = loaded(&["a", "b"]);
    core.select("a", &screen());
    let actions = core.load_collection(deck(&["x", "y"]));
    assert!(actions.contains(&Action::SelectionChanged { selected: None }));
    assert_eq!(core.selection(), None);
    assert!(!core.is_mounted("a"));
    assert!(core.is_mounted("x"));
}

#[test]
fn mount_rejects_unknown_and_duplicate_ids() {
    let mut core = loaded(&["a"]);
    assert!(!core.mount("zzz"));
    assert!(!core.mount("a"));
}

#[test]
fn unmount_selected_card_clears_selection() {
    let mut core = loaded(&["a", "b"]);
    core.select("a", &screen());
    let actions = core.unmount("a");
    assert_eq!(actions, vec![Action::SelectionChanged { selected: None }]);
    assert_eq!(core.selection(), None);
    assert!(!core.zorder().contains("a"));
}

#[test]
fn unmount_other_card_keeps_selection() {
    let mut core = loaded(&["a", "b"]);
    core.select("a", &screen());
    assert!(core.unmount("b").is_empty());
    assert_eq!(core.selection(), Some("a"));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_raises_centers_and_reports() {
    let mut core = loaded(&["a", "b", "c"]);
    let actions = core.select("b", &screen());

    assert_eq!(z_changes(&actions), vec![("b", 2)]);
    let anims = animations(&actions, "b");
    assert_eq!(anims.len(), 1);
    let (_, target, transition) = anims[0];
    assert_eq!((target.x, target.y), (450.0, 260.0));
    assert_eq!(target.scale, 1.5);
    assert_eq!(target.rotation, 0.0);
    assert_eq!(*transition, Transition::default());
    assert_eq!(actions.last(), Some(&Action::SelectionChanged { selected: Some("b".into()) }));
    assert_eq!(core.selection(), Some("b"));
}

#[test]
fn select_prefers_measured_card_box() {
    let mut core = loaded(&["a"]);
    let mut measure = screen();
    measure.cards.insert("a".into(), Rect::new(0.0, 0.0, 200.0, 100.0));
    let actions = core.select("a", &measure);
    let (_, target, _) = animations(&actions, "a")[0];
    assert_eq!((target.x, target.y), (400.0, 250.0));
}

#[test]
fn select_without_container_centers_at_origin() {
    let mut core = loaded(&["a"]);
    let actions = core.select("a", &FakeMeasure::default());
    let (_, target, _) = animations(&actions, "a")[0];
    assert_eq!((target.x, target.y), (0.0, 0.0));
    assert_eq!(core.selection(), Some("a"));
}

#[test]
fn select_same_card_twice_is_noop() {
    let mut core = loaded(&["a"]);
    core.select("a", &screen());
    assert!(core.select("a", &screen()).is_empty());
}

#[test]
fn select_unknown_card_is_noop() {
    let mut core = loaded(&["a"]);
    assert!(core.select("ghost", &screen()).is_empty());
    assert_eq!(core.selection(), None);
}

#[test]
fn selecting_another_card_unfocuses_previous() {
    let mut core = loaded(&["a", "b"]);
    core.select("a", &screen());
    let actions = core.select("b", &screen());

    let back = animations(&actions, "a");
    assert_eq!(back.len(), 1);
    assert_eq!(*back[0].1, Transform::default());
    assert!(!core.is_focused("a"));
    assert!(core.is_focused("b"));
    assert_eq!(focused_count(&core), 1);
}

#[test]
fn focus_stays_exclusive_across_many_selections() {
    let mut core = loaded(&["a", "b", "c", "d"]);
    for id in ["a", "c", "b", "d", "a", "a", "c"] {
        core.select(id, &screen());
        assert_eq!(focused_count(&core), 1);
        assert!(core.is_focused(id));
    }
}

#[test]
fn deselect_restores_transform_exactly() {
    let mut core = loaded(&["a"]);
    let measure = screen();
    let before = settle_spread(&mut core, "a", &measure);

    core.select("a", &measure);
    let actions = core.on_background_click();

    assert_eq!(*animations(&actions, "a")[0].1, before);
    assert_eq!(core.transform("a"), Some(before));
    assert_eq!(actions.last(), Some(&Action::SelectionChanged { selected: None }));
}

#[test]
fn background_click_without_selection_is_noop() {
    let mut core = loaded(&["a"]);
    assert!(core.on_background_click().is_empty());
}

#[test]
fn click_selects_card() {
    let mut core = loaded(&["a"]);
    core.on_click("a", &screen());
    assert_eq!(core.selection(), Some("a"));
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_start_raises_and_marks_dragging() {
    let mut core = loaded(&["a", "b"]);
    let actions = core.on_drag_start("b");
    assert_eq!(z_changes(&actions), vec![("b", 2)]);
    assert!(core.zorder().is_dragging("b"));
}

#[test]
fn drag_start_ignored_while_selected() {
    let mut core = loaded(&["a", "b"]);
    core.select("a", &screen());
    assert!(core.on_drag_start("b").is_empty());
    assert!(!core.zorder().is_dragging("b"));
}

#[test]
fn drag_start_on_unknown_card_is_noop() {
    let mut core = loaded(&["a"]);
    assert!(core.on_drag_start("ghost").is_empty());
}

#[test]
fn select_rejected_while_dragging() {
    let mut core = loaded(&["a"]);
    core.on_drag_start("a");
    assert!(core.select("a", &screen()).is_empty());
    assert_eq!(core.selection(), None);

    core.on_drag_end("a", None);
    assert!(!core.select("a", &screen()).is_empty());
}

#[test]
fn drag_end_position_is_restored_after_focus() {
    let mut core = loaded(&["a"]);
    core.on_drag_start("a");
    core.on_drag_end("a", Some(Point::new(30.0, 40.0)));

    core.select("a", &screen());
    let actions = core.deselect();
    let (_, target, _) = animations(&actions, "a")[0];
    assert_eq!((target.x, target.y), (30.0, 40.0));
}

#[test]
fn drag_transition_end_clears_all_flags() {
    let mut core = loaded(&["a", "b"]);
    core.on_drag_start("a");
    core.on_drag_start("b");
    core.on_drag_transition_end();
    assert!(!core.zorder().is_dragging("a"));
    assert!(!core.zorder().is_dragging("b"));
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn arrows_move_selection_and_wrap() {
    let mut core = loaded(&["a", "b", "c"]);
    let measure = screen();
    core.select("c", &measure);

    core.on_key_down(&Key::new("ArrowRight"), &measure);
    assert_eq!(core.selection(), Some("a"));

    core.on_key_down(&Key::new("ArrowLeft"), &measure);
    assert_eq!(core.selection(), Some("c"));

    core.on_key_down(&Key::new("ArrowUp"), &measure);
    assert_eq!(core.selection(), Some("b"));
    assert_eq!(focused_count(&core), 1);
}

#[test]
fn escape_deselects() {
    let mut core = loaded(&["a", "b"]);
    core.select("b", &screen());
    let actions = core.on_key_down(&Key::new("Escape"), &screen());
    assert!(actions.contains(&Action::SelectionChanged { selected: None }));
    assert_eq!(core.selection(), None);
}

#[test]
fn home_and_end_ignored_while_selected() {
    let mut core = loaded(&["a", "b"]);
    core.select("b", &screen());
    assert!(core.on_key_down(&Key::new("Home"), &screen()).is_empty());
    assert_eq!(core.selection(), Some("b"));
}

#[test]
fn roving_focus_moves_without_selection() {
    let mut core = loaded(&["a", "b", "c"]);
    let measure = screen();

    let first = core.on_key_down(&Key::new("ArrowRight"), &measure);
    assert_eq!(first, vec![Action::FocusCard { id: "a".into() }]);

    let last = core.on_key_down(&Key::new("End"), &measure);
    assert_eq!(last, vec![Action::FocusCard { id: "c".into() }]);

    let wrapped = core.on_key_down(&Key::new("ArrowDown"), &measure);
    assert_eq!(wrapped, vec![Action::FocusCard { id: "a".into() }]);

    let home = core.on_key_down(&Key::new("Home"), &measure);
    assert_eq!(home, vec![Action::FocusCard { id: "a".into() }]);
    assert_eq!(core.selection(), None);
}

#[test]
fn previous_without_focus_starts_at_last_card() {
    let mut core = loaded(&["a", "b", "c"]);
    let actions = core.on_key_down(&Key::new("ArrowLeft"), &screen());
    assert_eq!(actions, vec![Action::FocusCard { id: "c".into() }]);
}

#[test]
fn enter_selects_focused_card() {
    let mut core = loaded(&["a", "b"]);
    core.on_focus("b");
    core.on_key_down(&Key::new("Enter"), &screen());
    assert_eq!(core.selection(), Some("b"));
}

#[test]
fn enter_without_focus_is_noop() {
    let mut core = loaded(&["a"]);
    assert!(core.on_key_down(&Key::new(" "), &screen()).is_empty());
}

#[test]
fn unrelated_keys_are_ignored() {
    let mut core = loaded(&["a"]);
    assert!(core.on_key_down(&Key::new("q"), &screen()).is_empty());
}

#[test]
fn keys_on_empty_collection_are_noops() {
    let mut core = loaded(&[]);
    assert!(core.on_key_down(&Key::new("ArrowRight"), &screen()).is_empty());
    assert!(core.on_key_down(&Key::new("End"), &screen()).is_empty());
}

// =============================================================
// Organize
// =============================================================

#[test]
fn organize_packs_cards_into_a_row() {
    let mut core = loaded(&["a", "b", "c"]);
    let actions = core.organize(&screen());

    let xs: Vec<f64> = ["a", "b", "c"].iter().map(|id| animations(&actions, id)[0].1.x).collect();
    assert_eq!(xs, vec![12.0, 124.0, 236.0]);
    for id in ["a", "b", "c"] {
        let target = animations(&actions, id)[0].1;
        assert_eq!(target.y, 12.0);
        assert!((-5.0..=5.0).contains(&target.rotation));
    }
}

#[test]
fn organize_raises_in_grid_order() {
    let mut core = loaded(&["a", "b", "c"]);
    let actions = core.organize(&screen());
    assert_eq!(z_changes(&actions), vec![("a", 2), ("b", 3), ("c", 4)]);
    assert_eq!(core.zorder().stacking_order(), vec!["a", "b", "c"]);
}

#[test]
fn repeated_organize_stays_contiguous() {
    let mut core = loaded(&["a", "b", "c"]);
    core.organize(&screen());
    core.organize(&screen());

    assert_eq!(core.zorder().stacking_order(), vec!["a", "b", "c"]);
    let zs: Vec<u32> = ["a", "b", "c"].iter().filter_map(|id| core.zorder().get(id)).map(|e| e.z).collect();
    assert_eq!(zs, vec![1, 2, 3]);
}

#[test]
fn organize_uses_loose_jitter_when_rows_overflow() {
    let config = CanvasConfig { organize_jitter_fit: 0, organize_jitter_loose: 15, ..CanvasConfig::default() };
    let mut core = EngineCore::new(config, Jitter::seeded(3));
    core.load_collection(deck(&["a", "b"]));

    let roomy = core.organize(&screen());
    assert!(["a", "b"].iter().all(|id| animations(&roomy, id)[0].1.rotation == 0.0));

    let cramped = core.organize(&FakeMeasure::sized(100.0, 60.0));
    assert!(["a", "b"].iter().all(|id| (-15.0..=15.0).contains(&animations(&cramped, id)[0].1.rotation)));
}

#[test]
fn organize_releases_the_selected_card() {
    let mut core = loaded(&["a", "b", "c"]);
    core.select("b", &screen());
    let actions = core.organize(&screen());

    assert!(actions.contains(&Action::SelectionChanged { selected: None }));
    assert_eq!(core.selection(), None);
    assert_eq!(focused_count(&core), 0);

    let moves = animations(&actions, "b");
    assert_eq!(moves.len(), 1);
    let target = moves[0].1;
    assert_eq!((target.x, target.y, target.scale), (124.0, 12.0, 1.0));
    assert_eq!(core.transform("b"), Some(*target));

    assert!(core.deselect().is_empty());
    assert_eq!(core.transform("b"), Some(*target));
}

#[test]
fn organize_without_container_is_noop() {
    let mut core = loaded(&["a"]);
    assert!(core.organize(&FakeMeasure::default()).is_empty());
}

// =============================================================
// Spread out
// =============================================================

#[test]
fn spread_out_skips_selected_card() {
    let mut core = loaded(&["a", "b", "c"]);
    core.select("b", &screen());
    let actions = core.spread_out(10);
    assert_eq!(scheduled(&actions), vec![(0, "a"), (10, "c")]);
}

#[test]
fn spread_task_snaps_then_scatters() {
    let mut core = loaded(&["a"]);
    let measure = screen();

    let snap = core.run_task(&Task::SpreadOut { id: "a".into() }, &measure);
    let (ticket, target, transition) = animations(&snap, "a")[0];
    assert_eq!((target.x, target.y), (450.0, 260.0));
    assert_eq!(*transition, Transition::Instant);

    let scatter = core.on_animation_complete("a", ticket);
    let (_, target, transition) = animations(&scatter, "a")[0];
    assert!((50.0..=850.0).contains(&target.x));
    assert!((50.0..=470.0).contains(&target.y));
    assert!((-15.0..=15.0).contains(&target.rotation));
    assert_eq!(target.opacity, 1.0);
    assert_eq!(*transition, Transition::default());
}

#[test]
fn spread_stays_inside_container_for_many_seeds() {
    let measure = screen();
    for seed in 0..50 {
        let mut core = EngineCore::new(CanvasConfig::default(), Jitter::seeded(seed));
        core.load_collection(deck(&["a", "b"]));
        for id in ["a", "b"] {
            let t = settle_spread(&mut core, id, &measure);
            assert!(t.x >= 50.0 && t.x + 100.0 <= 950.0, "seed {seed}: x {}", t.x);
            assert!(t.y >= 50.0 && t.y + 80.0 <= 550.0, "seed {seed}: y {}", t.y);
        }
    }
}

#[test]
fn focused_card_is_immune_to_spread() {
    let mut core = loaded(&["a", "b"]);
    let measure = screen();
    core.select("a", &measure);
    let centered = core.transform("a");

    assert!(core.run_task(&Task::SpreadOut { id: "a".into() }, &measure).is_empty());
    assert_eq!(core.transform("a"), centered);
}

#[test]
fn focusing_mid_spread_drops_the_scatter() {
    let mut core = loaded(&["a"]);
    let measure = screen();
    let snap = core.run_task(&Task::SpreadOut { id: "a".into() }, &measure);
    let (ticket, _, _) = animations(&snap, "a")[0];

    core.select("a", &measure);
    let centered = core.transform("a");
    assert!(core.on_animation_complete("a", ticket).is_empty());
    assert_eq!(core.transform("a"), centered);
}

#[test]
fn spread_task_for_unmounted_card_is_noop() {
    let mut core = loaded(&["a"]);
    core.unmount("a");
    assert!(core.run_task(&Task::SpreadOut { id: "a".into() }, &screen()).is_empty());
}

#[test]
fn spread_keeps_rendered_bounds_inside_container() {
    let mut core = loaded(&["a"]);
    let mut measure = screen();
    measure.bounds.insert("a".into(), Rect::new(0.0, 0.0, 140.0, 120.0));

    let snap = core.run_task(&Task::SpreadOut { id: "a".into() }, &measure);
    let (ticket, target, _) = animations(&snap, "a")[0];
    assert_eq!((target.x, target.y), (430.0, 240.0));

    let scatter = core.on_animation_complete("a", ticket);
    let target = animations(&scatter, "a")[0].1;
    assert!((50.0..=810.0).contains(&target.x));
    assert!((50.0..=430.0).contains(&target.y));
}

#[test]
fn layout_sizing_ignores_rendered_bounds() {
    let mut core = loaded(&["a"]);
    let mut measure = screen();
    measure.bounds.insert("a".into(), Rect::new(-16.0, -30.0, 312.0, 227.0));

    let organized = core.organize(&measure);
    assert_eq!(animations(&organized, "a")[0].1.x, 12.0);

    let selected = core.select("a", &measure);
    let target = animations(&selected, "a")[0].1;
    assert_eq!((target.x, target.y), (450.0, 260.0));
}

#[test]
fn spread_task_without_container_is_noop() {
    let mut core = loaded(&["a"]);
    assert!(core.run_task(&Task::SpreadOut { id: "a".into() }, &FakeMeasure::default()).is_empty());
}

#[test]
fn stale_or_unknown_completions_are_ignored() {
    let mut core = loaded(&["a"]);
    let snap = core.run_task(&Task::SpreadOut { id: "a".into() }, &screen());
    let (ticket, _, _) = animations(&snap, "a")[0];
    assert!(core.on_animation_complete("a", ticket + 100).is_empty());
    assert!(core.on_animation_complete("ghost", ticket).is_empty());
    assert_eq!(animations(&core.on_animation_complete("a", ticket), "a").len(), 1);
    assert!(core.on_animation_complete("a", ticket).is_empty());
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_follows_pointer_and_clamps() {
    let mut core = loaded(&["a"]);
    let start = core.on_resize_start("a", Point::new(0.0, 0.0));
    assert_eq!(start, vec![Action::ResizeStarted { id: "a".into() }]);

    let grow = core.on_resize_move(Point::new(50.0, 30.0));
    assert_eq!(grow, vec![Action::SetSize { id: "a".into(), size: Size::new(150.0, 110.0) }]);

    let huge = core.on_resize_move(Point::new(9000.0, 9000.0));
    assert_eq!(huge, vec![Action::SetSize { id: "a".into(), size: Size::new(500.0, 400.0) }]);

    let tiny = core.on_resize_move(Point::new(-9000.0, -9000.0));
    assert_eq!(tiny, vec![Action::SetSize { id: "a".into(), size: Size::new(80.0, 60.0) }]);

    assert_eq!(core.on_resize_end(), vec![Action::ResizeEnded { id: "a".into() }]);
    assert_eq!(core.card_size("a"), Some(Size::new(80.0, 60.0)));
    assert!(core.on_resize_move(Point::new(10.0, 10.0)).is_empty());
}

#[test]
fn resize_scales_pointer_travel_by_size_class() {
    let mut core = loaded(&["a"]);
    core.set_size_class(SizeClass::Mobile);
    core.on_resize_start("a", Point::new(0.0, 0.0));
    let actions = core.on_resize_move(Point::new(40.0, 8.0));
    assert_eq!(actions, vec![Action::SetSize { id: "a".into(), size: Size::new(150.0, 90.0) }]);
}

#[test]
fn resize_of_unknown_card_is_noop() {
    let mut core = loaded(&["a"]);
    assert!(core.on_resize_start("ghost", Point::new(0.0, 0.0)).is_empty());
    assert!(core.on_resize_end().is_empty());
}

#[test]
fn unmount_cancels_resize() {
    let mut core = loaded(&["a"]);
    core.on_resize_start("a", Point::new(0.0, 0.0));
    core.unmount("a");
    assert!(core.on_resize_move(Point::new(10.0, 10.0)).is_empty());
}

#[test]
fn card_size_falls_back_to_configured_default() {
    let specs = vec![CardSpec { id: Some("bare".into()), ..CardSpec::default() }];
    let mut core = EngineCore::default();
    core.load_collection(Collection::from_specs("misc", specs).unwrap());
    assert_eq!(core.card_size("bare"), Some(Size::new(220.0, 160.0)));
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn actions_serialize_with_tag() {
    let value = serde_json::to_value(Action::SetZ { id: "a".into(), z: 2 }).unwrap();
    assert_eq!(value, json!({ "action": "set_z", "id": "a", "z": 2 }));

    let value = serde_json::to_value(Action::Schedule { delay_ms: 5, task: Task::SpreadOut { id: "b".into() } }).unwrap();
    assert_eq!(value, json!({ "action": "schedule", "delay_ms": 5, "task": { "kind": "spread_out", "id": "b" } }));
}

#[test]
fn task_decodes_from_json() {
    assert_eq!(Task::decode(r#"{"kind":"spread_out","id":"a"}"#).unwrap(), Task::SpreadOut { id: "a".into() });
    assert!(matches!(Task::decode(r#"{"kind":"explode"}"#), Err(CanvasError::InvalidTask(_))));
}
