use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;
use crate::{
    playback::player::PlaybackState,
    surface::path::{PathSurface, StrokeVisibility},
    test_support::row_of_lines,
};

const FRAME: f64 = 1.0 / 60.0;
const RED: StrokeColor = StrokeColor::rgb(255, 0, 0);
const IDS: [&str; 3] = ["eq-0-0", "eq-0-1", "eq-0-2"];

fn setup() -> (StrokeAnimator, Rc<RefCell<PathSurface>>, StrokeGraphNode) {
    let concrete = Rc::new(RefCell::new(PathSurface::new()));
    let animator = StrokeAnimator::new(concrete.clone());
    let root = animator
        .build_graph(&row_of_lines(3), "eq", StrokeColor::BLACK)
        .unwrap();
    (animator, concrete, root)
}

fn vis(surface: &Rc<RefCell<PathSurface>>, id: &str) -> Option<StrokeVisibility> {
    surface.borrow().visibility(id)
}

#[test]
fn build_graph_registers_strokes() {
    let (_, concrete, root) = setup();
    let surface = concrete.borrow();
    assert_eq!(surface.ids().collect::<Vec<_>>(), IDS.to_vec());
    assert_eq!(surface.address("eq-0-1").map(|a| a.as_str()), Some("1.2"));
    assert_eq!(root.drawables().len(), 3);
}

#[test]
fn animate_recolors_hides_then_draws() {
    let (animator, concrete, mut root) = setup();
    let done = Rc::new(Cell::new(0));
    let d = done.clone();
    let mut player = animator.animate(&mut root, RED, move || d.set(d.get() + 1));

    for id in IDS {
        assert_eq!(vis(&concrete, id), Some(StrokeVisibility::Hidden));
        assert_eq!(concrete.borrow().color(id), Some(RED));
    }
    assert_eq!(player.play_to_end(FRAME), PlaybackState::Finished);
    assert_eq!(done.get(), 1);
    for id in IDS {
        assert_eq!(vis(&concrete, id), Some(StrokeVisibility::Shown));
    }
    assert_eq!(root.stroke_color(), RED);
}

#[test]
fn selection_only_leaves_other_strokes_alone() {
    let (animator, concrete, root) = setup();
    let unit = SelectionUnit::from_addresses("mid", ["1.2"]);
    let mut player = animator.animate_selection_only(&root, &[unit], || {});
    assert_eq!(vis(&concrete, "eq-0-0"), Some(StrokeVisibility::Shown));
    assert_eq!(vis(&concrete, "eq-0-1"), Some(StrokeVisibility::Hidden));
    assert_eq!(vis(&concrete, "eq-0-2"), Some(StrokeVisibility::Shown));
    player.play_to_end(FRAME);
    assert_eq!(vis(&concrete, "eq-0-1"), Some(StrokeVisibility::Shown));
}

#[test]
fn selection_without_tail_hides_leftovers() {
    let (animator, concrete, root) = setup();
    let unit = SelectionUnit::from_addresses("last", ["1.3"]);
    let plan = animator
        .plan(&root, std::slice::from_ref(&unit), SequenceMode::Sequence { auto_complete: false })
        .unwrap();
    let order: Vec<&str> = plan.timeline.reveal_order().iter().map(|a| a.as_str()).collect();
    assert_eq!(order, vec!["1.3"]);

    animator.animate_selection(&root, &[unit], false, || {}).play_to_end(FRAME);
    assert_eq!(vis(&concrete, "eq-0-0"), Some(StrokeVisibility::Hidden));
    assert_eq!(vis(&concrete, "eq-0-1"), Some(StrokeVisibility::Hidden));
    assert_eq!(vis(&concrete, "eq-0-2"), Some(StrokeVisibility::Shown));
}

#[test]
fn complement_modes_differ_only_in_disabling() {
    let (animator, concrete, root) = setup();
    let units = [SelectionUnit::from_addresses("first", ["1.1"])];

    let a = animator.plan(&root, &units, SequenceMode::ExcludeAndDisable).unwrap();
    let b = animator
        .plan(&root, &units, SequenceMode::ExcludeWithoutDisabling)
        .unwrap();
    assert_eq!(a.timeline.reveal_order(), b.timeline.reveal_order());

    animator
        .animate_excluding_without_disabling(&root, &units, || {})
        .play_to_end(FRAME);
    assert_eq!(vis(&concrete, "eq-0-0"), Some(StrokeVisibility::Shown));

    animator.animate_excluding(&root, &units, || {}).play_to_end(FRAME);
    assert_eq!(vis(&concrete, "eq-0-0"), Some(StrokeVisibility::Hidden));
    assert_eq!(vis(&concrete, "eq-0-2"), Some(StrokeVisibility::Shown));
}

#[test]
fn pen_continues_from_last_rest_point() {
    let (animator, _, root) = setup();
    animator.animate_with(&root, &[], SequenceMode::default(), || {}).play_to_end(FRAME);
    assert_eq!(animator.pen().last_position(), Some(Point::new(520.0, 20.0)));

    let plan = animator.plan(&root, &[], SequenceMode::default()).unwrap();
    let summary = plan.timeline.summary().unwrap();
    match &summary.segments[0] {
        crate::schedule::timeline::SegmentSummary::Travel { from, to, .. } => {
            assert_eq!(*from, Point::new(520.0, 20.0));
            assert_eq!(*to, Point::ZERO);
        }
        other => panic!("expected approach travel, got {other:?}"),
    }
}

#[test]
fn scheduling_failure_still_completes() {
    let (animator, concrete, root) = setup();
    concrete
        .borrow_mut()
        .insert_path("eq-0-0", &kurbo::BezPath::new());
    let done = Rc::new(Cell::new(0));
    let d = done.clone();
    let mut player = animator.animate_with(&root, &[], SequenceMode::default(), move || {
        d.set(d.get() + 1)
    });
    assert_eq!(done.get(), 0);
    assert_eq!(player.tick(FRAME), PlaybackState::Failed);
    player.tick(FRAME);
    assert_eq!(done.get(), 1);
}

#[test]
fn speed_is_shared_and_read_at_plan_time() {
    let (animator, _, root) = setup();
    animator.speed().set(2.0);
    let plan = animator.plan(&root, &[], SequenceMode::default()).unwrap();
    assert_eq!(plan.timeline.time_scale(), 2.0);

    let cfg = AnimatorConfig {
        speed: 0.5,
        ..AnimatorConfig::default()
    };
    let other = StrokeAnimator::with_config(animator.surface().clone(), cfg).unwrap();
    assert_eq!(other.speed().get(), 0.5);
}

#[test]
fn hide_show_and_hide_selection() {
    let (animator, concrete, root) = setup();
    animator.hide(&root);
    assert!(IDS.iter().all(|id| vis(&concrete, id) == Some(StrokeVisibility::Hidden)));
    animator.show(&root);
    assert!(IDS.iter().all(|id| vis(&concrete, id) == Some(StrokeVisibility::Shown)));

    animator.hide_selection(&root, &[SelectionUnit::from_addresses("u", ["1.2", "4.4"])]);
    assert_eq!(vis(&concrete, "eq-0-1"), Some(StrokeVisibility::Hidden));
    assert_eq!(vis(&concrete, "eq-0-0"), Some(StrokeVisibility::Shown));

    // A group address hides everything below it.
    animator.hide_selection(&root, &[SelectionUnit::from_addresses("row", ["1"])]);
    assert!(IDS.iter().all(|id| vis(&concrete, id) == Some(StrokeVisibility::Hidden)));
}

#[test]
fn recolor_selection_only() {
    let (animator, concrete, mut root) = setup();
    animator.update_selection_stroke(&mut root, &[SelectionUnit::from_addresses("u", ["1.3"])], RED);
    assert_eq!(concrete.borrow().color("eq-0-2"), Some(RED));
    assert_eq!(concrete.borrow().color("eq-0-0"), Some(StrokeColor::BLACK));
    assert_eq!(root.find("1.3").unwrap().stroke_color(), RED);
    assert_eq!(root.find("1.1").unwrap().stroke_color(), StrokeColor::BLACK);

    animator.update_stroke_color(&mut root, StrokeColor::BLACK);
    assert_eq!(concrete.borrow().color("eq-0-2"), Some(StrokeColor::BLACK));
}

#[test]
fn region_selection_and_bounds() {
    let (animator, _, root) = setup();
    let unit = animator.selection_from_region("right", &root, Rect::new(150.0, -5.0, 600.0, 5.0));
    let got: Vec<&str> = unit.fragments.iter().map(|a| a.as_str()).collect();
    assert_eq!(got, vec!["1.2", "1.3"]);
    let b = animator.selection_bounds(&root, &unit).unwrap();
    assert_eq!((b.x0, b.x1), (200.0, 500.0));
}

#[test]
fn trace_points() {
    let (animator, _, root) = setup();
    assert_eq!(animator.start_trace_point(&root).unwrap(), Some(Point::ZERO));
    assert_eq!(animator.last_trace_point(&root).unwrap(), Some(Point::new(500.0, 0.0)));

    let empty = animator
        .build_graph(&GlyphElement::new("svg"), "blank", StrokeColor::BLACK)
        .unwrap();
    assert_eq!(animator.start_trace_point(&empty).unwrap(), None);
}

#[test]
fn fades_end_visible_or_hidden() {
    let (animator, concrete, root) = setup();
    animator.hide(&root);
    animator.fade_in(&root, 0.5, || {}).play_to_end(FRAME);
    assert!(IDS.iter().all(|id| vis(&concrete, id) == Some(StrokeVisibility::Shown)));
    assert_eq!(concrete.borrow().opacity("eq-0-0"), Some(1.0));

    animator.fade_out(&root, 0.5, || {}).play_to_end(FRAME);
    assert!(IDS.iter().all(|id| vis(&concrete, id) == Some(StrokeVisibility::Hidden)));
}
