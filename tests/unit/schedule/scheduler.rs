use super::*;
use crate::test_support::{bound, row_of_lines};
use crate::tree::glyph::GlyphElement;

fn strokes(n: usize) -> Vec<TweenableStroke> {
    let (root, _, surface) = bound(&row_of_lines(n));
    TweenableStroke::collect(&root, &surface, &TimingPolicy::stroke()).unwrap()
}

#[test]
fn n_strokes_make_two_n_plus_one_segments() {
    let tl = PenPathScheduler::default()
        .schedule(strokes(3), Point::ZERO)
        .unwrap();
    assert_eq!(tl.len(), 7);
    assert_eq!(tl.travel_count(), 4);
    assert_eq!(tl.reveal_count(), 3);

    let kinds: Vec<_> = tl
        .segments()
        .iter()
        .filter_map(|s| match s {
            Segment::Travel(t) => Some(t.kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            TravelKind::Approach,
            TravelKind::Transit,
            TravelKind::Transit,
            TravelKind::Rest
        ]
    );
}

#[test]
fn empty_list_schedules_nothing() {
    let tl = PenPathScheduler::default()
        .schedule(Vec::new(), Point::ZERO)
        .unwrap();
    assert!(tl.is_empty());
}

#[test]
fn adjacent_strokes_skip_transit() {
    // Two lines sharing an endpoint.
    let tree = GlyphElement::new("svg").with_child(GlyphElement::group("mrow").with_children([
        GlyphElement::line(0.0, 0.0, 100.0, 0.0),
        GlyphElement::line(102.0, 0.0, 200.0, 0.0),
    ]));
    let (root, _, surface) = bound(&tree);
    let s = TweenableStroke::collect(&root, &surface, &TimingPolicy::stroke()).unwrap();

    let tl = PenPathScheduler::default()
        .schedule(s.clone(), Point::ZERO)
        .unwrap();
    assert_eq!(tl.len(), 4);

    let tl = PenPathScheduler::default()
        .with_adjacency_threshold(0.0)
        .schedule(s, Point::ZERO)
        .unwrap();
    assert_eq!(tl.len(), 5);
}

#[test]
fn first_travel_is_kept_even_when_pen_is_already_there() {
    let tl = PenPathScheduler::default()
        .schedule(strokes(1), Point::ZERO)
        .unwrap();
    assert!(matches!(
        &tl.segments()[0],
        Segment::Travel(TravelSegment {
            kind: TravelKind::Approach,
            ..
        })
    ));
}

#[test]
fn rest_point_is_offset_from_live_end() {
    let (root, concrete, surface) = bound(&row_of_lines(1));
    let s = TweenableStroke::collect(&root, &surface, &TimingPolicy::stroke()).unwrap();
    let tl = PenPathScheduler::default()
        .schedule(s.clone(), Point::ZERO)
        .unwrap();
    let Some(Segment::Travel(rest)) = tl.segments().last() else {
        panic!("expected a trailing travel");
    };
    assert_eq!(rest.resolve().unwrap().1, Point::new(120.0, 20.0));

    // Endpoints are read when asked, not when scheduled.
    let mut moved = kurbo::BezPath::new();
    moved.move_to((0.0, 0.0));
    moved.line_to((50.0, 0.0));
    concrete.borrow_mut().insert_path(s[0].node_id(), &moved);
    assert_eq!(rest.resolve().unwrap(), (Point::new(50.0, 0.0), Point::new(70.0, 20.0)));
}

#[test]
fn speed_is_captured_at_build() {
    let speed = SpeedControl::new(2.0);
    let scheduler = PenPathScheduler::default().with_speed(speed.clone());
    let tl = scheduler.schedule(strokes(1), Point::ZERO).unwrap();
    speed.set(0.5);
    assert_eq!(tl.time_scale(), 2.0);
    assert_eq!(scheduler.schedule(strokes(1), Point::ZERO).unwrap().time_scale(), 0.5);
}

#[test]
fn count_scaling_shortens_reveals() {
    let durations = |tl: &Timeline| -> Vec<f64> {
        tl.segments()
            .iter()
            .filter_map(|s| match s {
                Segment::Reveal(r) => Some(r.duration),
                _ => None,
            })
            .collect()
    };
    let scaled = PenPathScheduler::default()
        .with_count_scaling(true)
        .schedule(strokes(4), Point::ZERO)
        .unwrap();
    assert!(durations(&scaled).iter().all(|d| (d - 0.15 * 0.5).abs() < 1e-12));

    // Off by default: stroke timing stays inside the stroke band.
    let plain = PenPathScheduler::default()
        .schedule(strokes(4), Point::ZERO)
        .unwrap();
    assert!(durations(&plain).iter().all(|d| *d == 0.15));
}
