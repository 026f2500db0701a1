use draw2d_model::{
    Bounds, ChangePhase, ChangeRejected, Location, Point, Polygon, Shape, ShapeDefaults,
    ShapeEventKind,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

fn polygon_of(points: &[(f64, f64)]) -> Polygon {
    let polygon = Polygon::new();
    for &(x, y) in points {
        polygon.append_point(Point::new(x, y)).unwrap();
    }
    polygon
}

fn unit_square() -> Polygon {
    polygon_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
}

#[test]
fn test_append_grows_bounding_box() {
    let polygon = polygon_of(&[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)]);

    assert_eq!(polygon.shape().bounds(), Bounds::new(10.0, 10.0, 10.0, 10.0));
    assert_eq!(polygon.point_count(), 3);
    assert_eq!(polygon.point(2), Some(Point::new(20.0, 20.0)));
    assert_eq!(polygon.point(3), None);
}

#[test]
fn test_first_point_gives_degenerate_box() {
    let polygon = polygon_of(&[(3.0, 4.0)]);
    assert_eq!(polygon.shape().location(), Location::new(3.0, 4.0, 3.0, 4.0));
}

#[test]
fn test_append_does_not_rescale() {
    let polygon = polygon_of(&[(0.0, 0.0), (10.0, 0.0)]);
    polygon.append_point(Point::new(5.0, 20.0)).unwrap();
    polygon.append_point(Point::new(-10.0, 5.0)).unwrap();

    assert_eq!(
        polygon.points(),
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 20.0),
            Point::new(-10.0, 5.0),
        ]
    );
    assert_eq!(polygon.shape().bounds(), Bounds::new(-10.0, 0.0, 20.0, 20.0));
}

#[test]
fn test_append_event_sequence() {
    let polygon = polygon_of(&[(0.0, 0.0)]);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    polygon.shape().add_shape_listener(move |event| {
        sink.lock().unwrap().push(event.kind().clone());
        Ok(())
    });

    polygon.append_point(Point::new(5.0, 5.0)).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], ShapeEventKind::LocationChanged { .. }));
    assert!(matches!(events[1], ShapeEventKind::LocationChanged { .. }));
    assert!(matches!(
        events[2],
        ShapeEventKind::PointAdded { phase, index: 1, .. } if phase.is_before()
    ));
    assert!(matches!(
        events[3],
        ShapeEventKind::PointAdded { phase, index: 1, .. } if phase.is_after()
    ));
}

#[test]
fn test_append_inside_box_skips_relocation() {
    let polygon = unit_square();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    polygon.shape().add_shape_listener(move |event| {
        sink.lock().unwrap().push(event.kind().clone());
        Ok(())
    });

    polygon.append_point(Point::new(5.0, 5.0)).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|kind| matches!(kind, ShapeEventKind::PointAdded { .. })));
}

#[test]
fn test_external_resize_rescales_points() {
    let polygon = polygon_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    assert_eq!(polygon.shape().location(), Location::new(0.0, 0.0, 10.0, 10.0));

    polygon
        .shape()
        .set_location(Location::new(0.0, 0.0, 20.0, 20.0))
        .unwrap();

    assert_eq!(
        polygon.points(),
        vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(20.0, 20.0)
        ]
    );
}

#[test]
fn test_move_translates_points() {
    let polygon = polygon_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    polygon.shape().move_by(5.0, -5.0).unwrap();

    assert_eq!(
        polygon.points(),
        vec![
            Point::new(5.0, -5.0),
            Point::new(15.0, -5.0),
            Point::new(15.0, 5.0)
        ]
    );
}

#[test]
fn test_swapped_corners_mirror_points() {
    let polygon = polygon_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    polygon
        .shape()
        .set_location(Location::new(10.0, 0.0, 0.0, 10.0))
        .unwrap();

    assert_eq!(
        polygon.points(),
        vec![
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0)
        ]
    );
}

#[test]
fn test_flat_polygon_keeps_degenerate_axis() {
    let polygon = polygon_of(&[(0.0, 5.0), (10.0, 5.0)]);
    polygon
        .shape()
        .set_location(Location::new(0.0, 0.0, 20.0, 8.0))
        .unwrap();

    assert_eq!(
        polygon.points(),
        vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0)]
    );
    assert!(polygon.points().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

#[test]
fn test_rescale_notifies_change() {
    let polygon = unit_square();
    let changed = Arc::new(Mutex::new(0));
    let counter = changed.clone();
    polygon.shape().add_shape_listener(move |event| {
        if matches!(event.kind(), ShapeEventKind::Changed) {
            *counter.lock().unwrap() += 1;
        }
        Ok(())
    });

    polygon.shape().move_by(1.0, 1.0).unwrap();
    assert_eq!(*changed.lock().unwrap(), 1);
}

#[test]
fn test_rejected_expansion_appends_nothing() {
    let polygon = unit_square();
    let saw_point_event = Arc::new(Mutex::new(false));
    let flag = saw_point_event.clone();
    polygon.shape().add_shape_listener(move |event| match event.kind() {
        ShapeEventKind::LocationChanged { .. } if event.is_before_change() => {
            Err(ChangeRejected::new("frozen"))
        }
        ShapeEventKind::PointAdded { .. } => {
            *flag.lock().unwrap() = true;
            Ok(())
        }
        _ => Ok(()),
    });

    let err = polygon.append_point(Point::new(50.0, 50.0)).unwrap_err();

    assert_eq!(err.reason(), "frozen");
    assert_eq!(polygon.point_count(), 4);
    assert_eq!(polygon.shape().location(), Location::new(0.0, 0.0, 10.0, 10.0));
    assert!(!*saw_point_event.lock().unwrap());
}

#[test]
fn test_rejected_point_restores_box() {
    let polygon = unit_square();
    polygon.shape().add_shape_listener(|event| match event.kind() {
        ShapeEventKind::PointAdded { .. } if event.is_before_change() => {
            Err(ChangeRejected::new("no more points"))
        }
        _ => Ok(()),
    });

    assert!(polygon.append_point(Point::new(50.0, 50.0)).is_err());

    assert_eq!(polygon.point_count(), 4);
    assert_eq!(polygon.shape().location(), Location::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_point_in_square() {
    let square = unit_square();

    assert!(square.contains(Point::new(5.0, 5.0)));
    assert!(!square.contains(Point::new(15.0, 5.0)));
    // Right edge is outside, left edge inside
    assert!(!square.contains(Point::new(10.0, 5.0)));
    assert!(square.contains(Point::new(0.0, 5.0)));
}

#[test]
fn test_point_in_concave_polygon() {
    // L shape
    let polygon = polygon_of(&[
        (0.0, 0.0),
        (10.0, 0.0),
        (10.0, 4.0),
        (4.0, 4.0),
        (4.0, 10.0),
        (0.0, 10.0),
    ]);

    assert!(polygon.contains(Point::new(2.0, 8.0)));
    assert!(polygon.contains(Point::new(8.0, 2.0)));
    assert!(!polygon.contains(Point::new(8.0, 8.0)));
}

#[test]
fn test_open_polygon_contains_like_closed() {
    let square = unit_square();
    square.set_closed(false);
    assert!(square.contains(Point::new(5.0, 5.0)));
}

#[test]
fn test_set_closed_notifies_only_on_change() {
    let polygon = unit_square();
    let changed = Arc::new(Mutex::new(0));
    let counter = changed.clone();
    polygon.shape().add_shape_listener(move |event| {
        if matches!(event.kind(), ShapeEventKind::Changed) {
            *counter.lock().unwrap() += 1;
        }
        Ok(())
    });

    assert!(polygon.is_closed());
    polygon.set_closed(true);
    assert_eq!(*changed.lock().unwrap(), 0);

    polygon.set_closed(false);
    assert!(!polygon.is_closed());
    assert_eq!(*changed.lock().unwrap(), 1);
}

#[test]
fn test_defaults_apply() {
    let defaults = ShapeDefaults {
        polygon_closed: false,
        ..ShapeDefaults::default()
    };
    assert!(!Polygon::with_defaults(&defaults).is_closed());
}

#[test]
fn test_from_points() {
    let polygon = Polygon::from_points(
        [Point::new(1.0, 1.0), Point::new(5.0, 3.0), Point::new(2.0, 6.0)],
        false,
    );
    assert!(!polygon.is_closed());
    assert_eq!(polygon.shape().location(), Location::new(1.0, 1.0, 5.0, 6.0));
    assert_eq!(polygon.point_count(), 3);
}

#[test]
fn test_polygon_converts_to_shape() {
    let polygon = unit_square();
    let shape: Shape = polygon.clone().into();
    assert_eq!(&shape, polygon.shape());
    assert_eq!(shape.as_polygon(), Some(polygon));
}

fn resize_once_after_relocate(polygon: &Polygon, target: Location) -> Arc<AtomicBool> {
    let resized = Arc::new(AtomicBool::new(false));
    let once = resized.clone();
    polygon.shape().add_shape_listener(move |event| {
        if let ShapeEventKind::LocationChanged {
            phase: ChangePhase::After,
            ..
        } = event.kind()
        {
            if !once.swap(true, Ordering::SeqCst) {
                event.source().set_location(target)?;
            }
        }
        Ok(())
    });
    resized
}

#[test]
fn test_relocate_from_after_listener_rescales_once() {
    let polygon = polygon_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let resized = resize_once_after_relocate(&polygon, Location::new(0.0, 0.0, 40.0, 40.0));

    polygon
        .shape()
        .set_location(Location::new(0.0, 0.0, 20.0, 20.0))
        .unwrap();

    assert!(resized.load(Ordering::SeqCst));
    assert_eq!(polygon.shape().location(), Location::new(0.0, 0.0, 40.0, 40.0));
    assert_eq!(
        polygon.points(),
        vec![Point::new(0.0, 0.0), Point::new(40.0, 0.0), Point::new(40.0, 40.0)]
    );
}

#[test]
fn test_move_then_resize_from_after_listener() {
    let polygon = polygon_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    resize_once_after_relocate(&polygon, Location::new(100.0, 100.0, 120.0, 120.0));

    polygon.shape().move_by(100.0, 100.0).unwrap();

    assert_eq!(
        polygon.points(),
        vec![
            Point::new(100.0, 100.0),
            Point::new(120.0, 100.0),
            Point::new(120.0, 120.0)
        ]
    );
}

mod properties {
    use draw2d_model::{Location, Point, Polygon};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn appended_points_stay_within_bounds(
            coords in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 1..40)
        ) {
            let polygon = Polygon::new();
            for &(x, y) in &coords {
                polygon.append_point(Point::new(x, y)).unwrap();
            }

            let bounds = polygon.shape().bounds();
            let min_x = coords.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
            let max_x = coords.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
            let min_y = coords.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
            let max_y = coords.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);

            prop_assert_eq!(bounds.min_x(), min_x);
            prop_assert_eq!(bounds.min_y(), min_y);
            prop_assert!((bounds.max_x() - max_x).abs() <= 1e-6);
            prop_assert!((bounds.max_y() - max_y).abs() <= 1e-6);
            prop_assert_eq!(polygon.points().len(), coords.len());
        }

        #[test]
        fn resize_maps_points_into_new_box(
            scale in 0.1f64..10.0,
            dx in -100f64..100.0,
            dy in -100f64..100.0,
        ) {
            let polygon = Polygon::new();
            for (x, y) in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
                polygon.append_point(Point::new(x, y)).unwrap();
            }

            let side = 10.0 * scale;
            let target = Location::new(dx, dy, dx + side, dy + side);
            polygon.shape().set_location(target).unwrap();

            let expected = [
                (dx, dy),
                (dx + side, dy),
                (dx + side, dy + side),
                (dx, dy + side),
            ];
            for (p, (ex, ey)) in polygon.points().into_iter().zip(expected) {
                prop_assert!((p.x - ex).abs() <= 1e-9 && (p.y - ey).abs() <= 1e-9);
            }
        }
    }
}
