use draw2d_model::{
    ChangeRejected, Color, Drawing, DrawingError, DrawingEventKind, Location, Point, Polygon,
    Shape, ShapeEventKind,
};
use std::sync::{Arc, Mutex};

fn reject_before_changes(shape: &Shape, reason: &'static str) {
    shape.add_shape_listener(move |event| {
        if event.is_before_change() {
            Err(ChangeRejected::new(reason))
        } else {
            Ok(())
        }
    });
}

#[test]
fn test_rejected_location_change_leaves_shape_untouched() {
    let shape = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
    let after_events = Arc::new(Mutex::new(0));
    let counter = after_events.clone();
    reject_before_changes(&shape, "locked");
    shape.add_shape_listener(move |event| {
        if event.is_after_change() {
            *counter.lock().unwrap() += 1;
        }
        Ok(())
    });

    let err = shape
        .set_location(Location::new(5.0, 5.0, 6.0, 6.0))
        .unwrap_err();

    assert_eq!(err.reason(), "locked");
    assert_eq!(shape.location(), Location::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(*after_events.lock().unwrap(), 0);
}

#[test]
fn test_rejection_stops_delivery() {
    let shape = Shape::new(draw2d_model::ShapeType::Rectangle);
    reject_before_changes(&shape, "first");
    let later_calls = Arc::new(Mutex::new(0));
    let counter = later_calls.clone();
    shape.add_shape_listener(move |_| {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    assert!(shape.set_color(Color::BLUE).is_err());
    assert_eq!(shape.color(), Color::RED);
    assert_eq!(*later_calls.lock().unwrap(), 0);
}

#[test]
fn test_rejected_tag_is_not_stored() {
    let shape = Shape::new(draw2d_model::ShapeType::Ellipse);
    reject_before_changes(&shape, "no tags");

    assert!(shape.set_tag("name", "x").is_err());
    assert_eq!(shape.tag("name"), None);
}

#[test]
fn test_after_phase_rejection_is_ignored() {
    let shape = Shape::rectangle(0.0, 0.0, 1.0, 1.0);
    shape.add_shape_listener(|event| {
        if event.is_after_change() {
            Err(ChangeRejected::new("too late"))
        } else {
            Ok(())
        }
    });
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    shape.add_shape_listener(move |_| {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    assert!(shape.move_by(1.0, 0.0).is_ok());
    assert_eq!(shape.location(), Location::new(1.0, 0.0, 2.0, 1.0));
    assert_eq!(*calls.lock().unwrap(), 2);
}

#[test]
fn test_drawing_listener_vetoes_member_mutation() {
    let drawing = Drawing::new();
    let shape = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
    drawing.add_shape(&shape).unwrap();
    drawing.add_drawing_listener(|event| match event.shape_event().map(|e| e.kind()) {
        Some(ShapeEventKind::LocationChanged { new, .. })
            if event.is_before_change() && new.bounds().min_x() < 0.0 =>
        {
            Err(ChangeRejected::new("negative x"))
        }
        _ => Ok(()),
    });

    let err = shape.move_by(-20.0, 0.0).unwrap_err();
    assert_eq!(err.reason(), "negative x");
    assert_eq!(shape.location(), Location::new(0.0, 0.0, 10.0, 10.0));

    shape.move_by(20.0, 0.0).unwrap();
    assert_eq!(shape.location(), Location::new(20.0, 0.0, 30.0, 10.0));
}

#[test]
fn test_drawing_listener_vetoes_polygon_point() {
    let drawing = Drawing::new();
    let polygon = Polygon::new();
    polygon.append_point(Point::new(0.0, 0.0)).unwrap();
    drawing.add_shape(&polygon).unwrap();
    drawing.add_drawing_listener(|event| match event.shape_event().map(|e| e.kind()) {
        Some(ShapeEventKind::PointAdded { index, .. })
            if event.is_before_change() && *index >= 2 =>
        {
            Err(ChangeRejected::new("two points max"))
        }
        _ => Ok(()),
    });

    polygon.append_point(Point::new(10.0, 0.0)).unwrap();
    assert!(polygon.append_point(Point::new(10.0, 10.0)).is_err());

    assert_eq!(polygon.point_count(), 2);
    assert_eq!(polygon.shape().location(), Location::new(0.0, 0.0, 10.0, 0.0));
}

#[test]
fn test_rejected_add() {
    let drawing = Drawing::new();
    drawing.add_drawing_listener(|event| match event.kind() {
        DrawingEventKind::ShapeAdded { .. } if event.is_before_change() => {
            Err(ChangeRejected::new("read-only"))
        }
        _ => Ok(()),
    });
    let shape = Shape::rectangle(0.0, 0.0, 1.0, 1.0);

    assert_eq!(drawing.add_shape(&shape).unwrap_err().reason(), "read-only");
    let err = drawing.add_shape_at(0, &shape).unwrap_err();
    assert!(err.is_rejection());

    assert!(drawing.is_empty());
    assert_eq!(shape.listener_count(), 0);
}

#[test]
fn test_rejected_move_and_remove() {
    let drawing = Drawing::new();
    let a = Shape::rectangle(0.0, 0.0, 1.0, 1.0);
    let b = Shape::rectangle(0.0, 0.0, 1.0, 1.0);
    drawing.add_shape(&a).unwrap();
    drawing.add_shape(&b).unwrap();
    drawing.add_drawing_listener(|event| match event.kind() {
        DrawingEventKind::ShapeMoved { .. } | DrawingEventKind::ShapeRemoved { .. }
            if event.is_before_change() =>
        {
            Err(ChangeRejected::new("pinned"))
        }
        _ => Ok(()),
    });

    assert!(drawing.add_shape(&a).is_err());
    assert!(matches!(
        drawing.remove_shape_at(0),
        Err(DrawingError::Rejected(_))
    ));
    assert!(drawing.remove_shape(&b).is_err());
    assert!(drawing.clear().is_err());

    assert_eq!(drawing.shapes(), vec![a.clone(), b]);
    assert_eq!(a.listener_count(), 1);
}

#[test]
fn test_set_tags_stops_at_first_rejection() {
    let shape = Shape::new(draw2d_model::ShapeType::Rectangle);
    shape.set_tag("keep", 1).unwrap();
    shape.add_shape_listener(|event| match event.kind() {
        ShapeEventKind::TagChanged { new: None, .. } if event.is_before_change() => {
            Err(ChangeRejected::new("tags are permanent"))
        }
        _ => Ok(()),
    });

    assert!(shape.set_tags(Default::default()).is_err());
    assert!(shape.has_tag("keep"));
}

#[test]
fn test_listener_may_mutate_reentrantly() {
    let shape = Shape::rectangle(0.0, 0.0, 1.0, 1.0);
    shape.add_shape_listener(|event| {
        if let ShapeEventKind::ColorChanged { new, .. } = event.kind() {
            if event.is_after_change() && *new == Color::BLUE {
                event.source().set_tag("was_blue", true)?;
            }
        }
        Ok(())
    });

    shape.set_color(Color::BLUE).unwrap();
    assert_eq!(shape.tag("was_blue"), Some(serde_json::json!(true)));
}
