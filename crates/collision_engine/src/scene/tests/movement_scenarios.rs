use super::*;
use crate::physics::ShapeKindId;
use crate::scene::CollisionError;
use approx::assert_relative_eq;
use proptest::prelude::*;

#[test]
fn test_move_into_fresh_overlap_is_rejected() {
    let mut scene = scene();
    let (a, _) = spawn(&mut scene, rect(1, 0.0, 0.0, 10.0, 10.0));
    spawn(&mut scene, rect(2, 20.0, 0.0, 10.0, 10.0));

    assert!(!scene.try_move(a, 15.0, 0.0).unwrap());
    assert_relative_eq!(scene.shape(a).unwrap().center(), Vec3::zeros());
}

#[test]
fn test_rejected_move_mutates_nothing() {
    let mut scene = scene();
    let (a, _) = spawn(&mut scene, rect(1, 0.0, 0.0, 10.0, 10.0));
    let (b, _) = spawn(&mut scene, rect(2, 5.0, 0.0, 10.0, 10.0));
    spawn(&mut scene, rect(3, 40.0, 0.0, 10.0, 10.0));

    let index = scene.index().clone();
    let collisions = scene.collisions().clone();
    let shape = scene.shape(a).unwrap().clone();

    // leaves b behind but lands on the third shape
    assert!(!scene.can_move(a, 32.0, 0.0).unwrap());

    assert_eq!(scene.index(), &index);
    assert_eq!(scene.collisions(), &collisions);
    assert_eq!(scene.shape(a).unwrap(), &shape);
    assert!(scene.collisions().contains(b, a));
}

#[test]
fn test_pre_existing_overlap_is_tolerated() {
    let mut scene = scene();
    let (a, _) = spawn(&mut scene, rect(1, 0.0, 0.0, 10.0, 10.0));
    let (b, clear) = spawn(&mut scene, rect(2, 5.0, 0.0, 10.0, 10.0));
    assert!(!clear);

    // still overlapping b after the move
    assert!(scene.try_move(a, -1.0, 0.0).unwrap());
    assert!(scene.collisions().contains(a, b));
    assert!(scene.collisions().contains(b, a));

    // moving clear releases the pair on both sides
    assert!(scene.try_move(a, -10.0, 0.0).unwrap());
    assert!(scene.collisions_of(a).is_none());
    assert!(scene.collisions_of(b).is_none());

    // coming back is now a new collision
    assert!(!scene.try_move(a, 10.0, 0.0).unwrap());
    assert_relative_eq!(scene.shape(a).unwrap().center(), Vec3::new(-11.0, 0.0, 0.0));
}

#[test]
fn test_move_across_boxes_updates_grid() {
    let mut scene = scene();
    let (a, _) = spawn(&mut scene, rect(1, 0.0, 0.0, 10.0, 10.0));
    let old_boxes = scene.boxes_for(a).unwrap();

    assert!(scene.try_move(a, 300.0, -300.0).unwrap());

    let new_boxes = scene.boxes_for(a).unwrap();
    assert_ne!(old_boxes, new_boxes);
    for coord in old_boxes.difference(&new_boxes) {
        assert!(scene.shapes_in_box(*coord).is_none());
    }
    assert_eq!(scene.index().boxes_of(a), Some(&new_boxes));
    assert_index_invariant(&scene);
}

#[test]
fn test_can_move_commits_bookkeeping_only() {
    let mut scene = scene();
    let (a, _) = spawn(&mut scene, rect(1, 0.0, 0.0, 10.0, 10.0));

    assert!(scene.can_move(a, 300.0, 0.0).unwrap());
    assert_relative_eq!(scene.shape(a).unwrap().center(), Vec3::zeros());
    assert!(scene.verify_index(a).is_err());

    scene.force_move(a, 300.0, 0.0).unwrap();
    assert!(scene.verify_index(a).is_ok());
}

#[test]
fn test_check_move_never_mutates() {
    let mut scene = scene();
    let (a, _) = spawn(&mut scene, rect(1, 0.0, 0.0, 10.0, 10.0));
    spawn(&mut scene, rect(2, 20.0, 0.0, 10.0, 10.0));
    let index = scene.index().clone();

    assert!(scene.check_move(a, 300.0, 0.0).unwrap());
    assert!(!scene.check_move(a, 15.0, 0.0).unwrap());
    assert_eq!(scene.index(), &index);
}

#[test]
fn test_shapes_on_other_layers_never_block() {
    let mut scene = scene();
    let (a, _) = spawn(&mut scene, rect(1, 0.0, 0.0, 10.0, 10.0));
    let upper = Shape::rectangle(Entity::new(2), Vec3::new(20.0, 0.0, 1.0), Vec3::new(10.0, 10.0, 0.0)).unwrap();
    spawn(&mut scene, upper);

    assert!(scene.try_move(a, 20.0, 0.0).unwrap());
    assert!(scene.collisions().is_empty());
}

#[test]
fn test_undefined_relation_is_permissive() {
    let mut scene = scene();
    let kind = ShapeKindId::custom(9);
    let custom = Shape::custom(Entity::new(1), kind, Vec3::new(20.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 0.0)).unwrap();
    spawn(&mut scene, custom);
    let (a, _) = spawn(&mut scene, rect(2, 0.0, 0.0, 10.0, 10.0));

    assert!(scene.try_move(a, 20.0, 0.0).unwrap());
}

#[test]
fn test_group_moves_with_children_and_is_blocked() {
    let mut scene = scene();
    let children = vec![
        rect(1, -10.0, 0.0, 4.0, 4.0),
        rect(1, 10.0, 0.0, 4.0, 4.0),
    ];
    let group = Shape::group(Entity::new(1), Vec3::zeros(), Vec3::new(24.0, 4.0, 0.0), children).unwrap();
    let (g, _) = spawn(&mut scene, group);
    spawn(&mut scene, rect(2, 0.0, 50.0, 4.0, 4.0));

    // slides between the children's gap over the rectangle: still clear
    assert!(scene.try_move(g, 0.0, 48.0).unwrap());
    assert_relative_eq!(scene.shape(g).unwrap().children()[0].center(), Vec3::new(-10.0, 48.0, 0.0));

    // shifting right puts the left child on top of the rectangle
    assert!(!scene.try_move(g, 10.0, 0.0).unwrap());
    assert_index_invariant(&scene);
}

#[test]
fn test_non_finite_move_is_an_error() {
    let mut scene = scene();
    let (a, _) = spawn(&mut scene, rect(1, 0.0, 0.0, 10.0, 10.0));

    assert!(matches!(scene.try_move(a, f32::NAN, 0.0), Err(CollisionError::Geometry(_))));
    assert!(matches!(scene.force_move(a, 0.0, f32::INFINITY), Err(CollisionError::Geometry(_))));
    assert_relative_eq!(scene.shape(a).unwrap().center(), Vec3::zeros());
}

#[test]
fn test_move_overflowing_center_is_an_error() {
    let mut scene = scene();
    let (edge, _) = spawn(&mut scene, rect(1, 3e38, 0.0, 10.0, 10.0));
    let index = scene.index().clone();

    assert!(matches!(scene.try_move(edge, 3e38, 0.0), Err(CollisionError::Geometry(_))));
    assert_eq!(scene.index(), &index);
    assert_relative_eq!(scene.shape(edge).unwrap().center().x, 3e38);
}

fn move_step() -> impl Strategy<Value = (usize, f32, f32)> {
    (0usize..7, -128i16..128, -128i16..128).prop_map(|(pick, dx, dy)| (pick, f32::from(dx), f32::from(dy)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_index_invariant_holds_over_move_sequence(steps in prop::collection::vec(move_step(), 1..80)) {
        let mut scene = scene();
        let mut handles: Vec<_> = (0..6u8)
            .map(|i| spawn(&mut scene, rect(u32::from(i), f32::from(i) * 150.0, 0.0, 30.0, 30.0)).0)
            .collect();
        let ball = Shape::circle(Entity::new(6), Vec3::new(900.0, 0.0, 0.0), 20.0).unwrap();
        handles.push(spawn(&mut scene, ball).0);

        for (pick, dx, dy) in steps {
            let handle = handles[pick];
            let index = scene.index().clone();
            let collisions = scene.collisions().clone();
            let before = scene.shape(handle).unwrap().clone();

            if !scene.try_move(handle, dx, dy).unwrap() {
                prop_assert_eq!(scene.index(), &index);
                prop_assert_eq!(scene.collisions(), &collisions);
                prop_assert_eq!(scene.shape(handle).unwrap(), &before);
            }
            assert_index_invariant(&scene);
        }
    }
}
