//! Scene-level scenarios covering registration, movement and the grid
//! invariant across modules

mod movement_scenarios;

use crate::config::CollisionConfig;
use crate::entity::Entity;
use crate::foundation::collections::ShapeHandle;
use crate::foundation::math::Vec3;
use crate::physics::Shape;
use crate::scene::CollisionScene;
use crate::spatial::BoxCoord;
use std::collections::HashSet;

fn scene() -> CollisionScene {
    let config = CollisionConfig { verify_index: true, ..Default::default() };
    CollisionScene::new(config).unwrap()
}

fn rect(owner: u32, x: f32, y: f32, w: f32, h: f32) -> Shape {
    Shape::rectangle(Entity::new(owner), Vec3::new(x, y, 0.0), Vec3::new(w, h, 0.0)).unwrap()
}

fn spawn(scene: &mut CollisionScene, shape: Shape) -> (ShapeHandle, bool) {
    let handle = scene.insert_shape(shape);
    let clear = scene.register(handle).unwrap();
    (handle, clear)
}

/// Boxes the grid holds `handle` in, found by scanning every box
fn recorded_cells(scene: &CollisionScene, handle: ShapeHandle) -> HashSet<BoxCoord> {
    scene
        .index()
        .iter()
        .filter(|(_, shapes)| shapes.contains(&handle))
        .map(|(coord, _)| *coord)
        .collect()
}

fn assert_index_invariant(scene: &CollisionScene) {
    for (handle, _) in scene.shapes() {
        assert_eq!(scene.boxes_for(handle).unwrap(), recorded_cells(scene, handle));
        assert!(scene.verify_index(handle).is_ok());
    }
}
