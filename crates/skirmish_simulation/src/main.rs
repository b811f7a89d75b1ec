//! Headless skirmish
//!
//! Игрок стоит на месте, два монстра (swinger, lunger) патрулируют,
//! замечают его и атакуют. Hit regions вместо движка: proximity triggers
//! (`ProximityTriggerPlugin`).

use bevy::prelude::*;

use skirmish_simulation::{
    create_headless_app, log_info, spawn_monster, spawn_player, Actor, ActorController, MonsterKind, PhysicsWorld,
    ProximityTriggerPlugin, SimulationPlugin, StaticWalls, WallSegment,
};

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, ProximityTriggerPlugin))
        .insert_resource(PhysicsWorld::new(StaticWalls::new(vec![
            WallSegment::new(Vec2::new(-8.0, -8.0), Vec2::new(8.0, -8.0)),
            WallSegment::new(Vec2::new(8.0, -8.0), Vec2::new(8.0, 8.0)),
            WallSegment::new(Vec2::new(8.0, 8.0), Vec2::new(-8.0, 8.0)),
            WallSegment::new(Vec2::new(-8.0, 8.0), Vec2::new(-8.0, -8.0)),
        ])));

    log_info(&format!("Starting skirmish headless simulation (seed: {})", seed));

    {
        let mut commands = app.world_mut().commands();
        spawn_player(&mut commands, Vec2::ZERO);
        spawn_monster(&mut commands, MonsterKind::Swinger, Vec2::new(3.0, 1.0));
        spawn_monster(&mut commands, MonsterKind::Lunger, Vec2::new(-3.0, -2.0));
    }
    app.world_mut().flush();

    // 1000 frames ≈ 16.7 sec при 60 fps
    for frame in 0..1000 {
        app.update();

        if frame % 100 == 0 {
            let mut query = app.world_mut().query::<(&Name, &Actor, &ActorController)>();
            for (name, actor, controller) in query.iter(app.world()) {
                let action = controller.current().map_or("none", |action| action.label());
                log_info(&format!(
                    "Frame {}: {} at ({:.2}, {:.2}) → {}",
                    frame, name, actor.position.x, actor.position.y, action
                ));
            }
        }
    }

    log_info("Skirmish complete!");
}
