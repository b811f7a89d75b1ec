//! Tests for ActorController arbitration and action lifecycle.

use bevy::prelude::*;

use crate::action::test_rig::Rig;
use crate::action::{Action, Arbitration, PRIORITY_DEFAULT, PRIORITY_STUN, PRIORITY_TERMINAL};
use crate::combat::CombatEffect;
use crate::components::{Animator, AttackStyle, PlayerInput};
use crate::error::ActionError;
use crate::physics::KNOCKBACK_DECAY;

#[test]
fn test_initialize_picks_default_action() {
    let mut player = Rig::player();
    player.actor.position = Vec2::new(2.0, 3.0);
    player.init();
    assert_eq!(player.label(), Some("Idle"));
    assert_eq!(player.actor.spawn_origin, Vec2::new(2.0, 3.0));
    assert_eq!(player.animator.playing(), Some("Idle"));

    let mut monster = Rig::monster(AttackStyle::Swing);
    monster.init();
    assert_eq!(monster.label(), Some("Patrol"));
}

#[test]
fn test_idle_challenged_by_swing_starts_immediately() {
    let mut rig = Rig::player();
    rig.init();
    rig.body.velocity = Vec2::new(4.0, 0.0);

    assert_eq!(rig.perform(Action::swing(), PRIORITY_DEFAULT), Arbitration::Started);

    assert_eq!(rig.label(), Some("Swing"));
    assert_eq!(rig.animator.playing(), Some("Swing"));
    assert_eq!(rig.current().core.duration, 0.4); // Длина клипа
    assert_eq!(rig.current().phase(), 0);
    assert_eq!(rig.body.velocity, Vec2::ZERO); // halt momentum
    assert_eq!(rig.controller.terminations(), 1); // Idle прошёл termination hook
}

#[test]
fn test_interrupt_cancels_outgoing_script() {
    let mut rig = Rig::player();
    let mut idle = Action::idle();

    let vetoed = rig.with(|_, cx| {
        idle.start(cx);
        assert!(idle.script_running());
        idle.interrupt(cx, &Action::swing())
    });

    assert!(!vetoed);
    assert!(!idle.script_running());
}

#[test]
fn test_dead_plays_death_clip_once_and_never_expires() {
    let mut rig = Rig::player();
    rig.init();
    rig.perform(Action::swing(), PRIORITY_DEFAULT);
    let restarts = rig.animator.started;

    // Swing → Die без промежуточного "Idle"
    rig.perform(Action::dead(), PRIORITY_TERMINAL);

    assert_eq!(rig.animator.playing(), Some("Die"));
    assert_eq!(rig.animator.started, restarts + 1);
    assert_eq!(rig.current().core.duration, 0.0); // "Die" 1.0s в библиотеке, но не duration
}

#[test]
fn test_equal_or_lower_priority_never_interrupts() {
    let mut rig = Rig::player();
    rig.init();
    let stun = Action::stun(&rig.actor, 2.0);
    rig.perform(stun, PRIORITY_STUN);
    rig.frame();

    let before = rig.current().clone();

    for priority in [0.0, 1.0, 2.5, 3.0] {
        assert_eq!(rig.perform(Action::swing(), priority), Arbitration::Rejected);
        assert_eq!(rig.current(), &before);
    }
}

#[test]
fn test_stun_restores_rotation_when_displaced_by_terminal() {
    let mut rig = Rig::player();
    rig.init();
    rig.actor.facing = 30.0;

    let stun = Action::stun(&rig.actor, 0.5);
    assert_eq!(rig.perform(stun, PRIORITY_STUN), Arbitration::Started);

    rig.frames(2);
    assert_ne!(rig.actor.facing, 30.0); // Крутится

    assert_eq!(rig.perform(Action::swing(), PRIORITY_DEFAULT), Arbitration::Rejected);
    assert_eq!(rig.label(), Some("Stun"));

    assert_eq!(rig.perform(Action::dead(), PRIORITY_TERMINAL), Arbitration::Started);
    assert_eq!(rig.label(), Some("Dead"));
    assert_eq!(rig.actor.facing, 30.0);
}

#[test]
fn test_stun_spins_full_turn_over_duration() {
    let mut rig = Rig::player();
    rig.init();
    rig.actor.facing = 10.0;

    let stun = Action::stun(&rig.actor, 0.5);
    rig.perform(stun, PRIORITY_STUN);

    // 360° / 0.5s = 720°/s, dt 0.125 → 90° за frame
    rig.frame();
    assert_eq!(rig.actor.facing, 100.0);
    rig.frame();
    assert_eq!(rig.actor.facing, 190.0);
    rig.frame();
    assert_eq!(rig.actor.facing, 280.0);

    // Timer истёк → End → Idle, поворот восстановлен
    rig.frame();
    assert_eq!(rig.label(), Some("Idle"));
    assert_eq!(rig.actor.facing, 10.0);
}

#[test]
fn test_zero_duration_stun_finishes_through_script() {
    let mut rig = Rig::player();
    rig.init();

    let stun = Action::stun(&rig.actor, 0.0);
    rig.perform(stun, PRIORITY_STUN);
    assert_eq!(rig.label(), Some("Stun"));

    rig.frame();
    assert_eq!(rig.label(), Some("Idle"));
}

#[test]
fn test_duration_terminates_at_first_update_reaching_it() {
    let mut rig = Rig::player();
    rig.animator = Animator::default().with_clip("Swing", 0.5);
    rig.init();
    rig.perform(Action::swing(), PRIORITY_DEFAULT);

    // 0.125 × 3 = 0.375 < 0.5
    rig.frames(3);
    assert_eq!(rig.label(), Some("Swing"));
    assert_eq!(rig.current().progress(), 0.75);

    // 0.5 >= 0.5 → End → default action
    rig.frame();
    assert_eq!(rig.label(), Some("Idle"));
    assert_eq!(rig.current().progress(), 0.0);
}

#[test]
fn test_end_ignores_superseded_activation() {
    let mut rig = Rig::player();
    rig.init();
    rig.perform(Action::swing(), PRIORITY_DEFAULT);
    let serial = rig.current().serial;

    rig.with(|controller, cx| controller.end(cx, serial - 1));

    assert_eq!(rig.label(), Some("Swing"));
    assert_eq!(rig.current().serial, serial);
}

#[test]
fn test_each_activation_gets_fresh_serial() {
    let mut rig = Rig::player();
    rig.init();
    let first = rig.current().serial;

    rig.perform(Action::swing(), PRIORITY_DEFAULT);
    let second = rig.current().serial;

    assert!(second > first);
}

#[test]
fn test_single_hit_per_target_per_activation() {
    let mut rig = Rig::player();
    rig.init();
    rig.perform(Action::swing(), PRIORITY_DEFAULT);

    let target = Entity::from_raw(50);
    let other = Entity::from_raw(51);
    let hurtbox = Entity::from_raw(60);

    for _ in 0..2 {
        rig.with(|controller, cx| controller.hit_begin(cx, target, hurtbox))
            .expect("swing is current");
    }
    assert_eq!(rig.effects.len(), 3);

    rig.with(|controller, cx| controller.hit_begin(cx, other, hurtbox))
        .expect("swing is current");
    assert_eq!(rig.effects.len(), 6);
}

#[test]
fn test_hit_effects_in_order() {
    let mut rig = Rig::player();
    rig.actor.position = Vec2::new(1.0, 1.0);
    rig.init();
    rig.perform(Action::swing(), PRIORITY_DEFAULT);

    let target = Entity::from_raw(50);
    rig.with(|controller, cx| controller.hit_begin(cx, target, Entity::from_raw(60)))
        .expect("swing is current");

    assert_eq!(
        rig.effects,
        vec![
            CombatEffect::Damage {
                target,
                amount: 1.0,
                source: Some(rig.entity),
            },
            CombatEffect::Stun {
                target,
                duration: 0.5,
                priority: PRIORITY_STUN,
            },
            CombatEffect::Knockback {
                target,
                from: Vec2::new(1.0, 1.0),
                force: 10.0,
            },
        ]
    );
}

#[test]
fn test_lunge_hits_without_knockback() {
    let mut rig = Rig::monster(AttackStyle::Lunge);
    rig.init();
    rig.perform(Action::lunge(), PRIORITY_DEFAULT);

    let target = Entity::from_raw(50);
    rig.with(|controller, cx| controller.hit_begin(cx, target, Entity::from_raw(60)))
        .expect("lunge is current");

    assert!(matches!(rig.effects[2], CombatEffect::Knockback { force, .. } if force == 0.0));
}

#[test]
fn test_idle_ignores_hits() {
    let mut rig = Rig::player();
    rig.init();

    rig.with(|controller, cx| controller.hit_begin(cx, Entity::from_raw(50), Entity::from_raw(60)))
        .expect("idle is current");
    assert!(rig.effects.is_empty());
}

#[test]
fn test_hit_without_action_is_invalid_state() {
    let mut rig = Rig::player();

    let result = rig.with(|controller, cx| controller.hit_begin(cx, Entity::from_raw(50), Entity::from_raw(60)));
    assert_eq!(result, Err(ActionError::NoCurrentAction { actor: rig.entity }));

    let result = rig.with(|controller, cx| controller.hit_end(cx, Entity::from_raw(50), Entity::from_raw(60)));
    assert!(result.is_err());
    assert!(rig.effects.is_empty());
}

#[test]
fn test_knockback_decays_each_physics_tick() {
    let mut rig = Rig::player();
    rig.init();
    rig.actor.knockback = Vec2::new(10.0, 0.0);

    for tick in 1..=20 {
        rig.physics_tick();
        let expected = 10.0 * KNOCKBACK_DECAY.powi(tick);
        assert!((rig.actor.knockback.x - expected).abs() < 1e-3, "tick {tick}");
        assert_eq!(rig.body.velocity, rig.actor.knockback); // Idle, без intent
    }

    // 10 × 0.9^44 < 0.1 → snap
    for _ in 0..30 {
        rig.physics_tick();
    }
    assert_eq!(rig.actor.knockback, Vec2::ZERO);
}

#[test]
fn test_physics_tick_without_action_applies_knockback_only() {
    let mut rig = Rig::player();
    rig.actor.desired_move = Vec2::X;
    rig.actor.knockback = Vec2::new(0.0, 10.0);

    rig.physics_tick();

    assert_eq!(rig.body.velocity, Vec2::new(0.0, 9.0));
}

#[test]
fn test_velocity_combines_intent_and_knockback() {
    let mut rig = Rig::player();
    rig.init();
    rig.actor.desired_move = Vec2::new(0.0, 2.0);

    rig.physics_tick();
    assert_eq!(rig.body.velocity, Vec2::new(0.0, 5.0)); // speed 5 × normalize

    let stun = Action::stun(&rig.actor, 1.0);
    rig.perform(stun, PRIORITY_STUN);
    rig.physics_tick();
    assert_eq!(rig.body.velocity, Vec2::ZERO); // move_mult 0
}

#[test]
fn test_swing_steps_forward_then_freezes() {
    let mut rig = Rig::player();
    rig.init();
    rig.actor.facing = 90.0;
    rig.perform(Action::swing(), PRIORITY_DEFAULT);

    rig.frame();
    assert!((rig.actor.desired_move - Vec2::Y).length() < 1e-5);
    assert_eq!(rig.current().core.move_mult, 1.0);

    rig.controller.set_phase(1);
    assert_eq!(rig.current().phase(), 1);
    assert_eq!(rig.current().core.move_mult, 0.0);

    rig.physics_tick();
    assert_eq!(rig.body.velocity, Vec2::ZERO);
}

#[test]
fn test_lunge_speed_scales_with_attack_range() {
    let mut rig = Rig::monster(AttackStyle::Lunge);
    if let Some(profile) = rig.ai.as_mut() {
        profile.attack_range = 3.0;
    }
    rig.init();
    rig.perform(Action::lunge(), PRIORITY_DEFAULT);

    rig.frame();
    assert_eq!(rig.current().core.move_mult, 3.0);

    rig.controller.set_phase(1);
    rig.frame();
    assert_eq!(rig.current().core.move_mult, 0.0);
}

#[test]
fn test_set_phase_without_action_is_noop() {
    let mut rig = Rig::player();
    rig.controller.set_phase(3);
    assert!(rig.controller.current().is_none());
}

#[test]
fn test_veto_leaves_action_untouched() {
    let mut rig = Rig::player();
    rig.init();
    rig.perform(Action::dead(), PRIORITY_TERMINAL);
    rig.frames(3);
    assert_eq!(rig.animator.playing(), Some("Die"));

    let before = rig.current().clone();
    assert_eq!(rig.perform(Action::swing(), 10.0), Arbitration::Vetoed);
    assert_eq!(rig.current(), &before);

    // Труп не заканчивается сам
    rig.frames(20);
    assert_eq!(rig.label(), Some("Dead"));
}

#[test]
fn test_patrol_switches_to_chase_on_sight_same_frame() {
    let mut rig = Rig::monster(AttackStyle::Swing);
    rig.init();
    rig.add_target(Vec2::new(0.0, 3.0)); // vision 4

    let rng_before = rig.rng.get_word_pos();
    let facing_before = rig.actor.facing;

    rig.frame();

    assert_eq!(rig.label(), Some("Chase"));
    // Patrol логика после переключения не выполнялась
    assert_eq!(rig.rng.get_word_pos(), rng_before);
    assert_eq!(rig.actor.facing, facing_before);
}

#[test]
fn test_patrol_ignores_target_behind_wall_or_out_of_range() {
    let mut rig = Rig::monster(AttackStyle::Swing);
    rig.init();
    rig.add_target(Vec2::new(0.0, 3.0));
    rig.add_wall(Vec2::new(-5.0, 1.5), Vec2::new(5.0, 1.5));

    rig.frame();
    assert_eq!(rig.label(), Some("Patrol"));

    let mut far = Rig::monster(AttackStyle::Swing);
    far.init();
    far.add_target(Vec2::new(0.0, 6.0));

    far.frame();
    assert_eq!(far.label(), Some("Patrol"));
}

#[test]
fn test_patrol_waypoints_stay_near_spawn() {
    let mut rig = Rig::monster(AttackStyle::Swing);
    rig.actor.position = Vec2::new(10.0, -4.0);
    rig.init();

    for _ in 0..5 {
        rig.with(|controller, cx| controller.initialize(cx));
        if let Some(Action {
            kind: crate::action::ActionKind::Locomotion(crate::action::Locomotion::Patrol { waypoint }),
            ..
        }) = rig.controller.current()
        {
            assert!((waypoint.x - 10.0).abs() <= 5.0);
            assert!((waypoint.y + 4.0).abs() <= 5.0);
        } else {
            panic!("monster default action should be Patrol");
        }
    }
}

#[test]
fn test_chase_attacks_when_in_range_and_facing() {
    let mut rig = Rig::monster(AttackStyle::Lunge);
    rig.init();
    rig.add_target(Vec2::new(1.0, 0.0)); // facing 0 → смотрим прямо на цель

    // Чтобы patrol не стартовал chase сам, переводим явно
    rig.perform(Action::chase(), PRIORITY_DEFAULT);
    assert_eq!(rig.label(), Some("Chase"));

    rig.frame();
    assert_eq!(rig.label(), Some("Lunge"));
}

#[test]
fn test_chase_turns_before_attacking() {
    let mut rig = Rig::monster(AttackStyle::Swing);
    rig.init();
    rig.add_target(Vec2::new(-1.0, 0.0)); // сзади
    rig.perform(Action::chase(), PRIORITY_DEFAULT);

    rig.frame();
    assert_eq!(rig.label(), Some("Chase"));
    assert_eq!(rig.actor.desired_move, Vec2::ZERO); // в attack range

    // 180° за 0.5s → 4 frames по 0.125
    rig.frames(4);
    assert_eq!(rig.label(), Some("Swing"));
}

#[test]
fn test_chase_without_target_stands_still() {
    let mut rig = Rig::monster(AttackStyle::Swing);
    rig.init();
    rig.perform(Action::chase(), PRIORITY_DEFAULT);
    rig.actor.desired_move = Vec2::ONE;

    rig.frame();

    assert_eq!(rig.label(), Some("Chase"));
    assert_eq!(rig.actor.desired_move, Vec2::ZERO);
}

#[test]
fn test_player_input_drives_intents_and_swing() {
    let mut rig = Rig::player();
    rig.init();
    let mut input = PlayerInput {
        move_axis: Vec2::new(1.0, 0.0),
        aim_point: Some(Vec2::new(0.0, 10.0)),
        attack_pressed: true,
    };

    rig.with(|controller, cx| crate::player::player_frame(controller, cx, &mut input));

    assert_eq!(rig.actor.desired_move, Vec2::new(1.0, 0.0));
    // 180° за 0.1s, dt 0.125 → сразу довернулись
    assert!((rig.actor.facing - 90.0).abs() < 1e-3);
    let facing = rig.actor.facing;
    assert_eq!(rig.label(), Some("Swing"));
    assert!(!input.attack_pressed);

    // Во время swing rotate_mult = 0: курсор не крутит актора
    input.aim_point = Some(Vec2::new(10.0, 0.0));
    rig.with(|controller, cx| crate::player::player_frame(controller, cx, &mut input));
    assert_eq!(rig.actor.facing, facing);
}
