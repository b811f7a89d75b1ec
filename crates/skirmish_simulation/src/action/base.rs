//! Action — единица поведения актора
//!
//! # Architecture
//!
//! - `ActionCore`: общие поля (phase, timer, multipliers, priority, clip)
//! - `ActionKind`: закрытый набор вариантов (locomotion / attack / stun / dead),
//!   каждый со своим состоянием
//! - `Behavior`: маленький capability interface, через который core
//!   диспетчеризует варианты
//!
//! # Lifecycle
//!
//! ```text
//! new → start (reset, halt momentum, script, clip, phase 0)
//!   ↓
//! per frame: on_frame → timer → script step
//!   ↓
//! End (timer / script) или Interrupt (арбитраж)
//!   ↓
//! terminate: cancel script + variant cleanup → drop
//! ```
//!
//! Instance никогда не переиспользуется: каждая активация — новый `Action`.

use bevy::prelude::*;

use crate::action::attack::Attack;
use crate::action::context::ActorCx;
use crate::action::locomotion::Locomotion;
use crate::action::stun::Stun;
use crate::action::terminal::Dead;
use crate::components::{Actor, AttackStyle};

/// 0 = idle, можно прервать чем угодно
pub const PRIORITY_IDLE: f32 = 0.0;
/// Обычные actions и приоритет вызова `do_action` по умолчанию
pub const PRIORITY_DEFAULT: f32 = 1.0;
/// Crowd control: атакой не прервать
pub const PRIORITY_STUN: f32 = 3.0;
/// Смерть
pub const PRIORITY_TERMINAL: f32 = 5.0;

/// Общие поля любого action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCore {
    /// Под-стадия timeline (обычно ставится phase markers из анимации)
    pub phase: u32,
    /// Сколько времени action уже идёт (только при `duration > 0`)
    pub elapsed: f32,
    /// `> 0` — action сам заканчивается по таймеру, иначе пока не прервут
    pub duration: f32,
    /// Множитель скорости ходьбы (0 = стоим)
    pub move_mult: f32,
    /// Множитель скорости поворота (0 = не крутимся)
    pub rotate_mult: f32,
    /// Обнулять velocity при старте
    pub halt_momentum: bool,
    pub priority: f32,
    /// Клип анимации. None → `Actor::default_clip`
    pub clip: Option<String>,
    /// Брать `duration` из длины клипа при старте
    pub duration_from_clip: bool,
}

impl Default for ActionCore {
    fn default() -> Self {
        Self {
            phase: 0,
            elapsed: 0.0,
            duration: 0.0,
            move_mult: 0.0,
            rotate_mult: 0.0,
            halt_momentum: true,
            priority: PRIORITY_DEFAULT,
            clip: None,
            duration_from_clip: true,
        }
    }
}

impl ActionCore {
    /// Доля пройденного времени в [0, 1]; 0 для бесконечных actions
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

/// Что action просит у контроллера после своего шага
#[derive(Debug)]
pub enum Flow {
    Continue,
    /// Сменить action через арбитраж (Patrol → Chase, Chase → атака)
    Perform { action: Action, priority: f32 },
    /// Естественное завершение (End)
    Finish,
}

/// Результат одного шага cooperative script
#[derive(Debug)]
pub enum Resume {
    /// Ждём следующий frame
    Yield,
    /// Script закончился; flow применяется как обычно
    Done(Flow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScriptState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

/// Capability interface вариантов.
///
/// Default методы — no-op. Общая логика (gait анимация, удар по цели)
/// живёт в free functions, варианты зовут её явно.
pub trait Behavior {
    /// Сброс per-activation состояния (например, список уже ударенных)
    fn reset(&mut self) {}

    fn on_start(&mut self, _core: &mut ActionCore, _cx: &mut ActorCx) {}

    fn on_frame(&mut self, _core: &mut ActionCore, _cx: &mut ActorCx) -> Flow {
        Flow::Continue
    }

    /// Один шаг cooperative script. По умолчанию: один пустой yield-шаг.
    fn resume(&mut self, _core: &mut ActionCore, _cx: &mut ActorCx) -> Resume {
        Resume::Done(Flow::Continue)
    }

    fn change_phase(&mut self, core: &mut ActionCore, phase: u32) {
        core.phase = phase;
    }

    /// `true` — отказаться от прерывания (текущий action продолжается)
    fn vetoes(&self, _core: &ActionCore, _candidate: &Action) -> bool {
        false
    }

    fn on_terminate(&mut self, _core: &mut ActionCore, _cx: &mut ActorCx) {}

    /// Hurtbox владельца начал пересекать hitbox `struck`
    fn hit_begin(&mut self, _core: &mut ActionCore, _cx: &mut ActorCx, _struck: Entity, _hurtbox: Entity) {}

    fn hit_end(&mut self, _core: &mut ActionCore, _cx: &mut ActorCx, _struck: Entity, _hurtbox: Entity) {}

    /// Что делать после естественного End. None → default action актора
    fn follow_up(&self, _cx: &ActorCx) -> Option<Action> {
        None
    }
}

/// Закрытый набор вариантов
#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    Locomotion(Locomotion),
    Attack(Attack),
    Stun(Stun),
    Dead(Dead),
}

impl ActionKind {
    fn behavior(&mut self) -> &mut dyn Behavior {
        match self {
            ActionKind::Locomotion(inner) => inner,
            ActionKind::Attack(inner) => inner,
            ActionKind::Stun(inner) => inner,
            ActionKind::Dead(inner) => inner,
        }
    }

    fn behavior_ref(&self) -> &dyn Behavior {
        match self {
            ActionKind::Locomotion(inner) => inner,
            ActionKind::Attack(inner) => inner,
            ActionKind::Stun(inner) => inner,
            ActionKind::Dead(inner) => inner,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Номер активации у контроллера (0 — ещё не активирован)
    pub(crate) serial: u64,
    pub core: ActionCore,
    pub kind: ActionKind,
    script: ScriptState,
}

impl Action {
    pub fn new(core: ActionCore, kind: ActionKind) -> Self {
        Self {
            serial: 0,
            core,
            kind,
            script: ScriptState::NotStarted,
        }
    }

    pub fn idle() -> Self {
        Self::new(Locomotion::core(), ActionKind::Locomotion(Locomotion::Idle))
    }

    pub fn patrol() -> Self {
        Self::new(
            Locomotion::core(),
            ActionKind::Locomotion(Locomotion::Patrol { waypoint: Vec2::ZERO }),
        )
    }

    pub fn chase() -> Self {
        Self::new(Locomotion::core(), ActionKind::Locomotion(Locomotion::Chase))
    }

    pub fn swing() -> Self {
        Self::new(Attack::swing_core(), ActionKind::Attack(Attack::new(AttackStyle::Swing)))
    }

    pub fn lunge() -> Self {
        Self::new(Attack::lunge_core(), ActionKind::Attack(Attack::lunge()))
    }

    /// Stun запоминает поворот актора в момент создания
    pub fn stun(victim: &Actor, duration: f32) -> Self {
        Self::new(Stun::core(duration), ActionKind::Stun(Stun::new(victim.facing)))
    }

    pub fn dead() -> Self {
        Self::new(Dead::core(), ActionKind::Dead(Dead))
    }

    pub fn label(&self) -> &'static str {
        match &self.kind {
            ActionKind::Locomotion(Locomotion::Idle) => "Idle",
            ActionKind::Locomotion(Locomotion::Patrol { .. }) => "Patrol",
            ActionKind::Locomotion(Locomotion::Chase) => "Chase",
            ActionKind::Attack(attack) => match attack.style {
                AttackStyle::Swing => "Swing",
                AttackStyle::Lunge => "Lunge",
            },
            ActionKind::Stun(_) => "Stun",
            ActionKind::Dead(_) => "Dead",
        }
    }

    pub fn priority(&self) -> f32 {
        self.core.priority
    }

    pub fn phase(&self) -> u32 {
        self.core.phase
    }

    pub fn progress(&self) -> f32 {
        self.core.progress()
    }

    /// Script ещё выполняется (не закончился и не отменён)
    pub fn script_running(&self) -> bool {
        self.script == ScriptState::Running
    }

    /// Единственная точка, делающая action "живым"
    pub(crate) fn start(&mut self, cx: &mut ActorCx) {
        self.core.elapsed = 0.0;
        self.kind.behavior().reset();

        if self.core.halt_momentum {
            cx.body.velocity = Vec2::ZERO;
        }

        // Свежий instance: отменять нечего
        self.script = ScriptState::Running;

        match self.core.clip.as_deref() {
            Some(clip) => {
                cx.animator.play(clip);
                // Duration берём из длины клипа (если движок его знает)
                if self.core.duration_from_clip {
                    if let Some(duration) = cx.animator.clip_duration(clip) {
                        self.core.duration = duration;
                    }
                }
            }
            None => cx.animator.play(&cx.actor.default_clip),
        }

        self.change_phase(0);
        self.kind.behavior().on_start(&mut self.core, cx);
    }

    pub(crate) fn frame_logic(&mut self, cx: &mut ActorCx) -> Flow {
        self.kind.behavior().on_frame(&mut self.core, cx)
    }

    /// Двигает таймер; `true` — время вышло
    pub(crate) fn advance_timer(&mut self, dt: f32) -> bool {
        if self.core.duration <= 0.0 {
            return false;
        }
        self.core.elapsed += dt;
        self.core.elapsed >= self.core.duration
    }

    pub(crate) fn resume_script(&mut self, cx: &mut ActorCx) -> Flow {
        if self.script != ScriptState::Running {
            return Flow::Continue;
        }
        match self.kind.behavior().resume(&mut self.core, cx) {
            Resume::Yield => Flow::Continue,
            Resume::Done(flow) => {
                self.script = ScriptState::Completed;
                flow
            }
        }
    }

    /// Velocity на physics tick. Ничего не мутирует.
    pub fn compute_velocity(&self, actor: &Actor) -> Vec2 {
        self.core.move_mult * actor.speed * actor.desired_move.normalize_or_zero() + actor.knockback
    }

    /// `true` — veto: action остаётся, кандидат выбрасывается.
    /// При veto cleanup не выполняется (action продолжает жить).
    pub(crate) fn interrupt(&mut self, cx: &mut ActorCx, candidate: &Action) -> bool {
        if self.kind.behavior_ref().vetoes(&self.core, candidate) {
            return true;
        }
        self.terminate(cx);
        false
    }

    /// Общий termination hook (End и Interrupt)
    pub(crate) fn terminate(&mut self, cx: &mut ActorCx) {
        if self.script == ScriptState::Running {
            self.script = ScriptState::Cancelled;
        }
        self.kind.behavior().on_terminate(&mut self.core, cx);
    }

    pub fn change_phase(&mut self, phase: u32) {
        self.kind.behavior().change_phase(&mut self.core, phase);
    }

    pub(crate) fn hit_begin(&mut self, cx: &mut ActorCx, struck: Entity, hurtbox: Entity) {
        self.kind.behavior().hit_begin(&mut self.core, cx, struck, hurtbox);
    }

    pub(crate) fn hit_end(&mut self, cx: &mut ActorCx, struck: Entity, hurtbox: Entity) {
        self.kind.behavior().hit_end(&mut self.core, cx, struck, hurtbox);
    }

    pub(crate) fn follow_up(&self, cx: &ActorCx) -> Option<Action> {
        self.kind.behavior_ref().follow_up(cx)
    }
}

/// Fallback action: Patrol для акторов с AI capability, Idle для остальных
pub fn default_action(cx: &ActorCx) -> Action {
    if cx.ai.is_some() {
        Action::patrol()
    } else {
        Action::idle()
    }
}

/// Предпочитаемая атака актора
pub fn default_attack_action(actor: &Actor) -> Action {
    match actor.attack {
        AttackStyle::Swing => Action::swing(),
        AttackStyle::Lunge => Action::lunge(),
    }
}
