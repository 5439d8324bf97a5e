//! # Attack Animation
//!
//! Fixed six-frame attack/rest toggle shown when something attacks.
//!
//! [`AttackAnimation`] is the pure state machine; a UI loop can step it
//! directly. [`run_attack_animation`] drives it on a tokio timer and returns a
//! handle that cancels the remaining frames.

use crate::{config, AttackArt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// One frame of the attack animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationState {
    /// Frame number, `0..ATTACK_FRAME_COUNT`
    pub frame_index: usize,
}

impl AnimationState {
    /// The first frame, an attack pose.
    pub fn initial() -> Self {
        Self { frame_index: 0 }
    }

    /// Whether this frame shows the attack pose. Even frames attack.
    pub fn is_attack_frame(self) -> bool {
        self.frame_index % 2 == 0
    }

    /// Whether this is the last frame of the sequence.
    pub fn is_terminal(self) -> bool {
        self.frame_index + 1 >= config::ATTACK_FRAME_COUNT
    }

    /// The following frame, or `None` after the terminal frame.
    pub fn next(self) -> Option<Self> {
        if self.is_terminal() {
            None
        } else {
            Some(Self {
                frame_index: self.frame_index + 1,
            })
        }
    }

    /// What to draw for this frame given a monster's attack art.
    ///
    /// Without attack art every frame keeps the resting pose.
    pub fn pose(self, art: &AttackArt) -> Pose<'_> {
        match art.image() {
            Some(image) if self.is_attack_frame() => Pose::Attack(image),
            _ => Pose::Rest,
        }
    }
}

/// Visual pose for one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose<'a> {
    /// Draw the attack image
    Attack(&'a str),
    /// Draw the normal resting image
    Rest,
}

/// Six-state attack animation: `ATTACK, REST, ATTACK, REST, ATTACK, REST`.
///
/// It never loops. Once the terminal frame is advanced past, the state is
/// gone and [`current`](Self::current) returns `None`.
///
/// # Examples
///
/// ```
/// use wildquest::AttackAnimation;
///
/// let pattern: Vec<bool> = AttackAnimation::new()
///     .frames()
///     .map(|frame| frame.is_attack_frame())
///     .collect();
/// assert_eq!(pattern, vec![true, false, true, false, true, false]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackAnimation {
    state: Option<AnimationState>,
}

impl AttackAnimation {
    /// Starts a new animation on frame 0.
    pub fn new() -> Self {
        Self {
            state: Some(AnimationState::initial()),
        }
    }

    /// The frame currently shown, if the animation is still running.
    pub fn current(&self) -> Option<AnimationState> {
        self.state
    }

    /// Moves to the next frame and returns it.
    pub fn advance(&mut self) -> Option<AnimationState> {
        self.state = self.state.and_then(AnimationState::next);
        self.state
    }

    /// Whether every frame has been shown.
    pub fn is_finished(&self) -> bool {
        self.state.is_none()
    }

    /// Consumes the animation, yielding the remaining frames in order.
    pub fn frames(self) -> impl Iterator<Item = AnimationState> {
        std::iter::successors(self.state, |frame| frame.next())
    }
}

impl Default for AttackAnimation {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running timed animation.
///
/// Dropping the handle detaches the animation; call [`cancel`](Self::cancel)
/// when the combat context goes away.
#[derive(Debug)]
pub struct AnimationHandle {
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<bool>,
}

impl AnimationHandle {
    /// Stops the animation. No frame or completion callback starts afterwards.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }

    /// Whether the animation task has ended, by completion or cancellation.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the animation to end.
    ///
    /// Returns `true` if it ran to completion and `false` if it was cancelled.
    pub async fn finished(self) -> bool {
        matches!(self.task.await, Ok(true))
    }
}

/// Runs the attack animation at the standard cadence.
///
/// `on_frame` is called once per frame with whether it is an attack-pose
/// frame; `on_complete` is called once after the last frame. Must be called
/// from within a tokio runtime.
pub fn run_attack_animation<F, G>(on_frame: F, on_complete: G) -> AnimationHandle
where
    F: FnMut(bool) + Send + 'static,
    G: FnOnce() + Send + 'static,
{
    run_attack_animation_with_interval(
        Duration::from_millis(config::ATTACK_FRAME_INTERVAL_MS),
        on_frame,
        on_complete,
    )
}

/// Runs the attack animation with a custom delay between frames.
///
/// Frame 0 fires immediately; each later frame fires one `interval` after
/// the previous one. A zero interval is treated as one millisecond.
pub fn run_attack_animation_with_interval<F, G>(
    interval: Duration,
    mut on_frame: F,
    on_complete: G,
) -> AnimationHandle
where
    F: FnMut(bool) + Send + 'static,
    G: FnOnce() + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    let task = tokio::spawn(async move {
        let mut animation = AttackAnimation::new();
        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while let Some(frame) = animation.current() {
            ticker.tick().await;
            if flag.load(Ordering::SeqCst) {
                return false;
            }
            on_frame(frame.is_attack_frame());
            animation.advance();
        }

        if flag.load(Ordering::SeqCst) {
            return false;
        }
        on_complete();
        true
    });

    AnimationHandle { cancelled, task }
}
