//! Session state machine.
//!
//! ```text
//! Placing ──draw──▶ Running { miss_count, hit_pending, timer } ──miss limit──▶ Ended
//! ```
//!
//! Transitions are pure: each takes the current [`Phase`] and returns the
//! next one with the [`Effect`] the board has to apply. `Ended` carries no
//! timer, so reaching it is what cancels relocation.

use crate::game::Interval;

/// Live session bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Running {
    /// Misses so far.
    pub miss_count: u32,
    /// The current target was hit since the last tick.
    pub hit_pending: bool,
    /// Relocation timer, once started.
    pub timer: Option<Interval>,
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Board not drawn yet.
    #[default]
    Placing,
    /// Accepting ticks and clicks.
    Running(Running),
    /// Terminal.
    Ended {
        /// Miss count when the session ended.
        final_miss_count: u32,
    },
}

/// Side effect a transition asks the board to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do.
    Nothing,
    /// Move the target to a fresh random cell.
    Relocate,
    /// The target was hit and must leave the board.
    Hit,
    /// A miss was counted without relocating.
    Missed,
    /// The session just ended.
    GameOver {
        /// Final miss count.
        missed: u32,
    },
}

impl Phase {
    /// Misses recorded so far.
    #[must_use]
    pub const fn miss_count(&self) -> u32 {
        match self {
            Self::Placing => 0,
            Self::Running(running) => running.miss_count,
            Self::Ended { final_miss_count } => *final_miss_count,
        }
    }

    /// Whether the session is over.
    #[must_use]
    pub const fn is_ended(&self) -> bool {
        matches!(self, Self::Ended { .. })
    }

    /// Whether the relocation timer is running.
    #[must_use]
    pub const fn timer_active(&self) -> bool {
        matches!(self, Self::Running(Running { timer: Some(_), .. }))
    }

    /// Mutable access to the relocation timer, if one is running.
    pub fn timer_mut(&mut self) -> Option<&mut Interval> {
        match self {
            Self::Running(running) => running.timer.as_mut(),
            _ => None,
        }
    }
}

/// Board drawn: `Placing → Running`. Other phases are unchanged.
#[must_use]
pub fn on_drawn(phase: Phase) -> Phase {
    match phase {
        Phase::Placing => Phase::Running(Running::default()),
        other => other,
    }
}

/// Attach a relocation timer. Returns `None` if one is already running or
/// the session is not running.
#[must_use]
pub fn on_timer_started(phase: Phase, timer: Interval) -> Option<Phase> {
    match phase {
        Phase::Running(running) if running.timer.is_none() => Some(Phase::Running(Running {
            timer: Some(timer),
            ..running
        })),
        _ => None,
    }
}

/// One relocation tick.
///
/// An unhit target counts as a miss; a hit target clears the flag. Reaching
/// `max_misses` ends the session instead of relocating.
#[must_use]
pub fn on_tick(phase: Phase, max_misses: u32) -> (Phase, Effect) {
    let Phase::Running(running) = phase else {
        return (phase, Effect::Nothing);
    };

    let running = if running.hit_pending {
        Running {
            hit_pending: false,
            ..running
        }
    } else {
        Running {
            miss_count: running.miss_count.saturating_add(1),
            ..running
        }
    };

    end_if_exhausted(running, max_misses, Effect::Relocate)
}

/// The player clicked the target.
#[must_use]
pub fn on_target_click(phase: Phase) -> (Phase, Effect) {
    match phase {
        Phase::Running(running) => (
            Phase::Running(Running {
                hit_pending: true,
                ..running
            }),
            Effect::Hit,
        ),
        other => (other, Effect::Nothing),
    }
}

/// The player clicked an empty cell. The hit flag is left untouched.
#[must_use]
pub fn on_empty_click(phase: Phase, max_misses: u32) -> (Phase, Effect) {
    let Phase::Running(running) = phase else {
        return (phase, Effect::Nothing);
    };

    let running = Running {
        miss_count: running.miss_count.saturating_add(1),
        ..running
    };

    end_if_exhausted(running, max_misses, Effect::Missed)
}

fn end_if_exhausted(running: Running, max_misses: u32, otherwise: Effect) -> (Phase, Effect) {
    if running.miss_count >= max_misses {
        (
            Phase::Ended {
                final_miss_count: running.miss_count,
            },
            Effect::GameOver {
                missed: running.miss_count,
            },
        )
    } else {
        (Phase::Running(running), otherwise)
    }
}
