//! Frame driver enforcing the gather → tick → apply order
//!
//! Each frame: gameplay systems submit goals (directly, through the
//! arbiter, or through the cross-thread inbox), the weights tick exactly
//! once, then the rig is updated exactly once from the fresh weights.

use crate::blend::arbitration::{ArbitrationReport, GoalArbiter};
use crate::blend::blender::GoalBlender;
use crate::blend::queue::GoalInbox;
use crate::core::error::{BlendError, Result};
use crate::rig::{apply_pose, PoseTarget};
use serde::Serialize;

/// Where the current frame is in its update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FramePhase {
    /// Accepting goal submissions
    Gathering,
    /// Weights are up to date; waiting for the rig pass
    Ticked,
    /// Rig updated; the next call to `begin_frame` starts a new frame
    Applied,
}

/// Owns a blender and sequences its per-frame passes
#[derive(Debug)]
pub struct FrameDriver {
    blender: GoalBlender,
    arbiter: GoalArbiter,
    inbox: Option<GoalInbox>,
    phase: FramePhase,
    frame: u64,
    last_arbitration: ArbitrationReport,
}

impl FrameDriver {
    pub fn new(blender: GoalBlender) -> Self {
        Self {
            blender,
            arbiter: GoalArbiter::new(),
            inbox: None,
            phase: FramePhase::Applied,
            frame: 0,
            last_arbitration: ArbitrationReport::default(),
        }
    }

    /// Also drain `inbox` at the start of every tick
    pub fn with_inbox(mut self, inbox: GoalInbox) -> Self {
        self.inbox = Some(inbox);
        self
    }

    /// Start gathering for a new frame
    ///
    /// Calling it again while still gathering keeps the same frame.
    pub fn begin_frame(&mut self) -> &mut GoalBlender {
        if self.phase != FramePhase::Gathering {
            self.frame += 1;
            self.phase = FramePhase::Gathering;
        }
        &mut self.blender
    }

    /// Arbiter for contested submissions; only valid while gathering
    pub fn arbiter(&mut self) -> Result<&mut GoalArbiter> {
        self.require_phase(FramePhase::Gathering)?;
        Ok(&mut self.arbiter)
    }

    /// Drain the inbox, commit arbitration, then smooth all weights
    pub fn tick(&mut self, delta_time: f32) -> Result<()> {
        self.require_phase(FramePhase::Gathering)?;

        if let Some(inbox) = &self.inbox {
            let drained = inbox.drain_into(&mut self.blender);
            if drained.rejected > 0 {
                tracing::warn!(
                    "Frame {}: {} of {} queued goal commands rejected",
                    self.frame,
                    drained.rejected,
                    drained.processed
                );
            }
        }

        self.last_arbitration = self.arbiter.commit(&mut self.blender);
        self.blender.advance(delta_time);
        self.phase = FramePhase::Ticked;
        Ok(())
    }

    /// Write this frame's resolved goals onto `target`
    pub fn apply<T: PoseTarget + ?Sized>(&mut self, target: &mut T) -> Result<usize> {
        self.require_phase(FramePhase::Ticked)?;
        let applied = apply_pose(&self.blender, target);
        self.phase = FramePhase::Applied;
        Ok(applied)
    }

    pub fn blender(&self) -> &GoalBlender {
        &self.blender
    }

    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Frames begun so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_arbitration(&self) -> ArbitrationReport {
        self.last_arbitration
    }

    fn require_phase(&self, expected: FramePhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(BlendError::PhaseOrder {
                expected,
                found: self.phase,
            })
        }
    }
}
