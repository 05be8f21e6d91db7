//! Cross-thread goal submission
//!
//! The blender is single-threaded. Systems running elsewhere (physics,
//! AI workers) send [`GoalCommand`]s through a [`GoalSender`]; the thread
//! that owns the blender drains them once per frame before ticking.

use crate::blend::blender::GoalBlender;
use crate::blend::request::GoalRequest;
use crate::core::error::{BlendError, Result};
use crate::core::types::GoalKey;
use crossbeam_channel::{Receiver, Sender};

/// One deferred blender call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalCommand {
    Apply(GoalRequest),
    Stop(GoalKey),
    Remove(GoalKey),
}

/// Sending half, cheap to clone across threads
#[derive(Debug, Clone)]
pub struct GoalSender {
    sender: Sender<GoalCommand>,
}

impl GoalSender {
    pub fn send(&self, command: GoalCommand) -> Result<()> {
        self.sender
            .send(command)
            .map_err(|_| BlendError::QueueDisconnected)
    }

    pub fn apply(&self, request: GoalRequest) -> Result<()> {
        self.send(GoalCommand::Apply(request))
    }

    pub fn stop(&self, key: GoalKey) -> Result<()> {
        self.send(GoalCommand::Stop(key))
    }

    pub fn remove(&self, key: GoalKey) -> Result<()> {
        self.send(GoalCommand::Remove(key))
    }
}

/// Receiving half, owned by the blender's thread
#[derive(Debug)]
pub struct GoalInbox {
    receiver: Receiver<GoalCommand>,
}

/// Counts from one drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub processed: usize,
    pub rejected: usize,
}

impl GoalInbox {
    /// Apply every pending command in send order without blocking
    pub fn drain_into(&self, blender: &mut GoalBlender) -> DrainReport {
        let mut report = DrainReport::default();
        while let Ok(command) = self.receiver.try_recv() {
            report.processed += 1;
            match command {
                GoalCommand::Apply(request) => {
                    if blender.apply_goal(request).is_err() {
                        report.rejected += 1;
                    }
                }
                GoalCommand::Stop(key) => blender.stop_goal(key),
                GoalCommand::Remove(key) => {
                    blender.remove_goal(key);
                }
            }
        }
        report
    }

    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

/// Create a command queue; bounded when `capacity` is given
pub fn command_channel(capacity: Option<usize>) -> (GoalSender, GoalInbox) {
    let (sender, receiver) = match capacity {
        Some(capacity) => crossbeam_channel::bounded(capacity),
        None => crossbeam_channel::unbounded(),
    };
    (GoalSender { sender }, GoalInbox { receiver })
}
