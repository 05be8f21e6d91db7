//! Per-frame ownership of goal channels
//!
//! The blender itself is last-write-wins. When several gameplay systems
//! may want the same limb (a combat card and a climb, say), they submit
//! through a [`GoalArbiter`] instead, which keeps one owner per key per
//! frame and commits the winners in a single batch.

use crate::blend::blender::GoalBlender;
use crate::blend::request::GoalRequest;
use crate::core::types::GoalKey;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Identifies a gameplay system submitting goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub u32);

/// Who holds a key during the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Claim {
    Unclaimed,
    Claimed {
        owner: OwnerId,
        priority: u8,
        request: GoalRequest,
    },
}

/// Result of committing one frame of submissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArbitrationReport {
    /// Requests forwarded to the blender
    pub applied: usize,
    /// Stops forwarded to the blender
    pub stopped: usize,
    /// Winning requests the blender refused as invalid
    pub rejected: usize,
}

/// Collects claims for one frame and commits the winners
#[derive(Debug, Default)]
pub struct GoalArbiter {
    claims: AHashMap<GoalKey, Claim>,
    releases: Vec<(OwnerId, GoalKey)>,
    last_owners: AHashMap<GoalKey, OwnerId>,
}

impl GoalArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a request on behalf of `owner`
    ///
    /// A higher priority takes the key. At equal priority the same owner
    /// may overwrite its own claim but a different owner is refused, so
    /// the first claimant of the frame keeps the limb. Returns whether the
    /// submission now holds the key.
    pub fn submit(&mut self, owner: OwnerId, priority: u8, request: GoalRequest) -> bool {
        let key = request.goal_key;
        let claim = self.claims.entry(key).or_insert(Claim::Unclaimed);

        let accepted = match *claim {
            Claim::Unclaimed => true,
            Claim::Claimed {
                owner: holder,
                priority: held,
                ..
            } => priority > held || (priority == held && holder == owner),
        };

        if accepted {
            *claim = Claim::Claimed {
                owner,
                priority,
                request,
            };
        } else {
            tracing::debug!(
                "Owner {:?} (priority {}) refused for {}: already claimed this frame",
                owner,
                priority,
                key
            );
        }
        accepted
    }

    /// Ask for `key` to fade out; ignored if anyone claims it this frame
    pub fn release(&mut self, owner: OwnerId, key: GoalKey) {
        self.releases.push((owner, key));
    }

    /// Current claim state for a key
    pub fn claim(&self, key: GoalKey) -> Claim {
        self.claims.get(&key).copied().unwrap_or(Claim::Unclaimed)
    }

    /// Owner whose request was applied for `key` at the last commit
    pub fn owner_of(&self, key: GoalKey) -> Option<OwnerId> {
        self.last_owners.get(&key).copied()
    }

    /// Forward winners and uncontested releases, then clear the frame
    pub fn commit(&mut self, blender: &mut GoalBlender) -> ArbitrationReport {
        let mut report = ArbitrationReport::default();

        // Channels removed or evicted since the last commit have no holder
        self.last_owners.retain(|key, _| blender.channel(*key).is_some());

        for key in GoalKey::ALL {
            let Some(Claim::Claimed { owner, request, .. }) = self.claims.get(&key).copied() else {
                continue;
            };
            match blender.apply_goal(request) {
                Ok(()) => {
                    report.applied += 1;
                    self.last_owners.insert(key, owner);
                }
                Err(_) => report.rejected += 1,
            }
        }

        for (owner, key) in self.releases.drain(..) {
            if matches!(self.claims.get(&key), Some(Claim::Claimed { .. })) {
                continue;
            }
            if self.last_owners.get(&key).is_some_and(|held| *held != owner) {
                tracing::debug!("Owner {:?} released {} it does not hold", owner, key);
                continue;
            }
            blender.stop_goal(key);
            self.last_owners.remove(&key);
            report.stopped += 1;
        }

        self.claims.clear();
        report
    }
}
