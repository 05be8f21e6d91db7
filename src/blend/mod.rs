//! Goal blending: channels, weight smoothing, arbitration and frame order

pub mod arbitration;
pub mod blender;
pub mod channel;
pub mod frame;
pub mod queue;
pub mod request;
pub mod smoothing;

pub use arbitration::{ArbitrationReport, Claim, GoalArbiter, OwnerId};
pub use blender::{GoalBlender, ResolvedGoal};
pub use channel::Channel;
pub use frame::{FrameDriver, FramePhase};
pub use queue::{command_channel, DrainReport, GoalCommand, GoalInbox, GoalSender};
pub use request::GoalRequest;
pub use smoothing::{smooth_damp, DampStep};
