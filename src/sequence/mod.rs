//! Multi-frame choreography expressed as explicit state machines
//!
//! Long gameplay motions (a card toss, a slump after losing, a nod) are
//! not coroutines here. Each is a small value holding its start, end and
//! elapsed time, advanced once per frame by its owner, which forwards the
//! produced request to the blender.

pub mod oscillate;
pub mod track;
pub mod tween;

pub use oscillate::{ping_pong, RotationOscillator};
pub use track::{Direction, PoseTrack, TrackProgress};
pub use tween::{PoseTween, TweenChain, TweenState};
