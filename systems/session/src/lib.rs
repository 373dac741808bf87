#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session flow, the per-frame simulation driver, and the autopilot.

pub mod flow;
pub mod frame;
pub mod pilot;

pub use flow::{FrameSchedule, Progression, SessionFlow};
pub use frame::Simulation;
pub use pilot::AutoPilot;
