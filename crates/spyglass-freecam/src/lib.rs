//! Spyglass Freecam - free-fly camera override
//!
//! Temporarily takes over the scene's rendering viewpoint, flies it from
//! per-frame input, and restores the host's camera when the session ends.
//!
//! - `FreecamSession`: the Inactive / host camera / synthetic camera state machine
//! - `HostCameraRegistry`: what the host engine must provide
//! - `MotionIntegrator`: per-frame movement and mouse look
//! - `PositionSync`: edit-aware position text for the inspector UI

mod config;
mod event;
mod host;
pub mod mock;
mod motion;
mod position_sync;
mod session;
mod snapshot;

pub use config::FreecamConfig;
pub use event::{EndReason, EventBus, FreecamEvent};
pub use host::{CameraHandle, HostCameraRegistry, Provenance};
pub use mock::MockHost;
pub use motion::{integrate, MotionIntegrator, MotionSettings};
pub use position_sync::PositionSync;
pub use session::{FreecamSession, SessionMode, TickOutcome};
pub use snapshot::CameraSnapshot;
