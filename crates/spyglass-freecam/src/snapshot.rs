//! Capture and restore of a camera's pose

use crate::host::HostCameraRegistry;
use spyglass_core::{CameraId, Result, Transform};

/// A camera's position and orientation at one moment.
///
/// Taken from the host camera at the start of every session so the restore
/// at the end always targets the pose that existed right before it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSnapshot {
    pub camera: CameraId,
    pub transform: Transform,
}

impl CameraSnapshot {
    pub fn capture<H: HostCameraRegistry>(host: &H, camera: CameraId) -> Result<Self> {
        Ok(Self {
            camera,
            transform: host.transform(camera)?,
        })
    }

    /// Write the captured pose back onto the camera it came from
    pub fn restore<H: HostCameraRegistry>(&self, host: &mut H) -> Result<()> {
        host.set_transform(self.camera, self.transform)
    }
}
