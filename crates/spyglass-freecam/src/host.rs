//! Host camera registry interface

use spyglass_core::{CameraId, Result, Transform};

/// Camera services the host engine exposes to the freecam.
///
/// Every method runs on the host's update thread. Calls naming an id whose
/// object no longer exists return `SpyglassError::CameraNotFound`.
pub trait HostCameraRegistry {
    /// Best-effort lookup of the scene's current main camera
    fn resolve_primary_camera(&self) -> Option<CameraId>;

    /// Whether the object behind `id` still exists
    fn is_alive(&self, id: CameraId) -> bool;

    /// Create a new camera object owned by the caller
    fn create_camera(&mut self) -> Result<CameraId>;

    /// Destroy a camera object
    fn destroy_camera(&mut self, id: CameraId) -> Result<()>;

    /// Toggle the camera component (whether it renders)
    fn set_enabled(&mut self, id: CameraId, enabled: bool) -> Result<()>;

    /// Toggle the object the camera lives on
    fn set_active(&mut self, id: CameraId, active: bool) -> Result<()>;

    fn transform(&self, id: CameraId) -> Result<Transform>;

    fn set_transform(&mut self, id: CameraId, transform: Transform) -> Result<()>;
}

impl<H: HostCameraRegistry + ?Sized> HostCameraRegistry for &mut H {
    fn resolve_primary_camera(&self) -> Option<CameraId> {
        (**self).resolve_primary_camera()
    }

    fn is_alive(&self, id: CameraId) -> bool {
        (**self).is_alive(id)
    }

    fn create_camera(&mut self) -> Result<CameraId> {
        (**self).create_camera()
    }

    fn destroy_camera(&mut self, id: CameraId) -> Result<()> {
        (**self).destroy_camera(id)
    }

    fn set_enabled(&mut self, id: CameraId, enabled: bool) -> Result<()> {
        (**self).set_enabled(id, enabled)
    }

    fn set_active(&mut self, id: CameraId, active: bool) -> Result<()> {
        (**self).set_active(id, active)
    }

    fn transform(&self, id: CameraId) -> Result<Transform> {
        (**self).transform(id)
    }

    fn set_transform(&mut self, id: CameraId, transform: Transform) -> Result<()> {
        (**self).set_transform(id, transform)
    }
}

/// Who owns the camera object behind a handle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// The scene's own camera, borrowed for the session and restored afterwards
    HostOwned,
    /// Created by the freecam and kept for the rest of the process
    Synthetic,
}

/// A camera the freecam is currently driving
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CameraHandle {
    pub id: CameraId,
    pub provenance: Provenance,
}

impl CameraHandle {
    pub fn host_owned(id: CameraId) -> Self {
        Self {
            id,
            provenance: Provenance::HostOwned,
        }
    }

    pub fn synthetic(id: CameraId) -> Self {
        Self {
            id,
            provenance: Provenance::Synthetic,
        }
    }
}
