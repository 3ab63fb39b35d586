//! In-memory host camera registry
//!
//! Stands in for a real engine in tests and headless runs. Cameras are plain
//! records; "destroying" one externally is just removing its record.

use crate::host::HostCameraRegistry;
use spyglass_core::{CameraId, Result, SpyglassError, Transform};
use std::collections::HashMap;

/// State of one camera object in the mock scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MockCamera {
    pub transform: Transform,
    pub enabled: bool,
    pub active: bool,
}

/// A scene with any number of cameras and an optional primary one
#[derive(Default)]
pub struct MockHost {
    cameras: HashMap<CameraId, MockCamera>,
    primary: Option<CameraId>,
    created: usize,
    fail_create: bool,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene whose primary camera sits at `transform`
    pub fn with_primary(transform: Transform) -> (Self, CameraId) {
        let mut host = Self::new();
        let id = host.spawn_camera(transform);
        host.primary = Some(id);
        (host, id)
    }

    /// Add a scene camera (not counted as a freecam creation)
    pub fn spawn_camera(&mut self, transform: Transform) -> CameraId {
        let id = CameraId::new();
        self.cameras.insert(
            id,
            MockCamera {
                transform,
                enabled: true,
                active: true,
            },
        );
        id
    }

    pub fn set_primary(&mut self, id: Option<CameraId>) {
        self.primary = id;
    }

    /// Remove a camera behind the freecam's back, e.g. on scene reload
    pub fn destroy_externally(&mut self, id: CameraId) {
        self.cameras.remove(&id);
        if self.primary == Some(id) {
            self.primary = None;
        }
    }

    /// Make subsequent `create_camera` calls fail
    pub fn fail_create(&mut self, fail: bool) {
        self.fail_create = fail;
    }

    pub fn camera(&self, id: CameraId) -> Option<&MockCamera> {
        self.cameras.get(&id)
    }

    pub fn is_enabled(&self, id: CameraId) -> bool {
        self.cameras.get(&id).map(|c| c.enabled).unwrap_or(false)
    }

    pub fn is_active(&self, id: CameraId) -> bool {
        self.cameras.get(&id).map(|c| c.active).unwrap_or(false)
    }

    /// Number of cameras created through `create_camera`
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// Move a camera as host code would, outside the freecam
    pub fn move_camera(&mut self, id: CameraId, transform: Transform) {
        if let Some(camera) = self.cameras.get_mut(&id) {
            camera.transform = transform;
        }
    }

    fn get_mut(&mut self, id: CameraId) -> Result<&mut MockCamera> {
        self.cameras
            .get_mut(&id)
            .ok_or(SpyglassError::CameraNotFound(id))
    }
}

impl HostCameraRegistry for MockHost {
    fn resolve_primary_camera(&self) -> Option<CameraId> {
        self.primary.filter(|id| self.cameras.contains_key(id))
    }

    fn is_alive(&self, id: CameraId) -> bool {
        self.cameras.contains_key(&id)
    }

    fn create_camera(&mut self) -> Result<CameraId> {
        if self.fail_create {
            return Err(SpyglassError::HostError("camera creation refused".into()));
        }
        let id = CameraId::new();
        self.cameras.insert(
            id,
            MockCamera {
                transform: Transform::IDENTITY,
                enabled: true,
                active: false,
            },
        );
        self.created += 1;
        Ok(id)
    }

    fn destroy_camera(&mut self, id: CameraId) -> Result<()> {
        self.cameras
            .remove(&id)
            .map(|_| ())
            .ok_or(SpyglassError::CameraNotFound(id))
    }

    fn set_enabled(&mut self, id: CameraId, enabled: bool) -> Result<()> {
        self.get_mut(id)?.enabled = enabled;
        Ok(())
    }

    fn set_active(&mut self, id: CameraId, active: bool) -> Result<()> {
        self.get_mut(id)?.active = active;
        Ok(())
    }

    fn transform(&self, id: CameraId) -> Result<Transform> {
        self.cameras
            .get(&id)
            .map(|c| c.transform)
            .ok_or(SpyglassError::CameraNotFound(id))
    }

    fn set_transform(&mut self, id: CameraId, transform: Transform) -> Result<()> {
        self.get_mut(id)?.transform = transform;
        Ok(())
    }
}
