//! Freecam session state machine
//!
//! A session owns (or mutably borrows) the host registry for its whole life.
//! Begin resolves the scene camera and snapshots it, then drives either that
//! camera or a freecam-owned synthetic one. End puts everything back. Both
//! run to completion inside one call, so a tick never sees a half-built
//! session.
//!
//! Dropping an active session ends it, which restores the host camera.

use crate::config::{check_non_negative, FreecamConfig};
use crate::event::{EndReason, EventBus, FreecamEvent};
use crate::host::{CameraHandle, HostCameraRegistry};
use crate::motion::MotionIntegrator;
use crate::position_sync::PositionSync;
use crate::snapshot::CameraSnapshot;
use log::{debug, info, warn};
use spyglass_core::parse::{format_vec3, parse_f32};
use spyglass_core::{CameraId, Result, Transform, Vec3};
use spyglass_runtime::InputSample;

/// Which camera, if any, the freecam is driving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Inactive,
    UsingHostCamera,
    UsingSyntheticCamera,
}

/// Result of one [`FreecamSession::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No session running
    Idle,
    /// The driven camera now has this pose
    Moved(Transform),
    /// The driven camera vanished; the session has been ended
    CameraLost,
}

pub struct FreecamSession<H: HostCameraRegistry> {
    host: H,
    config: FreecamConfig,
    mode: SessionMode,
    /// Camera receiving motion; `Some` exactly when `mode` is not Inactive
    active: Option<CameraHandle>,
    /// Freecam-owned camera, kept across sessions once created
    synthetic: Option<CameraId>,
    /// Scene camera this session switched off, to be switched back on at End
    disabled_host_camera: Option<CameraId>,
    snapshot: Option<CameraSnapshot>,
    original_pose: Transform,
    /// Pose the user last flew to; survives End and source switches
    viewpoint: Option<Transform>,
    integrator: MotionIntegrator,
    position: PositionSync,
    events: EventBus,
}

impl<H: HostCameraRegistry> FreecamSession<H> {
    pub fn new(host: H, config: FreecamConfig) -> Self {
        let position = PositionSync::new(config.position_refresh_interval);
        Self {
            host,
            config,
            mode: SessionMode::Inactive,
            active: None,
            synthetic: None,
            disabled_host_camera: None,
            snapshot: None,
            original_pose: Transform::IDENTITY,
            viewpoint: None,
            integrator: MotionIntegrator::new(),
            position,
            events: EventBus::new(),
        }
    }

    // --- Transitions ---

    /// Start a session. Calling this while a session runs changes nothing.
    ///
    /// If a host call fails part way, whatever was already changed is put
    /// back, the session stays inactive, and the error is returned.
    pub fn begin(&mut self) -> Result<SessionMode> {
        if self.is_active() {
            debug!("freecam begin ignored, already {:?}", self.mode);
            return Ok(self.mode);
        }

        match self.try_begin() {
            Ok(mode) => Ok(mode),
            Err(e) => {
                self.warn(format!("could not start freecam: {e}"));
                self.teardown();
                Err(e)
            }
        }
    }

    fn try_begin(&mut self) -> Result<SessionMode> {
        self.integrator.reset();

        let synthetic = self.synthetic;
        let primary = self
            .host
            .resolve_primary_camera()
            .filter(|id| Some(*id) != synthetic && self.host.is_alive(*id));

        match primary {
            Some(id) => {
                let snapshot = CameraSnapshot::capture(&self.host, id)?;
                self.original_pose = snapshot.transform;
                self.viewpoint.get_or_insert(snapshot.transform);
                self.snapshot = Some(snapshot);
            }
            None => {
                self.original_pose = Transform::IDENTITY;
                self.snapshot = None;
            }
        }

        let handle = match primary {
            Some(id) if self.config.use_host_camera => {
                self.mode = SessionMode::UsingHostCamera;
                self.active = Some(CameraHandle::host_owned(id));
                CameraHandle::host_owned(id)
            }
            _ => {
                if self.config.use_host_camera {
                    self.warn("no scene camera found, using the freecam camera instead".into());
                }
                let id = self.ensure_synthetic()?;
                let handle = CameraHandle::synthetic(id);
                self.mode = SessionMode::UsingSyntheticCamera;
                self.active = Some(handle);
                // Only one camera may render the scene
                if let Some(host_id) = primary {
                    self.host.set_enabled(host_id, false)?;
                    self.disabled_host_camera = Some(host_id);
                }
                handle
            }
        };

        let pose = *self.viewpoint.get_or_insert(Transform::IDENTITY);
        self.host.set_transform(handle.id, pose)?;
        self.host.set_active(handle.id, true)?;
        self.host.set_enabled(handle.id, true)?;

        info!("freecam started: {:?} on camera {}", self.mode, handle.id);
        self.events.push(FreecamEvent::Started {
            mode: self.mode,
            camera: handle,
        });
        self.events
            .push(FreecamEvent::InspectAffordance { visible: true });
        self.publish_position(pose.position);

        Ok(self.mode)
    }

    fn ensure_synthetic(&mut self) -> Result<CameraId> {
        if let Some(id) = self.synthetic {
            if self.host.is_alive(id) {
                return Ok(id);
            }
            warn!("freecam camera {id} was destroyed externally, creating a new one");
        }
        let id = self.host.create_camera()?;
        debug!("created freecam camera {id}");
        self.synthetic = Some(id);
        Ok(id)
    }

    /// End the running session, restoring the scene camera
    pub fn end(&mut self) {
        self.end_with(EndReason::UserToggle);
    }

    fn end_with(&mut self, reason: EndReason) {
        if !self.is_active() {
            debug!("freecam end ignored, not active");
            return;
        }
        self.teardown();
        info!("freecam ended: {reason:?}");
        self.events.push(FreecamEvent::Ended { reason });
        self.events
            .push(FreecamEvent::InspectAffordance { visible: false });
    }

    /// Undo a session's changes to the host. Every step is attempted even if
    /// an earlier one fails, and the mode always ends up Inactive.
    fn teardown(&mut self) {
        let mode = self.mode;
        let active = self.active.take();
        self.mode = SessionMode::Inactive;

        match mode {
            SessionMode::UsingHostCamera => {
                if let Some(snapshot) = self.snapshot {
                    if self.host.is_alive(snapshot.camera) {
                        report(snapshot.restore(&mut self.host), "restore scene camera pose");
                        report(
                            self.host.set_enabled(snapshot.camera, true),
                            "re-enable scene camera",
                        );
                    }
                }
            }
            SessionMode::UsingSyntheticCamera => {
                if let Some(handle) = active {
                    if self.host.is_alive(handle.id) {
                        report(
                            self.host.set_active(handle.id, false),
                            "deactivate freecam camera",
                        );
                    }
                }
                self.reenable_host_camera();
            }
            // Failed part way through Begin
            SessionMode::Inactive => self.reenable_host_camera(),
        }
    }

    fn reenable_host_camera(&mut self) {
        if let Some(host_id) = self.disabled_host_camera.take() {
            if self.host.is_alive(host_id) {
                report(self.host.set_enabled(host_id, true), "re-enable scene camera");
            }
        }
    }

    /// Begin if inactive, End otherwise
    pub fn toggle_freecam(&mut self) -> Result<SessionMode> {
        if self.is_active() {
            self.end();
            Ok(SessionMode::Inactive)
        } else {
            self.begin()
        }
    }

    /// Choose between driving the scene camera and the freecam's own camera.
    /// A running session restarts on the new source, keeping the user's pose.
    pub fn set_camera_source_preference(&mut self, use_host: bool) -> Result<SessionMode> {
        let changed = self.config.use_host_camera != use_host;
        self.config.use_host_camera = use_host;
        if changed && self.is_active() {
            self.end_with(EndReason::SourceSwitch);
            self.begin()
        } else {
            Ok(self.mode)
        }
    }

    /// Flip the camera source preference
    pub fn toggle_source(&mut self) -> Result<SessionMode> {
        self.set_camera_source_preference(!self.config.use_host_camera)
    }

    /// End any running session with [`EndReason::Shutdown`]
    pub fn shutdown(&mut self) {
        self.end_with(EndReason::Shutdown);
    }

    /// Destroy the freecam-owned camera, ending the session first if it is
    /// the one being driven. The next Begin creates a fresh one.
    pub fn destroy_synthetic_camera(&mut self) -> Result<()> {
        let Some(id) = self.synthetic else {
            return Ok(());
        };
        if self.mode == SessionMode::UsingSyntheticCamera {
            self.end_with(EndReason::Shutdown);
        }
        self.synthetic = None;
        if self.host.is_alive(id) {
            self.host.destroy_camera(id)?;
        }
        Ok(())
    }

    // --- Per-frame ---

    /// Advance the driven camera by one frame of input
    pub fn tick(&mut self, sample: &InputSample) -> TickOutcome {
        let Some(handle) = self.active else {
            return TickOutcome::Idle;
        };

        if !self.host.is_alive(handle.id) {
            return self.camera_lost(handle);
        }
        let prior = match self.host.transform(handle.id) {
            Ok(t) => t,
            Err(_) => return self.camera_lost(handle),
        };

        let next = self
            .integrator
            .step(prior, sample, &self.config.motion());
        if self.host.set_transform(handle.id, next).is_err() {
            return self.camera_lost(handle);
        }
        self.viewpoint = Some(next);

        if let Some(text) = self.position.tick(sample.delta_time, next.position) {
            self.events
                .push(FreecamEvent::PositionPublished(text.to_string()));
        }

        TickOutcome::Moved(next)
    }

    fn camera_lost(&mut self, handle: CameraHandle) -> TickOutcome {
        self.warn(format!(
            "freecam camera {} no longer exists, ending freecam",
            handle.id
        ));
        self.end_with(EndReason::CameraLost);
        TickOutcome::CameraLost
    }

    // --- UI operations ---

    /// Set the movement speed. Negative or non-finite values are rejected.
    pub fn set_base_speed(&mut self, speed: f32) -> Result<()> {
        check_non_negative("base_speed", speed)?;
        self.config.base_speed = speed;
        Ok(())
    }

    /// Apply a speed typed by the user. On failure the speed is unchanged and
    /// the field should show [`speed_text`](Self::speed_text) again.
    pub fn submit_speed_text(&mut self, text: &str) -> Result<f32> {
        let result = parse_f32("speed", text).and_then(|speed| {
            self.set_base_speed(speed)?;
            Ok(speed)
        });
        if let Err(e) = &result {
            self.warn(format!("rejected speed input: {e}"));
        }
        result
    }

    pub fn speed_text(&self) -> String {
        self.config.base_speed.to_string()
    }

    /// Go back to the scene camera's pose from the latest Begin.
    ///
    /// Before the first Begin there is no pose to go back to; the field is
    /// just shown again so the first session still seeds from the scene.
    pub fn reset_to_original_pose(&mut self) -> Result<()> {
        if self.viewpoint.is_none() {
            self.republish_position();
            return Ok(());
        }
        let pose = self.original_pose;
        self.viewpoint = Some(pose);
        if let Some(handle) = self.active {
            self.host.set_transform(handle.id, pose)?;
        }
        self.position.force_publish(pose.position);
        self.events.push(FreecamEvent::PositionPublished(
            self.position.text().to_string(),
        ));
        Ok(())
    }

    /// The position field gained focus
    pub fn begin_position_edit(&mut self) {
        self.position.begin_edit();
    }

    /// The position field lost focus without submitting
    pub fn cancel_position_edit(&mut self) {
        self.position.cancel_edit();
    }

    /// Apply a position typed by the user.
    ///
    /// The field only takes the new text once the camera has actually moved.
    /// Malformed text changes nothing except reverting the field. If the
    /// driven camera is gone, the field reverts and the session ends as on a
    /// lost camera. While inactive, a good value moves the pose the next
    /// session starts from.
    pub fn submit_position_text(&mut self, text: &str) -> Result<Vec3> {
        let position = match self.position.submit(text) {
            Ok(position) => position,
            Err(e) => {
                self.warn(format!("rejected position input: {e}"));
                self.republish_position();
                return Err(e);
            }
        };

        match self.active {
            Some(handle) => {
                let moved = self.host.transform(handle.id).and_then(|pose| {
                    let pose = pose.with_position(position);
                    self.host.set_transform(handle.id, pose)?;
                    Ok(pose)
                });
                match moved {
                    Ok(pose) => self.viewpoint = Some(pose),
                    Err(e) => {
                        self.republish_position();
                        self.camera_lost(handle);
                        return Err(e);
                    }
                }
            }
            None => {
                if let Some(viewpoint) = self.viewpoint.as_mut() {
                    viewpoint.position = position;
                }
            }
        }

        self.position.force_publish(position);
        self.events
            .push(FreecamEvent::PositionPublished(format_vec3(position)));
        Ok(position)
    }

    fn publish_position(&mut self, position: Vec3) {
        if let Some(text) = self.position.publish(position) {
            self.events
                .push(FreecamEvent::PositionPublished(text.to_string()));
        }
    }

    /// Show the last good position again
    fn republish_position(&mut self) {
        self.position.revert();
        self.events.push(FreecamEvent::PositionPublished(
            self.position.text().to_string(),
        ));
    }

    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.events.push(FreecamEvent::Warning(message));
    }

    // --- Queries ---

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode != SessionMode::Inactive
    }

    pub fn active_camera(&self) -> Option<CameraHandle> {
        self.active
    }

    /// Camera the "inspect freecam" affordance should open, while shown
    pub fn inspect_target(&self) -> Option<CameraId> {
        self.active.map(|h| h.id)
    }

    pub fn synthetic_camera(&self) -> Option<CameraId> {
        self.synthetic
    }

    pub fn viewpoint(&self) -> Option<Transform> {
        self.viewpoint
    }

    pub fn original_pose(&self) -> Transform {
        self.original_pose
    }

    pub fn snapshot(&self) -> Option<&CameraSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn config(&self) -> &FreecamConfig {
        &self.config
    }

    pub fn position_text(&self) -> &str {
        self.position.text()
    }

    pub fn drain_events(&mut self) -> Vec<FreecamEvent> {
        self.events.drain()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: HostCameraRegistry> Drop for FreecamSession<H> {
    fn drop(&mut self) {
        self.end_with(EndReason::Shutdown);
    }
}

fn report(result: Result<()>, what: &str) {
    if let Err(e) = result {
        warn!("freecam could not {what}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockHost;
    use spyglass_core::Orientation;
    use spyglass_runtime::MoveKeys;

    fn scene_pose() -> Transform {
        Transform::from_position(Vec3::new(5.0, 2.0, -8.0))
            .with_orientation(Orientation::new(15.0, 30.0))
    }

    fn host_config() -> FreecamConfig {
        FreecamConfig {
            use_host_camera: true,
            ..Default::default()
        }
    }

    fn forward_for(seconds: f32) -> InputSample {
        InputSample {
            keys: MoveKeys {
                forward: true,
                ..Default::default()
            },
            delta_time: seconds,
            ..Default::default()
        }
    }

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_begin_without_scene_camera_creates_synthetic_once() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());

        assert_eq!(session.begin().unwrap(), SessionMode::UsingSyntheticCamera);
        let first = session.synthetic_camera().unwrap();
        session.end();
        session.begin().unwrap();
        session.end();
        session.begin().unwrap();

        assert_eq!(session.host().created_count(), 1);
        assert_eq!(session.synthetic_camera(), Some(first));
        assert_eq!(session.active_camera(), Some(CameraHandle::synthetic(first)));
    }

    #[test]
    fn test_host_mode_restores_pose_on_end() {
        let (host, cam) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, host_config());

        assert_eq!(session.begin().unwrap(), SessionMode::UsingHostCamera);
        assert_eq!(session.active_camera(), Some(CameraHandle::host_owned(cam)));
        session.tick(&forward_for(0.5));
        assert_ne!(session.host().transform(cam).unwrap(), scene_pose());

        session.end();
        assert_eq!(session.mode(), SessionMode::Inactive);
        assert_eq!(session.host().transform(cam).unwrap(), scene_pose());
        assert!(session.host().is_enabled(cam));
        assert_eq!(session.host().created_count(), 0);
    }

    #[test]
    fn test_synthetic_mode_disables_scene_camera_until_end() {
        let (host, cam) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());

        session.begin().unwrap();
        let synthetic = session.synthetic_camera().unwrap();
        assert!(!session.host().is_enabled(cam));
        assert!(session.host().is_active(synthetic));
        assert!(session.host().is_enabled(synthetic));
        // Seeded from the scene camera on first acquisition
        assert_eq!(session.host().transform(synthetic).unwrap(), scene_pose());

        session.tick(&forward_for(1.0));
        session.end();

        assert!(session.host().is_enabled(cam));
        assert!(!session.host().is_active(synthetic));
        assert!(session.host().is_alive(synthetic));
        assert_eq!(session.host().transform(cam).unwrap(), scene_pose());
    }

    #[test]
    fn test_begin_while_active_is_a_no_op() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());
        session.begin().unwrap();
        let camera = session.active_camera();
        session.drain_events();

        assert_eq!(session.begin().unwrap(), SessionMode::UsingSyntheticCamera);
        assert_eq!(session.active_camera(), camera);
        assert_eq!(session.host().created_count(), 1);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_end_while_inactive_is_a_no_op() {
        let (host, cam) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());
        session.end();
        assert!(session.drain_events().is_empty());
        assert!(session.host().is_enabled(cam));
    }

    #[test]
    fn test_missing_scene_camera_falls_back_with_warning() {
        let mut session = FreecamSession::new(MockHost::new(), host_config());

        assert_eq!(session.begin().unwrap(), SessionMode::UsingSyntheticCamera);
        assert!(session.config().use_host_camera);
        let events = session.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, FreecamEvent::Warning(_))));
        assert_eq!(session.viewpoint(), Some(Transform::IDENTITY));
    }

    #[test]
    fn test_switching_source_keeps_the_users_pose() {
        let (host, cam) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());
        session.begin().unwrap();
        session.tick(&forward_for(0.3));
        let before = session.viewpoint().unwrap();

        assert_eq!(
            session.set_camera_source_preference(true).unwrap(),
            SessionMode::UsingHostCamera
        );
        assert_eq!(session.viewpoint(), Some(before));
        assert_eq!(session.host().transform(cam).unwrap(), before);
        // The synthetic camera must not keep rendering
        let synthetic = session.synthetic_camera().unwrap();
        assert!(!session.host().is_active(synthetic));

        assert_eq!(
            session.toggle_source().unwrap(),
            SessionMode::UsingSyntheticCamera
        );
        assert_eq!(session.host().transform(synthetic).unwrap(), before);
        // Scene camera was restored by the intermediate End
        assert_eq!(session.host().transform(cam).unwrap(), scene_pose());
        assert!(!session.host().is_enabled(cam));
        assert_eq!(session.host().created_count(), 1);
    }

    #[test]
    fn test_source_preference_while_inactive_just_stores() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());
        assert_eq!(
            session.set_camera_source_preference(true).unwrap(),
            SessionMode::Inactive
        );
        assert!(session.config().use_host_camera);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_forward_for_one_second_moves_ten_units() {
        let (host, _) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());
        session.begin().unwrap();

        let forward = scene_pose().basis().forward;
        let TickOutcome::Moved(pose) = session.tick(&forward_for(1.0)) else {
            panic!("expected the camera to move");
        };
        assert!(approx(pose.position, scene_pose().position + forward * 10.0));
        assert_eq!(session.viewpoint(), Some(pose));
    }

    #[test]
    fn test_viewpoint_resumes_across_sessions() {
        let (host, _) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());
        session.begin().unwrap();
        let TickOutcome::Moved(flown) = session.tick(&forward_for(2.0)) else {
            panic!("expected the camera to move");
        };
        session.end();

        session.begin().unwrap();
        let synthetic = session.synthetic_camera().unwrap();
        assert_eq!(session.host().transform(synthetic).unwrap(), flown);
    }

    #[test]
    fn test_snapshot_is_retaken_every_begin() {
        let (host, cam) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, host_config());
        session.begin().unwrap();
        session.tick(&forward_for(1.0));
        session.end();

        // The game moves its camera between sessions
        let moved = Transform::from_position(Vec3::new(-1.0, 0.0, 4.0));
        session.host_mut().move_camera(cam, moved);

        session.begin().unwrap();
        assert_eq!(session.snapshot().unwrap().transform, moved);
        session.tick(&forward_for(1.0));
        session.end();
        assert_eq!(session.host().transform(cam).unwrap(), moved);
    }

    #[test]
    fn test_round_trip_holds_over_mixed_sequences() {
        let (host, cam) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());

        for round in 0..6 {
            session
                .set_camera_source_preference(round % 2 == 0)
                .unwrap();
            session.begin().unwrap();
            let expected = session.snapshot().unwrap().transform;
            for _ in 0..=round {
                session.tick(&forward_for(0.1));
            }
            if round % 3 == 0 {
                session.toggle_source().unwrap();
                session.tick(&forward_for(0.1));
            }
            session.end();
            assert_eq!(session.host().transform(cam).unwrap(), expected);
            assert!(session.host().is_enabled(cam));
        }
    }

    #[test]
    fn test_malformed_position_text_changes_nothing() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());
        session.begin().unwrap();
        session.tick(&forward_for(0.5));
        let camera = session.active_camera().unwrap().id;
        let before = session.host().transform(camera).unwrap();
        let shown = session.position_text().to_string();

        session.begin_position_edit();
        assert!(session.submit_position_text("abc").is_err());

        assert_eq!(session.position_text(), shown);
        assert_eq!(session.host().transform(camera).unwrap(), before);
        assert_eq!(session.viewpoint(), Some(before));
    }

    #[test]
    fn test_position_text_moves_the_camera() {
        let (host, _) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());
        session.begin().unwrap();
        let camera = session.active_camera().unwrap().id;

        let target = session.submit_position_text("1, 2, 3").unwrap();
        let pose = session.host().transform(camera).unwrap();
        assert_eq!(pose.position, target);
        assert_eq!(pose.rotation, scene_pose().rotation);
        assert_eq!(session.viewpoint(), Some(pose));
        assert_eq!(session.position_text(), "1 2 3");
    }

    #[test]
    fn test_editing_blocks_live_updates() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());
        session.begin().unwrap();
        assert_eq!(session.position_text(), "0 0 0");

        session.begin_position_edit();
        session.tick(&forward_for(1.0));
        assert_eq!(session.position_text(), "0 0 0");

        session.cancel_position_edit();
        session.tick(&forward_for(0.0));
        assert_eq!(session.position_text(), "0 0 -10");
    }

    #[test]
    fn test_externally_destroyed_camera_ends_session() {
        let (host, cam) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());
        session.begin().unwrap();
        let synthetic = session.synthetic_camera().unwrap();
        session.drain_events();

        session.host_mut().destroy_externally(synthetic);
        assert_eq!(session.tick(&forward_for(0.1)), TickOutcome::CameraLost);
        assert_eq!(session.mode(), SessionMode::Inactive);
        assert!(session.host().is_enabled(cam));
        assert!(session.drain_events().contains(&FreecamEvent::Ended {
            reason: EndReason::CameraLost
        }));

        // Next session replaces the lost camera
        session.begin().unwrap();
        assert_eq!(session.host().created_count(), 2);
        assert_ne!(session.synthetic_camera(), Some(synthetic));
    }

    #[test]
    fn test_destroyed_host_camera_in_host_mode_ends_session() {
        let (host, cam) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, host_config());
        session.begin().unwrap();

        session.host_mut().destroy_externally(cam);
        assert_eq!(session.tick(&forward_for(0.1)), TickOutcome::CameraLost);
        assert!(!session.is_active());
        assert_eq!(session.tick(&forward_for(0.1)), TickOutcome::Idle);
    }

    #[test]
    fn test_failed_begin_rolls_back() {
        let (mut host, cam) = MockHost::with_primary(scene_pose());
        host.fail_create(true);
        let mut session = FreecamSession::new(host, FreecamConfig::default());

        assert!(session.begin().is_err());
        assert_eq!(session.mode(), SessionMode::Inactive);
        assert_eq!(session.active_camera(), None);
        assert!(session.host().is_enabled(cam));
        assert!(session
            .drain_events()
            .iter()
            .any(|e| matches!(e, FreecamEvent::Warning(_))));

        session.host_mut().fail_create(false);
        assert_eq!(session.begin().unwrap(), SessionMode::UsingSyntheticCamera);
    }

    #[test]
    fn test_reset_returns_to_scene_pose() {
        let (host, _) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());
        session.begin().unwrap();
        session.tick(&forward_for(3.0));

        session.reset_to_original_pose().unwrap();
        let camera = session.active_camera().unwrap().id;
        assert_eq!(session.host().transform(camera).unwrap(), scene_pose());
        assert_eq!(session.viewpoint(), Some(scene_pose()));
        assert_eq!(session.position_text(), "5 2 -8");
    }

    #[test]
    fn test_speed_input_is_validated() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());

        assert!(session.submit_speed_text("zoom").is_err());
        assert!(session.submit_speed_text("-4").is_err());
        assert_eq!(session.speed_text(), "10");

        assert_eq!(session.submit_speed_text("2.5").unwrap(), 2.5);
        session.begin().unwrap();
        let TickOutcome::Moved(pose) = session.tick(&forward_for(1.0)) else {
            panic!("expected the camera to move");
        };
        assert!(approx(pose.position, Vec3::new(0.0, 0.0, -2.5)));
    }

    #[test]
    fn test_inspect_affordance_follows_session() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());
        assert_eq!(session.inspect_target(), None);

        session.toggle_freecam().unwrap();
        let camera = session.synthetic_camera();
        assert_eq!(session.inspect_target(), camera);
        let events = session.drain_events();
        assert!(events.contains(&FreecamEvent::InspectAffordance { visible: true }));

        assert_eq!(session.toggle_freecam().unwrap(), SessionMode::Inactive);
        assert_eq!(session.inspect_target(), None);
        let events = session.drain_events();
        assert!(events.contains(&FreecamEvent::InspectAffordance { visible: false }));
    }

    #[test]
    fn test_destroying_synthetic_camera_ends_and_recreates() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());
        session.begin().unwrap();
        let first = session.synthetic_camera().unwrap();

        session.destroy_synthetic_camera().unwrap();
        assert!(!session.is_active());
        assert!(!session.host().is_alive(first));

        session.begin().unwrap();
        assert_eq!(session.host().created_count(), 2);
    }

    #[test]
    fn test_host_input_loop_drives_session() {
        use spyglass_runtime::{FrameClock, InputState};
        use winit::keyboard::KeyCode;

        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());
        let mut input = InputState::new();
        let mut clock = FrameClock::with_max_delta(1.0);
        session.begin().unwrap();

        input.process_key_down(KeyCode::KeyD);
        input.process_key_down(KeyCode::ShiftLeft);
        clock.advance(0.5);
        let TickOutcome::Moved(pose) = session.tick(&input.sample(clock.delta_seconds())) else {
            panic!("expected the camera to move");
        };
        assert!(approx(pose.position, Vec3::new(50.0, 0.0, 0.0)));

        // Look: cursor moves right by 10 pixels with the right button held
        input.end_frame();
        input.process_key_up(KeyCode::KeyD);
        input.process_mouse_button_down(1);
        clock.advance(0.0);
        session.tick(&input.sample(clock.delta_seconds()));
        input.process_mouse_move(10.0, 0.0);
        let TickOutcome::Moved(pose) = session.tick(&input.sample(clock.delta_seconds())) else {
            panic!("expected the camera to move");
        };
        assert!((pose.orientation().yaw - 3.0).abs() < 1e-3);
        assert!(pose.orientation().pitch.abs() < 1e-3);
    }

    #[test]
    fn test_position_submit_on_lost_camera_reverts_and_ends() {
        let mut session = FreecamSession::new(MockHost::new(), FreecamConfig::default());
        session.begin().unwrap();
        let synthetic = session.synthetic_camera().unwrap();
        assert_eq!(session.position_text(), "0 0 0");
        session.drain_events();

        session.host_mut().destroy_externally(synthetic);
        session.begin_position_edit();
        assert!(session.submit_position_text("7 8 9").is_err());

        assert_eq!(session.position_text(), "0 0 0");
        assert_eq!(session.mode(), SessionMode::Inactive);
        assert_eq!(session.viewpoint(), Some(Transform::IDENTITY));
        let events = session.drain_events();
        assert!(events.contains(&FreecamEvent::Ended {
            reason: EndReason::CameraLost
        }));
        assert!(!events.contains(&FreecamEvent::PositionPublished("7 8 9".into())));
    }

    #[test]
    fn test_reset_before_first_begin_keeps_scene_seeding() {
        let (host, _) = MockHost::with_primary(scene_pose());
        let mut session = FreecamSession::new(host, FreecamConfig::default());

        session.reset_to_original_pose().unwrap();
        assert_eq!(session.viewpoint(), None);

        session.begin().unwrap();
        let synthetic = session.synthetic_camera().unwrap();
        assert_eq!(session.host().transform(synthetic).unwrap(), scene_pose());
    }

    #[test]
    fn test_rolled_scene_camera_is_restored_exactly() {
        let rolled = Transform::from_position(Vec3::new(1.0, 4.0, 2.0))
            .with_rotation([0.1, 0.3, 0.25, 0.9154]);
        let (host, cam) = MockHost::with_primary(rolled);
        let mut session = FreecamSession::new(host, host_config());
        session.begin().unwrap();

        let look = InputSample {
            look_held: true,
            cursor: [40.0, 25.0],
            ..forward_for(0.2)
        };
        session.tick(&forward_for(0.2));
        session.tick(&look);
        assert_ne!(session.host().transform(cam).unwrap(), rolled);

        session.end();
        assert_eq!(session.host().transform(cam).unwrap(), rolled);
        assert_eq!(session.snapshot().unwrap().transform.rotation, rolled.rotation);
    }

    #[test]
    fn test_failed_begin_leaves_disabled_scene_camera_alone() {
        let (mut host, cam) = MockHost::with_primary(scene_pose());
        host.set_enabled(cam, false).unwrap();
        host.fail_create(true);
        let mut session = FreecamSession::new(host, FreecamConfig::default());

        assert!(session.begin().is_err());
        assert!(!session.host().is_enabled(cam));
    }

    #[test]
    fn test_dropping_session_restores_scene_camera() {
        let (mut host, cam) = MockHost::with_primary(scene_pose());
        {
            let mut session = FreecamSession::new(&mut host, host_config());
            session.begin().unwrap();
            session.tick(&forward_for(1.0));
        }
        assert_eq!(host.transform(cam).unwrap(), scene_pose());
        assert!(host.is_enabled(cam));
    }
}
