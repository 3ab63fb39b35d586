//! Live position text for the inspector's position field

use spyglass_core::parse::{format_vec3, parse_vec3};
use spyglass_core::{Result, Vec3};

/// Mirrors the driven camera's position into an editable text field.
///
/// While the user has the field focused, refreshes are suppressed so typing
/// is never overwritten. Refreshes can be throttled to one per
/// `refresh_interval` seconds; 0 refreshes every tick.
#[derive(Debug)]
pub struct PositionSync {
    text: String,
    last_good: Option<Vec3>,
    editing: bool,
    refresh_interval: f32,
    since_refresh: f32,
}

impl PositionSync {
    pub fn new(refresh_interval: f32) -> Self {
        Self {
            text: String::new(),
            last_good: None,
            editing: false,
            refresh_interval,
            since_refresh: 0.0,
        }
    }

    /// Current field contents
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Last position written to, or read from, the camera
    pub fn last_good(&self) -> Option<Vec3> {
        self.last_good
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The field gained focus
    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// The field lost focus without submitting; show the live value again
    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.revert();
    }

    /// Per-tick refresh. Returns the new text if the field was rewritten.
    pub fn tick(&mut self, delta_time: f32, live: Vec3) -> Option<&str> {
        self.since_refresh += delta_time;
        if self.since_refresh < self.refresh_interval {
            return None;
        }
        self.since_refresh = 0.0;
        self.publish(live)
    }

    /// Show `live` unless the user is editing. Returns the new text if written.
    pub fn publish(&mut self, live: Vec3) -> Option<&str> {
        if self.editing {
            return None;
        }
        self.force_publish(live);
        Some(&self.text)
    }

    /// Show `value` regardless of edit focus
    pub fn force_publish(&mut self, value: Vec3) {
        self.last_good = Some(value);
        self.text = format_vec3(value);
    }

    /// Handle the user committing the field. Ends the edit either way.
    ///
    /// On success the parsed position is returned for the caller to apply;
    /// the field keeps its old text until the caller confirms with
    /// [`force_publish`](Self::force_publish). On failure the field reverts
    /// to the last good position.
    pub fn submit(&mut self, input: &str) -> Result<Vec3> {
        self.editing = false;
        let parsed = parse_vec3(input);
        if parsed.is_err() {
            self.revert();
        }
        parsed
    }

    /// Show the last good position again
    pub fn revert(&mut self) {
        self.text = self.last_good.map(format_vec3).unwrap_or_default();
    }
}

impl Default for PositionSync {
    fn default() -> Self {
        Self::new(0.0)
    }
}
