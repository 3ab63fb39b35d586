//! Notifications from the freecam to the surrounding UI

use crate::host::CameraHandle;
use crate::session::SessionMode;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The user turned freecam off
    UserToggle,
    /// Ended only to restart with the other camera source
    SourceSwitch,
    /// The driven camera disappeared between frames
    CameraLost,
    /// The session was dropped or shut down while active
    Shutdown,
}

/// Something the UI layer may want to react to
#[derive(Debug, Clone, PartialEq)]
pub enum FreecamEvent {
    Started {
        mode: SessionMode,
        camera: CameraHandle,
    },
    Ended {
        reason: EndReason,
    },
    /// Show or hide controls that only make sense during a session
    InspectAffordance {
        visible: bool,
    },
    /// A recoverable problem the user should hear about
    Warning(String),
    /// The position field was rewritten
    PositionPublished(String),
}

/// A simple event queue that the session pushes to and the UI drains
#[derive(Default)]
pub struct EventBus {
    events: Vec<FreecamEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: FreecamEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<FreecamEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
