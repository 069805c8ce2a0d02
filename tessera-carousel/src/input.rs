//! Input profile and pointer event types.
//!
//! The host decides once whether the platform is touch driven and hands the
//! resulting [`InputProfile`] to every carousel it creates. Handlers never
//! probe the platform themselves.

/// Event names used by a carousel for one class of input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputProfile {
    /// Touch screens: `touchstart` / `touchmove` / `touchend`.
    Touch,
    /// Mouse and pen: `mousedown` / `mousemove` / `mouseup`.
    Pointer,
}

impl InputProfile {
    /// Picks the profile for a platform with or without touch support.
    pub fn detect(has_touch: bool) -> Self {
        if has_touch { Self::Touch } else { Self::Pointer }
    }

    /// Returns `true` for [`InputProfile::Touch`].
    pub fn is_touch(self) -> bool {
        matches!(self, Self::Touch)
    }

    /// Name of the event that starts a drag.
    pub fn start(self) -> &'static str {
        match self {
            Self::Touch => "touchstart",
            Self::Pointer => "mousedown",
        }
    }

    /// Name of the event that moves a drag.
    pub fn moving(self) -> &'static str {
        match self {
            Self::Touch => "touchmove",
            Self::Pointer => "mousemove",
        }
    }

    /// Name of the event that ends a drag.
    pub fn end(self) -> &'static str {
        match self {
            Self::Touch => "touchend",
            Self::Pointer => "mouseup",
        }
    }

    /// Name of the activation event for arrows and pager entries.
    ///
    /// Touch devices activate on `touchstart` to skip the synthetic click
    /// delay.
    pub fn click(self) -> &'static str {
        match self {
            Self::Touch => "touchstart",
            Self::Pointer => "click",
        }
    }
}

/// Wheel event name.
pub const WHEEL_EVENT: &str = "mousewheel";

/// Window resize event name.
pub const RESIZE_EVENT: &str = "resize";

/// Pointer coordinates in page space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    /// Horizontal page coordinate.
    pub x: f32,
    /// Vertical page coordinate.
    pub y: f32,
}

impl PointerPosition {
    /// Origin of the page.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a position from page coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What the host should do with the native event after a handler ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The carousel handled the event; suppress default behaviour and stop
    /// propagation.
    Consumed,
    /// Suppress default behaviour but keep propagating, so listeners further
    /// up still see the event.
    DefaultPrevented,
    /// The carousel ignored the event; let the page handle it.
    Passthrough,
}

impl InputOutcome {
    /// Returns `true` for [`InputOutcome::Consumed`].
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }

    /// Whether the host should suppress the event's default behaviour.
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::Consumed | Self::DefaultPrevented)
    }

    /// Whether the host should stop the event from reaching further
    /// listeners.
    pub fn stops_propagation(self) -> bool {
        self.is_consumed()
    }
}

/// A native event delivered to one of the carousel's listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent<N> {
    /// Pointer or touch pressed at a page position.
    Press(PointerPosition),
    /// Pointer or touch moved to a page position.
    Move(PointerPosition),
    /// Pointer or touch released at a page position.
    Release(PointerPosition),
    /// Wheel rotated; positive values scroll forward.
    Wheel {
        /// Vertical wheel delta.
        delta_y: f32,
    },
    /// Activation of a node, usually an anchor inside the pager.
    Click {
        /// Node the event was dispatched on.
        target: N,
    },
    /// The strip finished its CSS transition.
    TransitionEnd,
}
