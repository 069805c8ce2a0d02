//! Looping carousel over a flat collection of sibling items.
//!
//! ## Usage
//!
//! Attach to a container holding a strip of items, then route host events
//! through [`Carousel::dispatch`] and timeouts through
//! [`Carousel::timer_fired`].
//!
//! ```
//! use tessera_carousel::{
//!     Carousel, CarouselArgs, InputProfile, Target, headless::HeadlessHost,
//! };
//!
//! let mut host = HeadlessHost::new();
//! host.set_viewport_width(800);
//! host.carousel_fixture("slider", 8, 800.0, 120.0);
//!
//! let mut carousel = Carousel::create(
//!     &mut host,
//!     Target::Selector(".slider"),
//!     CarouselArgs::default().single(true),
//!     InputProfile::Pointer,
//! )
//! .expect("valid markup")
//! .expect("not yet initialised");
//!
//! carousel.next(&mut host);
//! assert_eq!(carousel.index(), 2);
//! assert_eq!(carousel.offset(), -1600.0);
//! ```
use std::fmt::Debug;

use smallvec::SmallVec;

use crate::{
    config::CarouselConfig,
    host::{Host, ListenerId, ListenerKind, TimerId, TimerTask},
    input::{InputEvent, InputOutcome, PointerPosition},
    style::StyleProperties,
};

mod clones;
mod geometry;
mod lifecycle;
mod navigation;
mod position;

pub use clones::CloneSet;
pub use geometry::{PageGeometry, resolve_items_per_page};

/// Class marking a container that already hosts a carousel.
pub const INITIALIZED_CLASS: &str = "sliderjs";
/// Class of the viewport wrapping the strip.
pub const VIEWPORT_CLASS: &str = "slider-viewport";
/// Class of the pager list.
pub const PAGER_CLASS: &str = "slider-pager";
/// Class of the active pager anchor.
pub const ACTIVE_CLASS: &str = "active";
/// Class of the previous arrow.
pub const PREV_CLASS: &str = "prev-btn";
/// Class of the next arrow.
pub const NEXT_CLASS: &str = "next-btn";

/// Container a carousel attaches to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<'a, N> {
    /// First element matching a selector in the document.
    Selector(&'a str),
    /// An element handle.
    Node(N),
}

/// Layout state of a carousel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutPhase {
    /// Every item fits on one page; navigation is torn down.
    Disabled,
    /// Navigation is built and no relayout is pending.
    ActiveStatic,
    /// A resize repositioned the strip without animation; the transition is
    /// restored once the settle delay elapses.
    RelayoutInFlight,
}

/// How an offset reaches the strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Motion {
    /// Animate with the configured transition.
    Animated,
    /// Jump without animation.
    Immediate,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct PositionState {
    /// Logical index, including the leading clone page when looping.
    pub(crate) index: usize,
    /// Translation currently applied to the strip.
    pub(crate) offset: f32,
    /// Extent of one page along the sliding axis.
    pub(crate) size: f32,
    /// Pager entry currently marked active.
    pub(crate) page: Option<usize>,
    /// A transition is in flight.
    pub(crate) sliding: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct DragState {
    pub(crate) active: bool,
    pub(crate) origin: PointerPosition,
    /// Origin coordinate along the sliding axis.
    pub(crate) initial: f32,
    /// Last tracked coordinate along the sliding axis.
    pub(crate) last: f32,
}

#[derive(Clone, Debug)]
pub(crate) struct Navigation<N> {
    pub(crate) pager: Option<N>,
    /// Pager anchors, one per real page.
    pub(crate) entries: Vec<N>,
    pub(crate) prev: Option<N>,
    pub(crate) next: Option<N>,
}

impl<N> Default for Navigation<N> {
    fn default() -> Self {
        Self {
            pager: None,
            entries: Vec::new(),
            prev: None,
            next: None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct InstalledListener<N> {
    pub(crate) kind: ListenerKind,
    pub(crate) target: N,
    pub(crate) id: ListenerId,
}

/// One carousel instance.
///
/// The carousel owns its state exclusively. The document it drives is
/// borrowed from the host for the duration of each call.
#[derive(Debug)]
pub struct Carousel<N> {
    pub(crate) config: CarouselConfig,
    pub(crate) properties: &'static StyleProperties,
    pub(crate) element: N,
    pub(crate) viewport: N,
    pub(crate) strip: N,
    pub(crate) items: Vec<N>,
    pub(crate) clones: CloneSet<N>,
    pub(crate) navigation: Navigation<N>,
    pub(crate) geometry: PageGeometry,
    /// Items per page of the active breakpoint, `None` before the first
    /// layout.
    pub(crate) breakpoint: Option<usize>,
    pub(crate) phase: LayoutPhase,
    pub(crate) position: PositionState,
    pub(crate) drag: DragState,
    pub(crate) listeners: SmallVec<[InstalledListener<N>; 12]>,
    pub(crate) auto_timer: Option<TimerId>,
    pub(crate) restore_timer: Option<TimerId>,
}

impl<N: Clone + Eq + Debug> Carousel<N> {
    /// Logical index, including the leading clone page when looping.
    pub fn index(&self) -> usize {
        self.position.index
    }

    /// Translation applied to the strip, in pixels.
    pub fn offset(&self) -> f32 {
        self.position.offset
    }

    /// Extent of one page along the sliding axis, in pixels.
    pub fn page_size(&self) -> f32 {
        self.position.size
    }

    /// Active pager entry, `None` when there is no pager.
    pub fn active_page(&self) -> Option<usize> {
        self.has_pager().then_some(self.position.page).flatten()
    }

    /// Real page shown at the current index.
    pub fn current_page(&self) -> usize {
        self.geometry.page(self.position.index)
    }

    /// Items per page of the active breakpoint.
    pub fn items_per_page(&self) -> usize {
        self.geometry.items_per_page
    }

    /// Pages needed to show every item, possibly fractional.
    pub fn num_steps(&self) -> f32 {
        self.geometry.num_steps()
    }

    /// Real items in the collection.
    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    /// Page arithmetic of the active breakpoint.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Current layout phase.
    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    /// Whether navigation is torn down because one page shows everything.
    pub fn is_disabled(&self) -> bool {
        self.phase == LayoutPhase::Disabled
    }

    /// Whether a transition is in flight.
    pub fn is_sliding(&self) -> bool {
        self.position.sliding
    }

    /// Whether a drag gesture is being tracked.
    pub fn is_dragging(&self) -> bool {
        self.drag.active
    }

    /// Whether the pager is built.
    pub fn has_pager(&self) -> bool {
        self.navigation.pager.is_some()
    }

    /// Container element.
    pub fn element(&self) -> &N {
        &self.element
    }

    /// Viewport wrapping the strip.
    pub fn viewport(&self) -> &N {
        &self.viewport
    }

    /// Item strip.
    pub fn strip(&self) -> &N {
        &self.strip
    }

    /// Real items, in order.
    pub fn items(&self) -> &[N] {
        &self.items
    }

    /// Attached boundary clones.
    pub fn clones(&self) -> &CloneSet<N> {
        &self.clones
    }

    /// Pager list, when built.
    pub fn pager(&self) -> Option<&N> {
        self.navigation.pager.as_ref()
    }

    /// Pager anchors, one per real page.
    pub fn pager_entries(&self) -> &[N] {
        &self.navigation.entries
    }

    /// Previous and next arrows, when built.
    pub fn arrows(&self) -> Option<(&N, &N)> {
        self.navigation
            .prev
            .as_ref()
            .zip(self.navigation.next.as_ref())
    }

    /// Validated configuration.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Routes a native event received by a listener of `kind`.
    ///
    /// Events that do not belong to `kind` are passed through untouched.
    pub fn dispatch<H: Host<Node = N>>(
        &mut self,
        host: &mut H,
        kind: ListenerKind,
        event: InputEvent<N>,
    ) -> InputOutcome {
        match (kind, event) {
            (ListenerKind::DragStart, InputEvent::Press(pos)) => self.pointer_down(host, pos),
            (ListenerKind::DragMove, InputEvent::Move(pos)) => self.pointer_move(host, pos),
            (ListenerKind::DragEnd, InputEvent::Release(pos)) => self.pointer_up(host, pos),
            (ListenerKind::ReleaseOutside, InputEvent::Release(_)) => self.release_outside(host),
            (ListenerKind::TransitionEnd, InputEvent::TransitionEnd) => {
                self.transition_end(host);
                InputOutcome::Passthrough
            }
            (ListenerKind::PrevArrow, InputEvent::Click { .. }) => {
                self.prev(host);
                InputOutcome::Consumed
            }
            (ListenerKind::NextArrow, InputEvent::Click { .. }) => {
                self.next(host);
                InputOutcome::Consumed
            }
            (ListenerKind::PagerClick, InputEvent::Click { target }) => {
                self.pager_click(host, &target)
            }
            (ListenerKind::Wheel, InputEvent::Wheel { delta_y }) => self.wheel(host, delta_y),
            (ListenerKind::ImageDragGuard, InputEvent::Press(_)) => {
                InputOutcome::DefaultPrevented
            }
            (kind, event) => {
                tracing::trace!(?kind, ?event, "Ignoring event not handled by this listener");
                InputOutcome::Passthrough
            }
        }
    }

    /// Runs a timeout previously scheduled by this carousel.
    ///
    /// Timeouts that were cancelled or replaced are ignored.
    pub fn timer_fired<H: Host<Node = N>>(&mut self, host: &mut H, id: TimerId, task: TimerTask) {
        match task {
            TimerTask::AutoAdvance if self.auto_timer == Some(id) => {
                self.auto_timer = None;
                self.next(host);
            }
            TimerTask::RestoreTransition if self.restore_timer == Some(id) => {
                self.restore_timer = None;
                self.enable_transition(host);
                if self.phase == LayoutPhase::RelayoutInFlight {
                    self.phase = LayoutPhase::ActiveStatic;
                }
            }
            _ => tracing::trace!(?id, ?task, "Ignoring stale carousel timer"),
        }
    }
}
