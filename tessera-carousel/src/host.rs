//! Collaborator traits implemented by the embedding environment.
//!
//! A carousel never owns the document it manipulates. Every mutation goes
//! through a [`Host`], which is passed by `&mut` into each operation. This
//! keeps one owned state struct per carousel while the host stays free to
//! route events to many instances.

use std::{fmt::Debug, time::Duration};

/// Identifier of an installed event listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Identifier of a scheduled timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Listener roles a carousel installs.
///
/// The host stores the kind next to each listener and hands it back to
/// [`Carousel::dispatch`](crate::Carousel::dispatch) when the event fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Drag start on the viewport.
    DragStart,
    /// Drag move on the viewport.
    DragMove,
    /// Drag end on the viewport.
    DragEnd,
    /// Pointer released anywhere on the page body.
    ReleaseOutside,
    /// Strip transition finished.
    TransitionEnd,
    /// Previous arrow activated.
    PrevArrow,
    /// Next arrow activated.
    NextArrow,
    /// Pager entry activated.
    PagerClick,
    /// Wheel rotated over the container.
    Wheel,
    /// Native drag started on an image inside the strip.
    ImageDragGuard,
}

/// Deferred callbacks a carousel schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerTask {
    /// Auto-advance to the next page.
    AutoAdvance,
    /// Re-enable the strip transition after a zero-duration reposition.
    RestoreTransition,
}

/// DOM-like document access.
pub trait Dom {
    /// Handle to one element of the document.
    type Node: Clone + Eq + Debug;

    /// First element matching `selector` inside `scope`, or inside the whole
    /// document when `scope` is `None`.
    fn query(&self, scope: Option<&Self::Node>, selector: &str) -> Option<Self::Node>;
    /// Every element matching `selector` inside `scope`, in document order.
    fn query_all(&self, scope: &Self::Node, selector: &str) -> Vec<Self::Node>;
    /// Root element receiving page-level events.
    fn body(&self) -> Self::Node;
    /// Width of the window the document is shown in, in pixels.
    fn viewport_width(&self) -> u32;
    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Node;
    /// Deep copy of `node` and its subtree, detached.
    fn clone_node(&mut self, node: &Self::Node) -> Self::Node;
    /// Appends `child` as the last child of `parent`, detaching it first.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
    /// Inserts `child` as the first child of `parent`, detaching it first.
    fn prepend_child(&mut self, parent: &Self::Node, child: &Self::Node);
    /// Removes `node` and its subtree from the document.
    fn remove(&mut self, node: &Self::Node);
    /// Parent element, if attached.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Direct children in order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
    /// Replaces the text content of `node`.
    fn set_text(&mut self, node: &Self::Node, text: &str);
    /// Sets an attribute.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
    /// Adds a class.
    fn add_class(&mut self, node: &Self::Node, class: &str);
    /// Removes a class.
    fn remove_class(&mut self, node: &Self::Node, class: &str);
    /// Class membership.
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    /// Tag name in lower case.
    fn tag_name(&self, node: &Self::Node) -> String;
    /// Sets an inline style property.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);
    /// Reads an inline style property.
    fn style(&self, node: &Self::Node, property: &str) -> Option<String>;
    /// Whether the platform understands the given style property name.
    fn supports_style_property(&self, property: &str) -> bool;
    /// Rendered width in pixels.
    fn offset_width(&self, node: &Self::Node) -> f32;
    /// Rendered height in pixels.
    fn offset_height(&self, node: &Self::Node) -> f32;
    /// Installs a listener and tags it with `kind` for routing.
    fn listen(&mut self, target: &Self::Node, event: &str, kind: ListenerKind) -> ListenerId;
    /// Removes a listener previously returned by [`Dom::listen`].
    fn unlisten(&mut self, id: ListenerId);
}

/// One-shot timeouts on the host event loop.
pub trait Timers {
    /// Schedules `task` after `delay`.
    fn set_timeout(&mut self, delay: Duration, task: TimerTask) -> TimerId;
    /// Cancels a pending timeout. Unknown or fired ids are ignored.
    fn clear_timeout(&mut self, id: TimerId);
}

/// Everything a carousel needs from its environment.
pub trait Host: Dom + Timers {}

impl<T: Dom + Timers> Host for T {}
