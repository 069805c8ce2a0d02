//! In-memory host for tests, demos and server-side simulation.
//!
//! [`HeadlessHost`] keeps a small element tree in an [`indextree::Arena`],
//! records installed listeners and runs timeouts on a virtual clock. It does
//! no layout: element sizes come from inline `width`/`height` styles, falling
//! back to the box set with [`HeadlessHost::set_box`].

use std::time::Duration;

use indextree::Arena;
pub use indextree::NodeId;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::host::{Dom, ListenerId, ListenerKind, TimerId, TimerTask, Timers};

#[derive(Clone, Debug, Default)]
struct Element {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attributes: FxHashMap<String, String>,
    style: FxHashMap<String, String>,
    text: Option<String>,
    width: f32,
    height: f32,
}

#[derive(Clone, Debug)]
struct Listener {
    id: ListenerId,
    target: NodeId,
    event: String,
    kind: ListenerKind,
}

#[derive(Clone, Copy, Debug)]
struct PendingTimer {
    id: TimerId,
    due: Duration,
    task: TimerTask,
}

/// A document, listener registry and virtual clock in one value.
#[derive(Debug)]
pub struct HeadlessHost {
    arena: Arena<Element>,
    body: NodeId,
    listeners: Vec<Listener>,
    timers: Vec<PendingTimer>,
    now: Duration,
    viewport_width: u32,
    class_mutations: u64,
    next_listener: u64,
    next_timer: u64,
    unsupported_styles: FxHashSet<String>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// Creates a document holding only `<body>`.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let body = arena.new_node(Element {
            tag: "body".to_string(),
            ..Element::default()
        });
        Self {
            arena,
            body,
            listeners: Vec::new(),
            timers: Vec::new(),
            now: Duration::ZERO,
            viewport_width: 1024,
            class_mutations: 0,
            next_listener: 1,
            next_timer: 1,
            unsupported_styles: FxHashSet::default(),
        }
    }

    /// Builds the markup a carousel expects: a container with `container_class`
    /// holding a `ul.slider-mask` strip of `count` `li` items, each
    /// `item_height` pixels tall. The container is `width` pixels wide.
    pub fn carousel_fixture(
        &mut self,
        container_class: &str,
        count: usize,
        width: f32,
        item_height: f32,
    ) -> NodeId {
        let container = self.create_element("div");
        self.add_class(&container, container_class);
        self.set_box(&container, width, item_height);
        let body = self.body;
        self.append_child(&body, &container);

        let strip = self.create_element("ul");
        self.add_class(&strip, "slider-mask");
        self.append_child(&container, &strip);

        for i in 0..count {
            let item = self.create_element("li");
            self.set_text(&item, &format!("{}", i + 1));
            self.set_box(&item, 0.0, item_height);
            self.append_child(&strip, &item);
        }
        container
    }

    /// Sets the fallback box of an element.
    pub fn set_box(&mut self, node: &NodeId, width: f32, height: f32) {
        if let Some(element) = self.element_mut(node) {
            element.width = width;
            element.height = height;
        }
    }

    /// Resizes the window.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// Number of class additions and removals that changed an element.
    pub fn class_mutations(&self) -> u64 {
        self.class_mutations
    }

    /// Marks a style property name as unknown to the platform.
    pub fn disable_style_property(&mut self, property: &str) {
        self.unsupported_styles.insert(property.to_string());
    }

    /// Text content of an element.
    pub fn text(&self, node: &NodeId) -> Option<String> {
        self.element(node).and_then(|element| element.text.clone())
    }

    /// Attribute value of an element.
    pub fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(node)
            .and_then(|element| element.attributes.get(name).cloned())
    }

    /// Kinds of the listeners an `event` on `target` reaches, bubbling from the
    /// target up to the body.
    pub fn listeners_for(&self, target: &NodeId, event: &str) -> Vec<ListenerKind> {
        target
            .ancestors(&self.arena)
            .flat_map(|node| {
                self.listeners
                    .iter()
                    .filter(move |listener| listener.target == node && listener.event == event)
                    .map(|listener| listener.kind)
            })
            .collect()
    }

    /// Number of installed listeners of `kind`.
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners
            .iter()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    /// Total number of installed listeners.
    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timeouts.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether a timeout running `task` is pending.
    pub fn has_pending(&self, task: TimerTask) -> bool {
        self.timers.iter().any(|timer| timer.task == task)
    }

    /// Moves the clock forward by `by`, firing every timeout that falls due in
    /// order. Timeouts scheduled by `fire` run too if they fall due within the
    /// window.
    pub fn advance(&mut self, by: Duration, mut fire: impl FnMut(&mut Self, TimerId, TimerTask)) {
        let target = self.now + by;
        while let Some(timer) = self.pop_due(target) {
            self.now = timer.due;
            fire(self, timer.id, timer.task);
        }
        self.now = target;
    }

    fn pop_due(&mut self, until: Duration) -> Option<PendingTimer> {
        let position = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(position, _)| position)?;
        Some(self.timers.remove(position))
    }

    fn element(&self, node: &NodeId) -> Option<&Element> {
        self.arena.get(*node).map(|node| node.get())
    }

    fn element_mut(&mut self, node: &NodeId) -> Option<&mut Element> {
        self.arena.get_mut(*node).map(|node| node.get_mut())
    }

    fn matches(&self, node: NodeId, selector: &Selector<'_>) -> bool {
        let Some(element) = self.element(&node) else {
            return false;
        };
        let tag_matches = selector.tag.is_none_or(|tag| element.tag == tag);
        let classes_match = selector
            .classes
            .iter()
            .all(|class| element.classes.iter().any(|own| own == class));
        tag_matches && classes_match
    }

    fn length_style(&self, node: &NodeId, property: &str) -> Option<f32> {
        self.element(node)?
            .style
            .get(property)?
            .strip_suffix("px")?
            .trim()
            .parse()
            .ok()
    }

    fn copy_subtree(&mut self, source: NodeId) -> NodeId {
        let data = self.arena[source].get().clone();
        let copy = self.arena.new_node(data);
        let children: Vec<_> = source.children(&self.arena).collect();
        for child in children {
            let child_copy = self.copy_subtree(child);
            copy.append(child_copy, &mut self.arena);
        }
        copy
    }
}

/// A compound selector: optional tag followed by any number of classes.
struct Selector<'a> {
    tag: Option<&'a str>,
    classes: SmallVec<[&'a str; 2]>,
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Self {
        let mut parts = selector.trim().split('.');
        let tag = parts.next().filter(|tag| !tag.is_empty());
        Self {
            tag,
            classes: parts.filter(|class| !class.is_empty()).collect(),
        }
    }
}

impl Dom for HeadlessHost {
    type Node = NodeId;

    fn query(&self, scope: Option<&NodeId>, selector: &str) -> Option<NodeId> {
        let scope = scope.copied().unwrap_or(self.body);
        let selector = Selector::parse(selector);
        scope
            .descendants(&self.arena)
            .skip(1)
            .find(|&node| self.matches(node, &selector))
    }

    fn query_all(&self, scope: &NodeId, selector: &str) -> Vec<NodeId> {
        let selector = Selector::parse(selector);
        scope
            .descendants(&self.arena)
            .skip(1)
            .filter(|&node| self.matches(node, &selector))
            .collect()
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.arena.new_node(Element {
            tag: tag.to_ascii_lowercase(),
            ..Element::default()
        })
    }

    fn clone_node(&mut self, node: &NodeId) -> NodeId {
        self.copy_subtree(*node)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        child.detach(&mut self.arena);
        parent.append(*child, &mut self.arena);
    }

    fn prepend_child(&mut self, parent: &NodeId, child: &NodeId) {
        child.detach(&mut self.arena);
        parent.prepend(*child, &mut self.arena);
    }

    fn remove(&mut self, node: &NodeId) {
        node.detach(&mut self.arena);
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.arena.get(*node).and_then(|node| node.parent())
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        node.children(&self.arena).collect()
    }

    fn set_text(&mut self, node: &NodeId, text: &str) {
        if let Some(element) = self.element_mut(node) {
            element.text = Some(text.to_string());
        }
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.element_mut(node)
            && !element.classes.iter().any(|own| own == class)
        {
            element.classes.push(class.to_string());
            self.class_mutations += 1;
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.element_mut(node) {
            let before = element.classes.len();
            element.classes.retain(|own| own != class);
            if element.classes.len() != before {
                self.class_mutations += 1;
            }
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.classes.iter().any(|own| own == class))
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.element(node)
            .map(|element| element.tag.clone())
            .unwrap_or_default()
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element
                .style
                .insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.element(node)
            .and_then(|element| element.style.get(property).cloned())
    }

    fn supports_style_property(&self, property: &str) -> bool {
        !self.unsupported_styles.contains(property)
    }

    fn offset_width(&self, node: &NodeId) -> f32 {
        self.length_style(node, "width")
            .or_else(|| self.element(node).map(|element| element.width))
            .unwrap_or(0.0)
    }

    fn offset_height(&self, node: &NodeId) -> f32 {
        self.length_style(node, "height")
            .or_else(|| self.element(node).map(|element| element.height))
            .unwrap_or(0.0)
    }

    fn listen(&mut self, target: &NodeId, event: &str, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener {
            id,
            target: *target,
            event: event.to_string(),
            kind,
        });
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|listener| listener.id != id);
    }
}

impl Timers for HeadlessHost {
    fn set_timeout(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(PendingTimer {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.retain(|timer| timer.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_match_tag_and_class() {
        let mut host = HeadlessHost::new();
        let container = host.carousel_fixture("slider", 3, 600.0, 100.0);

        assert_eq!(host.query(None, ".slider"), Some(container));
        let strip = host.query(Some(&container), "ul.slider-mask").expect("strip exists");
        assert_eq!(host.query_all(&strip, "li").len(), 3);
        assert!(host.query(Some(&container), ".missing").is_none());
        assert!(host.query(Some(&strip), ".slider-mask").is_none());
    }

    #[test]
    fn clone_copies_the_subtree() {
        let mut host = HeadlessHost::new();
        let list = host.create_element("ul");
        let item = host.create_element("li");
        let anchor = host.create_element("a");
        host.set_text(&anchor, "go");
        host.append_child(&item, &anchor);
        host.append_child(&list, &item);

        let copy = host.clone_node(&item);
        assert_ne!(copy, item);
        assert!(host.parent(&copy).is_none());
        let copied_children = host.children(&copy);
        assert_eq!(copied_children.len(), 1);
        assert_eq!(host.text(&copied_children[0]).as_deref(), Some("go"));
    }

    #[test]
    fn width_prefers_inline_style() {
        let mut host = HeadlessHost::new();
        let node = host.create_element("li");
        host.set_box(&node, 10.0, 20.0);
        assert_eq!(host.offset_width(&node), 10.0);
        host.set_style(&node, "width", "150.5px");
        assert_eq!(host.offset_width(&node), 150.5);
        assert_eq!(host.offset_height(&node), 20.0);
    }

    #[test]
    fn listeners_bubble_to_ancestors() {
        let mut host = HeadlessHost::new();
        let list = host.create_element("ul");
        let anchor = host.create_element("a");
        let body = host.body();
        host.append_child(&body, &list);
        host.append_child(&list, &anchor);
        let id = host.listen(&list, "click", ListenerKind::PagerClick);

        assert_eq!(
            host.listeners_for(&anchor, "click"),
            vec![ListenerKind::PagerClick]
        );
        assert!(host.listeners_for(&anchor, "mousedown").is_empty());
        host.unlisten(id);
        assert_eq!(host.total_listeners(), 0);
    }

    #[test]
    fn clock_fires_timers_in_due_order() {
        let mut host = HeadlessHost::new();
        host.set_timeout(Duration::from_millis(300), TimerTask::AutoAdvance);
        let cancelled = host.set_timeout(Duration::from_millis(100), TimerTask::AutoAdvance);
        host.set_timeout(Duration::from_millis(200), TimerTask::RestoreTransition);
        host.clear_timeout(cancelled);

        let mut fired = Vec::new();
        host.advance(Duration::from_millis(250), |host, _, task| {
            fired.push((host.now(), task));
        });
        assert_eq!(
            fired,
            vec![(Duration::from_millis(200), TimerTask::RestoreTransition)]
        );
        assert_eq!(host.now(), Duration::from_millis(250));
        assert_eq!(host.pending_timers(), 1);
    }
}
