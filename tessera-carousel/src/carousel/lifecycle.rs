//! Construction, relayout and teardown.
//!
//! A carousel is laid out once on construction and again on every resize. A
//! layout whose breakpoint is unchanged only resizes the items and re-applies
//! the current offset. A breakpoint change also rebuilds the clones, the pager,
//! the arrows and the navigation listeners, or tears them down when a single
//! page shows every item.

use std::fmt::Debug;

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::{
    Carousel, CloneSet, DragState, INITIALIZED_CLASS, InstalledListener, LayoutPhase, Motion,
    NEXT_CLASS, Navigation, PAGER_CLASS, PREV_CLASS, PageGeometry, PositionState, Target,
    VIEWPORT_CLASS, resolve_items_per_page,
};
use crate::{
    config::{CarouselArgs, CarouselConfig},
    error::CarouselError,
    host::{Host, ListenerKind},
    input::{InputProfile, WHEEL_EVENT},
    style::{self, style_properties},
};

impl<N: Clone + Eq + Debug> Carousel<N> {
    /// Attaches a carousel to `target`.
    ///
    /// The strip matching the wrapper selector is moved into a fresh viewport
    /// element, the container is marked as initialised and the first layout
    /// runs immediately. Returns `Ok(None)` when the container already hosts
    /// a carousel.
    ///
    /// # Errors
    ///
    /// Fails when the options are invalid or the markup lacks the container
    /// or the strip.
    pub fn create<H: Host<Node = N>>(
        host: &mut H,
        target: Target<'_, N>,
        args: CarouselArgs,
        profile: InputProfile,
    ) -> Result<Option<Self>, CarouselError> {
        let config = CarouselConfig::new(args, profile)?;
        let element = match target {
            Target::Selector(selector) => host
                .query(None, selector)
                .ok_or_else(|| CarouselError::ContainerNotFound(selector.to_string()))?,
            Target::Node(node) => node,
        };
        if host.has_class(&element, INITIALIZED_CLASS) {
            debug!(?element, "Container already hosts a carousel");
            return Ok(None);
        }
        let strip = host
            .query(Some(&element), &config.wrapper)
            .ok_or_else(|| CarouselError::StripNotFound(config.wrapper.clone()))?;

        host.add_class(&element, INITIALIZED_CLASS);
        let viewport = host.create_element("div");
        host.add_class(&viewport, VIEWPORT_CLASS);
        host.append_child(&viewport, &strip);
        host.append_child(&element, &viewport);

        let items = host.query_all(&strip, &config.items);
        let properties = style_properties(&*host);
        let geometry = PageGeometry::new(items.len(), items.len(), false);
        debug!(items = items.len(), ?profile, "Creating carousel");

        let mut carousel = Self {
            config,
            properties,
            element,
            viewport,
            strip,
            items,
            clones: CloneSet::default(),
            navigation: Navigation::default(),
            geometry,
            breakpoint: None,
            phase: LayoutPhase::ActiveStatic,
            position: PositionState::default(),
            drag: DragState::default(),
            listeners: SmallVec::new(),
            auto_timer: None,
            restore_timer: None,
        };

        let element = carousel.element.clone();
        carousel.listen(host, &element, WHEEL_EVENT, ListenerKind::Wheel);
        carousel.relayout(host);
        if carousel.phase == LayoutPhase::RelayoutInFlight {
            carousel.phase = LayoutPhase::ActiveStatic;
        }
        host.set_style(&element, "visibility", "visible");
        Ok(Some(carousel))
    }

    /// Lays the carousel out again for the current window width.
    ///
    /// Any drag in progress is dropped. The strip is repositioned without
    /// animation and the transition comes back after the settle delay.
    pub fn resize<H: Host<Node = N>>(&mut self, host: &mut H) {
        self.drag.active = false;
        self.relayout(host);
    }

    /// Detaches the carousel, leaving no listener or timeout behind.
    ///
    /// Clones, the pager and the arrows are removed and the container loses
    /// its initialised mark. Real items stay inside the viewport.
    pub fn destroy<H: Host<Node = N>>(mut self, host: &mut H) {
        self.cancel_auto(host);
        if let Some(id) = self.restore_timer.take() {
            host.clear_timeout(id);
        }
        for listener in self.listeners.drain(..) {
            host.unlisten(listener.id);
        }
        self.clones.clear(host, &self.strip, &self.config.clone_class);
        self.remove_pager(host);
        self.remove_arrows(host);
        host.remove_class(&self.element, INITIALIZED_CLASS);
        debug!(element = ?self.element, "Carousel destroyed");
    }

    fn relayout<H: Host<Node = N>>(&mut self, host: &mut H) {
        let width = host.viewport_width();
        let resolved = resolve_items_per_page(width, &self.config.breakpoints, self.config.single);
        let geometry = PageGeometry::new(self.items.len(), resolved, self.config.infinite);

        if self.breakpoint != Some(geometry.items_per_page) {
            let first_item = self
                .breakpoint
                .map(|_| self.geometry.first_item(self.position.index))
                .unwrap_or(0);
            debug!(
                width,
                items_per_page = geometry.items_per_page,
                disabled = geometry.is_disabled(),
                "Carousel breakpoint changed"
            );
            self.geometry = geometry;
            self.breakpoint = Some(geometry.items_per_page);
            self.position.page = None;
            if geometry.is_disabled() {
                self.teardown_navigation(host);
            } else {
                self.build_navigation(host);
                self.position.index = geometry.index_of_item(first_item);
            }
        }

        self.apply_sizes(host);
        self.phase = if self.geometry.is_disabled() {
            LayoutPhase::Disabled
        } else {
            LayoutPhase::RelayoutInFlight
        };
        self.disable_transition(host);
        let index = self.position.index;
        self.move_to_index(host, index, Motion::Immediate);
        let settle = self.config.settle_delay();
        self.schedule_restore(host, settle);
        debug!(index, size = self.position.size, phase = ?self.phase, "Carousel laid out");
    }

    fn apply_sizes<H: Host<Node = N>>(&mut self, host: &mut H) {
        let width = host.offset_width(&self.element);
        let per_page = self.geometry.items_per_page as f32;

        if self.config.vertical {
            let full = style::px(width);
            for node in self.items.iter().chain(self.clones.iter()) {
                host.set_style(node, "width", &full);
            }
            let item_height = self
                .items
                .first()
                .map(|first| host.offset_height(first))
                .unwrap_or(0.0);
            self.position.size = item_height * per_page;
            host.set_style(&self.viewport, "height", &style::px(self.position.size));
        } else {
            let item_width = width / per_page;
            let value = style::px(item_width);
            for node in self.items.iter().chain(self.clones.iter()) {
                host.set_style(node, "width", &value);
            }
            let count = (self.items.len() + self.clones.len()) as f32;
            host.set_style(&self.strip, "width", &style::px(item_width * count));
            self.position.size = width;
        }
    }

    fn build_navigation<H: Host<Node = N>>(&mut self, host: &mut H) {
        self.clones.rebuild(
            host,
            &self.strip,
            &self.items,
            self.geometry.items_per_page,
            self.geometry.looping,
            &self.config.clone_class,
        );

        if self.config.show_pager {
            self.remove_pager(host);
            let pager = host.create_element("ul");
            host.add_class(&pager, PAGER_CLASS);
            for page in 0..self.geometry.real_pages() {
                let entry = host.create_element("li");
                let anchor = host.create_element("a");
                host.set_attribute(&anchor, "href", "#");
                host.set_text(&anchor, &(page + 1).to_string());
                host.append_child(&entry, &anchor);
                host.append_child(&pager, &entry);
                self.navigation.entries.push(anchor);
            }
            host.append_child(&self.element, &pager);
            self.navigation.pager = Some(pager);
        }

        if self.config.arrows && self.navigation.prev.is_none() {
            let prev = self.arrow(host, PREV_CLASS, "<");
            let next = self.arrow(host, NEXT_CLASS, ">");
            self.navigation.prev = Some(prev);
            self.navigation.next = Some(next);
        }

        self.attach_listeners(host);
    }

    fn teardown_navigation<H: Host<Node = N>>(&mut self, host: &mut H) {
        self.clones.clear(host, &self.strip, &self.config.clone_class);
        self.remove_pager(host);
        self.remove_arrows(host);
        self.detach_listeners(host);
        self.cancel_auto(host);
        self.position.index = 0;
        self.position.sliding = false;
    }

    fn arrow<H: Host<Node = N>>(&self, host: &mut H, class: &str, label: &str) -> N {
        let anchor = host.create_element("a");
        host.set_attribute(&anchor, "href", "#");
        host.add_class(&anchor, class);
        host.set_text(&anchor, label);
        host.append_child(&self.element, &anchor);
        anchor
    }

    fn remove_pager<H: Host<Node = N>>(&mut self, host: &mut H) {
        if let Some(pager) = self.navigation.pager.take() {
            host.remove(&pager);
        }
        self.navigation.entries.clear();
    }

    fn remove_arrows<H: Host<Node = N>>(&mut self, host: &mut H) {
        for arrow in [self.navigation.prev.take(), self.navigation.next.take()]
            .into_iter()
            .flatten()
        {
            host.remove(&arrow);
        }
    }

    /// Installs the navigation listeners, replacing any installed before.
    fn attach_listeners<H: Host<Node = N>>(&mut self, host: &mut H) {
        self.detach_listeners(host);
        let profile = self.config.profile;
        let viewport = self.viewport.clone();

        if self.config.drag {
            self.listen(host, &viewport, profile.start(), ListenerKind::DragStart);
            self.listen(host, &viewport, profile.moving(), ListenerKind::DragMove);
            self.listen(host, &viewport, profile.end(), ListenerKind::DragEnd);
            if !profile.is_touch() {
                let body = host.body();
                self.listen(host, &body, profile.end(), ListenerKind::ReleaseOutside);
            }
        }
        if self.config.force_touch {
            for image in host.query_all(&self.strip, "img") {
                self.listen(host, &image, profile.start(), ListenerKind::ImageDragGuard);
            }
        }
        self.listen(
            host,
            &viewport,
            self.properties.transition_end,
            ListenerKind::TransitionEnd,
        );
        let arrows = (self.navigation.prev.clone(), self.navigation.next.clone());
        if let (Some(prev), Some(next)) = arrows {
            self.listen(host, &prev, profile.click(), ListenerKind::PrevArrow);
            self.listen(host, &next, profile.click(), ListenerKind::NextArrow);
        }
        if let Some(pager) = self.navigation.pager.clone() {
            self.listen(host, &pager, profile.click(), ListenerKind::PagerClick);
        }
    }

    /// Removes every listener except the container's wheel listener, which
    /// lives as long as the carousel.
    fn detach_listeners<H: Host<Node = N>>(&mut self, host: &mut H) {
        self.listeners.retain(|listener| {
            if listener.kind == ListenerKind::Wheel {
                return true;
            }
            trace!(kind = ?listener.kind, target = ?listener.target, "Removing listener");
            host.unlisten(listener.id);
            false
        });
    }

    fn listen<H: Host<Node = N>>(
        &mut self,
        host: &mut H,
        target: &N,
        event: &str,
        kind: ListenerKind,
    ) {
        let id = host.listen(target, event, kind);
        self.listeners.push(InstalledListener {
            kind,
            target: target.clone(),
            id,
        });
    }
}
