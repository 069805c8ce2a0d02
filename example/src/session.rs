use std::time::Duration;

use tessera_carousel::{
    Carousel, Dom, InputEvent, InputProfile, PointerPosition,
    headless::{HeadlessHost, NodeId},
    input::WHEEL_EVENT,
    style::style_properties,
};
use tracing::info;

/// One demo carousel and the document it lives in.
pub struct Session {
    name: &'static str,
    host: HeadlessHost,
    carousel: Carousel<NodeId>,
    profile: InputProfile,
}

impl Session {
    pub fn new(
        name: &'static str,
        host: HeadlessHost,
        carousel: Carousel<NodeId>,
        profile: InputProfile,
    ) -> Self {
        Self {
            name,
            host,
            carousel,
            profile,
        }
    }

    pub fn carousel(&self) -> &Carousel<NodeId> {
        &self.carousel
    }

    /// Delivers `event` to every listener it reaches from `target`, the way a
    /// browser bubbles it until a listener stops it. Returns whether the default
    /// action was suppressed.
    fn fire(&mut self, target: NodeId, name: &str, event: InputEvent<NodeId>) -> bool {
        let mut prevented = false;
        for kind in self.host.listeners_for(&target, name) {
            let outcome = self.carousel.dispatch(&mut self.host, kind, event.clone());
            prevented |= outcome.prevents_default();
            if outcome.stops_propagation() {
                break;
            }
        }
        prevented
    }

    pub fn click(&mut self, target: NodeId) -> bool {
        let name = self.profile.click();
        self.fire(target, name, InputEvent::Click { target })
    }

    pub fn wheel(&mut self, delta_y: f32) -> bool {
        let element = *self.carousel.element();
        self.fire(element, WHEEL_EVENT, InputEvent::Wheel { delta_y })
    }

    pub fn finish_transition(&mut self) {
        let viewport = *self.carousel.viewport();
        let name = style_properties(&self.host).transition_end;
        self.fire(viewport, name, InputEvent::TransitionEnd);
    }

    /// Drags across the viewport from `from` to `to` in two moves.
    pub fn drag(&mut self, from: PointerPosition, to: PointerPosition) {
        let viewport = *self.carousel.viewport();
        let halfway = PointerPosition::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
        self.fire(viewport, self.profile.start(), InputEvent::Press(from));
        self.fire(viewport, self.profile.moving(), InputEvent::Move(halfway));
        self.fire(viewport, self.profile.moving(), InputEvent::Move(to));
        self.fire(viewport, self.profile.end(), InputEvent::Release(to));
    }

    pub fn resize(&mut self, width: u32) {
        self.host.set_viewport_width(width);
        self.carousel.resize(&mut self.host);
    }

    /// Lets `duration` of virtual time pass, running due timeouts.
    pub fn wait(&mut self, duration: Duration) {
        let Self { host, carousel, .. } = self;
        host.advance(duration, |host, id, task| carousel.timer_fired(host, id, task));
    }

    pub fn report(&self, step: &str) {
        let carousel = &self.carousel;
        info!(
            demo = self.name,
            step,
            index = carousel.index(),
            page = carousel.current_page(),
            offset = carousel.offset(),
            items_per_page = carousel.items_per_page(),
            phase = ?carousel.phase(),
            clones = carousel.clones().len(),
            strip = ?self.strip_texts(),
            "carousel state"
        );
    }

    fn strip_texts(&self) -> Vec<String> {
        self.host
            .children(self.carousel.strip())
            .iter()
            .map(|node| self.host.text(node).unwrap_or_default())
            .collect()
    }

    /// Tears the carousel down and returns the listeners and timeouts left
    /// behind.
    pub fn finish(self) -> (usize, usize) {
        let Self {
            mut host, carousel, ..
        } = self;
        carousel.destroy(&mut host);
        (host.total_listeners(), host.pending_timers())
    }
}
