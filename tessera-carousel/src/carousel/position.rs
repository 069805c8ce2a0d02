//! Index to offset mapping, pager highlighting and wrap correction.

use std::{fmt::Debug, time::Duration};

use tracing::trace;

use super::{ACTIVE_CLASS, Carousel, Motion};
use crate::{
    host::{Host, TimerTask},
    style,
};

impl<N: Clone + Eq + Debug> Carousel<N> {
    /// Moves the strip to a logical index with animation and returns the
    /// applied offset.
    ///
    /// The index is clamped to the logical range. Reapplying the current
    /// index leaves the pager untouched but still restarts the auto-advance
    /// clock.
    pub fn apply_index<H: Host<Node = N>>(&mut self, host: &mut H, index: usize) -> f32 {
        let index = index.min(self.geometry.slots().saturating_sub(1));
        self.move_to_index(host, index, Motion::Animated)
    }

    /// Translates the strip to a pixel offset with animation, keeping the
    /// logical index.
    pub fn go_to<H: Host<Node = N>>(&mut self, host: &mut H, offset: f32) {
        self.set_offset(host, offset, Motion::Animated);
        self.sync_pager(host);
        self.restart_auto(host);
    }

    pub(crate) fn move_to_index<H: Host<Node = N>>(
        &mut self,
        host: &mut H,
        index: usize,
        motion: Motion,
    ) -> f32 {
        self.position.index = index;
        let mut offset = self.offset_for(index);
        self.set_offset(host, offset, motion);

        // No transition end arrives for an instant move, so a clone page is
        // swapped for its real page right away.
        let instant = motion == Motion::Immediate || self.config.time <= 0.0;
        if let Some(real) = self.real_index_of_clone(index).filter(|_| instant) {
            trace!(from = index, to = real, "Wrapping carousel without a transition");
            self.position.index = real;
            offset = self.offset_for(real);
            self.set_offset(host, offset, Motion::Immediate);
        }

        self.sync_pager(host);
        self.restart_auto(host);
        offset
    }

    /// Real index showing the same items as the clone page at `index`.
    fn real_index_of_clone(&self, index: usize) -> Option<usize> {
        if !self.geometry.looping {
            return None;
        }
        if index == 0 {
            Some(self.geometry.real_pages())
        } else if index + 1 == self.geometry.slots() {
            Some(self.geometry.lead())
        } else {
            None
        }
    }

    pub(crate) fn offset_for(&self, index: usize) -> f32 {
        -self.position.size * self.geometry.position(index)
    }

    pub(crate) fn set_offset<H: Host<Node = N>>(
        &mut self,
        host: &mut H,
        offset: f32,
        motion: Motion,
    ) {
        // An unchanged transform starts no transition, and so never ends one.
        let moved = offset != self.position.offset;
        self.position.offset = offset;
        self.position.sliding = match motion {
            Motion::Animated if moved => self.config.time > 0.0,
            Motion::Animated => self.position.sliding,
            Motion::Immediate => false,
        };
        trace!(offset, ?motion, index = self.position.index, "Applying carousel offset");
        host.set_style(
            &self.strip,
            &self.properties.transform,
            &style::translate(offset, self.config.vertical),
        );
    }

    /// Highlights the pager entry of the current index. Writes nothing when
    /// the entry is already active.
    pub(crate) fn sync_pager<H: Host<Node = N>>(&mut self, host: &mut H) {
        if self.navigation.pager.is_none() {
            return;
        }
        let page = self.geometry.page(self.position.index);
        if self.position.page == Some(page) {
            return;
        }
        if let Some(previous) = self
            .position
            .page
            .and_then(|previous| self.navigation.entries.get(previous))
        {
            host.remove_class(previous, ACTIVE_CLASS);
        }
        if let Some(entry) = self.navigation.entries.get(page) {
            host.add_class(entry, ACTIVE_CLASS);
        }
        self.position.page = Some(page);
    }

    pub(crate) fn restart_auto<H: Host<Node = N>>(&mut self, host: &mut H) {
        if let Some(id) = self.auto_timer.take() {
            host.clear_timeout(id);
        }
        if self.config.auto && !self.geometry.is_disabled() {
            self.auto_timer = Some(host.set_timeout(self.config.duration, TimerTask::AutoAdvance));
        }
    }

    pub(crate) fn cancel_auto<H: Host<Node = N>>(&mut self, host: &mut H) {
        if let Some(id) = self.auto_timer.take() {
            host.clear_timeout(id);
        }
    }

    pub(crate) fn set_transition<H: Host<Node = N>>(&mut self, host: &mut H, seconds: f32) {
        host.set_style(
            &self.strip,
            &self.properties.transition,
            &style::transition(seconds),
        );
    }

    pub(crate) fn enable_transition<H: Host<Node = N>>(&mut self, host: &mut H) {
        self.set_transition(host, self.config.time);
    }

    pub(crate) fn disable_transition<H: Host<Node = N>>(&mut self, host: &mut H) {
        self.set_transition(host, 0.0);
    }

    /// Re-enables the transition after `delay`, replacing a pending restore.
    pub(crate) fn schedule_restore<H: Host<Node = N>>(&mut self, host: &mut H, delay: Duration) {
        if let Some(id) = self.restore_timer.take() {
            host.clear_timeout(id);
        }
        self.restore_timer = Some(host.set_timeout(delay, TimerTask::RestoreTransition));
    }

    /// Handles the end of a strip transition.
    ///
    /// When the strip came to rest on a clone page it jumps, without
    /// animation, to the real page showing the same items: the leading clone
    /// maps to the last real page and the trailing clone to the first. The
    /// transition comes back on the next timer tick.
    pub fn transition_end<H: Host<Node = N>>(&mut self, host: &mut H) {
        let size = self.position.size;
        if self.geometry.looping && size > 0.0 && !self.drag.active {
            let offset = self.position.offset;
            let steps = self.geometry.num_steps();
            let target = if offset > -size {
                Some(self.geometry.real_pages())
            } else if -offset >= (size * (steps + 1.0)).floor() {
                Some(self.geometry.lead())
            } else {
                None
            };

            if let Some(index) = target {
                trace!(from = self.position.index, to = index, "Wrapping carousel");
                self.disable_transition(host);
                self.move_to_index(host, index, Motion::Immediate);
                self.schedule_restore(host, Duration::ZERO);
            }
        }
        self.position.sliding = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        CarouselArgs, InputProfile, Target,
        carousel::Carousel,
        headless::{HeadlessHost, NodeId},
        host::{Dom, TimerTask},
    };

    fn looping(items: usize, per_page: usize) -> (HeadlessHost, Carousel<NodeId>) {
        let mut host = HeadlessHost::new();
        host.carousel_fixture("slider", items, 600.0, 100.0);
        host.set_viewport_width(1000);
        let carousel = Carousel::create(
            &mut host,
            Target::Selector(".slider"),
            CarouselArgs::default()
                .breakpoints(vec![crate::Breakpoint::new(0, per_page)])
                .auto(true),
            InputProfile::Pointer,
        )
        .expect("valid markup")
        .expect("fresh container");
        (host, carousel)
    }

    #[test]
    fn offset_compensates_for_leading_clone_page() {
        let (mut host, mut carousel) = looping(8, 2);
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.offset(), -600.0);

        assert_eq!(carousel.apply_index(&mut host, 3), -1800.0);
        assert_eq!(carousel.active_page(), Some(2));
        assert_eq!(
            host.style(carousel.strip(), "transform").as_deref(),
            Some("translate3d(-1800px, 0, 0)")
        );
        assert!(carousel.is_sliding());
    }

    #[test]
    fn reapplying_an_index_only_restarts_the_clock() {
        let (mut host, mut carousel) = looping(8, 2);
        carousel.apply_index(&mut host, 2);
        let mutations = host.class_mutations();
        let timer = carousel.auto_timer;

        carousel.apply_index(&mut host, 2);
        assert_eq!(host.class_mutations(), mutations);
        assert_ne!(carousel.auto_timer, timer);
        assert!(carousel.auto_timer.is_some());
        assert!(host.has_pending(TimerTask::AutoAdvance));
    }

    #[test]
    fn exactly_one_pager_entry_is_active() {
        let (mut host, mut carousel) = looping(8, 2);
        for index in [2, 4, 0, 5, 1] {
            carousel.apply_index(&mut host, index);
            let active: Vec<usize> = carousel
                .pager_entries()
                .iter()
                .enumerate()
                .filter(|(_, entry)| host.has_class(entry, "active"))
                .map(|(page, _)| page)
                .collect();
            assert_eq!(active, vec![carousel.current_page()]);
        }
    }

    #[test]
    fn leading_clone_snaps_to_last_real_page() {
        let (mut host, mut carousel) = looping(6, 3);
        carousel.apply_index(&mut host, 0);
        assert_eq!(carousel.offset(), 0.0);

        carousel.transition_end(&mut host);
        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.offset(), -1200.0);
        assert!(!carousel.is_sliding());
        assert_eq!(
            host.style(carousel.strip(), "transition").as_deref(),
            Some("all 0s")
        );
        assert!(host.has_pending(TimerTask::RestoreTransition));
    }

    #[test]
    fn trailing_clone_snaps_to_first_real_page() {
        let (mut host, mut carousel) = looping(6, 3);
        carousel.apply_index(&mut host, 3);
        assert_eq!(carousel.offset(), -1800.0);

        carousel.transition_end(&mut host);
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.offset(), -600.0);
        assert_eq!(carousel.active_page(), Some(0));
    }

    #[test]
    fn real_pages_are_left_alone() {
        let (mut host, mut carousel) = looping(6, 3);
        carousel.apply_index(&mut host, 2);
        let restore = carousel.restore_timer;
        carousel.transition_end(&mut host);
        assert_eq!(carousel.index(), 2);
        assert_eq!(carousel.offset(), -1200.0);
        assert_eq!(carousel.restore_timer, restore);
        assert!(!carousel.is_sliding());
    }

    #[test]
    fn unchanged_offset_does_not_start_sliding() {
        let (mut host, mut carousel) = looping(8, 2);
        assert_eq!(carousel.apply_index(&mut host, 1), -600.0);
        assert!(!carousel.is_sliding());

        carousel.apply_index(&mut host, 2);
        assert!(carousel.is_sliding());
        carousel.apply_index(&mut host, 2);
        assert!(carousel.is_sliding());
    }

    #[test]
    fn instant_moves_never_rest_on_a_clone_page() {
        let mut host = HeadlessHost::new();
        host.carousel_fixture("slider", 8, 600.0, 100.0);
        let mut carousel = Carousel::create(
            &mut host,
            Target::Selector(".slider"),
            CarouselArgs::default()
                .breakpoints(vec![crate::Breakpoint::new(0, 2)])
                .time(0.0),
            InputProfile::Pointer,
        )
        .expect("valid markup")
        .expect("fresh container");

        assert_eq!(carousel.apply_index(&mut host, 0), -2400.0);
        assert_eq!(carousel.index(), 4);
        assert_eq!(carousel.active_page(), Some(3));

        assert_eq!(carousel.apply_index(&mut host, 5), -600.0);
        assert_eq!(carousel.index(), 1);
        assert_eq!(carousel.active_page(), Some(0));
        assert!(!carousel.is_sliding());
    }

    #[test]
    fn go_to_keeps_the_index() {
        let (mut host, mut carousel) = looping(8, 2);
        carousel.go_to(&mut host, -123.0);
        assert_eq!(carousel.offset(), -123.0);
        assert_eq!(carousel.index(), 1);
    }
}
