//! Input handlers that request index changes.

use std::fmt::Debug;

use tracing::{trace, warn};

use super::{Carousel, DragState, Motion};
use crate::{
    host::Host,
    input::{InputOutcome, PointerPosition},
};

impl<N: Clone + Eq + Debug> Carousel<N> {
    /// Advances one page. Wraps through the trailing clone page when looping
    /// and stops at the last page otherwise.
    pub fn next<H: Host<Node = N>>(&mut self, host: &mut H) {
        if self.is_disabled() {
            return;
        }
        let index = self.position.index;
        let target = if self.geometry.looping {
            (index + 1) % self.geometry.slots()
        } else {
            (index + 1).min(self.geometry.real_pages() - 1)
        };
        self.move_to_index(host, target, Motion::Animated);
    }

    /// Goes back one page. Mirrors [`Carousel::next`].
    pub fn prev<H: Host<Node = N>>(&mut self, host: &mut H) {
        if self.is_disabled() {
            return;
        }
        let index = self.position.index;
        let target = if self.geometry.looping {
            let slots = self.geometry.slots();
            (index + slots - 1) % slots
        } else {
            index.saturating_sub(1)
        };
        self.move_to_index(host, target, Motion::Animated);
    }

    /// Shows a real page, counted from zero.
    pub fn go_to_page<H: Host<Node = N>>(&mut self, host: &mut H, page: usize) {
        if self.is_disabled() {
            return;
        }
        let pages = self.geometry.real_pages();
        if page >= pages {
            warn!(page, pages, "Ignoring request for a page past the end");
            return;
        }
        let index = self.geometry.index_of_page(page);
        self.move_to_index(host, index, Motion::Animated);
    }

    pub(crate) fn pager_click<H: Host<Node = N>>(
        &mut self,
        host: &mut H,
        target: &N,
    ) -> InputOutcome {
        let Some(pager) = self.navigation.pager.clone() else {
            warn!("Ignoring pager click without a pager");
            return InputOutcome::Passthrough;
        };

        // Climb to the entry that is a direct child of the pager.
        let mut node = target.clone();
        let entry = loop {
            match host.parent(&node) {
                Some(parent) if parent == pager => break Some(node),
                Some(parent) => node = parent,
                None => break None,
            }
        };
        let Some(page) = entry.and_then(|entry| {
            host.children(&pager)
                .iter()
                .position(|child| *child == entry)
        }) else {
            warn!(?target, "Ignoring click outside the pager entries");
            return InputOutcome::Passthrough;
        };

        self.go_to_page(host, page);
        InputOutcome::Consumed
    }

    pub(crate) fn wheel<H: Host<Node = N>>(&mut self, host: &mut H, delta_y: f32) -> InputOutcome {
        if self.is_disabled() || delta_y == 0.0 {
            return InputOutcome::Passthrough;
        }
        if self.position.sliding {
            trace!(delta_y, "Ignoring wheel input while sliding");
            return InputOutcome::Passthrough;
        }
        if delta_y > 0.0 {
            self.next(host);
        } else {
            self.prev(host);
        }
        InputOutcome::Consumed
    }

    fn axis(&self, position: PointerPosition) -> f32 {
        if self.config.vertical {
            position.y
        } else {
            position.x
        }
    }

    pub(crate) fn pointer_down<H: Host<Node = N>>(
        &mut self,
        _host: &mut H,
        position: PointerPosition,
    ) -> InputOutcome {
        if !self.config.drag || self.is_disabled() || self.position.sliding {
            return InputOutcome::Passthrough;
        }
        let along = self.axis(position);
        self.drag = DragState {
            active: true,
            origin: position,
            initial: along,
            last: along,
        };
        trace!(?position, "Drag started");
        InputOutcome::Passthrough
    }

    pub(crate) fn pointer_move<H: Host<Node = N>>(
        &mut self,
        host: &mut H,
        position: PointerPosition,
    ) -> InputOutcome {
        if !self.drag.active {
            return InputOutcome::Passthrough;
        }
        let dx = (position.x - self.drag.origin.x).abs();
        let dy = (position.y - self.drag.origin.y).abs();
        let scrolling = if self.config.vertical { dx > dy } else { dx < dy };
        if scrolling {
            return InputOutcome::Passthrough;
        }

        let along = self.axis(position);
        self.disable_transition(host);
        let offset = self.position.offset - self.drag.last + along;
        self.drag.last = along;
        self.set_offset(host, offset, Motion::Immediate);
        self.restart_auto(host);
        InputOutcome::Consumed
    }

    pub(crate) fn pointer_up<H: Host<Node = N>>(
        &mut self,
        host: &mut H,
        position: PointerPosition,
    ) -> InputOutcome {
        if !self.drag.active {
            return InputOutcome::Passthrough;
        }
        self.drag.active = false;
        self.enable_transition(host);

        let travelled = self.drag.initial - self.axis(position);
        let delta = self.config.delta;
        trace!(travelled, delta, "Drag released");
        if travelled > delta {
            self.next(host);
        } else if travelled < -delta {
            self.prev(host);
        } else {
            self.snap_back(host);
        }
        InputOutcome::Passthrough
    }

    pub(crate) fn release_outside<H: Host<Node = N>>(&mut self, host: &mut H) -> InputOutcome {
        if self.drag.active {
            self.drag.active = false;
            self.enable_transition(host);
            self.snap_back(host);
        }
        InputOutcome::Passthrough
    }

    fn snap_back<H: Host<Node = N>>(&mut self, host: &mut H) {
        let index = self.position.index;
        self.move_to_index(host, index, Motion::Animated);
    }
}
