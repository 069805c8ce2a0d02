//! Breakpoint resolution and page arithmetic.

use crate::config::Breakpoint;

/// Items per page for a viewport `width`.
///
/// Picks the largest threshold not above `width` from a table sorted
/// ascending, falling back to the smallest entry when `width` is below every
/// threshold. `single` forces one item per page. An empty table resolves to
/// one item.
pub fn resolve_items_per_page(width: u32, breakpoints: &[Breakpoint], single: bool) -> usize {
    if single {
        return 1;
    }
    breakpoints
        .iter()
        .rev()
        .find(|breakpoint| breakpoint.width <= width)
        .or_else(|| breakpoints.first())
        .map(|breakpoint| breakpoint.items)
        .unwrap_or(1)
}

/// Page arithmetic for one breakpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    /// Real items in the collection.
    pub num_items: usize,
    /// Items per page after clamping to the collection size.
    pub items_per_page: usize,
    /// Looping requested and possible.
    pub looping: bool,
}

impl PageGeometry {
    /// Geometry for `num_items` items under a resolved breakpoint.
    ///
    /// When the breakpoint shows the whole collection the geometry is
    /// disabled: one static page sized to the collection, without looping.
    pub fn new(num_items: usize, resolved: usize, infinite: bool) -> Self {
        let disabled = resolved >= num_items;
        let items_per_page = if disabled {
            num_items.max(1)
        } else {
            resolved.max(1)
        };
        Self {
            num_items,
            items_per_page,
            looping: infinite && !disabled,
        }
    }

    /// The whole collection fits on one page; navigation is off.
    pub fn is_disabled(&self) -> bool {
        self.items_per_page >= self.num_items
    }

    /// Pages needed to show every item, possibly fractional.
    pub fn num_steps(&self) -> f32 {
        self.num_items as f32 / self.items_per_page as f32
    }

    /// Real pages, counting a trailing partial page as a full one.
    pub fn real_pages(&self) -> usize {
        self.num_items.div_ceil(self.items_per_page).max(1)
    }

    /// Logical index of the first real page.
    pub fn lead(&self) -> usize {
        usize::from(self.looping)
    }

    /// Slots in the logical sequence, including clone pages when looping.
    pub fn slots(&self) -> usize {
        if self.looping {
            self.real_pages() + 2
        } else {
            self.real_pages()
        }
    }

    /// Strip position, in pages, of a logical index.
    ///
    /// A partial last page is aligned to the end of the strip. When looping,
    /// index `0` is the leading clone page and `real_pages + 1` the trailing
    /// one.
    pub fn position(&self, index: usize) -> f32 {
        let steps = self.num_steps();
        if self.is_disabled() {
            return 0.0;
        }
        if !self.looping {
            return (index as f32).min(steps - 1.0);
        }
        if index == 0 {
            0.0
        } else if index > self.real_pages() {
            steps + 1.0
        } else {
            (index as f32).min(steps)
        }
    }

    /// Real page shown at a logical index.
    pub fn page(&self, index: usize) -> usize {
        if !self.looping {
            return index.min(self.real_pages() - 1);
        }
        let pages = self.real_pages();
        match index {
            0 => pages - 1,
            i if i > pages => 0,
            i => i - 1,
        }
    }

    /// Logical index of a real page.
    pub fn index_of_page(&self, page: usize) -> usize {
        page.min(self.real_pages() - 1) + self.lead()
    }

    /// Logical index showing the real item at `item` first, or the page that
    /// contains it.
    pub fn index_of_item(&self, item: usize) -> usize {
        self.index_of_page(item / self.items_per_page)
    }

    /// First real item visible at a logical index.
    pub fn first_item(&self, index: usize) -> usize {
        self.page(index) * self.items_per_page
    }
}
