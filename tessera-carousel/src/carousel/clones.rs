//! Boundary clones that make a looping strip appear endless.

use crate::host::Dom;

/// Clones currently attached to the strip.
#[derive(Clone, Debug)]
pub struct CloneSet<N> {
    /// Copies of the last page, placed before the first real item.
    pub prepended: Vec<N>,
    /// Copies of the first page, placed after the last real item.
    pub appended: Vec<N>,
}

impl<N> Default for CloneSet<N> {
    fn default() -> Self {
        Self {
            prepended: Vec::new(),
            appended: Vec::new(),
        }
    }
}

impl<N: Clone> CloneSet<N> {
    /// Whether no clone is attached.
    pub fn is_empty(&self) -> bool {
        self.prepended.is_empty() && self.appended.is_empty()
    }

    /// Number of attached clones.
    pub fn len(&self) -> usize {
        self.prepended.len() + self.appended.len()
    }

    /// Every clone, leading ones first.
    pub fn iter(&self) -> impl Iterator<Item = &N> {
        self.prepended.iter().chain(self.appended.iter())
    }

    /// Detaches every clone, including strays carrying `class` that were not
    /// created by this set.
    pub fn clear<D: Dom<Node = N> + ?Sized>(&mut self, dom: &mut D, strip: &N, class: &str) {
        for node in self.prepended.drain(..).chain(self.appended.drain(..)) {
            dom.remove(&node);
        }
        for stray in dom.query_all(strip, &format!(".{class}")) {
            dom.remove(&stray);
        }
    }

    /// Replaces the clones with fresh copies for `items_per_page`.
    ///
    /// Existing clones are always destroyed first. Nothing is created when
    /// `looping` is false.
    pub fn rebuild<D: Dom<Node = N> + ?Sized>(
        &mut self,
        dom: &mut D,
        strip: &N,
        items: &[N],
        items_per_page: usize,
        looping: bool,
        class: &str,
    ) {
        self.clear(dom, strip, class);
        if !looping || items_per_page == 0 || items_per_page >= items.len() {
            return;
        }

        for item in &items[..items_per_page] {
            let copy = dom.clone_node(item);
            dom.add_class(&copy, class);
            dom.append_child(strip, &copy);
            self.appended.push(copy);
        }

        // Prepend in reverse so the copies keep the originals' order.
        for item in items[items.len() - items_per_page..].iter().rev() {
            let copy = dom.clone_node(item);
            dom.add_class(&copy, class);
            dom.prepend_child(strip, &copy);
            self.prepended.push(copy);
        }
        self.prepended.reverse();
    }
}
