//! Style property resolution and value formatting.
//!
//! Prefixed transform and transition properties are probed once per process
//! and shared by every carousel afterwards.

use std::sync::OnceLock;

use crate::host::Dom;

const VENDORS: [&str; 8] = ["", "webkit", "Webkit", "moz", "Moz", "o", "ms", "Ms"];

static STYLE_PROPERTIES: OnceLock<StyleProperties> = OnceLock::new();

/// Platform names of the style properties a carousel writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleProperties {
    /// Name of the transform property.
    pub transform: String,
    /// Name of the transition property.
    pub transition: String,
    /// Name of the event fired when a transition completes.
    pub transition_end: &'static str,
}

impl StyleProperties {
    /// Resolves property names with `supported`, trying every vendor prefix in
    /// turn. Falls back to the unprefixed name when nothing matches.
    pub fn probe(supported: impl Fn(&str) -> bool) -> Self {
        let transform = resolve_property("transform", &supported);
        let transition = resolve_property("transition", &supported);
        let transition_end = transition_end_event(&transition);
        Self {
            transform,
            transition,
            transition_end,
        }
    }

    /// Unprefixed names.
    pub fn standard() -> Self {
        Self::probe(|_| true)
    }
}

/// Returns the process-wide property names, probing `dom` on first use.
pub fn style_properties<D: Dom + ?Sized>(dom: &D) -> &'static StyleProperties {
    STYLE_PROPERTIES.get_or_init(|| {
        let properties = StyleProperties::probe(|name| dom.supports_style_property(name));
        tracing::debug!(?properties, "Resolved carousel style properties");
        properties
    })
}

fn resolve_property(property: &str, supported: &impl Fn(&str) -> bool) -> String {
    VENDORS
        .iter()
        .map(|vendor| prefixed(vendor, property))
        .find(|candidate| supported(candidate))
        .unwrap_or_else(|| property.to_string())
}

fn prefixed(vendor: &str, property: &str) -> String {
    if vendor.is_empty() {
        return property.to_string();
    }
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("{vendor}{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => vendor.to_string(),
    }
}

fn transition_end_event(transition: &str) -> &'static str {
    match transition {
        "WebkitTransition" | "webkitTransition" => "webkitTransitionEnd",
        _ => "transitionend",
    }
}

/// `translate3d` value moving the strip by `offset` pixels along one axis.
pub fn translate(offset: f32, vertical: bool) -> String {
    // Normalises -0 so the strip at rest reads `0px`.
    let offset = offset + 0.0;
    if vertical {
        format!("translate3d(0, {offset}px, 0)")
    } else {
        format!("translate3d({offset}px, 0, 0)")
    }
}

/// Transition value animating every property for `seconds`.
pub fn transition(seconds: f32) -> String {
    format!("all {seconds}s")
}

/// Pixel length value.
pub fn px(value: f32) -> String {
    format!("{value}px")
}
