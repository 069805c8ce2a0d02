//! Carousel options and their validated, immutable form.
//!
//! [`CarouselArgs`] carries user overrides with builder-style setters.
//! [`CarouselConfig::new`] merges them into a frozen configuration owned by a
//! single carousel; the defaults themselves are never mutated.

use std::time::Duration;

use derive_setters::Setters;
use smallvec::SmallVec;

use crate::{error::ConfigError, input::InputProfile};

const DEFAULT_TIME: f32 = 0.5;
const DEFAULT_DELTA: f32 = 50.0;
const DEFAULT_DURATION_MS: u64 = 3000;

/// Maps a viewport width threshold to the number of items shown per page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Breakpoint {
    /// Minimum viewport width, in pixels, at which this breakpoint applies.
    pub width: u32,
    /// Items visible on one page.
    pub items: usize,
}

impl Breakpoint {
    /// Creates a breakpoint.
    pub const fn new(width: u32, items: usize) -> Self {
        Self { width, items }
    }
}

/// Breakpoint table used when none is supplied.
pub const DEFAULT_BREAKPOINTS: [Breakpoint; 6] = [
    Breakpoint::new(220, 3),
    Breakpoint::new(460, 4),
    Breakpoint::new(768, 3),
    Breakpoint::new(900, 4),
    Breakpoint::new(1024, 5),
    Breakpoint::new(1200, 12),
];

/// User-facing carousel options.
///
/// Every field has a default; override only what differs.
///
/// ```
/// use tessera_carousel::{Breakpoint, CarouselArgs};
///
/// let args = CarouselArgs::default()
///     .infinite(false)
///     .delta(30.0)
///     .breakpoints(vec![Breakpoint::new(0, 1), Breakpoint::new(768, 3)]);
/// assert!(!args.infinite);
/// ```
#[derive(Clone, Debug, PartialEq, Setters)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct CarouselArgs {
    /// Selector of the item strip inside the container.
    #[setters(into)]
    pub wrapper: String,
    /// Selector of the items inside the strip.
    #[setters(into)]
    pub items: String,
    /// Class marking cloned items.
    #[setters(into)]
    pub clone_class: String,
    /// Transition duration in seconds.
    pub time: f32,
    /// Show exactly one item per page, ignoring breakpoints.
    pub single: bool,
    /// Build the pager.
    pub show_pager: bool,
    /// Build the arrows. `None` builds them unless the input profile is touch.
    #[setters(strip_option)]
    pub arrows: Option<bool>,
    /// Loop endlessly using boundary clones.
    pub infinite: bool,
    /// Drag distance, in pixels, that must be exceeded to change page.
    pub delta: f32,
    /// Handle pointer drags even when the input profile is not touch.
    pub force_touch: bool,
    /// Advance automatically.
    pub auto: bool,
    /// Auto-advance interval in milliseconds.
    pub duration: u64,
    /// Slide along the vertical axis.
    pub vertical: bool,
    /// Breakpoint table, in any order.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for CarouselArgs {
    fn default() -> Self {
        Self {
            wrapper: ".slider-mask".to_string(),
            items: "li".to_string(),
            clone_class: "slider-clone".to_string(),
            time: DEFAULT_TIME,
            single: false,
            show_pager: true,
            arrows: None,
            infinite: true,
            delta: DEFAULT_DELTA,
            force_touch: false,
            auto: false,
            duration: DEFAULT_DURATION_MS,
            vertical: false,
            breakpoints: DEFAULT_BREAKPOINTS.to_vec(),
        }
    }
}

/// Validated configuration of one carousel.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselConfig {
    pub(crate) wrapper: String,
    pub(crate) items: String,
    pub(crate) clone_class: String,
    pub(crate) time: f32,
    pub(crate) settle: Duration,
    pub(crate) single: bool,
    pub(crate) show_pager: bool,
    pub(crate) arrows: bool,
    pub(crate) infinite: bool,
    pub(crate) delta: f32,
    pub(crate) drag: bool,
    pub(crate) force_touch: bool,
    pub(crate) auto: bool,
    pub(crate) duration: Duration,
    pub(crate) vertical: bool,
    pub(crate) breakpoints: SmallVec<[Breakpoint; 8]>,
    pub(crate) profile: InputProfile,
}

impl CarouselConfig {
    /// Validates `args` for a host using `profile`.
    ///
    /// Breakpoints are sorted ascending by width. An empty table is accepted
    /// only in `single` mode.
    pub fn new(args: CarouselArgs, profile: InputProfile) -> Result<Self, ConfigError> {
        let Ok(settle) = Duration::try_from_secs_f32(args.time) else {
            return Err(ConfigError::InvalidTime(args.time));
        };
        if !args.delta.is_finite() || args.delta < 0.0 {
            return Err(ConfigError::InvalidDelta(args.delta));
        }

        let mut breakpoints: SmallVec<[Breakpoint; 8]> = args.breakpoints.into_iter().collect();
        breakpoints.sort_by_key(|breakpoint| breakpoint.width);
        if let Some(zero) = breakpoints.iter().find(|breakpoint| breakpoint.items == 0) {
            return Err(ConfigError::ZeroItemsPerPage { width: zero.width });
        }
        if let Some(pair) = breakpoints.windows(2).find(|pair| pair[0].width == pair[1].width) {
            return Err(ConfigError::DuplicateBreakpoint(pair[0].width));
        }
        if breakpoints.is_empty() && !args.single {
            return Err(ConfigError::EmptyBreakpoints);
        }

        Ok(Self {
            wrapper: args.wrapper,
            items: args.items,
            clone_class: args.clone_class,
            time: args.time,
            settle,
            single: args.single,
            show_pager: args.show_pager,
            arrows: args.arrows.unwrap_or(!profile.is_touch()),
            infinite: args.infinite,
            delta: args.delta,
            drag: profile.is_touch() || args.force_touch,
            force_touch: args.force_touch,
            auto: args.auto,
            duration: Duration::from_millis(args.duration),
            vertical: args.vertical,
            breakpoints,
            profile,
        })
    }

    /// Breakpoints sorted ascending by width.
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Whether looping is requested.
    pub fn infinite(&self) -> bool {
        self.infinite
    }

    /// Whether the carousel slides vertically.
    pub fn vertical(&self) -> bool {
        self.vertical
    }

    /// Whether arrows are built.
    pub fn arrows(&self) -> bool {
        self.arrows
    }

    /// Whether drag handlers are installed.
    pub fn drag(&self) -> bool {
        self.drag
    }

    /// Transition duration in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Input profile the carousel was created for.
    pub fn profile(&self) -> InputProfile {
        self.profile
    }

    /// Transition duration, which is also how long a relayout takes to
    /// settle.
    pub fn settle_delay(&self) -> Duration {
        self.settle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = CarouselConfig::new(CarouselArgs::default(), InputProfile::Pointer)
            .expect("defaults are valid");
        assert!(config.infinite());
        assert!(config.arrows());
        assert!(!config.drag());
        assert_eq!(config.time(), 0.5);
        assert_eq!(config.delta, 50.0);
        assert_eq!(config.duration, Duration::from_millis(3000));
        assert_eq!(config.breakpoints().len(), 6);
    }

    #[test]
    fn touch_profile_hides_arrows_and_enables_drag() {
        let config = CarouselConfig::new(CarouselArgs::default(), InputProfile::Touch)
            .expect("defaults are valid");
        assert!(!config.arrows());
        assert!(config.drag());

        let forced = CarouselConfig::new(
            CarouselArgs::default().arrows(true),
            InputProfile::Touch,
        )
        .expect("valid");
        assert!(forced.arrows());
    }

    #[test]
    fn force_touch_enables_drag_on_pointer_devices() {
        let config = CarouselConfig::new(
            CarouselArgs::default().force_touch(true),
            InputProfile::Pointer,
        )
        .expect("valid");
        assert!(config.drag());
    }

    #[test]
    fn breakpoints_are_sorted() {
        let config = CarouselConfig::new(
            CarouselArgs::default().breakpoints(vec![
                Breakpoint::new(1024, 6),
                Breakpoint::new(320, 1),
                Breakpoint::new(768, 3),
            ]),
            InputProfile::Pointer,
        )
        .expect("valid");
        let widths: Vec<u32> = config.breakpoints().iter().map(|b| b.width).collect();
        assert_eq!(widths, vec![320, 768, 1024]);
    }

    #[test]
    fn rejects_invalid_tables() {
        let empty = CarouselConfig::new(
            CarouselArgs::default().breakpoints(Vec::new()),
            InputProfile::Pointer,
        );
        assert_eq!(empty, Err(ConfigError::EmptyBreakpoints));

        let single = CarouselConfig::new(
            CarouselArgs::default().breakpoints(Vec::new()).single(true),
            InputProfile::Pointer,
        );
        assert!(single.is_ok());

        let zero = CarouselConfig::new(
            CarouselArgs::default().breakpoints(vec![Breakpoint::new(100, 0)]),
            InputProfile::Pointer,
        );
        assert_eq!(zero, Err(ConfigError::ZeroItemsPerPage { width: 100 }));

        let duplicate = CarouselConfig::new(
            CarouselArgs::default()
                .breakpoints(vec![Breakpoint::new(100, 1), Breakpoint::new(100, 2)]),
            InputProfile::Pointer,
        );
        assert_eq!(duplicate, Err(ConfigError::DuplicateBreakpoint(100)));
    }

    #[test]
    fn rejects_invalid_numbers() {
        let time = CarouselConfig::new(CarouselArgs::default().time(-1.0), InputProfile::Pointer);
        assert_eq!(time, Err(ConfigError::InvalidTime(-1.0)));
        let time = CarouselConfig::new(CarouselArgs::default().time(1e30), InputProfile::Pointer);
        assert_eq!(time, Err(ConfigError::InvalidTime(1e30)));
        let time = CarouselConfig::new(
            CarouselArgs::default().time(f32::NAN),
            InputProfile::Pointer,
        );
        assert!(matches!(time, Err(ConfigError::InvalidTime(_))));

        let delta = CarouselConfig::new(
            CarouselArgs::default().delta(f32::NAN),
            InputProfile::Pointer,
        );
        assert!(matches!(delta, Err(ConfigError::InvalidDelta(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_camel_case_options() {
        let args: CarouselArgs = serde_json::from_str(
            r#"{
                "forceTouch": true,
                "showPager": false,
                "duration": 4000,
                "breakpoints": [{ "width": 320, "items": 1 }, { "width": 480, "items": 2 }]
            }"#,
        )
        .expect("valid json");
        assert!(args.force_touch);
        assert!(!args.show_pager);
        assert!(args.infinite);
        assert_eq!(args.duration, 4000);
        assert_eq!(args.breakpoints, vec![Breakpoint::new(320, 1), Breakpoint::new(480, 2)]);
    }
}
