//! A looping carousel for document-style hosts.
//!
//! tessera-carousel arranges a strip of items in pages, moves between pages
//! with arrows, a pager, drag gestures, the wheel or an auto-advance timer,
//! and fakes an endless strip by cloning the boundary pages.
//!
//! The crate does not own a document. Everything it touches goes through the
//! [`Host`] trait: element queries and mutation, style writes, listener
//! registration and timeouts. A host routes native events back with
//! [`Carousel::dispatch`] and fired timeouts with [`Carousel::timer_fired`].
//!
//! # Example
//!
//! ```
//! use tessera_carousel::{
//!     Breakpoint, Carousel, CarouselArgs, InputEvent, InputProfile, ListenerKind, Target,
//!     headless::HeadlessHost,
//! };
//!
//! let mut host = HeadlessHost::new();
//! host.set_viewport_width(600);
//! host.carousel_fixture("gallery", 6, 600.0, 100.0);
//!
//! let args = CarouselArgs::default().breakpoints(vec![Breakpoint::new(0, 3)]);
//! let mut carousel = Carousel::create(
//!     &mut host,
//!     Target::Selector(".gallery"),
//!     args,
//!     InputProfile::Pointer,
//! )
//! .expect("valid markup")
//! .expect("not yet initialised");
//!
//! // Step back onto the leading clone page, then let the transition finish.
//! carousel.prev(&mut host);
//! assert_eq!(carousel.offset(), 0.0);
//! carousel.dispatch(&mut host, ListenerKind::TransitionEnd, InputEvent::TransitionEnd);
//! assert_eq!(carousel.current_page(), 1);
//! assert_eq!(carousel.offset(), -1200.0);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod carousel;
pub mod config;
pub mod error;
pub mod headless;
pub mod host;
pub mod input;
pub mod style;


pub use carousel::{Carousel, CloneSet, LayoutPhase, PageGeometry, Target, resolve_items_per_page};
pub use config::{Breakpoint, CarouselArgs, CarouselConfig, DEFAULT_BREAKPOINTS};
pub use error::{CarouselError, ConfigError};
pub use host::{Dom, Host, ListenerId, ListenerKind, TimerId, TimerTask, Timers};
pub use input::{InputEvent, InputOutcome, InputProfile, PointerPosition};
