//! Runs the demo carousels through a scripted session on the in-memory host.
//!
//! Every step is logged with the resulting index, offset and strip contents.
//! Set `RUST_LOG=tessera_carousel=trace` to see each applied offset.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tessera_carousel::{
    Carousel, CarouselArgs, InputProfile, PointerPosition, Target, headless::HeadlessHost,
};
use tracing::info;

mod session;

use session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Demo {
    Default,
    Single,
    Auto,
    NoInf,
    Vertical,
}

impl Demo {
    const ALL: [Demo; 5] = [
        Demo::Default,
        Demo::Single,
        Demo::Auto,
        Demo::NoInf,
        Demo::Vertical,
    ];

    fn class(self) -> &'static str {
        match self {
            Demo::Default => "slider-default",
            Demo::Single => "slider-single",
            Demo::Auto => "slider-auto",
            Demo::NoInf => "slider-no-inf",
            Demo::Vertical => "slider-vertical",
        }
    }

    fn args(self) -> CarouselArgs {
        let args = CarouselArgs::default();
        match self {
            Demo::Default => args,
            Demo::Single => args.force_touch(true).duration(1000).single(true),
            Demo::Auto => args
                .auto(true)
                .force_touch(true)
                .duration(2000)
                .single(true),
            Demo::NoInf => args.infinite(false),
            Demo::Vertical => args.force_touch(true).infinite(false).vertical(true),
        }
    }
}

#[derive(Parser)]
#[command(name = "example")]
#[command(version, about = "Drives the demo carousels against an in-memory document")]
#[command(long_about = None)]
struct Cli {
    /// Demos to run; every demo when omitted
    #[arg(short, long, value_enum)]
    demo: Vec<Demo>,
    /// Window width in pixels
    #[arg(short, long, default_value_t = 1024)]
    width: u32,
    /// Window width to switch to after navigating
    #[arg(long)]
    resize_to: Option<u32>,
    /// Items in each strip
    #[arg(short, long, default_value_t = 12)]
    items: usize,
    /// Pages to turn forward
    #[arg(short = 'n', long, default_value_t = 5)]
    steps: usize,
    /// JSON file of options replacing the demo presets (camelCase names)
    #[arg(long)]
    options: Option<PathBuf>,
    /// Use touch event names instead of mouse ones
    #[arg(long)]
    touch: bool,
}

const DEFAULT_FILTER: &str = "error,tessera_carousel=info,example=info";

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn load_options(path: &Path) -> Result<CarouselArgs> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read options from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid options in {}", path.display()))
}

fn run(demo: Demo, cli: &Cli, overrides: Option<&CarouselArgs>) -> Result<()> {
    let profile = InputProfile::detect(cli.touch);
    let mut host = HeadlessHost::new();
    host.set_viewport_width(cli.width);
    host.carousel_fixture(demo.class(), cli.items, cli.width as f32, 120.0);

    let args = overrides.cloned().unwrap_or_else(|| demo.args());
    let selector = format!(".{}", demo.class());
    let Some(carousel) = Carousel::create(&mut host, Target::Selector(&selector), args, profile)
        .with_context(|| format!("failed to create the {demo:?} carousel"))?
    else {
        bail!("{selector} was already initialised");
    };

    let time = carousel.config().settle_delay();
    let vertical = carousel.config().vertical();
    let mut session = Session::new(demo.class(), host, carousel, profile);
    session.report("created");

    for _ in 0..cli.steps {
        let next = session.carousel().arrows().map(|(_, next)| *next);
        match next {
            Some(next) => session.click(next),
            None => session.wheel(120.0),
        };
        session.finish_transition();
        session.report("next");
    }

    if let Some(&last) = session.carousel().pager_entries().last() {
        session.click(last);
        session.finish_transition();
        session.report("pager");
    }

    let (from, to) = if vertical {
        (PointerPosition::new(50.0, 200.0), PointerPosition::new(50.0, 60.0))
    } else {
        (PointerPosition::new(300.0, 50.0), PointerPosition::new(160.0, 50.0))
    };
    session.drag(from, to);
    session.finish_transition();
    session.report("drag");

    if let Some(width) = cli.resize_to {
        session.resize(width);
        session.report("resized");
        session.wait(time);
        session.report("settled");
    }

    session.wait(Duration::from_secs(5));
    session.report("idle");

    let (listeners, timers) = session.finish();
    info!(demo = demo.class(), listeners, timers, "destroyed");
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let overrides = cli.options.as_deref().map(load_options).transpose()?;

    let demos = if cli.demo.is_empty() {
        Demo::ALL.to_vec()
    } else {
        cli.demo.clone()
    };
    for demo in demos {
        run(demo, &cli, overrides.as_ref())?;
    }
    Ok(())
}
