//! Livedash host runner
//!
//! Loads a dashboard configuration, renders it as text, and feeds it from
//! stdin (one message per line) or from a recorded demo log.

mod capture;
mod input;
mod options;
mod renderer;
mod source;

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use livedash_core::{ActionHandler, CapturePoll, Dashboard, FrameCapture};

use crate::capture::CaptureDir;
use crate::input::{spawn_stdin_reader, LineFeed};
use crate::options::{Overrides, RuntimeOptions};
use crate::renderer::TextRenderer;
use crate::source::FileSource;

/// Actions the runner handles itself
const BUILTIN_ACTIONS: [&str; 2] = ["shutdown", "restart"];

#[derive(Debug, Parser)]
#[command(name = "livedash")]
#[command(about = "Config-driven live telemetry dashboard (text mode)")]
#[command(version)]
struct Cli {
    /// Dashboard configuration
    #[arg(default_value = "config.json")]
    config: PathBuf,

    /// Runtime options file (TOML)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Replay the demo recording until the first external input
    #[arg(long)]
    demo: bool,

    /// Demo recording path
    #[arg(long)]
    demo_path: Option<PathBuf>,

    /// Demo period in milliseconds
    #[arg(long)]
    demo_period_ms: Option<u32>,

    /// Main loop interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Capture one text frame per replayed line into <DIR>/run_<N>
    #[arg(long, value_name = "DIR")]
    screenshot_dir: Option<PathBuf>,

    /// Validate the configuration, print the compiled model as JSON, and exit
    #[arg(long)]
    check: bool,

    /// Print each widget change as it happens
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            demo: self.demo,
            demo_path: self.demo_path.clone(),
            demo_period_ms: self.demo_period_ms,
            tick_ms: self.tick_ms,
            screenshot_dir: self.screenshot_dir.clone(),
        }
    }
}

/// Wrapping millisecond clock
struct Clock(Instant);

impl Clock {
    fn now_ms(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

struct Capture {
    frames: FrameCapture,
    dir: CaptureDir,
}

impl Capture {
    fn list(&self) {
        match self.dir.list() {
            Ok(files) => {
                println!("Captured files in {}:", self.dir.path().display());
                for (name, size) in files {
                    println!(" - {name} ({size} bytes)");
                }
            }
            Err(e) => warn!("capture dir not readable: {e:#}"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("livedash error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = RuntimeOptions::load(cli.options.as_deref())?.apply(cli.overrides());
    let text = fs::read_to_string(&cli.config)
        .with_context(|| format!("read {}", cli.config.display()))?;

    let clock = Clock(Instant::now());
    let mut renderer = TextRenderer::new(cli.verbose);
    let Ok(mut dash) = Dashboard::load(&text, &mut renderer) else {
        bail!("invalid configuration {}", cli.config.display());
    };

    if cli.check {
        println!("{}", serde_json::to_string_pretty(dash.model())?);
        return Ok(());
    }

    let handler: Rc<dyn ActionHandler> = Rc::new(|action_id: &str| {
        info!("CMD: action {action_id}");
    });
    for action in BUILTIN_ACTIONS {
        dash.bind_action(action, handler.clone());
    }

    if options.demo {
        let source = FileSource::open(&options.demo_path)?;
        dash.enable_demo(Box::new(source), options.demo_period_ms, clock.now_ms());
    }

    let tick = Duration::from_millis(options.tick_ms.max(1));
    if let Some(mut intro) = dash.intro(&mut renderer, clock.now_ms()) {
        while intro.pump(clock.now_ms()) {
            let left = u64::from(intro.remaining_ms(clock.now_ms()));
            thread::sleep(tick.min(Duration::from_millis(left)));
        }
    }
    dash.present(&mut renderer, clock.now_ms());

    let mut capture = match &options.screenshot_dir {
        Some(root) => match FrameCapture::begin(dash.replay_status()) {
            Some(frames) => {
                let dir = CaptureDir::create_next(root)?;
                info!("Screenshots enabled: {}", dir.path().display());
                Some(Capture { frames, dir })
            }
            None => None,
        },
        None => None,
    };

    let mut feed = LineFeed::new(spawn_stdin_reader());
    loop {
        let now = clock.now_ms();
        dash.tick(now, &mut renderer);

        feed.drain(|line| match line {
            Ok(line) => {
                // Failures are logged by ingestion
                let _ = dash.consume(line, now, &mut renderer);
            }
            Err(e) => warn!("LINE: {e}"),
        });

        if let Some(cap) = capture.as_mut() {
            match cap.frames.poll(dash.replay_status()) {
                CapturePoll::Capture(n) => {
                    if let Err(e) = cap.dir.write(n, &renderer.snapshot()) {
                        warn!("Screenshot failed: {e:#}");
                        cap.frames.fail();
                        cap.list();
                    }
                }
                CapturePoll::Finished => cap.list(),
                CapturePoll::Idle => {}
            }
        }

        if !feed.is_open() && !dash.replay_status().active {
            info!("input closed");
            break;
        }
        thread::sleep(tick);
    }

    Ok(())
}
