//! Dashboard context
//!
//! Owns everything built from one configuration load: the compiled model,
//! the widget registry, the action table, and the demo replay session. The
//! caller owns the dashboard and the renderer and passes both into every
//! operation; there is no global state.
//!
//! Typical loop:
//!
//! ```text
//! let mut dash = Dashboard::load(text, &mut renderer)?;
//! if let Some(mut intro) = dash.intro(&mut renderer, now()) {
//!     while intro.pump(now()) { /* keep the display alive */ }
//! }
//! dash.present(&mut renderer, now());
//! loop {
//!     dash.tick(now(), &mut renderer);
//!     for line in input { dash.consume(line, now(), &mut renderer); }
//! }
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;

use crate::action::{ActionDispatcher, ActionHandler};
use crate::config::{self, ConfigError, DashboardModel};
use crate::ingest::{self, IngestError, Outcome};
use crate::intro::IntroPhase;
use crate::registry::WidgetRegistry;
use crate::replay::{DemoReplayEngine, ReplayStatus};
use crate::traits::{Renderer, ReplaySource};

/// A loaded dashboard
#[derive(Debug)]
pub struct Dashboard {
    model: DashboardModel,
    registry: WidgetRegistry,
    actions: ActionDispatcher,
    replay: DemoReplayEngine,
}

impl Dashboard {
    /// Compile a configuration document
    ///
    /// On failure the error is shown on the renderer before it is returned,
    /// and nothing else is built.
    pub fn load<R: Renderer + ?Sized>(text: &str, renderer: &mut R) -> Result<Self, ConfigError> {
        match config::load(text) {
            Ok(model) => Ok(Self::from_model(model)),
            Err(e) => {
                error!("CONFIG: {}", e);
                renderer.show_config_error(&e);
                Err(e)
            }
        }
    }

    /// Build from an already compiled model
    pub fn from_model(model: DashboardModel) -> Self {
        let registry = WidgetRegistry::build(&model);
        let actions = ActionDispatcher::new(&model.config.buttons);
        info!(
            "CONFIG: {} tiles, {} gauges, {} rate rows, {} buttons",
            model.tiles.len(),
            model.config.gauges.len(),
            model.config.rate_row_count(),
            model.config.buttons.len()
        );
        Self {
            model,
            registry,
            actions,
            replay: DemoReplayEngine::disabled(),
        }
    }

    pub fn model(&self) -> &DashboardModel {
        &self.model
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Show the configured splash
    ///
    /// Returns the phase to pump when a splash with a non-zero duration was
    /// shown.
    pub fn intro<R: Renderer + ?Sized>(&self, renderer: &mut R, now_ms: u32) -> Option<IntroPhase> {
        let ui = &self.model.config.ui;
        let splash = ui.splash.as_ref().filter(|s| s.duration_ms > 0)?;
        if !renderer.show_splash(splash, ui.background) {
            info!("Splash skipped (not found/decodable): {}", splash.path);
            return None;
        }
        Some(IntroPhase::new(now_ms, splash.duration_ms))
    }

    /// Build the screen and publish initial gauge values
    pub fn present<R: Renderer + ?Sized>(&mut self, renderer: &mut R, now_ms: u32) {
        renderer.build(&self.model);
        self.registry
            .publish_initial(now_ms, |change| renderer.update(&change));
    }

    /// Bind a handler to every button with this action identifier
    pub fn bind_action(&mut self, action_id: &str, handler: Rc<dyn ActionHandler>) -> bool {
        let bound = self.actions.bind(action_id, handler);
        if !bound {
            warn!("CMD: no button for action '{}'", action_id);
        }
        bound
    }

    /// Start replaying a recording
    pub fn enable_demo(&mut self, source: Box<dyn ReplaySource>, period_ms: u32, now_ms: u32) {
        self.replay = DemoReplayEngine::start(source, period_ms, now_ms);
    }

    /// Stop demo replay for good
    pub fn stop_demo(&mut self, reason: &str) {
        self.replay.stop(reason);
    }

    pub fn replay_status(&self) -> ReplayStatus {
        self.replay.status()
    }

    /// One cooperative step: staleness first, then demo replay
    pub fn tick<R: Renderer + ?Sized>(&mut self, now_ms: u32, renderer: &mut R) {
        self.registry.tick(now_ms, |change| renderer.update(&change));

        let Self {
            registry, replay, ..
        } = self;
        replay.tick(now_ms, |line| {
            // Failures are already logged by ingestion
            let _ = ingest::consume_event(registry, line, now_ms, |change| renderer.update(&change));
        });
    }

    /// Ingest one line from an external feed
    ///
    /// A line that applies stops demo replay permanently.
    pub fn consume<R: Renderer + ?Sized>(
        &mut self,
        line: &str,
        now_ms: u32,
        renderer: &mut R,
    ) -> Result<Outcome, IngestError> {
        let result = ingest::consume_line(&mut self.registry, &self.actions, line, now_ms, |change| {
            renderer.update(&change)
        });
        // A matched command is operator input even without a handler
        let external = match &result {
            Ok(outcome) => outcome.is_applied(),
            Err(err) => matches!(err, IngestError::UnboundAction),
        };
        if external {
            self.replay.stop("external input");
        }
        result
    }

    /// Ingest a line known to be a telemetry event
    pub fn consume_event<R: Renderer + ?Sized>(
        &mut self,
        line: &str,
        now_ms: u32,
        renderer: &mut R,
    ) -> Result<Outcome, IngestError> {
        let outcome = ingest::consume_event(&mut self.registry, line, now_ms, |change| {
            renderer.update(&change)
        })?;
        if outcome.is_applied() {
            self.replay.stop("external input");
        }
        Ok(outcome)
    }
}
