//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! The validation timer fires on a tokio worker. Its callback only sends a
//! `UiEvent::ValidationElapsed` into `inbox_tx`; the runtime drains
//! `inbox_rx` each loop iteration and feeds the event to the reducer, so
//! form state is only ever touched from the event-loop thread.

mod inbox;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use gatehouse_core::debounce::Debouncer;
use gatehouse_core::form::Credentials;
use gatehouse_core::session::{KeyValueStore, ViewController};
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll duration while typing or while a validation is pending.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, the app state and the view controller. When built with
/// [`TuiRuntime::new`] the terminal is restored on drop.
pub struct TuiRuntime<B: Backend, S: KeyValueStore> {
    /// Terminal instance.
    terminal: Terminal<B>,
    /// Application state.
    pub state: AppState,
    /// Source of truth for the authenticated flag and its persistence.
    controller: ViewController<S>,
    /// Debounce timer for form validation.
    validation_timer: Debouncer,
    /// Inbox sender - timer callbacks send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each iteration.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
    /// Last time a terminal event was received.
    last_terminal_event: Instant,
    /// Whether Drop must restore raw mode and the alternate screen.
    owns_terminal: bool,
}

impl<S: KeyValueStore> TuiRuntime<CrosstermBackend<Stdout>, S> {
    /// Creates a runtime drawing to the real terminal.
    ///
    /// # Errors
    /// Returns an error if there is no tokio runtime or terminal setup fails.
    pub fn new(controller: ViewController<S>, debounce: Duration) -> Result<Self> {
        // The validation timer spawns onto the ambient tokio runtime.
        tokio::runtime::Handle::try_current()
            .context("The TUI must run inside a tokio runtime")?;

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let mut runtime = Self::with_terminal(terminal, controller, debounce);
        runtime.owns_terminal = true;
        Ok(runtime)
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                self.dispatch_event(event);
                if self.state.should_quit {
                    break;
                }
            }

            if dirty && !self.state.should_quit {
                self.draw()?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.validation_timer.is_armed() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        self.collect_inbox_events(&mut events);

        // Block until the next tick is due unless there is already work.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }
}

impl<B: Backend, S: KeyValueStore> TuiRuntime<B, S> {
    /// Creates a runtime around an existing terminal.
    ///
    /// The terminal is left as-is on drop.
    pub fn with_terminal(
        terminal: Terminal<B>,
        controller: ViewController<S>,
        debounce: Duration,
    ) -> Self {
        let state = AppState::new(controller.is_authenticated());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        Self {
            terminal,
            state,
            controller,
            validation_timer: Debouncer::new(debounce),
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
            owns_terminal: false,
        }
    }

    pub fn controller(&self) -> &ViewController<S> {
        &self.controller
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Returns true while a validation countdown is pending.
    pub fn validation_pending(&self) -> bool {
        self.validation_timer.is_armed()
    }

    /// Renders the current state.
    ///
    /// # Errors
    /// Returns an error if the backend fails to draw.
    pub fn draw(&mut self) -> Result<()> {
        self.terminal
            .draw(|frame| render::render(&self.state, frame))
            .map_err(|e| anyhow::anyhow!("Failed to draw: {e}"))?;
        Ok(())
    }

    /// Feeds every event waiting in the inbox to the reducer.
    ///
    /// Returns the number of events processed.
    pub fn drain_inbox(&mut self) -> usize {
        let mut events = Vec::new();
        self.collect_inbox_events(&mut events);
        let count = events.len();
        for event in events {
            self.dispatch_event(event);
        }
        count
    }

    fn collect_inbox_events(&mut self, events: &mut Vec<UiEvent>) {
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    /// Runs `event` through the reducer and executes the resulting effects.
    pub fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        self.execute_effects(effects);
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.validation_timer.cancel();
                self.state.should_quit = true;
            }
            UiEffect::ScheduleValidation { ticket } => {
                let tx = self.inbox_tx.clone();
                self.validation_timer.arm(move || {
                    let _ = tx.send(UiEvent::ValidationElapsed { ticket });
                });
            }
            UiEffect::CancelValidation => {
                self.validation_timer.cancel();
            }
            UiEffect::Login { credentials } => self.login(&credentials),
            UiEffect::Logout => {
                self.controller.logout();
                self.dispatch_event(UiEvent::SessionChanged {
                    authenticated: false,
                    error: None,
                });
            }
        }
    }

    fn login(&mut self, credentials: &Credentials) {
        let error = match self.controller.login(credentials) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "session flag not saved");
                Some(format!("Logged in, but the session was not saved: {err:#}"))
            }
        };
        self.dispatch_event(UiEvent::SessionChanged {
            authenticated: self.controller.is_authenticated(),
            error,
        });
    }
}

impl<B: Backend, S: KeyValueStore> Drop for TuiRuntime<B, S> {
    fn drop(&mut self) {
        self.validation_timer.cancel();
        if self.owns_terminal {
            let _ = terminal::restore_terminal();
        }
    }
}
