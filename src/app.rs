//! Application wiring and the UI loop.
//!
//! The UI loop (main thread) exclusively owns the surface, the activity
//! machine, and the timer queue. Two background threads feed it over a
//! channel: the behavior engine tick and the quote picker. Background
//! threads never touch the window; they read a published environment
//! snapshot and send [`Command`]s.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, info};

use crate::behavior::{ActivityMachine, BehaviorEngine, Command, EnvSnapshot};
use crate::config::Tuning;
use crate::quotes::{QuoteSession, QuoteSet};
use crate::timers::{TimerAction, TimerQueue};
use crate::window::{PetSurface, SurfaceEvent};

/// Cancellation poll granularity for the quote thread's long sleeps.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// State shared between the UI loop and the background threads.
#[derive(Debug)]
pub struct Shared {
    env: Mutex<EnvSnapshot>,
    running: AtomicBool,
}

impl Shared {
    pub fn new() -> Self {
        Self {
            env: Mutex::new(EnvSnapshot::default()),
            running: AtomicBool::new(true),
        }
    }

    pub fn publish(&self, env: EnvSnapshot) {
        *self.env.lock() = env;
    }

    pub fn snapshot(&self) -> EnvSnapshot {
        *self.env.lock()
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

/// The assembled application.
pub struct App<S: PetSurface> {
    surface: S,
    tuning: Tuning,
    quotes: QuoteSet,
    machine: ActivityMachine,
    timers: TimerQueue,
    session: Option<QuoteSession>,
    shared: Arc<Shared>,
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl<S: PetSurface> App<S> {
    pub fn new(surface: S, tuning: Tuning, quotes: QuoteSet) -> Self {
        let (tx, rx) = channel::unbounded();
        Self {
            surface,
            tuning,
            quotes,
            machine: ActivityMachine::new(),
            timers: TimerQueue::new(),
            session: None,
            shared: Arc::new(Shared::new()),
            tx,
            rx,
        }
    }

    /// Run until the window is closed.
    ///
    /// Must be called from the thread that created the surface.
    pub fn run(mut self) -> anyhow::Result<()> {
        self.publish_env_or_fail()
            .context("initial environment query failed")?;

        let behavior = spawn_behavior_thread(
            self.tuning.clone(),
            Arc::clone(&self.shared),
            self.tx.clone(),
        )
        .context("failed to spawn behavior thread")?;
        let quote_loop = spawn_quote_thread(
            self.tuning.clone(),
            self.quotes.clone(),
            Arc::clone(&self.shared),
            self.tx.clone(),
        )
        .context("failed to spawn quote thread")?;
        info!("companion running");

        'ui: while self.shared.is_running() {
            let now = Instant::now();

            let events = self.surface.poll_events().unwrap_or_else(|e| {
                debug!("event poll failed: {}", e);
                Vec::new()
            });
            for event in events {
                match event {
                    SurfaceEvent::Quit => {
                        info!("quit requested");
                        self.shared.stop();
                        break 'ui;
                    }
                    SurfaceEvent::Clicked => self.on_click(now),
                    SurfaceEvent::Other => {}
                }
            }

            self.publish_env();
            self.drain_commands(now);

            while let Some(action) = self.timers.pop_due(now) {
                self.fire(action, now);
            }

            self.surface.set_sprite(self.machine.sprite());
            if let Err(e) = self.surface.present() {
                debug!("present failed, skipping frame: {}", e);
            }

            thread::sleep(self.tuning.tick);
        }

        self.shared.stop();
        let _ = behavior.join();
        let _ = quote_loop.join();
        Ok(())
    }

    /// A click landed on the companion.
    fn on_click(&mut self, now: Instant) {
        if self.machine.begin_gesture() {
            debug!("gesture started");
            self.timers
                .schedule(now + self.tuning.gesture_hold, TimerAction::EndGesture);
        }
    }

    fn drain_commands(&mut self, now: Instant) {
        loop {
            match self.rx.try_recv() {
                Ok(command) => self.apply(command, now),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Move(pos) => {
                if let Err(e) = self.surface.set_position(pos) {
                    debug!("move skipped: {}", e);
                }
            }
            Command::RequestPose(motion) => {
                self.machine.request_motion(motion);
            }
            Command::StartQuote(text) => self.start_quote(&text, now),
        }
    }

    fn start_quote(&mut self, text: &str, now: Instant) {
        if self.machine.is_suppressed() {
            debug!("quote skipped, gesture or session active");
            return;
        }
        let Some(session) = QuoteSession::new(text, self.tuning.quote_delimiter) else {
            debug!("quote skipped, no displayable segments: {:?}", text);
            return;
        };

        self.machine.begin_presenting();
        self.surface.show_overlay(session.current());
        self.schedule_next_segment(&session, now);
        self.session = Some(session);
    }

    fn schedule_next_segment(&mut self, session: &QuoteSession, now: Instant) {
        if session.on_last_part() {
            self.timers
                .schedule(now + self.tuning.quote_final_hold, TimerAction::HideQuote);
        } else {
            self.timers
                .schedule(now + self.tuning.quote_part_hold, TimerAction::AdvanceQuote);
        }
    }

    fn fire(&mut self, action: TimerAction, now: Instant) {
        match action {
            TimerAction::EndGesture => self.machine.end_gesture(),
            TimerAction::AdvanceQuote => {
                let Some(mut session) = self.session.take() else {
                    return;
                };
                if let Some(part) = session.advance() {
                    self.surface.show_overlay(part);
                }
                self.schedule_next_segment(&session, now);
                self.session = Some(session);
            }
            TimerAction::HideQuote => {
                self.surface.clear_overlay();
                self.machine.end_presenting();
                self.session = None;
            }
        }
    }

    /// Refresh the shared environment snapshot from the surface.
    ///
    /// Transient query failures leave the previous snapshot in place; the
    /// engine effectively skips those ticks.
    fn publish_env(&mut self) {
        match self.read_env() {
            Ok(env) => self.shared.publish(env),
            Err(e) => debug!("environment query failed, tick skipped: {}", e),
        }
    }

    fn publish_env_or_fail(&mut self) -> anyhow::Result<()> {
        let env = self.read_env()?;
        self.shared.publish(env);
        Ok(())
    }

    fn read_env(&mut self) -> Result<EnvSnapshot, crate::window::SurfaceError> {
        Ok(EnvSnapshot {
            pointer: self.surface.pointer()?,
            window: self.surface.position()?,
            desktop: self.surface.desktop_bounds()?,
        })
    }

}

fn spawn_behavior_thread(
    tuning: Tuning,
    shared: Arc<Shared>,
    tx: Sender<Command>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("behavior".to_string())
        .spawn(move || {
            let tick = tuning.tick;
            let mut engine = BehaviorEngine::new(tuning, Instant::now());
            let mut rng = rand::thread_rng();
            while shared.is_running() {
                let env = shared.snapshot();
                for command in engine.tick(&env, Instant::now(), &mut rng) {
                    if tx.send(command).is_err() {
                        return;
                    }
                }
                thread::sleep(tick);
            }
            debug!("behavior thread stopped");
        })
}

fn spawn_quote_thread(
    tuning: Tuning,
    quotes: QuoteSet,
    shared: Arc<Shared>,
    tx: Sender<Command>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("quotes".to_string())
        .spawn(move || {
            let mut rng = rand::thread_rng();
            let min_ms = tuning.quote_delay_min.as_millis() as u64;
            let max_ms = tuning.quote_delay_max.as_millis() as u64;
            while shared.is_running() {
                let delay = Duration::from_millis(rng.gen_range(min_ms..=max_ms));
                if !sleep_cancellable(delay, &shared) {
                    break;
                }
                // An empty quote set just re-arms the delay.
                let Some(quote) = quotes.pick(&mut rng) else {
                    continue;
                };
                if tx.send(Command::StartQuote(quote.to_string())).is_err() {
                    return;
                }
            }
            debug!("quote thread stopped");
        })
}

/// Sleep in slices, bailing out early on shutdown. Returns false when the
/// shutdown flag was observed.
fn sleep_cancellable(total: Duration, shared: &Shared) -> bool {
    let deadline = Instant::now() + total;
    while Instant::now() < deadline {
        if !shared.is_running() {
            return false;
        }
        let left = deadline.saturating_duration_since(Instant::now());
        thread::sleep(left.min(SLEEP_SLICE));
    }
    shared.is_running()
}
