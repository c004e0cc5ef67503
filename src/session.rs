//! Timer-driven flashcard session.
//!
//! A single task owns the cycler. Ticks from a repeating interval and
//! navigation commands from the host are applied on that task only; the
//! resulting pair is published on a `watch` channel for the host to render.

use rand::{
    rngs::StdRng,
    SeedableRng,
};
use tokio::{
    sync::{
        mpsc,
        watch,
    },
    task::JoinHandle,
    time::{
        interval_at,
        Instant,
        MissedTickBehavior,
    },
};

use crate::{
    core::{
        DisplayPair,
        LanguageSaverError,
        Level,
    },
    cycler::{
        Cycler,
        Direction,
    },
    dictionary::{
        load_entries_or_empty,
        ResourceProvider,
    },
    settings::SaverSettings,
};

const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Navigate(Direction),
    Reconfigure(Level),
    Shutdown,
}

pub struct SessionHandle {
    commands: mpsc::Sender<SessionCommand>,
    display: watch::Receiver<DisplayPair>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub async fn forward(&self) -> Result<(), LanguageSaverError> {
        self.send(SessionCommand::Navigate(Direction::Forward)).await
    }

    pub async fn backward(&self) -> Result<(), LanguageSaverError> {
        self.send(SessionCommand::Navigate(Direction::Backward)).await
    }

    /// Reloads entries for `level` and restarts the cycle.
    pub async fn reconfigure(&self, level: Level) -> Result<(), LanguageSaverError> {
        self.send(SessionCommand::Reconfigure(level)).await
    }

    pub async fn send(&self, command: SessionCommand) -> Result<(), LanguageSaverError> {
        self.commands.send(command).await?;
        Ok(())
    }

    /// A receiver that sees every pair published from now on.
    pub fn subscribe(&self) -> watch::Receiver<DisplayPair> {
        self.display.clone()
    }

    pub fn current(&self) -> DisplayPair {
        self.display.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the session and waits for its task to end.
    pub async fn shutdown(self) {
        let _ = self.commands.send(SessionCommand::Shutdown).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Session task ended abnormally");
        }
    }
}

/// Starts a session on the current tokio runtime.
pub fn spawn<P>(settings: SaverSettings, provider: P) -> SessionHandle
where
    P: ResourceProvider + 'static,
{
    spawn_with_rng(settings, provider, StdRng::from_os_rng())
}

pub fn spawn_with_rng<P>(settings: SaverSettings, provider: P, rng: StdRng) -> SessionHandle
where
    P: ResourceProvider + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (display_tx, display_rx) = watch::channel(DisplayPair::blank());

    let session = Session::new(settings, provider, rng, display_tx);
    let task = tokio::spawn(session.run(command_rx));

    SessionHandle { commands: command_tx, display: display_rx, task }
}

struct Session<P> {
    settings: SaverSettings,
    provider: P,
    rng: StdRng,
    cycler: Cycler,
    display: watch::Sender<DisplayPair>,
}

impl<P: ResourceProvider> Session<P> {
    fn new(
        settings: SaverSettings,
        provider: P,
        mut rng: StdRng,
        display: watch::Sender<DisplayPair>,
    ) -> Self {
        let entries = load_entries_or_empty(&provider, &settings.resource_name());
        let cycler = Cycler::build(settings.policy, &entries, &mut rng);
        Session { settings, provider, rng, cycler, display }
    }

    async fn run(mut self, mut commands: mpsc::Receiver<SessionCommand>) {
        let period = self.settings.interval();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            level = %self.settings.level,
            policy = %self.settings.policy,
            entries = self.cycler.entries().len(),
            "Session started"
        );

        // Show something right away instead of the blank pair
        self.advance(Direction::Forward);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.advance(Direction::Forward);
                }
                command = commands.recv() => match command {
                    Some(SessionCommand::Navigate(direction)) => {
                        self.advance(direction);
                        // Manual navigation restarts the auto-advance period
                        ticker.reset();
                    }
                    Some(SessionCommand::Reconfigure(level)) => {
                        self.reload(level);
                        ticker.reset();
                    }
                    Some(SessionCommand::Shutdown) | None => break,
                },
            }
        }

        tracing::info!("Session stopped");
    }

    fn advance(&mut self, direction: Direction) {
        if let Some(entry) = self.cycler.navigate(direction) {
            let pair = DisplayPair::from(entry);
            self.display.send_replace(pair);
        }
    }

    fn reload(&mut self, level: Level) {
        self.settings.level = level;
        let entries = load_entries_or_empty(&self.provider, &self.settings.resource_name());
        self.cycler = Cycler::build(self.settings.policy, &entries, &mut self.rng);
        tracing::info!(%level, entries = entries.len(), "Session reconfigured");

        // Never leave a pair from the previous level on screen
        self.display.send_replace(DisplayPair::blank());
        self.advance(Direction::Forward);
    }
}
