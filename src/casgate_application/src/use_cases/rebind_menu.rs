use std::{sync::Arc, time::Duration};

use casgate_core::{ActivationEvent, ClickListener, LookupChain, Navigator, PageDom};
use tokio::{
    sync::{Mutex, oneshot},
    task::{JoinError, JoinHandle},
    time::{Instant, MissedTickBehavior},
};

use super::redirect_logout::LogoutRedirector;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);
pub const DEFAULT_WARN_AFTER: Duration = Duration::from_secs(60);

/// Timing of the rebinding poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    /// Log a single warning once this much polling time has passed without a match.
    pub warn_after: Option<Duration>,
    /// Give up after this many ticks. Polls forever when `None`; `Some(0)`
    /// gives up after the first tick.
    pub max_attempts: Option<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            warn_after: Some(DEFAULT_WARN_AFTER),
            max_attempts: None,
        }
    }
}

/// Result of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The chain stopped at `missing_step`; the next tick tries again.
    Pending { missing_step: usize },
    Attached,
    Abandoned,
    /// Polling already ended; nothing was looked up.
    Idle,
}

/// How a started poller ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollReport {
    Attached { ticks: u64 },
    Abandoned { ticks: u64 },
    Canceled { ticks: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Polling,
    Attached,
    Abandoned,
}

/// Waits for the host's logout control to render, then routes its
/// activations through a [`LogoutRedirector`].
///
/// The listener is attached at most once per rebinder; every tick after that
/// is a no-op.
pub struct MenuRebinder<N> {
    chain: LookupChain,
    config: PollConfig,
    redirector: Arc<LogoutRedirector<N>>,
    phase: Phase,
    ticks: u64,
    warned: bool,
}

impl<N> MenuRebinder<N>
where
    N: Navigator + 'static,
{
    pub fn new(chain: LookupChain, config: PollConfig, redirector: Arc<LogoutRedirector<N>>) -> Self {
        Self {
            chain,
            config,
            redirector,
            phase: Phase::Polling,
            ticks: 0,
            warned: false,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_attached(&self) -> bool {
        self.phase == Phase::Attached
    }

    /// Run one lookup attempt against `dom`.
    pub fn tick<D: PageDom>(&mut self, dom: &mut D) -> TickOutcome {
        if self.phase != Phase::Polling {
            return TickOutcome::Idle;
        }
        self.ticks += 1;

        match self.chain.resolve(dom) {
            Ok(node) => {
                let redirector = Arc::clone(&self.redirector);
                let listener: ClickListener =
                    Box::new(move |event: &mut dyn ActivationEvent| redirector.on_activate(event));
                dom.add_click_listener(node, listener);
                self.phase = Phase::Attached;

                tracing::info!(ticks = self.ticks, "Logout control found, CAS redirect attached");
                TickOutcome::Attached
            }
            Err(miss) => {
                tracing::trace!(
                    step = miss.step,
                    selector = %miss.selector,
                    "Logout control not rendered yet"
                );
                self.warn_if_slow();

                if self.config.max_attempts.is_some_and(|max| self.ticks >= max) {
                    self.phase = Phase::Abandoned;
                    tracing::warn!(
                        ticks = self.ticks,
                        step = miss.step,
                        selector = %miss.selector,
                        "Logout control never appeared, polling abandoned"
                    );
                    return TickOutcome::Abandoned;
                }

                TickOutcome::Pending {
                    missing_step: miss.step,
                }
            }
        }
    }

    fn warn_if_slow(&mut self) {
        let Some(warn_after) = self.config.warn_after else {
            return;
        };
        let elapsed = self
            .config
            .interval
            .saturating_mul(u32::try_from(self.ticks).unwrap_or(u32::MAX));

        if !self.warned && elapsed >= warn_after {
            self.warned = true;
            tracing::warn!(
                ticks = self.ticks,
                elapsed_ms = elapsed.as_millis() as u64,
                "Still waiting for the logout control"
            );
        }
    }

    fn report(&self) -> PollReport {
        match self.phase {
            Phase::Attached => PollReport::Attached { ticks: self.ticks },
            Phase::Abandoned => PollReport::Abandoned { ticks: self.ticks },
            Phase::Polling => PollReport::Canceled { ticks: self.ticks },
        }
    }

    /// Poll `dom` on a timer until the control is found, polling is abandoned
    /// or the returned handle cancels it.
    ///
    /// The first attempt happens one interval after the call. Dropping the
    /// handle detaches the poller instead of stopping it.
    pub fn start<D>(mut self, dom: Arc<Mutex<D>>) -> PollHandle
    where
        D: PageDom + 'static,
    {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let period = self.config.interval;

        let task = tokio::spawn(async move {
            let mut timer = tokio::time::interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut detached = false;

            loop {
                tokio::select! {
                    signal = &mut cancel_rx, if !detached => {
                        if signal.is_ok() {
                            tracing::debug!(ticks = self.ticks, "Logout control polling canceled");
                            return self.report();
                        }
                        detached = true;
                    }
                    _ = timer.tick() => {
                        let mut dom = dom.lock().await;
                        match self.tick(&mut *dom) {
                            TickOutcome::Pending { .. } => {}
                            TickOutcome::Attached | TickOutcome::Abandoned | TickOutcome::Idle => {
                                return self.report();
                            }
                        }
                    }
                }
            }
        });

        PollHandle {
            cancel: Some(cancel_tx),
            task,
        }
    }
}

/// Control over a running poller.
pub struct PollHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<PollReport>,
}

impl PollHandle {
    /// Stop polling for good. No effect once the poller has finished.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the poller to end.
    pub async fn join(self) -> Result<PollReport, JoinError> {
        self.task.await
    }
}
