//! Game Session
//!
//! Owns the live round behind one mutex and drives its countdown from a
//! tokio task. The input path (`submit_guess`) and the ticker lock the same
//! mutex, so guess evaluation and ticks never interleave.
//!
//! Events from both paths go out through one unbounded channel and are sent
//! while the lock is held, so the receiver sees them in mutation order.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::game::events::RoundEvent;
use crate::game::round::{GuessError, GuessReport, Round, RoundSnapshot, RoundSummary};

/// Sender half of the event stream.
pub type EventSender = mpsc::UnboundedSender<RoundEvent>;

/// Receiver half of the event stream.
pub type EventReceiver = mpsc::UnboundedReceiver<RoundEvent>;

/// A live round plus its ticker.
pub struct GameSession {
    /// Session identifier.
    pub id: Uuid,
    round: Arc<Mutex<Round>>,
    events_tx: EventSender,
    shutdown_tx: watch::Sender<bool>,
}

impl GameSession {
    /// Create a session with a fresh id.
    pub fn new(round: Round, events_tx: EventSender) -> Self {
        Self::with_id(Uuid::new_v4(), round, events_tx)
    }

    /// Create a session with a known id.
    pub fn with_id(id: Uuid, round: Round, events_tx: EventSender) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            id,
            round: Arc::new(Mutex::new(round)),
            events_tx,
            shutdown_tx,
        }
    }

    /// Evaluate a guess. Stops the ticker if the guess ends the round.
    pub async fn submit_guess(&self, raw: &str) -> Result<GuessReport, GuessError> {
        let mut round = self.round.lock().await;
        let report = round.submit_guess(raw)?;

        for event in RoundEvent::from_guess(&report, &round) {
            // Receiver gone means nobody is rendering; the round still counts
            let _ = self.events_tx.send(event);
        }

        if round.is_ended() {
            info!("Session {} ended by guess: {:?}", self.id, round.phase());
            self.stop();
        }

        Ok(report)
    }

    /// Counters at this instant.
    pub async fn snapshot(&self) -> RoundSnapshot {
        self.round.lock().await.snapshot()
    }

    /// Final result, once ended.
    pub async fn summary(&self) -> Option<RoundSummary> {
        self.round.lock().await.summary()
    }

    /// Guess budget of the round.
    pub async fn max_guesses(&self) -> u8 {
        self.round.lock().await.config().max_guesses
    }

    /// Cancel the ticker. Idempotent.
    pub fn stop(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Whether `stop` has been called.
    pub fn is_stopped(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    /// Spawn the countdown task: one `tick` per `period`, first tick one
    /// period from now.
    ///
    /// The task exits when the round ends, when `stop` is called, or when
    /// the event receiver is dropped.
    pub fn spawn_timer(&self, period: Duration) -> JoinHandle<()> {
        let round = self.round.clone();
        let events_tx = self.events_tx.clone();
        let shutdown_rx = self.shutdown_tx.subscribe();
        let id = self.id;

        tokio::spawn(async move {
            run_timer(id, round, events_tx, shutdown_rx, period).await;
        })
    }
}

async fn run_timer(
    id: Uuid,
    round: Arc<Mutex<Round>>,
    events_tx: EventSender,
    mut shutdown_rx: watch::Receiver<bool>,
    period: Duration,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!("Timer started for session {}", id);

    loop {
        if *shutdown_rx.borrow() {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                let mut guard = round.lock().await;
                let Some(outcome) = guard.tick() else {
                    break;
                };

                let events = RoundEvent::from_tick(outcome, &guard);
                let ended = events.iter().any(RoundEvent::is_terminal);
                for event in events {
                    if events_tx.send(event).is_err() {
                        debug!("Event receiver dropped for session {}", id);
                        return;
                    }
                }

                if ended {
                    info!("Session {} ended by timer", id);
                    break;
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    debug!("Timer stopped for session {}", id);
}
