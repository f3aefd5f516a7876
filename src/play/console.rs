//! Terminal Console
//!
//! Line-oriented surface: one guess per line, `:top` for the leaderboard,
//! `:quit` to abandon. Timer events are printed as they arrive.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, Lines};
use tracing::{debug, info};

use crate::game::events::RoundEvent;
use crate::game::round::RoundSummary;
use crate::leaderboard::{fetch_top, record_result, LeaderboardStore};
use crate::play::render;
use crate::play::session::{EventReceiver, GameSession};

/// Show the leaderboard.
pub const TOP_COMMAND: &str = ":top";

/// Abandon the round.
pub const QUIT_COMMAND: &str = ":quit";

/// Drives one session from a line source to a writer.
pub struct Console<W: Write> {
    session: GameSession,
    events_rx: EventReceiver,
    store: Arc<dyn LeaderboardStore>,
    leaderboard_size: usize,
    max_guesses: u8,
    out: W,
}

impl<W: Write> Console<W> {
    /// Create a console for `session`.
    pub async fn new(
        session: GameSession,
        events_rx: EventReceiver,
        store: Arc<dyn LeaderboardStore>,
        leaderboard_size: usize,
        out: W,
    ) -> Self {
        let max_guesses = session.max_guesses().await;
        Self {
            session,
            events_rx,
            store,
            leaderboard_size,
            max_guesses,
            out,
        }
    }

    /// Session being played.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Print the opening banner.
    pub fn greet(&mut self, catalog_len: usize, round_seconds: u32) -> io::Result<()> {
        writeln!(self.out, "🎓 Guess the University!")?;
        writeln!(
            self.out,
            "One of {} universities is the mystery. You have {} guesses and {}s per guess.",
            catalog_len, self.max_guesses, round_seconds
        )?;
        writeln!(
            self.out,
            "Type part of a name to guess. {} shows the leaderboard, {} gives up.\n",
            TOP_COMMAND, QUIT_COMMAND
        )?;
        self.out.flush()
    }

    /// Play until the round ends or input runs out.
    ///
    /// Returns the summary of an ended round, `None` if abandoned.
    pub async fn play<R>(&mut self, lines: &mut Lines<R>) -> io::Result<Option<RoundSummary>>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            tokio::select! {
                biased;

                Some(event) = self.events_rx.recv() => {
                    if let Some(summary) = self.show(event)? {
                        return Ok(Some(summary));
                    }
                }
                line = lines.next_line() => {
                    let Some(text) = line? else {
                        info!("Input closed, abandoning session {}", self.session.id);
                        self.session.stop();
                        return Ok(None);
                    };

                    match text.trim() {
                        QUIT_COMMAND => {
                            self.session.stop();
                            writeln!(self.out, "Round abandoned.")?;
                            return Ok(None);
                        }
                        TOP_COMMAND => self.show_leaderboard()?,
                        guess => {
                            if let Err(e) = self.session.submit_guess(guess).await {
                                writeln!(self.out, "{}", render::render_guess_error(&e))?;
                            }
                            // Guess events are already queued; print them before reading on
                            while let Ok(event) = self.events_rx.try_recv() {
                                if let Some(summary) = self.show(event)? {
                                    return Ok(Some(summary));
                                }
                            }
                        }
                    }
                    self.out.flush()?;
                }
            }
        }
    }

    /// Ask for a name and record the result. Blank or missing input skips it.
    ///
    /// Lines typed before the prompt is shown are dropped, so a guess that
    /// raced the end of the round is never taken as the name.
    pub async fn finish<R>(&mut self, summary: &RoundSummary, lines: &mut Lines<R>) -> io::Result<bool>
    where
        R: AsyncBufRead + Unpin,
    {
        discard_pending(lines).await?;

        write!(self.out, "Enter your name for the leaderboard: ")?;
        self.out.flush()?;

        let name = lines.next_line().await?.unwrap_or_default();
        let recorded = record_result(
            self.store.as_ref(),
            &name,
            summary.guesses_used,
            summary.completed(),
        );

        if recorded {
            writeln!(self.out)?;
            self.show_leaderboard()?;
        }
        Ok(recorded)
    }

    fn show(&mut self, event: RoundEvent) -> io::Result<Option<RoundSummary>> {
        if let Some(text) = render::render_event(&event, self.max_guesses) {
            write!(self.out, "{}", text)?;
            self.out.flush()?;
        }
        match event {
            RoundEvent::RoundEnded(summary) => Ok(Some(summary)),
            _ => Ok(None),
        }
    }

    fn show_leaderboard(&mut self) -> io::Result<()> {
        let entries = fetch_top(self.store.as_ref(), self.leaderboard_size);
        write!(self.out, "{}", render::render_leaderboard(&entries))?;
        self.out.flush()
    }

    /// Consume the console, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Drop every line already readable without waiting.
async fn discard_pending<R>(lines: &mut Lines<R>) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        match tokio::time::timeout(Duration::ZERO, lines.next_line()).await {
            Ok(Ok(Some(line))) => debug!("Dropping line typed before the name prompt: {:?}", line),
            Ok(Ok(None)) | Err(_) => return Ok(()),
            Ok(Err(e)) => return Err(e),
        }
    }
}
