//! Terminal play loop.
//!
//! Reads one command per line and feeds wall-clock time to the engine:
//! - `start`: start the game and the clock
//! - `reset`: once the game is over, flip everything back and deal again
//! - `<id>`: click the card with that id
//! - `show`: print the artwork of the face-up cards
//! - `quit`: leave

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::debug;

use crate::cards::CardId;
use crate::core::Millis;
use crate::game::{ClickOutcome, EngineEvent, GameEngine, IgnoreReason};
use crate::render::{render_board, render_revealed};

/// How often the loop lets deferred work fire while idle.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A parsed input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayCommand {
    Start,
    Reset,
    Click(CardId),
    Show,
    Quit,
}

/// Parse one input line. Blank or unknown input is `None`.
pub fn parse_command(line: &str) -> Option<PlayCommand> {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "start" | "s" => Some(PlayCommand::Start),
        "reset" | "r" => Some(PlayCommand::Reset),
        "show" => Some(PlayCommand::Show),
        "quit" | "q" | "exit" => Some(PlayCommand::Quit),
        other => other
            .parse::<u32>()
            .ok()
            .filter(|&id| id > 0)
            .map(|id| PlayCommand::Click(CardId::new(id))),
    }
}

/// Apply a command at `now` and describe what happened.
pub fn apply_command(engine: &mut GameEngine, command: PlayCommand, now: Millis) -> String {
    match command {
        PlayCommand::Start => match engine.start_game(now) {
            Ok(()) => "Game started.".to_string(),
            Err(e) => format!("Cannot start: {e}."),
        },
        PlayCommand::Reset => {
            engine.advance_to(now);
            if !engine.snapshot().can_reset {
                return "Cannot reset: the game is not over.".to_string();
            }
            engine.reset_game(now);
            "Shuffling...".to_string()
        }
        PlayCommand::Click(id) => describe_click(engine.handle_card_click(id, now)),
        PlayCommand::Show => render_revealed(&engine.snapshot()),
        PlayCommand::Quit => "Bye.".to_string(),
    }
}

fn describe_click(outcome: ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Revealed(id) => format!("Card {} revealed.", id.raw()),
        ClickOutcome::Matched(a, b) => format!("Cards {} and {} match!", a.raw(), b.raw()),
        ClickOutcome::Mismatched(a, b) => format!("Cards {} and {} differ.", a.raw(), b.raw()),
        ClickOutcome::Ignored(reason) => match reason {
            IgnoreReason::NotStarted => "Start the game first.".to_string(),
            IgnoreReason::GameOver => "The game is over, reset to play again.".to_string(),
            IgnoreReason::ResetPending => "Shuffling, hold on.".to_string(),
            IgnoreReason::Comparing => "Wait for the cards to flip back.".to_string(),
            IgnoreReason::UnknownCard => "No such card.".to_string(),
            IgnoreReason::AlreadyRevealed => "That card is already face-up.".to_string(),
        },
    }
}

/// Does this batch of events change what is on screen?
fn needs_redraw(events: &[EngineEvent]) -> bool {
    events.iter().any(|e| !matches!(e, EngineEvent::Tick { .. }))
}

/// Run the loop until `quit` or end of input.
pub async fn run<R, W>(engine: &mut GameEngine, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let origin = Instant::now();
    let now = || Millis::new(u64::try_from(origin.elapsed().as_millis()).unwrap_or(u64::MAX));

    let mut lines = input.lines();
    let mut poll = tokio::time::interval(POLL_INTERVAL);

    output.write_all(render_board(&engine.snapshot()).as_bytes()).await?;
    output.flush().await?;

    loop {
        let message = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Some(PlayCommand::Quit) => break,
                    Some(command) => {
                        debug!(?command, "command");
                        Some(apply_command(engine, command, now()))
                    }
                    None => Some("Commands: start, reset, <card id>, show, quit.".to_string()),
                }
            }
            _ = poll.tick() => {
                engine.advance_to(now());
                None
            }
        };

        let events = engine.drain_events();
        if message.is_some() || needs_redraw(&events) {
            let mut text = render_board(&engine.snapshot());
            if let Some(message) = message {
                text.push_str(&message);
                text.push('\n');
            }
            output.write_all(text.as_bytes()).await?;
            output.flush().await?;
        }
    }

    output.write_all(b"Bye.\n").await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;
    use crate::core::GameConfig;

    fn engine() -> GameEngine {
        let kinds = vec![CardKind::new(1, "A", "a.png"), CardKind::new(2, "B", "b.png")];
        GameEngine::new(kinds, GameConfig::new().with_seed(3)).unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("start"), Some(PlayCommand::Start));
        assert_eq!(parse_command("  RESET "), Some(PlayCommand::Reset));
        assert_eq!(parse_command("3"), Some(PlayCommand::Click(CardId::new(3))));
        assert_eq!(parse_command("q"), Some(PlayCommand::Quit));
        assert_eq!(parse_command("show"), Some(PlayCommand::Show));
        assert_eq!(parse_command("0"), None);
        assert_eq!(parse_command("-1"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("flip"), None);
    }

    #[test]
    fn test_apply_command() {
        let mut engine = engine();

        let msg = apply_command(&mut engine, PlayCommand::Click(CardId::new(1)), Millis::new(0));
        assert_eq!(msg, "Start the game first.");

        assert_eq!(apply_command(&mut engine, PlayCommand::Start, Millis::new(0)), "Game started.");
        assert_eq!(
            apply_command(&mut engine, PlayCommand::Start, Millis::new(5)),
            "Cannot start: the game is already started."
        );
        assert_eq!(
            apply_command(&mut engine, PlayCommand::Click(CardId::new(1)), Millis::new(10)),
            "Card 1 revealed."
        );
    }

    #[test]
    fn test_reset_only_when_over() {
        let mut engine = engine();
        let msg = apply_command(&mut engine, PlayCommand::Reset, Millis::new(0));
        assert_eq!(msg, "Cannot reset: the game is not over.");
        assert!(!engine.is_reset_pending());

        apply_command(&mut engine, PlayCommand::Start, Millis::new(0));
        let msg = apply_command(&mut engine, PlayCommand::Reset, Millis::new(10));
        assert_eq!(msg, "Cannot reset: the game is not over.");
        assert!(!engine.is_reset_pending());
        assert!(engine.is_clock_running());
        assert_eq!(engine.start_time(), Some(Millis::new(0)));

        let labels: Vec<(String, CardId)> =
            engine.deck().iter().map(|c| (c.label.clone(), c.id)).collect();
        for label in ["A", "B"] {
            for (l, id) in &labels {
                if l == label {
                    engine.handle_card_click(*id, Millis::new(20));
                }
            }
        }
        assert!(engine.is_game_over());

        assert_eq!(apply_command(&mut engine, PlayCommand::Reset, Millis::new(30)), "Shuffling...");
        assert!(engine.is_reset_pending());
    }

    #[test]
    fn test_needs_redraw() {
        assert!(!needs_redraw(&[EngineEvent::Tick { elapsed_seconds: 1 }]));
        assert!(needs_redraw(&[EngineEvent::ResetDealt]));
        assert!(!needs_redraw(&[]));
    }

    #[tokio::test]
    async fn test_run_until_quit() {
        let mut engine = engine();
        let input: &[u8] = b"start\n1\nquit\n";
        let mut output = Vec::new();

        run(&mut engine, input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Game started."));
        assert!(text.contains("Card 1 revealed."));
        assert!(text.ends_with("Bye.\n"));
        assert!(engine.start_time().is_some());
    }
}
