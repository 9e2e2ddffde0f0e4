//! Text rendering of the play surface.
//!
//! Layout, top to bottom: title, controls and timer, card grid, and a
//! celebration line once the game is won. Enabled controls are shown in
//! square brackets, disabled ones in parentheses.

use crate::cards::Card;
use crate::game::{GameSnapshot, GameStatus};
use crate::session::InitError;

/// Page title.
pub const TITLE: &str = "Memory Game";

/// Cards per grid row.
pub const COLUMNS: usize = 4;

fn control(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}

fn tile(card: &Card) -> String {
    if card.is_hidden {
        format!("{:>3} ######", card.id.raw())
    } else {
        format!("{:>3} {:<6}", card.id.raw(), card.label)
    }
}

/// Render the board.
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let mut out = format!(
        "{TITLE}\n{} {}  Time : {} sec\n\n",
        control("Reset", snapshot.can_reset),
        control("Start Game", snapshot.can_start),
        snapshot.elapsed_seconds
    );

    let cards: Vec<&Card> = snapshot.cards.iter().collect();
    for row in cards.chunks(COLUMNS) {
        let line: Vec<String> = row.iter().map(|card| tile(card)).collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }

    if snapshot.status == GameStatus::Won {
        out.push_str(&format!(
            "\n*** All pairs found in {} sec! ***\n",
            snapshot.elapsed_seconds
        ));
    }

    out
}

/// Render the artwork references of the face-up cards.
pub fn render_revealed(snapshot: &GameSnapshot) -> String {
    snapshot
        .cards
        .iter()
        .filter(|c| c.is_revealed())
        .map(|card| format!("{:>3} {} -> {}\n", card.id.raw(), card.label, card.image_ref))
        .collect()
}

/// Render the fallback page shown when no game could be loaded.
pub fn render_error(error: &InitError) -> String {
    format!("{TITLE}\n\nNo cards to play: {error}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, DeckError};
    use crate::core::{GameConfig, Millis};
    use crate::game::GameEngine;

    fn engine() -> GameEngine {
        let kinds = vec![
            CardKind::new(1, "cat", "cat.png"),
            CardKind::new(2, "dog", "dog.png"),
            CardKind::new(3, "owl", "owl.png"),
        ];
        GameEngine::new(kinds, GameConfig::new().with_seed(5)).unwrap()
    }

    #[test]
    fn test_initial_board() {
        let text = render_board(&engine().snapshot());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], TITLE);
        assert_eq!(lines[1], "(Reset) [Start Game]  Time : 0 sec");
        // 6 cards in rows of 4
        assert_eq!(lines.len(), 5);
        assert_eq!(text.matches("######").count(), 6);
        assert!(!text.contains("cat"));
    }

    #[test]
    fn test_board_layout() {
        let kinds = vec![CardKind::new(1, "A", "a.png"), CardKind::new(2, "B", "b.png")];
        let engine = GameEngine::new(kinds, GameConfig::new().with_seed(1)).unwrap();

        assert_eq!(
            render_board(&engine.snapshot()),
            "Memory Game\n(Reset) [Start Game]  Time : 0 sec\n\n  1 ###### |   2 ###### |   3 ###### |   4 ######\n"
        );
    }

    #[test]
    fn test_revealed_card_shows_label() {
        let mut engine = engine();
        engine.start_game(Millis::new(0)).unwrap();
        let first = engine.deck().iter().next().unwrap().clone();
        engine.handle_card_click(first.id, Millis::new(10));

        let snapshot = engine.snapshot();
        let text = render_board(&snapshot);
        assert!(text.contains(&first.label));
        assert!(text.contains("(Reset) (Start Game)"));

        let revealed = render_revealed(&snapshot);
        assert!(revealed.contains(&first.image_ref));
    }

    #[test]
    fn test_won_board() {
        let mut engine = engine();
        engine.start_game(Millis::new(0)).unwrap();
        let labels: Vec<(String, u32)> =
            engine.deck().iter().map(|c| (c.label.clone(), c.id.raw())).collect();
        for label in ["cat", "dog", "owl"] {
            for (l, id) in &labels {
                if l == label {
                    engine.handle_card_click((*id).into(), Millis::new(2500));
                }
            }
        }

        let text = render_board(&engine.snapshot());
        assert!(text.starts_with("Memory Game\n[Reset] (Start Game)  Time : 2 sec"));
        assert!(text.contains("*** All pairs found in 2 sec! ***"));
    }

    #[test]
    fn test_error_page() {
        let text = render_error(&InitError::Deck(DeckError::TooFewKinds { min: 2, got: 0 }));
        assert!(text.starts_with(TITLE));
        assert!(text.contains("No cards to play"));
        assert!(text.contains("at least 2 kinds"));
    }
}
