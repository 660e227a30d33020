//! Point counts

use serde::{Deserialize, Serialize};

use super::arena::Player;

/// Authoritative score. Only ever goes up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award a point and return the player's new total
    pub fn increment(&mut self, player: Player) -> u32 {
        let slot = match player {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        *slot += 1;
        *slot
    }

    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// Copy for presentation
    #[inline]
    pub fn snapshot(&self) -> Score {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_touches_one_field() {
        let mut score = Score::new();
        assert_eq!(score.increment(Player::Two), 1);
        assert_eq!(score.player1, 0);
        assert_eq!(score.player2, 1);
    }

    #[test]
    fn test_scores_accumulate() {
        let mut score = Score::new();
        score.increment(Player::One);
        score.increment(Player::One);
        score.increment(Player::Two);
        assert_eq!(score.get(Player::One), 2);
        assert_eq!(score.get(Player::Two), 1);
        assert_eq!(score.snapshot(), score);
    }
}
