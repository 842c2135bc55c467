//! Score parsing and winner determination
//!
//! A score is a comma-separated list of `a-b` set results, e.g.
//! `"6-4,3-6,6-2"`. The winner is whichever side took the majority of sets;
//! an equal split is a draw. Malformed input is always a typed error.

use crate::types::{Outcome, Side};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One set result, team1's games first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    /// Games won by team1 in this set
    pub team1: u32,
    /// Games won by team2 in this set
    pub team2: u32,
}

/// A parsed match score: one or more set results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score(Vec<SetScore>);

impl Score {
    /// The parsed sets, in play order
    pub fn sets(&self) -> &[SetScore] {
        &self.0
    }

    /// Sets won by a side (sets split evenly count for neither)
    pub fn sets_won(&self, side: Side) -> u32 {
        self.0
            .iter()
            .filter(|set| match side {
                Side::Team1 => set.team1 > set.team2,
                Side::Team2 => set.team2 > set.team1,
            })
            .count() as u32
    }

    /// Total games won by a side across all sets. Standings use game
    /// granularity, not set counts.
    pub fn games_won(&self, side: Side) -> u32 {
        self.0
            .iter()
            .map(|set| match side {
                Side::Team1 => set.team1,
                Side::Team2 => set.team2,
            })
            .sum()
    }

    /// Majority-of-sets outcome
    pub fn outcome(&self) -> Outcome {
        let team1 = self.sets_won(Side::Team1);
        let team2 = self.sets_won(Side::Team2);
        match team1.cmp(&team2) {
            std::cmp::Ordering::Greater => Outcome::Winner(Side::Team1),
            std::cmp::Ordering::Less => Outcome::Winner(Side::Team2),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl FromStr for Score {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut sets = Vec::new();
        for (index, part) in s.split(',').enumerate() {
            let part = part.trim();
            let (left, right) = part
                .split_once('-')
                .ok_or_else(|| Error::ScoreParse(format!("set {}: expected 'a-b', got {part:?}", index + 1)))?;
            let team1 = left
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::ScoreParse(format!("set {}: invalid games {left:?}", index + 1)))?;
            let team2 = right
                .trim()
                .parse::<u32>()
                .map_err(|_| Error::ScoreParse(format!("set {}: invalid games {right:?}", index + 1)))?;
            sets.push(SetScore { team1, team2 });
        }
        if sets.is_empty() {
            return Err(Error::ScoreParse("empty score".to_string()));
        }
        Ok(Score(sets))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for set in &self.0 {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}-{}", set.team1, set.team2)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_winner() {
        let score: Score = "6-4,3-6,6-2".parse().unwrap();
        assert_eq!(score.sets().len(), 3);
        assert_eq!(score.sets_won(Side::Team1), 2);
        assert_eq!(score.sets_won(Side::Team2), 1);
        assert_eq!(score.outcome(), Outcome::Winner(Side::Team1));
    }

    #[test]
    fn test_games_granularity() {
        let score: Score = "6-4,3-6,6-2".parse().unwrap();
        assert_eq!(score.games_won(Side::Team1), 15);
        assert_eq!(score.games_won(Side::Team2), 12);
    }

    #[test]
    fn test_draw_on_even_sets() {
        let score: Score = "6-4,4-6".parse().unwrap();
        assert_eq!(score.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert!(matches!("6-4,abc".parse::<Score>(), Err(Error::ScoreParse(_))));
        assert!(matches!("".parse::<Score>(), Err(Error::ScoreParse(_))));
        assert!(matches!("6_4".parse::<Score>(), Err(Error::ScoreParse(_))));
        assert!(matches!("6-4-2".parse::<Score>(), Err(Error::ScoreParse(_))));
    }

    #[test]
    fn test_whitespace_tolerated() {
        let score: Score = " 6-4 , 3-6 ".parse().unwrap();
        assert_eq!(score.sets().len(), 2);
        assert_eq!(score.to_string(), "6-4,3-6");
    }
}
