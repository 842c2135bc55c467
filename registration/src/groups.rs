//! Round-robin group assignment
//!
//! A level's draw splits into groups of `group_size` labelled 'A' onward.
//! New entries round-robin across groups by entry count, with a fallback
//! scan so an uneven fill never strands an open slot.

use crate::{Error, Result};
use std::collections::HashMap;

/// Group labels for a draw
pub fn group_labels(draw_size: u32, group_size: u32) -> Vec<String> {
    let count = (draw_size / group_size).max(1);
    (0..count)
        .map(|i| char::from(b'A' + (i % 26) as u8).to_string())
        .collect()
}

/// Pick the group for the next entry given current per-group entry counts.
///
/// `TournamentFull` when every group is at capacity.
pub fn next_group(
    counts: &HashMap<String, u32>,
    draw_size: u32,
    group_size: u32,
) -> Result<String> {
    let total: u32 = counts.values().sum();
    if total >= draw_size {
        return Err(Error::TournamentFull { draw_size });
    }

    let labels = group_labels(draw_size, group_size);
    let target = &labels[(total as usize) % labels.len()];
    if counts.get(target).copied().unwrap_or(0) < group_size {
        return Ok(target.clone());
    }

    // Uneven fill: take any open group
    labels
        .iter()
        .find(|label| counts.get(*label).copied().unwrap_or(0) < group_size)
        .cloned()
        .ok_or(Error::TournamentFull { draw_size })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_labels() {
        assert_eq!(group_labels(16, 4), vec!["A", "B", "C", "D"]);
        assert_eq!(group_labels(8, 4), vec!["A", "B"]);
        // A draw smaller than one group still gets a group
        assert_eq!(group_labels(2, 4), vec!["A"]);
    }

    #[test]
    fn test_round_robin_fill() {
        let mut c = HashMap::new();
        for expected in ["A", "B", "C", "D", "A", "B"] {
            let group = next_group(&c, 16, 4).unwrap();
            assert_eq!(group, expected);
            *c.entry(group).or_insert(0) += 1;
        }
    }

    #[test]
    fn test_fallback_when_target_full() {
        // 5 entries total → target is B (5 % 4 = 1), but B is full
        let c = counts(&[("A", 1), ("B", 4)]);
        assert_eq!(next_group(&c, 16, 4).unwrap(), "A");
    }

    #[test]
    fn test_full_draw_rejected() {
        let c = counts(&[("A", 4), ("B", 4)]);
        let err = next_group(&c, 8, 4).unwrap_err();
        assert!(matches!(err, Error::TournamentFull { draw_size: 8 }));
    }
}
