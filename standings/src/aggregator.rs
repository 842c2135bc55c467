//! Standings computation over official matches

use crate::types::{Entrant, PointsScheme, StandingsRow};
use match_consensus::{MatchRecord, MatchStatus, Outcome};
use std::collections::HashMap;

/// Compute ranked standings for a set of entrants from official matches.
///
/// Only matches with status Official and a recorded score contribute.
/// Matches referencing teams outside `entrants` are counted for the teams
/// that are present (a bye partner withdrawn by admin does not poison the
/// table).
pub fn compute_standings(
    entrants: &[Entrant],
    matches: &[MatchRecord],
    scheme: PointsScheme,
) -> Vec<StandingsRow> {
    let mut rows: Vec<(u64, StandingsRow)> = entrants
        .iter()
        .map(|entrant| {
            let mut played = 0u32;
            let mut games_won = 0u32;
            let mut points = 0u32;

            for record in matches {
                if record.status != MatchStatus::Official {
                    continue;
                }
                let (Some(side), Some(score)) = (record.side_of(&entrant.team), record.score.as_ref())
                else {
                    continue;
                };

                played += 1;
                games_won += score.games_won(side);
                points += match score.outcome() {
                    Outcome::Winner(winner) if winner == side => scheme.win,
                    Outcome::Draw => scheme.draw,
                    Outcome::Winner(_) => scheme.loss,
                };
            }

            (
                entrant.seq,
                StandingsRow {
                    team: entrant.team.clone(),
                    name: entrant.name.clone(),
                    group: entrant.group.clone(),
                    played,
                    games_won,
                    points,
                    qualified: false,
                },
            )
        })
        .collect();

    // Total order: points desc, games_won desc, registration seq asc.
    // Never arbitrary/hash order.
    rows.sort_by(|(seq_a, a), (seq_b, b)| {
        b.points
            .cmp(&a.points)
            .then(b.games_won.cmp(&a.games_won))
            .then(seq_a.cmp(seq_b))
    });

    let mut rows: Vec<StandingsRow> = rows.into_iter().map(|(_, row)| row).collect();

    // Flag top-2 per group in ranked order
    let mut per_group: HashMap<String, u32> = HashMap::new();
    for row in &mut rows {
        let count = per_group.entry(row.group.clone()).or_insert(0);
        if *count < 2 {
            row.qualified = true;
        }
        *count += 1;
    }

    tracing::debug!(
        entrants = entrants.len(),
        official = matches.len(),
        "Standings computed"
    );
    rows
}
