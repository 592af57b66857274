use tracing::{debug, info};

use crate::{Config, Events, MatchState, Score};

/// Tally this tick's point, if any, and end the match at the win score
pub fn check_scoring(
    events: &mut Events,
    score: &mut Score,
    state: &mut MatchState,
    config: &Config,
) {
    let Some(scorer) = events.point_scored else {
        return;
    };

    score.increment(scorer);
    debug!(?scorer, left = score.left, right = score.right, "point scored");

    if let Some(winner) = score.has_winner(config.win_score) {
        *state = MatchState::Won(winner);
        events.match_won = Some(winner);
        info!(?winner, left = score.left, right = score.right, "match won");
    }
}
