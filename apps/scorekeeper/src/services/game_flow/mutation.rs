use serde::Serialize;
use tracing::debug;

use crate::domain::game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
use crate::domain::state::{GameState, GameStatus};
use crate::errors::domain::DomainError;
use crate::services::game_flow::GameFlowService;

/// Result of one accepted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFlowOutcome<T> {
    pub value: T,
    pub status: GameStatus,
    pub transitions: Vec<GameTransition>,
}

impl GameFlowService {
    /// Apply `mutation` to a working copy and commit it only on success.
    ///
    /// `process_game_flow` runs after the mutation. Lifecycle transitions are
    /// derived from before/after views and returned alongside any explicit
    /// ones the mutation reports.
    pub(super) fn run_mutation<T, F>(
        &self,
        game: &mut GameState,
        mutation: F,
    ) -> Result<GameFlowOutcome<T>, DomainError>
    where
        F: FnOnce(&mut GameState) -> Result<(T, Vec<GameTransition>), DomainError>,
    {
        let before = GameLifecycleView::of(game);

        let mut working = game.clone();
        let (value, mut transitions) = mutation(&mut working)?;
        working.process_game_flow()?;

        let after = GameLifecycleView::of(&working);
        transitions.extend(derive_game_transitions(&before, &after));

        *game = working;
        debug!(
            round = after.round_no,
            status = ?after.round_status,
            transitions = transitions.len(),
            "Mutation committed"
        );

        Ok(GameFlowOutcome {
            value,
            status: game.get_game_status(),
            transitions,
        })
    }
}
