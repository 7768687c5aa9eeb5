//! Legal action generation.
//!
//! The action space is every rank times every cell. An action is legal when
//! the mover holds a piece of that rank, the target cell is empty, and the
//! action is not on the caller's exclusion list.

use rand::Rng;

use crate::board::{Action, Board, Coord, GameState, Player, Pools, Rank, CELL_COUNT};

/// True if `turn` holds at least one piece of `rank` in reserve.
pub fn has_piece(pools: &Pools, turn: Player, rank: Rank) -> bool {
    pools[turn].has(rank)
}

/// True if the cell exists and is empty.
pub fn is_free(board: &Board, at: Coord) -> bool {
    board.is_free(at)
}

/// Actions the caller has ruled out, e.g. moves already tried this turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    actions: Vec<Action>,
}

impl ExclusionList {
    pub fn new() -> Self {
        ExclusionList::default()
    }

    /// Builds the list from raw `(rank, row, col)` triples. Triples outside
    /// the action space can never match and are dropped.
    pub fn from_raw(triples: &[[u8; 3]]) -> Self {
        triples.iter().filter_map(|&t| Action::decode(t)).collect()
    }

    pub fn push(&mut self, action: Action) {
        if !self.contains(action) {
            self.actions.push(action);
        }
    }

    pub fn contains(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.actions.iter().copied()
    }
}

impl FromIterator<Action> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut list = ExclusionList::new();
        for action in iter {
            list.push(action);
        }
        list
    }
}

/// Returns true if `action` passes all three constraints.
pub fn is_legal(state: &GameState, action: Action, exclusions: &ExclusionList) -> bool {
    has_piece(&state.pools, state.turn, action.rank)
        && is_free(&state.board, action.at)
        && !exclusions.contains(action)
}

/// Enumerates legal actions, minors first, cells in row-major order.
pub fn legal_actions(state: &GameState, exclusions: &ExclusionList) -> Vec<Action> {
    let mut actions = Vec::new();
    for rank in Rank::ALL {
        if !has_piece(&state.pools, state.turn, rank) {
            continue;
        }
        for i in 0..CELL_COUNT {
            let action = Action {
                rank,
                at: Coord::from_index(i),
            };
            if is_free(&state.board, action.at) && !exclusions.contains(action) {
                actions.push(action);
            }
        }
    }
    actions
}

/// Picks a uniformly random legal action, or `None` if there is none.
pub fn random_action(
    state: &GameState,
    exclusions: &ExclusionList,
    rng: &mut impl Rng,
) -> Option<Action> {
    let legal = legal_actions(state, exclusions);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, Pool};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn opening_has_36_minor_placements() {
        let actions = legal_actions(&GameState::initial(), &ExclusionList::new());
        assert_eq!(actions.len(), 36);
        assert!(actions.iter().all(|a| a.rank == Rank::Minor));
    }

    #[test]
    fn occupied_cells_and_missing_ranks_are_filtered() {
        let mut state = GameState::initial();
        state.board.set(Coord::new(0, 0), Some(Piece::minor(Player::B)));
        state.pools[Player::A] = Pool::new(6, 1);
        let actions = legal_actions(&state, &ExclusionList::new());
        assert_eq!(actions.len(), 70);
        assert!(!actions.contains(&Action::new(Rank::Major, 0, 0)));
        assert!(actions.contains(&Action::new(Rank::Major, 5, 5)));
    }

    #[test]
    fn exclusions_are_respected() {
        let state = GameState::initial();
        let exclusions = ExclusionList::from_raw(&[[1, 2, 2], [1, 2, 2], [42, 0, 0]]);
        assert_eq!(exclusions.len(), 1);
        assert!(exclusions.contains(Action::new(Rank::Minor, 2, 2)));
        assert!(!is_legal(&state, Action::new(Rank::Minor, 2, 2), &exclusions));
        assert_eq!(legal_actions(&state, &exclusions).len(), 35);
    }

    #[test]
    fn random_action_is_legal() {
        let state = GameState::initial();
        let exclusions = ExclusionList::new();
        let mut rng = seeded_rng();
        for _ in 0..50 {
            let action = random_action(&state, &exclusions, &mut rng).unwrap();
            assert!(is_legal(&state, action, &exclusions));
        }
    }

    #[test]
    fn empty_pool_has_no_actions() {
        let mut state = GameState::initial();
        state.pools[Player::A] = Pool::default();
        assert!(legal_actions(&state, &ExclusionList::new()).is_empty());
        assert_eq!(random_action(&state, &ExclusionList::new(), &mut seeded_rng()), None);
    }
}
