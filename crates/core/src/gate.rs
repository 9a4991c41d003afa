use crate::{is_pass, GameSnapshot, Seat, SeatAssignments};

pub fn can_act(snapshot: &GameSnapshot, seat: Seat, assignments: &SeatAssignments) -> bool {
    snapshot.current_player == seat && assignments.is_human(seat) && !snapshot.game_over
}

/// An empty action space means no turn has resolved yet; callers hide action
/// controls entirely.
pub fn can_pass(snapshot: &GameSnapshot) -> bool {
    snapshot.action_space.iter().any(|action| is_pass(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn snapshot(current: Seat, game_over: bool) -> GameSnapshot {
        GameSnapshot {
            state: String::new(),
            current_player: current,
            hands: BTreeMap::new(),
            last_plays: BTreeMap::new(),
            action_space: vec![vec!["PASS".to_string()], vec!["♠5".to_string()]],
            history: Vec::new(),
            game_over,
            winner: None,
        }
    }

    #[test]
    fn only_the_current_human_seat_can_act() {
        let assignments = SeatAssignments::default();
        let snapshot = snapshot(Seat::Landlord, false);
        assert!(can_act(&snapshot, Seat::Landlord, &assignments));
        assert!(!can_act(&snapshot, Seat::FarmerA, &assignments));
    }

    #[test]
    fn ai_seats_never_act_locally() {
        let assignments = SeatAssignments::default();
        let snapshot = snapshot(Seat::FarmerA, false);
        assert!(!can_act(&snapshot, Seat::FarmerA, &assignments));
    }

    #[test]
    fn game_over_blocks_acting_regardless_of_turn() {
        let assignments = SeatAssignments::default();
        let snapshot = snapshot(Seat::Landlord, true);
        assert!(!can_act(&snapshot, Seat::Landlord, &assignments));
    }

    #[test]
    fn can_pass_requires_the_sentinel() {
        let mut snap = snapshot(Seat::Landlord, false);
        assert!(can_pass(&snap));
        snap.action_space = vec![vec!["♠5".to_string()]];
        assert!(!can_pass(&snap));
        snap.action_space.clear();
        assert!(!can_pass(&snap));
    }
}
