use doudizhu_core::{
    can_act, can_pass, sorted_tokens, GameSnapshot, Seat, SeatAssignments, SeatKind, SelectionSet,
};

/// Turn marker, per-seat card counts, last plays, and the lifecycle label.
pub fn board(snapshot: &GameSnapshot, assignments: &SeatAssignments, busy: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("state: {}\n", snapshot.state.replace('\n', " | ")));
    for seat in Seat::ALL {
        let marker = if snapshot.current_player == seat { ">" } else { " " };
        let kind = match assignments.kind(seat) {
            SeatKind::Human => "human",
            SeatKind::Ai => "ai",
        };
        let last = snapshot.last_play(seat);
        let last = if last.is_empty() {
            "-".to_string()
        } else {
            last.join(" ")
        };
        out.push_str(&format!(
            "{} {:<9} [{}] {:>2} cards  last: {}\n",
            marker,
            seat.to_string(),
            kind,
            snapshot.hand(seat).len(),
            last
        ));
    }
    if snapshot.game_over {
        if let Some(winner) = snapshot.winner {
            out.push_str(&format!("match over, winner: {}\n", winner));
        }
    } else if busy {
        out.push_str("waiting for server...\n");
    } else if snapshot.has_action_space() && can_act(snapshot, snapshot.current_player, assignments) {
        let pass = if can_pass(snapshot) { ", pass allowed" } else { "" };
        out.push_str(&format!("your turn: {}{}\n", snapshot.current_player, pass));
    }
    out
}

/// One seat's hand in ascending card order with selection marks and toggle
/// indices.
pub fn hand(snapshot: &GameSnapshot, seat: Seat, selection: &SelectionSet) -> String {
    let tokens = snapshot.hand(seat);
    let sorted = sorted_tokens(tokens).unwrap_or_else(|_| tokens.to_vec());
    let mut out = format!("{} hand ({} cards):\n", seat, sorted.len());
    for (index, token) in sorted.iter().enumerate() {
        let mark = if selection.contains(token) { "*" } else { " " };
        out.push_str(&format!("  {mark}[{index:>2}] {token}\n"));
    }
    if !selection.is_empty() {
        out.push_str(&format!("selected: {}\n", selection.members().join(" ")));
    }
    out
}

pub const HELP: &str = "\
commands:
  start          request a new match
  board          show the table
  hand           show your hand with toggle indices
  toggle <n|tok> select or deselect a card (index or token)
  play           submit the selected cards
  pass           pass the turn
  hint           select the server's first playable suggestion
  sync           refetch state over http
  help           this list
  quit           leave
";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn snapshot() -> GameSnapshot {
        let mut hands = BTreeMap::new();
        hands.insert(Seat::Landlord, vec!["2".to_string(), "♠5".to_string()]);
        hands.insert(Seat::FarmerA, vec!["♥6".to_string()]);
        hands.insert(Seat::FarmerB, Vec::new());
        GameSnapshot {
            state: "进行中".to_string(),
            current_player: Seat::Landlord,
            hands,
            last_plays: BTreeMap::new(),
            action_space: vec![vec!["PASS".to_string()]],
            history: Vec::new(),
            game_over: false,
            winner: None,
        }
    }

    #[test]
    fn board_marks_the_current_seat() {
        let text = board(&snapshot(), &SeatAssignments::default(), false);
        assert!(text.contains("> landlord"));
        assert!(text.contains("pass allowed"));
    }

    #[test]
    fn hand_is_rendered_in_card_order() {
        let mut selection = SelectionSet::new();
        selection.toggle("♠5").unwrap();
        let text = hand(&snapshot(), Seat::Landlord, &selection);
        let five = text.find("♠5").unwrap();
        let two = text.find("[ 1] 2").unwrap();
        assert!(five < two, "♠5 must sort before 2:\n{text}");
        assert!(text.contains("*[ 0] ♠5"));
    }
}
