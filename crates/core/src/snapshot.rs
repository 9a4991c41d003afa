use crate::Seat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel the server places in the action space when passing is legal.
pub const PASS_TOKEN: &str = "PASS";

pub fn is_pass(action: &[String]) -> bool {
    action.len() == 1 && action[0] == PASS_TOKEN
}

/// Match state as broadcast by the server; replaced wholesale on every
/// update, never merged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    /// Free-text lifecycle label.
    pub state: String,
    pub current_player: Seat,
    pub hands: BTreeMap<Seat, Vec<String>>,
    #[serde(default)]
    pub last_plays: BTreeMap<Seat, Vec<String>>,
    /// Empty until the first turn resolves.
    #[serde(default)]
    pub action_space: Vec<Vec<String>>,
    #[serde(default)]
    pub history: Vec<String>,
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<Seat>,
}

impl GameSnapshot {
    pub fn hand(&self, seat: Seat) -> &[String] {
        self.hands.get(&seat).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn last_play(&self, seat: Seat) -> &[String] {
        self.last_plays.get(&seat).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_action_space(&self) -> bool {
        !self.action_space.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_json() -> serde_json::Value {
        serde_json::json!({
            "state": "底牌为：['3', '4', 'K']",
            "current_player": "地主",
            "hands": {
                "地主": ["♠3", "♠4"],
                "农民甲": ["♥5"],
                "农民乙": ["♦6"]
            },
            "action_space": [["PASS"], ["♠3"]],
            "game_over": false
        })
    }

    #[test]
    fn decodes_server_payload_with_defaults() {
        let snapshot: GameSnapshot = serde_json::from_value(snapshot_json()).unwrap();
        assert_eq!(snapshot.current_player, Seat::Landlord);
        assert_eq!(snapshot.hand(Seat::Landlord), ["♠3", "♠4"]);
        assert!(snapshot.last_play(Seat::FarmerA).is_empty());
        assert!(snapshot.history.is_empty());
        assert_eq!(snapshot.winner, None);
        assert!(snapshot.has_action_space());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let mut payload = snapshot_json();
        payload.as_object_mut().unwrap().remove("current_player");
        assert!(serde_json::from_value::<GameSnapshot>(payload).is_err());
    }

    #[test]
    fn recognizes_only_the_single_pass_sentinel() {
        assert!(is_pass(&["PASS".to_string()]));
        assert!(!is_pass(&["PASS".to_string(), "♠3".to_string()]));
        assert!(!is_pass(&["♠3".to_string()]));
        assert!(!is_pass(&[]));
    }
}
