use crate::{GameSnapshot, Seat, SeatAssignments};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed server frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}

/// Server pushes, tagged with the original event names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "connected")]
    Connected {
        #[serde(default)]
        message: String,
    },
    #[serde(rename = "game_started")]
    GameStarted(GameSnapshot),
    #[serde(rename = "game_updated")]
    GameUpdated(GameSnapshot),
    #[serde(rename = "action_failed")]
    ActionFailed {
        #[serde(default)]
        player: Option<Seat>,
        message: String,
        #[serde(default)]
        decision: Vec<String>,
    },
    #[serde(rename = "game_over")]
    GameOver {
        winner: Seat,
        /// Revealed hands at match end.
        #[serde(default)]
        hands: BTreeMap<Seat, Vec<String>>,
    },
    #[serde(rename = "error")]
    ServerError { message: String },
}

impl ServerEvent {
    pub fn from_json(text: &str) -> Result<ServerEvent, ProtocolError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected { .. } => "connected",
            ServerEvent::GameStarted(_) => "game_started",
            ServerEvent::GameUpdated(_) => "game_updated",
            ServerEvent::ActionFailed { .. } => "action_failed",
            ServerEvent::GameOver { .. } => "game_over",
            ServerEvent::ServerError { .. } => "error",
        }
    }
}

/// Outbound play/pass intent; decision is card tokens or the PASS sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionRequest {
    pub player: Seat,
    pub decision: Vec<String>,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    event: &'a str,
    data: &'a T,
}

impl ActionRequest {
    pub fn to_frame(&self) -> String {
        serde_json::to_string(&Envelope {
            event: "player_action",
            data: self,
        })
        .expect("action request always serializes")
    }
}

/// Body of the HTTP start trigger (`POST /api/start_game`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StartRequest {
    pub player_types: SeatAssignments,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartResponse {
    pub success: bool,
    #[serde(default)]
    pub state: Option<GameSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeatKind;

    #[test]
    fn decodes_each_wire_event() {
        let connected = ServerEvent::from_json(r#"{"event":"connected","data":{"message":"连接成功"}}"#).unwrap();
        assert_eq!(connected.name(), "connected");

        let failed = ServerEvent::from_json(
            r#"{"event":"action_failed","data":{"player":"地主","message":"出牌不符合规则","decision":["♠3"]}}"#,
        )
        .unwrap();
        match failed {
            ServerEvent::ActionFailed { player, message, decision } => {
                assert_eq!(player, Some(Seat::Landlord));
                assert_eq!(message, "出牌不符合规则");
                assert_eq!(decision, ["♠3"]);
            }
            other => panic!("unexpected event {other:?}"),
        }

        let over = ServerEvent::from_json(r#"{"event":"game_over","data":{"winner":"农民甲"}}"#).unwrap();
        assert_eq!(over.name(), "game_over");

        let snapshot = r#"{
            "state": "进行中",
            "current_player": "地主",
            "hands": {"地主": ["♠3"], "农民甲": [], "农民乙": []},
            "action_space": [["PASS"]],
            "game_over": false
        }"#;
        let started =
            ServerEvent::from_json(&format!(r#"{{"event":"game_started","data":{snapshot}}}"#))
                .unwrap();
        match &started {
            ServerEvent::GameStarted(state) => {
                assert_eq!(state.current_player, Seat::Landlord);
                assert_eq!(state.hand(Seat::Landlord), ["♠3"]);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(started.name(), "game_started");

        let updated =
            ServerEvent::from_json(&format!(r#"{{"event":"game_updated","data":{snapshot}}}"#))
                .unwrap();
        assert_eq!(updated.name(), "game_updated");

        let error = ServerEvent::from_json(r#"{"event":"error","data":{"message":"游戏未开始或已结束"}}"#)
            .unwrap();
        match &error {
            ServerEvent::ServerError { message } => assert_eq!(message, "游戏未开始或已结束"),
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(error.name(), "error");
    }

    #[test]
    fn malformed_frames_are_protocol_errors() {
        assert!(ServerEvent::from_json("not json").is_err());
        assert!(ServerEvent::from_json(r#"{"event":"no_such_event","data":{}}"#).is_err());
        // Snapshot missing required fields must not decode partially.
        assert!(ServerEvent::from_json(r#"{"event":"game_updated","data":{"state":"x"}}"#).is_err());
    }

    #[test]
    fn action_request_frames_match_the_wire() {
        let request = ActionRequest {
            player: Seat::Landlord,
            decision: vec!["♠5".to_string()],
        };
        let frame: serde_json::Value = serde_json::from_str(&request.to_frame()).unwrap();
        assert_eq!(frame["event"], "player_action");
        assert_eq!(frame["data"]["player"], "地主");
        assert_eq!(frame["data"]["decision"][0], "♠5");
    }

    #[test]
    fn start_request_body_matches_the_wire() {
        let request = StartRequest {
            player_types: SeatAssignments::new(SeatKind::Human, SeatKind::Ai, SeatKind::Ai),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["player_types"]["地主"], "human");
        assert_eq!(body["player_types"]["农民乙"], "ai");
    }
}
