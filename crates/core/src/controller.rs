use crate::{
    can_act, can_pass, ActionRequest, GameSnapshot, Seat, SeatAssignments, ServerEvent,
    StartRequest, PASS_TOKEN,
};
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long one outstanding submission may wait before the busy flag is
/// forcibly cleared.
pub const SUBMISSION_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AwaitingStart,
    InPlay,
    GameOver,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("a start request is already pending")]
    StartPending,
    #[error("a match is already running")]
    MatchRunning,
    #[error("at least one seat must be human")]
    NoHumanSeat,
    #[error("no active match")]
    GameNotActive,
    #[error("not {0}'s turn")]
    NotYourTurn(Seat),
    #[error("seat {0} is not human-controlled")]
    SeatNotHuman(Seat),
    #[error("a submission is already pending")]
    SubmissionPending,
    #[error("no cards selected")]
    EmptyDecision,
    #[error("passing is not allowed right now")]
    PassNotAllowed,
}

/// User-visible outcomes of inbound events, drained by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Connected { message: String },
    MatchStarted { current_player: Seat },
    MatchUpdated { current_player: Seat },
    ActionRejected { message: String },
    MatchOver { winner: Seat },
    ServerError { message: String },
    StartFailed { reason: String },
    /// Out-of-phase event; the held snapshot was kept as-is.
    IgnoredEvent { event: &'static str },
    SubmissionTimedOut,
}

#[derive(Debug, Default)]
pub struct NoticeBus {
    queue: Vec<Notice>,
}

impl NoticeBus {
    pub fn push(&mut self, notice: Notice) {
        self.queue.push(notice);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Notice> + '_ {
        self.queue.drain(..)
    }
}

/// The one writer of match state on the client. Submission methods return
/// the wire request for the transport to send; resolution arrives later as
/// an inbound event, gated by a single busy flag.
#[derive(Debug)]
pub struct SyncController {
    assignments: SeatAssignments,
    phase: SessionPhase,
    snapshot: Option<GameSnapshot>,
    busy: bool,
    busy_since: Option<Instant>,
    resume_phase: SessionPhase,
}

impl SyncController {
    pub fn new(assignments: SeatAssignments) -> Self {
        Self {
            assignments,
            phase: SessionPhase::Idle,
            snapshot: None,
            busy: false,
            busy_since: None,
            resume_phase: SessionPhase::Idle,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn assignments(&self) -> &SeatAssignments {
        &self.assignments
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn winner(&self) -> Option<Seat> {
        self.snapshot.as_ref().and_then(|snapshot| snapshot.winner)
    }

    /// Legal only between matches; busy until a snapshot or an HTTP failure
    /// resolves it.
    pub fn request_start(&mut self) -> Result<StartRequest, ControllerError> {
        if self.busy {
            return Err(ControllerError::StartPending);
        }
        match self.phase {
            SessionPhase::Idle | SessionPhase::GameOver => {}
            SessionPhase::AwaitingStart => return Err(ControllerError::StartPending),
            SessionPhase::InPlay => return Err(ControllerError::MatchRunning),
        }
        if self.assignments.human_count() == 0 {
            return Err(ControllerError::NoHumanSeat);
        }
        self.resume_phase = self.phase;
        self.phase = SessionPhase::AwaitingStart;
        self.set_busy();
        Ok(StartRequest {
            player_types: self.assignments.clone(),
        })
    }

    /// Restores the pre-start phase so the seat is not stranded in
    /// AwaitingStart.
    pub fn start_failed(&mut self, reason: String, bus: &mut NoticeBus) {
        if self.phase == SessionPhase::AwaitingStart {
            self.phase = self.resume_phase;
        }
        self.clear_busy();
        bus.push(Notice::StartFailed { reason });
    }

    pub fn submit_play(
        &mut self,
        seat: Seat,
        decision: Vec<String>,
    ) -> Result<ActionRequest, ControllerError> {
        if decision.is_empty() {
            return Err(ControllerError::EmptyDecision);
        }
        self.check_submission(seat)?;
        self.set_busy();
        Ok(ActionRequest {
            player: seat,
            decision,
        })
    }

    pub fn submit_pass(&mut self, seat: Seat) -> Result<ActionRequest, ControllerError> {
        self.check_submission(seat)?;
        let snapshot = self.snapshot.as_ref().ok_or(ControllerError::GameNotActive)?;
        if !can_pass(snapshot) {
            return Err(ControllerError::PassNotAllowed);
        }
        self.set_busy();
        Ok(ActionRequest {
            player: seat,
            decision: vec![PASS_TOKEN.to_string()],
        })
    }

    fn check_submission(&self, seat: Seat) -> Result<(), ControllerError> {
        if self.phase != SessionPhase::InPlay {
            return Err(ControllerError::GameNotActive);
        }
        let snapshot = self.snapshot.as_ref().ok_or(ControllerError::GameNotActive)?;
        if self.busy {
            return Err(ControllerError::SubmissionPending);
        }
        if !self.assignments.is_human(seat) {
            return Err(ControllerError::SeatNotHuman(seat));
        }
        if !can_act(snapshot, seat, &self.assignments) {
            return Err(ControllerError::NotYourTurn(seat));
        }
        Ok(())
    }

    /// Apply one pushed event to completion. Out-of-phase events surface as
    /// `IgnoredEvent` and leave the held snapshot untouched.
    pub fn apply(&mut self, event: ServerEvent, bus: &mut NoticeBus) {
        match event {
            ServerEvent::Connected { message } => {
                bus.push(Notice::Connected { message });
            }
            // The server broadcasts the start, so this is accepted even when
            // another seat triggered it.
            ServerEvent::GameStarted(snapshot) => {
                let current_player = snapshot.current_player;
                self.snapshot = Some(snapshot);
                self.phase = SessionPhase::InPlay;
                self.clear_busy();
                bus.push(Notice::MatchStarted { current_player });
            }
            ServerEvent::GameUpdated(snapshot) => {
                if self.phase != SessionPhase::InPlay {
                    bus.push(Notice::IgnoredEvent { event: "game_updated" });
                    return;
                }
                let current_player = snapshot.current_player;
                self.snapshot = Some(snapshot);
                self.clear_busy();
                bus.push(Notice::MatchUpdated { current_player });
            }
            ServerEvent::ActionFailed { message, .. } => {
                if self.phase != SessionPhase::InPlay {
                    bus.push(Notice::IgnoredEvent { event: "action_failed" });
                    return;
                }
                // Prior snapshot stays authoritative; the turn reopens.
                self.clear_busy();
                bus.push(Notice::ActionRejected { message });
            }
            ServerEvent::GameOver { winner, hands } => {
                match self.phase {
                    SessionPhase::InPlay | SessionPhase::AwaitingStart => {}
                    _ => {
                        bus.push(Notice::IgnoredEvent { event: "game_over" });
                        return;
                    }
                }
                if let Some(snapshot) = self.snapshot.as_mut() {
                    snapshot.game_over = true;
                    snapshot.winner = Some(winner);
                    snapshot.action_space.clear();
                    if !hands.is_empty() {
                        snapshot.hands = hands;
                    }
                }
                self.phase = SessionPhase::GameOver;
                self.clear_busy();
                bus.push(Notice::MatchOver { winner });
            }
            ServerEvent::ServerError { message } => {
                self.clear_busy();
                bus.push(Notice::ServerError { message });
            }
        }
    }

    /// Adopt a snapshot fetched out-of-band (`GET /api/game_state`); valid
    /// from any phase.
    pub fn adopt(&mut self, snapshot: GameSnapshot, bus: &mut NoticeBus) {
        let current_player = snapshot.current_player;
        let over = snapshot.game_over;
        let winner = snapshot.winner;
        self.snapshot = Some(snapshot);
        self.clear_busy();
        if over {
            self.phase = SessionPhase::GameOver;
            if let Some(winner) = winner {
                bus.push(Notice::MatchOver { winner });
            }
        } else {
            self.phase = SessionPhase::InPlay;
            bus.push(Notice::MatchUpdated { current_player });
        }
    }

    /// Revert a submission whose response never came; driven from a timer
    /// tick. Returns true when the busy flag was actually cleared.
    pub fn expire_stale_submission(&mut self, now: Instant, bus: &mut NoticeBus) -> bool {
        let Some(since) = self.busy_since else {
            return false;
        };
        if self.phase != SessionPhase::InPlay || now.duration_since(since) < SUBMISSION_TIMEOUT {
            return false;
        }
        self.clear_busy();
        bus.push(Notice::SubmissionTimedOut);
        true
    }

    fn set_busy(&mut self) {
        self.busy = true;
        self.busy_since = Some(Instant::now());
    }

    fn clear_busy(&mut self) {
        self.busy = false;
        self.busy_since = None;
    }
}
