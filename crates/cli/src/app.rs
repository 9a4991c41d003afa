use crate::render;
use doudizhu_core::{
    can_act, hint, sorted_tokens, ActionRequest, GameSnapshot, Notice, NoticeBus, Seat,
    SeatAssignments, SelectionSet, ServerEvent, SessionPhase, StartRequest, SyncController,
};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::info;

/// What a handled command asks the main loop to do.
#[derive(Debug, PartialEq)]
pub enum Outgoing {
    Nothing,
    Start(StartRequest),
    Action(ActionRequest),
    Resync,
    Quit,
}

pub struct App {
    controller: SyncController,
    selections: BTreeMap<Seat, SelectionSet>,
    bus: NoticeBus,
}

impl App {
    pub fn new(assignments: SeatAssignments) -> Self {
        let selections = Seat::ALL
            .into_iter()
            .filter(|seat| assignments.is_human(*seat))
            .map(|seat| (seat, SelectionSet::new()))
            .collect();
        Self {
            controller: SyncController::new(assignments),
            selections,
            bus: NoticeBus::default(),
        }
    }

    pub fn handle_command(&mut self, line: &str) -> Outgoing {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command,
            None => return Outgoing::Nothing,
        };
        let argument = parts.next();
        match command {
            "start" => match self.controller.request_start() {
                Ok(request) => Outgoing::Start(request),
                Err(error) => {
                    println!("{error}");
                    Outgoing::Nothing
                }
            },
            "board" => {
                match self.controller.snapshot() {
                    Some(snapshot) => print!(
                        "{}",
                        render::board(
                            snapshot,
                            self.controller.assignments(),
                            self.controller.is_busy()
                        )
                    ),
                    None => println!("no match yet, try `start`"),
                }
                Outgoing::Nothing
            }
            "hand" => {
                self.show_hand();
                Outgoing::Nothing
            }
            "toggle" => {
                self.toggle(argument);
                Outgoing::Nothing
            }
            "play" => self.play(),
            "pass" => match self.acting_seat() {
                Some(seat) => match self.controller.submit_pass(seat) {
                    Ok(request) => Outgoing::Action(request),
                    Err(error) => {
                        println!("{error}");
                        Outgoing::Nothing
                    }
                },
                None => {
                    println!("not your turn");
                    Outgoing::Nothing
                }
            },
            "hint" => {
                self.hint();
                Outgoing::Nothing
            }
            "sync" => Outgoing::Resync,
            "help" | "?" => {
                print!("{}", render::HELP);
                Outgoing::Nothing
            }
            "quit" | "exit" => Outgoing::Quit,
            other => {
                println!("unknown command: {other} (try `help`)");
                Outgoing::Nothing
            }
        }
    }

    pub fn handle_event(&mut self, event: ServerEvent) {
        self.controller.apply(event, &mut self.bus);
        self.flush_notices();
    }

    pub fn adopt_snapshot(&mut self, snapshot: GameSnapshot) {
        self.controller.adopt(snapshot, &mut self.bus);
        self.flush_notices();
    }

    pub fn start_failed(&mut self, reason: String) {
        self.controller.start_failed(reason, &mut self.bus);
        self.flush_notices();
    }

    pub fn tick(&mut self, now: Instant) {
        if self.controller.expire_stale_submission(now, &mut self.bus) {
            self.flush_notices();
        }
    }

    /// The seat this terminal may currently act for: the current player when
    /// that seat is human-controlled.
    fn acting_seat(&self) -> Option<Seat> {
        let snapshot = self.controller.snapshot()?;
        let seat = snapshot.current_player;
        can_act(snapshot, seat, self.controller.assignments()).then_some(seat)
    }

    fn show_hand(&self) {
        let Some(seat) = self.human_view_seat() else {
            println!("no hand to show");
            return;
        };
        let snapshot = self.controller.snapshot().expect("seat implies snapshot");
        let selection = &self.selections[&seat];
        print!("{}", render::hand(snapshot, seat, selection));
    }

    fn toggle(&mut self, argument: Option<&str>) {
        let Some(argument) = argument else {
            println!("usage: toggle <index|token>");
            return;
        };
        let Some(seat) = self.human_view_seat() else {
            println!("no active hand");
            return;
        };
        let snapshot = self.controller.snapshot().expect("seat implies snapshot");
        let tokens = snapshot.hand(seat);
        let sorted = sorted_tokens(tokens).unwrap_or_else(|_| tokens.to_vec());
        let token = match argument.parse::<usize>() {
            Ok(index) => match sorted.get(index) {
                Some(token) => token.clone(),
                None => {
                    println!("no card at index {index}");
                    return;
                }
            },
            Err(_) => argument.to_string(),
        };
        let selection = self.selections.get_mut(&seat).expect("human seat has a selection");
        match selection.toggle(&token) {
            Ok(true) => println!("selected {token}"),
            Ok(false) => println!("deselected {token}"),
            Err(error) => println!("{error}"),
        }
    }

    fn play(&mut self) -> Outgoing {
        let Some(seat) = self.acting_seat() else {
            println!("not your turn");
            return Outgoing::Nothing;
        };
        let decision = self.selections[&seat].members();
        if decision.is_empty() {
            println!("select cards first (see `hand`, `toggle`)");
            return Outgoing::Nothing;
        }
        match self.controller.submit_play(seat, decision) {
            Ok(request) => {
                // Cleared on submit; a rejection reopens the turn with an
                // empty selection.
                if let Some(selection) = self.selections.get_mut(&seat) {
                    selection.clear();
                }
                Outgoing::Action(request)
            }
            Err(error) => {
                println!("{error}");
                Outgoing::Nothing
            }
        }
    }

    fn hint(&mut self) {
        let Some(seat) = self.acting_seat() else {
            println!("not your turn");
            return;
        };
        let snapshot = self.controller.snapshot().expect("seat implies snapshot");
        match hint::pick(&snapshot.action_space) {
            Some(action) => {
                let action = action.to_vec();
                println!("hint: {}", action.join(" "));
                let selection = self.selections.get_mut(&seat).expect("human seat has a selection");
                if let Err(error) = selection.replace(&action) {
                    println!("{error}");
                }
            }
            None => println!("nothing playable, pass only"),
        }
    }

    /// Seat whose hand is worth showing: the acting seat, else the first
    /// human seat once a snapshot exists.
    fn human_view_seat(&self) -> Option<Seat> {
        if let Some(seat) = self.acting_seat() {
            return Some(seat);
        }
        self.controller.snapshot()?;
        Seat::ALL
            .into_iter()
            .find(|seat| self.controller.assignments().is_human(*seat))
    }

    fn flush_notices(&mut self) {
        let notices: Vec<Notice> = self.bus.drain().collect();
        let mut clear_selections = false;
        for notice in &notices {
            match notice {
                Notice::Connected { message } => info!(%message, "connected"),
                Notice::MatchStarted { current_player } => {
                    clear_selections = true;
                    println!("match started, first turn: {current_player}");
                }
                Notice::MatchUpdated { current_player } => {
                    clear_selections = true;
                    println!("turn: {current_player}");
                }
                Notice::ActionRejected { message } => println!("rejected by server: {message}"),
                Notice::MatchOver { winner } => println!("match over, winner: {winner}"),
                Notice::ServerError { message } => println!("server error: {message}"),
                Notice::StartFailed { reason } => println!("start failed: {reason}"),
                Notice::IgnoredEvent { event } => info!(%event, "ignored out-of-phase event"),
                Notice::SubmissionTimedOut => {
                    println!("no response from server, you may retry")
                }
            }
        }
        // Every snapshot install is a turn boundary.
        if clear_selections {
            for selection in self.selections.values_mut() {
                selection.clear();
            }
            if let Some(snapshot) = self.controller.snapshot() {
                print!(
                    "{}",
                    render::board(snapshot, self.controller.assignments(), self.controller.is_busy())
                );
                if self.acting_seat().is_some() {
                    self.show_hand();
                }
            }
        }
        if self.controller.phase() == SessionPhase::GameOver && !notices.is_empty() {
            println!("type `start` to play again");
        }
    }
}
