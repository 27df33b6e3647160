use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    CatFact,
    Trivia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDecision {
    Respond(Domain),
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub turn_count: u32,
    pub turn_limit: u32,
    pub input_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct TurnController {
    state: SessionState,
}

impl TurnController {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, min_turns: u32, max_turns: u32) -> Self {
        Self::with_limit(draw_turn_limit(rng, min_turns, max_turns))
    }

    pub fn with_limit(turn_limit: u32) -> Self {
        Self {
            state: SessionState {
                turn_count: 0,
                turn_limit: turn_limit.max(1),
                input_enabled: true,
            },
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.input_enabled {
            Phase::Active
        } else {
            Phase::Terminated
        }
    }

    pub fn register_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<TurnDecision> {
        if self.phase() == Phase::Terminated {
            return None;
        }

        self.state.turn_count += 1;
        if self.state.turn_count >= self.state.turn_limit {
            self.state.input_enabled = false;
            return Some(TurnDecision::Terminate);
        }

        let domain = if rng.gen_bool(0.5) {
            Domain::CatFact
        } else {
            Domain::Trivia
        };
        Some(TurnDecision::Respond(domain))
    }
}

pub fn draw_turn_limit<R: Rng + ?Sized>(rng: &mut R, min_turns: u32, max_turns: u32) -> u32 {
    let min_turns = min_turns.max(1);
    let max_turns = max_turns.max(min_turns);
    rng.gen_range(min_turns..=max_turns)
}
