//! Per-frame events handed out of the simulation
//!
//! The step never calls collaborators directly; it returns what happened this
//! frame and the shell forwards sound cues to the audio layer and the final
//! report to whoever owns the session.

/// Named audio cue, fire-and-forget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// The dog barked (every accepted trigger, caught something or not)
    Bark,
    /// Treat power activated
    PowerUp,
    /// Zoomies activated
    SpeedBoost,
    /// Squirrel caught by contact
    CreatureCaught,
    /// Bonus critter caught by contact (rabbit, mailman)
    BonusCatch,
    /// Bird driven off by a bark
    ThreatScared,
    /// A creature made it to the house
    CreatureLaugh,
    /// The skunk got the dog
    SkunkSpray,
}

/// Which hazard ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    SquirrelReachedHouse,
    MailmanReachedHouse,
    BirdReachedHouse,
    SkunkSprayed,
}

/// Final report, emitted exactly once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
    pub score: u32,
    pub cause: GameOverCause,
}

/// Everything one step produced for the outside world
#[derive(Debug, Default)]
pub struct FrameEvents {
    pub cues: Vec<SoundCue>,
    pub session_end: Option<SessionEnd>,
}

impl FrameEvents {
    pub(crate) fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}
