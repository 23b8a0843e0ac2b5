//! Timed player buffs
//!
//! Two slots: the treat power (small speed bump plus free barks) and zoomies
//! from the tennis ball (big speed bump). A slot is active while the session
//! clock is short of its expiry timestamp; expiry needs no per-frame
//! bookkeeping, just the comparison.

use crate::consts::*;

/// Which buff a pickup grants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffKind {
    TreatPower,
    Zoomies,
}

/// Activation and expiry timestamps for both buff slots, session-clock ms
#[derive(Debug, Clone, Copy, Default)]
pub struct BuffState {
    treat_activated: f64,
    treat_expires: f64,
    zoomies_activated: f64,
    zoomies_expires: f64,
}

impl BuffState {
    pub fn activate(&mut self, kind: BuffKind, now: f64) {
        match kind {
            BuffKind::TreatPower => {
                self.treat_activated = now;
                self.treat_expires = now + TREAT_BUFF_MS;
            }
            BuffKind::Zoomies => {
                self.zoomies_activated = now;
                self.zoomies_expires = now + ZOOMIES_MS;
            }
        }
    }

    pub fn treat_active(&self, now: f64) -> bool {
        now < self.treat_expires
    }

    pub fn zoomies_active(&self, now: f64) -> bool {
        now < self.zoomies_expires
    }

    pub fn any_active(&self, now: f64) -> bool {
        self.treat_active(now) || self.zoomies_active(now)
    }

    /// Only one multiplier applies at a time; if both buffs happen to
    /// overlap, the one acquired last wins.
    pub fn speed_multiplier(&self, now: f64) -> f32 {
        match (self.treat_active(now), self.zoomies_active(now)) {
            (true, true) => {
                if self.zoomies_activated >= self.treat_activated {
                    ZOOMIES_SPEED_MULT
                } else {
                    TREAT_SPEED_MULT
                }
            }
            (true, false) => TREAT_SPEED_MULT,
            (false, true) => ZOOMIES_SPEED_MULT,
            (false, false) => 1.0,
        }
    }

    /// Barks cost no cooldown while the treat power is up
    pub fn free_bark(&self, now: f64) -> bool {
        self.treat_active(now)
    }

    /// Remaining time of the longest-lived active buff, for the HUD
    pub fn remaining_ms(&self, now: f64) -> f64 {
        let treat = (self.treat_expires - now).max(0.0);
        let zoomies = (self.zoomies_expires - now).max(0.0);
        treat.max(zoomies)
    }
}
