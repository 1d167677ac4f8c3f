/// Outcome of feeding one raw tick to the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// One second elapsed; carries the new remaining-seconds value.
    Tick(u32),
    /// The countdown reached zero. Emitted once; the clock disarms itself
    /// and never reschedules.
    Expired,
}

/// One-second countdown for a test session.
///
/// The clock itself holds no thread; raw ticks arrive from the runtime's
/// tick producer stamped with the generation returned by `start`. Ticks
/// stamped with an older generation are discarded, so a restart can never
/// be mutated by a tick scheduled before the previous session was
/// cancelled.
#[derive(Debug, Default)]
pub struct SessionClock {
    generation: u64,
    remaining: u32,
    armed: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the clock for a fresh countdown and return the generation that
    /// valid ticks must carry.
    pub fn start(&mut self, duration_secs: u32) -> u64 {
        self.generation += 1;
        self.remaining = duration_secs;
        self.armed = true;
        self.generation
    }

    /// Disarm the clock. Safe to call any number of times, with or without
    /// a tick in flight.
    pub fn cancel(&mut self) {
        self.armed = false;
        self.generation += 1;
    }

    /// Feed one raw tick. Returns `None` when the tick is stale or the
    /// clock is disarmed; otherwise decrements remaining by exactly one
    /// second and reports the result.
    pub fn on_tick(&mut self, generation: u64) -> Option<ClockEvent> {
        if !self.armed || generation != self.generation {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.armed = false;
            Some(ClockEvent::Expired)
        } else {
            Some(ClockEvent::Tick(self.remaining))
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_by_one_per_tick() {
        let mut clock = SessionClock::new();
        let gen = clock.start(3);

        assert_eq!(clock.on_tick(gen), Some(ClockEvent::Tick(2)));
        assert_eq!(clock.on_tick(gen), Some(ClockEvent::Tick(1)));
        assert_eq!(clock.remaining(), 1);
    }

    #[test]
    fn expires_at_zero_and_stops() {
        let mut clock = SessionClock::new();
        let gen = clock.start(2);

        assert_eq!(clock.on_tick(gen), Some(ClockEvent::Tick(1)));
        assert_eq!(clock.on_tick(gen), Some(ClockEvent::Expired));
        assert!(!clock.is_armed());

        // No rescheduling: further ticks are swallowed.
        assert_eq!(clock.on_tick(gen), None);
        assert_eq!(clock.on_tick(gen), None);
    }

    #[test]
    fn one_second_duration_expires_immediately() {
        let mut clock = SessionClock::new();
        let gen = clock.start(1);

        assert_eq!(clock.on_tick(gen), Some(ClockEvent::Expired));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut clock = SessionClock::new();
        let gen = clock.start(10);

        clock.cancel();
        clock.cancel();
        clock.cancel();

        assert!(!clock.is_armed());
        assert_eq!(clock.on_tick(gen), None);
    }

    #[test]
    fn cancel_without_start_is_safe() {
        let mut clock = SessionClock::new();
        clock.cancel();
        assert!(!clock.is_armed());
    }

    #[test]
    fn stale_generation_ticks_are_discarded() {
        let mut clock = SessionClock::new();
        let old_gen = clock.start(5);

        clock.cancel();
        let new_gen = clock.start(5);

        // A tick scheduled before the cancel must not touch the new run.
        assert_eq!(clock.on_tick(old_gen), None);
        assert_eq!(clock.remaining(), 5);

        assert_eq!(clock.on_tick(new_gen), Some(ClockEvent::Tick(4)));
    }

    #[test]
    fn restart_without_explicit_cancel_invalidates_old_ticks() {
        let mut clock = SessionClock::new();
        let old_gen = clock.start(5);
        let new_gen = clock.start(5);

        assert_ne!(old_gen, new_gen);
        assert_eq!(clock.on_tick(old_gen), None);
        assert_eq!(clock.on_tick(new_gen), Some(ClockEvent::Tick(4)));
    }
}
