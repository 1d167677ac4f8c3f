use std::sync::mpsc::{self, Receiver, RecvError, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app loop.
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// One second elapsed on the session clock armed with this generation.
    ClockTick(u64),
}

/// Source of app events (keyboard, resize, clock ticks).
pub trait EventSource {
    /// Block until the next event. Err means every producer hung up.
    fn recv(&self) -> Result<AppEvent, RecvError>;
}

/// Production event source: a reader thread forwards crossterm events into
/// the channel that clock threads also feed.
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        let key_tx = tx.clone();
        thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if key_tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if key_tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { tx, rx }
    }

    /// Sender handle for per-session clock threads.
    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

/// Spawn the tick producer for one armed session clock. It sends exactly
/// `duration_secs` generation-stamped ticks, one per second, then exits;
/// ticks that outlive a cancelled session are discarded downstream by the
/// generation check.
pub fn spawn_session_clock(tx: Sender<AppEvent>, generation: u64, duration_secs: u32) {
    thread::spawn(move || {
        for _ in 0..duration_secs {
            thread::sleep(Duration::from_secs(1));
            if tx.send(AppEvent::ClockTick(generation)).is_err() {
                break;
            }
        }
    });
}

/// Test event source fed from a plain channel.
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv(&self) -> Result<AppEvent, RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let source = TestEventSource::new(rx);

        match source.recv() {
            Ok(AppEvent::Resize) => {}
            other => panic!("expected Resize, got {other:?}"),
        }
    }

    #[test]
    fn recv_errors_when_producers_hang_up() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        let source = TestEventSource::new(rx);

        assert!(source.recv().is_err());
    }

    #[test]
    fn clock_thread_sends_stamped_ticks_then_stops() {
        let (tx, rx) = mpsc::channel();

        spawn_session_clock(tx, 7, 2);

        for _ in 0..2 {
            match rx.recv_timeout(Duration::from_secs(3)) {
                Ok(AppEvent::ClockTick(generation)) => assert_eq!(generation, 7),
                other => panic!("expected ClockTick, got {other:?}"),
            }
        }

        // The producer exits after the last tick and the channel closes.
        assert!(rx.recv_timeout(Duration::from_secs(3)).is_err());
    }
}
