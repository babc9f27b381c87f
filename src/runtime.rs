//! Terminal input for the app loop. The calculator has no timers, so the loop
//! simply blocks until the next key or resize arrives.

use std::sync::mpsc::{self, Receiver};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

/// Keeps key presses and resizes; drops releases, repeats, mouse and focus.
pub fn translate(event: CtEvent) -> Option<AppEvent> {
    match event {
        CtEvent::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    }
}

pub trait EventSource: Send + 'static {
    /// Blocks for the next event; `None` once the source is exhausted.
    fn next_event(&self) -> Option<AppEvent>;
}

/// Reads crossterm events on a background thread.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if let Some(app_event) = translate(ev) {
                        if tx.send(app_event).is_err() {
                            break;
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(%err, "terminal event reader stopped");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn next_event(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }
}

/// Channel-fed source for headless runs.
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn next_event(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }
}

pub struct Runner<E: EventSource> {
    event_source: E,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    /// Next event for the app, or `None` when input has ended.
    pub fn step(&self) -> Option<AppEvent> {
        let event = self.event_source.next_event();
        if event.is_none() {
            tracing::debug!("event source closed");
        }
        event
    }
}
