//! The event loop.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use segclock_core::{AccentColor, ClockState, Direction, now};
use tracing::{debug, info};

use crate::render::ClockView;
use crate::signals::Signals;
use crate::terminal::Screen;

/// Longest stretch the loop waits without checking the signal flags.
const WAIT_SLICE: Duration = Duration::from_millis(100);

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    state: ClockState,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(state: ClockState) -> Self {
        Self {
            running: true,
            state,
        }
    }

    /// Run the application's main loop.
    ///
    /// Each iteration: check the signal flags, refresh the time, bounce,
    /// draw, then wait for input for at most one tick.
    pub fn run(mut self, screen: &mut Screen, signals: &Signals) -> color_eyre::Result<()> {
        while self.running {
            if signals.terminate_requested() {
                info!("termination requested");
                break;
            }
            if signals.take_resize() {
                let size = screen.reinit()?;
                self.state.resize(size);
            }

            self.state.tick(&self.now());
            self.state.rebound_step();
            screen.draw(|frame| frame.render_widget(ClockView::new(&self.state), frame.area()))?;
            self.handle_crossterm_events(signals)?;
        }
        Ok(())
    }

    /// Reads the crossterm events and updates the state of [`App`].
    ///
    /// Normal mode waits up to one tick for a key. Screensaver mode checks
    /// for a key without waiting and then sleeps the rest of the tick. Both
    /// waits end early once a signal flag is raised.
    fn handle_crossterm_events(&mut self, signals: &Signals) -> color_eyre::Result<()> {
        let delay = self.state.options().tick_delay.as_duration();
        if self.state.options().screensaver {
            let key = poll_key(Duration::ZERO, signals)?;
            let color = self.on_screensaver_key(key);
            if self.running {
                sliced_wait(
                    delay,
                    || signals.pending(),
                    |slice| {
                        thread::sleep(slice);
                        Ok::<_, color_eyre::Report>(false)
                    },
                )?;
                if let Some(color) = color {
                    self.state.set_color(color);
                }
            }
        } else {
            let mut key = None;
            sliced_wait(
                delay,
                || signals.pending(),
                |slice| {
                    key = poll_key(slice, signals)?;
                    Ok::<_, color_eyre::Report>(key.is_some())
                },
            )?;
            if let Some(key) = key {
                self.on_key_event(key);
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        debug!(code = ?key.code, "key");
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c' | 'C')) => self.quit(),
            (_, KeyCode::Up | KeyCode::Char('k' | 'K')) => self.state.nudge(Direction::Up),
            (_, KeyCode::Down | KeyCode::Char('j' | 'J')) => self.state.nudge(Direction::Down),
            (_, KeyCode::Left | KeyCode::Char('h' | 'H')) => self.state.nudge(Direction::Left),
            (_, KeyCode::Right | KeyCode::Char('l' | 'L')) => self.state.nudge(Direction::Right),
            (_, KeyCode::Char('q' | 'Q')) => {
                if !self.state.options().no_quit {
                    self.quit();
                }
            }
            (_, KeyCode::Char('s' | 'S')) => self.state.toggle_seconds(),
            (_, KeyCode::Char('t' | 'T')) => {
                let now = self.now();
                self.state.toggle_time_format(&now);
            }
            (_, KeyCode::Char('c' | 'C')) => {
                let centered = !self.state.options().centered;
                self.state.set_centered(centered);
            }
            (_, KeyCode::Char('b' | 'B')) => self.state.toggle_bold(),
            (_, KeyCode::Char('r' | 'R')) => self.state.toggle_rebound(),
            (_, KeyCode::Char('x' | 'X')) => self.state.toggle_box(),
            (_, KeyCode::Char(c)) => {
                if let Some(color) = AccentColor::from_digit(c) {
                    self.state.set_color(color);
                }
            }
            _ => {}
        }
    }

    /// Screensaver keys: any key quits unless quitting is disabled, in which
    /// case a digit key picks the accent applied after the tick's sleep.
    fn on_screensaver_key(&mut self, key: Option<KeyEvent>) -> Option<AccentColor> {
        let key = key?;
        if is_interrupt(&key) || !self.state.options().no_quit {
            self.quit();
            return None;
        }
        match key.code {
            KeyCode::Char(c) => AccentColor::from_digit(c),
            _ => None,
        }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        now(self.state.options().utc)
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        debug!("quit requested");
        self.running = false;
    }
}

/// Wait up to `timeout` for a key press. Resize events only raise the flag.
fn poll_key(timeout: Duration, signals: &Signals) -> color_eyre::Result<Option<KeyEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        Event::Resize(cols, rows) => {
            debug!(cols, rows, "resize event");
            signals.request_resize();
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// Spend `total` in slices of at most [`WAIT_SLICE`], running `step` on each.
///
/// Stops once `step` reports it is done or, between slices, once
/// `interrupted` holds. `step` always runs at least once.
fn sliced_wait<E>(
    total: Duration,
    interrupted: impl Fn() -> bool,
    mut step: impl FnMut(Duration) -> Result<bool, E>,
) -> Result<(), E> {
    let mut remaining = total;
    loop {
        let slice = remaining.min(WAIT_SLICE);
        if step(slice)? {
            return Ok(());
        }
        remaining -= slice;
        if remaining.is_zero() || interrupted() {
            return Ok(());
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c' | 'C'))
}
