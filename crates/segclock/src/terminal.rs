//! Terminal surface: raw mode, alternate screen and teardown.
//!
//! The clock draws either on the controlling terminal or on a device given
//! with `-T`. Keyboard input always comes from the controlling terminal.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;

use color_eyre::eyre::WrapErr;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};
use segclock_core::TermSize;
use tracing::{debug, info};

type Backend = CrosstermBackend<Box<dyn Write>>;

/// Second handle on the `-T` device so the panic hook can restore it too.
static PANIC_DEVICE: OnceLock<File> = OnceLock::new();

/// The terminal the clock draws on. Restored exactly once, at the latest on
/// drop.
pub struct Screen {
    terminal: Terminal<Backend>,
    /// Alternate device, kept open for size queries.
    device: Option<File>,
    restored: bool,
}

impl Screen {
    /// Take over the controlling terminal, or the device at `tty`.
    pub fn open(tty: Option<&Path>) -> color_eyre::Result<Self> {
        let device = tty
            .map(|path| {
                OpenOptions::new()
                    .read(true)
                    .write(true)
                    .open(path)
                    .wrap_err_with(|| format!("'{}' couldn't be opened", path.display()))
            })
            .transpose()?;
        let writer: Box<dyn Write> = match &device {
            Some(file) => Box::new(file.try_clone()?),
            None => Box::new(io::stdout()),
        };
        if let Some(file) = &device {
            let _ = PANIC_DEVICE.set(file.try_clone()?);
        }
        let size = surface_size(device.as_ref())?;

        enable_raw_mode()?;
        let setup = || -> io::Result<Terminal<Backend>> {
            let mut backend = CrosstermBackend::new(writer);
            execute!(backend, EnterAlternateScreen, Hide)?;
            Terminal::with_options(
                backend,
                TerminalOptions {
                    viewport: Viewport::Fixed(size.area()),
                },
            )
        };
        let terminal = match setup() {
            Ok(terminal) => terminal,
            Err(err) => {
                restore_best_effort();
                return Err(err.into());
            }
        };

        info!(rows = size.rows, cols = size.cols, device = ?tty, "terminal ready");
        Ok(Self {
            terminal,
            device,
            restored: false,
        })
    }

    pub fn size(&self) -> io::Result<TermSize> {
        surface_size(self.device.as_ref())
    }

    /// Re-read the terminal size and rebuild the drawing surface.
    pub fn reinit(&mut self) -> io::Result<TermSize> {
        let size = self.size()?;
        self.terminal.resize(size.area())?;
        self.terminal.clear()?;
        debug!(rows = size.rows, cols = size.cols, "surface reinitialized");
        Ok(size)
    }

    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Leave raw mode and the alternate screen. Later calls do nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let raw = disable_raw_mode();
        let screen = leave_screen(self.terminal.backend_mut());
        debug!("terminal restored");
        raw.and(screen)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Restore the controlling terminal before a panic report is printed, then
/// exit with failure.
pub fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_best_effort();
        hook(info);
        std::process::exit(1);
    }));
}

fn restore_best_effort() {
    let _ = disable_raw_mode();
    let _ = leave_screen(&mut io::stdout());
    if let Some(mut device) = PANIC_DEVICE.get() {
        let _ = leave_screen(&mut device);
    }
}

fn leave_screen(writer: &mut impl Write) -> io::Result<()> {
    execute!(writer, LeaveAlternateScreen, Show)
}

fn surface_size(device: Option<&File>) -> io::Result<TermSize> {
    match device {
        Some(file) => device_size(file),
        None => {
            let (cols, rows) = crossterm::terminal::size()?;
            Ok(TermSize::new(cols, rows))
        }
    }
}

/// Query the size of a terminal device via `ioctl(TIOCGWINSZ)`.
#[cfg(unix)]
fn device_size(file: &File) -> io::Result<TermSize> {
    use std::os::fd::AsRawFd;

    // SAFETY: winsize is a plain C struct of integers, all-zero is valid.
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    // SAFETY: the fd is open for the lifetime of `file` and TIOCGWINSZ only
    // writes a winsize into `ws`.
    let result = unsafe { libc::ioctl(file.as_raw_fd(), libc::TIOCGWINSZ, &mut ws) };
    if result != 0 {
        return Err(io::Error::last_os_error());
    }
    if ws.ws_col == 0 || ws.ws_row == 0 {
        return Err(io::Error::other("terminal device reports no size"));
    }
    Ok(TermSize::new(ws.ws_col, ws.ws_row))
}

#[cfg(not(unix))]
fn device_size(_file: &File) -> io::Result<TermSize> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "terminal devices are only supported on unix",
    ))
}
