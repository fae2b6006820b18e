mod app;
mod logging;
mod render;
mod signals;
mod terminal;

use std::process;

use segclock_config::Launch;
use segclock_core::{ClockState, now};

use crate::app::App;
use crate::signals::Signals;
use crate::terminal::Screen;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    terminal::install_panic_hook();
    logging::init()?;

    let settings = match segclock_config::load(std::env::args_os()) {
        Ok(Launch::Run(settings)) => settings,
        Ok(Launch::Print(text)) => {
            print!("{text}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("segclock: error: {err}.");
            process::exit(1);
        }
    };

    let signals = Signals::register()?;
    let mut screen = Screen::open(settings.tty.as_deref())?;
    let started = now(settings.options.utc);
    let state = ClockState::new(settings.options, screen.size()?, &started);

    let result = App::new(state).run(&mut screen, &signals);
    let restored = screen.restore();
    result?;
    restored?;
    Ok(())
}
