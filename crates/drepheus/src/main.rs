use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use clap::Parser;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use drepheus_config::{Config, RainConfig};
use drepheus_core::ColorTheme;
use drepheus_rain::{RainAnimator, RainSettings, Viewport};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Position, Rect},
};

mod cli;
mod gate;
mod logging;
mod screens;
mod terminal;

use cli::Cli;
use gate::{GateOutcome, PasswordGate};
use terminal::TerminalSession;

/// Most frames replayed at once after the loop stalls (suspend, slow draw).
const MAX_CATCH_UP_FRAMES: u32 = 8;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _log_guard = logging::init();
    let config = cli.load_config()?;
    tracing::info!(word = %config.rain.word, seed = ?cli.seed, "starting drepheus");

    let exit = {
        let mut session = TerminalSession::start()?;
        let size = session.terminal().size()?;
        let viewport = Viewport::cells(size.width, size.height);
        App::new(&config, viewport, cli.seed).run(session.terminal())?
    };

    if let Exit::Granted(url) = exit {
        println!("ACCESS GRANTED");
        println!("{url}");
    }
    Ok(())
}

/// Rain settings for the configured rain section.
fn rain_settings(config: &RainConfig) -> RainSettings {
    RainSettings {
        word: config.word.clone(),
        speed: config.speed,
        glyphs: config.glyphs,
        fade_alpha: config.fade_alpha,
        lock_chance: config.lock_chance,
        glow_chance: config.glow_chance,
        glow_decay: config.glow_decay,
        max_restart_gap: config.max_restart_gap,
        ..RainSettings::default()
    }
}

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Landing,
    Portal,
    Prompt,
}

/// How the application ended.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Exit {
    Quit,
    Granted(String),
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    screen: Screen,
    /// Landing rain; dropped once the user enters.
    rain: Option<RainAnimator<StdRng>>,
    /// Set by the rain's enter callback.
    entered: Rc<Cell<bool>>,
    gate: PasswordGate,
    theme: ColorTheme,
    frame_interval: Duration,
    /// When the last frame callback was due.
    last_frame: Instant,
    /// Terminal area as of the last draw, for mouse hit-testing.
    area: Rect,
    exit: Exit,
}

impl App {
    /// Construct a new instance of [`App`].
    fn new(config: &Config, viewport: Viewport, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut rain = RainAnimator::new(
            viewport,
            rain_settings(&config.rain),
            config.rain.theme,
            rng,
        );
        let entered = Rc::new(Cell::new(false));
        let flag = Rc::clone(&entered);
        rain.on_enter(move || flag.set(true));

        Self {
            running: false,
            screen: Screen::Landing,
            rain: Some(rain),
            entered,
            gate: PasswordGate::new(
                config.portal.password.clone(),
                config.portal.invite_url.clone(),
                config.denied_for(),
            ),
            theme: config.rain.theme,
            frame_interval: config.frame_interval(),
            last_frame: Instant::now(),
            area: Rect::new(0, 0, viewport.width as u16, viewport.height as u16),
            exit: Exit::Quit,
        }
    }

    /// Run the application's main loop.
    fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<Exit> {
        self.running = true;
        while self.running {
            self.on_frame(Instant::now());
            terminal.draw(|frame| self.render(frame))?;
            let timeout = self.until_next_frame(Instant::now());
            self.handle_crossterm_events(timeout)?;
        }
        tracing::info!(exit = ?self.exit, "leaving drepheus");
        Ok(self.exit)
    }

    /// Issue one rain frame callback per whole frame interval elapsed since
    /// the last one, and expire the denial message. Returns the number of
    /// frames issued.
    fn on_frame(&mut self, now: Instant) -> u32 {
        if self.gate.expire(now) {
            tracing::debug!("denial window closed");
        }

        let elapsed = now.saturating_duration_since(self.last_frame);
        let due = (elapsed.as_nanos() / self.frame_interval.as_nanos().max(1)) as u64;
        if due == 0 {
            return 0;
        }
        let frames = due.min(u64::from(MAX_CATCH_UP_FRAMES)) as u32;
        if due > u64::from(MAX_CATCH_UP_FRAMES) {
            tracing::debug!(due, "frame loop fell behind, skipping ahead");
            self.last_frame = now;
        } else {
            self.last_frame += self.frame_interval * frames;
        }

        if let Some(rain) = &mut self.rain {
            for _ in 0..frames {
                rain.frame();
            }
        }
        frames
    }

    /// Time left until the next frame is due.
    fn until_next_frame(&self, now: Instant) -> Duration {
        (self.last_frame + self.frame_interval).saturating_duration_since(now)
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        self.area = frame.area();
        match self.screen {
            Screen::Landing => {
                if let Some(rain) = &mut self.rain {
                    rain.render(frame);
                }
                screens::render_landing_hint(frame, self.theme);
            }
            Screen::Portal => screens::render_portal(frame, self.theme),
            Screen::Prompt => {
                screens::render_portal(frame, self.theme);
                let denied = self.gate.is_denied(Instant::now());
                screens::render_prompt(frame, self.theme, self.gate.input_len(), denied);
            }
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout`, the time left until the next frame.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => {
                    self.area = Rect::new(0, 0, width, height);
                    if let Some(rain) = &mut self.rain {
                        rain.resize(Viewport::cells(width, height));
                    }
                }
                _ => {}
            }
        }
        self.unmount_landing();
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if let (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) =
            (key.modifiers, key.code)
        {
            self.quit();
            return;
        }

        match self.screen {
            Screen::Landing => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                KeyCode::Enter | KeyCode::Char(' ') => self.enter(),
                KeyCode::Char('c') => self.cycle_color_theme(),
                KeyCode::Char('s') => self.cycle_speed(),
                _ => {}
            },
            Screen::Portal => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.quit(),
                KeyCode::Enter | KeyCode::Char(' ') => self.open_prompt(),
                KeyCode::Char('c') => self.cycle_color_theme(),
                _ => {}
            },
            Screen::Prompt => match key.code {
                KeyCode::Esc => self.close_prompt(),
                KeyCode::Enter => self.submit_password(Instant::now()),
                KeyCode::Backspace => self.gate.pop(),
                KeyCode::Char(c) => self.gate.push(c),
                _ => {}
            },
        }
    }

    /// A click anywhere enters from the landing screen; on the portal only
    /// the button opens the prompt.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        match self.screen {
            Screen::Landing => self.enter(),
            Screen::Portal if screens::portal_button_area(self.area).contains(position) => {
                self.open_prompt()
            }
            Screen::Portal | Screen::Prompt => {}
        }
    }

    /// Ask the rain to fire its enter callback.
    fn enter(&mut self) {
        if let Some(rain) = &mut self.rain {
            rain.enter();
        }
    }

    /// Swap the rain out for the portal once the callback has fired.
    fn unmount_landing(&mut self) {
        if self.entered.get() && self.screen == Screen::Landing {
            self.rain = None;
            self.screen = Screen::Portal;
            tracing::info!("entered portal");
        }
    }

    fn open_prompt(&mut self) {
        self.gate.reset();
        self.screen = Screen::Prompt;
    }

    fn close_prompt(&mut self) {
        self.gate.reset();
        self.screen = Screen::Portal;
    }

    fn submit_password(&mut self, now: Instant) {
        if let GateOutcome::Granted(url) = self.gate.submit(now) {
            self.exit = Exit::Granted(url);
            self.quit();
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.theme = self.theme.next();
        if let Some(rain) = &mut self.rain {
            rain.set_theme(self.theme);
        }
    }

    /// Cycle through rain speeds.
    fn cycle_speed(&mut self) {
        if let Some(rain) = &mut self.rain {
            rain.set_speed(rain.speed().next());
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
