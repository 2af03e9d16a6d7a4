use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
};
use dimen6_config::Config;
use dimen6_core::{ColorTheme, SurfaceSize};
use dimen6_particles::Animator;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

mod contact;
mod debounce;
mod logging;
mod showcase;
mod wizard;

use contact::ContactSender;
use debounce::Debouncer;
use showcase::{Counter, Loader, Marquee};
use wizard::{Channel, ContactWizard, WizardAction, WizardView, render_wizard};

/// Longest wait for terminal events when nothing is scheduled sooner.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Hero reveal delay when the loading screen is turned off.
const REVEAL_DELAY: Duration = Duration::from_millis(200);

/// Counter refresh while any counter is still moving.
const COUNTER_POLL: Duration = Duration::from_millis(16);

const TITLE: &str = "D I M E N 6";
const TAGLINE: &str = "Digital experiences built in six dimensions";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;
    let config = load_config();

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableFocusChange)
        .map_err(color_eyre::Report::from)
        .and_then(|()| App::new(config, Instant::now()).run(terminal));
    let _ = execute!(io::stdout(), DisableFocusChange);
    ratatui::restore();
    result
}

/// Load the user configuration, falling back to defaults when it is unusable.
fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "could not load config, using defaults");
            Config::default()
        }
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Current color theme.
    theme: ColorTheme,
    /// Particle background, absent when there is no surface to draw on.
    animator: Option<Animator>,
    /// Terminal size from the latest resize burst.
    resize: Debouncer<(u16, u16)>,
    /// Does the terminal have focus?
    focused: bool,
    /// Paused from the keyboard.
    paused: bool,
    loader: Option<Loader>,
    /// When the hero should appear if there is no loader.
    reveal_at: Option<Instant>,
    revealed_at: Option<Instant>,
    started_at: Instant,
    counters: Vec<Counter>,
    marquee: Marquee,
    wizard: Option<ContactWizard>,
    sender: ContactSender,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, now: Instant) -> Self {
        let (loader, reveal_at) = if config.display.loader {
            (Some(Loader::new(now)), None)
        } else {
            (None, Some(now + REVEAL_DELAY))
        };
        let sender = ContactSender::new(
            config.contact.endpoint.clone(),
            Duration::from_secs(config.contact.timeout_secs),
        );

        Self {
            running: false,
            theme: config.display.theme,
            animator: None,
            resize: Debouncer::new(Duration::from_millis(config.display.resize_debounce_ms)),
            focused: true,
            paused: false,
            loader,
            reveal_at,
            revealed_at: None,
            started_at: now,
            counters: config.showcase.stats.iter().map(Counter::new).collect(),
            marquee: Marquee::new(&config.showcase.marquee),
            wizard: None,
            sender,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let surface = self.surface_for(size.width, size.height);
        self.init_particles(surface, Instant::now());

        self.running = true;
        while self.running {
            let now = Instant::now();
            self.update(now);
            terminal.draw(|frame| self.render(frame, now))?;
            let timeout = self.poll_timeout(Instant::now());
            self.handle_crossterm_events(timeout)?;
        }
        Ok(())
    }

    /// Create the particle background for `surface` and start it.
    fn init_particles(&mut self, surface: SurfaceSize, now: Instant) {
        if !self.config.display.particles {
            return;
        }
        self.animator = Animator::new(surface, self.config.particles.clone());
        match &self.animator {
            Some(animator) => tracing::info!(
                width = surface.width,
                height = surface.height,
                particles = animator.field().len(),
                "particle field ready"
            ),
            None => tracing::info!("no drawing surface, particle field disabled"),
        }
        self.sync_animation(now);
    }

    /// Pixel surface for a terminal of `columns` by `rows` cells.
    fn surface_for(&self, columns: u16, rows: u16) -> SurfaceSize {
        let (pixel_width, pixel_height) = crossterm::terminal::window_size()
            .map(|size| (size.width, size.height))
            .unwrap_or((0, 0));
        SurfaceSize::from_terminal(
            columns,
            rows,
            pixel_width,
            pixel_height,
            self.config.display.cell_width,
            self.config.display.cell_height,
        )
    }

    /// Advance everything that is due at `now`.
    fn update(&mut self, now: Instant) {
        if let Some((columns, rows)) = self.resize.poll(now) {
            let surface = self.surface_for(columns, rows);
            self.apply_resize(surface, now);
        }

        if let Some(animator) = &mut self.animator {
            animator.tick(now);
        }

        let loader_done = self
            .loader
            .as_mut()
            .is_some_and(|loader| loader.tick(now, &mut rand::thread_rng()));
        if loader_done || self.reveal_at.is_some_and(|at| now >= at) {
            self.reveal(now);
        }
    }

    /// Rebuild the particle field for a new surface.
    fn apply_resize(&mut self, surface: SurfaceSize, now: Instant) {
        match &mut self.animator {
            Some(animator) => {
                animator.resize(surface);
                tracing::debug!(
                    width = surface.width,
                    height = surface.height,
                    particles = animator.field().len(),
                    "particle field resized"
                );
            }
            None => self.init_particles(surface, now),
        }
    }

    /// Show the hero and start the counters.
    fn reveal(&mut self, now: Instant) {
        self.reveal_at = None;
        if self.revealed_at.is_some() {
            return;
        }
        self.revealed_at = Some(now);
        for counter in &mut self.counters {
            counter.start(now);
        }
    }

    /// Run the animation only while it can be seen and is not paused.
    fn sync_animation(&mut self, now: Instant) {
        let visible = self.focused && !self.paused;
        if let Some(animator) = &mut self.animator {
            if visible {
                animator.start(now);
            } else {
                animator.stop();
            }
        }
    }

    fn on_focus_change(&mut self, focused: bool, now: Instant) {
        tracing::debug!(focused, "terminal focus changed");
        self.focused = focused;
        self.sync_animation(now);
    }

    /// How long to wait for input before the next scheduled update.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let counters_moving = self.counters.iter().any(|c| c.is_animating(now));
        [
            self.animator
                .as_ref()
                .and_then(|a| a.time_until_next_frame(now)),
            self.resize.time_until_due(now),
            self.loader.as_ref().and_then(|l| l.time_until_next(now)),
            self.reveal_at.map(|at| at.saturating_duration_since(now)),
            counters_moving.then_some(COUNTER_POLL),
        ]
        .into_iter()
        .flatten()
        .fold(IDLE_POLL, Duration::min)
    }

    fn loader_visible(&self) -> bool {
        self.loader.as_ref().is_some_and(|l| !l.is_hidden())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame, now: Instant) {
        let area = frame.area();

        if let Some(animator) = &self.animator {
            frame.render_widget(animator.canvas(self.theme), area);
        }

        if self.loader_visible() {
            self.render_loader(frame, area);
        } else {
            self.render_landing(frame, area, now);
        }

        if let Some(wizard) = &self.wizard {
            let view = WizardView {
                accent: self.theme.color(),
                contact: &self.config.contact,
                submit: self.sender.status(),
                now,
            };
            render_wizard(frame, wizard, &view);
        }
    }

    fn render_loader(&self, frame: &mut Frame, area: Rect) {
        let Some(loader) = &self.loader else {
            return;
        };
        let color = self.theme.color();

        let [_, label_area, gauge_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, gauge_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(40),
            Constraint::Fill(1),
        ])
        .areas(gauge_area);

        frame.render_widget(Line::from(TITLE.bold().fg(color)).centered(), label_area);
        let gauge = Gauge::default()
            .gauge_style(Style::new().fg(color))
            .ratio(loader.ratio())
            .label(format!("{}%", loader.percent()));
        frame.render_widget(gauge, gauge_area);
    }

    fn render_landing(&self, frame: &mut Frame, area: Rect, now: Instant) {
        let color = self.theme.color();

        // Create vertical layout for centering
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Tagline
            Constraint::Length(2), // Spacing
            Constraint::Length(2), // Counters
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Marquee
            Constraint::Length(1), // Help text
        ])
        .split(area);

        if self.revealed_at.is_some() {
            frame.render_widget(Line::from(TITLE.bold().fg(color)).centered(), chunks[1]);
            frame.render_widget(Line::from(TAGLINE.gray()).centered(), chunks[3]);
            self.render_counters(frame, chunks[5], now);
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        let ticker = self.marquee.window(elapsed, area.width as usize);
        frame.render_widget(Line::styled(ticker, Style::new().fg(Color::DarkGray)), chunks[7]);

        let particles_state = if self.paused { " resume  " } else { " pause  " };
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "enter".bold().fg(color),
            " contact  ".dark_gray(),
            "p".bold().fg(color),
            particles_state.dark_gray(),
            "r".bold().fg(color),
            " reshuffle  ".dark_gray(),
            "c".bold().fg(color),
            Span::styled(
                format!(" color ({})", self.theme.name()),
                Style::new().fg(Color::DarkGray),
            ),
        ])
        .centered();
        frame.render_widget(help, chunks[8]);
    }

    fn render_counters(&self, frame: &mut Frame, area: Rect, now: Instant) {
        if self.counters.is_empty() {
            return;
        }
        let color = self.theme.color();
        let columns = Layout::horizontal(vec![Constraint::Fill(1); self.counters.len()]).split(area);
        for (counter, column) in self.counters.iter().zip(columns.iter()) {
            let text = vec![
                Line::styled(
                    counter.text_at(now),
                    Style::new().fg(color).add_modifier(Modifier::BOLD),
                )
                .centered(),
                Line::styled(counter.label(), Style::new().fg(Color::DarkGray)).centered(),
            ];
            frame.render_widget(Paragraph::new(text), *column);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, now),
                Event::Resize(columns, rows) => self.resize.trigger((columns, rows), now),
                Event::FocusLost => self.on_focus_change(false, now),
                Event::FocusGained => self.on_focus_change(true, now),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }

        if let Some(wizard) = &mut self.wizard {
            match wizard.on_key(key, now) {
                WizardAction::None => {}
                WizardAction::Close => self.close_wizard(),
                WizardAction::Chose(channel) => self.on_channel_chosen(channel),
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Enter => self.open_wizard(),
            KeyCode::Char('c') => self.cycle_color_theme(),
            KeyCode::Char('p') => self.toggle_pause(now),
            KeyCode::Char('r') => self.reshuffle_particles(),
            _ => {}
        }
    }

    fn open_wizard(&mut self) {
        if self.loader_visible() {
            return;
        }
        tracing::debug!("contact wizard opened");
        self.wizard = Some(ContactWizard::new());
    }

    fn close_wizard(&mut self) {
        tracing::debug!("contact wizard closed");
        self.wizard = None;
        self.sender.reset();
    }

    fn on_channel_chosen(&mut self, channel: Channel) {
        let Some(wizard) = &self.wizard else {
            return;
        };
        tracing::info!(channel = channel.name(), "contact channel chosen");
        if channel == Channel::Email {
            self.sender.submit(wizard.request());
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.theme = self.theme.next();
    }

    fn toggle_pause(&mut self, now: Instant) {
        self.paused = !self.paused;
        self.sync_animation(now);
    }

    fn reshuffle_particles(&mut self) {
        if let Some(animator) = &mut self.animator {
            animator.regenerate_particles();
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
