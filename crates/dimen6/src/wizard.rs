//! Multi-step contact wizard.
//!
//! Four fixed panels: describe the project, give a name, pick a channel,
//! see the confirmation. The first two panels refuse to advance while
//! their field is blank and flash the field instead.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use dimen6_config::ContactConfig;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::contact::{ContactRequest, SubmitStatus};

/// How long a rejected field stays highlighted.
const ERROR_FLASH: Duration = Duration::from_millis(1500);

/// Color of a highlighted field.
const ERROR_COLOR: Color = Color::Rgb(231, 76, 60);

/// Services offered as chips on the first panel.
pub const SERVICES: &[&str] = &["Website", "Landing page", "E-commerce", "Branding", "Automation"];

/// Shown when no service chip was chosen.
const NO_SERVICE: &str = "Not specified";

/// Wizard panels, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Project,
    Name,
    Channel,
    Confirm,
}

impl Step {
    /// Position shown by the progress dots (the confirmation keeps the last dot).
    pub fn progress(self) -> usize {
        match self {
            Step::Project => 1,
            Step::Name => 2,
            Step::Channel | Step::Confirm => 3,
        }
    }
}

/// State of one progress dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dot {
    Done,
    Active,
    Pending,
}

/// Progress dots for the step numbered `current` (1-based).
pub fn progress_dots(current: usize) -> [Dot; 3] {
    std::array::from_fn(|i| match (i + 1).cmp(&current) {
        std::cmp::Ordering::Less => Dot::Done,
        std::cmp::Ordering::Equal => Dot::Active,
        std::cmp::Ordering::Greater => Dot::Pending,
    })
}

/// Ways to get in touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    WhatsApp,
    Instagram,
    Email,
    LinkedIn,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::WhatsApp,
        Channel::Instagram,
        Channel::Email,
        Channel::LinkedIn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Channel::WhatsApp => "WhatsApp",
            Channel::Instagram => "Instagram",
            Channel::Email => "E-mail",
            Channel::LinkedIn => "LinkedIn",
        }
    }
}

/// Field that can be flagged as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Project,
    Name,
}

/// What the app should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    None,
    /// Leave the wizard.
    Close,
    /// The user picked a channel on the last panel.
    Chose(Channel),
}

/// Contact wizard state.
#[derive(Debug)]
pub struct ContactWizard {
    step: Step,
    /// Set when the current panel was reached with a back action.
    going_back: bool,
    service: Option<usize>,
    project: String,
    name: String,
    channel_cursor: usize,
    chosen: Option<Channel>,
    error: Option<(Field, Instant)>,
}

impl Default for ContactWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactWizard {
    pub fn new() -> Self {
        Self {
            step: Step::Project,
            going_back: false,
            service: None,
            project: String::new(),
            name: String::new(),
            channel_cursor: 0,
            chosen: None,
            error: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn chosen(&self) -> Option<Channel> {
        self.chosen
    }

    /// Chosen service, or the placeholder.
    pub fn service_label(&self) -> &'static str {
        self.service.map(|i| SERVICES[i]).unwrap_or(NO_SERVICE)
    }

    /// Move the service chip selection; the first move selects an edge chip.
    pub fn cycle_service(&mut self, forward: bool) {
        let last = SERVICES.len() - 1;
        self.service = Some(match (self.service, forward) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) => if i == last { 0 } else { i + 1 },
            (Some(i), false) => if i == 0 { last } else { i - 1 },
        });
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type into the field of the current panel.
    pub fn push_char(&mut self, c: char) {
        match self.step {
            Step::Project => self.project.push(c),
            Step::Name => self.name.push(c),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.step {
            Step::Project => {
                self.project.pop();
            }
            Step::Name => {
                self.name.pop();
            }
            _ => {}
        }
    }

    /// Advance from a form panel if its field is filled in.
    ///
    /// Returns whether the wizard moved on.
    pub fn next(&mut self, now: Instant) -> bool {
        let (field, value, to) = match self.step {
            Step::Project => (Field::Project, &self.project, Step::Name),
            Step::Name => (Field::Name, &self.name, Step::Channel),
            Step::Channel | Step::Confirm => return false,
        };
        if value.trim().is_empty() {
            self.error = Some((field, now));
            tracing::debug!(?field, "wizard field left blank");
            return false;
        }
        self.go_to(to, false);
        true
    }

    /// Go back one panel. Returns `false` on the first panel.
    pub fn back(&mut self) -> bool {
        let to = match self.step {
            Step::Name => Step::Project,
            Step::Channel => Step::Name,
            Step::Project | Step::Confirm => return false,
        };
        self.go_to(to, true);
        true
    }

    pub fn move_channel_cursor(&mut self, forward: bool) {
        let len = Channel::ALL.len();
        self.channel_cursor = if forward {
            (self.channel_cursor + 1) % len
        } else {
            (self.channel_cursor + len - 1) % len
        };
    }

    pub fn channel_cursor(&self) -> Channel {
        Channel::ALL[self.channel_cursor]
    }

    /// Pick a channel on the channel panel and show the confirmation.
    pub fn choose(&mut self, channel: Channel) -> bool {
        if self.step != Step::Channel {
            return false;
        }
        self.chosen = Some(channel);
        self.go_to(Step::Confirm, false);
        true
    }

    /// Whether `field` is still flashing at `now`.
    pub fn is_flagged(&self, field: Field, now: Instant) -> bool {
        matches!(self.error, Some((f, at)) if f == field && now.duration_since(at) < ERROR_FLASH)
    }

    /// Whether the current panel was entered going backwards.
    pub fn going_back(&self) -> bool {
        self.going_back
    }

    /// Form contents, trimmed, for the e-mail endpoint.
    pub fn request(&self) -> ContactRequest {
        ContactRequest {
            name: self.name.trim().to_string(),
            service: self.service.map(|i| SERVICES[i].to_string()).unwrap_or_default(),
            project: self.project.trim().to_string(),
        }
    }

    /// Link to open for a channel; e-mail is sent instead of opened.
    pub fn channel_url(&self, channel: Channel, contact: &ContactConfig) -> Option<String> {
        match channel {
            Channel::WhatsApp => {
                let name = non_empty_or(self.name.trim(), "client");
                let service = self.service.map(|i| SERVICES[i]).unwrap_or("service");
                let project = self.project.trim();
                Some(format!(
                    "{}?text=Hi! I'm {} and I'm interested in: {}.%0A%0A{}",
                    contact.whatsapp,
                    urlencoding::encode(name),
                    urlencoding::encode(service),
                    urlencoding::encode(project),
                ))
            }
            Channel::Instagram => Some(contact.instagram.clone()),
            Channel::LinkedIn => Some(contact.linkedin.clone()),
            Channel::Email => None,
        }
    }

    /// Route a key press while the wizard is open.
    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> WizardAction {
        match self.step {
            Step::Project => match key.code {
                KeyCode::Esc => return WizardAction::Close,
                KeyCode::Enter => {
                    self.next(now);
                }
                KeyCode::Left => self.cycle_service(false),
                KeyCode::Right => self.cycle_service(true),
                KeyCode::Backspace => self.backspace(),
                KeyCode::Char(c) => self.push_char(c),
                _ => {}
            },
            Step::Name => match key.code {
                KeyCode::Esc => {
                    self.back();
                }
                KeyCode::Enter => {
                    self.next(now);
                }
                KeyCode::Backspace => self.backspace(),
                KeyCode::Char(c) => self.push_char(c),
                _ => {}
            },
            Step::Channel => match key.code {
                KeyCode::Esc => {
                    self.back();
                }
                KeyCode::Left | KeyCode::Up => self.move_channel_cursor(false),
                KeyCode::Right | KeyCode::Down | KeyCode::Tab => self.move_channel_cursor(true),
                KeyCode::Char(c @ '1'..='4') => {
                    let channel = Channel::ALL[c as usize - '1' as usize];
                    if self.choose(channel) {
                        return WizardAction::Chose(channel);
                    }
                }
                KeyCode::Enter => {
                    let channel = self.channel_cursor();
                    if self.choose(channel) {
                        return WizardAction::Chose(channel);
                    }
                }
                _ => {}
            },
            Step::Confirm => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    return WizardAction::Close;
                }
            }
        }
        WizardAction::None
    }

    fn go_to(&mut self, step: Step, back: bool) {
        tracing::debug!(from = ?self.step, to = ?step, back, "wizard step");
        self.step = step;
        self.going_back = back;
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// Everything the wizard panel needs besides the wizard itself.
pub struct WizardView<'a> {
    pub accent: Color,
    pub contact: &'a ContactConfig,
    pub submit: SubmitStatus,
    pub now: Instant,
}

/// Draw the wizard as a centered panel over whatever is behind it.
pub fn render_wizard(frame: &mut Frame, wizard: &ContactWizard, view: &WizardView) {
    let area = centered(frame.area(), 64, 18);
    frame.render_widget(Clear, area);

    let title = match wizard.step() {
        Step::Project => " Tell us about your project ",
        Step::Name => " Who are we talking to? ",
        Step::Channel => " How should we reach you? ",
        Step::Confirm => " Thank you ",
    };
    let arrow = if wizard.going_back() { "←" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(view.accent))
        .title(Span::styled(
            format!("{arrow}{title}"),
            Style::new().fg(view.accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [dots_area, body_area, help_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(dots_line(wizard.step(), view.accent)).centered(),
        dots_area,
    );

    let body = match wizard.step() {
        Step::Project => project_panel(wizard, view),
        Step::Name => name_panel(wizard, view),
        Step::Channel => channel_panel(wizard, view),
        Step::Confirm => confirm_panel(wizard, view),
    };
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), body_area);

    let help = match wizard.step() {
        Step::Project => "←/→ service  enter next  esc close",
        Step::Name => "enter next  esc back",
        Step::Channel => "←/→ or 1-4 choose  enter confirm  esc back",
        Step::Confirm => "enter close",
    };
    frame.render_widget(Line::from(help.dark_gray()).centered(), help_area);
}

fn dots_line(step: Step, accent: Color) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, dot) in progress_dots(step.progress()).into_iter().enumerate() {
        if i > 0 {
            let done = dot != Dot::Pending;
            spans.push(Span::styled(
                "───",
                Style::new().fg(if done { accent } else { Color::DarkGray }),
            ));
        }
        spans.push(match dot {
            Dot::Done => Span::styled("●", Style::new().fg(accent)),
            Dot::Active => Span::styled("◉", Style::new().fg(accent).add_modifier(Modifier::BOLD)),
            Dot::Pending => Span::styled("○", Style::new().fg(Color::DarkGray)),
        });
    }
    Line::from(spans)
}

fn input_line(value: &str, flagged: bool, accent: Color) -> Line<'static> {
    let color = if flagged { ERROR_COLOR } else { accent };
    Line::from(vec![
        Span::styled("› ", Style::new().fg(color)),
        Span::raw(value.to_string()),
        Span::styled("▏", Style::new().fg(color)),
    ])
}

fn project_panel(wizard: &ContactWizard, view: &WizardView) -> Vec<Line<'static>> {
    let chips: Vec<Span> = SERVICES
        .iter()
        .enumerate()
        .flat_map(|(i, service)| {
            let style = if wizard.service == Some(i) {
                Style::new().fg(Color::Black).bg(view.accent)
            } else {
                Style::new().fg(Color::Gray)
            };
            [Span::styled(format!(" {service} "), style), Span::raw(" ")]
        })
        .collect();

    vec![
        Line::from("Service".dark_gray()),
        Line::from(chips),
        Line::default(),
        Line::from(vec![
            "Project".dark_gray(),
            Span::styled(
                format!("  {} chars", wizard.project().chars().count()),
                Style::new().fg(Color::DarkGray),
            ),
        ]),
        input_line(
            wizard.project(),
            wizard.is_flagged(Field::Project, view.now),
            view.accent,
        ),
    ]
}

fn name_panel(wizard: &ContactWizard, view: &WizardView) -> Vec<Line<'static>> {
    vec![
        summary_line("Service", wizard.service_label()),
        summary_line("Project", wizard.project().trim()),
        Line::default(),
        Line::from("Your name".dark_gray()),
        input_line(
            wizard.name(),
            wizard.is_flagged(Field::Name, view.now),
            view.accent,
        ),
    ]
}

fn channel_panel(wizard: &ContactWizard, view: &WizardView) -> Vec<Line<'static>> {
    let cards: Vec<Span> = Channel::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, channel)| {
            let style = if wizard.channel_cursor() == *channel {
                Style::new().fg(Color::Black).bg(view.accent)
            } else {
                Style::new().fg(Color::Gray)
            };
            [
                Span::styled(format!(" {} {} ", i + 1, channel.name()), style),
                Span::raw(" "),
            ]
        })
        .collect();

    vec![
        summary_line("Name", wizard.name().trim()),
        summary_line("Service", wizard.service_label()),
        summary_line("Project", wizard.project().trim()),
        Line::default(),
        Line::from(cards),
    ]
}

fn confirm_panel(wizard: &ContactWizard, view: &WizardView) -> Vec<Line<'static>> {
    let Some(channel) = wizard.chosen() else {
        return Vec::new();
    };

    let mut lines = vec![Line::from(vec![
        "Channel  ".dark_gray(),
        channel.name().bold().fg(view.accent),
    ])];
    lines.push(Line::default());

    match wizard.channel_url(channel, view.contact) {
        Some(url) => {
            lines.push(Line::from("Open this link to continue:".dark_gray()));
            lines.push(Line::from(Span::styled(url, Style::new().fg(view.accent))));
        }
        None => {
            let color = match view.submit {
                SubmitStatus::Sent => view.accent,
                SubmitStatus::Rejected(_) | SubmitStatus::ConnectionError => ERROR_COLOR,
                _ => Color::Gray,
            };
            lines.push(Line::from(Span::styled(
                view.submit.label(),
                Style::new().fg(color),
            )));
        }
    }
    lines
}

fn summary_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<9}"), Style::new().fg(Color::DarkGray)),
        Span::raw(value.to_string()),
    ])
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
