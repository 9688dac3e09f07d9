//! Portal and password prompt screens, plus the landing overlay.

use std::rc::Rc;

use drepheus_core::ColorTheme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

const WELCOME: &str = "Welcome to the digital nexus. Enter the portal to access advanced \
                       trading systems and market intelligence.";

const DENIED_RED: Color = Color::Rgb(0xff, 0x00, 0x00);

/// Landing overlay: the enter hint and key help along the bottom.
pub fn render_landing_hint(frame: &mut Frame, theme: ColorTheme) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1), // Hint
        Constraint::Length(1), // Help text
    ])
    .split(frame.area());

    let hint = Line::from("Click anywhere to enter".fg(theme.dim())).centered();
    frame.render_widget(hint, chunks[1]);
    let help = help_line(theme, &[("q", "quit"), ("c", "cycle color"), ("s", "speed")]);
    frame.render_widget(help, chunks[2]);
}

fn portal_layout(area: Rect) -> Rc<[Rect]> {
    Layout::vertical([
        Constraint::Fill(1),   // Top padding
        Constraint::Length(1), // Title
        Constraint::Length(1), // Subtitle
        Constraint::Length(1), // Spacing
        Constraint::Length(3), // Welcome
        Constraint::Length(1), // Spacing
        Constraint::Length(3), // Button
        Constraint::Fill(1),   // Bottom padding
        Constraint::Length(1), // Help text
    ])
    .split(area)
}

/// Where the "ENTER PORTAL" button sits for a screen of size `area`.
pub fn portal_button_area(area: Rect) -> Rect {
    centered(portal_layout(area)[6], 18, 3)
}

/// Portal screen: title, welcome text and the enter button.
pub fn render_portal(frame: &mut Frame, theme: ColorTheme) {
    let area = frame.area();
    let color = theme.primary();
    let chunks = portal_layout(area);

    let title = Paragraph::new("D R E P H E U S")
        .style(Style::new().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    let subtitle = Paragraph::new("P O R T A L")
        .style(Style::new().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[2]);

    let welcome_area = centered(chunks[4], 64, 3);
    let welcome = Paragraph::new(WELCOME)
        .style(Style::new().fg(theme.dim()))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(welcome, welcome_area);

    let button_area = portal_button_area(area);
    let button = Paragraph::new("ENTER PORTAL")
        .style(Style::new().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::new()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(color)),
        );
    frame.render_widget(button, button_area);

    frame.render_widget(
        help_line(theme, &[("enter", "open"), ("c", "cycle color"), ("q", "quit")]),
        chunks[8],
    );
}

/// Password prompt drawn over the portal.
pub fn render_prompt(frame: &mut Frame, theme: ColorTheme, typed: usize, denied: bool) {
    let color = theme.primary();
    let popup = centered(frame.area(), 40, if denied { 9 } else { 7 });
    frame.render_widget(Clear, popup);

    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(color))
        .title(Line::from(" ACCESS REQUIRED ").centered().bold());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut constraints = vec![Constraint::Length(1)];
    if denied {
        constraints.extend([Constraint::Length(1), Constraint::Length(1)]);
    }
    constraints.extend([
        Constraint::Length(1), // Label
        Constraint::Length(1), // Input
        Constraint::Length(1), // Spacing
        Constraint::Length(1), // Keys
    ]);
    let rows = Layout::vertical(constraints).split(inner);
    let mut next = 1;

    if denied {
        let message = Paragraph::new("ACCESS DENIED")
            .style(
                Style::new()
                    .fg(DENIED_RED)
                    .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
            )
            .alignment(Alignment::Center);
        frame.render_widget(message, rows[next]);
        next += 2;
    }

    frame.render_widget(
        Paragraph::new("Enter Password:").style(Style::new().fg(theme.dim())),
        rows[next],
    );
    let masked = if typed == 0 {
        "****".fg(theme.dim())
    } else {
        "*".repeat(typed).fg(color)
    };
    frame.render_widget(Line::from(vec!["> ".fg(color), masked]), rows[next + 1]);
    frame.render_widget(
        help_line(theme, &[("enter", "access"), ("esc", "cancel")]),
        rows[next + 3],
    );
}

fn help_line(theme: ColorTheme, keys: &[(&'static str, &'static str)]) -> Line<'static> {
    let color = theme.primary();
    let spans = keys.iter().flat_map(|&(key, action)| {
        [key.bold().fg(color), format!(" {action}  ").dark_gray()]
    });
    Line::from_iter(spans).centered()
}

/// Rect of at most `width` x `height` centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
