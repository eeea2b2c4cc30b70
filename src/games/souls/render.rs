//! Soul Reaper rendering: stats header, soul orb, upgrade shop, achievements,
//! activity log, unlock popup and help overlay.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};

use super::actions::{BUY_UPGRADE_BASE, CLICK_ORB, CLOSE_HELP, REAP_BUTTON, TOGGLE_HELP};
use super::logic::format_number;
use super::state::{AchievementKind, AchievementView, Snapshot, UpgradeKind, UpgradeView};
use super::SoulsGame;

const ORB_ART: &[&str] = &["  .-~~~-.  ", " (  o o  ) ", "  `-___-'  "];

const HELP_TEXT: &[&str] = &[
    "Click the orb or press [C] to reap souls.",
    "Spend souls on upgrades with [1]-[4].",
    "Blades and pacts raise souls per click.",
    "Soul Minions reap for you, faster the more you own.",
    "Upgrade prices rise with every purchase.",
    "",
    "[Esc] or click here to close",
];

pub fn render(game: &SoulsGame, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let snap = game.snapshot();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(game, &snap, f, main_chunks[0]);

    if is_narrow_layout(area.width) {
        render_narrow(game, &snap, f, main_chunks[1], click_state);
    } else {
        render_wide(game, &snap, f, main_chunks[1], click_state);
    }

    render_help_bar(f, main_chunks[2], click_state);

    if let Some(popup) = &game.popup {
        render_popup(&popup.text, f, main_chunks[1]);
    }
    if game.show_help {
        render_help_overlay(f, area, click_state);
    }
}

/// Wide layout: orb + shop on the left, achievements + log on the right.
fn render_wide(
    game: &SoulsGame,
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(4)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(snap.achievements.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(columns[1]);

    render_orb(snap, f, left[0], click_state);
    render_upgrades(snap, f, left[1], click_state);
    render_achievements(game, snap, f, right[0]);
    render_log(game, f, right[1]);
}

/// Narrow layout: everything stacked, log takes what is left.
fn render_narrow(
    game: &SoulsGame,
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(snap.upgrades.len() as u16 + 2),
            Constraint::Length(snap.achievements.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    render_orb(snap, f, chunks[0], click_state);
    render_upgrades(snap, f, chunks[1], click_state);
    render_achievements(game, snap, f, chunks[2]);
    render_log(game, f, chunks[3]);
}

fn render_header(game: &SoulsGame, snap: &Snapshot, f: &mut Frame, area: Rect) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD);

    let cadence = match game.scheduler().interval_ms() {
        Some(ms) => format!(" every {}ms", ms),
        None => String::new(),
    };

    let line = Line::from(vec![
        Span::styled("Souls ", label),
        Span::styled(format_number(snap.souls), value),
        Span::styled("  Per click ", label),
        Span::styled(format_number(snap.per_click_yield), value),
        Span::styled("  Passive ", label),
        Span::styled(format!("{}{}", format_number(snap.passive_rate), cadence), value),
        Span::styled("  Upgrades ", label),
        Span::styled(format_number(snap.total_upgrades), value),
    ]);

    let header = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Soul Reaper "),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_orb(snap: &Snapshot, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Soul Orb ");
    let inner = block.inner(area);

    let orb_style = Style::default()
        .fg(Color::LightMagenta)
        .add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = ORB_ART
        .iter()
        .map(|row| Line::from(Span::styled(*row, orb_style)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("[C] Reap (+{})", format_number(snap.per_click_yield)),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )));

    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(widget, area);

    let mut cs = click_state.borrow_mut();
    let orb_height = (ORB_ART.len() as u16).min(inner.height);
    cs.add_click_target(Rect::new(inner.x, inner.y, inner.width, orb_height), CLICK_ORB);
    cs.add_row_target(inner, inner.y + ORB_ART.len() as u16 + 1, REAP_BUTTON);
}

fn upgrade_line(index: usize, upgrade: &UpgradeView) -> Line<'static> {
    let style = if upgrade.affordable {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let bonus = match upgrade.kind {
        UpgradeKind::Click => format!("+{}/click", upgrade.effect),
        UpgradeKind::Passive => "auto-reaps".to_string(),
    };
    Line::from(vec![
        Span::styled(
            format!("[{}] ", index + 1),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<15}", upgrade.name), style),
        Span::styled(format!(" Lv {:<3}", upgrade.owned), style),
        Span::styled(format!(" Cost: {:<8}", format_number(upgrade.cost)), style),
        Span::styled(format!(" {}", bonus), Style::default().fg(Color::Gray)),
    ])
}

fn render_upgrades(
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let items: Vec<ListItem> = snap
        .upgrades
        .iter()
        .enumerate()
        .map(|(i, u)| ListItem::new(upgrade_line(i, u)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Upgrades ");
    let inner = block.inner(area);
    f.render_widget(List::new(items).block(block), area);

    let mut cs = click_state.borrow_mut();
    for i in 0..snap.upgrades.len() {
        cs.add_row_target(inner, inner.y + i as u16, BUY_UPGRADE_BASE + i as u16);
    }
}

/// Text under an achievement's name, as shown on its card.
pub fn achievement_description(achievement: &AchievementView, passive_name: &str) -> String {
    match achievement.kind {
        AchievementKind::Total => format!("Souls needed: {}", format_number(achievement.requirement)),
        AchievementKind::Passive => format!(
            "Buy {} ({} souls per tick)",
            passive_name,
            format_number(achievement.requirement)
        ),
    }
}

fn render_achievements(game: &SoulsGame, snap: &Snapshot, f: &mut Frame, area: Rect) {
    let passive_name = game.state.passive_upgrade().name;
    let lines: Vec<Line> = snap
        .achievements
        .iter()
        .map(|a| {
            let (mark, style) = if a.unlocked {
                (
                    "✔ ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("  ", Style::default().fg(Color::Gray))
            };
            Line::from(vec![
                Span::styled(mark, style),
                Span::styled(a.name, style),
                Span::styled(
                    format!("  {}", achievement_description(a, passive_name)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let unlocked = snap.achievements.iter().filter(|a| a.unlocked).count();
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(
                " Achievements {}/{} ",
                unlocked,
                snap.achievements.len()
            )),
    );
    f.render_widget(widget, area);
}

fn render_log(game: &SoulsGame, f: &mut Frame, area: Rect) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let start = game.log.len().saturating_sub(visible_height);

    let log_lines: Vec<Line> = game.log[start..]
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_help_bar(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let help = Paragraph::new(Line::from(Span::styled(
        "[?] Help   [C] Reap   [1-4] Buy upgrade",
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(help, area);

    click_state.borrow_mut().add_click_target(area, TOGGLE_HELP);
}

/// Centre a `width` x `height` box inside `area`, shrinking to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

fn render_popup(text: &str, f: &mut Frame, area: Rect) {
    let width = Line::from(text).width() as u16 + 6;
    let full = centered(area, width, 3);
    // Pin to the top of the body so it does not cover the shop rows.
    let rect = Rect::new(full.x, area.y, full.width, full.height);

    let popup = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .alignment(Alignment::Center);
    f.render_widget(Clear, rect);
    f.render_widget(popup, rect);
}

fn render_help_overlay(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let rect = centered(area, 56, HELP_TEXT.len() as u16 + 2);
    let lines: Vec<Line> = HELP_TEXT
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::White))))
        .collect();

    let overlay = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" How to play "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(Clear, rect);
    f.render_widget(overlay, rect);

    // Registered last so it sits above every other target.
    click_state.borrow_mut().add_click_target(rect, CLOSE_HELP);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::souls::state::GameState;

    #[test]
    fn total_achievement_description() {
        let snap = GameState::new().snapshot();
        assert_eq!(
            achievement_description(&snap.achievements[4], "Soul Minion"),
            "Souls needed: 5,000"
        );
    }

    #[test]
    fn passive_achievement_description_names_minion() {
        let snap = GameState::new().snapshot();
        assert!(achievement_description(&snap.achievements[2], "Soul Minion")
            .starts_with("Buy Soul Minion"));
    }

    #[test]
    fn upgrade_line_shows_key_and_cost() {
        let snap = GameState::new().snapshot();
        let line = upgrade_line(0, &snap.upgrades[0]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("[1] Rusty Scythe"));
        assert!(text.contains("Cost: 10"));
        assert!(text.contains("+1/click"));
    }

    #[test]
    fn centered_shrinks_to_area() {
        let area = Rect::new(0, 0, 30, 5);
        let r = centered(area, 56, 9);
        assert_eq!(r, Rect::new(0, 0, 30, 5));
        let r = centered(Rect::new(0, 0, 80, 24), 40, 10);
        assert_eq!(r, Rect::new(20, 7, 40, 10));
    }
}
