//! Galactic Dust Sweeper rendering: stats, tabbed screens, notice log and
//! footer controls.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::achievements::describe_reward;
use super::actions::*;
use super::catalog::{
    currency_name, ToolId, ToolKind, UpgradeTrack, ACHIEVEMENTS, PRESTIGE_UPGRADES, SHOP_PER_PAGE,
    TOOLS, TOOLS_PER_PAGE, ZONES,
};
use super::logic::{self, format_number};
use super::state::{DustState, Tab};

const SPARKLE: &[char] = &['✦', '✧', '·', '✧'];

pub fn render(state: &DustState, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let narrow = is_narrow_layout(area.width);

    let (main_area, log_area) = if narrow {
        (area, None)
    } else {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),                           // header + stats
            Constraint::Length(3),                           // tabs
            Constraint::Min(6),                              // tab content
            Constraint::Length(if narrow { 1 } else { 0 }), // latest notice
            Constraint::Length(3),                           // footer
        ])
        .split(main_area);

    render_stats(state, f, chunks[0], click_state);
    render_tab_bar(state, f, chunks[1], click_state);
    match state.tab {
        Tab::Tools => render_tools(state, f, chunks[2], click_state),
        Tab::Upgrades => render_upgrades(state, f, chunks[2], click_state),
        Tab::Zones => render_zones(state, f, chunks[2], click_state),
        Tab::Prestige => render_prestige(state, f, chunks[2], click_state),
        Tab::Achievements => render_achievements(state, f, chunks[2]),
    }
    if narrow {
        render_latest_notice(state, f, chunks[3]);
    }
    render_footer(state, f, chunks[4], click_state);

    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }
}

fn affordable_style(can_afford: bool) -> (Style, Style) {
    if can_afford {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    }
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn key_hint(key: impl std::fmt::Display, style: Style) -> Span<'static> {
    Span::styled(format!("[{}] ", key), style)
}

// ── Header / stats ──────────────────────────────────────────────

fn render_stats(
    state: &DustState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let prod = &state.production;
    let zone = state.current_zone_def();
    let sparkle = SPARKLE[(state.total_clicks as usize) % SPARKLE.len()];

    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(vec![
            key_hint('C', Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{} Sweep ", sparkle), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("+{} per click", format_number(prod.dust_per_click, 1)),
                Style::default().fg(Color::White),
            ),
        ]),
        SWEEP,
    );
    cl.push(Line::from(vec![
        Span::styled(format!("{}: ", zone.name), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{} {}", format_number(state.active_balance().floor(), 0), zone.currency),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push(Line::from(Span::styled(
        format!(
            "{}/s  auto {}/s  clicks {}",
            format_number(prod.total_per_second, 1),
            format_number(prod.auto_clicks_per_second, 1),
            state.total_clicks
        ),
        Style::default().fg(Color::Green),
    )));
    cl.push(Line::from(Span::styled(
        format!(
            "Prestige {}  boost x{:.2}  achievements x{:.2}",
            state.prestige,
            logic::prestige_multiplier(state),
            state.achievement_multiplier
        ),
        Style::default().fg(Color::Magenta),
    )));

    let title = format!(" Galactic Dust Sweeper · {} ", logic::current_title(state));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(title, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Tabs ────────────────────────────────────────────────────────

fn render_tab_bar(
    state: &DustState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let style = |tab: Tab, color: Color| {
        if state.tab == tab {
            Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        }
    };

    let pending = logic::prestige_available(state);
    let prestige_label = if pending > 0 {
        format!("[P] Prestige +{}", pending)
    } else {
        "[P] Prestige".to_string()
    };
    let achievement_label = format!(
        "[A] Feats {}/{}",
        state.unlocked_count(),
        ACHIEVEMENTS.len()
    );

    let mut cs = click_state.borrow_mut();
    TabBar::new("│")
        .tab("[T] Tools", style(Tab::Tools, Color::Green), TAB_TOOLS)
        .tab("[U] Upgrades", style(Tab::Upgrades, Color::Magenta), TAB_UPGRADES)
        .tab("[Z] Zones", style(Tab::Zones, Color::Cyan), TAB_ZONES)
        .tab(prestige_label, style(Tab::Prestige, Color::Yellow), TAB_PRESTIGE)
        .tab(achievement_label, style(Tab::Achievements, Color::Blue), TAB_ACHIEVEMENTS)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .render(f, area, &mut cs);
}

/// Split a content panel into the list and a one-row pager underneath.
fn with_pager(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

fn render_pager(page: usize, pages: usize, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let enabled = |on: bool| {
        if on {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    TabBar::new(" ")
        .tab("[B] ◂ Prev", enabled(page > 0), PAGE_PREV)
        .tab(format!("[N] Next ▸  {}/{}", page + 1, pages), enabled(page + 1 < pages), PAGE_NEXT)
        .render(f, area, cs);
}

fn page_count(len: usize, per_page: usize) -> usize {
    (len + per_page - 1) / per_page
}

fn panel(title: String, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

// ── Tools ───────────────────────────────────────────────────────

fn tools_on_page(page: usize) -> impl Iterator<Item = (usize, ToolId)> {
    TOOLS
        .iter()
        .skip(page * TOOLS_PER_PAGE)
        .take(TOOLS_PER_PAGE)
        .enumerate()
        .map(|(slot, def)| (slot, def.id))
}

fn render_tools(
    state: &DustState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (list_area, pager_area) = with_pager(area);
    let mut cl = ClickableList::new();

    for (slot, id) in tools_on_page(state.tool_page) {
        let def = id.def();
        let tool = state.tool(id);
        let can_afford = state.balance(tool.zone) >= tool.cost;
        let (key_style, text_style) = affordable_style(can_afford);
        let unit = match def.kind {
            ToolKind::Click => "/click",
            ToolKind::Passive => "/s",
            ToolKind::AutoClick => " auto/s",
        };

        cl.push_clickable(
            Line::from(vec![
                key_hint(slot + 1, key_style),
                Span::styled(format!("{:<20} Lv.{:<3}", def.label, tool.level), text_style),
                Span::styled(
                    format!(" +{}{} ", format_number(def.increment * tool.upgrade_multiplier(), 0), unit),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!("{} {}", format_number(tool.cost, 0), currency_name(tool.zone)),
                    key_style,
                ),
            ]),
            BUY_TOOL_BASE + id.index() as u16,
        );
    }

    let pages = page_count(TOOLS.len(), TOOLS_PER_PAGE);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(list_area, &mut cs, 1, 1);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(panel(" Tools ".into(), Color::Green)),
        list_area,
    );
    render_pager(state.tool_page, pages, f, pager_area, &mut cs);
}

// ── Upgrades ────────────────────────────────────────────────────

fn render_upgrades(
    state: &DustState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (list_area, pager_area) = with_pager(area);
    let mut cl = ClickableList::new();
    let track_keys = ['Q', 'W', 'E'];

    for (slot, id) in tools_on_page(state.tool_page) {
        let def = id.def();
        let tool = state.tool(id);
        let selected = slot == state.selected_tool;
        let marker = if selected { "▸" } else { " " };
        let name_style = if selected {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        cl.push_clickable(
            Line::from(vec![
                key_hint(slot + 1, Style::default().fg(Color::Magenta)),
                Span::styled(
                    format!("{}{:<20} {:<7} x{:.2}", marker, def.label, def.kind.label(), tool.upgrade_multiplier()),
                    name_style,
                ),
            ]),
            SELECT_TOOL_BASE + slot as u16,
        );

        if !selected {
            continue;
        }
        for (track, key) in UpgradeTrack::all().iter().zip(track_keys) {
            let cost = logic::upgrade_cost(state, id, *track);
            let (key_style, text_style) = affordable_style(state.balance(tool.zone) >= cost);
            cl.push_clickable(
                Line::from(vec![
                    Span::raw("    "),
                    key_hint(key, key_style),
                    Span::styled(
                        format!("{:<11} Lv.{:<3}", track.label(), tool.upgrade_level(*track)),
                        text_style,
                    ),
                    Span::styled(
                        format!("{} {}", format_number(cost, 0), currency_name(tool.zone)),
                        key_style,
                    ),
                ]),
                BUY_UPGRADE_BASE + (id.index() * 3 + track.index()) as u16,
            );
        }
    }

    let pages = page_count(TOOLS.len(), TOOLS_PER_PAGE);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(list_area, &mut cs, 1, 1);
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(panel(" Upgrades · +12% output per level ".into(), Color::Magenta)),
        list_area,
    );
    render_pager(state.tool_page, pages, f, pager_area, &mut cs);
}

// ── Zones ───────────────────────────────────────────────────────

fn render_zones(
    state: &DustState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();

    for (idx, zone) in ZONES.iter().enumerate() {
        let bonus = format!("+{:.0}%", zone.bonus * 100.0);
        if idx <= state.current_zone {
            let here = if idx == state.current_zone { " ◂ here" } else { "" };
            cl.push(Line::from(vec![
                Span::styled("  ✓ ", Style::default().fg(Color::Green)),
                Span::styled(format!("{:<15} {:>5}  ", zone.name, bonus), Style::default().fg(Color::White)),
                Span::styled(
                    format!("{} {}", format_number(state.balance(idx).floor(), 0), zone.currency),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(here, Style::default().fg(Color::Cyan)),
            ]));
        } else if idx == state.current_zone + 1 {
            let can_afford = state.active_balance() >= zone.cost;
            let (key_style, text_style) = affordable_style(can_afford);
            cl.push_clickable(
                Line::from(vec![
                    key_hint(1, key_style),
                    Span::styled(format!("{:<15} {:>5}  ", zone.name, bonus), text_style),
                    Span::styled(
                        format!(
                            "unlock {} {}",
                            format_number(zone.cost, 0),
                            state.current_zone_def().currency
                        ),
                        key_style,
                    ),
                ]),
                UNLOCK_ZONE,
            );
        } else {
            cl.push(Line::from(Span::styled(
                format!("  · {:<15} {:>5}", zone.name, bonus),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let mut cs = click_state.borrow_mut();
    cl.register_targets(area, &mut cs, 1, 1);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(panel(" Zones ".into(), Color::Cyan)),
        area,
    );
}

// ── Prestige ────────────────────────────────────────────────────

fn render_prestige(
    state: &DustState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (list_area, pager_area) = with_pager(area);
    let gain = logic::prestige_available(state);
    let progress = logic::prestige_progress(state);
    let mut cl = ClickableList::new();

    cl.push(Line::from(Span::styled(
        format!(
            "Points {}  ·  lifetime {}",
            state.prestige,
            format_number(state.lifetime_dust.floor(), 0)
        ),
        Style::default().fg(Color::Yellow),
    )));
    cl.push(Line::from(vec![
        Span::styled("next point ", Style::default().fg(Color::DarkGray)),
        Span::styled(progress_bar(progress, 20), Style::default().fg(Color::Yellow)),
        Span::styled(format!(" {:.0}%", progress * 100.0), Style::default().fg(Color::DarkGray)),
    ]));
    let (key_style, text_style) = affordable_style(gain > 0);
    cl.push_clickable(
        Line::from(vec![
            key_hint(0, key_style),
            Span::styled(format!("Reset the run for +{} prestige", gain), text_style),
        ]),
        PRESTIGE_RESET,
    );
    cl.push(Line::from(""));

    let start = state.shop_page * SHOP_PER_PAGE;
    for (slot, def) in PRESTIGE_UPGRADES.iter().skip(start).take(SHOP_PER_PAGE).enumerate() {
        let level = state.prestige_level(def.id);
        let cost = state.prestige_upgrade_cost(def.id);
        let (key_style, text_style) = affordable_style(state.prestige >= cost);
        cl.push_clickable(
            Line::from(vec![
                key_hint(slot + 1, key_style),
                Span::styled(format!("{:<17} Lv.{:<3}", def.label, level), text_style),
                Span::styled(format!("{:>4} pts  ", cost), key_style),
                Span::styled(def.description, Style::default().fg(Color::DarkGray)),
            ]),
            BUY_PRESTIGE_UPGRADE_BASE + def.id.index() as u16,
        );
    }

    let pages = page_count(PRESTIGE_UPGRADES.len(), SHOP_PER_PAGE);
    let mut cs = click_state.borrow_mut();
    cl.register_targets(list_area, &mut cs, 1, 1);
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(panel(" Prestige ".into(), Color::Yellow)),
        list_area,
    );
    render_pager(state.shop_page, pages, f, pager_area, &mut cs);
}

// ── Achievements ────────────────────────────────────────────────

fn render_achievements(state: &DustState, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = ACHIEVEMENTS
        .iter()
        .map(|def| {
            if state.is_unlocked(def.id) {
                Line::from(vec![
                    Span::styled("✓ ", Style::default().fg(Color::Green)),
                    Span::styled(format!("{:<15}", def.label), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                    Span::styled(format!(" {}", describe_reward(&def.reward)), Style::default().fg(Color::Green)),
                ])
            } else {
                Line::from(vec![
                    Span::styled("· ", Style::default().fg(Color::DarkGray)),
                    Span::styled(format!("{:<15}", def.label), Style::default().fg(Color::Gray)),
                    Span::styled(format!(" {}", def.description), Style::default().fg(Color::DarkGray)),
                ])
            }
        })
        .collect();

    let title = format!(" Achievements {}/{} ", state.unlocked_count(), ACHIEVEMENTS.len());
    f.render_widget(Paragraph::new(lines).block(panel(title, Color::Blue)), area);
}

// ── Footer / log ────────────────────────────────────────────────

fn render_footer(
    state: &DustState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let plain = Style::default().fg(Color::Gray);
    let on_off = |on: bool| if on { "On" } else { "Off" };
    let (reset_label, reset_style) = if state.reset_armed {
        (
            "[X] Confirm reset",
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        ("[X] Reset", Style::default().fg(Color::Red))
    };

    let mut cs = click_state.borrow_mut();
    TabBar::new("│")
        .tab("[V] Save", plain, SAVE)
        .tab("[L] Load", plain, LOAD)
        .tab(format!("[M] Music {}", on_off(state.settings.bgm_on)), plain, TOGGLE_MUSIC)
        .tab(format!("[K] Click {}", on_off(state.settings.click_sound_on)), plain, TOGGLE_CLICK_SOUND)
        .tab(reset_label, reset_style, RESET_SAVE)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .render(f, area, &mut cs);
}

fn notice_style(important: bool, recent: bool) -> Style {
    let base = if important {
        Style::default().fg(Color::Yellow)
    } else if recent {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if recent {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    }
}

fn render_latest_notice(state: &DustState, f: &mut Frame, area: Rect) {
    if let Some(entry) = state.log.last() {
        let line = Line::from(Span::styled(entry.text.as_str(), notice_style(entry.is_important, true)));
        f.render_widget(Paragraph::new(line), area);
    }
}

fn render_log(state: &DustState, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;

    // Newest first
    let lines: Vec<Line> = state
        .log
        .iter()
        .rev()
        .take(visible)
        .enumerate()
        .map(|(i, entry)| Line::from(Span::styled(entry.text.as_str(), notice_style(entry.is_important, i < 3))))
        .collect();

    let widget = Paragraph::new(lines)
        .block(panel(" Log ".into(), Color::Blue))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
