use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use whiskers_core::transcript::TYPING_PLACEHOLDER;
use whiskers_core::{Role, TranscriptEntry};

use crate::app::editor::split_line_at_char;
use crate::app::state::{App, AppState, FocusArea, FooterAction, FooterButton, DISABLED_PLACEHOLDER};
use crate::theme::Theme;

pub const INPUT_PREFIX_WIDTH: u16 = 3;

// "[HH:MM] " plus an 8-wide role label and a space.
const ENTRY_PREFIX_WIDTH: usize = 17;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let very_narrow_width = area.width < 80;
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(main_layout_constraints())
        .split(area);

    let block_style = app.theme.base_style;
    let border_style = app.theme.border_style;

    // --- SECTION 1: HEADER ---
    let header_text = if very_narrow_width {
        Line::from(vec![
            Span::styled(" WHISKERS ", app.theme.header_title_style),
            Span::styled(" // CHAT ", app.theme.header_subtitle_style),
        ])
    } else {
        Line::from(vec![
            Span::styled(" W H I S K E R S ", app.theme.header_title_style),
            Span::styled(" // CAT FACTS & TRIVIA ", app.theme.header_subtitle_style),
        ])
    };
    let session_title = match app.state {
        AppState::Input => " SESSION: ACTIVE ",
        AppState::Terminated => " SESSION: TERMINATED ",
    };
    let header = Paragraph::new(header_text).style(block_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(session_title),
    );
    f.render_widget(header, main_layout[0]);

    // --- SECTION 2: TRANSCRIPT (OR LOGS) + SCROLLBAR ---
    render_output(f, app, main_layout[1]);

    // --- SECTION 3: INPUT ---
    render_input(f, app, main_layout[2]);

    // --- SECTION 4: BUTTON BAR ---
    render_button_bar(f, app, main_layout[3]);

    // --- SECTION 5: FOOTER ---
    let footer_block = Block::default()
        .borders(Borders::TOP)
        .border_style(border_style);
    f.render_widget(&footer_block, main_layout[4]);
    let footer_inner = footer_block.inner(main_layout[4]);

    let mode = match app.state {
        AppState::Input => "CHAT",
        AppState::Terminated => "TERMINATED",
    };
    let banks = match app.banks {
        Some((cat_facts, trivia)) => format!("{} cat / {} trivia", cat_facts, trivia),
        None => "LOADING".to_string(),
    };
    let mut info = vec![
        Span::styled(" MODE: ", app.theme.footer_text_style),
        Span::styled(mode, app.theme.footer_highlight_style),
        Span::styled("  BANKS: ", app.theme.footer_text_style),
        Span::styled(banks, app.theme.footer_highlight_style),
    ];
    if !very_narrow_width {
        info.push(Span::styled("  SENT: ", app.theme.footer_text_style));
        info.push(Span::styled(
            app.sent_count.to_string(),
            app.theme.footer_highlight_style,
        ));
        info.push(Span::styled("  THEME: ", app.theme.footer_text_style));
        info.push(Span::styled(
            app.config.theme.clone(),
            app.theme.footer_highlight_style,
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(info)).style(block_style),
        footer_inner,
    );
}

fn main_layout_constraints() -> [Constraint; 5] {
    [
        Constraint::Length(3), // 1. Header
        Constraint::Min(1),    // 2. Transcript
        Constraint::Length(3), // 3. Input
        Constraint::Length(1), // 4. Buttons
        Constraint::Length(2), // 5. Footer
    ]
}

fn render_output(f: &mut Frame, app: &mut App, area: Rect) {
    let title = if app.show_logs {
        " SYSTEM LOGS "
    } else {
        " TRANSCRIPT "
    };
    let output_block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style)
        .title(Span::styled(title, app.theme.header_title_style));
    f.render_widget(&output_block, area);
    let inner = output_block.inner(area);

    // One column stays reserved for the scrollbar so wrapping does not shift
    // when it appears.
    let text_width = inner.width.saturating_sub(1) as usize;
    let lines = if app.show_logs {
        render_logs(app, &app.theme, text_width)
    } else {
        render_transcript(app, &app.theme, text_width)
    };

    let line_count = lines.len().min(u16::MAX as usize) as u16;
    let max_scroll = line_count.saturating_sub(inner.height);
    let clamped_scroll = app.output_scroll.min(max_scroll);
    let show_scrollbar = max_scroll > 0 && inner.width > 1 && inner.height > 0;

    let text_area = Rect {
        width: inner.width.saturating_sub(1),
        ..inner
    };
    let para = Paragraph::new(lines)
        .style(app.theme.base_style)
        .scroll((clamped_scroll, 0));
    f.render_widget(para, text_area);

    let scrollbar_rect = if show_scrollbar {
        let mut scrollbar_state =
            ScrollbarState::new(line_count.max(1) as usize).position(clamped_scroll as usize);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_style(app.theme.border_style)
            .track_style(app.theme.base_style);
        f.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        Some(Rect {
            x: inner.x + inner.width - 1,
            y: inner.y,
            width: 1,
            height: inner.height,
        })
    } else {
        None
    };

    app.output_max_scroll = max_scroll;
    app.output_scroll = clamped_scroll;
    app.output_scrollbar_rect = scrollbar_rect;
}

fn render_input(f: &mut Frame, app: &mut App, area: Rect) {
    let enabled = app.input_enabled();
    let (title, border_style) = if enabled {
        (" MESSAGE ", app.theme.border_style)
    } else {
        (" INPUT DISABLED ", app.theme.input_disabled_style)
    };

    let content = if enabled {
        let cursor_visible =
            app.focus == FocusArea::Input && (app.tick_count / 8).is_multiple_of(2);
        render_prompt(
            &app.input,
            Span::styled(" > ", app.theme.input_prompt_style),
            app.theme.input_text_style,
            app.theme.input_cursor_style,
            cursor_visible,
            app.input_cursor,
        )
    } else {
        Line::from(vec![
            Span::styled(" > ", app.theme.input_disabled_style),
            Span::styled(DISABLED_PLACEHOLDER, app.theme.input_disabled_style),
        ])
    };

    let input = Paragraph::new(content).style(app.theme.base_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, app.theme.header_title_style)),
    );
    f.render_widget(input, area);
    app.input_rect = Some(Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    });
}

fn render_prompt<'a>(
    text: &'a str,
    prefix: Span<'a>,
    text_style: Style,
    cursor_style: Style,
    cursor_visible: bool,
    cursor_pos: usize,
) -> Line<'a> {
    let (before, current, after) = split_line_at_char(text, cursor_pos);
    let mut spans = vec![prefix];
    if !before.is_empty() {
        spans.push(Span::styled(before, text_style));
    }
    match current {
        Some(ch) => {
            let style = if cursor_visible { cursor_style } else { text_style };
            spans.push(Span::styled(ch.to_string(), style));
        }
        None => {
            if cursor_visible {
                spans.push(Span::styled(" ", cursor_style));
            }
        }
    }
    if !after.is_empty() {
        spans.push(Span::styled(after, text_style));
    }
    Line::from(spans)
}

fn compact_button_label(label: &str) -> String {
    match label {
        "CLEAR" => "CLR".to_string(),
        "LOGS:ON" => "LOG+".to_string(),
        "LOGS:OFF" => "LOG-".to_string(),
        other => other.to_string(),
    }
}

fn button_row_width(buttons: &[(FooterAction, String, bool)]) -> u16 {
    let mut width = 0u16;
    for (idx, (_, label, _)) in buttons.iter().enumerate() {
        let token_width = label.chars().count() as u16 + 4; // " [label] "
        width = width.saturating_add(token_width);
        if idx + 1 < buttons.len() {
            width = width.saturating_add(1);
        }
    }
    width
}

/// (action, label, enabled) for the current state.
fn footer_buttons_for_state(app: &App) -> Vec<(FooterAction, String, bool)> {
    let enabled = app.input_enabled();
    let logs_label = if app.show_logs { "LOGS:ON" } else { "LOGS:OFF" };
    vec![
        (FooterAction::Submit, "SEND".to_string(), enabled),
        (FooterAction::ClearInput, "CLEAR".to_string(), enabled),
        (FooterAction::ToggleLogs, logs_label.to_string(), true),
        (FooterAction::Quit, "QUIT".to_string(), true),
    ]
}

fn render_button_bar(f: &mut Frame, app: &mut App, area: Rect) {
    app.footer_buttons.clear();
    if area.height == 0 || area.width == 0 {
        app.footer_focus = 0;
        if app.focus == FocusArea::FooterButtons && app.input_enabled() {
            app.focus = FocusArea::Input;
        }
        return;
    }

    let compact = area.width < 60;
    let mut candidates: Vec<(FooterAction, String, bool)> = footer_buttons_for_state(app)
        .into_iter()
        .map(|(action, label, enabled)| {
            let rendered = if compact {
                compact_button_label(&label)
            } else {
                label
            };
            (action, rendered, enabled)
        })
        .collect();
    while !candidates.is_empty() && button_row_width(&candidates) > area.width {
        candidates.pop();
    }
    if candidates.is_empty() {
        return;
    }

    // footer_focus indexes the enabled buttons only; disabled ones are drawn
    // but never take focus or clicks.
    let enabled_count = candidates.iter().filter(|(_, _, on)| *on).count();
    if app.footer_focus >= enabled_count {
        app.footer_focus = 0;
    }

    let constraints: Vec<Constraint> = candidates
        .iter()
        .map(|(_, label, _)| Constraint::Length(label.chars().count() as u16 + 4))
        .collect();
    let button_rects = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .spacing(1)
        .split(area);

    for (rect, (action, label, enabled)) in button_rects.iter().zip(candidates) {
        let style = if !enabled {
            app.theme.footer_disabled_style
        } else if app.focus == FocusArea::FooterButtons
            && app.footer_focus == app.footer_buttons.len()
        {
            app.theme.footer_selected_style
        } else {
            app.theme.footer_key_style
        };
        f.render_widget(Paragraph::new(format!(" [{}] ", label)).style(style), *rect);
        if enabled {
            app.footer_buttons.push(FooterButton {
                rect: *rect,
                action,
            });
        }
    }
}

// --- HELPER RENDERERS ---

fn render_transcript(app: &App, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for entry in app.transcript.entries() {
        push_entry_lines(&mut lines, entry, theme, width);
    }
    if app.transcript.is_typing() {
        let dots = ".".repeat(((app.tick_count / 4) % 4) as usize);
        lines.push(Line::from(vec![
            Span::styled(" ".repeat(8), theme.timestamp_style),
            Span::styled(format!("{:<8} ", "WHISKERS"), theme.bot_label_style),
            Span::styled(
                format!("{}{}", TYPING_PLACEHOLDER.trim_end_matches('.'), dots),
                theme.typing_style,
            ),
        ]));
    }
    lines
}

fn push_entry_lines(
    lines: &mut Vec<Line<'static>>,
    entry: &TranscriptEntry,
    theme: &Theme,
    width: usize,
) {
    let (label, label_style, text_style) = match entry.role {
        Role::User => ("YOU", theme.user_label_style, theme.user_text_style),
        Role::Bot => ("WHISKERS", theme.bot_label_style, theme.bot_text_style),
        Role::Source => ("", theme.bot_label_style, theme.source_text_style),
    };
    let text_width = width.saturating_sub(ENTRY_PREFIX_WIDTH).max(10);
    let indent = " ".repeat(ENTRY_PREFIX_WIDTH);

    for (idx, row) in wrap_text(&entry.text, text_width).into_iter().enumerate() {
        if idx == 0 {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] ", entry.at.format("%H:%M")),
                    theme.timestamp_style,
                ),
                Span::styled(format!("{:<8} ", label), label_style),
                Span::styled(row, text_style),
            ]));
        } else {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(row, text_style),
            ]));
        }
    }

    if let Some(link) = &entry.link {
        lines.push(Line::from(vec![
            Span::raw(indent),
            Span::styled(format!("-> {}", link), theme.link_style),
        ]));
    }
}

fn render_logs(app: &App, theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let endpoints = &app.config.endpoints;
    let chat = &app.config.chat;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(" LOG_PANEL: ", theme.header_subtitle_style),
            Span::styled("ACTIVE", theme.success_style.add_modifier(Modifier::BOLD)),
        ]),
        setting_line(" CAT FACTS: ", endpoints.cat_facts_url.clone(), theme),
        setting_line(" TRIVIA: ", endpoints.trivia_url.clone(), theme),
        setting_line(" ON THIS DAY: ", endpoints.history_base_url.clone(), theme),
        setting_line(
            " TIMEOUT: ",
            format!("{}s", endpoints.request_timeout_secs),
            theme,
        ),
        setting_line(
            " TURNS: ",
            format!("{}-{} per session", chat.min_turns, chat.max_turns),
            theme,
        ),
        setting_line(
            " SOURCE DELAY: ",
            format!("{}ms", chat.source_delay_ms),
            theme,
        ),
        setting_line(
            " DISTRACTIONS: ",
            format!("{} links", app.config.links.len()),
            theme,
        ),
    ];
    match &app.log_path {
        Some(path) => lines.push(setting_line(" LOG FILE: ", path.display().to_string(), theme)),
        None => lines.push(Line::from(Span::styled(
            " LOG FILE: (not available)",
            theme.error_style,
        ))),
    }
    lines.push(Line::from(""));

    let text_width = width.saturating_sub(2).max(10);
    for entry in &app.logs {
        for row in wrap_text(entry, text_width) {
            lines.push(Line::from(Span::styled(
                format!("  {}", row),
                theme.header_subtitle_style,
            )));
        }
    }
    lines
}

fn setting_line(name: &'static str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(name, theme.header_subtitle_style),
        Span::styled(value, theme.header_title_style),
    ])
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(width);
            rows.push(chars.into_iter().collect());
            chars = rest;
        }
        if chars.is_empty() {
            continue;
        }

        let needed = if current_len == 0 {
            chars.len()
        } else {
            current_len + 1 + chars.len()
        };
        if needed > width {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += chars.len();
        current.extend(chars);
    }

    if current_len > 0 || rows.is_empty() {
        rows.push(current);
    }
    rows
}
