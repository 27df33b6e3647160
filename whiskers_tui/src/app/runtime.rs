use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;

use crate::app::actions::perform_footer_action;
use crate::app::editor::{
    char_count, delete_char_at_cursor, delete_char_before_cursor, insert_char_at_cursor,
    point_in_rect, set_cursor_from_click,
};
use crate::app::state::{App, FocusArea, FooterAction};
use crate::ui::main_view::{ui, INPUT_PREFIX_WIDTH};

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick_count += 1;
        app.drain_events();

        if app.dirty || app.is_waiting_for_reply() {
            terminal.draw(|f| ui(f, app))?;
            app.dirty = false;
        }

        let poll_ms = if app.is_waiting_for_reply() { 50 } else { 200 };
        if event::poll(Duration::from_millis(poll_ms))? {
            app.dirty = true;
            if handle_runtime_event(app, event::read()?) {
                return Ok(());
            }
        }
    }
}

/// Returns true when the app should quit.
pub fn handle_runtime_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_press(app, key),
        Event::Paste(text) => {
            handle_paste(app, &text);
            false
        }
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => {
            app.follow_latest();
            false
        }
        _ => false,
    }
}

fn handle_key_press(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let editing = app.focus == FocusArea::Input && app.input_enabled();

    match key.code {
        KeyCode::Char('c') if ctrl => return true,
        KeyCode::Char('t') if ctrl => return perform_footer_action(app, FooterAction::ToggleLogs),
        KeyCode::Char('u') if ctrl => return perform_footer_action(app, FooterAction::ClearInput),
        KeyCode::Esc => return true,
        _ => {}
    }

    // Transcript scrolling works regardless of focus.
    match key.code {
        KeyCode::Up => {
            app.output_scroll = app.output_scroll.saturating_sub(1);
            return false;
        }
        KeyCode::Down => {
            app.output_scroll = app.output_scroll.saturating_add(1);
            return false;
        }
        KeyCode::PageUp => {
            app.output_scroll = app.output_scroll.saturating_sub(10);
            return false;
        }
        KeyCode::PageDown => {
            app.output_scroll = app.output_scroll.saturating_add(10);
            return false;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                FocusArea::Input if !app.footer_buttons.is_empty() => FocusArea::FooterButtons,
                FocusArea::FooterButtons if app.input_enabled() => FocusArea::Input,
                other => other,
            };
            return false;
        }
        KeyCode::Left if app.focus == FocusArea::FooterButtons => {
            if !app.footer_buttons.is_empty() {
                if app.footer_focus == 0 {
                    app.footer_focus = app.footer_buttons.len() - 1;
                } else {
                    app.footer_focus -= 1;
                }
            }
            return false;
        }
        KeyCode::Right if app.focus == FocusArea::FooterButtons => {
            if !app.footer_buttons.is_empty() {
                app.footer_focus = (app.footer_focus + 1) % app.footer_buttons.len();
            }
            return false;
        }
        KeyCode::Enter | KeyCode::Char(' ') if app.focus == FocusArea::FooterButtons => {
            if let Some(action) = app.footer_buttons.get(app.footer_focus).map(|b| b.action) {
                return perform_footer_action(app, action);
            }
            return false;
        }
        _ => {}
    }

    if !editing {
        match key.code {
            KeyCode::Home => app.output_scroll = 0,
            KeyCode::End => app.output_scroll = app.output_max_scroll,
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Enter => return perform_footer_action(app, FooterAction::Submit),
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            if app.input_cursor < char_count(&app.input) {
                app.input_cursor += 1;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = char_count(&app.input),
        KeyCode::Char(c) => insert_char_at_cursor(&mut app.input, &mut app.input_cursor, c),
        KeyCode::Backspace => delete_char_before_cursor(&mut app.input, &mut app.input_cursor),
        KeyCode::Delete => delete_char_at_cursor(&mut app.input, &mut app.input_cursor),
        _ => {}
    }

    false
}

fn handle_paste(app: &mut App, text: &str) {
    if app.focus != FocusArea::Input || !app.input_enabled() {
        return;
    }
    for ch in text.chars() {
        insert_char_at_cursor(&mut app.input, &mut app.input_cursor, ch);
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> bool {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.output_scroll = app.output_scroll.saturating_sub(3);
        }
        MouseEventKind::ScrollDown => {
            app.output_scroll = app.output_scroll.saturating_add(3);
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Down(MouseButton::Left) => {
            // Clicking or dragging on the scrollbar jumps the transcript.
            if let Some(sb) = app.output_scrollbar_rect {
                if app.output_max_scroll > 0 && point_in_rect(sb, mouse.column, mouse.row) {
                    let track_h = sb.height.max(1);
                    let rel = mouse.row.saturating_sub(sb.y).min(track_h - 1);
                    let denom = track_h.saturating_sub(1).max(1) as u32;
                    let new_scroll = ((rel as u32) * (app.output_max_scroll as u32) / denom) as u16;
                    app.output_scroll = new_scroll.min(app.output_max_scroll);
                    return false;
                }
            }

            if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                return false;
            }

            let clicked = app
                .footer_buttons
                .iter()
                .enumerate()
                .find(|(_, btn)| point_in_rect(btn.rect, mouse.column, mouse.row))
                .map(|(idx, btn)| (idx, btn.action));
            if let Some((idx, action)) = clicked {
                app.focus = FocusArea::FooterButtons;
                app.footer_focus = idx;
                return perform_footer_action(app, action);
            }

            if app.input_enabled() {
                if let Some(area) = app.input_rect {
                    if point_in_rect(area, mouse.column, mouse.row) {
                        app.focus = FocusArea::Input;
                        set_cursor_from_click(
                            &app.input,
                            &mut app.input_cursor,
                            area,
                            mouse.column,
                            INPUT_PREFIX_WIDTH,
                        );
                    }
                }
            }
        }
        _ => {}
    }

    false
}
