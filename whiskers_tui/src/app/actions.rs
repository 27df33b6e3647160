use crate::app::state::{App, FocusArea, FooterAction};

pub fn perform_footer_action(app: &mut App, action: FooterAction) -> bool {
    match action {
        FooterAction::Quit => return true,
        FooterAction::ToggleLogs => {
            app.show_logs = !app.show_logs;
            app.push_log(format!(
                "Log panel: {}",
                if app.show_logs { "ON" } else { "OFF" }
            ));
            if app.show_logs {
                app.output_scroll = 0;
            } else {
                app.follow_latest();
            }
            app.dirty = true;
        }
        FooterAction::ClearInput => {
            if app.input_enabled() {
                app.input.clear();
                app.input_cursor = 0;
                app.focus = FocusArea::Input;
            }
            app.dirty = true;
        }
        FooterAction::Submit => {
            if app.submit() {
                app.focus = FocusArea::Input;
            }
            app.dirty = true;
        }
    }

    false
}
