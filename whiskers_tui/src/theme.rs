use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Base
    pub base_style: Style,
    pub border_style: Style,
    // Header
    pub header_title_style: Style,
    pub header_subtitle_style: Style,
    // Input
    pub input_prompt_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub input_disabled_style: Style,
    // Transcript
    pub user_label_style: Style,
    pub user_text_style: Style,
    pub bot_label_style: Style,
    pub bot_text_style: Style,
    pub source_text_style: Style,
    pub link_style: Style,
    pub timestamp_style: Style,
    pub typing_style: Style,
    // Footer
    pub footer_text_style: Style,
    pub footer_highlight_style: Style,
    pub footer_key_style: Style,
    pub footer_selected_style: Style,
    pub footer_disabled_style: Style,
    // Alerts
    pub error_style: Style,
    pub success_style: Style,
}

impl Theme {
    pub fn from_config(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "auto" => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light => Self::light(),
                dark_light::Mode::Default => Self::dark(),
            },
            _ => Self::retro(),
        }
    }

    pub fn retro() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_dim = Color::Rgb(150, 110, 0);
        let red_alert = Color::Rgb(255, 40, 40);
        let grey = Color::Rgb(170, 170, 170);
        let bg = Color::Black;

        Self {
            base_style: Style::default().fg(amber),
            border_style: Style::default().fg(amber_dim),

            header_title_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(amber_dim),

            input_prompt_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default()
                .bg(amber)
                .fg(bg)
                .add_modifier(Modifier::RAPID_BLINK),
            input_disabled_style: Style::default().fg(grey).add_modifier(Modifier::DIM),

            user_label_style: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::White),
            bot_label_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(amber),
            source_text_style: Style::default().fg(amber_dim).add_modifier(Modifier::ITALIC),
            link_style: Style::default()
                .fg(amber_dim)
                .add_modifier(Modifier::UNDERLINED),
            timestamp_style: Style::default().fg(amber_dim),
            typing_style: Style::default()
                .fg(amber_dim)
                .add_modifier(Modifier::SLOW_BLINK),

            footer_text_style: Style::default().fg(amber_dim),
            footer_highlight_style: Style::default().fg(amber),
            footer_key_style: Style::default().fg(bg).bg(amber),
            footer_selected_style: Style::default()
                .fg(Color::Blue)
                .bg(Color::Rgb(190, 190, 190))
                .add_modifier(Modifier::BOLD),
            footer_disabled_style: Style::default().fg(bg).bg(grey),

            error_style: Style::default().fg(red_alert),
            success_style: Style::default().fg(bg).bg(amber),
        }
    }

    pub fn light() -> Self {
        let text_main = Color::Black;
        let text_dim = Color::DarkGray;
        let accent = Color::Blue;
        let bot = Color::Magenta;
        let grey = Color::Gray;

        Self {
            base_style: Style::default().fg(text_main),
            border_style: Style::default().fg(accent),

            header_title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(text_dim),

            input_prompt_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(accent),
            input_cursor_style: Style::default()
                .bg(accent)
                .fg(Color::White)
                .add_modifier(Modifier::RAPID_BLINK),
            input_disabled_style: Style::default().fg(grey),

            user_label_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(text_main),
            bot_label_style: Style::default().fg(bot).add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(text_main),
            source_text_style: Style::default().fg(text_dim).add_modifier(Modifier::ITALIC),
            link_style: Style::default().fg(accent).add_modifier(Modifier::UNDERLINED),
            timestamp_style: Style::default().fg(text_dim),
            typing_style: Style::default().fg(bot).add_modifier(Modifier::SLOW_BLINK),

            footer_text_style: Style::default().fg(text_dim),
            footer_highlight_style: Style::default().fg(accent),
            footer_key_style: Style::default().fg(Color::White).bg(accent),
            footer_selected_style: Style::default()
                .fg(Color::Blue)
                .bg(Color::Rgb(190, 190, 190))
                .add_modifier(Modifier::BOLD),
            footer_disabled_style: Style::default().fg(Color::White).bg(grey),

            error_style: Style::default().fg(Color::Red),
            success_style: Style::default().fg(Color::White).bg(accent),
        }
    }

    pub fn dark() -> Self {
        let amber = Color::Rgb(255, 176, 0);
        let amber_dim = Color::Rgb(150, 110, 0);
        let teal = Color::Rgb(90, 200, 190);
        let grey = Color::Rgb(110, 110, 110);
        let bg = Color::Rgb(14, 12, 10);

        Self {
            base_style: Style::default().fg(amber).bg(bg),
            border_style: Style::default().fg(amber_dim),

            header_title_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            header_subtitle_style: Style::default().fg(amber_dim),

            input_prompt_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default()
                .bg(amber)
                .fg(bg)
                .add_modifier(Modifier::RAPID_BLINK),
            input_disabled_style: Style::default().fg(grey),

            user_label_style: Style::default().fg(teal).add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::White),
            bot_label_style: Style::default().fg(amber).add_modifier(Modifier::BOLD),
            bot_text_style: Style::default().fg(amber),
            source_text_style: Style::default().fg(amber_dim).add_modifier(Modifier::ITALIC),
            link_style: Style::default().fg(teal).add_modifier(Modifier::UNDERLINED),
            timestamp_style: Style::default().fg(grey),
            typing_style: Style::default()
                .fg(amber_dim)
                .add_modifier(Modifier::SLOW_BLINK),

            footer_text_style: Style::default().fg(amber_dim),
            footer_highlight_style: Style::default().fg(amber),
            footer_key_style: Style::default().fg(bg).bg(amber),
            footer_selected_style: Style::default()
                .fg(Color::Blue)
                .bg(Color::Rgb(190, 190, 190))
                .add_modifier(Modifier::BOLD),
            footer_disabled_style: Style::default().fg(bg).bg(grey),

            error_style: Style::default().fg(Color::Rgb(255, 80, 80)),
            success_style: Style::default().fg(bg).bg(amber),
        }
    }
}
