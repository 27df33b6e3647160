use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::sync::Arc;
use whiskers_core::{ChatSession, Config};
use whiskers_sources::{ContentApi, HttpContentApi};

mod app;
mod theme;
mod ui;

use app::runtime::run_app;
use app::session_log::init_session_log;
use app::state::App;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--version") {
        println!("whiskers {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    if args.iter().any(|a| a == "--init-config") {
        let path = Config::default_path()?;
        Config::default()
            .save_to(&path)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = Config::load().await?;

    // Logging is best effort; the chat still works without a log file.
    let log_path = match init_session_log(&config.log_level) {
        Ok(path) => Some(path),
        Err(e) => {
            eprintln!("warning: {:#}", e);
            None
        }
    };
    tracing::info!(theme = %config.theme, "whiskers starting");

    let api: Arc<dyn ContentApi> = Arc::new(
        HttpContentApi::new(config.endpoints.clone(), config.chat.bank_size)
            .context("Failed to build HTTP client")?,
    );
    let session = ChatSession::new(
        api,
        &config.chat,
        config.distraction_links(),
        StdRng::from_entropy(),
    );
    let mut app = App::new(config, session.spawn(), log_path);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Kitty keyboard protocol where available; plain key events otherwise.
    let mut keyboard_enhancement_enabled = false;
    if crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false) {
        let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES;
        if execute!(stdout, PushKeyboardEnhancementFlags(flags)).is_ok() {
            keyboard_enhancement_enabled = true;
        }
    }

    // Mouse support enables clickable buttons and the scrollbar.
    let mouse_capture_enabled = execute!(stdout, EnableMouseCapture).is_ok();
    let paste_enabled = execute!(stdout, EnableBracketedPaste).is_ok();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    if paste_enabled {
        let _ = execute!(terminal.backend_mut(), DisableBracketedPaste);
    }
    if mouse_capture_enabled {
        let _ = execute!(terminal.backend_mut(), DisableMouseCapture);
    }
    if keyboard_enhancement_enabled {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "ui loop failed");
        println!("{:?}", err);
    }

    tracing::info!("whiskers exiting");
    Ok(())
}
