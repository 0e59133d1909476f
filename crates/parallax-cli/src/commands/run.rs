use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use parallax_core::AppConfig;
use parallax_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    scroll::ScrollConfigExt,
    ui,
};

pub async fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("parallax"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: AppConfig) -> Result<()> {
    // Faster frames while scrolling or scanning
    let event_handler = EventHandler::with_animation_tick(
        config.ui.tick_rate_ms,
        config.scroll.animation_tick_duration(),
    );

    let mut app = App::new(config);
    app.resize(terminal.size()?.height);
    info!("Demo page started");

    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = true;

    loop {
        app.on_frame(Instant::now());
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if let Some(event) = event_handler.next(needs_fast_update)? {
            match event {
                AppEvent::Key(key) => {
                    if let Some(action) = handle_key_event(key) {
                        app.handle_action(action);
                    }
                }
                AppEvent::Resize(_, height) => app.resize(height),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    app.unmount();
    info!("Demo page closed");
    Ok(())
}
