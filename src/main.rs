mod config;
mod error;
mod logging;
mod models;
mod storage;
mod summary;
mod ui;

use std::io;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::prelude::*;
use tracing::info;

use crate::config::{Cli, Config};
use crate::error::AppError;
use crate::storage::{FileStorage, MemoryStorage, Storage, load_state};
use crate::ui::{App, render};

fn main() -> Result<(), AppError> {
    let config = Config::load(Cli::parse())?;
    logging::init(config.log_file.as_deref(), &config.log_level)?;

    let storage: Box<dyn Storage> = if config.ephemeral {
        Box::new(MemoryStorage::new())
    } else {
        Box::new(FileStorage::new(&config.data_dir))
    };
    let state = load_state(storage.as_ref());
    info!(
        data_dir = %config.data_dir.display(),
        ephemeral = config.ephemeral,
        habits = state.habits.len(),
        "starting"
    );

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // 创建应用状态
    let mut app = App::new(state, storage, rng);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result.map_err(AppError::from)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if ui::handle_key_event(app, key.code)? {
                    break;
                }
            }
            Event::Mouse(mouse) => ui::handle_mouse_event(app, mouse),
            _ => {}
        }
    }
    Ok(())
}
