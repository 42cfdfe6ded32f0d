use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use tracing::{error, info};

use gradegrip::cli::CliArgs;
use gradegrip::config::Config;
use gradegrip::store::TomlSheetStore;
use gradegrip::tui::{TuiMessage, TuiModel, TuiUpdate, TuiView};
use gradegrip_core::app::{apply, Command};
use gradegrip_core::ports::SheetStore;
use gradegrip_core::{CourseSheet, Event};

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    model: &mut TuiModel,
    store: &dyn SheetStore,
) -> Result<()> {
    loop {
        terminal.draw(|f| TuiView::render(model, f))?;

        if let TermEvent::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                let msg = TuiUpdate::handle_key(model, key.code, key.modifiers)?;
                if let TuiMessage::Command(command) = msg {
                    dispatch(model, &command, store);
                }
            }
        }

        if model.should_quit {
            break;
        }
    }
    Ok(())
}

/// Apply a command to the current sheet snapshot and persist the result.
///
/// The store always receives the post-mutation snapshot; a rejected command
/// leaves both the model and the file untouched.
fn dispatch(model: &mut TuiModel, command: &Command, store: &dyn SheetStore) {
    match apply(&model.sheet, &model.scale, command) {
        Ok(applied) => {
            let mutated = applied.sheet != model.sheet;
            model.apply(applied.sheet, &applied.event);

            if mutated {
                if let Err(err) = store.save(&model.sheet) {
                    error!("Failed to persist sheet: {err:#}");
                    model.add_error(format!("Could not save sheet: {err}"));
                }
            }
        }
        Err(err) => {
            info!("Command rejected: {err}");
            model.apply_event(&Event::InputRejected {
                msg: err.to_string(),
            });
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing with env filter
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting GradeGrip");

    let cli_args = CliArgs::parse();
    let config_path = cli_args.config.clone();
    let config = Config::from_cli_and_file(cli_args, config_path)?;

    let store = TomlSheetStore::new(config.sheet_path.clone());
    let sheet = match store.load() {
        Ok(Some(sheet)) => {
            info!("Loaded {} course(s) from {}", sheet.len(), store.path().display());
            sheet
        }
        Ok(None) => CourseSheet::new(),
        Err(err) => {
            error!("Failed to load sheet, starting empty: {err:#}");
            CourseSheet::new()
        }
    };

    let mut model = TuiModel::new(sheet, config.grade_scale(), config.ui.decimal_places);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut model, &store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if config.ui.autosave_on_exit {
        if let Err(err) = store.save(&model.sheet) {
            error!("Failed to save sheet on exit: {err:#}");
        }
    }

    if let Err(err) = res {
        error!("Application error: {err}");
        println!("Error: {err}");
    }

    info!("GradeGrip shut down cleanly");
    Ok(())
}
