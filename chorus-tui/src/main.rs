//! chorus-tui - Terminal UI for Chorus
//!
//! Friend list with two age-limited panels and a timeline with likes and a
//! debounced text field, all backed by one store.

use std::path::PathBuf;

use chorus_tui::{
    app::{action_for_key, event::EventHandler, event::TuiEvent, intents, reduce, Action, AppState},
    error::Result,
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui::{self, Views},
};
use libchorus::{logging, mock::MockData, ChorusService, Config};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = Config::load()?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, config);

    restore_terminal(terminal)?;
    result?;
    Ok(())
}

/// The terminal is in raw mode, so logs only go to the file named by
/// `CHORUS_TUI_LOG`
fn init_logging() -> anyhow::Result<()> {
    let Ok(path) = std::env::var("CHORUS_TUI_LOG") else {
        return Ok(());
    };
    let path = PathBuf::from(shellexpand::tilde(&path).into_owned());
    logging::config_from_env().with_file(path).init()?;
    Ok(())
}

fn run_app(terminal: &mut Tui, config: Config) -> Result<()> {
    let mut state = AppState::from_config(&config);
    let mut service = ChorusService::new(config)?;
    let mut mock = MockData::new();
    let mut views = Views::new();
    let events = EventHandler::new(state.config.tick_rate_ms);

    tracing::info!("chorus-tui started");

    loop {
        views.sync_mounts(&state, &service);
        let view = views.build(&state, service.state())?;
        terminal.draw(|frame| ui::render(frame, &state, &view))?;

        let action = match events.next()? {
            TuiEvent::Key(key) => action_for_key(&state, key),
            other => Some(other.into()),
        };

        if let Some(action) = action {
            state = reduce(state, action.clone());
            if let Action::Intent(ref intent) = action {
                let outcome = intents::store_action(intent, &state, service.state(), &mut mock)
                    .and_then(|store_action| match store_action {
                        Some(store_action) => service.dispatch(store_action),
                        None => Ok(()),
                    });
                if let Err(e) = outcome {
                    tracing::warn!(error = %e, "Store rejected action");
                    state = reduce(state, Action::ShowError(e.to_string()));
                }
            }
        }

        if let Err(e) = service.pump() {
            tracing::warn!(error = %e, "Delayed action rejected");
            state = reduce(state, Action::ShowError(e.to_string()));
        }

        let entries = service.state().timeline()?.timelines.len();
        if entries != state.timeline.entries {
            state = reduce(state, Action::SyncTimeline { entries });
        }

        if state.should_quit {
            break;
        }
    }

    views.timeline.unmount();
    tracing::info!("chorus-tui stopped");
    Ok(())
}
