//! Runtime: event loop and input routing for the reader.
//!
//! - A dedicated input task blocks on `crossterm` and forwards events over a
//!   channel.
//! - The loop selects between input, a ticker and Ctrl+C. Input effects are
//!   applied first; the visibility batch they cause is evaluated right after,
//!   so a navigation always lands before the next batch.
//! - Ticking is fast (16 ms) while a smooth scroll is in flight and slow
//!   otherwise. Each tick advances the animation and feeds the resulting
//!   visibility changes to the scroll-sync controller.
//! - Rendering happens only when something changed.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::app::{App, Effect, Msg};
use crate::ui::components::Component;
use crate::ui::main_component::MainView;

const FAST_TICK: Duration = Duration::from_millis(16);
const IDLE_TICK: Duration = Duration::from_millis(1000);

/// Spawn a task that polls terminal input and forwards `crossterm` events.
fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    tokio::task::spawn_blocking(move || {
        let mut last_mouse_move = Instant::now();
        loop {
            match event::poll(FAST_TICK) {
                Ok(false) => {
                    if sender.is_closed() {
                        break;
                    }
                    continue;
                }
                Ok(true) => {}
                Err(error) => {
                    warn!("Failed to poll terminal input: {}", error);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    // Throttle mouse move events to once per fast tick.
                    let is_mouse_move = event.as_mouse_event().is_some_and(|mouse| mouse.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < FAST_TICK {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read terminal input: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => {
            main_view.handle_message(app, Msg::Resize(width, height));
            Vec::new()
        }
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

fn ticker_for(interval: Duration) -> time::Interval {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Set up the terminal, run the loop until the user quits, then restore the terminal.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut input_receiver = spawn_input_task();
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;

    if let Ok(size) = terminal.size() {
        app.update(&Msg::Resize(size.width, size.height));
    }

    let outcome = event_loop(&mut app, &mut main_view, &mut terminal, &mut input_receiver).await;
    cleanup_terminal(&mut terminal)?;
    outcome
}

async fn event_loop(
    app: &mut App,
    main_view: &mut MainView,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut current_interval = IDLE_TICK;
    let mut ticker = ticker_for(current_interval);
    render(terminal, app, main_view)?;

    loop {
        let target_interval = if app.is_animating() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = ticker_for(current_interval);
        }

        let mut needs_render = false;
        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("input channel closed");
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                for effect in handle_input_event(app, main_view, event) {
                    app.apply_effect(effect);
                }
                needs_render = true;
            }
            _ = ticker.tick() => {
                needs_render = main_view.handle_message(app, Msg::Tick);
            }
            _ = signal::ctrl_c() => { break; }
        }

        if app.should_quit {
            break;
        }
        if needs_render {
            render(terminal, app, main_view)?;
        }
    }
    Ok(())
}
