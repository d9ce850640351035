//! Terminal setup and the event loop.
//!
//! One tokio task multiplexes terminal events and a redraw tick. The
//! network request runs as its own task owned by the view; the tick
//! collects its settlement.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
    EventStream, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use super::app::TuiApp;
use super::{input, layout};
use crate::explainer::ExplainerView;

/// Redraw / spinner / settlement-poll interval.
const TICK: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI until the user quits.
pub async fn run(view: ExplainerView) -> anyhow::Result<()> {
    let mut terminal = setup_terminal()?;
    install_panic_hook();
    info!("explainer TUI started");

    let result = event_loop(&mut terminal, TuiApp::new(view)).await;

    restore_terminal()?;
    terminal.show_cursor()?;
    info!("explainer TUI stopped");
    result
}

async fn event_loop(terminal: &mut Term, mut app: TuiApp) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(TICK);

    while !app.should_quit {
        terminal.draw(|f| layout::draw(f, &mut app))?;

        tokio::select! {
            _ = tick.tick() => app.on_tick(),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    input::handle_key(&mut app, key);
                }
                Some(Ok(Event::Mouse(mouse))) => input::handle_mouse(&mut app, mouse),
                Some(Ok(Event::Paste(text))) => app.paste(&text),
                Some(Ok(other)) => debug!(?other, "ignored terminal event"),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    app.cancel();
    Ok(())
}

fn setup_terminal() -> anyhow::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}
