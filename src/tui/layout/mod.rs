//! Single-screen layout for the Explainer View.
//!
//! ```text
//!            Vedabase AI Explainer
//!   Enter a Srimad Bhagavatam verse reference ...
//! ┌ Verse ─────────────────────────┐┌────────────┐
//! │ SB 1.1.1                        ││ » Explain  │
//! └─────────────────────────────────┘└────────────┘
//! ┌ Error ───────────────────────────────────────┐   (only with an error)
//! │ Failed to get explanation. Please try again. │
//! └──────────────────────────────────────────────┘
//! ┌ Explanation: ────────────────────────────────┐   (only with text)
//! │ ...                                          │
//! └──────────────────────────────────────────────┘
//!  [idle]  Data sourced from vedabase.io    Enter:Explain ...
//! ```

pub(crate) mod wrap;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use super::app::TuiApp;
use crate::explainer::Phase;

pub const TITLE: &str = "Vedabase AI Explainer";
pub const SUBTITLE: &str = "Enter a Srimad Bhagavatam verse reference (e.g., \"SB 1.1.1\") \
to receive a simplified explanation powered by AI.";
pub const PLACEHOLDER: &str = "Enter verse reference (e.g., SB 1.1.1)";
pub const FOOTER: &str = "Data sourced from vedabase.io";
pub const EXPLAIN_LABEL: &str = "Explain";
pub const PROCESSING_LABEL: &str = "Processing...";

const ACCENT: Color = Color::Rgb(234, 88, 12);
const BUTTON_WIDTH: u16 = 18;

/// Draw the full screen.
pub fn draw(f: &mut Frame, app: &mut TuiApp) {
    let state = app.view.state();
    let has_error = !state.error_message.is_empty();
    let has_explanation = !state.explanation_text.is_empty();

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                                 // title
            Constraint::Length(2),                                 // subtitle
            Constraint::Length(3),                                 // input + button
            Constraint::Length(if has_error { 3 } else { 0 }),     // error panel
            Constraint::Min(if has_explanation { 3 } else { 0 }),  // explanation
            Constraint::Length(1),                                 // status bar
        ])
        .split(f.area());

    draw_header(f, outer[0], outer[1]);
    draw_form(f, app, outer[2]);
    if has_error {
        draw_error(f, app, outer[3]);
    }
    if has_explanation {
        draw_explanation(f, app, outer[4]);
    } else {
        app.layout_areas.explanation = Rect::default();
        app.scroll = 0;
        app.max_scroll = 0;
    }
    draw_status(f, app, outer[5]);
}

fn draw_header(f: &mut Frame, title_area: Rect, subtitle_area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled("📖 ", Style::default().fg(ACCENT)),
        Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(title, title_area);

    let subtitle = Paragraph::new(SUBTITLE)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(subtitle, subtitle_area);
}

fn draw_form(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)])
        .split(area);
    app.layout_areas.button = cols[1];

    // Input field: enabled in every phase.
    let block = Block::default()
        .title(" Verse ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(cols[0]);
    f.render_widget(block, cols[0]);

    let content = app.input_line.content();
    if app.input_line.is_empty() {
        f.render_widget(
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray)),
            inner,
        );
    } else {
        let scroll = wrap::input_scroll(content, app.input_line.cursor(), inner.width);
        f.render_widget(Paragraph::new(content.to_string()).scroll((0, scroll)), inner);
    }
    let col = wrap::cursor_column(content, app.input_line.cursor());
    let scroll = wrap::input_scroll(content, app.input_line.cursor(), inner.width);
    f.set_cursor_position(Position::new(
        inner.x.saturating_add(col.saturating_sub(scroll)),
        inner.y,
    ));

    // Trigger: disabled with a spinner while loading.
    let (label, style) = if app.view.can_trigger() {
        (
            format!("» {EXPLAIN_LABEL}"),
            Style::default()
                .fg(Color::White)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            format!("{} {PROCESSING_LABEL}", app.spinner()),
            Style::default().fg(Color::Gray).bg(Color::Rgb(120, 60, 20)),
        )
    };
    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, cols[1]);
}

fn draw_error(f: &mut Frame, app: &TuiApp, area: Rect) {
    let panel = Paragraph::new(app.view.state().error_message.clone())
        .style(Style::default().fg(Color::Red))
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(panel, area);
}

fn draw_explanation(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.layout_areas.explanation = area;
    let block = Block::default()
        .title(" Explanation: ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    // Plain text, wrapped ourselves so scrolling knows the line count.
    let lines = wrap::wrap_text(&app.view.state().explanation_text, inner.width as usize);
    let total = lines.len() as u16;
    app.max_scroll = total.saturating_sub(inner.height);
    app.scroll = app.scroll.min(app.max_scroll);

    let para = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .scroll((app.scroll, 0))
        .block(block);
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, app: &TuiApp, area: Rect) {
    let status = match app.view.phase() {
        Phase::Idle => Span::styled("idle", Style::default().fg(Color::Green)),
        Phase::Loading => Span::styled("loading", Style::default().fg(Color::Yellow)),
        Phase::Success => Span::styled("done", Style::default().fg(Color::Cyan)),
        Phase::Failure => Span::styled("error", Style::default().fg(Color::Red)),
    };
    let hints = if app.view.is_loading() {
        "Esc:Cancel  ^C:Quit"
    } else {
        "Enter:Explain  ↑↓/PgUp/PgDn:Scroll  ^C:Quit"
    };

    let line = Line::from(vec![
        Span::styled(" [", Style::default().fg(Color::DarkGray)),
        status,
        Span::styled("]", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(FOOTER, Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explainer::error::{EMPTY_REFERENCE_MESSAGE, REQUEST_FAILED_MESSAGE};
    use crate::explainer::ExplainerView;
    use crate::llm::mock::{server_error, text_response, ScriptedSource};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn render(app: &mut TuiApp, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app_with(source: Arc<ScriptedSource>) -> TuiApp {
        TuiApp::new(ExplainerView::new(source))
    }

    #[test]
    fn idle_screen() {
        let mut app = app_with(ScriptedSource::replying(vec![]));
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains(TITLE));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains(&format!("» {EXPLAIN_LABEL}")));
        assert!(screen.contains(FOOTER));
        assert!(!screen.contains("Error"));
        assert!(!screen.contains("Explanation:"));
        assert!(screen.contains("[idle]"));
    }

    #[tokio::test]
    async fn loading_screen_shows_processing() {
        let gate = Arc::new(Notify::new());
        let mut app = app_with(ScriptedSource::gated(vec![], gate));
        app.paste("SB 1.1.1");
        app.trigger();
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains(PROCESSING_LABEL));
        assert!(!screen.contains(&format!("» {EXPLAIN_LABEL}")));
        assert!(screen.contains("SB 1.1.1"));
        assert!(screen.contains("Esc:Cancel"));
    }

    #[tokio::test]
    async fn success_screen_shows_explanation() {
        let mut app = app_with(ScriptedSource::replying(vec![text_response(
            "Example explanation.",
        )]));
        app.paste("SB 1.1.1");
        app.view.request_explanation().await;
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains("Explanation:"));
        assert!(screen.contains("Example explanation."));
        assert!(screen.contains(&format!("» {EXPLAIN_LABEL}")));
    }

    #[tokio::test]
    async fn error_panel_keeps_previous_explanation() {
        let mut app = app_with(ScriptedSource::replying(vec![
            text_response("Earlier text."),
            server_error(),
        ]));
        app.paste("SB 1.1.1");
        app.view.request_explanation().await;
        app.view.request_explanation().await;
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains(REQUEST_FAILED_MESSAGE));
        assert!(screen.contains("Earlier text."));
        assert!(screen.contains("[error]"));
    }

    #[tokio::test]
    async fn validation_message_rendered() {
        let mut app = app_with(ScriptedSource::replying(vec![]));
        app.view.request_explanation().await;
        let screen = render(&mut app, 100, 20);
        assert!(screen.contains(EMPTY_REFERENCE_MESSAGE));
    }

    #[test]
    fn oversized_input_renders() {
        for len in [65_535, 70_000] {
            let mut app = app_with(ScriptedSource::replying(vec![]));
            app.paste(&"a".repeat(len));
            let screen = render(&mut app, 100, 20);
            assert!(screen.contains("aaaa"));
            assert!(!screen.contains(PLACEHOLDER));
        }
    }

    #[tokio::test]
    async fn long_explanation_scrolls() {
        let text = (1..=40)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut app = app_with(ScriptedSource::replying(vec![text_response(&text)]));
        app.paste("SB 1.1.1");
        app.view.request_explanation().await;

        let screen = render(&mut app, 80, 20);
        assert!(screen.contains("line 1 "));
        assert!(app.max_scroll > 0);

        app.scroll_down(u16::MAX);
        let screen = render(&mut app, 80, 20);
        assert!(screen.contains("line 40"));
        assert!(!screen.contains("line 1 "));
    }
}
