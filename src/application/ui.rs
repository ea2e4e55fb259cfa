use std::io;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
#[cfg(feature = "dev")]
use tui_textarea::Input;
#[cfg(feature = "dev")]
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::format_size;
use crate::domain::models::Action;
use crate::domain::models::BackendBox;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::LogTemplate;
use crate::domain::models::TextArea;
use crate::domain::services::actions::help_text;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

/// Text shown in the panel between the transcript and the prompt, if any.
fn panel_text(app_state: &AppState) -> Result<Option<(String, String)>> {
    if app_state.show_help {
        return Ok(Some(("Help".to_string(), help_text())));
    }

    if app_state.session.show_template {
        return Ok(Some((
            "Log template (/template copy, /template export)".to_string(),
            LogTemplate::text()?,
        )));
    }

    return Ok(None);
}

fn staged_line(app_state: &AppState) -> Line<'static> {
    if app_state.session.staged_files.is_empty() {
        return Line::from(Span::styled(
            "No files staged. Use /attach PATH to add JSON logs.",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let files = app_state
        .session
        .staged_files
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            return format!(
                "{}. {} ({})",
                idx + 1,
                file.name,
                format_size(file.size)
            );
        })
        .collect::<Vec<String>>()
        .join("  ");

    return Line::from(vec![
        Span::styled("Staged: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::from(files),
    ]);
}

fn notice_line(app_state: &AppState) -> Line<'static> {
    if let Some(notice) = &app_state.notice {
        return Line::from(Span::styled(notice.text.to_string(), notice.style()));
    }

    return Line::from("");
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);
    let mut textarea = TextArea::default();
    let mut loading = Loading::default();

    #[cfg(feature = "dev")]
    {
        let test_str = "Which of the queries in the attached log is the slowest, and how do I fix it?";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        let panel = panel_text(app_state)?;

        terminal.draw(|frame| {
            let mut constraints = vec![Constraint::Min(1)];
            if let Some((_, text)) = &panel {
                let panel_height = u16::try_from(text.lines().count() + 2).unwrap_or(u16::MAX);
                constraints.push(Constraint::Max(panel_height.min(frame.size().height / 2)));
            }
            constraints.push(Constraint::Length(2));
            constraints.push(Constraint::Max(4));

            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(constraints)
                .split(frame.size());

            let transcript_rect = layout[0];
            let status_rect = layout[layout.len() - 2];
            let prompt_rect = layout[layout.len() - 1];

            if usize::from(transcript_rect.width) != app_state.last_known_width
                || usize::from(transcript_rect.height) != app_state.last_known_height
            {
                app_state.set_rect(transcript_rect);
            }

            app_state
                .bubble_list
                .render(frame, transcript_rect, app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                transcript_rect.inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if let Some((title, text)) = &panel {
                frame.render_widget(
                    Paragraph::new(text.to_string())
                        .wrap(Wrap { trim: false })
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_type(BorderType::Rounded)
                                .title(title.to_string())
                                .padding(Padding::new(1, 1, 0, 0)),
                        ),
                    layout[1],
                );
            }

            frame.render_widget(
                Paragraph::new(vec![staged_line(app_state), notice_line(app_state)]),
                status_rect,
            );

            if app_state.session.waiting_for_backend {
                loading.render(frame, prompt_rect);
            } else {
                frame.render_widget(textarea.widget(), prompt_rect);
            }
        })?;

        match events.next().await? {
            Event::BackendResponse(res) => {
                app_state.handle_backend_response(res);
            }
            Event::Notice(notice) => {
                app_state.set_notice(notice);
            }
            Event::KeyboardCharInput(input) => {
                if app_state.session.waiting_for_backend {
                    continue;
                }
                textarea.input(input);
            }
            Event::KeyboardPaste(text) => {
                if app_state.session.waiting_for_backend {
                    continue;
                }
                textarea.insert_str(text);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                if app_state.session.waiting_for_backend {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                let (should_break, should_continue) =
                    app_state.handle_slash_commands(&input_str, &tx)?;
                if should_break {
                    break;
                }
                if should_continue {
                    textarea = TextArea::default();
                    continue;
                }

                if app_state.submit_prompt(&input_str, &tx)? {
                    textarea = TextArea::default();
                }
            }
            Event::UITick() => {
                loading.tick();
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    backend: BackendBox,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    initial_files: Vec<PathBuf>,
) -> Result<()> {
    let mut app_state = AppState::new(&Config::get(ConfigKey::Theme))?;
    app_state.init(&backend, &initial_files).await;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
