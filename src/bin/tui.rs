use std::{fs::OpenOptions, sync::Mutex, time::Duration};

use anyhow::Result;
use crossterm::{event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers}, execute, terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen}};
use ratatui::{backend::CrosstermBackend, Frame, Terminal, widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph}, layout::{Constraint, Direction, Layout, Rect}, style::{Color, Modifier, Style}, text::{Line, Span, Text}};
use tracing_subscriber::EnvFilter;

use tasks::{client::{api::{HttpTaskApi, TaskApi}, task_client::TaskClient}, config::ClientConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = ClientConfig::from_env();
    // The terminal belongs to the UI, so logs go to a file.
    let log_file = OpenOptions::new().create(true).append(true).open(&config.log_file)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    tracing::info!(api_url = %config.api_url, "starting");

    let mut app = App { client: TaskClient::new(HttpTaskApi::new(&config.api_url)), cursor: 0, list_state: ListState::default(), api_url: config.api_url.clone() };
    app.client.refresh().await;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

struct App<A: TaskApi> {
    client: TaskClient<A>,
    cursor: usize,
    list_state: ListState,
    api_url: String,
}

impl<A: TaskApi> App<A> {
    fn clamp_cursor(&mut self) {
        let len = self.client.tasks().len();
        if len == 0 { self.cursor = 0; self.list_state.select(None); }
        else { if self.cursor >= len { self.cursor = len - 1; } self.list_state.select(Some(self.cursor)); }
    }

    /// Returns false when the user asked to quit.
    async fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') { return false; }

        if self.client.edit().is_some() {
            match key.code {
                KeyCode::Esc => self.client.cancel_edit(),
                KeyCode::Enter => self.client.confirm_edit().await,
                KeyCode::Backspace => { if let Some(text) = self.client.edit_text_mut() { text.pop(); } }
                KeyCode::Char(c) if !ctrl => { if let Some(text) = self.client.edit_text_mut() { text.push(c); } }
                _ => {}
            }
            return true;
        }

        let selected = self.client.selected();
        match key.code {
            KeyCode::Char('d') if ctrl => { if let Some(id) = selected { self.client.delete(id).await; } }
            KeyCode::Char('t') if ctrl => { if let Some(id) = selected { self.client.toggle_completed(id).await; } }
            KeyCode::Char('e') if ctrl => { if let Some(id) = selected { self.client.open_edit(id); } }
            KeyCode::Char('r') if ctrl => self.client.refresh().await,
            KeyCode::Tab => {
                if let Some(task) = self.client.tasks().get(self.cursor) { let id = task.id; self.client.select(id); }
            }
            KeyCode::Char(c) if !ctrl => self.client.input_mut().push(c),
            KeyCode::Backspace => { self.client.input_mut().pop(); }
            KeyCode::Enter => self.client.add().await,
            KeyCode::Esc => self.client.clear_selection(),
            KeyCode::Up => { if self.cursor > 0 { self.cursor -= 1; } }
            KeyCode::Down => { if self.cursor + 1 < self.client.tasks().len() { self.cursor += 1; } }
            _ => {}
        }
        true
    }
}

async fn run_app<A: TaskApi>(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App<A>) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    loop {
        app.clamp_cursor();
        terminal.draw(|f| draw(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only act on key presses; ignore repeats and releases to prevent duplicate input
                if key.kind != KeyEventKind::Press { continue; }
                if !app.handle_key(key).await { break; }
            }
        }
    }
    tracing::info!("quit");
    Ok(())
}

fn draw<A: TaskApi>(f: &mut Frame, app: &mut App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.size());

    let input = Paragraph::new(format!("{}_", app.client.input()))
        .block(Block::default().borders(Borders::ALL).title("new task (Enter to add)"));
    f.render_widget(input, chunks[0]);

    let selected = app.client.selected();
    let items: Vec<ListItem> = app.client.tasks().iter().map(|t| {
        let style = if t.completed { Style::default().add_modifier(Modifier::CROSSED_OUT).fg(Color::DarkGray) } else { Style::default() };
        let mut lines = vec![Line::from(Span::styled(t.text.clone(), style))];
        if selected == Some(t.id) {
            let toggle = if t.completed { "uncomplete" } else { "complete" };
            lines.push(Line::from(vec![
                Span::styled("  [^D] delete ", Style::default().fg(Color::Red)),
                Span::styled(format!(" [^T] {toggle} "), Style::default().fg(Color::Green)),
                Span::styled(" [^E] edit", Style::default().fg(Color::Blue)),
            ]));
        }
        ListItem::new(Text::from(lines))
    }).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!("tasks [{}]", app.client.tasks().len())))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");
    f.render_stateful_widget(list, chunks[1], &mut app.list_state);

    let footer = Paragraph::new(format!("Up/Down move  Tab select  Esc deselect  ^R reload  ^C quit  |  {}", app.api_url))
        .block(Block::default().borders(Borders::ALL).title("info"));
    f.render_widget(footer, chunks[2]);

    if let Some(edit) = app.client.edit() {
        let area = centered(f.size(), 60, 5);
        f.render_widget(Clear, area);
        let form = Paragraph::new(format!("{}_", edit.text))
            .block(Block::default().borders(Borders::ALL).title("edit task (Enter save, Esc cancel)"));
        f.render_widget(form, area);
    }
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height: height.min(area.height) }
}
