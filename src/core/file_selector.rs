use crate::domain::models::SelectionState;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{io, time::Duration};

/// How the files for a generation run are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionMode {
    /// Select every listed file.
    All,
    /// Select the given names; unknown names are kept and read as missing.
    Named(Vec<String>),
    /// Let the user pick in a terminal list.
    Interactive { debug_layout: bool },
}

struct App {
    selection: SelectionState,
    state: ListState,
    title: String,
    help_message: String,
    debug_layout: bool,
}

impl App {
    fn new(selection: SelectionState, title: String, debug_layout: bool) -> App {
        let mut state = ListState::default();
        if !selection.is_empty() {
            state.select(Some(0));
        }

        App {
            selection,
            state,
            title,
            help_message: String::from(
                "↑/↓: Navigate | Space: Toggle selection | Enter: Confirm | q: Done | a: Select all | n: Deselect all | Ctrl+C: Cancel",
            ),
            debug_layout,
        }
    }

    fn next(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.selection.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.selection.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn toggle_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            self.selection.toggle_at(i);
        }
    }

    fn debug_block(&self) -> Option<Block<'static>> {
        self.debug_layout.then(|| {
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
        })
    }
}

fn render_paragraph(f: &mut Frame, app: &App, text: &str, style: Style, area: Rect) {
    let mut paragraph = Paragraph::new(Span::styled(text.to_string(), style));
    if let Some(block) = app.debug_block() {
        paragraph = paragraph.block(block);
    }
    f.render_widget(paragraph, area);
}

fn ui(f: &mut Frame, app: &mut App) {
    let line_height = if app.debug_layout { 3 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(line_height),
                Constraint::Min(1),
                Constraint::Length(line_height),
            ]
            .as_ref(),
        )
        .split(f.area());

    render_paragraph(
        f,
        app,
        &app.title,
        Style::default().add_modifier(Modifier::BOLD),
        chunks[0],
    );

    let selected_style = Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let items: Vec<ListItem> = app
        .selection
        .iter()
        .map(|(name, selected)| {
            let prefix = if selected { "[✓] " } else { "[ ] " };
            let style = if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(format!("{}{}", prefix, name), style))
        })
        .collect();

    let border_style = if app.debug_layout {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let file_list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(
                    "Source context files ({} selected of {})",
                    app.selection.selected_count(),
                    app.selection.len()
                )),
        )
        .highlight_style(selected_style);

    f.render_stateful_widget(file_list, chunks[1], &mut app.state);

    render_paragraph(
        f,
        app,
        &app.help_message,
        Style::default().fg(Color::DarkGray),
        chunks[2],
    );
}

/// Resolves the names to assemble from the listed source file names.
pub fn select_source_files(names: Vec<String>, mode: SelectionMode) -> anyhow::Result<Vec<String>> {
    let mut selection = SelectionState::from_names(names);

    match mode {
        SelectionMode::All => {
            info!("Selecting all {} source files", selection.len());
            selection.select_all();
            Ok(selection.selected_names())
        }
        SelectionMode::Named(requested) => {
            let mut selected = Vec::with_capacity(requested.len());
            for name in requested {
                if selection.set(&name, true) {
                    selected.push(name);
                } else {
                    warn!("'{}' is not in the source context directory", name);
                }
            }
            debug!(
                "Selected {} of {} source files",
                selection.selected_count(),
                selection.len()
            );
            Ok(selected)
        }
        SelectionMode::Interactive { debug_layout } => {
            if selection.is_empty() {
                info!("No source files to select");
                return Ok(Vec::new());
            }
            let selection = run_tui(selection, debug_layout)?;
            Ok(selection.selected_names())
        }
    }
}

fn run_tui(selection: SelectionState, debug_layout: bool) -> anyhow::Result<SelectionState> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(
        selection,
        "Select context files to merge into the repo context".to_string(),
        debug_layout,
    );

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("Selected {} files", app.selection.selected_count());
            Ok(app.selection)
        }
        Err(err) => {
            warn!("Error during file selection: {}", err);
            Err(anyhow::anyhow!("Selection cancelled: {}", err))
        }
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Err(anyhow::anyhow!("Selection cancelled"));
                    }
                    KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => return Ok(()),
                    KeyCode::Char('a') => app.selection.select_all(),
                    KeyCode::Char('n') => app.selection.deselect_all(),
                    KeyCode::Char(' ') => app.toggle_selected(),
                    KeyCode::Down => app.next(),
                    KeyCode::Up => app.previous(),
                    _ => {}
                }
            }
        }
    }
}
