//! Play command implementation - interactive TUI.

use super::CliError;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use goblin_game::{Alert, BoardManager, Effect, Element, FileStore, GameConfig, GoblinGame, Page};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io::{self, Stdout, stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Keyboard rows mapped onto board rows, left to right.
const KEY_ROWS: [&str; 4] = ["1234567890", "qwertyuiop", "asdfghjkl;", "zxcvbnm,./"];

/// Input poll timeout; bounds timer latency.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the board cannot be drawn or the TUI fails.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn execute(config: GameConfig, store: PathBuf) -> Result<(), CliError> {
    let mut game = GoblinGame::new(config, Page::standard(), FileStore::new(store));
    game.init()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(terminal: &mut Tui, game: &mut GoblinGame<FileStore>) -> Result<(), CliError> {
    let mut grid = Rect::default();
    let mut status = String::from("Whack the goblin before it moves!");

    loop {
        terminal.draw(|f| grid = ui(f, &*game, &status))?;

        if let Some(missed) = game.advance(&mut TerminalAlert { terminal: &mut *terminal })? {
            status = format!("New game. Last one ended after {missed} misses.");
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        let element = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Char(c) => key_to_element(c, game.board()),
                _ => None,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                Some(hit_test(grid, game.board(), mouse.column, mouse.row))
            }
            _ => None,
        };

        if let Some(element) = element {
            match game.click(element, &mut TerminalAlert { terminal: &mut *terminal })? {
                Effect::Hit => status = String::from("Whack! +1"),
                Effect::Missed => status = String::from("Missed! That cell was empty."),
                Effect::GameOver { missed } => {
                    status = format!("New game. Last one ended after {missed} misses.");
                }
                Effect::Relocate | Effect::Nothing => {}
            }
        }
    }

    Ok(())
}

/// Blocks on a modal until the player presses a key or clicks.
struct TerminalAlert<'a> {
    terminal: &'a mut Tui,
}

impl Alert for TerminalAlert<'_> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = self.wait_for_ack(message) {
            warn!(error = %e, "game over alert failed");
        }
    }
}

impl TerminalAlert<'_> {
    fn wait_for_ack(&mut self, message: &str) -> io::Result<()> {
        // Drop input queued before the modal appeared
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }

        loop {
            self.terminal.draw(|f| render_alert(f, message))?;
            if event::poll(Duration::from_millis(250))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
                    Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                        return Ok(());
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Map a key press onto the cell it labels.
fn key_to_element(key: char, board: &BoardManager) -> Option<Element> {
    let side = usize::from(board.side());
    KEY_ROWS
        .iter()
        .take(side)
        .enumerate()
        .find_map(|(row, keys)| {
            keys.chars()
                .take(side)
                .position(|k| k == key)
                .map(|col| board.element_at(row * side + col))
        })
}

/// Map a mouse position onto the element under it.
fn hit_test(grid: Rect, board: &BoardManager, column: u16, row: u16) -> Element {
    let side = board.side();
    if side == 0
        || column < grid.x
        || row < grid.y
        || column >= grid.x.saturating_add(grid.width)
        || row >= grid.y.saturating_add(grid.height)
    {
        return Element::Outside;
    }

    let cell_w = (grid.width / side).max(1);
    let cell_h = (grid.height / side).max(1);
    let col = (column - grid.x) / cell_w;
    let r = (row - grid.y) / cell_h;
    if col >= side || r >= side {
        return Element::Outside;
    }
    board.element_at(usize::from(r) * usize::from(side) + usize::from(col))
}

/// Label shown in a cell's border, if the cell has a key.
fn cell_key(row: u16, col: u16) -> Option<char> {
    KEY_ROWS
        .get(usize::from(row))
        .and_then(|keys| keys.chars().nth(usize::from(col)))
}

fn ui(f: &mut Frame, game: &GoblinGame<FileStore>, status: &str) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board and stats
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], game);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    let grid = render_board(f, main_chunks[0], game.board());
    render_stats(f, main_chunks[1], game, status);
    render_footer(f, chunks[2], game.board());

    grid
}

fn render_header(f: &mut Frame, area: Rect, game: &GoblinGame<FileStore>) {
    let state = if game.board().is_game_over() {
        "GAME OVER"
    } else {
        "RUNNING"
    };
    let title = format!(
        " Whack-a-Goblin | Game {} | {} ",
        game.sessions_started(),
        state
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

/// Draw the grid and return the area the cells occupy.
fn render_board(f: &mut Frame, area: Rect, board: &BoardManager) -> Rect {
    let block = Block::default().borders(Borders::ALL).title(" Board ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let side = board.side();
    let Some(container) = board.container() else {
        return Rect::default();
    };
    if side == 0 {
        return Rect::default();
    }

    let cell_w = inner.width / side;
    let cell_h = inner.height / side;
    if cell_w == 0 || cell_h == 0 {
        f.render_widget(Paragraph::new("Terminal too small"), inner);
        return Rect::default();
    }

    for (index, cell) in container.cells().iter().enumerate() {
        let Ok(index) = u16::try_from(index) else {
            break;
        };
        let (row, col) = (index / side, index % side);
        let rect = Rect::new(inner.x + col * cell_w, inner.y + row * cell_h, cell_w, cell_h);

        let mut cell_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        if let Some(key) = cell_key(row, col) {
            cell_block = cell_block.title(format!(" {key} "));
        }

        // Vertically centre the goblin
        let pad = cell_h.saturating_sub(3) / 2;
        let mut lines = vec![Line::from(""); usize::from(pad)];
        if cell.has_target() {
            lines.push(Line::from(Span::styled(
                "(ò_ó)",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(cell_block),
            rect,
        );
    }

    Rect::new(inner.x, inner.y, cell_w * side, cell_h * side)
}

fn render_stats(f: &mut Frame, area: Rect, game: &GoblinGame<FileStore>, status: &str) {
    let board = game.board();
    let score = game
        .scores()
        .display()
        .map_or_else(String::new, |d| d.text().to_string());

    let misses = board.miss_count();
    let max = board.max_misses();
    let miss_color = if misses + 1 >= max {
        Color::Red
    } else if misses > 0 {
        Color::Yellow
    } else {
        Color::Green
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            score,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Misses: "),
            Span::styled(format!("{misses}/{max}"), Style::default().fg(miss_color)),
        ]),
        Line::from(""),
        Line::from(status.to_string()),
    ];

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Score "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, board: &BoardManager) {
    let controls = if board.side() <= 4 {
        " [click] or [cell key] Whack  [Esc] Quit "
    } else {
        " [click] Whack  [Esc] Quit "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn render_alert(f: &mut Frame, message: &str) {
    let area = f.area();
    let width = area.width.min(50);
    let height = area.height.min(6);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press any key to play again"),
    ];

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Game Over ")),
        popup,
    );
}
