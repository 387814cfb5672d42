//! Play command implementation - Interactive TUI.

use super::{CliError, new_session};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::stdout;
use std::time::Duration;
use tally::config::Config;
use tally::i18n::Catalog;
use tally::{ColorChoice, PlayerColor, Removal, Screen, Session, Translate};
use tracing::debug;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub(crate) fn execute(config: &Config, language: &str) -> Result<(), CliError> {
    let strings = Catalog::bundled(language);
    let session = new_session(config, &strings);
    run_tui(App::new(session, strings))
}

/// App state for the TUI.
#[derive(Debug)]
struct App {
    session: Session,
    strings: Catalog,
    /// Selected row on the current screen.
    row: usize,
    /// Selected player column on the score screen.
    column: usize,
    /// Score being typed into the selected cell.
    input: Option<String>,
    /// One-line status message shown in the footer.
    message: Option<String>,
    quit: bool,
}

/// Selectable rows of the player selection screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupRow {
    Player(usize),
    Add,
    Start,
}

impl App {
    fn new(session: Session, strings: Catalog) -> Self {
        Self {
            session,
            strings,
            row: 0,
            column: 0,
            input: None,
            message: None,
            quit: false,
        }
    }

    fn t(&self, key: &str) -> String {
        self.strings.lookup(key, &[])
    }

    fn setup_rows(&self) -> Vec<SetupRow> {
        let roster = self.session.roster();
        let mut rows: Vec<SetupRow> = (0..roster.len()).map(SetupRow::Player).collect();
        if roster.can_add_player() {
            rows.push(SetupRow::Add);
        }
        rows.push(SetupRow::Start);
        rows
    }

    fn row_count(&self) -> usize {
        match self.session.screen() {
            Screen::Home => 2,
            Screen::SelectPlayers => self.setup_rows().len(),
            Screen::Calculate => self.session.categories().len(),
            Screen::History => 0,
        }
    }

    fn move_row(&mut self, down: bool) {
        self.commit_input();
        let count = self.row_count();
        if count == 0 {
            return;
        }
        self.row = if down {
            (self.row + 1) % count
        } else {
            (self.row + count - 1) % count
        };
    }

    fn reset_cursor(&mut self) {
        self.row = 0;
        self.column = 0;
        self.input = None;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }
        self.message = None;

        match self.session.screen() {
            Screen::Home => self.handle_home(key),
            Screen::SelectPlayers => self.handle_setup(key),
            Screen::Calculate => self.handle_scores(key),
            Screen::History => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Backspace) {
                    self.session.back();
                    self.reset_cursor();
                }
            }
        }
    }

    fn handle_home(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Up => self.move_row(false),
            KeyCode::Down => self.move_row(true),
            KeyCode::Enter => {
                if self.row == 0 {
                    self.session.new_game();
                } else {
                    self.session.open_history();
                }
                self.reset_cursor();
            }
            _ => {}
        }
    }

    fn handle_setup(&mut self, key: KeyEvent) {
        let rows = self.setup_rows();
        let selected = rows.get(self.row).copied().unwrap_or(SetupRow::Start);

        match (key.code, selected) {
            (KeyCode::Esc, _) => {
                self.session.back();
                self.reset_cursor();
            }
            (KeyCode::Up, _) => self.move_row(false),
            (KeyCode::Down | KeyCode::Tab, _) => self.move_row(true),
            (KeyCode::Enter, SetupRow::Add) => {
                if let Some(index) = self.session.roster_mut().add_player() {
                    self.row = index;
                }
            }
            (KeyCode::Enter, SetupRow::Start) => {
                if self.session.start_game() {
                    self.reset_cursor();
                } else {
                    self.message = Some(self.t("players.noneActive"));
                }
            }
            (KeyCode::Left, SetupRow::Player(i)) => self.cycle_color(i, false),
            (KeyCode::Right, SetupRow::Player(i)) => self.cycle_color(i, true),
            (KeyCode::Delete, SetupRow::Player(i)) => {
                if let Ok(Removal::Removed(_)) = self.session.roster_mut().remove_player(i) {
                    self.row = self.row.min(self.setup_rows().len().saturating_sub(1));
                }
            }
            (KeyCode::Backspace, SetupRow::Player(i)) => self.edit_name(i, None),
            (KeyCode::Char(c), SetupRow::Player(i)) if !is_chord(key) => {
                self.edit_name(i, Some(c));
            }
            _ => {}
        }
    }

    /// Append `c` to the player's name, or drop the last character.
    fn edit_name(&mut self, index: usize, c: Option<char>) {
        let roster = self.session.roster_mut();
        let Some(mut name) = roster.player(index).map(|p| p.name.clone()) else {
            debug!(index, "name edit on a missing row");
            return;
        };
        match c {
            Some(c) => name.push(c),
            None => {
                name.pop();
            }
        }
        if let Err(e) = roster.rename_player(index, name) {
            debug!(%e, "name edit rejected");
        }
    }

    /// Choose the next selectable colour after the player's current one.
    fn cycle_color(&mut self, index: usize, forward: bool) {
        let roster = self.session.roster();
        let Some(current) = roster.player(index).map(|p| p.color) else {
            return;
        };
        let Ok(selectable) = roster.selectable_colors(index) else {
            return;
        };

        let mut candidate = current;
        let next = (0..PlayerColor::ALL.len()).find_map(|_| {
            candidate = if forward {
                candidate.next()
            } else {
                previous(candidate)
            };
            (candidate != current && selectable.contains(&candidate)).then_some(candidate)
        });

        if let Some(color) = next
            && let Ok(ColorChoice::Refused { holder }) =
                self.session.roster_mut().choose_color(index, color)
        {
            let holder_name = self
                .session
                .roster()
                .player(holder)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            let color_name = self.t(&format!("colors.{}", color.key()));
            self.message = Some(self.strings.lookup(
                "players.locked",
                &[("color", &color_name), ("holder", &holder_name)],
            ));
        }
    }

    fn handle_scores(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            self.commit_input();
            self.session.finish();
            self.reset_cursor();
            return;
        }

        let players = self.session.sheet().map_or(0, |s| s.players().len());
        match key.code {
            KeyCode::Esc => {
                self.input = None;
                self.session.back();
                self.reset_cursor();
            }
            KeyCode::Up => self.move_row(false),
            KeyCode::Down | KeyCode::Enter => self.move_row(true),
            KeyCode::Left if players > 0 => {
                self.commit_input();
                self.column = (self.column + players - 1) % players;
            }
            KeyCode::Right | KeyCode::Tab if players > 0 => {
                self.commit_input();
                self.column = (self.column + 1) % players;
            }
            KeyCode::Backspace => {
                let input = self.input.get_or_insert_with(String::new);
                input.pop();
            }
            KeyCode::Char(c) if (c.is_ascii_digit() || c == '-') && !is_chord(key) => {
                self.input.get_or_insert_with(String::new).push(c);
            }
            _ => {}
        }
    }

    fn commit_input(&mut self) {
        let Some(raw) = self.input.take() else {
            return;
        };
        let (row, column) = (self.row, self.column);
        if let Some(sheet) = self.session.sheet_mut()
            && let Err(e) = sheet.set_score(column, row, &raw)
        {
            debug!(%e, "score entry rejected");
        }
    }
}

/// Ctrl and Alt combinations are commands, never text.
fn is_chord(key: KeyEvent) -> bool {
    key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

const fn previous(color: PlayerColor) -> PlayerColor {
    match color {
        PlayerColor::Red => PlayerColor::Yellow,
        PlayerColor::Blue => PlayerColor::Red,
        PlayerColor::Green => PlayerColor::Blue,
        PlayerColor::Yellow => PlayerColor::Green,
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    while !app.quit {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if event::poll(Duration::from_millis(100)).map_err(|e| CliError::new(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    match app.session.screen() {
        Screen::Home => render_home(f, chunks[1], app),
        Screen::SelectPlayers => render_setup(f, chunks[1], app),
        Screen::Calculate => render_scores(f, chunks[1], app),
        Screen::History => render_history(f, chunks[1], app),
    }

    render_footer(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.session.screen() {
        Screen::Home => format!(
            "Tally {}",
            app.strings
                .lookup("home.version", &[("version", env!("CARGO_PKG_VERSION"))])
        ),
        Screen::SelectPlayers => app.t("players.title"),
        Screen::Calculate => app.t("calculate.title"),
        Screen::History => app.t("history.title"),
    };
    let back = if app.session.screen() == Screen::Home {
        String::new()
    } else {
        format!("{}  ", app.t("common.back"))
    };

    let header = Paragraph::new(format!(" {back}{title}"))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

fn player_style(color: PlayerColor) -> Style {
    let (r, g, b) = color.rgb();
    Style::default().fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD)
}

fn render_home(f: &mut Frame, area: Rect, app: &App) {
    let items = [app.t("home.newGame"), app.t("home.history")];
    let mut lines = vec![Line::from("")];
    for (i, item) in items.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("  {item}  "),
            selected_style(app.row == i),
        )));
        lines.push(Line::from(""));
    }

    let menu = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(menu, area);
}

fn render_setup(f: &mut Frame, area: Rect, app: &App) {
    let roster = app.session.roster();
    let mut lines = vec![Line::from("")];

    for (i, row) in app.setup_rows().into_iter().enumerate() {
        let selected = app.row == i;
        match row {
            SetupRow::Player(index) => {
                let Some(player) = roster.player(index) else {
                    continue;
                };
                let check = if player.is_active() { "✓" } else { " " };
                let lock = if roster.is_locked(index) { "*" } else { " " };
                let name = if player.name.is_empty() {
                    roster.placeholder_name(index + 1)
                } else {
                    player.name.clone()
                };
                let name_style = if player.name.is_empty() {
                    selected_style(selected).fg(Color::DarkGray)
                } else {
                    selected_style(selected)
                };

                let mut spans = vec![
                    Span::raw(format!(" [{check}] ")),
                    Span::styled(format!("{name:<20}"), name_style),
                    Span::raw("  "),
                ];
                let selectable = roster.selectable_colors(index).unwrap_or_default();
                for color in PlayerColor::ALL {
                    let marker = if player.color == color { "●" } else { "○" };
                    let style = if selectable.contains(&color) {
                        player_style(color)
                    } else {
                        player_style(color).add_modifier(Modifier::DIM)
                    };
                    spans.push(Span::styled(format!("{marker} "), style));
                }
                spans.push(Span::raw(lock));
                lines.push(Line::from(spans));
            }
            SetupRow::Add => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  + {}  ", app.t("players.add")),
                    selected_style(selected),
                )));
            }
            SetupRow::Start => {
                let style = if roster.can_start() {
                    selected_style(selected)
                } else {
                    selected_style(selected).add_modifier(Modifier::DIM)
                };
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  {}  ", app.t("players.start")),
                    style,
                )));
            }
        }
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_scores(f: &mut Frame, area: Rect, app: &App) {
    let Some(sheet) = app.session.sheet() else {
        return;
    };

    let labels: Vec<String> = sheet
        .categories()
        .iter()
        .map(|c| c.label(&app.strings))
        .collect();
    let total_label = app.t("calculate.total");
    let label_width = labels
        .iter()
        .chain([&total_label])
        .map(|l| l.chars().count())
        .max()
        .unwrap_or_default()
        + 2;
    let column_width = sheet
        .players()
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or_default()
        .max(6)
        + 2;

    let mut lines = vec![
        Line::from(format!(" {}", app.t("calculate.subtitle"))),
        Line::from(""),
    ];

    let mut header = vec![Span::raw(format!(" {:<label_width$}", ""))];
    for player in sheet.players() {
        header.push(Span::styled(
            format!("{:>column_width$}", player.name),
            player_style(player.color),
        ));
    }
    lines.push(Line::from(header));

    for (c, label) in labels.iter().enumerate() {
        let mut spans = vec![Span::raw(format!(" {label:<label_width$}"))];
        for p in 0..sheet.players().len() {
            let selected = app.row == c && app.column == p;
            let text = match (&app.input, selected) {
                (Some(input), true) => format!("{input}_"),
                _ => sheet.score(p, c).unwrap_or_default().to_string(),
            };
            spans.push(Span::styled(
                format!("{text:>column_width$}"),
                selected_style(selected),
            ));
        }
        lines.push(Line::from(spans));
    }

    let mut totals = vec![Span::styled(
        format!(" {total_label:<label_width$}"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    let leaders = sheet.leaders();
    for (p, total) in sheet.totals().into_iter().enumerate() {
        let style = if leaders.contains(&p) {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        totals.push(Span::styled(format!("{total:>column_width$}"), style));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(totals));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_history(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", app.t("history.heading")),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(" {}", app.t("history.empty"))),
    ];
    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = match app.session.screen() {
        Screen::Home => " [↑/↓] Select  [Enter] Open  [q] Quit ".to_string(),
        Screen::SelectPlayers => {
            " [↑/↓] Row  [type] Name  [←/→] Color  [Del] Remove  [Enter] Add/Start  [Esc] Back "
                .to_string()
        }
        Screen::Calculate => format!(
            " [arrows] Cell  [0-9/-] Score  [Esc] Back  [Ctrl+S] {} ",
            app.t("calculate.saveFinish")
        ),
        Screen::History => " [Esc] Back ".to_string(),
    };

    let (text, style) = match &app.message {
        Some(message) => (format!(" {message}"), Style::default().fg(Color::Yellow)),
        None => (controls, Style::default().fg(Color::Gray)),
    };

    let footer = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(Session::new(), Catalog::bundled("en"))
    }

    #[test]
    fn test_home_to_setup() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.screen(), Screen::SelectPlayers);
    }

    #[test]
    fn test_typing_edits_selected_name() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Char('X')));
        assert_eq!(app.session.roster().players()[0].name, "Player X");
    }

    #[test]
    fn test_modifier_chords_are_not_typed_into_names() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT));
        assert_eq!(app.session.roster().players()[0].name, "Player 1");

        app.handle_key(KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT));
        assert_eq!(app.session.roster().players()[0].name, "Player 1Y");
    }

    #[test]
    fn test_modifier_chords_are_not_typed_into_scores() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        app.row = 3;
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::ALT));
        assert_eq!(app.input, None);
        app.handle_key(key(KeyCode::Char('4')));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.session.sheet().unwrap().total(0), Ok(4));
    }

    #[test]
    fn test_cycle_color_skips_locked() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        // Player 2 locks green; player 1 cycling right from red lands on blue
        // (player 2's old colour is free again), then skips green.
        app.session
            .roster_mut()
            .choose_color(1, PlayerColor::Green)
            .unwrap();
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.roster().players()[0].color, PlayerColor::Blue);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.session.roster().players()[0].color, PlayerColor::Yellow);
    }

    #[test]
    fn test_score_entry_commits_on_move() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        // Rows: two players, add, start.
        app.row = 3;
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session.screen(), Screen::Calculate);

        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Char('2')));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.session.sheet().unwrap().total(0), Ok(12));
    }

    #[test]
    fn test_save_and_finish() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        app.row = 3;
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(app.session.screen(), Screen::Home);
    }
}
