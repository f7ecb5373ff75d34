mod app;
mod challenge;
mod config;
mod event;
mod notes;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use app::{App, Focus};
use challenge::Feedback;
use config::Config;
use event::{AppEvent, EventHandler};
use notes::EditState;
use store::json_store::JsonStore;
use ui::components::highlight_view::HighlightView;
use ui::components::notes_list::NotesList;
use ui::layout::{AppLayout, MainLayout};
use ui::text_input::LineInput;

#[derive(Parser)]
#[command(
    name = "retyp",
    version,
    about = "Terminal retype trainer with saved practice notes"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, help = "Store directory (defaults to the user data dir)")]
    store_dir: Option<PathBuf>,

    #[arg(long, help = "Minimum target word length")]
    min: Option<usize>,

    #[arg(long, help = "Maximum target word length")]
    max: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_default();
    let store = match cli.store_dir {
        Some(dir) => JsonStore::with_base_dir(dir).ok(),
        None => JsonStore::new().ok(),
    };
    let mut app = App::from_parts(config, store);

    if let Some(theme_name) = cli.theme
        && let Some(theme) = ui::theme::Theme::load(&theme_name)
    {
        let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
        app.theme = theme;
    }

    // Startup bound overrides obey the same silent-rejection rules as
    // interactive edits. Max first so a widened window accepts both.
    if let Some(max) = cli.max {
        app.max_input.set_text(&max.to_string());
        app.max_field_edited();
    }
    if let Some(min) = cli.min {
        app.min_input.set_text(&min.to_string());
        app.min_field_edited();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new();
    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only act on Press; Repeat would double-type and Release is noise.
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => {
                app.should_quit = true;
                return;
            }
            KeyCode::Char('s') => {
                app.save_note();
                return;
            }
            KeyCode::Char('r') => {
                app.reset();
                return;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Text => {
            if app.text.handle(key) {
                app.text_edited();
            }
        }
        Focus::Word => {
            if app.word_input.handle(key) {
                app.word_edited();
            }
        }
        Focus::MinLen => {
            if app.min_input.handle(key) {
                app.min_field_edited();
            }
        }
        Focus::MaxLen => {
            if app.max_input.handle(key) {
                app.max_field_edited();
            }
        }
        Focus::Title => {
            app.title_input.handle(key);
        }
        Focus::Notes => handle_notes_key(app, key),
    }
}

fn handle_notes_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.notes_select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.notes_select_next(),
        KeyCode::Enter => {
            if let Some(title) = app.selected_note_title() {
                app.load_note(&title);
            }
        }
        KeyCode::Delete | KeyCode::Char('x') => {
            if let Some(title) = app.selected_note_title() {
                app.delete_note(&title);
            }
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);

    render_header(frame, app, layout.header);
    render_main(frame, app, layout.main);

    let notes_list = NotesList::new(
        app.notebook.notes(),
        app.notes_selected,
        app.active_note.as_deref(),
        app.focus == Focus::Notes,
        app.theme,
    );
    frame.render_widget(notes_list, layout.notes);

    render_footer(frame, app, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    let mode_info = match &app.edit_state {
        EditState::Editing(title) => format!(" editing '{title}' | {} notes", app.notebook.len()),
        EditState::Idle => format!(" {} notes", app.notebook.len()),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " retyp ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            mode_info,
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_main(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let main = MainLayout::new(area);

    render_editor(frame, app, main.editor);

    let preview = HighlightView::new(app.text.value(), &app.target_word, app.theme);
    frame.render_widget(preview, main.preview);

    // Retype field plus the two bound fields share one row.
    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(12),
        ])
        .split(main.controls);

    let word_border = match app.feedback {
        Feedback::Match => colors.success(),
        Feedback::Miss => colors.warning(),
        Feedback::Neutral => focus_border(app, Focus::Word),
    };
    render_field(
        frame,
        controls[0],
        " Retype ",
        &app.word_input,
        app.focus == Focus::Word,
        word_border,
        colors,
    );
    render_field(
        frame,
        controls[1],
        " Min ",
        &app.min_input,
        app.focus == Focus::MinLen,
        focus_border(app, Focus::MinLen),
        colors,
    );
    render_field(
        frame,
        controls[2],
        " Max ",
        &app.max_input,
        app.focus == Focus::MaxLen,
        focus_border(app, Focus::MaxLen),
        colors,
    );

    let title_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(24)])
        .split(main.title);

    render_field(
        frame,
        title_row[0],
        " Note title ",
        &app.title_input,
        app.focus == Focus::Title,
        focus_border(app, Focus::Title),
        colors,
    );

    let save_label = match app.edit_state {
        EditState::Editing(_) => " [Ctrl+S] Update note",
        EditState::Idle => " [Ctrl+S] Save note",
    };
    let save_hint = Paragraph::new(Line::from(Span::styled(
        save_label,
        Style::default().fg(colors.accent()),
    )))
    .block(Block::default());
    frame.render_widget(save_hint, centered_row(title_row[1]));

    if let Some(ref message) = app.last_error {
        let error = Paragraph::new(Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(colors.error()),
        )));
        frame.render_widget(error, main.message);
    }
}

/// Vertically center a one-line hint inside a bordered-row-height area.
fn centered_row(area: Rect) -> Rect {
    if area.height >= 3 {
        Rect::new(area.x, area.y + 1, area.width, 1)
    } else {
        area
    }
}

fn focus_border(app: &App, focus: Focus) -> Color {
    let colors = &app.theme.colors;
    if app.focus == focus {
        colors.border_focused()
    } else {
        colors.border()
    }
}

fn render_editor(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    let text_style = Style::default().fg(colors.fg());
    let cursor_style = Style::default()
        .fg(colors.bg())
        .bg(colors.fg())
        .add_modifier(Modifier::SLOW_BLINK);

    let focused = app.focus == Focus::Text;
    let lines = editor_lines(app.text.render_parts(), focused, text_style, cursor_style);

    let block = Block::bordered()
        .title(" Text ")
        .border_style(Style::default().fg(focus_border(app, Focus::Text)))
        .style(Style::default().bg(colors.bg()));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Build styled lines for the multi-line editor, honoring embedded
/// newlines in all three cursor-split parts.
fn editor_lines<'a>(
    parts: (&'a str, Option<char>, &'a str),
    show_cursor: bool,
    text_style: Style,
    cursor_style: Style,
) -> Vec<Line<'a>> {
    let (before, cursor_char, after) = parts;
    let mut lines: Vec<Line> = vec![Line::default()];

    push_multiline(&mut lines, before, text_style);

    match cursor_char {
        Some('\n') => {
            if show_cursor {
                lines.last_mut().unwrap().spans.push(Span::styled(" ", cursor_style));
            }
            lines.push(Line::default());
        }
        Some(ch) => {
            let style = if show_cursor { cursor_style } else { text_style };
            lines
                .last_mut()
                .unwrap()
                .spans
                .push(Span::styled(ch.to_string(), style));
        }
        None => {
            if show_cursor {
                lines.last_mut().unwrap().spans.push(Span::styled(" ", cursor_style));
            }
        }
    }

    push_multiline(&mut lines, after, text_style);
    lines
}

fn push_multiline<'a>(lines: &mut Vec<Line<'a>>, text: &'a str, style: Style) {
    for (i, piece) in text.split('\n').enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        if !piece.is_empty() {
            lines.last_mut().unwrap().spans.push(Span::styled(piece, style));
        }
    }
}

fn render_field(
    frame: &mut ratatui::Frame,
    area: Rect,
    label: &str,
    input: &LineInput,
    focused: bool,
    border: Color,
    colors: &ui::theme::ThemeColors,
) {
    let text_style = Style::default().fg(colors.fg());
    let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());

    let (before, cursor_char, after) = input.render_parts();
    let mut spans = vec![Span::styled(before, text_style)];
    match cursor_char {
        Some(ch) => {
            let style = if focused { cursor_style } else { text_style };
            spans.push(Span::styled(ch.to_string(), style));
            spans.push(Span::styled(after, text_style));
        }
        None => {
            if focused {
                spans.push(Span::styled(" ", cursor_style));
            }
        }
    }

    let block = Block::bordered()
        .title(label)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors.bg()));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    paragraph.render(area, frame.buffer_mut());
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    let mut spans = vec![Span::styled(
        " [Tab] Next field  [Ctrl+S] Save  [Ctrl+R] Reset  [Enter] Load note  [x] Delete note  [Esc] Quit ",
        Style::default().fg(colors.text_dim()),
    )];
    if app.storage_warning {
        spans.push(Span::styled(
            " storage unavailable - changes are not persisted ",
            Style::default().fg(colors.warning()),
        ));
    }

    let footer = Paragraph::new(Line::from(spans));
    frame.render_widget(footer, area);
}
