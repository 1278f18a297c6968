//! Rendering. All styling comes from the [`Theme`] handed in by the caller.

use ghrepos_gateway::Repository;
use ratatui::{
    Frame,
    layout::Margin,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use std::time::Duration;

use crate::menu::{self, Menu};
use crate::session::{Farewell, Phase, Screen};

const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// How often the loading spinner advances.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub item: Style,
    pub selected_item: Style,
    pub spinner: Style,
    pub status: Style,
    pub error: Style,
    pub help: Style,
    pub title_indent: usize,
    pub item_indent: usize,
    pub selected_indent: usize,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            item: Style::default(),
            selected_item: Style::default().fg(Color::Indexed(170)),
            spinner: Style::default().fg(Color::Indexed(205)),
            status: Style::default().fg(Color::Green),
            error: Style::default().fg(Color::Red),
            help: Style::default().fg(Color::DarkGray),
            title_indent: 2,
            item_indent: 4,
            selected_indent: 2,
        }
    }
}

/// `[3/40] name (public) (not archived)`, with ` (fork)` for forks.
pub fn title(repo: &Repository, cursor: usize, total: usize) -> String {
    let archived = if repo.archived {
        "(archived)"
    } else {
        "(not archived)"
    };
    let mut title = format!(
        "[{}/{total}] {} ({}) {archived}",
        cursor + 1,
        repo.name,
        repo.visibility
    );
    if repo.fork {
        title.push_str(" (fork)");
    }
    title
}

/// Text printed once the terminal has been restored.
pub fn farewell_text(farewell: Farewell) -> String {
    format!("\n    {}\n\n", farewell.message())
}

pub fn draw(frame: &mut Frame, screen: &Screen<'_>, menu: &Menu, theme: &Theme, tick: usize) {
    let lines = match screen.phase {
        Phase::Loading | Phase::Busy(_) => loading_lines(theme, tick),
        Phase::Ready => ready_lines(screen, menu, theme),
        Phase::Failed(message) => failed_lines(screen, message, theme),
        Phase::Quitting(farewell) => vec![Line::raw(farewell.message())],
    };

    let area = frame.area().inner(Margin {
        horizontal: 0,
        vertical: 1,
    });
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn pad(width: usize) -> String {
    " ".repeat(width)
}

fn loading_lines(theme: &Theme, tick: usize) -> Vec<Line<'static>> {
    let frame = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];
    vec![
        Line::default(),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(frame, theme.spinner),
            Span::raw(" Loading..."),
        ]),
    ]
}

fn title_line(screen: &Screen<'_>, theme: &Theme) -> Line<'static> {
    let text = match screen.current() {
        Some(repo) => title(repo, screen.cursor, screen.repos.len()),
        None => "ghrepos".to_string(),
    };
    Line::styled(format!("{}{text}", pad(theme.title_indent)), theme.title)
}

fn help_line(text: &str, theme: &Theme) -> Line<'static> {
    Line::styled(format!("{}{text}", pad(theme.item_indent)), theme.help)
}

fn ready_lines(screen: &Screen<'_>, menu: &Menu, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(screen, theme), Line::default()];

    for (index, command) in menu::ENTRIES.iter().enumerate() {
        let entry = format!("{}. {}", index + 1, menu::label(*command));
        lines.push(if index == menu.selected() {
            Line::styled(
                format!("{}> {entry}", pad(theme.selected_indent)),
                theme.selected_item,
            )
        } else {
            Line::styled(format!("{}{entry}", pad(theme.item_indent)), theme.item)
        });
    }

    lines.push(Line::default());
    if let Some(status) = screen.status {
        lines.push(Line::styled(
            format!("{}{status}", pad(theme.item_indent)),
            theme.status,
        ));
    }
    lines.push(help_line("↑/k up • ↓/j down • enter select • q quit", theme));
    lines
}

fn failed_lines(screen: &Screen<'_>, message: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(screen, theme), Line::default()];
    lines.extend(
        message
            .lines()
            .map(|line| Line::styled(format!("{}{line}", pad(theme.item_indent)), theme.error)),
    );
    lines.push(Line::default());
    lines.push(help_line("esc dismiss • enter select • q quit", theme));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Action;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ghrepos_gateway::Visibility;
    use ratatui::{Terminal, backend::TestBackend};

    fn repo(name: &str, archived: bool) -> Repository {
        Repository {
            name: name.to_string(),
            visibility: Visibility::Public,
            fork: false,
            archived,
            clone_url: String::new(),
        }
    }

    fn render(screen: &Screen<'_>, menu: &Menu) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(70, 20)).unwrap();
        terminal
            .draw(|frame| draw(frame, screen, menu, &Theme::default(), 0))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    #[test]
    fn title_marks_archive_state_and_forks() {
        let mut repo = repo("api", true);
        assert_eq!(title(&repo, 2, 40), "[3/40] api (public) (archived)");

        repo.archived = false;
        repo.fork = true;
        repo.visibility = Visibility::Private;
        assert_eq!(
            title(&repo, 0, 1),
            "[1/1] api (private) (not archived) (fork)"
        );
    }

    #[test]
    fn ready_view_shows_title_and_highlighted_entry() {
        let repos = [repo("a", false), repo("b", true)];
        let screen = Screen {
            phase: &Phase::Ready,
            repos: &repos,
            cursor: 1,
            status: Some("Repo archived"),
        };
        let mut menu = Menu::default();
        menu.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));

        let rows = render(&screen, &menu);

        assert!(contains(&rows, "[2/2] b (public) (archived)"));
        assert!(contains(&rows, "    1. Next"));
        assert!(contains(&rows, "  > 2. Open in browser"));
        assert!(contains(&rows, "8. Previous"));
        assert!(contains(&rows, "Repo archived"));
    }

    #[test]
    fn failed_view_replaces_menu_with_error() {
        let repos = [repo("a", false)];
        let phase = Phase::Failed("error: received status code 422, body: nope".into());
        let screen = Screen {
            phase: &phase,
            repos: &repos,
            cursor: 0,
            status: None,
        };

        let rows = render(&screen, &Menu::default());

        assert!(contains(&rows, "received status code 422"));
        assert!(!contains(&rows, "1. Next"));
    }

    #[test]
    fn busy_view_shows_spinner() {
        let repos = [repo("a", false)];
        let phase = Phase::Busy(Action::Delete);
        let screen = Screen {
            phase: &phase,
            repos: &repos,
            cursor: 0,
            status: None,
        };

        let rows = render(&screen, &Menu::default());

        assert!(contains(&rows, "⣾ Loading..."));
    }

    #[test]
    fn farewell_text_is_indented() {
        assert_eq!(
            farewell_text(Farewell::UserQuit),
            "\n    Have a nice day!\n\n"
        );
    }
}
