//! Action menu and key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::{Action, Command};

/// Menu entries in display order.
pub const ENTRIES: [Command; 8] = [
    Command::Next,
    Command::Run(Action::Open),
    Command::Run(Action::Archive),
    Command::Run(Action::Unarchive),
    Command::Run(Action::MakePublic),
    Command::Run(Action::MakePrivate),
    Command::Run(Action::Delete),
    Command::Previous,
];

pub fn label(command: Command) -> &'static str {
    match command {
        Command::Next => "Next",
        Command::Previous => "Previous",
        Command::Run(Action::Open) => "Open in browser",
        Command::Run(Action::Archive) => "Archive",
        Command::Run(Action::Unarchive) => "Unarchive",
        Command::Run(Action::MakePublic) => "Make it public",
        Command::Run(Action::MakePrivate) => "Make it private",
        Command::Run(Action::Delete) => "Delete",
        Command::Dismiss => "Dismiss",
        Command::Quit => "Quit",
    }
}

/// Highlighted menu entry. Moving past either end stays put.
#[derive(Debug, Default)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Maps a key press to a command, moving the highlight as a side effect.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Esc => Some(Command::Dismiss),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(ENTRIES.len() - 1);
                None
            }
            KeyCode::Enter => Some(ENTRIES[self.selected]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(menu: &mut Menu, code: KeyCode) -> Option<Command> {
        menu.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn enter_selects_highlighted_entry() {
        let mut menu = Menu::default();
        assert_eq!(press(&mut menu, KeyCode::Enter), Some(Command::Next));

        press(&mut menu, KeyCode::Down);
        press(&mut menu, KeyCode::Char('j'));
        assert_eq!(
            press(&mut menu, KeyCode::Enter),
            Some(Command::Run(Action::Archive))
        );
    }

    #[test]
    fn highlight_is_clamped() {
        let mut menu = Menu::default();
        press(&mut menu, KeyCode::Up);
        assert_eq!(menu.selected(), 0);

        for _ in 0..20 {
            press(&mut menu, KeyCode::Down);
        }
        assert_eq!(menu.selected(), ENTRIES.len() - 1);
        assert_eq!(press(&mut menu, KeyCode::Enter), Some(Command::Previous));
    }

    #[test]
    fn quit_and_dismiss_keys() {
        let mut menu = Menu::default();
        assert_eq!(press(&mut menu, KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(press(&mut menu, KeyCode::Esc), Some(Command::Dismiss));
        assert_eq!(
            menu.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(press(&mut menu, KeyCode::Char('c')), None);
    }
}
