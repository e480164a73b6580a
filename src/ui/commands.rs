use crossterm::event::KeyCode;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Actions reachable from the catalog table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    AddBook,
    DeleteBook,
    GenreChart,
    YearChart,
    SelectPrevious,
    SelectNext,
    Quit,
}

/// One row of the key table: the keys that trigger `command` and the hint
/// shown in the footer (`None` keeps the binding out of the footer).
pub(crate) struct Binding {
    pub(crate) keys: &'static [KeyCode],
    pub(crate) command: Command,
    pub(crate) hint: Option<(&'static str, &'static str)>,
}

/// Key bindings for the table view, in footer order.
pub(crate) const BINDINGS: &[Binding] = &[
    Binding {
        keys: &[KeyCode::Up, KeyCode::Char('k')],
        command: Command::SelectPrevious,
        hint: None,
    },
    Binding {
        keys: &[KeyCode::Down, KeyCode::Char('j')],
        command: Command::SelectNext,
        hint: Some(("[↑↓]", " Navigate")),
    },
    Binding {
        keys: &[KeyCode::Char('a'), KeyCode::Char('A'), KeyCode::Char('+')],
        command: Command::AddBook,
        hint: Some(("[a]", " Add")),
    },
    Binding {
        keys: &[KeyCode::Char('d'), KeyCode::Char('D'), KeyCode::Char('-')],
        command: Command::DeleteBook,
        hint: Some(("[d]", " Delete")),
    },
    Binding {
        keys: &[KeyCode::Char('g'), KeyCode::Char('G')],
        command: Command::GenreChart,
        hint: Some(("[g]", " Genres")),
    },
    Binding {
        keys: &[KeyCode::Char('y'), KeyCode::Char('Y')],
        command: Command::YearChart,
        hint: Some(("[y]", " Years")),
    },
    Binding {
        keys: &[KeyCode::Char('q'), KeyCode::Esc],
        command: Command::Quit,
        hint: Some(("[q]", " Quit")),
    },
];

/// Look up the command bound to `code`.
pub(crate) fn command_for_key(code: KeyCode) -> Option<Command> {
    BINDINGS
        .iter()
        .find(|binding| binding.keys.contains(&code))
        .map(|binding| binding.command)
}

/// Footer line listing every binding that carries a hint.
pub(crate) fn binding_hints() -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (key, label) in BINDINGS.iter().filter_map(|binding| binding.hint) {
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(key, key_style));
        spans.push(Span::raw(label));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for_key(KeyCode::Char('a')), Some(Command::AddBook));
        assert_eq!(command_for_key(KeyCode::Char('+')), Some(Command::AddBook));
        assert_eq!(command_for_key(KeyCode::Char('d')), Some(Command::DeleteBook));
        assert_eq!(command_for_key(KeyCode::Char('g')), Some(Command::GenreChart));
        assert_eq!(command_for_key(KeyCode::Char('y')), Some(Command::YearChart));
        assert_eq!(command_for_key(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(command_for_key(KeyCode::Up), Some(Command::SelectPrevious));
        assert_eq!(command_for_key(KeyCode::Char('z')), None);
    }

    #[test]
    fn no_key_is_bound_twice() {
        let keys: Vec<KeyCode> = BINDINGS
            .iter()
            .flat_map(|binding| binding.keys.iter().copied())
            .collect();
        for (idx, key) in keys.iter().enumerate() {
            assert!(!keys[idx + 1..].contains(key), "{key:?} bound twice");
        }
    }

    #[test]
    fn hints_cover_workflows() {
        let text: String = binding_hints()
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(text.contains("Add"));
        assert!(text.contains("Delete"));
        assert!(text.contains("Genres"));
        assert!(text.contains("Years"));
    }
}
