use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Book;

/// Fields available within the add-book form, in focus order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
    Genre,
    Copies,
}

impl BookField {
    pub(crate) const ALL: [BookField; 5] = [
        BookField::Title,
        BookField::Author,
        BookField::Year,
        BookField::Genre,
        BookField::Copies,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
            BookField::Genre => "Genre",
            BookField::Copies => "Copies",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

/// Free-text state of the add-book form. Every field accepts any printable
/// character; year and copies are only coerced on submit.
#[derive(Default, Clone, Debug)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre: String,
    pub(crate) copies: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

impl BookForm {
    fn value(&self, field: BookField) -> &String {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
            BookField::Genre => &self.genre,
            BookField::Copies => &self.copies,
        }
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Year => &mut self.year,
            BookField::Genre => &mut self.genre,
            BookField::Copies => &mut self.copies,
        }
    }

    /// Move focus to the next field, wrapping after the last one.
    pub(crate) fn next_field(&mut self) {
        let idx = (self.active.index() + 1) % BookField::ALL.len();
        self.active = BookField::ALL[idx];
    }

    /// Move focus to the previous field, wrapping before the first one.
    pub(crate) fn previous_field(&mut self) {
        let len = BookField::ALL.len();
        let idx = (self.active.index() + len - 1) % len;
        self.active = BookField::ALL[idx];
    }

    /// Append a character to the active field. Control characters are ignored.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Coerce year and copies to integers and build the record. Text fields
    /// are taken as typed.
    pub(crate) fn parse_inputs(&self) -> Result<Book> {
        let year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| anyhow!("Year must be a whole number."))?;
        let copies = self
            .copies
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow!("Copies must be a whole number of zero or more."))?;

        Ok(Book::new(
            self.title.clone(),
            self.author.clone(),
            year,
            self.genre.clone(),
            copies,
        ))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                BookField::Year | BookField::Copies => "<number>".to_string(),
                _ => String::new(),
            }
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field, for cursor placement.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }
}

/// State of the delete-by-title form.
#[derive(Default, Clone, Debug)]
pub(crate) struct DeleteForm {
    pub(crate) title: String,
    pub(crate) error: Option<String>,
}

impl DeleteForm {
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.title.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.title.pop();
    }

    /// Title to delete, matched exactly as typed. Only an empty entry is
    /// rejected.
    pub(crate) fn parse_title(&self) -> Result<&str> {
        if self.title.is_empty() {
            Err(anyhow!("Enter the title of the book to delete."))
        } else {
            Ok(self.title.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form(year: &str, copies: &str) -> BookForm {
        BookForm {
            title: "Dune".into(),
            author: "Herbert".into(),
            year: year.into(),
            genre: "Sci-Fi".into(),
            copies: copies.into(),
            ..BookForm::default()
        }
    }

    #[test]
    fn parses_valid_input() {
        let book = filled_form("1965", "3").parse_inputs().unwrap();
        assert_eq!(book, Book::new("Dune", "Herbert", 1965, "Sci-Fi", 3));
    }

    #[test]
    fn surrounding_spaces_in_numbers_are_accepted() {
        let book = filled_form(" 1965 ", "3 ").parse_inputs().unwrap();
        assert_eq!(book.year, 1965);
        assert_eq!(book.copies, 3);
    }

    #[test]
    fn non_numeric_year_is_rejected() {
        let err = filled_form("abc", "3").parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Year must be a whole number.");
    }

    #[test]
    fn negative_or_blank_copies_are_rejected() {
        assert!(filled_form("1965", "-1").parse_inputs().is_err());
        assert!(filled_form("1965", "").parse_inputs().is_err());
        assert!(filled_form("1965", "2.5").parse_inputs().is_err());
    }

    #[test]
    fn text_fields_are_not_validated() {
        let form = BookForm {
            year: "2020".into(),
            copies: "0".into(),
            ..BookForm::default()
        };
        let book = form.parse_inputs().unwrap();
        assert_eq!(book.title, "");
        assert_eq!(book.copies, 0);
    }

    #[test]
    fn focus_cycles_in_both_directions() {
        let mut form = BookForm::default();
        form.previous_field();
        assert_eq!(form.active, BookField::Copies);
        form.next_field();
        assert_eq!(form.active, BookField::Title);
        form.next_field();
        form.next_field();
        assert_eq!(form.active, BookField::Year);
    }

    #[test]
    fn typing_goes_to_active_field() {
        let mut form = BookForm::default();
        form.next_field();
        assert!(form.push_char('L'));
        assert!(form.push_char('e'));
        assert!(!form.push_char('\u{7}'));
        form.backspace();
        assert_eq!(form.author, "L");
        assert_eq!(form.value_len(BookField::Author), 1);
        assert!(form.title.is_empty());
    }

    #[test]
    fn empty_delete_title_is_rejected() {
        let form = DeleteForm::default();
        assert!(form.parse_title().is_err());
    }

    #[test]
    fn delete_title_is_not_trimmed() {
        let form = DeleteForm {
            title: " Dune".into(),
            error: None,
        };
        assert_eq!(form.parse_title().unwrap(), " Dune");
    }
}
