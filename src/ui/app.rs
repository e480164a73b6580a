use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::{debug, warn};

use crate::store::{Catalog, CatalogStorage, CsvStorage};

use super::charts::ChartView;
use super::commands::{binding_hints, command_for_key, Command};
use super::forms::{BookField, BookForm, DeleteForm};
use super::helpers::{centered_rect, cursor_column, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Column widths of the catalog table, in field order.
const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(32),
    Constraint::Percentage(24),
    Constraint::Length(6),
    Constraint::Percentage(20),
    Constraint::Length(6),
];

/// What the table view is currently doing. Only one overlay is open at a time.
enum Mode {
    Normal,
    AddingBook(BookForm),
    DeletingBook(DeleteForm),
    ViewingChart(ChartView),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state: the catalog plus whatever the user is doing
/// with it right now.
pub struct App<S: CatalogStorage = CsvStorage> {
    catalog: Catalog<S>,
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl<S: CatalogStorage> App<S> {
    pub fn new(catalog: Catalog<S>) -> Self {
        Self {
            catalog,
            selected: 0,
            mode: Mode::Normal,
            status: None,
        }
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    /// Feed one key press through the current mode. Returns `true` once the
    /// user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => match command_for_key(code) {
                Some(command) => self.dispatch(command, &mut exit),
                None => Mode::Normal,
            },
            Mode::AddingBook(form) => self.handle_add_book(code, form),
            Mode::DeletingBook(form) => self.handle_delete_book(code, form),
            Mode::ViewingChart(chart) => self.handle_chart(code, chart),
        };

        Ok(exit)
    }

    fn dispatch(&mut self, command: Command, exit: &mut bool) -> Mode {
        match command {
            Command::AddBook => {
                self.clear_status();
                Mode::AddingBook(BookForm::default())
            }
            Command::DeleteBook => {
                self.clear_status();
                Mode::DeletingBook(DeleteForm::default())
            }
            Command::GenreChart => {
                self.clear_status();
                Mode::ViewingChart(ChartView::genre_share(&self.catalog.genre_counts()))
            }
            Command::YearChart => {
                self.clear_status();
                Mode::ViewingChart(ChartView::year_counts(&self.catalog.year_counts()))
            }
            Command::SelectPrevious => {
                self.move_selection(-1);
                Mode::Normal
            }
            Command::SelectNext => {
                self.move_selection(1);
                Mode::Normal
            }
            Command::Quit => {
                *exit = true;
                Mode::Normal
            }
        }
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_new_book(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    debug!(error = %message, "add book rejected");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::AddingBook(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_delete_book(&mut self, code: KeyCode, mut form: DeleteForm) -> Mode {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Delete cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.perform_delete(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    debug!(error = %message, "delete book rejected");
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Mode::DeletingBook(form)
        } else {
            Mode::Normal
        }
    }

    fn handle_chart(&mut self, code: KeyCode, chart: ChartView) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ') => {
                Mode::Normal
            }
            _ => Mode::ViewingChart(chart),
        }
    }

    fn save_new_book(&mut self, form: &BookForm) -> Result<()> {
        let book = form.parse_inputs()?;
        let added = book.to_string();
        if let Err(err) = self.catalog.add_book(book) {
            warn!(error = %err, "could not persist new book");
            return Err(err.into());
        }
        self.selected = self.catalog.len().saturating_sub(1);
        self.set_status(format!("Added {added}."), StatusKind::Info);
        Ok(())
    }

    fn perform_delete(&mut self, form: &DeleteForm) -> Result<()> {
        let title = form.parse_title()?;
        let removed = match self.catalog.delete_book(title) {
            Ok(removed) => removed,
            Err(err) => {
                warn!(error = %err, "could not persist deletion");
                return Err(err.into());
            }
        };
        self.clamp_selection();

        let message = match removed {
            0 => format!("No books titled \"{title}\"."),
            1 => format!("Removed \"{title}\"."),
            n => format!("Removed {n} books titled \"{title}\"."),
        };
        self.set_status(message, StatusKind::Info);
        Ok(())
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_table(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::DeletingBook(form) => self.draw_delete_form(frame, area, form),
            Mode::ViewingChart(chart) => chart.render(frame, area),
            Mode::Normal => {}
        }
    }

    fn draw_table(&self, frame: &mut Frame, area: Rect) {
        let books = self.catalog.books();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Library Catalog ({} books)", books.len()));

        if books.is_empty() {
            let message = Paragraph::new("No books yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(BookField::ALL.iter().map(|field| Cell::from(field.label())))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows = books.iter().map(|book| Row::new(book.cells()));

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::Normal => binding_hints(),
            Mode::AddingBook(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::DeletingBook(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Delete All Matches   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::ViewingChart(_) => Line::from(vec![
                Span::styled("[Esc]", key_style),
                Span::raw(" Close Chart"),
            ]),
        }
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = BookField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch field • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let row = BookField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0) as u16;
        let offset = form.active.label().len() + 2 + form.value_len(form.active);
        frame.set_cursor_position((cursor_column(inner, offset), inner.y.saturating_add(row)));
    }

    fn draw_delete_form(&self, frame: &mut Frame, area: Rect, form: &DeleteForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Title: "),
                Span::styled(form.title.clone(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Every book with exactly this title is removed.",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let offset = "Title: ".len() + form.title.chars().count();
        frame.set_cursor_position((cursor_column(inner, offset), inner.y));
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.catalog.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + offset;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.catalog.len() {
            self.selected = self.catalog.len().saturating_sub(1);
        }
    }
}
