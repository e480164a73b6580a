use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::store::Tally;

use super::helpers::{centered_rect, proportional_width};

/// Slice colors for the genre chart, reused in order.
const SLICE_COLORS: &[Color] = &[
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightMagenta,
];
/// Width of one bar in the year chart; fits a four-digit year label.
const BAR_WIDTH: u16 = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ChartKind {
    /// Each genre's share of the catalog.
    GenreShare,
    /// Number of books per publication year.
    YearCounts,
}

/// One bar or slice: label, count, and percentage of the whole catalog.
#[derive(Clone, Debug, PartialEq)]
struct ChartEntry {
    label: String,
    count: u64,
    share: f64,
}

impl ChartEntry {
    fn from_tally<K>(tally: &Tally<K>, label: String, count: usize) -> Self {
        Self {
            label,
            count: count as u64,
            share: tally.share(count),
        }
    }
}

/// Snapshot of a tally taken when the chart was requested.
#[derive(Clone, Debug)]
pub(crate) struct ChartView {
    pub(crate) kind: ChartKind,
    entries: Vec<ChartEntry>,
}

impl ChartView {
    pub(crate) fn genre_share(tally: &Tally<String>) -> Self {
        Self {
            kind: ChartKind::GenreShare,
            entries: tally
                .iter()
                .map(|(genre, count)| ChartEntry::from_tally(tally, genre.clone(), count))
                .collect(),
        }
    }

    pub(crate) fn year_counts(tally: &Tally<i32>) -> Self {
        Self {
            kind: ChartKind::YearCounts,
            entries: tally
                .iter()
                .map(|(year, count)| ChartEntry::from_tally(tally, year.to_string(), count))
                .collect(),
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self.kind {
            ChartKind::GenreShare => "Books by genre",
            ChartKind::YearCounts => "Books per year",
        }
    }

    /// `label  NN.N%  ████` rows, one per genre, with bars scaled to `width`.
    pub(crate) fn share_lines(&self, width: u16) -> Vec<Line<'static>> {
        let total: u64 = self.entries.iter().map(|entry| entry.count).sum();
        let label_width = self
            .entries
            .iter()
            .map(|entry| entry.label.chars().count())
            .max()
            .unwrap_or(0);
        // Label, two spaces, "100.0%", two spaces.
        let bar_room = width.saturating_sub((label_width + 10) as u16);

        self.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                let color = SLICE_COLORS[idx % SLICE_COLORS.len()];
                let filled = proportional_width(entry.count, total, bar_room) as usize;
                Line::from(vec![
                    Span::styled(
                        format!("{:<label_width$}", entry.label),
                        Style::default().fg(color),
                    ),
                    Span::raw(format!("  {:>5.1}%  ", entry.share)),
                    Span::styled("█".repeat(filled), Style::default().fg(color)),
                ])
            })
            .collect()
    }

    /// Draw the chart as an overlay on top of `area`.
    pub(crate) fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(80, 70, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(Line::from(self.title()).alignment(Alignment::Center))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        if self.entries.is_empty() {
            let message = Paragraph::new("No books to chart yet.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(message, inner);
            return;
        }

        match self.kind {
            ChartKind::GenreShare => {
                let paragraph = Paragraph::new(self.share_lines(inner.width));
                frame.render_widget(paragraph, inner);
            }
            ChartKind::YearCounts => self.render_bars(frame, inner),
        }
    }

    fn render_bars(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let caption_style = Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC);
        frame.render_widget(
            Paragraph::new(Span::styled("Number of books", caption_style)),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled("Publication year", caption_style))
                .alignment(Alignment::Center),
            chunks[2],
        );

        let bars: Vec<Bar> = self
            .entries
            .iter()
            .map(|entry| {
                Bar::default()
                    .value(entry.count)
                    .label(Line::from(entry.label.clone()))
            })
            .collect();

        let chart = BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(BAR_WIDTH)
            .bar_gap(2)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
        frame.render_widget(chart, chunks[1]);
    }
}
