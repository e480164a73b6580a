use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs and chart overlays.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Flatten an error and its causes into one line for the footer.
pub(crate) fn surface_error(err: &Error) -> String {
    format!("{err:#}")
}

/// Column for a cursor `offset` cells into `inner`, kept on the area's last
/// column when the text runs past it.
pub(crate) fn cursor_column(inner: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    let last = inner.right().saturating_sub(1).max(inner.x);
    inner.x.saturating_add(offset).min(last)
}

/// Number of cells out of `width` that `count / total` should fill. Any
/// non-zero count gets at least one cell.
pub(crate) fn proportional_width(count: u64, total: u64, width: u16) -> u16 {
    if total == 0 || count == 0 || width == 0 {
        return 0;
    }
    let scaled = (count as f64 / total as f64 * f64::from(width)).round() as u16;
    scaled.clamp(1, width)
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn cursor_column_is_clamped_to_the_area() {
        let inner = Rect::new(10, 5, 20, 3);
        assert_eq!(cursor_column(inner, 4), 14);
        assert_eq!(cursor_column(inner, 19), 29);
        assert_eq!(cursor_column(inner, 25), 29);
        assert_eq!(cursor_column(inner, usize::MAX), 29);
        assert_eq!(cursor_column(Rect::new(3, 0, 0, 0), 7), 3);
    }

    #[test]
    fn surface_error_keeps_the_cause() {
        let err = Err::<(), _>(anyhow!("disk full"))
            .context("failed to write catalog file books.csv")
            .unwrap_err();
        assert_eq!(
            surface_error(&err),
            "failed to write catalog file books.csv: disk full"
        );
    }

    #[test]
    fn proportional_width_scales_and_floors_at_one() {
        assert_eq!(proportional_width(1, 2, 20), 10);
        assert_eq!(proportional_width(2, 2, 20), 20);
        assert_eq!(proportional_width(1, 1000, 20), 1);
        assert_eq!(proportional_width(0, 10, 20), 0);
        assert_eq!(proportional_width(3, 0, 20), 0);
    }
}
