//! Column picker widget.

use super::constants::{PICKER_CURSOR, PICKER_WIDTH};
use super::styles::TableStyles;
use crate::state::SelectableColumnList;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Bordered checklist of columns, left-aligned in the given area.
pub struct ColumnPicker<'a> {
    title: &'a str,
    list: &'a SelectableColumnList,
    styles: &'a TableStyles,
}

impl<'a> ColumnPicker<'a> {
    /// Create a picker titled `title` over `list`.
    pub fn new(title: &'a str, list: &'a SelectableColumnList, styles: &'a TableStyles) -> Self {
        Self {
            title,
            list,
            styles,
        }
    }

    fn lines(&self, height: usize) -> Vec<Line<'static>> {
        let items = self.list.items();
        let cursor = self.list.cursor();
        // keep the cursor on screen for long column lists
        let start = if height == 0 {
            0
        } else {
            cursor.saturating_sub(height - 1)
        };
        let blank = " ".repeat(PICKER_CURSOR.len());

        items
            .iter()
            .enumerate()
            .skip(start)
            .take(height)
            .map(|(i, item)| {
                if i == cursor {
                    Line::from(vec![
                        Span::styled(PICKER_CURSOR, self.styles.highlight),
                        Span::styled(item.label(), self.styles.highlight),
                    ])
                } else {
                    Line::from(vec![Span::raw(blank.clone()), Span::raw(item.label())])
                }
            })
            .collect()
    }
}

impl Widget for ColumnPicker<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Rect {
            width: area.width.min(PICKER_WIDTH),
            ..area
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border)
            .title(Span::styled(format!(" {} ", self.title), self.styles.header));
        let inner = block.inner(area);
        let lines = self.lines(inner.height as usize);

        block.render(area, buf);
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::styles::ColorConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn list(n: usize) -> SelectableColumnList {
        let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
        SelectableColumnList::new(&columns)
    }

    fn render(list: &SelectableColumnList, height: u16) -> Vec<String> {
        let styles = TableStyles::with_color_config(ColorConfig::fixed(false));
        let mut terminal = Terminal::new(TestBackend::new(60, height)).unwrap();
        terminal
            .draw(|frame| {
                frame.render_widget(
                    ColumnPicker::new("Visible Columns", list, &styles),
                    frame.area(),
                )
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..buffer.area.width)
                    .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn shows_title_and_checked_items() {
        let rows = render(&list(2), 6);
        assert!(rows[0].contains("Visible Columns"));
        assert!(rows[1].starts_with("│> [x] col0 "), "{}", rows[1]);
        assert!(rows[2].starts_with("│  [x] col1 "), "{}", rows[2]);
        assert!(rows[1].ends_with('│'));
    }

    #[test]
    fn unticked_items_render_empty_box() {
        let mut picker = list(2);
        picker.toggle_at(1);
        let rows = render(&picker, 6);
        assert!(rows[2].contains("[ ] col1"));
    }

    #[test]
    fn box_is_capped_at_picker_width() {
        let rows = render(&list(1), 4);
        assert_eq!(rows[1].chars().count(), PICKER_WIDTH as usize);
    }

    #[test]
    fn cursor_stays_visible_in_long_lists() {
        let mut picker = list(10);
        for _ in 0..8 {
            picker.cursor_down();
        }
        // two inner rows: col7 and col8
        let rows = render(&picker, 4);
        assert!(rows[1].contains("col7"));
        assert!(rows[2].contains("> [x] col8"));
    }
}
