use super::{App, FrameView, HELP_POPUP_WIDTH};
use crate::{
    app_block::AppBlock,
    columns::Column,
    content_line_maker::fit_to_width,
    mode::Mode,
    status_bar::StatusBar,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};

/// join the cells of one table row, each fitted to its column width
fn table_row(columns: &[&Column], cell: impl Fn(&Column) -> String) -> String {
    columns
        .iter()
        .map(|column| fit_to_width(&cell(column), column.width))
        .collect::<Vec<_>>()
        .join(" ")
}

impl App {
    fn render_logs(
        &self,
        logs_block: &mut AppBlock,
        frame: &FrameView,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let title = if frame.pattern.is_empty() {
            format!("Logs - {}", frame.total_count)
        } else {
            format!("Logs - {} of {}", frame.filtered_count, frame.total_count)
        };
        let title = if frame.reversed {
            format!("{} (reversed)", title)
        } else {
            title
        };
        logs_block.update_title(title);

        let [content_area, scrollbar_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                .margin(0)
                .areas(area);

        let inner_area = logs_block.get_content_rect(content_area, self.palette.border);
        let width = inner_area.width as usize;

        let mut lines = Vec::with_capacity(frame.rows.len() + 1);
        let header = table_row(&frame.columns, |column| column.key.clone());
        lines.push(Line::styled(fit_to_width(&header, width), self.palette.header));

        for (i, line) in frame.rows.iter().enumerate() {
            // with no visible columns the raw line is shown instead
            let text = if frame.columns.is_empty() {
                line.raw().to_string()
            } else {
                table_row(&frame.columns, |column| line.field(&column.key).display_text())
            };
            let style = if frame.cursor_row == Some(i) {
                self.palette.selected
            } else {
                Style::default()
            };
            lines.push(Line::styled(fit_to_width(&text, width), style));
        }

        Paragraph::new(lines)
            .block(logs_block.build(self.palette.border))
            .fg(self.palette.text_fg)
            .render(content_area, buf);

        let position = frame
            .cursor_row
            .map(|row| self.viewport.offset() + row)
            .unwrap_or(0);
        logs_block.update_scrollbar_state(frame.filtered_count, position);
        StatefulWidget::render(
            AppBlock::create_scrollbar(self.palette.border),
            scrollbar_area,
            buf,
            logs_block.get_scrollbar_state(),
        );
    }

    fn render_details(
        &self,
        details_block: &mut AppBlock,
        frame: &FrameView,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let [content_area, scrollbar_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                .margin(0)
                .areas(area);

        let lines_count = frame.detail.len();
        let scroll_position = details_block.get_scroll_position();
        details_block.set_lines_count(lines_count);
        details_block.update_scrollbar_state(lines_count, scroll_position);

        Paragraph::new(frame.detail.to_vec())
            .block(details_block.build(self.palette.border))
            .fg(self.palette.text_fg)
            .wrap(Wrap { trim: false })
            .scroll((scroll_position as u16, 0))
            .render(content_area, buf);

        StatefulWidget::render(
            AppBlock::create_scrollbar(self.palette.border),
            scrollbar_area,
            buf,
            details_block.get_scrollbar_state(),
        );
    }

    fn render_column_manager(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Column Management (space: toggle, c: exit)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border));
        let visible_height = block.inner(area).height as usize;

        let cursor = self.columns.cursor();
        let start = cursor.saturating_sub(visible_height.saturating_sub(1));
        let lines: Vec<Line> = self
            .columns
            .all()
            .iter()
            .enumerate()
            .skip(start)
            .take(visible_height)
            .map(|(i, column)| {
                let marker = if i == cursor { "> " } else { "  " };
                let checked = if column.visible { "[x]" } else { "[ ]" };
                let text = format!("{}{} {}", marker, checked, column.key);
                if i == cursor {
                    Line::styled(text, self.palette.selected)
                } else {
                    Line::from(text)
                }
            })
            .collect();

        Paragraph::new(lines)
            .block(block)
            .fg(self.palette.text_fg)
            .render(area, buf);
    }

    fn render_footer(&self, frame: &FrameView, area: Rect, buf: &mut Buffer) {
        let (mid_text, custom_style) = if let Some(event) = &self.display_event {
            (event.text.clone(), Some(event.style))
        } else if frame.mode == Mode::Filtering || !frame.pattern.is_empty() {
            (format!("/{}", frame.pattern), None)
        } else {
            ("?: help | q: quit".to_string(), None)
        };

        let position = match frame.cursor_row {
            Some(row) => format!("{}/{}", self.viewport.offset() + row + 1, frame.filtered_count),
            None => "0/0".to_string(),
        };

        let mut status_bar = StatusBar::new()
            .set_left(frame.mode.to_string())
            .set_mid(mid_text)
            .set_right(position)
            .set_left_fg(self.palette.hint_fg)
            .set_right_fg(self.palette.hint_fg);

        if let Some(style) = custom_style {
            status_bar = status_bar.set_style(style);
        } else if frame.mode == Mode::Filtering {
            status_bar = status_bar.set_style(self.palette.filter_focus);
        }

        status_bar.render(area, buf);
    }

    fn render_help_popup(&self, area: Rect, buf: &mut Buffer) {
        let help_text = vec![
            Line::from("Navigation:".bold()),
            Line::from("  j/k/↑/↓   - Move to next/prev log"),
            Line::from("  g/G       - Jump to first/last log"),
            Line::from("  ^d/^u     - Half page down/up"),
            Line::from("  J/K       - Scroll details"),
            Line::from(""),
            Line::from("Actions:".bold()),
            Line::from("  /         - Filter (regex, case-insensitive)"),
            Line::from("  Enter/Esc - Leave filter input, keep pattern"),
            Line::from("  s         - Reverse order"),
            Line::from("  c         - Manage columns"),
            Line::from("  y         - Copy current log to clipboard"),
            Line::from("  q         - Quit program"),
        ];

        // calculate popup height: content lines + 2 for borders
        let popup_height = help_text.len() as u16 + 2;

        // center the popup
        let popup_area = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(popup_height),
            Constraint::Fill(1),
        ])
        .split(area)[1];

        let popup_area = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(HELP_POPUP_WIDTH),
            Constraint::Fill(1),
        ])
        .split(popup_area)[1];

        // clear the area first
        Clear.render(popup_area, buf);

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.text_fg));

        Paragraph::new(help_text)
            .block(block)
            .fg(self.palette.text_fg)
            .render(popup_area, buf);
    }

    fn render_frame(&mut self, area: Rect, buf: &mut Buffer) {
        let [main_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        // the frame view borrows self, so the panel blocks are detached while painting
        let mut logs_block = std::mem::take(&mut self.logs_block);
        let mut details_block = std::mem::take(&mut self.details_block);
        {
            let frame = self.frame();
            if frame.mode == Mode::ColumnManagement {
                self.render_column_manager(main_area, buf);
            } else {
                let [logs_area, details_area] = Layout::horizontal([
                    Constraint::Percentage(self.list_percentage),
                    Constraint::Percentage(100 - self.list_percentage),
                ])
                .areas(main_area);
                self.render_logs(&mut logs_block, &frame, logs_area, buf);
                self.render_details(&mut details_block, &frame, details_area, buf);
            }
            self.render_footer(&frame, footer_area, buf);
        }
        self.logs_block = logs_block;
        self.details_block = details_block;

        if self.show_help_popup {
            self.render_help_popup(area, buf);
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_frame(area, buf);
    }
}
