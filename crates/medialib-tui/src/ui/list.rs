//! List view: one row per item with size and modification date.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::HitRegion;
use crate::icons::icon_for_item;
use crate::ui::statusbar::format_size;
use crate::ui::{visible_window, ItemViewProps, ACCENT, MUTED_FG};

/// Renders `props.items` as rows and records a hit region per row.
pub fn render_list(
    f: &mut Frame,
    area: Rect,
    props: &ItemViewProps<'_>,
    is_active: bool,
    hits: &mut Vec<HitRegion>,
) {
    let border_color = if is_active { ACCENT } else { MUTED_FG };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(props.title.clone())
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if props.items.is_empty() {
        let empty = Paragraph::new(Span::styled(" (empty)", Style::default().fg(MUTED_FG)));
        f.render_widget(empty, inner);
        return;
    }

    let rows = usize::from(inner.height);
    let (start, end) = visible_window(props.cursor.unwrap_or(0), props.items.len(), rows);
    let detail_width = if props.column.is_some() { 0 } else { 22 };
    let name_width = usize::from(inner.width).saturating_sub(detail_width + 4);

    let lines: Vec<Line> = props.items[start..end]
        .iter()
        .enumerate()
        .map(|(offset, item)| {
            let index = start + offset;
            let row = Rect::new(inner.x, inner.y + offset as u16, inner.width, 1);
            hits.push(HitRegion::item(row, item.id().clone(), props.column));

            let name = truncate(
                &format!("{}{}", icon_for_item(item, props.show_icons), item.name()),
                name_width,
            );
            let mut spans = vec![
                Span::raw(format!("{} ", props.marker(item))),
                Span::styled(
                    format!("{name:<name_width$}"),
                    props.style_for(index, item),
                ),
            ];
            if detail_width > 0 {
                spans.push(Span::styled(
                    row_details(item.size(), item.modified()),
                    Style::default().fg(MUTED_FG),
                ));
            }
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Right-hand columns: size and date, blank when unknown.
fn row_details(size: Option<u64>, modified: Option<&str>) -> String {
    let size = size.map(format_size).unwrap_or_default();
    let date = modified.map(|m| m.chars().take(10).collect::<String>());
    format!(" {size:>9}  {:<10}", date.unwrap_or_default())
}

/// Cuts `s` to at most `width` characters, marking the cut with `~`.
pub(crate) fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('~');
    out
}
