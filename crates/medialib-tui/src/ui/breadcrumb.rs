use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::HitRegion;
use crate::ui::{ACCENT, FOLDER_FG, MUTED_FG};

const SEPARATOR: &str = " / ";

/// Renders the breadcrumb trail for the open path, with back/forward hints.
/// Every segment is clickable; segment `n` keeps the first `n` path entries.
/// Example: " Library / Brand Assets / Logos              [<] [>]"
pub fn render_breadcrumb(
    f: &mut Frame,
    area: Rect,
    names: &[&str],
    history: (bool, bool),
    hits: &mut Vec<HitRegion>,
) {
    let mut parts: Vec<Span> = Vec::new();
    for (len, label, offset) in crumb_layout(names) {
        if len > 0 {
            parts.push(Span::styled(SEPARATOR, Style::default().fg(MUTED_FG)));
        }
        let width = label.chars().count() as u16;
        let x = area.x.saturating_add(offset);
        if x < area.right() {
            let clipped = width.min(area.right() - x);
            hits.push(HitRegion::crumb(Rect::new(x, area.y, clipped, 1), len));
        }
        let style = if len == names.len() {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else if len == 0 {
            Style::default().fg(FOLDER_FG).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(FOLDER_FG)
        };
        parts.push(Span::styled(label, style));
    }

    let (can_back, can_forward) = history;
    let nav_text = format!(
        " {} {} ",
        if can_back { "[<]" } else { "   " },
        if can_forward { "[>]" } else { "   " }
    );
    let path_width: usize = parts.iter().map(|s| s.width()).sum();
    let spacer_len = usize::from(area.width).saturating_sub(path_width + nav_text.len());
    if spacer_len > 0 {
        parts.push(Span::raw(" ".repeat(spacer_len)));
    }
    parts.push(Span::styled(nav_text, Style::default().fg(MUTED_FG)));

    f.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// `(path length, label, x offset)` for each segment, root first.
fn crumb_layout(names: &[&str]) -> Vec<(usize, String, u16)> {
    let mut x: u16 = 0;
    std::iter::once("Library")
        .chain(names.iter().copied())
        .enumerate()
        .map(|(len, name)| {
            if len > 0 {
                x = x.saturating_add(SEPARATOR.len() as u16);
            }
            let label = if len == 0 {
                format!(" {name}")
            } else {
                name.to_owned()
            };
            let offset = x;
            x = x.saturating_add(label.chars().count() as u16);
            (len, label, offset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_only() {
        let layout = crumb_layout(&[]);
        assert_eq!(layout, vec![(0, " Library".to_string(), 0)]);
    }

    #[test]
    fn segments_follow_separators() {
        let layout = crumb_layout(&["Brand Assets", "Logos"]);
        assert_eq!(layout[1], (1, "Brand Assets".to_string(), 11));
        assert_eq!(layout[2], (2, "Logos".to_string(), 26));
    }
}
