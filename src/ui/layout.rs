use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use textwrap::wrap;

pub struct ThreeBox {
    pub top: Rect,
    pub middle: Rect,
    pub bottom: Rect,
    pub top_inner: Rect,
    pub middle_inner: Rect,
}

pub struct Margins {
    pub page: u16,
    pub inner_top: u16,
    pub inner_middle: u16,
}

impl Default for Margins {
    fn default() -> Self {
        Self { page: 2, inner_top: 3, inner_middle: 3 }
    }
}

/// Header box sized to its content (min 5 rows), body takes the rest, fixed footer.
pub fn three_box_layout(
    size: Rect,
    top_needed: u16,
    middle_needed: u16,
    footer_height: u16,
    margins: Margins,
) -> ThreeBox {
    let available = size.height.saturating_sub(2 * margins.page).saturating_sub(footer_height);

    let top_min = 5;
    let top_cap = available.saturating_sub(middle_needed);
    let top_height = top_needed.min(top_cap.max(top_min));
    let middle_height = available.saturating_sub(top_height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(margins.page)
        .constraints([
            Constraint::Length(top_height),
            Constraint::Length(middle_height),
            Constraint::Length(footer_height),
        ])
        .split(size);

    ThreeBox {
        top: chunks[0],
        middle: chunks[1],
        bottom: chunks[2],
        top_inner: chunks[0].inner(&Margin { horizontal: margins.inner_top, vertical: 1 }),
        middle_inner: chunks[1].inner(&Margin { horizontal: margins.inner_middle, vertical: 1 }),
    }
}

/// Usable text width inside a bordered box with the default margins.
pub fn inner_width(size: Rect) -> usize {
    size.width.saturating_sub(2 * 2 + 2 + 2 * 3).max(1) as usize
}

/// Rows needed to show `paras` wrapped at `width`, one blank row between paragraphs.
pub fn wrapped_height<S: AsRef<str>>(paras: &[S], width: usize) -> u16 {
    let rows: usize = paras.iter().map(|p| wrap(p.as_ref(), width).len().max(1)).sum();
    (rows + paras.len().saturating_sub(1)) as u16
}

pub fn centered_rect_abs(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width.saturating_sub(2));
    let h = height.min(r.height.saturating_sub(2));
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect { x, y, width: w, height: h }
}
