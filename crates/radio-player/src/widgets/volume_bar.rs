//! Volume slider: a smooth Unicode bar with the numeric value beside it.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_PLAYING, C_SECONDARY};

const LABEL: &str = "Volume ";
/// Width reserved after the bar for " 100".
const VALUE_W: u16 = 4;

/// Cells the bar itself occupies inside `area`.
fn bar_span(area: Rect) -> (u16, u16) {
    let start = area.x + LABEL.len() as u16;
    let width = area.width.saturating_sub(LABEL.len() as u16 + VALUE_W);
    (start, width)
}

/// Render the slider.  `volume` is 0–100.
pub fn draw_volume(frame: &mut Frame, area: Rect, volume: f32, focused: bool) {
    if area.width < 12 || area.height == 0 {
        return;
    }
    let (_, bar_w) = bar_span(area);
    let bar_w = bar_w as usize;

    let eighths = ((volume / 100.0).clamp(0.0, 1.0) * bar_w as f32 * 8.0) as usize;
    let full_blocks = eighths / 8;
    let partial = eighths % 8;

    const BLOCKS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

    let mut bar = String::with_capacity(bar_w + 4);
    for _ in 0..full_blocks {
        bar.push('█');
    }
    if full_blocks < bar_w {
        bar.push(BLOCKS[partial]);
        for _ in (full_blocks + 1)..bar_w {
            bar.push('·');
        }
    }

    let label_style = if focused {
        Style::default().fg(C_SECONDARY)
    } else {
        Style::default().fg(C_MUTED)
    };

    let line = Line::from(vec![
        Span::styled(LABEL, label_style),
        Span::styled(bar, Style::default().fg(C_PLAYING)),
        Span::styled(
            format!("{:>4}", volume.round() as u32),
            Style::default().fg(C_SECONDARY),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Volume for a click at `column`, snapped to whole numbers.  `None` when
/// the click missed the bar.
pub fn volume_at(area: Rect, column: u16) -> Option<f32> {
    let (start, width) = bar_span(area);
    if width == 0 || column < start || column >= start + width {
        return None;
    }
    let offset = f32::from(column - start) + 0.5;
    Some((offset / f32::from(width) * 100.0).round().clamp(0.0, 100.0))
}
