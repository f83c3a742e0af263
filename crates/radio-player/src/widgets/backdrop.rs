//! Vertical gradient painted behind every frame, dark blue at the top fading
//! to light blue at the bottom.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// Color of row `row` out of `height`.  Each channel expression is truncated
/// as a whole, so the falling blue channel rounds up where the others round
/// down.
pub fn gradient_color(row: u16, height: u16) -> Color {
    let h = u32::from(height.max(1));
    let i = u32::from(row.min(height));
    let r = 20 + 100 * i / h;
    let g = 50 + 100 * i / h;
    let b = (200 * h - 50 * i) / h;
    Color::Rgb(r as u8, g as u8, b as u8)
}

/// Fills its area with the gradient.  The gradient spans the area's own
/// height, so rendering it over `frame.area()` after a resize recomputes it.
pub struct Backdrop;

impl Widget for Backdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for dy in 0..area.height {
            let color = gradient_color(dy, area.height);
            for x in area.left()..area.right() {
                buf[(x, area.y + dy)].set_bg(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(gradient_color(0, 24), Color::Rgb(20, 50, 200));
        // i = 12 of 24: 20 + 50, 50 + 50, 200 - 25
        assert_eq!(gradient_color(12, 24), Color::Rgb(70, 100, 175));
        // 23/24: 20 + 95.8 -> 115, 200 - 47.9 = 152.1 -> 152
        assert_eq!(gradient_color(23, 24), Color::Rgb(115, 145, 152));
    }

    #[test]
    fn test_blue_truncates_after_subtraction() {
        // 200 - 50/3 = 183.3
        assert_eq!(gradient_color(1, 3), Color::Rgb(53, 83, 183));
        // 200 - 100/7 = 185.7
        assert_eq!(gradient_color(2, 7), Color::Rgb(48, 78, 185));
    }

    #[test]
    fn test_zero_height_does_not_divide_by_zero() {
        assert_eq!(gradient_color(0, 0), Color::Rgb(20, 50, 200));
    }

    #[test]
    fn test_render_paints_every_row() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        Backdrop.render(area, &mut buf);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(buf[(x, y)].bg, gradient_color(y, 3));
            }
        }
    }
}
