//! Clock face and date window rendering.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Widget},
};
use segclock_core::{ClockState, DATE_WINDOW_HEIGHT, Geometry};
use segclock_fonts::{
    COLON_ROWS, COLON_WIDTH, DIGIT_ROW, HOUR_COLON_COL, HOUR_COLS, MINUTE_COLS, SECOND_COLON_COL,
    SECOND_COLS, footprint,
};

/// Widget drawing a [`ClockState`] at its own geometry inside the area.
pub struct ClockView<'a> {
    state: &'a ClockState,
}

impl<'a> ClockView<'a> {
    pub fn new(state: &'a ClockState) -> Self {
        Self { state }
    }

    fn accent(&self) -> Color {
        self.state.options().color.color()
    }

    /// Paint one digit with its top-left corner at `(row, col)` of the frame.
    fn draw_digit(&self, area: Rect, buf: &mut Buffer, digit: u8, row: i32, col: i32) {
        let Some(cells) = footprint(digit) else {
            return;
        };
        let mut base = Style::new();
        if self.state.options().bold {
            base = base.add_modifier(Modifier::SLOW_BLINK);
        }
        let frame = self.state.geometry();
        for cell in cells {
            let style = if cell.lit {
                base.bg(self.accent())
            } else {
                base.bg(Color::Reset)
            };
            paint(
                area,
                buf,
                frame.row + row + i32::from(cell.row),
                frame.col + col + i32::from(cell.col),
                style,
            );
        }
    }

    fn draw_colon(&self, area: Rect, buf: &mut Buffer, col: u16) {
        let style = if self.state.colon_dimmed() {
            Style::new().fg(self.accent()).bg(Color::Reset)
        } else {
            Style::new().bg(self.accent())
        };
        let frame = self.state.geometry();
        for row in COLON_ROWS {
            for dx in 0..COLON_WIDTH {
                paint(
                    area,
                    buf,
                    frame.row + i32::from(row),
                    frame.col + i32::from(col + dx),
                    style,
                );
            }
        }
    }

    fn draw_date(&self, area: Rect, buf: &mut Buffer) {
        let options = self.state.options();
        let date = self.state.date_area();
        let window = clip(date, area);
        Clear.render(window, buf);
        if options.boxed {
            Block::bordered().render(window, buf);
        }

        let mut style = Style::new().fg(self.accent()).bg(Color::Reset);
        if options.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        let text = Geometry::new(
            date.row + DATE_WINDOW_HEIGHT / 2,
            date.col + 1,
            date.width - 2,
            1,
        );
        Line::styled(self.state.time().date.as_str(), style).render(clip(text, area), buf);
    }
}

impl Widget for ClockView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let options = self.state.options();
        let time = self.state.time();

        if options.boxed {
            Block::bordered().render(clip(self.state.geometry(), area), buf);
        }

        let row = i32::from(DIGIT_ROW);
        let mut digits = vec![
            (time.hour[0], HOUR_COLS[0]),
            (time.hour[1], HOUR_COLS[1]),
            (time.minute[0], MINUTE_COLS[0]),
            (time.minute[1], MINUTE_COLS[1]),
        ];
        let mut colons = vec![HOUR_COLON_COL];
        if options.show_seconds {
            digits.push((time.second[0], SECOND_COLS[0]));
            digits.push((time.second[1], SECOND_COLS[1]));
            colons.push(SECOND_COLON_COL);
        }

        for (digit, col) in digits {
            self.draw_digit(area, buf, digit, row, i32::from(col));
        }
        for col in colons {
            self.draw_colon(area, buf, col);
        }
        if options.show_date {
            self.draw_date(area, buf);
        }
    }
}

/// Set a blank cell at terminal `(row, col)`, relative to `area`. Cells outside
/// the area are skipped.
fn paint(area: Rect, buf: &mut Buffer, row: i32, col: i32, style: Style) {
    let (Ok(x), Ok(y)) = (
        u16::try_from(col + i32::from(area.x)),
        u16::try_from(row + i32::from(area.y)),
    ) else {
        return;
    };
    if !area.contains(Position::new(x, y)) {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(' ').set_style(style);
    }
}

/// The part of a window, relative to `area`, that lies inside it.
fn clip(window: Geometry, area: Rect) -> Rect {
    let left = (i32::from(area.x) + window.col).max(i32::from(area.x));
    let top = (i32::from(area.y) + window.row).max(i32::from(area.y));
    let right = (i32::from(area.x) + window.col + window.width).min(i32::from(area.right()));
    let bottom = (i32::from(area.y) + window.row + window.height).min(i32::from(area.bottom()));
    if right <= left || bottom <= top {
        return Rect::new(area.x, area.y, 0, 0);
    }
    Rect::new(
        cells(left),
        cells(top),
        cells(right - left),
        cells(bottom - top),
    )
}

fn cells(v: i32) -> u16 {
    u16::try_from(v).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeZone};
    use segclock_core::{Options, TermSize};

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 9, hour, minute, second)
            .unwrap()
    }

    fn render(options: Options) -> Buffer {
        let state = ClockState::new(options, TermSize::new(80, 24), &at(12, 34, 56));
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        ClockView::new(&state).render(area, &mut buf);
        buf
    }

    #[test]
    fn test_digits_paint_lit_cells() {
        let buf = render(Options::default());
        // Hour tens "1": only the right column is lit.
        assert_eq!(buf[(1, 1)].bg, Color::Reset);
        assert_eq!(buf[(5, 1)].bg, Color::Green);
        assert_eq!(buf[(6, 1)].bg, Color::Green);
        // Hour units "2": second row lights only the right cell.
        assert_eq!(buf[(8, 1)].bg, Color::Green);
        assert_eq!(buf[(8, 2)].bg, Color::Reset);
        assert_eq!(buf[(12, 2)].bg, Color::Green);
        // Minute units "4" starts with a lit cell.
        assert_eq!(buf[(27, 1)].bg, Color::Green);
    }

    #[test]
    fn test_colon_cells() {
        let buf = render(Options::default());
        for (x, y) in [(16, 2), (17, 2), (16, 4), (17, 4)] {
            assert_eq!(buf[(x, y)].bg, Color::Green);
        }
        assert_eq!(buf[(16, 3)].bg, Color::Reset);
        assert_eq!(buf[(35, 2)].bg, Color::Reset);
    }

    #[test]
    fn test_seconds_drawn_when_enabled() {
        let buf = render(Options::default());
        assert_eq!(buf[(39, 1)].bg, Color::Reset);

        let buf = render(Options {
            show_seconds: true,
            ..Options::default()
        });
        // "5" and "6" both light their top-left cell.
        assert_eq!(buf[(39, 1)].bg, Color::Green);
        assert_eq!(buf[(46, 1)].bg, Color::Green);
        assert_eq!(buf[(35, 2)].bg, Color::Green);
    }

    #[test]
    fn test_blinking_colon_dims_on_even_seconds() {
        let buf = render(Options {
            blink_colon: true,
            ..Options::default()
        });
        assert_eq!(buf[(16, 2)].bg, Color::Reset);
        assert_eq!(buf[(16, 2)].fg, Color::Green);
    }

    #[test]
    fn test_date_line() {
        let buf = render(Options::default());
        // Date window starts at column 17 - 5 - 1 = 11, text one cell in.
        let text: String = (12..22).map(|x| buf[(x, 7)].symbol()).collect();
        assert_eq!(text, "2024-03-09");
        assert_eq!(buf[(12, 7)].fg, Color::Green);

        let buf = render(Options {
            show_date: false,
            ..Options::default()
        });
        assert_eq!(buf[(12, 7)].symbol(), " ");
    }

    #[test]
    fn test_accent_and_bold() {
        let buf = render(Options {
            color: segclock_core::AccentColor::from_index(6).unwrap(),
            bold: true,
            ..Options::default()
        });
        assert_eq!(buf[(5, 1)].bg, Color::Cyan);
        assert!(buf[(5, 1)].modifier.contains(Modifier::SLOW_BLINK));
        assert!(buf[(12, 7)].modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_box_borders() {
        let buf = render(Options {
            boxed: true,
            ..Options::default()
        });
        assert_eq!(buf[(0, 0)].symbol(), "┌");
        assert_eq!(buf[(34, 0)].symbol(), "┐");
        // The date window sits on the frame's bottom row with its own border.
        assert_eq!(buf[(11, 6)].symbol(), "┌");
        assert_eq!(buf[(0, 6)].symbol(), "└");
    }

    #[test]
    fn test_small_terminal_is_clipped() {
        let state = ClockState::new(
            Options {
                show_seconds: true,
                boxed: true,
                ..Options::default()
            },
            TermSize::new(20, 5),
            &at(23, 59, 59),
        );
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        ClockView::new(&state).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "┌");
    }

    #[test]
    fn test_clip() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(
            clip(Geometry::new(-1, -2, 10, 3), area),
            Rect::new(0, 0, 8, 2)
        );
        assert_eq!(
            clip(Geometry::new(22, 75, 10, 3), area),
            Rect::new(75, 22, 5, 2)
        );
        assert_eq!(clip(Geometry::new(30, 0, 10, 3), area).area(), 0);
    }
}
