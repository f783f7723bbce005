pub use self::{hud_display::*, playfield_display::*};

mod hud_display;
mod playfield_display;

mod color {
    use ratatui::style::Color;

    pub const SKY: Color = Color::Rgb(135, 206, 250);
    pub const GREEN: Color = Color::Rgb(0, 200, 0);
    pub const YELLOW: Color = Color::Rgb(255, 215, 0);
    pub const RED: Color = Color::Rgb(220, 30, 30);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const HINT: Style = fg_bg(color::GRAY, color::BLACK);
}
