use druid::Color;

use crate::config::Theme;

/// Fixed color set selected by the externally supplied theme flag.
pub struct Palette {
    pub background: Color,
    pub grid: Color,
    pub axis: Color,
    pub tick_label: Color,
    pub line: Color,
    pub residual: Color,
    pub point: Color,
    pub point_hover: Color,
    pub trace: Color,
    pub legend_text: Color,
    pub tooltip_background: Color,
    pub tooltip_border: Color,
    pub tooltip_text: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                background: Color::rgb8(250, 250, 248),
                grid: Color::rgb8(220, 222, 228),
                axis: Color::rgb8(90, 94, 104),
                tick_label: Color::rgb8(90, 94, 104),
                line: Color::rgb8(199, 62, 29),
                residual: Color::rgb8(150, 130, 220),
                point: Color::rgb8(20, 92, 158),
                point_hover: Color::rgb8(230, 159, 0),
                trace: Color::rgb8(0, 138, 94),
                legend_text: Color::rgb8(40, 42, 48),
                tooltip_background: Color::rgb8(255, 255, 240),
                tooltip_border: Color::rgb8(150, 150, 140),
                tooltip_text: Color::rgb8(40, 42, 48),
            },
            Theme::Dark => Palette {
                background: Color::rgb8(24, 26, 32),
                grid: Color::rgb8(52, 56, 66),
                axis: Color::rgb8(160, 166, 178),
                tick_label: Color::rgb8(160, 166, 178),
                line: Color::rgb8(255, 123, 84),
                residual: Color::rgb8(130, 110, 200),
                point: Color::rgb8(102, 178, 255),
                point_hover: Color::rgb8(255, 200, 60),
                trace: Color::rgb8(60, 200, 150),
                legend_text: Color::rgb8(222, 226, 235),
                tooltip_background: Color::rgb8(40, 44, 54),
                tooltip_border: Color::rgb8(90, 96, 110),
                tooltip_text: Color::rgb8(222, 226, 235),
            },
        }
    }
}
