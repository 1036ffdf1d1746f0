use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug)]
pub struct Theme {
    // Brand colors
    pub primary: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
}

/// Color specification in RGB.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::sight_lipa()
    }
}

impl Theme {
    /// The tourism office palette: maroon on light gray.
    ///
    pub fn sight_lipa() -> Self {
        Theme {
            primary: ColorSpec::new(0x85, 0x00, 0x00),
            banner: ColorSpec::new(0xb3, 0x1b, 0x1b),
            text: ColorSpec::new(0x33, 0x33, 0x33),
            text_muted: ColorSpec::new(0x88, 0x88, 0x88),
            success: ColorSpec::new(0x2e, 0x7d, 0x32),
            warning: ColorSpec::new(0xf5, 0x7c, 0x00),
            error: ColorSpec::new(0xc6, 0x28, 0x28),
            info: ColorSpec::new(0x15, 0x65, 0xc0),
            border_active: ColorSpec::new(0x85, 0x00, 0x00),
            border_normal: ColorSpec::new(0xbd, 0xbd, 0xbd),
            highlight_bg: ColorSpec::new(0x85, 0x00, 0x00),
            highlight_fg: ColorSpec::new(0xff, 0xff, 0xff),
        }
    }
}
