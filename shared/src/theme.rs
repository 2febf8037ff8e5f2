// Catppuccin palettes
// Latte is the default for saved figures, Mocha matches a dark terminal

use serde::Deserialize;

pub type Rgb = (u8, u8, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavour {
    #[default]
    Latte,
    Mocha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Rgb,
    pub surface0: Rgb,
    pub surface1: Rgb,
    pub overlay0: Rgb,
    pub text: Rgb,
    /// Series colours, in the order they are handed out.
    pub accents: [Rgb; 8],
}

pub mod latte {
    use super::Rgb;

    pub const BASE: Rgb = (239, 241, 245); // #eff1f5
    pub const SURFACE0: Rgb = (204, 208, 218); // #ccd0da
    pub const SURFACE1: Rgb = (188, 192, 204); // #bcc0cc
    pub const OVERLAY0: Rgb = (156, 160, 176); // #9ca0b0
    pub const TEXT: Rgb = (76, 79, 105); // #4c4f69

    pub const BLUE: Rgb = (30, 102, 245); // #1e66f5
    pub const RED: Rgb = (210, 15, 57); // #d20f39
    pub const GREEN: Rgb = (64, 160, 43); // #40a02b
    pub const PEACH: Rgb = (254, 100, 11); // #fe640b
    pub const MAUVE: Rgb = (136, 57, 239); // #8839ef
    pub const TEAL: Rgb = (23, 146, 153); // #179299
    pub const PINK: Rgb = (234, 118, 203); // #ea76cb
    pub const YELLOW: Rgb = (223, 142, 29); // #df8e1d
}

pub mod mocha {
    use super::Rgb;

    pub const BASE: Rgb = (30, 30, 46); // #1e1e2e
    pub const SURFACE0: Rgb = (49, 50, 68); // #313244
    pub const SURFACE1: Rgb = (69, 71, 90); // #45475a
    pub const OVERLAY0: Rgb = (108, 112, 134); // #6c7086
    pub const TEXT: Rgb = (205, 214, 244); // #cdd6f4

    pub const BLUE: Rgb = (137, 180, 250); // #89b4fa
    pub const RED: Rgb = (243, 139, 168); // #f38ba8
    pub const GREEN: Rgb = (166, 227, 161); // #a6e3a1
    pub const PEACH: Rgb = (250, 179, 135); // #fab387
    pub const MAUVE: Rgb = (203, 166, 247); // #cba6f7
    pub const TEAL: Rgb = (148, 226, 213); // #94e2d5
    pub const PINK: Rgb = (245, 194, 231); // #f5c2e7
    pub const YELLOW: Rgb = (249, 226, 175); // #f9e2af
}

impl Flavour {
    pub fn palette(self) -> Palette {
        match self {
            Flavour::Latte => Palette {
                base: latte::BASE,
                surface0: latte::SURFACE0,
                surface1: latte::SURFACE1,
                overlay0: latte::OVERLAY0,
                text: latte::TEXT,
                accents: [
                    latte::BLUE,
                    latte::RED,
                    latte::GREEN,
                    latte::PEACH,
                    latte::MAUVE,
                    latte::TEAL,
                    latte::PINK,
                    latte::YELLOW,
                ],
            },
            Flavour::Mocha => Palette {
                base: mocha::BASE,
                surface0: mocha::SURFACE0,
                surface1: mocha::SURFACE1,
                overlay0: mocha::OVERLAY0,
                text: mocha::TEXT,
                accents: [
                    mocha::BLUE,
                    mocha::RED,
                    mocha::GREEN,
                    mocha::PEACH,
                    mocha::MAUVE,
                    mocha::TEAL,
                    mocha::PINK,
                    mocha::YELLOW,
                ],
            },
        }
    }
}

#[cfg(feature = "plotters")]
pub mod plotters_colors {
    use super::Rgb;
    use plotters::style::RGBColor;

    pub const fn rgb(c: Rgb) -> RGBColor {
        RGBColor(c.0, c.1, c.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flavours_have_distinct_backgrounds() {
        assert_ne!(Flavour::Latte.palette().base, Flavour::Mocha.palette().base);
        assert_eq!(Flavour::default(), Flavour::Latte);
    }
}
