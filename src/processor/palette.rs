//! Game colour names → foreground/background pairs.
//!
//! Plain names draw on black, `i_` names are inverted (black on the colour),
//! and a few `fg_bg` combinations are spelled out.

use crate::model::Rgb;

pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const WHITE: Rgb = Rgb::new(150, 150, 150);
pub const RED: Rgb = Rgb::new(255, 0, 0);
pub const GREEN: Rgb = Rgb::new(0, 110, 0);
pub const BROWN: Rgb = Rgb::new(92, 51, 23);
pub const BLUE: Rgb = Rgb::new(0, 0, 200);
pub const MAGENTA: Rgb = Rgb::new(139, 58, 98);
pub const CYAN: Rgb = Rgb::new(0, 150, 180);
pub const GRAY: Rgb = Rgb::new(150, 150, 150);
pub const DARK_GRAY: Rgb = Rgb::new(99, 99, 99);
pub const LIGHT_RED: Rgb = Rgb::new(255, 150, 150);
pub const LIGHT_GREEN: Rgb = Rgb::new(0, 255, 0);
pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
pub const LIGHT_BLUE: Rgb = Rgb::new(100, 100, 255);
pub const PINK: Rgb = Rgb::new(254, 0, 254);
pub const LIGHT_CYAN: Rgb = Rgb::new(0, 240, 255);

/// Used for uncoloured or unknown terrain.
pub const NEUTRAL: (Rgb, Rgb) = (WHITE, BLACK);

fn base(name: &str) -> Option<Rgb> {
    let c = match name {
        "black" => BLACK,
        "white" => WHITE,
        "red" => RED,
        "green" => GREEN,
        "brown" => BROWN,
        "blue" => BLUE,
        "magenta" => MAGENTA,
        "cyan" => CYAN,
        "light_gray" => GRAY,
        "dark_gray" => DARK_GRAY,
        "light_red" => LIGHT_RED,
        "light_green" => LIGHT_GREEN,
        "yellow" => YELLOW,
        "light_blue" => LIGHT_BLUE,
        "pink" => PINK,
        "light_cyan" => LIGHT_CYAN,
        _ => return None,
    };
    Some(c)
}

pub fn resolve(name: &str) -> (Rgb, Rgb) {
    // highlighted names draw like their plain counterpart
    let name = name.strip_prefix("h_").unwrap_or(name);
    let name = name.strip_prefix("c_").unwrap_or(name);

    if let Some(fg) = base(name) {
        return (fg, BLACK);
    }
    if let Some(bg) = name.strip_prefix("i_").and_then(base) {
        return (BLACK, bg);
    }

    match name {
        "black_yellow" => (BLACK, YELLOW),
        "yellow_green" => (YELLOW, GREEN),
        "dark_gray_magenta" => (DARK_GRAY, MAGENTA),
        "light_green_yellow" => (LIGHT_GREEN, YELLOW),
        "pink_magenta" => (PINK, MAGENTA),
        "white_magenta" => (WHITE, MAGENTA),
        "white_white" => (WHITE, WHITE),
        "yellow_cyan" => (YELLOW, CYAN),
        "yellow_magenta" => (YELLOW, MAGENTA),
        _ => NEUTRAL,
    }
}
