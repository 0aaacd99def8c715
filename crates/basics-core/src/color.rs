#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);
    pub const RED: Color = Color(255, 0, 0, 255);
    pub const BLUE: Color = Color(0, 0, 255, 255);
    pub const LIGHT_GRAY: Color = Color(0xCC, 0xCC, 0xCC, 255);

    /// Packed `0xAARRGGBB`, the form most palette tables are written in.
    pub const fn from_argb(argb: u32) -> Self {
        Color(
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
            (argb >> 24) as u8,
        )
    }

    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let channel = |i: usize, default: u8| {
            s.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(default)
        };
        match s.len() {
            6 => Color(channel(0, 0), channel(2, 0), channel(4, 0), 255),
            8 => Color(channel(0, 0), channel(2, 0), channel(4, 0), channel(6, 255)),
            _ => Color::BLACK,
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Color(self.0, self.1, self.2, a)
    }
}
