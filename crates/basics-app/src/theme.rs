use basics_core::{Color, Scheduler, View};

pub const PURPLE_200: Color = Color::from_argb(0xffCE93D8);
pub const PURPLE_500: Color = Color::from_argb(0xff9C27B0);
pub const PURPLE_700: Color = Color::from_argb(0xff7B1FA2);
pub const TEAL_200: Color = Color::from_argb(0xff80CBC4);
pub const GRAY_200: Color = Color::from_argb(0xffEEEEEE);
pub const GRAY_900: Color = Color::from_argb(0xff212121);

/// Named color roles. Selected once per pass and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeColors {
    /// Accent for buttons and outlines.
    pub primary: Color,
    pub primary_variant: Color,
    /// Secondary accent.
    pub secondary: Color,
    pub secondary_variant: Color,
    /// Window background / app root.
    pub background: Color,
    /// Default container surface.
    pub surface: Color,
    pub error: Color,

    /// Foreground on top of `primary`.
    pub on_primary: Color,
    pub on_secondary: Color,
    pub on_background: Color,
    pub on_surface: Color,
    pub on_error: Color,

    pub is_light: bool,
}

pub const DARK_COLORS: ThemeColors = ThemeColors {
    primary: GRAY_200,
    primary_variant: GRAY_900,
    secondary: GRAY_900,
    secondary_variant: Color::from_argb(0xff03DAC6),
    background: Color::from_argb(0xff121212),
    surface: Color::from_argb(0xff121212),
    error: Color::from_argb(0xffCF6679),
    on_primary: Color::BLACK,
    on_secondary: Color::BLACK,
    on_background: Color::WHITE,
    on_surface: Color::WHITE,
    on_error: Color::BLACK,
    is_light: false,
};

pub const LIGHT_COLORS: ThemeColors = ThemeColors {
    primary: PURPLE_500,
    primary_variant: PURPLE_700,
    secondary: TEAL_200,
    secondary_variant: Color::from_argb(0xff018786),
    background: Color::WHITE,
    surface: Color::WHITE,
    error: Color::from_argb(0xffB00020),
    on_primary: Color::WHITE,
    on_secondary: Color::BLACK,
    on_background: Color::BLACK,
    on_surface: Color::BLACK,
    on_error: Color::WHITE,
    is_light: true,
};

/// Font sizes in dp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Typography {
    pub h3: f32,
    pub body1: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            h3: 48.0,
            body1: 16.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub colors: ThemeColors,
    pub typography: Typography,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Self {
            colors: theme_colors(dark),
            typography: Typography::default(),
        }
    }
}

pub fn theme_colors(dark: bool) -> ThemeColors {
    if dark { DARK_COLORS } else { LIGHT_COLORS }
}

/// Select the palette for `dark` and hand it to `content`.
pub fn BaseTheme(dark: bool, content: impl FnOnce(&Theme) -> View) -> View {
    let theme = Theme::new(dark);
    log::trace!("theme: {}", if dark { "dark" } else { "light" });
    content(&theme)
}

/// The host's ambient dark-mode flag. Supplied, never detected.
pub fn is_system_in_dark_theme(s: &Scheduler) -> bool {
    s.dark_theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_iff_dark() {
        for dark in [false, true] {
            assert_eq!(theme_colors(dark) == DARK_COLORS, dark);
            assert_eq!(theme_colors(dark) == LIGHT_COLORS, !dark);
            assert_eq!(theme_colors(dark).is_light, !dark);
        }
    }

    #[test]
    fn palettes_override_the_accent_roles() {
        assert_eq!(DARK_COLORS.primary, Color(0xEE, 0xEE, 0xEE, 0xFF));
        assert_eq!(DARK_COLORS.secondary, Color(0x21, 0x21, 0x21, 0xFF));
        assert_eq!(LIGHT_COLORS.primary, Color(0x9C, 0x27, 0xB0, 0xFF));
        assert_eq!(LIGHT_COLORS.primary_variant, PURPLE_700);
        assert_eq!(LIGHT_COLORS.secondary, TEAL_200);
        assert_ne!(PURPLE_200, PURPLE_500);
    }

    #[test]
    fn base_theme_threads_the_selection() {
        let v = BaseTheme(true, |t| {
            assert_eq!(t.colors, DARK_COLORS);
            assert_eq!(t.typography.h3, 48.0);
            View::default()
        });
        assert_eq!(v, View::default());
    }
}
