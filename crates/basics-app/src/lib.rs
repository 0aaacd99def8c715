#![allow(non_snake_case)]
//! The tutorial screens: a two-palette theme, an internal-state counter, a
//! hoisted counter, a selectable greeting and a 1000-row lazy name list.

pub mod counter;
pub mod greeting;
pub mod name_list;
pub mod screens;
pub mod theme;

pub use counter::{COUNTER_LABEL_PREFIX, Counter, HoistedCounter, counter_label};
pub use greeting::{Greeting, greeting_text};
pub use name_list::{NameList, ROW_HEIGHT_DP};
pub use screens::{
    App, MyApp, ScreenContent, ScreenContentList, ScreenContentLoop, default_list_names,
    default_loop_names,
};
pub use theme::{
    BaseTheme, DARK_COLORS, LIGHT_COLORS, Theme, ThemeColors, Typography,
    is_system_in_dark_theme, theme_colors,
};
