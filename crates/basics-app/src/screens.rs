use std::rc::Rc;

use basics_core::*;
use basics_ui::{Column, Divider, Surface, ViewExt};

use crate::counter::{Counter, HoistedCounter};
use crate::greeting::Greeting;
use crate::name_list::NameList;
use crate::theme::{BaseTheme, Theme, is_system_in_dark_theme};

pub fn default_loop_names() -> Rc<[String]> {
    ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect()
}

pub fn default_list_names() -> Rc<[String]> {
    (0..1000).map(|i| format!("User {i}")).collect()
}

pub fn ScreenContent(theme: &Theme) -> View {
    Column(Modifier::new()).child((
        Greeting("Mr.", theme),
        Divider(Color::BLUE),
        Greeting("Richard Dewan", theme),
    ))
}

/// Greetings for `names`, then the two counter flavours. The hoisted count
/// lives here.
pub fn ScreenContentLoop(names: Rc<[String]>, theme: &Theme) -> View {
    restartable((names, *theme), |(names, theme)| {
        let count = remember(|| signal(0i32));

        let greetings: Vec<View> = names
            .iter()
            .flat_map(|name| key(name, || [Greeting(name, theme), Divider(Color::BLACK)]))
            .collect();

        let update_count = {
            let count = (*count).clone();
            move |n| count.set(n)
        };
        Column(Modifier::new().fill_max_height()).child((
            Column(Modifier::new().fill_max_width()).child(greetings),
            Divider(Color::RED),
            Counter(theme),
            Divider(Color::RED),
            HoistedCounter(count.get(), update_count),
        ))
    })
}

pub fn ScreenContentList(names: Rc<[String]>, theme: &Theme) -> View {
    NameList(names, Modifier::new().fill_max_size(), theme)
}

/// Theme plus the light-gray backdrop every screen sits on.
pub fn MyApp(dark: bool, content: impl FnOnce(&Theme) -> View) -> View {
    BaseTheme(dark, |theme| {
        Surface(
            Modifier::new()
                .fill_max_size()
                .background(Color::LIGHT_GRAY),
            content(theme),
        )
    })
}

/// Demo root: the 1000-name list in the host's theme.
pub fn App(s: &mut Scheduler) -> View {
    let names = remember(default_list_names);
    MyApp(is_system_in_dark_theme(s), |theme| {
        ScreenContentList((*names).clone(), theme)
    })
}
