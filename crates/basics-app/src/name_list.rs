use std::rc::Rc;

use basics_core::*;
use basics_ui::{Column, Divider, LazyColumn, LazyColumnState, ViewExt};

use crate::greeting::Greeting;
use crate::theme::Theme;

/// Greeting (h3 + 18dp padding on both sides) plus a 1dp divider.
pub const ROW_HEIGHT_DP: f32 = 91.0;

/// One row per name, virtualized. Rows that scroll out of the window are
/// torn down along with their selection.
pub fn NameList(names: Rc<[String]>, modifier: Modifier, theme: &Theme) -> View {
    restartable((names, modifier, *theme), |(names, modifier, theme)| {
        let state = remember(LazyColumnState::new);
        LazyColumn(
            names,
            ROW_HEIGHT_DP,
            state,
            modifier.clone(),
            |name, index| {
                disposable_effect(index, move || {
                    log::trace!("name list: row {index} composed");
                    on_unmount(move || log::trace!("name list: row {index} discarded"))
                });
                Column(Modifier::new()).child((Greeting(name, theme), Divider(Color::RED)))
            },
        )
    })
}
