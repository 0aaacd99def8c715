use basics_app::{App, greeting_text};
use basics_core::Vec2;
use basics_platform::{HostConfig, run_headless_app};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    run_headless_app(HostConfig::default(), App, |host| {
        host.click_label(&greeting_text("User 0"))?;
        let frames = host.settle()?;
        log::info!("selection animation settled after {frames} frames");

        let leftover = host.scroll(Vec2::new(0.0, 5000.0))?;
        host.frame()?;
        log::info!(
            "scrolled down ({} dp unconsumed), {} nodes",
            leftover.y,
            host.metrics().nodes
        );

        host.scroll(Vec2::new(0.0, -5000.0))?;
        let frame = host.frame()?;
        let selected = frame
            .root
            .find_text(&greeting_text("User 0"))
            .and_then(|v| v.modifier.background)
            .is_some_and(|c| c != basics_core::Color::TRANSPARENT);
        log::info!("back at the top; User 0 still selected: {selected}");
        Ok(())
    })
}
