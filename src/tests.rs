use super::*;

mod dom_and_selectors;
mod reveal_and_images;
mod tracing;

const LANDING_PAGE: &str = include_str!("../tests/fixtures/landing_page.html");

/// Geometry of the fixture as a 1280px desktop browser lays it out.
fn lay_out_landing_page(page: &mut Page) -> Result<()> {
    page.set_layout("#header", LayoutBox::new(0.0, 0.0, 1280.0, 80.0))?;
    page.set_layout("#home", LayoutBox::block(0.0, 800.0))?;
    page.set_layout("#services", LayoutBox::block(800.0, 800.0))?;
    page.set_layout_all(".service-card", LayoutBox::new(900.0, 0.0, 400.0, 300.0))?;
    page.set_layout("#feature-network", LayoutBox::block(1250.0, 150.0))?;
    page.set_layout("#coach-card", LayoutBox::block(1400.0, 180.0))?;
    page.set_layout("#coach-photo", LayoutBox::new(1400.0, 0.0, 120.0, 120.0))?;
    page.set_layout(".stats", LayoutBox::block(1600.0, 300.0))?;
    page.set_layout_all(".stat-card", LayoutBox::block(1650.0, 200.0))?;
    page.set_layout("#testimonials", LayoutBox::block(1900.0, 700.0))?;
    page.set_layout("#commits", LayoutBox::block(2600.0, 800.0))?;
    page.set_layout(
        ".commits-slider__track",
        LayoutBox::new(2700.0, 0.0, 375.0, 400.0).with_scroll(3000.0, 375.0),
    )?;
    page.set_layout_all(".commit-card", LayoutBox::block(2700.0, 400.0))?;
    page.set_layout(
        ".commits-map__container",
        LayoutBox::new(3100.0, 100.0, 800.0, 250.0),
    )?;
    page.set_layout("#contact", LayoutBox::block(3400.0, 900.0))?;
    page.set_layout("#footer-logo", LayoutBox::new(4350.0, 0.0, 200.0, 50.0))?;
    Ok(())
}

fn landing_page() -> Result<Page> {
    landing_page_with(PageConfig::default())
}

fn landing_page_with(config: PageConfig) -> Result<Page> {
    let mut page = Page::parse_with_config(LANDING_PAGE, config)?;
    lay_out_landing_page(&mut page)?;
    page.ready()?;
    Ok(page)
}

fn narrow_config() -> PageConfig {
    PageConfig {
        viewport: Viewport::new(375.0, 740.0),
        ..PageConfig::default()
    }
}

fn pending_with_label(page: &Page, label: &str) -> Vec<PendingTimer> {
    page.pending_timers()
        .into_iter()
        .filter(|timer| timer.label == label)
        .collect()
}

fn traced(page: &mut Page) {
    page.set_trace_stderr(false);
    page.enable_trace(true);
}
