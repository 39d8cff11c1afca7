use super::*;

const REVEALED: &str = "animate-fade-in-up";
const SERVICE_CARDS: [&str; 3] = ["#service-film", "#service-profile", "#service-outreach"];

#[test]
fn observed_elements_start_hidden() -> Result<()> {
    let page = landing_page()?;
    for selector in ["#service-film", "#feature-network", "#coach-card", "#stat-card-rate"] {
        page.assert_style(selector, "opacity", "0")?;
        page.assert_class(selector, REVEALED, false)?;
    }
    page.assert_style(".commit-card", "opacity", "0")?;
    page.assert_style(".testimonial-card", "opacity", "")?;
    Ok(())
}

#[test]
fn cards_reveal_once_past_the_threshold() -> Result<()> {
    let mut page = landing_page()?;
    // Cards span 900..1200; the root ends 50px above the viewport bottom.
    page.scroll_window_to(179.0)?;
    for selector in SERVICE_CARDS {
        page.assert_class(selector, REVEALED, false)?;
    }

    page.scroll_window_to(180.0)?;
    for selector in SERVICE_CARDS {
        page.assert_class(selector, REVEALED, true)?;
    }
    page.assert_class("#feature-network", REVEALED, false)?;

    page.scroll_window_to(0.0)?;
    for selector in SERVICE_CARDS {
        page.assert_class(selector, REVEALED, true)?;
    }
    Ok(())
}

#[test]
fn growing_the_window_reveals_without_starting_counters() -> Result<()> {
    let mut page = landing_page()?;
    page.resize(1280.0, 2000.0)?;
    for selector in ["#service-film", "#feature-network", "#coach-card", "#stat-card-athletes"] {
        page.assert_class(selector, REVEALED, true)?;
    }
    page.assert_class(".commit-card", REVEALED, false)?;
    page.assert_attr("#coach-photo", "src", Some("img/coach-marcus.jpg"))?;
    // Counters only react to scrolling.
    page.assert_text("#stat-athletes", "0")?;
    Ok(())
}

#[test]
fn strip_cards_reveal_only_inside_the_visible_window() -> Result<()> {
    let mut page = Page::parse(
        r#"<div class="commits-slider__track" id="strip">
             <div class="commit-card" id="card-a">A</div>
             <div class="commit-card" id="card-b">B</div>
             <div class="commit-card" id="card-c">C</div>
           </div>"#,
    )?;
    page.set_layout(
        "#strip",
        LayoutBox::new(0.0, 0.0, 375.0, 400.0).with_scroll(900.0, 375.0),
    )?;
    page.set_layout("#card-a", LayoutBox::new(0.0, 0.0, 300.0, 400.0))?;
    page.set_layout("#card-b", LayoutBox::new(0.0, 300.0, 300.0, 400.0))?;
    page.set_layout("#card-c", LayoutBox::new(0.0, 600.0, 300.0, 400.0))?;
    page.ready()?;

    // 75px of the second card shows; the third is entirely off to the right.
    page.assert_class("#card-a", REVEALED, true)?;
    page.assert_class("#card-b", REVEALED, true)?;
    page.assert_class("#card-c", REVEALED, false)?;

    page.scroll_element_to("#strip", 300.0)?;
    page.assert_class("#card-c", REVEALED, true)?;
    Ok(())
}

#[test]
fn unrendered_targets_never_reveal() -> Result<()> {
    let mut page = Page::from_html(r#"<div class="feature" id="floating">Hidden</div>"#)?;
    page.resize(1280.0, 10_000.0)?;
    page.scroll_window_to(500.0)?;
    page.assert_class("#floating", REVEALED, false)?;
    page.assert_style("#floating", "opacity", "0")?;
    Ok(())
}

#[test]
fn lazy_images_swap_source_once_visible() -> Result<()> {
    let mut page = landing_page()?;
    page.assert_attr("#coach-photo", "src", None)?;

    page.scroll_window_to(599.0)?;
    page.assert_attr("#coach-photo", "src", None)?;

    // The photo's top edge touching the viewport bottom is enough.
    page.scroll_window_to(600.0)?;
    page.assert_attr("#coach-photo", "src", Some("img/coach-marcus.jpg"))?;
    page.assert_attr("#coach-photo", "data-src", None)?;
    page.assert_attr("#footer-logo", "data-src", Some("img/logo-footer.png"))?;
    page.assert_attr("#footer-logo", "src", None)?;
    Ok(())
}

#[test]
fn lazy_images_load_once() -> Result<()> {
    let mut page = landing_page()?;
    traced(&mut page);
    page.scroll_window_to(4000.0)?;
    page.scroll_window_to(4100.0)?;
    let loads = page
        .take_trace_logs()
        .into_iter()
        .filter(|line| line.starts_with("[behavior] lazy image"))
        .collect::<Vec<_>>();
    assert_eq!(loads, vec!["[behavior] lazy image src=img/logo-footer.png".to_string()]);
    Ok(())
}

#[test]
fn empty_data_src_is_dropped_without_a_swap() -> Result<()> {
    let mut page = Page::parse(r#"<img id="blank" data-src="">"#)?;
    page.set_layout("#blank", LayoutBox::block(10.0, 10.0))?;
    page.ready()?;
    page.assert_attr("#blank", "src", None)?;
    page.assert_attr("#blank", "data-src", Some(""))?;
    Ok(())
}
