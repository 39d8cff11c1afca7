use super::*;

#[test]
fn fixture_parses_without_wiring_anything() -> Result<()> {
    let page = Page::parse(LANDING_PAGE)?;
    assert!(!page.is_ready());
    page.assert_exists("#contact-form")?;
    assert_eq!(page.count(".testimonial-card")?, 3);
    assert_eq!(page.count(".commits-slider__track > .commit-card")?, 9);
    assert_eq!(page.count(r##"a[href^="#"]"##)?, 9);
    assert_eq!(page.count(".testimonials__dots .dot")?, 0);
    page.assert_text("#stat-athletes", "0")?;
    page.assert_attr("#coach-photo", "data-src", Some("img/coach-marcus.jpg"))?;
    page.assert_attr("#coach-photo", "src", None)?;
    page.assert_value("#gradYear", "")?;
    page.assert_value("#message", "")?;
    Ok(())
}

#[test]
fn style_and_script_bodies_stay_inert() -> Result<()> {
    let page = Page::parse(LANDING_PAGE)?;
    assert!(page.text("style")?.contains(".header.scrolled"));
    page.assert_text("script", "")?;
    Ok(())
}

#[test]
fn missing_and_unsupported_selectors_are_errors() -> Result<()> {
    let page = Page::from_html(LANDING_PAGE)?;
    match page.text("#does-not-exist") {
        Err(Error::SelectorNotFound(selector)) => assert_eq!(selector, "#does-not-exist"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        page.count("div >"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        page.count("a[href"),
        Err(Error::UnsupportedSelector(_))
    ));
    Ok(())
}

#[test]
fn failed_assertions_carry_a_dom_snippet() -> Result<()> {
    let page = Page::from_html(LANDING_PAGE)?;
    let err = page
        .assert_text("#stat-athletes", "250")
        .expect_err("counters never start without layout");
    match err {
        Error::AssertionFailed {
            selector,
            expected,
            actual,
            dom_snippet,
        } => {
            assert_eq!(selector, "#stat-athletes");
            assert_eq!(expected, "250");
            assert_eq!(actual, "0");
            assert!(dom_snippet.contains(r#"data-count="250""#));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn ready_generates_the_slider_dots() -> Result<()> {
    let page = Page::from_html(LANDING_PAGE)?;
    assert_eq!(
        page.dump_dom(".testimonials__dots")?,
        r#"<div class="testimonials__dots"><span class="dot active"></span><span class="dot"></span><span class="dot"></span></div>"#
    );
    Ok(())
}

#[test]
fn ready_runs_once() -> Result<()> {
    let mut page = Page::parse(LANDING_PAGE)?;
    page.ready()?;
    assert!(matches!(page.ready(), Err(Error::Runtime(_))));
    assert_eq!(page.count(".testimonials__dots .dot")?, 3);
    Ok(())
}

#[test]
fn load_marks_the_body_once() -> Result<()> {
    let mut page = Page::parse(LANDING_PAGE)?;
    page.assert_class("body", "loaded", false)?;
    page.load()?;
    assert!(page.is_ready());
    page.assert_class("body", "loaded", true)?;
    assert!(matches!(page.load(), Err(Error::Runtime(_))));
    Ok(())
}

#[test]
fn invalid_config_is_rejected_at_parse() {
    let config = PageConfig {
        autoplay_interval_ms: 0,
        ..PageConfig::default()
    };
    assert!(matches!(
        Page::parse_with_config(LANDING_PAGE, config),
        Err(Error::InvalidConfig(_))
    ));

    let config = PageConfig {
        email_pattern: "([a-z]+".into(),
        ..PageConfig::default()
    };
    assert!(matches!(
        Page::parse_with_config(LANDING_PAGE, config),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn bare_markup_wires_nothing() -> Result<()> {
    let mut page = Page::from_html("<p id='note'>Coming soon</p>")?;
    assert_eq!(page.slide_index(), None);
    assert!(page.pending_timers().is_empty());
    page.press_key("Escape")?;
    page.scroll_window_to(400.0)?;
    page.resize(320.0, 640.0)?;
    page.load()?;
    page.assert_text("#note", "Coming soon")?;
    assert!(page.take_alert_messages().is_empty());
    Ok(())
}

#[test]
fn form_actions_check_element_types() -> Result<()> {
    let mut page = Page::from_html(LANDING_PAGE)?;
    match page.type_text("#gradYear", "2027") {
        Err(Error::TypeMismatch {
            expected, actual, ..
        }) => {
            assert_eq!(expected, "input or textarea");
            assert_eq!(actual, "select");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        page.set_select_value("#email", "x"),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        page.set_select_value("#gradYear", "1999"),
        Err(Error::Runtime(_))
    ));
    page.set_select_value("#gradYear", "2028")?;
    page.assert_value("#gradYear", "2028")?;
    Ok(())
}
