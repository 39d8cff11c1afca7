use super::*;

#[test]
fn trace_is_off_by_default() -> Result<()> {
    let mut page = landing_page()?;
    page.click(".testimonials__btn--next")?;
    page.advance_time(5_000)?;
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn trace_records_events_timers_and_behaviors() -> Result<()> {
    let mut page = landing_page()?;
    traced(&mut page);
    page.click(".testimonials__btn--next")?;
    page.advance_time(5_000)?;
    let logs = page.take_trace_logs();

    assert!(logs.contains(
        &"[event] click target=button current=button handler=slider-next default_prevented=false"
            .to_string()
    ));
    assert!(logs.contains(&"[event] done click target=button default_prevented=false".to_string()));
    assert!(logs.contains(&"[behavior] slider index=1 total=3".to_string()));
    assert!(logs.contains(&"[timer] run id=1 label=slider-autoplay due_at=5000 now_ms=5000".to_string()));
    assert!(logs.contains(&"[timer] requeue id=1 due_at=10000 interval_ms=5000".to_string()));
    assert!(logs.contains(&"[behavior] slider index=2 total=3".to_string()));
    Ok(())
}

#[test]
fn window_events_are_labelled_window() -> Result<()> {
    let mut page = landing_page()?;
    traced(&mut page);
    page.set_trace_timers(false);
    page.set_trace_behaviors(false);
    page.scroll_window_to(120.0)?;
    let logs = page.take_trace_logs();
    assert!(
        logs.iter()
            .any(|line| line.starts_with("[event] scroll target=window current=window handler=header-scroll"))
    );
    assert_eq!(
        logs.last().map(String::as_str),
        Some("[event] done scroll target=window default_prevented=false")
    );
    Ok(())
}

#[test]
fn category_switches_filter_lines() -> Result<()> {
    let mut page = landing_page()?;
    traced(&mut page);
    page.set_trace_events(false);
    page.set_trace_timers(false);
    page.click(".testimonials__btn--next")?;
    page.advance_time(5_000)?;
    let logs = page.take_trace_logs();
    assert!(!logs.is_empty());
    assert!(logs.iter().all(|line| line.starts_with("[behavior]")));
    Ok(())
}

#[test]
fn log_limit_keeps_the_latest_lines() -> Result<()> {
    let mut page = landing_page()?;
    traced(&mut page);
    page.set_trace_events(false);
    page.set_trace_timers(false);
    page.set_trace_log_limit(2)?;
    for _ in 0..3 {
        page.click(".testimonials__btn--next")?;
    }
    assert_eq!(
        page.take_trace_logs(),
        vec![
            "[behavior] slider index=2 total=3".to_string(),
            "[behavior] slider index=0 total=3".to_string(),
        ]
    );
    assert!(matches!(page.set_trace_log_limit(0), Err(Error::Runtime(_))));
    Ok(())
}

#[test]
fn time_control_rejects_going_backwards() -> Result<()> {
    let mut page = landing_page()?;
    assert!(matches!(page.advance_time(-1), Err(Error::Runtime(_))));
    page.advance_time(100)?;
    assert!(matches!(page.advance_time_to(50), Err(Error::Runtime(_))));
    page.advance_time_to(100)?;
    assert_eq!(page.now_ms(), 100);
    assert!(matches!(page.set_timer_step_limit(0), Err(Error::Runtime(_))));
    Ok(())
}
