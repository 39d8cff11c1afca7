use prospect_site::Page;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const SLIDER_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/slider_property_fuzz_test.txt";
const DEFAULT_SLIDER_PROPTEST_CASES: u32 = 128;
const LANDING_PAGE: &str = include_str!("fixtures/landing_page.html");
const TRACK: &str = ".testimonials__track";
const DOTS: &str = ".testimonials__dots .dot";

#[derive(Clone, Debug)]
enum SliderAction {
    Next,
    Prev,
    Dot(usize),
    Swipe(f64, f64),
    Hover,
    Unhover,
    Advance(i64),
    ClearTimers,
}

fn slider_proptest_cases() -> u32 {
    std::env::var("PROSPECT_SITE_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SLIDER_PROPTEST_CASES)
}

fn slider_action_strategy() -> BoxedStrategy<SliderAction> {
    prop_oneof![
        3 => Just(SliderAction::Next),
        3 => Just(SliderAction::Prev),
        2 => (0usize..3).prop_map(SliderAction::Dot),
        3 => (0.0f64..400.0, 0.0f64..400.0).prop_map(|(start, end)| SliderAction::Swipe(start, end)),
        2 => Just(SliderAction::Hover),
        2 => Just(SliderAction::Unhover),
        3 => (0i64..12_000).prop_map(SliderAction::Advance),
        1 => Just(SliderAction::ClearTimers),
    ]
    .boxed()
}

fn run_action(page: &mut Page, action: &SliderAction) -> prospect_site::Result<()> {
    match action {
        SliderAction::Next => page.click(".testimonials__btn--next"),
        SliderAction::Prev => page.click(".testimonials__btn--prev"),
        SliderAction::Dot(index) => page.click_nth(DOTS, *index),
        SliderAction::Swipe(start, end) => page.swipe(TRACK, *start, *end),
        SliderAction::Hover => page.hover(TRACK),
        SliderAction::Unhover => page.unhover(TRACK),
        SliderAction::Advance(delta_ms) => page.advance_time(*delta_ms),
        SliderAction::ClearTimers => {
            page.clear_all_timers();
            Ok(())
        }
    }
}

fn fail(err: prospect_site::Error) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn assert_slider_invariants(actions: &[SliderAction]) -> TestCaseResult {
    let mut page = Page::from_html(LANDING_PAGE).map_err(fail)?;

    for (step, action) in actions.iter().enumerate() {
        run_action(&mut page, action).map_err(fail)?;

        let index = page.slide_index();
        prop_assert!(
            matches!(index, Some(0..=2)),
            "index out of range after step {step}: {action:?}, index={index:?}"
        );
        let index = index.unwrap_or_default();

        let flags = page.class_flags(DOTS, "active").map_err(fail)?;
        let expected = (0..3).map(|dot| dot == index).collect::<Vec<_>>();
        prop_assert_eq!(flags, expected, "dots out of sync after step {}", step);

        let autoplay_timers = page
            .pending_timers()
            .into_iter()
            .filter(|timer| timer.label == "slider-autoplay")
            .count();
        prop_assert!(autoplay_timers <= 1, "stacked autoplay after step {step}");
        prop_assert_eq!(
            autoplay_timers == 1,
            page.is_autoplay_running(),
            "autoplay flag disagrees with the queue after step {}",
            step
        );
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: slider_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(SLIDER_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn slider_state_stays_consistent(actions in vec(slider_action_strategy(), 1..=32)) {
        assert_slider_invariants(&actions)?;
    }
}
