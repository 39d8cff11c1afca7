use prospect_site::behaviors::form::EmailPattern;
use prospect_site::{Page, PageConfig};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const FORM_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/form_property_fuzz_test.txt";
const DEFAULT_FORM_PROPTEST_CASES: u32 = 128;
const LANDING_PAGE: &str = include_str!("fixtures/landing_page.html");
const TEXT_FIELDS: [&str; 5] = ["playerName", "parentName", "email", "phone", "state"];

#[derive(Clone, Debug)]
struct Entry {
    text: Vec<String>,
    grad_year: &'static str,
    position: &'static str,
}

fn form_proptest_cases() -> u32 {
    std::env::var("PROSPECT_SITE_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_FORM_PROPTEST_CASES)
}

fn field_text_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just('a'),
            Just('z'),
            Just('Q'),
            Just('7'),
            Just('@'),
            Just('.'),
            Just(' '),
            Just('\t'),
            Just('-'),
        ],
        0..=12,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

fn entry_strategy() -> BoxedStrategy<Entry> {
    (
        vec(field_text_strategy(), TEXT_FIELDS.len()),
        prop_oneof![Just(""), Just("2026"), Just("2027"), Just("2028")],
        prop_oneof![Just(""), Just("PG"), Just("SG"), Just("C")],
    )
        .prop_map(|(text, grad_year, position)| Entry {
            text,
            grad_year,
            position,
        })
        .boxed()
}

fn fail(err: prospect_site::Error) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn expected_to_pass(entry: &Entry, email: &EmailPattern) -> bool {
    let filled = entry.text.iter().all(|value| !value.trim().is_empty())
        && !entry.grad_year.is_empty()
        && !entry.position.is_empty();
    filled && email.matches(&entry.text[2])
}

fn assert_submission_gate(entry: &Entry) -> TestCaseResult {
    let config = PageConfig::default();
    let email = EmailPattern::new(&config.email_pattern).map_err(fail)?;
    let mut page = Page::from_html(LANDING_PAGE).map_err(fail)?;

    for (name, value) in TEXT_FIELDS.iter().zip(&entry.text) {
        page.type_text(&format!("#{name}"), value).map_err(fail)?;
    }
    page.set_select_value("#gradYear", entry.grad_year).map_err(fail)?;
    page.set_select_value("#position", entry.position).map_err(fail)?;
    page.click("#submit-btn").map_err(fail)?;

    let alerts = page.take_alert_messages();
    let submissions = page.take_submissions();
    prop_assert_eq!(
        alerts.len() + submissions.len(),
        1,
        "exactly one outcome expected: alerts={:?}",
        alerts
    );
    prop_assert_eq!(submissions.len() == 1, expected_to_pass(entry, &email));

    if let Some(submission) = submissions.first() {
        for (name, value) in TEXT_FIELDS.iter().zip(&entry.text) {
            prop_assert_eq!(submission.data.get(name), Some(value.as_str()));
        }
        prop_assert!(page.is_disabled("#submit-btn").map_err(fail)?);
    } else {
        prop_assert!(!page.is_disabled("#submit-btn").map_err(fail)?);
        prop_assert!(page.pending_timers().iter().all(|timer| timer.label != "form-reset"));
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: form_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(FORM_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn submission_gate_matches_the_validation_rules(entry in entry_strategy()) {
        assert_submission_gate(&entry)?;
    }
}
