//! Integration tests for the action helpers against the simulated driver.

use std::time::Duration;

use storecheck::driver::DriverError;
use storecheck::driver::sim::{ElementState, SimPage};
use storecheck::{Actions, HarnessError, Selector, Settings};

fn default_settings() -> Settings {
	Settings::from_lookup(|_| None)
}

#[tokio::test(start_paused = true)]
async fn wait_for_element_returns_once_visible() {
	let page = SimPage::new();
	page.insert("#banner", ElementState {
		visible_after_checks: 3,
		..Default::default()
	});
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let banner = actions.target(&Selector::css("#banner"));

	let start = tokio::time::Instant::now();
	actions
		.wait_for_element(&banner, Duration::from_secs(10))
		.await
		.unwrap();

	// Three polls came back not-visible before the fourth succeeded.
	assert_eq!(start.elapsed(), Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn wait_for_element_fails_at_the_deadline() {
	let page = SimPage::new();
	page.insert("#ghost", ElementState::hidden());
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let ghost = actions.target(&Selector::labeled("#ghost", "ghost banner"));

	let start = tokio::time::Instant::now();
	let err = actions
		.wait_for_element(&ghost, Duration::from_millis(550))
		.await
		.unwrap_err();

	assert!(start.elapsed() >= Duration::from_millis(550));
	match err {
		HarnessError::Timeout { ms, condition } => {
			assert_eq!(ms, 550);
			assert!(condition.contains("ghost banner"));
		}
		other => panic!("expected timeout, got: {other}"),
	}
}

#[tokio::test(start_paused = true)]
async fn wait_for_element_gone_tracks_disappearance() {
	let page = SimPage::new();
	page.insert("#spinner", ElementState {
		gone_after_checks: 2,
		..Default::default()
	});
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let spinner = actions.target(&Selector::css("#spinner"));

	actions
		.wait_for_element_gone(&spinner, Duration::from_secs(5))
		.await
		.unwrap();
	assert!(!page.was_scrolled_to("#spinner"));
}

#[tokio::test(start_paused = true)]
async fn click_with_retry_succeeds_on_the_kth_attempt() {
	let page = SimPage::new();
	page.insert("#add-to-cart", ElementState {
		click_failures: 2,
		..Default::default()
	});
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let button = actions.target(&Selector::css("#add-to-cart"));

	let start = tokio::time::Instant::now();
	actions.click_with_retry(&button, 3).await.unwrap();

	assert_eq!(page.click_attempts("#add-to-cart"), 3);
	assert_eq!(page.clicks("#add-to-cart"), 1);
	// Two failed attempts, each followed by the fixed backoff.
	assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn click_with_retry_exhausts_and_reraises_the_final_error() {
	let page = SimPage::new();
	page.insert("#flaky", ElementState {
		click_failures: 10,
		..Default::default()
	});
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let button = actions.target(&Selector::css("#flaky"));

	let err = actions.click_with_retry(&button, 3).await.unwrap_err();

	assert_eq!(page.click_attempts("#flaky"), 3);
	assert_eq!(page.clicks("#flaky"), 0);
	match err {
		HarnessError::Driver(DriverError::NotVisible { selector }) => {
			assert_eq!(selector, "#flaky");
		}
		other => panic!("expected the driver's click failure, got: {other}"),
	}
}

#[tokio::test(start_paused = true)]
async fn click_with_retry_waits_before_each_attempt() {
	let page = SimPage::new();
	page.insert("#lazy", ElementState {
		visible_after_checks: 2,
		..Default::default()
	});
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let button = actions.target(&Selector::css("#lazy"));

	actions.click_with_retry(&button, 3).await.unwrap();
	assert_eq!(page.click_attempts("#lazy"), 1);
}

#[tokio::test]
async fn type_text_clear_replaces_the_existing_value() {
	let page = SimPage::new();
	page.insert("#email", ElementState {
		value: "stale@shop.example".into(),
		..Default::default()
	});
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let field = actions.target(&Selector::css("#email"));

	actions
		.type_text_clear(&field, "fresh@shop.example")
		.await
		.unwrap();
	assert_eq!(page.value("#email").unwrap(), "fresh@shop.example");
}

#[tokio::test(start_paused = true)]
async fn type_text_clear_propagates_missing_element() {
	let page = SimPage::new();
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let field = actions.target(&Selector::css("#nowhere"));

	let err = actions.type_text_clear(&field, "text").await.unwrap_err();
	assert!(err.is_timeout());
}

#[tokio::test]
async fn dropdown_selection_by_text_and_value() {
	let page = SimPage::new();
	page.insert(
		"#country",
		ElementState::dropdown(&[("us", "United States"), ("fr", "France"), ("de", "Germany")]),
	);
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let dropdown = actions.target(&Selector::css("#country"));

	actions
		.select_dropdown_by_text(&dropdown, "France")
		.await
		.unwrap();
	assert_eq!(page.value("#country").unwrap(), "fr");

	actions
		.select_dropdown_by_value(&dropdown, "de")
		.await
		.unwrap();
	assert_eq!(page.value("#country").unwrap(), "de");

	// The open-control click happened once per selection.
	assert_eq!(page.clicks("#country"), 2);
}

#[tokio::test]
async fn dropdown_selection_fails_on_missing_option() {
	let page = SimPage::new();
	page.insert("#country", ElementState::dropdown(&[("us", "United States")]));
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let dropdown = actions.target(&Selector::css("#country"));

	let err = actions
		.select_dropdown_by_text(&dropdown, "Atlantis")
		.await
		.unwrap_err();
	match err {
		HarnessError::Driver(DriverError::NotFound { selector }) => {
			assert!(selector.contains("Atlantis"));
		}
		other => panic!("expected not-found, got: {other}"),
	}
}

#[tokio::test]
async fn pointer_helpers_wait_then_act() {
	let page = SimPage::new();
	page.insert("#menu", ElementState::default());
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let menu = actions.target(&Selector::css("#menu"));

	actions.hover_element(&menu).await.unwrap();
	actions.double_click_element(&menu).await.unwrap();
	actions.right_click_element(&menu).await.unwrap();

	assert_eq!(page.hovers("#menu"), 1);
	assert_eq!(page.double_clicks("#menu"), 1);
	assert_eq!(page.right_clicks("#menu"), 1);
}

#[tokio::test]
async fn scroll_to_element_has_no_visibility_precondition() {
	let page = SimPage::new();
	page.insert("#footer", ElementState::hidden());
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let footer = actions.target(&Selector::css("#footer"));

	actions.scroll_to_element(&footer).await.unwrap();
	assert!(page.was_scrolled_to("#footer"));
}

#[tokio::test]
async fn take_screenshot_derives_a_safe_timestamped_name() {
	let dir = tempfile::tempdir().unwrap();
	let page = SimPage::new().with_screenshot_dir(dir.path());
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);

	actions.take_screenshot("login_fail").await.unwrap();

	let shots = page.screenshots();
	assert_eq!(shots.len(), 1);
	let suffix = shots[0].strip_prefix("login_fail_").unwrap();
	assert!(suffix.chars().all(|c| c.is_ascii_digit() || c == '-'));
}

#[tokio::test]
async fn navigation_and_reload() {
	let page = SimPage::new();
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);

	actions.open_base_url().await.unwrap();
	assert_eq!(
		actions.get_current_url().await.unwrap(),
		"http://automationpractice.com/index.php"
	);

	actions.navigate_to("https://shop.example/cart").await.unwrap();
	assert_eq!(page.url(), "https://shop.example/cart");

	actions.refresh_page().await.unwrap();
	assert_eq!(page.reloads(), 1);
}

#[tokio::test]
async fn click_navigation_is_observable_through_current_url() {
	let page = SimPage::new();
	page.insert("#checkout", ElementState {
		on_click_url: Some("https://shop.example/order".into()),
		..Default::default()
	});
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let checkout = actions.target(&Selector::css("#checkout"));

	actions.click_with_retry(&checkout, 3).await.unwrap();
	assert_eq!(
		actions.get_current_url().await.unwrap(),
		"https://shop.example/order"
	);
}

#[tokio::test]
async fn iframe_switching_is_explicitly_paired() {
	let page = SimPage::new();
	page.insert("#payment-frame", ElementState::default());
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let frame = actions.target(&Selector::css("#payment-frame"));

	actions.switch_to_iframe(&frame).await.unwrap();
	assert_eq!(page.current_frame().as_deref(), Some("#payment-frame"));

	actions.switch_to_main_window().await.unwrap();
	assert_eq!(page.current_frame(), None);
}

#[tokio::test]
async fn read_accessors_report_live_state() {
	let page = SimPage::new();
	page.insert("#stock", ElementState {
		count: 4,
		text: "In stock".into(),
		attributes: [("data-sku".to_string(), "SKU-1129".to_string())].into(),
		..Default::default()
	});
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);
	let stock = actions.target(&Selector::css("#stock"));

	assert_eq!(actions.get_element_count(&stock).await.unwrap(), 4);
	assert!(actions.element_exists(&stock).await.unwrap());
	assert!(actions.is_element_visible(&stock).await.unwrap());
	assert_eq!(actions.get_element_text(&stock).await.unwrap(), "In stock");
	assert_eq!(
		actions
			.get_element_attribute(&stock, "data-sku")
			.await
			.unwrap()
			.as_deref(),
		Some("SKU-1129")
	);
	assert_eq!(
		actions.get_element_attribute(&stock, "data-color").await.unwrap(),
		None
	);
}

#[tokio::test(start_paused = true)]
async fn unconditional_wait_suspends_for_the_requested_time() {
	let page = SimPage::new();
	let settings = default_settings();
	let actions = Actions::new(&page, &settings);

	let start = tokio::time::Instant::now();
	actions.wait(Duration::from_millis(250)).await;
	assert_eq!(start.elapsed(), Duration::from_millis(250));
}
