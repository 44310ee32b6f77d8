//! Deterministic in-memory driver used by the harness test suite.
//!
//! [`SimPage`] models a single page as a map from CSS selector to scripted
//! element state. Tests arrange the page up front (elements that exist, turn
//! visible after N queries, fail the first K clicks, dropdown options) and
//! then drive the harness against it. No wall-clock time is involved; state
//! transitions are counted in queries so tests stay deterministic under a
//! paused runtime clock.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{DriverError, Result};
use crate::{Selector, Session, Target};

/// One `<option>` of a scripted dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimOption {
	pub value: String,
	pub label: String,
}

/// Scripted state of a single element (or matched set) in the page.
///
/// Fields are public so tests can arrange exactly the state they need via
/// struct-update syntax on [`ElementState::default`].
#[derive(Debug, Clone)]
pub struct ElementState {
	/// Matched-set cardinality. Zero means the element is absent.
	pub count: usize,
	/// Whether the element is rendered visible once `visible_after_checks`
	/// has run out.
	pub visible: bool,
	/// Rendered text content.
	pub text: String,
	/// Attribute map.
	pub attributes: HashMap<String, String>,
	/// Checked state (checkboxes, radios).
	pub checked: bool,
	/// Current input value, mutated by `clear_text`/`type_text` and by
	/// selecting a dropdown option.
	pub value: String,
	/// Dropdown options, if this element is a `<select>`.
	pub options: Vec<SimOption>,
	/// Visibility queries that report `false` before `visible` takes effect.
	pub visible_after_checks: u32,
	/// Existence queries answered before the element disappears. Zero means
	/// the element never disappears.
	pub gone_after_checks: u32,
	/// Clicks that fail before one succeeds.
	pub click_failures: u32,
	/// URL the page navigates to when this element is clicked.
	pub on_click_url: Option<String>,
}

impl Default for ElementState {
	fn default() -> Self {
		Self {
			count: 1,
			visible: true,
			text: String::new(),
			attributes: HashMap::new(),
			checked: false,
			value: String::new(),
			options: Vec::new(),
			visible_after_checks: 0,
			gone_after_checks: 0,
			click_failures: 0,
			on_click_url: None,
		}
	}
}

impl ElementState {
	/// A visible element with the given text content.
	pub fn with_text(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			..Default::default()
		}
	}

	/// An element that exists but is not visible.
	pub fn hidden() -> Self {
		Self {
			visible: false,
			..Default::default()
		}
	}

	/// A `<select>` element with the given `(value, label)` options.
	pub fn dropdown(options: &[(&str, &str)]) -> Self {
		Self {
			options: options
				.iter()
				.map(|(value, label)| SimOption {
					value: (*value).to_string(),
					label: (*label).to_string(),
				})
				.collect(),
			..Default::default()
		}
	}
}

#[derive(Debug, Default)]
struct PointerCounts {
	clicks: u32,
	click_attempts: u32,
	double_clicks: u32,
	right_clicks: u32,
	hovers: u32,
}

#[derive(Debug, Default)]
struct PageState {
	url: String,
	elements: HashMap<String, ElementState>,
	pointer: HashMap<String, PointerCounts>,
	scrolled: Vec<String>,
	frame_stack: Vec<String>,
	screenshots: Vec<String>,
	reloads: u32,
}

/// What a [`SimTarget`] resolves to.
#[derive(Debug, Clone)]
enum TargetKind {
	Css(String),
	OptionByText { select: String, text: String },
	OptionByValue { select: String, value: String },
}

/// Lazy element handle into a [`SimPage`]. Re-evaluates on every query.
#[derive(Clone)]
pub struct SimTarget {
	state: Arc<Mutex<PageState>>,
	kind: TargetKind,
	description: String,
}

impl SimTarget {
	fn find_option(state: &PageState, kind: &TargetKind) -> Option<SimOption> {
		match kind {
			TargetKind::Css(_) => None,
			TargetKind::OptionByText { select, text } => state
				.elements
				.get(select)
				.and_then(|el| el.options.iter().find(|o| o.label == *text))
				.cloned(),
			TargetKind::OptionByValue { select, value } => state
				.elements
				.get(select)
				.and_then(|el| el.options.iter().find(|o| o.value == *value))
				.cloned(),
		}
	}
}

#[async_trait]
impl Target for SimTarget {
	async fn exists(&self) -> Result<bool> {
		let mut state = self.state.lock();
		match &self.kind {
			TargetKind::Css(css) => {
				let Some(el) = state.elements.get_mut(css) else {
					return Ok(false);
				};
				let present = el.count > 0;
				tick_gone(el);
				Ok(present)
			}
			kind => Ok(Self::find_option(&state, kind).is_some()),
		}
	}

	async fn visible(&self) -> Result<bool> {
		let mut state = self.state.lock();
		match &self.kind {
			TargetKind::Css(css) => {
				let Some(el) = state.elements.get_mut(css) else {
					return Ok(false);
				};
				if el.visible_after_checks > 0 {
					el.visible_after_checks -= 1;
					return Ok(false);
				}
				Ok(el.count > 0 && el.visible)
			}
			kind => Ok(Self::find_option(&state, kind).is_some()),
		}
	}

	async fn text(&self) -> Result<String> {
		let state = self.state.lock();
		match &self.kind {
			TargetKind::Css(css) => state
				.elements
				.get(css)
				.filter(|el| el.count > 0)
				.map(|el| el.text.clone())
				.ok_or_else(|| DriverError::NotFound {
					selector: css.clone(),
				}),
			kind => Self::find_option(&state, kind)
				.map(|o| o.label)
				.ok_or_else(|| DriverError::NotFound {
					selector: self.description.clone(),
				}),
		}
	}

	async fn attribute(&self, name: &str) -> Result<Option<String>> {
		let state = self.state.lock();
		match &self.kind {
			TargetKind::Css(css) => state
				.elements
				.get(css)
				.filter(|el| el.count > 0)
				.map(|el| el.attributes.get(name).cloned())
				.ok_or_else(|| DriverError::NotFound {
					selector: css.clone(),
				}),
			kind => Self::find_option(&state, kind)
				.map(|o| (name == "value").then_some(o.value))
				.ok_or_else(|| DriverError::NotFound {
					selector: self.description.clone(),
				}),
		}
	}

	async fn count(&self) -> Result<usize> {
		let state = self.state.lock();
		match &self.kind {
			TargetKind::Css(css) => Ok(state.elements.get(css).map_or(0, |el| el.count)),
			kind => Ok(usize::from(Self::find_option(&state, kind).is_some())),
		}
	}

	async fn checked(&self) -> Result<bool> {
		let state = self.state.lock();
		match &self.kind {
			TargetKind::Css(css) => state
				.elements
				.get(css)
				.filter(|el| el.count > 0)
				.map(|el| el.checked)
				.ok_or_else(|| DriverError::NotFound {
					selector: css.clone(),
				}),
			_ => Ok(false),
		}
	}

	fn description(&self) -> String {
		self.description.clone()
	}
}

fn tick_gone(el: &mut ElementState) {
	if el.gone_after_checks > 0 {
		el.gone_after_checks -= 1;
		if el.gone_after_checks == 0 {
			el.count = 0;
		}
	}
}

/// Deterministic in-memory page implementing [`Session`].
#[derive(Clone)]
pub struct SimPage {
	state: Arc<Mutex<PageState>>,
	screenshot_dir: Option<PathBuf>,
}

impl Default for SimPage {
	fn default() -> Self {
		Self::new()
	}
}

impl SimPage {
	pub fn new() -> Self {
		Self {
			state: Arc::new(Mutex::new(PageState {
				url: "about:blank".to_string(),
				..Default::default()
			})),
			screenshot_dir: None,
		}
	}

	/// Writes screenshot stubs under `dir` instead of only recording names.
	pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.screenshot_dir = Some(dir.into());
		self
	}

	/// Installs or replaces an element.
	pub fn insert(&self, css: &str, element: ElementState) {
		self.state.lock().elements.insert(css.to_string(), element);
	}

	/// Removes an element entirely.
	pub fn remove(&self, css: &str) {
		self.state.lock().elements.remove(css);
	}

	pub fn url(&self) -> String {
		self.state.lock().url.clone()
	}

	pub fn clicks(&self, css: &str) -> u32 {
		self.state.lock().pointer.get(css).map_or(0, |p| p.clicks)
	}

	/// Click attempts including ones that failed, for retry accounting.
	pub fn click_attempts(&self, css: &str) -> u32 {
		self.state.lock().pointer.get(css).map_or(0, |p| p.click_attempts)
	}

	pub fn double_clicks(&self, css: &str) -> u32 {
		self.state.lock().pointer.get(css).map_or(0, |p| p.double_clicks)
	}

	pub fn right_clicks(&self, css: &str) -> u32 {
		self.state.lock().pointer.get(css).map_or(0, |p| p.right_clicks)
	}

	pub fn hovers(&self, css: &str) -> u32 {
		self.state.lock().pointer.get(css).map_or(0, |p| p.hovers)
	}

	/// Current input value of an element.
	pub fn value(&self, css: &str) -> Option<String> {
		self.state.lock().elements.get(css).map(|el| el.value.clone())
	}

	pub fn was_scrolled_to(&self, css: &str) -> bool {
		self.state.lock().scrolled.iter().any(|s| s == css)
	}

	/// Selector of the active iframe, `None` when in the main window.
	pub fn current_frame(&self) -> Option<String> {
		self.state.lock().frame_stack.last().cloned()
	}

	/// Artifact names captured so far.
	pub fn screenshots(&self) -> Vec<String> {
		self.state.lock().screenshots.clone()
	}

	pub fn reloads(&self) -> u32 {
		self.state.lock().reloads
	}

	fn pointer_counts<'a>(state: &'a mut PageState, css: &str) -> &'a mut PointerCounts {
		state.pointer.entry(css.to_string()).or_default()
	}

	/// Looks up an existing element for a pointer action, failing with
	/// `NotFound` when absent.
	fn require<'a>(state: &'a mut PageState, css: &str) -> Result<&'a mut ElementState> {
		state
			.elements
			.get_mut(css)
			.filter(|el| el.count > 0)
			.ok_or_else(|| DriverError::NotFound {
				selector: css.to_string(),
			})
	}
}

#[async_trait]
impl Session for SimPage {
	type Target = SimTarget;

	fn target(&self, selector: &Selector) -> SimTarget {
		SimTarget {
			state: Arc::clone(&self.state),
			kind: TargetKind::Css(selector.css.clone()),
			description: selector.describe().to_string(),
		}
	}

	fn option_by_text(&self, dropdown: &SimTarget, text: &str) -> SimTarget {
		let select = match &dropdown.kind {
			TargetKind::Css(css) => css.clone(),
			_ => dropdown.description.clone(),
		};
		SimTarget {
			state: Arc::clone(&self.state),
			description: format!("{} option \"{text}\"", dropdown.description),
			kind: TargetKind::OptionByText { select, text: text.to_string() },
		}
	}

	fn option_by_value(&self, dropdown: &SimTarget, value: &str) -> SimTarget {
		let select = match &dropdown.kind {
			TargetKind::Css(css) => css.clone(),
			_ => dropdown.description.clone(),
		};
		SimTarget {
			state: Arc::clone(&self.state),
			description: format!("{} option [value={value}]", dropdown.description),
			kind: TargetKind::OptionByValue { select, value: value.to_string() },
		}
	}

	async fn click(&self, target: &SimTarget) -> Result<()> {
		let mut state = self.state.lock();
		match &target.kind {
			TargetKind::Css(css) => {
				SimPage::pointer_counts(&mut state, css).click_attempts += 1;
				let el = SimPage::require(&mut state, css)?;
				if el.click_failures > 0 {
					el.click_failures -= 1;
					return Err(DriverError::NotVisible {
						selector: css.clone(),
					});
				}
				let navigate = el.on_click_url.clone();
				SimPage::pointer_counts(&mut state, css).clicks += 1;
				if let Some(url) = navigate {
					tracing::trace!(target = "sim", %css, %url, "click navigated");
					state.url = url;
				}
				Ok(())
			}
			kind => {
				let Some(option) = SimTarget::find_option(&state, kind) else {
					return Err(DriverError::NotFound {
						selector: target.description.clone(),
					});
				};
				let select = match kind {
					TargetKind::OptionByText { select, .. }
					| TargetKind::OptionByValue { select, .. } => select.clone(),
					TargetKind::Css(_) => unreachable!(),
				};
				let el = SimPage::require(&mut state, &select)?;
				el.value = option.value;
				el.text = option.label;
				Ok(())
			}
		}
	}

	async fn double_click(&self, target: &SimTarget) -> Result<()> {
		let mut state = self.state.lock();
		let TargetKind::Css(css) = &target.kind else {
			return Err(DriverError::Protocol("double click on option target".into()));
		};
		SimPage::require(&mut state, css)?;
		SimPage::pointer_counts(&mut state, css).double_clicks += 1;
		Ok(())
	}

	async fn right_click(&self, target: &SimTarget) -> Result<()> {
		let mut state = self.state.lock();
		let TargetKind::Css(css) = &target.kind else {
			return Err(DriverError::Protocol("right click on option target".into()));
		};
		SimPage::require(&mut state, css)?;
		SimPage::pointer_counts(&mut state, css).right_clicks += 1;
		Ok(())
	}

	async fn hover(&self, target: &SimTarget) -> Result<()> {
		let mut state = self.state.lock();
		let TargetKind::Css(css) = &target.kind else {
			return Err(DriverError::Protocol("hover on option target".into()));
		};
		SimPage::require(&mut state, css)?;
		SimPage::pointer_counts(&mut state, css).hovers += 1;
		Ok(())
	}

	async fn clear_text(&self, target: &SimTarget) -> Result<()> {
		let mut state = self.state.lock();
		let TargetKind::Css(css) = &target.kind else {
			return Err(DriverError::Protocol("clear on option target".into()));
		};
		SimPage::require(&mut state, css)?.value.clear();
		Ok(())
	}

	async fn type_text(&self, target: &SimTarget, text: &str) -> Result<()> {
		let mut state = self.state.lock();
		let TargetKind::Css(css) = &target.kind else {
			return Err(DriverError::Protocol("type into option target".into()));
		};
		SimPage::require(&mut state, css)?.value.push_str(text);
		Ok(())
	}

	async fn scroll_into_view(&self, target: &SimTarget) -> Result<()> {
		let mut state = self.state.lock();
		let TargetKind::Css(css) = &target.kind else {
			return Err(DriverError::Protocol("scroll to option target".into()));
		};
		if !state.elements.contains_key(css) {
			return Err(DriverError::NotFound {
				selector: css.clone(),
			});
		}
		state.scrolled.push(css.clone());
		Ok(())
	}

	async fn goto(&self, url: &str) -> Result<()> {
		tracing::trace!(target = "sim", %url, "goto");
		self.state.lock().url = url.to_string();
		Ok(())
	}

	async fn reload_bypass_cache(&self) -> Result<()> {
		self.state.lock().reloads += 1;
		Ok(())
	}

	async fn current_url(&self) -> Result<String> {
		Ok(self.state.lock().url.clone())
	}

	async fn enter_frame(&self, target: &SimTarget) -> Result<()> {
		let mut state = self.state.lock();
		let TargetKind::Css(css) = &target.kind else {
			return Err(DriverError::Protocol("enter option target as frame".into()));
		};
		if state.elements.get(css).is_none_or(|el| el.count == 0) {
			return Err(DriverError::NoSuchFrame {
				selector: css.clone(),
			});
		}
		state.frame_stack.push(css.clone());
		Ok(())
	}

	async fn leave_frame(&self) -> Result<()> {
		self.state.lock().frame_stack.clear();
		Ok(())
	}

	async fn screenshot(&self, name: &str) -> Result<PathBuf> {
		let file = format!("{name}.png");
		let path = match &self.screenshot_dir {
			Some(dir) => {
				std::fs::create_dir_all(dir)?;
				let path = dir.join(&file);
				std::fs::write(&path, b"\x89PNG\r\n")?;
				path
			}
			None => PathBuf::from(file),
		};
		self.state.lock().screenshots.push(name.to_string());
		Ok(path)
	}
}
