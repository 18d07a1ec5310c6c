//! ambient-backdrop: animated ambient canvas background for a marketing page.
//!
//! This crate provides a WASM background component that draws drifting
//! particles, floating code glyphs and a mountain silhouette behind page
//! content, plus the small set of page behaviors that page relies on.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::background::{
	AmbientBackground, BackgroundConfig, BackgroundHandle, mount_background,
	prefers_reduced_motion,
};
pub use components::page::{PageBehaviors, install_page_behaviors};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-backdrop: logging initialized");
}

/// Load background tuning from a script element with id="background-config".
/// Expected format: a JSON object with camelCase keys, every key optional.
fn load_background_config() -> Option<BackgroundConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("background-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match BackgroundConfig::from_json(&json_text) {
		Ok(config) => {
			info!("ambient-backdrop: loaded background config");
			Some(config)
		}
		Err(e) => {
			warn!("ambient-backdrop: failed to parse background config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Mounts the background canvas and wires the page behaviors once the DOM is up.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_background_config().unwrap_or_default();
	let reduced_motion = web_sys::window()
		.map(|w| prefers_reduced_motion(&w))
		.unwrap_or(false);

	let behaviors: Rc<RefCell<Option<PageBehaviors>>> = Rc::new(RefCell::new(None));
	Effect::new(move |_| {
		if behaviors.borrow().is_some() {
			return;
		}
		*behaviors.borrow_mut() = Some(install_page_behaviors(reduced_motion));
		components::page::log_banner();
	});

	view! {
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<AmbientBackground config=config />
	}
}
