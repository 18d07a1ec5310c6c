//! Independent page behaviors around the background.
//!
//! Each behavior looks up its own DOM nodes, does nothing if they are absent
//! and shares no state with the background engine. All listeners live as long
//! as the returned [`PageBehaviors`].

mod forms;
mod nav;
mod reveal;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, IntersectionObserver, Window};

pub use forms::others_to_close;
pub use nav::{active_section, is_scrolled, scroll_target_top};
pub use reveal::{counter_frame, ease_out_quart, parse_count};

/// A registered DOM listener, removed again on drop.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// An intersection observer and the callback it calls.
struct Observer {
	observer: IntersectionObserver,
	_callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Observer {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}

/// Owns every page listener and observer.
#[derive(Default)]
pub struct PageBehaviors {
	listeners: Vec<Listener>,
	observers: Vec<Observer>,
}

impl PageBehaviors {
	fn listen(&mut self, target: &EventTarget, event: &'static str, f: impl FnMut(Event) + 'static) {
		let callback = Closure::<dyn FnMut(Event)>::new(f);
		if target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.is_ok()
		{
			self.listeners.push(Listener {
				target: target.clone(),
				event,
				callback,
			});
		}
	}

	fn keep_observer(
		&mut self,
		observer: IntersectionObserver,
		callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
	) {
		self.observers.push(Observer {
			observer,
			_callback: callback,
		});
	}

	/// Number of live DOM listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}
}

/// Wires every page behavior. `reduced_motion` skips the reveal transitions.
pub fn install_page_behaviors(reduced_motion: bool) -> PageBehaviors {
	let mut behaviors = PageBehaviors::default();
	let Some(window) = web_sys::window() else {
		return behaviors;
	};
	let Some(document) = window.document() else {
		return behaviors;
	};

	nav::install_mobile_menu(&mut behaviors, &document);
	nav::install_smooth_scroll(&mut behaviors, &window, &document);
	nav::install_scroll_tracking(&mut behaviors, &window, &document);
	reveal::install_section_reveal(&mut behaviors, &document, reduced_motion);
	reveal::install_counters(&mut behaviors, &window, &document);
	forms::install_accordion(&mut behaviors, &document);
	forms::install_newsletter(&mut behaviors, &document);

	log::debug!(
		"ambient-backdrop: {} page listeners installed",
		behaviors.listener_count()
	);
	behaviors
}

/// Prints the console banner.
pub fn log_banner() {
	for line in [
		" ▄▀█ █░█░█ ▄▀█ █▀ █▀▀ █▀█ █▀█ ",
		" █▀█ ▀▄▀▄▀ █▀█ ▄█ ██▄ █▀▄ █▄█ ",
		"Venture Software House",
		"Partnering with non-technical founders",
		"→ partners@awasero.com",
	] {
		log::info!("{line}");
	}
}

/// Every element matching `selector`; empty for invalid selectors.
fn query_all(document: &Document, selector: &str) -> Vec<Element> {
	let Ok(list) = document.query_selector_all(selector) else {
		return Vec::new();
	};
	(0..list.length())
		.filter_map(|i| list.get(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

fn query_one(document: &Document, selector: &str) -> Option<Element> {
	document.query_selector(selector).ok().flatten()
}

fn scroll_y(window: &Window) -> f64 {
	window.scroll_y().unwrap_or(0.0)
}
