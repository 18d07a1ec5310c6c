//! Reveal-on-scroll sections and animated statistic counters.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{
	Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit, Window,
};

use super::{PageBehaviors, query_all};

/// How long a counter takes to reach its target.
const COUNTER_DURATION_MS: f64 = 2000.0;
const COUNTER_SUFFIX: &str = "+";

/// `1 - (1 - t)^4`, with `t` clamped to `[0, 1]`.
pub fn ease_out_quart(t: f64) -> f64 {
	1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(4)
}

/// Counter value `elapsed_ms` into its animation, and whether it is finished.
pub fn counter_frame(target: i64, elapsed_ms: f64) -> (i64, bool) {
	let progress = (elapsed_ms / COUNTER_DURATION_MS).clamp(0.0, 1.0);
	if progress >= 1.0 {
		return (target, true);
	}
	((target as f64 * ease_out_quart(progress)).floor() as i64, false)
}

/// Leading integer of a `data-count` value, so `"50+"` counts to 50.
/// Leading whitespace and a sign are accepted; anything else yields `None`.
pub fn parse_count(raw: &str) -> Option<i64> {
	let raw = raw.trim_start();
	let sign_len = usize::from(raw.starts_with(['+', '-']));
	let digits = raw[sign_len..]
		.bytes()
		.take_while(u8::is_ascii_digit)
		.count();
	if digits == 0 {
		return None;
	}
	raw[..sign_len + digits].parse().ok()
}

type EntryCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

fn observe(
	behaviors: &mut PageBehaviors,
	threshold: f64,
	root_margin: Option<&str>,
	targets: &[Element],
	mut on_visible: impl FnMut(&Element, &IntersectionObserver) + 'static,
) {
	if targets.is_empty() {
		return;
	}
	let callback: EntryCallback = Closure::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
		for entry in entries.iter() {
			let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
				continue;
			};
			if entry.is_intersecting() {
				on_visible(&entry.target(), &observer);
			}
		}
	});

	let init = IntersectionObserverInit::new();
	init.set_threshold(&JsValue::from_f64(threshold));
	if let Some(margin) = root_margin {
		init.set_root_margin(margin);
	}
	let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
		Ok(observer) => observer,
		Err(e) => {
			log::warn!("ambient-backdrop: IntersectionObserver unavailable: {e:?}");
			return;
		}
	};
	for target in targets {
		observer.observe(target);
	}
	behaviors.keep_observer(observer, callback);
}

fn set_styles(element: &Element, styles: &[(&str, &str)]) {
	let Some(element) = element.dyn_ref::<HtmlElement>() else {
		return;
	};
	let style = element.style();
	for (property, value) in styles {
		let _ = style.set_property(property, value);
	}
}

pub(super) fn install_section_reveal(
	behaviors: &mut PageBehaviors,
	document: &Document,
	reduced_motion: bool,
) {
	let sections = query_all(document, "section");
	if reduced_motion {
		for section in &sections {
			set_styles(
				section,
				&[("transition", "none"), ("opacity", "1"), ("transform", "none")],
			);
		}
		return;
	}

	for section in &sections {
		set_styles(
			section,
			&[
				("opacity", "0"),
				("transform", "translateY(30px)"),
				("transition", "opacity 0.8s ease-out, transform 0.8s ease-out"),
			],
		);
	}
	observe(behaviors, 0.1, Some("0px 0px -50px 0px"), &sections, |section, _| {
		let _ = section.class_list().add_1("visible");
		set_styles(section, &[("opacity", "1"), ("transform", "translateY(0)")]);
	});
}

pub(super) fn install_counters(behaviors: &mut PageBehaviors, window: &Window, document: &Document) {
	let counters = query_all(document, "[data-count]");
	let window = window.clone();
	observe(behaviors, 0.5, None, &counters, move |element, observer| {
		let Some(target) = element
			.get_attribute("data-count")
			.as_deref()
			.and_then(parse_count)
		else {
			return;
		};
		observer.unobserve(element);
		animate_counter(&window, element.clone(), target);
	});
}

/// Counts `element` up from 0 to `target`, one step per animation frame.
fn animate_counter(window: &Window, element: Element, target: i64) {
	let start = window.performance().map(|p| p.now()).unwrap_or(0.0);
	let step: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let (step_inner, win) = (step.clone(), window.clone());

	*step.borrow_mut() = Some(Closure::new(move |now: f64| {
		let (value, done) = counter_frame(target, now - start);
		element.set_text_content(Some(&format!("{value}{COUNTER_SUFFIX}")));
		if done {
			return;
		}
		if let Some(ref cb) = *step_inner.borrow() {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));

	if let Some(ref cb) = *step.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn easing_hits_endpoints_and_front_loads() {
		assert_eq!(ease_out_quart(0.0), 0.0);
		assert_eq!(ease_out_quart(1.0), 1.0);
		assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
		assert_eq!(ease_out_quart(-3.0), 0.0);
		assert_eq!(ease_out_quart(7.0), 1.0);
	}

	#[test]
	fn counter_floors_until_done() {
		assert_eq!(counter_frame(50, 0.0), (0, false));
		assert_eq!(counter_frame(50, 1000.0), (46, false));
		assert_eq!(counter_frame(50, 1999.0).1, false);
		assert_eq!(counter_frame(50, 2000.0), (50, true));
		assert_eq!(counter_frame(50, 9000.0), (50, true));
	}

	#[test]
	fn count_takes_the_leading_integer() {
		assert_eq!(parse_count("50"), Some(50));
		assert_eq!(parse_count("50+"), Some(50));
		assert_eq!(parse_count("  120 projects"), Some(120));
		assert_eq!(parse_count("-7"), Some(-7));
		assert_eq!(parse_count("+"), None);
		assert_eq!(parse_count("many"), None);
		assert_eq!(parse_count(""), None);
	}

	#[test]
	fn counter_tolerates_clock_before_start() {
		assert_eq!(counter_frame(120, -16.0), (0, false));
	}
}
