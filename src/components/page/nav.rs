//! Navigation: mobile menu, in-page smooth scrolling and scroll-driven nav state.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use super::{PageBehaviors, query_all, query_one, scroll_y};

/// The nav bar is marked `scrolled` past this many px.
const SCROLLED_THRESHOLD: f64 = 50.0;
/// Fallback nav height when the nav is missing or has no layout.
const DEFAULT_NAV_HEIGHT: f64 = 80.0;
/// Reference line below the top of the viewport used to pick the active section.
const ACTIVE_LINE_OFFSET: f64 = 150.0;
/// Class that slides the mobile menu off-screen.
const MENU_HIDDEN_CLASS: &str = "translate-x-full";

/// Whether the nav bar should carry its `scrolled` style.
pub fn is_scrolled(scroll_y: f64) -> bool {
	scroll_y > SCROLLED_THRESHOLD
}

/// Scroll position that puts a target just below the nav bar.
///
/// A zero nav height counts as missing.
pub fn scroll_target_top(target_offset_top: f64, nav_height: Option<f64>) -> f64 {
	let nav = nav_height
		.filter(|h| *h > 0.0)
		.unwrap_or(DEFAULT_NAV_HEIGHT);
	target_offset_top - nav
}

/// Id of the section containing the reference line, given `(id, top, height)` per
/// section in document order. Later sections win on overlap.
pub fn active_section<'a>(scroll_y: f64, sections: &'a [(String, f64, f64)]) -> Option<&'a str> {
	let line = scroll_y + ACTIVE_LINE_OFFSET;
	sections
		.iter()
		.filter(|(_, top, height)| line >= *top && line < top + height)
		.map(|(id, _, _)| id.as_str())
		.last()
}

pub(super) fn install_mobile_menu(behaviors: &mut PageBehaviors, document: &Document) {
	let Some(menu) = document.get_element_by_id("mobile-menu") else {
		return;
	};
	let body = document.body();

	let set_open = {
		let (menu, body) = (menu.clone(), body.clone());
		move |open: bool| {
			let classes = menu.class_list();
			let _ = if open {
				classes.remove_1(MENU_HIDDEN_CLASS)
			} else {
				classes.add_1(MENU_HIDDEN_CLASS)
			};
			if let Some(ref body) = body {
				let _ = body
					.style()
					.set_property("overflow", if open { "hidden" } else { "" });
			}
		}
	};

	if let Some(toggle) = document.get_element_by_id("mobile-menu-toggle") {
		let set_open = set_open.clone();
		behaviors.listen(&toggle, "click", move |_| set_open(true));
	}
	if let Some(close) = document.get_element_by_id("mobile-menu-close") {
		let set_open = set_open.clone();
		behaviors.listen(&close, "click", move |_| set_open(false));
	}
	for link in query_all(document, ".mobile-nav-link") {
		let set_open = set_open.clone();
		behaviors.listen(&link, "click", move |_| set_open(false));
	}
}

pub(super) fn install_smooth_scroll(
	behaviors: &mut PageBehaviors,
	window: &Window,
	document: &Document,
) {
	for anchor in query_all(document, "a[href^=\"#\"]") {
		let (window, document, anchor_el) = (window.clone(), document.clone(), anchor.clone());
		behaviors.listen(&anchor, "click", move |ev| {
			let Some(href) = anchor_el.get_attribute("href") else {
				return;
			};
			if href == "#" {
				return;
			}
			let Some(target) = query_one(&document, &href) else {
				return;
			};
			ev.prevent_default();

			let nav_height = query_one(&document, "nav")
				.and_then(|nav| nav.dyn_into::<HtmlElement>().ok())
				.map(|nav| nav.offset_height() as f64);
			let target_top = target
				.dyn_ref::<HtmlElement>()
				.map(|t| t.offset_top() as f64)
				.unwrap_or(0.0);

			let options = ScrollToOptions::new();
			options.set_top(scroll_target_top(target_top, nav_height));
			options.set_behavior(ScrollBehavior::Smooth);
			window.scroll_to_with_scroll_to_options(&options);
		});
	}
}

pub(super) fn install_scroll_tracking(
	behaviors: &mut PageBehaviors,
	window: &Window,
	document: &Document,
) {
	let nav = document.get_element_by_id("main-nav");
	let (win, document) = (window.clone(), document.clone());
	behaviors.listen(window, "scroll", move |_| {
		let y = scroll_y(&win);
		if let Some(ref nav) = nav {
			let _ = if is_scrolled(y) {
				nav.class_list().add_1("scrolled")
			} else {
				nav.class_list().remove_1("scrolled")
			};
		}
		update_active_link(&document, y);
	});
}

fn update_active_link(document: &Document, scroll_y: f64) {
	let sections: Vec<(String, f64, f64)> = query_all(document, "section[id]")
		.into_iter()
		.filter_map(|section| {
			let section: HtmlElement = section.dyn_into().ok()?;
			Some((
				section.id(),
				section.offset_top() as f64,
				section.offset_height() as f64,
			))
		})
		.collect();
	let Some(active) = active_section(scroll_y, &sections) else {
		return;
	};
	let wanted = format!("#{active}");
	for link in query_all(document, ".nav-link") {
		mark_active(&link, link.get_attribute("href").as_deref() == Some(wanted.as_str()));
	}
}

fn mark_active(link: &Element, active: bool) {
	let classes = link.class_list();
	let _ = classes.remove_1("active");
	if active {
		let _ = classes.add_1("active");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sections() -> Vec<(String, f64, f64)> {
		vec![
			("hero".into(), 0.0, 600.0),
			("services".into(), 600.0, 800.0),
			("faq".into(), 1400.0, 500.0),
		]
	}

	#[test]
	fn scrolled_past_threshold_only() {
		assert!(!is_scrolled(0.0));
		assert!(!is_scrolled(50.0));
		assert!(is_scrolled(50.5));
	}

	#[test]
	fn scroll_target_subtracts_nav_height() {
		assert_eq!(scroll_target_top(1000.0, Some(64.0)), 936.0);
		assert_eq!(scroll_target_top(1000.0, None), 920.0);
		assert_eq!(scroll_target_top(1000.0, Some(0.0)), 920.0);
	}

	#[test]
	fn active_section_uses_line_below_top() {
		let sections = sections();
		assert_eq!(active_section(0.0, &sections), Some("hero"));
		assert_eq!(active_section(449.0, &sections), Some("hero"));
		assert_eq!(active_section(450.0, &sections), Some("services"));
		assert_eq!(active_section(1300.0, &sections), Some("faq"));
		assert_eq!(active_section(5000.0, &sections), None);
	}
}
