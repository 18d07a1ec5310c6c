//! FAQ accordion and the footer newsletter form.

use leptos::prelude::set_timeout;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlDetailsElement, HtmlInputElement};

use super::{PageBehaviors, query_all, query_one};

const SUBSCRIBED_PLACEHOLDER: &str = "Subscribed!";
const EMAIL_PLACEHOLDER: &str = "Email";
const SUBSCRIBED_RESET: Duration = Duration::from_millis(3000);

/// Indices of the items to close once item `opened` has opened.
pub fn others_to_close(opened: usize, open: &[bool]) -> Vec<usize> {
	open.iter()
		.enumerate()
		.filter(|&(i, &is_open)| i != opened && is_open)
		.map(|(i, _)| i)
		.collect()
}

/// Keeps at most one FAQ `<details>` open.
pub(super) fn install_accordion(behaviors: &mut PageBehaviors, document: &Document) {
	let items: Vec<HtmlDetailsElement> = query_all(document, "details")
		.into_iter()
		.filter_map(|el| el.dyn_into().ok())
		.collect();

	for (index, item) in items.iter().enumerate() {
		let siblings = items.clone();
		behaviors.listen(item, "toggle", move |_| {
			if !siblings[index].open() {
				return;
			}
			let open: Vec<bool> = siblings.iter().map(|d| d.open()).collect();
			for other in others_to_close(index, &open) {
				siblings[other].set_open(false);
			}
		});
	}
}

/// Footer signup: swallow the submit and acknowledge in the placeholder.
pub(super) fn install_newsletter(behaviors: &mut PageBehaviors, document: &Document) {
	let Some(form) = query_one(document, "footer form") else {
		return;
	};
	let Some(input) = form
		.query_selector("input[type=\"email\"]")
		.ok()
		.flatten()
		.and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
	else {
		return;
	};

	behaviors.listen(&form, "submit", move |ev| {
		ev.prevent_default();
		if input.value().trim().is_empty() {
			return;
		}
		input.set_value("");
		input.set_placeholder(SUBSCRIBED_PLACEHOLDER);
		log::info!("ambient-backdrop: newsletter signup accepted");

		let input = input.clone();
		set_timeout(move || input.set_placeholder(EMAIL_PLACEHOLDER), SUBSCRIBED_RESET);
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn closes_every_other_open_item() {
		assert_eq!(others_to_close(1, &[true, true, false, true]), vec![0, 3]);
	}

	#[test]
	fn nothing_to_close_when_alone() {
		assert!(others_to_close(0, &[true]).is_empty());
		assert!(others_to_close(2, &[false, false, true]).is_empty());
	}
}
