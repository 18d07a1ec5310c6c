#![cfg(target_arch = "wasm32")]
// Test binary links every lib dep without using them.
#![allow(unused_crate_dependencies)]

use std::rc::Rc;

use ambient_backdrop::components::background::{
	AmbientBackground, AttachError, BackgroundConfig, WebHost, mount_background,
};
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, window};

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_canvas() -> HtmlCanvasElement {
	let document = window().and_then(|w| w.document()).expect("document");
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")
		.expect("create canvas")
		.dyn_into()
		.expect("canvas element");
	document
		.body()
		.expect("body")
		.append_child(&canvas)
		.expect("append canvas");
	canvas
}

#[wasm_bindgen_test]
fn mounting_sizes_canvas_to_window() {
	let canvas = fresh_canvas();
	let handle = mount_background(Some(canvas.clone()), BackgroundConfig::default())
		.expect("background mounts");

	let inner_width = window()
		.and_then(|w| w.inner_width().ok())
		.and_then(|v| v.as_f64())
		.expect("inner width");
	assert_eq!(canvas.width(), inner_width.floor() as u32);

	handle.set_motion_enabled(false);
	assert_eq!(
		canvas.style().get_property_value("display").ok().as_deref(),
		Some("none")
	);
	drop(handle);
	canvas.remove();
}

#[wasm_bindgen_test]
fn missing_canvas_is_reported() {
	let result = mount_background(None, BackgroundConfig::default());
	assert!(matches!(result, Err(AttachError::MissingCanvas)));
}

#[wasm_bindgen_test]
fn clearing_host_callbacks_releases_captures() {
	let marker = Rc::new(());
	let host = WebHost::attach(fresh_canvas()).expect("host attaches");
	let (on_frame, on_settle) = (marker.clone(), marker.clone());
	let callbacks = host.callbacks();
	callbacks.install(
		Closure::new(move |_timestamp: f64| {
			let _keep = &on_frame;
		}),
		move || {
			let _keep = &on_settle;
		},
	);
	assert_eq!(Rc::strong_count(&marker), 3);

	callbacks.clear();
	assert_eq!(Rc::strong_count(&marker), 1);
}

#[wasm_bindgen_test]
async fn unmounting_the_component_stops_the_background() {
	let body = window()
		.and_then(|w| w.document())
		.and_then(|d| d.body())
		.expect("body");
	let mounted = leptos::mount::mount_to(body, || {
		view! { <AmbientBackground id="bg-unmount" /> }
	});
	TimeoutFuture::new(50).await;

	let canvas = window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id("bg-unmount"))
		.and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
		.expect("canvas rendered");
	drop(mounted);

	assert_eq!(
		canvas.style().get_property_value("display").ok().as_deref(),
		Some("none")
	);
}
