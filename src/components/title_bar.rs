use dioxus::prelude::*;

use crate::components::display::ShadeTime;
use crate::components::state::{Point, TITLE_BAR_ID};
use crate::components::PlayerController;

/// Id of the element a mouse event was dispatched to.
#[cfg(target_arch = "wasm32")]
fn target_id(e: &Event<MouseData>) -> Option<String> {
    use wasm_bindgen::JsCast;

    let data = e.data();
    let event = data.downcast::<web_sys::MouseEvent>()?;
    let element = event.target()?.dyn_into::<web_sys::Element>().ok()?;
    Some(element.id())
}

#[cfg(not(target_arch = "wasm32"))]
fn target_id(_: &Event<MouseData>) -> Option<String> {
    None
}

/// Title bar: drag handle plus the option/shade/close icons.
///
/// Icons swallow `mousedown`; anything else pressed inside the bar is
/// filtered by target so only the bare bar starts a drag.
#[component]
pub(super) fn TitleBar() -> Element {
    let controller = use_context::<PlayerController>();

    let on_drag_start = {
        let controller = controller.clone();
        move |e: Event<MouseData>| {
            let pointer = e.client_coordinates();
            controller.press_title_bar(
                target_id(&e).as_deref(),
                Point {
                    x: pointer.x,
                    y: pointer.y,
                },
            );
        }
    };

    let on_option = {
        let controller = controller.clone();
        move |_| controller.open_location()
    };

    let on_shade = {
        let controller = controller.clone();
        move |_| controller.toggle_shade()
    };

    rsx! {
        div { id: TITLE_BAR_ID, class: "selected", onmousedown: on_drag_start,
            div {
                id: "option",
                title: "Winamp Menu",
                onmousedown: move |e: Event<MouseData>| e.stop_propagation(),
                onclick: on_option,
            }
            ShadeTime {}
            div {
                id: "minimize",
                onmousedown: move |e: Event<MouseData>| e.stop_propagation(),
            }
            div {
                id: "shade",
                title: "Toggle Windowshade Mode",
                onmousedown: move |e: Event<MouseData>| e.stop_propagation(),
                onclick: on_shade,
            }
            div {
                id: "close",
                onmousedown: move |e: Event<MouseData>| e.stop_propagation(),
            }
        }
    }
}
