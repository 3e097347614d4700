//! The player window: owns the playback wrapper and font, provides them to
//! the child components, and hooks document-level input.

use std::rc::Rc;

use dioxus::logger::tracing::error;
use dioxus::prelude::*;

use crate::components::controls::{ShuffleRepeat, TransportControls};
use crate::components::display::{MediaInfo, PlayStatusIndicator, TimeDisplay};
use crate::components::sliders::{BalanceSlider, PositionSlider, VolumeSlider};
use crate::components::state::{PlayerState, Point};
use crate::components::text::FontHandle;
use crate::components::title_bar::TitleBar;
use crate::components::PlayerController;
use crate::config::PlayerConfig;
use crate::font::Font;
use crate::media::create_platform_media;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, DragEvent, Event as DomEvent, KeyboardEvent};

const WINDOW_ID: &str = "winamp";

#[component]
pub fn Winamp() -> Element {
    let config = use_hook(|| Rc::new(PlayerConfig::from_location()));
    let media = use_hook(|| {
        create_platform_media(&config.audio_element_id)
            .map(Rc::new)
            .map_err(Rc::new)
    });
    let media = match media {
        Ok(media) => media,
        Err(err) => {
            error!("player unavailable: {err}");
            return rsx! {
                div { class: "winamp-error", "{err}" }
            };
        }
    };

    use_context_provider(|| FontHandle(Rc::new(Font::new())));
    let state = use_context_provider(|| {
        PlayerState::new((config.initial_volume * 100.0).round() as u32)
    });
    let controller =
        use_context_provider(|| PlayerController::new(media, state, config.clone()));

    // Once, after mount: attach writes signals but never reads them.
    {
        let controller = controller.clone();
        use_effect(move || controller.attach());
    }

    #[cfg(target_arch = "wasm32")]
    {
        let controller = controller.clone();
        use_effect(move || listen_for_document_input(controller.clone()));
    }

    let on_pointer_move = {
        let controller = controller.clone();
        move |e: Event<MouseData>| {
            let pointer = e.client_coordinates();
            controller.drag_to(Point {
                x: pointer.x,
                y: pointer.y,
            });
        }
    };
    let on_pointer_up = move |_: Event<MouseData>| controller.end_drag();

    let position = (state.window)();
    let (left, top) = (position.x, position.y);

    rsx! {
        div { class: "desktop", onmousemove: on_pointer_move, onmouseup: on_pointer_up,
            div {
                id: WINDOW_ID,
                class: state.window_classes(),
                style: "left: {left}px; top: {top}px;",
                TitleBar {}
                div { class: "status",
                    div { id: "clutter-bar" }
                    PlayStatusIndicator {}
                    TimeDisplay {}
                }
                MediaInfo {}
                VolumeSlider {}
                BalanceSlider {}
                div { class: "windows",
                    div { id: "equalizer-button" }
                    div { id: "playlist-button" }
                }
                PositionSlider {}
                TransportControls {}
                ShuffleRepeat {}
                a { id: "about", target: "_blank", href: "https://github.com/captbaritone/winamp2-js" }
            }
        }
    }
}

/// Easter-egg key history on the document and file drops on the window.
#[cfg(target_arch = "wasm32")]
fn listen_for_document_input(controller: PlayerController) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    let keys = controller.clone();
    let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        keys.handle_key(event.key_code());
    }) as Box<dyn FnMut(KeyboardEvent)>);
    let _ = document.add_event_listener_with_callback("keyup", key_cb.as_ref().unchecked_ref());
    key_cb.forget();

    let Some(winamp) = document.get_element_by_id(WINDOW_ID) else {
        return;
    };

    let swallow_cb = Closure::wrap(Box::new(move |event: DomEvent| {
        event.stop_propagation();
        event.prevent_default();
    }) as Box<dyn FnMut(DomEvent)>);
    for kind in ["dragenter", "dragover"] {
        let _ = winamp.add_event_listener_with_callback(kind, swallow_cb.as_ref().unchecked_ref());
    }
    swallow_cb.forget();

    let drop_cb = Closure::wrap(Box::new(move |event: DragEvent| {
        event.stop_propagation();
        event.prevent_default();
        let file = event
            .data_transfer()
            .and_then(|transfer| transfer.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            controller.start_file_reference(&file);
        }
    }) as Box<dyn FnMut(DragEvent)>);
    let _ = winamp.add_event_listener_with_callback("drop", drop_cb.as_ref().unchecked_ref());
    drop_cb.forget();
}
