use dioxus::prelude::*;

use crate::components::state::PlayerState;
use crate::components::PlayerController;

/// Previous / play / pause / stop / next, plus eject and its hidden picker.
#[component]
pub(super) fn TransportControls() -> Element {
    let controller = use_context::<PlayerController>();

    let on_previous = {
        let controller = controller.clone();
        move |_| controller.previous()
    };
    let on_play = {
        let controller = controller.clone();
        move |_| controller.play()
    };
    let on_pause = {
        let controller = controller.clone();
        move |_| controller.pause()
    };
    let on_stop = {
        let controller = controller.clone();
        move |_| controller.stop()
    };
    let on_next = {
        let controller = controller.clone();
        move |_| controller.next()
    };
    let on_eject = {
        let controller = controller.clone();
        move |_| controller.eject()
    };
    let on_file_picked = move |_: Event<FormData>| controller.start_picked_file();

    rsx! {
        div { class: "actions",
            div { id: "previous", onclick: on_previous }
            div { id: "play", onclick: on_play }
            div { id: "pause", onclick: on_pause }
            div { id: "stop", onclick: on_stop }
            div { id: "next", onclick: on_next }
        }
        div { id: "eject", onclick: on_eject }
        input {
            id: "file-input",
            r#type: "file",
            accept: "audio/*",
            style: "display: none;",
            onchange: on_file_picked,
        }
    }
}

#[component]
pub(super) fn ShuffleRepeat() -> Element {
    let controller = use_context::<PlayerController>();
    let state = use_context::<PlayerState>();

    let on_shuffle = {
        let controller = controller.clone();
        move |_| controller.toggle_shuffle()
    };
    let on_repeat = move |_| controller.toggle_repeat();

    rsx! {
        div { class: "shuffle-repeat",
            div {
                id: "shuffle",
                class: if (state.shuffle)() { "selected" } else { "" },
                onclick: on_shuffle,
            }
            div {
                id: "repeat",
                class: if (state.repeat)() { "selected" } else { "" },
                onclick: on_repeat,
            }
        }
    }
}
