use dioxus::prelude::*;

use crate::components::state::{balance_message, volume_message, PlayerState, TimeMode};
use crate::components::text::{BitmapText, GlyphCell, LargeDigit};
use crate::components::PlayerController;

const DIGIT_IDS: [&str; 4] = [
    "minute-first-digit",
    "minute-second-digit",
    "second-first-digit",
    "second-second-digit",
];

/// Main time readout; clicking flips between elapsed and countdown.
#[component]
pub(super) fn TimeDisplay() -> Element {
    let controller = use_context::<PlayerController>();
    let state = use_context::<PlayerState>();
    let mode = (state.time_mode)();
    let digits = (state.readout)().digits(mode).digits();

    rsx! {
        div {
            id: "time",
            class: if mode == TimeMode::Countdown { "countdown" } else { "" },
            onclick: move |_| controller.toggle_time_mode(),
            div { id: "minus-sign" }
            for (id, digit) in DIGIT_IDS.iter().zip(digits) {
                LargeDigit { key: "{id}", id: id.to_string(), digit }
            }
        }
    }
}

/// Miniature time readout shown in the title bar while shaded.
#[component]
pub(super) fn ShadeTime() -> Element {
    let state = use_context::<PlayerState>();
    let mode = (state.time_mode)();
    let digits = (state.readout)().digits(mode).digits();

    rsx! {
        div { id: "shade-time", class: if mode == TimeMode::Countdown { "countdown" } else { "" },
            div { id: "shade-minus-sign" }
            for (id, digit) in DIGIT_IDS.iter().zip(digits) {
                GlyphCell { key: "{id}", id: format!("shade-{id}"), digit }
            }
        }
    }
}

#[component]
pub(super) fn PlayStatusIndicator() -> Element {
    let state = use_context::<PlayerState>();
    let status = (state.status)();

    rsx! {
        div { id: "play-pause", class: status.class_name() }
    }
}

/// Song title, bitrate and sample rate fields, plus the slider messages
/// that cover the title while a slider is held.
#[component]
pub(super) fn MediaInfo() -> Element {
    let state = use_context::<PlayerState>();
    let track = (state.track)();

    rsx! {
        div { class: "media-info",
            div { id: "song-title", BitmapText { text: track.title } }
            div { id: "volume-message", BitmapText { text: volume_message((state.volume)()) } }
            div { id: "balance-message", BitmapText { text: balance_message((state.balance)()) } }
            div { id: "kbps", BitmapText { text: track.kbps } }
            div { id: "khz", BitmapText { text: track.khz } }
            div { class: "mono-stereo",
                div { id: "mono" }
                div { id: "stereo", class: "selected" }
            }
        }
    }
}
