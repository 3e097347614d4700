use dioxus::prelude::*;

use crate::components::state::{
    balance_background_position, volume_background_position, Adjusting, PlayerState,
};
use crate::components::PlayerController;

#[component]
pub(super) fn VolumeSlider() -> Element {
    let controller = use_context::<PlayerController>();
    let state = use_context::<PlayerState>();
    let volume = (state.volume)();
    let sprite = volume_background_position(f64::from(volume) / 100.0);

    let on_press = {
        let controller = controller.clone();
        move |_| controller.begin_adjusting(Adjusting::Volume)
    };
    let on_release = {
        let controller = controller.clone();
        move |_| controller.end_adjusting()
    };
    let on_input = move |e: Event<FormData>| {
        if let Ok(value) = e.value().parse::<f64>() {
            controller.set_volume(value.clamp(0.0, 100.0).round() as u32);
        }
    };

    rsx! {
        input {
            id: "volume",
            r#type: "range",
            min: "0",
            max: "100",
            step: "1",
            value: volume,
            style: "background-position: {sprite};",
            onmousedown: on_press,
            onmouseup: on_release,
            oninput: on_input,
        }
    }
}

#[component]
pub(super) fn BalanceSlider() -> Element {
    let controller = use_context::<PlayerController>();
    let state = use_context::<PlayerState>();
    let balance = (state.balance)();
    let sprite = balance_background_position(balance);

    let on_press = {
        let controller = controller.clone();
        move |_| controller.begin_adjusting(Adjusting::Balance)
    };
    let on_release = {
        let controller = controller.clone();
        move |_| controller.end_adjusting()
    };
    let on_input = move |e: Event<FormData>| {
        if let Ok(value) = e.value().parse::<f64>() {
            controller.set_balance(value.round() as i32);
        }
    };

    rsx! {
        input {
            id: "balance",
            r#type: "range",
            min: "-100",
            max: "100",
            step: "1",
            value: balance,
            style: "background-position: {sprite};",
            onmousedown: on_press,
            onmouseup: on_release,
            oninput: on_input,
        }
    }
}

/// Seek bar. Live updates follow playback; a press pauses until commit.
#[component]
pub(super) fn PositionSlider() -> Element {
    let controller = use_context::<PlayerController>();
    let state = use_context::<PlayerState>();
    let percent = (state.readout)().percent;

    let on_press = {
        let controller = controller.clone();
        move |_| controller.begin_seek()
    };
    let on_commit = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            controller.commit_seek(percent.clamp(0.0, 100.0));
        }
    };

    rsx! {
        input {
            id: "position",
            r#type: "range",
            min: "0",
            max: "100",
            step: "any",
            value: percent,
            onmousedown: on_press,
            onchange: on_commit,
        }
    }
}
