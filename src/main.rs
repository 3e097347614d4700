use dioxus::prelude::*;

mod components;
mod config;
mod font;
mod media;

use components::Winamp;

const WINAMP_CSS: Asset = asset!("/assets/styling/winamp.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Winamp" }
        document::Meta { name: "theme-color", content: "#282840" }
        document::Stylesheet { href: WINAMP_CSS }

        Winamp {}
    }
}
