//! Player controller: the single owner of the playback wrapper.
//!
//! Components get a clone from context and route every user action through
//! it; media notifications flow back into `PlayerState` signals.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::logger::tracing::{debug, info};
use dioxus::prelude::*;

use crate::components::state::{
    starts_window_drag, Adjusting, KeyLog, PlayStatus, PlayerState, Point, TimeReadout,
    TrackInfo, WindowDrag,
};
use crate::config::PlayerConfig;
use crate::media::{Media, MediaEvent, PlatformElement, PlaybackElement};

#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::warn;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, File, HtmlElement, HtmlInputElement};

#[cfg(target_arch = "wasm32")]
const FILE_INPUT_ID: &str = "file-input";

fn refresh_readout<E: PlaybackElement>(media: &Media<E>, mut readout: Signal<TimeReadout>) {
    readout.set(TimeReadout::new(
        media.time_elapsed_digits(),
        media.time_remaining_digits(),
        media.percent_complete(),
    ));
}

#[derive(Clone)]
pub struct PlayerController {
    media: Rc<Media<PlatformElement>>,
    state: PlayerState,
    config: Rc<PlayerConfig>,
    keys: Rc<RefCell<KeyLog>>,
}

impl PlayerController {
    pub fn new(
        media: Rc<Media<PlatformElement>>,
        state: PlayerState,
        config: Rc<PlayerConfig>,
    ) -> Self {
        Self {
            media,
            state,
            config,
            keys: Rc::new(RefCell::new(KeyLog::default())),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Wire media notifications and load the configured track.
    pub fn attach(&self) {
        let readout = self.state.readout;
        let mut status = self.state.status;

        for event in [MediaEvent::TimeUpdate, MediaEvent::LoadedMetadata] {
            let media = Rc::downgrade(&self.media);
            self.media.add_event_listener(event, move || {
                if let Some(media) = media.upgrade() {
                    refresh_readout(&media, readout);
                }
            });
        }

        let media = Rc::downgrade(&self.media);
        self.media.add_event_listener(MediaEvent::Ended, move || {
            if let Some(media) = media.upgrade() {
                status.set(PlayStatus::Stop);
                media.previous();
                refresh_readout(&media, readout);
            }
        });

        self.media.set_volume(self.config.initial_volume);
        if let Some(track) = self.config.initial_track.clone() {
            self.load_file(&track.url, &track.title);
        }
    }

    pub fn set_status(&self, status: PlayStatus) {
        let mut signal = self.state.status;
        signal.set(status);
    }

    pub fn refresh_time(&self) {
        refresh_readout(&self.media, self.state.readout);
    }

    pub fn load_file(&self, url: &str, name: &str) {
        self.media.load_file(url);
        let mut track = self.state.track;
        track.set(TrackInfo {
            title: name.to_string(),
            kbps: self.config.kbps.clone(),
            khz: self.config.khz.clone(),
        });
        self.refresh_time();
        info!("loaded {name}");
    }

    pub fn start_file(&self, url: &str, name: &str) {
        self.load_file(url, name);
        self.media.play();
        self.set_status(PlayStatus::Play);
    }

    pub fn play(&self) {
        debug!("play");
        self.media.play();
        self.set_status(PlayStatus::Play);
    }

    pub fn pause(&self) {
        debug!("pause");
        self.media.pause();
        self.set_status(PlayStatus::Pause);
    }

    pub fn stop(&self) {
        debug!("stop");
        self.media.stop();
        self.set_status(PlayStatus::Stop);
        self.refresh_time();
    }

    pub fn previous(&self) {
        self.media.previous();
    }

    pub fn next(&self) {
        self.media.next();
    }

    pub fn toggle_repeat(&self) {
        let looping = self.media.toggle_repeat();
        let mut repeat = self.state.repeat;
        repeat.set(looping);
    }

    pub fn toggle_shuffle(&self) {
        self.media.toggle_shuffle();
        let mut shuffle = self.state.shuffle;
        let enabled = !*shuffle.peek();
        shuffle.set(enabled);
    }

    pub fn toggle_shade(&self) {
        let mut shaded = self.state.shaded;
        let collapsed = !*shaded.peek();
        shaded.set(collapsed);
    }

    pub fn toggle_time_mode(&self) {
        let mut mode = self.state.time_mode;
        let next = mode.peek().toggled();
        mode.set(next);
        self.refresh_time();
    }

    pub fn begin_adjusting(&self, slider: Adjusting) {
        let mut adjusting = self.state.adjusting;
        adjusting.set(Some(slider));
    }

    pub fn end_adjusting(&self) {
        let mut adjusting = self.state.adjusting;
        adjusting.set(None);
    }

    pub fn set_volume(&self, percent: u32) {
        let percent = percent.min(100);
        self.media.set_volume(f64::from(percent) / 100.0);
        let mut volume = self.state.volume;
        volume.set(percent);
    }

    pub fn set_balance(&self, balance: i32) {
        let balance = balance.clamp(-100, 100);
        let mut signal = self.state.balance;
        signal.set(balance);
        self.media.set_balance(balance);
    }

    /// Pause so live position updates don't fight the slider.
    pub fn begin_seek(&self) {
        self.media.pause();
    }

    pub fn commit_seek(&self, percent: f64) {
        self.media.seek_to_percent_complete(percent);
    }

    fn begin_drag(&self, pointer: Point) {
        let start = *self.state.window.peek();
        let mut drag = self.state.drag;
        drag.set(WindowDrag::begin(start, pointer));
    }

    /// A mousedown somewhere inside the title bar, `target_id` naming the
    /// element actually pressed.
    pub fn press_title_bar(&self, target_id: Option<&str>, pointer: Point) {
        if starts_window_drag(target_id) {
            self.begin_drag(pointer);
        }
    }

    pub fn drag_to(&self, pointer: Point) {
        let position = self.state.drag.peek().window_position(pointer);
        if let Some(position) = position {
            let mut window = self.state.window;
            window.set(position);
        }
    }

    pub fn end_drag(&self) {
        let mut drag = self.state.drag;
        if drag.peek().is_dragging() {
            drag.set(WindowDrag::Idle);
        }
    }

    /// Feed a key code to the rolling history; a full trigger match
    /// toggles llama mode.
    pub fn handle_key(&self, code: u32) {
        let matched = self.keys.borrow_mut().push(code);
        if matched {
            let mut llama = self.state.llama;
            let enabled = !*llama.peek();
            llama.set(enabled);
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn start_file_reference(&self, file: &File) {
        match crate::media::create_object_url(file) {
            Ok(url) => self.start_file(&url, &file.name()),
            Err(err) => warn!("{err}"),
        }
    }

    /// Start the first file selected in the hidden picker.
    #[cfg(target_arch = "wasm32")]
    pub fn start_picked_file(&self) {
        let file = window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(FILE_INPUT_ID))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            self.start_file_reference(&file);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn start_picked_file(&self) {}

    /// Open the hidden file picker.
    #[cfg(target_arch = "wasm32")]
    pub fn eject(&self) {
        if let Some(input) = window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.get_element_by_id(FILE_INPUT_ID))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            input.click();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn eject(&self) {}

    /// Ask for an Internet location and play it.
    #[cfg(target_arch = "wasm32")]
    pub fn open_location(&self) {
        let Some(window) = window() else {
            return;
        };
        let message = "Enter an Internet location to open here:\n\
                       For example: http://www.server.com/file.mp3";
        if let Ok(Some(url)) = window.prompt_with_message_and_default(message, "") {
            let url = url.trim();
            if !url.is_empty() {
                self.start_file(url, url);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_location(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::state::{TimeMode, LLAMA_TRIGGER};
    use crate::media::DetachedElement;

    struct Harness {
        controller: PlayerController,
        media: Rc<Media<DetachedElement>>,
    }

    // Signals need a runtime; a bare VirtualDom provides one.
    fn with_controller(config: PlayerConfig, test: impl FnOnce(Harness)) {
        fn app() -> Element {
            rsx! {}
        }
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dom.in_scope(ScopeId::ROOT, || {
            let media = Rc::new(Media::new(DetachedElement::new()));
            let state = PlayerState::new(50);
            let controller = PlayerController::new(media.clone(), state, Rc::new(config));
            controller.attach();
            test(Harness { controller, media });
        });
    }

    fn track_config(duration_free_url: &str) -> PlayerConfig {
        let mut config = PlayerConfig::default();
        config.initial_track = Some(crate::config::Track {
            url: duration_free_url.to_string(),
            title: "Intro".to_string(),
        });
        config
    }

    #[test]
    fn attach_loads_the_configured_track_without_playing() {
        with_controller(track_config("llama.mp3"), |h| {
            assert_eq!(h.media.element().source().as_deref(), Some("llama.mp3"));
            assert!(h.media.element().is_paused());
            assert_eq!(h.media.volume(), 0.5);
            let state = h.controller.state();
            assert_eq!(state.track.peek().title, "Intro");
            assert_eq!(state.track.peek().kbps, "128");
            assert_eq!(*state.status.peek(), PlayStatus::Stop);
        });
    }

    #[test]
    fn time_updates_refresh_the_readout() {
        with_controller(track_config("a.mp3"), |h| {
            h.media.element().load_metadata(120.0);
            h.controller.play();
            h.media.element().advance(30.0);
            let readout = *h.controller.state().readout.peek();
            assert_eq!(readout.elapsed.to_string(), "00:30");
            assert_eq!(readout.remaining.to_string(), "01:30");
            assert_eq!(readout.percent, 25.0);
        });
    }

    #[test]
    fn stop_shows_zero_digits() {
        with_controller(track_config("a.mp3"), |h| {
            h.media.element().load_metadata(300.0);
            h.controller.play();
            h.media.element().advance(75.0);
            h.controller.stop();
            let state = h.controller.state();
            assert_eq!(state.readout.peek().elapsed.to_string(), "00:00");
            assert_eq!(*state.status.peek(), PlayStatus::Stop);
        });
    }

    #[test]
    fn ended_after_next_rewinds_and_stops() {
        with_controller(track_config("a.mp3"), |h| {
            h.media.element().load_metadata(90.0);
            h.controller.play();
            h.controller.next();
            assert_eq!(h.media.time_elapsed(), 90.0);
            h.media.element().advance(0.1);
            let state = h.controller.state();
            assert_eq!(*state.status.peek(), PlayStatus::Stop);
            assert_eq!(h.media.time_elapsed(), 0.0);
            assert_eq!(state.readout.peek().elapsed.to_string(), "00:00");
        });
    }

    #[test]
    fn countdown_toggle_switches_digits() {
        with_controller(track_config("a.mp3"), |h| {
            h.media.element().load_metadata(65.0);
            let state = h.controller.state();
            h.controller.toggle_time_mode();
            assert_eq!(*state.time_mode.peek(), TimeMode::Countdown);
            let readout = *state.readout.peek();
            assert_eq!(readout.digits(TimeMode::Countdown).to_string(), "01:05");
            h.controller.toggle_time_mode();
            assert_eq!(*state.time_mode.peek(), TimeMode::Elapsed);
        });
    }

    #[test]
    fn seek_pauses_then_resumes_at_percentage() {
        with_controller(track_config("a.mp3"), |h| {
            h.media.element().load_metadata(200.0);
            h.controller.play();
            h.controller.begin_seek();
            assert!(h.media.element().is_paused());
            h.controller.commit_seek(75.0);
            assert_eq!(h.media.time_elapsed(), 150.0);
            assert!(!h.media.element().is_paused());
        });
    }

    #[test]
    fn sliders_update_media_and_state() {
        with_controller(track_config("a.mp3"), |h| {
            h.controller.begin_adjusting(Adjusting::Volume);
            h.controller.set_volume(80);
            assert_eq!(h.media.volume(), 0.8);
            let state = h.controller.state();
            assert_eq!(*state.volume.peek(), 80);
            assert_eq!(*state.adjusting.peek(), Some(Adjusting::Volume));
            h.controller.end_adjusting();
            assert_eq!(*state.adjusting.peek(), None);
            h.controller.set_balance(-140);
            assert_eq!(*state.balance.peek(), -100);
        });
    }

    #[test]
    fn repeat_and_shuffle_toggle_flags() {
        with_controller(track_config("a.mp3"), |h| {
            let state = h.controller.state();
            h.controller.toggle_repeat();
            assert!(*state.repeat.peek());
            assert!(h.media.is_looping());
            h.controller.toggle_shuffle();
            assert!(*state.shuffle.peek());
            h.controller.toggle_shuffle();
            assert!(!*state.shuffle.peek());
        });
    }

    #[test]
    fn drag_moves_the_window_until_release() {
        with_controller(track_config("a.mp3"), |h| {
            let state = h.controller.state();
            h.controller.begin_drag(Point { x: 10.0, y: 10.0 });
            h.controller.drag_to(Point { x: 25.0, y: 4.0 });
            assert_eq!(*state.window.peek(), Point { x: 15.0, y: -6.0 });
            h.controller.end_drag();
            h.controller.drag_to(Point { x: 500.0, y: 500.0 });
            assert_eq!(*state.window.peek(), Point { x: 15.0, y: -6.0 });
        });
    }

    #[test]
    fn presses_inside_the_title_bar_only_drag_from_the_bar() {
        with_controller(track_config("a.mp3"), |h| {
            let state = h.controller.state();
            h.controller
                .press_title_bar(Some("shade-time"), Point { x: 10.0, y: 10.0 });
            assert!(!state.drag.peek().is_dragging());
            h.controller.drag_to(Point { x: 60.0, y: 60.0 });
            assert_eq!(*state.window.peek(), Point::default());

            h.controller
                .press_title_bar(Some("title-bar"), Point { x: 10.0, y: 10.0 });
            assert!(state.drag.peek().is_dragging());
        });
    }

    #[test]
    fn shade_llama_and_sliders_drive_window_classes() {
        with_controller(track_config("a.mp3"), |h| {
            let state = h.controller.state();
            assert_eq!(state.window_classes(), "winamp");
            h.controller.toggle_shade();
            assert!(*state.shaded.peek());
            assert_eq!(state.window_classes(), "winamp shade");
            for code in LLAMA_TRIGGER {
                h.controller.handle_key(code);
            }
            h.controller.begin_adjusting(Adjusting::Balance);
            assert_eq!(state.window_classes(), "winamp shade llama setting-balance");
            h.controller.begin_adjusting(Adjusting::Volume);
            assert_eq!(state.window_classes(), "winamp shade llama setting-volume");
            h.controller.end_adjusting();
            h.controller.toggle_shade();
            assert!(!*state.shaded.peek());
            assert_eq!(state.window_classes(), "winamp llama");
        });
    }

    #[test]
    fn each_trigger_match_toggles_llama_once() {
        with_controller(track_config("a.mp3"), |h| {
            let state = h.controller.state();
            for code in LLAMA_TRIGGER {
                h.controller.handle_key(code);
            }
            assert!(*state.llama.peek());
            for code in LLAMA_TRIGGER {
                h.controller.handle_key(code);
            }
            assert!(!*state.llama.peek());
        });
    }

    #[test]
    fn start_file_plays_and_sets_status() {
        with_controller(PlayerConfig::default(), |h| {
            h.controller.start_file("blob:xyz", "song.mp3");
            assert!(!h.media.element().is_paused());
            let state = h.controller.state();
            assert_eq!(*state.status.peek(), PlayStatus::Play);
            assert_eq!(state.track.peek().title, "song.mp3");
            h.controller.pause();
            assert_eq!(*state.status.peek(), PlayStatus::Pause);
        });
    }
}
