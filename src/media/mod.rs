//! Playback wrapper around the browser's native audio element.
//!
//! `Media` turns the element's raw API into transport commands
//! (play/pause/stop/seek/skip) and derived readouts (time digits, percent
//! complete). Stereo balance goes through an optional gain graph; when it is
//! missing, balance changes only affect the UI readout.

use std::fmt;

use dioxus::logger::tracing::debug;
use thiserror::Error;

#[cfg(any(test, not(target_arch = "wasm32")))]
mod detached;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(any(test, not(target_arch = "wasm32")))]
pub use detached::DetachedElement;
#[cfg(target_arch = "wasm32")]
pub use web::{create_object_url, AudioElement, StereoGraph};

/// Playback element used by the UI on the current target.
#[cfg(target_arch = "wasm32")]
pub type PlatformElement = AudioElement;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformElement = DetachedElement;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("playback element #{0} is missing")]
    MissingElement(String),
    #[error("audio graph unavailable: {0}")]
    AudioGraph(String),
    #[error("could not create object url: {0}")]
    ObjectUrl(String),
}

/// Events forwarded from the playback element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    TimeUpdate,
    Ended,
    LoadedMetadata,
}

impl MediaEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::Ended => "ended",
            MediaEvent::LoadedMetadata => "loadedmetadata",
        }
    }
}

/// The subset of a native playback element the wrapper drives.
///
/// Every method takes `&self`: the underlying element is a shared DOM object.
pub trait PlaybackElement {
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn duration(&self) -> f64;
    fn play(&self);
    fn pause(&self);
    fn is_looping(&self) -> bool;
    fn set_looping(&self, looping: bool);
    fn volume(&self) -> f64;
    fn set_volume(&self, volume: f64);
    fn set_source(&self, url: &str);
    fn add_listener(&self, event: MediaEvent, callback: Box<dyn FnMut()>);
}

/// Per-channel gain control for stereo balance.
pub trait ChannelGains {
    fn set_gains(&self, gains: StereoGains);

    /// Called before playback starts. Browsers create audio contexts
    /// suspended until a user gesture, and a suspended graph is silent.
    fn resume(&self) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoGains {
    pub left: f32,
    pub right: f32,
}

/// Map a balance in -100..=100 to channel gains.
///
/// Negative values attenuate the right channel, positive values the left one.
pub fn balance_gains(balance: i32) -> StereoGains {
    let balance = balance.clamp(-100, 100);
    if balance == 0 {
        StereoGains { left: 1.0, right: 1.0 }
    } else if balance < 0 {
        let change = balance as f32 / -100.0;
        StereoGains {
            left: 1.0,
            right: 1.0 - change,
        }
    } else {
        let change = balance as f32 / 100.0;
        StereoGains {
            left: 1.0 - change,
            right: 1.0,
        }
    }
}

/// Minutes and seconds split into four display digits:
/// minutes-tens, minutes-ones, seconds-tens, seconds-ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeDigits(pub [u32; 4]);

impl TimeDigits {
    /// Non-finite or negative input (no metadata yet) reads as zero.
    pub fn from_seconds(seconds: f64) -> Self {
        let seconds = if seconds.is_finite() && seconds > 0.0 {
            seconds
        } else {
            0.0
        };
        let minutes = (seconds / 60.0).floor() as u32;
        let secs = (seconds % 60.0).floor() as u32;
        Self([minutes / 10, minutes % 10, secs / 10, secs % 10])
    }

    pub fn digits(&self) -> [u32; 4] {
        self.0
    }
}

impl fmt::Display for TimeDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a}{b}:{c}{d}")
    }
}

pub struct Media<E> {
    element: E,
    stereo: Option<Box<dyn ChannelGains>>,
}

impl<E: PlaybackElement> Media<E> {
    /// Wrap an element without a stereo graph; balance is UI-only.
    pub fn new(element: E) -> Self {
        Self {
            element,
            stereo: None,
        }
    }

    pub fn with_stereo(element: E, stereo: Box<dyn ChannelGains>) -> Self {
        Self {
            element,
            stereo: Some(stereo),
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    #[cfg(test)]
    pub fn has_stereo_graph(&self) -> bool {
        self.stereo.is_some()
    }

    pub fn time_elapsed(&self) -> f64 {
        self.element.current_time()
    }

    /// NaN until the element knows its duration.
    pub fn time_remaining(&self) -> f64 {
        self.element.duration() - self.element.current_time()
    }

    pub fn time_elapsed_digits(&self) -> TimeDigits {
        TimeDigits::from_seconds(self.time_elapsed())
    }

    pub fn time_remaining_digits(&self) -> TimeDigits {
        TimeDigits::from_seconds(self.time_remaining())
    }

    /// Raw ratio; non-finite when the duration is unknown or zero.
    pub fn percent_complete(&self) -> f64 {
        (self.element.current_time() / self.element.duration()) * 100.0
    }

    pub fn previous(&self) {
        self.element.set_current_time(0.0);
    }

    fn resume_graph(&self) {
        if let Some(stereo) = &self.stereo {
            stereo.resume();
        }
    }

    pub fn play(&self) {
        self.resume_graph();
        self.element.play();
    }

    pub fn pause(&self) {
        self.element.pause();
    }

    pub fn stop(&self) {
        self.element.pause();
        self.element.set_current_time(0.0);
    }

    /// Jump to the end of the current track. There is no playlist to advance.
    pub fn next(&self) {
        self.element.set_current_time(self.element.duration());
    }

    /// Flip the element's loop flag and return the new value.
    pub fn toggle_repeat(&self) -> bool {
        let looping = !self.element.is_looping();
        self.element.set_looping(looping);
        looping
    }

    pub fn toggle_shuffle(&self) {
        debug!("shuffle requested; single-track playback has nothing to shuffle");
    }

    pub fn is_looping(&self) -> bool {
        self.element.is_looping()
    }

    pub fn seek_to_percent_complete(&self, percent: f64) {
        self.element
            .set_current_time(self.element.duration() * (percent / 100.0));
        self.play();
    }

    pub fn set_volume(&self, volume: f64) {
        self.element.set_volume(volume);
    }

    pub fn volume(&self) -> f64 {
        self.element.volume()
    }

    pub fn set_balance(&self, balance: i32) {
        if let Some(stereo) = &self.stereo {
            stereo.set_gains(balance_gains(balance));
        }
    }

    pub fn load_file(&self, url: &str) {
        self.element.set_source(url);
    }

    pub fn add_event_listener(&self, event: MediaEvent, callback: impl FnMut() + 'static) {
        self.element.add_listener(event, Box::new(callback));
    }
}

/// Build the wrapper for the page's playback element.
///
/// A failed or skipped stereo graph leaves balance as a UI-only readout.
#[cfg(target_arch = "wasm32")]
pub fn create_platform_media(element_id: &str) -> Result<Media<PlatformElement>, MediaError> {
    use dioxus::logger::tracing::warn;

    let element = AudioElement::acquire(element_id)?;
    if !web::audio_graph_supported() {
        warn!("stereo balance disabled: element audio graphs are unreliable in this browser");
        return Ok(Media::new(element));
    }
    match StereoGraph::connect(element.html()) {
        Ok(graph) => Ok(Media::with_stereo(element, Box::new(graph))),
        Err(err) => {
            warn!("stereo balance disabled: {err}");
            Ok(Media::new(element))
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn create_platform_media(_element_id: &str) -> Result<Media<PlatformElement>, MediaError> {
    Ok(Media::new(DetachedElement::new()))
}
