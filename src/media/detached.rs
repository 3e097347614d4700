use std::cell::{Cell, RefCell};

use super::{MediaEvent, PlaybackElement};

type Listener = (MediaEvent, Box<dyn FnMut()>);

/// In-memory playback element with no audio output.
///
/// Stands in for `<audio>` off the web target. Time only moves when a
/// command moves it; tests drive the clock with `advance`.
pub struct DetachedElement {
    current_time: Cell<f64>,
    duration: Cell<f64>,
    paused: Cell<bool>,
    looping: Cell<bool>,
    volume: Cell<f64>,
    source: RefCell<Option<String>>,
    listeners: RefCell<Vec<Listener>>,
}

impl Default for DetachedElement {
    fn default() -> Self {
        Self::new()
    }
}

impl DetachedElement {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(0.0),
            duration: Cell::new(f64::NAN),
            paused: Cell::new(true),
            looping: Cell::new(false),
            volume: Cell::new(1.0),
            source: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    #[cfg(test)]
    pub fn source(&self) -> Option<String> {
        self.source.borrow().clone()
    }

    #[cfg(test)]
    /// Record a known duration and notify `loadedmetadata` listeners.
    pub fn load_metadata(&self, duration: f64) {
        self.duration.set(duration);
        self.emit(MediaEvent::LoadedMetadata);
    }

    #[cfg(test)]
    /// Move the playhead forward while playing, emitting `timeupdate` and,
    /// at the end of a non-looping track, `ended`.
    pub fn advance(&self, seconds: f64) {
        if self.paused.get() {
            return;
        }
        let duration = self.duration.get();
        let mut next = self.current_time.get() + seconds;
        let mut ended = false;
        if duration.is_finite() && next >= duration {
            if self.looping.get() {
                next %= duration.max(f64::MIN_POSITIVE);
            } else {
                next = duration;
                ended = true;
                self.paused.set(true);
            }
        }
        self.current_time.set(next);
        self.emit(MediaEvent::TimeUpdate);
        if ended {
            self.emit(MediaEvent::Ended);
        }
    }

    #[cfg(test)]
    pub fn emit(&self, event: MediaEvent) {
        // Listeners may call back into the element, so run them detached
        // from the borrow and put them back afterwards.
        let mut listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        for (kind, callback) in listeners.iter_mut() {
            if *kind == event {
                callback();
            }
        }
        let mut slot = self.listeners.borrow_mut();
        listeners.append(&mut slot);
        *slot = listeners;
    }
}

impl PlaybackElement for DetachedElement {
    fn current_time(&self) -> f64 {
        self.current_time.get()
    }

    fn set_current_time(&self, seconds: f64) {
        let duration = self.duration.get();
        let clamped = if duration.is_finite() {
            seconds.clamp(0.0, duration)
        } else if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        self.current_time.set(clamped);
    }

    fn duration(&self) -> f64 {
        self.duration.get()
    }

    fn play(&self) {
        self.paused.set(false);
    }

    fn pause(&self) {
        self.paused.set(true);
    }

    fn is_looping(&self) -> bool {
        self.looping.get()
    }

    fn set_looping(&self, looping: bool) {
        self.looping.set(looping);
    }

    fn volume(&self) -> f64 {
        self.volume.get()
    }

    fn set_volume(&self, volume: f64) {
        self.volume.set(volume.clamp(0.0, 1.0));
    }

    fn set_source(&self, url: &str) {
        *self.source.borrow_mut() = Some(url.to_string());
        self.current_time.set(0.0);
        self.duration.set(f64::NAN);
    }

    fn add_listener(&self, event: MediaEvent, callback: Box<dyn FnMut()>) {
        self.listeners.borrow_mut().push((event, callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn advance_stops_at_the_end_and_emits_ended() {
        let element = DetachedElement::new();
        element.load_metadata(10.0);
        element.play();
        let ended = Rc::new(Cell::new(false));
        let flag = ended.clone();
        element.add_listener(MediaEvent::Ended, Box::new(move || flag.set(true)));
        element.advance(4.0);
        assert!(!ended.get());
        element.advance(20.0);
        assert!(ended.get());
        assert!(element.is_paused());
        assert_eq!(element.current_time(), 10.0);
    }

    #[test]
    fn looping_wraps_without_ending() {
        let element = DetachedElement::new();
        element.load_metadata(10.0);
        element.set_looping(true);
        element.play();
        element.advance(12.0);
        assert!(!element.is_paused());
        assert!((element.current_time() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn paused_element_does_not_advance() {
        let element = DetachedElement::new();
        element.load_metadata(10.0);
        element.advance(3.0);
        assert_eq!(element.current_time(), 0.0);
    }

    #[test]
    fn listeners_can_reenter_the_element() {
        let element = Rc::new(DetachedElement::new());
        element.load_metadata(5.0);
        let weak = Rc::downgrade(&element);
        element.add_listener(
            MediaEvent::Ended,
            Box::new(move || {
                if let Some(element) = weak.upgrade() {
                    element.set_current_time(0.0);
                }
            }),
        );
        element.play();
        element.advance(6.0);
        assert_eq!(element.current_time(), 0.0);
    }
}
