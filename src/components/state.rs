//! UI-side state for the player window.
//!
//! Plain types here are independent of the renderer; `PlayerState` bundles
//! the signals shared through context.

use dioxus::prelude::*;

use crate::media::TimeDigits;

/// Key codes that toggle llama mode, oldest first.
pub const LLAMA_TRIGGER: [u32; 10] = [78, 85, 76, 27, 76, 27, 83, 79, 70, 84];

const SLIDER_SPRITES: f64 = 28.0;
const SLIDER_SPRITE_HEIGHT: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayStatus {
    Play,
    Pause,
    #[default]
    Stop,
}

impl PlayStatus {
    pub fn class_name(self) -> &'static str {
        match self {
            PlayStatus::Play => "play",
            PlayStatus::Pause => "pause",
            PlayStatus::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeMode {
    #[default]
    Elapsed,
    Countdown,
}

impl TimeMode {
    pub fn toggled(self) -> Self {
        match self {
            TimeMode::Elapsed => TimeMode::Countdown,
            TimeMode::Countdown => TimeMode::Elapsed,
        }
    }
}

/// Slider currently held down; drives the status-message overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjusting {
    Volume,
    Balance,
}

impl Adjusting {
    pub fn class_name(self) -> &'static str {
        match self {
            Adjusting::Volume => "setting-volume",
            Adjusting::Balance => "setting-balance",
        }
    }
}

/// Snapshot of the playback position, refreshed on media events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeReadout {
    pub elapsed: TimeDigits,
    pub remaining: TimeDigits,
    /// Always finite; 0 before the duration is known.
    pub percent: f64,
}

impl TimeReadout {
    pub fn new(elapsed: TimeDigits, remaining: TimeDigits, percent: f64) -> Self {
        Self {
            elapsed,
            remaining,
            percent: if percent.is_finite() { percent } else { 0.0 },
        }
    }

    pub fn digits(&self, mode: TimeMode) -> TimeDigits {
        match mode {
            TimeMode::Elapsed => self.elapsed,
            TimeMode::Countdown => self.remaining,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackInfo {
    pub title: String,
    pub kbps: String,
    pub khz: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Window repositioning: idle until a press on the bare title bar.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WindowDrag {
    #[default]
    Idle,
    Dragging { window_start: Point, pointer_start: Point },
}

pub const TITLE_BAR_ID: &str = "title-bar";

/// Only a press on the bare title bar moves the window; presses on its
/// children (icons, the shade readout) do not. An unknown target counts as
/// the bar.
pub fn starts_window_drag(target_id: Option<&str>) -> bool {
    target_id.map_or(true, |id| id == TITLE_BAR_ID)
}

impl WindowDrag {
    pub fn begin(window_start: Point, pointer_start: Point) -> Self {
        WindowDrag::Dragging {
            window_start,
            pointer_start,
        }
    }

    /// New window position for the pointer, or `None` when idle.
    pub fn window_position(&self, pointer: Point) -> Option<Point> {
        match *self {
            WindowDrag::Idle => None,
            WindowDrag::Dragging {
                window_start,
                pointer_start,
            } => Some(Point {
                x: window_start.x + (pointer.x - pointer_start.x),
                y: window_start.y + (pointer.y - pointer_start.y),
            }),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, WindowDrag::Dragging { .. })
    }
}

/// Rolling history of the last ten key codes.
#[derive(Debug, Clone, Default)]
pub struct KeyLog {
    codes: Vec<u32>,
}

impl KeyLog {
    /// Record a key and report whether the history now equals the trigger.
    pub fn push(&mut self, code: u32) -> bool {
        self.codes.push(code);
        if self.codes.len() > LLAMA_TRIGGER.len() {
            let excess = self.codes.len() - LLAMA_TRIGGER.len();
            self.codes.drain(..excess);
        }
        self.codes == LLAMA_TRIGGER
    }
}

fn slider_sprite_offset(fraction: f64) -> i64 {
    let sprite = (fraction * SLIDER_SPRITES).round() as i64;
    ((sprite - 1) * SLIDER_SPRITE_HEIGHT).max(0)
}

/// Background position of the volume slider track for a volume in 0.0..=1.0.
pub fn volume_background_position(volume: f64) -> String {
    format!("0 -{}px", slider_sprite_offset(volume))
}

/// Background position of the balance slider track for a balance in -100..=100.
pub fn balance_background_position(balance: i32) -> String {
    let fraction = f64::from(balance.unsigned_abs()) / 100.0;
    format!("-9px -{}px", slider_sprite_offset(fraction))
}

pub fn volume_message(percent: u32) -> String {
    format!("Volume: {percent}%")
}

pub fn balance_message(balance: i32) -> String {
    match balance {
        0 => "Balance: Center".to_string(),
        b if b > 0 => format!("Balance: {b}% Right"),
        b => format!("Balance: {}% Left", b.unsigned_abs()),
    }
}

/// Signals shared by the player window's components.
#[derive(Clone, Copy)]
pub struct PlayerState {
    pub status: Signal<PlayStatus>,
    pub time_mode: Signal<TimeMode>,
    pub readout: Signal<TimeReadout>,
    pub track: Signal<TrackInfo>,
    pub repeat: Signal<bool>,
    pub shuffle: Signal<bool>,
    pub shaded: Signal<bool>,
    pub llama: Signal<bool>,
    pub adjusting: Signal<Option<Adjusting>>,
    pub volume: Signal<u32>,
    pub balance: Signal<i32>,
    pub window: Signal<Point>,
    pub drag: Signal<WindowDrag>,
}

impl PlayerState {
    pub fn new(volume_percent: u32) -> Self {
        Self {
            status: Signal::new(PlayStatus::Stop),
            time_mode: Signal::new(TimeMode::Elapsed),
            readout: Signal::new(TimeReadout::default()),
            track: Signal::new(TrackInfo::default()),
            repeat: Signal::new(false),
            shuffle: Signal::new(false),
            shaded: Signal::new(false),
            llama: Signal::new(false),
            adjusting: Signal::new(None),
            volume: Signal::new(volume_percent),
            balance: Signal::new(0),
            window: Signal::new(Point::default()),
            drag: Signal::new(WindowDrag::Idle),
        }
    }

    /// Classes for the root window element.
    pub fn window_classes(&self) -> String {
        let mut classes = vec!["winamp"];
        if (self.shaded)() {
            classes.push("shade");
        }
        if (self.llama)() {
            classes.push("llama");
        }
        if let Some(adjusting) = (self.adjusting)() {
            classes.push(adjusting.class_name());
        }
        classes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn drag_translates_by_pointer_delta() {
        let drag = WindowDrag::begin(point(40.0, 10.0), point(100.0, 100.0));
        assert!(drag.is_dragging());
        assert_eq!(drag.window_position(point(130.0, 80.0)), Some(point(70.0, -10.0)));
    }

    #[test]
    fn idle_drag_does_not_move() {
        assert_eq!(WindowDrag::Idle.window_position(point(5.0, 5.0)), None);
        assert!(!WindowDrag::default().is_dragging());
    }

    #[test]
    fn only_the_bare_title_bar_starts_a_drag() {
        assert!(starts_window_drag(Some(TITLE_BAR_ID)));
        assert!(starts_window_drag(None));
        assert!(!starts_window_drag(Some("shade-time")));
        assert!(!starts_window_drag(Some("")));
    }

    #[test]
    fn key_log_matches_trigger_at_the_tail() {
        let mut log = KeyLog::default();
        let mut matches = 0;
        for code in [65, 66, 67].into_iter().chain(LLAMA_TRIGGER) {
            if log.push(code) {
                matches += 1;
            }
        }
        assert_eq!(matches, 1);
        assert!(!log.push(78));
    }

    #[test]
    fn key_log_matches_again_after_repeating_the_sequence() {
        let mut log = KeyLog::default();
        let hits = LLAMA_TRIGGER
            .iter()
            .chain(LLAMA_TRIGGER.iter())
            .filter(|&&code| log.push(code))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn partial_sequence_does_not_match() {
        let mut log = KeyLog::default();
        assert!(!LLAMA_TRIGGER[..9].iter().any(|&code| log.push(code)));
    }

    #[test]
    fn balance_messages() {
        assert_eq!(balance_message(0), "Balance: Center");
        assert_eq!(balance_message(35), "Balance: 35% Right");
        assert_eq!(balance_message(-100), "Balance: 100% Left");
        assert_eq!(volume_message(50), "Volume: 50%");
    }

    #[test]
    fn slider_sprites_step_by_fifteen_pixels() {
        assert_eq!(volume_background_position(1.0), "0 -405px");
        assert_eq!(volume_background_position(0.5), "0 -195px");
        assert_eq!(volume_background_position(0.0), "0 -0px");
        assert_eq!(balance_background_position(-100), "-9px -405px");
        assert_eq!(balance_background_position(0), "-9px -0px");
    }

    #[test]
    fn time_mode_toggles_between_two_states() {
        assert_eq!(TimeMode::Elapsed.toggled(), TimeMode::Countdown);
        assert_eq!(TimeMode::Countdown.toggled().toggled(), TimeMode::Countdown);
    }

    #[test]
    fn readout_hides_non_finite_percent() {
        let readout = TimeReadout::new(TimeDigits::default(), TimeDigits([0, 1, 0, 0]), f64::NAN);
        assert_eq!(readout.percent, 0.0);
        assert_eq!(readout.digits(TimeMode::Countdown).to_string(), "01:00");
    }

    #[test]
    fn status_classes() {
        assert_eq!(PlayStatus::default().class_name(), "stop");
        assert_eq!(PlayStatus::Play.class_name(), "play");
        assert_eq!(PlayStatus::Pause.class_name(), "pause");
    }
}
