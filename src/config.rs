//! Startup configuration for the player window.

const DEMO_TRACK_URL: &str = "http://jordaneldredge.com/projects/winamp2-js/llama.mp3";
const DEMO_TRACK_TITLE: &str = "1. DJ Mike Llama - Llama Whippin' Intro <0:05>  ***  ";

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    /// Id of the `<audio>` element the player drives.
    pub audio_element_id: String,
    /// Volume in 0.0..=1.0 applied before anything plays.
    pub initial_volume: f64,
    /// Loaded (not played) when the window mounts.
    pub initial_track: Option<Track>,
    pub kbps: String,
    pub khz: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_element_id: "player".to_string(),
            initial_volume: 0.5,
            initial_track: Some(Track {
                url: DEMO_TRACK_URL.to_string(),
                title: DEMO_TRACK_TITLE.to_string(),
            }),
            kbps: "128".to_string(),
            khz: "44".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Apply `src`, `title` and `volume` (percent) overrides from a query string.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let mut src = None;
        let mut title = None;

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let spaced = value.replace('+', " ");
            let Ok(decoded) = urlencoding::decode(&spaced) else {
                continue;
            };
            let value = decoded.trim().to_string();
            match key {
                "src" if !value.is_empty() => src = Some(value),
                "title" if !value.is_empty() => title = Some(value),
                "volume" => {
                    if let Ok(percent) = value.parse::<f64>() {
                        if percent.is_finite() {
                            config.initial_volume = (percent / 100.0).clamp(0.0, 1.0);
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(url) = src {
            let title = title.unwrap_or_else(|| url.clone());
            config.initial_track = Some(Track { url, title });
        } else if let (Some(title), Some(track)) = (title, config.initial_track.as_mut()) {
            track.title = title;
        }

        config
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_location() -> Self {
        Self::default()
    }
}
