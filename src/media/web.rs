//! Browser backend: the page's `<audio>` element plus an optional Web Audio
//! graph for stereo balance.

use dioxus::logger::tracing::{info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AudioContext, AudioContextState, ChannelMergerNode, ChannelSplitterNode, File, GainNode,
    HtmlAudioElement, MediaElementAudioSourceNode, Url,
};

use super::{ChannelGains, MediaError, MediaEvent, PlaybackElement, StereoGains};

/// Browser errors (including `DOMException`) are `Error` objects; prefer
/// their message over the debug dump.
fn js_error(err: JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Find the playback element by id, creating a hidden one if the page has none.
pub fn get_or_create_audio_element(id: &str) -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(id) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(id);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// Turn a picked or dropped file into a URL the audio element can play.
pub fn create_object_url(file: &File) -> Result<String, MediaError> {
    Url::create_object_url_with_blob(file).map_err(|err| MediaError::ObjectUrl(js_error(err)))
}

#[derive(Clone)]
pub struct AudioElement {
    audio: HtmlAudioElement,
}

impl AudioElement {
    pub fn acquire(id: &str) -> Result<Self, MediaError> {
        get_or_create_audio_element(id)
            .map(|audio| Self { audio })
            .ok_or_else(|| MediaError::MissingElement(id.to_string()))
    }

    pub fn html(&self) -> &HtmlAudioElement {
        &self.audio
    }
}

impl PlaybackElement for AudioElement {
    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        // Non-finite positions (no metadata yet) throw in the browser.
        if seconds.is_finite() {
            self.audio.set_current_time(seconds);
        }
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn play(&self) {
        match self.audio.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        warn!("playback was rejected: {}", js_error(err));
                    }
                });
            }
            Err(err) => warn!("play() failed: {}", js_error(err)),
        }
    }

    fn pause(&self) {
        if let Err(err) = self.audio.pause() {
            warn!("pause() failed: {}", js_error(err));
        }
    }

    fn is_looping(&self) -> bool {
        self.audio.loop_()
    }

    fn set_looping(&self, looping: bool) {
        self.audio.set_loop(looping);
    }

    fn volume(&self) -> f64 {
        self.audio.volume()
    }

    fn set_volume(&self, volume: f64) {
        self.audio.set_volume(volume.clamp(0.0, 1.0));
    }

    fn set_source(&self, url: &str) {
        self.audio.set_src(url);
    }

    fn add_listener(&self, event: MediaEvent, callback: Box<dyn FnMut()>) {
        let closure = Closure::wrap(callback);
        if let Err(err) = self
            .audio
            .add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
        {
            warn!("could not listen for {}: {}", event.as_str(), js_error(err));
        }
        closure.forget();
    }
}

/// Firefox refuses to route element audio through a graph for cross-origin
/// sources, so balance stays UI-only there.
pub fn audio_graph_supported() -> bool {
    let Some(window) = window() else {
        return false;
    };
    match window.navigator().user_agent() {
        Ok(agent) => !agent.contains("Firefox"),
        Err(_) => false,
    }
}

/// element -> splitter -> (left gain, right gain) -> merger -> destination
pub struct StereoGraph {
    context: AudioContext,
    _source: MediaElementAudioSourceNode,
    _splitter: ChannelSplitterNode,
    _merger: ChannelMergerNode,
    left: GainNode,
    right: GainNode,
}

impl StereoGraph {
    pub fn connect(audio: &HtmlAudioElement) -> Result<Self, MediaError> {
        let graph_err = |err: JsValue| MediaError::AudioGraph(js_error(err));

        let context = AudioContext::new().map_err(graph_err)?;
        let source = context
            .create_media_element_source(audio)
            .map_err(graph_err)?;
        let left = context.create_gain().map_err(graph_err)?;
        let right = context.create_gain().map_err(graph_err)?;
        let splitter = context
            .create_channel_splitter_with_number_of_outputs(2)
            .map_err(graph_err)?;
        let merger = context
            .create_channel_merger_with_number_of_inputs(2)
            .map_err(graph_err)?;

        source.connect_with_audio_node(&splitter).map_err(graph_err)?;
        splitter
            .connect_with_audio_node_and_output(&left, 0)
            .map_err(graph_err)?;
        splitter
            .connect_with_audio_node_and_output(&right, 1)
            .map_err(graph_err)?;
        left.connect_with_audio_node_and_output_and_input(&merger, 0, 0)
            .map_err(graph_err)?;
        right
            .connect_with_audio_node_and_output_and_input(&merger, 0, 1)
            .map_err(graph_err)?;
        merger
            .connect_with_audio_node(&context.destination())
            .map_err(graph_err)?;

        info!("stereo balance graph connected");
        Ok(Self {
            context,
            _source: source,
            _splitter: splitter,
            _merger: merger,
            left,
            right,
        })
    }
}

impl ChannelGains for StereoGraph {
    fn set_gains(&self, gains: StereoGains) {
        self.left.gain().set_value(gains.left);
        self.right.gain().set_value(gains.right);
    }

    fn resume(&self) {
        if self.context.state() != AudioContextState::Suspended {
            return;
        }
        match self.context.resume() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        warn!("audio context stayed suspended: {}", js_error(err));
                    }
                });
            }
            Err(err) => warn!("resume() failed: {}", js_error(err)),
        }
    }
}
