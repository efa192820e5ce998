use js_sys::{Array, ArrayBuffer, Function, Reflect};
use lufs_core::{AnalysisConfig, AudioError, AudioGraph, AudioPlatform, PlayOptions, SharedProvider};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> Result<web::GainNode, AudioError> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(AudioError::Graph(format!("{label} GainNode: {}", js_err(e))))
        }
    }
}

/// Provider handle shared by every consumer on the page.
pub type WebProvider = SharedProvider<WebAudioPlatform>;

/// WebAudio capability of the current window.
#[derive(Default)]
pub struct WebAudioPlatform;

impl WebAudioPlatform {
    fn constructor() -> Option<Function> {
        let window = web::window()?;
        for name in ["AudioContext", "webkitAudioContext"] {
            if let Ok(ctor) = Reflect::get(&window, &JsValue::from_str(name)) {
                if let Some(f) = ctor.dyn_ref::<Function>() {
                    return Some(f.clone());
                }
            }
        }
        None
    }

    fn create_context() -> Result<web::AudioContext, AudioError> {
        let ctor = Self::constructor().ok_or(AudioError::Unsupported)?;
        Reflect::construct(&ctor, &Array::new())
            .map(|ctx| ctx.unchecked_into::<web::AudioContext>())
            .map_err(|e| AudioError::Graph(format!("AudioContext: {}", js_err(e))))
    }
}

impl AudioPlatform for WebAudioPlatform {
    type Graph = WebAudioGraph;

    fn is_supported(&self) -> bool {
        Self::constructor().is_some()
    }

    fn open(&self, config: &AnalysisConfig, master_gain: f32) -> Result<WebAudioGraph, AudioError> {
        let audio_ctx = Self::create_context()?;
        _ = audio_ctx.resume();

        // Master gain -> destination
        let master = create_gain(&audio_ctx, master_gain, "Master")?;
        master
            .connect_with_audio_node(&audio_ctx.destination())
            .map_err(|e| AudioError::Graph(js_err(e)))?;

        // Analyser sits in front of the master bus for analyzable voices
        let analyser = web::AnalyserNode::new(&audio_ctx)
            .map_err(|e| {
                log::error!("AnalyserNode error: {:?}", e);
                AudioError::Graph(js_err(e))
            })?;
        analyser.set_fft_size(config.fft_size);
        analyser.set_smoothing_time_constant(config.smoothing);
        analyser
            .connect_with_audio_node(&master)
            .map_err(|e| AudioError::Graph(js_err(e)))?;

        let bins = analyser.frequency_bin_count() as usize;
        log::info!("[audio] context sample rate {} Hz, {} bins", audio_ctx.sample_rate(), bins);
        Ok(WebAudioGraph {
            audio_ctx,
            master,
            analyser,
            bins,
        })
    }
}

/// A started buffer source and its private gain.
pub struct WebVoice {
    source: web::AudioBufferSourceNode,
    gain: web::GainNode,
}

pub struct WebAudioGraph {
    audio_ctx: web::AudioContext,
    master: web::GainNode,
    analyser: web::AnalyserNode,
    bins: usize,
}

impl WebAudioGraph {
    async fn fetch_bytes(path: &str) -> Result<ArrayBuffer, AudioError> {
        let fetch_err = |reason: String| AudioError::Fetch {
            path: path.to_string(),
            reason,
        };
        let window = web::window().ok_or_else(|| fetch_err("no window".into()))?;
        let resp = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|e| fetch_err(js_err(e)))?;
        let resp: web::Response = resp.dyn_into().map_err(|e| fetch_err(js_err(e)))?;
        if !resp.ok() {
            return Err(fetch_err(format!("HTTP {}", resp.status())));
        }
        let body = resp.array_buffer().map_err(|e| fetch_err(js_err(e)))?;
        let bytes = JsFuture::from(body).await.map_err(|e| fetch_err(js_err(e)))?;
        bytes.dyn_into::<ArrayBuffer>().map_err(|e| fetch_err(js_err(e)))
    }
}

impl AudioGraph for WebAudioGraph {
    type Buffer = web::AudioBuffer;
    type Voice = WebVoice;

    async fn load(&self, path: &str) -> Result<web::AudioBuffer, AudioError> {
        let bytes = Self::fetch_bytes(path).await?;
        let decode_err = |reason: String| AudioError::Decode {
            path: path.to_string(),
            reason,
        };
        let promise = self
            .audio_ctx
            .decode_audio_data(&bytes)
            .map_err(|e| decode_err(js_err(e)))?;
        let decoded = JsFuture::from(promise)
            .await
            .map_err(|e| decode_err(js_err(e)))?;
        decoded
            .dyn_into::<web::AudioBuffer>()
            .map_err(|e| decode_err(js_err(e)))
    }

    fn start(&self, buffer: &web::AudioBuffer, options: PlayOptions) -> Result<WebVoice, AudioError> {
        let source = web::AudioBufferSourceNode::new(&self.audio_ctx)
            .map_err(|e| AudioError::Playback(js_err(e)))?;
        source.set_buffer(Some(buffer));
        source.set_loop(options.looped);
        let gain = create_gain(&self.audio_ctx, options.gain, "Voice")
            .map_err(|e| AudioError::Playback(e.to_string()))?;

        source
            .connect_with_audio_node(&gain)
            .map_err(|e| AudioError::Playback(js_err(e)))?;
        // Analyzable voices reach the master bus through the analyser
        let bus: &web::AudioNode = if options.analyzable {
            &self.analyser
        } else {
            &self.master
        };
        gain.connect_with_audio_node(bus)
            .map_err(|e| AudioError::Playback(js_err(e)))?;
        #[allow(deprecated)]
        let started = source.start();
        started.map_err(|e| AudioError::Playback(js_err(e)))?;
        Ok(WebVoice { source, gain })
    }

    fn stop(&self, voice: &WebVoice) -> Result<(), AudioError> {
        #[allow(deprecated)]
        let stopped = voice.source.stop();
        _ = voice.gain.disconnect();
        stopped.map_err(|e| AudioError::Playback(js_err(e)))
    }

    fn set_voice_gain(&self, voice: &WebVoice, gain: f32) {
        voice.gain.gain().set_value(gain);
    }

    fn set_master_gain(&self, gain: f32) {
        self.master.gain().set_value(gain);
    }

    fn bin_count(&self) -> usize {
        self.bins
    }

    fn read_frequency(&self, out: &mut [u8]) {
        self.analyser.get_byte_frequency_data(out);
    }

    fn read_time_domain(&self, out: &mut [u8]) {
        self.analyser.get_byte_time_domain_data(out);
    }
}
