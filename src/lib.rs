#![cfg(target_arch = "wasm32")]
use crate::audio::{WebAudioPlatform, WebProvider};
use crate::constants::{AUDIO_BASE, CURSOR_RING_SELECTOR};
use instant::Instant;
use lufs_core::{AssetTable, FrameSignals, ProviderConfig, PulseConfig, PulseTrigger, SignalProvider};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod audio;
mod constants;
mod controls;
mod dom;
mod frame;
mod gesture;
mod handle;
mod ui;

pub use handle::{AudioHandle, WaveformBars};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lufs-web starting");
    Ok(())
}

/// Build the page's audio provider and hand its view to the caller.
///
/// The page gets one provider; a second call is refused.
#[wasm_bindgen(js_name = initAudio)]
pub async fn init_audio() -> Result<AudioHandle, JsValue> {
    init().await.map_err(|e| {
        log::error!("init error: {:?}", e);
        JsValue::from_str(&format!("{e:#}"))
    })
}

async fn init() -> anyhow::Result<AudioHandle> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        anyhow::bail!("audio already initialized");
    }
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let provider: WebProvider =
        SignalProvider::new(WebAudioPlatform, ProviderConfig::default()).into_shared();
    let last = Rc::new(RefCell::new(FrameSignals::default()));

    // Visuals run from the first frame; before the gesture they read silence.
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        provider: provider.clone(),
        pulse: PulseTrigger::new(PulseConfig::default()),
        cursor_ring: dom::query(&document, CURSOR_RING_SELECTOR),
        last: last.clone(),
        started: Instant::now(),
        ring_pulse: ui::ClassPulse::default(),
        ring_on: false,
    }));
    frame::start_loop(frame_ctx);

    let doc = document.clone();
    let gesture_provider = provider.clone();
    gesture::on_first_gesture(&document, move || {
        spawn_local(async move {
            let provider = gesture_provider;
            let table = AssetTable::site(AUDIO_BASE);
            match provider.start(&table).await {
                Some(report) if !report.is_complete() => {
                    log::warn!(
                        "[assets] {} of {} sounds unavailable",
                        report.failed.len(),
                        table.len()
                    );
                }
                Some(report) => log::info!("[assets] {} sounds ready", report.loaded.len()),
                None => log::warn!("[audio] running on the synthetic signal"),
            }
            controls::wire_audio_controls(&doc, &provider);
        });
    });

    Ok(AudioHandle::new(provider, last))
}
