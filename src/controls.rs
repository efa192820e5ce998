use crate::audio::WebProvider;
use crate::constants::*;
use crate::dom;
use crate::ui::{self, SampleAction};
use lufs_core::SAMPLE_PREFIX;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Wire the page's audio controls to the provider.
///
/// Called once the audio graph exists; controls clicked before that point
/// have nothing to drive.
pub fn wire_audio_controls(document: &web::Document, provider: &WebProvider) {
    wire_mute_toggle(document, provider);
    wire_volume_slider(document, provider);
    wire_sound_elements(document, provider);
    wire_sample_buttons(document, provider);
}

fn wire_mute_toggle(document: &web::Document, provider: &WebProvider) {
    let Some(toggle) = dom::query(document, AUDIO_TOGGLE_SELECTOR) else {
        return;
    };
    let provider = provider.clone();
    let el = toggle.clone();
    dom::add_listener(&toggle, "click", move || {
        let muted = provider.toggle_mute();
        dom::set_class(&el, MUTED_CLASS, muted);
        provider.play_once(CLICK_SOUND);
    });
}

fn wire_volume_slider(document: &web::Document, provider: &WebProvider) {
    let Some(slider) = dom::query(document, VOLUME_SLIDER_SELECTOR) else {
        return;
    };
    let Ok(input) = slider.dyn_into::<web::HtmlInputElement>() else {
        log::warn!("[ui] {VOLUME_SLIDER_SELECTOR} is not an <input>");
        return;
    };
    let provider = provider.clone();
    let target = input.clone();
    dom::add_listener(&input, "input", move || {
        if let Some(v) = ui::slider_to_volume(&target.value(), SLIDER_MAX) {
            provider.set_volume(v);
        }
    });
}

fn wire_sound_elements(document: &web::Document, provider: &WebProvider) {
    for el in dom::query_all(document, SOUND_ELEMENTS_SELECTOR) {
        let Some(sound) = el.get_attribute(SOUND_ATTR) else {
            continue;
        };
        let hover_provider = provider.clone();
        dom::add_listener(&el, "mouseenter", move || hover_provider.play_once(&sound));

        if ui::is_clickable_tag(&el.tag_name()) {
            let click_provider = provider.clone();
            dom::add_listener(&el, "click", move || click_provider.play_once(CLICK_SOUND));
        }
    }
}

fn set_button_playing(button: &web::Element, playing: bool) {
    button.set_inner_html(&ui::sample_button_html(
        playing,
        PLAY_SAMPLE_LABEL,
        STOP_SAMPLE_LABEL,
    ));
}

fn wire_sample_buttons(document: &web::Document, provider: &WebProvider) {
    for button in dom::query_all(document, SAMPLE_BUTTON_SELECTOR) {
        let Some(track) = button.get_attribute(TRACK_ATTR) else {
            continue;
        };
        let provider = provider.clone();
        let doc = document.clone();
        let el = button.clone();
        dom::add_listener(&button, "click", move || {
            let current = provider.current_track();
            match ui::sample_action(current.as_deref(), &track, SAMPLE_PREFIX) {
                SampleAction::Stop(id) => {
                    provider.stop(&id);
                    set_button_playing(&el, false);
                }
                SampleAction::Switch { previous, next } => {
                    if let Some(prev) = previous {
                        let selector = format!("[{TRACK_ATTR}=\"{prev}\"]");
                        if let Some(prev_button) = dom::query(&doc, &selector) {
                            set_button_playing(&prev_button, false);
                        }
                        provider.stop(&prev);
                    }
                    provider.play_once(&next);
                    set_button_playing(&el, true);
                }
            }
        });
    }
}
