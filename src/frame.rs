use crate::audio::WebProvider;
use crate::constants::PULSE_CLASS;
use crate::constants::PULSE_HOLD_SEC;
use crate::dom;
use crate::ui::ClassPulse;
use instant::Instant;
use lufs_core::{FrameSignals, PulseTrigger};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Per-frame consumer state: reads the provider once per tick, drives the
/// cursor pulse, and publishes that read for script renderers.
pub struct FrameContext {
    pub provider: WebProvider,
    pub pulse: PulseTrigger,
    pub cursor_ring: Option<web::Element>,
    pub last: Rc<RefCell<FrameSignals>>,
    pub started: Instant,
    pub ring_pulse: ClassPulse,
    pub ring_on: bool,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.started.elapsed().as_secs_f64();
        let signals = self.provider.frame_signals();
        let bass = signals.energies.bass;
        *self.last.borrow_mut() = signals;

        if let Some(cause) = self.pulse.update(bass, now) {
            log::trace!("[cursor] pulse ({cause:?})");
            self.ring_pulse.trigger(now, PULSE_HOLD_SEC);
        }
        let on = self.ring_pulse.active(now);
        if on != self.ring_on {
            if let Some(ring) = &self.cursor_ring {
                dom::set_class(ring, PULSE_CLASS, on);
            }
            self.ring_on = on;
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
