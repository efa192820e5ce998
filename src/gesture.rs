use crate::constants::GESTURE_EVENTS;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Run `handler` on the first pointer, touch or key gesture, then detach.
///
/// Browsers refuse to start audio before a user gesture, so the audio graph
/// is built from here.
pub fn on_first_gesture(document: &web::Document, handler: impl FnOnce() + 'static) {
    let handler: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
        Rc::new(RefCell::new(Some(Box::new(handler))));
    let func: Rc<RefCell<Option<js_sys::Function>>> = Rc::new(RefCell::new(None));

    let doc = document.clone();
    let func_inner = func.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Some(run) = handler.borrow_mut().take() else {
            return;
        };
        if let Some(f) = func_inner.borrow().as_ref() {
            for ev in GESTURE_EVENTS {
                _ = doc.remove_event_listener_with_callback(ev, f);
            }
        }
        log::debug!("[audio] first user gesture");
        run();
    }) as Box<dyn FnMut()>);

    let f: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
    for ev in GESTURE_EVENTS {
        _ = document.add_event_listener_with_callback(ev, &f);
    }
    *func.borrow_mut() = Some(f);
    // the JS side may still hold the function briefly after removal
    closure.forget();
}
