//! Button wiring. The state machine in viz-core decides what should happen;
//! this module runs the resulting actions against the audio graph, including
//! the asynchronous getUserMedia round trip.

use crate::audio::AudioGraph;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::source::{AudioAction, SourceControl};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

const TOGGLE_MUSIC_ID: &str = "toggle-music";
const TOGGLE_SOURCE_ID: &str = "toggle-source";

pub fn wire_buttons(
    document: &web::Document,
    graph: Rc<AudioGraph>,
    control: Rc<RefCell<SourceControl>>,
) {
    {
        let graph = graph.clone();
        let control = control.clone();
        dom::add_click_listener(document, TOGGLE_MUSIC_ID, move || {
            graph.resume_if_suspended();
            let mut actions = Vec::new();
            control.borrow_mut().toggle_transport(&mut actions);
            run_actions(&graph, &control, actions);
            if let Some(document) = dom_document() {
                update_labels(&document, &control.borrow());
            }
        });
    }
    {
        let graph = graph.clone();
        let control = control.clone();
        dom::add_click_listener(document, TOGGLE_SOURCE_ID, move || {
            graph.resume_if_suspended();
            let mut actions = Vec::new();
            control.borrow_mut().toggle_source(&mut actions);
            run_actions(&graph, &control, actions);
            if let Some(document) = dom_document() {
                update_labels(&document, &control.borrow());
            }
        });
    }
}

fn dom_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

fn run_actions(
    graph: &Rc<AudioGraph>,
    control: &Rc<RefCell<SourceControl>>,
    actions: Vec<AudioAction>,
) {
    for action in actions {
        match action {
            AudioAction::RequestMicrophone { epoch } => {
                request_microphone(graph.clone(), control.clone(), epoch);
            }
            other => graph.apply(other),
        }
    }
}

/// Asks for microphone access and wires the stream up if, and only if, the
/// request is still the current one when the browser answers. A grant that
/// lands after the user toggled away is dropped on the floor.
fn request_microphone(graph: Rc<AudioGraph>, control: Rc<RefCell<SourceControl>>, epoch: u64) {
    spawn_local(async move {
        match user_media_stream().await {
            Ok(stream) => {
                if !control.borrow().is_request_current(epoch) {
                    log::info!("microphone grant arrived for a stale request, ignoring");
                } else {
                    match graph.connect_microphone(&stream) {
                        Ok(()) => {
                            control.borrow_mut().microphone_granted(epoch);
                        }
                        Err(e) => {
                            log::error!("microphone wiring failed: {e:?}");
                            control.borrow_mut().microphone_denied(epoch);
                        }
                    }
                }
            }
            Err(e) => {
                log::error!("error accessing microphone: {e:?}");
                control.borrow_mut().microphone_denied(epoch);
            }
        }
        if let Some(document) = dom_document() {
            update_labels(&document, &control.borrow());
        }
    });
}

async fn user_media_stream() -> Result<web::MediaStream, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    constraints.set_video(&JsValue::FALSE);
    let promise = devices.get_user_media_with_constraints(&constraints)?;
    JsFuture::from(promise).await?.dyn_into::<web::MediaStream>()
}

pub fn update_labels(document: &web::Document, control: &SourceControl) {
    dom::set_button_label(document, TOGGLE_MUSIC_ID, control.transport_label());
    dom::set_button_label(document, TOGGLE_SOURCE_ID, control.source_label());
}
