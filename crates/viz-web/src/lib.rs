#![cfg(target_arch = "wasm32")]
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::{SourceControl, SpectrumFrame, VisualMode};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod dom;
mod events;
mod frame;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

// `?mode=beams` selects the beam variant; spheres otherwise.
fn beams_requested() -> bool {
    web::window()
        .and_then(|w| w.location().search().ok())
        .map(|s| s.contains("mode=beams"))
        .unwrap_or(false)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viz-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {e:?}");
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("viz-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #viz-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{e:?}")))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    // The audio graph exists up front; the source nodes are wired and
    // unwired around the analyser as the user toggles.
    let graph = Rc::new(audio::build_audio_graph()?);
    let control = Rc::new(RefCell::new(SourceControl::new()));
    events::wire_buttons(&document, graph.clone(), control.clone());
    events::update_labels(&document, &control.borrow());

    let gpu = frame::init_gpu(&canvas).await;

    let mut rng = StdRng::seed_from_u64(js_sys::Date::now() as u64);
    let mode = if beams_requested() {
        VisualMode::beams(&mut rng)
    } else {
        VisualMode::spheres(&mut rng)
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        graph,
        control,
        mode,
        frame: SpectrumFrame::new(),
        rng,
        canvas,
        gpu,
        started: Instant::now(),
        instances: Vec::new(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
