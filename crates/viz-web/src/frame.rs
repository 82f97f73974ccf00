use crate::audio::AudioGraph;
use crate::render;
use instant::Instant;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::scene::SceneInstance;
use viz_core::source::SourceControl;
use viz_core::spectrum::SpectrumFrame;
use viz_core::VisualMode;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub graph: Rc<AudioGraph>,
    pub control: Rc<RefCell<SourceControl>>,
    pub mode: VisualMode,
    pub frame: SpectrumFrame,
    pub rng: StdRng,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'static>>,
    pub started: Instant,
    pub instances: Vec<SceneInstance>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        // While disconnected the spectrum is left as-is, so the scene holds
        // its last pose instead of snapping shut.
        if self.control.borrow().is_connected() {
            self.graph.read_frame(&mut self.frame);
            let elapsed_sec = self.started.elapsed().as_secs_f64();
            let now_ms = js_sys::Date::now();
            self.mode
                .update(&self.frame, elapsed_sec, now_ms, &mut self.rng);
        }

        self.instances.clear();
        self.mode.push_instances(&mut self.instances);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&self.instances) {
                log::error!("render error: {e:?}");
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {e:?}");
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
