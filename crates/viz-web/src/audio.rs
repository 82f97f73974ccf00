//! WebAudio graph: one `AudioContext` and one `AnalyserNode` live for the
//! whole session; source nodes are wired and unwired around the analyser as
//! the user toggles between the audio file and the microphone.

use std::cell::RefCell;
use viz_core::constants::{FFT_SIZE, STREAM_URL};
use viz_core::source::AudioAction;
use viz_core::spectrum::SpectrumFrame;
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct AudioGraph {
    pub context: web::AudioContext,
    pub analyser: web::AnalyserNode,
    media: web::HtmlAudioElement,
    file_source: web::MediaElementAudioSourceNode,
    mic_source: RefCell<Option<web::MediaStreamAudioSourceNode>>,
}

fn js_err(context: &str, e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{context}: {e:?}")
}

pub fn build_audio_graph() -> anyhow::Result<AudioGraph> {
    let context = web::AudioContext::new().map_err(|e| js_err("AudioContext::new", e))?;
    let analyser = context
        .create_analyser()
        .map_err(|e| js_err("create_analyser", e))?;
    analyser.set_fft_size(FFT_SIZE as u32);

    let media = web::HtmlAudioElement::new_with_src(STREAM_URL)
        .map_err(|e| js_err("HtmlAudioElement::new", e))?;
    media.set_cross_origin(Some("anonymous"));
    let file_source = context
        .create_media_element_source(&media)
        .map_err(|e| js_err("create_media_element_source", e))?;

    Ok(AudioGraph {
        context,
        analyser,
        media,
        file_source,
        mic_source: RefCell::new(None),
    })
}

impl AudioGraph {
    /// Browsers start the context suspended until a user gesture; every
    /// button handler pokes it.
    pub fn resume_if_suspended(&self) {
        if self.context.state() == web::AudioContextState::Suspended {
            _ = self.context.resume();
        }
    }

    pub fn connect_file(&self) {
        _ = self.file_source.connect_with_audio_node(&self.analyser);
        _ = self
            .analyser
            .connect_with_audio_node(&self.context.destination());
        _ = self.media.play();
    }

    pub fn disconnect_file(&self) {
        _ = self.file_source.disconnect();
        _ = self.analyser.disconnect();
        _ = self.media.pause();
        self.media.set_current_time(0.0);
    }

    /// Microphone input feeds the analyser only; it is never routed to the
    /// speakers.
    pub fn connect_microphone(&self, stream: &web::MediaStream) -> anyhow::Result<()> {
        let source = self
            .context
            .create_media_stream_source(stream)
            .map_err(|e| js_err("create_media_stream_source", e))?;
        source
            .connect_with_audio_node(&self.analyser)
            .map_err(|e| js_err("connect mic source", e))?;
        *self.mic_source.borrow_mut() = Some(source);
        Ok(())
    }

    pub fn disconnect_microphone(&self) {
        if let Some(source) = self.mic_source.borrow_mut().take() {
            _ = source.disconnect();
        }
        _ = self.analyser.disconnect();
    }

    /// Applies the synchronous side of an action. `RequestMicrophone` and
    /// `CancelMicrophoneRequest` resolve asynchronously in the event layer.
    pub fn apply(&self, action: AudioAction) {
        match action {
            AudioAction::ConnectFile => self.connect_file(),
            AudioAction::DisconnectFile => self.disconnect_file(),
            AudioAction::DisconnectMicrophone => self.disconnect_microphone(),
            AudioAction::RequestMicrophone { .. } | AudioAction::CancelMicrophoneRequest => {}
        }
    }

    pub fn read_frame(&self, frame: &mut SpectrumFrame) {
        self.analyser.get_byte_frequency_data(frame.bytes_mut());
    }
}
