//! Audio-source state machine.
//!
//! `Disconnected → Connected(File) | Connected(Microphone) → Disconnected`,
//! plus an explicit pending state while a microphone permission request is
//! in flight. The structure is pure: transitions emit [`AudioAction`]s
//! that the frontend executes against the real audio graph, so the whole
//! machine is testable off the web.
//!
//! Microphone requests carry an epoch. Toggling away while a request is
//! pending advances the epoch, and a grant that resolves under a stale
//! epoch is discarded instead of wiring up a connection nobody asked for.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SourceKind {
    File,
    Microphone,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Link {
    Disconnected,
    PendingMicrophone { epoch: u64 },
    Connected(SourceKind),
}

/// Effect the frontend must apply to the audio graph.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AudioAction {
    /// Wire file source → analyser → output and start playback.
    ConnectFile,
    /// Begin an asynchronous microphone permission request.
    RequestMicrophone { epoch: u64 },
    /// Unwire the file source, pause, and rewind to zero.
    DisconnectFile,
    /// Unwire the microphone source.
    DisconnectMicrophone,
    /// A pending request was abandoned before it resolved; nothing is
    /// wired yet, the eventual grant will see a stale epoch.
    CancelMicrophoneRequest,
}

pub struct SourceControl {
    link: Link,
    use_microphone: bool,
    mic_epoch: u64,
}

impl SourceControl {
    pub fn new() -> Self {
        Self {
            link: Link::Disconnected,
            use_microphone: false,
            mic_epoch: 0,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.link, Link::Connected(_))
    }

    pub fn connected_kind(&self) -> Option<SourceKind> {
        match self.link {
            Link::Connected(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_request_pending(&self) -> bool {
        matches!(self.link, Link::PendingMicrophone { .. })
    }

    /// True while `epoch` identifies the still-wanted microphone request.
    pub fn is_request_current(&self, epoch: u64) -> bool {
        self.link == Link::PendingMicrophone { epoch }
    }

    pub fn prefers_microphone(&self) -> bool {
        self.use_microphone
    }

    /// Start/stop button. Connect the preferred source when idle, tear
    /// down whatever is live (or pending) otherwise.
    pub fn toggle_transport(&mut self, out: &mut Vec<AudioAction>) {
        match self.link {
            Link::Disconnected => {
                if self.use_microphone {
                    self.mic_epoch += 1;
                    let epoch = self.mic_epoch;
                    self.link = Link::PendingMicrophone { epoch };
                    log::info!("requesting microphone (epoch {epoch})");
                    out.push(AudioAction::RequestMicrophone { epoch });
                } else {
                    self.link = Link::Connected(SourceKind::File);
                    out.push(AudioAction::ConnectFile);
                }
            }
            Link::PendingMicrophone { .. } | Link::Connected(_) => self.disconnect(out),
        }
    }

    /// Source button. Flips the preference; a live connection is torn
    /// down and the other source brought up, never both at once.
    pub fn toggle_source(&mut self, out: &mut Vec<AudioAction>) {
        self.use_microphone = !self.use_microphone;
        if self.link != Link::Disconnected {
            self.disconnect(out);
            self.toggle_transport(out);
        }
    }

    /// Tear down the active source. No-op when already disconnected.
    pub fn disconnect(&mut self, out: &mut Vec<AudioAction>) {
        match self.link {
            Link::Disconnected => return,
            Link::PendingMicrophone { epoch } => {
                self.mic_epoch += 1;
                log::info!("cancelling microphone request (epoch {epoch})");
                out.push(AudioAction::CancelMicrophoneRequest);
            }
            Link::Connected(SourceKind::File) => out.push(AudioAction::DisconnectFile),
            Link::Connected(SourceKind::Microphone) => {
                out.push(AudioAction::DisconnectMicrophone)
            }
        }
        self.link = Link::Disconnected;
    }

    /// A microphone grant resolved. Returns whether it was accepted;
    /// stale grants leave the machine untouched.
    pub fn microphone_granted(&mut self, epoch: u64) -> bool {
        if self.is_request_current(epoch) {
            self.link = Link::Connected(SourceKind::Microphone);
            true
        } else {
            log::info!("discarding stale microphone grant (epoch {epoch})");
            false
        }
    }

    /// A microphone request failed. The machine stays disconnected and
    /// the user retries manually; there is no automatic backoff.
    pub fn microphone_denied(&mut self, epoch: u64) {
        if self.is_request_current(epoch) {
            log::warn!("microphone request denied (epoch {epoch})");
            self.link = Link::Disconnected;
        }
    }

    pub fn transport_label(&self) -> &'static str {
        match self.link {
            Link::Disconnected => "Start Music",
            _ => "Stop Music",
        }
    }

    pub fn source_label(&self) -> &'static str {
        if self.use_microphone {
            "Use Audio File"
        } else {
            "Use Microphone"
        }
    }
}

impl Default for SourceControl {
    fn default() -> Self {
        Self::new()
    }
}
