// Host-side tests for the audio-source state machine: transition
// sequencing, idempotent disconnect, and the microphone request epoch.

use viz_core::source::{AudioAction, SourceControl, SourceKind};

fn actions_of(f: impl FnOnce(&mut SourceControl, &mut Vec<AudioAction>)) -> Vec<AudioAction> {
    let mut control = SourceControl::new();
    let mut out = Vec::new();
    f(&mut control, &mut out);
    out
}

#[test]
fn starts_disconnected_with_file_preference() {
    let control = SourceControl::new();
    assert!(!control.is_connected());
    assert!(!control.prefers_microphone());
    assert_eq!(control.transport_label(), "Start Music");
    assert_eq!(control.source_label(), "Use Microphone");
}

#[test]
fn transport_toggle_connects_and_disconnects_the_file() {
    let mut control = SourceControl::new();
    let mut out = Vec::new();

    control.toggle_transport(&mut out);
    assert_eq!(out, vec![AudioAction::ConnectFile]);
    assert_eq!(control.connected_kind(), Some(SourceKind::File));
    assert_eq!(control.transport_label(), "Stop Music");

    out.clear();
    control.toggle_transport(&mut out);
    assert_eq!(out, vec![AudioAction::DisconnectFile]);
    assert!(!control.is_connected());
    assert_eq!(control.transport_label(), "Start Music");
}

#[test]
fn disconnect_when_disconnected_is_a_no_op() {
    let out = actions_of(|control, out| {
        control.disconnect(out);
        control.disconnect(out);
    });
    assert!(out.is_empty());
}

#[test]
fn switching_to_microphone_while_connected_sequences_cleanly() {
    let mut control = SourceControl::new();
    let mut out = Vec::new();
    control.toggle_transport(&mut out);
    out.clear();

    control.toggle_source(&mut out);
    // Exactly one file teardown, then one microphone request; at no point
    // are both sources connected.
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], AudioAction::DisconnectFile);
    let epoch = match out[1] {
        AudioAction::RequestMicrophone { epoch } => epoch,
        other => panic!("expected microphone request, got {other:?}"),
    };
    assert!(control.is_request_pending());
    assert!(!control.is_connected());

    assert!(control.microphone_granted(epoch));
    assert_eq!(control.connected_kind(), Some(SourceKind::Microphone));
    assert_eq!(control.transport_label(), "Stop Music");
}

#[test]
fn stale_microphone_grant_is_discarded() {
    let mut control = SourceControl::new();
    let mut out = Vec::new();
    control.toggle_source(&mut out); // prefer microphone, still disconnected
    assert!(out.is_empty());

    control.toggle_transport(&mut out);
    let epoch = match out[0] {
        AudioAction::RequestMicrophone { epoch } => epoch,
        other => panic!("expected microphone request, got {other:?}"),
    };

    // User toggles away before the permission prompt resolves.
    out.clear();
    control.toggle_transport(&mut out);
    assert_eq!(out, vec![AudioAction::CancelMicrophoneRequest]);
    assert!(!control.is_request_pending());

    // The grant arrives late and must not wire anything up.
    assert!(!control.microphone_granted(epoch));
    assert!(!control.is_connected());
    assert_eq!(control.transport_label(), "Start Music");
}

#[test]
fn denied_microphone_leaves_the_machine_disconnected() {
    let mut control = SourceControl::new();
    let mut out = Vec::new();
    control.toggle_source(&mut out);
    control.toggle_transport(&mut out);
    let epoch = match out.last() {
        Some(AudioAction::RequestMicrophone { epoch }) => *epoch,
        other => panic!("expected microphone request, got {other:?}"),
    };

    control.microphone_denied(epoch);
    assert!(!control.is_connected());
    assert!(!control.is_request_pending());
    assert_eq!(control.transport_label(), "Start Music");

    // Manual retry issues a fresh request under a new epoch.
    out.clear();
    control.toggle_transport(&mut out);
    match out[0] {
        AudioAction::RequestMicrophone { epoch: retry } => assert!(retry > epoch),
        other => panic!("expected microphone request, got {other:?}"),
    }
}

#[test]
fn switching_away_from_a_pending_request_connects_the_file() {
    let mut control = SourceControl::new();
    let mut out = Vec::new();
    control.toggle_source(&mut out);
    control.toggle_transport(&mut out);
    assert!(control.is_request_pending());

    out.clear();
    control.toggle_source(&mut out);
    assert_eq!(
        out,
        vec![AudioAction::CancelMicrophoneRequest, AudioAction::ConnectFile]
    );
    assert_eq!(control.connected_kind(), Some(SourceKind::File));
}

#[test]
fn source_label_reflects_the_preference_only() {
    let mut control = SourceControl::new();
    let mut out = Vec::new();
    assert_eq!(control.source_label(), "Use Microphone");
    control.toggle_source(&mut out);
    assert_eq!(control.source_label(), "Use Audio File");
    control.toggle_source(&mut out);
    assert_eq!(control.source_label(), "Use Microphone");
}

#[test]
fn request_epoch_identity() {
    let mut control = SourceControl::new();
    let mut out = Vec::new();
    control.toggle_source(&mut out);
    control.toggle_transport(&mut out);
    let epoch = match out.last() {
        Some(AudioAction::RequestMicrophone { epoch }) => *epoch,
        other => panic!("expected microphone request, got {other:?}"),
    };
    assert!(control.is_request_current(epoch));
    assert!(!control.is_request_current(epoch + 1));
}
