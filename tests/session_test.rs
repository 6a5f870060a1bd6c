//! Session loop tests with scripted input.

mod common;

use std::io::Cursor;

use common::{FakeCatalog, FakeProcesses, ScriptedInput, processor};
use voxctl::config::SessionSettings;
use voxctl::session::{Session, SessionState};
use voxctl::voice::{Heard, InputError, InputSource, ListenWindow, TextSource};

fn settings(show_banner: bool) -> SessionSettings {
    SessionSettings {
        pause_between_commands_ms: 0,
        show_banner,
    }
}

fn run<S: InputSource>(input: S, catalog: FakeCatalog, processes: FakeProcesses) -> String {
    let mut session = Session::new(
        input,
        processor(catalog, processes),
        settings(true),
        ListenWindow::default(),
    );
    session.start_listening().unwrap();
    assert_eq!(session.state(), SessionState::Stopped);

    let (_, out) = session.into_processor().into_parts();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_stop_listening_requests_no_further_input() {
    let input = ScriptedInput::commands(&["stop listening", "open notepad", "close chrome"]);
    let listens = input.listens.clone();
    let catalog = FakeCatalog::with_entries(&[("notepad.desktop", "Notepad")]);
    let calls = catalog.calls.clone();

    let text = run(input, catalog, FakeProcesses::default());
    assert_eq!(*listens.borrow(), 1);
    assert!(calls.borrow().is_empty());
    assert!(text.contains("=== Voice App Controller Started ==="));
    assert!(text.ends_with("Stopping voice control...\nVoice controller stopped.\n"));
}

#[test]
fn test_session_runs_commands_in_order() {
    let input = ScriptedInput::new([
        Heard::Text("open notepad".into()),
        Heard::Nothing(Some(InputError::Unrecognized)),
        Heard::Text("close chrome".into()),
        Heard::Text("exit".into()),
    ]);
    let catalog = FakeCatalog::with_entries(&[("notepad.desktop", "Notepad")]);
    let processes = FakeProcesses::running(&[(9, "chrome.exe")]);

    let text = run(input, catalog, processes);
    let opened = text.find("Opened Notepad").unwrap();
    let unrecognized = text.find("Could not understand the command").unwrap();
    let closed = text.find("Closed chrome.exe (PID: 9)").unwrap();
    assert!(opened < unrecognized && unrecognized < closed);
}

#[test]
fn test_text_source_drives_session_until_eof() {
    let input = TextSource::new(Cursor::new("Open Notepad\n\nbanana\n"));
    let catalog = FakeCatalog::with_entries(&[("notepad.desktop", "Notepad")]);
    let calls = catalog.calls.clone();

    let text = run(input, catalog, FakeProcesses::default());
    assert_eq!(*calls.borrow(), vec!["list_apps", "launch_id:notepad.desktop"]);
    assert!(text.contains("Available commands:"));
    assert!(text.ends_with("Voice controller stopped.\n"));
}

#[test]
fn test_unavailable_adapters_do_not_end_session() {
    let input = ScriptedInput::commands(&["open code", "close spotify", "close ghost", "exit"]);
    let listens = input.listens.clone();
    let catalog = FakeCatalog {
        programs: vec!["code".to_string()],
        unavailable: true,
        ..Default::default()
    };
    let processes = FakeProcesses {
        unavailable: true,
        ..FakeProcesses::running(&[(31, "spotify.exe")])
    };

    let text = run(input, catalog, processes);
    assert_eq!(*listens.borrow(), 4);
    assert!(text.contains("Opened code\n"));
    assert!(text.contains("Attempted to close spotify (not verified)"));
    assert!(text.contains("No running instances of 'ghost' found"));
    assert!(text.contains("exact_executable: unavailable: process table unreadable"));
    assert!(text.ends_with("Voice controller stopped.\n"));
}
