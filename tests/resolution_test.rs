//! End-to-end command handling against fake OS adapters.
//!
//! These tests verify that:
//! 1. Launch stops at the first strategy that succeeds
//! 2. Terminate stops at the first strategy that closed something
//! 3. Commands without a usable app name never reach the adapters
//! 4. Refused processes do not stop the rest from being closed

mod common;

use common::{FakeCatalog, FakeProcesses, app, engine, processor, written};
use voxctl::session::CommandResult;
use voxctl::{Action, AttemptFailure, Certainty, LaunchTarget, ResolutionOutcome, SuccessDescriptor};

fn terminated(outcome: &ResolutionOutcome) -> (&'static str, Vec<u32>, Vec<u32>, Certainty) {
    match outcome {
        ResolutionOutcome::Success {
            descriptor: SuccessDescriptor::Terminated { strategy, report },
            ..
        } => (
            strategy,
            report.terminated.iter().map(|p| p.pid).collect(),
            report.denied.iter().map(|p| p.pid).collect(),
            report.certainty,
        ),
        other => panic!("expected a termination, got {:?}", other),
    }
}

#[test]
fn test_open_notepad_uses_catalog_only() {
    let catalog = FakeCatalog::with_entries(&[
        ("Microsoft.WindowsCalculator!App", "Calculator"),
        ("Microsoft.WindowsNotepad!App", "Notepad"),
    ]);
    let calls = catalog.calls.clone();
    let mut processor = processor(catalog, FakeProcesses::default());

    let result = processor.process("open notepad").unwrap();
    let CommandResult::Resolved { action, outcome, .. } = result else {
        panic!("expected a resolution, got {:?}", result);
    };
    assert_eq!(action, Action::Launch);
    assert_eq!(outcome.strategies_run(), vec!["catalog_match"]);
    assert_eq!(
        *calls.borrow(),
        vec!["list_apps", "launch_id:Microsoft.WindowsNotepad!App"]
    );
    assert!(written(&mut processor).contains("Opened Notepad (installed app)"));
}

#[test]
fn test_launch_falls_back_to_program_names() {
    let catalog = FakeCatalog {
        programs: vec!["code.exe".to_string()],
        ..Default::default()
    };
    let calls = catalog.calls.clone();
    let engine = engine(catalog, FakeProcesses::default());

    let outcome = engine.launch(&app("code"));
    assert_eq!(
        outcome.strategies_run(),
        vec!["catalog_match", "direct_name", "executable_suffix"]
    );
    let ResolutionOutcome::Success {
        descriptor: SuccessDescriptor::Launched { target, .. },
        ..
    } = outcome
    else {
        panic!("expected launch success");
    };
    assert_eq!(target, LaunchTarget::Program { name: "code.exe".to_string() });
    assert_eq!(*calls.borrow(), vec!["list_apps", "launch:code", "launch:code.exe"]);
}

#[test]
fn test_unavailable_catalog_still_tries_program_names() {
    let catalog = FakeCatalog {
        programs: vec!["code".to_string()],
        unavailable: true,
        ..Default::default()
    };
    let calls = catalog.calls.clone();
    let engine = engine(catalog, FakeProcesses::default());

    let outcome = engine.launch(&app("code"));
    let ResolutionOutcome::Success {
        descriptor,
        failed_attempts,
    } = &outcome
    else {
        panic!("expected launch success, got {:?}", outcome);
    };
    assert_eq!(descriptor.strategy(), "direct_name");
    assert_eq!(failed_attempts.len(), 1);
    assert_eq!(failed_attempts[0].strategy, "catalog_match");
    assert!(matches!(failed_attempts[0].reason, AttemptFailure::Unavailable(_)));
    assert_eq!(*calls.borrow(), vec!["list_apps", "launch:code"]);
}

#[test]
fn test_unavailable_catalog_failure_names_the_cause() {
    let catalog = FakeCatalog {
        unavailable: true,
        ..Default::default()
    };
    let engine = engine(catalog, FakeProcesses::default());

    let ResolutionOutcome::Failure(report) = engine.launch(&app("code")) else {
        panic!("expected launch failure");
    };
    assert_eq!(
        report.attempts.iter().map(|a| a.strategy).collect::<Vec<_>>(),
        vec!["catalog_match", "direct_name", "executable_suffix"]
    );
    assert!(matches!(report.attempts[0].reason, AttemptFailure::Unavailable(_)));
    assert!(
        report
            .candidate_reasons()
            .iter()
            .any(|r| r.contains("catalog could not be queried"))
    );
}

#[test]
fn test_unreadable_process_table_falls_to_name_or_title() {
    let processes = FakeProcesses {
        unavailable: true,
        ..FakeProcesses::running(&[(31, "spotify.exe")])
    };
    let calls = processes.calls.clone();
    let engine = engine(FakeCatalog::default(), processes);

    let outcome = engine.terminate(&app("spotify"));
    let (strategy, pids, _, certainty) = terminated(&outcome);
    assert_eq!(strategy, "name_or_title");
    assert!(pids.is_empty());
    assert_eq!(certainty, Certainty::Assumed);

    let ResolutionOutcome::Success { failed_attempts, .. } = &outcome else {
        unreachable!();
    };
    assert_eq!(failed_attempts.len(), 2);
    assert!(
        failed_attempts
            .iter()
            .all(|a| matches!(a.reason, AttemptFailure::Unavailable(_)))
    );
    assert_eq!(
        *calls.borrow(),
        vec!["list_processes", "list_processes", "fallback:spotify"]
    );
    assert!(engine.processes().remaining().is_empty());
}

#[test]
fn test_app_name_reaches_adapter_verbatim() {
    let catalog = FakeCatalog::default();
    let calls = catalog.calls.clone();
    let mut processor = processor(catalog, FakeProcesses::default());

    let result = processor.process("open foo; rm -rf ~ && echo $(whoami)").unwrap();
    assert!(!result.is_success());
    assert_eq!(
        calls.borrow()[1],
        "launch:foo; rm -rf ~ && echo $(whoami)"
    );
}

#[test]
fn test_close_chrome_closes_every_exact_match() {
    let processes = FakeProcesses::running(&[
        (101, "chrome.exe"),
        (102, "chrome.exe"),
        (103, "chrome.exe"),
        (200, "explorer.exe"),
    ]);
    let engine = engine(FakeCatalog::default(), processes);

    let outcome = engine.terminate(&app("chrome"));
    let (strategy, closed, denied, certainty) = terminated(&outcome);
    assert_eq!(strategy, "exact_executable");
    assert_eq!(closed, vec![101, 102, 103]);
    assert!(denied.is_empty());
    assert_eq!(certainty, Certainty::Confirmed);
    assert_eq!(outcome.strategies_run(), vec!["exact_executable"]);
    assert_eq!(engine.processes().remaining(), vec![200]);
}

#[test]
fn test_exact_success_skips_substring_strategy() {
    let processes = FakeProcesses::running(&[(1, "chrome.exe"), (2, "chromedriver.exe")]);
    let engine = engine(FakeCatalog::default(), processes);

    let outcome = engine.terminate(&app("chrome"));
    assert_eq!(outcome.strategies_run(), vec!["exact_executable"]);
    assert_eq!(engine.processes().remaining(), vec![2]);
}

#[test]
fn test_substring_strategy_runs_after_exact_finds_nothing() {
    let processes = FakeProcesses::running(&[(7, "Spotify.exe"), (8, "SpotifyWebHelper.exe")]);
    let engine = engine(FakeCatalog::default(), processes);

    let outcome = engine.terminate(&app("spotify"));
    let (strategy, closed, _, _) = terminated(&outcome);
    // "spotify.exe" matches exactly, case-insensitively
    assert_eq!(strategy, "exact_executable");
    assert_eq!(closed, vec![7]);

    let outcome = engine.terminate(&app("spotify"));
    let (strategy, closed, _, _) = terminated(&outcome);
    assert_eq!(strategy, "substring_name");
    assert_eq!(closed, vec![8]);
}

#[test]
fn test_close_obscureapp_runs_all_strategies_and_fails() {
    let processes = FakeProcesses::running(&[(1, "explorer.exe")]);
    let calls = processes.calls.clone();
    let mut processor = processor(FakeCatalog::default(), processes);

    let result = processor.process("close obscureapp").unwrap();
    let CommandResult::Resolved { outcome, .. } = result else {
        panic!("expected a resolution");
    };
    assert_eq!(
        outcome.strategies_run(),
        vec!["exact_executable", "substring_name", "name_or_title"]
    );
    let ResolutionOutcome::Failure(report) = &outcome else {
        panic!("expected failure");
    };
    assert_eq!(report.candidate_reasons().len(), 3);
    assert_eq!(calls.borrow().last().map(String::as_str), Some("fallback:obscureapp"));

    let text = written(&mut processor);
    assert!(text.contains("No running instances of 'obscureapp' found"));
    assert!(text.contains("Possible reasons:"));
}

#[test]
fn test_terminate_failure_is_repeatable() {
    let engine = engine(FakeCatalog::default(), FakeProcesses::running(&[(1, "explorer.exe")]));

    let first = engine.terminate(&app("obscureapp"));
    let second = engine.terminate(&app("obscureapp"));
    assert!(!first.is_success());
    assert_eq!(first, second);
}

#[test]
fn test_permission_denied_does_not_block_other_matches() {
    let processes = FakeProcesses {
        protected: vec![11],
        ..FakeProcesses::running(&[(10, "chrome.exe"), (11, "chrome.exe"), (12, "chrome.exe")])
    };
    let mut processor = processor(FakeCatalog::default(), processes);

    let result = processor.process("close chrome").unwrap();
    let CommandResult::Resolved { outcome, .. } = result else {
        panic!("expected a resolution");
    };
    let (strategy, closed, denied, _) = terminated(&outcome);
    assert_eq!(strategy, "exact_executable");
    assert_eq!(closed, vec![10, 12]);
    assert_eq!(denied, vec![11]);
    assert_eq!(processor.engine().processes().remaining(), vec![11]);

    let text = written(&mut processor);
    assert!(text.contains("Closed chrome.exe (PID: 10)"));
    assert!(text.contains("Access denied to close chrome.exe"));
    assert!(text.contains("Successfully closed chrome"));
}

#[test]
fn test_only_protected_matches_fall_through() {
    let processes = FakeProcesses {
        protected: vec![5],
        ..FakeProcesses::running(&[(5, "antivirus.exe")])
    };
    let engine = engine(FakeCatalog::default(), processes);

    let ResolutionOutcome::Failure(report) = engine.terminate(&app("antivirus")) else {
        panic!("expected failure");
    };
    assert!(matches!(
        &report.attempts[0].reason,
        AttemptFailure::AccessDenied(denied) if denied[0].pid == 5
    ));
    assert_eq!(report.candidate_reasons().len(), 4);
}

#[test]
fn test_window_title_fallback_is_only_assumed() {
    let processes = FakeProcesses::running(&[(40, "ApplicationFrameHost.exe")]);
    processes.table.borrow_mut()[0].window_title = Some("Calculator".to_string());
    let mut processor = processor(FakeCatalog::default(), processes);

    let result = processor.process("close calculator").unwrap();
    let CommandResult::Resolved { outcome, .. } = result else {
        panic!("expected a resolution");
    };
    let (strategy, closed, _, certainty) = terminated(&outcome);
    assert_eq!(strategy, "name_or_title");
    assert!(closed.is_empty());
    assert_eq!(certainty, Certainty::Assumed);
    assert!(written(&mut processor).contains("Attempted to close calculator (not verified)"));
}

#[test]
fn test_unknown_command_shows_help_without_os_calls() {
    let catalog = FakeCatalog::default();
    let processes = FakeProcesses::default();
    let (app_calls, process_calls) = (catalog.calls.clone(), processes.calls.clone());
    let mut processor = processor(catalog, processes);

    let result = processor.process("banana").unwrap();
    assert_eq!(result, CommandResult::Help { text: "banana".to_string() });
    assert!(app_calls.borrow().is_empty());
    assert!(process_calls.borrow().is_empty());
    assert!(written(&mut processor).starts_with("Available commands:"));
}

#[test]
fn test_missing_app_name_never_reaches_adapters() {
    let catalog = FakeCatalog::default();
    let processes = FakeProcesses::default();
    let (app_calls, process_calls) = (catalog.calls.clone(), processes.calls.clone());
    let mut processor = processor(catalog, processes);

    assert_eq!(
        processor.process("open").unwrap(),
        CommandResult::MissingAppName { action: Action::Launch }
    );
    assert_eq!(
        processor.process("close   ").unwrap(),
        CommandResult::MissingAppName { action: Action::Terminate }
    );
    assert!(app_calls.borrow().is_empty());
    assert!(process_calls.borrow().is_empty());
    assert_eq!(
        written(&mut processor),
        "Please specify which application to open\nPlease specify which application to close\n"
    );
}

#[test]
fn test_result_serializes_for_json_output() {
    let mut processor = processor(
        FakeCatalog::default(),
        FakeProcesses::running(&[(3, "chrome.exe")]),
    );
    let result = processor.process("close chrome").unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["result"], "resolved");
    assert_eq!(json["action"], "terminate");
    assert_eq!(json["app"], "chrome");
    assert_eq!(json["outcome"]["outcome"], "success");
    assert_eq!(json["outcome"]["descriptor"]["report"]["certainty"], "confirmed");
    assert_eq!(json["outcome"]["descriptor"]["report"]["terminated"][0]["pid"], 3);
}
