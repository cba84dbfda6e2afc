//! Integration tests for the binding surface.
//!
//! Everything mock-driven runs anywhere. Tests that need a resident libedit
//! are `#[ignore]`d and run with `cargo test -- --ignored` on hosts that
//! have the library installed.

#![cfg(unix)]

use editline::mock::MockSymbolSource;
use editline::{resolve_std_streams, EditError, Editor, History};

const ABSENT_LIB: &str = "libeditline-test-definitely-absent.so.99";

#[test]
fn absent_c_runtime_fails_resource_unavailable() {
    let err = Editor::with_libraries("test", ABSENT_LIB, editline_ffi::LIBEDIT_SONAME).unwrap_err();
    match err {
        EditError::ResourceUnavailable { library, .. } => assert_eq!(library, ABSENT_LIB),
        other => panic!("expected ResourceUnavailable, got {other:?}"),
    }
}

#[cfg(target_os = "linux")]
#[test]
fn absent_libedit_fails_resource_unavailable() {
    // The C runtime resolves fine; the failure must name the editor library.
    let err = Editor::with_libraries("test", editline_ffi::LIBC_SONAME, ABSENT_LIB).unwrap_err();
    match err {
        EditError::ResourceUnavailable { library, .. } => assert_eq!(library, ABSENT_LIB),
        other => panic!("expected ResourceUnavailable, got {other:?}"),
    }
}

#[test]
fn program_name_with_interior_nul_is_rejected() {
    let err = Editor::new("bad\0name").unwrap_err();
    assert!(matches!(err, EditError::Nul(_)));
}

#[test]
fn absent_libedit_fails_history_init() {
    let err = History::with_library(ABSENT_LIB).unwrap_err();
    assert!(matches!(err, EditError::ResourceUnavailable { .. }));
}

#[test]
fn mocked_null_stream_stops_initialization() {
    let mut source = MockSymbolSource::new("mock-libc");
    source.provide_global("stdin", 0x1000);
    source.provide_null("stdout");
    source.provide_global("stderr", 0x3000);

    let err = resolve_std_streams(&source).unwrap_err();
    assert!(matches!(
        err,
        EditError::SymbolNotFound { ref symbol, .. } if symbol == "stdout"
    ));
    // Resolution stopped at the failed symbol; stderr was never touched.
    assert_eq!(source.lookups(), vec!["stdin", "stdout"]);
}

// The tests below exercise the real native library.

#[test]
#[ignore = "requires a resident libedit"]
fn editor_and_history_lifecycles_pair_cleanly() {
    let mut history = History::new().unwrap();
    assert_eq!(history.set_size(100), 0);
    assert_ne!(history.enter("first entry").unwrap(), -1);

    let mut editor = Editor::new("binding_test").unwrap();
    assert_eq!(editor.set_hist_default_fn(&history).unwrap(), 0);
    assert_eq!(editor.set_prompt_esc(|| "test> ".to_string(), 1), 0);

    // Teardown in either order must be clean; handles are independent.
    editor.end();
    history.end();
}

#[test]
#[ignore = "requires a resident libedit"]
fn history_truncates_to_the_configured_size() {
    let mut history = History::new().unwrap();
    assert_eq!(history.set_size(2), 0);
    for line in ["one", "two", "three", "four"] {
        assert_ne!(history.enter(line).unwrap(), -1);
    }
    // Native truncation to two entries is libedit's own contract; the
    // binding only checks that over-entering keeps succeeding.
}

#[test]
#[ignore = "requires a resident libedit"]
fn read_line_returns_text_then_end_of_input() {
    let mut fds = [0 as libc::c_int; 2];
    assert_eq!(unsafe { libc::pipe(fds.as_mut_ptr()) }, 0);
    let input = b"hello\n";
    let written =
        unsafe { libc::write(fds[1], input.as_ptr().cast(), input.len()) };
    assert_eq!(written, input.len() as isize);
    unsafe { libc::close(fds[1]) };

    // Swap the pipe in as fd 0 so the stdin FILE global reads from it.
    let saved_stdin = unsafe { libc::dup(0) };
    assert!(saved_stdin >= 0);
    assert_eq!(unsafe { libc::dup2(fds[0], 0) }, 0);
    unsafe { libc::close(fds[0]) };

    let mut editor = Editor::new("binding_test").unwrap();
    let (text, count) = editor.read_line().expect("one full line is buffered");
    assert_eq!(text, "hello\n");
    assert_eq!(count, text.len());

    // End of input: empty result, no error.
    assert!(editor.read_line().is_none());
    drop(editor);

    unsafe {
        libc::dup2(saved_stdin, 0);
        libc::close(saved_stdin);
    }
}
