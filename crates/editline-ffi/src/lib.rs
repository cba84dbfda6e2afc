//! Raw ABI surface for the BSD editline (libedit) library.
//!
//! This crate provides declarations only: opaque handle types, the
//! `HistEvent` record, op-code constants, and typed aliases for every entry
//! point the binding resolves at run time. The safe wrapper lives in the
//! `editline` crate.

#![allow(non_camel_case_types)]

use libc::{c_char, c_int, c_void, FILE};

/// Opaque editor state returned by `el_init`.
#[repr(C)]
pub struct EditLine {
    _opaque: [u8; 0],
}

/// Opaque history state returned by `history_init`.
#[repr(C)]
pub struct HistoryState {
    _opaque: [u8; 0],
}

/// History event record used as an out-parameter by the `history` call.
///
/// The `str_` field borrows storage owned by libedit and must never be
/// freed or retained past the next `history` call on the same handle.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct HistEvent {
    pub num: c_int,
    pub str_: *const c_char,
}

// `history` writes both fields unconditionally, so the record layout must
// match the native one: an int padded up to pointer alignment, then a pointer.
static_assertions::const_assert_eq!(
    core::mem::size_of::<HistEvent>(),
    2 * core::mem::size_of::<*const c_char>()
);
static_assertions::const_assert_eq!(
    core::mem::align_of::<HistEvent>(),
    core::mem::align_of::<*const c_char>()
);

/// `el_set` operation installing a history function and its state (EL_HIST).
pub const EL_HIST: c_int = 10;

/// `el_set` operation installing the escaped-prompt callback (EL_PROMPT_ESC).
pub const EL_PROMPT_ESC: c_int = 21;

/// `history` operation setting the retained-entry limit (H_SETSIZE).
///
/// The `history` op codes are a separate enumeration from the `el_set` op
/// codes; the numeric overlap between [`H_ENTER`] and [`EL_HIST`] is
/// coincidental.
pub const H_SETSIZE: c_int = 1;

/// `history` operation appending a new entry (H_ENTER).
pub const H_ENTER: c_int = 10;

pub type ElInitFn = unsafe extern "C" fn(
    prog: *const c_char,
    fin: *mut FILE,
    fout: *mut FILE,
    ferr: *mut FILE,
) -> *mut EditLine;

pub type ElEndFn = unsafe extern "C" fn(el: *mut EditLine);

pub type ElGetsFn = unsafe extern "C" fn(el: *mut EditLine, count: *mut c_int) -> *const c_char;

/// Host-side prompt callback invoked by libedit during interactive rendering.
pub type PromptFn = unsafe extern "C" fn(el: *mut EditLine) -> *const c_char;

/// `el_set` call shape for [`EL_HIST`].
pub type ElSetHistFn = unsafe extern "C" fn(
    el: *mut EditLine,
    op: c_int,
    func: *const c_void,
    hist: *mut HistoryState,
) -> c_int;

/// `el_set` call shape for [`EL_PROMPT_ESC`].
///
/// The escape character is promoted to `int` by the variadic ABI.
pub type ElSetPromptEscFn =
    unsafe extern "C" fn(el: *mut EditLine, op: c_int, prompt: PromptFn, esc: c_int) -> c_int;

pub type HistoryInitFn = unsafe extern "C" fn() -> *mut HistoryState;

pub type HistoryEndFn = unsafe extern "C" fn(hist: *mut HistoryState);

/// `history` call shape for [`H_SETSIZE`].
pub type HistorySetSizeFn = unsafe extern "C" fn(
    hist: *mut HistoryState,
    ev: *mut HistEvent,
    op: c_int,
    size: c_int,
) -> c_int;

/// `history` call shape for [`H_ENTER`].
pub type HistoryEnterFn = unsafe extern "C" fn(
    hist: *mut HistoryState,
    ev: *mut HistEvent,
    op: c_int,
    line: *const c_char,
) -> c_int;

/// Entry-point symbol names, nul-terminated for direct symbol lookup.
pub const SYM_EL_INIT: &[u8] = b"el_init\0";
pub const SYM_EL_END: &[u8] = b"el_end\0";
pub const SYM_EL_GETS: &[u8] = b"el_gets\0";
pub const SYM_EL_SET: &[u8] = b"el_set\0";
pub const SYM_HISTORY_INIT: &[u8] = b"history_init\0";
pub const SYM_HISTORY_END: &[u8] = b"history_end\0";
pub const SYM_HISTORY: &[u8] = b"history\0";

/// C runtime globals holding the process-wide stdio `FILE*` values.
pub const SYM_STDIN: &str = "stdin";
pub const SYM_STDOUT: &str = "stdout";
pub const SYM_STDERR: &str = "stderr";

/// Default soname of the C runtime the stream globals are resolved from.
pub const LIBC_SONAME: &str = "libc.so.6";

/// Default soname of the editline library.
pub const LIBEDIT_SONAME: &str = "libedit.so.0";

/// Load flags for attaching to an already-resident library: resolve
/// immediately, never load independently.
#[cfg(unix)]
pub const RTLD_ATTACH: c_int = libc::RTLD_NOW | libc::RTLD_NOLOAD;
