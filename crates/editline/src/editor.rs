//! The editor-session handle.

use std::ffi::{CStr, CString};
use std::ptr::NonNull;
use std::sync::Arc;

use editline_ffi as ffi;
use libc::c_int;

use crate::api::{self, LibEditApi};
use crate::error::{EditError, EditResult};
use crate::history::History;
use crate::prompt;
use crate::stdio::{self, CRuntime};

/// An editor session bound to the process's standard streams.
///
/// Initialization attaches to the resident C runtime, resolves the global
/// stream handles, loads libedit, and calls `el_init`. The native handle is
/// released by `el_end` when the value goes out of scope on any path, and
/// move semantics make use after teardown unrepresentable.
///
/// A session is single-threaded; the `&mut` receivers serialize all use.
#[derive(Debug)]
pub struct Editor {
    raw: NonNull<ffi::EditLine>,
    api: Arc<LibEditApi>,
    // libedit does not document whether it copies the program name, so it is
    // kept alive for the whole session.
    _prog: CString,
}

impl Editor {
    /// Create an editor session using the default library sonames.
    pub fn new(prog: &str) -> EditResult<Self> {
        Self::with_libraries(prog, ffi::LIBC_SONAME, ffi::LIBEDIT_SONAME)
    }

    /// Create an editor session, naming the C runtime to resolve stream
    /// globals from and the editline library to load.
    pub fn with_libraries(prog: &str, libc_soname: &str, libedit_soname: &str) -> EditResult<Self> {
        let prog = CString::new(prog)?;
        let runtime = CRuntime::open_named(libc_soname)?;
        let streams = stdio::resolve_std_streams(&runtime)?;
        let api = LibEditApi::load_from(libedit_soname)?;

        // Safety: the stream handles were resolved and checked above, and
        // the prog pointer outlives the call.
        let raw = unsafe { (api.el_init)(prog.as_ptr(), streams.stdin, streams.stdout, streams.stderr) };
        let raw =
            NonNull::new(raw).ok_or(EditError::HandleCreationFailed { call: "el_init" })?;
        log::debug!("editor session initialized for '{}'", prog.to_string_lossy());
        Ok(Self {
            raw,
            api,
            _prog: prog,
        })
    }

    /// Read one line, blocking the calling thread until a line is available
    /// or input ends.
    ///
    /// Returns the decoded text together with the native character count, or
    /// `None` at end of input. The text includes the line terminator when
    /// one was read. The native buffer is copied immediately; libedit keeps
    /// ownership of the original and it is never freed here.
    pub fn read_line(&mut self) -> Option<(String, usize)> {
        let mut count: c_int = 0;
        let ptr = unsafe { (self.api.el_gets)(self.raw.as_ptr(), &mut count) };
        if ptr.is_null() {
            return None;
        }
        let text = unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned();
        Some((text, count.max(0) as usize))
    }

    /// Install libedit's own history function as this editor's history
    /// callback, wired to `hist`'s state.
    ///
    /// The `history` entry point is re-resolved from the already-resident
    /// libedit at call time. Returns the raw `el_set` status code, which is
    /// not interpreted here.
    pub fn set_hist_default_fn(&mut self, hist: &History) -> EditResult<c_int> {
        let func = api::history_fn_addr(self.api.soname())?;
        Ok(unsafe { (self.api.el_set_hist)(self.raw.as_ptr(), ffi::EL_HIST, func, hist.raw()) })
    }

    /// Install `prompt` as the escaped-prompt callback, with `esc` as the
    /// literal-sequence escape character.
    ///
    /// The callback stays registered, and therefore alive, until the editor
    /// is dropped. Returns the raw `el_set` status code.
    pub fn set_prompt_esc<F>(&mut self, prompt: F, esc: u8) -> c_int
    where
        F: Fn() -> String + Send + 'static,
    {
        prompt::register(self.raw.as_ptr(), Box::new(prompt));
        unsafe {
            (self.api.el_set_prompt_esc)(
                self.raw.as_ptr(),
                ffi::EL_PROMPT_ESC,
                prompt::trampoline,
                esc as c_int,
            )
        }
    }

    /// Tear the session down now instead of at end of scope.
    pub fn end(self) {}
}

impl Drop for Editor {
    fn drop(&mut self) {
        prompt::unregister(self.raw.as_ptr());
        // Safety: the handle is live here; no further use is possible.
        unsafe { (self.api.el_end)(self.raw.as_ptr()) };
        log::debug!("editor session ended");
    }
}
