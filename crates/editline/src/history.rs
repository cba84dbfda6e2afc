//! The history-state handle.

use std::ffi::CString;
use std::mem::MaybeUninit;
use std::ptr::NonNull;
use std::sync::Arc;

use editline_ffi as ffi;
use libc::c_int;

use crate::api::LibEditApi;
use crate::error::{EditError, EditResult};

/// Native history state, independent of any editor session.
///
/// A history is associated with an editor only by passing both into
/// [`Editor::set_hist_default_fn`](crate::Editor::set_hist_default_fn); the
/// editor never owns it. `history_end` runs when the value goes out of
/// scope on any path.
#[derive(Debug)]
pub struct History {
    raw: NonNull<ffi::HistoryState>,
    api: Arc<LibEditApi>,
}

impl History {
    /// Allocate native history state from the default libedit soname.
    pub fn new() -> EditResult<Self> {
        Self::with_library(ffi::LIBEDIT_SONAME)
    }

    /// Allocate native history state, naming the editline library to load.
    pub fn with_library(soname: &str) -> EditResult<Self> {
        let api = LibEditApi::load_from(soname)?;
        let raw = unsafe { (api.history_init)() };
        let raw =
            NonNull::new(raw).ok_or(EditError::HandleCreationFailed { call: "history_init" })?;
        Ok(Self { raw, api })
    }

    /// Set the maximum number of retained entries; older entries beyond the
    /// limit are truncated by the native side. Returns the raw status code.
    pub fn set_size(&mut self, size: c_int) -> c_int {
        let mut ev = MaybeUninit::<ffi::HistEvent>::uninit();
        unsafe {
            (self.api.history_set_size)(self.raw.as_ptr(), ev.as_mut_ptr(), ffi::H_SETSIZE, size)
        }
    }

    /// Append `line` as a new history entry. Returns the raw status code.
    pub fn enter(&mut self, line: &str) -> EditResult<c_int> {
        let line = CString::new(line)?;
        let mut ev = MaybeUninit::<ffi::HistEvent>::uninit();
        Ok(unsafe {
            (self.api.history_enter)(self.raw.as_ptr(), ev.as_mut_ptr(), ffi::H_ENTER, line.as_ptr())
        })
    }

    /// Tear the history state down now instead of at end of scope.
    pub fn end(self) {}

    pub(crate) fn raw(&self) -> *mut ffi::HistoryState {
        self.raw.as_ptr()
    }
}

impl Drop for History {
    fn drop(&mut self) {
        // Safety: the handle is live here; no further use is possible.
        unsafe { (self.api.history_end)(self.raw.as_ptr()) };
    }
}
