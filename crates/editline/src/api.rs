//! Entry-point symbol table for a loaded libedit.

use std::ffi::c_void;
use std::sync::Arc;

use editline_ffi as ffi;
use libloading::os::unix::Library;

use crate::dl;
use crate::error::{EditError, EditResult};

/// Every libedit entry point the binding calls, resolved once per
/// initialization attempt.
///
/// `el_set_hist`/`el_set_prompt_esc` are two call shapes of the single
/// `el_set` symbol, and `history_set_size`/`history_enter` two shapes of the
/// single `history` symbol; the op code passed at call time selects which
/// shape the native side reads.
#[derive(Debug)]
pub(crate) struct LibEditApi {
    pub el_init: ffi::ElInitFn,
    pub el_gets: ffi::ElGetsFn,
    pub el_end: ffi::ElEndFn,
    pub el_set_hist: ffi::ElSetHistFn,
    pub el_set_prompt_esc: ffi::ElSetPromptEscFn,
    pub history_init: ffi::HistoryInitFn,
    pub history_end: ffi::HistoryEndFn,
    pub history_set_size: ffi::HistorySetSizeFn,
    pub history_enter: ffi::HistoryEnterFn,
    soname: String,
    // The function pointers above point into this mapping; it must outlive
    // them, so the table owns the library handle.
    _lib: Library,
}

impl LibEditApi {
    pub fn load() -> EditResult<Arc<Self>> {
        Self::load_from(ffi::LIBEDIT_SONAME)
    }

    pub fn load_from(soname: &str) -> EditResult<Arc<Self>> {
        let lib = dl::open_loading(soname)?;
        let api = LibEditApi {
            el_init: entry(&lib, soname, ffi::SYM_EL_INIT)?,
            el_gets: entry(&lib, soname, ffi::SYM_EL_GETS)?,
            el_end: entry(&lib, soname, ffi::SYM_EL_END)?,
            el_set_hist: entry(&lib, soname, ffi::SYM_EL_SET)?,
            el_set_prompt_esc: entry(&lib, soname, ffi::SYM_EL_SET)?,
            history_init: entry(&lib, soname, ffi::SYM_HISTORY_INIT)?,
            history_end: entry(&lib, soname, ffi::SYM_HISTORY_END)?,
            history_set_size: entry(&lib, soname, ffi::SYM_HISTORY)?,
            history_enter: entry(&lib, soname, ffi::SYM_HISTORY)?,
            soname: soname.to_string(),
            _lib: lib,
        };
        log::debug!("resolved libedit entry points from '{soname}'");
        Ok(Arc::new(api))
    }

    pub fn soname(&self) -> &str {
        &self.soname
    }
}

/// Resolve one typed entry point from `lib`.
fn entry<T: Copy>(lib: &Library, soname: &str, symbol: &'static [u8]) -> EditResult<T> {
    // Safety: T is always one of the extern "C" fn-pointer aliases declared
    // in editline-ffi for this exact symbol.
    let sym = unsafe { lib.get::<T>(symbol) }.map_err(|e| {
        let name = symbol_name(symbol);
        log::debug!("entry point '{name}' missing from '{soname}': {e}");
        EditError::SymbolNotFound {
            symbol: name,
            library: soname.to_string(),
        }
    })?;
    Ok(*sym)
}

/// Resolve the raw address of libedit's `history` function from an
/// already-resident copy of the library, for installation through `EL_HIST`.
/// The caller's symbol table keeps the mapping alive after the temporary
/// handle opened here is dropped.
pub(crate) fn history_fn_addr(soname: &str) -> EditResult<*const c_void> {
    let lib = dl::open_resident(soname)?;
    let sym = unsafe { lib.get::<*const c_void>(ffi::SYM_HISTORY) }.map_err(|e| {
        log::debug!("'history' missing from '{soname}': {e}");
        EditError::SymbolNotFound {
            symbol: symbol_name(ffi::SYM_HISTORY),
            library: soname.to_string(),
        }
    })?;
    let addr = sym.into_raw() as *const c_void;
    if addr.is_null() {
        return Err(EditError::SymbolNotFound {
            symbol: symbol_name(ffi::SYM_HISTORY),
            library: soname.to_string(),
        });
    }
    Ok(addr)
}

fn symbol_name(symbol: &[u8]) -> String {
    String::from_utf8_lossy(symbol.strip_suffix(b"\0").unwrap_or(symbol)).into_owned()
}
