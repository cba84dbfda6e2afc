//! Resolution of the C runtime's global stdio stream handles.
//!
//! The editor must be bound to the process's own `stdin`/`stdout`/`stderr`
//! `FILE*` values, which live as globals inside the resident C runtime and
//! have no compile-time symbols here. They are read out by explicit symbol
//! lookup: resolve the global's address, validate it non-null, then perform
//! the single dereference that yields the stream handle.

use std::ffi::c_void;
use std::ptr::NonNull;

use libc::FILE;
use libloading::os::unix::Library;

use crate::dl;
use crate::error::{EditError, EditResult};

/// A source of raw symbol addresses. This is the seam the tests mock out.
pub trait SymbolSource {
    /// Name of the backing library, used in error reports.
    fn library_name(&self) -> &str;

    /// Resolve `symbol` to its address, or `None` when the symbol is missing
    /// or resolves to a null value.
    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>>;
}

/// The process's resident C runtime.
pub struct CRuntime {
    lib: Library,
    soname: String,
}

impl CRuntime {
    /// Attach to the default C runtime soname.
    pub fn open() -> EditResult<Self> {
        Self::open_named(editline_ffi::LIBC_SONAME)
    }

    /// Attach to a specific C runtime soname. The library must already be
    /// resident in the process.
    pub fn open_named(soname: &str) -> EditResult<Self> {
        let lib = dl::open_resident(soname)?;
        Ok(Self {
            lib,
            soname: soname.to_string(),
        })
    }
}

impl SymbolSource for CRuntime {
    fn library_name(&self) -> &str {
        &self.soname
    }

    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>> {
        let mut name = symbol.as_bytes().to_vec();
        name.push(0);
        // Safety: the symbol is only handed out as an unparsed address; all
        // typed access happens behind later null checks.
        let sym = unsafe { self.lib.get::<*mut c_void>(&name) }.ok()?;
        NonNull::new(sym.into_raw().cast())
    }
}

/// The three process stream handles, borrowed only for the `el_init` call.
#[derive(Debug, Clone, Copy)]
pub struct StdStreams {
    pub stdin: *mut FILE,
    pub stdout: *mut FILE,
    pub stderr: *mut FILE,
}

/// Resolve the global stream handles from `source`.
///
/// Stops at the first symbol that fails to resolve; no address is
/// dereferenced before it has been validated.
pub fn resolve_std_streams(source: &dyn SymbolSource) -> EditResult<StdStreams> {
    let stdin = resolve_stream(source, editline_ffi::SYM_STDIN)?;
    let stdout = resolve_stream(source, editline_ffi::SYM_STDOUT)?;
    let stderr = resolve_stream(source, editline_ffi::SYM_STDERR)?;
    Ok(StdStreams {
        stdin,
        stdout,
        stderr,
    })
}

fn resolve_stream(source: &dyn SymbolSource, symbol: &str) -> EditResult<*mut FILE> {
    let addr = source.resolve(symbol).ok_or_else(|| {
        log::debug!(
            "stream global '{symbol}' missing from '{}'",
            source.library_name()
        );
        EditError::SymbolNotFound {
            symbol: symbol.to_string(),
            library: source.library_name().to_string(),
        }
    })?;
    // The symbol is the global variable itself; one dereference of the
    // checked address yields the FILE* value it holds.
    Ok(unsafe { *addr.cast::<*mut FILE>().as_ptr() })
}
