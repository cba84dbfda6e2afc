//! Shared-library open helpers.

use libc::c_int;
use libloading::os::unix::Library;

use crate::error::{EditError, EditResult};

/// Attach to a library the host process has already loaded.
///
/// Opens with `RTLD_NOW | RTLD_NOLOAD`, so a library that is not resident is
/// reported as [`EditError::ResourceUnavailable`] instead of being loaded
/// independently.
pub(crate) fn open_resident(soname: &str) -> EditResult<Library> {
    open_with_flags(soname, editline_ffi::RTLD_ATTACH)
}

/// Load a library, or attach to it if it is already resident.
pub(crate) fn open_loading(soname: &str) -> EditResult<Library> {
    open_with_flags(soname, libc::RTLD_NOW)
}

fn open_with_flags(soname: &str, flags: c_int) -> EditResult<Library> {
    // Safety: the sonames opened here are plain C libraries whose
    // initialization has no soundness requirements on the caller.
    match unsafe { Library::open(Some(soname), flags) } {
        Ok(lib) => {
            log::debug!("opened '{soname}' (flags {flags:#x})");
            Ok(lib)
        }
        Err(e) => {
            log::debug!("could not open '{soname}': {e}");
            Err(EditError::ResourceUnavailable {
                library: soname.to_string(),
                reason: e.to_string(),
            })
        }
    }
}
