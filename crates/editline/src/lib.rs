//! Safe dynamic bindings to the BSD editline (libedit) library.
//!
//! libedit is attached at run time rather than linked at build time: the
//! process's global stream handles are read out of the resident C runtime by
//! explicit symbol lookup, and every libedit entry point is resolved the
//! same way. Each resolved address is validated non-null before it is
//! dereferenced or called, so a missing library or symbol surfaces as a
//! recoverable error instead of a crash.
//!
//! Two independent native resources are exposed, each as an RAII handle:
//! [`Editor`] (an `el_init` session bound to the process streams) and
//! [`History`] (a `history_init` state). They are tied together only when
//! the caller passes both into [`Editor::set_hist_default_fn`].
//!
//! Native status codes are returned raw and never interpreted here; text
//! crossing the boundary is single-byte and null-terminated, and text owned
//! by libedit is copied immediately rather than retained or freed.

pub mod error;

#[cfg(unix)]
mod api;
#[cfg(unix)]
mod dl;
#[cfg(unix)]
mod prompt;

#[cfg(unix)]
pub mod editor;
#[cfg(unix)]
pub mod history;
#[cfg(unix)]
pub mod mock;
#[cfg(unix)]
pub mod stdio;

// Re-export commonly used types for convenience
pub use error::{EditError, EditResult};

#[cfg(unix)]
pub use editor::Editor;
#[cfg(unix)]
pub use history::History;
#[cfg(unix)]
pub use stdio::{resolve_std_streams, CRuntime, StdStreams, SymbolSource};
