//! Host-side prompt-escape callback plumbing.
//!
//! libedit hands the installed callback nothing but the raw editor pointer,
//! so registered closures live in a process-wide table keyed by that
//! pointer. Each entry caches its most recently rendered prompt; libedit
//! borrows the returned pointer only until the next prompt query on the same
//! editor, and the entry outlives the registration (it is removed when the
//! editor is dropped).

use std::collections::BTreeMap;
use std::ffi::CString;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Mutex;

use editline_ffi::EditLine;
use libc::c_char;

pub(crate) type PromptCallback = Box<dyn Fn() -> String + Send>;

struct Entry {
    callback: PromptCallback,
    rendered: CString,
}

static REGISTRY: Mutex<BTreeMap<usize, Entry>> = Mutex::new(BTreeMap::new());

pub(crate) fn register(el: *mut EditLine, callback: PromptCallback) {
    if let Ok(mut registry) = REGISTRY.lock() {
        registry.insert(
            el as usize,
            Entry {
                callback,
                rendered: CString::default(),
            },
        );
    }
}

pub(crate) fn unregister(el: *mut EditLine) {
    if let Ok(mut registry) = REGISTRY.lock() {
        registry.remove(&(el as usize));
    }
}

#[cfg(test)]
pub(crate) fn is_registered(el: *mut EditLine) -> bool {
    REGISTRY
        .lock()
        .map(|r| r.contains_key(&(el as usize)))
        .unwrap_or(false)
}

/// The function installed through `EL_PROMPT_ESC`. Must never unwind into
/// libedit, and must return a pointer that stays valid until the next query.
pub(crate) unsafe extern "C" fn trampoline(el: *mut EditLine) -> *const c_char {
    static EMPTY: [c_char; 1] = [0];

    let Ok(mut registry) = REGISTRY.lock() else {
        return EMPTY.as_ptr();
    };
    let Some(entry) = registry.get_mut(&(el as usize)) else {
        return EMPTY.as_ptr();
    };

    let text = panic::catch_unwind(AssertUnwindSafe(|| (entry.callback)())).unwrap_or_default();
    // Interior NULs cannot cross the boundary; the prompt ends at the first.
    let bytes: Vec<u8> = text.into_bytes().into_iter().take_while(|&b| b != 0).collect();
    entry.rendered = CString::new(bytes).unwrap_or_default();
    entry.rendered.as_ptr()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn fake_editor(tag: usize) -> *mut EditLine {
        tag as *mut EditLine
    }

    #[test]
    fn trampoline_renders_the_registered_callback() {
        let el = fake_editor(0x10);
        register(el, Box::new(|| "db> ".to_string()));
        let ptr = unsafe { trampoline(el) };
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
        assert_eq!(text, "db> ");
        unregister(el);
    }

    #[test]
    fn trampoline_survives_an_unregistered_editor() {
        let ptr = unsafe { trampoline(fake_editor(0x20)) };
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn trampoline_truncates_at_interior_nul() {
        let el = fake_editor(0x30);
        register(el, Box::new(|| "ok\0junk".to_string()));
        let ptr = unsafe { trampoline(el) };
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
        assert_eq!(text, "ok");
        unregister(el);
    }

    #[test]
    fn trampoline_swallows_a_panicking_callback() {
        let el = fake_editor(0x40);
        register(el, Box::new(|| panic!("prompt failure")));
        let ptr = unsafe { trampoline(el) };
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap();
        assert_eq!(text, "");
        unregister(el);
    }

    #[test]
    fn rerendering_replaces_the_cached_prompt() {
        let el = fake_editor(0x50);
        let counter = std::sync::atomic::AtomicUsize::new(0);
        register(
            el,
            Box::new(move || {
                let n = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                format!("[{n}]> ")
            }),
        );
        let first = unsafe { CStr::from_ptr(trampoline(el)) }
            .to_str()
            .unwrap()
            .to_string();
        let second = unsafe { CStr::from_ptr(trampoline(el)) }
            .to_str()
            .unwrap()
            .to_string();
        assert_eq!(first, "[0]> ");
        assert_eq!(second, "[1]> ");
        unregister(el);
    }

    #[test]
    fn unregister_removes_the_entry() {
        let el = fake_editor(0x60);
        register(el, Box::new(|| "x".to_string()));
        assert!(is_registered(el));
        unregister(el);
        assert!(!is_registered(el));
    }
}
