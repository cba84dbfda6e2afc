//! Mock symbol source for testing.

use std::collections::HashMap;
use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::Mutex;

use crate::stdio::SymbolSource;

/// Scriptable symbol table that records every lookup in order.
///
/// Globals registered through [`provide_global`](Self::provide_global) get
/// backing storage owned by the mock, so resolving one yields a real,
/// dereferenceable address whose pointed-to value is the fake handle.
pub struct MockSymbolSource {
    name: String,
    symbols: HashMap<String, usize>,
    lookups: Mutex<Vec<String>>,
    // Keeps the fake globals' storage alive and its addresses stable.
    storage: Vec<Box<usize>>,
}

impl MockSymbolSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            symbols: HashMap::new(),
            lookups: Mutex::new(Vec::new()),
            storage: Vec::new(),
        }
    }

    /// A mock C runtime with all three stream globals populated.
    pub fn with_std_streams(name: &str) -> Self {
        let mut source = Self::new(name);
        source.provide_global(editline_ffi::SYM_STDIN, 0x1000);
        source.provide_global(editline_ffi::SYM_STDOUT, 0x2000);
        source.provide_global(editline_ffi::SYM_STDERR, 0x3000);
        source
    }

    /// Register a global variable whose storage holds `value`.
    pub fn provide_global(&mut self, symbol: &str, value: usize) {
        let slot = Box::new(value);
        let addr = &*slot as *const usize as usize;
        self.storage.push(slot);
        self.symbols.insert(symbol.to_string(), addr);
    }

    /// Register a symbol that resolves to a null address.
    pub fn provide_null(&mut self, symbol: &str) {
        self.symbols.insert(symbol.to_string(), 0);
    }

    /// Every symbol name looked up so far, in lookup order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl SymbolSource for MockSymbolSource {
    fn library_name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, symbol: &str) -> Option<NonNull<c_void>> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(symbol.to_string());
        }
        self.symbols
            .get(symbol)
            .and_then(|&addr| NonNull::new(addr as *mut c_void))
    }
}
