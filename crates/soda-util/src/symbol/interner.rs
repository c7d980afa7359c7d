//! The interner backing [`Symbol`](super::Symbol).
//!
//! Single-threaded: the front-end pipeline runs on one thread end to end, so
//! a `RefCell<FxHashMap<...>>` behind a `thread_local!` is enough — no need
//! for a concurrent map.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

pub(super) struct Interner {
    strings: Vec<&'static str>,
    names: FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        let mut interner = Interner {
            strings: Vec::new(),
            names: FxHashMap::default(),
        };
        for kw in super::KEYWORDS {
            interner.intern(kw);
        }
        interner
    }

    fn intern(&mut self, string: &str) -> u32 {
        if let Some(&index) = self.names.get(string) {
            return index;
        }
        let index = self.strings.len() as u32;
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        self.strings.push(leaked);
        self.names.insert(leaked, index);
        index
    }

    fn get(&self, index: u32) -> Option<&'static str> {
        self.strings.get(index as usize).copied()
    }

    fn len(&self) -> usize {
        self.strings.len()
    }
}

thread_local! {
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::new());
}

pub(super) fn intern(string: &str) -> u32 {
    INTERNER.with(|cell| cell.borrow_mut().intern(string))
}

pub(super) fn resolve(index: u32) -> &'static str {
    INTERNER.with(|cell| cell.borrow().get(index)).unwrap_or("")
}

pub(super) fn len() -> usize {
    INTERNER.with(|cell| cell.borrow().len())
}
