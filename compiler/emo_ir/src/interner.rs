//! String interner for identifiers and emoji names.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Emoji presentation selector; ignored so that `⚪️` and `⚪` are one name.
const VARIATION_SELECTOR: char = '\u{FE0F}';

#[derive(Default)]
struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// String interner with O(1) lookup and equality.
///
/// # Thread Safety
/// A single `RwLock` guards the table. Interning takes the write lock only
/// when the string is new.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create an interner with the empty string and 🔴 pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner {
            table: RwLock::new(InternTable::default()),
        };
        let empty = interner.intern("");
        let global = interner.intern("🔴");
        debug_assert_eq!(empty, Name::EMPTY);
        debug_assert_eq!(global, Name::GLOBAL_NAMESPACE);
        interner
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` strings are interned.
    pub fn intern(&self, s: &str) -> Name {
        if s.contains(VARIATION_SELECTOR) {
            let normalized: String = s.chars().filter(|&c| c != VARIATION_SELECTOR).collect();
            return self.intern_normalized(&normalized);
        }
        self.intern_normalized(s)
    }

    fn intern_normalized(&self, s: &str) -> Name {
        if let Some(&name) = self.table.read().map.get(s) {
            return name;
        }

        let mut guard = self.table.write();
        // Another writer may have won the race.
        if let Some(&name) = guard.map.get(s) {
            return name;
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let raw = u32::try_from(guard.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded u32::MAX strings"));
        let name = Name::from_raw(raw);
        guard.strings.push(leaked);
        guard.map.insert(leaked, name);
        name
    }

    /// Look up the text of a `Name`.
    ///
    /// # Panics
    /// Panics if the name was produced by a different interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings[name.index()]
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
