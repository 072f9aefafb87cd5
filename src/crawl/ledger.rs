// src/crawl/ledger.rs
// =============================================================================
// The visitation ledger: normalized URL -> how many times it was referenced.
//
// Every crawl task goes through `try_register` before fetching anything. The
// ceiling check, the "seen before?" check and the insert happen under ONE
// lock acquisition, which rules out two races:
// - two tasks finding the same new link at once and both fetching it
// - several tasks passing a stale "still under the ceiling" check and
//   pushing the ledger past max_pages together
//
// The lock is a std::sync::Mutex, not tokio's: it is only ever held across a
// HashMap lookup/insert, never across an .await.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

// Result of offering a key to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// First sighting: the caller owns this page and should fetch it
    Registered,
    /// Already known: its count went up by one, nothing else to do
    AlreadySeen,
    /// The ledger is full: nothing was changed
    CeilingReached,
}

#[derive(Debug)]
pub struct Ledger {
    ceiling: usize,
    pages: Mutex<HashMap<String, usize>>,
}

impl Ledger {
    pub fn new(ceiling: usize) -> Self {
        Self {
            ceiling,
            pages: Mutex::new(HashMap::new()),
        }
    }

    // Offers a normalized URL to the ledger
    //
    // Once the ceiling is reached nothing changes any more, not even the
    // counts of pages that are already in the ledger.
    pub fn try_register(&self, key: &str) -> Registration {
        let mut pages = self.lock();

        if pages.len() >= self.ceiling {
            return Registration::CeilingReached;
        }

        match pages.get_mut(key) {
            Some(count) => {
                *count += 1;
                Registration::AlreadySeen
            }
            None => {
                pages.insert(key.to_string(), 1);
                Registration::Registered
            }
        }
    }

    // Copies the ledger out as (url, count) pairs, in no particular order
    //
    // Meant to be called once the crawl has drained; calling it mid-crawl
    // works but gives a moving picture.
    pub fn snapshot(&self) -> Vec<(String, usize)> {
        self.lock()
            .iter()
            .map(|(url, count)| (url.clone(), *count))
            .collect()
    }

    // A panic elsewhere can't leave the map half-updated (every critical
    // section is a single insert or increment), so a poisoned lock is safe
    // to keep using.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, usize>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
