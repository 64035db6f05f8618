//! Element types for lifecycle tests. A [`Ledger`] counts every [`Tracked`] value it has handed out,
//! so tests can check that nothing leaked and nothing was destroyed twice.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroSizedType;

#[derive(Debug, Default)]
pub struct Counts {
    pub live: isize,
    pub clones: usize,
    pub drops: usize,
    fail_countdown: Option<usize>,
}

/// A shared record of constructions and destructions.
#[derive(Debug, Clone, Default)]
pub struct Ledger(Rc<RefCell<Counts>>);

impl Ledger {
    pub fn new() -> Ledger {
        Ledger::default()
    }

    pub fn make(&self, value: i32) -> Tracked {
        self.0.borrow_mut().live += 1;
        Tracked {
            value,
            ledger: self.clone(),
        }
    }

    /// The number of values currently alive. Anything other than zero once every container has
    /// been dropped is a leak (positive) or a double drop (negative).
    pub fn live(&self) -> isize {
        self.0.borrow().live
    }

    pub fn clones(&self) -> usize {
        self.0.borrow().clones
    }

    pub fn drops(&self) -> usize {
        self.0.borrow().drops
    }

    /// Makes the `n`th clone from now panic, counting from 1.
    pub fn fail_on_clone(&self, n: usize) {
        assert!(n > 0);
        self.0.borrow_mut().fail_countdown = Some(n);
    }
}

#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    ledger: Ledger,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let mut counts = self.ledger.0.borrow_mut();

        let fail = match counts.fail_countdown {
            Some(1) => {
                counts.fail_countdown = None;
                true
            },
            Some(n) => {
                counts.fail_countdown = Some(n - 1);
                false
            },
            None => false,
        };

        if fail {
            drop(counts);
            panic!("injected clone failure");
        }

        counts.clones += 1;
        counts.live += 1;
        drop(counts);

        Tracked {
            value: self.value,
            ledger: self.ledger.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let mut counts = self.ledger.0.borrow_mut();
        counts.live -= 1;
        counts.drops += 1;
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
