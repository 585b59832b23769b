//! In-process expense store.
//!
//! Records live for the lifetime of the process. Ids are assigned from a
//! sequential counter and never reused, even after a delete.
use std::collections::BTreeMap;

use api_types::expense::Expense;
use tokio::sync::RwLock;

pub use error::EngineError;

mod error;
mod expenses;
mod summary;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Id given to the first expense of a fresh engine.
pub const FIRST_ID: i64 = 1;

#[derive(Debug)]
struct Ledger {
    /// `None` once `i64::MAX` has been handed out.
    next_id: Option<i64>,
    expenses: BTreeMap<i64, Expense>,
}

impl Ledger {
    fn allocate_id(&mut self) -> ResultEngine<i64> {
        let id = self.next_id.ok_or(EngineError::IdsExhausted(i64::MAX))?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }
}

/// Shared expense store. Every operation takes the lock once, so operations
/// never observe each other half done.
#[derive(Debug)]
pub struct Engine {
    ledger: RwLock<Ledger>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// The builder for `Engine`
#[derive(Debug)]
pub struct EngineBuilder {
    first_id: i64,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self { first_id: FIRST_ID }
    }
}

impl EngineBuilder {
    /// Id handed to the first created expense.
    pub fn first_id(mut self, id: i64) -> EngineBuilder {
        self.first_id = id;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            ledger: RwLock::new(Ledger {
                next_id: Some(self.first_id),
                expenses: BTreeMap::new(),
            }),
        }
    }
}
