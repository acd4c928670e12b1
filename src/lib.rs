#![forbid(unsafe_code)]
//! Condo Ops — planification des gardes et grand livre des résidents d'une copropriété.
//!
//! - Détection des agents déjà engagés ailleurs sur le même jour / turno.
//! - Solde des résidents en décimal fixe (cargos - pagos), cargos récurrents.
//! - Stockage fichier JSON (écriture atomique) derrière un trait `Repository`.
//! - Contexte d'appel explicite (administrateur, périmètre de résidences).

pub mod context;
pub mod ledger;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use context::{ActingContext, ScopeError};
pub use ledger::{
    classify, compute_balance, expand_recurring_charge, render_statement, running_balance, summarize,
    AccountSummary, BalanceStatus, StatementLine,
};
pub use model::{
    AdminId, Amount, Condo, DateRange, Guard, GuardId, LedgerTransaction, Period, PlannedShift,
    ResidentAccount, ResidentId, Roster, Site, SiteId, SlotKey, TransactionId, TransactionKind,
    ValidationError,
};
pub use scheduler::{
    detect_double_bookings, find_conflicts, Attribution, ConflictReport, DoubleBooking, Scheduler,
};
pub use storage::{JsonStorage, MemoryStorage, Repository, Storage};
