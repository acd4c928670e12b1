//! Grand livre des résidents : solde, relevé et cargos récurrents.

mod account;
mod balance;
mod recurring;
mod render;
mod types;

pub use balance::{classify, compute_balance, running_balance, summarize};
pub use recurring::{expand_recurring_charge, month_name_es};
pub use render::render_statement;
pub use types::{AccountSummary, BalanceStatus, StatementLine};
