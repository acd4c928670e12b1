use crate::model::ResidentAccount;
use std::fmt::Write;

/// Relevé texte : en-tête, une ligne par transaction avec solde cumulé, puis totaux.
pub fn render_statement(account: &ResidentAccount) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}) | {} | {}",
        account.resident_name,
        account.resident_id.as_str(),
        account.address,
        account.site
    );
    for line in account.statement() {
        let _ = writeln!(
            out,
            "{} | {} | {} | {:.2} | {:.2}",
            line.date.format("%Y-%m-%d"),
            line.kind,
            line.concept,
            line.amount,
            line.balance
        );
    }
    let summary = account.summary();
    let _ = writeln!(
        out,
        "Cargos: {:.2} | Pagos: {:.2} | Saldo: {:.2} ({})",
        summary.total_charges, summary.total_payments, summary.balance, summary.status
    );
    out
}
