//! Paying recurring items month by month

use crate::error::BudgetResult;
use crate::models::ExpenseId;

use super::session::Session;
use super::{parse_date, parse_month};

/// Record that a fixed expense or subscription was paid for `month`
pub fn handle_pay(
    session: &mut Session,
    expense_id: &str,
    month: &str,
    paid_on: Option<&str>,
) -> BudgetResult<()> {
    let month = parse_month(month)?;
    let paid_on = paid_on.map(parse_date).transpose()?;
    let id = ExpenseId::from(expense_id);

    session.commit(|ledger| ledger.record_payment(&id, month, paid_on))?;

    match paid_on {
        Some(date) => println!("Recorded payment of {} for {} (paid {})", id, month, date),
        None => println!("Recorded payment of {} for {}", id, month),
    }
    Ok(())
}

/// Remove the payment record of a recurring item for `month`
pub fn handle_unpay(session: &mut Session, expense_id: &str, month: &str) -> BudgetResult<()> {
    let month = parse_month(month)?;
    let id = ExpenseId::from(expense_id);

    let removed = session.commit(|ledger| ledger.clear_payment(&id, month))?;

    if removed {
        println!("Cleared payment of {} for {}", id, month);
    } else {
        println!("{} had no payment recorded for {}", id, month);
    }
    Ok(())
}
