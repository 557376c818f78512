//! Expense display formatting
//!
//! Register-style listings for fixed expenses, subscriptions and ad-hoc
//! expenses.

use crate::models::{AccountId, Expense, FixedExpense, Ledger, Money, Subscription};

use super::report::truncate;

fn account_name<'a>(ledger: &'a Ledger, id: &'a AccountId) -> &'a str {
    ledger
        .account(id)
        .map(|a| a.name.as_str())
        .unwrap_or(id.as_str())
}

/// Format fixed expenses as a register
pub fn format_fixed_list(ledger: &Ledger, fixed: &[FixedExpense], symbol: &str) -> String {
    if fixed.is_empty() {
        return "No fixed expenses.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:16} {:24} {:20} {:>3} {:>12} {:>5}\n",
        "ID", "Label", "Account", "Day", "Amount", "Paid"
    ));
    output.push_str(&"-".repeat(86));
    output.push('\n');

    for f in fixed {
        output.push_str(&format!(
            "{:16} {:24} {:20} {:>3} {:>12} {:>5}\n",
            truncate(f.id.as_str(), 16),
            truncate(&f.label, 24),
            truncate(account_name(ledger, &f.account_id), 20),
            f.due_day,
            f.amount.format_with_symbol(symbol),
            ledger.payment_count(&f.id),
        ));
    }

    output
}

/// Format subscriptions with their active window and billing cycle
pub fn format_subscription_list(
    ledger: &Ledger,
    subscriptions: &[Subscription],
    symbol: &str,
) -> String {
    if subscriptions.is_empty() {
        return "No subscriptions.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:16} {:24} {:20} {:>3} {:>12}  {:10} {:10}  {}\n",
        "ID", "Label", "Account", "Day", "Amount", "Start", "End", "Billing"
    ));
    output.push_str(&"-".repeat(118));
    output.push('\n');

    for s in subscriptions {
        let end = s
            .end_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open".to_string());
        output.push_str(&format!(
            "{:16} {:24} {:20} {:>3} {:>12}  {:10} {:10}  {}\n",
            truncate(s.id.as_str(), 16),
            truncate(&s.label, 24),
            truncate(account_name(ledger, &s.account_id), 20),
            s.due_day,
            s.amount.format_with_symbol(symbol),
            s.start_date,
            end,
            s.billing,
        ));
    }

    output
}

/// Format ad-hoc expenses as a register, with a total line
pub fn format_expense_list(ledger: &Ledger, expenses: &[&Expense], symbol: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:2} {:10} {:16} {:24} {:20} {:>12}\n",
        "", "Date", "ID", "Label", "Account", "Amount"
    ));
    output.push_str(&"-".repeat(89));
    output.push('\n');

    for e in expenses {
        output.push_str(&format!(
            "{:2} {:10} {:16} {:24} {:20} {:>12}\n",
            if e.paid { "✓" } else { " " },
            e.date,
            truncate(e.id.as_str(), 16),
            truncate(&e.label, 24),
            truncate(account_name(ledger, &e.account_id), 20),
            e.amount.format_with_symbol(symbol),
        ));
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&"-".repeat(89));
    output.push('\n');
    output.push_str(&format!(
        "{:2} {:10} {:16} {:24} {:20} {:>12}\n",
        "",
        "",
        "",
        format!("{} expense(s)", expenses.len()),
        "TOTAL",
        total.format_with_symbol(symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new(2026);
        ledger.add_account(Account::new("A1", "Joint")).unwrap();
        ledger
            .add_fixed_expense(FixedExpense::new("rent", "A1", "Rent", Money::from_cents(50000), 1))
            .unwrap();
        ledger
            .add_subscription(
                Subscription::new("vpn", "A1", "VPN", Money::from_cents(1299), date(2026, 1, 1))
                    .with_end_date(date(2026, 6, 30)),
            )
            .unwrap();
        ledger
            .add_expense(Expense::new("taxi", "A1", "Taxi", Money::from_cents(1250), date(2026, 2, 10)).paid())
            .unwrap();
        ledger
            .add_expense(Expense::new("gift", "A1", "Gift", Money::from_cents(3000), date(2026, 3, 1)))
            .unwrap();
        ledger
    }

    #[test]
    fn test_format_fixed_list() {
        let ledger = sample_ledger();
        let output = format_fixed_list(&ledger, ledger.fixed_expenses(), "€");
        assert!(output.contains("Rent"));
        assert!(output.contains("€500.00"));
        assert!(output.contains("Joint"));
    }

    #[test]
    fn test_format_subscription_list() {
        let ledger = sample_ledger();
        let output = format_subscription_list(&ledger, ledger.subscriptions(), "€");
        assert!(output.contains("2026-06-30"));
        assert!(output.contains("monthly"));
    }

    #[test]
    fn test_format_expense_list() {
        let ledger = sample_ledger();
        let expenses: Vec<&Expense> = ledger.expenses().iter().collect();
        let output = format_expense_list(&ledger, &expenses, "€");

        assert!(output.contains("✓"));
        assert!(output.contains("2 expense(s)"));
        assert!(output.contains("€42.50"));
    }

    #[test]
    fn test_empty_lists() {
        let ledger = Ledger::new(2026);
        assert_eq!(format_fixed_list(&ledger, &[], "€"), "No fixed expenses.\n");
        assert_eq!(format_subscription_list(&ledger, &[], "€"), "No subscriptions.\n");
        assert_eq!(format_expense_list(&ledger, &[], "€"), "No expenses found.\n");
    }
}
