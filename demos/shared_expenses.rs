//! Shared Expenses Example
//!
//! This example plays the part of a front-end driving the ledger:
//! - Creating groups and users
//! - Posting payments and refunds that reorder the group
//! - Asking who has paid the least and what happened recently
//! - Removing a user along with its history

use rust_decimal_macros::dec;
use splitledger::{format_amount, Amount, Ledger, LedgerError, LogLevel};

fn print_users(ledger: &Ledger, group: &str) -> Result<(), LedgerError> {
    for user in ledger.list_users(group)? {
        println!("  {:<6} {:>8}", user.name(), format_amount(user.balance()));
    }
    Ok(())
}

fn print_recent(ledger: &Ledger, group: &str, n: usize) -> Result<(), LedgerError> {
    for tx in ledger.recent(group, n)? {
        println!("  {}", tx);
    }
    Ok(())
}

fn post(ledger: &mut Ledger, group: &str, user: &str, amount: Amount) -> Result<(), LedgerError> {
    ledger.post_transaction(group, user, amount)?;
    println!("{} posts {}", user, format_amount(amount));
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Shared Expenses Example ===\n");

    let mut ledger = Ledger::builder()
        .with_journal_level(LogLevel::Debug)
        .with_groups(["dorm", "trip"])
        .build()?;

    for name in ["amy", "bob", "cas"] {
        ledger.add_user("dorm", name)?;
    }

    post(&mut ledger, "dorm", "amy", dec!(10.00))?;
    println!("\nUsers by balance:");
    print_users(&ledger, "dorm")?;
    println!("Least paid: {}\n", ledger.least_paid("dorm")?.join(" "));

    post(&mut ledger, "dorm", "amy", dec!(-15.00))?;
    post(&mut ledger, "dorm", "bob", dec!(7.25))?;
    println!("\nUsers by balance:");
    print_users(&ledger, "dorm")?;

    println!("\nRecent transactions:");
    print_recent(&ledger, "dorm", 10)?;

    let removal = ledger.remove_user("dorm", "bob")?;
    println!(
        "\nRemoved {} ({} transactions purged)",
        removal.user.name(),
        removal.purged
    );
    print_recent(&ledger, "dorm", 10)?;

    match ledger.least_paid("trip") {
        Ok(names) => println!("\nLeast paid on trip: {}", names.join(" ")),
        Err(e) => println!("\nLeast paid on trip: {}", e),
    }

    println!("\nGroups:");
    for group in ledger.list_groups() {
        println!("  {}", group);
    }

    println!("\nJournal:");
    for entry in ledger.journal().entries() {
        println!(
            "  [{:?}] {:?} {}/{} {}",
            entry.level,
            entry.operation,
            entry.group.as_deref().unwrap_or("-"),
            entry.user.as_deref().unwrap_or("-"),
            entry.message
        );
    }

    Ok(())
}
