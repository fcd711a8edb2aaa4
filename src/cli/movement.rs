//! Movement CLI commands
//!
//! Implements adding, listing, removing and editing movements of the working
//! ledger, and showing its balance.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::audit::AuditEntry;
use crate::codec::Format;
use crate::display::{format_balance, format_movement_register, format_totals};
use crate::error::{BilancioError, BilancioResult};
use crate::ledger::MovementFilter;
use crate::models::{format_date, parse_date, parse_user_amount, Movement, MovementKind};

use super::session::Session;

/// Movement subcommands
#[derive(Subcommand)]
pub enum MovementCommands {
    /// Add a new movement
    Add {
        /// income or expense
        kind: MovementKind,
        /// Description
        description: String,
        /// Amount, never negative (e.g. "1500.00")
        amount: String,
        /// Date (dd/mm/yyyy), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List movements
    List {
        /// Only movements on this day (dd/mm/yyyy)
        #[arg(short, long, conflicts_with_all = ["from", "to"])]
        date: Option<String>,
        /// Start date, inclusive (dd/mm/yyyy)
        #[arg(long)]
        from: Option<String>,
        /// End date, inclusive (dd/mm/yyyy)
        #[arg(long)]
        to: Option<String>,
        /// Only movements of this kind
        #[arg(short, long)]
        kind: Option<MovementKind>,
        /// Only movements whose description contains this text (any case)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show income, expense and balance totals
    Balance,
    /// Remove a movement by its number in `list`
    Remove {
        /// Row number as shown by `list` without filters
        number: usize,
        /// Only remove a movement of the same kind
        #[arg(long)]
        exact: bool,
    },
    /// Replace a movement by its number in `list`
    Edit {
        /// Row number as shown by `list` without filters
        number: usize,
        /// New kind
        #[arg(short, long)]
        kind: Option<MovementKind>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (dd/mm/yyyy)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a movement command
pub fn handle_movement_command(session: &mut Session, cmd: MovementCommands) -> BilancioResult<()> {
    match cmd {
        MovementCommands::Add {
            kind,
            description,
            amount,
            date,
        } => {
            let date = date.unwrap_or_else(today);
            let format = session.ledger_file.format();
            let movement =
                parse_movement_input(format, kind, &date, &description, &amount)?;

            session.store.add(movement.clone());
            session.save()?;
            session.audit(AuditEntry::add(session.ledger_name(), &movement))?;

            println!("Added {}: {}", movement.kind(), movement);
            println!("{}", format_balance(session.store.balance()?));
        }

        MovementCommands::List {
            date,
            from,
            to,
            kind,
            search,
        } => {
            let movements = if let Some(date) = date {
                session.store.by_date(parse_cli_date(&date)?)
            } else {
                let mut filter = MovementFilter::new();
                filter.start_date = from.as_deref().map(parse_cli_date).transpose()?;
                filter.end_date = to.as_deref().map(parse_cli_date).transpose()?;
                if let Some(kind) = kind {
                    filter = filter.kind(kind);
                }
                if let Some(key) = &search {
                    filter = filter.description_contains(key);
                }
                session.store.filter(&filter)
            };

            print!("{}", format_movement_register(&movements, session.currency()));
            println!("{}", format_balance(session.store.balance()?));
        }

        MovementCommands::Balance => {
            print!("{}", format_totals(&session.store.totals()?, session.currency()));
        }

        MovementCommands::Remove { number, exact } => {
            let target = movement_at(session, number)?;

            let removed = if exact {
                session.store.remove_exact(&target)
            } else {
                session.store.remove(&target)
            };
            if !removed {
                return Err(BilancioError::movement_not_found(target.to_string()));
            }

            session.save()?;
            session.audit(AuditEntry::remove(session.ledger_name(), &target))?;

            println!("Removed: {}", target);
            println!("{}", format_balance(session.store.balance()?));
        }

        MovementCommands::Edit {
            number,
            kind,
            description,
            amount,
            date,
        } => {
            let old = movement_at(session, number)?;

            let kind = kind.unwrap_or(old.kind());
            let date = date.unwrap_or_else(|| format_date(old.date()));
            let description = description.unwrap_or_else(|| old.description().to_string());
            let amount = amount.unwrap_or_else(|| old.amount().to_string());

            let format = session.ledger_file.format();
            session.store.remove_exact(&old);
            match parse_movement_input(format, kind, &date, &description, &amount) {
                Ok(new) => {
                    session.store.add(new.clone());
                    session.save()?;
                    session.audit(AuditEntry::edit(session.ledger_name(), &old, &new))?;

                    println!("Updated: {} -> {}", old, new);
                    println!("{}", format_balance(session.store.balance()?));
                }
                Err(e) => {
                    // The old movement goes back in, at the end of the ledger
                    session.store.add(old);
                    session.save()?;
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}

/// Build a movement from user-entered text
///
/// Every field must be filled in; the date is `dd/mm/yyyy` and the amount a
/// non-negative decimal. The description must be writable in `format`.
/// All failures are `InvalidArgument`.
pub fn parse_movement_input(
    format: Format,
    kind: MovementKind,
    date: &str,
    description: &str,
    amount: &str,
) -> BilancioResult<Movement> {
    if date.trim().is_empty() || description.trim().is_empty() || amount.trim().is_empty() {
        return Err(BilancioError::InvalidArgument(
            "all fields must be filled in".into(),
        ));
    }

    let date = parse_cli_date(date)?;
    let amount = parse_user_amount(amount)?;
    format.check_description(description)?;

    Movement::from_parts(kind, Some(date), Some(description.to_string()), Some(amount))
}

fn parse_cli_date(s: &str) -> BilancioResult<NaiveDate> {
    parse_date(s.trim()).map_err(|_| {
        BilancioError::InvalidArgument(format!("Invalid date format: '{}'. Use dd/mm/yyyy", s))
    })
}

fn movement_at(session: &Session, number: usize) -> BilancioResult<Movement> {
    number
        .checked_sub(1)
        .and_then(|i| session.store.iter().nth(i))
        .cloned()
        .ok_or_else(|| BilancioError::movement_not_found(format!("#{}", number)))
}

fn today() -> String {
    format_date(chrono::Local::now().date_naive())
}
