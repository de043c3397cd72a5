use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use realty_payments::banks::{validate_bank_details, BankFormInput};
use realty_payments::batch::validate_csv;
use realty_payments::config::AppConfig;
use realty_payments::error::AppError;
use realty_payments::payments::{
    CreditFormInput, Eligibility, PaymentFormInput, PaymentPolicy, PaymentRuleEngine,
    PersistedPayment,
};
use realty_payments::telemetry;
use realty_payments::{Clock, FixedClock, SystemClock};
use serde::Serialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "realty-payments",
    about = "Validate collections payments and bank master data for the real-estate ERP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Customer payment rules
    Payment {
        #[command(subcommand)]
        command: PaymentCommand,
    },
    /// Manual credit adjustments
    Credit {
        #[command(subcommand)]
        command: CreditCommand,
    },
    /// Bank account master data
    Bank {
        #[command(subcommand)]
        command: BankCommand,
    },
    /// Validate a CSV export of payment forms, printing one JSON line per row
    Batch(BatchArgs),
}

#[derive(Subcommand, Debug)]
enum PaymentCommand {
    /// Validate a payment form (JSON)
    Validate(DatedInputArgs),
    /// Print the submission payload for a payment form (JSON)
    Format(InputArgs),
    /// Report whether a stored payment (JSON) may be edited or deleted
    Eligibility(EligibilityArgs),
}

#[derive(Subcommand, Debug)]
enum CreditCommand {
    /// Validate a credit adjustment form (JSON)
    Validate(InputArgs),
}

#[derive(Subcommand, Debug)]
enum BankCommand {
    /// Validate a bank account form (JSON)
    Validate(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Path to the JSON payload, or `-` for stdin
    input: PathBuf,
}

#[derive(Args, Debug)]
struct DatedInputArgs {
    /// Path to the JSON payload, or `-` for stdin
    input: PathBuf,
    /// Evaluate as of this date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct EligibilityArgs {
    /// Path to the stored payment JSON (`null` for a missing record), or `-` for stdin
    input: PathBuf,
    /// Evaluate at this instant (RFC 3339 or YYYY-MM-DDTHH:MM:SS, defaults to now)
    #[arg(long, value_parser = parse_instant)]
    now: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV file with a header row of payment form fields, or `-` for stdin
    input: PathBuf,
    /// Evaluate as of this date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct EligibilityResponse {
    edit: Eligibility,
    delete: Eligibility,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(?config.environment, "payment rules loaded");
    let policy = config.policy;

    match cli.command {
        Command::Payment { command } => run_payment(command, policy),
        Command::Credit {
            command: CreditCommand::Validate(args),
        } => {
            let form: CreditFormInput = serde_json::from_str(&read_input(&args.input)?)?;
            let engine = PaymentRuleEngine::new(policy);
            print_json(&engine.validate_credit_payment(&form))
        }
        Command::Bank {
            command: BankCommand::Validate(args),
        } => {
            let form: BankFormInput = serde_json::from_str(&read_input(&args.input)?)?;
            print_json(&validate_bank_details(&form))
        }
        Command::Batch(args) => run_batch(args, policy),
    }
}

fn run_payment(command: PaymentCommand, policy: PaymentPolicy) -> Result<(), AppError> {
    match command {
        PaymentCommand::Validate(args) => {
            let form: PaymentFormInput = serde_json::from_str(&read_input(&args.input)?)?;
            let clock = clock_for_day(args.today);
            let engine = PaymentRuleEngine::with_clock(policy, clock.as_ref());
            print_json(&engine.validate_payment_form(&form))
        }
        PaymentCommand::Format(args) => {
            let form: PaymentFormInput = serde_json::from_str(&read_input(&args.input)?)?;
            print_json(&PaymentRuleEngine::new(policy).format_payment_data(&form))
        }
        PaymentCommand::Eligibility(args) => {
            let payment: Option<PersistedPayment> =
                serde_json::from_str(&read_input(&args.input)?)?;
            let clock: Box<dyn Clock> = match args.now {
                Some(now) => Box::new(FixedClock::new(now)),
                None => Box::new(SystemClock),
            };
            let engine = PaymentRuleEngine::with_clock(policy, clock.as_ref());
            print_json(&EligibilityResponse {
                edit: engine.can_edit_payment(payment.as_ref()),
                delete: engine.can_delete_payment(payment.as_ref()),
            })
        }
    }
}

fn run_batch(args: BatchArgs, policy: PaymentPolicy) -> Result<(), AppError> {
    let clock = clock_for_day(args.today);
    let engine = PaymentRuleEngine::with_clock(policy, clock.as_ref());
    let csv = read_input(&args.input)?;

    for outcome in validate_csv(csv.as_bytes(), &engine)? {
        println!("{}", serde_json::to_string(&outcome)?);
    }
    Ok(())
}

fn clock_for_day(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock::at_date(date)),
        None => Box::new(SystemClock),
    }
}

fn read_input(path: &Path) -> Result<String, AppError> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }

    fs::read_to_string(path).map_err(|source| AppError::Input {
        path: path.to_path_buf(),
        source,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_instant(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .map_err(|err| format!("failed to parse '{raw}' as an instant ({err})"))
}
