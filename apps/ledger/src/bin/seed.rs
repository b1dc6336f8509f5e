//! # Seed Data Generator
//!
//! Populates a ledger database with a demo team and a month of sales.
//!
//! ## Usage
//! ```bash
//! # Seed last month into the configured database
//! cargo run -p showroom-ledger --bin seed
//!
//! # Specify database path and month
//! cargo run -p showroom-ledger --bin seed -- --db ./showroom.db --month 2025-03
//! ```
//!
//! ## Generated Data
//! - 1 admin and 3 collaborators
//! - 43 sales spread over the month, every fifth one a HALF deal, enough
//!   for the top seller to cross both tier thresholds
//!
//! Sales go through the same validation and ledger path as the dashboard,
//! so the frozen commissions are the real ones.

use std::env;
use std::path::PathBuf;

use chrono::{Duration, Utc};
use showroom_core::{FormValue, Money, NewSalesperson, Role, SaleSubmission, Salesperson, YearMonth};
use showroom_ledger::commands;
use showroom_ledger::config::LedgerConfig;
use showroom_ledger::state::ShowroomState;
use showroom_ledger::telemetry::init_tracing;

/// Demo team: (full name, username, role, sales this month)
const TEAM: &[(&str, &str, Role, usize)] = &[
    ("Dana Whitfield", "dana", Role::Admin, 20),
    ("Marcus Bell", "marcus", Role::Collaborator, 12),
    ("Priya Raman", "priya", Role::Collaborator, 7),
    ("Leo Santos", "leo", Role::Collaborator, 4),
];

/// (make, model, model year, list price in dollars)
const VEHICLES: &[(&str, &str, i32, i64)] = &[
    ("Toyota", "Camry", 2024, 28_500),
    ("Honda", "CR-V", 2024, 33_900),
    ("Ford", "F-150", 2023, 46_200),
    ("Chevrolet", "Equinox", 2022, 24_750),
    ("Hyundai", "Tucson", 2024, 29_300),
    ("Subaru", "Outback", 2021, 23_800),
    ("Nissan", "Altima", 2023, 25_400),
    ("Jeep", "Wrangler", 2024, 41_100),
];

const CUSTOMERS: &[&str] = &[
    "Avery Johnson",
    "Blake Nguyen",
    "Carmen Ortiz",
    "Devon Price",
    "Elena Brooks",
    "Frank Miller",
    "Grace Liu",
    "Hassan Ali",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config = LedgerConfig::from_env()?;
    let mut month = last_month();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--month" | "-m" => {
                if i + 1 < args.len() {
                    month = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Showroom Ledger Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (default: SHOWROOM_DB_PATH or data dir)");
                println!("  -m, --month <YYYY-MM> Month to fill with sales (default: last month)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Showroom Ledger Seed Data Generator");
    println!("===================================");
    println!("Database: {}", config.database_path.display());
    println!("Month:    {}", month);
    println!();

    let state = ShowroomState::open(config).await?;
    println!("✓ Connected to database");

    let existing = state.database().sales().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} sales", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let team = seed_team(&state).await?;
    println!("✓ Team ready ({} members)", team.len());

    let mut recorded = 0;
    let mut day = 0;
    for (member, (_, _, _, count)) in team.iter().zip(TEAM) {
        for n in 0..*count {
            let submission = demo_submission(member, month, day, n);
            match commands::sale::record_sale(&state.ledger, submission).await {
                Ok(_) => recorded += 1,
                Err(e) => eprintln!("Failed to record sale for {}: {}", member.username, e),
            }
            day += 1;
        }
    }
    println!("✓ Recorded {} sales", recorded);

    let summary = commands::summary::monthly_summary(&state.dashboard, &month.to_string()).await?;

    println!();
    println!("{} / {}", state.config.dealership_name, summary.year_month);
    println!("-------------------------------------------");
    for line in summary.per_salesperson.values() {
        println!(
            "  {:<16} {:>5} units  {:>12}",
            line.name,
            line.units,
            Money::from_cents(line.commission_cents).to_string()
        );
    }
    println!("-------------------------------------------");
    println!("  Units:      {}", summary.total_units);
    println!("  Revenue:    {}", Money::from_cents(summary.total_revenue_cents));
    println!("  Commission: {}", Money::from_cents(summary.total_commission_cents));

    state.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Creates the demo team, or reuses members already present.
async fn seed_team(state: &ShowroomState) -> Result<Vec<Salesperson>, Box<dyn std::error::Error>> {
    let mut team = Vec::with_capacity(TEAM.len());

    for (full_name, username, role, _) in TEAM {
        if let Some(existing) = state.database().salespeople().get_by_username(username).await? {
            team.push(existing);
            continue;
        }

        let input = NewSalesperson {
            full_name: full_name.to_string(),
            username: username.to_string(),
            email: format!("{}@showroom.test", username),
            role: *role,
        };
        team.push(commands::team::create_salesperson(&state.team, input).await?);
    }

    Ok(team)
}

/// Builds the `n`th demo sale for `member`, as the dashboard form would send it.
fn demo_submission(member: &Salesperson, month: YearMonth, day: usize, n: usize) -> SaleSubmission {
    let (make, model, year, list_price) = VEHICLES[(day + n) % VEHICLES.len()];
    let sale_date = month.start() + Duration::days((day % 28) as i64) + Duration::hours(9 + (n % 8) as i64);

    let sale_price = list_price - (n as i64 % 4) * 250;
    let cost_price = list_price - 2_000;
    let front_profit = sale_price - cost_price;
    let back_profit = 350 + (n as i64 % 5) * 125;

    SaleSubmission {
        salesperson_id: Some(FormValue::Text(member.id.clone())),
        stock_number: Some(FormValue::Text(format!("{}{:04}", &make[..1], 1000 + day))),
        vehicle_year: Some(FormValue::from(year)),
        vehicle_make: Some(make.into()),
        vehicle_model: Some(model.into()),
        sale_type: Some(if n % 5 == 4 { "HALF" } else { "FULL" }.into()),
        sale_date: Some(FormValue::Text(sale_date.to_rfc3339())),
        sale_price: Some(FormValue::Text(sale_price.to_string())),
        cost_price: Some(FormValue::Text(cost_price.to_string())),
        front_profit: Some(FormValue::Text(front_profit.to_string())),
        back_profit: Some(FormValue::Text(back_profit.to_string())),
        customer_name: Some(CUSTOMERS[day % CUSTOMERS.len()].into()),
    }
}

fn last_month() -> YearMonth {
    YearMonth::of(YearMonth::of(Utc::now()).start() - Duration::days(1))
}
