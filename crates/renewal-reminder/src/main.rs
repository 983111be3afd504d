use clap::Parser;
use serde::Serialize;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use renewal_reminder::config::{Args, Command};
use renewal_reminder::{db, eligibility, jobs, migrate, Params, Phase};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("renewal_reminder={},info", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Printing the seed needs no database.
    if let Command::Jobs = args.command {
        return print_json(&jobs::DEFAULT_JOBS);
    }

    let db = db::connect(&args.database()?).await?;

    match args.command {
        Command::Migrate { steps } => {
            let report = migrate::migrate(&db, steps).await?;
            print_json(&report)
        }
        Command::InstallJobs { domain_id } => {
            let report = jobs::install_jobs(&db, domain_id).await?;
            print_json(&report)
        }
        Command::Mappings => {
            let registry = eligibility::boot_registry(&db).await?;
            print_json(&registry.descriptors())
        }
        Command::Eligible { schedule_id, phase } => {
            let registry = eligibility::boot_registry(&db).await?;
            let mut params = Params::new();
            params.insert("casActionScheduleId".to_string(), schedule_id.into());
            let eligible = eligibility::evaluate_schedule(
                &db,
                &registry,
                schedule_id,
                &Phase::new(phase),
                &params,
            )
            .await?;
            print_json(&eligible)
        }
        Command::Jobs => Ok(()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
