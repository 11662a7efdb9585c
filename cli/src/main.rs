use clap::Parser;
use log::debug;
use std::path::PathBuf;

use cli::{Options, run};
use lookup::config::{default_max_concurrent_tasks, default_priority};
use lookup::{LookupConfig, Priority};

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
struct Args {
    /// JSON array of open parking and camera violation records
    #[arg(short = 'o', long)]
    open_parking: Vec<PathBuf>,

    /// JSON array of fiscal year violation records
    #[arg(short = 'f', long)]
    fiscal_year: Vec<PathBuf>,

    /// Fetches allowed to run at once
    #[arg(
        short = 'c',
        long,
        env = "LOOKUP_MAX_CONCURRENT_TASKS",
        default_value_t = default_max_concurrent_tasks()
    )]
    max_concurrent_tasks: usize,

    /// Queue priority for these lookups
    #[arg(
        short = 'p',
        long,
        env = "LOOKUP_DEFAULT_PRIORITY",
        default_value_t = default_priority(),
        allow_negative_numbers = true
    )]
    priority: Priority,

    /// Vehicles as PLATE:STATE or PLATE:STATE:TYPES
    #[arg(required = true)]
    identifiers: Vec<String>,
}

impl Args {
    fn config(&self) -> LookupConfig {
        LookupConfig {
            max_concurrent_tasks: self.max_concurrent_tasks,
            default_priority: self.priority,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.config();
    debug!("Looking up {} vehicles", args.identifiers.len());

    let reports = run(Options {
        open_parking: args.open_parking,
        fiscal_year: args.fiscal_year,
        config,
        identifiers: args.identifiers,
    })
    .await?;

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        unsafe {
            std::env::remove_var("LOOKUP_MAX_CONCURRENT_TASKS");
            std::env::remove_var("LOOKUP_DEFAULT_PRIORITY");
        }
    }

    #[test]
    fn test_defaults() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        let args = Args::try_parse_from(["cli", "abc1234:ny"]).unwrap();
        assert_eq!(args.config(), LookupConfig::default());
        assert_eq!(args.identifiers, ["abc1234:ny"]);
    }

    #[test]
    fn test_env_fallback_and_flag_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("LOOKUP_MAX_CONCURRENT_TASKS", "3");
            std::env::set_var("LOOKUP_DEFAULT_PRIORITY", "7");
        }

        let args = Args::try_parse_from(["cli", "abc1234:ny"]).unwrap();
        assert_eq!(args.config().max_concurrent_tasks, 3);
        assert_eq!(args.config().default_priority, 7);

        let args = Args::try_parse_from(["cli", "-c", "5", "-p", "-1", "abc1234:ny"]).unwrap();
        assert_eq!(args.config().max_concurrent_tasks, 5);
        assert_eq!(args.config().default_priority, -1);

        clear_env();
    }

    #[test]
    fn test_identifiers_are_required() {
        assert!(Args::try_parse_from(["cli"]).is_err());
    }
}
