use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use structopt::StructOpt;

use winaudit::checker::{self, Checker, Mode};
use winaudit::config::Config;
use winaudit::{AuditLog, CheckError, ProcessRunner};

/// Windows password-expiration and update audit / monitor
#[derive(StructOpt, Debug)]
#[structopt(name = "audit_monitor", about = "Audit and monitor Windows password expiration and updates")]
struct Opt {
    /// Path to configuration file
    #[structopt(short, long, default_value = "winaudit.toml")]
    config: PathBuf,
    /// Skip the prompt: "audit" (1) or "monitor" (2)
    #[structopt(short, long)]
    mode: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::from_args();
    winaudit::logging::init_console_logger();

    let config = Config::load_or_default(&opt.config)?;
    let mut audit_log = AuditLog::open(&config.checker.log_path)?;

    if let Err(CheckError::WrongPlatform(os)) = checker::ensure_platform(std::env::consts::OS) {
        audit_log.error(&format!("Script run on non-Windows system: {}", os));
        println!("❌ This script is designed for Windows systems only.");
        println!("Current OS: {}", os);
        audit_log.flush()?;
        std::process::exit(1);
    }

    println!("Windows Audit and Monitor Script");
    println!("Password Expiration + Windows Updates");
    println!("{}", "=".repeat(45));

    let choice = match opt.mode {
        Some(mode) => mode.parse::<Mode>(),
        None => Mode::from_choice(&prompt_choice()?),
    };

    let runner = ProcessRunner::new(Duration::from_secs(config.checker.command_timeout_secs))?;
    let mut checker = Checker::new(runner, audit_log, &config.checker);

    // Graceful stop on Ctrl+C, monitor mode only
    let running = Arc::new(AtomicBool::new(true));
    if choice == Ok(Mode::Monitor) {
        let r = running.clone();
        ctrlc::set_handler(move || {
            log::debug!("Received interrupt, stopping monitor");
            r.store(false, Ordering::SeqCst);
        })?;
    }

    checker.run_choice(choice, &running);

    Ok(())
}

/// Show the mode menu and read one line from stdin
fn prompt_choice() -> io::Result<String> {
    println!("\nSelect mode:");
    println!("1. Audit (one-time check)");
    println!("2. Monitor (continuous)");
    print!("\nEnter choice (1 or 2): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
