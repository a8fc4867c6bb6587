use std::path::PathBuf;
use structopt::StructOpt;

use winaudit::config::Config;
use winaudit::report;

/// Compliance statistics from the audit_monitor log
#[derive(StructOpt, Debug)]
#[structopt(name = "compliance_report", about = "Summarise audit_monitor logs into a compliance report")]
struct Opt {
    /// Path to configuration file
    #[structopt(short, long, default_value = "winaudit.toml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::from_args();
    winaudit::logging::init_console_logger();

    let config = Config::load_or_default(&opt.config)?;
    let log_path = &config.report.log_path;

    println!("Windows Compliance Report");
    println!("{}", "=".repeat(30));

    println!("\nReading log file: {}", log_path.display());
    let content = match report::read_log(log_path) {
        Some(content) if !content.is_empty() => content,
        _ => {
            println!("❌ Could not read log file. Exiting.");
            return Ok(());
        }
    };

    println!("Analyzing Windows compliance data");
    let tally = report::count_issues(&content);

    report::print_summary(&tally);

    println!("\nGenerating report...");
    report::generate_report(&tally, log_path, &config.report.output_path);

    println!("\n✅ Windows compliance reporting completed!");
    Ok(())
}
