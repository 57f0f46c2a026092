//! site-controls command line
//!
//! Runs the page controllers headlessly: scripted visits against a page
//! fixture, plus small tools for the phone mask, field validation, booking
//! slots, countdowns and configuration.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}

// The browser build starts from `dom::web::start` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{bail, Context, Result};
    use chrono::Utc;
    use clap::{Parser as ClapParser, Subcommand};
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use site_controls::config::{Config, IssueKind};
    use site_controls::simulate::{Script, Simulation};
    use site_controls::widgets::{
        format_phone_input, form::validate_field, time_slot_options, CountdownDisplay,
        CountdownState, FieldKind, FieldSnapshot,
    };
    use site_controls::{Clock, PageFixture};

    #[derive(ClapParser)]
    #[command(name = "site-controls")]
    #[command(about = "Headless runner for the site widget controllers", long_about = None)]
    struct Cli {
        /// Configuration file path
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Where to write logs (level from RUST_LOG, default info)
        #[arg(long, value_name = "FILE", default_value = "site-controls.log")]
        log_file: PathBuf,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Play a scripted visit against a page fixture
        Simulate {
            /// TOML script of steps
            #[arg(value_name = "SCRIPT")]
            script: PathBuf,

            /// Page fixture (default: the bundled demo page)
            #[arg(long, value_name = "FILE")]
            page: Option<PathBuf>,

            /// Print the final page as JSON
            #[arg(long)]
            snapshot: bool,
        },
        /// Apply the phone mask to each input
        FormatPhone {
            #[arg(required = true)]
            inputs: Vec<String>,
        },
        /// Run the form validation rules against one value
        Validate {
            value: String,

            #[arg(long, value_enum, default_value = "text")]
            kind: FieldKindArg,

            #[arg(long)]
            required: bool,
        },
        /// Print the booking time-slot options
        Slots,
        /// Count down to END_DATE in real time
        Countdown {
            #[arg(value_name = "END_DATE")]
            end_date: String,

            /// Number of ticks to print
            #[arg(long, default_value_t = 5)]
            ticks: u32,
        },
        /// Print the effective configuration
        Config {
            /// Report problems instead of printing
            #[arg(long)]
            check: bool,
        },
    }

    #[derive(Clone, Copy, clap::ValueEnum)]
    enum FieldKindArg {
        Text,
        Email,
        Tel,
    }

    impl From<FieldKindArg> for FieldKind {
        fn from(kind: FieldKindArg) -> Self {
            match kind {
                FieldKindArg::Text => FieldKind::Other,
                FieldKindArg::Email => FieldKind::Email,
                FieldKindArg::Tel => FieldKind::Tel,
            }
        }
    }

    fn init_logging(path: &Path) -> Result<()> {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;

        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::sync::Mutex::new(log_file))
            .with_ansi(false)
            .init();
        Ok(())
    }

    pub fn main() -> Result<()> {
        let cli = Cli::parse();
        init_logging(&cli.log_file)?;

        let config = Config::load(cli.config.as_deref())?;

        match cli.command {
            Commands::Simulate {
                script,
                page,
                snapshot,
            } => simulate(&config, &script, page.as_deref(), snapshot),
            Commands::FormatPhone { inputs } => {
                for input in inputs {
                    println!("{}", format_phone_input(&input));
                }
                Ok(())
            }
            Commands::Validate {
                value,
                kind,
                required,
            } => validate(&config, value, kind.into(), required),
            Commands::Slots => {
                let options =
                    time_slot_options(&config.booking.time_slots, &config.messages.time_placeholder);
                for option in options {
                    println!("{:>10}  {}", format!("{:?}", option.value), option.label);
                }
                Ok(())
            }
            Commands::Countdown { end_date, ticks } => {
                let runtime = tokio::runtime::Runtime::new()?;
                runtime.block_on(countdown(&config, &end_date, ticks))
            }
            Commands::Config { check } => {
                if check {
                    check_config(&config)
                } else {
                    print!("{}", config.to_toml_string()?);
                    Ok(())
                }
            }
        }
    }

    fn simulate(config: &Config, script: &Path, page: Option<&Path>, snapshot: bool) -> Result<()> {
        let fixture = match page {
            Some(path) => PageFixture::load(path)?,
            None => PageFixture::demo()?,
        };
        let script = Script::load(script)?;

        let mut simulation = Simulation::new(&fixture, config, Clock::manual_at(Utc::now()));
        println!(
            "Attached: {}",
            simulation.page().controller_names().join(", ")
        );

        let reports = simulation.run(&script)?;
        for (index, report) in reports.iter().enumerate() {
            println!("{:>3}. {}", index + 1, report);
        }
        tracing::info!(steps = reports.len(), "simulation finished");

        if snapshot {
            println!("{}", simulation.snapshot_json()?);
        }
        Ok(())
    }

    fn validate(config: &Config, value: String, kind: FieldKind, required: bool) -> Result<()> {
        let field = FieldSnapshot::new(kind, required, value);
        let errors = validate_field(&field, &config.validation_messages());
        if errors.is_empty() {
            println!("✓ valid");
            return Ok(());
        }
        for error in &errors {
            println!("✗ {}", error);
        }
        bail!("{} rule(s) failed", errors.len())
    }

    async fn countdown(config: &Config, end_date: &str, ticks: u32) -> Result<()> {
        let state = CountdownState::from_attribute(end_date);
        if state.end_ms().is_none() {
            eprintln!("⚠ Warning: could not read {:?}, treating as expired", end_date);
        }

        let clock = Clock::System;
        let mut interval =
            tokio::time::interval(Duration::from_millis(config.timing.countdown_tick_ms.max(1)));
        for _ in 0..ticks {
            // First tick completes immediately
            interval.tick().await;
            let display = state.display_at(clock.now_millis());
            println!("{}", display.render(&config.messages.countdown_expired));
            if display == CountdownDisplay::Expired {
                tracing::debug!("countdown expired");
            }
        }
        Ok(())
    }

    fn check_config(config: &Config) -> Result<()> {
        let issues = config.check();
        let errors = issues
            .iter()
            .filter(|issue| issue.kind == IssueKind::Error)
            .count();
        let warnings = issues.len() - errors;

        for issue in &issues {
            match issue.kind {
                IssueKind::Error => eprintln!("✗ Error: {}: {}", issue.field, issue.message),
                IssueKind::Warning => eprintln!("⚠ Warning: {}: {}", issue.field, issue.message),
            }
        }

        if issues.is_empty() {
            println!("✓ Configuration is valid with no issues");
            return Ok(());
        }
        if errors > 0 {
            bail!("{} error(s), {} warning(s)", errors, warnings);
        }
        println!("✓ Configuration is usable ({} warning(s))", warnings);
        Ok(())
    }
}
