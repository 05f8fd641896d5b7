//! azure-alerts CLI - set up an Azure Monitor alert with a notification target.

use std::io::{BufRead, IsTerminal, StdinLock, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use azure_alerts::alert_rule::DEFAULT_QUERY;
use azure_alerts::arm::{ARM_BASE_URL, DEFAULT_TIMEOUT_SECS};
use azure_alerts::config::DEFAULT_CONFIG_PATH;
use azure_alerts::{
    ui, AzureCliTokenProvider, DeploymentConfig, NotificationChannel, ProvisionRequest,
    Provisioner, StaticTokenProvider, TokenProvider,
};

/// Create an Azure Monitor action group and a scheduled query alert rule.
#[derive(Parser)]
#[command(name = "azure-alerts", version)]
#[command(about = "Provision an Azure Monitor action group and log alert rule")]
struct Cli {
    /// Deployment config file (JSON).
    #[arg(short, long, env = "AZURE_ALERTS_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Notification type: `email` or `sms` (prompted if omitted).
    #[arg(short = 'n', long)]
    notification_type: Option<String>,

    /// Email address or phone number to notify (prompted if omitted).
    #[arg(short, long)]
    target: Option<String>,

    /// Kusto query for the alert rule (prompted if omitted).
    #[arg(short, long)]
    query: Option<String>,

    /// Timeout in seconds for each ARM request.
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Azure Resource Manager base URL.
    #[arg(long, env = "AZURE_ALERTS_ARM_URL", default_value = ARM_BASE_URL, hide = true)]
    arm_url: String,

    /// Use this bearer token instead of asking the Azure CLI.
    #[arg(long, env = "AZURE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Azure CLI executable.
    #[arg(long, default_value = "az")]
    az_path: String,

    /// Print the requests without sending them.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("info,azure_alerts=debug")
        } else {
            EnvFilter::new("warn,azure_alerts=info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    ui::print_banner();

    let config = DeploymentConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    debug!(?config, "Loaded deployment config");

    let request = prompt_request(&cli)?;

    let provisioner = Provisioner::new(config)
        .with_base_url(&cli.arm_url)
        .with_timeout(Duration::from_secs(cli.timeout));

    if cli.dry_run {
        let plan = provisioner.plan(&request)?;
        ui::print_plan(&plan);
        return Ok(());
    }

    let tokens: Box<dyn TokenProvider> = match cli.access_token {
        Some(token) => Box::new(StaticTokenProvider::new(token)),
        None => Box::new(AzureCliTokenProvider::new(cli.az_path)),
    };

    let outcome = provisioner.run(tokens.as_ref(), &request).await?;
    ui::print_complete(&outcome);
    Ok(())
}

/// Reads answers from a terminal via dialoguer, or line by line when input
/// is piped.
enum Prompter {
    Terminal(ColorfulTheme),
    Lines(StdinLock<'static>),
}

impl Prompter {
    fn detect() -> Self {
        if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
            Self::Terminal(ColorfulTheme::default())
        } else {
            Self::Lines(std::io::stdin().lock())
        }
    }

    /// Ask for one trimmed answer. An empty answer falls back to `default`.
    fn ask(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
        match self {
            Self::Terminal(theme) => {
                let mut input = Input::<String>::with_theme(&*theme).with_prompt(prompt);
                if let Some(default) = default {
                    input = input.default(default.to_string());
                }
                Ok(input.interact_text()?.trim().to_string())
            }
            Self::Lines(stdin) => {
                print!("{prompt}: ");
                std::io::stdout().flush()?;

                let mut line = String::new();
                stdin
                    .read_line(&mut line)
                    .with_context(|| format!("Failed to read '{prompt}'"))?;
                println!();

                match (line.trim(), default) {
                    ("", Some(default)) => Ok(default.to_string()),
                    ("", None) => bail!("No answer given for '{prompt}'"),
                    (answer, _) => Ok(answer.to_string()),
                }
            }
        }
    }
}

/// Collect operator input, prompting for anything not given as a flag.
///
/// The notification type is validated here, before any token or network call.
fn prompt_request(cli: &Cli) -> Result<ProvisionRequest> {
    let mut prompter = None;
    let mut ask = |prompt: &str, default: Option<&str>| {
        prompter
            .get_or_insert_with(Prompter::detect)
            .ask(prompt, default)
    };

    let notification_type = match &cli.notification_type {
        Some(value) => value.clone(),
        None => ask("Notify by email or sms?", None)?,
    };
    let channel: NotificationChannel = notification_type.parse()?;

    let target = match &cli.target {
        Some(value) => value.trim().to_string(),
        None => {
            let prompt = match channel {
                NotificationChannel::Email => "Email address",
                NotificationChannel::Sms => "Phone number",
            };
            ask(prompt, None)?
        }
    };

    let query = match &cli.query {
        Some(value) => value.trim().to_string(),
        None => ask("Kusto query for the alert rule", Some(DEFAULT_QUERY))?,
    };

    Ok(ProvisionRequest {
        channel,
        target,
        query,
    })
}
