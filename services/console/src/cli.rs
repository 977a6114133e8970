use crate::demo::{run_demo, DemoArgs};
use crate::menu::Console;
use card_applications::applications::{
    ApplicationDesk, ApplicationQueue, FieldPolicy, KeyField, OutputFormat,
};
use card_applications::config::{AppConfig, QueueConfig};
use card_applications::error::AppError;
use card_applications::telemetry;
use clap::{Args, Parser, Subcommand};
use std::io;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "card-queue",
    about = "Manage a queue of credit card service applications from the terminal",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive application menu (default command)
    Menu(QueueArgs),
    /// Walk a fresh queue through submit, list, process, and delete
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct QueueArgs {
    /// Field used to match applications in search, update, and delete
    #[arg(long, value_parser = parse_key_field)]
    pub(crate) key_field: Option<KeyField>,
    /// What to do with values longer than their field allows (truncate or reject)
    #[arg(long, value_parser = parse_field_policy)]
    pub(crate) field_policy: Option<FieldPolicy>,
    /// Listing format (text, json, or csv)
    #[arg(long, value_parser = parse_output_format)]
    pub(crate) format: Option<OutputFormat>,
}

impl QueueArgs {
    pub(crate) fn apply(&self, queue: &mut QueueConfig) {
        if let Some(key_field) = self.key_field {
            queue.default_key = key_field;
        }
        if let Some(field_policy) = self.field_policy {
            queue.field_policy = field_policy;
        }
        if let Some(format) = self.format {
            queue.output = format;
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Menu(QueueArgs::default()));

    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Menu(args) => {
            args.apply(&mut config.queue);
            run_menu(&config)
        }
        Command::Demo(args) => run_demo(args, &config),
    }
}

fn run_menu(config: &AppConfig) -> Result<(), AppError> {
    let queue = &config.queue;
    info!(
        ?config.environment,
        key_field = %queue.default_key,
        policy = queue.field_policy.label(),
        "card application console ready"
    );

    let mut desk = ApplicationDesk::new(ApplicationQueue::new(), queue);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock(), queue.output);
    console.run(&mut desk)
}

fn parse_key_field(raw: &str) -> Result<KeyField, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

fn parse_field_policy(raw: &str) -> Result<FieldPolicy, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

fn parse_output_format(raw: &str) -> Result<OutputFormat, String> {
    raw.parse().map_err(|err| format!("{err}"))
}
