use commands::command_argument_builder;
use sitefix::handlers::{handle_fix, handle_generate, handle_validate, print_banner};
use tracing::Level;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let banner = match chosen_command.subcommand_name() {
        Some("fix") => "🔧 TJMUN Website Path Fixer",
        Some("validate") => "🔍 TJMUN Awards Page Link Validator",
        Some("generate") => "📄 TJMUN Website Template Generator",
        _ => "sitefix",
    };
    if !quiet {
        print_banner(banner);
    }

    match chosen_command.subcommand() {
        Some(("fix", primary_command)) => handle_fix(primary_command),
        Some(("validate", primary_command)) => handle_validate(primary_command).await,
        Some(("generate", primary_command)) => handle_generate(primary_command),
        None => {
            // No subcommand provided, point at the help
            println!("Run `sitefix --help` for available commands.");
        }
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
