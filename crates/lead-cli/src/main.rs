//! leadform - validate and submit landing-page leads from the command line

mod commands;
mod logging;

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::SubmitArgs;
use lead_form::{format_phone_number, ValidationMode};
use std::path::PathBuf;

fn cli() -> Command {
    Command::new("leadform")
        .version(lead_intake::VERSION)
        .about("Lead capture form toolkit")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a lead stored as JSON and print its field errors")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Lead form JSON document"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Require select fields to match the catalog"),
                ),
        )
        .subcommand(
            Command::new("submit")
                .about("Submit a lead to the intake endpoint")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Lead form JSON document"),
                )
                .arg(
                    Arg::new("url")
                        .long("url")
                        .value_name("URL")
                        .help("Intake endpoint, overriding config and environment"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("PATH")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("query")
                        .long("query")
                        .value_name("QUERY")
                        .help("Landing URL or query string carrying utm_* parameters"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Require select fields to match the catalog"),
                ),
        )
        .subcommand(
            Command::new("attribution")
                .about("Print the utm_* parameters carried by a URL or query string")
                .arg(Arg::new("location").required(true).value_name("URL_OR_QUERY")),
        )
        .subcommand(
            Command::new("format-phone")
                .about("Format a US phone number for display")
                .arg(Arg::new("raw").required(true).value_name("RAW")),
        )
}

fn mode(args: &ArgMatches) -> ValidationMode {
    if args.get_flag("strict") {
        ValidationMode::Strict
    } else {
        ValidationMode::Presence
    }
}

async fn run(matches: ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        Some(("validate", args)) => {
            let Some(file) = args.get_one::<PathBuf>("file") else {
                anyhow::bail!("missing lead file");
            };
            let errors = commands::validate(file, mode(args))?;
            println!("{}", serde_json::to_string_pretty(&errors)?);
            Ok(if errors.is_empty() { 0 } else { 1 })
        }
        Some(("submit", args)) => {
            let Some(file) = args.get_one::<PathBuf>("file") else {
                anyhow::bail!("missing lead file");
            };
            let report = commands::submit(SubmitArgs {
                config: args.get_one::<PathBuf>("config").map(PathBuf::as_path),
                url: args.get_one::<String>("url").map(String::as_str),
                query: args.get_one::<String>("query").map(String::as_str),
                strict: args.get_flag("strict"),
                ..SubmitArgs::new(file)
            })
            .await?;
            println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            Ok(if report.succeeded() { 0 } else { 1 })
        }
        Some(("attribution", args)) => {
            let location = args.get_one::<String>("location").map_or("", String::as_str);
            let params = commands::attribution(location);
            println!("{}", serde_json::to_string_pretty(&params)?);
            Ok(0)
        }
        Some(("format-phone", args)) => {
            let raw = args.get_one::<String>("raw").map_or("", String::as_str);
            println!("{}", format_phone_number(raw));
            Ok(0)
        }
        _ => unreachable!("clap requires a subcommand"),
    }
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    logging::init(matches.get_flag("json-logs"));

    match run(matches).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(error = %e, "leadform failed");
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn global_json_logs_flag_parses_after_subcommand() {
        let matches = cli()
            .try_get_matches_from(["leadform", "format-phone", "5551234567", "--json-logs"])
            .unwrap();
        assert!(matches.get_flag("json-logs"));
    }

    #[test]
    fn submit_collects_overrides() {
        let matches = cli()
            .try_get_matches_from([
                "leadform",
                "submit",
                "lead.json",
                "--url",
                "http://127.0.0.1:8080/leads",
                "--query",
                "utm_source=google",
                "--strict",
            ])
            .unwrap();
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "submit");
        assert_eq!(args.get_one::<String>("url").unwrap(), "http://127.0.0.1:8080/leads");
        assert_eq!(mode(args), ValidationMode::Strict);
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(cli().try_get_matches_from(["leadform"]).is_err());
    }
}
