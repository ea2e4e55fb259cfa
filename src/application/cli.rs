#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::LogTemplate;
use crate::domain::models::DEFAULT_TEMPLATE_FILE;
use crate::domain::services::actions::export_template;
use crate::domain::services::actions::help_text;
use crate::domain::services::Bubble;
use crate::domain::services::BubbleAlignment;
use crate::domain::services::ChatSession;
use crate::domain::services::Themes;
use crate::infrastructure::backends::AnalysisApi;

const ASK_FALLBACK_WIDTH: usize = 100;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn file_args(matches: &ArgMatches) -> Vec<path::PathBuf> {
    return matches
        .get_many::<String>("file")
        .map(|files| return files.map(path::PathBuf::from).collect())
        .unwrap_or_default();
}

async fn ask(text: &str, files: &[path::PathBuf]) -> Result<()> {
    let mut session = ChatSession::default();
    if let Some(warning) = session.stage_files(files) {
        eprintln!("{}", Paint::yellow(warning));
    }

    session.set_pending_text(text);
    let backend = AnalysisApi::default();
    if !session.send(&backend).await {
        bail!("Nothing to send. Pass a message or a JSON log file.");
    }

    let reply = match session.messages.last() {
        Some(reply) => reply,
        None => bail!("No reply was received"),
    };

    let width = crossterm::terminal::size()
        .map(|(width, _)| return usize::from(width))
        .unwrap_or(ASK_FALLBACK_WIDTH);
    let theme = Themes::get(&Config::get(ConfigKey::Theme))?;
    let lines = Bubble::new(reply, BubbleAlignment::Left, width).as_lines(&theme);
    println!("{}", Bubble::plain_text(&lines));

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for logchat")
        .hide(true)
        .subcommand(
            Command::new("themes").about("List all supported code highlighting themes.")
        )
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running logchat with environment variable RUST_LOG=logchat")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_template() -> Command {
    return Command::new("template")
        .about("Example of the JSON log format the analysis service expects.")
        .subcommand(Command::new("print").about("Outputs the log template to stdout."))
        .subcommand(
            Command::new("export")
                .about("Saves the log template to a file.")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .num_args(1)
                        .default_value(DEFAULT_TEMPLATE_FILE)
                        .help("Path to write the template to."),
                ),
        );
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiUrl.to_string())
        .long(ConfigKey::ApiUrl.to_string())
        .env("LOGCHAT_API_URL")
        .num_args(1)
        .help(format!(
            "Base URL of the log analysis service. [default: {}]",
            Config::default(ConfigKey::ApiUrl)
        ));
}

fn arg_backend_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
        .long(ConfigKey::BackendHealthCheckTimeout.to_string())
        .env("LOGCHAT_BACKEND_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(
            format!("Time to wait in milliseconds before timing out when health checking the log analysis service. [default: {}]", Config::default(ConfigKey::BackendHealthCheckTimeout)),
        );
}

fn arg_files() -> Arg {
    return Arg::new("file")
        .short('f')
        .long("file")
        .num_args(1)
        .action(ArgAction::Append)
        .help("JSON log file to stage. Can be passed multiple times.");
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start a new chat session.")
        .arg(arg_api_url())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_files());
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Send a single message and print the reply.")
        .arg(
            Arg::new("text")
                .help("Message to send.")
                .num_args(1)
                .required(true),
        )
        .arg(arg_api_url())
        .arg(arg_files());
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("logchat")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_ask())
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_template())
        .arg(arg_api_url())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_files())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("LOGCHAT_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::Theme.to_string())
                .short('t')
                .long(ConfigKey::Theme.to_string())
                .env("LOGCHAT_THEME")
                .num_args(1)
                .help(format!("Sets code syntax highlighting theme. [default: {}]", Config::default(ConfigKey::Theme)))
                .value_parser(PossibleValuesParser::new(Themes::list()))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .long(ConfigKey::Username.to_string())
                .env("LOGCHAT_USERNAME")
                .num_args(1)
                .help("Your user name displayed in all chat bubbles. Defaults to $USER.")
                .global(true),
        );
}

/// Handles every subcommand that doesn't need the terminal UI. Returns the
/// files to stage when the UI should start.
pub async fn parse() -> Result<Option<Vec<path::PathBuf>>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("themes", _)) => {
                    println!("{}", Themes::list().join("\n"));
                }
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_else(|| return path::PathBuf::from("."))
                        .join("logchat/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(None);
        }
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let text = subcmd_matches
                .get_one::<String>("text")
                .map(|text| return text.to_string())
                .unwrap_or_default();
            ask(&text, &file_args(subcmd_matches)).await?;
            return Ok(None);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(file_args(subcmd_matches)));
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(None);
        }
        Some(("template", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("print", _)) => {
                print!("{}", LogTemplate::text()?);
                return Ok(None);
            }
            Some(("export", export_matches)) => {
                let output = export_matches
                    .get_one::<String>("output")
                    .map(|output| return output.to_string())
                    .unwrap_or_else(|| return DEFAULT_TEMPLATE_FILE.to_string());
                export_template(path::Path::new(&output)).await?;
                println!("Saved template to {output}");
                return Ok(None);
            }
            _ => {
                subcommand_template().print_long_help()?;
                return Ok(None);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(Some(file_args(&matches)));
}
