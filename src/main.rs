use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use vip_video_parser::commands::{
    check_url, get_current_url, list_parse_apis, list_platforms, parse_video, visit_platform,
    EntryCommand, EntrySession, ENTRY_HELP,
};
use vip_video_parser::utils::browser::SystemBrowser;
use vip_video_parser::utils::logging::{init_tracing, with_bootstrap_logging};
use vip_video_parser::{AppConfig, AppError, AppResult, AppState};

#[derive(Parser)]
#[command(name = "vip-parser")]
#[command(about = "Find video page links and open them with a parse service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a link is a supported video page
    Check {
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open a link with a parse service
    Parse {
        url: String,

        /// Parse service index or name (defaults to the configured one)
        api: Option<String>,
    },

    /// Copy the URL from the browser, optionally parse it
    Detect {
        /// Parse service to open the detected link with
        api: Option<String>,
    },

    /// Open a video platform's homepage
    Visit {
        /// Platform index or name (defaults to the configured one)
        platform: Option<String>,
    },

    /// List video platforms
    Platforms,

    /// List parse services
    Apis,

    /// Interactive link entry with undo/redo
    Entry,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = with_bootstrap_logging(AppConfig::load).unwrap_or_else(|error| {
        eprintln!("Warning: {error:#}. Using default configuration");
        AppConfig::default()
    });
    init_tracing(Some(&config.advanced.log_level));

    let state = match AppState::from_config(config) {
        Ok(state) => state,
        Err(error) => {
            eprintln!("Error: {error:#}");
            std::process::exit(1);
        }
    };
    info!("🚀 {} v{}", vip_video_parser::NAME, vip_video_parser::VERSION);

    if let Err(error) = run(&state, cli.command).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(state: &AppState, command: Commands) -> AppResult<()> {
    match command {
        Commands::Check { url, json } => {
            let check = check_url(state, &url);
            if json {
                let json = serde_json::to_string_pretty(&check)
                    .map_err(|e| AppError::System(e.to_string()))?;
                println!("{json}");
            } else if let Some(domain) = &check.domain {
                println!("✅ Supported video page ({domain})");
            } else {
                let domains: Vec<&str> = state.classifier.domains().collect();
                println!("❌ Not a supported video page");
                println!("Supported sites: {}", domains.join(", "));
            }
        }
        Commands::Parse { url, api } => {
            let parse_url = parse_video(state, &SystemBrowser, &url, api.as_deref()).await?;
            println!("{parse_url}");
        }
        Commands::Detect { api } => {
            let detector = state.autodetector();
            let url = get_current_url(detector.as_ref()).await?;
            println!("{url}");
            if let Some(api) = api {
                let parse_url = parse_video(state, &SystemBrowser, &url, Some(&api)).await?;
                println!("{parse_url}");
            }
        }
        Commands::Visit { platform } => {
            let platform = visit_platform(state, &SystemBrowser, platform.as_deref()).await?;
            println!("{} {}", platform.name, platform.url);
        }
        Commands::Platforms => {
            for (index, platform) in list_platforms(state).iter().enumerate() {
                println!("{:>2}. {}  {}", index + 1, platform.name, platform.url);
            }
        }
        Commands::Apis => {
            for (index, api) in list_parse_apis(state).iter().enumerate() {
                println!("{:>2}. {}", index + 1, api);
            }
        }
        Commands::Entry => run_entry(state).await?,
    }

    Ok(())
}

async fn run_entry(state: &AppState) -> AppResult<()> {
    let mut session = EntrySession::new(state);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{ENTRY_HELP}");
    println!(
        "History keeps the last {} edits",
        session.entry().history().capacity()
    );
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<EntryCommand>() {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            EntryCommand::Text(text) => {
                session.set_text(&text);
            }
            EntryCommand::Undo => {
                if session.entry().history().can_undo() {
                    session.undo();
                } else {
                    eprintln!("Nothing to undo");
                }
                println!("> {}", session.text());
            }
            EntryCommand::Redo => {
                if session.entry().history().can_redo() {
                    session.redo();
                } else {
                    eprintln!("Nothing to redo");
                }
                println!("> {}", session.text());
            }
            EntryCommand::Show => println!("> {}", session.text()),
            EntryCommand::Check => {
                let check = check_url(state, &session.text());
                println!("supported: {}", check.supported);
            }
            EntryCommand::Detect => {
                let detector = state.autodetector();
                match get_current_url(detector.as_ref()).await {
                    Ok(url) => {
                        session.set_text(&url);
                        println!("> {url}");
                    }
                    Err(error) => eprintln!("{error}"),
                }
            }
            EntryCommand::Parse(api) => {
                match parse_video(state, &SystemBrowser, &session.text(), api.as_deref()).await {
                    Ok(parse_url) => println!("{parse_url}"),
                    Err(error) => eprintln!("{error}"),
                }
            }
            EntryCommand::Help => println!("{ENTRY_HELP}"),
            EntryCommand::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_in_any_position() {
        let url = "https://v.qq.com/x/cover/a.html";
        let cli = Cli::try_parse_from(["vip-parser", "check", "--json", url]).unwrap();
        assert!(matches!(cli.command, Commands::Check { json: true, .. }));

        let cli = Cli::try_parse_from(["vip-parser", "check", url, "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { json: true, .. }));

        let cli = Cli::try_parse_from(["vip-parser", "check", url]).unwrap();
        assert!(matches!(cli.command, Commands::Check { json: false, .. }));
    }

    #[test]
    fn test_parse_requires_url() {
        let error = Cli::try_parse_from(["vip-parser", "parse"]).err().unwrap();
        assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let args = ["vip-parser", "parse", "https://www.iqiyi.com/v_1.html", "3"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Parse { url, api } => {
                assert_eq!(url, "https://www.iqiyi.com/v_1.html");
                assert_eq!(api.as_deref(), Some("3"));
            }
            _ => panic!("expected parse"),
        }
    }

    #[test]
    fn test_optional_arguments() {
        let cli = Cli::try_parse_from(["vip-parser", "detect"]).unwrap();
        assert!(matches!(cli.command, Commands::Detect { api: None }));

        let cli = Cli::try_parse_from(["vip-parser", "visit", "哔哩哔哩"]).unwrap();
        assert!(matches!(cli.command, Commands::Visit { platform: Some(_) }));

        assert!(Cli::try_parse_from(["vip-parser"]).is_err());
        assert!(Cli::try_parse_from(["vip-parser", "launch"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
