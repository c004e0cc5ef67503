use std::{
    io::Write,
    path::PathBuf,
};

use clap::{
    Parser,
    Subcommand,
};
use languagesaver::{
    dictionary::load_parsed,
    logging::init_logging,
    session,
    CyclePolicy,
    DisplayPair,
    LanguageSaverError,
    Level,
    SaverSettings,
    SettingsStore,
};
use tokio::io::{
    AsyncBufReadExt,
    BufReader,
};

#[derive(Parser)]
#[command(version, about = "Vocabulary flashcards in the terminal")]
struct Cli {
    /// Settings file (defaults to the user data directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cycle through entries until `q` is entered
    Run {
        #[arg(short, long, value_parser = parse_level)]
        level: Option<Level>,
        #[arg(short, long)]
        policy: Option<CyclePolicy>,
        /// Seconds between automatic advances
        #[arg(short, long)]
        interval: Option<u64>,
        #[arg(short, long)]
        resource_dir: Option<PathBuf>,
    },
    /// Store the level used by later runs
    SetLevel {
        #[arg(value_parser = parse_level)]
        level: Level,
    },
    /// Print the effective settings
    ShowConfig,
    /// Load a level's dictionary and report what was found
    Check {
        #[arg(short, long, value_parser = parse_level)]
        level: Option<Level>,
        #[arg(short, long)]
        resource_dir: Option<PathBuf>,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Next,
    Previous,
    Level(Level),
    Quit,
}

fn parse_level(s: &str) -> Result<Level, String> {
    let n: u32 = s.trim().parse().map_err(|_| format!("'{}' is not a level number", s))?;
    Level::new(n).map_err(|e| e.to_string())
}

fn parse_input(line: &str) -> Option<Input> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "n" | "next" => Some(Input::Next),
        "p" | "prev" => Some(Input::Previous),
        "q" | "quit" | "exit" => Some(Input::Quit),
        "level" => parts.next().and_then(|s| parse_level(s).ok()).map(Input::Level),
        _ => None,
    }
}

fn print_pair(pair: &DisplayPair) -> Result<(), LanguageSaverError> {
    let mut stdout = std::io::stdout();
    if pair.is_blank() {
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}\n  {}", pair.headword, pair.definition)?;
    }
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), LanguageSaverError> {
    init_logging();

    let cli = Cli::parse();
    let store = cli.settings.map(SettingsStore::at).unwrap_or_else(SettingsStore::default_location);

    match cli.command {
        Commands::Run { level, policy, interval, resource_dir } => {
            let mut settings = store.load_or_default();
            settings.level = level.unwrap_or(settings.level);
            settings.policy = policy.unwrap_or(settings.policy);
            settings.interval_secs = interval.unwrap_or(settings.interval_secs);
            settings.resource_dir = resource_dir.or(settings.resource_dir);
            run(settings).await
        }
        Commands::SetLevel { level } => {
            store.set_level(level)?;
            println!("Level set to {}", level);
            Ok(())
        }
        Commands::ShowConfig => {
            let settings = store.load_or_default();
            println!("{}", serde_json::to_string_pretty(&settings)?);
            println!("# settings file: {}", store.path().display());
            println!("# resource dir: {}", settings.resource_dir().display());
            Ok(())
        }
        Commands::Check { level, resource_dir } => {
            let mut settings = store.load_or_default();
            settings.level = level.unwrap_or(settings.level);
            settings.resource_dir = resource_dir.or(settings.resource_dir);
            check(&settings)
        }
    }
}

async fn run(settings: SaverSettings) -> Result<(), LanguageSaverError> {
    let provider = settings.provider();
    let handle = session::spawn(settings, provider);
    let mut display = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = display.changed() => {
                if changed.is_err() {
                    break;
                }
                let pair = display.borrow_and_update().clone();
                print_pair(&pair)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_input(&line) {
                    Some(Input::Next) => handle.forward().await?,
                    Some(Input::Previous) => handle.backward().await?,
                    Some(Input::Level(level)) => handle.reconfigure(level).await?,
                    Some(Input::Quit) => break,
                    None => {}
                }
            }
        }
    }

    handle.shutdown().await;
    Ok(())
}

fn check(settings: &SaverSettings) -> Result<(), LanguageSaverError> {
    let resource = settings.resource_name();
    let parsed = load_parsed(&settings.provider(), &resource)?;

    println!("{}: {} entries, {} skipped lines", resource, parsed.entries.len(), parsed.skipped.len());
    for skipped in &parsed.skipped {
        println!("  line {}: {} fields", skipped.line, skipped.fields);
    }

    if parsed.entries.is_empty() {
        return Err(LanguageSaverError::EmptyCollection);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("n"), Some(Input::Next));
        assert_eq!(parse_input("  prev "), Some(Input::Previous));
        assert_eq!(parse_input("level 3"), Some(Input::Level(Level::new(3).unwrap())));
        assert_eq!(parse_input("level 0"), None);
        assert_eq!(parse_input("q"), Some(Input::Quit));
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("jump"), None);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("2").unwrap().get(), 2);
        assert!(parse_level("0").is_err());
        assert!(parse_level("two").is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "languagesaver",
            "run",
            "--level",
            "4",
            "--policy",
            "sampling",
            "--interval",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Run { level, policy, interval, resource_dir } => {
                assert_eq!(level, Some(Level::new(4).unwrap()));
                assert_eq!(policy, Some(CyclePolicy::Sampling));
                assert_eq!(interval, Some(3));
                assert!(resource_dir.is_none());
            }
            _ => panic!("Expected run command"),
        }
    }
}
