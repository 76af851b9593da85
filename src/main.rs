use chrono::NaiveDate;
use clap::Parser;
use injdiary::application::{
    browse_week, ConfigService, DiaryStore, LoadEntriesService, WeekStart,
};
use injdiary::cli::{format_entry_list, format_week, format_week_list, to_json, week_json};
use injdiary::cli::{Cli, Commands};
use injdiary::domain::{Direction, WeekSelection};
use injdiary::error::DiaryError;
use injdiary::infrastructure::config::CONFIG_FILE_NAME;
use injdiary::infrastructure::{Config, DiarySource, FileSource, InMemorySource};
use injdiary::logging;
use std::path::{Path, PathBuf};
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), DiaryError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    match &cli.command {
        Some(Commands::List { json }) => {
            let (store, config) = load_session(&cli, &config_path)?;
            if *json {
                println!("{}", to_json(store.entries())?);
            } else {
                let text = format_entry_list(store.entries(), &config.date_format);
                print!("{}", with_newline(text));
            }
            Ok(())
        }
        Some(Commands::Week {
            week,
            date,
            go,
            json,
        }) => {
            let start = match (week, date) {
                (Some(week), _) => WeekStart::Week(WeekSelection::from_str(week)?),
                (None, Some(date)) => WeekStart::Date(parse_cli_date(date)?),
                (None, None) => WeekStart::Newest,
            };
            let steps = go
                .iter()
                .map(|step| Direction::from_str(step))
                .collect::<Result<Vec<_>, _>>()?;

            let (mut store, config) = load_session(&cli, &config_path)?;
            if store.entries().is_empty() {
                return Err(DiaryError::EmptyDiary);
            }

            let selection = browse_week(&mut store, start, &steps)?;
            let entries = store.filtered_entries();
            if *json {
                println!("{}", week_json(selection, &entries)?);
            } else {
                print!("{}", format_week(selection, &entries, &config.date_format));
            }
            Ok(())
        }
        Some(Commands::Weeks { json }) => {
            let (store, _) = load_session(&cli, &config_path)?;
            let weeks = store.occupied_weeks();
            if *json {
                println!("{}", to_json(&weeks)?);
            } else {
                print!("{}", with_newline(format_week_list(&weeks)));
            }
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let service = ConfigService::new(config_path);

            if *list {
                let config = service.list()?;
                println!("diary_file = {}", config.diary_file.display());
                println!("date_format = {}", config.date_format);
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(k, v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: injdiary config [--list | <key> [<value>]]");
                println!("Valid keys: diary_file, date_format");
                Ok(())
            }
        }
        None => {
            println!("injdiary - Injection diary viewer");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

/// Load config, pick the diary source and fill a fresh store
fn load_session(cli: &Cli, config_path: &Path) -> Result<(DiaryStore, Config), DiaryError> {
    let config = Config::load(config_path)?;

    let source: Box<dyn DiarySource> = match cli.file.as_deref() {
        Some(path) if path == Path::new("-") => Box::new(InMemorySource::from_reader(
            std::io::stdin().lock(),
            "<stdin>",
        )?),
        Some(path) => Box::new(FileSource::new(path)),
        None => {
            let base = config_path.parent().unwrap_or_else(|| Path::new(""));
            Box::new(FileSource::new(config.resolve_diary_file(base)))
        }
    };

    let mut store = DiaryStore::new();
    store.subscribe(|event| tracing::trace!(?event, "store changed"));

    LoadEntriesService::new(source)
        .strict(cli.strict)
        .execute(&mut store)?;

    Ok((store, config))
}

fn parse_cli_date(input: &str) -> Result<NaiveDate, DiaryError> {
    NaiveDate::parse_from_str(input.trim(), "%d-%m-%Y")
        .map_err(|_| DiaryError::InvalidDate(input.to_string()))
}

/// Placeholder messages are returned without a trailing newline
fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
