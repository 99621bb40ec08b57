//! Newsrush main entry point
//!
//! Interactive loop: fetch articles for the startup query, then read
//! commands line by line. Every failure is converted to a status line;
//! only startup configuration problems are fatal.

use log::{debug, error, info};
use newsrush::commands::{self, Command};
use newsrush::language::Language;
use newsrush::news::CATEGORIES;
use newsrush::speech::ToggleOutcome;
use newsrush::state::State;
use newsrush::translate::RefreshOutcome;
use std::io::{self, BufRead, Write};
use std::process;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to newsrush.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("newsrush.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open newsrush.log for debug logging: {}",
                    e
                );
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "Newsrush version {} starting (debug mode, logging to newsrush.log)",
            newsrush::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        eprintln!("Fatal error: {}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    debug!("Initializing Newsrush");
    let mut state = State::new()?;

    println!("Newsrush {} - type 'help' for commands", newsrush::VERSION);

    // Startup fetch; a failure is a status line, not a fatal error
    let query = state.config.default_query();
    fetch_and_list(&mut state, &query);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        // Natural playback completion is observed between commands
        if let Some(id) = state.coordinator.poll_finished() {
            println!("(finished speaking {})", id);
        }

        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match commands::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            command => dispatch(&mut state, command),
        }
    }

    // Release any audio still playing before exit
    state.coordinator.stop();
    println!("Bye");
    Ok(())
}

/// Execute one command, converting every failure to a status line
fn dispatch(state: &mut State, command: Command) {
    match command {
        Command::Search(query) => fetch_and_list(state, &query),

        Command::Language(language) => {
            if language == state.controller.source_language() {
                match state.set_language(language) {
                    Ok(_) => println!("Restored original {} text", language.name()),
                    Err(e) => println!("Error: {}", e),
                }
            } else {
                println!("Translating into {}...", language.name());
                match state.set_language(language) {
                    Ok(RefreshOutcome::Translated { translated, failed }) if failed > 0 => {
                        println!("Translated {} articles, {} unchanged", translated, failed)
                    }
                    Ok(RefreshOutcome::Translated { translated, .. }) => {
                        println!("Translated {} articles", translated)
                    }
                    Ok(RefreshOutcome::Restored) => {}
                    Err(e) => println!("Error: {}", e),
                }
            }
            print_articles(state);
        }

        Command::Languages => {
            for language in Language::ALL {
                println!("  {}  {}", language.code(), language.name());
            }
        }

        Command::Speak(position) => match state.toggle_speak(position) {
            Ok(ToggleOutcome::Started { provider }) => {
                println!("Speaking article {} ({})", position, provider)
            }
            Ok(ToggleOutcome::Stopped) => println!("Stopped"),
            Err(e) => println!("Error: {}", e),
        },

        Command::Stop => {
            state.coordinator.stop();
            println!("Stopped");
        }

        Command::Open(position) => match state.article_url(position) {
            Ok(url) => {
                let url = url.to_string();
                if let Err(e) = open::that(&url) {
                    println!("Error: failed to open {}: {}", url, e);
                } else {
                    println!("Opened {}", url);
                }
            }
            Err(e) => println!("Error: {}", e),
        },

        Command::List => print_articles(state),

        Command::Categories => {
            println!("Categories (use 'search <category>'):");
            for category in CATEGORIES {
                println!("  {}", category);
            }
        }

        Command::Login(name) => {
            state.session.login(&name);
            println!("Signed in as {}", name);
        }

        Command::Logout => match state.session.logout() {
            Some(name) => println!("Signed out {}", name),
            None => println!("Not signed in"),
        },

        Command::Help => print_help(),

        // Quit is handled by the caller
        Command::Quit => {}
    }
}

/// Fetch a query and print the resulting list or the failure
fn fetch_and_list(state: &mut State, query: &str) {
    println!("Loading '{}'...", query);
    match state.fetch(query) {
        Ok(0) => println!("No articles yet."),
        Ok(count) => {
            println!("{} articles:", count);
            print_articles(state);
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn print_articles(state: &State) {
    let active = state.coordinator.active_article();
    for (index, article) in state.controller.articles().iter().enumerate() {
        let marker = if active == Some(article.id) { '*' } else { ' ' };
        println!("{}{:3}. {}", marker, index + 1, article.title);
        if !article.description.is_empty() {
            println!("      {}", article.description);
        }
        println!("      {}", article.source_url);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  search <query>   fetch articles (alias: s)");
    println!("  lang <code>      switch display language (see: langs)");
    println!("  speak <n>        toggle speech for article n");
    println!("  stop             stop speaking");
    println!("  open <n>         open article n in the browser (alias: o)");
    println!("  list             show the article list (alias: ls)");
    println!("  categories       show category shortcuts");
    println!("  login <name>     sign in; logout signs out");
    println!("  help             this text; quit exits");
}
