//! Interactive chess on the terminal

use chess_game_core::{view, Command, Database, Event, GameSession, MoveOutcome, Result};
use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::EnvFilter;

const DEFAULT_DB: &str = "chess_game.db";

struct Options {
    db_path: String,
    game_id: Option<i64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Some(options) => options,
        None => {
            print_usage(program_name(&args));
            process::exit(1);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("[ERROR] {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut options = Options {
        db_path: DEFAULT_DB.to_string(),
        game_id: None,
    };

    let mut rest = args.iter().skip(1);
    while let Some(flag) = rest.next() {
        match flag.as_str() {
            "--db" => options.db_path = rest.next()?.clone(),
            "--game" => options.game_id = Some(rest.next()?.parse().ok()?),
            _ => return None,
        }
    }
    Some(options)
}

fn program_name(args: &[String]) -> &str {
    args.first().map_or("chess", String::as_str)
}

fn print_usage(program: &str) {
    println!("Usage: {} [--db <path>] [--game <id>]", program);
    println!();
    println!("Options:");
    println!("  --db <path>   SQLite file to store games in (default {}, ':memory:' for none)", DEFAULT_DB);
    println!("  --game <id>   Resume a stored game instead of creating a new one");
}

fn run(options: &Options) -> Result<()> {
    let db = if options.db_path == ":memory:" {
        Database::open_in_memory()?
    } else {
        Database::open(&options.db_path)?
    };

    let mut session = match options.game_id {
        Some(id) => GameSession::load(&db, id)?,
        None => GameSession::create(&db)?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    view::write_guide(&mut out)?;
    writeln!(out, "> game #{}", session.id())?;
    if let Some(board) = session.state().board() {
        view::write_board(board, &mut out)?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = line
            .parse::<Command>()
            .and_then(|command| session.execute(command))
            .and_then(|event| report(&event, &session, &mut out));

        match result {
            Ok(()) => {}
            Err(e) if e.is_user_error() => writeln!(out, "[ERROR] {}", e)?,
            Err(e) => return Err(e),
        }

        if !session.state().is_running() {
            break;
        }
    }

    Ok(())
}

fn report<W: Write>(event: &Event, session: &GameSession<'_>, out: &mut W) -> Result<()> {
    match event {
        Event::Started | Event::Moved { outcome: MoveOutcome::Continue { .. }, .. } => {
            if let Some(board) = session.state().board() {
                view::write_board(board, out)?;
            }
        }
        Event::Moved { outcome: MoveOutcome::RoundOver { winner, board }, .. } => {
            view::write_board(board, out)?;
            writeln!(out, "> {} captured the king", winner)?;
            view::write_status(&board.status(), out)?;
            writeln!(out, "> type start to play again")?;
        }
        Event::Status(status) => view::write_status(status, out)?,
        Event::Ended => writeln!(out, "> game over")?,
    }
    Ok(())
}
