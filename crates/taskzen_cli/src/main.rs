//! Interactive task-list session driver.
//!
//! # Responsibility
//! - Wire the core session to a terminal loop.
//! - Enforce the presentation-side input rules: no commands before the
//!   seed resolves, no re-trigger while an optimization pass is pending.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use taskzen_core::db::open_db;
use taskzen_core::{
    core_version, default_log_level, init_logging, HttpSeedSource, LoadPhase, SessionConfig,
    SqliteSlotRepository, SystemClock, TaskSession,
};

fn main() {
    let db_path = std::env::var("TASKZEN_DB").unwrap_or_else(|_| "taskzen.db".to_string());
    init_file_logging();

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open `{db_path}`: {err}");
            std::process::exit(1);
        }
    };
    let repo = match SqliteSlotRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("slot store unavailable: {err}");
            std::process::exit(1);
        }
    };

    println!("taskzen {} loading…", core_version());
    let config = SessionConfig::default();
    let delay = Duration::from_millis(config.analysis_delay_ms as u64);
    let mut session = TaskSession::start(repo, &HttpSeedSource::default(), SystemClock, config);
    log::info!("event=cli_start module=cli status=ok db={db_path}");
    if session.phase() == LoadPhase::SeedFailed {
        println!("seed fetch failed; starting with an empty list");
    }
    render(&session);
    print_help();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let input = line.trim();
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "add" => {
                if session.add(rest).is_none() {
                    println!("nothing to add");
                }
                render(&session);
            }
            "done" => match parse_id(rest) {
                Some(id) => {
                    if session.toggle_completed(id) {
                        render(&session);
                    } else {
                        println!("no task with that id");
                    }
                }
                None => println!("usage: done <id>"),
            },
            "rm" => match parse_id(rest) {
                Some(id) => {
                    if session.remove(id) {
                        render(&session);
                    } else {
                        println!("no task with that id");
                    }
                }
                None => println!("usage: rm <id>"),
            },
            "boost" => {
                if !session.run_analysis() {
                    println!("optimization already in flight");
                } else {
                    println!("optimizing…");
                    thread::sleep(delay);
                    session.tick();
                    render(&session);
                }
            }
            "ls" => render(&session),
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command `{other}`; try `help`"),
        }
        prompt();
    }

    session.cancel_analysis();
}

fn render(session: &TaskSession<SqliteSlotRepository<'_>, SystemClock>) {
    if session.tasks().is_empty() {
        println!("(no tasks)");
        return;
    }
    for task in session.tasks() {
        let mark = if task.completed { "x" } else { " " };
        println!("[{mark}] {:>13}  {}", task.id, task.title);
    }
}

fn parse_id(input: &str) -> Option<i64> {
    input.parse().ok()
}

fn print_help() {
    println!("commands: add <title> | done <id> | rm <id> | boost | ls | help | quit");
    prompt();
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

fn init_file_logging() {
    let log_dir = std::env::temp_dir().join("taskzen-logs");
    match log_dir.to_str() {
        Some(dir) => {
            if let Err(err) = init_logging(default_log_level(), dir) {
                eprintln!("logging disabled: {err}");
            }
        }
        None => eprintln!("logging disabled: log directory is not valid UTF-8"),
    }
}
