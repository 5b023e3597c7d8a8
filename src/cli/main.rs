//! # MiniSQL CLI
//!
//! An interactive shell over a single in-memory session. Statements are
//! buffered line by line until a `;` is seen, then executed as one statement.

mod format;

use std::io::{self, BufRead, Write};

use clap::Parser;
use minisql::{Database, Engine, Session};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "minisql", version, about = "A tiny in-memory SQL database")]
struct Args {
    /// Execute the statement and exit instead of starting the shell (repeatable)
    #[arg(short = 'c', long = "command", value_name = "SQL")]
    commands: Vec<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut session = Session::new(Database::default());

    if !args.commands.is_empty() {
        let mut ok = true;
        for sql in &args.commands {
            ok &= run(&mut session, sql);
        }
        if !ok {
            std::process::exit(1);
        }
        return;
    }

    repl(&mut session);
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Executes one statement and prints its outcome, returns false on error
fn run(session: &mut Session<Database>, sql: &str) -> bool {
    match session.execute(sql) {
        Ok(result) => {
            println!("{}", format::render(&result));
            true
        }
        Err(e) => {
            tracing::debug!(error = ?e, "statement failed");
            println!("Error: {}", e);
            false
        }
    }
}

fn repl(session: &mut Session<Database>) {
    println!("MiniSQL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type SQL and end with ';'. Enter \".help\" for usage hints, Ctrl-D to exit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() {
            "minisql> "
        } else {
            "   ...> "
        };
        print!("{}", prompt);
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "failed to read input");
                break;
            }
        }

        let trimmed = line.trim();
        if buffer.is_empty() {
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('.') {
                if !handle_dot_command(trimmed, session) {
                    break;
                }
                continue;
            }
        }

        buffer.push_str(trimmed);
        buffer.push(' ');
        if !buffer.contains(';') {
            continue;
        }

        // One statement per execution; anything after the first ';' is rejected by the parser
        let sql = buffer.trim().to_string();
        buffer.clear();
        run(session, &sql);
    }
}

/// Handles a shell command, returns false when the shell should exit
fn handle_dot_command(cmd: &str, session: &Session<Database>) -> bool {
    match cmd {
        ".exit" | ".quit" => return false,
        ".help" => {
            println!(".exit              Exit this program");
            println!(".help              Show this message");
            println!(".tables            List tables and their columns");
            println!();
            println!("Statements: CREATE TABLE t (col INT|TEXT|BOOL, ...);");
            println!("            INSERT INTO t VALUES (1, 'text', ...);");
            println!("            SELECT * | col, ... FROM t;");
        }
        ".tables" => match session.engine().list_tables() {
            Ok(tables) => {
                for table in tables {
                    println!("{}", format::describe_table(&table));
                }
            }
            Err(e) => println!("Error: {}", e),
        },
        _ => println!("Error: unknown command: {}", cmd),
    }
    true
}
