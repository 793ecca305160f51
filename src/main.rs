//! Purpose: `wsldb` CLI entry point: check and dump WSL database files.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use wsldb::api::{decode_file, to_exit_code, Database, Error, ErrorKind};

#[derive(Parser, Debug)]
#[command(name = "wsldb", version, about = "Decode WSL flat-file databases")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a database file and report a summary without printing rows.
    Check {
        /// Path to the database file.
        file: PathBuf,
        /// Read the schema from this file instead of the inline header.
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Decode a database file and print one JSON object per row.
    Dump {
        /// Path to the database file.
        file: PathBuf,
        /// Read the schema from this file instead of the inline header.
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Only print rows of this relation.
        #[arg(long)]
        relation: Option<String>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        emit_error(&err);
        std::process::exit(to_exit_code(err.kind()));
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    match cli.command {
        Command::Check { file, schema } => {
            let db = open_db(&file, schema.as_deref())?;
            println!(
                "{}",
                json!({
                    "ok": true,
                    "relations": db.schema().len(),
                    "rows": db.row_count(),
                })
            );
            Ok(())
        }
        Command::Dump {
            file,
            schema,
            relation,
        } => {
            let db = open_db(&file, schema.as_deref())?;
            dump_rows(&db, relation.as_deref())
        }
    }
}

fn open_db(file: &std::path::Path, schema: Option<&std::path::Path>) -> Result<Database, Error> {
    let header = match schema {
        Some(path) => Some(fs::read(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to read schema file")
                .with_path(path)
                .with_source(err)
        })?),
        None => None,
    };
    decode_file(file, header.as_deref(), None)
}

fn dump_rows(db: &Database, only: Option<&str>) -> Result<(), Error> {
    if let Some(name) = only {
        if db.rows(name).is_none() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("relation \"{name}\" is not declared in the schema")));
        }
    }
    for (name, rows) in db.iter() {
        if only.is_some_and(|wanted| wanted != name) {
            continue;
        }
        for row in rows {
            println!("{}", json!({ "relation": name, "values": row }));
        }
    }
    Ok(())
}

fn emit_error(err: &Error) {
    eprintln!(
        "{}",
        json!({
            "error": {
                "kind": format!("{:?}", err.kind()),
                "message": err.to_string(),
            }
        })
    );
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
