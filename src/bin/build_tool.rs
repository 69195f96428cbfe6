//! Build tool: inspect and share saved builds in an editor storage directory.
//!
//! Usage: cargo run --bin build_tool -- <COMMAND> [OPTIONS]
//!
//! Commands:
//!   list                 List saved builds
//!   export --id <ID>     Print the portable string for a build
//!   import --data <STR>  Import a build from its portable string
//!   import --file <PATH> Import a build from a file holding the string
//!   delete --id <ID>     Delete a saved build
//!
//! Options:
//!   --dir <PATH>      Storage directory (default: "isobuild-data")
//!   --config <PATH>   Editor config JSON (default: built-in defaults)

use std::path::PathBuf;
use std::process::ExitCode;

use isobuild::blocks::BlockRegistry;
use isobuild::core::{EditorConfig, SystemClock};
use isobuild::persistence::FileStorage;
use isobuild::world::WorldStore;

fn main() -> ExitCode {
    isobuild::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1).map(|s| s.as_str()) else {
        eprintln!("Usage: build_tool <list|export|import|delete> [--dir PATH] [--id ID] [--data STR | --file PATH]");
        return ExitCode::FAILURE;
    };

    let dir = parse_str_arg(&args, "--dir").unwrap_or_else(|| "isobuild-data".to_string());
    let config = match parse_str_arg(&args, "--config") {
        Some(path) => match EditorConfig::load_sync(&PathBuf::from(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => EditorConfig::default(),
    };

    let storage = match FileStorage::open(PathBuf::from(&dir)) {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Failed to open storage {}: {}", dir, e);
            return ExitCode::FAILURE;
        }
    };
    let mut store = WorldStore::open(BlockRegistry::with_defaults(), storage, SystemClock, config);

    match command {
        "list" => {
            if store.saved_builds().is_empty() {
                println!("No saved builds in {}", dir);
            }
            for build in store.saved_builds() {
                println!(
                    "{}  {:<24} {:>5} blocks  updated {}",
                    build.id,
                    build.name,
                    build.blocks.len(),
                    build.updated_at
                );
            }
            ExitCode::SUCCESS
        }
        "export" => {
            let Some(id) = parse_str_arg(&args, "--id") else {
                eprintln!("export requires --id <ID>");
                return ExitCode::FAILURE;
            };
            let data = store.export_build(&id);
            if data.is_empty() {
                eprintln!("No build with id {}", id);
                return ExitCode::FAILURE;
            }
            println!("{}", data);
            ExitCode::SUCCESS
        }
        "import" => {
            let data = match (parse_str_arg(&args, "--data"), parse_str_arg(&args, "--file")) {
                (Some(data), _) => data,
                (None, Some(path)) => match std::fs::read_to_string(&path) {
                    Ok(data) => data,
                    Err(e) => {
                        eprintln!("Failed to read {}: {}", path, e);
                        return ExitCode::FAILURE;
                    }
                },
                (None, None) => {
                    eprintln!("import requires --data <STR> or --file <PATH>");
                    return ExitCode::FAILURE;
                }
            };
            match store.try_import_build(&data) {
                Ok(id) => {
                    println!("Imported as {}", id);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Import failed: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        "delete" => {
            let Some(id) = parse_str_arg(&args, "--id") else {
                eprintln!("delete requires --id <ID>");
                return ExitCode::FAILURE;
            };
            if store.delete_build(&id) {
                println!("Deleted {}", id);
                ExitCode::SUCCESS
            } else {
                eprintln!("No build with id {}", id);
                ExitCode::FAILURE
            }
        }
        other => {
            eprintln!("Unknown command: {}", other);
            ExitCode::FAILURE
        }
    }
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
