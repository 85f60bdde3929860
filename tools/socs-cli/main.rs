use clap::Parser;
use socs_blocks::prelude::*;
use socs_blocks::program::to_json_pretty;
use std::time::Instant;

/// Materializes a card-game program into blocks and reads it back
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the program JSON file
    program_path: String,

    /// Read the file as a phases object instead of a single statement
    #[arg(short, long)]
    phases: bool,

    /// Print the materialized block tree
    #[arg(short, long)]
    tree: bool,

    /// Check every variable reference against the names in scope
    #[arg(short = 's', long)]
    check_scopes: bool,

    /// A name visible everywhere, as CATEGORY:NAME (e.g. socs_t_zone:deck)
    #[arg(short, long = "global", value_name = "CATEGORY:NAME")]
    globals: Vec<String>,

    /// Read USER_TAG as the block CANONICAL_TAG, as USER_TAG=CANONICAL_TAG
    #[arg(short, long = "alias", value_name = "USER=CANONICAL")]
    aliases: Vec<String>,

    /// Print the extracted program as JSON
    #[arg(short, long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let total_start = Instant::now();

    // --- 1. Registry ---
    let registry = cli
        .aliases
        .iter()
        .fold(BlockRegistry::builder(), |builder, alias| {
            let (user, canonical) = alias.split_once('=').unwrap_or_else(|| {
                exit_with_error(&format!(
                    "Alias '{}' must have the form USER_TAG=CANONICAL_TAG",
                    alias
                ))
            });
            builder.with_alias(user, canonical)
        })
        .build();
    let globals: Vec<(Category, &str)> = cli.globals.iter().map(|g| parse_global(g)).collect();

    // --- 2. Loading ---
    let load_start = Instant::now();
    let program = if cli.phases {
        Program::Phases(read_phases_file(&cli.program_path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load phases: {}", e))
        }))
    } else {
        Program::Statement(read_statement_file(&cli.program_path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load program: {}", e))
        }))
    };
    let load_duration = load_start.elapsed();

    // --- 3. Materialization ---
    let materialize_start = Instant::now();
    let mut workspace = Workspace::new();
    let materializer = Materializer::new(&registry);
    let root = match &program {
        Program::Phases(phases) => materializer
            .materialize_phases(phases, &mut workspace)
            .map(|_| None),
        Program::Statement(statement) => {
            materializer.materialize(statement, &mut workspace, Insertion::Detached)
        }
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Materialization failed: {}", e)));
    let materialize_duration = materialize_start.elapsed();

    println!(
        "Materialized {} blocks from '{}'",
        workspace.node_count(),
        cli.program_path
    );
    if cli.tree {
        println!("\n{}", WorkspaceTree { workspace: &workspace });
    }

    // --- 4. Extraction ---
    let extract_start = Instant::now();
    let extractor = globals
        .iter()
        .fold(
            Extractor::builder(&workspace, &registry).check_scopes(cli.check_scopes),
            |builder, (category, name)| builder.with_global(*category, name),
        )
        .build();

    let (lossless, diagnostics, json) = match &program {
        Program::Phases(phases) => {
            let extraction = extractor.extract_phases();
            let expected: Phases = phases
                .iter()
                .map(|(name, phase)| {
                    let evaluate = phase.evaluate.normalized();
                    (name.clone(), Phase { evaluate })
                })
                .collect();
            let json = to_json_pretty(&extraction.value);
            (extraction.value == expected, extraction.diagnostics, json)
        }
        Program::Statement(statement) => {
            let extraction = extractor.extract_statement_chain(root.and(first_of(&workspace)));
            let json = to_json_pretty(&extraction.value);
            (
                extraction.value == statement.normalized(),
                extraction.diagnostics,
                json,
            )
        }
    };
    let extract_duration = extract_start.elapsed();

    // --- 5. Results ---
    if diagnostics.is_empty() {
        println!("Extraction produced no diagnostics.");
    } else {
        println!("\nExtraction produced {} diagnostic(s):", diagnostics.len());
        for diagnostic in &diagnostics {
            println!("  - {}", diagnostic);
        }
    }
    println!(
        "Round trip: {}",
        if lossless { "lossless" } else { "CHANGED" }
    );

    if cli.json {
        let json = json.unwrap_or_else(|e| exit_with_error(&format!("{}", e)));
        println!("\n{}", json);
    }

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:         {:?}", load_duration);
    println!("Materialization:      {:?}", materialize_duration);
    println!("Extraction:           {:?}", extract_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_duration);

    if !lossless {
        std::process::exit(2);
    }
}

enum Program {
    Statement(Statement),
    Phases(Phases),
}

/// The first block of the single top-level chain a statement materializes to.
fn first_of(workspace: &Workspace) -> Option<NodeId> {
    workspace.roots().into_iter().next()
}

fn parse_global(raw: &str) -> (Category, &str) {
    let Some((tag, name)) = raw.split_once(':') else {
        exit_with_error(&format!("Global '{}' must have the form CATEGORY:NAME", raw));
    };
    let category = Category::from_type_tag(tag).unwrap_or_else(|| {
        exit_with_error(&format!("Unknown category '{}' in global '{}'", tag, raw))
    });
    (category, name)
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
