//! Command-line interface for tagchunk
//! Chunks pre-tagged sentences, one per line, and prints their trees.
//!
//! Usage:
//!   tagchunk chunk [`<path>`] [--format `<format>`] [--grammar `<file>`] [--json] [--trace]
//!   tagchunk grammar [--grammar `<file>`]     - Validate and print a grammar
//!   tagchunk glossary [`<path>`] [--json]     - Describe the tags used in the input
//!   tagchunk list-formats                   - List all available output formats
//!
//! Every subcommand accepts `--config <file>` and `--log-level <level>`.
//! Input is read from stdin when no path is given.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::str::FromStr;
use tagchunk::chunk::ast::Token;
use tagchunk::chunk::chunking::{ChunkError, Chunker};
use tagchunk::chunk::config::{ChunkerConfig, Loader};
use tagchunk::chunk::formats::FormatRegistry;
use tagchunk::chunk::glossary::used_tags;
use tagchunk::chunk::input::{parse_tagged, parse_tagged_json};
use tagchunk::chunk::notation::parse_grammar;

fn main() {
    let matches = Command::new("tagchunk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A shallow chunker for part-of-speech tagged sentences")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log level on stderr (off, error, warn, info, debug, trace)"),
        )
        .subcommand(
            Command::new("chunk")
                .about("Chunk tagged sentences, one per line")
                .arg(input_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'bracket', 'treeviz')"),
                )
                .arg(grammar_arg())
                .arg(json_arg())
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("Print every chunk each rule creates to stderr"),
                ),
        )
        .subcommand(
            Command::new("grammar")
                .about("Validate a grammar and print it in canonical notation")
                .arg(grammar_arg()),
        )
        .subcommand(
            Command::new("glossary")
                .about("Describe the part-of-speech tags used in the input")
                .arg(input_arg())
                .arg(json_arg()),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    let config = load_config(&matches);
    init_logging(&config.logging.level);

    match matches.subcommand() {
        Some(("chunk", chunk_matches)) => handle_chunk_command(chunk_matches, &config),
        Some(("grammar", grammar_matches)) => handle_grammar_command(grammar_matches, &config),
        Some(("glossary", glossary_matches)) => handle_glossary_command(glossary_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn input_arg() -> Arg {
    Arg::new("path")
        .help("File with one tagged sentence per line (stdin if omitted)")
        .index(1)
}

fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .long("grammar")
        .short('g')
        .help("Grammar file in rule notation, replacing the configured rules")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Each input line is a JSON array of [text, tag] pairs")
}

/// Defaults, then the --config file, then flags
fn load_config(matches: &ArgMatches) -> ChunkerConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let mut overrides: Vec<(&str, String)> = Vec::new();
    if let Some(level) = matches.get_one::<String>("log-level") {
        overrides.push(("logging.level", level.clone()));
    }
    if let Some(("chunk", chunk_matches)) = matches.subcommand() {
        if let Some(format) = chunk_matches.get_one::<String>("format") {
            overrides.push(("output.format", format.clone()));
        }
    }
    for (key, value) in overrides {
        loader = loader.set_override(key, value).unwrap_or_else(|e| {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        });
    }

    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn init_logging(level: &str) {
    let level = log::LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}'", level);
        std::process::exit(1);
    });

    let result = simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_time_format_custom(&[])
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Never,
    );
    if let Err(e) = result {
        eprintln!("Could not initialize logging: {}", e);
    }
}

fn read_input(matches: &ArgMatches) -> String {
    let result = match matches.get_one::<String>("path") {
        Some(path) => std::fs::read_to_string(path),
        None => std::io::read_to_string(std::io::stdin()),
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading input: {}", e);
        std::process::exit(1);
    })
}

/// Non-blank input lines with their 1-based line numbers
fn sentences(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn parse_sentence(line: &str, json: bool) -> Result<Vec<Token>, ChunkError> {
    if json {
        parse_tagged_json(line)
    } else {
        parse_tagged(line)
    }
}

fn build_chunker(matches: &ArgMatches, config: &ChunkerConfig) -> Chunker {
    let result = match matches.get_one::<String>("grammar") {
        Some(path) => {
            let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading grammar file: {}", e);
                std::process::exit(1);
            });
            parse_grammar(&source).map(|grammar| {
                Chunker::new(grammar).with_root_label(config.grammar.root_label.clone())
            })
        }
        None => config.build_chunker(),
    };
    result.unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    })
}

/// Handle the chunk command
fn handle_chunk_command(matches: &ArgMatches, config: &ChunkerConfig) {
    let registry = FormatRegistry::with_defaults();
    let format = config.output.format.as_str();
    let Some(formatter) = registry.get(format) else {
        eprintln!(
            "Unknown format '{}'. Available formats: {}",
            format,
            registry.list_formats().join(", ")
        );
        std::process::exit(1);
    };

    let chunker = build_chunker(matches, config);
    let json = matches.get_flag("json");
    let trace = matches.get_flag("trace") || config.output.trace;
    let input = read_input(matches);

    let mut failures = 0;
    for (line_number, line) in sentences(&input) {
        let chunked = parse_sentence(line, json).and_then(|tokens| {
            if trace {
                let (tree, events) = chunker.chunk_traced(&tokens)?;
                for event in events {
                    eprintln!("line {}: {}", line_number, event);
                }
                Ok(tree)
            } else {
                chunker.chunk(&tokens)
            }
        });

        match chunked {
            Ok(tree) => match formatter.serialize(&tree) {
                Ok(output) => print!("{}", output),
                Err(e) => {
                    eprintln!("line {}: {}", line_number, e);
                    failures += 1;
                }
            },
            Err(e) => {
                eprintln!("line {}: {}", line_number, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        log::info!("{} sentence(s) could not be chunked", failures);
        std::process::exit(1);
    }
}

/// Handle the grammar command
fn handle_grammar_command(matches: &ArgMatches, config: &ChunkerConfig) {
    let chunker = build_chunker(matches, config);
    // warnings were already logged while compiling
    print!("{}", chunker.grammar());
}

/// Handle the glossary command
fn handle_glossary_command(matches: &ArgMatches) {
    let json = matches.get_flag("json");
    let input = read_input(matches);

    let mut tokens = Vec::new();
    for (line_number, line) in sentences(&input) {
        match parse_sentence(line, json) {
            Ok(sentence) => tokens.extend(sentence),
            Err(e) => {
                eprintln!("line {}: {}", line_number, e);
                std::process::exit(1);
            }
        }
    }

    for entry in used_tags(&tokens) {
        println!("{}\t{}", entry.tag, entry.description);
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", formatter.description());
        }
    }
}
