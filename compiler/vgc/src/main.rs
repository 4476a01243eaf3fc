//! visigen CLI
//!
//! Static reflection code generator for annotated C++ types.

use vgc::commands::{parse_cli_options, run_dump, run_generate, CliOptions};
use vgc::{init_tracing, GenerateError};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => {
            let options = parse_or_exit(&args[2..], "generate");
            if options.json {
                eprintln!("warning: --json only applies to `visigen dump`, ignoring");
            }
            if let Err(err) = run_generate(&options.config) {
                report(&err, &options);
                std::process::exit(1);
            }
        }
        "dump" => {
            let options = parse_or_exit(&args[2..], "dump");
            if let Err(err) = run_dump(&options.config, options.json) {
                report(&err, &options);
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("visigen {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_or_exit(args: &[String], command: &str) -> CliOptions {
    let options = match parse_cli_options(args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Run `visigen help` for usage.");
            std::process::exit(1);
        }
    };
    if options.config.inputs.is_empty() {
        eprintln!("error: missing input files");
        eprintln!("Usage: visigen {command} -i <files...> [options]");
        std::process::exit(1);
    }
    options
}

fn report(err: &GenerateError, options: &CliOptions) {
    eprintln!("error: {err}");
    if let GenerateError::FatalDiagnostics { diagnostics, .. } = err {
        for diagnostic in diagnostics {
            eprintln!("  {diagnostic}");
        }
        eprintln!(
            "note: parser arguments: {}",
            options.config.parser_args().join(" ")
        );
    }
}

fn print_usage() {
    println!("visigen - static reflection code generator");
    println!();
    println!("Usage: visigen <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate -i <files...>   Generate a reflection header");
    println!("  dump -i <files...>       List the declarations a batch collects");
    println!("  help                     Show this help message");
    println!("  version                  Show version information");
    println!();
    println!("Options:");
    println!("  -i, --input-files <files...>  Input files, parsed in order");
    println!("  -o, --output <path>           Output header (default: stdout)");
    println!("  --flags=<flags>               Compiler flags for the parser, space separated");
    println!("  --namespace=<ns>              Namespace of the generated code (default: visigen)");
    println!("  --libclang=<dir>              Directory containing the libclang shared library");
    println!("  --generator=<kind>            visitor (default) or meta");
    println!("  --marker=<text>               Annotation substring to collect (default: VISIGEN_GEN)");
    println!("  --json                        Machine-readable output (dump only)");
    println!();
    println!("Logging: set RUST_LOG, e.g. RUST_LOG=vgc=info,vg_collect=debug");
}
