mod args;

use std::{error::Error, process::ExitCode};

use args::Args;
use clap::Parser;
use itertools::Itertools;
use log::{error, info, LevelFilter};
use modgen_core::{
    config::{ModDefinition, DEFAULT_DEFINITION},
    render::render,
};
use modgen_exporter::{CompilerSink, ExportError, ModSink, TextSink};
use simple_logger::SimpleLogger;

fn print_presets(definition: &ModDefinition) {
    println!("{} v{}", definition.name, definition.version);
    if let Some(description) = &definition.description {
        println!("{}", description);
    }

    for preset in &definition.presets {
        println!(
            "  {}: {}",
            preset.label,
            preset
                .fields()
                .iter()
                .skip(1) // label
                .map(|(name, value)| format!("{}={}", name, value))
                .join(", ")
        );
    }
}

fn print_missing_compiler(program: &str, reason: &dyn Error) {
    eprintln!();
    eprintln!("********************************************************************");
    eprintln!("To build the mod file, the mod compiler '{}' needs to be", program);
    eprintln!("installed and on your PATH. Point to it with --compiler <PATH>, or");
    eprintln!("use --text to write the uncompiled mod text instead.");
    eprintln!();
    eprintln!("  {}", reason);
    eprintln!("********************************************************************");
    eprintln!();
}

/// Resolves the compiler if this run needs one. Called before anything is
/// rendered so a missing compiler never leaves a file behind.
fn startup(args: &Args) -> Result<Option<CompilerSink>, ExportError> {
    if !args.needs_compiler() {
        return Ok(None);
    }
    CompilerSink::locate(&args.compiler).map(Some)
}

fn run(args: &Args, compiler: Option<CompilerSink>) -> Result<(), Box<dyn Error>> {
    let definition = ModDefinition::get_embedded(DEFAULT_DEFINITION)?;

    if args.list {
        print_presets(&definition);
        return Ok(());
    }

    let text = render(&definition)?;

    if args.stdout {
        print!("{}", text);
        return Ok(());
    }

    let extension = if compiler.is_some() { "blcm" } else { "txt" };
    let sink: Box<dyn ModSink> = match compiler {
        Some(compiler) => {
            info!("compiling with {}", compiler.program().display());
            Box::new(compiler)
        }
        None => Box::new(TextSink),
    };

    let path = args.out_dir.join(definition.output_filename(extension));
    info!("writing {} bytes to {}", text.len(), path.display());
    sink.write_mod(&text, &path)?;

    println!("Wrote mod file to: {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init().unwrap();

    let compiler = match startup(&args) {
        Ok(compiler) => compiler,
        Err(e) => {
            print_missing_compiler(&args.compiler, &e);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, compiler) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_stdout_runs_skip_the_compiler() {
        for flag in ["--text", "--stdout", "--list"] {
            let args =
                Args::try_parse_from(["generate-mod", flag, "--compiler", "/nonexistent/modprocessor"])
                    .unwrap();
            assert!(startup(&args).unwrap().is_none(), "{}", flag);
        }
    }

    #[test]
    fn missing_compiler_stops_startup() {
        let args =
            Args::try_parse_from(["generate-mod", "--compiler", "/nonexistent/modprocessor"]).unwrap();
        assert!(matches!(
            startup(&args),
            Err(ExportError::CompilerNotFound { .. })
        ));
    }
}
