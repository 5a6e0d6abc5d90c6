use lexitex::{convert, ConvertOptions, LexiconError, Pipeline};
use log::{error, info};
use std::env;
use std::path::PathBuf;

struct Args {
    pipeline: Pipeline,
    input: PathBuf,
    output: PathBuf,
    options: ConvertOptions,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} <dictionary|wordlists|domains|verbs> [INPUT] [OUTPUT] [--object-lang CODE] [--analysis-lang CODE]",
        program
    )
}

fn parse_args(args: &[String]) -> Result<Args, LexiconError> {
    let mut options = ConvertOptions::default();
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--object-lang" | "--analysis-lang" => {
                let value = iter
                    .next()
                    .ok_or_else(|| LexiconError::InvalidArgument(format!("{} requires a language code", arg)))?;
                if arg == "--object-lang" {
                    options.object_lang = value.clone();
                } else {
                    options.analysis_lang = value.clone();
                }
            }
            flag if flag.starts_with("--") => {
                return Err(LexiconError::InvalidArgument(format!("unknown flag {}", flag)));
            }
            value => positional.push(value),
        }
    }

    let Some(name) = positional.first() else {
        return Err(LexiconError::InvalidArgument("missing pipeline name".to_string()));
    };
    if positional.len() > 3 {
        return Err(LexiconError::InvalidArgument("too many arguments".to_string()));
    }
    let pipeline: Pipeline = name.parse()?;
    let input = PathBuf::from(positional.get(1).copied().unwrap_or(pipeline.default_input()));
    let output = PathBuf::from(positional.get(2).copied().unwrap_or(pipeline.default_output()));

    Ok(Args {
        pipeline,
        input,
        output,
        options,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("lexitex");

    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            eprintln!("{}", usage(program));
            std::process::exit(2);
        }
    };

    match convert(parsed.pipeline, &parsed.input, &parsed.output, &parsed.options) {
        Ok(report) => {
            info!(
                "Conversion complete! {} records written to {} ({} skipped)",
                report.records,
                parsed.output.display(),
                report.skipped.len()
            );
        }
        Err(e) => {
            error!("Failed to convert {}: {}", parsed.input.display(), e);
            std::process::exit(1);
        }
    }
}
