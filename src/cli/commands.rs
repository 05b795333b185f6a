//! Command implementations for the Anamnesis CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Instant;

use log::{info, warn};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AnamnesisConfig;
use crate::error::{AnamnesisError, Result};
use crate::inference::Predictor;
use crate::model::PredictionModel;
use crate::server;

/// Execute a CLI command.
pub fn execute_command(args: AnamnesisArgs) -> Result<()> {
    let config = args.load_config()?;

    match &args.command {
        Command::Predict(predict_args) => predict(predict_args, config, &args),
        Command::Batch(batch_args) => batch(batch_args, config, &args),
        Command::Explain(explain_args) => explain(explain_args, config, &args),
        Command::Validate(validate_args) => validate(validate_args, config, &args),
        Command::Serve(_) => serve(config),
    }
}

/// Predict diagnoses for one description.
fn predict(args: &PredictArgs, config: AnamnesisConfig, cli_args: &AnamnesisArgs) -> Result<()> {
    let predictor = Predictor::load(&config)?;
    let predictions = predictor.predict(&args.text)?;

    output_result(
        "Predictions",
        &PredictionReport {
            text: args.text.clone(),
            predictions,
        },
        cli_args,
    )
}

/// A line of a batch file.
#[derive(Debug, PartialEq)]
struct BatchInput {
    /// Line content, lossily decoded when it is not valid UTF-8.
    text: String,
    valid_utf8: bool,
}

/// Split a batch file into lines, stripping `\n` and `\r\n` terminators.
///
/// Invalid UTF-8 is kept per line instead of failing the whole read.
fn read_batch_lines<R: BufRead>(mut reader: R) -> Result<Vec<BatchInput>> {
    let mut inputs = Vec::new();
    let mut buf = Vec::new();

    while reader.read_until(b'\n', &mut buf)? > 0 {
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let input = match String::from_utf8(std::mem::take(&mut buf)) {
            Ok(text) => BatchInput {
                text,
                valid_utf8: true,
            },
            Err(e) => BatchInput {
                text: String::from_utf8_lossy(e.as_bytes()).into_owned(),
                valid_utf8: false,
            },
        };
        inputs.push(input);
    }

    Ok(inputs)
}

/// Predict diagnoses for every line of a file.
///
/// A line that cannot be decoded or predicted is reported on its own and does
/// not stop the run.
fn batch(args: &BatchArgs, config: AnamnesisConfig, cli_args: &AnamnesisArgs) -> Result<()> {
    let inputs = read_batch_lines(BufReader::new(File::open(&args.file)?))?;

    let predictor = Predictor::load(&config)?;

    let texts: Vec<&str> = inputs
        .iter()
        .filter(|input| input.valid_utf8)
        .map(|input| input.text.as_str())
        .collect();

    let start_time = Instant::now();
    let mut results = predictor.predict_batch(&texts).into_iter();
    let duration = start_time.elapsed();

    let mut failures = 0;
    for (line_num, input) in inputs.into_iter().enumerate() {
        let result = if input.valid_utf8 {
            results
                .next()
                .unwrap_or_else(|| Err(AnamnesisError::inference("missing batch result")))
        } else {
            Err(AnamnesisError::invalid_input("line is not valid UTF-8"))
        };

        let line = match result {
            Ok(predictions) => BatchLine {
                line: line_num + 1,
                text: input.text,
                predictions: Some(predictions),
                error: None,
            },
            Err(e) => {
                failures += 1;
                warn!("Line {}: {e}", line_num + 1);
                BatchLine {
                    line: line_num + 1,
                    text: input.text,
                    predictions: None,
                    error: Some(e.to_string()),
                }
            }
        };

        match cli_args.output_format {
            // One JSON document per line, regardless of --pretty.
            OutputFormat::Json => println!("{}", serde_json::to_string(&line)?),
            OutputFormat::Human => line.print_human(),
        }
    }

    info!(
        "Processed batch in {}ms ({failures} failed lines)",
        duration.as_millis()
    );
    Ok(())
}

/// Show the intermediate artifacts of one prediction.
fn explain(args: &ExplainArgs, config: AnamnesisConfig, cli_args: &AnamnesisArgs) -> Result<()> {
    let predictor = Predictor::load(&config)?;
    let explanation = predictor.explain(&args.text)?;

    output_result("Explanation", &explanation, cli_args)
}

/// Load the artifacts and report what was loaded.
fn validate(args: &ValidateArgs, config: AnamnesisConfig, cli_args: &AnamnesisArgs) -> Result<()> {
    let model = PredictionModel::load(&config.assets, config.inference.max_features)?;

    let classes_without_record: Vec<String> = model
        .classes()
        .iter()
        .filter(|class| !model.knowledge_base().contains(class))
        .cloned()
        .collect();

    let report = ValidationReport {
        vectorizer: config.assets.vectorizer.display().to_string(),
        model: config.assets.model.display().to_string(),
        knowledge_base: config.assets.knowledge_base.display().to_string(),
        summary: model.summary(),
        classes_without_record,
    };

    output_result("Artifacts are valid", &report, cli_args)?;

    if args.strict && !report.classes_without_record.is_empty() {
        return Err(AnamnesisError::model_load(format!(
            "{} classes have no knowledge-base record",
            report.classes_without_record.len()
        )));
    }
    Ok(())
}

/// Run the HTTP service until shutdown or a model load failure.
fn serve(config: AnamnesisConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(server::serve(config))
}
