//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::args::{AnamnesisArgs, OutputFormat};
use crate::error::Result;
use crate::inference::{Explanation, Prediction};
use crate::model::ModelSummary;

/// Rendering of a result for a terminal reader.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Result structure for a single prediction.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionReport {
    pub text: String,
    pub predictions: Vec<Prediction>,
}

/// One line of a batch run.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchLine {
    pub line: usize,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<Prediction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result structure for artifact validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationReport {
    pub vectorizer: String,
    pub model: String,
    pub knowledge_base: String,
    pub summary: ModelSummary,
    pub classes_without_record: Vec<String>,
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &AnamnesisArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
pub fn output_json<T: Serialize>(result: &T, args: &AnamnesisArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

impl HumanReadable for PredictionReport {
    fn print_human(&self) {
        print_predictions(&self.predictions);
    }
}

impl HumanReadable for BatchLine {
    fn print_human(&self) {
        println!("Line {}: {}", self.line, self.text);
        match (&self.predictions, &self.error) {
            (Some(predictions), _) => print_predictions(predictions),
            (None, Some(error)) => println!("  error: {error}"),
            (None, None) => {}
        }
        println!();
    }
}

impl HumanReadable for Explanation {
    fn print_human(&self) {
        println!("Tokens ({}): {}", self.total_tokens, self.tokens.join(" "));
        println!();

        if self.recognized.is_empty() {
            println!("No recognized terms.");
        } else {
            println!("Recognized terms:");
            println!("─────────────────");
            for term in &self.recognized {
                println!(
                    "  {:<20} index {:<6} count {:<4} weight {:.4}",
                    term.term, term.index, term.count, term.weight
                );
            }
        }
        println!();

        println!("Class scores:");
        println!("─────────────");
        for class in &self.classes {
            println!(
                "  {:<30} logit {:>9.4}  p {:.4}",
                class.disease, class.logit, class.probability
            );
        }
    }
}

impl HumanReadable for ValidationReport {
    fn print_human(&self) {
        println!("Model Artifacts:");
        println!("════════════════");
        println!("Vectorizer:      {}", self.vectorizer);
        println!("Model:           {}", self.model);
        println!("Knowledge base:  {}", self.knowledge_base);
        println!();
        println!("Classes:         {}", self.summary.classes);
        println!("Vocabulary size: {}", self.summary.vocabulary_size);
        println!("Max features:    {}", self.summary.max_features);
        println!(
            "KB coverage:     {}/{} classes ({} records)",
            self.summary.knowledge_base_coverage,
            self.summary.classes,
            self.summary.knowledge_base_records
        );

        if !self.classes_without_record.is_empty() {
            println!();
            println!("Classes without a knowledge-base record:");
            for class in &self.classes_without_record {
                println!("  {class}");
            }
        }
    }
}

fn print_predictions(predictions: &[Prediction]) {
    for (rank, prediction) in predictions.iter().enumerate() {
        println!(
            "{}. {} ({})",
            rank + 1,
            prediction.disease,
            format_confidence(prediction.confidence)
        );
        match &prediction.details {
            Some(Value::Object(fields)) => {
                for (field_name, field_value) in fields {
                    println!("   {field_name}: {}", format_value(field_value));
                }
            }
            Some(other) => println!("   {}", format_value(other)),
            None => {}
        }
    }
}

/// Format a probability as a percentage.
fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Format a JSON value for display.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
        Value::Null => "null".to_string(),
    }
}
