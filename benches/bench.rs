//! Criterion benchmarks for the Anamnesis inference pipeline.
//!
//! Covers:
//! - Text analysis and tokenization
//! - TF-IDF vectorization
//! - Single and batch prediction on a synthetic model

use std::collections::HashMap;
use std::hint::black_box;
use std::sync::Arc;

use anamnesis::analysis::analyzer::analyzer::Analyzer;
use anamnesis::analysis::analyzer::standard::StandardAnalyzer;
use anamnesis::config::InferenceConfig;
use anamnesis::inference::{Predictor, TfIdfVectorizer};
use anamnesis::model::{
    KnowledgeBaseDocument, ModelCoefficients, PredictionModel, VectorizerParams,
};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;

const MAX_FEATURES: usize = 5000;
const VOCABULARY_SIZE: usize = 2000;
const NUM_CLASSES: usize = 40;

/// Generate symptom descriptions mixing known and unknown words.
fn generate_test_documents(count: usize) -> Vec<String> {
    let mut documents = Vec::with_capacity(count);
    for i in 0..count {
        let doc_length = 5 + (i % 40);
        let mut doc_words = Vec::with_capacity(doc_length);

        for j in 0..doc_length {
            let word_idx = (i * 7 + j * 13) % (VOCABULARY_SIZE + 500);
            doc_words.push(format!("symptom{word_idx}"));
        }

        documents.push(doc_words.join(", "));
    }

    documents
}

/// Build a synthetic model with deterministic pseudo-random weights.
fn generate_test_model() -> PredictionModel {
    let vocabulary: HashMap<String, usize> = (0..VOCABULARY_SIZE)
        .map(|i| (format!("symptom{i}"), (i * 31) % MAX_FEATURES))
        .collect();
    let idf = (0..MAX_FEATURES)
        .map(|i| 1.0 + (i % 17) as f64 / 10.0)
        .collect();

    let coef = (0..NUM_CLASSES)
        .map(|c| {
            (0..MAX_FEATURES)
                .map(|f| ((c * 13 + f * 7) as f64 * 0.01).sin())
                .collect()
        })
        .collect();
    let intercept = (0..NUM_CLASSES).map(|c| (c as f64 * 0.1).cos()).collect();
    let classes: Vec<String> = (0..NUM_CLASSES).map(|c| format!("disease_{c}")).collect();

    let knowledge_base: KnowledgeBaseDocument = classes
        .iter()
        .map(|name| (name.clone(), json!({"description": name})))
        .collect();

    PredictionModel::from_artifacts(
        VectorizerParams { vocabulary, idf },
        ModelCoefficients {
            coef,
            intercept,
            classes,
        },
        knowledge_base,
        MAX_FEATURES,
    )
    .unwrap()
}

/// Benchmark text analysis and tokenization.
fn bench_text_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_analysis");

    let analyzer = StandardAnalyzer::new();
    let texts = generate_test_documents(1000);

    group.bench_function("analyze_single_document", |b| {
        b.iter(|| {
            let tokens: Vec<_> = analyzer.analyze(black_box(&texts[0])).unwrap().collect();
            black_box(tokens)
        })
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("analyze_batch_documents", |b| {
        b.iter(|| {
            for text in texts.iter().take(100) {
                let tokens: Vec<_> = analyzer.analyze(black_box(text)).unwrap().collect();
                black_box(tokens);
            }
        })
    });

    group.finish();
}

/// Benchmark TF-IDF vectorization.
fn bench_vectorization(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorization");

    let model = generate_test_model();
    let vectorizer = TfIdfVectorizer::default();
    let texts = generate_test_documents(100);

    group.throughput(Throughput::Elements(100));
    group.bench_function("transform_batch_documents", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(vectorizer.transform(black_box(text), &model).unwrap());
            }
        })
    });

    group.finish();
}

/// Benchmark end-to-end prediction.
fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");
    group.sample_size(30);

    let config = InferenceConfig {
        max_features: MAX_FEATURES,
        ..InferenceConfig::default()
    };
    let predictor = Predictor::new(Arc::new(generate_test_model()), &config).unwrap();
    let texts = generate_test_documents(500);

    group.bench_function("predict_single", |b| {
        b.iter(|| black_box(predictor.predict(black_box(&texts[0])).unwrap()))
    });

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("predict_sequential", |b| {
        b.iter(|| {
            for text in &texts {
                black_box(predictor.predict(text).unwrap());
            }
        })
    });

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("predict_batch_parallel", |b| {
        b.iter(|| black_box(predictor.predict_batch(&texts)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_analysis,
    bench_vectorization,
    bench_prediction
);

criterion_main!(benches);
