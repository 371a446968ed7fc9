use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use langident::features::{extract_features, FeatureType};
use langident::tokenization::{clean_and_lower_text, hash32};
use langident::{LangIdentConfig, LanguageIdentifier};

#[path = "../common/mod.rs"]
mod common;

const SAMPLES: [(&str, &str); 4] = [
    ("en", "This is a short piece of text used to measure identification latency."),
    ("de", "Dies ist ein kurzer Text, der die Geschwindigkeit der Erkennung misst."),
    ("ko", "이것은 언어 식별 속도를 측정하기 위한 짧은 텍스트입니다."),
    ("zh", "这是一段用于测量语言识别速度的短文本。"),
];

fn identifier() -> LanguageIdentifier {
    match common::real_model_dir() {
        Some(model_dir) => {
            let config = LangIdentConfig {
                model_dir,
                ..LangIdentConfig::default()
            };
            LanguageIdentifier::from_config(&config).unwrap()
        }
        None => LanguageIdentifier::new(
            common::script_routing_model().build_arc(),
            &LangIdentConfig::default(),
        )
        .unwrap(),
    }
}

fn benchmark_hash(c: &mut Criterion) {
    c.bench_function("hash32_quadgram", |b| {
        b.iter(|| hash32(black_box("^abc".as_bytes())))
    });
}

fn benchmark_feature_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_extraction");
    for (lang, text) in SAMPLES {
        let cleaned = clean_and_lower_text(text);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lang), &cleaned, |b, cleaned| {
            b.iter(|| extract_features(black_box(cleaned), &FeatureType::MODEL_LAYOUT).unwrap())
        });
    }
    group.finish();
}

fn benchmark_find_language(c: &mut Criterion) {
    let id = identifier();
    let mut group = c.benchmark_group("find_language");
    for (lang, text) in SAMPLES {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lang), &text, |b, text| {
            b.iter(|| id.find_language(black_box(*text)).unwrap())
        });
    }

    let long_text = SAMPLES[0].1.repeat(200);
    group.throughput(Throughput::Bytes(long_text.len() as u64));
    group.bench_function("truncated_long_input", |b| {
        b.iter(|| id.find_language(black_box(&long_text)).unwrap())
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_hash,
    benchmark_feature_extraction,
    benchmark_find_language
);
criterion_main!(benches);
