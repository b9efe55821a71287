use criterion::{black_box, criterion_group, criterion_main, Criterion};

use emotion_corpus::builder::{BuildOptions, CorpusBuilder};
use emotion_corpus::metrics::PipelineMetrics;
use emotion_corpus::models::CorpusRow;
use emotion_corpus::sanitizer::TextSanitizer;

const TWEET: &str = "\"2017-08-16 19:10:26\",\"897898364787978241\",\"RT @tushy_com: RT if you wouldn't mind being stuck in between @rileyreidx3 &amp; @AidraFOfficial! 😍 #tushy https://t.co/mkUvdIvyeW\"\n";

fn bench_clean(c: &mut Criterion) {
    let sanitizer = TextSanitizer::new().expect("sanitizer");
    c.bench_function("clean_tweet", |b| b.iter(|| sanitizer.clean(black_box(TWEET))));
}

fn bench_process_dump(c: &mut Criterion) {
    let builder = CorpusBuilder::new(BuildOptions::default()).expect("builder");
    let dump: String = (0..1000)
        .map(|i| {
            if i % 3 == 0 {
                TWEET.to_string()
            } else {
                format!("\"2017-08-16 19:10:26\",\"{:018}\",\"nothing to see here\"\n", i)
            }
        })
        .collect();

    c.bench_function("process_1000_records", |b| {
        b.iter(|| {
            let mut rows: Vec<CorpusRow> = Vec::new();
            let mut metrics = PipelineMetrics::default();
            builder
                .process_reader(black_box(dump.as_bytes()), &mut rows, &mut metrics)
                .expect("process");
            rows
        });
    });
}

criterion_group!(benches, bench_clean, bench_process_dump);
criterion_main!(benches);
