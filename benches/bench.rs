//! Criterion benchmarks for the payload synonym filter.
//!
//! Measures throughput of the filter over token streams with different
//! shares of payload-carrying tokens.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use payload_synonym::analysis::token::{Token, TokenStream, VecTokenStream};
use payload_synonym::analysis::token_filter::payload_synonym::{
    PayloadSynonymConfig, PayloadSynonymFilter,
};
use std::hint::black_box;

/// Generate tokens where every `every`-th token carries a payload.
fn generate_tokens(count: usize, every: usize) -> Vec<Token> {
    let words = [
        "search", "engine", "full", "text", "index", "query", "document", "field",
    ];
    let payloads = ["retrieval_lookup", "database", "term_word_token"];

    let mut offset = 0;
    (0..count)
        .map(|i| {
            let word = words[(i * 7) % words.len()];
            let token = Token::with_offsets(word, offset, offset + word.len());
            offset += word.len() + 1;
            if every > 0 && i % every == 0 {
                token.with_payload(payloads[i % payloads.len()])
            } else {
                token
            }
        })
        .collect()
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_synonym");
    let count = 10_000;

    for every in [0, 10, 1] {
        let tokens = generate_tokens(count, every);
        group.throughput(Throughput::Elements(count as u64));

        for multiple in [false, true] {
            let filter = PayloadSynonymFilter::new(
                PayloadSynonymConfig::default().with_multiple_tokens(multiple),
            )
            .unwrap();
            let id = format!("every_{every}_multiple_{multiple}");

            group.bench_with_input(BenchmarkId::from_parameter(id), &tokens, |b, tokens| {
                b.iter(|| {
                    let mut stream = filter.wrap(VecTokenStream::new(tokens.clone()));
                    let mut emitted = 0usize;
                    while let Some(token) = stream.next_token().unwrap() {
                        emitted += black_box(token).len();
                    }
                    emitted
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_expand);
criterion_main!(benches);
