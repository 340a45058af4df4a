//! Benchmarks for the per-round text paths of the agent loop.
//!
//! Performance-critical paths:
//! - `OutputInterpreter::interpret`: finish-marker split and action regex
//! - `scratchpad::zero_shot` / `scratchpad::conversational`: history rendering
//!   rebuilt on every round

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stepwise_agents::planner::scratchpad;
use stepwise_agents::{Action, OutputInterpreter, Step};

fn bench_interpret(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_parsing/interpret");

    let zero_shot = OutputInterpreter::zero_shot("output");
    let conversational = OutputInterpreter::conversational("output");

    let inputs = [
        ("finish", "Thought: I know.\nFinal Answer: 42"),
        ("action", "Action: Search\nAction Input: capital of France"),
        (
            "multiline_input",
            "Thought: write it\nAction: Write\nAction Input: fn main() {\n    println!(\"hi\");\n}\n",
        ),
        ("unparseable", "I am not sure what to do next."),
    ];

    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("zero_shot", *name), *input, |b, i| {
            b.iter(|| zero_shot.interpret(black_box(i)));
        });
    }

    let chat = "Thought: Do I need to use a tool? Yes\nAction: Search\nAction Input: weather";
    group.bench_with_input(BenchmarkId::new("conversational", "action"), chat, |b, i| {
        b.iter(|| conversational.interpret(black_box(i)));
    });

    group.finish();
}

fn bench_interpret_long_reasoning(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_parsing/long_reasoning");
    let interpreter = OutputInterpreter::zero_shot("output");

    for size in [1_000usize, 10_000, 100_000] {
        let text = format!(
            "Thought: {}\nAction: Search\nAction Input: rust",
            "considering options ".repeat(size / 20)
        );
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, t| {
            b.iter(|| interpreter.interpret(black_box(t)));
        });
    }

    group.finish();
}

fn history(len: usize) -> Vec<Step> {
    (0..len)
        .map(|i| {
            Step::new(
                Action::new(
                    "Search",
                    format!("query {i}"),
                    format!("Thought: step {i}\nAction: Search\nAction Input: query {i}"),
                ),
                format!("observation number {i}"),
            )
        })
        .collect()
}

fn bench_scratchpad(c: &mut Criterion) {
    let mut group = c.benchmark_group("output_parsing/scratchpad");

    for len in [1usize, 5, 25] {
        let steps = history(len);
        group.bench_with_input(BenchmarkId::new("zero_shot", len), &steps, |b, s| {
            b.iter(|| scratchpad::zero_shot(black_box(s)));
        });
        group.bench_with_input(BenchmarkId::new("conversational", len), &steps, |b, s| {
            b.iter(|| scratchpad::conversational(black_box(s)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_interpret,
    bench_interpret_long_reasoning,
    bench_scratchpad
);
criterion_main!(benches);
