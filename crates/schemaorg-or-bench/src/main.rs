//! Benchmark for JSON-LD serialization using synthetic loan documents.
//!
//! Builds N `LoanOrCredit` entities through the builder API, then times
//! serialization, text rendering, parsing and structural deserialization.
//!
//! Usage: `bench-loans [COUNT] [--json]`

use std::time::{Duration, Instant};

use schemaorg_or::codec::{
    deserialize, deserialize_with_options, serialize_with_options, DeserializeOptions,
    SerializeOptions,
};
use schemaorg_or::model::IsoDuration;
use schemaorg_or::vocab::vocabulary;
use schemaorg_or::{Entity, Registry};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_COUNT: usize = 50_000;
const DECODE_ITERS: u32 = 5;

const LOAN_TYPES: &[&str] = &["Mortgage", "Auto", "Personal", "Student"];
const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY"];

/// Machine-readable summary printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    entities: usize,
    properties: usize,
    bytes: usize,
    build_ms: f64,
    serialize_ms: f64,
    render_ms: f64,
    parse_ms: f64,
    deserialize_ms: f64,
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

fn throughput(bytes: usize, d: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / d.as_secs_f64()
}

fn build_loan(registry: &Registry, i: usize) -> Entity {
    let monetary_amount = registry
        .lookup("MonetaryAmount")
        .expect("MonetaryAmount is declared")
        .clone();
    let organization = registry
        .lookup("Organization")
        .expect("Organization is declared")
        .clone();

    let mut builder = registry
        .entity_builder("LoanOrCredit")
        .expect("LoanOrCredit is declared")
        .id(Uuid::now_v7().urn().to_string())
        .text("name", format!("Loan #{i}"))
        .text("loanType", LOAN_TYPES[i % LOAN_TYPES.len()])
        .text("currency", CURRENCIES[i % CURRENCIES.len()])
        .boolean("recourseLoan", i % 2 == 0)
        .duration("gracePeriod", IsoDuration::from_months(1 + (i % 6) as u32))
        .nested("provider", organization, |o| {
            o.id(Uuid::new_v4().urn().to_string())
                .text("name", format!("Lender {}", i % 97))
        });

    // Alternate between the two amount alternatives.
    builder = if i % 3 == 0 {
        builder.nested("amount", monetary_amount, |m| {
            m.text("currency", CURRENCIES[i % CURRENCIES.len()])
                .number("value", 1_000.0 + i as f64)
        })
    } else {
        builder.number("amount", 250.0 * (i % 400) as f64)
    };

    builder.build().expect("synthetic loan is well-typed")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut count = DEFAULT_COUNT;
    let mut json_report = false;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json_report = true;
        } else {
            count = arg.parse().expect("COUNT must be a positive integer");
        }
    }

    let registry = vocabulary();
    info!(types = registry.len(), "vocabulary ready");

    // Build entities using the builder API
    let build_start = Instant::now();
    let loans: Vec<Entity> = (0..count).map(|i| build_loan(registry, i)).collect();
    let build_time = build_start.elapsed();
    let properties: usize = loans.iter().map(Entity::len).sum();

    println!("Built {} loans ({} property values) in {:?}", loans.len(), properties, build_time);

    // Benchmark serialization to serde_json values
    let options = SerializeOptions::json_ld();
    let serialize_start = Instant::now();
    let documents: Vec<serde_json::Value> = loans
        .iter()
        .map(|loan| serialize_with_options(loan, &options))
        .collect();
    let serialize_time = serialize_start.elapsed();

    // Benchmark rendering to text
    let render_start = Instant::now();
    let texts: Vec<String> = documents.iter().map(|d| d.to_string()).collect();
    let render_time = render_start.elapsed();
    let bytes: usize = texts.iter().map(String::len).sum();

    println!("\nSerialize: {:?}", serialize_time);
    println!("Render: {} bytes in {:?}", bytes, render_time);
    println!("  Throughput: {:.2} MB/s", throughput(bytes, serialize_time + render_time));

    // Benchmark parsing
    let parse_start = Instant::now();
    let parsed: Vec<serde_json::Value> = texts
        .iter()
        .map(|t| serde_json::from_str(t).expect("rendered JSON parses"))
        .collect();
    let parse_time = parse_start.elapsed();

    println!("\nParse: {:?}", parse_time);
    println!("  Throughput: {:.2} MB/s", throughput(bytes, parse_time));

    // Benchmark structural deserialization
    let decode_options = DeserializeOptions::default();
    for doc in parsed.iter().take(100) {
        let _ = deserialize(registry, "LoanOrCredit", doc).expect("Failed to decode");
    }

    let decode_start = Instant::now();
    let mut decoded = Vec::new();
    for _ in 0..DECODE_ITERS {
        decoded = parsed
            .iter()
            .map(|doc| {
                deserialize_with_options(registry, "LoanOrCredit", doc, &decode_options)
                    .expect("Failed to decode")
            })
            .collect();
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;

    println!("\nDeserialize: {:?} (avg of {} iterations)", decode_time, DECODE_ITERS);
    println!("  Throughput: {:.2} MB/s", throughput(bytes, decode_time));

    // Verify round-trip
    assert_eq!(decoded.len(), loans.len());
    let mismatches = loans.iter().zip(&decoded).filter(|(a, b)| a != b).count();
    debug!(mismatches, "round-trip check");
    assert_eq!(mismatches, 0, "round-trip changed {mismatches} entities");
    println!("\nRound-trip verified for {} entities", decoded.len());

    if json_report {
        let report = Report {
            entities: loans.len(),
            properties,
            bytes,
            build_ms: millis(build_time),
            serialize_ms: millis(serialize_time),
            render_ms: millis(render_time),
            parse_ms: millis(parse_time),
            deserialize_ms: millis(decode_time),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("report serializes")
        );
    }
}
