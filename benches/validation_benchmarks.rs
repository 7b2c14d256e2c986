use criterion::{Criterion, criterion_group, criterion_main};
use motivatr::prelude::*;
use std::hint::black_box;

fn bench_string_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_rules");

    let record = Record::new()
        .with("latin", "Hello World 123")
        .with("cyrillic", "Привет мир")
        .with("email", "test.user+tag@domain.co.uk");

    group.bench_function("max_latin", |b| {
        let rule = Max(100);
        b.iter(|| rule.evaluate(black_box(&record), "latin"))
    });

    group.bench_function("max_cyrillic", |b| {
        let rule = Max(100);
        b.iter(|| rule.evaluate(black_box(&record), "cyrillic"))
    });

    group.bench_function("regex_san", |b| {
        let rule = Regex::san();
        b.iter(|| rule.evaluate(black_box(&record), "latin"))
    });

    group.bench_function("regex_email", |b| {
        let rule = Regex::email();
        b.iter(|| rule.evaluate(black_box(&record), "email"))
    });

    group.finish();
}

fn bench_composite_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite_rules");

    let strong = Record::new().with("password", "Abcdefg1");
    let weak = Record::new().with("password", "abcdefgh");

    group.bench_function("password_strong", |b| {
        let rule = Password::new();
        b.iter(|| rule.evaluate(black_box(&strong), "password"))
    });

    group.bench_function("password_weak", |b| {
        let rule = Password::new();
        b.iter(|| rule.evaluate(black_box(&weak), "password"))
    });

    group.bench_function("date", |b| {
        let record = Record::new().with("deadline", "2024-02-29");
        b.iter(|| Date.evaluate(black_box(&record), "deadline"))
    });

    group.finish();
}

fn bench_validator(c: &mut Criterion) {
    let mut group = c.benchmark_group("validator");

    let rules = RuleSet::new()
        .field("name", rule_chain![Required, Min(2), Max(30), Regex::san()])
        .field("email", rule_chain![Required, Max(255), Regex::email()])
        .field("password", rule_chain![Required, Password::new()])
        .field("password_confirmation", rule_chain![Same::new("password")])
        .field("birthday", rule_chain![Required, Date])
        .field("tags", rule_chain![Max(10)]);

    let valid = Record::new()
        .with("name", "Ada Lovelace")
        .with("email", "ada@example.com")
        .with("password", "Analytical1")
        .with("password_confirmation", "Analytical1")
        .with("birthday", "2001-12-10")
        .with("tags", vec!["math", "engines"]);

    let invalid = Record::new()
        .with("name", "A")
        .with("email", "ada@")
        .with("password", "abc")
        .with("birthday", "1999-01-01");

    group.bench_function("valid_record", |b| {
        b.iter(|| {
            let mut validator = Validator::new(black_box(&valid), &rules);
            validator.validate().unwrap();
            validator.failed()
        })
    });

    group.bench_function("invalid_record", |b| {
        b.iter(|| {
            let mut validator = Validator::new(black_box(&invalid), &rules);
            validator.validate().unwrap();
            validator.into_errors()
        })
    });

    group.finish();
}

criterion_group!(
    validation_benches,
    bench_string_rules,
    bench_composite_rules,
    bench_validator,
);

criterion_main!(validation_benches);
