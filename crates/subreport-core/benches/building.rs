use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use subreport_core::ReportBuilder;

fn generate_payload(projects: usize, students: usize, per_student: usize) -> Value {
    let mut records = Vec::new();
    for p in 0..projects {
        for s in 0..students {
            for i in 0..per_student {
                let owner = if i % 3 == 0 {
                    "codepath".to_string()
                } else {
                    format!("student-{s}")
                };
                let kind = if i % 2 == 0 { "COMMENT" } else { "PULL_REQUEST" };
                let date = format!(
                    "2025-{:02}-{:02}T12:00:00Z",
                    1 + (i % 12),
                    1 + ((p + s + i) % 28)
                );
                records.push(json!({
                    "submission_type": kind,
                    "student": format!("student-{s}"),
                    "owner_name": owner,
                    "repo_name": format!("project-{p}"),
                    "repository": format!("{owner}/project-{p}"),
                    "issue_number": i + 1,
                    "issue_title": format!("Week {i}"),
                    "comment_id": 1000 + i,
                    "pr_number": i + 1,
                    "pr_title": format!("Week {i} submission"),
                    "is_valid": i % 4 != 0,
                    "validity_reasons": ["Missing attachment"],
                    "submission_date": date,
                }));
            }
        }
    }
    json!({ "success": true, "report": { "submissions": records } })
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_report");

    let small = generate_payload(2, 5, 4);
    let medium = generate_payload(5, 40, 8);
    let large = generate_payload(10, 200, 10);
    let builder = ReportBuilder::new("codepath");

    group.bench_function("40_records", |b| {
        b.iter(|| builder.build(black_box(&small)))
    });

    group.bench_function("1600_records", |b| {
        b.iter(|| builder.build(black_box(&medium)))
    });

    group.bench_function("20000_records", |b| {
        b.iter(|| builder.build(black_box(&large)))
    });

    group.finish();
}

fn bench_activity(c: &mut Criterion) {
    let report = ReportBuilder::new("codepath")
        .build(&generate_payload(5, 40, 8))
        .expect("bench payload is well-formed");

    c.bench_function("student_activity", |b| {
        b.iter(|| black_box(&report).student_activity())
    });
}

criterion_group!(benches, bench_build, bench_activity);
criterion_main!(benches);
