//! Benchmarks for gostlint audit performance.
//!
//! Run with: cargo bench
//!
//! Documents are synthetic theses of growing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gostlint::{AuditOptions, Document};

const ENTRY: &str = "Шотт, А.В. Курс лекций по частной хирургии / А.В. Шотт, В.А. Шотт. – Минск : Асар, 2004. – 525 с.";

const WEB_ENTRY: &str = "Национальный правовой портал [Электронный ресурс] / Нац. центр правовой информ. – Минск, 2014. – Режим доступа: http://pravo.by. – Дата доступа: 20.05.2014.";

/// Creates a thesis with the given number of chapters.
fn create_thesis(chapters: usize) -> Document {
    let mut lines = vec![
        "Министерство образования".to_string(),
        "СОДЕРЖАНИЕ".to_string(),
        "Введение 3".to_string(),
        "ВВЕДЕНИЕ".to_string(),
        "Актуальность темы работы.".to_string(),
    ];

    for chapter in 1..=chapters {
        lines.push(format!("{} Глава номер {}", chapter, chapter));
        lines.push(format!("{}.1 Первый раздел", chapter));
        lines.push(format!(
            "Как видно на рисунке {}.1, результаты согласуются с [{}].",
            chapter, chapter
        ));
        lines.push(format!("Рисунок {}.1 – Схема", chapter));
        lines.push(format!("{}.2 Второй раздел", chapter));
        lines.push(format!("Данные приведены в таблице {}.", chapter));
        lines.push(format!("Таблица {} – Данные", chapter));
    }

    lines.push("ЗАКЛЮЧЕНИЕ".to_string());
    lines.push("Выводы.".to_string());
    lines.push("СПИСОК ИСПОЛЬЗОВАННЫХ ИСТОЧНИКОВ".to_string());
    for i in 1..=chapters {
        let entry = if i % 2 == 0 { WEB_ENTRY } else { ENTRY };
        lines.push(format!("{}. {}", i, entry));
    }

    Document::from_lines(lines.iter().map(String::as_str))
}

/// Benchmark citation parsing.
fn bench_citation_parsing(c: &mut Criterion) {
    c.bench_function("parse_book_citation", |b| {
        b.iter(|| gostlint::citation::parse(black_box(ENTRY)));
    });

    c.bench_function("parse_web_citation", |b| {
        b.iter(|| gostlint::citation::parse(black_box(WEB_ENTRY)));
    });
}

/// Benchmark full audits at various sizes.
fn bench_audit(c: &mut Criterion) {
    let mut group = c.benchmark_group("audit");
    let options = AuditOptions::default().with_formatting(false);

    for chapters in [1, 10, 50].iter() {
        let doc = create_thesis(*chapters);

        group.bench_function(format!("{}_chapters", chapters), |b| {
            b.iter(|| gostlint::audit(black_box(doc.clone()), &options));
        });
    }

    group.finish();
}

/// Benchmark builder pattern overhead.
fn bench_builder_creation(c: &mut Criterion) {
    c.bench_function("builder_creation", |b| {
        b.iter(|| {
            let _auditor = gostlint::Auditor::new()
                .whole_document()
                .without_formatting()
                .sequential();
        });
    });
}

criterion_group!(
    benches,
    bench_citation_parsing,
    bench_audit,
    bench_builder_creation,
);
criterion_main!(benches);
