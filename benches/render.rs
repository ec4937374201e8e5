//! Benchmarks for table rendering performance.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::cast_possible_truncation
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xltable::cell_ref::CellAddress;
use xltable::merge::MergeIndex;
use xltable::render::html::body_rows;
use xltable::render::{render_rows, RowPresentation};
use xltable::{
    BorderEdge, Borders, Cell, CellStyle, CellValue, ColorRef, Column, Fill, Font, MergeState,
    Row, Sheet,
};

/// Synthetic sheet: `rows` x `cols`, every third cell styled, a 2x2 merge
/// every tenth row.
fn synthetic_sheet(rows: u32, cols: u32) -> Sheet {
    let style = CellStyle {
        fill: Some(Fill {
            fg_color: Some(ColorRef::argb("FFFFF2CC")),
        }),
        border: Some(Borders {
            bottom: Some(BorderEdge {
                style: Some("thin".to_string()),
                color: Some(ColorRef::argb("FF000000")),
            }),
            ..Borders::default()
        }),
        font: Some(Font {
            name: Some("Calibri".to_string()),
            size: Some(11.0),
            bold: Some(true),
            ..Font::default()
        }),
        ..CellStyle::default()
    };

    let mut sheet = Sheet::new(1, "Large");
    sheet.columns = (0..cols).map(|_| Column::with_width(8.43)).collect();
    sheet.rows = (1..=rows)
        .map(|r| {
            let mut row = Row::new(r);
            row.cells = (1..=cols)
                .map(|c| {
                    let mut cell = Cell::new(r, c, CellValue::number(f64::from(r * c)));
                    if (r + c) % 3 == 0 {
                        cell.style = Some(style.clone());
                    }
                    if r % 10 == 1 && c <= 2 {
                        cell.merge = MergeState::Anchor;
                    }
                    cell
                })
                .collect();
            row
        })
        .collect();
    // Turn the anchors into real 2x2 ranges.
    for r in (1..=rows.saturating_sub(1)).filter(|r| r % 10 == 1) {
        let anchor = CellAddress::new(r, 1);
        for (dr, dc) in [(0, 1), (1, 0), (1, 1)] {
            let row = &mut sheet.rows[(r + dr - 1) as usize];
            row.cells[dc as usize].merge = MergeState::Member { anchor };
        }
    }
    sheet
}

fn bench_render_rows(c: &mut Criterion) {
    let sheet = synthetic_sheet(5000, 20);
    let merges = MergeIndex::build(&sheet.rows);

    let mut group = c.benchmark_group("render_rows");
    group.throughput(Throughput::Elements(5000 * 20));
    group.bench_function("presentations_5000x20", |b| {
        b.iter(|| render_rows(black_box(&sheet), &merges).count())
    });
    group.finish();
}

fn bench_html_batches(c: &mut Criterion) {
    let sheet = synthetic_sheet(5000, 20);
    let merges = MergeIndex::build(&sheet.rows);
    let rows: Vec<RowPresentation> = render_rows(&sheet, &merges).collect();

    let mut group = c.benchmark_group("html_batches");
    for chunk in [100usize, 500, 2000] {
        group.bench_with_input(BenchmarkId::new("serialize", chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                rows.chunks(chunk)
                    .map(|batch| body_rows(black_box(batch)).len())
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}

fn bench_merge_index(c: &mut Criterion) {
    let sheet = synthetic_sheet(5000, 20);
    c.bench_function("merge_index_5000x20", |b| {
        b.iter(|| MergeIndex::build(black_box(&sheet.rows)).len())
    });
}

criterion_group!(benches, bench_render_rows, bench_html_batches, bench_merge_index);

criterion_main!(benches);
