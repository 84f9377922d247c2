//! Module ordering benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use modsort::{DefaultModuleSorter, Module, ModuleSorter, TieBreak};

/// Layered graph: every module depends on up to `fan_in` modules of the
/// previous layer, plus one undeclared name.
fn layered_modules(layers: usize, width: usize, fan_in: usize) -> Vec<Module> {
    let mut modules = Vec::with_capacity(layers * width);
    for layer in 0..layers {
        for slot in 0..width {
            let mut module = Module::new(format!("l{}_{}", layer, slot));
            if layer > 0 {
                for k in 0..fan_in.min(width) {
                    module.add_dependency(format!("l{}_{}", layer - 1, (slot + k) % width));
                }
            }
            module.add_dependency("external");
            modules.push(module);
        }
    }
    modules.reverse();
    modules
}

fn benchmark_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_modules");

    for &(layers, width) in &[(10, 10), (100, 100), (1000, 50)] {
        let modules = layered_modules(layers, width, 4);
        let label = format!("{}x{}", layers, width);

        for tie_break in [TieBreak::InputOrder, TieBreak::Lexical] {
            let sorter = DefaultModuleSorter::with_tie_break(tie_break);
            group.bench_with_input(
                BenchmarkId::new(tie_break.to_string(), &label),
                &modules,
                |b, modules| {
                    b.iter(|| black_box(sorter.sort_refs(modules).unwrap()));
                },
            );
        }
    }

    group.finish();
}

fn benchmark_cycle_report(c: &mut Criterion) {
    let mut modules = layered_modules(100, 100, 4);
    if let Some(first_root) = modules.iter_mut().find(|m| m.name() == "l0_0") {
        first_root.add_dependency("l99_0");
    }

    c.bench_function("cycle_report_100x100", |b| {
        let sorter = DefaultModuleSorter::new();
        b.iter(|| black_box(sorter.sort_refs(&modules).unwrap_err()));
    });
}

criterion_group!(benches, benchmark_sort, benchmark_cycle_report);
criterion_main!(benches);
