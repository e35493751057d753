use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cubesolver::coord::CoordCube;
use cubesolver::cubie::CubieCube;
use cubesolver::moves::Move::*;
use cubesolver::tables::SolverTables;
use cubesolver::{Solver, SolverConfig};

fn cc_apply_moves() {
    let cc = CubieCube::default();
    let _ = cc.apply_moves(&[R, U, R3, U3]);
}

fn cc_multi_moves() {
    let mut cc = CubieCube::default();
    cc.multiply_moves(&[R, U, R3, U3]);
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("CubieCube Moves");
    group.bench_function("multiply_moves", |b| b.iter(cc_multi_moves));
    group.bench_function("apply_moves", |b| b.iter(cc_apply_moves));
    group.finish();
}

fn bench_solver(c: &mut Criterion) {
    let tables = Arc::new(SolverTables::build().unwrap());
    let solver = Solver::new(Arc::clone(&tables), SolverConfig::default());
    c.bench_function("Solver", |b| {
        b.iter(|| {
            solver
                .solve_from_state("RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF")
                .unwrap()
        })
    });

    let mut rng = StdRng::seed_from_u64(0);
    let cubes: Vec<CubieCube> = (0..16)
        .map(|_| {
            let mut cc = CubieCube::default();
            cc.randomize_with(&mut rng);
            cc
        })
        .collect();
    c.bench_function("Solver random cubes", |b| {
        b.iter(|| {
            for cc in &cubes {
                solver.solve(cc).unwrap();
            }
        })
    });

    c.bench_function("CoordCube phase1 moves", |b| {
        b.iter(|| {
            let mut cdc = CoordCube::default();
            for m in [R, U, F3, D2, L, B3, R2, U3] {
                cdc.phase1_move(m, &tables.mv, &tables.em);
            }
            cdc
        })
    });
}

criterion_group!(benches, bench_solver, bench_moves);
criterion_main!(benches);
