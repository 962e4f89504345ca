//! This bench test simulates moving a large selection of courses between
//! semesters in a long plan.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use planner::{
    CatalogCode, Course, PlanSnapshot, Planner, Season, Semester, SemesterCode, SemesterId,
};

/// Generates a twelve-year plan with a full load in every term.
fn preseed_planner() -> (Planner, Vec<SemesterId>) {
    let mut semesters = Vec::new();
    let mut term = SemesterCode::new(2024, Season::Fall);
    for _ in 0..36 {
        let mut semester = Semester::new(term);
        semester.courses = (0..6)
            .map(|i| Course::new(CatalogCode::new(format!("CS {}3{i:02}", term.year % 10)).unwrap()))
            .collect();
        semesters.push(semester);
        term = term.next();
    }

    let ids = semesters.iter().map(|s| s.id).collect();
    let planner = Planner::from_snapshot(PlanSnapshot {
        semesters,
        ..PlanSnapshot::default()
    });
    (planner, ids)
}

fn bulk_moves(c: &mut Criterion) {
    c.bench_function("move selected courses", |b| {
        b.iter_batched(
            || {
                let (mut planner, ids) = preseed_planner();
                for id in &ids[1..] {
                    planner.select_all_courses(*id);
                }
                (planner, ids[0])
            },
            |(mut planner, target)| {
                assert!(planner.move_selected_courses(target).is_applied());
                planner
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("delete selected courses", |b| {
        b.iter_batched(
            || {
                let (mut planner, ids) = preseed_planner();
                for id in ids.iter().step_by(2) {
                    planner.select_all_courses(*id);
                }
                planner
            },
            |mut planner| {
                assert!(planner.delete_selected_courses().is_applied());
                planner
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bulk_moves);
criterion_main!(benches);
