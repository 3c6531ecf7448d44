use criterion::{black_box, criterion_group, criterion_main, Criterion};
use league_core::batch::title_odds;
use league_core::probability::ProbabilityEstimator;
use league_core::roster::{build_teams, TeamRecord, WeekSelector};
use league_core::schedule::ScheduleBuilder;
use league_core::simulator::Simulator;

fn create_roster(teams: usize) -> Vec<TeamRecord> {
    (0..teams).map(|i| TeamRecord::named(format!("Team{}", i))).collect()
}

fn bench_schedule(c: &mut Criterion) {
    let greedy = ScheduleBuilder::new(16).unwrap();
    c.bench_function("schedule_16_team_greedy", |b| b.iter(|| black_box(&greedy).build()));

    let circle = ScheduleBuilder::new(20).unwrap();
    c.bench_function("schedule_20_team_fallback", |b| b.iter(|| black_box(&circle).build()));
}

fn bench_probability(c: &mut Criterion) {
    let mut teams = build_teams(&create_roster(20)).unwrap();
    for (i, team) in teams.iter_mut().enumerate() {
        team.points = (i * 7 % 40) as u32;
    }
    let mut estimator = ProbabilityEstimator::new();
    estimator.set_teams(&teams);

    c.bench_function("probability_20_teams", |b| {
        b.iter(|| {
            estimator.compute(black_box(&mut teams), 1);
        })
    });
}

fn bench_championship(c: &mut Criterion) {
    let roster = create_roster(20);

    c.bench_function("championship_20_teams", |b| {
        b.iter(|| {
            let mut simulator = Simulator::new(WeekSelector::All, black_box(&roster)).unwrap();
            simulator.run_seeded(Some(42))
        })
    });

    let small = create_roster(4);
    c.bench_function("title_odds_1000_sims", |b| {
        b.iter(|| title_odds(black_box(&small), 1000, Some(42)).unwrap())
    });
}

criterion_group!(benches, bench_schedule, bench_probability, bench_championship);
criterion_main!(benches);
