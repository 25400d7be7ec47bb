use birds_core::{BirdKind, Cell, Position, WorldConfig};
use birds_world::{
    advance_one_year, find_free_neighbors, initialize, simulation_rng, Grid, Population, Warming,
};
use proptest::prelude::*;

fn world_strategy() -> impl Strategy<Value = WorldConfig> {
    (1u32..12, 1u32..12, 0.0f64..=1.0, 0.0f64..=1.0).prop_map(
        |(rows, columns, habitable_ratio, population_density)| WorldConfig {
            rows,
            columns,
            habitable_ratio,
            population_density,
        },
    )
}

proptest! {
    #[test]
    fn occupancy_matches_population_every_year(
        world in world_strategy(),
        seed in any::<u64>(),
        step in 0.0f64..0.1,
    ) {
        let mut rng = simulation_rng(Some(seed));
        let (mut grid, mut population) = initialize(&world, &mut rng).unwrap();
        let mut warming = Warming::NONE;

        for _ in 0..15 {
            let before = population.len();
            let outcome = advance_one_year(&mut grid, population, warming, &mut rng);
            population = outcome.population;

            prop_assert!(population.verify_against(&grid).is_ok());
            prop_assert!(population.len() <= before * 2);
            prop_assert_eq!(
                population.len(),
                before + outcome.report.births.total() - outcome.report.deaths()
            );
            warming = warming.advance(step).unwrap();
        }
    }

    #[test]
    fn survivors_age_by_exactly_one(seed in any::<u64>(), level in 0.0f64..0.8) {
        let world = WorldConfig { rows: 9, columns: 9, habitable_ratio: 0.9, population_density: 0.6 };
        let mut rng = simulation_rng(Some(seed));
        let (mut grid, population) = initialize(&world, &mut rng).unwrap();
        let before: Vec<_> = population.iter().copied().collect();
        let warming = Warming::new(level).unwrap();

        let outcome = advance_one_year(&mut grid, population, warming, &mut rng);

        for bird in outcome.population.iter() {
            // Newborns start at 1; every survivor was at least 1 last year
            if bird.age == 1 {
                continue;
            }
            let previous = before.iter().find(|b| b.position == bird.position);
            prop_assert!(previous.is_some());
            let previous = previous.unwrap();
            prop_assert!(previous.age <= 5);
            prop_assert_eq!(bird.age, previous.age + 1);
            prop_assert_eq!(bird.kind, previous.kind);
        }
    }

    #[test]
    fn corner_search_wraps(rows in 3usize..20, columns in 3usize..20) {
        let mut grid = Grid::filled(rows, columns, Cell::Void).unwrap();
        let far_corner = Position::new(rows - 1, columns - 1);
        grid.set(far_corner, Cell::Empty);
        grid.occupy(Position::new(0, 0), BirdKind::Resident, 1);

        let free = find_free_neighbors(&grid, Position::new(0, 0));
        prop_assert_eq!(free, vec![far_corner]);
    }

    #[test]
    fn no_migrant_survives_collapsed_window(seed in any::<u64>(), level in 0.45f64..3.0) {
        let world = WorldConfig { rows: 8, columns: 8, habitable_ratio: 1.0, population_density: 1.0 };
        let mut rng = simulation_rng(Some(seed));
        let (mut grid, population) = initialize(&world, &mut rng).unwrap();

        let outcome = advance_one_year(&mut grid, population, Warming::new(level).unwrap(), &mut rng);

        prop_assert_eq!(outcome.population.count_by_kind().migratory, 0);
        prop_assert_eq!(outcome.report.births.migratory, 0);
    }
}

#[test]
fn old_birds_never_survive() {
    let mut grid = Grid::filled(5, 5, Cell::Empty).unwrap();
    grid.occupy(Position::new(0, 0), BirdKind::Migratory, 6);
    grid.occupy(Position::new(2, 2), BirdKind::Resident, 9);
    grid.occupy(Position::new(4, 4), BirdKind::Resident, 5);
    let population = Population::from_grid(&grid);
    let mut rng = simulation_rng(Some(123));

    let outcome = advance_one_year(&mut grid, population, Warming::NONE, &mut rng);

    assert!(outcome.population.iter().all(|b| b.age <= 6));
    assert_eq!(outcome.report.deaths_old_age, 2);
    assert!(outcome
        .population
        .iter()
        .any(|b| b.position == Position::new(4, 4) && b.age == 6));
}
