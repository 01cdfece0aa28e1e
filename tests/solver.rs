use rand::rngs::StdRng;
use rand::SeedableRng;

use cdoku::generate::{generate, generate_grid, GenerateOptions};
use cdoku::grid::positions;
use cdoku::puzzle::CageType;
use cdoku::solve::{solve, SolveResult};
use cdoku::{Grid, Pos, Puzzle};

#[test]
fn unique_3x3() {
    let puzzle = Puzzle::parse(
        "A+7\tA\tB-1\n\
         A\t2\tB\n\
         C*6\tC\tC\n",
    )
    .unwrap();
    let data = match solve(&puzzle) {
        SolveResult::Unique(data) => data,
        _ => panic!("expected a unique solution"),
    };
    let expected = [[1, 3, 2], [3, 2, 1], [2, 1, 3]];
    for (y, row) in expected.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            assert_eq!(data.solution[Pos::new(x, y)], value);
        }
    }
}

#[test]
fn dual_2x2() {
    // one sum cage over the whole grid: both Latin squares satisfy it
    let puzzle = Puzzle::parse(
        "A+6\tA\n\
         A\tA\n",
    )
    .unwrap();
    assert!(matches!(solve(&puzzle), SolveResult::Multiple(_)));
}

#[test]
fn unsolvable_prime_product() {
    // 5 is prime and exceeds the 4×4 value range
    let puzzle = Puzzle::parse(
        "A*5\tA\t0\t0\n\
         0\t0\t0\t0\n\
         0\t0\t0\t0\n\
         0\t0\t0\t0\n",
    )
    .unwrap();
    assert!(matches!(solve(&puzzle), SolveResult::Unsolvable));
}

#[test]
fn generator_round_trip() {
    let mut rng = StdRng::seed_from_u64(2024);
    let grid = generate_grid(6, &mut rng);
    let options = GenerateOptions {
        iterations: 20,
        ..GenerateOptions::default()
    };
    let (puzzle, difficulty) = generate(&grid, 6, &options, &mut rng);

    // cages partition exactly the blanked cells; everything else keeps
    // its solution value
    for pos in positions(6) {
        match puzzle.cage_at(pos) {
            Some(id) => {
                assert!(puzzle.cage(id).cells().contains(&pos));
                assert_eq!(puzzle.givens()[pos], 0);
            }
            None => assert_eq!(puzzle.givens()[pos], grid[pos]),
        }
    }

    // the puzzle solves uniquely, back to the grid that seeded it
    let data = match solve(&puzzle) {
        SolveResult::Unique(data) => data,
        _ => panic!("generated puzzle must be uniquely solvable"),
    };
    assert_eq!(data.solution, grid);
    assert_eq!(data.difficulty, difficulty);
}

#[test]
fn generated_puzzle_round_trips_through_text() {
    let mut rng = StdRng::seed_from_u64(7);
    let grid = generate_grid(5, &mut rng);
    let options = GenerateOptions {
        iterations: 10,
        ..GenerateOptions::default()
    };
    let (puzzle, _) = generate(&grid, 5, &options, &mut rng);

    let mut text = Vec::new();
    cdoku::puzzle::print::write_puzzle(&puzzle, puzzle.givens(), &mut text).unwrap();
    let reparsed = Puzzle::parse(std::str::from_utf8(&text).unwrap()).unwrap();
    assert_eq!(puzzle, reparsed);
}

#[test]
fn two_cell_flag_is_honoured() {
    let mut rng = StdRng::seed_from_u64(11);
    let grid = generate_grid(6, &mut rng);
    let options = GenerateOptions {
        two_cell: true,
        iterations: 20,
        ..GenerateOptions::default()
    };
    let (puzzle, _) = generate(&grid, 6, &options, &mut rng);
    for (_, cage) in puzzle.cages() {
        if matches!(cage.cage_type(), CageType::Difference | CageType::Ratio) {
            assert!(cage.size() <= 2);
        }
    }
}

#[test]
fn forced_puzzle_difficulty_counts_empty_cells() {
    // empty the diagonal of a full grid: every step is forced, so the
    // difficulty is exactly the number of empty cells (B = 0, M = 100)
    let mut rng = StdRng::seed_from_u64(5);
    let grid = generate_grid(6, &mut rng);
    let blanks = [Pos::new(0, 0), Pos::new(1, 1), Pos::new(2, 2)];
    let text = grid_to_text(&grid, 6, &blanks);
    let puzzle = Puzzle::parse(&text).unwrap();

    let data = match solve(&puzzle) {
        SolveResult::Unique(data) => data,
        _ => panic!("expected a unique solution"),
    };
    assert_eq!(data.difficulty, 3);
    assert_eq!(data.solution, grid);
}

fn grid_to_text(grid: &Grid, size: usize, blanks: &[Pos]) -> String {
    let mut text = String::new();
    for y in 0..size {
        for x in 0..size {
            let pos = Pos::new(x, y);
            if x > 0 {
                text.push('\t');
            }
            let value = if blanks.contains(&pos) { 0 } else { grid[pos] };
            text.push_str(&value.to_string());
        }
        text.push('\n');
    }
    text
}
