use proptest::prelude::*;

use venue_console::models::{grid::default_row_label, GridMode, SeatGrid};

proptest! {
    // regular + vip + empty == rows*cols и total == regular + vip
    // для любого достижимого состояния сетки
    #[test]
    fn stats_partition_the_grid(
        rows in 1u32..12,
        cols in 1u32..12,
        ops in prop::collection::vec((0u32..12, 0u32..12), 0..64),
    ) {
        let mut grid = SeatGrid::create(rows, cols).unwrap();
        for (r, c) in ops {
            grid.cycle_seat(r % rows, c % cols).unwrap();
        }

        let stats = grid.stats();
        prop_assert_eq!(stats.regular + stats.vip + stats.empty, rows * cols);
        prop_assert_eq!(stats.total, stats.regular + stats.vip);
        prop_assert_eq!(grid.capacity(GridMode::Classification), stats.total);
        // планировочная вместимость — всегда площадь, разметка её не меняет
        prop_assert_eq!(grid.capacity(GridMode::Layout), rows * cols);
    }

    // цикл типов имеет длину 3: три переключения возвращают исходный тип
    #[test]
    fn triple_cycle_is_identity(
        rows in 1u32..10,
        cols in 1u32..10,
        seed in 0u32..100,
        warmup in 0u32..3,
    ) {
        let mut grid = SeatGrid::create(rows, cols).unwrap();
        let r = seed % rows;
        let c = (seed / 10) % cols;
        for _ in 0..warmup {
            grid.cycle_seat(r, c).unwrap();
        }

        let before = grid.seat(r, c).unwrap().seat_type;
        grid.cycle_seat(r, c).unwrap();
        grid.cycle_seat(r, c).unwrap();
        grid.cycle_seat(r, c).unwrap();
        prop_assert_eq!(grid.seat(r, c).unwrap().seat_type, before);
    }

    // правка подписи ряда меняет подписи только этого ряда
    // и не трогает ни один тип места
    #[test]
    fn row_label_edit_touches_single_row(
        rows in 2u32..10,
        cols in 1u32..10,
        seed in 0u32..100,
        label in "[a-z]{1,3}",
    ) {
        let target = seed % rows;
        let mut grid = SeatGrid::create(rows, cols).unwrap();
        grid.cycle_seat(target % rows, 0).unwrap();
        let before = grid.clone();

        grid.set_row_label(target, &label).unwrap();

        let upper = label.to_uppercase();
        for c in 0..cols {
            let expected = format!("{}{}", upper, c + 1);
            prop_assert_eq!(&grid.seats[target as usize][c as usize].label, &expected);
        }
        for r in 0..rows {
            for c in 0..cols {
                let (r, c) = (r as usize, c as usize);
                prop_assert_eq!(
                    grid.seats[r][c].seat_type,
                    before.seats[r][c].seat_type
                );
                if r as u32 != target {
                    prop_assert_eq!(&grid.seats[r][c].label, &before.seats[r][c].label);
                }
            }
        }
    }

    // подписи рядов по умолчанию уникальны на любой глубине
    #[test]
    fn default_labels_are_unique(rows in 1u32..200) {
        let labels: Vec<String> = (0..rows).map(default_row_label).collect();
        let mut dedup = labels.clone();
        dedup.sort();
        dedup.dedup();
        prop_assert_eq!(dedup.len(), labels.len());
        prop_assert!(labels.iter().all(|l| l.chars().all(|ch| ch.is_ascii_uppercase())));
    }

    // сетка всегда плотная и все клетки стартуют пустыми
    #[test]
    fn create_is_dense_and_empty(rows in 1u32..30, cols in 1u32..60) {
        let grid = SeatGrid::create(rows, cols).unwrap();
        prop_assert_eq!(grid.seats.len(), rows as usize);
        prop_assert!(grid.seats.iter().all(|r| r.len() == cols as usize));
        prop_assert_eq!(grid.stats().empty, rows * cols);
        prop_assert_eq!(grid.row_labels.len(), rows as usize);
    }
}
