// End-to-end tests for division pipelines

use baca::divisions::{
    flatten, from_flat_pairs, is_contiguous, leaves, total_duration, Count, Depth, Division,
    DivisionError, DivisionMaker, FuseByCounts, Nested, PartitionByCounts, SplitByDurations,
};
use baca::models::{Duration, DurationError, Offset, Side};

fn d(n: i64, den: i64) -> Duration {
    Duration::new(n, den).unwrap()
}

fn leaf_pairs(items: &[Nested<Division>]) -> Vec<(i64, i64)> {
    leaves(items).into_iter().map(Division::pair).collect()
}

/// Group structure as pairs, one level deep
fn group_pairs(items: &[Nested<Division>]) -> Vec<Vec<(i64, i64)>> {
    items
        .iter()
        .map(|item| item.leaves().into_iter().map(Division::pair).collect())
        .collect()
}

#[test]
fn test_split_seven_eighths_by_quarters() {
    let maker = DivisionMaker::new()
        .split_by_durations(SplitByDurations::new(vec![d(1, 4)]))
        .unwrap();
    let output = maker.call(from_flat_pairs(&[(7, 8)]).unwrap()).unwrap();

    assert_eq!(group_pairs(&output), vec![vec![(1, 4), (1, 4), (1, 4), (1, 8)]]);
    let starts: Vec<Option<Offset>> = leaves(&output)
        .into_iter()
        .map(Division::start_offset)
        .collect();
    assert_eq!(
        starts,
        vec![
            Some(Offset::new(0, 1)),
            Some(Offset::new(1, 4)),
            Some(Offset::new(1, 2)),
            Some(Offset::new(3, 4)),
        ]
    );
}

#[test]
fn test_split_left_remainder() {
    let maker = DivisionMaker::new()
        .split_by_durations(SplitByDurations::new(vec![d(1, 4)]).with_remainder(Side::Left))
        .unwrap();
    let output = maker.call(from_flat_pairs(&[(7, 8)]).unwrap()).unwrap();
    assert_eq!(leaf_pairs(&output), vec![(1, 8), (1, 4), (1, 4), (1, 4)]);
}

#[test]
fn test_fuse_by_two() {
    let maker = DivisionMaker::new()
        .fuse_by_counts(vec![Count::Finite(2)], true)
        .unwrap();
    let output = maker
        .call(from_flat_pairs(&[(7, 8), (3, 8), (5, 8)]).unwrap())
        .unwrap();

    assert_eq!(leaf_pairs(&output), vec![(10, 8), (5, 8)]);
    assert_eq!(
        leaves(&output)[1].start_offset(),
        Some(Offset::new(5, 4))
    );
}

#[test]
fn test_fuse_then_split() {
    let maker = DivisionMaker::new()
        .fuse_by_counts(vec![Count::Infinite], true)
        .unwrap()
        .split_by_durations(SplitByDurations::new(vec![d(3, 8)]))
        .unwrap();
    let output = maker.call(from_flat_pairs(&[(2, 4), (2, 4)]).unwrap()).unwrap();
    assert_eq!(group_pairs(&output), vec![vec![(3, 8), (3, 8), (1, 4)]]);
}

#[test]
fn test_split_partition_flatten() {
    let maker = DivisionMaker::new()
        .split_by_durations(SplitByDurations::new(vec![d(1, 4)]))
        .unwrap()
        .partition_by_counts(PartitionByCounts::new(vec![Count::Finite(2)]))
        .unwrap();
    let nested = maker.call(from_flat_pairs(&[(3, 4), (2, 4)]).unwrap()).unwrap();

    // One output group per split input, each holding its partitions
    assert_eq!(nested.len(), 2);
    match &nested[0] {
        Nested::Group(parts) => assert_eq!(group_pairs(parts), vec![
            vec![(1, 4), (1, 4)],
            vec![(1, 4)],
        ]),
        other => panic!("expected group, got {:?}", other),
    }

    let flat = maker.flatten(Depth::Levels(1));
    let output = flat.call(from_flat_pairs(&[(3, 4), (2, 4)]).unwrap()).unwrap();
    assert_eq!(
        group_pairs(&output),
        vec![
            vec![(1, 4), (1, 4)],
            vec![(1, 4)],
            vec![(1, 4), (1, 4)],
        ]
    );
    assert!(is_contiguous(&output));
}

#[test]
fn test_pipelines_conserve_total_duration() {
    let input = from_flat_pairs(&[(7, 8), (3, 8), (5, 16), (9, 8)]).unwrap();
    let total = total_duration(&input).unwrap();

    let makers = vec![
        DivisionMaker::new()
            .split_by_durations(SplitByDurations::new(vec![d(1, 4), d(1, 8)]))
            .unwrap(),
        DivisionMaker::new()
            .fuse_by_counts(vec![Count::Finite(3)], false)
            .unwrap(),
        DivisionMaker::new()
            .split_by_rounded_ratios(vec![vec![2, 1], vec![1, 1, 1]])
            .unwrap()
            .flatten(Depth::Unbounded),
        DivisionMaker::new()
            .split_by_durations(
                SplitByDurations::new(vec![d(1, 4)])
                    .with_compound_meter_multiplier(baca::Rational::new(3, 2))
                    .with_remainder_fuse_threshold(d(1, 8)),
            )
            .unwrap()
            .partition_by_counts(
                PartitionByCounts::new(vec![Count::Finite(2)])
                    .with_append_remainder(true)
                    .with_remainder_direction(Side::Left),
            )
            .unwrap(),
    ];

    for maker in makers {
        let output = maker.call(input.clone()).unwrap();
        assert_eq!(total_duration(&output).unwrap(), total, "pipeline {:?}", maker.callbacks());
        assert!(is_contiguous(&output));
    }
}

#[test]
fn test_fuse_equals_summed_partitions() {
    let input = from_flat_pairs(&[(1, 8), (2, 8), (3, 8), (1, 4), (1, 16)]).unwrap();
    let counts = vec![Count::Finite(2)];

    let fused = DivisionMaker::new()
        .fuse_by_counts(counts.clone(), true)
        .unwrap()
        .call(input.clone())
        .unwrap();
    let partitioned = DivisionMaker::new()
        .partition_by_counts(PartitionByCounts::new(counts))
        .unwrap()
        .call(input)
        .unwrap();

    let fused_values: Vec<Duration> = leaves(&fused).into_iter().map(Division::duration).collect();
    let summed: Vec<Duration> = partitioned
        .iter()
        .map(|group| Duration::checked_sum(group.leaves().into_iter().map(Division::duration)).unwrap())
        .collect();
    assert_eq!(fused_values, summed);
}

#[test]
fn test_branching_makers_are_independent() {
    let base = DivisionMaker::new()
        .split_by_durations(SplitByDurations::new(vec![d(1, 4)]))
        .unwrap();
    let fused = base
        .append_callback(FuseByCounts::new(vec![Count::Finite(2)], true))
        .unwrap();
    let flat = base.flatten(Depth::Unbounded);

    let input = from_flat_pairs(&[(4, 4)]).unwrap();
    assert_eq!(base.callbacks().len(), 1);
    assert_eq!(leaf_pairs(&fused.call(input.clone()).unwrap()), vec![(2, 4), (2, 4)]);
    assert_eq!(flat.call(input).unwrap().len(), 4);
}

#[test]
fn test_invalid_parameters_are_reported_immediately() {
    let maker = DivisionMaker::new();
    assert!(maker
        .split_by_durations(SplitByDurations::new(vec![d(-1, 4)]))
        .is_err());
    assert!(maker.fuse_by_counts(vec![Count::Finite(0)], true).is_err());
    assert!(maker
        .partition_by_counts(PartitionByCounts::new(vec![Count::Finite(-2)]))
        .is_err());
    assert!(maker.split_by_rounded_ratios(vec![vec![1, 0, 1]]).is_err());
}

#[test]
fn test_existing_start_offset_is_respected() {
    let input = vec![
        Nested::Item(Division::new(1, 4).unwrap().with_start_offset(Offset::new(3, 1))),
        Nested::Item(Division::new(1, 4).unwrap()),
    ];
    let output = DivisionMaker::new().call(input).unwrap();
    assert_eq!(leaves(&output)[1].start_offset(), Some(Offset::new(13, 4)));
}

/// Regroup a flat sequence into groups of the given sizes
fn regroup(flat: Vec<Nested<Division>>, sizes: &[usize]) -> Vec<Nested<Division>> {
    let mut remaining = flat.into_iter();
    sizes
        .iter()
        .map(|&size| Nested::Group(remaining.by_ref().take(size).collect()))
        .collect()
}

#[test]
fn test_flatten_and_regroup_restores_shape() {
    let input = from_flat_pairs(&[(7, 8), (3, 4), (5, 16), (6, 8)]).unwrap();
    let makers = vec![
        DivisionMaker::new()
            .split_by_durations(SplitByDurations::new(vec![d(1, 4)]).with_remainder(Side::Left))
            .unwrap(),
        DivisionMaker::new()
            .partition_by_counts(PartitionByCounts::new(vec![Count::Finite(3)]))
            .unwrap(),
        DivisionMaker::new()
            .split_by_durations(SplitByDurations::new(vec![d(1, 8), d(3, 16)]))
            .unwrap()
            .flatten(Depth::Unbounded)
            .partition_by_counts(
                PartitionByCounts::new(vec![Count::Finite(2), Count::Finite(3)])
                    .with_append_remainder(true),
            )
            .unwrap(),
    ];

    for maker in makers {
        let nested = maker.call(input.clone()).unwrap();
        assert!(nested.iter().all(Nested::is_group));
        let sizes: Vec<usize> = nested.iter().map(|group| group.leaves().len()).collect();

        let flat = flatten(nested.clone(), Depth::Unbounded);
        assert_eq!(flat.len(), sizes.iter().sum::<usize>());
        assert!(flat.iter().all(|item| !item.is_group()));

        assert_eq!(regroup(flat, &sizes), nested, "pipeline {:?}", maker.callbacks());
    }
}

#[test]
fn test_huge_coprime_denominators_report_overflow() {
    let input = from_flat_pairs(&[
        (1, 4_611_686_018_427_387_903),
        (1, 4_611_686_018_427_387_902),
    ])
    .unwrap();
    let maker = DivisionMaker::new()
        .fuse_by_counts(Vec::new(), true)
        .unwrap();
    let result = maker.call(input);
    assert!(
        matches!(result, Err(DivisionError::Duration(DurationError::Overflow(_)))),
        "unexpected result: {:?}",
        result
    );
}

#[test]
fn test_negative_input_is_rejected() {
    let input = from_flat_pairs(&[(3, 8), (-1, 8), (1, 8)]).unwrap();
    let result = DivisionMaker::new().call(input);
    assert!(matches!(result, Err(DivisionError::InvalidDuration(_))));
}
