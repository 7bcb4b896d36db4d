use proptest::prelude::*;
use visdata_profile::{Profile2d, ProfileOptions};
use visdata_stats::binning::{BinSpec, BinningStrategyKind};

fn build(x: &[f64], y: &[f64], bins: &BinSpec, strategy: BinningStrategyKind) -> Profile2d {
    Profile2d::with_options(x, y, bins.clone(), ProfileOptions::with_strategy(strategy)).unwrap()
}

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(f64::total_cmp);
    values
}

/// `y[i] == i`, so every binned value identifies its sample.
#[expect(clippy::cast_precision_loss)]
fn indices(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn sample_index(member: f64) -> usize {
    member as usize
}

fn explicit_edges() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::btree_set(-100_i32..100, 2..12)
        .prop_map(|edges| edges.into_iter().map(f64::from).collect())
}

fn sample_x() -> impl Strategy<Value = Vec<f64>> {
    // Mix of arbitrary values and values sitting on integer edges
    prop::collection::vec(
        prop_oneof![-120.0..120.0_f64, (-100_i32..100).prop_map(f64::from)],
        1..200,
    )
}

proptest! {
    #[test]
    fn statistics_have_one_entry_per_bin(x in sample_x(), num_bins in 1_usize..30) {
        let y = indices(x.len());
        let bins = BinSpec::Count(num_bins);
        for strategy in BinningStrategyKind::ALL {
            let profile = build(&x, &y, &bins, strategy);
            prop_assert_eq!(profile.num_bins(), num_bins);
            prop_assert_eq!(profile.bin_edges().len(), num_bins + 1);
            prop_assert_eq!(profile.bin_centers().len(), num_bins);
            prop_assert_eq!(profile.bin_means().len(), num_bins);
            prop_assert_eq!(profile.bin_medians().len(), num_bins);
            prop_assert_eq!(profile.bin_stds().len(), num_bins);
            prop_assert_eq!(profile.bin_sems().len(), num_bins);
            prop_assert_eq!(profile.bin_data().len(), num_bins);
        }
    }

    #[test]
    fn count_binning_keeps_every_sample(x in sample_x(), num_bins in 1_usize..30) {
        let y = indices(x.len());
        let bins = BinSpec::Count(num_bins);
        for strategy in BinningStrategyKind::ALL {
            let profile = build(&x, &y, &bins, strategy);
            let all = sorted(profile.bin_data().iter().flatten().copied().collect());
            prop_assert_eq!(&all, &y);
            prop_assert_eq!(profile.outside_count(), 0);
        }
    }

    #[test]
    fn members_respect_bin_boundaries(x in sample_x(), edges in explicit_edges()) {
        let y = indices(x.len());
        let bins = BinSpec::Edges(edges.clone());
        let last = edges.len() - 2;
        for strategy in BinningStrategyKind::ALL {
            let profile = build(&x, &y, &bins, strategy);
            for (idx, members) in profile.bin_data().iter().enumerate() {
                let (lower, upper) = (edges[idx], edges[idx + 1]);
                for &member in members {
                    let xv = x[sample_index(member)];
                    if idx == last {
                        prop_assert!(lower <= xv && xv <= upper);
                    } else {
                        prop_assert!(lower <= xv && xv < upper);
                    }
                }
            }
        }
    }

    #[test]
    fn strategies_agree_on_membership(x in sample_x(), edges in explicit_edges()) {
        let y = indices(x.len());
        let bins = BinSpec::Edges(edges);
        let vectorized = build(&x, &y, &bins, BinningStrategyKind::Vectorized);
        let per_sample = build(&x, &y, &bins, BinningStrategyKind::PerSample);

        prop_assert!(vectorized.same_membership(&per_sample));
        prop_assert!(vectorized.same_statistics(&per_sample));
        prop_assert_eq!(vectorized.outside_count(), per_sample.outside_count());

        // everything inside the edges is binned, nothing else
        let inside = x
            .iter()
            .filter(|xv| bins_contain(&bins, **xv))
            .count();
        let binned = vectorized.bin_data().iter().map(Vec::len).sum::<usize>();
        prop_assert_eq!(binned, inside);
    }

    #[test]
    fn empty_and_singleton_bins_are_undefined(x in sample_x(), num_bins in 1_usize..60) {
        let y = indices(x.len());
        let profile = build(&x, &y, &BinSpec::Count(num_bins), BinningStrategyKind::default());
        for (idx, members) in profile.bin_data().iter().enumerate() {
            match members.as_slice() {
                [] => {
                    prop_assert!(profile.bin_means()[idx].is_nan());
                    prop_assert!(profile.bin_medians()[idx].is_nan());
                    prop_assert!(profile.bin_stds()[idx].is_nan());
                    prop_assert!(profile.bin_sems()[idx].is_nan());
                }
                [only] => {
                    prop_assert_eq!(profile.bin_means()[idx], *only);
                    prop_assert_eq!(profile.bin_medians()[idx], *only);
                    prop_assert!(profile.bin_stds()[idx].is_nan());
                    prop_assert!(profile.bin_sems()[idx].is_nan());
                }
                _ => {
                    prop_assert!(profile.bin_stds()[idx] >= 0.0);
                    prop_assert!(profile.bin_sems()[idx] <= profile.bin_stds()[idx]);
                }
            }
        }
    }
}

fn bins_contain(bins: &BinSpec, value: f64) -> bool {
    match bins {
        BinSpec::Edges(edges) => edges[0] <= value && value <= edges[edges.len() - 1],
        BinSpec::Count(_) => true,
    }
}
