use std::path::PathBuf;

use inequality_explorer::{
    aggregate, country_options, country_trend, forecast, kpis, load_csv, load_reader, narrate,
    CountryStat, Dataset, DemoFallback, FallbackProvider, Filters, MovingAverageForecaster,
    TrendView,
};

fn fixture() -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/inequality.csv");
    load_csv(path).unwrap()
}

fn names(countries: &[&str]) -> Vec<String> {
    countries.iter().map(|c| c.to_string()).collect()
}

#[test]
fn aggregate_keeps_request_order_and_lists_unknown_countries() {
    let data = fixture();
    let stats = aggregate(Some(&data), &names(&["Sweden", "Atlantis", "Brazil"]));

    assert_eq!(
        stats,
        vec![
            CountryStat {
                country_name: "Sweden".into(),
                average: Some(29.55),
                min: Some(29.3),
                max: Some(29.8),
            },
            CountryStat::empty("Atlantis"),
            CountryStat {
                country_name: "Brazil".into(),
                average: Some(51.77),
                min: Some(48.9),
                max: Some(53.5),
            },
        ]
    );
}

#[test]
fn aggregate_without_gini_column_returns_demo_table() {
    let data = load_reader("country,year\nKenya,2020\n".as_bytes()).unwrap();
    for request in [names(&[]), names(&["Kenya"]), names(&["A", "B", "C"])] {
        let stats = aggregate(Some(&data), &request);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].country_name, "China");
        assert_eq!(stats[0].average, Some(26.33));
        assert_eq!(stats[0].min, Some(23.22));
        assert_eq!(stats[0].max, Some(27.39));
        assert_eq!(stats[1].country_name, "United States");
        assert_eq!(stats[1].average, Some(25.16));
        assert_eq!(stats[1].min, Some(23.22));
        assert_eq!(stats[1].max, Some(26.02));
    }
}

#[test]
fn forecast_flat_lines_the_last_moving_average() {
    assert!(forecast(&[10.0, 12.0], 3, 3).is_empty());
    assert_eq!(forecast(&[10.0, 12.0, 14.0, 16.0], 3, 3).values(), &[14.0, 14.0, 14.0]);
}

#[test]
fn narrate_absent_dataset_names_the_country() {
    let report = narrate(None, "Kenya");
    assert_eq!(report.len(), 2);
    assert!(report.lines()[0].contains("Kenya"));
    assert_eq!(report, DemoFallback.insights("Kenya"));
}

#[test]
fn narrate_full_dataset_emits_every_clause_in_order() {
    let data = fixture();
    let report = narrate(Some(&data), "Sweden");
    let lines = report.lines();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Sweden: Average Gini ≈ 29.55 with a falling tendency.");
    assert!(lines[1].starts_with("If GDP rises while Gini worsens"));
    assert_eq!(lines[2], "Unemployment averages ~ 7.97%. Consider targeted job creation.");
    assert_eq!(
        lines[3],
        "Life expectancy averages ~ 82.9 years. Public health correlates with lower inequality."
    );
    assert!(lines[4].starts_with("Policy ideas"));
}

#[test]
fn narrate_with_only_unemployment_has_one_conditional_line() {
    let data = load_reader(
        "country,year,gini,unemployment\nX,2019,30,4.0\nX,2020,32,5.0\nX,2021,31,6.0\n".as_bytes(),
    )
    .unwrap();
    let report = narrate(Some(&data), "X");
    let lines = report.lines();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("X"));
    assert!(lines[0].contains("31.0"));
    assert!(lines[0].contains("rising"));
    assert!(lines[2].starts_with("Unemployment averages ~ 5.0%"));
    assert!(!lines.iter().any(|l| l.starts_with("Life expectancy")));
}

#[test]
fn narrate_flat_series_out_of_file_order_is_falling() {
    let data = fixture();
    let headline = narrate(Some(&data), "South Africa").lines()[0].clone();
    assert_eq!(headline, "South Africa: Average Gini ≈ 63.0 with a falling tendency.");
}

#[test]
fn narrate_unknown_country_prompts_for_data() {
    let data = fixture();
    let report = narrate(Some(&data), "Kenya");
    assert_eq!(report.len(), 1);
    assert!(report.lines()[0].starts_with("No data for Kenya."));
}

#[test]
fn trend_view_orders_points_and_forecasts() {
    let data = fixture();
    let view = country_trend(Some(&data), "South Africa", &MovingAverageForecaster, 3, 2);
    match view {
        TrendView::Ready {
            points, forecast, ..
        } => {
            let years: Vec<i64> = points.iter().map(|(y, _)| *y).collect();
            assert_eq!(years, vec![2019, 2020, 2021]);
            assert_eq!(forecast.values(), &[63.0, 63.0]);
        }
        TrendView::Unavailable { .. } => panic!("expected a trend view"),
    }

    let brazil = country_trend(Some(&data), "Brazil", &MovingAverageForecaster, 3, 3);
    assert_eq!(brazil.forecast().unwrap().values(), &[51.77, 51.77, 51.77]);
}

#[test]
fn trend_view_skips_missing_observations() {
    let data = fixture();
    let view = country_trend(Some(&data), "Sweden", &MovingAverageForecaster, 3, 3);
    // The only window spans the missing 2020 observation.
    assert!(view.forecast().unwrap().is_empty());
}

#[test]
fn trend_view_needs_year_column() {
    let data = load_reader("country,gini\nX,30\n".as_bytes()).unwrap();
    let view = country_trend(Some(&data), "X", &MovingAverageForecaster, 3, 3);
    assert!(matches!(view, TrendView::Unavailable { .. }));
}

#[test]
fn kpis_follow_filters() {
    let data = fixture();
    let africa = Filters {
        continent: Some("Africa".into()),
        ..Default::default()
    }
    .apply(&data);
    let summary = kpis(Some(&africa));
    assert_eq!(summary.gini, Some(63.0));
    assert_eq!(summary.literacy, Some(91.0));

    assert_eq!(kpis(None), DemoFallback.kpis());
}

#[test]
fn country_options_are_sorted() {
    let data = fixture();
    assert_eq!(
        country_options(Some(&data), &[]),
        vec!["Brazil", "China", "South Africa", "Sweden"]
    );
}
