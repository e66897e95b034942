use agrodash_lib::breeding::filter::{self, FilterInput};
use agrodash_lib::breeding::{self, BreedingConfig, RecommendedAction, ViolationType};
use agrodash_lib::dataset;
use agrodash_lib::models::{AnimalRecord, FilterSelection, StatusCode};
use std::path::PathBuf;

fn site_config() -> BreedingConfig {
    breeding::config::parse(include_str!("../config/breeding.example.toml"))
        .expect("example config is valid")
}

fn load_herd() -> Vec<AnimalRecord> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/herd_sample.csv");
    let herd = dataset::import(&path).unwrap_or_else(|e| panic!("import {path:?}: {e}"));
    assert_eq!(herd.skipped_rows, 1, "row with status Q is skipped");
    herd.records
}

fn codes<'a>(records: impl IntoIterator<Item = &'a AnimalRecord>) -> Vec<&'a str> {
    records.into_iter().map(|r| r.code.as_str()).collect()
}

fn resolve(cfg: &BreedingConfig, location: Option<&str>, genetic: Option<&str>, parities: Option<serde_json::Value>) -> FilterSelection {
    let input = FilterInput {
        location: location.map(str::to_string),
        genetic: genetic.map(str::to_string),
        parities,
    };
    filter::resolve(&input, &cfg.genetics)
}

#[test]
fn unfiltered_summary_matches_fixture() {
    let cfg = site_config();
    let records = load_herd();
    let report = breeding::analyze(&records, &FilterSelection::default(), &cfg);

    assert_eq!(report.summary.total_count, 14);
    assert_eq!(report.chart.labels, ["S", "L", "W", "H", "N", "A"]);
    assert_eq!(report.chart.values, [2, 2, 3, 2, 3, 2]);
    assert_eq!(report.summary.productive_count, 7);
    assert_eq!(report.summary.problem_count, 7);
    assert_eq!(report.summary.productive_percent, 50.0);
    assert_eq!(report.summary.problem_percent, 50.0);

    let partition: usize = report.summary.counts_by_status.values().sum();
    assert_eq!(partition, report.summary.total_count);
}

#[test]
fn red_list_order_and_actions() {
    let cfg = site_config();
    let records = load_herd();
    let report = breeding::analyze(&records, &FilterSelection::default(), &cfg);

    assert_eq!(report.red_list_count, 7);
    let order: Vec<&str> = report.red_list.iter().map(|e| e.record.code.as_str()).collect();
    assert_eq!(order, ["1014", "1013", "1009", "1008", "1010", "1011", "1012"]);

    let actions: Vec<RecommendedAction> = report.red_list.iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        [
            RecommendedAction::EvaluateCauseAndReservice,
            RecommendedAction::CullAbortionHighParity,
            RecommendedAction::ReviewHeatDetection,
            RecommendedAction::ServeThisWeek,
            RecommendedAction::CullLongServiceFailure,
            RecommendedAction::UltrasoundDecideReservice,
            RecommendedAction::ObserveScheduleUltrasound,
        ]
    );
    assert_eq!(report.red_list[4].action_text, "cull recommended (failure >25 days)");
}

#[test]
fn window_violations_follow_site_rules() {
    let cfg = site_config();
    let records = load_herd();
    let report = breeding::analyze(&records, &FilterSelection::default(), &cfg);
    let windows = &report.windows;

    assert_eq!(windows.counts.gestation_overdue, 1);
    assert_eq!(windows.counts.lactation_overdue, 1);
    assert_eq!(windows.counts.weaning_overdue, 2);

    // 1006 is line B at the line-B site: its 7-day window is not exceeded.
    let weaning: Vec<&str> = windows.weaning.iter().map(|v| v.record.code.as_str()).collect();
    assert_eq!(weaning, ["1005", "1007"]);

    let detail = windows.detail(None);
    let rows: Vec<(&str, &str)> = detail
        .iter()
        .map(|v| (v.label.as_str(), v.record.code.as_str()))
        .collect();
    assert_eq!(
        rows,
        [
            ("Gestation > 114 days", "1001"),
            ("Lactation > 23 days", "1003"),
            ("Weaned outside window", "1005"),
            ("Weaned outside window", "1007"),
        ]
    );

    let gestation = windows.detail(Some(ViolationType::GestationOverdue));
    assert_eq!(gestation.len(), 1);
    assert_eq!(gestation[0].max_days, 114);
}

#[test]
fn genetic_filters_use_site_codes() {
    let cfg = site_config();
    let records = load_herd();

    let group = resolve(&cfg, None, Some("1050"), None);
    let report = breeding::analyze(&records, &group, &cfg);
    assert_eq!(report.summary.total_count, 9);
    assert_eq!(report.summary.productive_percent, 44.4);
    assert_eq!(report.summary.problem_percent, 55.6);

    let line_b = resolve(&cfg, None, Some("LINE_B"), None);
    let filtered = filter::apply(&records, &line_b, &cfg.genetics);
    assert_eq!(codes(filtered), ["1002", "1004", "1006", "1009", "1012"]);

    let pure = resolve(&cfg, Some("TODOS"), Some("supercerda_only"), None);
    let filtered = filter::apply(&records, &pure, &cfg.genetics);
    assert_eq!(codes(filtered), ["1003", "1011", "1014"]);
}

#[test]
fn location_and_parity_filters() {
    let cfg = site_config();
    let records = load_herd();

    let ml = resolve(&cfg, Some("ml"), None, None);
    let report = breeding::analyze(&records, &ml, &cfg);
    assert_eq!(report.summary.total_count, 7);
    assert_eq!(report.windows.counts.weaning_overdue, 1);

    let three = resolve(&cfg, None, None, Some(serde_json::json!("3")));
    let filtered = filter::apply(&records, &three, &cfg.genetics);
    assert_eq!(codes(filtered), ["1001", "1006", "1007"]);

    let garbage = resolve(&cfg, None, None, Some(serde_json::json!("abc")));
    let report = breeding::analyze(&records, &garbage, &cfg);
    assert_eq!(report.summary.total_count, 0);
    assert_eq!(report.summary.productive_percent, 0.0);
    assert!(report.red_list.is_empty());
}

#[test]
fn search_and_options() {
    let cfg = site_config();
    let records = load_herd();

    let all = FilterSelection::default();
    let found = breeding::search_by_code(&records, &all, &cfg, " 1007 ");
    assert_eq!(codes(found.iter().copied()), ["1007"]);
    assert_eq!(found[0].status, StatusCode::Weaned);

    let ldc = resolve(&cfg, Some("LDC"), None, None);
    assert!(breeding::search_by_code(&records, &ldc, &cfg, "1007").is_empty());

    assert_eq!(filter::location_options(&records), ["LDC", "ML"]);
}

#[test]
fn every_filter_combination_yields_a_partitioned_subset() {
    let cfg = site_config();
    let records = load_herd();

    let mut locations: Vec<Option<String>> = vec![None];
    locations.extend(filter::location_options(&records).into_iter().map(Some));
    let genetics = ["ALL", "LINE_A_GROUP", "LINE_B", "PURE_SUBLINE_ONLY"];
    let mut parities: Vec<Option<serde_json::Value>> = vec![None];
    parities.extend(filter::PARITY_OPTIONS.map(|p| Some(serde_json::json!(p))));

    let mut combinations = 0;
    for location in &locations {
        for genetic in genetics {
            for parity in &parities {
                let selection = resolve(&cfg, location.as_deref(), Some(genetic), parity.clone());
                let label = format!("{location:?} / {genetic} / {parity:?}");

                let filtered = filter::apply(&records, &selection, &cfg.genetics);
                assert!(
                    filtered
                        .iter()
                        .all(|f| records.iter().any(|r| std::ptr::eq(*f, r))),
                    "{label}: filtered set is not a subset"
                );

                let summary = breeding::analyze(&records, &selection, &cfg).summary;
                assert_eq!(summary.total_count, filtered.len(), "{label}");
                let partition: usize = summary.counts_by_status.values().sum();
                assert_eq!(partition, summary.total_count, "{label}");
                assert_eq!(
                    summary.productive_count + summary.problem_count,
                    summary.total_count,
                    "{label}"
                );
                combinations += 1;
            }
        }
    }
    assert_eq!(combinations, 3 * 4 * 12);
}
