//! End-to-end checks from procedure file to dashboard views

use adoption_analytics::{
    compute_views, load_procedures, CategoryFilter, FilterLabels, Filters, LoadError,
    LoaderOptions,
};
use adoption_common::test_utils::{
    init_test_logging, procedures_csv, write_csv_fixture, SAMPLE_PROCEDURES_CSV,
};
use adoption_common::AdoptionError;

#[test]
fn test_three_row_dataset_views() {
    init_test_logging();
    let fixture = write_csv_fixture(SAMPLE_PROCEDURES_CSV);
    let table = load_procedures(fixture.path(), &LoaderOptions::default()).unwrap();

    let views = compute_views(&table, &Filters::all());

    let months: Vec<(String, u32)> = views
        .adoption
        .iter()
        .map(|p| (p.month.to_string(), p.new_adopters))
        .collect();
    assert_eq!(months, vec![("2024-01".to_string(), 2), ("2024-02".to_string(), 0)]);

    for (region, expected) in [("West", 1), ("East", 1)] {
        let filtered = compute_views(
            &table,
            &Filters::new(CategoryFilter::only(region), CategoryFilter::All),
        );
        assert_eq!(filtered.adoption[0].new_adopters, expected, "{region} in 2024-01");
        assert_eq!(filtered.adoption[1].new_adopters, 0, "{region} in 2024-02");
    }

    let regions: Vec<(&str, u32)> = views
        .regions
        .iter()
        .map(|r| (r.region.as_str(), r.total_procedures))
        .collect();
    assert_eq!(regions, vec![("West", 2), ("East", 1)]);

    let specialties: Vec<(&str, Option<f64>)> = views
        .specialties
        .iter()
        .map(|s| (s.specialty.as_str(), s.avg_revenue))
        .collect();
    assert_eq!(
        specialties,
        vec![("Cardiology", Some(1100.0)), ("Ortho", Some(800.0))]
    );
}

#[test]
fn test_filters_from_query_drive_views() {
    let fixture = write_csv_fixture(SAMPLE_PROCEDURES_CSV);
    let table = load_procedures(fixture.path(), &LoaderOptions::default()).unwrap();

    let filters = Filters::from_query(Some("West"), Some("Cardiology"), &FilterLabels::default());
    let views = compute_views(&table, &filters);

    let headings: Vec<&str> = views
        .insight
        .sections
        .iter()
        .map(|s| s.heading.as_str())
        .collect();
    assert_eq!(
        headings,
        vec![
            "Market Velocity",
            "Regional Strategy (West)",
            "Specialty Focus (Cardiology)"
        ]
    );
    assert!(views.insight.to_markdown().contains("$1,100"));
}

#[test]
fn test_specialty_average_respects_region() {
    let csv = procedures_csv(&[
        "1,D-1,2024-01-01,West,Cardiology,1000",
        "2,D-1,2024-01-02,East,Cardiology,3000",
        "3,D-1,2024-01-03,East,Cardiology,2000",
    ]);
    let fixture = write_csv_fixture(&csv);
    let table = load_procedures(fixture.path(), &LoaderOptions::default()).unwrap();

    let east = compute_views(
        &table,
        &Filters::new(CategoryFilter::only("East"), CategoryFilter::All),
    );
    assert_eq!(east.specialties[0].procedure_count, 2);
    assert!((east.specialties[0].avg_revenue.unwrap() - 2500.0).abs() < 1e-9);

    let all = compute_views(&table, &Filters::all());
    assert!((all.specialties[0].avg_revenue.unwrap() - 2000.0).abs() < 1e-9);
}

#[test]
fn test_nonexistent_file_is_not_found() {
    let err = load_procedures(
        "/definitely/not/here/device_adoption_data.csv",
        &LoaderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));

    let err: AdoptionError = err.into();
    assert!(err.is_not_found());
}
