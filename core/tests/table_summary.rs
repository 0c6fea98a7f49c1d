use churn_analytics_core::{
    summary::SummaryWarning, summarize, summarize_with, FilterColumn, Table, Value,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn single_column(values: &[i64]) -> Table {
    let mut table = Table::new(["col"]).unwrap();
    for v in values {
        table.push_row(vec![Value::Integer(*v)]).unwrap();
    }
    table
}

/// customer | days | spend | active
fn customers() -> Table {
    let mut table = Table::new(["customer", "days", "spend", "active"]).unwrap();
    let rows = [
        ("ana", Value::Integer(10), Value::Real(300.0), true),
        ("ben", Value::Integer(50), Value::Real(50.0), false),
        ("cho", Value::Missing, Value::Real(120.0), true),
        ("dev", Value::Integer(30), Value::Missing, true),
    ];
    for (name, days, spend, active) in rows {
        table
            .push_row(vec![Value::Text(name.into()), days, spend, Value::Boolean(active)])
            .unwrap();
    }
    table
}

fn names(table: &Table) -> Vec<String> {
    table
        .column_values("customer")
        .unwrap()
        .into_iter()
        .map(|v| v.to_string())
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn empty_table_has_no_stats() {
    let table = Table::new(["a", "b"]).unwrap();
    let summary = summarize(&table);
    assert_eq!(summary.row_count, 0);
    assert!(summary.numeric_column_stats.is_empty());
    assert_eq!(summary.below_average_subset.row_count(), 0);
    assert!(summary.warnings.is_empty());

    let summary = summarize(&Table::default());
    assert_eq!(summary.row_count, 0);
    assert!(summary.numeric_column_stats.is_empty());
}

/// [10, 20, 30]: sum 60, mean 20, count 3; only 10 sits below average.
#[test]
fn single_numeric_column_stats_and_subset() {
    let table = single_column(&[10, 20, 30]);
    let summary = summarize(&table);

    let stats = summary.stats("col").unwrap();
    assert_eq!(stats.sum, 60.0);
    assert_eq!(stats.mean, Some(20.0));
    assert_eq!(stats.count, 3);
    assert_eq!(stats.min, Some(10.0));
    assert_eq!(stats.max, Some(30.0));

    assert_eq!(summary.filter_column.as_deref(), Some("col"));
    assert_eq!(summary.below_average_subset.row_count(), 1);
    assert_eq!(
        summary.below_average_subset.row(0).unwrap().get("col"),
        Some(&Value::Integer(10))
    );
}

/// Text and boolean columns are excluded; missing cells are skipped.
#[test]
fn only_uniformly_numeric_columns_are_summarized() {
    let summary = summarize(&customers());
    let numeric: Vec<&str> = summary.numeric_columns().collect();
    assert_eq!(numeric, vec!["days", "spend"]);
    assert_eq!(summary.column_count, 4);

    let days = summary.stats("days").unwrap();
    assert_eq!(days.count, 3);
    assert_eq!(days.sum, 90.0);
    assert_eq!(days.mean, Some(30.0));

    let spend = summary.stats("spend").unwrap();
    assert_eq!(spend.count, 3);
    assert_eq!(spend.mean, Some(470.0 / 3.0));
}

/// Default filter column is the first numeric column in declared order.
#[test]
fn below_average_uses_first_numeric_column() {
    let summary = summarize(&customers());
    assert_eq!(summary.filter_column.as_deref(), Some("days"));
    // days mean = 30: only ana (10) is strictly below; cho is missing, dev equals.
    assert_eq!(names(&summary.below_average_subset), vec!["ana"]);
    assert_eq!(summary.below_average_subset.columns(), customers().columns());
}

#[test]
fn named_filter_column_overrides_first_numeric() {
    let summary = summarize_with(&customers(), &FilterColumn::Named("spend".into()));
    assert_eq!(summary.filter_column.as_deref(), Some("spend"));
    // spend mean ≈ 156.7: ben (50) and cho (120).
    assert_eq!(names(&summary.below_average_subset), vec!["ben", "cho"]);
}

#[test]
fn non_numeric_filter_column_yields_empty_subset_and_warning() {
    let summary = summarize_with(&customers(), &FilterColumn::Named("customer".into()));
    assert_eq!(summary.filter_column, None);
    assert_eq!(summary.below_average_subset.row_count(), 0);
    assert_eq!(
        summary.warnings,
        vec![SummaryWarning::FilterColumnUnavailable { column: "customer".into() }]
    );
    // Stats are still computed.
    assert_eq!(summary.numeric_column_stats.len(), 2);
}

/// An all-missing column is degenerate: undefined mean, non-fatal warning.
#[test]
fn degenerate_column_surfaces_sentinel_mean() {
    let mut table = Table::new(["empty", "score"]).unwrap();
    table.push_row(vec![Value::Missing, Value::Real(1.0)]).unwrap();
    table.push_row(vec![Value::Missing, Value::Real(3.0)]).unwrap();

    let summary = summarize(&table);
    let empty = summary.stats("empty").unwrap();
    assert_eq!(empty.count, 0);
    assert_eq!(empty.sum, 0.0);
    assert_eq!(empty.mean, None);
    assert!(empty.is_degenerate());
    assert_eq!(
        summary.warnings,
        vec![SummaryWarning::DegenerateColumn { column: "empty".into() }]
    );

    // First numeric column is the degenerate one, so nothing qualifies.
    assert_eq!(summary.filter_column.as_deref(), Some("empty"));
    assert_eq!(summary.below_average_subset.row_count(), 0);
}

#[test]
fn summarize_is_deterministic() {
    let table = customers();
    assert_eq!(summarize(&table), summarize(&table));
}

/// NaN and infinite cells are skipped like gaps, so they cannot poison the
/// mean or the below-average subset.
#[test]
fn non_finite_reals_count_as_missing() {
    let mut table = Table::new(["spend", "ratio"]).unwrap();
    table.push_row(vec![Value::Real(10.0), Value::Real(f64::NAN)]).unwrap();
    table.push_row(vec![Value::Real(f64::NAN), Value::Real(f64::NAN)]).unwrap();
    table.push_row(vec![Value::Real(30.0), Value::Real(f64::INFINITY)]).unwrap();
    table.push_row(vec![Value::Integer(20), Value::Missing]).unwrap();

    let summary = summarize(&table);
    let spend = summary.stats("spend").unwrap();
    assert_eq!(spend.count, 3);
    assert_eq!(spend.sum, 60.0);
    assert_eq!(spend.mean, Some(20.0));
    assert_eq!(spend.min, Some(10.0));
    assert_eq!(spend.max, Some(30.0));

    let ratio = summary.stats("ratio").unwrap();
    assert!(ratio.is_degenerate());
    assert_eq!(ratio.mean, None);
    assert!(summary
        .warnings
        .contains(&SummaryWarning::DegenerateColumn { column: "ratio".into() }));

    // Only the 10.0 row is strictly below 20; the NaN row never qualifies.
    assert_eq!(summary.below_average_subset.row_count(), 1);
    assert_eq!(
        summary.below_average_subset.row(0).unwrap().get("spend"),
        Some(&Value::Real(10.0))
    );
}
