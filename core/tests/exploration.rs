use churn_analytics_core::{
    explore::{grouped_histogram, HistogramBar, HistogramRequest},
    io, AnalyticsError,
};

fn orders() -> churn_analytics_core::Table {
    let csv = "region,segment,spend,note\n\
               north,new,10,a\n\
               south,new,5,b\n\
               north,loyal,7.5,c\n\
               north,new,2,d\n\
               ,loyal,,e\n";
    io::read_csv(csv.as_bytes()).unwrap()
}

fn bar(x: &str, color: Option<&str>, value: f64) -> HistogramBar {
    HistogramBar {
        x: x.into(),
        color: color.map(str::to_string),
        value,
    }
}

#[test]
fn counts_rows_per_x_in_first_appearance_order() {
    let bars = grouped_histogram(&orders(), &HistogramRequest::count_of("region")).unwrap();
    assert_eq!(
        bars,
        vec![bar("north", None, 3.0), bar("south", None, 1.0), bar("", None, 1.0)]
    );
}

#[test]
fn sums_y_grouped_by_color() {
    let request = HistogramRequest::sum_of("region", "spend").colored_by("segment");
    let bars = grouped_histogram(&orders(), &request).unwrap();
    assert_eq!(
        bars,
        vec![
            bar("north", Some("new"), 12.0),
            bar("south", Some("new"), 5.0),
            bar("north", Some("loyal"), 7.5),
            bar("", Some("loyal"), 0.0),
        ]
    );
}

#[test]
fn unknown_and_non_numeric_columns_are_errors() {
    let err = grouped_histogram(&orders(), &HistogramRequest::count_of("country")).unwrap_err();
    assert!(matches!(err, AnalyticsError::UnknownColumn { .. }));

    let err = grouped_histogram(
        &orders(),
        &HistogramRequest::count_of("region").colored_by("tier"),
    )
    .unwrap_err();
    assert!(matches!(err, AnalyticsError::UnknownColumn { .. }));

    let err = grouped_histogram(&orders(), &HistogramRequest::sum_of("region", "note")).unwrap_err();
    assert!(matches!(err, AnalyticsError::NonNumericColumn { .. }));
}
