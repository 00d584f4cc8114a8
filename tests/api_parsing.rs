use causa_rs::models::{
    CaseStageBreakdown, CasesPerYear, DurationOutliers, Envelope, LabeledSeries,
    ProsecutorCaseloads,
};
use chrono::NaiveDate;

#[test]
fn parse_stage_breakdown_envelope() {
    let sample = r#"
    {
      "chart_data": {
        "labels": ["Preliminary", "Trial", "Closed"],
        "values": [120, 45, 230],
        "percentages": [30.4, 11.4, 58.2],
        "total": 395
      }
    }
    "#;
    let envelope: Envelope<CaseStageBreakdown> = serde_json::from_str(sample).unwrap();
    let data = envelope.chart_data.unwrap();
    assert_eq!(data.labels, vec!["Preliminary", "Trial", "Closed"]);
    assert_eq!(data.values, vec![120.0, 45.0, 230.0]);
    assert_eq!(data.total, 395);
}

#[test]
fn null_chart_data_means_no_data() {
    let envelope: Envelope<LabeledSeries> =
        serde_json::from_str(r#"{ "chart_data": null }"#).unwrap();
    assert!(envelope.chart_data.is_none());

    let envelope: Envelope<LabeledSeries> = serde_json::from_str(r#"{}"#).unwrap();
    assert!(envelope.chart_data.is_none());
}

#[test]
fn null_slots_survive_parsing_for_the_normalizer() {
    let sample = r#"
    {
      "labels": ["Acosta", null, "Benitez"],
      "values": [12, null, 7]
    }
    "#;
    let series: LabeledSeries = serde_json::from_str(sample).unwrap();
    assert_eq!(series.labels, vec!["Acosta", "", "Benitez"]);
    assert_eq!(series.values[0], 12.0);
    assert!(series.values[1].is_nan());
    assert_eq!(series.values[2], 7.0);
}

#[test]
fn numeric_year_labels_become_strings() {
    let sample = r#"
    {
      "labels": [2019, 2020, 2021],
      "opened": [10, 12, 8],
      "closed": [4, 9, 11],
      "values": [14, 21, 19]
    }
    "#;
    let years: CasesPerYear = serde_json::from_str(sample).unwrap();
    assert_eq!(years.labels, vec!["2019", "2020", "2021"]);
    assert_eq!(years.opened, vec![10.0, 12.0, 8.0]);
    assert_eq!(years.total, 0); // absent totals default
}

#[test]
fn parse_prosecutor_caseloads_with_metadata() {
    let sample = r#"
    {
      "labels": ["Alvarez", "Benavidez"],
      "open": [14, 3],
      "closed": [6, 21],
      "prosecutors": [
        { "prosecutor": "Alvarez", "open": 14, "closed": 6, "total": 20 },
        { "prosecutor": "Benavidez", "open": 3, "closed": 21, "total": 24 }
      ],
      "total_open": 17,
      "total_closed": 27,
      "total": 44
    }
    "#;
    let payload: ProsecutorCaseloads = serde_json::from_str(sample).unwrap();
    assert_eq!(payload.open, vec![14.0, 3.0]);
    assert_eq!(payload.prosecutors.len(), 2);
    assert_eq!(payload.prosecutors[1].total, 24);
    assert_eq!(payload.total_open, 17);
}

#[test]
fn parse_duration_outliers_with_case_metadata() {
    let sample = r#"
    {
      "longest": [
        {
          "docket": "4521/2009",
          "title": "Roads contract irregularities",
          "court": "Federal Court No. 2",
          "stage": "Trial",
          "opened_on": "2009-04-17",
          "last_activity_on": "2023-11-02",
          "duration_days": 5312
        }
      ],
      "shortest": []
    }
    "#;
    let payload: DurationOutliers = serde_json::from_str(sample).unwrap();
    assert_eq!(payload.longest.len(), 1);
    assert!(payload.shortest.is_empty());

    let case = &payload.longest[0];
    assert_eq!(case.display_name(), "Roads contract irregularities");
    assert_eq!(case.opened_on, NaiveDate::from_ymd_opt(2009, 4, 17));
    assert_eq!(case.duration_days, 5312.0);
}

#[test]
fn display_name_falls_back_to_docket() {
    let sample = r#"
    {
      "longest": [
        { "docket": "881/2014", "title": "  ", "court": null, "stage": null,
          "opened_on": null, "last_activity_on": null, "duration_days": 210 }
      ]
    }
    "#;
    let payload: DurationOutliers = serde_json::from_str(sample).unwrap();
    assert_eq!(payload.longest[0].display_name(), "881/2014");
}
