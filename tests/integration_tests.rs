use chrono::NaiveDate;
use retail_activity_engine::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn march_report(data: &ActivityData) -> ActivityReport {
    let query = ActivityQuery {
        period: PeriodSpec::Range {
            from: date(2024, 3, 1),
            to: Some(date(2024, 3, 31)),
        },
        scope: None,
        opening_cash: None,
        today: date(2024, 4, 15),
    };
    run_activity_report(data, &query)
}

#[test]
fn test_period_boundaries_are_inclusive_at_day_granularity() {
    let data = activity_from_json(
        r#"{
            "sales": [
                {"amount": "10.00", "date": "2024-03-01T23:59:00"},
                {"amount": "20.00", "date": "2024-03-31"},
                {"amount": "40.00", "date": "2024-02-29T23:59:59"},
                {"amount": "80.00", "date": "2024-04-01T00:00:01"}
            ]
        }"#,
    )
    .unwrap();

    let report = march_report(&data);
    assert_eq!(report.sales_count, 2, "both boundary days included, neighbors excluded");
    assert_eq!(report.total_sales, dec("30.00"));
}

#[test]
fn test_utc_timestamps_do_not_drift_across_the_day_boundary() {
    // Midnight UTC on the 15th must land on the 15th whatever the process
    // time zone is; a one-day drift here is the classic dashboard bug.
    let data = activity_from_json(
        r#"{"sales": [{"amount": "10.00", "date": "2024-06-15T00:00:00.000Z"}]}"#,
    )
    .unwrap();

    let query = ActivityQuery {
        period: PeriodSpec::Range {
            from: date(2024, 6, 15),
            to: Some(date(2024, 6, 15)),
        },
        scope: None,
        opening_cash: None,
        today: date(2024, 6, 20),
    };
    let report = run_activity_report(&data, &query);
    assert_eq!(report.sales_count, 1);
}

#[test]
fn test_unparseable_dates_are_excluded_from_every_bounded_period() {
    let data = activity_from_json(
        r#"{
            "sales": [
                {"amount": "10.00", "date": "not-a-date"},
                {"amount": "20.00", "date": "2024-03-05"}
            ]
        }"#,
    )
    .unwrap();

    let report = march_report(&data);
    assert_eq!(report.sales_count, 1);
    assert_eq!(report.total_sales, dec("20.00"));

    // The unbounded period applies no range test, so the dateless record is
    // admitted there (fail-open), but it still has no day in the series.
    let all = ActivityQuery {
        period: PeriodSpec::Named(PeriodToken::All),
        scope: None,
        opening_cash: None,
        today: date(2024, 4, 15),
    };
    let report = run_activity_report(&data, &all);
    assert_eq!(report.sales_count, 2);
    assert_eq!(report.total_sales, dec("30.00"));
    assert_eq!(report.daily_sales.len(), 1);
}

#[test]
fn test_scope_isolation() {
    let data = ActivityData {
        sales: vec![
            Transaction::new(dec("100.00"), date(2024, 3, 5)).with_scope(1),
            Transaction::new(dec("999.00"), date(2024, 3, 5)).with_scope(2),
            Transaction::new(dec("50.00"), date(2024, 3, 6)),
        ],
        ..ActivityData::default()
    };

    let query = ActivityQuery {
        period: PeriodSpec::Range {
            from: date(2024, 3, 1),
            to: Some(date(2024, 3, 31)),
        },
        scope: Some(1),
        opening_cash: None,
        today: date(2024, 4, 15),
    };
    let report = run_activity_report(&data, &query);

    assert_eq!(report.sales_count, 1, "other registers and scopeless rows excluded");
    assert_eq!(report.total_sales, dec("100.00"));
}

#[test]
fn test_balance_and_profit_composition() {
    let data = ActivityData {
        sales: vec![Transaction::new(dec("500"), date(2024, 3, 5)).with_scope(1)],
        purchases: vec![Transaction::new(dec("200"), date(2024, 3, 6)).with_scope(1)],
        expenses: vec![Transaction::new(dec("50"), date(2024, 3, 7)).with_scope(1)],
        ..ActivityData::default()
    };

    let query = ActivityQuery {
        period: PeriodSpec::Range {
            from: date(2024, 3, 1),
            to: Some(date(2024, 3, 31)),
        },
        scope: Some(1),
        opening_cash: Some(dec("1000")),
        today: date(2024, 4, 15),
    };
    let report = run_activity_report(&data, &query);

    assert_eq!(report.balance, Some(dec("1250")));
    assert_eq!(report.profit, dec("250"));

    // Without opening cash the field disappears from the wire format too.
    let no_cash = ActivityQuery { opening_cash: None, ..query };
    let report = run_activity_report(&data, &no_cash);
    assert_eq!(report.balance, None);
    let json = serde_json::to_string(&report).unwrap();
    assert!(!json.contains("balance"), "omitted, not defaulted to zero");
}

#[test]
fn test_trend_edge_cases() {
    assert_eq!(trend(dec("0"), dec("0")), "0%");
    assert_eq!(trend(dec("0"), dec("500")), "+100%");
    assert_eq!(trend(dec("200"), dec("150")), "-25.0%");
    assert_eq!(trend(dec("100"), dec("150")), "+50.0%");
}

#[test]
fn test_month_over_month_trend_through_the_report() {
    let data = ActivityData {
        sales: vec![
            Transaction::new(dec("200"), date(2024, 4, 20)),
            Transaction::new(dec("150"), date(2024, 5, 5)),
        ],
        ..ActivityData::default()
    };

    // The trend chip compares this month vs last regardless of the filter.
    let query = ActivityQuery {
        period: PeriodSpec::Named(PeriodToken::Year),
        scope: None,
        opening_cash: None,
        today: date(2024, 5, 10),
    };
    let report = run_activity_report(&data, &query);
    assert_eq!(report.sales_trend, "-25.0%");
}

#[test]
fn test_spec_month_scenario() -> anyhow::Result<()> {
    let data = activity_from_json(
        r#"{
            "sales": [
                {"amount": "100.00", "date": "2024-05-01"},
                {"amount": "50.00", "date": "2024-05-02"}
            ]
        }"#,
    )?;

    let query = ActivityQuery {
        period: PeriodSpec::from_token("month")?,
        scope: None,
        opening_cash: None,
        today: date(2024, 5, 10),
    };
    let report = run_activity_report(&data, &query);

    assert_eq!(report.sales_count, 2);
    assert_eq!(report.total_sales, dec("150.00"));
    assert_eq!(report.average_sale, dec("75.00"));
    assert_eq!(
        report.period,
        Some(DateRange::new(date(2024, 5, 1), date(2024, 5, 10)))
    );
    Ok(())
}

#[test]
fn test_full_legacy_payload_round_trip() -> anyhow::Result<()> {
    let data = activity_from_json(
        r#"{
            "ventas": [
                {"monto": "100.00", "fecha": "2024-05-01T09:30:00", "caja": "1"},
                {"monto": "50.00", "fecha": "2024-05-02", "caja": 1},
                {"monto": "999.00", "fecha": "2024-05-02", "caja": 2}
            ],
            "compras": [{"monto": "40.00", "fecha": "2024-05-03", "caja": 1}],
            "gastos": [{"monto": "10.00", "fecha": "2024-05-03", "caja": 1}],
            "productos": [{"nombre": "Cafe", "fecha_creacion": "2024-05-08"}],
            "clientes": [{"nombre": "Ana", "fecha_creacion": "2024-05-09"}]
        }"#,
    )?;

    let query = ActivityQuery {
        period: PeriodSpec::from_token("mes")?,
        scope: Some(1),
        opening_cash: Some(dec("500.00")),
        today: date(2024, 5, 10),
    };
    let report = run_activity_report(&data, &query);

    assert_eq!(report.total_sales, dec("150.00"));
    assert_eq!(report.sales_count, 2);
    assert_eq!(report.total_purchases, dec("40.00"));
    assert_eq!(report.total_expenses, dec("10.00"));
    assert_eq!(report.profit, dec("100.00"));
    assert_eq!(report.balance, Some(dec("600.00")));
    assert_eq!(report.new_products, 1);
    assert_eq!(report.new_customers, 1);

    // The report is plain data: it must survive a JSON round trip intact.
    let json = serde_json::to_string(&report)?;
    let back: ActivityReport = serde_json::from_str(&json)?;
    assert_eq!(back, report);
    Ok(())
}

#[test]
fn test_unknown_period_token_is_rejected() {
    let err = PeriodSpec::from_token("fortnight").unwrap_err();
    assert!(matches!(err, ActivityError::UnknownPeriod(_)));
    assert!(err.to_string().contains("fortnight"));
}

#[test]
fn test_daily_series_is_ordered_and_consistent() {
    let data = ActivityData {
        sales: vec![
            Transaction::new(dec("30"), date(2024, 3, 9)),
            Transaction::new(dec("10"), date(2024, 3, 2)),
            Transaction::new(dec("20"), date(2024, 3, 2)),
        ],
        ..ActivityData::default()
    };

    let report = march_report(&data);
    let days: Vec<NaiveDate> = report.daily_sales.iter().map(|d| d.date).collect();
    assert_eq!(days, vec![date(2024, 3, 2), date(2024, 3, 9)]);
    assert_eq!(report.daily_sales[0].total, dec("30"));

    let series_sum: Decimal = report.daily_sales.iter().map(|d| d.total).sum();
    assert_eq!(series_sum, report.total_sales);
}
