//! End-to-end tests over the domain: price source -> signal -> events ->
//! selection, and metrics reports -> rendered text.

mod common;

use common::*;
use macross::cli::scan_universe;
use macross::domain::error::MacrossError;
use macross::domain::report::{MetricValue, MetricsReport, render, render_blocks};
use macross::domain::sample::{SAMPLE_CODES, sample_risk, sample_summary};
use macross::domain::selection::rank_by_strength;
use macross::domain::signal::{
    CrossoverKind, CrossoverParams, Signal, crossover_events, generate, generate_with,
};
use macross::ports::price_port::PricePort;

mod signal_generation {
    use super::*;

    #[test]
    fn default_windows_on_sixty_bars() {
        let prices = make_series(&ramp(60, 10.0, 0.5));
        let out = generate(&prices, 5, 20).unwrap();

        assert_eq!(out.signal.len(), 60);
        assert_eq!(out.fast.len(), 60);
        assert_eq!(out.slow.len(), 60);
        assert_eq!(out.fast.valid_count(), 56);
        assert_eq!(out.slow.valid_count(), 41);
        assert_eq!(out.signal.defined_count(), 41);
        assert_eq!(out.signal.signal_at(18), None);
        assert_eq!(out.signal.signal_at(19), Some(Signal::Long));
    }

    #[test]
    fn ten_prices_slow_twenty_is_all_undefined() {
        let prices = make_series(&ramp(10, 10.0, 1.0));
        let out = generate(&prices, 5, 20).unwrap();

        assert_eq!(out.signal.defined_count(), 0);
        assert_eq!(out.slow.valid_count(), 0);
        // the fast average is still computed where it can be
        assert_eq!(out.fast.valid_count(), 6);
    }

    #[test]
    fn misordered_windows_rejected() {
        let prices = make_series(&ramp(30, 10.0, 1.0));
        let err = generate(&prices, 20, 5).unwrap_err();
        assert!(matches!(err, MacrossError::InvalidParameter { .. }));
    }

    #[test]
    fn single_turn_produces_single_cross() {
        let mut closes = ramp(30, 10.0, 1.0);
        closes.extend(ramp(30, 39.0, -1.0));
        let prices = make_series(&closes);
        let out = generate(&prices, 5, 20).unwrap();

        let kinds: Vec<CrossoverKind> = crossover_events(&out.signal)
            .iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(kinds, vec![CrossoverKind::DeathCross]);

        let mut closes = ramp(30, 40.0, -1.0);
        closes.extend(ramp(30, 11.0, 1.0));
        let prices = make_series(&closes);
        let out = generate(&prices, 5, 20).unwrap();

        let kinds: Vec<CrossoverKind> = crossover_events(&out.signal)
            .iter()
            .map(|e| e.kind)
            .collect();
        assert_eq!(kinds, vec![CrossoverKind::GoldenCross]);
    }
}

mod universe_selection {
    use super::*;

    fn universe() -> MockPricePort {
        MockPricePort::new()
            .with_closes(SAMPLE_CODES[0], &ramp(40, 10.0, 0.1))
            .with_closes(SAMPLE_CODES[1], &ramp(40, 10.0, 0.5))
            .with_closes(SAMPLE_CODES[2], &ramp(40, 50.0, -0.5))
            .with_closes(SAMPLE_CODES[3], &ramp(8, 10.0, 1.0))
            .with_error(SAMPLE_CODES[4], "file not found")
    }

    #[test]
    fn scan_skips_failed_and_short_codes() {
        let port = universe();
        let codes = port.list_codes().unwrap();
        let candidates =
            scan_universe(&port, &codes, CrossoverParams::default(), None, None).unwrap();

        let scanned: Vec<&str> = candidates.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(scanned, vec!["000001.SZ", "000002.SZ", "600000.SH"]);
    }

    #[test]
    fn ranking_keeps_only_rising_codes_strongest_first() {
        let port = universe();
        let codes = port.list_codes().unwrap();
        let candidates =
            scan_universe(&port, &codes, CrossoverParams::default(), None, None).unwrap();
        let ranked = rank_by_strength(&candidates, 10);

        let selected: Vec<&str> = ranked.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(selected, vec!["000002.SZ", "000001.SZ"]);
        assert_eq!(ranked[0].last_date, date(2020, 2, 9));
    }

    #[test]
    fn scan_with_no_usable_codes_is_error() {
        let port = MockPricePort::new()
            .with_closes("SHORT", &ramp(5, 10.0, 1.0))
            .with_error("BROKEN", "boom");
        let codes = port.list_codes().unwrap();
        let err =
            scan_universe(&port, &codes, CrossoverParams::default(), None, None).unwrap_err();
        assert!(matches!(err, MacrossError::Data { .. }));
    }

    #[test]
    fn scan_respects_date_range() {
        let port = MockPricePort::new().with_closes("A", &ramp(40, 10.0, 1.0));
        let codes = vec!["A".to_string()];
        // Only 10 bars remain inside the range: not enough for SMA(20).
        let result = scan_universe(
            &port,
            &codes,
            CrossoverParams::default(),
            Some(date(2020, 1, 1)),
            Some(date(2020, 1, 10)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn generate_with_matches_generate() {
        let prices = make_series(&ramp(30, 10.0, 1.0));
        let params = CrossoverParams::new(3, 7).unwrap();
        assert_eq!(generate_with(&prices, params), generate(&prices, 3, 7).unwrap());
    }
}

mod metrics_reporting {
    use super::*;

    #[test]
    fn summary_order_is_verbatim() {
        let summary = MetricsReport::new("Backtest summary")
            .with("totalReturn", "15.6%")
            .with("winRate", "58.3%");
        let risk = MetricsReport::new("Risk metrics");

        let text = render(&summary, &risk);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Backtest summary:",
                "totalReturn: 15.6%",
                "winRate: 58.3%",
                "",
                "Risk metrics:"
            ]
        );
    }

    #[test]
    fn sample_report_has_twelve_metric_lines() {
        let text = render(&sample_summary(), &sample_risk());
        let metric_lines = text.lines().filter(|l| l.contains(": ")).count();
        assert_eq!(metric_lines, 12);
        assert!(text.contains("Sharpe ratio: 1.25\n"));
        assert!(text.contains("Trade count: 145\n"));
        assert!(text.contains("Beta: 0.85\n"));
    }

    #[test]
    fn reports_from_signal_values_render_without_validation() {
        let prices = make_series(&ramp(25, 10.0, 1.0));
        let out = generate(&prices, 5, 20).unwrap();

        let report = MetricsReport::new("Latest")
            .with("signal", out.signal.signal_at(24).map_or(-1, |s| s.as_u8() as i64))
            .with("strength", MetricValue::percent(out.latest_strength().unwrap()))
            .with("odd", f64::INFINITY);

        let text = render_blocks(&[&report]);
        assert!(text.contains("signal: 1\n"));
        assert!(text.contains("strength: 30.6%\n"));
        assert!(text.contains("odd: inf\n"));
    }
}
