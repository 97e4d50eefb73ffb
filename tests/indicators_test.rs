//! Indicator engine properties: window semantics, crossover signal
//! placement, and TP/SL level ordering.

use auspex::services::analysis::compute_indicators;
use auspex::types::{Candle, TradeSignal};

fn candle(i: usize, close: f64) -> Candle {
    Candle {
        time: 1_700_000_000 + i as i64 * 3600,
        open: close - 0.2,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1000.0,
    }
}

/// Downtrend long enough to pull SMA20 below SMA50, then a sharp
/// reversal that forces a golden cross (and a later death cross on the
/// way back down).
fn v_shaped_series() -> Vec<Candle> {
    let mut closes = Vec::new();
    for i in 0..70 {
        closes.push(200.0 - i as f64);
    }
    for i in 0..50 {
        closes.push(130.0 + i as f64 * 3.0);
    }
    for i in 0..60 {
        closes.push(280.0 - i as f64 * 3.0);
    }
    closes
        .into_iter()
        .enumerate()
        .map(|(i, c)| candle(i, c))
        .collect()
}

#[test]
fn sma_matches_trailing_mean_exactly() {
    let candles: Vec<Candle> = (0..60)
        .map(|i| candle(i, 100.0 + (i as f64 * 0.37).sin() * 8.0))
        .collect();
    let rows = compute_indicators(&candles);

    for t in 0..candles.len() {
        if t < 19 {
            assert!(rows[t].sma_20.is_none());
        } else {
            let mean: f64 = candles[t - 19..=t].iter().map(|c| c.close).sum::<f64>() / 20.0;
            let sma = rows[t].sma_20.unwrap();
            assert!((sma - mean).abs() < 1e-9, "bar {t}: {sma} vs {mean}");
        }
    }
}

#[test]
fn ema_recurrence_holds_from_first_bar() {
    let candles: Vec<Candle> = (0..40)
        .map(|i| candle(i, 50.0 + (i as f64 * 1.7).cos() * 3.0))
        .collect();
    let rows = compute_indicators(&candles);

    let alpha = 2.0 / 21.0;
    assert_eq!(rows[0].ema_20, Some(candles[0].close));
    for t in 1..rows.len() {
        let prev = rows[t - 1].ema_20.unwrap();
        let expected = alpha * candles[t].close + (1.0 - alpha) * prev;
        assert!((rows[t].ema_20.unwrap() - expected).abs() < 1e-9);
    }
}

#[test]
fn signal_fires_only_on_crossovers() {
    let rows = compute_indicators(&v_shaped_series());

    let mut buys = 0;
    let mut sells = 0;
    for t in 1..rows.len() {
        let quad = (
            rows[t].sma_20,
            rows[t].sma_50,
            rows[t - 1].sma_20,
            rows[t - 1].sma_50,
        );
        match quad {
            (Some(fast), Some(slow), Some(prev_fast), Some(prev_slow)) => {
                let crossed_up = fast > slow && prev_fast <= prev_slow;
                let crossed_down = fast < slow && prev_fast >= prev_slow;
                match rows[t].signal {
                    TradeSignal::Buy => {
                        assert!(crossed_up, "BUY without a crossover at bar {t}");
                        buys += 1;
                    }
                    TradeSignal::Sell => {
                        assert!(crossed_down, "SELL without a crossunder at bar {t}");
                        sells += 1;
                    }
                    TradeSignal::Hold => {
                        assert!(!crossed_up && !crossed_down, "missed cross at bar {t}");
                    }
                }
            }
            _ => assert_eq!(rows[t].signal, TradeSignal::Hold),
        }
    }
    assert!(buys >= 1, "series engineered for a golden cross");
    assert!(sells >= 1, "series engineered for a death cross");
}

#[test]
fn tp_sl_present_iff_signal_and_ordered() {
    let rows = compute_indicators(&v_shaped_series());

    for row in &rows {
        match row.signal {
            TradeSignal::Hold => {
                assert!(row.stop_loss.is_none());
                assert!(row.take_profit.is_none());
            }
            TradeSignal::Buy => {
                let sl = row.stop_loss.unwrap();
                let tp = row.take_profit.unwrap();
                assert!(sl < row.close && row.close < tp);
                let atr = row.atr.unwrap();
                assert!((row.close - sl - 2.0 * atr).abs() < 1e-9);
                assert!((tp - row.close - 3.0 * atr).abs() < 1e-9);
            }
            TradeSignal::Sell => {
                let sl = row.stop_loss.unwrap();
                let tp = row.take_profit.unwrap();
                assert!(tp < row.close && row.close < sl);
            }
        }
    }
}

#[test]
fn rsi_is_100_in_pure_uptrend_and_bounded_elsewhere() {
    let up: Vec<Candle> = (0..40).map(|i| candle(i, 100.0 + i as f64)).collect();
    let rows = compute_indicators(&up);
    for row in &rows[14..] {
        assert_eq!(row.rsi, Some(100.0));
    }

    let mixed: Vec<Candle> = (0..80)
        .map(|i| candle(i, 100.0 + (i as f64 * 0.9).sin() * 6.0))
        .collect();
    for row in compute_indicators(&mixed) {
        if let Some(rsi) = row.rsi {
            assert!((0.0..=100.0).contains(&rsi));
        }
    }
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(compute_indicators(&[]).is_empty());
}

#[test]
fn single_bar_row_is_defined_where_possible() {
    let rows = compute_indicators(&[candle(0, 42.0)]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ema_20, Some(42.0));
    assert_eq!(rows[0].macd, Some(0.0));
    assert!(rows[0].sma_20.is_none());
    assert!(rows[0].atr.is_none());
    assert_eq!(rows[0].signal, TradeSignal::Hold);
}

#[test]
fn repeated_runs_are_identical() {
    let candles = v_shaped_series();
    let a = serde_json::to_string(&compute_indicators(&candles)).unwrap();
    let b = serde_json::to_string(&compute_indicators(&candles)).unwrap();
    assert_eq!(a, b);
}
