//! Technical indicator engine.
//!
//! Computes trailing-window indicators over a candle series and derives
//! a discrete BUY/SELL/HOLD signal with ATR-based stop-loss/take-profit
//! levels. Every computation looks strictly backwards: the value at bar
//! `t` depends only on bars `0..=t`.

use crate::types::{Candle, IndicatorRow, TradeSignal};

/// Simple moving average over a trailing window.
///
/// The first `window - 1` entries are `None`; from then on each entry is
/// the arithmetic mean of the trailing `window` values.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);
    for t in window..values.len() {
        sum += values[t] - values[t - window];
        out[t] = Some(sum / window as f64);
    }
    out
}

/// Exponential moving average with smoothing 2/(span+1).
///
/// Seeded with the first value, so it is defined from the first bar
/// onward with no warm-up gap.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    let alpha = 2.0 / (span as f64 + 1.0);
    out.push(values[0]);
    for t in 1..values.len() {
        let prev = out[t - 1];
        out.push(alpha * values[t] + (1.0 - alpha) * prev);
    }
    out
}

/// Sample standard deviation (ddof = 1) over a trailing window.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window < 2 || values.len() < window {
        return out;
    }
    for t in (window - 1)..values.len() {
        let slice = &values[t + 1 - window..=t];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let var = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
            / (window as f64 - 1.0);
        out[t] = Some(var.sqrt());
    }
    out
}

/// Percent change over `periods` bars: (v[t] - v[t-n]) / v[t-n].
pub fn pct_change(values: &[f64], periods: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    for t in periods..values.len() {
        let base = values[t - periods];
        if base != 0.0 {
            out[t] = Some((values[t] - base) / base);
        }
    }
    out
}

/// RSI over rolling-mean gains and losses.
///
/// Deltas start at the second bar, so the first defined value is at
/// index `period`. A window with zero average loss but positive average
/// gain saturates at 100; a fully flat window (both averages zero) has
/// no defined relative strength and stays `None`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = closes.len();
    let mut out = vec![None; n];
    if n < period + 1 {
        return out;
    }

    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for t in 1..n {
        let delta = closes[t] - closes[t - 1];
        if delta > 0.0 {
            gains[t] = delta;
        } else {
            losses[t] = -delta;
        }
    }

    // Rolling means over the delta series, which only exists from t = 1.
    let avg_gain = sma(&gains[1..], period);
    let avg_loss = sma(&losses[1..], period);

    for t in period..n {
        let (g, l) = match (avg_gain[t - 1], avg_loss[t - 1]) {
            (Some(g), Some(l)) => (g, l),
            _ => continue,
        };
        out[t] = if l > 0.0 {
            let rs = g / l;
            Some(100.0 - 100.0 / (1.0 + rs))
        } else if g > 0.0 {
            Some(100.0)
        } else {
            None
        };
    }
    out
}

/// MACD line, signal line, and histogram series.
///
/// All three are defined from the first bar since they are built from
/// seed-at-first-value EMAs.
pub fn macd(
    closes: &[f64],
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema(&line, signal_span);
    let histogram: Vec<f64> = line
        .iter()
        .zip(signal.iter())
        .map(|(m, s)| m - s)
        .collect();
    (line, signal, histogram)
}

/// True range per bar. The first bar has no previous close, so its true
/// range is just the high-low span.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .enumerate()
        .map(|(t, c)| {
            if t == 0 {
                c.high - c.low
            } else {
                let prev_close = candles[t - 1].close;
                let hl = c.high - c.low;
                let hc = (c.high - prev_close).abs();
                let lc = (c.low - prev_close).abs();
                hl.max(hc).max(lc)
            }
        })
        .collect()
}

/// SMA 20/50 crossover signal at bar `t`.
///
/// Requires both averages at `t` and `t - 1`; during warm-up the signal
/// is HOLD.
fn crossover_signal(sma_20: &[Option<f64>], sma_50: &[Option<f64>], t: usize) -> TradeSignal {
    if t == 0 {
        return TradeSignal::Hold;
    }
    let (fast, slow, prev_fast, prev_slow) =
        match (sma_20[t], sma_50[t], sma_20[t - 1], sma_50[t - 1]) {
            (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
            _ => return TradeSignal::Hold,
        };
    if fast > slow && prev_fast <= prev_slow {
        TradeSignal::Buy
    } else if fast < slow && prev_fast >= prev_slow {
        TradeSignal::Sell
    } else {
        TradeSignal::Hold
    }
}

/// Compute the full indicator overlay for a candle series.
///
/// Returns one row per candle; an empty input yields an empty result.
/// Missing window values stay `None` and never abort the computation.
pub fn compute_indicators(candles: &[Candle]) -> Vec<IndicatorRow> {
    if candles.is_empty() {
        return Vec::new();
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let sma_20 = sma(&closes, 20);
    let sma_50 = sma(&closes, 50);
    let ema_20 = ema(&closes, 20);
    let rsi_14 = rsi(&closes, 14);
    let (macd_line, macd_sig, macd_hist) = macd(&closes, 12, 26, 9);
    let atr_14 = sma(&true_ranges(candles), 14);

    candles
        .iter()
        .enumerate()
        .map(|(t, c)| {
            let signal = crossover_signal(&sma_20, &sma_50, t);
            let (stop_loss, take_profit) = match (signal, atr_14[t]) {
                (TradeSignal::Buy, Some(atr)) => {
                    (Some(c.close - 2.0 * atr), Some(c.close + 3.0 * atr))
                }
                (TradeSignal::Sell, Some(atr)) => {
                    (Some(c.close + 2.0 * atr), Some(c.close - 3.0 * atr))
                }
                _ => (None, None),
            };

            IndicatorRow {
                time: c.time,
                open: c.open,
                high: c.high,
                low: c.low,
                close: c.close,
                volume: c.volume,
                sma_20: sma_20[t],
                sma_50: sma_50[t],
                ema_20: Some(ema_20[t]),
                rsi: rsi_14[t],
                macd: Some(macd_line[t]),
                macd_signal: Some(macd_sig[t]),
                macd_histogram: Some(macd_hist[t]),
                atr: atr_14[t],
                signal,
                stop_loss,
                take_profit,
            }
        })
        .collect()
}
