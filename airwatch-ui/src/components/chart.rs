//! Chart Component
//!
//! 24h PM2.5 line chart using HTML5 Canvas.

use airwatch::view::{TrendSeries, TREND_LABEL};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::global::GlobalState;

const LINE_COLOR: &str = "#FF9800";

/// Hour labels shown along the x-axis at most
const MAX_X_LABELS: usize = 8;

/// Trend chart component
#[component]
pub fn TrendChart() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the series changes
    create_effect(move |_| {
        let series = state.trend.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &series);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="320"
                class="w-full h-64 md:h-80 rounded-lg"
            />

            <div class="flex justify-center mt-4">
                <div class="flex items-center space-x-2">
                    <div
                        class="w-3 h-3 rounded-full"
                        style=format!("background-color: {}", LINE_COLOR)
                    />
                    <span class="text-sm text-gray-300">{TREND_LABEL}</span>
                </div>
            </div>
        </div>
    }
}

/// Y-axis range with 10% padding, never zero-height
fn y_range(series: &TrendSeries) -> (f64, f64) {
    let (min, max) = series.bounds().unwrap_or((0.0, 1.0));
    let span = max - min;
    let padding = if span > 0.0 { span * 0.1 } else { 1.0 };
    ((min - padding).max(0.0), max + padding)
}

/// Step between labelled points so at most `MAX_X_LABELS` are drawn
fn label_step(len: usize) -> usize {
    ((len + MAX_X_LABELS - 1) / MAX_X_LABELS).max(1)
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, series: &TrendSeries) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    let margin_left = 50.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    if series.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No trend data", width / 2.0 - 50.0, height / 2.0);
        return;
    }

    let (y_min, y_max) = y_range(series);

    // Horizontal grid lines and y labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * (y_max - y_min);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    // Points are evenly spaced; the series is one sample per hour
    let n = series.len();
    let x_at = |i: usize| {
        if n == 1 {
            margin_left + chart_width / 2.0
        } else {
            margin_left + (i as f64 / (n - 1) as f64) * chart_width
        }
    };
    let y_at = |v: f64| margin_top + ((y_max - v) / (y_max - y_min)) * chart_height;

    ctx.set_stroke_style(&LINE_COLOR.into());
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, (_, value)) in series.iter().enumerate() {
        if i == 0 {
            ctx.move_to(x_at(i), y_at(value));
        } else {
            ctx.line_to(x_at(i), y_at(value));
        }
    }
    ctx.stroke();

    ctx.set_fill_style(&LINE_COLOR.into());
    for (i, (_, value)) in series.iter().enumerate() {
        ctx.begin_path();
        let _ = ctx.arc(x_at(i), y_at(value), 3.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();
    }

    // Hour labels
    ctx.set_fill_style(&"#9ca3af".into());
    let step = label_step(n);
    for (i, (label, _)) in series.iter().enumerate().step_by(step) {
        let _ = ctx.fill_text(label, x_at(i) - 15.0, height - 10.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_step() {
        assert_eq!(label_step(0), 1);
        assert_eq!(label_step(6), 1);
        assert_eq!(label_step(24), 3);
        assert_eq!(label_step(25), 4);
    }

    #[test]
    fn test_y_range_padding() {
        let series = TrendSeries {
            labels: vec!["01:00".into(), "02:00".into()],
            values: vec![10.0, 60.0],
        };
        assert_eq!(y_range(&series), (5.0, 65.0));

        let flat = TrendSeries {
            labels: vec!["01:00".into()],
            values: vec![0.0],
        };
        assert_eq!(y_range(&flat), (0.0, 1.0));
    }
}
