//! Uplift Bar Chart
//!
//! Draws pre/post launch means per metric as paired bars, with a legend and
//! delta / p-value annotations above each pair.
//!
//! ```text
//!  TITLE
//!  SUBTITLE
//!
//!  DELTA 0.081                               LEGEND:
//!  P=1.2E-05                                 [#] PRE-LAUNCH
//!  ┌──┐┌──┐       ┌──┐┌──┐                   [#] POST-LAUNCH
//!  │  ││  │       │  ││  │
//! ─┴──┴┴──┴───────┴──┴┴──┴── baseline (y = 340)
//!  ENGAGEMENT     CONVERSION
//! ```

use crate::canvas::{Canvas, Rgb};
use crate::format::format_general;
use crate::report::MetricSummary;
use serde::{Deserialize, Serialize};

const BAR_WIDTH: i32 = 80;
const PAIR_GAP: i32 = 60;
const BARS_X: i32 = 80;
const BASELINE_Y: i32 = 340;
/// Pixel height of a bar for rate = 1.0
const BAR_SCALE: f64 = 240.0;

const TITLE_POS: (i32, i32) = (40, 30);
const SUBTITLE_POS: (i32, i32) = (40, 60);
const LEGEND_X: i32 = 520;
const LEGEND_TITLE_Y: i32 = 260;
const LEGEND_FIRST_Y: i32 = 280;
const LEGEND_STEP: i32 = 30;
const SWATCH_SIZE: u32 = 20;

/// Chart appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Heading line
    pub title: String,
    /// Line under the heading
    pub subtitle: String,
    /// Fill color
    pub background: Rgb,
    /// Text and axis color
    pub text: Rgb,
    /// Pre-launch bar color
    pub pre_color: Rgb,
    /// Post-launch bar color
    pub post_color: Rgb,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 700,
            height: 420,
            title: "Feature Rollout Impact".to_string(),
            subtitle: "Pre vs post launch means with Welch t-test".to_string(),
            background: Rgb::WHITE,
            text: Rgb::BLACK,
            pre_color: Rgb::new(70, 130, 180),
            post_color: Rgb::new(46, 204, 113),
        }
    }
}

/// Left edge of the bar pair for the `index`-th metric
pub fn pair_x(index: usize) -> i32 {
    let index = i32::try_from(index).unwrap_or(i32::MAX / (2 * BAR_WIDTH + PAIR_GAP));
    BARS_X.saturating_add(index.saturating_mul(2 * BAR_WIDTH + PAIR_GAP))
}

/// Bar height in pixels for a rate (truncated toward zero)
pub fn bar_height(rate: f64) -> i32 {
    // NaN casts to 0
    (rate * BAR_SCALE).clamp(-1e6, 1e6) as i32
}

/// Render the uplift chart for `rows`
pub fn render_uplift_chart(rows: &[MetricSummary], options: &ChartOptions) -> Canvas {
    let mut canvas = Canvas::new(options.width, options.height, options.background);

    canvas.draw_text(&options.title, TITLE_POS.0, TITLE_POS.1, options.text);
    canvas.draw_text(&options.subtitle, SUBTITLE_POS.0, SUBTITLE_POS.1, options.text);

    draw_legend(&mut canvas, options);

    for (i, row) in rows.iter().enumerate() {
        let x0 = pair_x(i);
        let pre_h = bar_height(row.pre_mean);
        let post_h = bar_height(row.post_mean);

        draw_bar(&mut canvas, x0, pre_h, options.pre_color);
        draw_bar(&mut canvas, x0 + BAR_WIDTH, post_h, options.post_color);

        canvas.draw_text(&row.label(), x0, BASELINE_Y + 15, options.text);

        let change_text = format!("DELTA {:.3}", row.mean_change);
        let p_text = format!("P={}", format_general(row.p_value, 3));
        canvas.draw_text(&change_text, x0, (BASELINE_Y - post_h - 50).max(20), options.text);
        canvas.draw_text(&p_text, x0, (BASELINE_Y - post_h - 30).max(40), options.text);
    }

    canvas
}

fn draw_legend(canvas: &mut Canvas, options: &ChartOptions) {
    canvas.draw_text("Legend:", LEGEND_X, LEGEND_TITLE_Y, options.text);

    let entries = [
        ("Pre-launch", options.pre_color),
        ("Post-launch", options.post_color),
    ];
    let mut y = LEGEND_FIRST_Y;
    for (label, color) in entries {
        canvas.fill_rect(LEGEND_X, y, SWATCH_SIZE, SWATCH_SIZE, color);
        canvas.draw_text(label, LEGEND_X + 30, y + 5, options.text);
        y += LEGEND_STEP;
    }
}

/// Bar rising from the baseline, clipped at the top edge
fn draw_bar(canvas: &mut Canvas, x: i32, height: i32, color: Rgb) {
    let top = (BASELINE_Y - height).max(0);
    if top >= BASELINE_Y {
        return;
    }
    canvas.fill_rect(x, top, BAR_WIDTH as u32, (BASELINE_Y - top) as u32, color);
}
