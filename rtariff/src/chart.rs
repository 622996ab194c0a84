//! Character-grid rendering of demand curves with shaded surplus regions.
//!
//! The textual analogue of the study's demand-curve figures: each segment's
//! inverse demand line is drawn with its own glyph, the consumer-surplus
//! triangle (between the curve and the price line, up to the transacted
//! quantity) is shaded, and the legend carries the solved scalars. Only
//! already-computed outcome values are consumed here; no solving happens in
//! this module.

use std::fmt::Write as _;
use tariff_core::models::{PolicyOutcome, StudyConfig};

const WIDTH: usize = 64;
const HEIGHT: usize = 20;
const GLYPHS: [char; 4] = ['#', '%', '@', '&'];

/// Render one solved scenario as a chart with legend.
pub fn render(study: &StudyConfig, outcome: &PolicyOutcome) -> String {
    let qmax = study
        .segments()
        .iter()
        .map(|s| s.demand.intercept())
        .fold(0.0, f64::max);
    let pmax = study
        .segments()
        .iter()
        .map(|s| s.demand.choke_price())
        .fold(0.0, f64::max);

    let row_of = |price: f64| -> usize {
        let frac = (1.0 - price / pmax).clamp(0.0, 1.0);
        (frac * (HEIGHT - 1) as f64).round() as usize
    };

    let mut grid = vec![[' '; WIDTH]; HEIGHT];

    for (index, segment) in study.segments().iter().enumerate() {
        let Some(solved) = outcome.segments.get(&segment.name) else {
            continue;
        };
        let glyph = GLYPHS[index % GLYPHS.len()];
        let (a, b) = (segment.demand.intercept(), segment.demand.slope());

        // Shade the surplus triangle first so the curve and price line can
        // overwrite its edges.
        for col in 0..WIDTH {
            let q = qmax * col as f64 / (WIDTH - 1) as f64;
            if q > solved.quantity {
                continue;
            }
            let curve_price = (a - q) / b;
            let top = row_of(curve_price);
            let bottom = row_of(solved.price);
            for cell in grid.iter_mut().take(bottom).skip(top + 1) {
                if cell[col] == ' ' {
                    cell[col] = '.';
                }
            }
        }

        // The price line
        let price_row = row_of(solved.price);
        for cell in grid[price_row].iter_mut() {
            if *cell == ' ' {
                *cell = '-';
            }
        }

        // The inverse demand curve p(q) = (A − q) / B
        for col in 0..WIDTH {
            let q = qmax * col as f64 / (WIDTH - 1) as f64;
            if q > a {
                continue;
            }
            let row = row_of((a - q) / b);
            grid[row][col] = glyph;
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} pricing: consumer surplus by segment", outcome.policy);

    for (row, cells) in grid.iter().enumerate() {
        let label = if row == 0 {
            format!("{pmax:>9.1}")
        } else {
            " ".repeat(9)
        };
        let line: String = cells.iter().collect();
        let _ = writeln!(out, "{label} |{line}");
    }
    let _ = writeln!(out, "{:>9.1} +{}", 0.0, "-".repeat(WIDTH));
    let _ = writeln!(out, "{}0{:>width$.0}", " ".repeat(11), qmax, width = WIDTH - 1);

    for (index, segment) in study.segments().iter().enumerate() {
        let Some(solved) = outcome.segments.get(&segment.name) else {
            continue;
        };
        let glyph = GLYPHS[index % GLYPHS.len()];
        let _ = writeln!(
            out,
            "  {glyph} {}: price ${:.2}, consumer surplus ${:.2}",
            segment.name, solved.price, solved.consumer_surplus
        );
    }
    let _ = writeln!(out, "  total consumer surplus ${:.2}", outcome.total_surplus);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariff_core::models::StudyConfig;
    use tariff_solver::{NewtonRaphson, solve_uniform};

    fn solved() -> (StudyConfig, PolicyOutcome) {
        let segments = StudyConfig::default().segments().to_vec();
        let study = StudyConfig::new(segments, 5.0, 165_000.0, 30, 1000.0).unwrap();
        let outcome = solve_uniform(&study, &NewtonRaphson::default()).unwrap();
        (study, outcome)
    }

    #[test]
    fn chart_contains_curves_shading_and_legend() {
        let (study, outcome) = solved();
        let text = render(&study, &outcome);

        assert!(text.starts_with("uniform pricing"));
        // One glyph per segment, plus shaded surplus cells
        assert!(text.contains('#'));
        assert!(text.contains('%'));
        assert!(text.matches('.').count() > 10);
        assert!(text.contains("high-income: price $"));
        assert!(text.contains("total consumer surplus $"));
    }

    #[test]
    fn chart_rows_share_a_width() {
        let (study, outcome) = solved();
        let text = render(&study, &outcome);

        let rows: Vec<&str> = text
            .lines()
            .filter(|line| line.contains('|'))
            .collect();
        assert_eq!(rows.len(), HEIGHT);
        for row in rows {
            assert_eq!(row.chars().count(), 9 + 2 + WIDTH);
        }
    }
}
