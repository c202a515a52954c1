//! Terminal pie chart of the sentiment distribution.

use std::f64::consts::PI;

use barmood_sentiment::SentimentDistribution;
use crossterm::style::Stylize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slice {
    Positive,
    Neutral,
    Negative,
}

impl Slice {
    const ALL: [Slice; 3] = [Slice::Positive, Slice::Neutral, Slice::Negative];

    fn label(self) -> &'static str {
        match self {
            Slice::Positive => "Positive",
            Slice::Neutral => "Neutral",
            Slice::Negative => "Negative",
        }
    }

    fn glyph(self) -> char {
        match self {
            Slice::Positive => '#',
            Slice::Neutral => 'o',
            Slice::Negative => 'x',
        }
    }

    fn paint(self, s: String, color: bool) -> String {
        if !color {
            return s;
        }
        match self {
            Slice::Positive => s.green().to_string(),
            Slice::Neutral => s.yellow().to_string(),
            Slice::Negative => s.red().to_string(),
        }
    }

    fn count(self, dist: &SentimentDistribution) -> usize {
        match self {
            Slice::Positive => dist.positive,
            Slice::Neutral => dist.neutral,
            Slice::Negative => dist.negative,
        }
    }

    fn pct(self, dist: &SentimentDistribution) -> f64 {
        match self {
            Slice::Positive => dist.positive_pct(),
            Slice::Neutral => dist.neutral_pct(),
            Slice::Negative => dist.negative_pct(),
        }
    }
}

/// Renders a titled pie chart with a percentage legend.
///
/// Slices start at twelve o'clock and run counter-clockwise in the order
/// positive, neutral, negative. Each terminal cell is twice as tall as it is
/// wide, so columns are sampled at half steps to keep the pie round.
#[must_use]
pub fn render_pie(dist: &SentimentDistribution, radius: usize, color: bool) -> String {
    let mut out = String::from("Sentiment distribution\n\n");

    if dist.total() == 0 {
        out.push_str("(no reviews to chart)\n");
        return out;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = dist.total() as f64;
    #[allow(clippy::cast_precision_loss)]
    let bounds: Vec<(Slice, f64)> = Slice::ALL
        .iter()
        .scan(0.0, |acc, &slice| {
            *acc += slice.count(dist) as f64 / total;
            Some((slice, *acc))
        })
        .collect();

    #[allow(clippy::cast_possible_wrap)]
    let r = radius as isize;
    #[allow(clippy::cast_precision_loss)]
    let rf = radius as f64;

    for row in -r..=r {
        let mut line = String::new();
        for col in -2 * r..=2 * r {
            #[allow(clippy::cast_precision_loss)]
            let (dx, dy) = (col as f64 / 2.0, -(row as f64));
            if dx * dx + dy * dy > rf * rf + 0.5 {
                line.push(' ');
                continue;
            }
            // Angle from twelve o'clock, counter-clockwise, as a fraction of a turn.
            let angle = dy.atan2(dx) - PI / 2.0;
            let fraction = angle.rem_euclid(2.0 * PI) / (2.0 * PI);
            let slice = bounds
                .iter()
                .find(|(_, upper)| fraction < *upper)
                .or_else(|| bounds.iter().rev().find(|(s, _)| s.count(dist) > 0))
                .map_or(Slice::Negative, |(s, _)| *s);
            line.push_str(&slice.paint(slice.glyph().to_string(), color));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push('\n');
    for slice in Slice::ALL {
        let key = slice.paint(slice.glyph().to_string(), color);
        out.push_str(&format!(
            "  {key} {:<8} {:>5.1}% ({})\n",
            slice.label(),
            slice.pct(dist),
            slice.count(dist)
        ));
    }
    out
}
