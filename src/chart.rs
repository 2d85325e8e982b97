use std::error::Error as StdError;
use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::error::{Error, Result};
use crate::forecast::TrendView;
use crate::models::ForecastResult;

// Vertical padding around the plotted Gini values
const Y_MARGIN: f64 = 1.0;

/// Axis ranges covering the observed points and the forecast continuation.
pub fn chart_bounds(
    points: &[(i64, f64)],
    forecast: &ForecastResult,
) -> Option<(Range<i64>, Range<f64>)> {
    let first_year = points.iter().map(|(year, _)| *year).min()?;
    let last_year = points.iter().map(|(year, _)| *year).max()?;

    let values = points
        .iter()
        .map(|(_, gini)| *gini)
        .chain(forecast.values().iter().copied());
    let (low, high) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    let x_end = last_year + forecast.len() as i64 + 1;
    Some((first_year..x_end, (low - Y_MARGIN)..(high + Y_MARGIN)))
}

/// Forecast values placed on the years following the last observation.
pub fn forecast_points(points: &[(i64, f64)], forecast: &ForecastResult) -> Vec<(i64, f64)> {
    let Some(last_year) = points.iter().map(|(year, _)| *year).max() else {
        return Vec::new();
    };
    forecast
        .values()
        .iter()
        .enumerate()
        .map(|(i, v)| (last_year + i as i64 + 1, *v))
        .collect()
}

/// Line chart of a country's Gini series with the forecast appended.
pub fn render_trend_chart(view: &TrendView, output_file: impl AsRef<Path>) -> Result<()> {
    let output_file = output_file.as_ref();
    let (country, points, forecast) = match view {
        TrendView::Ready {
            country,
            points,
            forecast,
        } => (country, points, forecast),
        TrendView::Unavailable { message } => return Err(Error::InvalidData(message.clone())),
    };

    let (x_range, y_range) = chart_bounds(points, forecast).ok_or_else(|| {
        Error::InvalidData(format!("No Gini observations for {}", country))
    })?;

    draw(country, points, forecast, x_range, y_range, output_file)
        .map_err(|e| Error::Chart(e.to_string()))?;

    info!(path = %output_file.display(), country = %country, "Trend chart saved");
    Ok(())
}

fn draw(
    country: &str,
    points: &[(i64, f64)],
    forecast: &ForecastResult,
    x_range: Range<i64>,
    y_range: Range<f64>,
    output_file: &Path,
) -> std::result::Result<(), Box<dyn StdError>> {
    let root = BitMapBackend::new(output_file, (1024, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Gini trend: {}", country), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Gini")
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))?
        .label("Observed")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], &BLUE));

    chart.draw_series(
        points
            .iter()
            .map(|&(year, gini)| Circle::new((year, gini), 3, BLUE.filled())),
    )?;

    let projected = forecast_points(points, forecast);
    if !projected.is_empty() {
        chart
            .draw_series(
                projected
                    .iter()
                    .map(|&(year, gini)| Circle::new((year, gini), 4, RED.filled())),
            )?
            .label("Forecast (moving average)")
            .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_forecast_years_and_values() {
        let points = [(2019, 30.0), (2020, 32.0), (2021, 31.0)];
        let forecast = ForecastResult::from(vec![31.0, 31.0, 31.0]);
        let (x, y) = chart_bounds(&points, &forecast).unwrap();
        assert_eq!(x, 2019..2025);
        assert_eq!(y, 29.0..33.0);
    }

    #[test]
    fn no_points_means_no_chart() {
        assert!(chart_bounds(&[], &ForecastResult::insufficient()).is_none());
        assert!(forecast_points(&[], &ForecastResult::from(vec![1.0])).is_empty());
    }

    #[test]
    fn forecast_follows_last_year() {
        let points = [(2020, 30.0), (2018, 32.0)];
        let forecast = ForecastResult::from(vec![31.0, 31.0]);
        assert_eq!(
            forecast_points(&points, &forecast),
            vec![(2021, 31.0), (2022, 31.0)]
        );
    }

    #[test]
    fn unavailable_view_is_not_rendered() {
        let view = TrendView::Unavailable {
            message: "missing".into(),
        };
        let dir = tempfile::tempdir().unwrap();
        let err = render_trend_chart(&view, dir.path().join("trend.png")).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
