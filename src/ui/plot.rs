use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::chart::histogram::{Histogram, HistogramMode};
use crate::chart::scatter::nearest;
use crate::state::AppState;

const HISTOGRAM_HEIGHT: f32 = 280.0;
const SCATTER_HEIGHT: f32 = 420.0;

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Render one of the two species histograms of the current attribute.
pub fn histogram_plot(ui: &mut Ui, state: &AppState, mode: HistogramMode) {
    let hist = state.histogram(mode);
    let (id, title) = match mode {
        HistogramMode::Grouped => ("grouped_histogram", "Grouped Histogram"),
        HistogramMode::Stacked => ("stacked_histogram", "Stacked Histogram"),
    };
    ui.strong(title);

    if hist.is_empty() {
        ui.label(format!("No {} values to show.", hist.attribute));
        return;
    }
    let mut caption = format!("{} values in {} bins", hist.total(), hist.bin_count());
    if hist.dropped > 0 {
        caption.push_str(&format!(", {} rows without {} left out", hist.dropped, hist.attribute));
    }
    ui.small(caption);

    let charts = bar_charts(&hist, state, mode);

    Plot::new(id)
        .legend(Legend::default())
        .height(HISTOGRAM_HEIGHT)
        .x_axis_label(hist.attribute.column_name())
        .y_axis_label("count")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// One bar chart per species present. Grouped mode splits every bin into
/// equal slots; stacked mode stacks each species on the ones before it.
fn bar_charts(hist: &Histogram, state: &AppState, mode: HistogramMode) -> Vec<BarChart> {
    let present: Vec<_> = hist.species_present().collect();
    let bin_width = hist.bin_width();
    let slot = bin_width / present.len().max(1) as f64;

    let mut charts: Vec<BarChart> = Vec::with_capacity(present.len());
    for (k, species) in present.into_iter().enumerate() {
        let color = state.palette.color_for(species);
        let bars: Vec<Bar> = hist
            .species_counts(species)
            .iter()
            .enumerate()
            .map(|(bin, &count)| {
                let (argument, width) = match mode {
                    HistogramMode::Grouped => {
                        (hist.edges[bin] + slot * (k as f64 + 0.5), slot * 0.95)
                    }
                    HistogramMode::Stacked => (hist.bin_center(bin), bin_width * 0.95),
                };
                Bar::new(argument, count as f64)
                    .width(width)
                    .name(format!(
                        "{species} {:.1}–{:.1}",
                        hist.edges[bin],
                        hist.edges[bin + 1]
                    ))
            })
            .collect();

        let mut chart = BarChart::new(bars)
            .name(species.as_str())
            .color(color)
            .element_formatter(Box::new(|bar, _chart| {
                format!("{}\ncount: {}", bar.name, bar.value)
            }));
        if mode == HistogramMode::Stacked {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }
    charts
}

// ---------------------------------------------------------------------------
// Scatterplot
// ---------------------------------------------------------------------------

/// Bill length vs bill depth, coloured by species, sized by body mass.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let series = state.scatter();
    ui.strong("Scatterplot: Bill Length vs Bill Depth");

    if series.is_empty() {
        ui.label("No complete rows to show.");
        return;
    }

    Plot::new("species_scatter")
        .legend(Legend::default())
        .height(SCATTER_HEIGHT)
        .x_axis_label("bill_length_mm")
        .y_axis_label("bill_depth_mm")
        .label_formatter(|name, value| {
            match nearest(&series, value.x, value.y) {
                Some((species, pt)) if !name.is_empty() => format!(
                    "{species}\nbill_length_mm: {}\nbill_depth_mm: {}\n{}",
                    pt.bill_length_mm,
                    pt.bill_depth_mm,
                    pt.hover_text()
                ),
                _ => format!("x: {:.1}\ny: {:.1}", value.x, value.y),
            }
        })
        .show(ui, |plot_ui| {
            for s in &series {
                let color = state.palette.color_for(s.species);
                // One item per marker: egui_plot has a single radius per series.
                // Items sharing a name share one legend entry.
                for pt in &s.points {
                    plot_ui.points(
                        Points::new(vec![[pt.bill_length_mm, pt.bill_depth_mm]])
                            .radius(pt.radius)
                            .color(color)
                            .filled(true)
                            .name(s.species.as_str()),
                    );
                }
            }
        });
}
