use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, Color32, RichText, ScrollArea, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Line, Plot, PlotPoints};

use crate::color::{outline_for, ChartColors};
use crate::data::aggregate::{Summary, Totals};
use crate::data::model::ClusterId;
use crate::format::NumberFormat;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render metrics and charts for the current selection.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new("Bike Sharing Dashboard").size(26.0).strong());
            ui.add_space(8.0);

            let Some(summary) = &state.summary else {
                ui.label("Select a valid date range in the side panel.");
                return;
            };
            let fmt = &state.number_format;
            let colors = &state.colors;

            section(ui, "Daily Rentals");
            totals_row(ui, &summary.totals, fmt);
            daily_trend(ui, &summary.daily, colors);

            section(ui, "Rentals by Working Day");
            working_day_chart(ui, &summary.by_working_day, colors);

            section(ui, "Rental Clusters by Season and Weather");
            cluster_row(ui, summary, fmt);
            cluster_chart(ui, &summary.by_cluster, colors);
            cluster_legend(ui);
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(title).size(20.0).strong());
    ui.separator();
}

/// A caption over a large value, in the style of a KPI tile.
fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0));
    });
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

fn totals_row(ui: &mut Ui, totals: &Totals, fmt: &NumberFormat) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Rentals", fmt.format_count(totals.total));
        metric(
            &mut cols[1],
            "Registered Renters",
            fmt.format_percent(totals.percent_registered),
        );
        metric(
            &mut cols[2],
            "Casual Renters",
            fmt.format_percent(totals.percent_casual),
        );
    });
}

fn cluster_row(ui: &mut Ui, summary: &Summary, fmt: &NumberFormat) {
    ui.columns(ClusterId::ALL.len(), |cols: &mut [Ui]| {
        for (col, (id, total)) in cols.iter_mut().zip(&summary.by_cluster) {
            metric(col, &format!("Cluster {id} Rentals"), fmt.format_count(*total));
        }
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn date_label(mark: GridMark, _range: &std::ops::RangeInclusive<f64>) -> String {
    NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Integer grid marks only, so categorical axes don't show `0.5`.
fn whole_mark(mark: &GridMark) -> Option<i64> {
    (mark.value.fract() == 0.0).then_some(mark.value as i64)
}

/// Rentals per day across the selected range.
fn daily_trend(ui: &mut Ui, daily: &[(NaiveDate, u64)], colors: &ChartColors) {
    let points: PlotPoints = daily
        .iter()
        .map(|&(date, count)| [day_number(date), count as f64])
        .collect();

    chart_frame(ui, colors, |ui: &mut Ui| {
        Plot::new("daily_trend")
            .height(280.0)
            .x_axis_formatter(date_label)
            .y_axis_label("Rentals")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(colors.line).width(2.0).name("Rentals"));
            });
    });
}

/// One bar per working-day flag present in the selection.
fn working_day_chart(ui: &mut Ui, by_working_day: &BTreeMap<bool, u64>, colors: &ChartColors) {
    let bars: Vec<Bar> = by_working_day
        .iter()
        .map(|(&flag, &count)| {
            let x = if flag { 1.0 } else { 0.0 };
            Bar::new(x, count as f64)
                .width(0.6)
                .name(if flag { "Working day" } else { "Weekend / holiday" })
                .fill(colors.line)
                .stroke(Stroke::new(1.0, outline_for(colors.line)))
        })
        .collect();

    chart_frame(ui, colors, |ui: &mut Ui| {
        Plot::new("working_day_chart")
            .height(240.0)
            .x_axis_label("Working Day (0 = Weekend/Holiday, 1 = Working Day)")
            .x_axis_formatter(|mark, _range| match whole_mark(&mark) {
                Some(v @ 0..=1) => v.to_string(),
                _ => String::new(),
            })
            .include_x(-0.5)
            .include_x(1.5)
            .include_y(0.0)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    });
}

/// Horizontal bars for the four clusters in fixed order.
fn cluster_chart(ui: &mut Ui, by_cluster: &BTreeMap<ClusterId, u64>, colors: &ChartColors) {
    let bars: Vec<Bar> = by_cluster
        .iter()
        .map(|(&id, &total)| {
            let fill = colors.cluster(id);
            Bar::new(id.get() as f64, total as f64)
                .width(0.7)
                .name(format!("Cluster {id}"))
                .fill(fill)
                .stroke(Stroke::new(1.0, outline_for(fill)))
        })
        .collect();

    chart_frame(ui, colors, |ui: &mut Ui| {
        Plot::new("cluster_chart")
            .height(280.0)
            .x_axis_label("Rentals")
            .y_axis_formatter(|mark, _range| match whole_mark(&mark) {
                Some(v @ 0..=3) => format!("Cluster {v}"),
                _ => String::new(),
            })
            .include_x(0.0)
            .include_y(-0.5)
            .include_y(3.5)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    });
}

fn cluster_legend(ui: &mut Ui) {
    ui.add_space(6.0);
    for id in ClusterId::ALL {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new(format!("Cluster {id}")).strong());
            ui.label(format!(": {}", id.description()));
        });
    }
}

fn chart_frame(ui: &mut Ui, colors: &ChartColors, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::default()
        .fill(colors.background)
        .stroke(Stroke::new(1.0, Color32::from_gray(220)))
        .show(ui, add_contents);
}
