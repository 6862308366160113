use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::chart_colors::{AXIS_COLOR, EXPENSE_COLOR, INCOME_COLOR};
use crate::services::aggregates::{month_short_label, MonthlyRow};

#[derive(Properties, PartialEq)]
pub struct OverviewChartProps {
    pub rows: Vec<MonthlyRow>,
    pub loading: bool,
}

/// Income and expenses per month as stacked bars.
pub struct OverviewChart {
    canvas_ref: NodeRef,
}

/// Top of the y axis: the tallest stack plus headroom, never zero.
pub fn stack_ceiling(rows: &[MonthlyRow]) -> f64 {
    let tallest = rows.iter().map(|r| r.income + r.expense).fold(0.0, f64::max);
    if tallest <= 0.0 {
        1.0
    } else {
        tallest * 1.1
    }
}

impl Component for OverviewChart {
    type Message = ();
    type Properties = OverviewChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !ctx.props().rows.is_empty() {
            self.draw(&ctx.props().rows);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();

        html! {
            <div class="card chart-card">
                <h3 class="card-title">{"Overview"}</h3>
                {if props.rows.is_empty() && props.loading {
                    html! { <div class="chart-loading"><div class="loading-spinner"></div></div> }
                } else if props.rows.is_empty() {
                    html! { <div class="chart-empty"><p>{"No monthly data yet"}</p></div> }
                } else {
                    html! {
                        <div class="chart-content">
                            <canvas ref={self.canvas_ref.clone()} width="800" height="350"></canvas>
                            <div class="chart-legend">
                                <span class="legend income">{"Income"}</span>
                                <span class="legend expense">{"Expenses"}</span>
                            </div>
                        </div>
                    }
                }}
            </div>
        }
    }
}

impl OverviewChart {
    fn draw(&self, rows: &[MonthlyRow]) {
        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let Some(backend) = CanvasBackend::with_canvas_object(canvas) else {
            return;
        };

        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(70)
            .build_cartesian_2d((0..rows.len()).into_segmented(), 0.0..stack_ceiling(rows))
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        if chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|slot: &SegmentValue<usize>| match slot {
                SegmentValue::CenterOf(i) => rows
                    .get(*i)
                    .map(|r| month_short_label(r.month).to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| format!("${:.0}", v))
            .label_style(("sans-serif", 12, &AXIS_COLOR))
            .axis_style(&AXIS_COLOR)
            .bold_line_style(&RGBColor(241, 245, 249))
            .draw()
            .is_err()
        {
            return;
        }

        let bars = rows.iter().enumerate().flat_map(|(i, row)| {
            let stacks = [
                (0.0, row.income, INCOME_COLOR),
                (row.income, row.income + row.expense, EXPENSE_COLOR),
            ];
            stacks.into_iter().map(move |(bottom, top, color)| {
                let mut bar = Rectangle::new(
                    [(SegmentValue::Exact(i), bottom), (SegmentValue::Exact(i + 1), top)],
                    color.filled(),
                );
                bar.set_margin(0, 0, 12, 12);
                bar
            })
        });
        if chart.draw_series(bars).is_err() {
            return;
        }

        let _ = root.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(income: f64, expense: f64) -> MonthlyRow {
        MonthlyRow { month: 1, label: "January", income, expense }
    }

    #[test]
    fn ceiling_covers_the_tallest_stack() {
        assert_eq!(stack_ceiling(&[]), 1.0);
        assert_eq!(stack_ceiling(&[row(0.0, 0.0)]), 1.0);
        let ceiling = stack_ceiling(&[row(100.0, 50.0), row(10.0, 10.0)]);
        assert!(ceiling > 150.0);
    }
}
