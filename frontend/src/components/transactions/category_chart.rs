use plotters::element::Pie;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::components::chart_colors::{hex_color, AXIS_COLOR};
use crate::services::aggregates::CategoryAggregate;

#[derive(Properties, PartialEq)]
pub struct CategoryChartProps {
    pub groups: Vec<CategoryAggregate>,
}

/// Pie of category totals; slice colors come from the aggregate.
pub struct CategoryChart {
    canvas_ref: NodeRef,
}

impl Component for CategoryChart {
    type Message = ();
    type Properties = CategoryChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw(&ctx.props().groups);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if ctx.props().groups.is_empty() {
            return html! { <div class="chart-empty"><p>{"No transactions of this type yet"}</p></div> };
        }

        html! {
            <div class="chart-content">
                <canvas ref={self.canvas_ref.clone()} width="360" height="300"></canvas>
            </div>
        }
    }
}

impl CategoryChart {
    fn draw(&self, groups: &[CategoryAggregate]) {
        if groups.is_empty() {
            return;
        }
        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);
        let Some(backend) = CanvasBackend::with_canvas_object(canvas) else {
            return;
        };

        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let center = (width / 2, height / 2);
        let radius = f64::from(width.min(height)) * 0.35;
        let sizes: Vec<f64> = groups.iter().map(|g| g.value).collect();
        let colors: Vec<RGBColor> = groups
            .iter()
            .map(|g| hex_color(g.color).unwrap_or(AXIS_COLOR))
            .collect();
        let labels: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 12).into_font().color(&AXIS_COLOR));

        if root.draw(&pie).is_err() {
            return;
        }
        let _ = root.present();
    }
}
