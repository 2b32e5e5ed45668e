use yew::prelude::*;

use crate::model::{GRID_SIZE, Mode};
use crate::util::format_scale;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub mode: Mode,
    pub lit: usize,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // label | value
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:200px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={label_style}>{"Mode"}</span>
                <span style={value_style}>{ props.mode.label() }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Lit"}</span>
                <span style={value_style}>{ format!("{} / {}", props.lit, GRID_SIZE * GRID_SIZE) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Zoom"}</span>
                <span style={value_style}>{ format_scale(props.scale) }</span>
            </div>
            <div style={row_style}>
                <span style={label_style}>{"Offset"}</span>
                <span style={value_style}>{ format!("{:.0}, {:.0}", props.translate_x, props.translate_y) }</span>
            </div>
        </div>
    }
}
