use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CameraControlsProps {
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_pan_left: Callback<()>,
    pub on_pan_right: Callback<()>,
    pub on_pan_up: Callback<()>,
    pub on_pan_down: Callback<()>,
    pub on_reset: Callback<()>,
    /// False while the view is untransformed.
    pub can_reset: bool,
}

#[function_component(CameraControls)]
pub fn camera_controls(props: &CameraControlsProps) -> Html {
    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {<div style="position:absolute; left:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
        <button onclick={emit(&props.on_zoom_out)}> {"-"} </button>
        <button onclick={emit(&props.on_zoom_in)}> {"+"} </button>
        <span style="width:8px;"></span>
        <button onclick={emit(&props.on_pan_left)}> {"←"} </button>
        <button onclick={emit(&props.on_pan_up)}> {"↑"} </button>
        <button onclick={emit(&props.on_pan_down)}> {"↓"} </button>
        <button onclick={emit(&props.on_pan_right)}> {"→"} </button>
        <span style="width:8px;"></span>
        <button disabled={!props.can_reset} onclick={emit(&props.on_reset)}> {"Reset View"} </button>
    </div>}
}
