use yew::prelude::*;

use crate::model::Mode;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub mode: Mode,
    pub real_time: bool,
    pub on_set_mode: Callback<Mode>,
    pub on_fill: Callback<bool>,
    pub on_send: Callback<()>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let paint_cb = {
        let cb = props.on_set_mode.clone();
        Callback::from(move |_| cb.emit(Mode::Paint))
    };
    let drag_cb = {
        let cb = props.on_set_mode.clone();
        Callback::from(move |_| cb.emit(Mode::Drag))
    };
    let all_off_cb = {
        let cb = props.on_fill.clone();
        Callback::from(move |_| cb.emit(false))
    };
    let all_on_cb = {
        let cb = props.on_fill.clone();
        Callback::from(move |_| cb.emit(true))
    };
    let send_cb = {
        let cb = props.on_send.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let selected = |m: Mode| {
        if props.mode == m {
            "background:#1f6feb; color:#fff; flex:1;"
        } else {
            "flex:1;"
        }
    };
    html! {<div style="position:absolute; top:12px; right:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <div style="display:flex; gap:6px;">
            <button style={selected(Mode::Paint)} onclick={paint_cb}>{"Paint"}</button>
            <button style={selected(Mode::Drag)} onclick={drag_cb}>{"Drag"}</button>
        </div>
        <div style="display:flex; gap:6px;">
            <button style="flex:1;" onclick={all_off_cb}>{"All Black"}</button>
            <button style="flex:1;" onclick={all_on_cb}>{"All White"}</button>
        </div>
        <button onclick={send_cb}>{"Send to LED"}</button>
        <button onclick={settings_cb}>{"Settings"}</button>
        <div style="font-size:11px; opacity:0.7;">{"Keys: 'D' paint/drag, 'R' reset view"}</div>
        { if props.real_time { html!{ <div style="font-size:11px; color:#2ea043;">{"Real-time updates on"}</div> } } else { html!{} } }
    </div>}
}
