use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub show_grid_lines: bool,
    pub on_toggle_grid_lines: Callback<()>,
    pub real_time: bool,
    pub on_toggle_real_time: Callback<()>,
    pub start_in_drag_mode: bool,
    pub on_toggle_start_in_drag: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_grid_cb = {
        let cb = props.on_toggle_grid_lines.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_real_time_cb = {
        let cb = props.on_toggle_real_time.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_drag_cb = {
        let cb = props.on_toggle_start_in_drag.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("Restore default settings?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; max-width:420px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.show_grid_lines} onclick={toggle_grid_cb} />
                    <span>{"Show Grid Lines"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.real_time} onclick={toggle_real_time_cb} />
                    <span>{"Real-time Updates"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.start_in_drag_mode} onclick={toggle_drag_cb} />
                    <span>{"Start in Drag Mode"}</span>
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Restore Defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Real-time mode logs a pixel command for every toggle and a fill command for All Black / All White to the activity panel. Nothing is transmitted."}</div>
        </div>
    </div>}
}
