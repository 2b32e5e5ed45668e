use yew::prelude::*;

use crate::bitmap::to_hex_rows;
use crate::led::{LedCommand, SERVICE_UUID};
use crate::util::format_bytes;

#[derive(Properties, PartialEq, Clone)]
pub struct ExportPanelProps {
    pub command: Option<LedCommand>,
    pub activity: Vec<String>,
}

#[function_component]
pub fn ExportPanel(props: &ExportPanelProps) -> Html {
    let mono = "font-family:monospace; font-size:11px; line-height:1.3; white-space:pre;";
    let body = match &props.command {
        None => html! { <div style="opacity:0.7;">{"Nothing sent yet"}</div> },
        Some(cmd) => {
            let payload = cmd.chunks().concat();
            html! {<>
                <div style="font-weight:600;">{ cmd.describe() }</div>
                <div style={mono}>{ format!("{}: {}", cmd.channel().label(), cmd.header()) }</div>
                <div style="font-size:10px; opacity:0.6;">{ format!("{} / {}", SERVICE_UUID, cmd.channel().uuid()) }</div>
                { if payload.is_empty() { html!{} } else { html!{
                    <>
                        <div style="opacity:0.7;">{ format_bytes(payload.len()) }</div>
                        <div style={format!("{} max-height:160px; overflow:auto;", mono)}>{ to_hex_rows(&payload).join("\n") }</div>
                    </>
                } } }
            </>}
        }
    };
    html! {<div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; max-width:260px; display:flex; flex-direction:column; gap:6px; font-size:12px;">
        { body }
        { if props.activity.is_empty() { html!{} } else { html!{
            <div style={mono}>{ props.activity.join("\n") }</div>
        } } }
    </div>}
}
