use crate::model::Notice;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NoticeModalProps {
    pub notice: Option<Notice>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn NoticeModal(props: &NoticeModalProps) -> Html {
    let Some(notice) = &props.notice else {
        return html! {};
    };
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let accent = if notice.is_error() { "#f85149" } else { "#4dfffc" };
    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style={format!("background:#ffffff; color:#000000; border:3px solid {}; padding:20px 24px; min-width:320px; max-width:480px; display:flex; flex-direction:column; gap:12px;", accent)}>
            <h3 style="margin:0; font-size:18px;">{ notice.title() }</h3>
            <p style="margin:0; word-break:break-all;">{ notice.body() }</p>
            <div style="display:flex; justify-content:flex-end;">
                <button onclick={close_cb}>{"Close"}</button>
            </div>
        </div>
    </div>}
}
