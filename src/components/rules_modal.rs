use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct RulesModalProps {
    pub show: bool,
    pub on_close: Callback<()>,
}

#[function_component(RulesModal)]
pub fn rules_modal(props: &RulesModalProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close_btn = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:fixed; top:50%; left:50%; transform:translate(-50%, -50%); background:#ffffff; color:#000000; border:3px solid #000000; padding:28px 36px; max-width:520px; width:90%; font-size:14px; line-height:1.4; z-index:40;">
            <h2 style="margin:0 0 12px 0; font-size:22px; text-align:center;">{"Gridy Rules"}</h2>
            <ul style="margin:0 0 12px 18px; padding:0; list-style:disc; display:flex; flex-direction:column; gap:4px;">
                <li>{"The board holds 20,000,000 tiles, split into four layers."}</li>
                <li>{"Click a tile on layers 1 to 3 to zoom into the tiles it covers."}</li>
                <li>{"On layer 4 every tile is a single mineable tile: click it to deploy a bot there."}</li>
                <li>{"Deploying costs grid tokens and needs a connected wallet."}</li>
                <li>{"Mining a tile scores 10 points; finding a diamond scores 5000."}</li>
                <li>{"Bombs destroy your bot. Mined tiles cannot be mined again."}</li>
            </ul>
            <div style="display:flex; justify-content:center; margin-top:8px;">
                <button onclick={close_btn}>{"Close"}</button>
            </div>
        </div>
    }
}
