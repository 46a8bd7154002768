use crate::model::Layer;
use crate::state::MineResult;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TileGridProps {
    pub layer: Layer,
    /// Mine result per leaf cell; only filled on layer 4.
    #[prop_or_default]
    pub leaf_results: Vec<Option<MineResult>>,
    pub on_hover: Callback<Option<usize>>,
    pub on_click: Callback<usize>,
}

fn overlay(result: Option<MineResult>) -> Html {
    match result {
        Some(MineResult::Diamond) => {
            html! { <img src="/diamond.gif" alt="diamond" class="tile-overlay-gif" /> }
        }
        Some(MineResult::Bomb) => {
            html! { <img src="/nuke.gif" alt="nuke" class="tile-overlay-gif" /> }
        }
        Some(MineResult::Empty) => html! {
            <div class="tile-empty-marker" style="position:absolute; inset:0; background:rgba(0,0,0,0.45); display:flex; align-items:center; justify-content:center; color:#ffffff; font-size:22px;">{"✕"}</div>
        },
        Some(MineResult::Unmined) | None => html! {},
    }
}

#[function_component]
pub fn TileGrid(props: &TileGridProps) -> Html {
    let layer = props.layer;
    let (w, h) = if layer.is_leaf() { (110, 95) } else { (43, 43) };
    let tile_style = format!(
        "background-image:url('/tile_{}.png'); background-size:cover; background-position:center; \
         width:{}px; height:{}px; border:3px dashed black; position:relative; cursor:pointer;",
        layer.number(),
        w,
        h
    );
    let grid_style = format!(
        "display:grid; grid-template-columns:repeat({}, 0.5fr); gap:2px;",
        layer.grid_columns()
    );
    html! {
        <div class="grid-container" style={grid_style}>
            { for (0..layer.grid_cells()).map(|i| {
                let enter = {
                    let cb = props.on_hover.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(Some(i)))
                };
                let leave = {
                    let cb = props.on_hover.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(None))
                };
                let click = {
                    let cb = props.on_click.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(i))
                };
                let result = props.leaf_results.get(i).copied().flatten();
                html! {
                    <div key={i} class="tile" style={tile_style.clone()}
                        onmouseenter={enter} onmouseleave={leave} onclick={click}>
                        { overlay(result) }
                    </div>
                }
            }) }
        </div>
    }
}
