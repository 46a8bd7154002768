use yew::prelude::*;

use crate::state::landing::{LANDING_COLS, LandingBoard, LandingTile, is_title_cell, random_hint};

#[derive(Properties, PartialEq, Clone)]
pub struct LandingPageProps {
    pub on_start: Callback<()>,
}

#[derive(Clone, PartialEq)]
struct StickyNote {
    message: &'static str,
    x: i32,
    y: i32,
}

#[function_component]
pub fn LandingPage(props: &LandingPageProps) -> Html {
    let board = use_state(|| {
        let mut rng = js_sys::Math::random;
        LandingBoard::new(&mut rng)
    });
    let hovered = use_state(|| None::<usize>);
    let sticky = use_state(|| None::<StickyNote>);

    let start_cb = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let cells = board.tiles.iter().enumerate().map(|(idx, tile)| {
        let row = idx / LANDING_COLS;
        let col = idx % LANDING_COLS;
        let revealed = board.is_revealed(idx);
        let classes = classes!(
            "pixel-tile",
            revealed.then(|| tile.class()),
            (*hovered == Some(idx) && !revealed).then_some("hovered"),
            is_title_cell(row, col).then_some("title-tile"),
        );
        let enter = {
            let hovered = hovered.clone();
            Callback::from(move |_: MouseEvent| hovered.set(Some(idx)))
        };
        let leave = {
            let hovered = hovered.clone();
            Callback::from(move |_: MouseEvent| hovered.set(None))
        };
        let click = {
            let board = board.clone();
            let sticky = sticky.clone();
            Callback::from(move |e: MouseEvent| {
                let mut rng = js_sys::Math::random;
                let mut next = (*board).clone();
                next.reveal_burst(idx, &mut rng);
                board.set(next);
                sticky.set(Some(StickyNote {
                    message: random_hint(js_sys::Math::random()),
                    x: e.client_x(),
                    y: e.client_y(),
                }));
            })
        };
        let icon = match (revealed, tile) {
            (true, LandingTile::Diamond) => {
                html! { <img src="/diamond.gif" alt="diamond" class="tile-icon-gif" /> }
            }
            (true, LandingTile::Bomb) => {
                html! { <img src="/nuke.gif" alt="nuke" class="tile-icon-gif" /> }
            }
            _ => html! {},
        };
        html! {
            <div key={idx} class={classes} onmouseenter={enter} onmouseleave={leave} onclick={click}>
                { icon }
            </div>
        }
    });

    html! {
        <div class="landing-page">
            <div class="pixel-grid" style={format!("display:grid; grid-template-columns:repeat({}, 1fr);", LANDING_COLS)}>
                { for cells }
            </div>
            { if let Some(note) = &*sticky {
                html! {
                    <div style={format!("position:absolute; left:{}px; top:{}px;", note.x + 10, note.y - 20)}>
                        <div class="bubble" style="background:#ffffff; color:#000000; border:3px solid #4dfffc; padding:6px 10px;">
                            { note.message }
                        </div>
                    </div>
                }
            } else { html! {} } }
            <div class="landing-overlay-content">
                <button onclick={start_cb} style="background:#ffffff; color:#000000; border:3px solid #4dfffc; box-shadow:4px 4px 0 #000000; width:16rem; height:4rem; font-size:1.5rem;">
                    {"Play Game"}
                </button>
            </div>
        </div>
    }
}
