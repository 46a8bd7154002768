use super::{game_view::GameView, landing_page::LandingPage};
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum View {
    Landing,
    Game,
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Landing);

    let start_game = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Game))
    };

    match *view {
        View::Landing => html! { <LandingPage on_start={start_game} /> },
        View::Game => html! { <GameView /> },
    }
}
