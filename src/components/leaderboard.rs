use crate::feeds::LeaderboardEntry;
use crate::state::feed::leaderboard_line;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LeaderboardProps {
    pub entries: Vec<LeaderboardEntry>,
}

#[function_component(Leaderboard)]
pub fn leaderboard(props: &LeaderboardProps) -> Html {
    html! {
        <div class="sidebar">
            <h3 class="sidebar-title">{"Leaderboard"}</h3>
            <ul class="leaderboard-list">
                { for props.entries.iter().enumerate().map(|(i, e)| html! {
                    <li>{ leaderboard_line(i + 1, e) }</li>
                }) }
            </ul>
        </div>
    }
}
