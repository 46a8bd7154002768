use crate::state::feed::stat_icon;
use crate::util::spaced_label;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub cards: Vec<(&'static str, u64)>,
    /// Feed messages dropped as unreadable; shown as a warning badge when non-zero.
    #[prop_or(0)]
    pub skipped: u32,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let card_style = "display:flex; align-items:center; gap:10px; background:#ffffff; color:#000000; \
        border:3px solid #000000; padding:8px 12px; min-width:170px;";
    let label_style = "font-size:12px; text-transform:capitalize;";
    let value_style = "font-size:20px; font-weight:600; font-variant-numeric:tabular-nums;";
    html! {
        <div class="stats-container" style="display:flex; flex-wrap:wrap; gap:10px; justify-content:center;">
            { for props.cards.iter().map(|(key, value)| {
                let label = spaced_label(key);
                html! {
                    <div key={*key} class="stats-card" style={card_style}>
                        <img src={stat_icon(key)} alt={label.clone()} class="stat-gif" style="width:32px; height:32px;" />
                        <div class="stats-content" style="display:flex; flex-direction:column;">
                            <span class="stats-label" style={label_style}>{ label }</span>
                            <div class="stats-value" style={value_style}>{ *value }</div>
                        </div>
                    </div>
                }
            }) }
            { if props.skipped > 0 {
                html! { <div style="align-self:center; font-size:11px; color:#E6B800;" title="Some live updates could not be read">
                    { format!("⚠ {} feed updates skipped", props.skipped) }
                </div> }
            } else { html! {} } }
        </div>
    }
}
