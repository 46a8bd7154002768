use crate::feeds::TransactionEvent;
use crate::state::feed::{event_color, transaction_line};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TransactionListProps {
    pub transactions: Vec<TransactionEvent>,
}

#[function_component(TransactionList)]
pub fn transaction_list(props: &TransactionListProps) -> Html {
    html! {
        <div class="sidebar">
            <h3 class="sidebar-title">{"Transactions"}</h3>
            <ul class="transaction-list">
                { for props.transactions.iter().map(|tx| html! {
                    <li style={format!("color:{};", event_color(&tx.event_name))}>{ transaction_line(tx) }</li>
                }) }
            </ul>
        </div>
    }
}
