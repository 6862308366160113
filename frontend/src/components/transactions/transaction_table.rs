use shared::{Transaction, TransactionType};
use yew::prelude::*;

use crate::services::date_utils::format_short_date;
use crate::services::format::format_signed;

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<Transaction>,
    #[prop_or(String::from("No transactions match your filters."))]
    pub empty_message: String,
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    if props.transactions.is_empty() {
        return html! { <div class="empty-state">{&props.empty_message}</div> };
    }

    html! {
        <div class="table-container">
            <table class="transactions-table">
                <thead>
                    <tr>
                        <th>{"Date"}</th>
                        <th>{"Description"}</th>
                        <th>{"Category"}</th>
                        <th class="amount">{"Amount"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.transactions.iter().map(|transaction| {
                        let is_income = transaction.transaction_type == TransactionType::Income;
                        let amount_class = if is_income { "amount positive" } else { "amount negative" };

                        html! {
                            <tr key={transaction.id}>
                                <td class="date">{format_short_date(&transaction.date)}</td>
                                <td class="description">{&transaction.description}</td>
                                <td class="category"><span class="badge">{&transaction.category}</span></td>
                                <td class={amount_class}>{format_signed(transaction.amount, is_income)}</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
