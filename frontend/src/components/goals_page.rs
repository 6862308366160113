use yew::prelude::*;

use super::fetch_status::fetch_placeholder;
use super::forms::GoalForm;
use super::goal_card::GoalCard;
use crate::hooks::use_goals::use_goals;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct GoalsPageProps {
    pub api_client: ApiClient,
}

#[function_component(GoalsPage)]
pub fn goals_page(props: &GoalsPageProps) -> Html {
    let goals = use_goals(&props.api_client);

    html! {
        <section class="goals-page">
            <h2>{"Savings Goals"}</h2>
            <GoalForm api_client={props.api_client.clone()} on_created={goals.actions.created.clone()} />

            {match fetch_placeholder(&goals.state, "Loading goals...", "No goals yet. Add one above to start saving.") {
                Some(placeholder) => placeholder,
                None => html! {
                    <div class="goals-grid">
                        {for goals.state.items().iter().map(|goal| html! {
                            <GoalCard
                                key={goal.id}
                                api_client={props.api_client.clone()}
                                goal={goal.clone()}
                                on_updated={goals.actions.updated.clone()}
                                on_removed={goals.actions.removed.clone()}
                            />
                        })}
                    </div>
                },
            }}
        </section>
    }
}
