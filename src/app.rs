//! The accounting entries page: owns the [ViewState] and runs its effects.

use std::{cell::RefCell, cmp, rc::Rc};

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{
    api::ApiClient,
    components::{
        DeleteConfirm, EntryDialog, FilterBar, Header, SummaryCard, SummaryIcon, TransactionTable,
    },
    config::Config,
    filter::Filter,
    ledger::{Action, Effect, ViewState},
};

/// Reducer state of the page.
///
/// Effects returned by [ViewState::update] are queued in `outbox`, which is
/// shared by every state produced from the first one, and drained after
/// render. `queued` counts every effect ever queued so that the render hook
/// runs again exactly when there is something new to drain.
pub struct PageState {
    view: ViewState,
    outbox: Rc<RefCell<Vec<Effect>>>,
    queued: u64,
    current_year: i32,
}

impl PageState {
    fn new(today: Filter) -> Self {
        let (view, effects) = ViewState::new(today);

        Self {
            view,
            queued: effects.len() as u64,
            outbox: Rc::new(RefCell::new(effects)),
            current_year: today.year,
        }
    }

    fn take_effects(&self) -> Vec<Effect> {
        self.outbox.borrow_mut().drain(..).collect()
    }
}

impl Reducible for PageState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        let mut view = self.view.clone();
        let effects = view.update(action);
        let queued = self.queued + effects.len() as u64;
        self.outbox.borrow_mut().extend(effects);

        Rc::new(Self {
            view,
            outbox: Rc::clone(&self.outbox),
            queued,
            current_year: self.current_year,
        })
    }
}

#[derive(Properties, PartialEq)]
pub struct AccountingEntriesProps {
    pub config: Config,
}

#[function_component(AccountingEntries)]
pub fn accounting_entries(props: &AccountingEntriesProps) -> Html {
    let config = &props.config;
    let page = use_reducer(|| PageState::new(Filter::current()));

    {
        let page = page.clone();
        let client = ApiClient::from_config(config);
        let queued = page.queued;

        use_effect_with_deps(
            move |_| {
                for effect in page.take_effects() {
                    let page = page.clone();
                    let client = client.clone();
                    spawn_local(async move {
                        let action = perform(client, effect).await;
                        page.dispatch(action);
                    });
                }
                || ()
            },
            queued,
        );
    }

    let view = &page.view;
    let summary = view.summary();
    let filter = view.filter();

    html! {
        <div class="px-8 md:px-16 h-full">
            <Header user_name={config.user_name.clone()} />

            <div class="grid lg:grid-cols-3 gap-6 lg:gap-12">
                <SummaryCard title="Total Balance" amount={summary.total} color="text-black" icon={SummaryIcon::Wallet} />
                <SummaryCard title="Total Income" amount={summary.credit} color="text-[#5EAC5B]" icon={SummaryIcon::TrendingUp} />
                <SummaryCard title="Total Expenses" amount={summary.debit} color="text-[#C36767]" icon={SummaryIcon::CreditCard} />
            </div>

            <FilterBar
                filter={filter}
                years={selectable_years(config.first_year, page.current_year, filter.year)}
                on_month={dispatch_with(&page, Action::MonthSelected)}
                on_year={dispatch_with(&page, Action::YearSelected)}
                on_new={dispatch_with(&page, |_| Action::OpenCreate)}
            />

            <TransactionTable
                transactions={view.transactions().to_vec()}
                on_edit={dispatch_with(&page, Action::OpenEdit)}
                on_delete={dispatch_with(&page, Action::DeleteRequested)}
            />

            if view.pending_delete().is_some() {
                <DeleteConfirm
                    on_confirm={dispatch_with(&page, |_| Action::DeleteConfirmed)}
                    on_dismiss={dispatch_with(&page, |_| Action::DeleteDismissed)}
                />
            }

            if let Some(dialog) = view.dialog() {
                <EntryDialog
                    dialog={dialog.clone()}
                    on_input={dispatch_with(&page, Action::FormInput)}
                    on_submit={dispatch_with(&page, |_| Action::Submit)}
                    on_cancel={dispatch_with(&page, |_| Action::Cancel)}
                />
            }
        </div>
    }
}

fn dispatch_with<IN: 'static>(
    page: &UseReducerHandle<PageState>,
    to_action: impl Fn(IN) -> Action + 'static,
) -> Callback<IN> {
    let page = page.clone();
    Callback::from(move |input| page.dispatch(to_action(input)))
}

/// Make the request described by `effect` and wrap its result as an action.
async fn perform(client: ApiClient, effect: Effect) -> Action {
    match effect {
        Effect::FetchTransactions { generation, filter } => Action::TransactionsLoaded {
            generation,
            result: client.list_transactions(&filter).await,
        },
        Effect::FetchSummary { generation, filter } => Action::SummaryLoaded {
            generation,
            result: client.get_summary(&filter).await,
        },
        Effect::Create { dialog, payload } => Action::Saved {
            dialog,
            result: client.create_transaction(&payload).await,
        },
        Effect::Update {
            dialog,
            transaction,
        } => Action::Saved {
            dialog,
            result: client.update_transaction(&transaction).await,
        },
        Effect::Delete(id) => Action::Deleted(client.delete_transaction(&id).await),
    }
}

/// Years offered by the year selector: from `first_year` up to this year, or
/// further if the active filter is already later.
fn selectable_years(first_year: i32, current_year: i32, selected_year: i32) -> Vec<i32> {
    let last = cmp::max(current_year, selected_year);
    let first = cmp::min(first_year, selected_year);
    (first..=last).collect()
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use time::Month;
    use yew::Reducible;

    use super::{selectable_years, PageState};
    use crate::{
        filter::Filter,
        ledger::{Action, Effect},
        models::TransactionId,
    };

    fn may_2024() -> Filter {
        Filter::new(Month::May, 2024)
    }

    #[test]
    fn years_run_from_first_to_current() {
        assert_eq!(
            selectable_years(2020, 2024, 2024),
            vec![2020, 2021, 2022, 2023, 2024]
        );
    }

    #[test]
    fn years_include_selected_year_outside_range() {
        assert_eq!(selectable_years(2020, 2021, 2019), vec![2019, 2020, 2021]);
        assert_eq!(selectable_years(2020, 2020, 2022), vec![2020, 2021, 2022]);
    }

    #[test]
    fn initial_fetches_are_queued() {
        let page = PageState::new(may_2024());

        assert_eq!(page.queued, 2);
        assert_eq!(page.current_year, 2024);
        assert_eq!(
            page.take_effects(),
            vec![
                Effect::FetchTransactions {
                    generation: 1,
                    filter: may_2024()
                },
                Effect::FetchSummary {
                    generation: 1,
                    filter: may_2024()
                },
            ]
        );
        assert!(page.take_effects().is_empty(), "effects should only be taken once");
    }

    #[test]
    fn reduce_queues_new_effects_behind_undrained_ones() {
        let page = Rc::new(PageState::new(may_2024()));

        let page = page.reduce(Action::DeleteRequested(TransactionId::new("7")));
        assert_eq!(page.queued, 2, "asking for confirmation should not queue anything");

        let page = page.reduce(Action::DeleteConfirmed);

        assert_eq!(page.queued, 3);
        let effects = page.take_effects();
        assert_eq!(effects.len(), 3);
        assert_eq!(effects.last(), Some(&Effect::Delete(TransactionId::new("7"))));
    }
}
