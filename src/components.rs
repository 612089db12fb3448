//! Presentational components. Everything here renders from props and reports
//! user intent through callbacks; no component holds page state. The table
//! keeps only its current page.

use std::{cmp, ops::Range};

use time::{format_description::FormatItem, macros::format_description, Date, Month};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{
    currency::{currency_label, mask_amount_input},
    filter::{months, parse_month, parse_year, Filter},
    form::FormInput,
    ledger::Dialog,
    models::{PaymentType, Transaction, TransactionId},
};

const TABLE_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[day]/[month]/[year]");
pub const ROWS_PER_PAGE: usize = 10;

const PRIMARY_BUTTON_STYLE: &str = "bg-primary text-white px-8 h-10 rounded-md hover:opacity-90 transition ease-in-out duration-200 disabled:opacity-50";
const SECONDARY_BUTTON_STYLE: &str = "px-6 h-10 rounded-md border border-border hover:text-red-500 hover:border-red-500 transition";
const FIELD_STYLE: &str = "w-full p-2 border border-border rounded-md";
const LABEL_STYLE: &str = "block mb-1 text-sm font-medium";

const CREDIT_COLOR: &str = "text-[#5EAC5B]";
const DEBIT_COLOR: &str = "text-[#C36767]";

fn amount_color(payment_type: PaymentType) -> &'static str {
    match payment_type {
        PaymentType::Credit => CREDIT_COLOR,
        PaymentType::Debit => DEBIT_COLOR,
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub user_name: String,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="flex justify-between items-center my-8">
            <div class="flex items-center gap-3">
                { icon_wallet() }
                <span class="text-primary text-2xl font-black tracking-tight">{"Accounting Entries"}</span>
            </div>
            <p class="hidden sm:block text-sm text-gray-500">
                {"Welcome, "}<span class="text-primary font-bold">{ props.user_name.clone() }</span>{"!"}
            </p>
        </header>
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum SummaryIcon {
    Wallet,
    TrendingUp,
    CreditCard,
}

#[derive(Properties, PartialEq)]
pub struct SummaryCardProps {
    pub title: &'static str,
    pub amount: i64,
    pub color: &'static str,
    pub icon: SummaryIcon,
}

#[function_component(SummaryCard)]
pub fn summary_card(props: &SummaryCardProps) -> Html {
    html! {
        <div class="bg-white w-full py-5 md:py-10 rounded-lg shadow-md flex flex-col items-center justify-center">
            <div class="mb-2">
                {
                    match props.icon {
                        SummaryIcon::Wallet => icon_wallet(),
                        SummaryIcon::TrendingUp => icon_trending_up(),
                        SummaryIcon::CreditCard => icon_credit_card(),
                    }
                }
            </div>
            <h1 class="font-semibold mb-2 text-gray-500 text-xl md:text-2xl uppercase text-center">{ props.title }</h1>
            <p class={classes!("text-2xl", "md:text-4xl", "font-bold", props.color)}>{ currency_label(props.amount) }</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub filter: Filter,
    pub years: Vec<i32>,
    pub on_month: Callback<Month>,
    pub on_year: Callback<i32>,
    pub on_new: Callback<()>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let on_month_change = {
        let on_month = props.on_month.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                match parse_month(&select.value()) {
                    Ok(month) => on_month.emit(month),
                    Err(error) => tracing::warn!("Ignoring month selection: {error}"),
                }
            }
        })
    };

    let on_year_change = {
        let on_year = props.on_year.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                match parse_year(&select.value()) {
                    Ok(year) => on_year.emit(year),
                    Err(error) => tracing::warn!("Ignoring year selection: {error}"),
                }
            }
        })
    };

    let on_new = {
        let on_new = props.on_new.clone();
        Callback::from(move |_| on_new.emit(()))
    };

    html! {
        <div class="grid sm:grid-cols-[160px_160px_auto] gap-4 mt-6 mb-4">
            <select class={FIELD_STYLE} onchange={on_month_change} aria-label="Select a month">
                { for months().map(|month| {
                    let value = format!("{:02}", u8::from(month));
                    html! {
                        <option value={value} selected={month == props.filter.month}>{ month.to_string() }</option>
                    }
                }) }
            </select>

            <select class={FIELD_STYLE} onchange={on_year_change} aria-label="Select a year">
                { for props.years.iter().map(|year| html! {
                    <option value={format!("{year:04}")} selected={*year == props.filter.year}>{ year.to_string() }</option>
                }) }
            </select>

            <button type="button" onclick={on_new} class={classes!("sm:justify-self-end", PRIMARY_BUTTON_STYLE)}>
                {"+ New Entry"}
            </button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<Transaction>,
    pub on_edit: Callback<Transaction>,
    pub on_delete: Callback<TransactionId>,
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    let page = use_state(|| 0usize);

    let pages = page_count(props.transactions.len(), ROWS_PER_PAGE);
    // A refetch or a delete can leave the remembered page past the end.
    let current = cmp::min(*page, pages - 1);
    let rows = page_range(props.transactions.len(), current, ROWS_PER_PAGE);
    let rows = &props.transactions[rows];

    let on_page = {
        let page = page.clone();
        Callback::from(move |target: usize| page.set(target))
    };

    html! {
        <div class="bg-white rounded-lg shadow-sm overflow-x-auto">
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-[#F1EFFF] text-sm">
                        <th class="px-6 py-3 text-center w-[150px]">{"Date"}</th>
                        <th class="px-6 py-3">{"Description"}</th>
                        <th class="px-6 py-3 text-center">{"Amount"}</th>
                        <th class="px-6 py-3 text-center">{"Payment Type"}</th>
                        <th class="px-6 py-3 text-center w-[50px]">{"Action"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    if props.transactions.is_empty() {
                        <tr>
                            <td colspan="5" class="px-6 py-8 text-center text-gray-400">{"No entries for this month."}</td>
                        </tr>
                    }
                    { for rows.iter().map(|transaction| transaction_row(transaction, &props.on_edit, &props.on_delete)) }
                </tbody>
            </table>
            if pages > 1 {
                { pager(current, pages, &on_page) }
            }
        </div>
    }
}

fn pager(current: usize, pages: usize, on_page: &Callback<usize>) -> Html {
    let step = |target: usize| {
        let on_page = on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(target))
    };

    html! {
        <nav class="flex gap-1 items-center justify-end px-6 py-3 text-sm" aria-label="Pages">
            <button type="button" class="px-2 h-8 rounded-md disabled:opacity-50" disabled={current == 0} onclick={step(current.saturating_sub(1))}>{"‹"}</button>
            { for (0..pages).map(|index| html! {
                <button
                    type="button"
                    class={classes!("w-8", "h-8", "rounded-md", (index == current).then_some("border border-primary text-primary"))}
                    aria-current={(index == current).then_some("page")}
                    onclick={step(index)}
                >
                    { (index + 1).to_string() }
                </button>
            }) }
            <button type="button" class="px-2 h-8 rounded-md disabled:opacity-50" disabled={current + 1 >= pages} onclick={step(current + 1)}>{"›"}</button>
        </nav>
    }
}

/// Number of table pages for `len` rows; an empty table still has one page.
fn page_count(len: usize, per_page: usize) -> usize {
    cmp::max(1, len.div_ceil(per_page))
}

/// Indices of the rows shown on `page`, clamped to the last page.
fn page_range(len: usize, page: usize, per_page: usize) -> Range<usize> {
    let page = cmp::min(page, page_count(len, per_page) - 1);
    let start = page * per_page;
    start..cmp::min(len, start + per_page)
}

fn transaction_row(
    transaction: &Transaction,
    on_edit: &Callback<Transaction>,
    on_delete: &Callback<TransactionId>,
) -> Html {
    let date = format_table_date(transaction.transaction_date);

    let on_edit_click = {
        let on_edit = on_edit.clone();
        let transaction = transaction.clone();
        Callback::from(move |_| on_edit.emit(transaction.clone()))
    };

    let on_delete_click = {
        let on_delete = on_delete.clone();
        let id = transaction.id.clone();
        Callback::from(move |_| on_delete.emit(id.clone()))
    };

    html! {
        <tr key={transaction.id.to_string()} class="text-sm hover:bg-gray-50 transition-colors">
            <td class="px-6 py-3 text-center">{ date }</td>
            <td class="px-6 py-3 max-w-xs">
                <div class="overflow-hidden whitespace-nowrap text-ellipsis" title={transaction.description.clone()}>
                    { &transaction.description }
                </div>
            </td>
            <td class={classes!("px-6", "py-3", "text-center", amount_color(transaction.payment_type))}>
                { currency_label(transaction.amount) }
            </td>
            <td class="px-6 py-3 text-center">{ transaction.payment_type.label() }</td>
            <td class="px-6 py-3">
                <div class="flex gap-1 items-center justify-center">
                    <button type="button" aria-label="Edit" onclick={on_edit_click}>{ icon_pencil() }</button>
                    <button type="button" aria-label="Delete" class="text-red-500" onclick={on_delete_click}>{ icon_trash() }</button>
                </div>
            </td>
        </tr>
    }
}

fn format_table_date(date: Date) -> String {
    date.format(TABLE_DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

#[derive(Properties, PartialEq)]
pub struct DeleteConfirmProps {
    pub on_confirm: Callback<()>,
    pub on_dismiss: Callback<()>,
}

#[function_component(DeleteConfirm)]
pub fn delete_confirm(props: &DeleteConfirmProps) -> Html {
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| on_confirm.emit(()))
    };
    let on_dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(()))
    };

    html! {
        <div class="fixed inset-0 bg-black/30 flex items-center justify-center z-50">
            <div role="alertdialog" class="bg-white rounded-lg shadow-lg p-6 max-w-sm w-full">
                <p class="mb-4">{"Are you sure you want to delete this transaction?"}</p>
                <div class="flex justify-end gap-2">
                    <button type="button" class={SECONDARY_BUTTON_STYLE} onclick={on_dismiss}>{"No"}</button>
                    <button type="button" class={PRIMARY_BUTTON_STYLE} onclick={on_confirm}>{"Yes"}</button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct EntryDialogProps {
    pub dialog: Dialog,
    pub on_input: Callback<FormInput>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(EntryDialog)]
pub fn entry_dialog(props: &EntryDialogProps) -> Html {
    let dialog = &props.dialog;
    let form = &dialog.form;

    let (title, ok_text) = if dialog.is_editing() {
        ("Edit Accounting Entry", "Update")
    } else {
        ("New Accounting Entry", "Save")
    };

    let on_date = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_input.emit(FormInput::Date(input.value()));
            }
        })
    };

    // The DOM value is rewritten directly so that rejected keystrokes
    // disappear even when the masked value did not change.
    let on_amount = {
        let on_input = props.on_input.clone();
        let previous = form.amount.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let masked = mask_amount_input(&input.value()).unwrap_or_else(|| previous.clone());
                input.set_value(&masked);
                on_input.emit(FormInput::Amount(masked));
            }
        })
    };

    let on_type = |payment_type: PaymentType| {
        let on_input = props.on_input.clone();
        Callback::from(move |_: Event| on_input.emit(FormInput::PaymentType(payment_type)))
    };

    let on_description = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                on_input.emit(FormInput::Description(input.value()));
            }
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |_| on_submit.emit(()))
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };

    html! {
        <div class="fixed inset-0 bg-black/30 flex items-center justify-center z-40">
            <div role="dialog" aria-modal="true" class="bg-white rounded-lg shadow-lg p-6 w-full max-w-md">
                <h2 class="text-lg font-semibold mb-4">{ title }</h2>

                <div class="space-y-4">
                    <div>
                        <label for="entry-date" class={LABEL_STYLE}>{"Date"}</label>
                        <input id="entry-date" type="date" class={FIELD_STYLE} value={form.date.clone()} oninput={on_date} />
                        { field_error(dialog.errors.date) }
                    </div>

                    <div>
                        <label for="entry-amount" class={LABEL_STYLE}>{"Value (R$)"}</label>
                        <input
                            id="entry-amount"
                            type="text"
                            inputmode="decimal"
                            placeholder="0,00"
                            maxlength="20"
                            class={FIELD_STYLE}
                            value={form.amount.clone()}
                            oninput={on_amount}
                        />
                        { field_error(dialog.errors.amount) }
                    </div>

                    <fieldset>
                        <legend class={LABEL_STYLE}>{"Type"}</legend>
                        <div class="flex gap-6">
                            { for [PaymentType::Credit, PaymentType::Debit].into_iter().map(|payment_type| html! {
                                <label class="flex items-center gap-2">
                                    <input
                                        type="radio"
                                        name="entry-type"
                                        checked={form.payment_type == Some(payment_type)}
                                        onchange={on_type(payment_type)}
                                    />
                                    { payment_type.label() }
                                </label>
                            }) }
                        </div>
                        { field_error(dialog.errors.payment_type) }
                    </fieldset>

                    <div>
                        <label for="entry-description" class={LABEL_STYLE}>{"Description"}</label>
                        <textarea id="entry-description" rows="3" class={FIELD_STYLE} value={form.description.clone()} oninput={on_description} />
                        { field_error(dialog.errors.description) }
                    </div>

                    if let Some(message) = dialog.save_error {
                        <p class="text-sm text-red-500">{ message }</p>
                    }
                </div>

                <div class="flex justify-end gap-2 mt-6">
                    <button type="button" class={SECONDARY_BUTTON_STYLE} onclick={on_cancel}>{"Cancel"}</button>
                    <button type="button" class={PRIMARY_BUTTON_STYLE} disabled={dialog.submitting} onclick={on_submit}>
                        { if dialog.submitting { "Saving..." } else { ok_text } }
                    </button>
                </div>
            </div>
        </div>
    }
}

fn field_error(message: Option<&'static str>) -> Html {
    match message {
        Some(message) => html! { <p class="mt-1 text-sm text-red-500">{ message }</p> },
        None => html! {},
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
fn icon_pencil() -> Html {
    icon_base("M12 20h9M16.5 3.5a2.1 2.1 0 013 3L7 19l-4 1 1-4z")
}
fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M19 6l-1 14H6L5 6")
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{
        amount_color, format_table_date, page_count, page_range, CREDIT_COLOR, DEBIT_COLOR,
        ROWS_PER_PAGE,
    };
    use crate::models::PaymentType;

    #[test]
    fn table_dates_are_day_first() {
        assert_eq!(format_table_date(date!(2024 - 05 - 01)), "01/05/2024");
    }

    #[test]
    fn amounts_are_coloured_by_type() {
        assert_eq!(amount_color(PaymentType::Credit), CREDIT_COLOR);
        assert_eq!(amount_color(PaymentType::Debit), DEBIT_COLOR);
    }

    #[test]
    fn tables_page_every_ten_rows() {
        assert_eq!(page_count(0, ROWS_PER_PAGE), 1);
        assert_eq!(page_count(10, ROWS_PER_PAGE), 1);
        assert_eq!(page_count(11, ROWS_PER_PAGE), 2);
        assert_eq!(page_count(25, ROWS_PER_PAGE), 3);
    }

    #[test]
    fn page_range_covers_only_that_page() {
        assert_eq!(page_range(25, 0, ROWS_PER_PAGE), 0..10);
        assert_eq!(page_range(25, 1, ROWS_PER_PAGE), 10..20);
        assert_eq!(page_range(25, 2, ROWS_PER_PAGE), 20..25);
        assert_eq!(page_range(0, 0, ROWS_PER_PAGE), 0..0);
    }

    #[test]
    fn page_past_the_end_shows_the_last_page() {
        // Three pages shrink to two after a refetch.
        assert_eq!(page_range(12, 2, ROWS_PER_PAGE), 10..12);
        assert_eq!(page_range(3, 5, ROWS_PER_PAGE), 0..3);
    }
}
