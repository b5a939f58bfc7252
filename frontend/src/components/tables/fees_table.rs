use shared::Fee;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::table_controls::TableControls;
use crate::hooks::use_collection::{use_collection, FetchState};
use crate::services::api::ApiClient;
use crate::services::format::{format_date_for_display, format_money};
use crate::services::logging::Logger;
use crate::services::table::{matches_query, page_bounds, page_count, sort_rows, SortDirection};

#[derive(Properties, PartialEq)]
pub struct FeesTableProps {
    pub api_client: ApiClient,
}

/// Collected fee records, with per-row deletion. The collection is
/// refetched after a delete rather than patched locally.
#[function_component(FeesTable)]
pub fn fees_table(props: &FeesTableProps) -> Html {
    let reload = use_state(|| 0u32);
    let rows = use_collection("fees_table", *reload, {
        let api_client = props.api_client.clone();
        move || {
            let api_client = api_client.clone();
            async move { api_client.list_fees().await }
        }
    });

    let search = use_state(String::new);
    let page = use_state(|| 0usize);
    let sort = use_state(|| SortDirection::Descending);
    let deleting = use_state(|| Option::<String>::None);
    let delete_error = use_state(|| Option::<String>::None);

    let on_search = {
        let search = search.clone();
        let page = page.clone();
        use_callback((), move |query: String, _| {
            search.set(query);
            page.set(0);
        })
    };
    let on_prev = {
        let page = page.clone();
        use_callback(*page, move |_, current: &usize| page.set(current.saturating_sub(1)))
    };
    let on_next = {
        let page = page.clone();
        use_callback(*page, move |_, current: &usize| page.set(*current + 1))
    };
    let toggle_sort = {
        let sort = sort.clone();
        Callback::from(move |_: MouseEvent| sort.set((*sort).toggled()))
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let reload = reload.clone();
        let deleting = deleting.clone();
        let delete_error = delete_error.clone();

        use_callback(*reload, move |fee_id: String, current: &u32| {
            let api_client = api_client.clone();
            let reload = reload.clone();
            let deleting = deleting.clone();
            let delete_error = delete_error.clone();
            let next = *current + 1;

            spawn_local(async move {
                deleting.set(Some(fee_id.clone()));
                delete_error.set(None);

                match api_client.delete_fee(&fee_id).await {
                    Ok(()) => reload.set(next),
                    Err(error) => {
                        Logger::error_with_component("fees_table", &error.to_string());
                        delete_error.set(Some(error.to_string()));
                    }
                }

                deleting.set(None);
            });
        })
    };

    let body = match &*rows {
        FetchState::Loading => html! { <div class="loading">{"Loading fee records..."}</div> },
        FetchState::Error(message) => html! { <div class="table-error">{message}</div> },
        FetchState::Ready(all) => {
            let mut filtered: Vec<Fee> = all
                .iter()
                .filter(|f| {
                    matches_query(&search, &[&f.student_name, &f.reg_no, &f.transaction_id])
                })
                .cloned()
                .collect();
            sort_rows(&mut filtered, |f| f.payment_date.clone(), *sort);

            let pages = page_count(filtered.len());
            let current_page = (*page).min(pages - 1);
            let (start, end) = page_bounds(filtered.len(), current_page);

            html! {
                <>
                    <TableControls
                        search={(*search).clone()}
                        on_search={on_search}
                        page={current_page}
                        page_count={pages}
                        on_prev={on_prev}
                        on_next={on_next}
                        total={filtered.len()}
                    />
                    <div class="table-container">
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th class="sortable" onclick={toggle_sort}>
                                        {format!("Payment Date {}", sort.indicator())}
                                    </th>
                                    <th>{"Student"}</th>
                                    <th>{"Reg No"}</th>
                                    <th>{"Fee Type"}</th>
                                    <th>{"Method"}</th>
                                    <th>{"Transaction"}</th>
                                    <th>{"Net Amount"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for filtered[start..end].iter().map(|fee| {
                                    let row_delete = {
                                        let on_delete = on_delete.clone();
                                        let fee_id = fee.id.clone();
                                        Callback::from(move |_: MouseEvent| on_delete.emit(fee_id.clone()))
                                    };
                                    let busy = (*deleting).as_deref() == Some(fee.id.as_str());
                                    html! {
                                        <tr>
                                            <td>{format_date_for_display(&fee.payment_date)}</td>
                                            <td>{&fee.student_name}</td>
                                            <td>{&fee.reg_no}</td>
                                            <td>{&fee.fee_type}</td>
                                            <td>{&fee.payment_method}</td>
                                            <td>{&fee.transaction_id}</td>
                                            <td class="amount">{format_money(fee.net_amount)}</td>
                                            <td>
                                                <button
                                                    class="btn btn-danger"
                                                    onclick={row_delete}
                                                    disabled={busy}
                                                >
                                                    {if busy { "Deleting..." } else { "Delete" }}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })}
                            </tbody>
                        </table>
                    </div>
                </>
            }
        }
    };

    html! {
        <section class="fees-section">
            <h2>{"Fee Records"}</h2>
            {if let Some(error) = (*delete_error).as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}
            {body}
        </section>
    }
}
