use shared::Student;
use yew::prelude::*;

use crate::components::table_controls::TableControls;
use crate::hooks::use_collection::{use_collection, FetchState};
use crate::services::api::ApiClient;
use crate::services::format::format_money;
use crate::services::table::{matches_query, page_bounds, page_count, sort_rows, SortDirection};

#[derive(Properties, PartialEq)]
pub struct StudentsTableProps {
    pub api_client: ApiClient,
}

/// Student roster with contact details and the fee summary columns.
#[function_component(StudentsTable)]
pub fn students_table(props: &StudentsTableProps) -> Html {
    let rows = use_collection("students_table", 0, {
        let api_client = props.api_client.clone();
        move || {
            let api_client = api_client.clone();
            async move { api_client.list_students().await }
        }
    });

    let search = use_state(String::new);
    let page = use_state(|| 0usize);
    let sort = use_state(|| SortDirection::Ascending);

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

    let body = match &*rows {
        FetchState::Loading => html! { <div class="loading">{"Loading students..."}</div> },
        FetchState::Error(message) => html! { <div class="table-error">{message}</div> },
        FetchState::Ready(all) => {
            let mut filtered: Vec<Student> = all
                .iter()
                .filter(|s| matches_query(&search, &[&s.name, &s.reg_no, &s.email]))
                .cloned()
                .collect();
            sort_rows(&mut filtered, |s| s.name.to_lowercase(), *sort);

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
                                    <th>{"Reg No"}</th>
                                    <th class="sortable" onclick={toggle_sort}>
                                        {format!("Name {}", sort.indicator())}
                                    </th>
                                    <th>{"Email"}</th>
                                    <th>{"Mobile"}</th>
                                    <th>{"Course"}</th>
                                    <th>{"Total Fee"}</th>
                                    <th>{"Discount"}</th>
                                    <th>{"Net Fee"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for filtered[start..end].iter().map(|student| html! {
                                    <tr>
                                        <td>{&student.reg_no}</td>
                                        <td>{&student.name}</td>
                                        <td>{&student.email}</td>
                                        <td>{&student.mobile}</td>
                                        <td>{student.course_label()}</td>
                                        <td class="amount">{format_money(student.total_fee)}</td>
                                        <td class="amount">{format_money(student.discount)}</td>
                                        <td class="amount">{format_money(student.net_fee)}</td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    </div>
                </>
            }
        }
    };

    html! {
        <section class="students-section">
            <h2>{"Students"}</h2>
            {body}
        </section>
    }
}
