use shared::Student;
use yew::prelude::*;

use crate::components::cells::file_cell;
use crate::components::table_controls::TableControls;
use crate::hooks::use_collection::{use_collection, FetchState};
use crate::services::api::ApiClient;
use crate::services::table::{matches_query, page_bounds, page_count, sort_rows, SortDirection};

#[derive(Properties, PartialEq)]
pub struct DocumentsTableProps {
    pub api_client: ApiClient,
}

/// Per-student document files: photo, signature and id proof.
#[function_component(DocumentsTable)]
pub fn documents_table(props: &DocumentsTableProps) -> Html {
    let rows = use_collection("documents_table", 0, {
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
        FetchState::Loading => html! { <div class="loading">{"Loading documents..."}</div> },
        FetchState::Error(message) => html! { <div class="table-error">{message}</div> },
        FetchState::Ready(all) => {
            let mut filtered: Vec<Student> = all
                .iter()
                .filter(|s| matches_query(&search, &[&s.name, &s.reg_no]))
                .cloned()
                .collect();
            sort_rows(&mut filtered, |s| s.name.to_lowercase(), *sort);

            let pages = page_count(filtered.len());
            let current_page = (*page).min(pages - 1);
            let (start, end) = page_bounds(filtered.len(), current_page);
            let api_client = props.api_client.clone();

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
                                    <th>{"Photo"}</th>
                                    <th>{"Signature"}</th>
                                    <th>{"ID Proof"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for filtered[start..end].iter().map(|student| html! {
                                    <tr>
                                        <td>{&student.reg_no}</td>
                                        <td>{&student.name}</td>
                                        <td>{file_cell(&api_client, &student.photo)}</td>
                                        <td>{file_cell(&api_client, &student.signature)}</td>
                                        <td>{file_cell(&api_client, &student.id_proof)}</td>
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
        <section class="documents-section">
            <h2>{"Documents"}</h2>
            {body}
        </section>
    }
}
