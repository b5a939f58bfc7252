use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TableControlsProps {
    pub search: String,
    pub on_search: Callback<String>,
    /// Zero-based page index.
    pub page: usize,
    pub page_count: usize,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
    /// Row count after filtering, shown next to the search box.
    pub total: usize,
}

/// Search box and pager strip shared by every table view.
#[function_component(TableControls)]
pub fn table_controls(props: &TableControlsProps) -> Html {
    let on_search_input = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_search.emit(input.value());
        })
    };

    let on_prev = {
        let on_prev = props.on_prev.clone();
        Callback::from(move |_: MouseEvent| on_prev.emit(()))
    };

    let on_next = {
        let on_next = props.on_next.clone();
        Callback::from(move |_: MouseEvent| on_next.emit(()))
    };

    html! {
        <div class="table-controls">
            <input
                type="search"
                class="table-search"
                placeholder="Search..."
                value={props.search.clone()}
                oninput={on_search_input}
            />
            <span class="table-total">{format!("{} records", props.total)}</span>
            <div class="table-pager">
                <button class="pager-btn" onclick={on_prev} disabled={props.page == 0}>
                    {"‹"}
                </button>
                <span class="pager-label">
                    {format!("Page {} of {}", props.page + 1, props.page_count)}
                </span>
                <button
                    class="pager-btn"
                    onclick={on_next}
                    disabled={props.page + 1 >= props.page_count}
                >
                    {"›"}
                </button>
            </div>
        </div>
    }
}
