use serde_json::Value;
use shared::as_yes_no;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// Fixed Yes/No cell for the loosely-typed boolean columns.
pub fn yes_no_cell(value: &Value) -> Html {
    let label = as_yes_no(value);
    let class = if label == "Yes" {
        "cell-flag yes"
    } else {
        "cell-flag no"
    };
    html! { <span class={class}>{label}</span> }
}

/// Preview and open-in-new-tab affordances for a stored file path. An
/// absent value is an expected state for older records, not an error.
pub fn file_cell(api_client: &ApiClient, path: &Option<String>) -> Html {
    match path.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => {
            let url = api_client.file_url(path);
            html! {
                <span class="cell-file">
                    <a class="file-preview" href={url.clone()} target="_blank" rel="noopener">
                        {"Preview"}
                    </a>
                    <a class="file-open" href={url} target="_blank" rel="noopener">
                        {"Open"}
                    </a>
                </span>
            }
        }
        _ => html! { <span class="cell-file empty">{"Not uploaded"}</span> },
    }
}
