mod components;
mod hooks;
mod services;

use yew::prelude::*;

use components::forms::FeeCollectionForm;
use components::header::{ActiveView, Header};
use components::tables::{AdmissionsTable, DocumentsTable, FeesTable, StudentsTable};
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let api_client = ApiClient::new();
    let active_view = use_state(|| ActiveView::FeeCollection);

    let on_select_view = {
        let active_view = active_view.clone();
        Callback::from(move |view: ActiveView| active_view.set(view))
    };

    html! {
        <>
            <Header active_view={*active_view} on_select_view={on_select_view} />

            <main class="main">
                <div class="container">
                    {match *active_view {
                        ActiveView::FeeCollection => html! {
                            <FeeCollectionForm api_client={api_client.clone()} />
                        },
                        ActiveView::Admissions => html! {
                            <AdmissionsTable api_client={api_client.clone()} />
                        },
                        ActiveView::Students => html! {
                            <StudentsTable api_client={api_client.clone()} />
                        },
                        ActiveView::Documents => html! {
                            <DocumentsTable api_client={api_client.clone()} />
                        },
                        ActiveView::Fees => html! {
                            <FeesTable api_client={api_client.clone()} />
                        },
                    }}
                </div>
            </main>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
