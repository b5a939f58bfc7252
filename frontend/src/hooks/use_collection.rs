use std::future::Future;

use shared::ApiError;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// The three mutually exclusive states of a collection view.
#[derive(Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Error(String),
    Ready(T),
}

/// Fetch a collection once when the component mounts, refetching whenever
/// `reload` changes. The rows are held read-only after the fetch; views
/// that mutate the backend bump `reload` instead of patching locally.
#[hook]
pub fn use_collection<T, F, Fut>(
    component: &'static str,
    reload: u32,
    fetch: F,
) -> UseStateHandle<FetchState<Vec<T>>>
where
    T: Clone + PartialEq + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let state = use_state(|| FetchState::Loading);

    use_effect_with(reload, {
        let state = state.clone();
        move |_| {
            state.set(FetchState::Loading);
            spawn_local(async move {
                match fetch().await {
                    Ok(rows) => state.set(FetchState::Ready(rows)),
                    Err(error) => {
                        Logger::error_with_component(component, &error.to_string());
                        state.set(FetchState::Error(error.to_string()));
                    }
                }
            });
            || ()
        }
    });

    state
}
