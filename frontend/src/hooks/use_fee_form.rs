use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use shared::{FeeField, FeeFormState, Student};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// How long the submission success banner stays up.
const SUCCESS_BANNER_MS: u32 = 3000;

enum FormAction {
    Edit(FeeField),
    Absorb(Student),
    Reset,
}

#[derive(Clone, Default, PartialEq)]
struct FormStore(FeeFormState);

impl Reducible for FormStore {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: FormAction) -> Rc<Self> {
        let mut next = self.0.clone();
        match action {
            FormAction::Edit(field) => next.apply(field),
            FormAction::Absorb(student) => next.absorb_student(&student),
            FormAction::Reset => next.reset(),
        }
        Rc::new(FormStore(next))
    }
}

#[derive(Clone, PartialEq)]
pub struct UseFeeFormActions {
    /// Route every field edit through here; the derived net amount is
    /// recomputed inside the same dispatch.
    pub apply: Callback<FeeField>,
    /// Populate dependent fields from a resolved student record.
    pub absorb_student: Callback<Student>,
    /// Validate and submit, carrying the currently resolved student.
    pub submit: Callback<Option<Student>>,
}

pub struct UseFeeFormResult {
    pub form: FeeFormState,
    pub submitting: bool,
    pub form_error: Option<String>,
    pub form_success: bool,
    pub actions: UseFeeFormActions,
}

#[hook]
pub fn use_fee_form(api_client: &ApiClient, on_submitted: Callback<()>) -> UseFeeFormResult {
    let store = use_reducer(FormStore::default);
    let submitting = use_state(|| false);
    let form_error = use_state(|| Option::<String>::None);
    let form_success = use_state(|| false);

    let apply = {
        let store = store.clone();
        let form_error = form_error.clone();
        use_callback((), move |field: FeeField, _| {
            store.dispatch(FormAction::Edit(field));
            form_error.set(None);
        })
    };

    let absorb_student = {
        let store = store.clone();
        use_callback((), move |student: Student, _| {
            store.dispatch(FormAction::Absorb(student));
        })
    };

    let submit = {
        let api_client = api_client.clone();
        let store = store.clone();
        let submitting = submitting.clone();
        let form_error = form_error.clone();
        let form_success = form_success.clone();
        let on_submitted = on_submitted.clone();

        // The form state rides along as the dependency so the callback
        // always validates and submits what is currently on screen.
        use_callback((*store).0.clone(), move |student: Option<Student>, form: &FeeFormState| {
            form_error.set(None);
            form_success.set(false);

            let form = form.clone();
            if let Err(validation_message) = form.validate() {
                // rejected locally, the backend is never called
                form_error.set(Some(validation_message));
                return;
            }

            let request = form.to_create_request(student.as_ref());
            let api_client = api_client.clone();
            let store = store.clone();
            let submitting = submitting.clone();
            let form_error = form_error.clone();
            let form_success = form_success.clone();
            let on_submitted = on_submitted.clone();

            submitting.set(true);
            spawn_local(async move {
                match api_client.create_fee(request).await {
                    Ok(_fee) => {
                        store.dispatch(FormAction::Reset);
                        form_success.set(true);
                        on_submitted.emit(());

                        let form_success_clear = form_success.clone();
                        spawn_local(async move {
                            TimeoutFuture::new(SUCCESS_BANNER_MS).await;
                            form_success_clear.set(false);
                        });
                    }
                    Err(error) => {
                        Logger::error_with_component("fee_form", &error.to_string());
                        form_error.set(Some(error.to_string()));
                    }
                }
                submitting.set(false);
            });
        })
    };

    UseFeeFormResult {
        form: (*store).0.clone(),
        submitting: *submitting,
        form_error: (*form_error).clone(),
        form_success: *form_success,
        actions: UseFeeFormActions {
            apply,
            absorb_student,
            submit,
        },
    }
}
