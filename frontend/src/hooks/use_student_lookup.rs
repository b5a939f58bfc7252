use gloo::timers::callback::Timeout;
use shared::Student;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Quiet period between the last identifier keystroke and the lookup firing.
const LOOKUP_DEBOUNCE_MS: u32 = 500;

#[derive(Clone, PartialEq)]
pub struct StudentLookupState {
    /// The most recently resolved student, cleared on failure and on reset.
    pub student: Option<Student>,
    pub looking_up: bool,
    /// User-facing lookup failure text, not-found and otherwise.
    pub message: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct UseStudentLookupActions {
    pub on_identifier_change: Callback<String>,
    pub clear: Callback<()>,
}

pub struct UseStudentLookupResult {
    pub state: StudentLookupState,
    pub actions: UseStudentLookupActions,
}

/// Debounced student resolution for the fee intake form. The identifier
/// may be a registration number or a primary id; the registration-number
/// endpoint is tried first and the id endpoint is the fallback, matching
/// the behavior this form has always had.
#[hook]
pub fn use_student_lookup(
    api_client: &ApiClient,
    on_resolved: Callback<Student>,
) -> UseStudentLookupResult {
    let student = use_state(|| Option::<Student>::None);
    let looking_up = use_state(|| false);
    let message = use_state(|| Option::<String>::None);
    // The single debounce token. Replacing the stored handle drops the
    // previous one, which cancels its scheduled callback; only the most
    // recently scheduled lookup can ever fire.
    let pending = use_mut_ref(|| Option::<Timeout>::None);

    let run_lookup = {
        let api_client = api_client.clone();
        let student = student.clone();
        let looking_up = looking_up.clone();
        let message = message.clone();
        let on_resolved = on_resolved.clone();

        use_callback((), move |identifier: String, _| {
            let api_client = api_client.clone();
            let student = student.clone();
            let looking_up = looking_up.clone();
            let message = message.clone();
            let on_resolved = on_resolved.clone();

            spawn_local(async move {
                looking_up.set(true);
                message.set(None);

                // Registration-number lookup first, primary id on failure.
                let resolved = match api_client.get_student_by_reg_no(&identifier).await {
                    Ok(found) => Ok(found),
                    Err(first_error) => match api_client.get_student_by_id(&identifier).await {
                        Ok(found) => Ok(found),
                        Err(second_error) => Err((first_error, second_error)),
                    },
                };

                match resolved {
                    Ok(found) => {
                        student.set(Some(found.clone()));
                        on_resolved.emit(found);
                    }
                    Err((first_error, second_error)) => {
                        student.set(None);
                        if first_error.is_not_found() && second_error.is_not_found() {
                            message.set(Some(format!(
                                "No student found for \"{}\"",
                                identifier
                            )));
                        } else {
                            let shown = if second_error.is_not_found() {
                                first_error
                            } else {
                                second_error
                            };
                            Logger::error_with_component("student_lookup", &shown.to_string());
                            message.set(Some(shown.to_string()));
                        }
                    }
                }

                looking_up.set(false);
            });
        })
    };

    let on_identifier_change = {
        let student = student.clone();
        let looking_up = looking_up.clone();
        let message = message.clone();
        let pending = pending.clone();
        let run_lookup = run_lookup.clone();

        use_callback((), move |identifier: String, _| {
            let trimmed = identifier.trim().to_string();
            if trimmed.is_empty() {
                // A blank identifier never issues a request; any scheduled
                // lookup is dropped and the stored result cleared right away.
                pending.borrow_mut().take();
                student.set(None);
                message.set(None);
                looking_up.set(false);
                return;
            }

            let run_lookup = run_lookup.clone();
            let timeout = Timeout::new(LOOKUP_DEBOUNCE_MS, move || run_lookup.emit(trimmed));
            *pending.borrow_mut() = Some(timeout);
        })
    };

    let clear = {
        let student = student.clone();
        let looking_up = looking_up.clone();
        let message = message.clone();
        let pending = pending.clone();

        use_callback((), move |_, _| {
            pending.borrow_mut().take();
            student.set(None);
            message.set(None);
            looking_up.set(false);
        })
    };

    // Cancel any pending lookup when the form is torn down, so nothing
    // fires against disposed state.
    use_effect_with((), {
        let pending = pending.clone();
        move |_| move || {
            pending.borrow_mut().take();
        }
    });

    UseStudentLookupResult {
        state: StudentLookupState {
            student: (*student).clone(),
            looking_up: *looking_up,
            message: (*message).clone(),
        },
        actions: UseStudentLookupActions {
            on_identifier_change,
            clear,
        },
    }
}
