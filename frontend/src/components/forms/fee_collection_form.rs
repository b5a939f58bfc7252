use shared::{FeeField, FEE_TYPES, PAYMENT_METHODS};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::student_info_panel::StudentInfoPanel;
use crate::hooks::use_fee_form::use_fee_form;
use crate::hooks::use_student_lookup::use_student_lookup;
use crate::services::api::ApiClient;
use crate::services::format::current_date;

#[derive(Properties, PartialEq)]
pub struct FeeCollectionFormProps {
    pub api_client: ApiClient,
}

fn input_handler(apply: &Callback<FeeField>, make: fn(String) -> FeeField) -> Callback<InputEvent> {
    let apply = apply.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        apply.emit(make(input.value()));
    })
}

fn date_handler(apply: &Callback<FeeField>, make: fn(String) -> FeeField) -> Callback<Event> {
    let apply = apply.clone();
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        apply.emit(make(input.value()));
    })
}

fn select_handler(apply: &Callback<FeeField>, make: fn(String) -> FeeField) -> Callback<Event> {
    let apply = apply.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        apply.emit(make(select.value()));
    })
}

fn select_options(choices: &'static [&'static str], current: &str) -> Html {
    html! {
        <>
            <option value="" selected={current.is_empty()} disabled=true>{"Select..."}</option>
            {for choices.iter().map(|choice| html! {
                <option value={*choice} selected={current == *choice}>{*choice}</option>
            })}
        </>
    }
}

/// Fee intake form: debounced student lookup on the identifier field,
/// derived net amount, required-field validation, create-fee submission.
#[function_component(FeeCollectionForm)]
pub fn fee_collection_form(props: &FeeCollectionFormProps) -> Html {
    // A successful submission also clears the stored lookup result. The
    // lookup hook needs the form's absorb callback and the form hook needs
    // the lookup's clear callback, so one side goes through a slot that is
    // filled in once both hooks exist.
    let clear_slot = use_mut_ref(|| Option::<Callback<()>>::None);
    let on_submitted = {
        let clear_slot = clear_slot.clone();
        use_callback((), move |_, _| {
            if let Some(clear) = clear_slot.borrow().as_ref() {
                clear.emit(());
            }
        })
    };

    let fee_form = use_fee_form(&props.api_client, on_submitted);
    let lookup = use_student_lookup(&props.api_client, fee_form.actions.absorb_student.clone());
    *clear_slot.borrow_mut() = Some(lookup.actions.clear.clone());

    let form = &fee_form.form;
    let apply = &fee_form.actions.apply;

    // The identifier field feeds both the form state and the debounced
    // lookup on every keystroke.
    let on_identifier_input = {
        let apply = apply.clone();
        let on_identifier_change = lookup.actions.on_identifier_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            apply.emit(FeeField::StudentIdentifier(value.clone()));
            on_identifier_change.emit(value);
        })
    };

    let on_remarks_input = {
        let apply = apply.clone();
        Callback::from(move |e: InputEvent| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            apply.emit(FeeField::Remarks(textarea.value()));
        })
    };

    let onsubmit = {
        let submit = fee_form.actions.submit.clone();
        let student = lookup.state.student.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(student.clone());
        })
    };

    html! {
        <section class="fee-collection-section">
            <h2>{"Collect Fee"}</h2>

            {if let Some(error) = fee_form.form_error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            {if fee_form.form_success {
                html! { <div class="form-message success">{"Fee recorded successfully!"}</div> }
            } else { html! {} }}

            <form class="fee-collection-form" onsubmit={onsubmit}>
                <fieldset class="form-section">
                    <legend>{"Student"}</legend>
                    <div class="form-group">
                        <label for="student-identifier">{"Student ID / Registration No"}</label>
                        <input
                            type="text"
                            id="student-identifier"
                            placeholder="Type an id or registration number"
                            value={form.student_identifier.clone()}
                            oninput={on_identifier_input}
                            disabled={fee_form.submitting}
                        />
                    </div>
                    <StudentInfoPanel
                        student={lookup.state.student.clone()}
                        looking_up={lookup.state.looking_up}
                        message={lookup.state.message.clone()}
                    />
                </fieldset>

                <fieldset class="form-section">
                    <legend>{"Fee Details"}</legend>
                    <div class="form-group">
                        <label for="fee-type">{"Fee Type"}</label>
                        <select
                            id="fee-type"
                            onchange={select_handler(apply, FeeField::FeeType)}
                            disabled={fee_form.submitting}
                        >
                            {select_options(FEE_TYPES, &form.fee_type)}
                        </select>
                    </div>
                    {if form.fee_type_is_other {
                        html! {
                            <div class="form-group">
                                <label for="fee-type-other">{"Fee Type (other)"}</label>
                                <input
                                    type="text"
                                    id="fee-type-other"
                                    placeholder="Describe the fee"
                                    value={form.fee_type_other.clone()}
                                    oninput={input_handler(apply, FeeField::FeeTypeOther)}
                                    disabled={fee_form.submitting}
                                />
                            </div>
                        }
                    } else { html! {} }}
                    <div class="form-group">
                        <label for="course">{"Course"}</label>
                        <input type="text" id="course" value={form.course.clone()} readonly=true />
                    </div>
                    <div class="form-group">
                        <label for="fee-amount">{"Fee Amount"}</label>
                        <input
                            type="number"
                            id="fee-amount"
                            step="0.01"
                            value={form.fee_amount.clone()}
                            oninput={input_handler(apply, FeeField::FeeAmount)}
                            disabled={fee_form.submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="discount-amount">{"Discount"}</label>
                        <input
                            type="number"
                            id="discount-amount"
                            step="0.01"
                            value={form.discount_amount.clone()}
                            oninput={input_handler(apply, FeeField::DiscountAmount)}
                            disabled={fee_form.submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="net-amount">{"Net Amount"}</label>
                        <input type="text" id="net-amount" value={form.net_amount.clone()} readonly=true />
                    </div>
                </fieldset>

                <fieldset class="form-section">
                    <legend>{"Payment"}</legend>
                    <div class="form-group">
                        <label for="payment-method">{"Payment Method"}</label>
                        <select
                            id="payment-method"
                            onchange={select_handler(apply, FeeField::PaymentMethod)}
                            disabled={fee_form.submitting}
                        >
                            {select_options(PAYMENT_METHODS, &form.payment_method)}
                        </select>
                    </div>
                    {if form.payment_method_is_other {
                        html! {
                            <div class="form-group">
                                <label for="payment-method-other">{"Payment Method (other)"}</label>
                                <input
                                    type="text"
                                    id="payment-method-other"
                                    placeholder="Describe the payment method"
                                    value={form.payment_method_other.clone()}
                                    oninput={input_handler(apply, FeeField::PaymentMethodOther)}
                                    disabled={fee_form.submitting}
                                />
                            </div>
                        }
                    } else { html! {} }}
                    <div class="form-group">
                        <label for="transaction-id">{"Transaction ID"}</label>
                        <input
                            type="text"
                            id="transaction-id"
                            placeholder="Receipt or transaction reference"
                            value={form.transaction_id.clone()}
                            oninput={input_handler(apply, FeeField::TransactionId)}
                            disabled={fee_form.submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="payment-date">{"Payment Date"}</label>
                        <input
                            type="date"
                            id="payment-date"
                            max={current_date()}
                            value={form.payment_date.clone()}
                            onchange={date_handler(apply, FeeField::PaymentDate)}
                            disabled={fee_form.submitting}
                        />
                    </div>
                    <div class="form-group">
                        <label for="remarks">{"Remarks"}</label>
                        <textarea
                            id="remarks"
                            placeholder="Optional notes"
                            value={form.remarks.clone()}
                            oninput={on_remarks_input}
                            disabled={fee_form.submitting}
                        />
                    </div>
                </fieldset>

                <button type="submit" class="btn btn-primary" disabled={fee_form.submitting}>
                    {if fee_form.submitting { "Saving..." } else { "Collect Fee" }}
                </button>
            </form>
        </section>
    }
}
