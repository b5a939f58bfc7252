use shared::Student;
use yew::prelude::*;

use crate::services::format::format_money;

#[derive(Properties, PartialEq)]
pub struct StudentInfoPanelProps {
    pub student: Option<Student>,
    pub looking_up: bool,
    pub message: Option<String>,
}

/// Informational panel beside the fee form showing the resolved student.
#[function_component(StudentInfoPanel)]
pub fn student_info_panel(props: &StudentInfoPanelProps) -> Html {
    if props.looking_up {
        return html! {
            <div class="student-info looking-up">{"Looking up student..."}</div>
        };
    }

    if let Some(message) = props.message.as_ref() {
        return html! {
            <div class="student-info lookup-message">{message}</div>
        };
    }

    match props.student.as_ref() {
        Some(student) => html! {
            <div class="student-info resolved">
                <h3>{&student.name}</h3>
                <dl>
                    <dt>{"Registration No"}</dt>
                    <dd>{&student.reg_no}</dd>
                    <dt>{"Course"}</dt>
                    <dd>{student.course_label()}</dd>
                    <dt>{"Total Fee"}</dt>
                    <dd>{format_money(student.total_fee)}</dd>
                    <dt>{"Net Fee"}</dt>
                    <dd>{format_money(student.net_fee)}</dd>
                </dl>
            </div>
        },
        None => html! {},
    }
}
