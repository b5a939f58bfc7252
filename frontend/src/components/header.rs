use yew::prelude::*;

/// The view the app is currently showing. There is no router; the header
/// tabs drive this directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    FeeCollection,
    Admissions,
    Students,
    Documents,
    Fees,
}

impl ActiveView {
    pub const ALL: [ActiveView; 5] = [
        ActiveView::FeeCollection,
        ActiveView::Admissions,
        ActiveView::Students,
        ActiveView::Documents,
        ActiveView::Fees,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ActiveView::FeeCollection => "Fee Collection",
            ActiveView::Admissions => "Admissions",
            ActiveView::Students => "Students",
            ActiveView::Documents => "Documents",
            ActiveView::Fees => "Fee Records",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub active_view: ActiveView,
    pub on_select_view: Callback<ActiveView>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Admission Desk"}</h1>
                <nav class="view-tabs">
                    {for ActiveView::ALL.iter().map(|view| {
                        let view = *view;
                        let on_select_view = props.on_select_view.clone();
                        let class = if view == props.active_view {
                            "view-tab active"
                        } else {
                            "view-tab"
                        };
                        html! {
                            <button
                                class={class}
                                onclick={Callback::from(move |_: MouseEvent| on_select_view.emit(view))}
                            >
                                {view.title()}
                            </button>
                        }
                    })}
                </nav>
            </div>
        </header>
    }
}
