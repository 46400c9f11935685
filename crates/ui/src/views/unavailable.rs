use dioxus::prelude::*;

#[component]
pub fn UnavailableView() -> Element {
    rsx! {
        section { class: "card shell", aria_labelledby: "unavailable-title",
            h2 { id: "unavailable-title", "No questions" }
            p { class: "muted", "No question data is available. Check the content source and try again." }
        }
    }
}
