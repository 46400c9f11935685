use dioxus::prelude::*;

use crate::vm::{LandingVm, QuizAction};

#[component]
pub fn LandingView(vm: LandingVm, on_action: EventHandler<QuizAction>) -> Element {
    let buttons = vm.tracks.iter().map(|track| {
        let id = track.id.clone();
        rsx! {
            button {
                key: "{track.id}",
                class: "mode-btn",
                r#type: "button",
                onclick: move |_| on_action.call(QuizAction::ChooseTrack(id.clone())),
                span { class: "mode-icon", "{track.icon}" }
                span { class: "mode-label", "{track.label}" }
                span { class: "mode-count muted", "{track.count_label}" }
            }
        }
    });

    rsx! {
        section { class: "card", aria_labelledby: "mode-title",
            h2 { id: "mode-title", "Choose your mode" }
            p { class: "muted", "{vm.title}" }
            div { class: "mode-grid", role: "group", aria_label: "Difficulty modes", {buttons} }
        }
    }
}
