use dioxus::prelude::*;

use crate::vm::{
    ChoiceVm, FeedbackTone, ImageTileVm, QuestionBodyVm, QuestionVm, QuizAction,
};

#[component]
fn ImageTile(tile: ImageTileVm) -> Element {
    rsx! {
        div { class: "image-tile",
            if let Some(src) = tile.src.as_ref() {
                figure { class: "image-figure",
                    img { src: "{src}", alt: "{tile.alt}" }
                }
            } else {
                div {
                    class: "image-figure image-fallback",
                    aria_label: "Image missing",
                    "{ImageTileVm::FALLBACK_ICON}"
                }
            }
            div { class: "image-caption", "{tile.alt}" }
        }
    }
}

#[component]
fn Choices(choices: Vec<ChoiceVm>, on_action: EventHandler<QuizAction>) -> Element {
    let buttons = choices.into_iter().enumerate().map(|(idx, choice)| {
        let selection = choice.selection;
        rsx! {
            button {
                key: "{idx}",
                class: choice.state.class(),
                r#type: "button",
                onclick: move |_| on_action.call(QuizAction::Select(selection)),
                "{choice.label}"
            }
        }
    });
    rsx! {
        div { class: "choices", role: "group", aria_label: "Choices", {buttons} }
    }
}

#[component]
pub fn QuestionView(vm: QuestionVm, on_action: EventHandler<QuizAction>) -> Element {
    let section_class = if vm.visual { "card quiz y23" } else { "card quiz" };
    let progress_style = format!("width:{}%", vm.progress_pct);
    let feedback_class = match vm.feedback.as_ref().map(|f| f.tone) {
        Some(FeedbackTone::Correct) => "feedback correct",
        Some(FeedbackTone::Wrong) => "feedback wrong",
        None => "feedback",
    };
    let feedback_text = vm.feedback.as_ref().map(|f| f.text.clone()).unwrap_or_default();
    let hint_text = vm.hint.clone().unwrap_or_default();

    rsx! {
        section { class: "{section_class}", aria_labelledby: "q-title",
            h2 { id: "q-title", "{vm.heading}" }
            div { class: "muted", "{vm.position_label}" }
            div {
                class: "progress",
                role: "progressbar",
                aria_valuemin: "0",
                aria_valuemax: "100",
                aria_valuenow: "{vm.progress_pct}",
                aria_label: "Progress",
                div { class: "bar", style: "{progress_style}" }
            }
            p { class: "prompt", aria_live: "polite", "{vm.prompt}" }
            match vm.body.clone() {
                QuestionBodyVm::Choices { image, choices } => rsx! {
                    if let Some(tile) = image {
                        ImageTile { tile }
                    }
                    Choices { choices, on_action }
                },
                QuestionBodyVm::Unsupported => rsx! {
                    div { class: "choices",
                        p { "Unsupported question type." }
                    }
                },
            }
            div { class: "{feedback_class}", aria_live: "polite", "{feedback_text}" }
            div { class: "hint", aria_live: "polite", "{hint_text}" }
            div { class: "controls",
                button {
                    class: "link-btn",
                    r#type: "button",
                    onclick: move |_| on_action.call(QuizAction::Restart),
                    "Restart"
                }
                button {
                    class: "link-btn",
                    r#type: "button",
                    onclick: move |_| on_action.call(QuizAction::SwitchTrack),
                    "Switch mode"
                }
                button {
                    class: "next-btn",
                    r#type: "button",
                    disabled: !vm.can_advance,
                    onclick: move |_| on_action.call(QuizAction::Next),
                    "Next"
                }
            }
        }
    }
}
