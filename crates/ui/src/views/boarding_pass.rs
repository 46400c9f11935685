use dioxus::prelude::*;
use tracing::warn;

use crate::context::AppContext;
use crate::vm::{BarcodeVm, BoardingPassVm, QuizAction};

#[component]
fn BarcodeSvg(barcode: BarcodeVm) -> Element {
    let bars = barcode.bars.iter().enumerate().map(|(idx, bar)| {
        rsx! {
            rect {
                key: "{idx}",
                x: "{bar.x}",
                y: "0",
                width: "{bar.width}",
                height: "{barcode.height}",
                fill: "#111",
            }
        }
    });
    rsx! {
        div { class: "barcode", role: "img", aria_label: "{barcode.aria_label}",
            svg {
                width: "{barcode.width}",
                height: "{barcode.height}",
                view_box: "{barcode.view_box}",
                {bars}
            }
        }
    }
}

#[component]
fn PassengerInput() -> Element {
    let ctx = use_context::<AppContext>();
    let passenger = ctx.passenger();
    let mut name = use_signal(String::new);

    let loader = passenger.clone();
    let _initial = use_resource(move || {
        let loader = loader.clone();
        async move {
            match loader.name().await {
                Ok(stored) => name.set(stored),
                Err(err) => warn!(error = %err, "failed to read passenger name"),
            }
        }
    });

    rsx! {
        input {
            class: "passenger",
            aria_label: "Passenger name",
            placeholder: "Enter your name",
            value: "{name}",
            oninput: move |evt: FormEvent| {
                let value = evt.value();
                name.set(value.clone());
                let passenger = passenger.clone();
                spawn(async move {
                    if let Err(err) = passenger.set_name(&value).await {
                        warn!(error = %err, "failed to save passenger name");
                    }
                });
            },
        }
    }
}

#[component]
pub fn BoardingPassView(vm: BoardingPassVm, on_action: EventHandler<QuizAction>) -> Element {
    let stickers = vm.stickers.iter().enumerate().map(|(idx, sticker)| {
        rsx! {
            span { key: "{idx}", class: sticker.class, "{sticker.icon}" }
        }
    });

    rsx! {
        section { class: "card boarding", aria_labelledby: "bp-title",
            h2 { id: "bp-title", class: "sr-only", "Boarding Pass" }
            div { class: "bp-wrap",
                div { class: "ticket", role: "group", aria_label: "Boarding pass ticket",
                    div { class: "main",
                        div { class: "logo",
                            span { class: "logo-mark", "{vm.logo_initials}" }
                            span { class: "logo-name", "{vm.airline}" }
                        }
                        div { class: "kv",
                            div { class: "caps", "Passenger" }
                            div { PassengerInput {} }
                            div { class: "caps", "Mode" }
                            div { class: "val", "{vm.track_label}" }
                            div { class: "caps", "Date" }
                            div { "{vm.date}" }
                            div { class: "caps", "Stickers" }
                            div { class: "val", "{vm.stickers_label}" }
                            div { class: "caps", "Seat" }
                            div { class: "val mono", "{vm.seat}" }
                            div { class: "caps", "Gate" }
                            div { class: "val mono", "{vm.gate}" }
                            div { class: "caps", "Flight" }
                            div { class: "val mono", "{vm.flight}" }
                        }
                    }
                    div { class: "stub", aria_label: "Detachable stub",
                        div { class: "mini",
                            div { class: "caps", "Airline" }
                            div { class: "val", "{vm.airline}" }
                            div { class: "caps", "Board" }
                            div { class: "val mono", "{vm.boarding_time}" }
                            div { class: "caps", "Gate" }
                            div { class: "val mono", "{vm.gate}" }
                            div { class: "caps", "Seat" }
                            div { class: "val mono", "{vm.seat}" }
                            div { class: "caps", "Flight" }
                            div { class: "val mono", "{vm.flight}" }
                        }
                        BarcodeSvg { barcode: vm.barcode.clone() }
                    }
                }
                div {
                    h3 { class: "caps", "Stickers" }
                    div { class: "stickers", aria_label: "Stickers collected", {stickers} }
                    p { class: "next-steps", "{vm.tier_message}" }
                }
            }
            div { class: "bp-ctas",
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
            }
        }
    }
}
