use quiz_core::artifact::{Barcode, BoardingPass};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarVm {
    pub x: u32,
    pub width: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarcodeVm {
    pub width: u32,
    pub height: u32,
    pub view_box: String,
    pub bars: Vec<BarVm>,
    pub aria_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StickerVm {
    pub icon: &'static str,
    pub class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardingPassVm {
    pub airline: String,
    pub logo_initials: String,
    pub track_label: String,
    pub date: String,
    pub stickers_label: String,
    pub seat: String,
    pub gate: String,
    pub flight: String,
    pub boarding_time: String,
    pub barcode: BarcodeVm,
    pub stickers: Vec<StickerVm>,
    pub tier_message: &'static str,
}

fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|ch| ch.is_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    if letters.is_empty() {
        "✈".to_string()
    } else {
        letters
    }
}

fn map_barcode(barcode: &Barcode, flight: &str) -> BarcodeVm {
    BarcodeVm {
        width: barcode.width(),
        height: barcode.height(),
        view_box: format!("0 0 {} {}", barcode.width(), barcode.height()),
        bars: barcode
            .bars()
            .iter()
            .map(|bar| BarVm {
                x: bar.x,
                width: bar.width,
            })
            .collect(),
        aria_label: format!("Boarding pass code: {flight}"),
    }
}

#[must_use]
pub fn map_boarding_pass(pass: &BoardingPass) -> BoardingPassVm {
    BoardingPassVm {
        airline: pass.airline.clone(),
        logo_initials: initials(&pass.airline),
        track_label: pass.track_label.clone(),
        date: pass.issued_on.clone(),
        stickers_label: format!("{} / {}", pass.collected, pass.total),
        seat: pass.seat.to_string(),
        gate: pass.gate.clone(),
        flight: pass.flight_code.clone(),
        boarding_time: pass.boarding_time.clone(),
        barcode: map_barcode(&pass.barcode, &pass.flight_code),
        stickers: pass
            .stickers
            .iter()
            .map(|sticker| StickerVm {
                icon: sticker.kind.icon(),
                class: if sticker.collected {
                    "sticker collected"
                } else {
                    "sticker"
                },
            })
            .collect(),
        tier_message: pass.tier.message(),
    }
}
