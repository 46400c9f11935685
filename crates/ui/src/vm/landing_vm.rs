use quiz_core::model::{AdvanceMode, ContentModel, TrackId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackButtonVm {
    pub id: TrackId,
    pub icon: &'static str,
    pub label: String,
    pub count_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LandingVm {
    pub title: String,
    pub tracks: Vec<TrackButtonVm>,
}

#[must_use]
pub fn map_landing(content: &ContentModel) -> LandingVm {
    let tracks = content
        .tracks()
        .iter()
        .map(|track| {
            let count = track.len();
            TrackButtonVm {
                id: track.id().clone(),
                icon: match track.settings().advance_mode() {
                    AdvanceMode::AnyAnswer => "👧👦",
                    AdvanceMode::Mastery => "🧑‍🎓",
                },
                label: track.label().to_string(),
                count_label: if count == 1 {
                    "1 question".to_string()
                } else {
                    format!("{count} questions")
                },
            }
        })
        .collect();

    LandingVm {
        title: content.meta().title().to_string(),
        tracks,
    }
}
