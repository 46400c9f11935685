mod boarding_pass_vm;
mod landing_vm;
mod question_vm;
mod screen;

pub use boarding_pass_vm::{BarVm, BarcodeVm, BoardingPassVm, StickerVm, map_boarding_pass};
pub use landing_vm::{LandingVm, TrackButtonVm, map_landing};
pub use question_vm::{
    ChoiceState, ChoiceVm, FeedbackTone, FeedbackVm, ImageTileVm, QuestionBodyVm, QuestionVm,
    map_question,
};
pub use screen::{QuizAction, Screen, SignalView};
