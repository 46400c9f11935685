mod boarding_pass;
mod landing;
mod question;
mod quiz;
mod unavailable;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use boarding_pass::BoardingPassView;
pub use landing::LandingView;
pub use question::QuestionView;
pub use quiz::QuizRoot;
pub use unavailable::UnavailableView;
