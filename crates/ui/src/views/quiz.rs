use std::rc::Rc;

use dioxus::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{QuizController, QuizError};
use tokio::sync::Mutex;
use tracing::debug;

use crate::context::AppContext;
use crate::views::{BoardingPassView, LandingView, QuestionView, UnavailableView};
use crate::vm::{QuizAction, Screen, SignalView};

#[cfg(test)]
use std::cell::RefCell;

/// Shared handle to the controller; actions lock it for their whole duration so they
/// run one at a time.
pub(crate) type ControllerHandle = Rc<Mutex<QuizController<SignalView>>>;

async fn run_action(controller: &ControllerHandle, action: QuizAction) -> Result<(), QuizError> {
    let mut ctl = controller.lock().await;
    match action {
        QuizAction::ChooseTrack(id) => ctl.choose_track(&id),
        QuizAction::Select(selection) => ctl.select(selection).map(|_| ()),
        QuizAction::Next => ctl.advance().await.map(|_| ()),
        QuizAction::Restart => ctl.restart().await,
        QuizAction::SwitchTrack => ctl.switch_track(),
    }
}

#[component]
pub fn QuizRoot() -> Element {
    let ctx = use_context::<AppContext>();
    let screen = use_signal(|| Screen::Loading);

    let controller: ControllerHandle = use_hook(|| {
        let boot = ctx.boot().clone();
        let mut ctl = QuizController::new(
            boot.content,
            boot.images,
            ctx.gateway(),
            SignalView::new(screen),
            ctx.clock(),
        );
        if let Some(seed) = ctx.rng_seed() {
            ctl = ctl.with_rng(StdRng::seed_from_u64(seed));
        }
        Rc::new(Mutex::new(ctl))
    });

    {
        let controller = Rc::clone(&controller);
        use_hook(move || {
            spawn(async move {
                controller.lock().await.start().await;
            })
        });
    }

    let dispatch = {
        let controller = Rc::clone(&controller);
        use_callback(move |action: QuizAction| {
            let controller = Rc::clone(&controller);
            spawn(async move {
                if let Err(err) = run_action(&controller, action.clone()).await {
                    debug!(error = %err, ?action, "action rejected");
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, screen);
            }
        }
    }

    rsx! {
        match screen() {
            Screen::Loading => rsx! {
                section { class: "card shell",
                    p { class: "muted", "Loading questions…" }
                }
            },
            Screen::Unavailable => rsx! { UnavailableView {} },
            Screen::Landing(vm) => rsx! { LandingView { vm, on_action: dispatch } },
            Screen::Question(vm) => rsx! { QuestionView { vm, on_action: dispatch } },
            Screen::Completion(vm) => rsx! { BoardingPassView { vm, on_action: dispatch } },
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizAction>>>>,
    screen: Rc<RefCell<Option<Signal<Screen>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizAction>, screen: Signal<Screen>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.screen.borrow_mut() = Some(screen);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizAction> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn screen(&self) -> Signal<Screen> {
        (*self.screen.borrow()).expect("quiz screen registered")
    }
}
