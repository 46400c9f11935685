use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::ContentModel;
use quiz_core::time::fixed_now;
use services::{AppServices, Boot, Clock, ImageStatuses, PassengerService, PersistenceGateway};
use storage::repository::{InMemoryRepository, Storage};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::QuizRoot;
use crate::views::quiz::QuizTestHandles;
use crate::vm::{QuizAction, Screen};

pub const CONTENT: &str = r#"{
  "meta": { "title": "Quiz", "airline": "Escape Air", "gate": "C3", "flightPrefix": "QZ" },
  "modes": {
    "easy": { "label": "Easy", "items": [
      {"type":"tf","prompt":"Madrid is in Spain.","answer":true,"explain":"It is the capital."},
      {"type":"mcq-image","prompt":"Which dish?","image":"img/paella.png","alt":"Paella pan",
       "choices":["Paella","Sushi"],"answer":0}
    ]},
    "hard": { "label": "Hard", "settings": {"advanceOnAnyAnswer": false, "attemptsBeforeHint": 1},
      "items": [
        {"type":"tf","prompt":"Oranges at La Tomatina?","answer":false,"hint":"Tomatoes!"}
      ]}
  }
}"#;

#[derive(Clone)]
struct TestApp {
    content: Option<Arc<ContentModel>>,
    services: AppServices,
}

impl UiApp for TestApp {
    fn boot(&self) -> Boot {
        Boot {
            content: self.content.clone(),
            images: ImageStatuses::new(),
        }
    }

    fn gateway(&self) -> PersistenceGateway {
        self.services.gateway()
    }

    fn passenger(&self) -> Arc<PassengerService> {
        self.services.passenger()
    }

    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    context: AppContext,
    handles: QuizTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarnessRoot(props: HarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.handles.clone());
    rsx! { QuizRoot {} }
}

pub struct QuizHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    handles: QuizTestHandles,
}

impl QuizHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub async fn act(&mut self, action: QuizAction) {
        let dispatch = self.handles.dispatch();
        self.dom.in_scope(ScopeId::ROOT, || dispatch.call(action));
        self.drive_async().await;
    }

    pub fn screen(&self) -> Screen {
        self.dom.in_scope(ScopeId::ROOT, || self.handles.screen().cloned())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_quiz_harness(content: Option<&str>, repo: InMemoryRepository) -> QuizHarness {
    let content = content.map(|raw| Arc::new(ContentModel::from_json(raw).expect("content")));
    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        content,
        services: AppServices::from_storage(&Storage::from_in_memory(repo.clone())),
    });
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarnessRoot,
        HarnessProps {
            context: build_app_context(&app).with_rng_seed(7),
            handles: handles.clone(),
        },
    );
    QuizHarness { dom, repo, handles }
}
