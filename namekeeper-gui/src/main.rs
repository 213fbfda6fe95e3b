use iced::{Element, Task, Theme, application, widget::center};
use namekeeper_lib::Store;
use tracing::{Level, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::name_form::{self, NameForm},
    config::GuiConfig,
};

pub mod components;
pub mod config;

fn main() -> iced::Result {
    application(App::new, App::update, App::view)
        .theme(App::theme)
        .title(App::title)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    NameForm(name_form::Message),
}

struct App {
    title: String,
    theme: Theme,
    // Components
    name_form: NameForm,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        // Human friendly panicking in release mode
        human_panic::setup_panic!();

        // Logging
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");

        let cfg = GuiConfig::load();
        let theme = cfg.theme();

        let store = Store::open_default().map_err(|e| {
            error!("Failed to open the name store: {e}");
            e.to_string()
        });

        let (name_form, name_form_task) = NameForm::new(store, cfg.default_text);

        (
            Self {
                title: "Namekeeper".into(),
                theme,
                name_form,
            },
            name_form_task.map(Message::NameForm),
        )
    }

    // Update application state based on messages passed by view()
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NameForm(msg) => self.name_form.update(msg).map(Message::NameForm),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        center(self.name_form.view().map(Message::NameForm)).into()
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }
}
